//! Catalog of straight note divisions, longest first.

use serde::Serialize;

/// A rhythmic subdivision measured against one quarter-note beat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteDivision {
    /// Stable key, e.g. `"1/8"`.
    pub id: &'static str,
    pub label: &'static str,
    /// Multiple of one quarter-note beat. Always positive.
    pub beat_value: f64,
    pub description: &'static str,
}

impl NoteDivision {
    /// Label shown in table rows, e.g. `"1/4 (1 Beat)"`.
    pub fn note_label(&self) -> String {
        format!("{} ({})", self.label, self.description)
    }
}

/// Row order is part of the rendered output and must not change.
pub const NOTE_DIVISIONS: [NoteDivision; 9] = [
    NoteDivision {
        id: "1/1",
        label: "1/1",
        beat_value: 4.0,
        description: "1 Bar",
    },
    NoteDivision {
        id: "1/2",
        label: "1/2",
        beat_value: 2.0,
        description: "2 Beats",
    },
    NoteDivision {
        id: "1/4",
        label: "1/4",
        beat_value: 1.0,
        description: "1 Beat",
    },
    NoteDivision {
        id: "1/8",
        label: "1/8",
        beat_value: 0.5,
        description: "1/2 Beat",
    },
    NoteDivision {
        id: "1/16",
        label: "1/16",
        beat_value: 0.25,
        description: "1/4 Beat",
    },
    NoteDivision {
        id: "1/32",
        label: "1/32",
        beat_value: 0.125,
        description: "1/8 Beat",
    },
    NoteDivision {
        id: "1/64",
        label: "1/64",
        beat_value: 0.0625,
        description: "1/16 Beat",
    },
    NoteDivision {
        id: "1/128",
        label: "1/128",
        beat_value: 0.03125,
        description: "1/32 Beat",
    },
    NoteDivision {
        id: "1/256",
        label: "1/256",
        beat_value: 0.015625,
        description: "1/64 Beat",
    },
];

/// Ids of every catalog entry, in catalog order.
pub const ALL_DIVISION_IDS: [&str; 9] = [
    "1/1", "1/2", "1/4", "1/8", "1/16", "1/32", "1/64", "1/128", "1/256",
];

pub fn find_division(id: &str) -> Option<&'static NoteDivision> {
    NOTE_DIVISIONS.iter().find(|division| division.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_positive_and_halving() {
        for pair in NOTE_DIVISIONS.windows(2) {
            assert!(pair[1].beat_value > 0.0);
            assert_eq!(pair[0].beat_value / 2.0, pair[1].beat_value);
        }
    }

    #[test]
    fn id_list_matches_catalog_order() {
        let ids: Vec<_> = NOTE_DIVISIONS.iter().map(|division| division.id).collect();
        assert_eq!(ids, ALL_DIVISION_IDS);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(find_division("1/8").map(|d| d.beat_value), Some(0.5));
        assert_eq!(find_division("1/4").unwrap().note_label(), "1/4 (1 Beat)");
        assert!(find_division("1/3").is_none());
    }
}
