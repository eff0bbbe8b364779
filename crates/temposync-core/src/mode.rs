use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::notation::ALL_DIVISION_IDS;

/// What the calculator is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorMode {
    #[default]
    Delay,
    Reverb,
    Lfo,
}

impl CalculatorMode {
    /// Tab order.
    pub const ALL: [CalculatorMode; 3] = [
        CalculatorMode::Delay,
        CalculatorMode::Reverb,
        CalculatorMode::Lfo,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CalculatorMode::Delay => "delay",
            CalculatorMode::Reverb => "reverb",
            CalculatorMode::Lfo => "lfo",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CalculatorMode::Delay => "Delay",
            CalculatorMode::Reverb => "Reverb / Pre-Delay",
            CalculatorMode::Lfo => "LFO",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CalculatorMode::Delay => "Find rhythmically synced delay settings for your tempo.",
            CalculatorMode::Reverb => {
                "Find practical pre-delay and decay combinations from the delay values."
            }
            CalculatorMode::Lfo => "Use delay ms and matching LFO speeds (Hz) for your tempo.",
        }
    }

    /// Note divisions listed in this mode's delay table.
    pub fn note_ids(self) -> &'static [&'static str] {
        match self {
            CalculatorMode::Delay | CalculatorMode::Reverb | CalculatorMode::Lfo => {
                &ALL_DIVISION_IDS
            }
        }
    }

    pub fn shows_reverb_table(self) -> bool {
        match self {
            CalculatorMode::Reverb => true,
            CalculatorMode::Delay | CalculatorMode::Lfo => false,
        }
    }
}

impl fmt::Display for CalculatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalculatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalculatorMode::ALL
            .into_iter()
            .find(|mode| mode.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown calculator mode '{s}'"))
    }
}
