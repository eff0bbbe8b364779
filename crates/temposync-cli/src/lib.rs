//! Terminal front end for the temposync calculator: tables, tap tempo and
//! clipboard copy on top of `temposync-core`.

pub mod clipboard;
pub mod commands;
pub mod render;
pub mod tap;
