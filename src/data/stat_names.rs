//! Display labels for the reference service's base stat names.

use serde::Serialize;

/// (reference stat name, local display label).
pub const STAT_LABEL_TABLE: [(&str, &str); 6] = [
    ("hp", "HP"),
    ("attack", "공격"),
    ("defense", "방어"),
    ("special-attack", "특수공격"),
    ("special-defense", "특수방어"),
    ("speed", "스피드"),
];

/// Highest base stat a creature can have; stat bars are drawn against it.
pub const MAX_BASE_STAT: u32 = 255;

/// Local label for a stat, or the stat name itself when the table has no entry.
pub fn stat_label(name: &str) -> &str {
    STAT_LABEL_TABLE
        .iter()
        .find(|(reference, _)| reference.eq_ignore_ascii_case(name.trim()))
        .map(|(_, label)| *label)
        .unwrap_or(name)
}

/// One labelled stat bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub name: String,
    pub label: String,
    pub value: u32,
    /// `value / MAX_BASE_STAT`, capped at 1.
    pub ratio: f64,
}

impl StatLine {
    pub fn new(name: &str, value: u32) -> Self {
        Self {
            name: name.to_string(),
            label: stat_label(name).to_string(),
            value,
            ratio: (f64::from(value) / f64::from(MAX_BASE_STAT)).min(1.0),
        }
    }
}
