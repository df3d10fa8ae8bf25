//! Keyword-based color tags for the calendar.
//!
//! A name can hit several rules ("Weekly research digest"); the first rule in
//! table order wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobColor {
    Yellow,
    Indigo,
    Green,
    Blue,
    Red,
    Purple,
    Orange,
    Neutral,
}

const COLOR_RULES: &[(&[&str], JobColor)] = &[
    (&["morning", "planning"], JobColor::Yellow),
    (&["evening", "night"], JobColor::Indigo),
    (&["research", "news", "digest"], JobColor::Green),
    (
        &["reminder", "nudge", "gratitude", "breathwork"],
        JobColor::Blue,
    ),
    (&["health", "cpu", "quality"], JobColor::Red),
    (&["review", "weekly"], JobColor::Purple),
    (&["event"], JobColor::Orange),
];

pub fn color_for(name: &str) -> JobColor {
    let name = name.to_lowercase();
    COLOR_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(*keyword)))
        .map(|(_, color)| *color)
        .unwrap_or(JobColor::Neutral)
}
