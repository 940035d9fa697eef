use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GameMode {
    Timed,
    Target,
    Unlimited,
    Survival,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "timed" => Ok(GameMode::Timed),
            "target" => Ok(GameMode::Target),
            "unlimited" => Ok(GameMode::Unlimited),
            "survival" => Ok(GameMode::Survival),
            other => Err(format!("Unknown game mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// Per-mode rules; fields a mode does not use stay `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModeRules {
    pub time_limit_secs: Option<u32>,
    pub target_score: Option<u32>,
    pub base_time_secs: Option<u32>,
    pub time_per_word_secs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModeSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub name: String,
    pub description: String,
    pub rules: ModeRules,
    #[ts(type = "Array<string | null>")]
    pub letters: crate::Rack,
}
