//! Game configuration and match setup files

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GameError;
use crate::game::{GameKind, Player};

/// What kind of dart may finish an X01 leg
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutRule {
    Single,
    #[default]
    Double,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct X01Config {
    /// Starting score (301, 501, ...)
    pub variant: u32,
    pub out_rule: OutRule,
    /// Legs needed to win the match
    pub legs: u32,
}

impl Default for X01Config {
    fn default() -> Self {
        Self {
            variant: 501,
            out_rule: OutRule::Double,
            legs: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CricketConfig {
    pub marks_to_close: u32,
    pub legs: u32,
}

impl Default for CricketConfig {
    fn default() -> Self {
        Self {
            marks_to_close: 3,
            legs: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Doubles and trebles skip ahead by their multiplier
    pub doubles_advance_extra: bool,
    /// Finish on the bull after 20
    pub includes_bull: bool,
    pub legs: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            doubles_advance_extra: false,
            includes_bull: false,
            legs: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub legs: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { legs: 1 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShanghaiConfig {
    /// Target number of round 1
    pub start_number: u32,
    pub rounds: u32,
    pub legs: u32,
}

impl Default for ShanghaiConfig {
    fn default() -> Self {
        Self {
            start_number: 1,
            rounds: 7,
            legs: 1,
        }
    }
}

/// Target of one Halve It round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalveItTarget {
    Number(u8),
    Double,
    Triple,
    Bull,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalveItConfig {
    pub starting_score: u32,
    pub targets: Vec<HalveItTarget>,
    pub legs: u32,
}

impl Default for HalveItConfig {
    fn default() -> Self {
        Self {
            starting_score: 40,
            targets: vec![
                HalveItTarget::Number(15),
                HalveItTarget::Number(16),
                HalveItTarget::Double,
                HalveItTarget::Number(17),
                HalveItTarget::Number(18),
                HalveItTarget::Triple,
                HalveItTarget::Number(19),
                HalveItTarget::Number(20),
                HalveItTarget::Bull,
            ],
            legs: 1,
        }
    }
}

/// Config for any game variant, tagged by game id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "kebab-case")]
pub enum GameConfig {
    X01(X01Config),
    Cricket(CricketConfig),
    AroundTheClock(ClockConfig),
    AroundTheWorld(WorldConfig),
    Shanghai(ShanghaiConfig),
    HalveIt(HalveItConfig),
}

impl GameConfig {
    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::X01(_) => GameKind::X01,
            GameConfig::Cricket(_) => GameKind::Cricket,
            GameConfig::AroundTheClock(_) => GameKind::AroundTheClock,
            GameConfig::AroundTheWorld(_) => GameKind::AroundTheWorld,
            GameConfig::Shanghai(_) => GameKind::Shanghai,
            GameConfig::HalveIt(_) => GameKind::HalveIt,
        }
    }

    /// Default config for a game variant
    pub fn default_for(kind: GameKind) -> Self {
        match kind {
            GameKind::X01 => GameConfig::X01(X01Config::default()),
            GameKind::Cricket => GameConfig::Cricket(CricketConfig::default()),
            GameKind::AroundTheClock => GameConfig::AroundTheClock(ClockConfig::default()),
            GameKind::AroundTheWorld => GameConfig::AroundTheWorld(WorldConfig::default()),
            GameKind::Shanghai => GameConfig::Shanghai(ShanghaiConfig::default()),
            GameKind::HalveIt => GameConfig::HalveIt(HalveItConfig::default()),
        }
    }

    /// Reject values no game can be played with
    pub fn validate(&self) -> Result<(), GameError> {
        let legs = match self {
            GameConfig::X01(c) => {
                if c.variant < 2 {
                    return Err(invalid(format!("x01 variant {} is below 2", c.variant)));
                }
                c.legs
            }
            GameConfig::Cricket(c) => {
                if c.marks_to_close == 0 {
                    return Err(invalid("marks_to_close must be at least 1"));
                }
                c.legs
            }
            GameConfig::AroundTheClock(c) => c.legs,
            GameConfig::AroundTheWorld(c) => c.legs,
            GameConfig::Shanghai(c) => {
                if c.rounds == 0 {
                    return Err(invalid("shanghai needs at least one round"));
                }
                if !(1..=20).contains(&c.start_number) {
                    return Err(invalid(format!("shanghai start number {} is not 1-20", c.start_number)));
                }
                if c.rounds > 21 - c.start_number {
                    return Err(invalid(format!(
                        "shanghai from {} over {} rounds runs past 20",
                        c.start_number, c.rounds
                    )));
                }
                c.legs
            }
            GameConfig::HalveIt(c) => {
                if c.targets.is_empty() {
                    return Err(invalid("halve it needs at least one target"));
                }
                for target in &c.targets {
                    if let HalveItTarget::Number(n) = target {
                        if !(1..=20).contains(n) {
                            return Err(invalid(format!("halve it target {} is not 1-20", n)));
                        }
                    }
                }
                c.legs
            }
        };
        if legs == 0 {
            return Err(invalid("legs must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> GameError {
    GameError::InvalidConfig(msg.into())
}

/// Players plus game config, as stored in a setup file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSetup {
    pub players: Vec<Player>,
    pub config: GameConfig,
}

impl MatchSetup {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let setup: MatchSetup = serde_json::from_str(&content)?;
        Ok(setup)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
