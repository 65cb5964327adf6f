//! Shift-register seeding modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the shift register's initial bit vector is populated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitState {
    /// Bits drawn uniformly at random; the all-zero vector is never used.
    #[default]
    Random,
    /// Every bit set to 1. Fully deterministic.
    Ones,
}

impl InitState {
    /// Names accepted by [`FromStr`].
    pub const NAMES: [&'static str; 2] = ["random", "ones"];

    /// Lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            InitState::Random => "random",
            InitState::Ones => "ones",
        }
    }

    /// Whether repeated generation yields identical output.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, InitState::Ones)
    }
}

impl fmt::Display for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown seeding mode name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unsupported init state `{name}`, expected one of {:?}", InitState::NAMES)]
pub struct ParseInitStateError {
    pub name: String,
}

impl FromStr for InitState {
    type Err = ParseInitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(InitState::Random),
            "ones" => Ok(InitState::Ones),
            _ => Err(ParseInitStateError { name: s.to_string() }),
        }
    }
}
