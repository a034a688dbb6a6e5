//! Target spoken languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    El,
    Sv,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::El, Locale::Sv];

    /// Tag used for output directory names and config keys.
    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::El => "el",
            Self::Sv => "sv",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "el" => Ok(Self::El),
            "sv" => Ok(Self::Sv),
            other => Err(format!("unsupported locale '{other}' (expected en, el or sv)")),
        }
    }
}
