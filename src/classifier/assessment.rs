use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dataset-level label assigned by the upstream classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Assessment {
    /// Raw edible-sample spectra are explicitly present
    Accepted,
    /// Raw edible-sample spectra might be present
    Maybe,
    /// Raw edible-sample spectra are very unlikely
    Rejected,
}

impl Assessment {
    /// Label as written in the JSON records.
    pub fn as_str(self) -> &'static str {
        match self {
            Assessment::Accepted => "ACCEPTED",
            Assessment::Maybe => "MAYBE",
            Assessment::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An assessment label that is not one of the three known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown assessment label: '{0}'")]
pub struct ParseAssessmentError(pub String);

impl FromStr for Assessment {
    type Err = ParseAssessmentError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCEPTED" => Ok(Assessment::Accepted),
            "MAYBE" => Ok(Assessment::Maybe),
            "REJECTED" => Ok(Assessment::Rejected),
            _ => Err(ParseAssessmentError(s.to_string())),
        }
    }
}
