//! Card tags.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Printed tag on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardTag {
    Space,
    Earth,
    Science,
    Power,
    Building,
    Microbe,
    Animal,
    Plant,
    Event,
    City,
    Venus,
    Jovian,
    Wildlife,
    /// Counts as any tag for requirements, never for scaling.
    Wild,
}

impl CardTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Earth => "earth",
            Self::Science => "science",
            Self::Power => "power",
            Self::Building => "building",
            Self::Microbe => "microbe",
            Self::Animal => "animal",
            Self::Plant => "plant",
            Self::Event => "event",
            Self::City => "city",
            Self::Venus => "venus",
            Self::Jovian => "jovian",
            Self::Wildlife => "wildlife",
            Self::Wild => "wild",
        }
    }
}

impl FromStr for CardTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "space" => Self::Space,
            "earth" => Self::Earth,
            "science" => Self::Science,
            "power" => Self::Power,
            "building" => Self::Building,
            "microbe" => Self::Microbe,
            "animal" => Self::Animal,
            "plant" => Self::Plant,
            "event" => Self::Event,
            "city" => Self::City,
            "venus" => Self::Venus,
            "jovian" => Self::Jovian,
            "wildlife" => Self::Wildlife,
            "wild" => Self::Wild,
            other => return Err(format!("unknown card tag: {other}")),
        })
    }
}

impl std::fmt::Display for CardTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_display() {
        for tag in [CardTag::Space, CardTag::Jovian, CardTag::Wild] {
            assert_eq!(tag.to_string().parse::<CardTag>(), Ok(tag));
        }
        assert!("plants".parse::<CardTag>().is_err());
    }
}
