//! HatColor enum representing the six reasoning stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six thinking hats, each a distinct reasoning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatColor {
    Blue,
    White,
    Red,
    Black,
    Yellow,
    Green,
}

impl HatColor {
    /// Returns all hat colors in canonical process order.
    pub fn all() -> &'static [HatColor] {
        &[
            HatColor::Blue,
            HatColor::White,
            HatColor::Red,
            HatColor::Black,
            HatColor::Yellow,
            HatColor::Green,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            HatColor::Blue => "Blue Hat",
            HatColor::White => "White Hat",
            HatColor::Red => "Red Hat",
            HatColor::Black => "Black Hat",
            HatColor::Yellow => "Yellow Hat",
            HatColor::Green => "Green Hat",
        }
    }

    /// Returns the question-framing mode of this stage.
    ///
    /// Used verbatim when prompting the question collaborator, so the
    /// wording here fixes the "flavor" of generated questions.
    pub fn focus(&self) -> &'static str {
        match self {
            HatColor::Blue => "process control: framing the problem and the criteria for a good outcome",
            HatColor::White => "facts and data: what is known, what is missing, and how to get it",
            HatColor::Red => "emotion and intuition: gut feelings about the decision, stated without justification",
            HatColor::Black => "caution and risk: what could go wrong, weaknesses and obstacles",
            HatColor::Yellow => "benefits and opportunity: the value and best-case outcomes of each path",
            HatColor::Green => "creative alternatives: new options, modifications and ways around obstacles",
        }
    }

    /// Returns the lowercase wire name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            HatColor::Blue => "blue",
            HatColor::White => "white",
            HatColor::Red => "red",
            HatColor::Black => "black",
            HatColor::Yellow => "yellow",
            HatColor::Green => "green",
        }
    }
}

impl fmt::Display for HatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for HatColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(HatColor::Blue),
            "white" => Ok(HatColor::White),
            "red" => Ok(HatColor::Red),
            "black" => Ok(HatColor::Black),
            "yellow" => Ok(HatColor::Yellow),
            "green" => Ok(HatColor::Green),
            other => Err(format!("Unknown hat color: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_six_hats() {
        assert_eq!(HatColor::all().len(), 6);
    }

    #[test]
    fn all_returns_hats_in_process_order() {
        let all = HatColor::all();
        assert_eq!(all[0], HatColor::Blue);
        assert_eq!(all[1], HatColor::White);
        assert_eq!(all[2], HatColor::Red);
        assert_eq!(all[3], HatColor::Black);
        assert_eq!(all[4], HatColor::Yellow);
        assert_eq!(all[5], HatColor::Green);
    }

    #[test]
    fn display_name_returns_readable_text() {
        assert_eq!(HatColor::Blue.display_name(), "Blue Hat");
        assert_eq!(HatColor::Green.display_name(), "Green Hat");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        let json = serde_json::to_string(&HatColor::Blue).unwrap();
        assert_eq!(json, "\"blue\"");

        let json = serde_json::to_string(&HatColor::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let hat: HatColor = serde_json::from_str("\"black\"").unwrap();
        assert_eq!(hat, HatColor::Black);
    }

    #[test]
    fn as_str_matches_serde_representation() {
        for hat in HatColor::all() {
            let json = serde_json::to_string(hat).unwrap();
            assert_eq!(json, format!("\"{}\"", hat.as_str()));
        }
    }

    #[test]
    fn parses_from_wire_name() {
        for hat in HatColor::all() {
            let parsed: HatColor = hat.as_str().parse().unwrap();
            assert_eq!(parsed, *hat);
        }
    }

    #[test]
    fn rejects_unknown_wire_name() {
        assert!("purple".parse::<HatColor>().is_err());
    }

    #[test]
    fn every_hat_has_a_distinct_focus() {
        let focuses: Vec<&str> = HatColor::all().iter().map(|h| h.focus()).collect();
        let mut deduped = focuses.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(focuses.len(), deduped.len());
    }
}
