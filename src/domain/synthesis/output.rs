//! Structured result produced by the synthesis collaborator.

use crate::domain::hats::HatColor;
use serde::{Deserialize, Serialize};

/// One synthesis sentence for a stage that had real input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatPerspective {
    pub hat: HatColor,
    pub summary: String,
}

/// Per-option assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionAnalysis {
    /// Option title as created with the decision.
    pub option: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    /// Overall score on a 0-10 scale, when the collaborator provides one.
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub summary: String,
}

/// The option the collaborator recommends, with its reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedOption {
    pub option: String,
    pub reasoning: String,
}

/// Structured output of the synthesis collaborator.
///
/// `perspectives` holds one entry per stage that had real input; `insights`
/// is expected to carry three bullet conclusions; the remaining sections are
/// optional enrichments the collaborator may or may not produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SynthesisOutput {
    #[serde(default)]
    pub perspectives: Vec<HatPerspective>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub options_analysis: Vec<OptionAnalysis>,
    #[serde(default)]
    pub recommended_option: Option<RecommendedOption>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    /// Free-text recommendation; always present in a real synthesis.
    #[serde(default)]
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_payload() {
        let json = r#"{"recommendation": "Take the offer."}"#;
        let output: SynthesisOutput = serde_json::from_str(json).unwrap();
        assert_eq!(output.recommendation, "Take the offer.");
        assert!(output.perspectives.is_empty());
        assert!(output.recommended_option.is_none());
    }

    #[test]
    fn deserializes_full_payload() {
        let json = r#"{
            "perspectives": [{"hat": "white", "summary": "The offer expires Friday."}],
            "insights": ["Timing dominates", "Risk is recoverable", "Upside is real"],
            "options_analysis": [
                {"option": "Take the offer", "pros": ["Growth"], "cons": ["Commute"], "score": 7.5, "summary": "Strong"}
            ],
            "recommended_option": {"option": "Take the offer", "reasoning": "Best growth path."},
            "next_steps": ["Negotiate start date"],
            "recommendation": "Take the offer."
        }"#;

        let output: SynthesisOutput = serde_json::from_str(json).unwrap();
        assert_eq!(output.perspectives[0].hat, HatColor::White);
        assert_eq!(output.insights.len(), 3);
        assert_eq!(output.options_analysis[0].score, Some(7.5));
        assert_eq!(
            output.recommended_option.as_ref().unwrap().option,
            "Take the offer"
        );
    }

    #[test]
    fn round_trips_through_json() {
        let output = SynthesisOutput {
            perspectives: vec![HatPerspective {
                hat: HatColor::Black,
                summary: "Main risk is burnout.".to_string(),
            }],
            insights: vec!["One".to_string()],
            recommendation: "Wait a month.".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&output).unwrap();
        let back: SynthesisOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
    }
}
