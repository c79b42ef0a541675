//! Synthesis model: grouped answers in, structured recommendation out.

mod answers;
mod outcome;
mod output;

pub use answers::{AnswersByHat, HatAnswers, StageAnswer};
pub use outcome::SummaryOutcome;
pub use output::{HatPerspective, OptionAnalysis, RecommendedOption, SynthesisOutput};
