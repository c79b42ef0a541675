//! Decision domain module.
//!
//! A decision is the aggregate driven through the six-hat process: it owns
//! the process status and the current hat, and is the authorization root for
//! everything recorded against it. Options are created with the decision and
//! never change afterwards.

mod aggregate;
mod option;
mod status;

pub use aggregate::{Decision, MAX_TITLE_LENGTH};
pub use option::DecisionOption;
pub use status::DecisionStatus;
