//! Input validator: the synthesis-eligibility gate.
//!
//! Synthesis over a log with no real user input would produce a
//! recommendation invented from thin air, so the completion procedure asks
//! this module whether any stage actually captured something. The check is
//! fail-closed: anything that is not recognizably real user input counts as
//! no input. It never errors and never panics.

use crate::domain::events::{EventContent, StageEvent};

/// Returns true iff `event` is a user_input entry with at least one
/// non-whitespace answer or non-whitespace additional thoughts.
///
/// Every other event type returns false. Malformed stored payloads never
/// reach this function; the store adapters map them to empty response sets
/// on read, which this check then rejects.
pub fn has_real_input(event: &StageEvent) -> bool {
    match event.content() {
        EventContent::UserInput(responses) => responses.has_real_input(),
        _ => false,
    }
}

/// Returns true if any event in the set has real input.
pub fn has_any_real_input(events: &[StageEvent]) -> bool {
    events.iter().any(has_real_input)
}

/// Returns the subset of events that carry real input.
pub fn filter_real_input(events: &[StageEvent]) -> Vec<&StageEvent> {
    events.iter().filter(|e| has_real_input(e)).collect()
}
