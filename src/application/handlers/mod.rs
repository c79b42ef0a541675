//! Command and query handlers.

pub mod decision;
