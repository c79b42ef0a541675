//! Domain layer: pure types and logic, no I/O.

pub mod decision;
pub mod events;
pub mod foundation;
pub mod hats;
pub mod synthesis;
