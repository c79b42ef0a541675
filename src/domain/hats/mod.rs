//! Six Thinking Hats stage model.
//!
//! A decision moves through six reasoning stages, each represented by a hat
//! color with its own question-framing mode. All ordering logic lives in
//! [`HatSequence`]; nothing else in the crate may hard-code stage order.

mod hat_color;
mod sequence;

pub use hat_color::HatColor;
pub use sequence::HatSequence;
