//! HatSequence - Centralized ordering logic for the six-hat process.
//!
//! The facilitation process moves through the six hats in one fixed order.
//! This module consolidates all ordering logic into a single location so no
//! call site hard-codes stage order.
//!
//! # Stage Order
//!
//! 1. Blue → 2. White → 3. Red → 4. Black → 5. Yellow → 6. Green
//!
//! # The `None` ambiguity
//!
//! A decision's current hat is `Option<HatColor>`, and `None` carries two
//! meanings: "process not yet started" (before the first stage action) and,
//! through [`HatSequence::is_complete`], "process finished". Callers must
//! disambiguate with `Decision::status`, never with the current hat alone.
//! This matches the persisted data, where `current_hat` is NULL both before
//! the first action and for legacy completed rows.

use crate::domain::hats::HatColor;

/// Central location for stage ordering logic.
///
/// All ordering-related queries go through this type.
pub struct HatSequence;

impl HatSequence {
    /// The canonical order of the six hats.
    pub const ORDER: [HatColor; 6] = [
        HatColor::Blue,
        HatColor::White,
        HatColor::Red,
        HatColor::Black,
        HatColor::Yellow,
        HatColor::Green,
    ];

    /// Returns all hats in order.
    pub fn all() -> &'static [HatColor; 6] {
        &Self::ORDER
    }

    /// Returns the 0-based index of a hat in the sequence.
    ///
    /// # Panics
    ///
    /// Never panics: every HatColor variant is in ORDER.
    #[inline]
    pub fn order_index(hat: HatColor) -> usize {
        Self::ORDER
            .iter()
            .position(|&h| h == hat)
            .expect("All HatColor variants must be in ORDER")
    }

    /// Computes the stage that follows `current`.
    ///
    /// - `None` reads as "not yet started" and yields the first stage
    ///   (`Some(Blue)`).
    /// - The last stage (`Green`) yields `None`: the process leaves the
    ///   sequence.
    /// - Any other stage yields the one immediately after it.
    pub fn next(current: Option<HatColor>) -> Option<HatColor> {
        match current {
            None => Some(Self::first()),
            Some(hat) => {
                let idx = Self::order_index(hat);
                Self::ORDER.get(idx + 1).copied()
            }
        }
    }

    /// Returns true when `current` is `None` or the last stage.
    ///
    /// `None` here conflates "not yet started" with "finished"; this is the
    /// documented behavior of the process contract, not an oversight. Pair
    /// this check with `Decision::status` to tell the two apart.
    pub fn is_complete(current: Option<HatColor>) -> bool {
        match current {
            None => true,
            Some(hat) => hat == Self::last(),
        }
    }

    /// Returns the first stage in the sequence.
    pub fn first() -> HatColor {
        Self::ORDER[0]
    }

    /// Returns the last stage in the sequence.
    pub fn last() -> HatColor {
        Self::ORDER[Self::ORDER.len() - 1]
    }

    /// Returns true if this is the first stage.
    pub fn is_first(hat: HatColor) -> bool {
        hat == Self::first()
    }

    /// Returns true if this is the last stage.
    pub fn is_last(hat: HatColor) -> bool {
        hat == Self::last()
    }

    /// Returns a "stage N of M" label for progress displays.
    pub fn position_label(hat: HatColor) -> String {
        format!("stage {} of {}", Self::order_index(hat) + 1, Self::ORDER.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_contains_all_six_hats() {
        assert_eq!(HatSequence::ORDER.len(), 6);
        for hat in HatColor::all() {
            assert!(HatSequence::ORDER.contains(hat));
        }
    }

    #[test]
    fn order_index_returns_correct_position() {
        assert_eq!(HatSequence::order_index(HatColor::Blue), 0);
        assert_eq!(HatSequence::order_index(HatColor::White), 1);
        assert_eq!(HatSequence::order_index(HatColor::Red), 2);
        assert_eq!(HatSequence::order_index(HatColor::Black), 3);
        assert_eq!(HatSequence::order_index(HatColor::Yellow), 4);
        assert_eq!(HatSequence::order_index(HatColor::Green), 5);
    }

    #[test]
    fn next_of_none_is_blue() {
        assert_eq!(HatSequence::next(None), Some(HatColor::Blue));
    }

    #[test]
    fn next_returns_subsequent_stage_for_every_adjacency() {
        assert_eq!(HatSequence::next(Some(HatColor::Blue)), Some(HatColor::White));
        assert_eq!(HatSequence::next(Some(HatColor::White)), Some(HatColor::Red));
        assert_eq!(HatSequence::next(Some(HatColor::Red)), Some(HatColor::Black));
        assert_eq!(HatSequence::next(Some(HatColor::Black)), Some(HatColor::Yellow));
        assert_eq!(HatSequence::next(Some(HatColor::Yellow)), Some(HatColor::Green));
    }

    #[test]
    fn next_of_green_leaves_the_sequence() {
        assert_eq!(HatSequence::next(Some(HatColor::Green)), None);
    }

    #[test]
    fn is_complete_for_none_and_green() {
        // None reads as complete; the conflation with "not started" is
        // intentional and documented. Callers check Decision::status.
        assert!(HatSequence::is_complete(None));
        assert!(HatSequence::is_complete(Some(HatColor::Green)));
    }

    #[test]
    fn is_complete_false_mid_sequence() {
        assert!(!HatSequence::is_complete(Some(HatColor::Blue)));
        assert!(!HatSequence::is_complete(Some(HatColor::White)));
        assert!(!HatSequence::is_complete(Some(HatColor::Red)));
        assert!(!HatSequence::is_complete(Some(HatColor::Black)));
        assert!(!HatSequence::is_complete(Some(HatColor::Yellow)));
    }

    #[test]
    fn first_and_last_bound_the_sequence() {
        assert_eq!(HatSequence::first(), HatColor::Blue);
        assert_eq!(HatSequence::last(), HatColor::Green);
        assert!(HatSequence::is_first(HatColor::Blue));
        assert!(!HatSequence::is_first(HatColor::White));
        assert!(HatSequence::is_last(HatColor::Green));
        assert!(!HatSequence::is_last(HatColor::Yellow));
    }

    #[test]
    fn position_label_is_one_based() {
        assert_eq!(HatSequence::position_label(HatColor::Blue), "stage 1 of 6");
        assert_eq!(HatSequence::position_label(HatColor::Green), "stage 6 of 6");
    }

    fn arb_hat() -> impl Strategy<Value = HatColor> {
        prop::sample::select(HatColor::all().to_vec())
    }

    proptest! {
        /// Iterating `next` from any stage terminates within ORDER.len()
        /// steps and visits strictly increasing order indices.
        #[test]
        fn next_terminates_and_is_monotonic(start in arb_hat()) {
            let mut current = Some(start);
            let mut last_index = HatSequence::order_index(start);
            let mut steps = 0;

            while let Some(hat) = HatSequence::next(current) {
                prop_assert!(HatSequence::order_index(hat) > last_index);
                last_index = HatSequence::order_index(hat);
                current = Some(hat);
                steps += 1;
                prop_assert!(steps <= HatSequence::ORDER.len());
            }
        }
    }
}
