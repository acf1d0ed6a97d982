//! Properties every checkers [`Match`](super::Match) keeps between moves.
//!
//! Pieces stand only on dark squares, neither color ever fields more than a
//! full set of men, and every piece missing from the board is accounted for
//! by a capture in the move log. [`Match`](super::Match) checks the whole
//! [`CheckersInvariants`] set after each move and undo in debug builds.

/// A property of a checkers position that no legal move or undo can break.
pub trait Invariant<S> {
    /// True when `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// What the property promises, as reported when it fails.
    fn description() -> &'static str;
}

/// A broken invariant, named by its description.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the broken invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Records a violation of the invariant described by `description`.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    fn of<S, I: Invariant<S>>(state: &S) -> Option<Self> {
        (!I::holds(state)).then(|| Self::new(I::description()))
    }
}

/// Several invariants checked against the same position.
///
/// Every member is checked even after one fails, so a corrupted board
/// reports all the ways it is corrupted.
pub trait InvariantSet<S> {
    /// Checks every member, returning all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! invariant_set {
    ($($member:ident),+) => {
        impl<S, $($member),+> InvariantSet<S> for ($($member,)+)
        where
            $($member: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(InvariantViolation::of::<S, $member>(state)),+]
                    .into_iter()
                    .flatten()
                    .collect();
                if violations.is_empty() { Ok(()) } else { Err(violations) }
            }
        }
    };
}

invariant_set!(I1, I2);
invariant_set!(I1, I2, I3);

pub mod log_consistent;
pub mod piece_budget;
pub mod playable_squares;

pub use log_consistent::LogConsistentInvariant;
pub use piece_budget::PieceBudgetInvariant;
pub use playable_squares::PlayableSquaresInvariant;

/// Everything a running match must satisfy.
pub type CheckersInvariants = (
    PlayableSquaresInvariant,
    PieceBudgetInvariant,
    LogConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::{Match, Move, Player, Position};

    fn fresh() -> Match {
        Match::new(0, Player::new("red"), Player::new("white"))
    }

    #[test]
    fn test_invariant_set_holds_for_new_match() {
        assert!(CheckersInvariants::check_all(&fresh()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = fresh();
        let opening = Move::new(Position::new(5, 2), Position::new(4, 3));
        assert!(game.validate_move(opening).is_ok());
        game.make_move(opening);
        assert!(game.validate_turn().is_ok());
        game.end_turn();
        assert!(CheckersInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (PlayableSquaresInvariant, PieceBudgetInvariant);
        assert!(TwoInvariants::check_all(&fresh()).is_ok());
    }

    struct NeverHolds;

    impl Invariant<Match> for NeverHolds {
        fn holds(_: &Match) -> bool {
            false
        }

        fn description() -> &'static str {
            "never holds"
        }
    }

    #[test]
    fn test_every_violation_is_reported() {
        type Broken = (NeverHolds, PieceBudgetInvariant, NeverHolds);
        let violations = Broken::check_all(&fresh()).unwrap_err();
        assert_eq!(
            violations,
            vec![InvariantViolation::new("never holds"), InvariantViolation::new("never holds")]
        );
    }

    #[test]
    fn test_violation_displays_description() {
        let violation = InvariantViolation::new(PieceBudgetInvariant::description());
        assert_eq!(violation.to_string(), PieceBudgetInvariant::description());
    }
}
