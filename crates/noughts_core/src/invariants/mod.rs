//! First-class invariants for a game session.
//!
//! Invariants are logical properties that must hold after every engine
//! operation. The engine checks them in debug builds; they are also
//! testable on their own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod alternating_marks;
pub mod history;

pub use alternating_marks::AlternatingMarksInvariant;
pub use history::{BoundedHistoryInvariant, SingleWinInvariant, UniqueMovesInvariant};

/// All session invariants as a composable set.
pub type SessionInvariants = (
    UniqueMovesInvariant,
    BoundedHistoryInvariant,
    AlternatingMarksInvariant,
    SingleWinInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameSession;
    use crate::types::Cell;

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        let session = GameSession::new();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut session = GameSession::new();
        // Ten moves, with a repeat.
        session.moves_mut().extend(Cell::ALL);
        session.moves_mut().push(Cell::ALL[0]);

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert!(descriptions.contains(&UniqueMovesInvariant::description()));
        assert!(descriptions.contains(&BoundedHistoryInvariant::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        let session = GameSession::new();
        type TwoInvariants = (UniqueMovesInvariant, BoundedHistoryInvariant);
        assert!(TwoInvariants::check_all(&session).is_ok());
    }
}
