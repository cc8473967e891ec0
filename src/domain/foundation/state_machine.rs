//! State machine trait for closed status enums.
//!
//! Gives every lifecycle enum the same validated transition API, so callers
//! never assign a new state without asking the enum first.

use super::ValidationError;

/// Trait for enums whose values form a state machine.
///
/// Implementors list their legal edges; `transition_to` and `is_terminal`
/// come for free.
///
/// # Example
///
/// ```ignore
/// let next = Stage::Wish.transition_to(Stage::Outcome)?;
/// assert!(Stage::Summary.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if the edge `self -> target` exists.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns every state reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition, or explains why it is not allowed.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// True when no outgoing transition exists.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kettle {
        Cold,
        Heating,
        Boiled,
    }

    impl StateMachine for Kettle {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Kettle::Cold => vec![Kettle::Heating],
                Kettle::Heating => vec![Kettle::Cold, Kettle::Boiled],
                Kettle::Boiled => vec![],
            }
        }
    }

    #[test]
    fn legal_edge_returns_target() {
        assert_eq!(Kettle::Cold.transition_to(Kettle::Heating), Ok(Kettle::Heating));
    }

    #[test]
    fn illegal_edge_is_a_validation_error() {
        let err = Kettle::Cold.transition_to(Kettle::Boiled).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Cold to Boiled"));
    }

    #[test]
    fn terminal_state_has_no_edges() {
        assert!(Kettle::Boiled.is_terminal());
        assert!(!Kettle::Heating.is_terminal());
    }
}
