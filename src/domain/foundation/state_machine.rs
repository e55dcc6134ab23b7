//! State machine trait for step enums.
//!
//! Gives every enumerated step type one place to declare which moves are
//! legal, so handlers can validate a transition before persisting it.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Step {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Step::Main => vec![Step::AddressSection, Step::Settings],
///             // ... etc
///         }
///     }
/// }
///
/// let next = current.transition_to(Step::Settings)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
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
}
