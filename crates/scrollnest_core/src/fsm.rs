//! Event-driven state transitions
//!
//! Small per-component state machines implement [`StateTransitions`] on a
//! plain enum. Events are `u32` codes owned by the component that defines
//! the states; unknown events simply produce no transition.

use std::hash::Hash;

/// Trait for enums that transition on `u32` event codes
///
/// # Example
///
/// ```
/// use scrollnest_core::StateTransitions;
///
/// const PRESS: u32 = 1;
/// const RELEASE: u32 = 2;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Button {
///     #[default]
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Button {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Button::Up, PRESS) => Some(Button::Down),
///             (Button::Down, RELEASE) => Some(Button::Up),
///             _ => None,
///         }
///     }
/// }
///
/// let mut state = Button::default();
/// assert!(state.apply(PRESS));
/// assert_eq!(state, Button::Down);
/// assert!(!state.apply(PRESS));
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply `event` in place, returning whether the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
