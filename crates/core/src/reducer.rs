//! Reducer trait for client-side state machines.

/// Pure state transition: `(state, action) -> new state`.
///
/// Reducers must not perform IO or side effects, and must be total over their
/// action type: every action yields a state, there is no error path. Owners
/// that hold the current state (stores) call `reduce` and swap the result in.
pub trait Reducer: Sized {
    type Action: Clone + core::fmt::Debug;

    /// Produce the next state. `self` is left untouched.
    fn reduce(&self, action: &Self::Action) -> Self;

    /// Fold a sequence of actions, starting from `self`.
    fn reduce_all<'a, I>(&self, actions: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self: Clone,
        Self::Action: 'a,
    {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.reduce(action))
    }
}
