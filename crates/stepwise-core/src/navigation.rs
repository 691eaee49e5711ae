//! Positional navigation between the steps of a lesson.
//!
//! A lesson's steps form a total order by `(sort_index, id)`. Given that
//! ordered sequence, [`resolve_positions`] finds the immediate neighbours of a
//! step. [`Step`](crate::models::Step) memoizes the result in a
//! [`NavigationCache`], so the sequence is scanned at most once per step
//! instance, boundary steps included.
//!
//! # Ordering
//!
//! The navigator does not sort. Callers pass the sequence already ordered the
//! way the database returns it (`ORDER BY sort_index, id`). In-memory callers
//! can use [`order_by_position`] first.
//!
//! ```rust
//! use stepwise_core::navigation::{order_by_position, resolve_positions, StepRef};
//!
//! let mut steps = vec![
//!     StepRef::new(3, "C", 300),
//!     StepRef::new(1, "A", 100),
//!     StepRef::new(2, "B", 200),
//! ];
//! order_by_position(&mut steps);
//!
//! let state = resolve_positions(2, &steps);
//! assert_eq!(state.previous.map(|s| s.id), Some(1));
//! assert_eq!(state.next.map(|s| s.id), Some(3));
//! ```

use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

/// Lightweight reference to a step's position within its lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRef {
    /// Step identifier
    pub id: u64,
    /// Display name of the step
    pub name: String,
    /// Ordering key within the lesson
    pub sort_index: i64,
}

impl StepRef {
    pub fn new(id: u64, name: impl Into<String>, sort_index: i64) -> Self {
        Self {
            id,
            name: name.into(),
            sort_index,
        }
    }
}

/// Anything that occupies a position in a lesson's step sequence.
pub trait Sequenced {
    /// Identifier used to locate the item in the sequence.
    fn step_id(&self) -> u64;

    /// Primary ordering key.
    fn sort_index(&self) -> i64;

    /// Reference handed out as a neighbour.
    fn to_step_ref(&self) -> StepRef;
}

impl Sequenced for StepRef {
    fn step_id(&self) -> u64 {
        self.id
    }

    fn sort_index(&self) -> i64 {
        self.sort_index
    }

    fn to_step_ref(&self) -> StepRef {
        self.clone()
    }
}

/// Resolved neighbours of a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Step immediately before, absent for the first step
    pub previous: Option<StepRef>,
    /// Step immediately after, absent for the last step
    pub next: Option<StepRef>,
}

impl NavigationState {
    /// True when the step has neither neighbour.
    pub fn is_isolated(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

/// Locates `step_id` in `ordered` and returns its neighbours.
///
/// `ordered` must already be sorted by `(sort_index, id)`. A step that is not
/// part of the sequence gets no neighbours.
pub fn resolve_positions<S: Sequenced>(step_id: u64, ordered: &[S]) -> NavigationState {
    let Some(index) = ordered.iter().position(|s| s.step_id() == step_id) else {
        debug!("Step {step_id} not found in its lesson sequence of {} steps", ordered.len());
        return NavigationState::default();
    };

    let previous = index
        .checked_sub(1)
        .and_then(|i| ordered.get(i))
        .map(Sequenced::to_step_ref);
    let next = ordered.get(index + 1).map(Sequenced::to_step_ref);

    NavigationState { previous, next }
}

/// Sorts steps into lesson order: ascending `sort_index`, ties broken by id.
pub fn order_by_position<S: Sequenced>(steps: &mut [S]) {
    steps.sort_by_key(|s| (s.sort_index(), s.step_id()));
}

/// Returns whether `steps` is already in lesson order.
pub fn is_ordered<S: Sequenced>(steps: &[S]) -> bool {
    steps
        .windows(2)
        .all(|pair| (pair[0].sort_index(), pair[0].step_id()) < (pair[1].sort_index(), pair[1].step_id()))
}

/// Per-instance memo for a step's [`NavigationState`].
///
/// Unset until first resolved. Once set it holds even an all-absent state, so
/// a first or last step is not re-resolved on every access.
#[derive(Debug, Default)]
pub struct NavigationCache(OnceLock<NavigationState>);

impl NavigationCache {
    /// Cached state, if resolved.
    pub fn get(&self) -> Option<&NavigationState> {
        self.0.get()
    }

    /// Cached state, resolving with `resolve` on first access.
    pub fn get_or_resolve<F>(&self, resolve: F) -> &NavigationState
    where
        F: FnOnce() -> NavigationState,
    {
        self.0.get_or_init(resolve)
    }

    /// Like [`get_or_resolve`](Self::get_or_resolve) for resolvers that load
    /// the sequence and may fail. Nothing is cached on failure.
    pub fn get_or_try_resolve<F, E>(&self, resolve: F) -> Result<&NavigationState, E>
    where
        F: FnOnce() -> Result<NavigationState, E>,
    {
        if let Some(state) = self.0.get() {
            return Ok(state);
        }
        let state = resolve()?;
        Ok(self.0.get_or_init(|| state))
    }

    pub fn is_resolved(&self) -> bool {
        self.0.get().is_some()
    }
}

impl Clone for NavigationCache {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

// Memoized state never takes part in step equality.
impl PartialEq for NavigationCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
