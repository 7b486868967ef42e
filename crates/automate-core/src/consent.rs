//! Consent Gate
//!
//! The mandatory human-approval checkpoint between plan generation and
//! execution. Generated plans can mutate backend state, so no side-effecting
//! call may happen except as the direct, synchronous consequence of
//! [`ConsentGate::approve`].
//!
//! Single-slot by design: a second proposal before the previous one is
//! resolved replaces it (last-proposed-wins, no queue). The gate belongs to
//! one interactive session and is not safe for concurrent callers.

use thiserror::Error;
use tracing::debug;

use crate::plan::ActionPlan;

/// Consent Gate errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsentError {
    /// `approve` was called with nothing pending — a caller logic bug, not a
    /// user-facing condition, so it propagates as a hard error.
    #[error("no pending plan to approve")]
    NoPendingPlan,
}

enum Slot {
    Empty,
    Pending(ActionPlan),
}

/// Single-slot holder of at most one pending ActionPlan.
pub struct ConsentGate {
    slot: Slot,
}

impl ConsentGate {
    /// Create an empty gate.
    pub fn new() -> Self {
        Self { slot: Slot::Empty }
    }

    /// Store a plan as pending, replacing any unresolved previous plan.
    pub fn propose(&mut self, plan: ActionPlan) {
        if matches!(self.slot, Slot::Pending(_)) {
            debug!("replacing unresolved pending plan");
        }
        self.slot = Slot::Pending(plan);
    }

    /// Take the pending plan out for execution, clearing the slot.
    pub fn approve(&mut self) -> Result<ActionPlan, ConsentError> {
        match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Pending(plan) => Ok(plan),
            Slot::Empty => Err(ConsentError::NoPendingPlan),
        }
    }

    /// Clear the slot unconditionally; a no-op when nothing is pending.
    pub fn discard(&mut self) {
        self.slot = Slot::Empty;
    }

    /// The currently pending plan, if any.
    pub fn pending(&self) -> Option<&ActionPlan> {
        match &self.slot {
            Slot::Pending(plan) => Some(plan),
            Slot::Empty => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.slot, Slot::Pending(_))
    }
}

impl Default for ConsentGate {
    fn default() -> Self {
        Self::new()
    }
}
