//! # Operation Lifecycle
//!
//! Tracks a single asynchronous request through
//!
//! ```text
//! Idle ──start──▶ Pending ──fulfilled──▶ Succeeded
//!                    └─────rejected───▶ Failed
//! ```
//!
//! By default only an `Idle` operation may start; a
//! [`restartable`](OperationTracker::restartable) tracker may also start from
//! a terminal status. Either way the check plus the move to `Pending` is a
//! single store transition. A caller that loses that race gets
//! [`OperationOutcome::Skipped`] and no request is issued. Terminal states are
//! left only by a session reset.
//!
//! Every start carries a fresh [`RequestId`]. A result is reduced only while
//! the slice still reports that id in flight; a reset in between drops it,
//! and the run reports [`OperationOutcome::Discarded`].

use crate::core::reducer::Reducer;
use crate::core::store::SliceStore;
use bulletin_core::effects::TransportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use uuid::Uuid;

/// Lifecycle status of a tracked operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    /// Never started
    #[default]
    Idle,
    /// Request in flight
    Pending,
    /// Request fulfilled
    Succeeded,
    /// Request rejected
    Failed,
}

impl OperationStatus {
    /// Whether a new request may start from this status.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a refreshable operation may start again from this status.
    pub fn can_restart(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether the operation has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Status label, as used by hosts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// A fresh, unique request id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event emitted at each lifecycle transition.
///
/// Slices must ignore `Fulfilled` and `Rejected` unless `request` is the one
/// they recorded at `Started`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent<T> {
    /// The request was issued
    Started {
        /// Id of the issued request
        request: RequestId,
    },
    /// The request resolved with a payload
    Fulfilled {
        /// Request that resolved
        request: RequestId,
        /// Response payload
        payload: T,
    },
    /// The request failed; `message` is never empty
    Rejected {
        /// Request that failed
        request: RequestId,
        /// Human-readable failure message
        message: String,
    },
}

/// What a tracked run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationOutcome {
    /// Guard refused to start; no request was made
    Skipped {
        /// Status that blocked the start
        status: OperationStatus,
    },
    /// Request fulfilled
    Succeeded,
    /// Request rejected
    Failed {
        /// Message recorded in the slice
        message: String,
    },
    /// The request settled after the slice moved on (e.g. a session reset);
    /// its result was dropped
    Discarded,
}

/// Runs one guarded request against a slice store.
///
/// `status` reads the operation's status out of the slice, `in_flight` the
/// request it is waiting on; `lift` wraps a lifecycle event into the slice's
/// event type.
pub struct OperationTracker<'a, S: Reducer, T> {
    name: &'static str,
    store: &'a SliceStore<S>,
    status: fn(&S) -> OperationStatus,
    in_flight: fn(&S) -> Option<RequestId>,
    lift: fn(LifecycleEvent<T>) -> S::Event,
    restartable: bool,
}

impl<'a, S: Reducer, T> OperationTracker<'a, S, T> {
    /// Tracker for the operation `name` on `store`.
    pub fn new(
        name: &'static str,
        store: &'a SliceStore<S>,
        status: fn(&S) -> OperationStatus,
        in_flight: fn(&S) -> Option<RequestId>,
        lift: fn(LifecycleEvent<T>) -> S::Event,
    ) -> Self {
        Self {
            name,
            store,
            status,
            in_flight,
            lift,
            restartable: false,
        }
    }

    /// Allow starting again once the previous request has settled.
    pub fn restartable(mut self) -> Self {
        self.restartable = true;
        self
    }

    fn may_start(&self, status: OperationStatus) -> bool {
        if self.restartable {
            status.can_restart()
        } else {
            status.can_start()
        }
    }

    /// Start the operation if allowed, await `request`, and record the result.
    ///
    /// `observe` sees every lifecycle event after it has been reduced. A
    /// discarded result is not reduced and not observed.
    pub async fn run<F, Fut>(&self, send: F, mut observe: impl FnMut(&S::Event)) -> OperationOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let status = self.status;
        let request = RequestId::new();
        let started = (self.lift)(LifecycleEvent::Started { request });
        if !self
            .store
            .apply_if(|state| self.may_start(status(state)), &started)
        {
            let current = status(&self.store.snapshot());
            tracing::debug!(operation = self.name, status = %current, "operation already started, skipping");
            return OperationOutcome::Skipped { status: current };
        }
        observe(&started);
        tracing::debug!(operation = self.name, %request, "operation pending");

        let (event, outcome) = match send().await {
            Ok(payload) => (
                LifecycleEvent::Fulfilled { request, payload },
                OperationOutcome::Succeeded,
            ),
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(operation = self.name, error = %err, "operation rejected");
                (
                    LifecycleEvent::Rejected {
                        request,
                        message: message.clone(),
                    },
                    OperationOutcome::Failed { message },
                )
            }
        };

        let event = (self.lift)(event);
        let in_flight = self.in_flight;
        if !self
            .store
            .apply_if(|state| in_flight(state) == Some(request), &event)
        {
            tracing::debug!(operation = self.name, %request, "slice moved on, result discarded");
            return OperationOutcome::Discarded;
        }
        observe(&event);
        tracing::debug!(operation = self.name, ?outcome, "operation settled");
        outcome
    }
}
