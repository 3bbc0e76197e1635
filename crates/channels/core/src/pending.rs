//! Pending request handle.
//!
//! A [`PendingRequest`] is returned as soon as an operation is issued and is
//! resolved exactly once when the transport completes. Callbacks may be
//! attached before or after resolution.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ChannelsError;

type SuccessFn<T> = Box<dyn FnOnce(T) + Send>;
type FailureFn = Box<dyn FnOnce(ChannelsError) + Send>;

/// Resolution state. The inner `Option` becomes `None` once the outcome has
/// been handed to a callback.
enum Outcome<T> {
    Unresolved,
    Success(Option<T>),
    Failure(Option<ChannelsError>),
}

struct Inner<T> {
    outcome: Outcome<T>,
    on_success: Option<SuccessFn<T>>,
    on_failure: Option<FailureFn>,
}

/// Handle to an in-flight operation.
///
/// Clones share the same state; the issuing client keeps one clone purely to
/// deliver the outcome.
pub struct PendingRequest<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> PendingRequest<T> {
    /// Create an unresolved request.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                outcome: Outcome::Unresolved,
                on_success: None,
                on_failure: None,
            })),
        }
    }

    /// Register the success handler.
    ///
    /// Replaces any previously registered success handler. If the request
    /// already succeeded and the value has not been delivered yet, the handler
    /// runs immediately on the calling thread.
    ///
    /// The value is moved into the first handler that receives it. A handler
    /// registered after that is dropped without being called, as is a
    /// success handler registered on a failed request.
    pub fn on_success<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        let mut guard = self.lock();
        let state = &mut *guard;

        let ready = match &mut state.outcome {
            Outcome::Unresolved => {
                state.on_success = Some(Box::new(callback));
                return self;
            }
            Outcome::Success(value) => value.take(),
            Outcome::Failure(_) => None,
        };
        drop(guard);

        if let Some(value) = ready {
            callback(value);
        }
        self
    }

    /// Register the failure handler.
    ///
    /// Symmetric to [`on_success`](Self::on_success): the error goes to the
    /// first handler that receives it, later handlers are dropped uncalled.
    pub fn on_failure<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(ChannelsError) + Send + 'static,
    {
        let mut guard = self.lock();
        let state = &mut *guard;

        let ready = match &mut state.outcome {
            Outcome::Unresolved => {
                state.on_failure = Some(Box::new(callback));
                return self;
            }
            Outcome::Failure(error) => error.take(),
            Outcome::Success(_) => None,
        };
        drop(guard);

        if let Some(error) = ready {
            callback(error);
        }
        self
    }

    /// Resolve with a value. Returns `false` if the request was already resolved.
    pub fn resolve_success(&self, value: T) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;

        if !matches!(state.outcome, Outcome::Unresolved) {
            drop(guard);
            tracing::warn!("ignoring success for an already resolved request");
            return false;
        }

        // The failure path can no longer happen.
        state.on_failure = None;

        match state.on_success.take() {
            Some(callback) => {
                state.outcome = Outcome::Success(None);
                drop(guard);
                callback(value);
            }
            None => state.outcome = Outcome::Success(Some(value)),
        }
        true
    }

    /// Resolve with an error. Returns `false` if the request was already resolved.
    pub fn resolve_failure(&self, error: ChannelsError) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;

        if !matches!(state.outcome, Outcome::Unresolved) {
            drop(guard);
            tracing::warn!(error = %error, "ignoring failure for an already resolved request");
            return false;
        }

        state.on_success = None;

        match state.on_failure.take() {
            Some(callback) => {
                state.outcome = Outcome::Failure(None);
                drop(guard);
                callback(error);
            }
            None => state.outcome = Outcome::Failure(Some(error)),
        }
        true
    }

    /// Resolve from a `Result`.
    pub fn resolve(&self, result: Result<T, ChannelsError>) -> bool {
        match result {
            Ok(value) => self.resolve_success(value),
            Err(error) => self.resolve_failure(error),
        }
    }

    /// Whether an outcome has been determined.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.lock().outcome, Outcome::Unresolved)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + 'static> PendingRequest<T> {
    /// Wait for the outcome.
    ///
    /// Registers both handlers, replacing any set earlier. Returns `None` if
    /// the outcome was already delivered to a previously registered handler.
    pub async fn outcome(self) -> Option<Result<T, ChannelsError>> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let failure_tx = Arc::clone(&tx);

        self.on_success(move |value| {
            if let Some(tx) = tx.lock().unwrap_or_else(PoisonError::into_inner).take() {
                let _ = tx.send(Ok(value));
            }
        })
        .on_failure(move |error| {
            if let Some(tx) = failure_tx.lock().unwrap_or_else(PoisonError::into_inner).take() {
                let _ = tx.send(Err(error));
            }
        });
        drop(self);

        rx.await.ok()
    }
}

impl<T> Clone for PendingRequest<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for PendingRequest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for PendingRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.lock().outcome {
            Outcome::Unresolved => "unresolved",
            Outcome::Success(_) => "success",
            Outcome::Failure(_) => "failure",
        };
        f.debug_struct("PendingRequest").field("state", &state).finish()
    }
}
