#![forbid(unsafe_code)]

//! Promise-like completion handles for `present` and `dismiss`.
//!
//! A [`Completion`] is a future that resolves once the sheet operation it was
//! returned from has finished. Operations that fail validation hand out an
//! already-rejected completion; operations waiting on the platform hand out a
//! pending one that the sheet resolves from its surface event path.
//!
//! Everything here is single-threaded: completions are resolved on the same
//! event loop that drives the sheet, never from another thread.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::channel::oneshot;

use crate::error::SheetError;

type Outcome = Result<(), SheetError>;

/// Completion of a `present` or `dismiss` call.
///
/// Dropping a `Completion` does not cancel the operation.
#[derive(Debug)]
#[must_use = "a completion reports whether the operation succeeded"]
pub struct Completion {
    state: State,
}

#[derive(Debug)]
enum State {
    Ready(Option<Outcome>),
    Waiting(oneshot::Receiver<Outcome>),
}

impl Completion {
    /// An already-resolved completion.
    pub(crate) fn ready(outcome: Outcome) -> Self {
        Self {
            state: State::Ready(Some(outcome)),
        }
    }

    pub(crate) fn rejected(error: SheetError) -> Self {
        Self::ready(Err(error))
    }

    /// Non-blocking check. Returns the outcome once, then `None`.
    pub fn try_outcome(&mut self) -> Option<Outcome> {
        match &mut self.state {
            State::Ready(outcome) => outcome.take(),
            State::Waiting(rx) => match rx.try_recv() {
                Ok(Some(outcome)) => {
                    self.state = State::Ready(None);
                    Some(outcome)
                }
                Ok(None) => None,
                Err(oneshot::Canceled) => {
                    self.state = State::Ready(None);
                    Some(Err(SheetError::Abandoned))
                }
            },
        }
    }
}

impl Future for Completion {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            State::Ready(outcome) => match outcome.take() {
                Some(outcome) => Poll::Ready(outcome),
                // Polled again after completion.
                None => Poll::Ready(Err(SheetError::Abandoned)),
            },
            State::Waiting(rx) => Pin::new(rx)
                .poll(cx)
                .map(|received| received.unwrap_or(Err(SheetError::Abandoned))),
        }
    }
}

/// Pending completions for one kind of operation.
#[derive(Debug, Default)]
pub(crate) struct Waiters {
    senders: Vec<oneshot::Sender<Outcome>>,
}

impl Waiters {
    /// Register a new waiter and return its completion.
    pub(crate) fn push(&mut self) -> Completion {
        let (tx, rx) = oneshot::channel();
        self.senders.push(tx);
        Completion {
            state: State::Waiting(rx),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Resolve and clear every waiter.
    pub(crate) fn resolve_all(&mut self, outcome: Outcome) {
        for tx in self.senders.drain(..) {
            // Receiver dropped: nobody is listening.
            let _ = tx.send(outcome.clone());
        }
    }
}
