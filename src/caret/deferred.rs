use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::selection::Selection;

/// Identifies one scheduled selection write. Tokens are never reused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn value(self) -> u64 { self.0 }
}

/// At most one selection write waiting for the next frame. Scheduling a new
/// write replaces the waiting one; a frame callback carrying a stale token
/// does nothing.
#[derive(Debug, Clone, Default)]
pub struct DeferredSelection {
    next_token: u64,
    pending: Option<(RequestToken, Selection)>,
}

impl DeferredSelection {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Queue `selection` for the next frame, discarding any earlier request.
    pub fn schedule(&mut self, selection: Selection) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token += 1;

        if let Some((stale, _)) = self.pending.replace((token, selection)) {
            trace!("Replacing deferred selection {} with {}", stale.0, token.0);
        }

        token
    }

    /// Drop the waiting request, if any. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take();

        if let Some((token, _)) = cancelled {
            trace!("Cancelled deferred selection {}", token.0);
        }

        cancelled.is_some()
    }

    /// Called when the frame for `token` arrives. Returns the selection to
    /// write if `token` is still the current request.
    pub fn fire(&mut self, token: RequestToken) -> Option<Selection> {
        match self.pending {
            Some((current, selection)) if current == token => {
                self.pending = None;
                Some(selection)
            }
            _ => {
                trace!("Ignoring stale deferred selection {}", token.0);
                None
            }
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<RequestToken> { self.pending.map(|(token, _)| token) }
}
