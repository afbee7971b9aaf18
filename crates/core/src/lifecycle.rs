//! Page lifecycle: the one-shot ready trigger and the request state

use std::cell::Cell;

use crate::error::FetchError;

/// Fires exactly once, on the first ready signal
#[derive(Debug, Default)]
pub struct ReadyLatch {
    fired: Cell<bool>,
}

impl ReadyLatch {
    pub const fn new() -> Self {
        Self {
            fired: Cell::new(false),
        }
    }

    /// True for the first caller only
    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// Tracks the single outstanding settings request
///
/// `Idle -> InFlight -> Idle`, with no retry edge. A second request while one
/// is in flight is refused.
#[derive(Debug, Default)]
pub struct Populator {
    state: Cell<RequestState>,
}

impl Populator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        self.state.get()
    }

    /// Enter `InFlight`; the returned guard goes back to `Idle` when dropped
    pub fn begin(&self) -> Result<InFlight<'_>, FetchError> {
        if self.state.get() == RequestState::InFlight {
            return Err(FetchError::Busy);
        }
        self.state.set(RequestState::InFlight);
        Ok(InFlight { owner: self })
    }
}

/// Marks a request in flight for as long as it lives
#[derive(Debug)]
pub struct InFlight<'a> {
    owner: &'a Populator,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.owner.state.set(RequestState::Idle);
    }
}
