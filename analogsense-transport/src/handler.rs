//! Report handler slot shared between a device handle and its reader
//!
//! The handler is taken out of the slot while it runs, so it may replace or
//! clear itself (directly or through a session) without deadlocking. Clearing
//! from any other thread waits for an in-flight dispatch to finish, so once
//! [`HandlerSlot::set`] returns the previous handler never runs again.

use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::types::RawReport;
use crate::ReportHandler;

#[derive(Default)]
struct SlotState {
    handler: Option<ReportHandler>,
    /// Bumped on every `set`, so a dispatch can tell it was superseded
    generation: u64,
    /// Thread currently running the handler
    dispatcher: Option<ThreadId>,
}

/// Holder for the installed [`ReportHandler`]
#[derive(Default)]
pub struct HandlerSlot {
    state: Mutex<SlotState>,
    /// Held for the whole of each dispatch
    running: Mutex<()>,
}

impl HandlerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or clear the handler
    ///
    /// From any thread other than the one dispatching, this waits until the
    /// in-flight call (if any) returns.
    pub fn set(&self, handler: Option<ReportHandler>) {
        let (previous, reentrant) = {
            let mut state = self.state.lock();
            state.generation = state.generation.wrapping_add(1);
            let previous = std::mem::replace(&mut state.handler, handler);
            (previous, state.dispatcher == Some(thread::current().id()))
        };
        drop(previous);

        if !reentrant {
            drop(self.running.lock());
        }
    }

    pub fn is_set(&self) -> bool {
        let state = self.state.lock();
        state.handler.is_some() || state.dispatcher.is_some()
    }

    /// Run the installed handler on `report`; false if none is installed
    pub fn dispatch(&self, report: RawReport) -> bool {
        let _running = self.running.lock();
        let (mut handler, generation) = {
            let mut state = self.state.lock();
            let Some(handler) = state.handler.take() else {
                return false;
            };
            state.dispatcher = Some(thread::current().id());
            (handler, state.generation)
        };

        handler(report);

        // Put it back unless it was replaced or cleared meanwhile
        let superseded = {
            let mut state = self.state.lock();
            state.dispatcher = None;
            if state.generation == generation {
                state.handler = Some(handler);
                None
            } else {
                Some(handler)
            }
        };
        drop(superseded);
        true
    }
}
