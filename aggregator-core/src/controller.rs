// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The aggregator state machine.
//!
//! [`Controller`] owns the accumulated value and the pending queue and moves
//! between three phases through a single [`Controller::transition`] function:
//!
//! ```text
//!  Initializing --Initialized(v)--> Idle --Drain (queue non-empty)--> Processing
//!                                    ^                                    |
//!                                    +------------Combined(v)-------------+
//! ```
//!
//! The controller never runs user code. It tells its driver what to do next
//! through [`Output`]: announce readiness, announce a new value, or combine a
//! popped value with the current one. At most one `Combine` is outstanding at
//! any time; another is only handed out after `Combined` comes back.
//!
//! ```
//! use aggregator_core::{Controller, Input, Output, Phase};
//!
//! let mut controller = Controller::<i32, i32>::new();
//! controller.transition(Input::Enqueue(5));
//! assert_eq!(controller.transition(Input::Drain), Output::Stay);
//!
//! assert_eq!(controller.transition(Input::Initialized(0)), Output::Ready(0));
//! assert_eq!(
//!     controller.transition(Input::Drain),
//!     Output::Combine { value: 5, current: 0 }
//! );
//! assert_eq!(controller.phase(), Phase::Processing);
//! assert_eq!(controller.transition(Input::Combined(5)), Output::Data(5));
//! assert_eq!(controller.get(), Some(&5));
//! ```

use crate::PendingQueue;

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the initial value; incoming values are buffered.
    Initializing,
    /// Ready, with no combine in flight.
    Idle,
    /// Ready, with exactly one combine in flight.
    Processing,
}

/// Everything that can happen to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<T, V> {
    /// The initializer delivered the starting value.
    Initialized(V),
    /// A value was added.
    Enqueue(T),
    /// Try to start the next combine.
    Drain,
    /// The in-flight combine delivered its result.
    Combined(V),
}

/// What the driver has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output<T, V> {
    /// Nothing to do.
    Stay,
    /// Announce readiness with the initial value, then drain.
    Ready(V),
    /// Announce the freshly combined value, then drain.
    Data(V),
    /// Combine `value` into `current` and report back with `Input::Combined`.
    Combine {
        /// The value popped from the head of the queue.
        value: T,
        /// The accumulated value to fold into.
        current: V,
    },
}

#[derive(Debug)]
enum State<V> {
    Initializing,
    Idle(V),
    Processing(V),
}

/// Explicit finite-state machine behind every aggregator.
#[derive(Debug)]
pub struct Controller<T, V> {
    state: State<V>,
    pending: PendingQueue<T>,
}

impl<T, V> Controller<T, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Initializing,
            pending: PendingQueue::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.state {
            State::Initializing => Phase::Initializing,
            State::Idle(_) => Phase::Idle,
            State::Processing(_) => Phase::Processing,
        }
    }

    /// `true` once the initial value has been delivered. Never reverts.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        !matches!(self.state, State::Initializing)
    }

    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self.state, State::Processing(_))
    }

    /// Ready, idle and nothing left to combine.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.state, State::Idle(_)) && self.pending.is_empty()
    }

    /// The accumulated value, or `None` while still initializing.
    #[must_use]
    pub const fn get(&self) -> Option<&V> {
        match &self.state {
            State::Initializing => None,
            State::Idle(value) | State::Processing(value) => Some(value),
        }
    }

    #[must_use]
    pub const fn pending(&self) -> &PendingQueue<T> {
        &self.pending
    }
}

impl<T, V: Clone> Controller<T, V> {
    /// Applies `input` and reports the follow-up work.
    pub fn transition(&mut self, input: Input<T, V>) -> Output<T, V> {
        match input {
            Input::Enqueue(value) => {
                self.pending.push(value);
                Output::Stay
            }
            Input::Initialized(value) => {
                if matches!(self.state, State::Initializing) {
                    self.state = State::Idle(value.clone());
                    Output::Ready(value)
                } else {
                    warn!("initial value delivered while {:?}; ignored", self.phase());
                    Output::Stay
                }
            }
            Input::Drain => match &self.state {
                State::Idle(current) => match self.pending.pop() {
                    Some(value) => {
                        let current = current.clone();
                        self.state = State::Processing(current.clone());
                        Output::Combine { value, current }
                    }
                    None => Output::Stay,
                },
                State::Initializing | State::Processing(_) => Output::Stay,
            },
            Input::Combined(value) => {
                if matches!(self.state, State::Processing(_)) {
                    self.state = State::Idle(value.clone());
                    Output::Data(value)
                } else {
                    warn!("combined value delivered while {:?}; ignored", self.phase());
                    Output::Stay
                }
            }
        }
    }
}

impl<T, V> Default for Controller<T, V> {
    fn default() -> Self {
        Self::new()
    }
}
