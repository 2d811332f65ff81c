//! In-process job queue.
//!
//! A FIFO monitor shared between producers (the HTTP layer) and the worker pool:
//! - `push` appends under the lock and wakes one blocked consumer
//! - `pop` blocks while the queue is empty and re-checks after every wake-up
//! - an optional capacity turns on backpressure, either rejecting or blocking producers
//! - `close` stops intake and lets consumers drain what is left
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

use super::Job;

/// What `push` does when a bounded queue is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Hand the item back to the producer.
    #[default]
    Reject,
    /// Wait until a consumer makes room.
    Block,
}

impl OverflowPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Block => "block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueConfig {
    /// Maximum number of queued items; `None` means unbounded.
    pub capacity: Option<usize>,
    pub overflow: OverflowPolicy,
}

impl QueueConfig {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            capacity: Some(capacity),
            overflow,
        }
    }
}

/// Push failures. The rejected item is always handed back.
#[derive(Debug, Error)]
pub enum QueueError<T> {
    #[error("Queue is full (capacity {capacity})")]
    Full { capacity: usize, item: T },
    #[error("Queue is closed")]
    Closed { item: T },
}

impl<T> QueueError<T> {
    pub fn into_inner(self) -> T {
        match self {
            QueueError::Full { item, .. } | QueueError::Closed { item } => item,
        }
    }
}

#[derive(Debug)]
struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

#[derive(Debug)]
pub struct Queue<T = Job> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    config: QueueConfig,
}

impl<T> Queue<T> {
    pub fn new(config: QueueConfig) -> Self {
        let config = QueueConfig {
            capacity: config.capacity.filter(|capacity| *capacity > 0),
            ..config
        };
        Self {
            state: Mutex::new(State {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            config,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(QueueConfig::unbounded())
    }

    /// Appends `item` at the tail.
    ///
    /// Never blocks on an unbounded queue. On a full bounded queue the
    /// configured [`OverflowPolicy`] decides between rejecting and waiting.
    pub fn push(&self, item: T) -> Result<(), QueueError<T>> {
        self.enqueue(item, self.config.overflow == OverflowPolicy::Block)
    }

    /// Like [`Queue::push`], but never waits for room.
    pub fn try_push(&self, item: T) -> Result<(), QueueError<T>> {
        self.enqueue(item, false)
    }

    fn enqueue(&self, item: T, wait_for_room: bool) -> Result<(), QueueError<T>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(QueueError::Closed { item });
        }

        if let Some(capacity) = self.config.capacity {
            while state.items.len() >= capacity {
                if !wait_for_room {
                    return Err(QueueError::Full { capacity, item });
                }
                self.not_full.wait(&mut state);
                if state.closed {
                    return Err(QueueError::Closed { item });
                }
            }
        }

        state.items.push_back(item);
        drop(state);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes the head item, waiting while the queue is empty.
    ///
    /// Returns `None` only once the queue is closed and fully drained.
    pub fn pop(&self) -> Option<T> {
        self.dequeue(None)
    }

    /// Like [`Queue::pop`], but gives up after `timeout`.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        self.dequeue(Some(Instant::now() + timeout))
    }

    fn dequeue(&self, deadline: Option<Instant>) -> Option<T> {
        let mut state = self.state.lock();
        let mut timed_out = false;
        loop {
            // a wake-up does not guarantee an item: another consumer may have taken it
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }
            if state.closed || timed_out {
                return None;
            }
            match deadline {
                Some(deadline) => {
                    timed_out = self.not_empty.wait_until(&mut state, deadline).timed_out();
                }
                None => self.not_empty.wait(&mut state),
            }
        }
    }

    /// Stops accepting items and wakes every waiting producer and consumer.
    ///
    /// Items already queued are still handed out by `pop`.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        drop(state);

        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.config.capacity
    }

    pub fn config(&self) -> QueueConfig {
        self.config
    }

    pub fn is_full(&self) -> bool {
        match self.config.capacity {
            Some(capacity) => self.len() >= capacity,
            None => false,
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}
