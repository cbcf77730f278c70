use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::codec::{EncodedImage, SourceImage};
use crate::config::MockupConfig;

static NEXT_RESULT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of one result slot.
///
/// Allocated from a process-wide counter, so ids never repeat within a batch
/// or across batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultId(u64);

impl ResultId {
    pub fn next() -> Self {
        Self(NEXT_RESULT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// One generated image and the prompt that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockupResult {
    pub id: ResultId,
    pub image: EncodedImage,
    pub prompt: String,
    /// Bumped by every successful regeneration of this id.
    pub revision: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Ready,
    Errored,
}

/// A position in the batch, reserved at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub id: ResultId,
    pub state: SlotState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Batch,
    Regenerate(ResultId),
}

/// The single user-visible error of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionError {
    pub operation: Operation,
    pub message: String,
}

impl SessionError {
    pub(crate) fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything the presentation surfaces can observe.
///
/// Only the orchestrator writes it; surfaces receive it through a watch
/// channel and can only borrow it immutably.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Generation counter, bumped by every batch start.
    pub batch: u64,
    pub status: BatchStatus,
    /// One slot per requested variation, in dispatch order.
    pub slots: Vec<Slot>,
    /// Committed results, in slot order. Empty unless the batch completed.
    pub results: Vec<MockupResult>,
    /// Results with a regeneration in flight.
    pub regenerating: BTreeSet<ResultId>,
    pub error: Option<SessionError>,
    /// Configuration of the current batch.
    pub config: Option<Arc<MockupConfig>>,
    /// Product image of the current batch, reused by regeneration.
    pub source: Option<SourceImage>,
}

impl SessionState {
    pub fn result(&self, id: ResultId) -> Option<&MockupResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn index_of(&self, id: ResultId) -> Option<usize> {
        self.results.iter().position(|r| r.id == id)
    }

    pub fn is_regenerating(&self, id: ResultId) -> bool {
        self.regenerating.contains(&id)
    }

    pub fn is_running(&self) -> bool {
        self.status == BatchStatus::Running
    }

    /// True while a batch or any regeneration is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_running() || !self.regenerating.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state == SlotState::Ready)
            .count()
    }
}
