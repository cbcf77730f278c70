//! Session state engine: batch fan-out, per-result regeneration and the
//! read model shared with every presentation surface.

mod orchestrator;
mod types;
mod view;

pub use orchestrator::Orchestrator;
pub use types::{
    BatchStatus, MockupResult, Operation, ResultId, SessionError, SessionState, Slot, SlotState,
};
pub use view::ResultView;
