use tokio::sync::watch;

use super::types::{MockupResult, ResultId, SessionState};

/// A surface's reference to one result, by id.
///
/// Reading through the handle always yields the latest version of the
/// result, so an in-place regeneration shows up in every surface holding a
/// view without re-subscribing.
pub struct ResultView {
    id: ResultId,
    seen_revision: u32,
    rx: watch::Receiver<SessionState>,
}

impl ResultView {
    pub(super) fn new(id: ResultId, revision: u32, rx: watch::Receiver<SessionState>) -> Self {
        Self {
            id,
            seen_revision: revision,
            rx,
        }
    }

    pub fn id(&self) -> ResultId {
        self.id
    }

    /// Latest version, or `None` once a new batch replaced the set.
    pub fn current(&self) -> Option<MockupResult> {
        self.rx.borrow().result(self.id).cloned()
    }

    pub fn is_regenerating(&self) -> bool {
        self.rx.borrow().is_regenerating(self.id)
    }

    /// Wait for the next revision of this result.
    ///
    /// Returns `None` when the result disappears or the session is dropped.
    pub async fn changed(&mut self) -> Option<MockupResult> {
        loop {
            let latest = self.rx.borrow_and_update().result(self.id).cloned();
            match latest {
                None => return None,
                Some(result) if result.revision != self.seen_revision => {
                    self.seen_revision = result.revision;
                    return Some(result);
                }
                Some(_) => {}
            }
            if self.rx.changed().await.is_err() {
                return None;
            }
        }
    }
}
