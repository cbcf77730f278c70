use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::client::{GenerateRequest, GenerationClient};
use crate::codec::{EncodedImage, SourceImage};
use crate::config::MockupConfig;
use crate::error::{MockupError, Result};
use crate::prompt;

use super::types::{
    BatchStatus, MockupResult, Operation, ResultId, SessionError, SessionState, Slot, SlotState,
};
use super::view::ResultView;

const MISSING_INPUT_MESSAGE: &str = "Please upload a product image first.";

/// Owns the session state and runs every operation that mutates it.
///
/// Cheap to clone; clones drive the same session. State changes are
/// published through a watch channel, see [`Orchestrator::subscribe`].
#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<dyn GenerationClient>,
    state: Arc<watch::Sender<SessionState>>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            client,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// By-id handle to a result of the current set.
    pub fn view(&self, id: ResultId) -> Option<ResultView> {
        let rx = self.state.subscribe();
        let revision = rx.borrow().result(id)?.revision;
        Some(ResultView::new(id, revision, rx))
    }

    /// Generate `config.variations` mockups of `source` concurrently.
    ///
    /// The batch is all-or-nothing: results are committed only once every
    /// request succeeded, and the first failure discards the whole set.
    /// Returns [`MockupError::Superseded`] when another batch started before
    /// this one finished; the newer batch's state is left untouched.
    pub async fn start_batch(
        &self,
        config: &MockupConfig,
        source: Option<&SourceImage>,
    ) -> Result<Vec<MockupResult>> {
        let Some(source) = source else {
            self.set_error(Operation::Batch, MISSING_INPUT_MESSAGE);
            return Err(MockupError::InputMissing);
        };
        if let Err(err) = config.validate() {
            self.set_error(Operation::Batch, err.to_string());
            return Err(err);
        }

        let variations = config.variations as usize;
        let config = Arc::new(config.clone());
        let ids: Vec<ResultId> = (0..variations).map(|_| ResultId::next()).collect();

        let mut batch = 0;
        self.state.send_modify(|s| {
            s.batch += 1;
            batch = s.batch;
            s.status = BatchStatus::Running;
            s.slots = ids
                .iter()
                .map(|&id| Slot {
                    id,
                    state: SlotState::Pending,
                })
                .collect();
            s.results.clear();
            s.regenerating.clear();
            s.error = None;
            s.config = Some(Arc::clone(&config));
            s.source = Some(source.clone());
        });
        info!(batch, variations, source = %source.name, "Starting batch");

        let mut tasks = JoinSet::new();
        for index in 0..variations {
            // Compiled per variation so every result owns the exact prompt used.
            let prompt = prompt::compile(&config);
            let request = self.client.generate(GenerateRequest::new(source, prompt.clone()));
            tasks.spawn(async move { (index, prompt, request.await) });
        }

        let mut settled: Vec<Option<(String, EncodedImage)>> = vec![None; variations];
        while let Some(joined) = tasks.join_next().await {
            let (index, prompt, outcome) = match joined {
                Ok(done) => done,
                Err(join_err) => {
                    tasks.abort_all();
                    let err = MockupError::generation(format!("generation task failed: {join_err}"));
                    return Err(self.fail_batch(batch, None, err));
                }
            };

            let image = match outcome {
                Ok(image) => image,
                Err(err) => {
                    tasks.abort_all();
                    return Err(self.fail_batch(batch, Some(index), err));
                }
            };

            let current = self.state.send_if_modified(|s| {
                if s.batch != batch {
                    return false;
                }
                s.slots[index].state = SlotState::Ready;
                true
            });
            if !current {
                tasks.abort_all();
                warn!(batch, "Discarding completions of a superseded batch");
                return Err(MockupError::Superseded);
            }
            debug!(batch, index, "Variation ready");
            settled[index] = Some((prompt, image));
        }

        let results: Option<Vec<MockupResult>> = ids
            .iter()
            .zip(settled)
            .map(|(&id, entry)| {
                entry.map(|(prompt, image)| MockupResult {
                    id,
                    image,
                    prompt,
                    revision: 0,
                })
            })
            .collect();
        let Some(results) = results else {
            let err = MockupError::generation("a variation finished without a result");
            return Err(self.fail_batch(batch, None, err));
        };

        let committed = self.state.send_if_modified(|s| {
            if s.batch != batch {
                return false;
            }
            s.results = results.clone();
            s.status = BatchStatus::Completed;
            true
        });
        if !committed {
            warn!(batch, "Batch superseded before commit");
            return Err(MockupError::Superseded);
        }

        info!(batch, count = results.len(), "Batch completed");
        Ok(results)
    }

    /// Re-run generation for one result with a new prompt, keeping its id.
    ///
    /// Other results stay untouched and can be inspected or regenerated
    /// meanwhile. A second call for an id that is already in flight is
    /// rejected with [`MockupError::RegenerationInFlight`].
    pub async fn regenerate(&self, id: ResultId, prompt: impl Into<String>) -> Result<MockupResult> {
        let prompt = prompt.into();
        let operation = Operation::Regenerate(id);

        let mut admission = Err(MockupError::UnknownResult(id));
        self.state.send_if_modified(|s| {
            if s.result(id).is_none() {
                let message = regenerate_failure(&MockupError::UnknownResult(id));
                s.error = Some(SessionError::new(operation, message));
                return true;
            }
            if s.is_regenerating(id) {
                admission = Err(MockupError::RegenerationInFlight(id));
                return false;
            }
            let Some(source) = s.source.clone() else {
                admission = Err(MockupError::InputMissing);
                s.error = Some(SessionError::new(operation, MISSING_INPUT_MESSAGE));
                return true;
            };
            s.regenerating.insert(id);
            s.error = None;
            admission = Ok((s.batch, source));
            true
        });
        let (batch, source) = admission?;

        let _in_flight = InFlight {
            state: &self.state,
            id,
            batch,
        };
        info!(%id, batch, "Regenerating result");

        let outcome = self
            .client
            .generate(GenerateRequest::new(&source, prompt.clone()))
            .await;

        let mut finished = Err(MockupError::Superseded);
        self.state.send_if_modified(|s| {
            if s.batch != batch {
                return false;
            }
            s.regenerating.remove(&id);
            match outcome {
                Ok(image) => match s.results.iter_mut().find(|r| r.id == id) {
                    Some(result) => {
                        result.image = image;
                        result.prompt = prompt;
                        result.revision += 1;
                        finished = Ok(result.clone());
                    }
                    None => finished = Err(MockupError::UnknownResult(id)),
                },
                Err(err) => {
                    s.error = Some(SessionError::new(operation, regenerate_failure(&err)));
                    finished = Err(err);
                }
            }
            true
        });

        match &finished {
            Ok(result) => info!(%id, revision = result.revision, "Result regenerated"),
            Err(MockupError::Superseded) => warn!(%id, "Discarding regeneration of a superseded batch"),
            Err(err) => warn!(%id, error = %err, "Regeneration failed"),
        }
        finished
    }

    fn set_error(&self, operation: Operation, message: impl Into<String>) {
        let error = SessionError::new(operation, message);
        self.state.send_modify(|s| s.error = Some(error));
    }

    /// Mark `batch` failed if it is still current. Returns the error to hand
    /// back to the caller.
    fn fail_batch(&self, batch: u64, index: Option<usize>, err: MockupError) -> MockupError {
        let message = format!("Failed to generate mockups: {err}");
        let current = self.state.send_if_modified(|s| {
            if s.batch != batch {
                return false;
            }
            if let Some(slot) = index.and_then(|i| s.slots.get_mut(i)) {
                slot.state = SlotState::Errored;
            }
            s.status = BatchStatus::Failed;
            s.results.clear();
            s.error = Some(SessionError::new(Operation::Batch, message));
            true
        });
        if !current {
            warn!(batch, error = %err, "Ignoring failure of a superseded batch");
            return MockupError::Superseded;
        }
        warn!(batch, ?index, error = %err, "Batch failed");
        err
    }
}

fn regenerate_failure(err: &MockupError) -> String {
    format!("Failed to regenerate the mockup: {err}")
}

/// Clears the busy marker of a regeneration whose future is dropped early.
struct InFlight<'a> {
    state: &'a watch::Sender<SessionState>,
    id: ResultId,
    batch: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state
            .send_if_modified(|s| s.batch == self.batch && s.regenerating.remove(&self.id));
    }
}
