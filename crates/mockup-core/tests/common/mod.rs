#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{oneshot, Notify};

use mockup_core::client::{GenerateFuture, GenerateRequest, GenerationClient};
use mockup_core::codec::{EncodedImage, SourceImage};
use mockup_core::config::MockupConfig;
use mockup_core::error::MockupError;
use mockup_core::session::{Orchestrator, SessionState};

/// One recorded `generate` call, waiting for the test to answer it.
struct PendingCall {
    prompt: String,
    media_type: String,
    responder: Option<oneshot::Sender<Result<String, String>>>,
}

/// In-memory generation client whose calls only resolve when the test says
/// so, in whatever order the test chooses.
///
/// Calls are numbered in the order `generate` was invoked.
#[derive(Default)]
pub struct GatedClient {
    calls: Mutex<Vec<PendingCall>>,
    arrived: Notify,
}

impl GatedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompt(&self, call: usize) -> String {
        self.calls.lock().unwrap()[call].prompt.clone()
    }

    pub fn media_type(&self, call: usize) -> String {
        self.calls.lock().unwrap()[call].media_type.clone()
    }

    /// Wait until at least `n` calls have been made.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let notified = self.arrived.notified();
                if self.call_count() >= n {
                    return;
                }
                notified.await;
            }
        })
        .await
        .expect("timed out waiting for generation calls");
    }

    pub fn succeed(&self, call: usize, image: &str) {
        self.respond(call, Ok(image.to_string()));
    }

    pub fn fail(&self, call: usize, reason: &str) {
        self.respond(call, Err(reason.to_string()));
    }

    fn respond(&self, call: usize, outcome: Result<String, String>) {
        let responder = self.calls.lock().unwrap()[call]
            .responder
            .take()
            .expect("call already answered");
        // The orchestrator may have aborted the task already.
        let _ = responder.send(outcome);
    }
}

impl GenerationClient for GatedClient {
    fn generate(&self, request: GenerateRequest) -> GenerateFuture {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(PendingCall {
            prompt: request.prompt,
            media_type: request.media_type,
            responder: Some(tx),
        });
        self.arrived.notify_waiters();

        Box::pin(async move {
            match rx.await {
                Ok(Ok(image)) => Ok(EncodedImage::new(image)),
                Ok(Err(reason)) => Err(MockupError::generation(reason)),
                Err(_) => Err(MockupError::generation("call dropped")),
            }
        })
    }
}

pub fn orchestrator(client: &Arc<GatedClient>) -> Orchestrator {
    Orchestrator::new(client.clone())
}

pub fn source_image() -> SourceImage {
    SourceImage {
        payload: EncodedImage::new("cHJvZHVjdA=="),
        media_type: "image/png".into(),
        name: "product.png".into(),
    }
}

pub fn config_with_variations(variations: u32) -> MockupConfig {
    MockupConfig {
        variations,
        ..MockupConfig::default()
    }
}

/// Wait until the session satisfies `predicate`.
pub async fn wait_for_state(orchestrator: &Orchestrator, predicate: impl Fn(&SessionState) -> bool) {
    let mut rx = orchestrator.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| predicate(s)))
        .await
        .expect("timed out waiting for session state")
        .expect("session dropped");
}

/// Encoded PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::new(width, height);
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}
