use anyhow::Context;
use crossbeam_channel::Sender;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::net::client::ThreadClient;
use crate::net::protocol::ThreadEvent;
use crate::util::config::ViewerConfig;
use crate::util::ids::PostId;

/// Anything that can start a thread request and later report it as a
/// `ThreadEvent` carrying the returned id.
pub trait ThreadSource {
    fn request(&mut self, post: &PostId) -> u64;

    /// Abandons the in-flight request, if any.
    fn cancel(&mut self) {}
}

/// Runs thread requests on a background runtime and pushes their outcome
/// into a channel. Only the newest request is live: issuing a new one
/// cancels the previous.
pub struct Fetcher {
    runtime: Runtime,
    client: Arc<ThreadClient>,
    tx: Sender<ThreadEvent>,
    next_id: u64,
    in_flight: Option<(u64, CancellationToken)>,
}

impl Fetcher {
    pub fn new(config: &ViewerConfig, tx: Sender<ThreadEvent>) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("threadviz-fetch")
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?;
        Ok(Self {
            runtime,
            client: Arc::new(ThreadClient::new(config)?),
            tx,
            next_id: 0,
            in_flight: None,
        })
    }
}

impl ThreadSource for Fetcher {
    fn request(&mut self, post: &PostId) -> u64 {
        self.cancel();
        self.next_id += 1;
        let id = self.next_id;
        let token = CancellationToken::new();
        self.in_flight = Some((id, token.clone()));

        tracing::info!(request = id, post = %post, "fetching comment thread");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let post = post.clone();
        self.runtime.spawn(async move {
            let event = tokio::select! {
                _ = token.cancelled() => ThreadEvent::cancelled(id),
                result = client.fetch_thread(&post) => match result {
                    Ok(payload) => ThreadEvent::loaded(id, payload),
                    Err(e) => ThreadEvent::failed(id, e.to_string()),
                },
            };
            let _ = tx.send(event);
        });
        id
    }

    fn cancel(&mut self) {
        if let Some((id, token)) = self.in_flight.take() {
            tracing::debug!(request = id, "cancelling thread request");
            token.cancel();
        }
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        self.cancel();
    }
}
