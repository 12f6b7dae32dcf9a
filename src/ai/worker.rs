//! Background worker for text generation requests
//!
//! Requests run on a small tokio runtime so the shell's event loop never
//! blocks. Every request gets a caller-side timeout and resolves to exactly
//! one [`AiReply`] posted back through a calloop channel, unless it was
//! cancelled first.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use calloop::channel::Sender;
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;

use super::{AiContext, TextService, OFFLINE_REPLY};

pub type RequestId = u64;

/// Settled request, delivered on the event loop
#[derive(Debug, Clone)]
pub struct AiReply {
    pub id: RequestId,
    pub context: AiContext,
    pub text: String,
    /// The service did not answer within the timeout
    pub timed_out: bool,
}

/// Owns the runtime and the set of in-flight requests
pub struct AiWorker {
    runtime: Runtime,
    service: Arc<dyn TextService>,
    replies: Sender<AiReply>,
    timeout: Duration,
    in_flight: HashMap<RequestId, AbortHandle>,
    next_id: RequestId,
}

impl AiWorker {
    pub fn new(
        service: Arc<dyn TextService>,
        replies: Sender<AiReply>,
        timeout: Duration,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("flick-ai")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            service,
            replies,
            timeout,
            in_flight: HashMap::new(),
            next_id: 0,
        })
    }

    /// Start a request and return its id. The reply arrives on the channel.
    pub fn submit(&mut self, prompt: impl Into<String>, context: AiContext) -> RequestId {
        self.next_id += 1;
        let id = self.next_id;
        let prompt = prompt.into();
        let service = Arc::clone(&self.service);
        let replies = self.replies.clone();
        let timeout = self.timeout;

        tracing::info!(id, %context, "Submitting Galaxy AI request");

        let handle = self.runtime.spawn(async move {
            let (text, timed_out) =
                match tokio::time::timeout(timeout, service.generate(&prompt, context)).await {
                    Ok(text) => (text, false),
                    Err(_) => {
                        tracing::warn!(id, ?timeout, "Galaxy AI request timed out");
                        (OFFLINE_REPLY.to_string(), true)
                    }
                };
            // Receiver gone means the shell is shutting down
            let _ = replies.send(AiReply { id, context, text, timed_out });
        });

        self.in_flight.insert(id, handle.abort_handle());
        id
    }

    /// Mark a request as settled (called when its reply is consumed)
    pub fn finish(&mut self, id: RequestId) -> bool {
        self.in_flight.remove(&id).is_some()
    }

    /// Abort a request; no reply will be delivered for it
    pub fn cancel(&mut self, id: RequestId) -> bool {
        match self.in_flight.remove(&id) {
            Some(handle) => {
                handle.abort();
                tracing::info!(id, "Cancelled Galaxy AI request");
                true
            }
            None => false,
        }
    }

    /// Abort everything in flight, returning the cancelled ids
    pub fn cancel_all(&mut self) -> Vec<RequestId> {
        let mut ids: Vec<RequestId> = self.in_flight.keys().copied().collect();
        ids.sort_unstable();
        for id in &ids {
            self.cancel(*id);
        }
        ids
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}
