//! Scripted advisory transports for tests

use crate::client::{AdvisoryReply, AdvisoryTransport};
use crate::error::ChatError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn answer(text: &str) -> Result<AdvisoryReply, ChatError> {
    Ok(AdvisoryReply {
        answer: Some(text.to_string()),
        id: None,
    })
}

/// Replays queued results in order and records every prompt it receives.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<AdvisoryReply, ChatError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<AdvisoryReply, ChatError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdvisoryTransport for ScriptedTransport {
    async fn complete(&self, prompt: &str) -> Result<AdvisoryReply, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Unknown { detail: "script exhausted".to_string() }))
    }
}

/// Holds every request open until `release` is called.
#[derive(Default)]
pub struct GatedTransport {
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl AdvisoryTransport for GatedTransport {
    async fn complete(&self, prompt: &str) -> Result<AdvisoryReply, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        answer(&format!("answered: {}", prompt))
    }
}
