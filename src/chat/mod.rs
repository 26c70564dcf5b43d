//! Chat session controller
//!
//! One turn at a time per session: the user turn is recorded, the text is
//! forwarded to the advisory service, and the reply (or a readable failure
//! message) is recorded as the assistant turn. No retries; nothing already
//! in the transcript is ever dropped.

pub mod transcript;

pub use transcript::{ChatTurn, Transcript, TurnRole};

use crate::client::AdvisoryTransport;
use crate::error::ChatError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "👋 Hi! I'm MoneyMate, happy to help with questions about \
     college finances, budgeting, aid, and more. What can I help you with today?";
pub const CHAT_DISCLAIMER: &str = "Disclaimer: Educational guidance only. \
     Please consult a licensed advisor for personalized advice.";
/// Shown when the service answers 2xx without any usable text
pub const NO_ANSWER_FALLBACK: &str = "I received your message but couldn't generate a response.";

pub type AssistantTurn = ChatTurn;

/// State for one conversation. Owned by exactly one user session.
pub struct ChatSession {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    transcript: RwLock<Transcript>,
    in_flight: AtomicBool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(session_id: Uuid) -> Self {
        Self {
            session_id,
            created_at: Utc::now(),
            transcript: RwLock::new(Transcript::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the turns so far, in conversation order
    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.transcript.read().await.turns().to_vec()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin_turn(self: &Arc<Self>) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(self.clone()))
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by the task running a turn; clears the in-flight flag when the turn
/// ends, however it ends.
struct InFlightGuard(Arc<ChatSession>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
    }
}

pub struct ChatSessionController {
    transport: Arc<dyn AdvisoryTransport>,
}

impl ChatSessionController {
    pub fn new(transport: Arc<dyn AdvisoryTransport>) -> Self {
        Self { transport }
    }

    /// Run one chat turn.
    ///
    /// Empty input and a call made while another turn is outstanding are
    /// rejected without touching the transcript or the network. On a service
    /// failure the transcript still gets an assistant turn holding the
    /// failure message, and the classified error is returned.
    ///
    /// Once accepted, the turn runs on its own task: dropping the returned
    /// future does not stop the assistant turn from being recorded.
    pub async fn send(
        &self,
        session: &Arc<ChatSession>,
        text: &str,
    ) -> Result<AssistantTurn, ChatError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let Some(guard) = session.begin_turn() else {
            warn!(
                session_id = %session.session_id,
                "Chat turn rejected: request already in flight"
            );
            return Err(ChatError::RequestInFlight);
        };

        let transport = self.transport.clone();
        let message = message.to_string();
        let turn = tokio::spawn(async move {
            let session = &guard.0;
            run_turn(transport.as_ref(), session, message).await
        });

        turn.await.unwrap_or_else(|e| {
            error!(session_id = %session.session_id, "Chat turn task failed: {}", e);
            Err(ChatError::Unknown {
                detail: e.to_string(),
            })
        })
    }
}

async fn run_turn(
    transport: &dyn AdvisoryTransport,
    session: &ChatSession,
    message: String,
) -> Result<AssistantTurn, ChatError> {
    session.transcript.write().await.push(ChatTurn::user(message.as_str()));
    info!(session_id = %session.session_id, "Chat turn accepted");

    match transport.complete(&message).await {
        Ok(reply) => {
            let answer = reply
                .answer
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string());

            let turn = ChatTurn::assistant(answer, reply.id);
            session.transcript.write().await.push(turn.clone());
            Ok(turn)
        }
        Err(err) => {
            warn!(
                session_id = %session.session_id,
                kind = ?err.kind(),
                "Chat turn failed: {:?}",
                err
            );
            session
                .transcript
                .write()
                .await
                .push(ChatTurn::failure(err.user_message()));
            Err(err)
        }
    }
}
