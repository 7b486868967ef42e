//! Per-session context
//!
//! One interactive session of the assistant page: the selected domain area,
//! the buffered inputs, the Consent Gate, and the Conversation Log — all
//! explicit state, no ambient globals.
//!
//! The session is single-user and cooperatively scheduled; nothing here is
//! safe for concurrent callers without external synchronization.

use thiserror::Error;
use tracing::info;

use automate_catalog::EndpointCatalog;

use crate::consent::{ConsentError, ConsentGate};
use crate::executor::{ExecutionOutcome, HttpTransport, PlanExecutor};
use crate::generator::Generator;
use crate::input::{resolve_input_priority, CommandInput};
use crate::plan::ActionPlan;
use crate::transcript::ConversationLog;

/// Session-level errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A command was submitted before any domain area was selected.
    #[error("no domain area selected")]
    NoDomainSelected,

    #[error(transparent)]
    Consent(#[from] ConsentError),
}

/// One user's assistant session.
pub struct AutomateSession {
    id: String,
    domain_area: Option<String>,
    voice: Option<String>,
    image: Option<Vec<u8>>,
    text: Option<String>,
    consent: ConsentGate,
    transcript: ConversationLog,
}

impl AutomateSession {
    /// Create a fresh session with a seeded welcome message.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            domain_area: None,
            voice: None,
            image: None,
            text: None,
            consent: ConsentGate::new(),
            transcript: ConversationLog::with_welcome(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn domain_area(&self) -> Option<&str> {
        self.domain_area.as_deref()
    }

    pub fn transcript(&self) -> &ConversationLog {
        &self.transcript
    }

    /// The plan currently awaiting approval, if any.
    pub fn pending_plan(&self) -> Option<&ActionPlan> {
        self.consent.pending()
    }

    /// Select the domain area the user wants to work with, mirroring the
    /// selection exchange into the conversation log.
    pub fn select_domain(&mut self, area: impl Into<String>) {
        let area = area.into();
        let display = area.replace('-', " ");
        self.transcript
            .user(format!("I want to work with {display}"));
        self.transcript.assistant(format!(
            "Great! I'm ready to help you with {display}. You can now use voice commands \
or upload images to process your {display} operations. What specific task would you like \
me to help you with?"
        ));
        self.domain_area = Some(area);
    }

    /// Buffer a voice transcript.
    pub fn set_voice(&mut self, transcript: impl Into<String>) {
        self.voice = Some(transcript.into());
    }

    /// Buffer an uploaded image.
    pub fn set_image(&mut self, bytes: impl Into<Vec<u8>>) {
        self.image = Some(bytes.into());
    }

    /// Buffer typed text.
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.text = Some(content.into());
    }

    /// Drain the input buffers and pick the one to process, by the explicit
    /// priority policy (voice > image > text).
    pub fn resolve_input(&mut self) -> Option<CommandInput> {
        let mut candidates = Vec::new();
        if let Some(transcript) = self.voice.take() {
            candidates.push(CommandInput::voice(transcript));
        }
        if let Some(bytes) = self.image.take() {
            candidates.push(CommandInput::image(bytes));
        }
        if let Some(content) = self.text.take() {
            candidates.push(CommandInput::text(content));
        }
        resolve_input_priority(candidates)
    }

    /// Run one command through the generator and park the resulting plan at
    /// the Consent Gate. No backend call happens here.
    pub async fn handle_command<G: Generator>(
        &mut self,
        generator: &G,
        catalog: &EndpointCatalog,
        input: CommandInput,
    ) -> Result<(), SessionError> {
        let area = self
            .domain_area
            .clone()
            .ok_or(SessionError::NoDomainSelected)?;

        self.transcript.user(match &input {
            CommandInput::Voice { transcript } => transcript.clone(),
            CommandInput::Text { content } => content.clone(),
            CommandInput::Image { .. } => "Uploaded an image for processing".to_string(),
        });

        let slice = catalog.slice(&area);
        let plan = generator.generate(&input, &area, &slice).await;
        info!(
            session = %self.id,
            input_kind = input.kind(),
            domain_area = %area,
            proposes_calls = plan.has_calls(),
            "plan generated, awaiting consent"
        );

        self.transcript.assistant(plan.response_text().to_string());
        self.consent.propose(plan);
        Ok(())
    }

    /// Ratify the pending plan and execute it. The only path to a
    /// side-effecting backend call.
    pub async fn approve_pending<T: HttpTransport>(
        &mut self,
        executor: &PlanExecutor<T>,
    ) -> Result<ExecutionOutcome, SessionError> {
        let plan = self.consent.approve()?;
        let outcome = executor.execute(plan).await;
        self.transcript.assistant(outcome.user_message());
        Ok(outcome)
    }

    /// Reject the pending plan, if any.
    pub fn discard_pending(&mut self) {
        self.consent.discard();
    }
}

impl Default for AutomateSession {
    fn default() -> Self {
        Self::new()
    }
}
