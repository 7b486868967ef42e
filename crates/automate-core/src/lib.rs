//! # Automate Core
//!
//! Core abstractions of the AutoMate command pipeline.
//!
//! This crate contains:
//! - CommandInput / ActionPlan / ApiCallSpec / ExecutionOutcome definitions
//! - The Generator seam the LLM backend plugs into
//! - The Consent Gate between plan generation and execution
//! - The Action Executor with its HTTP transport seam
//! - The Conversation Log and the per-session context object
//!
//! This crate does NOT care about:
//! - How input was captured (microphone, file picker, text box)
//! - Which language model produces the plans
//! - How the conversation is rendered

pub mod consent;
pub mod executor;
pub mod generator;
pub mod input;
pub mod plan;
pub mod session;
pub mod transcript;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::consent::{ConsentError, ConsentGate};
    pub use crate::executor::{
        CallOutcome, ExecutionOutcome, HttpTransport, PlanExecutor, ReqwestTransport,
        TransportError, TransportResponse,
    };
    pub use crate::generator::{GenerationError, Generator};
    pub use crate::input::{resolve_input_priority, CommandInput, StubTranscriber, Transcriber};
    pub use crate::plan::{ActionPlan, ApiCallSpec, CommandPlan, ImagePlan};
    pub use crate::session::{AutomateSession, SessionError};
    pub use crate::transcript::{ChatMessage, ConversationLog, Role};
}

pub use consent::{ConsentError, ConsentGate};
pub use executor::{ExecutionOutcome, HttpTransport, PlanExecutor, ReqwestTransport};
pub use generator::{GenerationError, Generator};
pub use input::CommandInput;
pub use plan::{ActionPlan, ApiCallSpec};
pub use session::AutomateSession;
pub use transcript::ConversationLog;
