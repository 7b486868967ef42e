//! Command input definitions
//!
//! One invocation of the pipeline carries exactly one input payload. Buffers
//! holding more than one candidate go through [`resolve_input_priority`]
//! rather than an implicit fallthrough.

use async_trait::async_trait;
use thiserror::Error;

/// A single user command, already captured by the surrounding surface.
///
/// Voice arrives as a transcript (speech-to-text sits outside the pipeline,
/// see [`Transcriber`]); images arrive as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandInput {
    Voice { transcript: String },
    Text { content: String },
    Image { bytes: Vec<u8> },
}

impl CommandInput {
    pub fn voice(transcript: impl Into<String>) -> Self {
        Self::Voice {
            transcript: transcript.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn image(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Image {
            bytes: bytes.into(),
        }
    }

    /// Short kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandInput::Voice { .. } => "voice",
            CommandInput::Text { .. } => "text",
            CommandInput::Image { .. } => "image",
        }
    }

    fn priority(&self) -> u8 {
        match self {
            CommandInput::Voice { .. } => 0,
            CommandInput::Image { .. } => 1,
            CommandInput::Text { .. } => 2,
        }
    }
}

/// Pick the input to process when several candidates are buffered at once.
///
/// Precedence is voice > image > text. Among candidates of the same kind the
/// first one wins. Returns `None` for an empty candidate list.
pub fn resolve_input_priority(candidates: Vec<CommandInput>) -> Option<CommandInput> {
    candidates
        .into_iter()
        .enumerate()
        .min_by_key(|(index, input)| (input.priority(), *index))
        .map(|(_, input)| input)
}

/// Speech-to-text boundary error.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("transcription backend unavailable: {0}")]
    Unavailable(String),
}

/// Boundary seam for speech-to-text.
///
/// The pipeline itself never transcribes audio; surfaces that capture raw
/// audio convert it to a transcript before constructing a
/// [`CommandInput::Voice`].
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError>;
}

/// Placeholder transcriber that returns a fixed transcript.
///
/// Stands in for a real speech-to-text backend in demos and tests.
pub struct StubTranscriber {
    pub transcript: String,
}

impl StubTranscriber {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
        Ok(self.transcript.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_prefers_voice_over_image_over_text() {
        let picked = resolve_input_priority(vec![
            CommandInput::text("type this"),
            CommandInput::image(vec![1, 2, 3]),
            CommandInput::voice("say this"),
        ]);
        assert_eq!(picked, Some(CommandInput::voice("say this")));

        let picked = resolve_input_priority(vec![
            CommandInput::text("type this"),
            CommandInput::image(vec![1, 2, 3]),
        ]);
        assert_eq!(picked, Some(CommandInput::image(vec![1, 2, 3])));
    }

    #[test]
    fn test_priority_is_stable_within_a_kind() {
        let picked = resolve_input_priority(vec![
            CommandInput::text("first"),
            CommandInput::text("second"),
        ]);
        assert_eq!(picked, Some(CommandInput::text("first")));
    }

    #[test]
    fn test_priority_empty_candidates() {
        assert_eq!(resolve_input_priority(Vec::new()), None);
    }

    #[test]
    fn test_stub_transcriber_returns_fixed_transcript() {
        tokio_test::block_on(async {
            let transcriber = StubTranscriber::new("show me all products");
            let transcript = transcriber.transcribe(&[0u8; 16]).await.unwrap();
            assert_eq!(transcript, "show me all products");
        });
    }
}
