//! Session logic for the interview coach.
//!
//! `InterviewSession` owns the interview state and talks to an
//! `InterviewService`; front-ends render its `SessionView` and never touch
//! the state directly.

pub mod error;
pub mod interview;
pub mod offline;
pub mod service;
pub mod session_state;
pub mod transcript;

pub use error::SessionError;
pub use interview::InterviewSession;
pub use offline::OfflineService;
pub use service::InterviewService;
pub use session_state::{InterviewState, PendingFeedback, Phase, SessionView, Turn};
pub use transcript::{
    AnswerDraft, NoTranscript, ScriptedTranscript, TranscriptCapture, TranscriptFragment,
    VoiceInput,
};
