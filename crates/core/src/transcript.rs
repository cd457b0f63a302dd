//! Voice input as an alternate way to fill in an answer.
//!
//! A `TranscriptCapture` produces tagged text fragments from some external
//! recognizer. `VoiceInput` feeds them into an `AnswerDraft`, which is the
//! only thing that ever mutates the answer text.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptFragment {
    /// Still being recognized; shown as a preview only.
    Interim(String),
    /// Confirmed text, appended to the answer.
    Final(String),
}

/// A producer of transcript fragments.
///
/// `start` may be called again after the previous capture stopped. `stop`
/// must be safe to call at any time, including before `start` and twice in
/// a row. The receiver closes when capture ends for any reason.
#[async_trait]
pub trait TranscriptCapture: Send {
    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptFragment>>;

    async fn stop(&mut self);
}

/// The answer being composed, from typing and from final transcript text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerDraft {
    text: String,
    live: String,
}

impl AnswerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Interim text not yet part of the answer.
    pub fn live_preview(&self) -> &str {
        &self.live
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// A typed edit replaces the answer text.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.live.clear();
    }

    pub fn apply(&mut self, fragment: TranscriptFragment) {
        match fragment {
            TranscriptFragment::Interim(text) => self.live = text,
            TranscriptFragment::Final(text) => {
                self.text.push_str(&text);
                self.live.clear();
            }
        }
    }
}

/// Drives one `TranscriptCapture` on behalf of an `AnswerDraft`.
pub struct VoiceInput<C: TranscriptCapture> {
    capture: C,
    fragments: Option<mpsc::Receiver<TranscriptFragment>>,
}

impl<C: TranscriptCapture> VoiceInput<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            fragments: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.fragments.is_some()
    }

    /// Start recording into a fresh draft. A capture that cannot start is
    /// logged and reported as `false`; the draft stays usable for typing.
    pub async fn start(&mut self, draft: &mut AnswerDraft) -> bool {
        if self.is_active() {
            self.stop(draft).await;
        }
        match self.capture.start().await {
            Ok(rx) => {
                draft.clear();
                self.fragments = Some(rx);
                tracing::info!("voice capture started");
                true
            }
            Err(e) => {
                tracing::warn!("voice capture unavailable, falling back to typing: {:#}", e);
                false
            }
        }
    }

    /// Wait for the next fragment and apply it. Returns `false` once the
    /// capture has finished.
    pub async fn next(&mut self, draft: &mut AnswerDraft) -> bool {
        let Some(rx) = self.fragments.as_mut() else {
            return false;
        };
        let fragment = rx.recv().await;
        match fragment {
            Some(fragment) => {
                tracing::debug!("transcript fragment: {:?}", fragment);
                draft.apply(fragment);
                true
            }
            None => {
                self.finish(draft).await;
                false
            }
        }
    }

    /// Apply every fragment that is already available without waiting.
    pub fn pump(&mut self, draft: &mut AnswerDraft) -> usize {
        let Some(rx) = self.fragments.as_mut() else {
            return 0;
        };
        let mut applied = 0;
        while let Ok(fragment) = rx.try_recv() {
            draft.apply(fragment);
            applied += 1;
        }
        applied
    }

    /// Stop recording, keeping final text already produced. Idempotent.
    pub async fn stop(&mut self, draft: &mut AnswerDraft) {
        if !self.is_active() {
            return;
        }
        self.capture.stop().await;
        if let Some(rx) = self.fragments.as_mut() {
            while let Ok(fragment) = rx.try_recv() {
                if let TranscriptFragment::Final(_) = fragment {
                    draft.apply(fragment);
                }
            }
        }
        self.finish(draft).await;
    }

    async fn finish(&mut self, draft: &mut AnswerDraft) {
        self.fragments = None;
        draft.live.clear();
        self.capture.stop().await;
        tracing::info!("voice capture stopped");
    }
}

/// Replays a fixed list of fragments, one capture after another.
pub struct ScriptedTranscript {
    fragments: Vec<TranscriptFragment>,
    denied: bool,
    task: Option<JoinHandle<()>>,
}

impl ScriptedTranscript {
    pub fn new(fragments: Vec<TranscriptFragment>) -> Self {
        Self {
            fragments,
            denied: false,
            task: None,
        }
    }

    /// A capture whose every start fails, as when microphone access is refused.
    pub fn denied() -> Self {
        Self {
            fragments: Vec::new(),
            denied: true,
            task: None,
        }
    }
}

#[async_trait]
impl TranscriptCapture for ScriptedTranscript {
    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptFragment>> {
        if self.denied {
            anyhow::bail!("microphone access denied");
        }
        self.stop().await;
        let (tx, rx) = mpsc::channel(self.fragments.len().max(1));
        let fragments = self.fragments.clone();
        self.task = Some(tokio::spawn(async move {
            for fragment in fragments {
                if tx.send(fragment).await.is_err() {
                    break;
                }
            }
        }));
        Ok(rx)
    }

    async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// For front-ends without any speech recognition.
pub struct NoTranscript;

#[async_trait]
impl TranscriptCapture for NoTranscript {
    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptFragment>> {
        anyhow::bail!("voice input is not supported here")
    }

    async fn stop(&mut self) {}
}
