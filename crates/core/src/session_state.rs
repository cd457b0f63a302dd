//! The interview lifecycle as a pure state machine.
//!
//! `Idle -> Active(AwaitingAnswer <-> AwaitingNext) -> Ended`. Every
//! transition here is applied only after the corresponding remote call has
//! succeeded, so a failed call never leaves a partial transition behind.

use crate::error::SessionError;
use interview_types::{Evaluation, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAnswer,
    AwaitingNext,
    Ended,
}

/// One answered question. Never mutated after it is appended to a history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    question: String,
    answer: String,
    feedback: String,
    evaluation: Option<Evaluation>,
}

impl Turn {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }
}

/// Feedback on the last answer plus the question that comes next.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFeedback {
    feedback: String,
    evaluation: Option<Evaluation>,
    next_question: String,
}

impl PendingFeedback {
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn next_question(&self) -> &str {
        &self.next_question
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    AwaitingAnswer { question: String },
    AwaitingNext(PendingFeedback),
}

/// An interview in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: String,
    role: String,
    experience: String,
    stage: Stage,
    history: Vec<Turn>,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// The unanswered question, if one is waiting for an answer.
    pub fn current_question(&self) -> Option<&str> {
        match &self.stage {
            Stage::AwaitingAnswer { question } => Some(question),
            Stage::AwaitingNext(_) => None,
        }
    }

    pub fn pending_feedback(&self) -> Option<&PendingFeedback> {
        match &self.stage {
            Stage::AwaitingNext(pending) => Some(pending),
            Stage::AwaitingAnswer { .. } => None,
        }
    }
}

/// A finished interview. Only its summary and history can be read.
#[derive(Debug, Clone, PartialEq)]
pub struct EndedSession {
    id: String,
    role: String,
    experience: String,
    history: Vec<Turn>,
    summary: Summary,
}

impl EndedSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InterviewState {
    #[default]
    Idle,
    Active(Session),
    Ended(EndedSession),
}

impl InterviewState {
    pub fn phase(&self) -> Phase {
        match self {
            InterviewState::Idle => Phase::Idle,
            InterviewState::Active(session) => match session.stage {
                Stage::AwaitingAnswer { .. } => Phase::AwaitingAnswer,
                Stage::AwaitingNext(_) => Phase::AwaitingNext,
            },
            InterviewState::Ended(_) => Phase::Ended,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            InterviewState::Idle => None,
            InterviewState::Active(session) => Some(session.id()),
            InterviewState::Ended(ended) => Some(ended.id()),
        }
    }

    pub fn history(&self) -> &[Turn] {
        match self {
            InterviewState::Idle => &[],
            InterviewState::Active(session) => session.history(),
            InterviewState::Ended(ended) => ended.history(),
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            InterviewState::Ended(ended) => Some(ended.summary()),
            _ => None,
        }
    }

    /// Starting is allowed from `Idle` and, as a brand-new session, from `Ended`.
    pub fn ensure_can_start(&self) -> Result<(), SessionError> {
        match self {
            InterviewState::Active(session) => Err(SessionError::State(format!(
                "interview {} is still in progress; end it before starting a new one",
                session.id
            ))),
            InterviewState::Idle | InterviewState::Ended(_) => Ok(()),
        }
    }

    pub fn on_started(
        &mut self,
        id: String,
        role: String,
        experience: String,
        first_question: String,
    ) -> Result<&Session, SessionError> {
        self.ensure_can_start()?;
        if id.trim().is_empty() {
            return Err(SessionError::remote("service returned an empty interview id"));
        }
        if let InterviewState::Ended(ended) = self {
            if ended.id == id {
                return Err(SessionError::remote(format!(
                    "service reused the id of ended interview {id}"
                )));
            }
        }

        *self = InterviewState::Active(Session {
            id,
            role,
            experience,
            stage: Stage::AwaitingAnswer {
                question: first_question,
            },
            history: Vec::new(),
        });
        match self {
            InterviewState::Active(session) => Ok(session),
            _ => unreachable!("state was just set to Active"),
        }
    }

    /// The interview id and the question an answer would be submitted for.
    pub fn pending_question(&self) -> Result<(&str, &str), SessionError> {
        match self {
            InterviewState::Active(Session {
                id,
                stage: Stage::AwaitingAnswer { question },
                ..
            }) => Ok((id.as_str(), question.as_str())),
            InterviewState::Active(_) => Err(SessionError::State(
                "the last answer already has feedback; move to the next question first"
                    .to_string(),
            )),
            InterviewState::Idle => Err(not_started()),
            InterviewState::Ended(_) => Err(already_ended()),
        }
    }

    pub fn on_answered(
        &mut self,
        answer: String,
        feedback: String,
        evaluation: Option<Evaluation>,
        next_question: String,
    ) -> Result<&PendingFeedback, SessionError> {
        self.pending_question()?;
        let InterviewState::Active(session) = self else {
            unreachable!("pending_question only succeeds while active");
        };
        let Stage::AwaitingAnswer { question } = std::mem::replace(
            &mut session.stage,
            Stage::AwaitingNext(PendingFeedback {
                feedback: feedback.clone(),
                evaluation: evaluation.clone(),
                next_question,
            }),
        ) else {
            unreachable!("pending_question only succeeds while awaiting an answer");
        };
        session.history.push(Turn {
            question,
            answer,
            feedback,
            evaluation,
        });
        match &session.stage {
            Stage::AwaitingNext(pending) => Ok(pending),
            Stage::AwaitingAnswer { .. } => unreachable!("stage was just set to AwaitingNext"),
        }
    }

    /// Promote the next question to the current one. Local only.
    pub fn advance(&mut self) -> Result<&str, SessionError> {
        let session = match self {
            InterviewState::Active(session) => session,
            InterviewState::Idle => return Err(not_started()),
            InterviewState::Ended(_) => return Err(already_ended()),
        };
        let next_question = match &session.stage {
            Stage::AwaitingNext(pending) => pending.next_question.clone(),
            Stage::AwaitingAnswer { .. } => {
                return Err(SessionError::State(
                    "the current question has not been answered yet".to_string(),
                ));
            }
        };
        session.stage = Stage::AwaitingAnswer {
            question: next_question,
        };
        match &session.stage {
            Stage::AwaitingAnswer { question } => Ok(question),
            Stage::AwaitingNext(_) => unreachable!("stage was just set to AwaitingAnswer"),
        }
    }

    /// The id to end. Valid from either active sub-state.
    pub fn active_id(&self) -> Result<&str, SessionError> {
        match self {
            InterviewState::Active(session) => Ok(&session.id),
            InterviewState::Idle => Err(not_started()),
            InterviewState::Ended(_) => Err(already_ended()),
        }
    }

    /// Move to `Ended`, dropping any unanswered question or pending feedback.
    pub fn on_ended(&mut self, summary: Summary) -> Result<&Summary, SessionError> {
        self.active_id()?;
        let InterviewState::Active(session) = std::mem::take(self) else {
            unreachable!("active_id only succeeds while active");
        };
        *self = InterviewState::Ended(EndedSession {
            id: session.id,
            role: session.role,
            experience: session.experience,
            history: session.history,
            summary,
        });
        match self {
            InterviewState::Ended(ended) => Ok(&ended.summary),
            _ => unreachable!("state was just set to Ended"),
        }
    }

    /// A read-only projection for rendering.
    pub fn view(&self) -> SessionView {
        let phase = self.phase();
        let mut view = SessionView {
            phase,
            session_id: self.session_id().map(str::to_string),
            role: None,
            experience: None,
            question: None,
            last_turn: None,
            feedback: None,
            turns_completed: self.history().len(),
            summary: self.summary().cloned(),
        };
        match self {
            InterviewState::Idle => {}
            InterviewState::Active(session) => {
                view.role = Some(session.role.clone());
                view.experience = Some(session.experience.clone());
                view.question = session.current_question().map(str::to_string);
                view.feedback = session.pending_feedback().cloned();
                if view.feedback.is_some() {
                    view.last_turn = session.history.last().cloned();
                }
            }
            InterviewState::Ended(ended) => {
                view.role = Some(ended.role.clone());
                view.experience = Some(ended.experience.clone());
            }
        }
        view
    }
}

fn not_started() -> SessionError {
    SessionError::State("no interview is in progress; start one first".to_string())
}

fn already_ended() -> SessionError {
    SessionError::State("the interview has ended; start a new one to continue".to_string())
}

/// What a front-end needs to draw the current screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub session_id: Option<String>,
    pub role: Option<String>,
    pub experience: Option<String>,
    /// Set while awaiting an answer
    pub question: Option<String>,
    /// The turn the current feedback belongs to, set while awaiting next
    pub last_turn: Option<Turn>,
    pub feedback: Option<PendingFeedback>,
    pub turns_completed: usize,
    pub summary: Option<Summary>,
}

impl SessionView {
    pub fn can_start(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Ended)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::AwaitingAnswer
    }

    pub fn can_advance(&self) -> bool {
        self.phase == Phase::AwaitingNext
    }

    pub fn can_end(&self) -> bool {
        matches!(self.phase, Phase::AwaitingAnswer | Phase::AwaitingNext)
    }
}
