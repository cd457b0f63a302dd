use crate::error::SessionError;
use crate::service::InterviewService;
use crate::session_state::{InterviewState, PendingFeedback, SessionView, Turn};
use crate::transcript::AnswerDraft;
use interview_types::{AnswerRequest, StartInterviewRequest, Summary, UserProfile};

/// Drives one interview at a time against an `InterviewService`.
///
/// Every operation takes `&mut self`, so a caller can never have two remote
/// calls outstanding for the same session. State changes only after a call
/// succeeds; on error the session is exactly as it was and the caller may
/// retry. Nothing is retried automatically.
pub struct InterviewSession<S: InterviewService> {
    service: S,
    state: InterviewState,
}

impl<S: InterviewService> InterviewSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: InterviewState::Idle,
        }
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn history(&self) -> &[Turn] {
        self.state.history()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.state.summary()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn profile(&self) -> Result<UserProfile, SessionError> {
        self.service.profile().await
    }

    /// Begin a new interview and return its id and first question.
    pub async fn start(
        &mut self,
        role: &str,
        experience: &str,
    ) -> Result<(String, String), SessionError> {
        let role = role.trim();
        let experience = experience.trim();
        if role.is_empty() || experience.is_empty() {
            return Err(SessionError::Validation(
                "please enter both role and experience to start the interview".to_string(),
            ));
        }
        self.state.ensure_can_start()?;

        tracing::info!("starting interview: role={:?}, experience={:?}", role, experience);
        let response = self
            .service
            .start(StartInterviewRequest::new(role, experience))
            .await
            .inspect_err(|e| tracing::error!("failed to start interview: {}", e))?;

        let session = self.state.on_started(
            response.interview_id().to_string(),
            role.to_string(),
            experience.to_string(),
            response.first_question().to_string(),
        )?;
        tracing::info!("interview {} started", session.id());
        Ok((
            response.interview_id().to_string(),
            response.first_question().to_string(),
        ))
    }

    /// Send an answer to the pending question and return the feedback and
    /// the question that follows.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<(String, String), SessionError> {
        let (interview_id, question) = self.state.pending_question()?;
        if answer.trim().is_empty() {
            return Err(SessionError::Validation(
                "please provide an answer to the current question".to_string(),
            ));
        }
        let request = AnswerRequest::new(interview_id, question, answer);

        tracing::debug!("submitting answer for interview {}", request.interview_id());
        let response = self
            .service
            .answer(request)
            .await
            .inspect_err(|e| tracing::error!("failed to submit answer: {}", e))?;

        let (feedback, next_question, evaluation) = response.into_parts();
        let pending: PendingFeedback = self
            .state
            .on_answered(answer.to_string(), feedback, evaluation, next_question)?
            .clone();
        tracing::info!("answer accepted, {} turn(s) so far", self.state.history().len());
        Ok((
            pending.feedback().to_string(),
            pending.next_question().to_string(),
        ))
    }

    /// Submit the draft's text. The draft is cleared only if the submit succeeds.
    pub async fn submit_draft(
        &mut self,
        draft: &mut AnswerDraft,
    ) -> Result<(String, String), SessionError> {
        let answer = draft.text().to_string();
        let result = self.submit_answer(&answer).await?;
        draft.clear();
        Ok(result)
    }

    /// Make the next question current. Local only.
    pub fn advance(&mut self) -> Result<String, SessionError> {
        let question = self.state.advance()?.to_string();
        tracing::debug!("advanced to next question");
        Ok(question)
    }

    /// End the interview and return its summary.
    pub async fn end(&mut self) -> Result<Summary, SessionError> {
        let interview_id = self.state.active_id()?.to_string();

        tracing::info!("ending interview {}", interview_id);
        let summary = self
            .service
            .end(interview_id)
            .await
            .inspect_err(|e| tracing::error!("failed to end interview: {}", e))?;

        Ok(self.state.on_ended(summary)?.clone())
    }
}
