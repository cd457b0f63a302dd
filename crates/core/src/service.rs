use crate::error::SessionError;
use async_trait::async_trait;
use interview_types::{
    AnswerRequest, AnswerResponse, StartInterviewRequest, StartInterviewResponse, Summary,
    UserProfile,
};
#[cfg(test)]
use mockall::automock;

// The remote interview service as seen by `InterviewSession`.
//
// The HTTP client implements it below; `OfflineService` simulates it, and
// tests use the generated `MockInterviewService` to control each response
// and to assert how many calls were made.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait InterviewService: Send + Sync {
    async fn start(&self, request: StartInterviewRequest)
    -> Result<StartInterviewResponse, SessionError>;

    async fn answer(&self, request: AnswerRequest) -> Result<AnswerResponse, SessionError>;

    async fn end(&self, interview_id: String) -> Result<Summary, SessionError>;

    async fn profile(&self) -> Result<UserProfile, SessionError>;
}

#[async_trait]
impl InterviewService for interview_client::Client {
    async fn start(
        &self,
        request: StartInterviewRequest,
    ) -> Result<StartInterviewResponse, SessionError> {
        Ok(self.start_interview(&request).await?)
    }

    async fn answer(&self, request: AnswerRequest) -> Result<AnswerResponse, SessionError> {
        Ok(self.submit_answer(&request).await?)
    }

    async fn end(&self, interview_id: String) -> Result<Summary, SessionError> {
        self.end_interview(&interview_id)
            .await?
            .into_summary()
            .ok_or_else(|| SessionError::remote("service ended the interview without a summary"))
    }

    async fn profile(&self) -> Result<UserProfile, SessionError> {
        Ok(interview_client::Client::profile(self).await?)
    }
}
