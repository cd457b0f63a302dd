use crate::error::SessionError;
use crate::service::InterviewService;
use async_trait::async_trait;
use interview_types::{
    AnswerRequest, AnswerResponse, Evaluation, StartInterviewRequest, StartInterviewResponse,
    Summary, UserProfile,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

const QUESTIONS: [&str; 4] = [
    "Walk me through a recent project you are proud of.",
    "Describe a difficult bug you tracked down and how you found it.",
    "How do you decide when a piece of code needs tests?",
    "Tell me about a time you disagreed with a design decision.",
];

struct OfflineInterview {
    role: String,
    answers: Vec<String>,
    active: bool,
}

/// A simulated `InterviewService`.
///
/// It does not make any network calls. Questions, feedback and the summary
/// are canned, which lets the front-end run without a backend.
pub struct OfflineService {
    next_id: AtomicUsize,
    interviews: Mutex<HashMap<String, OfflineInterview>>,
}

impl OfflineService {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            interviews: Mutex::new(HashMap::new()),
        }
    }

    fn with_interview<T>(
        &self,
        interview_id: &str,
        f: impl FnOnce(&mut OfflineInterview) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut interviews = self
            .interviews
            .lock()
            .map_err(|_| SessionError::remote("offline interview store is poisoned"))?;
        let interview = interviews.get_mut(interview_id).ok_or(SessionError::Remote {
            status: Some(404),
            message: "Interview not found.".to_string(),
        })?;
        if !interview.active {
            return Err(SessionError::Remote {
                status: Some(400),
                message: "Interview is not active or already ended.".to_string(),
            });
        }
        f(interview)
    }
}

impl Default for OfflineService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InterviewService for OfflineService {
    async fn start(
        &self,
        request: StartInterviewRequest,
    ) -> Result<StartInterviewResponse, SessionError> {
        let id = format!("offline-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut interviews = self
            .interviews
            .lock()
            .map_err(|_| SessionError::remote("offline interview store is poisoned"))?;
        // Only one interview per user is active at a time.
        for interview in interviews.values_mut() {
            interview.active = false;
        }
        interviews.insert(
            id.clone(),
            OfflineInterview {
                role: request.role().to_string(),
                answers: Vec::new(),
                active: true,
            },
        );
        let first_question = format!(
            "As a {} with {} of experience, {}",
            request.role(),
            request.experience(),
            QUESTIONS[0].to_lowercase()
        );
        Ok(StartInterviewResponse::new(&id, &first_question))
    }

    async fn answer(&self, request: AnswerRequest) -> Result<AnswerResponse, SessionError> {
        self.with_interview(request.interview_id(), |interview| {
            interview.answers.push(request.answer_text().to_string());
            let words = request.answer_text().split_whitespace().count();
            // Longer answers score higher, capped at 9.
            let score = (3 + words / 10).min(9) as f32;
            let detail = if words < 20 {
                "The answer is brief. Add a concrete example and the outcome."
            } else {
                "Good detail. Tie the example back to the impact it had."
            };
            let evaluation = Evaluation::new()
                .with_score(score)
                .with_detailed_feedback(detail);
            let display = format!("**Score:** {score}/10\n\n**Detailed Feedback:**\n{detail}");
            let next = QUESTIONS[interview.answers.len() % QUESTIONS.len()];
            Ok(AnswerResponse::new(&display, next).with_evaluation(evaluation))
        })
    }

    async fn end(&self, interview_id: String) -> Result<Summary, SessionError> {
        self.with_interview(&interview_id, |interview| {
            interview.active = false;
            let answered = interview.answers.len();
            let summary = Summary::new(&format!(
                "You answered {answered} question(s) for the {} role.",
                interview.role
            ))
            .with_strengths(if answered > 0 {
                vec!["Engaged with every question asked".to_string()]
            } else {
                Vec::new()
            })
            .with_areas_for_improvement(vec![
                "Quantify the results of your work".to_string(),
            ])
            .with_general_recommendation("Practise with a live backend for real evaluation.");
            Ok(summary)
        })
    }

    async fn profile(&self) -> Result<UserProfile, SessionError> {
        Ok(UserProfile::new("offline", "offline@localhost").with_display_name("Offline User"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_interview_runs_to_summary() {
        let service = OfflineService::new();
        let started = service
            .start(StartInterviewRequest::new("Backend Engineer", "3 years"))
            .await
            .unwrap();
        assert!(started.first_question().contains("Backend Engineer"));

        let answer = service
            .answer(AnswerRequest::new(
                started.interview_id(),
                started.first_question(),
                "I used REST and gRPC",
            ))
            .await
            .unwrap();
        assert_eq!(answer.next_question(), QUESTIONS[1]);
        assert_eq!(answer.evaluation().and_then(|e| e.score()), Some(3.0));

        let summary = service.end(started.interview_id().to_string()).await.unwrap();
        assert!(summary.overall_assessment().contains("1 question"));

        let again = service.end(started.interview_id().to_string()).await;
        assert!(matches!(again, Err(SessionError::Remote { status: Some(400), .. })));
    }

    #[tokio::test]
    async fn starting_deactivates_previous_interview() {
        let service = OfflineService::new();
        let first = service
            .start(StartInterviewRequest::new("r", "e"))
            .await
            .unwrap();
        let second = service
            .start(StartInterviewRequest::new("r", "e"))
            .await
            .unwrap();
        assert_ne!(first.interview_id(), second.interview_id());

        let stale = service
            .answer(AnswerRequest::new(first.interview_id(), "q", "a"))
            .await;
        assert!(matches!(stale, Err(SessionError::Remote { status: Some(400), .. })));
    }
}
