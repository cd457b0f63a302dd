use crate::feedback::{Evaluation, Summary};

/// `POST /interview/start` body
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StartInterviewRequest {
    role: String,
    experience: String,
}

impl StartInterviewRequest {
    pub fn new(role: &str, experience: &str) -> Self {
        Self {
            role: role.to_string(),
            experience: experience.to_string(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }
}

/// `POST /interview/start` response
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StartInterviewResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    interview_id: String,
    first_question: String,
}

impl StartInterviewResponse {
    pub fn new(interview_id: &str, first_question: &str) -> Self {
        Self {
            message: None,
            interview_id: interview_id.to_string(),
            first_question: first_question.to_string(),
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    pub fn first_question(&self) -> &str {
        &self.first_question
    }
}

/// `POST /interview/answer` body.
///
/// Each call carries the question being answered; the service never receives
/// the client's turn history.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerRequest {
    interview_id: String,
    question_text: String,
    answer_text: String,
}

impl AnswerRequest {
    pub fn new(interview_id: &str, question_text: &str, answer_text: &str) -> Self {
        Self {
            interview_id: interview_id.to_string(),
            question_text: question_text.to_string(),
            answer_text: answer_text.to_string(),
        }
    }

    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }
}

/// `POST /interview/answer` response
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    display_feedback: String,
    next_question: String,
    /// Structured form of `display_feedback`, when the service sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evaluation_feedback: Option<Evaluation>,
}

impl AnswerResponse {
    pub fn new(display_feedback: &str, next_question: &str) -> Self {
        Self {
            message: None,
            display_feedback: display_feedback.to_string(),
            next_question: next_question.to_string(),
            evaluation_feedback: None,
        }
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation_feedback = Some(evaluation);
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn display_feedback(&self) -> &str {
        &self.display_feedback
    }

    pub fn next_question(&self) -> &str {
        &self.next_question
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation_feedback.as_ref()
    }

    pub fn into_parts(self) -> (String, String, Option<Evaluation>) {
        (
            self.display_feedback,
            self.next_question,
            self.evaluation_feedback,
        )
    }
}

/// `POST /interview/end` response
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EndInterviewResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default)]
    overall_feedback: Option<Summary>,
}

impl EndInterviewResponse {
    pub fn new(summary: Summary) -> Self {
        Self {
            message: None,
            overall_feedback: Some(summary),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn overall_feedback(&self) -> Option<&Summary> {
        self.overall_feedback.as_ref()
    }

    pub fn into_summary(self) -> Option<Summary> {
        self.overall_feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_request_uses_service_field_names() {
        let request = AnswerRequest::new("S1", "Q1", "I used REST and gRPC");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "interview_id": "S1",
                "question_text": "Q1",
                "answer_text": "I used REST and gRPC"
            })
        );
    }

    #[test]
    fn answer_response_keeps_structured_evaluation() {
        let raw = r#"{
            "message": "Answer submitted and next question generated successfully",
            "next_question": "How do you version a gRPC API?",
            "evaluation_feedback": {
                "correctness": "Mostly correct",
                "depth": "Shallow",
                "relevance": "High",
                "score": 7,
                "detailed_feedback": "Mention streaming.",
                "suggestions_for_improvement": "* Discuss deadlines"
            },
            "display_feedback": "**Score:** 7/10"
        }"#;
        let response: AnswerResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.display_feedback(), "**Score:** 7/10");
        assert_eq!(response.next_question(), "How do you version a gRPC API?");
        let evaluation = response.evaluation().expect("evaluation should be present");
        assert_eq!(evaluation.score(), Some(7.0));
        assert_eq!(evaluation.depth(), Some("Shallow"));
    }

    #[test]
    fn end_response_without_summary_decodes_as_none() {
        let raw = r#"{"message": "Interview ended successfully.", "overall_feedback": null}"#;
        let response: EndInterviewResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.message(), Some("Interview ended successfully."));
        assert!(response.into_summary().is_none());
    }
}
