use serde::{Deserialize, Deserializer};

/// The overall assessment returned when an interview ends.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    #[serde(default)]
    overall_assessment: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    areas_for_improvement: Vec<String>,
    #[serde(default)]
    general_recommendation: String,
}

impl Summary {
    pub fn new(overall_assessment: &str) -> Self {
        Self {
            overall_assessment: overall_assessment.to_string(),
            ..Default::default()
        }
    }

    pub fn with_strengths(mut self, strengths: Vec<String>) -> Self {
        self.strengths = strengths;
        self
    }

    pub fn with_weaknesses(mut self, weaknesses: Vec<String>) -> Self {
        self.weaknesses = weaknesses;
        self
    }

    pub fn with_areas_for_improvement(mut self, areas: Vec<String>) -> Self {
        self.areas_for_improvement = areas;
        self
    }

    pub fn with_general_recommendation(mut self, recommendation: &str) -> Self {
        self.general_recommendation = recommendation.to_string();
        self
    }

    pub fn overall_assessment(&self) -> &str {
        &self.overall_assessment
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    pub fn areas_for_improvement(&self) -> &[String] {
        &self.areas_for_improvement
    }

    pub fn general_recommendation(&self) -> &str {
        &self.general_recommendation
    }
}

/// Per-answer evaluation. Every field is optional since the service fills it
/// from model output.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Evaluation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correctness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    depth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relevance: Option<String>,
    /// Out of 10
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detailed_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggestions_for_improvement: Option<String>,
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_detailed_feedback(mut self, feedback: &str) -> Self {
        self.detailed_feedback = Some(feedback.to_string());
        self
    }

    pub fn correctness(&self) -> Option<&str> {
        self.correctness.as_deref()
    }

    pub fn depth(&self) -> Option<&str> {
        self.depth.as_deref()
    }

    pub fn relevance(&self) -> Option<&str> {
        self.relevance.as_deref()
    }

    pub fn score(&self) -> Option<f32> {
        self.score
    }

    pub fn detailed_feedback(&self) -> Option<&str> {
        self.detailed_feedback.as_deref()
    }

    pub fn suggestions_for_improvement(&self) -> Option<&str> {
        self.suggestions_for_improvement.as_deref()
    }
}

// The score arrives as a number, a numeric string ("7", "7/10") or "N/A".
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|v| v as f32),
        Some(serde_json::Value::String(s)) => s
            .split('/')
            .next()
            .and_then(|head| head.trim().parse::<f32>().ok()),
        _ => None,
    })
}
