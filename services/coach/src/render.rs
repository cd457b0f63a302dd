//! Plain-text rendering of session results for the terminal.

use interview_client::types::{Evaluation, Summary, UserProfile};
use std::fmt::Write;

pub fn greeting(profile: &UserProfile) -> String {
    let name = profile
        .display_name()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(profile.email());
    format!("Welcome, {name}!")
}

/// Feedback for one answer, with the evaluation score when the service sent one.
pub fn feedback(display_feedback: &str, evaluation: Option<&Evaluation>) -> String {
    let mut out = String::from("Feedback\n--------\n");
    if let Some(score) = evaluation.and_then(Evaluation::score) {
        let _ = writeln!(out, "Score: {score}/10");
    }
    out.push_str(display_feedback.trim_end());
    out.push('\n');
    out
}

/// The end-of-interview summary as headed sections. Empty sections are left out.
pub fn summary(summary: &Summary) -> String {
    let mut out = String::from("Interview Summary\n=================\n");
    section_text(&mut out, "Overall Assessment", summary.overall_assessment());
    section_list(&mut out, "Strengths", summary.strengths());
    section_list(&mut out, "Weaknesses", summary.weaknesses());
    section_list(
        &mut out,
        "Areas for Improvement",
        summary.areas_for_improvement(),
    );
    section_text(
        &mut out,
        "General Recommendation",
        summary.general_recommendation(),
    );
    out
}

fn section_text(out: &mut String, heading: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let _ = write!(out, "\n{heading}\n{}\n", text.trim());
}

fn section_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}
