//request and response bodies of the interview coach HTTP API
pub mod error;
pub mod feedback;
pub mod interview;
pub mod profile;

//re-export types for easier access
pub use error::ErrorBody;
pub use feedback::{Evaluation, Summary};
pub use interview::{
    AnswerRequest, AnswerResponse, EndInterviewResponse, StartInterviewRequest,
    StartInterviewResponse,
};
pub use profile::UserProfile;
