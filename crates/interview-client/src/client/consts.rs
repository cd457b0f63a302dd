pub const INTERVIEW_API_URL: &str = "INTERVIEW_API_URL";

pub const BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const START_PATH: &str = "/interview/start";
pub const ANSWER_PATH: &str = "/interview/answer";
pub const END_PATH: &str = "/interview/end";
pub const PROFILE_PATH: &str = "/user/profile";
