mod client;
mod credentials;

pub use client::{Client, Config, ConfigBuilder, Stats, TransportError};
pub use credentials::{CredentialProvider, EnvToken, StaticToken};
pub use interview_types as types;
