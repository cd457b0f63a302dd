use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::SecretString;

/// Supplies the bearer token attached to each request.
///
/// `token` is called once per request and its result is dropped when the
/// request completes, so a provider that refreshes expiring tokens is picked
/// up on the next call.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn token(&self) -> Result<SecretString>;
}

/// A fixed token, for service accounts and tests.
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    pub fn new(token: &str) -> Self {
        Self {
            token: SecretString::from(token.to_string()),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Result<SecretString> {
        Ok(self.token.clone())
    }
}

/// Reads the token from an environment variable on every call.
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

#[async_trait]
impl CredentialProvider for EnvToken {
    async fn token(&self) -> Result<SecretString> {
        let token = std::env::var(&self.var)
            .with_context(|| format!("credential variable {} is not set", self.var))?;
        if token.trim().is_empty() {
            anyhow::bail!("credential variable {} is empty", self.var);
        }
        Ok(SecretString::from(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn env_token_is_read_on_every_call() {
        let var = "INTERVIEW_CLIENT_TEST_TOKEN_ROTATION";
        let provider = EnvToken::new(var);

        unsafe { std::env::set_var(var, "first") };
        assert_eq!(provider.token().await.unwrap().expose_secret(), "first");

        unsafe { std::env::set_var(var, "second") };
        assert_eq!(provider.token().await.unwrap().expose_secret(), "second");

        unsafe { std::env::remove_var(var) };
        assert!(provider.token().await.is_err());
    }
}
