//! Purpose: Client configuration with environment-variable loading.
//! Exports: `ClientConfig`, environment variable names.
//! Role: Single place where credentials, base URL, and tuning knobs are resolved.
//! Invariants: Invalid values fail with `ErrorKind::Usage`; nothing is silently defaulted.
//! Invariants: The API token is never included in `Debug` output.
use crate::api::transport::DEFAULT_TIMEOUT;
use crate::api::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::core::error::{Error, ErrorKind};
use crate::core::paginate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use std::fmt;
use std::time::Duration;

pub const ENV_API_IDENTIFIER: &str = "H1_API_IDENTIFIER";
pub const ENV_API_TOKEN: &str = "H1_API_TOKEN";
pub const ENV_BASE_URL: &str = "H1_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "H1_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "H1_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_identifier: Option<String>,
    pub api_token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_identifier: None,
            api_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup (the process environment in `from_env`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::new();
        if let Some(base_url) = read(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        config.api_identifier = read(ENV_API_IDENTIFIER);
        config.api_token = read(ENV_API_TOKEN);
        if let Some(raw) = read(ENV_PAGE_SIZE) {
            config.page_size = parse_page_size(&raw)?;
        }
        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))
                    .with_source(err)
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_credentials(
        mut self,
        api_identifier: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        self.api_identifier = Some(api_identifier.into());
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        match (&self.api_identifier, &self.api_token) {
            (Some(_), None) => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(format!("{ENV_API_TOKEN} is required with {ENV_API_IDENTIFIER}")));
            }
            (None, Some(_)) => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(format!("{ENV_API_IDENTIFIER} is required with {ENV_API_TOKEN}")));
            }
            _ => {}
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("page size must be between 1 and {MAX_PAGE_SIZE}")));
        }
        if self.timeout.is_zero() {
            return Err(Error::new(ErrorKind::Usage).with_message("timeout must be non-zero"));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_identifier", &self.api_identifier)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn parse_page_size(raw: &str) -> Result<u32, Error> {
    raw.parse::<u32>().map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("{ENV_PAGE_SIZE} must be a positive integer"))
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{
        ClientConfig, ENV_API_IDENTIFIER, ENV_API_TOKEN, ENV_BASE_URL, ENV_PAGE_SIZE,
        ENV_TIMEOUT_SECS,
    };
    use crate::core::error::ErrorKind;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, ClientConfig::new());
        assert_eq!(config.base_url, "https://api.hackerone.com/v1/");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_IDENTIFIER, "my-ident"),
            (ENV_API_TOKEN, " secret "),
            (ENV_BASE_URL, "http://127.0.0.1:9000/v1/"),
            (ENV_PAGE_SIZE, "25"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .expect("config");
        assert_eq!(config.api_identifier.as_deref(), Some("my-ident"));
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1/");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn half_credentials_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_IDENTIFIER, "my-ident")]))
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "lots")])).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "500")])).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err =
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new().with_credentials("ident", "hunter2");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("ident"));
        assert!(!rendered.contains("hunter2"));
    }
}
