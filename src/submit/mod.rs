//! Submission helpers: one multipart POST authenticated by a `token` header.

use std::path::{Path, PathBuf};

use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Environment variable holding the server base URL.
pub const URL_ENV: &str = "OCTOSPACE_SUBMIT_URL";
/// Environment variable holding the team token.
pub const TOKEN_ENV: &str = "OCTOSPACE_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Host and optional port, with or without a scheme.
    pub base_url: String,
    pub token: String,
}

impl SubmitConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Reads [`URL_ENV`] and [`TOKEN_ENV`].
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(URL_ENV).map_err(|_| Error::MissingConfig(URL_ENV))?;
        let token = std::env::var(TOKEN_ENV).map_err(|_| Error::MissingConfig(TOKEN_ENV))?;
        Ok(Self { base_url, token })
    }

    /// Full URL for `endpoint`. A bare `host:port` gets an `http://` scheme.
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = endpoint.path().trim_start_matches('/');
        if base.contains("://") {
            format!("{base}/{path}")
        } else {
            format!("http://{base}/{path}")
        }
    }
}

/// Server route and the multipart field name it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Watermarked images.
    ExtraTaskTrumpf,
    /// Model weights.
    Task4,
    Custom { path: String, field: String },
}

impl Endpoint {
    pub fn path(&self) -> &str {
        match self {
            Endpoint::ExtraTaskTrumpf => "extra-task-trumpf/submit",
            Endpoint::Task4 => "task-4/submit",
            Endpoint::Custom { path, .. } => path,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Endpoint::ExtraTaskTrumpf => "file",
            Endpoint::Task4 => "model_state_dict",
            Endpoint::Custom { field, .. } => field,
        }
    }

    /// Resolves the short names accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "extra-task-trumpf" | "trumpf" => Some(Endpoint::ExtraTaskTrumpf),
            "task-4" | "task4" => Some(Endpoint::Task4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub endpoint: Endpoint,
    pub file: PathBuf,
}

impl Submission {
    pub fn new(endpoint: Endpoint, file: impl AsRef<Path>) -> Self {
        Self {
            endpoint,
            file: file.as_ref().to_path_buf(),
        }
    }
}

/// Status code and body text returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client with rustls, so both `http://` and `https://` servers work.
pub fn client() -> Result<Client> {
    Ok(Client::builder().use_rustls_tls().build()?)
}

/// Posts the file as multipart form data. Non-2xx statuses are returned,
/// not treated as errors.
pub fn submit(config: &SubmitConfig, submission: &Submission) -> Result<SubmitResponse> {
    let url = config.url_for(&submission.endpoint);
    let form = Form::new().file(submission.endpoint.field().to_string(), &submission.file)?;

    info!(url = %url, file = %submission.file.display(), "submitting");
    let response = client()?
        .post(&url)
        .header("token", &config.token)
        .multipart(form)
        .send()?;

    let status = response.status().as_u16();
    let body = response.text()?;
    let response = SubmitResponse { status, body };
    if response.is_success() {
        info!(status, "submission accepted");
    } else {
        warn!(status, body = %response.body, "submission rejected");
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_fields() {
        assert_eq!(Endpoint::ExtraTaskTrumpf.field(), "file");
        assert_eq!(Endpoint::Task4.field(), "model_state_dict");
        assert_eq!(Endpoint::Task4.path(), "task-4/submit");
        let custom = Endpoint::Custom {
            path: "task-2/submit".into(),
            field: "csv".into(),
        };
        assert_eq!((custom.path(), custom.field()), ("task-2/submit", "csv"));
    }

    #[test]
    fn url_gets_scheme_and_single_slash() {
        let cfg = SubmitConfig::new("149.156.182.9:6060/", "t");
        assert_eq!(
            cfg.url_for(&Endpoint::ExtraTaskTrumpf),
            "http://149.156.182.9:6060/extra-task-trumpf/submit"
        );
        let cfg = SubmitConfig::new("https://example.org", "t");
        assert_eq!(cfg.url_for(&Endpoint::Task4), "https://example.org/task-4/submit");
    }

    #[test]
    fn client_supports_tls() {
        assert!(client().is_ok());
    }

    #[test]
    fn endpoint_names() {
        assert_eq!(Endpoint::from_name("task4"), Some(Endpoint::Task4));
        assert_eq!(Endpoint::from_name("trumpf"), Some(Endpoint::ExtraTaskTrumpf));
        assert_eq!(Endpoint::from_name("task-9"), None);
    }

    #[test]
    fn missing_file_fails_before_sending() {
        let cfg = SubmitConfig::new("127.0.0.1:9", "t");
        let sub = Submission::new(Endpoint::Task4, "/no/such/weights.pt");
        assert!(matches!(submit(&cfg, &sub), Err(Error::Io(_))));
    }

    #[test]
    fn config_from_json() {
        let cfg: SubmitConfig =
            serde_json::from_str(r#"{"base_url":"host:1","token":"abc"}"#).unwrap();
        assert_eq!(cfg, SubmitConfig::new("host:1", "abc"));
    }
}
