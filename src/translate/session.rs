use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use reqwest::{Client, RequestBuilder};
use tokio::sync::OnceCell;
use tracing::{debug, info, trace};

use super::interface::RemoteFailure;

pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_CLOUD_ACCESS_TOKEN";
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

/// How requests are authorised against the remote service
#[derive(Clone, PartialEq)]
pub enum Credentials {
    ApiKey(String),
    Bearer(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(..)"),
            Credentials::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

impl Credentials {
    /// Resolve ambient credentials: configured key, key from the environment,
    /// access token from the environment, then the gcloud CLI session.
    pub async fn resolve(configured_key: Option<&str>) -> Result<Self, RemoteFailure> {
        match Self::from_sources(configured_key, non_empty_env) {
            Some(credentials) => Ok(credentials),
            None => Self::from_gcloud().await,
        }
    }

    /// Credentials available without asking gcloud, in priority order.
    pub fn from_sources<F>(configured_key: Option<&str>, env: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = configured_key.filter(|k| !k.is_empty()) {
            return Some(Credentials::ApiKey(key.to_string()));
        }
        if let Some(key) = env(API_KEY_ENV) {
            return Some(Credentials::ApiKey(key));
        }
        env(ACCESS_TOKEN_ENV).map(Credentials::Bearer)
    }

    async fn from_gcloud() -> Result<Self, RemoteFailure> {
        debug!("Asking gcloud for an application-default access token");
        let output = tokio::process::Command::new("gcloud")
            .args(["auth", "application-default", "print-access-token"])
            .output()
            .await
            .map_err(|e| {
                RemoteFailure::Credentials(format!(
                    "set {} or {}, or install gcloud ({})",
                    API_KEY_ENV, ACCESS_TOKEN_ENV, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RemoteFailure::Credentials(format!(
                "gcloud returned {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(RemoteFailure::Credentials(
                "gcloud printed an empty access token".to_string(),
            ));
        }
        Ok(Credentials::Bearer(token))
    }

    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::Bearer(token) => request.bearer_auth(token),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub timeout: Duration,
}

/// HTTP client plus resolved credentials, shared by every call of one client
#[derive(Debug)]
pub struct Session {
    pub http: Client,
    pub credentials: Credentials,
    pub project_id: Option<String>,
}

impl Session {
    async fn open(settings: &SessionSettings) -> Result<Self, RemoteFailure> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        let credentials = Credentials::resolve(settings.api_key.as_deref()).await?;
        let project_id = settings.project_id.clone().or_else(|| non_empty_env(PROJECT_ENV));
        info!("Opened translation session: credentials={:?}", credentials);
        Ok(Self {
            http,
            credentials,
            project_id,
        })
    }

    /// Attach credentials and the billing project to a request
    pub fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = self.credentials.authorize(request);
        match &self.project_id {
            Some(project) => request.header("x-goog-user-project", project),
            None => request,
        }
    }
}

/// Lazily opened session reused for the lifetime of its owner.
///
/// A failed open leaves the cell empty, so the next acquisition retries.
pub struct LazySession {
    settings: SessionSettings,
    cell: OnceCell<Session>,
    initializations: AtomicUsize,
    active: AtomicUsize,
}

impl LazySession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            cell: OnceCell::new(),
            initializations: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
        }
    }

    pub async fn acquire(&self) -> Result<SessionHandle<'_>, RemoteFailure> {
        let session = self
            .cell
            .get_or_try_init(|| async move {
                self.initializations.fetch_add(1, Ordering::SeqCst);
                Session::open(&self.settings).await
            })
            .await?;

        self.active.fetch_add(1, Ordering::SeqCst);
        trace!("Session acquired");
        Ok(SessionHandle {
            session,
            owner: self,
        })
    }

    /// Number of times a session was opened
    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }

    /// Handles currently checked out
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Scoped access to the session; released when dropped
pub struct SessionHandle<'a> {
    session: &'a Session,
    owner: &'a LazySession,
}

impl std::ops::Deref for SessionHandle<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl Drop for SessionHandle<'_> {
    fn drop(&mut self) {
        self.owner.active.fetch_sub(1, Ordering::SeqCst);
        trace!("Session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_key() -> SessionSettings {
        SessionSettings {
            api_key: Some("test-key".to_string()),
            project_id: Some("demo".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn session_is_opened_once_and_reused() {
        let session = LazySession::new(settings_with_key());
        {
            let first = session.acquire().await.unwrap();
            assert_eq!(first.credentials, Credentials::ApiKey("test-key".to_string()));
            assert_eq!(session.active(), 1);
        }
        let _second = session.acquire().await.unwrap();
        assert_eq!(session.initializations(), 1);
        assert_eq!(session.active(), 1);
    }

    #[tokio::test]
    async fn handle_release_on_drop() {
        let session = LazySession::new(settings_with_key());
        let a = session.acquire().await.unwrap();
        let b = session.acquire().await.unwrap();
        assert_eq!(session.active(), 2);
        drop(a);
        drop(b);
        assert_eq!(session.active(), 0);
    }

    #[tokio::test]
    async fn configured_key_wins_over_environment() {
        let creds = Credentials::resolve(Some("from-config")).await.unwrap();
        assert_eq!(creds, Credentials::ApiKey("from-config".to_string()));
    }

    fn fake_env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn configured_key_beats_environment() {
        let env = fake_env(&[(API_KEY_ENV, "env-key"), (ACCESS_TOKEN_ENV, "env-token")]);
        let creds = Credentials::from_sources(Some("from-config"), env);
        assert_eq!(creds, Some(Credentials::ApiKey("from-config".to_string())));
    }

    #[test]
    fn environment_key_beats_access_token() {
        let env = fake_env(&[(API_KEY_ENV, "env-key"), (ACCESS_TOKEN_ENV, "env-token")]);
        let creds = Credentials::from_sources(None, env);
        assert_eq!(creds, Some(Credentials::ApiKey("env-key".to_string())));
    }

    #[test]
    fn access_token_becomes_bearer() {
        let env = fake_env(&[(ACCESS_TOKEN_ENV, "env-token")]);
        let creds = Credentials::from_sources(Some(""), env);
        assert_eq!(creds, Some(Credentials::Bearer("env-token".to_string())));
    }

    #[test]
    fn nothing_configured_defers_to_gcloud() {
        assert_eq!(Credentials::from_sources(None, fake_env(&[])), None);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = Credentials::Bearer("secret-token".to_string());
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
