use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the access core's entire configuration state. This struct is designed
/// to be immutable once loaded, ensuring consistency across every component
/// that reads it (session provider, storage, views). The embedding shell
/// constructs it once at startup and passes it into `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Namespace prefixed onto every persisted storage key. Keeping the
    /// versioned namespace means a schema change in the persisted session
    /// record can roll the namespace instead of migrating old values.
    pub namespace: String,
    /// Where the file-backed store persists its contents. `None` means the
    /// embedding shell runs on a purely in-memory store (tests, previews).
    pub session_file: Option<PathBuf>,
    /// Runtime environment marker. Controls how strictly `load` treats
    /// missing settings.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development
/// conveniences (in-memory storage fallback) and deployments that must not
/// silently lose session state across restarts.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// The default storage namespace, matching the persisted keys written by
/// portal release V18.
const DEFAULT_NAMESPACE: &str = "collab3pl.v18";

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup. No environment variables are required.
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            session_file: None,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the configuration at startup.
    /// It reads all parameters from environment variables and implements the
    /// fail-fast principle for Production.
    ///
    /// # Panics
    /// Panics when running as Production without `COLLAB3PL_SESSION_FILE`
    /// set: a production shell that silently forgets every session on restart
    /// is a misconfiguration, not a fallback.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let namespace =
            env::var("COLLAB3PL_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());

        let session_file = match env {
            Env::Production => Some(PathBuf::from(env::var("COLLAB3PL_SESSION_FILE").expect(
                "FATAL: COLLAB3PL_SESSION_FILE must be set in production.",
            ))),
            // Local runs happily on the in-memory store when no file is given.
            Env::Local => env::var("COLLAB3PL_SESSION_FILE").ok().map(PathBuf::from),
        };

        Self {
            namespace,
            session_file,
            env,
        }
    }

    /// session_key
    ///
    /// The fully namespaced storage key under which the signed-in identity is
    /// persisted (`<namespace>:authUser`).
    pub fn session_key(&self) -> String {
        format!("{}:authUser", self.namespace)
    }
}
