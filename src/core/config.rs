//! Deployment configuration assembled once from the process environment.

use crate::error::{Error, Result};

/// Build command run in the current working directory.
pub const BUILD_COMMAND: &str = "pnpm build";

/// Directory the build command is expected to produce.
pub const DIST_DIR: &str = "dist";

pub const ENV_HOST: &str = "DISTSHIP_HOST";
pub const ENV_PORT: &str = "DISTSHIP_PORT";
pub const ENV_USER: &str = "DISTSHIP_USER";
pub const ENV_PATH: &str = "DISTSHIP_PATH";
pub const ENV_PASSWORD: &str = "DISTSHIP_PASSWORD";
pub const ENV_KEY: &str = "DISTSHIP_KEY";

pub const DEFAULT_SSH_PORT: u16 = 22;

/// Connection parameters for one deploy run.
///
/// Assembled at startup and passed by reference to each step; nothing
/// reads the environment after this is built.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub host: String,
    pub user: String,
    pub port: u16,
    pub remote_path: String,
    /// Password auth is the primary path (via sshpass).
    pub password: Option<String>,
    /// Key auth is the fallback when no password is configured.
    pub identity_file: Option<String>,
}

impl DeployConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary lookup function.
    ///
    /// Empty values count as missing, matching shell `export VAR=''`
    /// mistakes. All missing required variables are reported together.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get_nonempty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let host = get_nonempty(ENV_HOST);
        let user = get_nonempty(ENV_USER);
        let remote_path = get_nonempty(ENV_PATH);
        let password = get_nonempty(ENV_PASSWORD);
        let identity_file = get_nonempty(ENV_KEY);

        let required = [
            (ENV_HOST, host.is_some()),
            (ENV_USER, user.is_some()),
            (ENV_PATH, remote_path.is_some()),
            (ENV_PASSWORD, password.is_some()),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(Error::config_missing_env(missing)
                .with_hint(format!("export {}='your.server.com'", ENV_HOST))
                .with_hint(format!("export {}='username'", ENV_USER))
                .with_hint(format!("export {}='/path/to/deploy'", ENV_PATH))
                .with_hint(format!("export {}='your-password'", ENV_PASSWORD))
                .with_hint(format!(
                    "export {}='22'  # optional, defaults to 22",
                    ENV_PORT
                ))
                .with_hint(format!(
                    "export {}='/path/to/ssh/key'  # optional key-auth fallback",
                    ENV_KEY
                )));
        }

        let port = match get_nonempty(ENV_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                Error::config_invalid_value(ENV_PORT, Some(raw.clone()), "not a valid port number")
            })?,
            None => DEFAULT_SSH_PORT,
        };

        Ok(Self {
            host: host.unwrap_or_default(),
            user: user.unwrap_or_default(),
            port,
            remote_path: remote_path.unwrap_or_default(),
            password,
            identity_file,
        })
    }

    /// `user@host` form used in scp/ssh destinations and log lines.
    pub fn target(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}
