use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigMissingEnv,
    ConfigInvalidValue,

    BuildFailed,

    ArchiveMissingSource,
    ArchiveFailed,

    SshIdentityFileNotFound,

    UploadFailed,
    RemoteCommandFailed,

    InternalIoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMissingEnv => "config.missing_env",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::BuildFailed => "build.failed",

            ErrorCode::ArchiveMissingSource => "archive.missing_source",
            ErrorCode::ArchiveFailed => "archive.failed",

            ErrorCode::SshIdentityFileNotFound => "ssh.identity_file_not_found",

            ErrorCode::UploadFailed => "upload.failed",
            ErrorCode::RemoteCommandFailed => "remote.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingEnvDetails {
    pub vars: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
    pub host: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityFileNotFoundDetails {
    pub identity_file: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn config_missing_env(vars: Vec<String>) -> Self {
        let message = format!(
            "Missing required environment variables: {}",
            vars.join(", ")
        );
        let details = serde_json::to_value(MissingEnvDetails { vars })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::ConfigMissingEnv, message, details)
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let problem = problem.into();
        let message = format!("Invalid value for {}: {}", key, problem);
        let details = serde_json::to_value(InvalidValueDetails {
            key,
            value,
            problem,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::ConfigInvalidValue, message, details)
    }

    pub fn build_failed(command: impl Into<String>, exit_code: i32) -> Self {
        let command = command.into();
        let message = format!("Build command '{}' failed (exit {})", command, exit_code);
        let details = serde_json::to_value(CommandFailedDetails { command, exit_code })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::BuildFailed, message, details)
    }

    pub fn archive_missing_source(dir: impl Into<String>) -> Self {
        let dir = dir.into();
        let message = format!("Build output directory '{}' does not exist", dir);
        Self::new(
            ErrorCode::ArchiveMissingSource,
            message,
            serde_json::json!({ "dir": dir }),
        )
    }

    pub fn archive_failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::ArchiveFailed,
            format!("Failed to create archive: {}", error),
            serde_json::json!({ "error": error }),
        )
    }

    pub fn ssh_identity_file_not_found(identity_file: impl Into<String>) -> Self {
        let identity_file = identity_file.into();
        let message = format!("SSH identity file not found: {}", identity_file);
        let details = serde_json::to_value(IdentityFileNotFoundDetails { identity_file })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::SshIdentityFileNotFound, message, details)
    }

    pub fn upload_failed(command: impl Into<String>, exit_code: i32) -> Self {
        let command = command.into();
        let message = format!("Upload failed (exit {})", exit_code);
        let details = serde_json::to_value(CommandFailedDetails { command, exit_code })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::UploadFailed, message, details)
    }

    pub fn remote_command_failed(details: RemoteCommandFailedDetails) -> Self {
        let message = format!(
            "Remote command failed on {} (exit {})",
            details.host, details.exit_code
        );
        let details =
            serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::RemoteCommandFailed, message, details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let message = match &context {
            Some(ctx) => format!("IO error ({}): {}", ctx, error),
            None => format!("IO error: {}", error),
        };
        let details = serde_json::to_value(InternalIoErrorDetails { error, context })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::InternalIoError, message, details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_lists_every_variable() {
        let err = Error::config_missing_env(vec![
            "DISTSHIP_HOST".to_string(),
            "DISTSHIP_PASSWORD".to_string(),
        ]);

        assert_eq!(err.code, ErrorCode::ConfigMissingEnv);
        assert!(err.message.contains("DISTSHIP_HOST"));
        assert!(err.message.contains("DISTSHIP_PASSWORD"));
        assert_eq!(err.details["vars"][0], "DISTSHIP_HOST");
    }

    #[test]
    fn remote_command_failed_carries_host_and_exit_code() {
        let err = Error::remote_command_failed(RemoteCommandFailedDetails {
            command: "tar -xzf dist.tar.gz".to_string(),
            exit_code: 2,
            host: "example.com".to_string(),
        });

        assert_eq!(err.code.as_str(), "remote.command_failed");
        assert!(err.message.contains("example.com"));
        assert_eq!(err.details["exitCode"], 2);
    }

    #[test]
    fn hints_accumulate_in_order() {
        let err = Error::config_missing_env(vec!["DISTSHIP_HOST".to_string()])
            .with_hint("export DISTSHIP_HOST='your.server.com'")
            .with_hint("export DISTSHIP_PORT='22'");

        assert_eq!(err.hints.len(), 2);
        assert!(err.hints[0].message.contains("DISTSHIP_HOST"));
    }
}
