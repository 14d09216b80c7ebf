use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::{DeployConfig, DEFAULT_SSH_PORT};
use crate::error::{Error, Result};

/// Environment variable read by `sshpass -e`.
const SSHPASS_ENV: &str = "SSHPASS";

pub struct SshClient {
    pub host: String,
    pub user: String,
    pub port: u16,
    /// Preferred auth path; injected via sshpass, never on the command line.
    password: Option<String>,
    /// Fallback auth path, tilde-expanded and checked at construction.
    pub identity_file: Option<String>,
}

/// Exit status of a passthrough invocation. Output goes straight to the
/// operator's terminal, so only the status is captured.
pub struct ExecStatus {
    pub success: bool,
    pub exit_code: i32,
    pub error: Option<String>,
}

impl ExecStatus {
    fn from_spawn_error(err: String) -> Self {
        Self {
            success: false,
            exit_code: -1,
            error: Some(err),
        }
    }
}

// Manual impl so the password never reaches debug output.
impl std::fmt::Debug for SshClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshClient")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("identity_file", &self.identity_file)
            .finish()
    }
}

impl SshClient {
    pub fn from_config(config: &DeployConfig) -> Result<Self> {
        let identity_file = match &config.identity_file {
            Some(path) if !path.is_empty() => {
                let expanded = shellexpand::tilde(path).to_string();
                if !Path::new(&expanded).exists() {
                    return Err(Error::ssh_identity_file_not_found(expanded));
                }
                Some(expanded)
            }
            _ => None,
        };

        Ok(Self {
            host: config.host.clone(),
            user: config.user.clone(),
            port: config.port,
            password: config.password.clone(),
            identity_file,
        })
    }

    pub fn uses_password(&self) -> bool {
        self.password.is_some()
    }

    /// Options shared by scp and ssh. Host-key verification is disabled
    /// for automation; the host list comes from the operator's own
    /// environment, not an inventory.
    fn common_options(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
        ];

        if self.password.is_some() {
            args.push("-o".to_string());
            args.push("PreferredAuthentications=password".to_string());
        } else if let Some(identity_file) = &self.identity_file {
            args.push("-i".to_string());
            args.push(identity_file.clone());
        }

        args
    }

    /// Arguments for `scp` uploading `local_path` into the remote directory.
    pub fn scp_args(&self, local_path: &str, remote_dir: &str) -> Vec<String> {
        let mut args = vec!["-P".to_string(), self.port.to_string()];
        args.extend(self.common_options());
        args.push(local_path.to_string());
        args.push(format!("{}@{}:{}/", self.user, self.host, remote_dir));
        args
    }

    /// Arguments for `ssh` running `command` on the remote host.
    pub fn ssh_args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if self.port != DEFAULT_SSH_PORT {
            args.push("-p".to_string());
            args.push(self.port.to_string());
        }
        args.extend(self.common_options());
        args.push(format!("{}@{}", self.user, self.host));
        args.push(command.to_string());
        args
    }

    /// Upload a local file into the configured remote directory,
    /// passing scp's progress output through to the terminal.
    pub fn upload(&self, local_path: &Path, remote_dir: &str) -> ExecStatus {
        let args = self.scp_args(&local_path.to_string_lossy(), remote_dir);
        self.run_passthrough("scp", &args)
    }

    /// Execute a command on the remote host with output passed through.
    pub fn execute(&self, command: &str) -> ExecStatus {
        let args = self.ssh_args(command);
        self.run_passthrough("ssh", &args)
    }

    fn run_passthrough(&self, program: &str, args: &[String]) -> ExecStatus {
        // sshpass wraps the real program when password auth is in use;
        // the password travels via SSHPASS, not argv.
        let mut cmd = match &self.password {
            Some(password) => {
                let mut cmd = Command::new("sshpass");
                cmd.arg("-e");
                cmd.env(SSHPASS_ENV, password);
                cmd.arg(program);
                cmd
            }
            None => Command::new(program),
        };

        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        match cmd.status() {
            Ok(status) => ExecStatus {
                success: status.success(),
                exit_code: status.code().unwrap_or(-1),
                error: None,
            },
            Err(err) if self.password.is_some() && err.kind() == std::io::ErrorKind::NotFound => {
                ExecStatus::from_spawn_error(
                    "sshpass not found; install sshpass or unset DISTSHIP_PASSWORD".to_string(),
                )
            }
            Err(err) => ExecStatus::from_spawn_error(format!("{} error: {}", program, err)),
        }
    }
}
