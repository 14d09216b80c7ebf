//! The deploy pipeline: build, archive, upload, optional remote swap.

use crate::archive::{self, ArchiveInfo};
use crate::build;
use crate::config::{self, DeployConfig};
use crate::error::{Error, RemoteCommandFailedDetails, Result};
use crate::ssh::SshClient;
use crate::tty;
use crate::utils::shell;

/// Remote directory holding the previous deployment. At most one
/// generation is kept; each extraction overwrites it.
pub fn backup_dir_name(dist_dir: &str) -> String {
    format!("{}_backup", dist_dir)
}

/// Run the whole pipeline against an already-validated configuration.
///
/// Order matters: the SSH client is constructed first so a bad identity
/// file fails the run before the build spends minutes of work.
pub fn run(config: &DeployConfig) -> Result<()> {
    let client = SshClient::from_config(config)?;

    log_status!("build", "Running '{}'", config::BUILD_COMMAND);
    build::run_build()?;

    log_status!("archive", "Packaging {}/", config::DIST_DIR);
    let archive = archive::create(config::DIST_DIR)?;
    log_status!(
        "archive",
        "Created {} ({:.2} MB)",
        archive.file_name(),
        archive.size_mb()
    );

    upload_and_swap(&client, config, &archive)
}

/// Upload the archive, offer the remote swap, and clean up locally.
///
/// The local archive is removed after the prompt resolves, whether or
/// not the remote extraction succeeded. If the upload itself fails the
/// archive stays on disk so the transfer can be retried by hand.
pub fn upload_and_swap(
    client: &SshClient,
    config: &DeployConfig,
    archive: &ArchiveInfo,
) -> Result<()> {
    let archive_name = archive.file_name();

    log_status!(
        "deploy",
        "Uploading {} to {}:{}",
        archive_name,
        config.target(),
        config.remote_path
    );
    let status = client.upload(&archive.path, &config.remote_path);
    if !status.success {
        let mut err = Error::upload_failed(format!("scp {}", archive_name), status.exit_code);
        if let Some(detail) = status.error {
            err = err.with_hint(detail);
        }
        return Err(err.with_hint(format!(
            "Local archive {} was kept; fix the connection and re-run",
            archive_name
        )));
    }
    log_status!(
        "deploy",
        "Uploaded to {}/{}",
        config.remote_path,
        archive_name
    );

    let extract = tty::confirm("Extract and replace on the server? (y/N): ")?;
    let outcome = if extract {
        extract_on_server(client, config, &archive_name)
    } else {
        log_status!("extract", "Skipped");
        Ok(())
    };

    log_status!("cleanup", "Removing local {}", archive_name);
    let cleanup = std::fs::remove_file(&archive.path)
        .map_err(|e| Error::internal_io(e.to_string(), Some("archive cleanup".to_string())));

    // A remote failure takes precedence over a cleanup failure.
    outcome.and(cleanup)
}

/// Swap in the uploaded archive on the remote host.
///
/// Not transactional: a failure after the rename but before extraction
/// leaves the server without an active output directory. The error hint
/// points the operator at the backup so they can recover by hand.
fn extract_on_server(client: &SshClient, config: &DeployConfig, archive_name: &str) -> Result<()> {
    let command = remote_extract_command(&config.remote_path, archive_name, config::DIST_DIR);

    log_status!("extract", "Running remote swap in {}", config.remote_path);
    let status = client.execute(&command);
    if !status.success {
        let mut err = Error::remote_command_failed(RemoteCommandFailedDetails {
            command,
            exit_code: status.exit_code,
            host: config.host.clone(),
        })
        .with_hint(format!(
            "The previous {} may have been renamed to {}; inspect the server before retrying",
            config::DIST_DIR,
            backup_dir_name(config::DIST_DIR)
        ));
        if let Some(detail) = status.error {
            err = err.with_hint(detail);
        }
        return Err(err);
    }

    log_status!("extract", "Remote extraction complete");
    Ok(())
}

/// Render the remote swap as one shell command:
/// drop the old backup, rename the live directory to become the backup
/// (only if it exists), extract the uploaded archive, remove it.
pub fn remote_extract_command(remote_path: &str, archive_name: &str, dist_dir: &str) -> String {
    let backup = backup_dir_name(dist_dir);
    format!(
        "cd {path} && if [ -d {backup} ]; then rm -rf {backup}; fi && \
         if [ -d {dist} ]; then mv {dist} {backup}; fi && \
         tar -xzf {archive} && rm {archive}",
        path = shell::quote_path(remote_path),
        backup = shell::quote_arg(&backup),
        dist = shell::quote_arg(dist_dir),
        archive = shell::quote_arg(archive_name),
    )
}
