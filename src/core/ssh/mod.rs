pub mod client;

pub use client::{ExecStatus, SshClient};
