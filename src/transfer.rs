// src/transfer.rs
//! Artifact upload.

use std::{fs, path::Path, time::Duration};

use tracing::info;

use crate::config::consts::FTP_TIMEOUT_SECS;
use crate::config::TransferDestination;
use crate::core::ftp::FtpSession;
use crate::error::TransferError;

pub trait Transfer {
    /// Upload `local` into `dest.remote_path`, keeping its file name.
    fn upload(&self, local: &Path, dest: &TransferDestination) -> Result<(), TransferError>;
}

/// Passive-mode FTP upload.
#[derive(Clone, Debug)]
pub struct FtpTransfer {
    pub timeout: Duration,
}

impl Default for FtpTransfer {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(FTP_TIMEOUT_SECS) }
    }
}

impl Transfer for FtpTransfer {
    fn upload(&self, local: &Path, dest: &TransferDestination) -> Result<(), TransferError> {
        let no_file = || TransferError::NoLocalFile { path: local.to_path_buf() };
        if !local.is_file() {
            return Err(no_file());
        }
        let name = local.file_name().and_then(|n| n.to_str()).ok_or_else(no_file)?;
        let bytes = fs::read(local)?;

        let mut ftp = FtpSession::connect(dest.host.trim(), dest.port, self.timeout)?;
        ftp.login(&dest.user, &dest.password)?;
        ftp.enter_dir(&dest.remote_path)?;
        ftp.put(name, &bytes)?;
        ftp.quit();

        info!(host = %dest.host, path = %dest.remote_path, file = name, bytes = bytes.len(), "feed uploaded");
        Ok(())
    }
}
