//! The result channel: a per-invocation named pipe.
//!
//! The engine's terminal streams are monopolized by the interactive display,
//! so the final JSON payload travels over a dedicated FIFO instead. Each
//! invocation gets a fresh session directory under the OS temp dir, named by
//! a [`ChannelToken`], holding the pipe node and the spooled catalog handed
//! to the engine subprocess.
//!
//! Lifecycle: the channel is created before the engine starts and removed
//! unconditionally when the owning value drops; interrupts are covered by
//! the registry in [`super::cleanup`].

use std::ffi::CString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crate::catalog::Copilot;
use crate::error::{PickerError, Result};

use super::cleanup;
use super::token::ChannelToken;

/// Name of the pipe node inside the session directory.
const PIPE_NAME: &str = "result.pipe";

/// Name of the spooled catalog inside the session directory.
const CATALOG_NAME: &str = "catalog.json";

/// A uniquely named result channel, removed on drop.
#[derive(Debug)]
pub struct ResultChannel {
    dir: PathBuf,
    pipe: PathBuf,
    cleanup_id: u64,
}

impl ResultChannel {
    /// Create a fresh channel under the OS temp dir.
    pub fn create() -> Result<Self> {
        Self::create_in(&std::env::temp_dir())
    }

    /// Create a fresh channel under an explicit base directory.
    pub fn create_in(base: &Path) -> Result<Self> {
        Self::create_with_token(base, &ChannelToken::new())
    }

    fn create_with_token(base: &Path, token: &ChannelToken) -> Result<Self> {
        let dir = base.join(format!("copilot-picker-{token}"));
        // create_dir is atomic: a colliding path is a hard failure rather
        // than a silently shared channel.
        fs::create_dir(&dir).map_err(|e| PickerError::ChannelCreation {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let pipe = dir.join(PIPE_NAME);
        if let Err(e) = mkfifo(&pipe, 0o600) {
            let _ = fs::remove_dir_all(&dir);
            return Err(PickerError::ChannelCreation {
                path: pipe.display().to_string(),
                message: e.to_string(),
            });
        }

        let cleanup_id = cleanup::register(&dir);
        tracing::debug!("created result channel at {}", pipe.display());

        Ok(Self {
            dir,
            pipe,
            cleanup_id,
        })
    }

    /// The pipe node the engine writes its envelope to.
    pub fn pipe_path(&self) -> &Path {
        &self.pipe
    }

    /// The session directory owning the pipe and the spooled catalog.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Spool the catalog into the session directory for the engine process.
    pub fn spool_catalog(&self, catalog: &[Copilot]) -> Result<PathBuf> {
        let path = self.dir.join(CATALOG_NAME);
        let json = serde_json::to_string(catalog).map_err(|e| PickerError::Other(e.into()))?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Start the blocking read of the engine's payload.
    ///
    /// Must be called before the engine process is waited on: the reader
    /// thread parks in `open` until the engine opens its write end, and the
    /// read completes exactly when the engine closes it.
    pub fn begin_read(&self) -> ChannelReader {
        let pipe = self.pipe.clone();
        let handle = std::thread::spawn(move || -> io::Result<String> {
            let mut payload = String::new();
            File::open(&pipe)?.read_to_string(&mut payload)?;
            Ok(payload)
        });
        ChannelReader {
            pipe: self.pipe.clone(),
            handle,
        }
    }
}

impl Drop for ResultChannel {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.pipe);
        let _ = fs::remove_dir_all(&self.dir);
        cleanup::deregister(self.cleanup_id);
        tracing::debug!("removed result channel at {}", self.pipe.display());
    }
}

/// In-flight payload read; see [`ResultChannel::begin_read`].
#[derive(Debug)]
pub struct ChannelReader {
    pipe: PathBuf,
    handle: JoinHandle<io::Result<String>>,
}

impl ChannelReader {
    /// Collect the payload after the engine process has exited.
    ///
    /// Pokes the pipe with a non-blocking write-open first, so the reader
    /// thread is released even when the engine died before ever opening its
    /// write end (a parked reader counts as a reader, so the open succeeds
    /// and its immediate close delivers EOF).
    pub fn collect(self) -> Result<String> {
        let _ = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&self.pipe);

        let payload = self
            .handle
            .join()
            .map_err(|_| PickerError::Io(io::Error::other("channel reader thread panicked")))??;
        Ok(payload)
    }
}

/// Write an engine payload to a channel pipe and close it.
///
/// Blocks until the orchestrator has opened the read end, which it does
/// before spawning the engine.
pub fn write_payload(pipe: &Path, payload: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(pipe)?;
    file.write_all(payload.as_bytes())?;
    file.flush()
}

fn mkfifo(path: &Path, mode: libc::mode_t) -> io::Result<()> {
    let cpath = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    // SAFETY: cpath is a valid NUL-terminated path for the duration of the call
    let rc = unsafe { libc::mkfifo(cpath.as_ptr(), mode) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
