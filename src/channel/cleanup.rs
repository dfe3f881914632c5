//! Unconditional channel cleanup on interrupt.
//!
//! Channel session directories are registered here while they are live.
//! Normal paths remove them via `Drop`; an interrupt removes every still
//! registered directory from a signal-handling thread before the process
//! exits. The engine subprocess shares the foreground process group and
//! receives the terminal-generated signal on its own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

static REGISTRY: OnceLock<Mutex<HashMap<u64, PathBuf>>> = OnceLock::new();
static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static HANDLER: OnceLock<()> = OnceLock::new();

fn registry() -> &'static Mutex<HashMap<u64, PathBuf>> {
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Register a live channel directory. Returns a handle for deregistration.
pub fn register(dir: &Path) -> u64 {
    install_handler();
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    registry()
        .lock()
        .expect("cleanup registry poisoned")
        .insert(id, dir.to_path_buf());
    id
}

/// Deregister a channel directory once it has been removed normally.
pub fn deregister(id: u64) {
    registry()
        .lock()
        .expect("cleanup registry poisoned")
        .remove(&id);
}

fn install_handler() {
    HANDLER.get_or_init(|| {
        let mut signals =
            Signals::new([SIGINT, SIGTERM]).expect("failed to install signal handler");
        std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::debug!("received signal {signal}, cleaning up channels");
                let dirs: Vec<PathBuf> = registry()
                    .lock()
                    .map(|map| map.values().cloned().collect())
                    .unwrap_or_default();
                for dir in dirs {
                    let _ = std::fs::remove_dir_all(&dir);
                }
                // 128 + signal number, the conventional interrupted exit.
                std::process::exit(128 + signal);
            }
        });
    });
}
