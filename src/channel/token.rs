//! Channel token generation and parsing.

use std::fmt;

/// A unique per-invocation channel identifier.
///
/// Format: `chan_{pid}_{random_hex}`. The pid keeps concurrent invocations
/// from different processes apart; the random suffix keeps repeated
/// invocations within one process apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelToken {
    pid: u32,
    random: [u8; 4],
}

impl ChannelToken {
    /// Generate a new token.
    pub fn new() -> Self {
        let mut random = [0u8; 4];
        getrandom::getrandom(&mut random).expect("Failed to generate random bytes");

        Self {
            pid: std::process::id(),
            random,
        }
    }

    /// Get the token as a string.
    pub fn as_str(&self) -> String {
        self.to_string()
    }

    /// Parse a token from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.strip_prefix("chan_")?;
        let (pid, random_hex) = s.split_once('_')?;
        let pid: u32 = pid.parse().ok()?;
        let random_bytes = hex::decode(random_hex).ok()?;
        if random_bytes.len() != 4 {
            return None;
        }

        let mut random = [0u8; 4];
        random.copy_from_slice(&random_bytes);

        Some(Self { pid, random })
    }
}

impl Default for ChannelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChannelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chan_{}_{}", self.pid, hex::encode(self.random))
    }
}
