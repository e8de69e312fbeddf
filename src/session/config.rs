use serde::{Deserialize, Serialize};

/// Default sample rate for realtime voice sessions (24 kHz PCM16)
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Configuration for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sample rate of both capture streams, immutable for the session's
    /// lifetime
    pub sample_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}
