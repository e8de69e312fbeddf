use base64::Engine;
use thiserror::Error;

/// Failure to decode a remote transport frame
#[derive(Debug, Error)]
#[error("invalid base64 audio frame: {0}")]
pub struct DecodeError(#[from] base64::DecodeError);

/// Decode a base64-encoded remote audio frame into raw PCM bytes.
///
/// Empty input decodes to zero bytes. No validation beyond base64 happens
/// here: the decoded byte count may be odd, and sample alignment is the
/// timeline's responsibility.
pub fn decode_frame(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
}
