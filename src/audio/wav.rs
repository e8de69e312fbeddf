// In-memory WAV encoding: mono, 16-bit, uncompressed PCM
//
// The encoder produces the finished container as a byte buffer; where it
// ends up (disk, object storage) is the artifact sink's business.

use std::io::Cursor;
use thiserror::Error;

/// Canonical PCM WAV header length in bytes
pub const HEADER_LEN: usize = 44;

/// PCM16 block alignment: one mono sample is two bytes
pub const BYTES_PER_SAMPLE: usize = 2;

#[derive(Debug, Error)]
pub enum EncodeError {
    /// A WAV with no audio content is never a meaningful artifact
    #[error("no samples to encode")]
    EmptyPayload,

    #[error("WAV serialization failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Encode samples as a mono 16-bit PCM WAV container.
///
/// Output is the canonical 44-byte header followed by the little-endian
/// sample bytes; deterministic and pure. Zero samples is an error.
pub fn encode(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    if samples.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(
        HEADER_LEN + samples.len() * BYTES_PER_SAMPLE,
    ));

    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// Byte-oriented entry: interprets `pcm` as little-endian 16-bit samples.
///
/// A dangling odd final byte is truncated rather than emitting a
/// non-block-aligned data chunk.
pub fn encode_bytes(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    let aligned = pcm.len() - pcm.len() % 2;
    let samples: Vec<i16> = pcm[..aligned]
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    encode(&samples, sample_rate)
}
