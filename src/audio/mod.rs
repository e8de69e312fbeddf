pub mod decoder;
pub mod timeline;
pub mod wav;

pub use decoder::{decode_frame, DecodeError};
pub use timeline::{AudioOrigin, AudioSegment, MergeScope, TimelineStats, TimelineStore};
pub use wav::EncodeError;
