//! Chunk streaming around a moving center: creation, eviction, and collision export.
#![forbid(unsafe_code)]

mod signal;
mod store;
mod upload;

pub use signal::UpdateSignal;
pub use store::{Chunk, ChunkStore, CollisionData, StreamError, StreamReport};
pub use upload::{ChunkUploader, GpuHandle, HeadlessUploader, UploadError};
