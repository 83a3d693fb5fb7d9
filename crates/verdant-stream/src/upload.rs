use hashbrown::HashMap;
use thiserror::Error;
use verdant_mesh::ChunkMesh;

/// Opaque per-chunk buffer handle issued by the render side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpuHandle(pub u64);

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("gpu upload failed for chunk ({cx}, {cz}): {reason}")]
    Failed { cx: i32, cz: i32, reason: String },
}

/// Seam to the rendering collaborator. Uploads happen inline while streaming.
pub trait ChunkUploader {
    fn upload(&mut self, chunk: &ChunkMesh) -> Result<GpuHandle, UploadError>;
    fn release(&mut self, handle: GpuHandle);
}

/// Bookkeeping-only uploader for headless runs and tests.
#[derive(Debug, Default)]
pub struct HeadlessUploader {
    next_id: u64,
    live: HashMap<GpuHandle, usize>,
    uploads: u64,
    releases: u64,
}

impl HeadlessUploader {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn live_buffers(&self) -> usize {
        self.live.len()
    }

    pub fn live_bytes(&self) -> usize {
        self.live.values().sum()
    }

    #[inline]
    pub fn is_live(&self, handle: GpuHandle) -> bool {
        self.live.contains_key(&handle)
    }

    #[inline]
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    #[inline]
    pub fn releases(&self) -> u64 {
        self.releases
    }
}

impl ChunkUploader for HeadlessUploader {
    fn upload(&mut self, chunk: &ChunkMesh) -> Result<GpuHandle, UploadError> {
        let m = &chunk.mesh;
        let floats = m.pos.len() + m.norm.len() + m.uv.len() + m.col.len();
        let bytes = floats * size_of::<f32>() + m.idx.len() * size_of::<u32>();
        self.next_id += 1;
        let handle = GpuHandle(self.next_id);
        self.live.insert(handle, bytes);
        self.uploads += 1;
        Ok(handle)
    }

    fn release(&mut self, handle: GpuHandle) {
        if self.live.remove(&handle).is_some() {
            self.releases += 1;
        } else {
            log::warn!(target: "stream", "release of unknown buffer {:?}", handle);
        }
    }
}
