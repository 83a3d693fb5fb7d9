use verdant_geom::Vec2;

/// Integer grid position of a terrain chunk on the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk containing the world-space point, `floor(pos / chunk_scale)`.
    #[inline]
    pub fn from_world(pos: Vec2, chunk_scale: f32) -> Self {
        Self {
            cx: (pos.x / chunk_scale).floor() as i32,
            cz: (pos.y / chunk_scale).floor() as i32,
        }
    }

    /// World-space corner of the chunk (its first vertex).
    #[inline]
    pub fn origin(self, chunk_scale: f32) -> Vec2 {
        Vec2::new(self.cx as f32 * chunk_scale, self.cz as f32 * chunk_scale)
    }

    #[inline]
    pub fn center(self, chunk_scale: f32) -> Vec2 {
        let o = self.origin(chunk_scale);
        Vec2::new(o.x + chunk_scale * 0.5, o.y + chunk_scale * 0.5)
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// Square window of `(2r + 1)^2` coordinates around `self`, row by row.
    pub fn window(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        (-radius..=radius)
            .flat_map(move |dx| (-radius..=radius).map(move |dz| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
