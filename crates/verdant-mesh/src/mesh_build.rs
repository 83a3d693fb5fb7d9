use verdant_geom::{Vec2, Vec3};

/// Interleaving-free vertex streams plus a triangle index list.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub col: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Pre-reserve for a `side × side` vertex grid.
    pub fn with_grid_capacity(side: usize) -> Self {
        let verts = side * side;
        let cells = side.saturating_sub(1).pow(2);
        Self {
            pos: Vec::with_capacity(verts * 3),
            norm: Vec::with_capacity(verts * 3),
            uv: Vec::with_capacity(verts * 2),
            col: Vec::with_capacity(verts * 3),
            idx: Vec::with_capacity(cells * 6),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Appends a vertex with an up-facing placeholder normal; returns its index.
    pub fn push_vertex(&mut self, p: Vec3, uv: Vec2, color: Vec3) -> u32 {
        let i = self.vertex_count() as u32;
        self.pos.extend_from_slice(&p.to_array());
        self.norm.extend_from_slice(&Vec3::UP.to_array());
        self.uv.extend_from_slice(&[uv.x, uv.y]);
        self.col.extend_from_slice(&color.to_array());
        i
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.idx.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.norm[i * 3], self.norm[i * 3 + 1], self.norm[i * 3 + 2])
    }

    #[inline]
    pub fn color(&self, i: usize) -> Vec3 {
        Vec3::new(self.col[i * 3], self.col[i * 3 + 1], self.col[i * 3 + 2])
    }

    #[inline]
    pub fn set_color(&mut self, i: usize, c: Vec3) {
        self.col[i * 3..i * 3 + 3].copy_from_slice(&c.to_array());
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.vertex_count()).map(move |i| self.position(i))
    }

    /// Smooth normals: every triangle adds its unnormalized face normal to its
    /// three corners (larger faces weigh more), then each sum is normalized.
    pub fn recompute_normals(&mut self) {
        let n = self.vertex_count();
        let mut acc = vec![Vec3::ZERO; n];
        for tri in self.idx.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let v0 = self.position(i0);
            let v1 = self.position(i1);
            let v2 = self.position(i2);
            let face = (v1 - v0).cross(v2 - v0);
            acc[i0] += face;
            acc[i1] += face;
            acc[i2] += face;
        }
        for (i, sum) in acc.into_iter().enumerate() {
            let normal = sum.normalized();
            self.norm[i * 3..i * 3 + 3].copy_from_slice(&normal.to_array());
        }
    }
}
