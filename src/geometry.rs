//! Subdivided plane geometry and its per-vertex random attribute.

use rand::Rng;

/// Name of the per-vertex random scalar as declared in the vertex shader.
pub const RANDOM_ATTRIBUTE: &str = "aRandom";

/// Plane in the XY plane, centred on the origin, facing +Z.
///
/// Vertices are laid out row-major starting at the top-left corner, which is
/// the layout the flag texture's UVs expect.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    /// `aRandom`, empty until [`PlaneGeometry::with_random_attribute`] runs.
    pub random: Vec<f32>,
}

impl PlaneGeometry {
    /// Builds the grid. Segment counts of zero are treated as one.
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;

        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let segment_w = width / grid_x as f32;
        let segment_h = height / grid_y as f32;

        let count = (grid_x1 * grid_y1) as usize;
        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);
        let mut uvs = Vec::with_capacity(count);

        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_h - half_h;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_w - half_w;
                positions.push([x, -y, 0.0]);
                normals.push([0.0, 0.0, 1.0]);
                uvs.push([
                    ix as f32 / grid_x as f32,
                    1.0 - iy as f32 / grid_y as f32,
                ]);
            }
        }

        let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + grid_x1 * iy;
                let b = ix + grid_x1 * (iy + 1);
                let c = (ix + 1) + grid_x1 * (iy + 1);
                let d = (ix + 1) + grid_x1 * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            height,
            width_segments: grid_x,
            height_segments: grid_y,
            positions,
            normals,
            uvs,
            indices,
            random: Vec::new(),
        }
    }

    /// Attaches one independent uniform sample in `[0, 1)` per vertex.
    pub fn with_random_attribute<R: Rng>(mut self, rng: &mut R) -> Self {
        self.random = (0..self.vertex_count()).map(|_| rng.gen::<f32>()).collect();
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Attribute names this geometry can feed to a vertex shader. These are
    /// exactly the streams the renderer uploads.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        self.attribute_streams().iter().map(|s| s.name).collect()
    }

    /// One tightly packed buffer per vertex attribute.
    pub fn attribute_streams(&self) -> Vec<AttributeStream> {
        let mut streams = vec![
            AttributeStream {
                name: "position",
                components: 3,
                data: self.positions.iter().flatten().copied().collect(),
            },
            AttributeStream {
                name: "normal",
                components: 3,
                data: self.normals.iter().flatten().copied().collect(),
            },
            AttributeStream {
                name: "uv",
                components: 2,
                data: self.uvs.iter().flatten().copied().collect(),
            },
        ];
        if !self.random.is_empty() {
            streams.push(AttributeStream {
                name: RANDOM_ATTRIBUTE,
                components: 1,
                data: self.random.clone(),
            });
        }
        streams
    }
}

/// Per-vertex data for one shader input.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStream {
    pub name: &'static str,
    /// Floats per vertex.
    pub components: i32,
    pub data: Vec<f32>,
}

impl AttributeStream {
    /// Only `aRandom` must be consumed; a shader may ignore the others.
    pub fn is_required(&self) -> bool {
        self.name == RANDOM_ATTRIBUTE
    }
}
