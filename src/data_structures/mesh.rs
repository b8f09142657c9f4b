//! CPU-side geometry.
//!
//! A [`Mesh`] is built once (from a primitive constructor or an OBJ file) and
//! never changes afterwards; [`Shape`](super::shape::Shape) copies it into GPU
//! buffers.

use cgmath::InnerSpace;

use super::vertex::Vertex;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vertex>,
    indices: Option<Vec<u32>>,
    material: Option<String>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, indices: Option<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            material: None,
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of vertices a draw call consumes.
    pub fn element_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertices.len(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.element_count() / 3
    }

    /// Replace every normal by the average of the normals of the faces that
    /// use the vertex. Degenerate faces contribute nothing.
    pub fn compute_smooth_normals(&mut self) {
        let triangles: Vec<[usize; 3]> = match &self.indices {
            Some(indices) => indices
                .chunks_exact(3)
                .map(|c| [c[0] as usize, c[1] as usize, c[2] as usize])
                .collect(),
            None => (0..self.vertices.len() / 3)
                .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
                .collect(),
        };

        let mut accumulated = vec![cgmath::Vector3::new(0.0f32, 0.0, 0.0); self.vertices.len()];
        for [a, b, c] in triangles {
            if a >= self.vertices.len() || b >= self.vertices.len() || c >= self.vertices.len() {
                continue;
            }
            let p0: cgmath::Vector3<f32> = self.vertices[a].position.into();
            let p1: cgmath::Vector3<f32> = self.vertices[b].position.into();
            let p2: cgmath::Vector3<f32> = self.vertices[c].position.into();
            // Unnormalised so larger faces weigh more.
            let face = (p1 - p0).cross(p2 - p0);
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            vertex.normal = if normal.magnitude2() > f32::EPSILON {
                normal.normalize().into()
            } else {
                [0.0, 0.0, 0.0]
            };
        }
    }

    /// Unit cube centred on the origin with per-face normals and texture
    /// coordinates spanning each face.
    pub fn cube() -> Self {
        // (normal, tangent u, tangent v) for each face
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        const CORNERS: [([f32; 2], [f32; 2]); 4] = [
            ([-0.5, -0.5], [0.0, 0.0]),
            ([0.5, -0.5], [1.0, 0.0]),
            ([0.5, 0.5], [1.0, 1.0]),
            ([-0.5, 0.5], [0.0, 1.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in FACES {
            let base = vertices.len() as u32;
            for ([su, sv], tex_coords) in CORNERS {
                let position = [
                    normal[0] * 0.5 + u[0] * su + v[0] * sv,
                    normal[1] * 0.5 + u[1] * su + v[1] * sv,
                    normal[2] * 0.5 + u[2] * su + v[2] * sv,
                ];
                vertices.push(Vertex::new(position, normal, tex_coords));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self::new("cube", vertices, Some(indices))
    }

    /// Horizontal square of side `size` in the XZ plane facing +Y. Texture
    /// coordinates repeat `tiling` times across it.
    pub fn plane(size: f32, tiling: f32) -> Self {
        let h = size * 0.5;
        let up = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex::new([-h, 0.0, h], up, [0.0, 0.0]),
            Vertex::new([h, 0.0, h], up, [tiling, 0.0]),
            Vertex::new([h, 0.0, -h], up, [tiling, tiling]),
            Vertex::new([-h, 0.0, -h], up, [0.0, tiling]),
        ];
        Self::new("plane", vertices, Some(vec![0, 1, 2, 0, 2, 3]))
    }

    /// Unit quad in the XY plane facing +Z, drawn without an index buffer.
    pub fn quad() -> Self {
        let n = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex::new([-0.5, -0.5, 0.0], n, [0.0, 0.0]),
            Vertex::new([0.5, -0.5, 0.0], n, [1.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.0], n, [1.0, 1.0]),
            Vertex::new([-0.5, -0.5, 0.0], n, [0.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.0], n, [1.0, 1.0]),
            Vertex::new([-0.5, 0.5, 0.0], n, [0.0, 1.0]),
        ];
        Self::new("quad", vertices, None)
    }
}
