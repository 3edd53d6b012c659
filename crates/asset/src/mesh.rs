//! Mesh segments and the vertex packer.

use corelib::{CoreResult, Transform};

use crate::attributes::AttributeKind;
use crate::error::ObjError;
use crate::vertex::{Face, VertexLayout, approx_eq};

/// Packing metadata computed once per mesh when its document is finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Packing {
    /// Layout of the mesh's first vertex, shared by all of its vertices.
    pub layout: VertexLayout,
    pub vertex_count: usize,
    pub face_count: usize,
}

/// Triangles sharing one name and material, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    name: Option<String>,
    material: Option<String>,
    attribute_order: Vec<AttributeKind>,
    faces: Vec<Face>,
    packing: Option<Packing>,
}

impl Mesh {
    pub(crate) fn new(name: Option<String>, material: Option<String>) -> Self {
        Self {
            name,
            material,
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Attribute kinds declared for this segment, in the order first seen.
    pub fn attribute_order(&self) -> &[AttributeKind] {
        &self.attribute_order
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_material(&mut self, material: Option<String>) {
        self.material = material;
    }

    pub(crate) fn declares(&self, kind: AttributeKind) -> bool {
        self.attribute_order.contains(&kind)
    }

    pub(crate) fn note_attribute(&mut self, kind: AttributeKind) {
        if !self.declares(kind) {
            self.attribute_order.push(kind);
        }
    }

    pub(crate) fn inherit_attribute_order(&mut self, order: &[AttributeKind]) {
        self.attribute_order = order.to_vec();
    }

    fn current_layout(&self) -> Option<VertexLayout> {
        self.faces.first().map(|f| f.vertices()[0].layout())
    }

    /// Append triangles of one polygon. Every vertex must match the layout
    /// of the mesh's first vertex.
    pub(crate) fn push_faces(&mut self, faces: Vec<Face>, line: usize) -> Result<(), ObjError> {
        let expected = self
            .current_layout()
            .or_else(|| faces.first().map(|f| f.vertices()[0].layout()));
        if let Some(expected) = expected {
            let mismatch = faces
                .iter()
                .flat_map(|f| f.vertices().iter())
                .map(|v| v.layout())
                .find(|layout| *layout != expected);
            if let Some(found) = mismatch {
                return Err(ObjError::LayoutMismatch {
                    line,
                    expected: expected.stride(),
                    found: found.stride(),
                });
            }
        }
        self.faces.extend(faces);
        Ok(())
    }

    /// Compute packing metadata. Later calls keep the first result.
    pub(crate) fn finalize(&mut self) {
        if self.packing.is_some() {
            return;
        }
        let packing = Packing {
            layout: self.current_layout().unwrap_or_default(),
            vertex_count: self.faces.len() * 3,
            face_count: self.faces.len(),
        };
        log::debug!(
            "Mesh {:?}: {} faces, {} vertices, stride {} bytes",
            self.name,
            packing.face_count,
            packing.vertex_count,
            packing.layout.stride()
        );
        self.packing = Some(packing);
    }

    pub fn packing(&self) -> Packing {
        self.packing.unwrap_or_default()
    }

    pub fn layout(&self) -> VertexLayout {
        self.packing().layout
    }

    pub fn face_count(&self) -> usize {
        self.packing().face_count
    }

    pub fn vertex_count(&self) -> usize {
        self.packing().vertex_count
    }

    /// Bytes per packed vertex.
    pub fn stride(&self) -> usize {
        self.layout().stride()
    }

    pub fn uv_offset(&self) -> usize {
        self.layout().uv_offset()
    }

    pub fn normal_offset(&self) -> usize {
        self.layout().normal_offset()
    }

    fn vertices(&self) -> impl Iterator<Item = &crate::vertex::Vertex> {
        self.faces.iter().flat_map(|f| f.vertices().iter())
    }

    /// All positions in face order.
    pub fn positions(&self) -> Vec<f32> {
        self.vertices().flat_map(|v| v.position().iter().copied()).collect()
    }

    /// All texture coordinates in face order; empty when the mesh has none.
    pub fn uvs(&self) -> Vec<f32> {
        self.vertices().flat_map(|v| v.uv().iter().copied()).collect()
    }

    /// All normals in face order; empty when the mesh has none.
    pub fn normals(&self) -> Vec<f32> {
        self.vertices().flat_map(|v| v.normal().iter().copied()).collect()
    }

    /// Axis-aligned bounds of the first three position components, or `None`
    /// for a mesh without faces.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut vertices = self.vertices();
        let first = vertices.next()?.position();
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for vertex in vertices {
            for (axis, &value) in vertex.position()[..3].iter().enumerate() {
                min[axis] = min[axis].min(value);
                max[axis] = max[axis].max(value);
            }
        }
        Some((min, max))
    }

    /// Non-indexed draw buffer: every vertex occurrence packed as
    /// position‖uv‖normal, in face order.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * self.layout().floats());
        for vertex in self.vertices() {
            out.extend_from_slice(vertex.data());
        }
        out
    }

    /// Deduplicated draw buffers.
    ///
    /// Each packed vertex is compared against the unique records accepted so
    /// far, in acceptance order, using the 1e-5 component tolerance. This is
    /// quadratic in the worst case: fine for typical assets, slow for meshes
    /// with hundreds of thousands of distinct vertices.
    pub fn indexed_interleaved(&self) -> Result<IndexedBuffers, ObjError> {
        let floats = self.layout().floats();
        let mut buffers = IndexedBuffers {
            vertices: Vec::new(),
            indices: Vec::with_capacity(self.vertex_count()),
            floats_per_vertex: floats,
        };
        if floats == 0 {
            return Ok(buffers);
        }

        let interleaved = self.interleaved();
        for window in interleaved.chunks_exact(floats) {
            let found = buffers
                .vertices
                .chunks_exact(floats)
                .position(|unique| approx_eq(unique, window));
            let index = match found {
                Some(index) => index,
                None => {
                    buffers.vertices.extend_from_slice(window);
                    buffers.vertices.len() / floats - 1
                }
            };
            buffers
                .indices
                .push(u32::try_from(index).map_err(|_| ObjError::TooManyVertices)?);
        }
        Ok(buffers)
    }

    /// Copy of this mesh with `transform` applied to every vertex.
    pub fn transformed(&self, transform: &Transform) -> CoreResult<Self> {
        let faces = self
            .faces
            .iter()
            .map(|f| f.transformed(transform))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self {
            faces,
            ..self.clone()
        })
    }
}

/// Unique packed vertices plus one index per vertex occurrence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedBuffers {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub floats_per_vertex: usize,
}

impl IndexedBuffers {
    pub fn unique_count(&self) -> usize {
        if self.floats_per_vertex == 0 {
            0
        } else {
            self.vertices.len() / self.floats_per_vertex
        }
    }

    /// Re-expand the indices into a non-indexed interleaved buffer.
    pub fn expand(&self) -> Vec<f32> {
        let n = self.floats_per_vertex;
        let mut out = Vec::with_capacity(self.indices.len() * n);
        for &index in &self.indices {
            let start = index as usize * n;
            out.extend_from_slice(&self.vertices[start..start + n]);
        }
        out
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
