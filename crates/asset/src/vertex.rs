//! Resolved vertices and triangles.

use corelib::{CoreResult, Transform};

use crate::attributes::AttributeKind;
use crate::error::VertexError;

/// Size in bytes of one packed component.
pub const FLOAT_SIZE: usize = std::mem::size_of::<f32>();

/// Absolute per-component tolerance under which two vertices are equal.
pub const VERTEX_EPSILON: f32 = 1e-5;

/// Component-wise comparison of two packed vertex records, stopping at the
/// first component that differs by more than [`VERTEX_EPSILON`].
pub fn approx_eq(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= VERTEX_EPSILON)
}

/// Per-attribute component counts of a packed vertex. Offsets and stride are
/// in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    pub position_len: usize,
    pub uv_len: usize,
    pub normal_len: usize,
}

impl VertexLayout {
    /// Floats per packed vertex.
    pub fn floats(&self) -> usize {
        self.position_len + self.uv_len + self.normal_len
    }

    pub fn stride(&self) -> usize {
        self.floats() * FLOAT_SIZE
    }

    pub fn uv_offset(&self) -> usize {
        self.position_len * FLOAT_SIZE
    }

    pub fn normal_offset(&self) -> usize {
        self.uv_offset() + self.uv_len * FLOAT_SIZE
    }

    pub fn has_normal(&self) -> bool {
        self.normal_len > 0
    }
}

/// Immutable vertex: position (3 or 4 floats), optional uv (2 floats) and
/// optional normal (3 or 4 floats), packed as position‖uv‖normal.
#[derive(Clone, Debug)]
pub struct Vertex {
    layout: VertexLayout,
    data: Vec<f32>,
}

impl Vertex {
    /// Build a vertex; empty `uv`/`normal` slices mean the attribute is absent.
    pub fn new(position: &[f32], uv: &[f32], normal: &[f32]) -> Result<Self, VertexError> {
        check_len(AttributeKind::Position, position.len(), &[3, 4], "3 or 4")?;
        check_len(AttributeKind::TextureCoord, uv.len(), &[0, 2], "0 or 2")?;
        check_len(AttributeKind::Normal, normal.len(), &[0, 3, 4], "0, 3 or 4")?;

        let layout = VertexLayout {
            position_len: position.len(),
            uv_len: uv.len(),
            normal_len: normal.len(),
        };
        let mut data = Vec::with_capacity(layout.floats());
        data.extend_from_slice(position);
        data.extend_from_slice(uv);
        data.extend_from_slice(normal);
        Ok(Self { layout, data })
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn position(&self) -> &[f32] {
        &self.data[..self.layout.position_len]
    }

    pub fn uv(&self) -> &[f32] {
        let start = self.layout.position_len;
        &self.data[start..start + self.layout.uv_len]
    }

    pub fn normal(&self) -> &[f32] {
        &self.data[self.layout.position_len + self.layout.uv_len..]
    }

    /// Packed position‖uv‖normal record.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn uv_offset(&self) -> usize {
        self.layout.uv_offset()
    }

    pub fn normal_offset(&self) -> usize {
        self.layout.normal_offset()
    }

    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    /// Copy of this vertex with `transform` applied to position and normal.
    pub fn transformed(&self, transform: &Transform) -> CoreResult<Self> {
        let mut data = self.data.clone();
        let (position, rest) = data.split_at_mut(self.layout.position_len);
        transform.apply_to_position(position)?;
        if self.layout.has_normal() {
            transform.apply_to_normal(&mut rest[self.layout.uv_len..])?;
        }
        Ok(Self {
            layout: self.layout,
            data,
        })
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(&self.data, &other.data)
    }
}

fn check_len(
    kind: AttributeKind,
    len: usize,
    allowed: &[usize],
    expected: &'static str,
) -> Result<(), VertexError> {
    if allowed.contains(&len) {
        Ok(())
    } else {
        Err(VertexError::InvalidLength {
            kind,
            len,
            expected,
        })
    }
}

/// Triangle of three resolved vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    vertices: [Vertex; 3],
}

impl Face {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    /// Split a polygon into triangles. A triangle passes through; a quad
    /// `A B C D` becomes `(A, B, D)` and `(B, C, D)`. Any other arity yields
    /// `None`.
    pub fn triangulate(polygon: &[Vertex]) -> Option<Vec<Face>> {
        match polygon {
            [a, b, c] => Some(vec![Face::new(a.clone(), b.clone(), c.clone())]),
            [a, b, c, d] => Some(vec![
                Face::new(a.clone(), b.clone(), d.clone()),
                Face::new(b.clone(), c.clone(), d.clone()),
            ]),
            _ => None,
        }
    }

    pub fn transformed(&self, transform: &Transform) -> CoreResult<Self> {
        let [a, b, c] = &self.vertices;
        Ok(Face::new(
            a.transformed(transform)?,
            b.transformed(transform)?,
            c.transformed(transform)?,
        ))
    }
}
