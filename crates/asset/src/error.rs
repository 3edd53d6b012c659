//! Typed errors raised by the OBJ/MTL decoders.

use thiserror::Error;

use crate::attributes::AttributeKind;

/// A vertex was built from attribute tuples with unsupported lengths.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VertexError {
    #[error("{kind} has {len} components, expected {expected}")]
    InvalidLength {
        kind: AttributeKind,
        len: usize,
        expected: &'static str,
    },
}

/// Errors produced while assembling meshes from OBJ lines.
///
/// Face-level errors are recoverable: under the default
/// [`FaceErrorPolicy`](crate::obj::FaceErrorPolicy) the face is dropped and the
/// message lands in the document's error log.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ObjError {
    /// A face references an index that its attribute table never declared.
    #[error("line {line}: {kind} index {index} is out of range (table holds {len})")]
    IndexOutOfRange {
        line: usize,
        kind: AttributeKind,
        index: u32,
        len: usize,
    },

    /// A face uses an attribute kind that the current mesh segment never declared.
    #[error("line {line}: face uses {kind} data but none was declared for this mesh")]
    UnknownAttributeKind { line: usize, kind: AttributeKind },

    #[error("line {line}: face vertex has no position index")]
    MissingPosition { line: usize },

    #[error("line {line}: polygon with {vertices} vertices is not supported (3 or 4 only)")]
    UnsupportedPolygon { line: usize, vertices: usize },

    #[error("line {line}: {source}")]
    InvalidVertex {
        line: usize,
        #[source]
        source: VertexError,
    },

    /// A vertex layout differs from the one established by the mesh's first vertex.
    #[error("line {line}: vertex stride {found} does not match mesh stride {expected}")]
    LayoutMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("input exceeds the configured limit of {limit} lines")]
    LineLimitExceeded { limit: usize },

    #[error("mesh has more than {} unique vertices", u32::MAX)]
    TooManyVertices,
}

impl ObjError {
    /// Returns `true` for errors that only invalidate a single face.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ObjError::UnknownAttributeKind { .. }
                | ObjError::MissingPosition { .. }
                | ObjError::UnsupportedPolygon { .. }
                | ObjError::InvalidVertex { .. }
                | ObjError::LayoutMismatch { .. }
        )
    }
}
