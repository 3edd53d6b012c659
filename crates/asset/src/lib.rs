//! Wavefront OBJ/MTL decoding into render-ready meshes.
//!
//! Lines are classified, vertex attributes collected into global 1-indexed
//! tables, faces resolved and triangulated into per-group/per-material
//! meshes, and meshes packed into interleaved (optionally indexed) buffers.

pub mod attributes;
pub mod error;
pub mod line;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod tokenize;
pub mod vertex;

pub use attributes::{AttributeKind, AttributeTable, AttributeTables};
pub use error::{ObjError, VertexError};
pub use line::LineKind;
pub use mesh::{IndexedBuffers, Mesh, Packing};
pub use mtl::{Material, MaterialProperty, MaterialTable, TextureSlot};
pub use obj::{
    Document, FaceErrorPolicy, ParseOptions, load_obj_from_path, load_obj_from_reader,
    load_obj_from_str, parse_obj_lines,
};
pub use vertex::{Face, Vertex, VertexLayout};
