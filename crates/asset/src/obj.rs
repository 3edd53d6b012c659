//! OBJ decoder: assembles meshes from a sequence of text lines.
//!
//! Attribute tables are global to the file. Faces resolve against them and
//! land in the current mesh segment; a new segment starts at the first
//! geometry after a group/object marker or after a material switch.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::attributes::{AttributeKind, AttributeTables};
use crate::error::ObjError;
use crate::line::LineKind;
use crate::mesh::Mesh;
use crate::mtl::{MaterialTable, load_mtl_from_path};
use crate::tokenize::{extract_face_sequence, extract_floats};
use crate::vertex::{Face, Vertex};

/// What to do with a face that cannot be built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaceErrorPolicy {
    /// Drop the face, log a warning and record it in [`Document::errors`].
    #[default]
    Skip,
    /// Fail the whole parse.
    Abort,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of input lines; `None` means unbounded.
    pub line_limit: Option<usize>,
    pub face_errors: FaceErrorPolicy,
}

impl ParseOptions {
    pub fn with_line_limit(mut self, limit: usize) -> Self {
        self.line_limit = Some(limit);
        self
    }

    pub fn with_face_errors(mut self, policy: FaceErrorPolicy) -> Self {
        self.face_errors = policy;
        self
    }
}

/// Decoded OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub meshes: Vec<Mesh>,
    pub attributes: AttributeTables,
    /// Filename given by `mtllib`, relative to the OBJ file.
    pub material_library: Option<String>,
    /// Soft errors: skipped faces and unreadable sources.
    pub errors: Vec<String>,
}

impl Document {
    /// Empty document recording why its source could not be read.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            errors: vec![reason.into()],
            ..Self::default()
        }
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(Mesh::face_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name() == Some(name))
    }

    /// Load the declared material library from `obj_dir`. Returns an empty
    /// table when the file declares none.
    pub fn load_materials(&self, obj_dir: impl AsRef<Path>) -> Result<MaterialTable> {
        match &self.material_library {
            Some(file) => load_mtl_from_path(obj_dir.as_ref().join(file)),
            None => Ok(MaterialTable::default()),
        }
    }
}

/// Load an OBJ document from a file path. A file that cannot be opened
/// yields an empty document whose error log says why.
pub fn load_obj_from_path(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            let reason = format!("Failed to open OBJ file {}: {}", path.display(), err);
            log::warn!("{}", reason);
            return Ok(Document::unreadable(reason));
        }
    };
    let document = load_obj_from_reader(BufReader::new(file), options)
        .with_context(|| format!("Failed to load OBJ file: {}", path.display()))?;
    log::info!(
        "Loaded {}: {} meshes, {} faces, {} soft errors",
        path.display(),
        document.meshes.len(),
        document.face_count(),
        document.errors.len()
    );
    Ok(document)
}

/// Load an OBJ document from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Document> {
    let mut assembler = Assembler::new(options);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        assembler.feed(line_no + 1, &line)?;
    }
    Ok(assembler.finish())
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str, options: &ParseOptions) -> Result<Document> {
    load_obj_from_reader(io::Cursor::new(contents), options)
}

/// Decode already-split lines. Line numbers in errors are 1-based.
pub fn parse_obj_lines<I, S>(lines: I, options: &ParseOptions) -> Result<Document, ObjError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = Assembler::new(options);
    for (line_no, line) in lines.into_iter().enumerate() {
        assembler.feed(line_no + 1, line.as_ref())?;
    }
    Ok(assembler.finish())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    BeforeFirstMesh,
    Accumulating,
    /// A group/object marker closed the current mesh; the next geometry line
    /// opens a new mesh.
    SeenGroupMarker,
    /// A material switch closed the current mesh. The next geometry line
    /// opens a new mesh that keeps the group's attribute declarations.
    SeenMaterialSwitch,
}

struct Assembler<'o> {
    options: &'o ParseOptions,
    state: State,
    tables: AttributeTables,
    meshes: Vec<Mesh>,
    next_name: Option<String>,
    active_material: Option<String>,
    material_library: Option<String>,
    errors: Vec<String>,
}

impl<'o> Assembler<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            state: State::BeforeFirstMesh,
            tables: AttributeTables::new(),
            meshes: Vec::new(),
            next_name: None,
            active_material: None,
            material_library: None,
            errors: Vec::new(),
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ObjError> {
        if let Some(limit) = self.options.line_limit {
            if line_no > limit {
                return Err(ObjError::LineLimitExceeded { limit });
            }
        }

        let (kind, rest) = LineKind::classify(line);
        match kind {
            _ if kind.is_vertex_attribute() => {
                if let Some(attribute) = AttributeKind::from_line_kind(kind) {
                    self.push_attribute(attribute, line.trim());
                }
            }
            LineKind::Face => self.push_face(line_no, line.trim())?,
            LineKind::GroupMarker => self.mark_group(non_empty(rest)),
            LineKind::MaterialUse => self.use_material(non_empty(rest)),
            LineKind::MaterialLibrary => self.material_library = non_empty(rest),
            LineKind::NotApplicable => {}
            other => log::debug!("line {}: ignoring {:?} directive in OBJ input", line_no, other),
        }
        Ok(())
    }

    fn current(&mut self) -> &mut Mesh {
        if self.meshes.is_empty() {
            self.open_mesh(false);
        }
        let last = self.meshes.len() - 1;
        &mut self.meshes[last]
    }

    /// Start a new mesh. With `inherit` set it keeps the previous segment's
    /// attribute declarations.
    fn open_mesh(&mut self, inherit: bool) {
        let mut mesh = Mesh::new(self.next_name.take(), self.active_material.clone());
        if inherit {
            if let Some(previous) = self.meshes.last() {
                mesh.inherit_attribute_order(previous.attribute_order());
            }
        }
        log::debug!("Opening mesh {} ({:?})", self.meshes.len(), mesh.name());
        self.meshes.push(mesh);
        self.state = State::Accumulating;
    }

    /// Open the mesh a pending boundary asks for. A group marker followed by
    /// new vertex data starts a fresh declaration record; a group reusing
    /// earlier vertex data, or a material split, inherits it.
    fn ensure_mesh(&mut self, fresh_vertex_data: bool) {
        match self.state {
            State::BeforeFirstMesh => self.open_mesh(false),
            State::SeenGroupMarker => self.open_mesh(!fresh_vertex_data),
            State::SeenMaterialSwitch => self.open_mesh(true),
            State::Accumulating => {}
        }
    }

    fn push_attribute(&mut self, kind: AttributeKind, line: &str) {
        self.ensure_mesh(true);
        self.tables.insert(kind, extract_floats(line));
        self.current().note_attribute(kind);
    }

    fn mark_group(&mut self, name: Option<String>) {
        match self.state {
            State::BeforeFirstMesh => self.next_name = name,
            State::SeenGroupMarker | State::SeenMaterialSwitch => {
                self.next_name = name;
                self.state = State::SeenGroupMarker;
            }
            State::Accumulating => {
                let mesh = self.current();
                if mesh.has_faces() || !mesh.attribute_order().is_empty() {
                    self.next_name = name;
                    self.state = State::SeenGroupMarker;
                } else {
                    mesh.set_name(name);
                }
            }
        }
    }

    fn use_material(&mut self, material: Option<String>) {
        self.active_material = material.clone();
        if self.state != State::Accumulating {
            return;
        }
        let mesh = self.current();
        if mesh.has_faces() && mesh.material() != material.as_deref() {
            let name = mesh.name().map(str::to_owned);
            self.next_name = name;
            self.state = State::SeenMaterialSwitch;
        } else {
            mesh.set_material(material);
        }
    }

    fn push_face(&mut self, line_no: usize, line: &str) -> Result<(), ObjError> {
        self.ensure_mesh(false);
        let groups = extract_face_sequence(line);
        let result = self
            .resolve_polygon(&groups, line_no)
            .and_then(|faces| self.current().push_faces(faces, line_no));

        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_recoverable() && self.options.face_errors == FaceErrorPolicy::Skip => {
                log::warn!("Skipping face: {}", err);
                self.errors.push(err.to_string());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_polygon(&self, groups: &[[u32; 3]], line: usize) -> Result<Vec<Face>, ObjError> {
        let unsupported = || ObjError::UnsupportedPolygon {
            line,
            vertices: groups.len(),
        };
        if !(3..=4).contains(&groups.len()) {
            return Err(unsupported());
        }
        let polygon = groups
            .iter()
            .map(|group| self.resolve_vertex(*group, line))
            .collect::<Result<Vec<_>, _>>()?;
        Face::triangulate(&polygon).ok_or_else(unsupported)
    }

    fn resolve_vertex(&self, [p, t, n]: [u32; 3], line: usize) -> Result<Vertex, ObjError> {
        if p == 0 {
            return Err(ObjError::MissingPosition { line });
        }
        let position = self.lookup(AttributeKind::Position, p, line)?;
        let uv = self.lookup(AttributeKind::TextureCoord, t, line)?;
        let normal = self.lookup(AttributeKind::Normal, n, line)?;
        Vertex::new(position, uv, normal).map_err(|source| ObjError::InvalidVertex { line, source })
    }

    /// Resolve one sub-index. Index 0 is an absent attribute and resolves to
    /// an empty slice.
    fn lookup(&self, kind: AttributeKind, index: u32, line: usize) -> Result<&[f32], ObjError> {
        if index == 0 {
            return Ok(&[]);
        }
        let declared = self
            .meshes
            .last()
            .is_some_and(|mesh| mesh.attribute_order().contains(&kind));
        if !declared {
            return Err(ObjError::UnknownAttributeKind { line, kind });
        }
        self.tables
            .get(kind, index)
            .ok_or_else(|| ObjError::IndexOutOfRange {
                line,
                kind,
                index,
                len: self.tables.table(kind).len(),
            })
    }

    fn finish(mut self) -> Document {
        for mesh in &mut self.meshes {
            mesh.finalize();
        }
        Document {
            meshes: self.meshes,
            attributes: self.tables,
            material_library: self.material_library,
            errors: self.errors,
        }
    }
}

fn non_empty(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Document {
        parse_obj_lines(src.lines(), &ParseOptions::default()).expect("parse obj")
    }

    #[test]
    fn parse_simple_triangle() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3");
        assert_eq!(doc.meshes.len(), 1);
        let mesh = &doc.meshes[0];
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        for vertex in mesh.faces()[0].vertices() {
            assert!(vertex.uv().is_empty());
            assert!(vertex.normal().is_empty());
        }
        assert_eq!(mesh.layout().floats(), 3);
        assert_eq!(mesh.stride(), 12);
        assert!(doc.errors.is_empty());
    }

    #[test]
    fn parse_textured_triangle_with_normals() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            vn 0.0 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let doc = parse(src);
        let mesh = &doc.meshes[0];
        assert_eq!(mesh.stride(), 32);
        assert_eq!(mesh.uv_offset(), 12);
        assert_eq!(mesh.normal_offset(), 20);
        assert_eq!(
            mesh.attribute_order(),
            &[
                AttributeKind::Position,
                AttributeKind::TextureCoord,
                AttributeKind::Normal
            ]
        );
        let second = &mesh.faces()[0].vertices()[1];
        assert_eq!(second.position(), &[1.0, 0.0, 0.0]);
        assert_eq!(second.uv(), &[1.0, 0.0]);
        assert_eq!(second.normal(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn missing_uv_slot_leaves_uv_empty() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1");
        let mesh = &doc.meshes[0];
        assert_eq!(mesh.layout().uv_len, 0);
        assert_eq!(mesh.layout().normal_len, 3);
        assert_eq!(mesh.uv_offset(), mesh.normal_offset());
    }

    #[test]
    fn quad_becomes_two_triangles() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4");
        let mesh = &doc.meshes[0];
        assert_eq!(mesh.face_count(), 2);
        let corner = |face: usize, i: usize| mesh.faces()[face].vertices()[i].position().to_vec();
        assert_eq!(corner(0, 0), vec![0.0, 0.0, 0.0]);
        assert_eq!(corner(0, 1), vec![1.0, 0.0, 0.0]);
        assert_eq!(corner(0, 2), vec![0.0, 1.0, 0.0]);
        assert_eq!(corner(1, 0), vec![1.0, 0.0, 0.0]);
        assert_eq!(corner(1, 1), vec![1.0, 1.0, 0.0]);
        assert_eq!(corner(1, 2), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn two_groups_make_two_meshes() {
        let src = "g first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
                   g second\nv 0 0 1\nv 1 0 1\nv 0 1 1\nv 1 1 1\nf 4 5 6 7";
        let doc = parse(src);
        assert_eq!(doc.meshes.len(), 2);
        assert_eq!(doc.meshes[0].name(), Some("first"));
        assert_eq!(doc.meshes[0].face_count(), 1);
        assert_eq!(doc.meshes[1].name(), Some("second"));
        assert_eq!(doc.meshes[1].face_count(), 2);
        assert_eq!(doc.face_count(), 3);
        assert_eq!(doc.vertex_count(), 9);
    }

    #[test]
    fn no_group_marker_makes_one_mesh() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nv 1 1 0\nf 2 4 3");
        assert_eq!(doc.meshes.len(), 1);
        assert_eq!(doc.meshes[0].name(), None);
        assert_eq!(doc.meshes[0].face_count(), 2);
    }

    #[test]
    fn group_reusing_earlier_vertices_keeps_declarations() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\ng a\nf 1 2 3\ng b\nf 2 4 3");
        let summary: Vec<_> = doc.meshes.iter().map(|m| (m.name(), m.face_count())).collect();
        assert_eq!(summary, vec![(None, 0), (Some("a"), 1), (Some("b"), 1)]);
        assert!(doc.errors.is_empty());
    }

    #[test]
    fn marker_after_vertex_only_group_starts_a_new_mesh() {
        let doc = parse("g a\nv 0 0 0\nv 1 0 0\nv 0 1 0\ng b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6");
        assert_eq!(doc.meshes.len(), 2);
        assert_eq!(doc.meshes[0].name(), Some("a"));
        assert_eq!(doc.meshes[0].face_count(), 0);
        assert_eq!(doc.meshes[1].name(), Some("b"));
        assert_eq!(doc.meshes[1].face_count(), 1);
    }

    #[test]
    fn material_split_keeps_uv_declarations_for_new_positions() {
        let src = "g a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\n\
                   usemtl red\nf 1/1 2/2 3/3\nusemtl blue\nv 0 0 1\nv 1 0 1\nv 0 1 1\n\
                   f 4/1 5/2 6/3";
        let doc = parse(src);
        assert!(doc.errors.is_empty(), "{:?}", doc.errors);
        let summary: Vec<_> = doc
            .meshes
            .iter()
            .map(|m| (m.name(), m.material(), m.face_count()))
            .collect();
        assert_eq!(
            summary,
            vec![(Some("a"), Some("red"), 1), (Some("a"), Some("blue"), 1)]
        );
        assert_eq!(doc.face_count(), 2);
        assert_eq!(
            doc.meshes[1].attribute_order(),
            &[AttributeKind::Position, AttributeKind::TextureCoord]
        );
        assert_eq!(doc.meshes[1].faces()[0].vertices()[1].uv(), &[1.0, 0.0]);
    }

    #[test]
    fn relative_indices_are_reported_not_misresolved() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1");
        assert_eq!(doc.meshes[0].face_count(), 0);
        assert_eq!(doc.errors, vec!["line 4: face vertex has no position index".to_string()]);
    }

    #[test]
    fn material_switch_splits_mesh_and_carries_forward() {
        let src = "mtllib scene.mtl\no box\nv 0 0 0\nv 1 0 0\nv 0 1 0\n\
                   usemtl red\nf 1 2 3\nusemtl blue\nf 1 3 2\no lid\nv 0 0 1\nf 1 2 4";
        let doc = parse(src);
        assert_eq!(doc.material_library.as_deref(), Some("scene.mtl"));
        let summary: Vec<_> = doc
            .meshes
            .iter()
            .map(|m| (m.name(), m.material(), m.face_count()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some("box"), Some("red"), 1),
                (Some("box"), Some("blue"), 1),
                (Some("lid"), Some("blue"), 1),
            ]
        );
    }

    #[test]
    fn repeated_usemtl_does_not_split() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\nusemtl red\nf 1 3 2");
        assert_eq!(doc.meshes.len(), 1);
        assert_eq!(doc.meshes[0].material(), Some("red"));
    }

    #[test]
    fn out_of_range_index_is_fatal() {
        let err = parse_obj_lines(["v 0 0 0", "v 1 0 0", "f 1 2 3"], &ParseOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ObjError::IndexOutOfRange {
                line: 3,
                kind: AttributeKind::Position,
                index: 3,
                len: 2
            }
        );
    }

    #[test]
    fn undeclared_kind_skips_face() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1 2/1 3/1\nf 1 2 3");
        assert_eq!(doc.meshes[0].face_count(), 1);
        assert_eq!(doc.errors.len(), 1);
        assert!(doc.errors[0].contains("texture coordinate"));
    }

    #[test]
    fn undeclared_kind_aborts_under_strict_policy() {
        let options = ParseOptions::default().with_face_errors(FaceErrorPolicy::Abort);
        let err = parse_obj_lines(
            ["v 0 0 0", "v 1 0 0", "v 0 1 0", "f 1//1 2//1 3//1"],
            &options,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ObjError::UnknownAttributeKind {
                line: 4,
                kind: AttributeKind::Normal
            }
        );
    }

    #[test]
    fn pentagon_is_logged_and_skipped() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0.5 2 0\nf 1 2 3 4 5\nf 1 2 3");
        assert_eq!(doc.meshes[0].face_count(), 1);
        assert_eq!(
            doc.errors,
            vec!["line 6: polygon with 5 vertices is not supported (3 or 4 only)".to_string()]
        );
    }

    #[test]
    fn bad_uv_arity_is_reported_per_face() {
        let doc = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0 0\nf 1/1 2/1 3/1");
        assert_eq!(doc.meshes[0].face_count(), 0);
        assert_eq!(doc.errors.len(), 1);
    }

    #[test]
    fn line_limit_is_enforced() {
        let options = ParseOptions::default().with_line_limit(2);
        let err = parse_obj_lines(["v 0 0 0", "v 1 0 0", "v 0 1 0"], &options).unwrap_err();
        assert_eq!(err, ObjError::LineLimitExceeded { limit: 2 });
    }

    #[test]
    fn attribute_tables_are_global() {
        let doc = parse("g a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\ng b\nv 5 5 5\nf 1 2 4\nvp 0.5");
        assert_eq!(doc.attributes.table(AttributeKind::Position).len(), 4);
        assert_eq!(doc.attributes.table(AttributeKind::ParameterSpace).len(), 1);
        assert_eq!(doc.meshes[1].faces()[0].vertices()[2].position(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let src = "o a\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvt 1 1\n\
                   f 1/1 2/2 3/1 4/2\no b\nv 2 2 2\nvt 0.5 0.5\nf 1/3 5/2 3/1";
        let first = parse(src);
        let second = parse(src);
        assert_eq!(first.meshes.len(), second.meshes.len());
        for (a, b) in first.meshes.iter().zip(&second.meshes) {
            assert_eq!(a.face_count(), b.face_count());
            assert_eq!(a.vertex_count(), b.vertex_count());
            assert_eq!(a.interleaved(), b.interleaved());
        }
        assert!(first.errors.is_empty());
    }

    #[test]
    fn comments_and_unknown_lines_are_ignored() {
        let doc = parse("# header\n\ns 1\nv 0 0 0\nl 1 2\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(doc.meshes.len(), 1);
        assert_eq!(doc.meshes[0].face_count(), 1);
    }

    #[test]
    fn str_loader_matches_line_parser() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3";
        let doc = load_obj_from_str(src, &ParseOptions::default()).expect("load");
        assert_eq!(doc, parse(src));
    }

    #[test]
    fn unopenable_path_yields_empty_document() {
        let missing = std::env::temp_dir().join("asset-obj-tests-definitely-missing.obj");
        let doc = load_obj_from_path(&missing, &ParseOptions::default()).expect("soft failure");
        assert!(doc.meshes.is_empty());
        assert_eq!(doc.errors.len(), 1);
        assert!(doc.errors[0].contains("Failed to open OBJ file"));
    }

    #[test]
    fn path_loader_resolves_material_library() {
        let dir = std::env::temp_dir().join(format!("asset-obj-tests-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        std::fs::write(
            dir.join("tri.obj"),
            "mtllib tri.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl shiny\nf 1 2 3\n",
        )
        .expect("write obj");
        std::fs::write(dir.join("tri.mtl"), "newmtl shiny\nKd 0.5 0.5 0.5\n").expect("write mtl");

        let doc = load_obj_from_path(dir.join("tri.obj"), &ParseOptions::default()).expect("load");
        let materials = doc.load_materials(&dir).expect("materials");
        let shiny = materials.get("shiny").expect("material present");
        assert_eq!(
            shiny.data(crate::mtl::MaterialProperty::Diffuse),
            [0.5, 0.5, 0.5, 0.0]
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
