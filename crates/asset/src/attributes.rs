//! Global, 1-indexed attribute tables filled while scanning an OBJ file.

use std::fmt;

use crate::line::LineKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    TextureCoord,
    Normal,
    ParameterSpace,
}

impl AttributeKind {
    /// Attribute kind for a `v`/`vt`/`vn`/`vp` line.
    pub fn from_line_kind(kind: LineKind) -> Option<Self> {
        match kind {
            LineKind::Position => Some(AttributeKind::Position),
            LineKind::TextureCoord => Some(AttributeKind::TextureCoord),
            LineKind::Normal => Some(AttributeKind::Normal),
            LineKind::ParameterSpace => Some(AttributeKind::ParameterSpace),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TextureCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
            AttributeKind::ParameterSpace => "parameter-space",
        };
        f.write_str(name)
    }
}

/// Append-only table of raw float tuples addressed by 1-based declaration index.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeTable {
    kind: AttributeKind,
    entries: Vec<Vec<f32>>,
}

impl AttributeTable {
    fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index the next inserted tuple will receive.
    pub fn next_index(&self) -> u32 {
        self.entries.len() as u32 + 1
    }

    /// Tuple declared at 1-based `index`. Index 0 is the "absent" sentinel
    /// and never resolves.
    pub fn get(&self, index: u32) -> Option<&[f32]> {
        let slot = (index as usize).checked_sub(1)?;
        self.entries.get(slot).map(Vec::as_slice)
    }

    /// Tuples in declaration order, paired with their 1-based index.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[f32])> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, values)| (i as u32 + 1, values.as_slice()))
    }

    fn push(&mut self, values: Vec<f32>) -> u32 {
        let index = self.next_index();
        self.entries.push(values);
        index
    }
}

/// Builder owning one table per attribute kind. Indices are global to the
/// file; meshes never get tables of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeTables {
    positions: AttributeTable,
    texture_coords: AttributeTable,
    normals: AttributeTable,
    parameter_space: AttributeTable,
}

impl Default for AttributeTables {
    fn default() -> Self {
        Self {
            positions: AttributeTable::new(AttributeKind::Position),
            texture_coords: AttributeTable::new(AttributeKind::TextureCoord),
            normals: AttributeTable::new(AttributeKind::Normal),
            parameter_space: AttributeTable::new(AttributeKind::ParameterSpace),
        }
    }
}

impl AttributeTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, kind: AttributeKind) -> &AttributeTable {
        match kind {
            AttributeKind::Position => &self.positions,
            AttributeKind::TextureCoord => &self.texture_coords,
            AttributeKind::Normal => &self.normals,
            AttributeKind::ParameterSpace => &self.parameter_space,
        }
    }

    /// Append a tuple to the table for `kind`, returning its 1-based index.
    pub fn insert(&mut self, kind: AttributeKind, values: Vec<f32>) -> u32 {
        let table = match kind {
            AttributeKind::Position => &mut self.positions,
            AttributeKind::TextureCoord => &mut self.texture_coords,
            AttributeKind::Normal => &mut self.normals,
            AttributeKind::ParameterSpace => &mut self.parameter_space,
        };
        table.push(values)
    }

    pub fn get(&self, kind: AttributeKind, index: u32) -> Option<&[f32]> {
        self.table(kind).get(index)
    }
}
