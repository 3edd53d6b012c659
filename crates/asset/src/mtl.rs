//! MTL material library parser.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::line::LineKind;
use crate::tokenize::extract_floats;

/// Returned for any property a material never set.
pub const DEFAULT_PROPERTY: [f32; 4] = [0.0; 4];

/// Scalar or colour properties of a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialProperty {
    Ambient,
    Diffuse,
    Specular,
    SpecularExponent,
    /// `d`, `Tr` or `Tf`, whichever came last.
    Opacity,
}

impl MaterialProperty {
    pub fn from_line_kind(kind: LineKind) -> Option<Self> {
        match kind {
            LineKind::Ambient => Some(Self::Ambient),
            LineKind::Diffuse => Some(Self::Diffuse),
            LineKind::Specular => Some(Self::Specular),
            LineKind::SpecularExponent => Some(Self::SpecularExponent),
            LineKind::Opacity => Some(Self::Opacity),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Ambient,
    Diffuse,
    Specular,
    SpecularExponent,
    Opacity,
    Bump,
    Displacement,
    Decal,
}

impl TextureSlot {
    pub fn from_line_kind(kind: LineKind) -> Option<Self> {
        match kind {
            LineKind::AmbientMap => Some(Self::Ambient),
            LineKind::DiffuseMap => Some(Self::Diffuse),
            LineKind::SpecularMap => Some(Self::Specular),
            LineKind::SpecularExponentMap => Some(Self::SpecularExponent),
            LineKind::OpacityMap => Some(Self::Opacity),
            LineKind::BumpMap => Some(Self::Bump),
            LineKind::DisplacementMap => Some(Self::Displacement),
            LineKind::DecalMap => Some(Self::Decal),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    name: String,
    properties: HashMap<MaterialProperty, [f32; 4]>,
    textures: HashMap<TextureSlot, String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property values padded to four components; [`DEFAULT_PROPERTY`] when
    /// the property was never set.
    pub fn data(&self, property: MaterialProperty) -> [f32; 4] {
        self.properties
            .get(&property)
            .copied()
            .unwrap_or(DEFAULT_PROPERTY)
    }

    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        self.textures.get(&slot).map(String::as_str)
    }

    pub fn diffuse_texture(&self) -> Option<&str> {
        self.texture(TextureSlot::Diffuse)
    }

    fn set_property(&mut self, property: MaterialProperty, values: &[f32]) {
        let mut data = DEFAULT_PROPERTY;
        for (slot, value) in data.iter_mut().zip(values) {
            *slot = *value;
        }
        self.properties.insert(property, data);
    }
}

/// Materials keyed by name, iterated in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialTable {
    materials: Vec<Material>,
    by_name: HashMap<String, usize>,
    /// Soft errors, e.g. an unreadable library file.
    pub errors: Vec<String>,
}

impl MaterialTable {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            errors: vec![reason.into()],
            ..Self::default()
        }
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.by_name.get(name).map(|&i| &self.materials[i])
    }

    /// Property of a named material; [`DEFAULT_PROPERTY`] if either the
    /// material or the property is missing.
    pub fn data(&self, name: &str, property: MaterialProperty) -> [f32; 4] {
        self.get(name)
            .map_or(DEFAULT_PROPERTY, |material| material.data(property))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Insert or replace a material, returning its slot.
    fn open(&mut self, material: Material) -> usize {
        if let Some(&index) = self.by_name.get(material.name()) {
            log::warn!("Material '{}' redefined; keeping the later one", material.name());
            self.materials[index] = material;
            index
        } else {
            let index = self.materials.len();
            self.by_name.insert(material.name().to_owned(), index);
            self.materials.push(material);
            index
        }
    }
}

/// Build a material table from already-split MTL lines.
pub fn parse_mtl_lines<I, S>(lines: I) -> MaterialTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = MaterialTable::default();
    let mut active: Option<usize> = None;

    for (line_no, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        let (kind, rest) = LineKind::classify(line);
        match kind {
            LineKind::NotApplicable => continue,
            LineKind::NewMaterial => {
                active = Some(table.open(Material::new(rest)));
                continue;
            }
            _ => {}
        }

        let Some(index) = active else {
            log::warn!("MTL line {}: {:?} before any newmtl, ignored", line_no + 1, kind);
            continue;
        };
        let material = &mut table.materials[index];

        if let Some(property) = MaterialProperty::from_line_kind(kind) {
            material.set_property(property, &extract_floats(line));
        } else if let Some(slot) = TextureSlot::from_line_kind(kind) {
            // Map options precede the filename.
            match rest.split_whitespace().last() {
                Some(file) => {
                    material.textures.insert(slot, file.to_owned());
                }
                None => log::warn!("MTL line {}: texture map without a filename", line_no + 1),
            }
        } else {
            log::debug!("MTL line {}: ignoring {:?}", line_no + 1, kind);
        }
    }

    table
}

/// Load a material table from a file path. A file that cannot be opened
/// yields an empty table whose error log says why.
pub fn load_mtl_from_path(path: impl AsRef<Path>) -> Result<MaterialTable> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            let reason = format!("Failed to open MTL file {}: {}", path.display(), err);
            log::warn!("{}", reason);
            return Ok(MaterialTable::unreadable(reason));
        }
    };
    let table = load_mtl_from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load MTL file: {}", path.display()))?;
    log::info!("Loaded {}: {} materials", path.display(), table.len());
    Ok(table)
}

pub fn load_mtl_from_reader<R: BufRead>(reader: R) -> Result<MaterialTable> {
    let lines = reader
        .lines()
        .enumerate()
        .map(|(line_no, line)| line.with_context(|| format!("Failed to read line {}", line_no + 1)))
        .collect::<Result<Vec<_>>>()?;
    Ok(parse_mtl_lines(lines))
}

pub fn load_mtl_from_str(contents: &str) -> Result<MaterialTable> {
    load_mtl_from_reader(io::Cursor::new(contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        # two materials
        newmtl wood
        Ka 0.1 0.1 0.1
        Kd 0.6 0.4 0.2
        Ns 96
        d 1.0
        map_Kd -s 1 1 1 textures/wood.png
        map_bump wood_n.png

        newmtl glass
        Kd 0.9 0.9 1.0
        Tr 0.25
    "#;

    #[test]
    fn parses_named_materials_in_order() {
        let table = load_mtl_from_str(SAMPLE).expect("parse mtl");
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.iter().map(Material::name).collect();
        assert_eq!(names, vec!["wood", "glass"]);

        let wood = table.get("wood").expect("wood");
        assert_eq!(wood.data(MaterialProperty::Diffuse), [0.6, 0.4, 0.2, 0.0]);
        assert_eq!(wood.data(MaterialProperty::SpecularExponent), [96.0, 0.0, 0.0, 0.0]);
        assert_eq!(wood.diffuse_texture(), Some("textures/wood.png"));
        assert_eq!(wood.texture(TextureSlot::Bump), Some("wood_n.png"));
    }

    #[test]
    fn opacity_keywords_share_a_slot() {
        let table = load_mtl_from_str(SAMPLE).expect("parse mtl");
        assert_eq!(table.data("wood", MaterialProperty::Opacity), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(table.data("glass", MaterialProperty::Opacity), [0.25, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn unset_properties_default_to_zero() {
        let table = load_mtl_from_str(SAMPLE).expect("parse mtl");
        let glass = table.get("glass").expect("glass");
        assert_eq!(glass.data(MaterialProperty::Specular), DEFAULT_PROPERTY);
        assert_eq!(glass.diffuse_texture(), None);
        assert_eq!(table.data("missing", MaterialProperty::Diffuse), DEFAULT_PROPERTY);
    }

    #[test]
    fn last_write_wins() {
        let table = parse_mtl_lines(["newmtl m", "Kd 1 0 0", "Kd 0 1 0", "Tf 0.5", "d 0.75"]);
        assert_eq!(table.data("m", MaterialProperty::Diffuse), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(table.data("m", MaterialProperty::Opacity), [0.75, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn directives_before_newmtl_are_ignored() {
        let table = parse_mtl_lines(["Kd 1 1 1", "newmtl m"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.data("m", MaterialProperty::Diffuse), DEFAULT_PROPERTY);
    }

    #[test]
    fn redefined_material_replaces_earlier_record() {
        let table = parse_mtl_lines(["newmtl m", "Kd 1 0 0", "newmtl other", "newmtl m", "Ka 0 0 1"]);
        assert_eq!(table.len(), 2);
        let m = table.get("m").expect("m");
        assert_eq!(m.data(MaterialProperty::Diffuse), DEFAULT_PROPERTY);
        assert_eq!(m.data(MaterialProperty::Ambient), [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn unopenable_library_is_soft() {
        let missing = std::env::temp_dir().join("asset-mtl-tests-definitely-missing.mtl");
        let table = load_mtl_from_path(&missing).expect("soft failure");
        assert!(table.is_empty());
        assert_eq!(table.errors.len(), 1);
    }
}
