//! Keyword classification for OBJ and MTL lines.

/// Semantic record type of a single OBJ or MTL line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    // OBJ geometry
    Position,
    TextureCoord,
    Normal,
    ParameterSpace,
    Face,
    /// `g` or `o`.
    GroupMarker,
    MaterialUse,
    MaterialLibrary,

    // MTL directives
    NewMaterial,
    Ambient,
    Diffuse,
    Specular,
    SpecularExponent,
    /// `d`, `Tr` and `Tf` share one opacity slot.
    Opacity,
    AmbientMap,
    DiffuseMap,
    SpecularMap,
    SpecularExponentMap,
    OpacityMap,
    BumpMap,
    DisplacementMap,
    DecalMap,

    /// Comments, blank lines and keywords this decoder does not handle.
    NotApplicable,
}

impl LineKind {
    /// Look up the kind for a complete keyword token.
    pub fn from_keyword(keyword: &str) -> Self {
        use LineKind::*;

        match keyword {
            "v" => Position,
            "vt" => TextureCoord,
            "vn" => Normal,
            "vp" => ParameterSpace,
            "f" => Face,
            "g" | "o" => GroupMarker,
            "usemtl" => MaterialUse,
            "mtllib" => MaterialLibrary,
            "newmtl" => NewMaterial,
            "Ka" => Ambient,
            "Kd" => Diffuse,
            "Ks" => Specular,
            "Ns" => SpecularExponent,
            "d" | "Tr" | "Tf" => Opacity,
            "map_Ka" => AmbientMap,
            "map_Kd" => DiffuseMap,
            "map_Ks" => SpecularMap,
            "map_Ns" => SpecularExponentMap,
            "map_d" => OpacityMap,
            "map_bump" | "bump" => BumpMap,
            "disp" => DisplacementMap,
            "decal" => DecalMap,
            _ => NotApplicable,
        }
    }

    /// Classify a raw line, returning its kind and the trimmed text after the
    /// keyword.
    pub fn classify(line: &str) -> (Self, &str) {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            return (LineKind::NotApplicable, "");
        }
        match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (Self::from_keyword(keyword), rest.trim()),
            None => (Self::from_keyword(trimmed), ""),
        }
    }

    /// Returns `true` for `v`, `vt`, `vn` and `vp` lines.
    pub fn is_vertex_attribute(self) -> bool {
        matches!(
            self,
            LineKind::Position
                | LineKind::TextureCoord
                | LineKind::Normal
                | LineKind::ParameterSpace
        )
    }
}
