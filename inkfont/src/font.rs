//! The font value produced by a build.

use std::collections::BTreeMap;

use crate::glyph::Glyph;
use crate::kerning::KerningTable;

pub const UNITS_PER_EM: u16 = 1000;
pub const ASCENDER: i16 = 800;
pub const DESCENDER: i16 = -200;
pub const CAP_HEIGHT: i16 = 700;
pub const X_HEIGHT: i16 = 500;

/// Naming and vertical metrics shared by every glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FontInfo {
    pub family_name: String,
    pub author: String,
    pub style_name: String,
    pub manufacturer: String,
    pub description: String,
    pub license: String,
    pub version_major: u16,
    pub version_minor: u16,
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    pub x_height: i16,
}

impl FontInfo {
    pub fn new(family_name: impl Into<String>, author: impl Into<String>) -> Self {
        FontInfo {
            family_name: family_name.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    /// `Family Style`, as used for the full font name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.family_name, self.style_name)
    }

    /// `Family-Style` with characters PostScript forbids removed.
    pub fn postscript_name(&self) -> String {
        let clean = |s: &str| -> String {
            s.chars()
                .filter(|c| c.is_ascii_graphic() && !"[](){}<>/%".contains(*c))
                .collect()
        };
        let mut name = format!("{}-{}", clean(&self.family_name), clean(&self.style_name));
        name.truncate(63);
        name
    }

    /// The `name` table version string, e.g. `Version 1.000`.
    pub fn version_string(&self) -> String {
        format!("Version {}.{:03}", self.version_major, self.version_minor)
    }

    pub fn copyright(&self, year: i32) -> String {
        format!("Copyright {year} {}", self.author)
    }
}

impl Default for FontInfo {
    fn default() -> Self {
        FontInfo {
            family_name: "MyCustomFont".into(),
            author: "Anonymous".into(),
            style_name: "Regular".into(),
            manufacturer: "inkfont".into(),
            description: "Custom font created with inkfont".into(),
            license: "Free for personal and commercial use".into(),
            version_major: 1,
            version_minor: 0,
            units_per_em: UNITS_PER_EM,
            ascender: ASCENDER,
            descender: DESCENDER,
            cap_height: CAP_HEIGHT,
            x_height: X_HEIGHT,
        }
    }
}

/// A complete set of glyphs, ready to be assembled into a binary.
///
/// Glyphs are keyed by character, so iteration is in ascending code point
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    info: FontInfo,
    glyphs: BTreeMap<char, Glyph>,
    kerning: KerningTable,
}

impl Font {
    /// Create a font from its glyphs.
    ///
    /// The kerning table is filtered down to pairs where both glyphs exist.
    /// If two glyphs share a character the last one wins.
    pub fn new(info: FontInfo, glyphs: impl IntoIterator<Item = Glyph>, kerning: &KerningTable) -> Self {
        let glyphs: BTreeMap<_, _> = glyphs.into_iter().map(|g| (g.char(), g)).collect();
        let kerning = kerning.filter(|c| glyphs.contains_key(&c));
        Font {
            info,
            glyphs,
            kerning,
        }
    }

    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    pub fn family_name(&self) -> &str {
        &self.info.family_name
    }

    pub fn units_per_em(&self) -> u16 {
        self.info.units_per_em
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// All glyphs in ascending code point order.
    pub fn glyphs(&self) -> impl ExactSizeIterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    pub fn kerning(&self) -> &KerningTable {
        &self.kerning
    }
}
