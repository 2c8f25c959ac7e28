//! The JSON file describing which images make up a font.

use std::path::{Path, PathBuf};

use inkfont::{glyph_trace::Stroke, CharacterInput, FontInfo, SourceMode};
use serde::Deserialize;

use crate::error::Error;

/// A font to build.
///
/// ```json
/// {
///   "family_name": "My Hand",
///   "author": "Me",
///   "source": "strokes",
///   "glyphs": [
///     { "char": "A", "image": "A.png", "strokes": [{ "points": [[1, 2], [3, 4]] }] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub family_name: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub source: SourceMode,
    pub glyphs: Vec<GlyphEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlyphEntry {
    pub char: char,
    /// Relative to the manifest's directory.
    pub image: PathBuf,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Manifest {
            path: path.to_owned(),
            source,
        })
    }

    /// Naming for the font, with `family` and `author` taking precedence
    /// over the manifest.
    pub fn font_info(&self, family: Option<&str>, author: Option<&str>) -> FontInfo {
        let mut info = FontInfo::default();
        if let Some(family) = family.or(self.family_name.as_deref()) {
            info.family_name = family.to_owned();
        }
        if let Some(author) = author.or(self.author.as_deref()) {
            info.author = author.to_owned();
        }
        info
    }
}

impl GlyphEntry {
    /// Decode this entry's image into a build input.
    pub fn load(&self, base_dir: &Path) -> Result<CharacterInput, Error> {
        let path = base_dir.join(&self.image);
        let image = image::open(&path)
            .map_err(|source| Error::Image {
                path: path.clone(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        log::debug!("{:?}: {} ({width}x{height})", self.char, path.display());
        Ok(
            CharacterInput::new(self.char, width as usize, height as usize, image.into_raw())
                .with_strokes(self.strokes.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "family_name": "Scrawl",
                "author": "Pat",
                "source": "strokes",
                "glyphs": [
                    { "char": "A", "image": "A.png",
                      "strokes": [{ "points": [[1, 2], [3.5, 4]], "width": 2 }] },
                    { "char": "b", "image": "glyphs/b.png" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.source, SourceMode::Strokes);
        assert_eq!(manifest.glyphs.len(), 2);
        let stroke = &manifest.glyphs[0].strokes[0];
        assert_eq!(stroke.points, vec![(1.0, 2.0), (3.5, 4.0)]);
        assert_eq!(stroke.width, 2.0);
        assert!(manifest.glyphs[1].strokes.is_empty());
    }

    #[test]
    fn defaults() {
        let manifest: Manifest =
            serde_json::from_str(r#"{ "glyphs": [{ "char": "x", "image": "x.png" }] }"#).unwrap();
        assert_eq!(manifest.source, SourceMode::Bitmap);
        let info = manifest.font_info(None, None);
        assert_eq!(info.family_name, "MyCustomFont");
        assert_eq!(info.author, "Anonymous");
    }

    #[test]
    fn flags_override_manifest() {
        let manifest: Manifest = serde_json::from_str(
            r#"{ "family_name": "A", "author": "B", "glyphs": [] }"#,
        )
        .unwrap();
        let info = manifest.font_info(Some("C"), None);
        assert_eq!(info.family_name, "C");
        assert_eq!(info.author, "B");
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<Manifest, _> =
            serde_json::from_str(r#"{ "glyphs": [], "colour": "red" }"#);
        assert!(result.is_err());
    }
}
