//! Errors produced while building and serializing fonts.

use thiserror::Error;
use write_fonts::BuilderError;

/// A failure that stops a build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("no glyph contains any ink")]
    EmptyInput,

    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),

    #[error("invalid raster for {ch:?}: {source}")]
    Raster {
        ch: char,
        #[source]
        source: glyph_trace::Error,
    },

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// A problem with a single glyph.
///
/// These are reported as warnings: the affected glyph is dropped and the
/// rest of the font is still built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GlyphBuildError {
    #[error("glyph {ch:?} has ink but produced no outline")]
    NoOutline { ch: char },

    #[error("glyph {ch:?} could not be compiled: {reason}")]
    MalformedOutline { ch: char, reason: String },
}

impl GlyphBuildError {
    pub fn char(&self) -> char {
        match self {
            GlyphBuildError::NoOutline { ch } | GlyphBuildError::MalformedOutline { ch, .. } => *ch,
        }
    }
}

/// A failure while writing the binary font.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializationError {
    #[error(transparent)]
    Table(#[from] BuilderError),

    #[error("failed to compile glyph '{name}': {reason}")]
    Glyph { name: String, reason: String },

    #[error("invalid character map: {0}")]
    Cmap(String),

    #[error("too many glyphs: {0}")]
    TooManyGlyphs(usize),

    #[error("malformed table directory: {0}")]
    Directory(String),

    #[error("failed to compress table: {0}")]
    Woff(#[from] std::io::Error),
}
