//! Building outline fonts from hand-drawn glyphs.
//!
//! A [`FontBuild`] collects one raster (and optionally the pen strokes that
//! drew it) per character. Building traces each raster into outlines with
//! [`glyph_trace`], derives spacing, and produces an immutable [`Font`].
//! The font can then be compiled into a TrueType or WOFF binary.
//!
//! ```no_run
//! use inkfont::{BuildOptions, CharacterInput, Container, FontBuild, FontInfo};
//!
//! # fn load(_: char) -> (usize, usize, Vec<u8>) { unimplemented!() }
//! let mut build = FontBuild::new(FontInfo::new("My Hand", "Me"));
//! for ch in "Hello".chars() {
//!     let (width, height, rgba) = load(ch);
//!     build.add(CharacterInput::new(ch, width, height, rgba))?;
//! }
//! let output = build.build(&BuildOptions::default())?;
//! let woff = output.to_bytes(Container::Woff)?;
//! # Ok::<_, inkfont::BuildError>(())
//! ```

#![forbid(unsafe_code)]

pub mod assemble;
mod build;
mod container;
mod error;
mod font;
mod glyph;
pub mod kern;
pub mod kerning;
pub mod metrics;
pub mod woff;

pub use assemble::{assemble, AssembleOptions, Assembled};
pub use build::{
    is_supported, supported_characters, BuildOptions, BuildOutput, CharacterInput, Encoded,
    FontBuild, SourceMode, TraceOptions,
};
pub use container::{data_url, Container};
pub use error::{BuildError, GlyphBuildError, SerializationError};
pub use font::{Font, FontInfo};
pub use glyph::{glyph_name, Glyph};
pub use kerning::{KerningPair, KerningTable};
pub use metrics::Metrics;

/// Re-exported so callers don't need a direct dependency.
pub use glyph_trace;
