//! Output container formats.

use base64::Engine as _;

use crate::{error::SerializationError, woff};

/// The file format a compiled font is delivered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Container {
    /// A bare TrueType file.
    #[default]
    Sfnt,
    /// WOFF 1.0, with zlib compressed tables.
    Woff,
}

impl Container {
    /// The conventional file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Container::Sfnt => "ttf",
            Container::Woff => "woff",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Container::Sfnt => "font/ttf",
            Container::Woff => "font/woff",
        }
    }

    /// Guess the container from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ttf" | "otf" => Some(Container::Sfnt),
            "woff" => Some(Container::Woff),
            _ => None,
        }
    }

    /// Wrap a TrueType binary in this container.
    pub fn encode(self, sfnt: Vec<u8>) -> Result<Vec<u8>, SerializationError> {
        match self {
            Container::Sfnt => Ok(sfnt),
            Container::Woff => woff::wrap(&sfnt),
        }
    }
}

/// A `data:` URL embedding `font`, suitable for a CSS `@font-face` rule.
pub fn data_url(font: &[u8], container: Container) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(font);
    format!("data:{};base64,{encoded}", container.mime_type())
}
