//! Turning drawn characters into a [`Font`].

use chrono::{DateTime, Utc};
use glyph_trace::{
    stroke_outlines, trace_outlines, PixelMask, Stroke, INK_ALPHA_THRESHOLD,
    TRACE_ALPHA_THRESHOLD,
};

use crate::{
    assemble::{assemble, AssembleOptions, Assembled},
    container::Container,
    error::{BuildError, GlyphBuildError},
    font::{Font, FontInfo},
    glyph::Glyph,
    kerning::KerningTable,
    metrics::Metrics,
};

const PUNCTUATION: &[char] = &['.', ',', '-', '!', '?'];

/// The characters a font can be built from: basic Latin letters, digits and
/// a little punctuation.
pub fn supported_characters() -> impl Iterator<Item = char> {
    ('A'..='Z')
        .chain('a'..='z')
        .chain('0'..='9')
        .chain(PUNCTUATION.iter().copied())
}

pub fn is_supported(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || PUNCTUATION.contains(&ch)
}

/// Where glyph outlines come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SourceMode {
    /// Trace the raster.
    #[default]
    Bitmap,
    /// Use recorded pen strokes, falling back to the raster for characters
    /// that have none.
    Strokes,
}

/// Alpha thresholds used when reading rasters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceOptions {
    /// Pixels with alpha above this are traced.
    pub trace_threshold: u8,
    /// Pixels with alpha above this count towards the glyph's ink box.
    pub ink_threshold: u8,
}

impl Default for TraceOptions {
    fn default() -> Self {
        TraceOptions {
            trace_threshold: TRACE_ALPHA_THRESHOLD,
            ink_threshold: INK_ALPHA_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub source: SourceMode,
    pub trace: TraceOptions,
    pub assemble: AssembleOptions,
}

impl BuildOptions {
    pub fn with_timestamp(timestamp: DateTime<Utc>) -> Self {
        BuildOptions {
            assemble: AssembleOptions::new(timestamp),
            ..Default::default()
        }
    }
}

/// One drawn character: an RGBA raster and, optionally, the strokes that
/// produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterInput {
    pub ch: char,
    pub width: usize,
    pub height: usize,
    /// Row-major RGBA, four bytes per pixel.
    pub rgba: Vec<u8>,
    pub strokes: Vec<Stroke>,
}

impl CharacterInput {
    pub fn new(ch: char, width: usize, height: usize, rgba: Vec<u8>) -> Self {
        CharacterInput {
            ch,
            width,
            height,
            rgba,
            strokes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_strokes(mut self, strokes: Vec<Stroke>) -> Self {
        self.strokes = strokes;
        self
    }
}

/// Collects drawn characters and builds them into a [`Font`].
///
/// ```
/// use inkfont::{BuildOptions, CharacterInput, FontBuild, FontInfo};
///
/// let (width, height) = (20, 20);
/// let mut rgba = vec![0u8; width * height * 4];
/// for y in 4..16 {
///     for x in 6..14 {
///         rgba[(y * width + x) * 4 + 3] = 255;
///     }
/// }
/// let mut build = FontBuild::new(FontInfo::new("Blocks", "Me"));
/// build.add(CharacterInput::new('I', width, height, rgba)).unwrap();
/// let output = build.build(&BuildOptions::default()).unwrap();
/// assert!(output.font().contains('I'));
/// ```
#[derive(Clone, Debug)]
pub struct FontBuild {
    info: FontInfo,
    inputs: Vec<CharacterInput>,
    kerning: KerningTable,
}

impl FontBuild {
    pub fn new(info: FontInfo) -> Self {
        FontBuild {
            info,
            inputs: Vec::new(),
            kerning: KerningTable::common_latin(),
        }
    }

    /// Replace the kerning table used for the build.
    #[must_use]
    pub fn with_kerning(mut self, kerning: KerningTable) -> Self {
        self.kerning = kerning;
        self
    }

    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    /// Add a character, replacing any earlier input for the same one.
    pub fn add(&mut self, input: CharacterInput) -> Result<&mut Self, BuildError> {
        if !is_supported(input.ch) {
            return Err(BuildError::UnsupportedCharacter(input.ch));
        }
        self.inputs.retain(|existing| existing.ch != input.ch);
        self.inputs.push(input);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Build every character into a glyph.
    ///
    /// Characters without ink are skipped. Characters with ink that yield
    /// no outline are dropped and reported in [`BuildOutput::warnings`].
    /// Fails with [`BuildError::EmptyInput`] if no glyph is left.
    pub fn build(&self, options: &BuildOptions) -> Result<BuildOutput, BuildError> {
        let mut glyphs = Vec::with_capacity(self.inputs.len());
        let mut warnings = Vec::new();
        for input in &self.inputs {
            match self.build_glyph(input, options)? {
                Some(Ok(glyph)) => glyphs.push(glyph),
                Some(Err(warning)) => {
                    log::warn!("{warning}");
                    warnings.push(warning);
                }
                None => log::debug!("skipping {:?}: no ink", input.ch),
            }
        }
        if glyphs.is_empty() {
            return Err(BuildError::EmptyInput);
        }
        log::info!(
            "built {} glyphs for '{}'",
            glyphs.len(),
            self.info.family_name
        );
        Ok(BuildOutput {
            font: Font::new(self.info.clone(), glyphs, &self.kerning),
            warnings,
            assemble: options.assemble.clone(),
        })
    }

    fn build_glyph(
        &self,
        input: &CharacterInput,
        options: &BuildOptions,
    ) -> Result<Option<Result<Glyph, GlyphBuildError>>, BuildError> {
        let ch = input.ch;
        let raster_error = |source| BuildError::Raster { ch, source };
        let ink = PixelMask::from_rgba(
            input.width,
            input.height,
            &input.rgba,
            options.trace.ink_threshold,
        )
        .map_err(raster_error)?;
        let Some(bounds) = ink.bounds() else {
            return Ok(None);
        };
        let scale = self.info.units_per_em as f64 / input.height as f64;

        let outlines = if options.source == SourceMode::Strokes && !input.strokes.is_empty() {
            stroke_outlines(&input.strokes, &bounds, scale)
        } else {
            let mask = PixelMask::from_rgba(
                input.width,
                input.height,
                &input.rgba,
                options.trace.trace_threshold,
            )
            .map_err(raster_error)?;
            trace_outlines(&mask, &bounds, scale)
        };
        if outlines.is_empty() {
            return Ok(Some(Err(GlyphBuildError::NoOutline { ch })));
        }
        let metrics = Metrics::compute(&bounds, ch, scale);
        log::trace!(
            "{ch:?}: {} sub-paths, advance {}",
            outlines.len(),
            metrics.advance_width
        );
        Ok(Some(Ok(Glyph::new(ch, outlines, bounds, metrics))))
    }
}

/// The result of a successful build.
#[derive(Clone, Debug)]
pub struct BuildOutput {
    font: Font,
    warnings: Vec<GlyphBuildError>,
    assemble: AssembleOptions,
}

impl BuildOutput {
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Characters that had ink but were dropped.
    pub fn warnings(&self) -> &[GlyphBuildError] {
        &self.warnings
    }

    /// Compile the font into a TrueType binary.
    pub fn assemble(&self) -> Result<Assembled, BuildError> {
        Ok(assemble(&self.font, &self.assemble)?)
    }

    /// Compile the font and wrap it in `container`, keeping the warnings
    /// from both tracing and compilation.
    pub fn encode(&self, container: Container) -> Result<Encoded, BuildError> {
        let assembled = self.assemble()?;
        let mut warnings = self.warnings.clone();
        warnings.extend_from_slice(assembled.warnings());
        let data = container.encode(assembled.into_data())?;
        Ok(Encoded { data, warnings })
    }

    /// Compile the font and wrap it in `container`.
    pub fn to_bytes(&self, container: Container) -> Result<Vec<u8>, BuildError> {
        self.encode(container).map(Encoded::into_data)
    }
}

/// A font file, along with every glyph that was left out of it.
#[derive(Clone, Debug)]
pub struct Encoded {
    data: Vec<u8>,
    warnings: Vec<GlyphBuildError>,
}

impl Encoded {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn warnings(&self) -> &[GlyphBuildError] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::kerning::KerningPair;

    const SIZE: usize = 40;

    fn raster(pixels: impl IntoIterator<Item = (usize, usize)>, alpha: u8) -> Vec<u8> {
        let mut rgba = vec![0u8; SIZE * SIZE * 4];
        for (x, y) in pixels {
            rgba[(y * SIZE + x) * 4 + 3] = alpha;
        }
        rgba
    }

    fn rect(x0: usize, y0: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
        (y0..y0 + h).flat_map(move |y| (x0..x0 + w).map(move |x| (x, y)))
    }

    fn input(ch: char) -> CharacterInput {
        CharacterInput::new(ch, SIZE, SIZE, raster(rect(10, 5, 12, 30), 255))
    }

    fn blank(ch: char) -> CharacterInput {
        CharacterInput::new(ch, SIZE, SIZE, vec![0; SIZE * SIZE * 4])
    }

    fn options() -> BuildOptions {
        BuildOptions::with_timestamp(Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn supported_set() {
        let all: Vec<_> = supported_characters().collect();
        assert_eq!(all.len(), 26 + 26 + 10 + 5);
        assert!(all.iter().all(|ch| is_supported(*ch)));
        assert!(!is_supported(' '));
        assert!(!is_supported('é'));
    }

    #[test]
    fn rejects_unsupported() {
        let mut build = FontBuild::new(FontInfo::default());
        let err = build.add(input('#')).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedCharacter('#')));
        assert!(build.is_empty());
    }

    #[test]
    fn empty_build_fails() {
        let build = FontBuild::new(FontInfo::default());
        assert!(matches!(build.build(&options()), Err(BuildError::EmptyInput)));

        let mut build = FontBuild::new(FontInfo::default());
        build.add(blank('a')).unwrap().add(blank('b')).unwrap();
        assert!(matches!(build.build(&options()), Err(BuildError::EmptyInput)));
    }

    #[test]
    fn blank_characters_are_skipped() {
        let mut build = FontBuild::new(FontInfo::default());
        build.add(input('a')).unwrap().add(blank('b')).unwrap();
        let output = build.build(&options()).unwrap();
        assert!(output.font().contains('a'));
        assert!(!output.font().contains('b'));
        assert!(output.warnings().is_empty());
    }

    #[test]
    fn faint_ink_has_bounds_but_no_outline() {
        let mut build = FontBuild::new(FontInfo::default());
        build
            .add(input('a'))
            .unwrap()
            .add(CharacterInput::new('b', SIZE, SIZE, raster(rect(3, 3, 9, 9), 40)))
            .unwrap();
        let output = build.build(&options()).unwrap();
        assert_eq!(output.warnings(), &[GlyphBuildError::NoOutline { ch: 'b' }]);
        assert_eq!(output.font().num_glyphs(), 1);
    }

    #[test]
    fn later_input_replaces_earlier() {
        let mut build = FontBuild::new(FontInfo::default());
        build
            .add(input('a'))
            .unwrap()
            .add(CharacterInput::new('a', SIZE, SIZE, raster(rect(0, 0, 20, 20), 255)))
            .unwrap();
        assert_eq!(build.len(), 1);
        let output = build.build(&options()).unwrap();
        assert_eq!(output.font().glyph('a').unwrap().bounds().max_x, 19);
    }

    #[test]
    fn raster_size_is_checked() {
        let mut build = FontBuild::new(FontInfo::default());
        build.add(CharacterInput::new('a', SIZE, SIZE, vec![0; 12])).unwrap();
        assert!(matches!(
            build.build(&options()),
            Err(BuildError::Raster { ch: 'a', .. })
        ));
    }

    #[test]
    fn scale_follows_raster_height() {
        let mut build = FontBuild::new(FontInfo::default());
        build.add(input('n')).unwrap();
        let output = build.build(&options()).unwrap();
        let glyph = output.font().glyph('n').unwrap();
        // 11 pixel columns at 25 units each, plus the normal bonus
        assert_eq!(glyph.advance_width(), 11 * 25 + 150);
    }

    #[test]
    fn strokes_used_in_stroke_mode() {
        let stroke = Stroke::new(vec![(10.0, 5.0), (16.0, 20.0), (21.0, 34.0)], 3.0);
        let mut build = FontBuild::new(FontInfo::default());
        build
            .add(input('l').with_strokes(vec![stroke]))
            .unwrap()
            .add(input('o'))
            .unwrap();

        let bitmap = build.build(&options()).unwrap();
        let strokes = build
            .build(&BuildOptions {
                source: SourceMode::Strokes,
                ..options()
            })
            .unwrap();

        let commands = |output: &BuildOutput, ch| output.font().glyph(ch).unwrap().command_count();
        // move, quad, line
        assert_eq!(commands(&strokes, 'l'), 3);
        assert!(commands(&bitmap, 'l') > 3);
        // no strokes recorded, so the raster is traced either way
        assert_eq!(commands(&strokes, 'o'), commands(&bitmap, 'o'));
    }

    #[test]
    fn custom_kerning_replaces_default() {
        let pair = KerningPair::new('A', 'V', -10);
        let mut build =
            FontBuild::new(FontInfo::default()).with_kerning(KerningTable::new(vec![pair]));
        for ch in ['A', 'V', 'W'] {
            build.add(input(ch)).unwrap();
        }
        let output = build.build(&options()).unwrap();
        assert_eq!(output.font().kerning().pairs(), &[pair]);
    }

    #[test]
    fn encode_reports_glyphs_dropped_when_compiling() {
        let mut build = FontBuild::new(FontInfo::default());
        build.add(input('a')).unwrap();
        let built = build.build(&options()).unwrap();

        let bounds = built.font().glyph('a').unwrap().bounds();
        let hollow = Glyph::new('b', Vec::new(), bounds, Metrics::compute(&bounds, 'b', 25.0));
        let output = BuildOutput {
            font: Font::new(
                FontInfo::default(),
                [built.font().glyph('a').unwrap().clone(), hollow],
                &KerningTable::default(),
            ),
            warnings: vec![GlyphBuildError::NoOutline { ch: 'c' }],
            assemble: options().assemble,
        };

        let encoded = output.encode(Container::Sfnt).unwrap();
        let dropped: Vec<_> = encoded.warnings().iter().map(GlyphBuildError::char).collect();
        assert_eq!(dropped, vec!['c', 'b']);
        assert_eq!(encoded.data(), output.to_bytes(Container::Sfnt).unwrap().as_slice());
    }

    #[test]
    fn output_is_reproducible() {
        let mut build = FontBuild::new(FontInfo::new("Repro", "Someone"));
        for ch in ['A', 'V', 'a'] {
            build.add(input(ch)).unwrap();
        }
        let first = build.build(&options()).unwrap();
        let second = build.build(&options()).unwrap();
        for container in [Container::Sfnt, Container::Woff] {
            assert_eq!(
                first.to_bytes(container).unwrap(),
                second.to_bytes(container).unwrap()
            );
        }
    }
}
