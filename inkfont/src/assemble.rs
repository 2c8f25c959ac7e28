//! Compiling a [`Font`] into a TrueType binary.
//!
//! Tables are built with [`write_fonts`] and packed by its
//! [`FontBuilder`]. Glyph 0 is always a synthesized `.notdef`; drawn glyphs
//! follow in ascending code point order.

use chrono::{DateTime, Datelike, Utc};
use kurbo::{BezPath, Point};
use write_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{Bbox, GlyfLocaBuilder, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::Os2,
        post::Post,
    },
    types::{FWord, Fixed, GlyphId, LongDateTime, NameId, Tag, UfWord},
    FontBuilder,
};

use crate::{
    error::{GlyphBuildError, SerializationError},
    font::Font,
    glyph::glyph_name,
    kern::{self, GlyphPair},
};

/// Seconds between 1904-01-01 and 1970-01-01.
const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

const NOTDEF_ADVANCE: u16 = 600;

const WINDOWS_PLATFORM: u16 = 3;
const WINDOWS_UNICODE_BMP: u16 = 1;
const WINDOWS_ENGLISH: u16 = 0x409;

/// Options that affect the bytes of the compiled font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Written to `head.created` and `head.modified`, and used for the
    /// copyright year.
    pub timestamp: DateTime<Utc>,
}

impl AssembleOptions {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        AssembleOptions { timestamp }
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        AssembleOptions {
            timestamp: Utc::now(),
        }
    }
}

/// A compiled font.
#[derive(Clone, Debug)]
pub struct Assembled {
    data: Vec<u8>,
    glyph_order: Vec<String>,
    warnings: Vec<GlyphBuildError>,
}

impl Assembled {
    /// The complete sfnt binary.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Glyph names, indexed by glyph id.
    pub fn glyph_order(&self) -> &[String] {
        &self.glyph_order
    }

    /// Glyphs that were dropped because they could not be compiled.
    pub fn warnings(&self) -> &[GlyphBuildError] {
        &self.warnings
    }
}

/// A glyph ready to be written, with its horizontal metrics resolved.
struct Compiled {
    ch: char,
    name: String,
    glyph: SimpleGlyph,
    advance: u16,
    lsb: i16,
}

impl Compiled {
    fn bbox(&self) -> Option<Bbox> {
        (!self.glyph.contours.is_empty()).then_some(self.glyph.bbox)
    }

    fn extent(&self) -> Option<i16> {
        self.bbox()
            .map(|bbox| self.lsb.saturating_add(bbox.x_max.saturating_sub(bbox.x_min)))
    }

    fn right_bearing(&self) -> Option<i16> {
        self.extent()
            .map(|extent| (self.advance as i16).saturating_sub(extent))
    }

    fn num_points(&self) -> usize {
        self.glyph.contours.iter().map(|c| c.len()).sum()
    }
}

/// The `.notdef` glyph: a box with a cross through it.
fn notdef_path() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((100.0, 0.0));
    path.line_to((500.0, 0.0));
    path.line_to((500.0, 800.0));
    path.line_to((100.0, 800.0));
    path.close_path();
    for (from, to) in [((150.0, 50.0), (450.0, 750.0)), ((450.0, 50.0), (150.0, 750.0))] {
        path.move_to(Point::from(from));
        path.line_to(Point::from(to));
    }
    path
}

fn compile_notdef() -> Result<Compiled, SerializationError> {
    let glyph = SimpleGlyph::from_bezpath(&notdef_path()).map_err(|e| {
        SerializationError::Glyph {
            name: glyph_name('\0'),
            reason: format!("{e:?}"),
        }
    })?;
    Ok(Compiled {
        ch: '\0',
        name: glyph_name('\0'),
        lsb: glyph.bbox.x_min,
        glyph,
        advance: NOTDEF_ADVANCE,
    })
}

/// Compile the drawn glyphs, dropping any that cannot be represented.
fn compile_glyphs(font: &Font, warnings: &mut Vec<GlyphBuildError>) -> Vec<Compiled> {
    let mut compiled = Vec::with_capacity(font.num_glyphs());
    for glyph in font.glyphs() {
        let dx = glyph.metrics().left_bearing as f64;
        let mut path = BezPath::new();
        for outline in glyph.outlines() {
            outline.translated(dx, 0.0).append_to(&mut path);
        }
        if path.elements().is_empty() {
            log::warn!("dropping glyph '{}': no outline commands", glyph.name());
            warnings.push(GlyphBuildError::NoOutline { ch: glyph.char() });
            continue;
        }
        match SimpleGlyph::from_bezpath(&path) {
            Ok(simple) => compiled.push(Compiled {
                ch: glyph.char(),
                name: glyph.name().to_owned(),
                lsb: simple.bbox.x_min,
                glyph: simple,
                advance: glyph.advance_width(),
            }),
            Err(e) => {
                log::warn!("dropping glyph '{}': {e:?}", glyph.name());
                warnings.push(GlyphBuildError::MalformedOutline {
                    ch: glyph.char(),
                    reason: format!("{e:?}"),
                });
            }
        }
    }
    compiled
}

/// Compile `font` into an sfnt binary.
pub fn assemble(font: &Font, options: &AssembleOptions) -> Result<Assembled, SerializationError> {
    let mut warnings = Vec::new();
    let mut glyphs = vec![compile_notdef()?];
    glyphs.extend(compile_glyphs(font, &mut warnings));
    if glyphs.len() > u16::MAX as usize {
        return Err(SerializationError::TooManyGlyphs(glyphs.len()));
    }
    let num_glyphs = glyphs.len() as u16;
    log::debug!(
        "assembling '{}' with {} glyphs ({} dropped)",
        font.family_name(),
        num_glyphs,
        warnings.len()
    );

    let mut glyf_loca = GlyfLocaBuilder::new();
    for compiled in &glyphs {
        glyf_loca
            .add_glyph(&compiled.glyph)
            .map_err(|e| SerializationError::Glyph {
                name: compiled.name.clone(),
                reason: e.to_string(),
            })?;
    }
    let (glyf, loca, loca_format) = glyf_loca.build();

    let info = font.info();
    let bbox = glyphs
        .iter()
        .filter_map(Compiled::bbox)
        .reduce(Bbox::union)
        .unwrap_or_default();
    let created = LongDateTime::new(options.timestamp.timestamp() + MAC_EPOCH_OFFSET);

    let head = Head {
        font_revision: Fixed::from_f64(info.version_major as f64 + info.version_minor as f64 / 1000.0),
        units_per_em: info.units_per_em,
        created,
        modified: created,
        x_min: bbox.x_min,
        y_min: bbox.y_min,
        x_max: bbox.x_max,
        y_max: bbox.y_max,
        lowest_rec_ppem: 8,
        index_to_loc_format: loca_format as i16,
        ..Default::default()
    };

    let advance_width_max = glyphs.iter().map(|g| g.advance).max().unwrap_or_default();
    let hhea = Hhea {
        ascender: FWord::new(info.ascender),
        descender: FWord::new(info.descender),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(advance_width_max),
        min_left_side_bearing: FWord::new(
            glyphs
                .iter()
                .filter(|g| g.bbox().is_some())
                .map(|g| g.lsb)
                .min()
                .unwrap_or_default(),
        ),
        min_right_side_bearing: FWord::new(
            glyphs
                .iter()
                .filter_map(Compiled::right_bearing)
                .min()
                .unwrap_or_default(),
        ),
        x_max_extent: FWord::new(
            glyphs
                .iter()
                .filter_map(Compiled::extent)
                .max()
                .unwrap_or_default(),
        ),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let hmtx = Hmtx {
        h_metrics: glyphs
            .iter()
            .map(|g| LongMetric::new(g.advance, g.lsb))
            .collect(),
        left_side_bearings: Vec::new(),
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(glyphs.iter().map(Compiled::num_points).max().unwrap_or_default() as u16),
        max_contours: Some(
            glyphs
                .iter()
                .map(|g| g.glyph.contours.len())
                .max()
                .unwrap_or_default() as u16,
        ),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let cmap = Cmap::from_mappings(
        glyphs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(gid, g)| (g.ch, GlyphId::new(gid as u32))),
    )
    .map_err(|e| SerializationError::Cmap(e.to_string()))?;

    let name = build_name(font, options.timestamp.year());

    let avg_width = glyphs.iter().map(|g| g.advance as u32).sum::<u32>() / glyphs.len() as u32;
    let drawn = || glyphs.iter().skip(1).map(|g| g.ch as u32);
    let os2 = Os2 {
        x_avg_char_width: avg_width as i16,
        us_weight_class: 400,
        us_width_class: 5,
        us_first_char_index: drawn().min().unwrap_or_default().min(0xFFFF) as u16,
        us_last_char_index: drawn().max().unwrap_or_default().min(0xFFFF) as u16,
        s_typo_ascender: info.ascender,
        s_typo_descender: info.descender,
        s_typo_line_gap: 0,
        us_win_ascent: bbox.y_max.max(info.ascender).max(0) as u16,
        us_win_descent: bbox.y_min.min(info.descender).min(0).unsigned_abs(),
        ul_code_page_range_1: Some(1),
        ul_code_page_range_2: Some(0),
        sx_height: Some(info.x_height),
        s_cap_height: Some(info.cap_height),
        us_default_char: Some(0),
        us_break_char: Some(' ' as u16),
        us_max_context: Some(if font.kerning().is_empty() { 0 } else { 2 }),
        ..Default::default()
    };

    let mut post = Post::new_v2(glyphs.iter().map(|g| g.name.as_str()));
    post.underline_position = FWord::new(-100);
    post.underline_thickness = FWord::new(50);

    let kern = encode_kerning(font, &glyphs)?;

    let mut builder = FontBuilder::new();
    builder
        .add_table(&head)?
        .add_table(&hhea)?
        .add_table(&hmtx)?
        .add_table(&maxp)?
        .add_table(&cmap)?
        .add_table(&name)?
        .add_table(&os2)?
        .add_table(&post)?
        .add_table(&glyf)?
        .add_table(&loca)?;
    if let Some(kern) = kern {
        builder.add_raw(Tag::new(b"kern"), kern);
    }
    let data = builder.build();

    Ok(Assembled {
        data,
        glyph_order: glyphs.into_iter().map(|g| g.name).collect(),
        warnings,
    })
}

fn build_name(font: &Font, year: i32) -> Name {
    let info = font.info();
    let unique_id = format!(
        "{};{};{}",
        info.manufacturer,
        info.version_string(),
        info.postscript_name()
    );
    let entries = [
        (NameId::COPYRIGHT_NOTICE, info.copyright(year)),
        (NameId::FAMILY_NAME, info.family_name.clone()),
        (NameId::SUBFAMILY_NAME, info.style_name.clone()),
        (NameId::UNIQUE_ID, unique_id),
        (NameId::FULL_NAME, info.full_name()),
        (NameId::VERSION_STRING, info.version_string()),
        (NameId::POSTSCRIPT_NAME, info.postscript_name()),
        (NameId::MANUFACTURER, info.manufacturer.clone()),
        (NameId::DESIGNER, info.author.clone()),
        (NameId::DESCRIPTION, info.description.clone()),
        (NameId::LICENSE_DESCRIPTION, info.license.clone()),
    ];
    Name::new(
        entries
            .into_iter()
            .map(|(name_id, string)| {
                NameRecord::new(
                    WINDOWS_PLATFORM,
                    WINDOWS_UNICODE_BMP,
                    WINDOWS_ENGLISH,
                    name_id,
                    string.into(),
                )
            })
            .collect(),
    )
}

/// Resolve the font's kerning against the final glyph order.
///
/// Pairs that refer to a glyph dropped during compilation are skipped.
fn encode_kerning(font: &Font, glyphs: &[Compiled]) -> Result<Option<Vec<u8>>, SerializationError> {
    let gid = |ch: char| {
        glyphs
            .iter()
            .skip(1)
            .position(|g| g.ch == ch)
            .map(|i| (i + 1) as u16)
    };
    let pairs: Vec<_> = font
        .kerning()
        .pairs()
        .iter()
        .filter_map(|pair| {
            Some(GlyphPair {
                left: gid(pair.left)?,
                right: gid(pair.right)?,
                value: pair.adjustment,
            })
        })
        .collect();
    if pairs.is_empty() {
        return Ok(None);
    }
    log::debug!("writing {} kerning pairs", pairs.len());
    kern::encode(&pairs)
        .map(Some)
        .ok_or(SerializationError::Directory(format!(
            "{} kerning pairs do not fit in one subtable",
            pairs.len()
        )))
}
