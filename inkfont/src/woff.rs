//! Wrapping an sfnt in a [WOFF 1.0] container.
//!
//! [WOFF 1.0]: https://www.w3.org/TR/WOFF/

use std::{borrow::Cow, io::Write};

use flate2::{write::ZlibEncoder, Compression};
use write_fonts::read::FontRef;

use crate::error::SerializationError;

pub const WOFF_SIGNATURE: u32 = 0x774F_4646;
pub const HEADER_LEN: usize = 44;
pub const TABLE_ENTRY_LEN: usize = 20;

const SFNT_HEADER_LEN: usize = 12;
const SFNT_TABLE_RECORD_LEN: usize = 16;

fn round4(len: usize) -> usize {
    (len + 3) & !3
}

struct Entry<'a> {
    tag: [u8; 4],
    checksum: u32,
    orig_len: usize,
    /// Either the zlib stream, or the raw table if compression did not help.
    stored: Cow<'a, [u8]>,
}

fn compress(data: &[u8]) -> Result<Vec<u8>, SerializationError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Convert a TrueType binary into WOFF.
///
/// Each table is zlib compressed, unless that would not make it smaller,
/// in which case it is stored as-is. The `flavor` and table checksums are
/// copied from the input.
pub fn wrap(sfnt: &[u8]) -> Result<Vec<u8>, SerializationError> {
    let font = FontRef::new(sfnt).map_err(|e| SerializationError::Directory(e.to_string()))?;
    let flavor = u32::from_be_bytes(
        sfnt.get(..4)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| SerializationError::Directory("missing sfnt version".into()))?,
    );

    let mut entries = Vec::new();
    for record in font.table_directory.table_records() {
        let tag = record.tag();
        let data = font
            .table_data(tag)
            .ok_or_else(|| SerializationError::Directory(format!("table '{tag}' out of bounds")))?
            .as_bytes();
        let compressed = compress(data)?;
        let stored: Cow<[u8]> = if compressed.len() < data.len() {
            compressed.into()
        } else {
            data.into()
        };
        entries.push(Entry {
            tag: tag.to_be_bytes(),
            checksum: record.checksum(),
            orig_len: data.len(),
            stored,
        });
    }
    entries.sort_by_key(|entry| entry.tag);
    log::debug!("wrapping {} tables as WOFF", entries.len());

    let total_sfnt_size = SFNT_HEADER_LEN
        + SFNT_TABLE_RECORD_LEN * entries.len()
        + entries.iter().map(|e| round4(e.orig_len)).sum::<usize>();
    let directory_end = HEADER_LEN + TABLE_ENTRY_LEN * entries.len();
    let total_len = directory_end
        + entries
            .iter()
            .map(|e| round4(e.stored.len()))
            .sum::<usize>();

    let mut out = Vec::with_capacity(total_len);
    let put32 = |out: &mut Vec<u8>, value: u32| out.extend_from_slice(&value.to_be_bytes());
    let put16 = |out: &mut Vec<u8>, value: u16| out.extend_from_slice(&value.to_be_bytes());

    put32(&mut out, WOFF_SIGNATURE);
    put32(&mut out, flavor);
    put32(&mut out, total_len as u32);
    put16(&mut out, entries.len() as u16);
    put16(&mut out, 0);
    put32(&mut out, total_sfnt_size as u32);
    // major and minor version of the font
    put16(&mut out, 1);
    put16(&mut out, 0);
    // metadata offset, length, uncompressed length; private offset, length
    for _ in 0..5 {
        put32(&mut out, 0);
    }

    let mut offset = directory_end;
    for entry in &entries {
        out.extend_from_slice(&entry.tag);
        put32(&mut out, offset as u32);
        put32(&mut out, entry.stored.len() as u32);
        put32(&mut out, entry.orig_len as u32);
        put32(&mut out, entry.checksum);
        offset += round4(entry.stored.len());
    }
    for entry in &entries {
        out.extend_from_slice(&entry.stored);
        out.resize(round4(out.len()), 0);
    }
    debug_assert_eq!(out.len(), total_len);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use flate2::read::ZlibDecoder;
    use std::io::Read;
    use write_fonts::{tables::maxp::Maxp, types::Tag, FontBuilder};

    use super::*;

    fn read32(data: &[u8], pos: usize) -> u32 {
        u32::from_be_bytes(data[pos..pos + 4].try_into().unwrap())
    }

    fn read16(data: &[u8], pos: usize) -> u16 {
        u16::from_be_bytes(data[pos..pos + 2].try_into().unwrap())
    }

    fn test_sfnt() -> Vec<u8> {
        let mut builder = FontBuilder::new();
        builder
            .add_table(&Maxp {
                num_glyphs: 3,
                ..Default::default()
            })
            .unwrap()
            .add_raw(Tag::new(b"abcd"), vec![1u8, 2, 3])
            .add_raw(Tag::new(b"zzzz"), vec![7u8; 400]);
        builder.build()
    }

    #[test]
    fn header_matches_sfnt() {
        let sfnt = test_sfnt();
        let woff = wrap(&sfnt).unwrap();
        assert_eq!(read32(&woff, 0), WOFF_SIGNATURE);
        assert_eq!(read32(&woff, 4), 0x0001_0000);
        assert_eq!(read32(&woff, 8) as usize, woff.len());
        assert_eq!(read16(&woff, 12), 3);
        assert_eq!(read32(&woff, 16) as usize, sfnt.len());
    }

    #[test]
    fn tables_decompress_to_sfnt_data() {
        let sfnt = test_sfnt();
        let font = FontRef::new(&sfnt).unwrap();
        let woff = wrap(&sfnt).unwrap();
        let mut tags = Vec::new();
        for i in 0..read16(&woff, 12) as usize {
            let entry = HEADER_LEN + i * TABLE_ENTRY_LEN;
            let tag = Tag::new_checked(&woff[entry..entry + 4]).unwrap();
            let offset = read32(&woff, entry + 4) as usize;
            let comp_len = read32(&woff, entry + 8) as usize;
            let orig_len = read32(&woff, entry + 12) as usize;
            assert_eq!(offset % 4, 0);

            let stored = &woff[offset..offset + comp_len];
            let table = if comp_len < orig_len {
                let mut out = Vec::new();
                ZlibDecoder::new(stored).read_to_end(&mut out).unwrap();
                out
            } else {
                stored.to_vec()
            };
            assert_eq!(table, font.table_data(tag).unwrap().as_bytes());
            tags.push(tag);
        }
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn repetitive_table_is_compressed() {
        let woff = wrap(&test_sfnt()).unwrap();
        // 'zzzz' sorts last
        let entry = HEADER_LEN + 2 * TABLE_ENTRY_LEN;
        assert_eq!(&woff[entry..entry + 4], b"zzzz");
        assert!(read32(&woff, entry + 8) < read32(&woff, entry + 12));
    }

    #[test]
    fn rejects_garbage() {
        assert!(wrap(b"not a font").is_err());
    }
}
