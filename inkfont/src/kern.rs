//! Encoding of the [kern] table.
//!
//! Only the OpenType layout is written: version 0, with a single format 0
//! subtable of horizontal pairs.
//!
//! [kern]: https://learn.microsoft.com/en-us/typography/opentype/spec/kern

const TABLE_HEADER_LEN: usize = 4;
const SUBTABLE_HEADER_LEN: usize = 14;
const PAIR_LEN: usize = 6;

/// Horizontal kerning, no minimum values, not cross-stream.
const COVERAGE_HORIZONTAL: u16 = 0x0001;

/// The maximum number of pairs that fits in a single subtable.
pub const MAX_PAIRS: usize = (u16::MAX as usize - SUBTABLE_HEADER_LEN) / PAIR_LEN;

/// A kerning value between two glyph ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphPair {
    pub left: u16,
    pub right: u16,
    pub value: i16,
}

/// Binary search parameters for a sorted array of records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    pub fn compute(n_items: usize, item_size: usize) -> Self {
        if n_items == 0 {
            return SearchRange {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = n_items.ilog2();
        let largest = 1usize << entry_selector;
        SearchRange {
            search_range: (largest * item_size) as u16,
            entry_selector: entry_selector as u16,
            range_shift: ((n_items - largest) * item_size) as u16,
        }
    }
}

/// Serialize `pairs` as a complete `kern` table.
///
/// Pairs are sorted by `(left, right)`, which the format requires for
/// binary search. Returns `None` if there are too many pairs for a single
/// subtable.
pub fn encode(pairs: &[GlyphPair]) -> Option<Vec<u8>> {
    if pairs.len() > MAX_PAIRS {
        return None;
    }
    let mut sorted = pairs.to_vec();
    sorted.sort_unstable();
    sorted.dedup_by_key(|pair| (pair.left, pair.right));

    let subtable_len = SUBTABLE_HEADER_LEN + sorted.len() * PAIR_LEN;
    let search = SearchRange::compute(sorted.len(), PAIR_LEN);

    let mut data = Vec::with_capacity(TABLE_HEADER_LEN + subtable_len);
    let mut put = |value: u16| data.extend_from_slice(&value.to_be_bytes());
    // version, nTables
    put(0);
    put(1);
    // subtable version, length, coverage
    put(0);
    put(subtable_len as u16);
    put(COVERAGE_HORIZONTAL);
    put(sorted.len() as u16);
    put(search.search_range);
    put(search.entry_selector);
    put(search.range_shift);
    for pair in &sorted {
        put(pair.left);
        put(pair.right);
        put(pair.value as u16);
    }
    Some(data)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[rustfmt::skip]
    static THREE_PAIRS: &[u8] = &[
        0x00, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x20, 0x00, 0x01,
        0x00, 0x03, 0x00, 0x0C, 0x00, 0x01, 0x00, 0x06,
        0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8,
        0x00, 0x04, 0x00, 0x1C, 0x00, 0x28,
        0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE,
    ];

    fn pair(left: u16, right: u16, value: i16) -> GlyphPair {
        GlyphPair { left, right, value }
    }

    #[test]
    fn known_bytes() {
        let bytes = encode(&[pair(5, 40, -50), pair(4, 12, -40), pair(4, 28, 40)]).unwrap();
        assert_eq!(bytes, THREE_PAIRS);
    }

    #[test]
    fn search_range() {
        assert_eq!(
            SearchRange::compute(3, 6),
            SearchRange {
                search_range: 12,
                entry_selector: 1,
                range_shift: 6
            }
        );
        assert_eq!(
            SearchRange::compute(8, 6),
            SearchRange {
                search_range: 48,
                entry_selector: 3,
                range_shift: 0
            }
        );
        assert_eq!(SearchRange::compute(0, 6).search_range, 0);
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let bytes = encode(&[pair(1, 2, -10), pair(1, 2, -20)]).unwrap();
        assert_eq!(bytes.len(), TABLE_HEADER_LEN + SUBTABLE_HEADER_LEN + PAIR_LEN);
        assert_eq!(&bytes[10..12], &[0, 1]);
    }

    #[test]
    fn too_many_pairs() {
        let pairs = vec![pair(0, 0, 0); MAX_PAIRS + 1];
        assert!(encode(&pairs).is_none());
    }
}
