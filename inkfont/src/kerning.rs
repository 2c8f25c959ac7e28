//! Table-driven kerning for common Latin pairs.

/// A spacing adjustment applied between two characters, in design units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KerningPair {
    pub left: char,
    pub right: char,
    pub adjustment: i16,
}

impl KerningPair {
    pub const fn new(left: char, right: char, adjustment: i16) -> Self {
        KerningPair {
            left,
            right,
            adjustment,
        }
    }
}

const fn kp(left: char, right: char, adjustment: i16) -> KerningPair {
    KerningPair::new(left, right, adjustment)
}

/// Hand-curated adjustments for pairs that are commonly kerned.
pub static DEFAULT_KERNING: &[KerningPair] = &[
    kp('A', 'V', -80),
    kp('A', 'W', -60),
    kp('A', 'Y', -90),
    kp('A', 'v', -40),
    kp('A', 'w', -40),
    kp('A', 'y', -40),
    kp('F', 'A', -80),
    kp('F', 'a', -40),
    kp('F', 'e', -40),
    kp('L', 'T', -90),
    kp('L', 'V', -110),
    kp('L', 'W', -90),
    kp('L', 'Y', -120),
    kp('L', 'y', -40),
    kp('P', 'A', -100),
    kp('P', 'a', -30),
    kp('P', 'e', -30),
    kp('T', 'A', -90),
    kp('T', 'a', -90),
    kp('T', 'e', -90),
    kp('T', 'o', -90),
    kp('T', 'r', -40),
    kp('T', 'u', -90),
    kp('V', 'A', -80),
    kp('V', 'a', -70),
    kp('V', 'e', -70),
    kp('V', 'o', -70),
    kp('V', 'u', -40),
    kp('W', 'A', -60),
    kp('W', 'a', -50),
    kp('W', 'e', -50),
    kp('W', 'o', -50),
    kp('W', 'u', -30),
    kp('Y', 'A', -90),
    kp('Y', 'a', -90),
    kp('Y', 'e', -90),
    kp('Y', 'o', -90),
    kp('Y', 'u', -70),
    kp('a', 'v', -20),
    kp('a', 'w', -20),
    kp('a', 'y', -20),
    kp('f', 'f', -20),
    kp('o', 'v', -20),
    kp('o', 'w', -20),
    kp('o', 'y', -20),
    kp('v', 'a', -20),
    kp('v', 'e', -20),
    kp('v', 'o', -20),
    kp('w', 'a', -20),
    kp('w', 'e', -20),
    kp('w', 'o', -20),
    kp('y', 'a', -20),
    kp('y', 'e', -20),
    kp('y', 'o', -20),
];

/// A list of kerning pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KerningTable {
    pairs: Vec<KerningPair>,
}

impl KerningTable {
    pub fn new(pairs: Vec<KerningPair>) -> Self {
        KerningTable { pairs }
    }

    /// The built-in table of common Latin pairs.
    pub fn common_latin() -> Self {
        KerningTable::new(DEFAULT_KERNING.to_vec())
    }

    /// Keep only the pairs whose characters both satisfy `present`.
    #[must_use]
    pub fn filter(&self, present: impl Fn(char) -> bool) -> Self {
        let pairs = self
            .pairs
            .iter()
            .filter(|pair| present(pair.left) && present(pair.right))
            .copied()
            .collect();
        KerningTable { pairs }
    }

    pub fn pairs(&self) -> &[KerningPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
