use super::metadata::Version;

// Iterator over every module of the symbol in data placement order
//------------------------------------------------------------------------------

pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        if self.c < 0 {
            return None;
        }
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

// Function pattern, format & version areas that data bits never land on
//------------------------------------------------------------------------------

pub struct ReservedArea {
    width: i16,
    alignment: Vec<i16>,
    has_version_info: bool,
}

impl ReservedArea {
    pub fn new(version: Version) -> Self {
        Self {
            width: version.width() as i16,
            alignment: version.alignment_pattern(),
            has_version_info: *version >= 7,
        }
    }

    pub fn contains(&self, r: i16, c: i16) -> bool {
        let w = self.width;

        // Finder, separator & format strip
        if (r < 9 && c < 9) || (r < 9 && c >= w - 8) || (r >= w - 8 && c < 9) {
            return true;
        }

        // Timing
        if r == 6 || c == 6 {
            return true;
        }

        // Version info
        if self.has_version_info && ((r < 6 && c >= w - 11) || (c < 6 && r >= w - 11)) {
            return true;
        }

        self.in_alignment_pattern(r, c)
    }

    fn in_alignment_pattern(&self, r: i16, c: i16) -> bool {
        let Some(&last) = self.alignment.last() else {
            return false;
        };
        let near = |x: i16| self.alignment.iter().copied().find(|&p| (x - p).abs() <= 2);
        match (near(r), near(c)) {
            (Some(6), Some(6)) => false,
            (Some(6), Some(p)) | (Some(p), Some(6)) if p == last => false,
            (Some(_), Some(_)) => true,
            _ => false,
        }
    }
}

// Coordinates of all data modules in the order codeword bits are placed
pub fn build_sequence(version: Version) -> Vec<(i16, i16)> {
    let reserved = ReservedArea::new(version);
    EncRegionIter::new(version).filter(|&(r, c)| !reserved.contains(r, c)).collect()
}

#[cfg(test)]
mod iter_tests {
    use super::{build_sequence, EncRegionIter, ReservedArea};
    use crate::common::metadata::Version;

    #[test]
    fn test_enc_region_iter_visits_all_but_timing_col() {
        let ver = Version::new(1).unwrap();
        let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
        assert_eq!(coords.len(), 21 * 20);
        assert!(coords.iter().all(|&(_, c)| c != 6));
        assert_eq!(&coords[..5], [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20)]);
    }

    #[test]
    fn test_enc_region_iter_turns_at_top() {
        let ver = Version::new(1).unwrap();
        let coords = EncRegionIter::new(ver).skip(42).take(4).collect::<Vec<_>>();
        assert_eq!(coords, [(0, 18), (0, 17), (1, 18), (1, 17)]);
    }

    #[test]
    fn test_sequence_len_matches_codewords() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            let seq = build_sequence(ver);
            assert_eq!(seq.len() / 8, ver.total_codewords(), "Version {v}");
        }
    }

    #[test]
    fn test_remainder_bits() {
        let rem = |v| {
            let ver = Version::new(v).unwrap();
            build_sequence(ver).len() - ver.total_codewords() * 8
        };
        assert_eq!(rem(1), 0);
        assert_eq!(rem(2), 7);
        assert_eq!(rem(14), 3);
        assert_eq!(rem(21), 4);
        assert_eq!(rem(28), 3);
        assert_eq!(rem(40), 0);
    }

    #[test]
    fn test_reserved_area() {
        let reserved = ReservedArea::new(Version::new(7).unwrap());
        // Dark module & format strips
        assert!(reserved.contains(37, 8));
        assert!(reserved.contains(8, 44));
        // Version info blocks
        assert!(reserved.contains(0, 34));
        assert!(reserved.contains(34, 5));
        assert!(!reserved.contains(0, 33));
        // Alignment patterns, except the ones overlapping finders
        assert!(reserved.contains(22, 22));
        assert!(reserved.contains(24, 4));
        assert!(reserved.contains(40, 40));
        assert!(!reserved.contains(9, 9));
        assert!(!reserved.contains(10, 22));
    }
}

// Global constants
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;
