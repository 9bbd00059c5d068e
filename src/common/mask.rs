use std::ops::Deref;

use rayon::prelude::*;

use super::debug::debug_log;
use super::error::{QRError, QRResult};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        debug_assert!(*self < 8, "Invalid pattern");

        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 4)], &[(0, 1), (3, 4)])]
    #[test_case(1, &[(0, 3), (2, 7)], &[(1, 0), (5, 5)])]
    #[test_case(2, &[(1, 0), (4, 3)], &[(0, 1), (0, 5)])]
    #[test_case(3, &[(1, 2), (0, 3)], &[(1, 1), (0, 4)])]
    #[test_case(4, &[(0, 0), (1, 2), (2, 3)], &[(0, 3), (2, 0)])]
    #[test_case(5, &[(0, 5), (6, 1)], &[(1, 1), (5, 5)])]
    #[test_case(6, &[(1, 1), (1, 2)], &[(2, 2), (1, 5)])]
    #[test_case(7, &[(0, 0), (0, 2)], &[(0, 1), (1, 1)])]
    fn test_mask_functions(mask: u8, set: &[(i16, i16)], unset: &[(i16, i16)]) {
        let mask_fn = MaskPattern::new(mask).unwrap().mask_functions();
        assert!(set.iter().all(|&(r, c)| mask_fn(r, c)));
        assert!(unset.iter().all(|&(r, c)| !mask_fn(r, c)));
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Places the codewords under all 8 masks and keeps the lowest scoring symbol.
// Ties go to the lowest mask index.
pub fn select_best_mask(base: &QR, codewords: &[u8], seq: &[(i16, i16)]) -> QRResult<QR> {
    let mut trials = (0..8)
        .into_par_iter()
        .map(|m| {
            let mut qr = base.clone();
            qr.draw_codewords(codewords, seq, MaskPattern(m))?;
            let pen = compute_total_penalty(&qr);
            Ok((qr, pen))
        })
        .collect::<QRResult<Vec<_>>>()?;

    let mut best = 0;
    for (i, (_, pen)) in trials.iter().enumerate() {
        debug_log!("Mask {i} penalty {pen}");
        if *pen < trials[best].1 {
            best = i;
        }
    }
    debug_log!("Selected mask {best}");

    Ok(trials.swap_remove(best).0)
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let rows = qr.to_matrix();
    let cols = transpose(&rows);

    let adj_pen = compute_adjacent_penalty(&rows) + compute_adjacent_penalty(&cols);
    let blk_pen = compute_block_penalty(&rows);
    let fp_pen = compute_finder_pattern_penalty(&rows) + compute_finder_pattern_penalty(&cols);
    let bal_pen = compute_balance_penalty(&rows);
    adj_pen + blk_pen + fp_pen + bal_pen
}

fn transpose(rows: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let w = rows.first().map_or(0, |r| r.len());
    (0..w).map(|c| rows.iter().map(|row| row[c]).collect()).collect()
}

// Rule 1: runs of 5 or more same colored modules along each line
fn compute_adjacent_penalty(lines: &[Vec<bool>]) -> u32 {
    let mut pen = 0;
    for line in lines {
        let mut last = None;
        let mut consec_len = 0;
        for &clr in line {
            if last != Some(clr) {
                last = Some(clr);
                consec_len = 0;
            }
            consec_len += 1;
            if consec_len == 5 {
                pen += 3;
            } else if consec_len > 5 {
                pen += 1;
            }
        }
    }
    pen
}

// Rule 2: 2x2 blocks of the same color
fn compute_block_penalty(rows: &[Vec<bool>]) -> u32 {
    let mut pen = 0;
    for pair in rows.windows(2) {
        let (top, bottom) = (&pair[0], &pair[1]);
        for c in 0..top.len().saturating_sub(1) {
            let clr = top[c];
            if clr == top[c + 1] && clr == bottom[c] && clr == bottom[c + 1] {
                pen += 3;
            }
        }
    }
    pen
}

// Rule 3: finder like 1:1:3:1:1 runs followed or preceded by 4 light modules
fn compute_finder_pattern_penalty(lines: &[Vec<bool>]) -> u32 {
    let mut pen = 0;
    for line in lines {
        for window in line.windows(FINDER_PATTERN.len()) {
            if window.iter().eq(FINDER_PATTERN.iter()) || window.iter().eq(FINDER_PATTERN.iter().rev()) {
                pen += 40;
            }
        }
    }
    pen
}

// Rule 4: deviation of dark module ratio from 50%, in steps of 5%
fn compute_balance_penalty(rows: &[Vec<bool>]) -> u32 {
    let total = rows.iter().map(|r| r.len()).sum::<usize>();
    if total == 0 {
        return 0;
    }
    let dark = rows.iter().flatten().filter(|&&m| m).count();
    let k = (dark * 40 + total) / (2 * total);
    (k.abs_diff(10) * 10) as u32
}


// Global constants
//------------------------------------------------------------------------------

static FINDER_PATTERN: [bool; 11] =
    [true, false, true, true, true, false, true, false, false, false, false];
