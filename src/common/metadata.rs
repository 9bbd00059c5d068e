use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::galois::poly_rem;
use super::mask::MaskPattern;
use super::version_db::{ec_block_info, ECBlockInfo};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(usize);

impl Version {
    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::InvalidVersion);
        }
        Ok(Self(version))
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    // Row and column coordinates of alignment pattern centers
    pub fn alignment_pattern(self) -> Vec<i16> {
        let v = self.0;
        if v == 1 {
            return Vec::new();
        }

        let intervals = v / 7 + 1;
        let distance = 4 * v + 4;
        let step = match v {
            32 => 26,
            _ => (distance + 2 * intervals - 1) / (2 * intervals) * 2,
        };

        let mut poses = Vec::with_capacity(intervals + 1);
        poses.push(6);
        poses.extend((0..intervals).map(|k| (distance + 6 - (intervals - 1 - k) * step) as i16));
        poses
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let tier = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
            Mode::Kanji => [8, 10, 12][tier],
        }
    }

    fn block_info(self, ecl: ECLevel) -> ECBlockInfo {
        ec_block_info(self.0, ecl)
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.block_info(ecl).data_codewords
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.block_info(ecl).ecc_per_block
    }

    // (Group 1 block size, group 1 block count, group 2 block size, group 2 block count)
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let info = self.block_info(ecl);
        (info.group1_size, info.group1_blocks, info.group2_size, info.group2_blocks)
    }

    pub fn total_codewords(self) -> usize {
        self.block_info(ECLevel::L).total_codewords()
    }

    // 18 bit BCH coded version number, only drawn for versions 7 and above
    pub fn info(self) -> QRResult<u32> {
        let v = self.0 as u32;
        let rem = bch_remainder(v, VERSION_DATA_BIT_LEN, VERSION_INFO_GENERATOR)?;
        Ok((v << (VERSION_INFO_BIT_LEN - VERSION_DATA_BIT_LEN)) | rem)
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::{codec::Mode, error::QRError};

    #[test]
    fn test_new() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion));
        assert_eq!(*Version::new(40).unwrap(), 40);
    }

    #[test]
    fn test_width() {
        assert_eq!(Version::new(1).unwrap().width(), 21);
        assert_eq!(Version::new(7).unwrap().width(), 45);
        assert_eq!(Version::new(40).unwrap().width(), 177);
    }

    #[test_case(1, vec![])]
    #[test_case(2, vec![6, 18])]
    #[test_case(7, vec![6, 22, 38])]
    #[test_case(15, vec![6, 26, 48, 70])]
    #[test_case(22, vec![6, 26, 50, 74, 98])]
    #[test_case(32, vec![6, 34, 60, 86, 112, 138])]
    #[test_case(36, vec![6, 24, 50, 76, 102, 128, 154])]
    #[test_case(40, vec![6, 30, 58, 86, 114, 142, 170])]
    fn test_alignment_pattern(ver: usize, exp: Vec<i16>) {
        assert_eq!(Version::new(ver).unwrap().alignment_pattern(), exp);
    }

    #[test]
    fn test_alignment_pattern_ends_at_width() {
        for v in 2..=40 {
            let ver = Version::new(v).unwrap();
            let poses = ver.alignment_pattern();
            assert_eq!(*poses.last().unwrap(), ver.width() as i16 - 7);
            assert!(poses.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test_case(1, Mode::Numeric, 10)]
    #[test_case(9, Mode::Alphanumeric, 9)]
    #[test_case(10, Mode::Byte, 16)]
    #[test_case(26, Mode::Kanji, 10)]
    #[test_case(27, Mode::Numeric, 14)]
    #[test_case(40, Mode::Alphanumeric, 13)]
    #[test_case(40, Mode::Byte, 16)]
    #[test_case(1, Mode::Kanji, 8)]
    fn test_char_cnt_bits(ver: usize, mode: Mode, exp: usize) {
        assert_eq!(Version::new(ver).unwrap().char_cnt_bits(mode), exp);
    }

    #[test]
    fn test_version_1_capacity() {
        let ver = Version::new(1).unwrap();
        assert_eq!(ver.total_codewords(), 26);
        assert_eq!(ver.data_codewords(ECLevel::L), 19);
        assert_eq!(ver.data_codewords_per_block(ECLevel::L), (19, 1, 0, 0));
        assert_eq!(ver.ecc_per_block(ECLevel::L), 7);
    }

    #[test_case(7, 0x07C94)]
    #[test_case(8, 0x085BC)]
    #[test_case(21, 0x15683)]
    #[test_case(40, 0x28C69)]
    fn test_info(ver: usize, exp: u32) {
        assert_eq!(Version::new(ver).unwrap().info().unwrap(), exp);
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // Level indicator of format info: L = 01, M = 00, Q = 11, H = 10
    pub fn format_bits(self) -> u32 {
        (self as u32) ^ 1
    }
}

// 15 bit BCH coded format info, already xored with the format mask
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> QRResult<u32> {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    let rem = bch_remainder(data, FORMAT_DATA_BIT_LEN, FORMAT_INFO_GENERATOR)?;
    Ok(((data << (FORMAT_INFO_BIT_LEN - FORMAT_DATA_BIT_LEN)) | rem) ^ FORMAT_MASK)
}

// Remainder of data * x^(deg generator) divided by the generator, over GF(2)
fn bch_remainder(data: u32, data_len: usize, generator: u32) -> QRResult<u32> {
    let gen_len = 32 - generator.leading_zeros() as usize;
    let to_coeffs = |n: u32, len: usize| (0..len).rev().map(|i| ((n >> i) & 1) as u8).collect::<Vec<_>>();

    let mut dividend = to_coeffs(data, data_len);
    dividend.resize(data_len + gen_len - 1, 0);
    let divisor = to_coeffs(generator, gen_len);

    let rem = poly_rem(&dividend, &divisor)?;
    Ok(rem.iter().fold(0, |acc, &b| (acc << 1) | b as u32))
}


// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

const FORMAT_DATA_BIT_LEN: usize = 5;

const FORMAT_INFO_GENERATOR: u32 = 0b10100110111;

const FORMAT_MASK: u32 = 0b101010000010010;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const VERSION_DATA_BIT_LEN: usize = 6;

const VERSION_INFO_GENERATOR: u32 = 0b1111100100101;
