use super::metadata::ECLevel;

// Error correction block layout
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ECBlockInfo {
    pub data_codewords: usize,
    pub ecc_per_block: usize,
    pub group1_blocks: usize,
    pub group1_size: usize,
    pub group2_blocks: usize,
    pub group2_size: usize,
}

impl ECBlockInfo {
    const fn new(
        data_codewords: usize,
        ecc_per_block: usize,
        group1_blocks: usize,
        group1_size: usize,
        group2_blocks: usize,
        group2_size: usize,
    ) -> Self {
        Self { data_codewords, ecc_per_block, group1_blocks, group1_size, group2_blocks, group2_size }
    }

    pub fn block_count(&self) -> usize {
        self.group1_blocks + self.group2_blocks
    }

    pub fn total_codewords(&self) -> usize {
        self.data_codewords + self.ecc_per_block * self.block_count()
    }
}

pub fn ec_block_info(version: usize, ecl: ECLevel) -> ECBlockInfo {
    debug_assert!((1..=40).contains(&version), "Invalid version {version}");
    EC_BLOCK_TABLE[version - 1][ecl as usize]
}

#[cfg(test)]
mod version_db_tests {
    use test_case::test_case;

    use super::{ec_block_info, EC_BLOCK_TABLE};
    use crate::common::metadata::ECLevel;

    #[test]
    fn test_group_sizes_sum_to_data_codewords() {
        for row in EC_BLOCK_TABLE.iter() {
            for info in row {
                let sum = info.group1_blocks * info.group1_size + info.group2_blocks * info.group2_size;
                assert_eq!(sum, info.data_codewords);
                if info.group2_blocks > 0 {
                    assert_eq!(info.group2_size, info.group1_size + 1);
                }
            }
        }
    }

    #[test]
    fn test_total_codewords_independent_of_level() {
        for row in EC_BLOCK_TABLE.iter() {
            let total = row[0].total_codewords();
            assert!(row.iter().all(|info| info.total_codewords() == total));
        }
    }

    #[test_case(1, ECLevel::L, 19, 7, 1, 19, 0, 0)]
    #[test_case(1, ECLevel::H, 9, 17, 1, 9, 0, 0)]
    #[test_case(5, ECLevel::Q, 62, 18, 2, 15, 2, 16)]
    #[test_case(10, ECLevel::M, 216, 26, 4, 43, 1, 44)]
    #[test_case(40, ECLevel::L, 2956, 30, 19, 118, 6, 119)]
    #[test_case(40, ECLevel::H, 1276, 30, 20, 15, 61, 16)]
    #[allow(clippy::too_many_arguments)]
    fn test_ec_block_info(
        ver: usize,
        ecl: ECLevel,
        data: usize,
        ecc: usize,
        b1: usize,
        n1: usize,
        b2: usize,
        n2: usize,
    ) {
        let info = ec_block_info(ver, ecl);
        assert_eq!(
            (info.data_codewords, info.ecc_per_block, info.group1_blocks, info.group1_size),
            (data, ecc, b1, n1)
        );
        assert_eq!((info.group2_blocks, info.group2_size), (b2, n2));
    }
}

// Global constants
//------------------------------------------------------------------------------

// Rows are versions 1 to 40, columns are levels L, M, Q, H
pub static EC_BLOCK_TABLE: [[ECBlockInfo; 4]; 40] = [
    // Version 1
    [
        ECBlockInfo::new(19, 7, 1, 19, 0, 0),
        ECBlockInfo::new(16, 10, 1, 16, 0, 0),
        ECBlockInfo::new(13, 13, 1, 13, 0, 0),
        ECBlockInfo::new(9, 17, 1, 9, 0, 0),
    ],
    // Version 2
    [
        ECBlockInfo::new(34, 10, 1, 34, 0, 0),
        ECBlockInfo::new(28, 16, 1, 28, 0, 0),
        ECBlockInfo::new(22, 22, 1, 22, 0, 0),
        ECBlockInfo::new(16, 28, 1, 16, 0, 0),
    ],
    // Version 3
    [
        ECBlockInfo::new(55, 15, 1, 55, 0, 0),
        ECBlockInfo::new(44, 26, 1, 44, 0, 0),
        ECBlockInfo::new(34, 18, 2, 17, 0, 0),
        ECBlockInfo::new(26, 22, 2, 13, 0, 0),
    ],
    // Version 4
    [
        ECBlockInfo::new(80, 20, 1, 80, 0, 0),
        ECBlockInfo::new(64, 18, 2, 32, 0, 0),
        ECBlockInfo::new(48, 26, 2, 24, 0, 0),
        ECBlockInfo::new(36, 16, 4, 9, 0, 0),
    ],
    // Version 5
    [
        ECBlockInfo::new(108, 26, 1, 108, 0, 0),
        ECBlockInfo::new(86, 24, 2, 43, 0, 0),
        ECBlockInfo::new(62, 18, 2, 15, 2, 16),
        ECBlockInfo::new(46, 22, 2, 11, 2, 12),
    ],
    // Version 6
    [
        ECBlockInfo::new(136, 18, 2, 68, 0, 0),
        ECBlockInfo::new(108, 16, 4, 27, 0, 0),
        ECBlockInfo::new(76, 24, 4, 19, 0, 0),
        ECBlockInfo::new(60, 28, 4, 15, 0, 0),
    ],
    // Version 7
    [
        ECBlockInfo::new(156, 20, 2, 78, 0, 0),
        ECBlockInfo::new(124, 18, 4, 31, 0, 0),
        ECBlockInfo::new(88, 18, 2, 14, 4, 15),
        ECBlockInfo::new(66, 26, 4, 13, 1, 14),
    ],
    // Version 8
    [
        ECBlockInfo::new(194, 24, 2, 97, 0, 0),
        ECBlockInfo::new(154, 22, 2, 38, 2, 39),
        ECBlockInfo::new(110, 22, 4, 18, 2, 19),
        ECBlockInfo::new(86, 26, 4, 14, 2, 15),
    ],
    // Version 9
    [
        ECBlockInfo::new(232, 30, 2, 116, 0, 0),
        ECBlockInfo::new(182, 22, 3, 36, 2, 37),
        ECBlockInfo::new(132, 20, 4, 16, 4, 17),
        ECBlockInfo::new(100, 24, 4, 12, 4, 13),
    ],
    // Version 10
    [
        ECBlockInfo::new(274, 18, 2, 68, 2, 69),
        ECBlockInfo::new(216, 26, 4, 43, 1, 44),
        ECBlockInfo::new(154, 24, 6, 19, 2, 20),
        ECBlockInfo::new(122, 28, 6, 15, 2, 16),
    ],
    // Version 11
    [
        ECBlockInfo::new(324, 20, 4, 81, 0, 0),
        ECBlockInfo::new(254, 30, 1, 50, 4, 51),
        ECBlockInfo::new(180, 28, 4, 22, 4, 23),
        ECBlockInfo::new(140, 24, 3, 12, 8, 13),
    ],
    // Version 12
    [
        ECBlockInfo::new(370, 24, 2, 92, 2, 93),
        ECBlockInfo::new(290, 22, 6, 36, 2, 37),
        ECBlockInfo::new(206, 26, 4, 20, 6, 21),
        ECBlockInfo::new(158, 28, 7, 14, 4, 15),
    ],
    // Version 13
    [
        ECBlockInfo::new(428, 26, 4, 107, 0, 0),
        ECBlockInfo::new(334, 22, 8, 37, 1, 38),
        ECBlockInfo::new(244, 24, 8, 20, 4, 21),
        ECBlockInfo::new(180, 22, 12, 11, 4, 12),
    ],
    // Version 14
    [
        ECBlockInfo::new(461, 30, 3, 115, 1, 116),
        ECBlockInfo::new(365, 24, 4, 40, 5, 41),
        ECBlockInfo::new(261, 20, 11, 16, 5, 17),
        ECBlockInfo::new(197, 24, 11, 12, 5, 13),
    ],
    // Version 15
    [
        ECBlockInfo::new(523, 22, 5, 87, 1, 88),
        ECBlockInfo::new(415, 24, 5, 41, 5, 42),
        ECBlockInfo::new(295, 30, 5, 24, 7, 25),
        ECBlockInfo::new(223, 24, 11, 12, 7, 13),
    ],
    // Version 16
    [
        ECBlockInfo::new(589, 24, 5, 98, 1, 99),
        ECBlockInfo::new(453, 28, 7, 45, 3, 46),
        ECBlockInfo::new(325, 24, 15, 19, 2, 20),
        ECBlockInfo::new(253, 30, 3, 15, 13, 16),
    ],
    // Version 17
    [
        ECBlockInfo::new(647, 28, 1, 107, 5, 108),
        ECBlockInfo::new(507, 28, 10, 46, 1, 47),
        ECBlockInfo::new(367, 28, 1, 22, 15, 23),
        ECBlockInfo::new(283, 28, 2, 14, 17, 15),
    ],
    // Version 18
    [
        ECBlockInfo::new(721, 30, 5, 120, 1, 121),
        ECBlockInfo::new(563, 26, 9, 43, 4, 44),
        ECBlockInfo::new(397, 28, 17, 22, 1, 23),
        ECBlockInfo::new(313, 28, 2, 14, 19, 15),
    ],
    // Version 19
    [
        ECBlockInfo::new(795, 28, 3, 113, 4, 114),
        ECBlockInfo::new(627, 26, 3, 44, 11, 45),
        ECBlockInfo::new(445, 26, 17, 21, 4, 22),
        ECBlockInfo::new(341, 26, 9, 13, 16, 14),
    ],
    // Version 20
    [
        ECBlockInfo::new(861, 28, 3, 107, 5, 108),
        ECBlockInfo::new(669, 26, 3, 41, 13, 42),
        ECBlockInfo::new(485, 30, 15, 24, 5, 25),
        ECBlockInfo::new(385, 28, 15, 15, 10, 16),
    ],
    // Version 21
    [
        ECBlockInfo::new(932, 28, 4, 116, 4, 117),
        ECBlockInfo::new(714, 26, 17, 42, 0, 0),
        ECBlockInfo::new(512, 28, 17, 22, 6, 23),
        ECBlockInfo::new(406, 30, 19, 16, 6, 17),
    ],
    // Version 22
    [
        ECBlockInfo::new(1006, 28, 2, 111, 7, 112),
        ECBlockInfo::new(782, 28, 17, 46, 0, 0),
        ECBlockInfo::new(568, 30, 7, 24, 16, 25),
        ECBlockInfo::new(442, 24, 34, 13, 0, 0),
    ],
    // Version 23
    [
        ECBlockInfo::new(1094, 30, 4, 121, 5, 122),
        ECBlockInfo::new(860, 28, 4, 47, 14, 48),
        ECBlockInfo::new(614, 30, 11, 24, 14, 25),
        ECBlockInfo::new(464, 30, 16, 15, 14, 16),
    ],
    // Version 24
    [
        ECBlockInfo::new(1174, 30, 6, 117, 4, 118),
        ECBlockInfo::new(914, 28, 6, 45, 14, 46),
        ECBlockInfo::new(664, 30, 11, 24, 16, 25),
        ECBlockInfo::new(514, 30, 30, 16, 2, 17),
    ],
    // Version 25
    [
        ECBlockInfo::new(1276, 26, 8, 106, 4, 107),
        ECBlockInfo::new(1000, 28, 8, 47, 13, 48),
        ECBlockInfo::new(718, 30, 7, 24, 22, 25),
        ECBlockInfo::new(538, 30, 22, 15, 13, 16),
    ],
    // Version 26
    [
        ECBlockInfo::new(1370, 28, 10, 114, 2, 115),
        ECBlockInfo::new(1062, 28, 19, 46, 4, 47),
        ECBlockInfo::new(754, 28, 28, 22, 6, 23),
        ECBlockInfo::new(596, 30, 33, 16, 4, 17),
    ],
    // Version 27
    [
        ECBlockInfo::new(1468, 30, 8, 122, 4, 123),
        ECBlockInfo::new(1128, 28, 22, 45, 3, 46),
        ECBlockInfo::new(808, 30, 8, 23, 26, 24),
        ECBlockInfo::new(628, 30, 12, 15, 28, 16),
    ],
    // Version 28
    [
        ECBlockInfo::new(1531, 30, 3, 117, 10, 118),
        ECBlockInfo::new(1193, 28, 3, 45, 23, 46),
        ECBlockInfo::new(871, 30, 4, 24, 31, 25),
        ECBlockInfo::new(661, 30, 11, 15, 31, 16),
    ],
    // Version 29
    [
        ECBlockInfo::new(1631, 30, 7, 116, 7, 117),
        ECBlockInfo::new(1267, 28, 21, 45, 7, 46),
        ECBlockInfo::new(911, 30, 1, 23, 37, 24),
        ECBlockInfo::new(701, 30, 19, 15, 26, 16),
    ],
    // Version 30
    [
        ECBlockInfo::new(1735, 30, 5, 115, 10, 116),
        ECBlockInfo::new(1373, 28, 19, 47, 10, 48),
        ECBlockInfo::new(985, 30, 15, 24, 25, 25),
        ECBlockInfo::new(745, 30, 23, 15, 25, 16),
    ],
    // Version 31
    [
        ECBlockInfo::new(1843, 30, 13, 115, 3, 116),
        ECBlockInfo::new(1455, 28, 2, 46, 29, 47),
        ECBlockInfo::new(1033, 30, 42, 24, 1, 25),
        ECBlockInfo::new(793, 30, 23, 15, 28, 16),
    ],
    // Version 32
    [
        ECBlockInfo::new(1955, 30, 17, 115, 0, 0),
        ECBlockInfo::new(1541, 28, 10, 46, 23, 47),
        ECBlockInfo::new(1115, 30, 10, 24, 35, 25),
        ECBlockInfo::new(845, 30, 19, 15, 35, 16),
    ],
    // Version 33
    [
        ECBlockInfo::new(2071, 30, 17, 115, 1, 116),
        ECBlockInfo::new(1631, 28, 14, 46, 21, 47),
        ECBlockInfo::new(1171, 30, 29, 24, 19, 25),
        ECBlockInfo::new(901, 30, 11, 15, 46, 16),
    ],
    // Version 34
    [
        ECBlockInfo::new(2191, 30, 13, 115, 6, 116),
        ECBlockInfo::new(1725, 28, 14, 46, 23, 47),
        ECBlockInfo::new(1231, 30, 44, 24, 7, 25),
        ECBlockInfo::new(961, 30, 59, 16, 1, 17),
    ],
    // Version 35
    [
        ECBlockInfo::new(2306, 30, 12, 121, 7, 122),
        ECBlockInfo::new(1812, 28, 12, 47, 26, 48),
        ECBlockInfo::new(1286, 30, 39, 24, 14, 25),
        ECBlockInfo::new(986, 30, 22, 15, 41, 16),
    ],
    // Version 36
    [
        ECBlockInfo::new(2434, 30, 6, 121, 14, 122),
        ECBlockInfo::new(1914, 28, 6, 47, 34, 48),
        ECBlockInfo::new(1354, 30, 46, 24, 10, 25),
        ECBlockInfo::new(1054, 30, 2, 15, 64, 16),
    ],
    // Version 37
    [
        ECBlockInfo::new(2566, 30, 17, 122, 4, 123),
        ECBlockInfo::new(1992, 28, 29, 46, 14, 47),
        ECBlockInfo::new(1426, 30, 49, 24, 10, 25),
        ECBlockInfo::new(1096, 30, 24, 15, 46, 16),
    ],
    // Version 38
    [
        ECBlockInfo::new(2702, 30, 4, 122, 18, 123),
        ECBlockInfo::new(2102, 28, 13, 46, 32, 47),
        ECBlockInfo::new(1502, 30, 48, 24, 14, 25),
        ECBlockInfo::new(1142, 30, 42, 15, 32, 16),
    ],
    // Version 39
    [
        ECBlockInfo::new(2812, 30, 20, 117, 4, 118),
        ECBlockInfo::new(2216, 28, 40, 47, 7, 48),
        ECBlockInfo::new(1582, 30, 43, 24, 22, 25),
        ECBlockInfo::new(1222, 30, 10, 15, 67, 16),
    ],
    // Version 40
    [
        ECBlockInfo::new(2956, 30, 19, 118, 6, 119),
        ECBlockInfo::new(2334, 28, 18, 47, 31, 48),
        ECBlockInfo::new(1666, 30, 34, 24, 34, 25),
        ECBlockInfo::new(1276, 30, 20, 15, 61, 16),
    ],
];
