use std::ops::Deref;

use crate::common::{
    error::QRResult,
    galois::ecc,
    metadata::{ECLevel, Version},
};

// Data codewords followed by error correction codewords, both interleaved across blocks
pub fn build_final_codewords(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<u8>> {
    let (data_blocks, ecc_blocks) = compute_ecc(data, version, ec_level)?;

    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));

    debug_assert!(
        res.len() == version.total_codewords(),
        "Codeword count doesn't match version: Count {}, Expected {}",
        res.len(),
        version.total_codewords()
    );
    Ok(res)
}

// ECC: Error Correction Codeword generator
pub fn compute_ecc(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> QRResult<(Vec<&[u8]>, Vec<Vec<u8>>)> {
    let data_blocks = blockify(data, version, ec_level);

    let ecc_size_per_block = version.ecc_per_block(ec_level);
    let ecc_blocks = data_blocks
        .iter()
        .map(|b| ecc(b, b.len() + ecc_size_per_block))
        .collect::<QRResult<Vec<_>>>()?;

    Ok((data_blocks, ecc_blocks))
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Column-wise read across blocks, shorter blocks drop out once exhausted
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

// Number of codeword errors the symbol can correct
pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
    // Misdecode protection codewords of the smallest symbols
    let p = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes_per_block = version.ecc_per_block(ec_level);
    let (_, count1, _, count2) = version.data_codewords_per_block(ec_level);
    let ec_bytes = (count1 + count2) * ec_bytes_per_block;

    (ec_bytes - p) / 2
}
