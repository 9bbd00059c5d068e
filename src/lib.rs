//! # qrforge
//!
//! A Rust library for encoding text into QR code symbols (Model 2, versions 1 to 40) with
//! Reed-Solomon error correction and automatic mask selection.
//!
//! ## Features
//!
//! - **Mode detection**: Numeric, alphanumeric, byte and Shift JIS kanji, picked from the input
//! - **Version resolution**: Smallest version that fits the data, or a caller pinned version
//! - **Reed-Solomon error correction**: Levels L, M, Q and H, with block splitting and interleaving
//! - **Mask selection**: All 8 masks scored by the 4 penalty rules, lowest score wins
//! - **Rendering**: Terminal text and grayscale images with a quiet zone
//!
//! ## Quick Start
//!
//! ```rust
//! use qrforge::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Version, level & mask are chosen automatically
//! let qr = QRBuilder::new("Hello, World!").build()?;
//!
//! let img = qr.to_image(4); // 4 pixels per module
//! assert_eq!(img.width(), (qr.width() as u32 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD")
//!     .version(Version::new(2)?)      // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)           // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)     // if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! println!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Raw Matrix
//!
//! ```rust
//! use qrforge::{encode_symbol, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (matrix, version) = encode_symbol("01234567", ECLevel::M, None)?;
//! assert_eq!(*version, 1);
//! assert_eq!(matrix.len(), 21);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! Setting the `QRFORGE_DEBUG` environment variable traces each pipeline step to stderr.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, QR};
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};

/// Encodes `text` into a matrix of modules, `true` for dark, rows first.
///
/// Picks the smallest fitting version when `version` is `None`.
pub fn encode_symbol(
    text: &str,
    ec_level: ECLevel,
    version: Option<usize>,
) -> QRResult<(Vec<Vec<bool>>, Version)> {
    let mut builder = QRBuilder::new(text);
    builder.ec_level(ec_level);
    if let Some(v) = version {
        builder.version(Version::new(v)?);
    }

    let qr = builder.build()?;
    Ok((qr.to_matrix(), qr.version()))
}

#[cfg(test)]
mod lib_tests {
    use super::{encode_symbol, ECLevel, QRError};

    #[test]
    fn test_encode_symbol() {
        let (matrix, version) = encode_symbol("HELLO WORLD", ECLevel::Q, None).unwrap();
        assert_eq!(*version, 1);
        assert_eq!(matrix.len(), 21);
        assert!(matrix.iter().all(|r| r.len() == 21));
        // Finder corner & dark module
        assert!(matrix[0][0] && matrix[6][6] && !matrix[1][1]);
        assert!(matrix[13][8]);
    }

    #[test]
    fn test_encode_symbol_pinned_version() {
        let (matrix, version) = encode_symbol("HELLO WORLD", ECLevel::L, Some(7)).unwrap();
        assert_eq!(*version, 7);
        assert_eq!(matrix.len(), 45);
    }

    #[test]
    fn test_encode_symbol_errors() {
        assert_eq!(encode_symbol("1", ECLevel::L, Some(0)).err(), Some(QRError::InvalidVersion));
        assert_eq!(encode_symbol("1", ECLevel::L, Some(41)).err(), Some(QRError::InvalidVersion));
        let data = "A".repeat(4297);
        assert_eq!(encode_symbol(&data, ECLevel::L, None).err(), Some(QRError::DataTooLong));
    }
}
