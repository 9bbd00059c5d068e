pub mod bit_utils;
pub mod codec;
pub(crate) mod debug;
pub mod error;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod version_db;

pub use bit_utils::*;
pub use codec::*;
pub use error::*;
pub use galois::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
pub use version_db::*;
