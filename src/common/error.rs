use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Caller input
    InvalidVersion,
    InvalidMaskingPattern,
    DataTooLong,

    // Internal consistency
    InvalidCharacterEncoding,
    DivisionByZero,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::InvalidVersion => "Invalid version, expected 1 to 40",
            Self::InvalidMaskingPattern => "Invalid masking pattern, expected 0 to 7",
            Self::DataTooLong => "Data too long",
            Self::InvalidCharacterEncoding => "Invalid character encoding for kanji mode",
            Self::DivisionByZero => "Division by zero in GF(256)",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
