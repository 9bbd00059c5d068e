use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use super::metadata::Version;

pub use encode::*;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    // Packs a double byte Shift JIS value into 13 bits
    fn kanji_value(sjis: u16) -> Option<u16> {
        let offset = match sjis {
            0x8140..=0x9FFC => 0x8140,
            0xE040..=0xEBBF => 0xC140,
            _ => return None,
        };
        let diff = sjis - offset;
        Some((diff >> 8) * 0xC0 + (diff & 0xFF))
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => {
                debug_assert!(len == 2, "Kanji chunk must be a byte pair: {len}");
                let sjis = ((data[0] as u16) << 8) | data[1] as u16;
                debug_assert!(Self::kanji_value(sjis).is_some(), "Invalid kanji pair: {sjis:#06X}");
                Self::kanji_value(sjis).unwrap_or_default()
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte | Self::Kanji => true,
        }
    }

    // Bit length of the payload for `len` characters, or bytes in byte mode
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
        }
    }

    // Narrowest single mode that covers the whole text
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        if bytes.iter().all(|&b| Self::Numeric.contains(b)) {
            Self::Numeric
        } else if bytes.iter().all(|&b| Self::Alphanumeric.contains(b)) {
            Self::Alphanumeric
        } else if Self::is_kanji(text) {
            Self::Kanji
        } else {
            Self::Byte
        }
    }

    // Every char is a double byte Shift JIS kanji, ascii space is tolerated
    fn is_kanji(text: &str) -> bool {
        let mut buf = [0; 4];
        text.chars().all(|c| {
            if c == ' ' {
                return true;
            }
            let (sjis, _, had_errors) = SHIFT_JIS.encode(c.encode_utf8(&mut buf));
            !had_errors
                && sjis.len() == 2
                && Self::kanji_value(((sjis[0] as u16) << 8) | sjis[1] as u16).is_some()
        })
    }
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment<'a> {
    mode: Mode,
    // Characters for numeric, alphanumeric & kanji, bytes for byte mode
    char_cnt: usize,
    // Ascii, Latin-1, UTF-8 or Shift JIS bytes depending on mode
    data: Cow<'a, [u8]>,
}

impl<'a> Segment<'a> {
    fn new(mode: Mode, text: &'a str) -> Self {
        match mode {
            Mode::Numeric | Mode::Alphanumeric => {
                Self { mode, char_cnt: text.len(), data: Cow::Borrowed(text.as_bytes()) }
            }
            Mode::Byte => {
                let data = if text.chars().all(|c| (c as u32) <= 0xFF) {
                    Cow::Owned(text.chars().map(|c| c as u8).collect())
                } else {
                    Cow::Borrowed(text.as_bytes())
                };
                Self { mode, char_cnt: data.len(), data }
            }
            Mode::Kanji => {
                let (sjis, _, _) = SHIFT_JIS.encode(text);
                Self { mode, char_cnt: text.chars().count(), data: sjis }
            }
        }
    }

    fn payload_len(&self) -> usize {
        self.mode.encoded_len(self.char_cnt)
    }

    // Mode indicator, char count indicator & payload
    fn bit_len(&self, ver: Version) -> usize {
        ver.mode_bits() + ver.char_cnt_bits(self.mode) + self.payload_len()
    }
}


// Writer for encoded data
//------------------------------------------------------------------------------

mod writer {
    use super::{Mode, Segment};
    use crate::common::{
        bit_utils::BitStream,
        error::{QRError, QRResult},
        metadata::Version,
    };

    pub fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, ver.mode_bits());
        let len_bits = ver.char_cnt_bits(seg.mode);
        debug_assert!(
            seg.char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {}, Char count bits {len_bits}",
            seg.char_cnt
        );
        out.push_bits(seg.char_cnt as u16, len_bits);
    }

    pub fn push_payload(seg: &Segment, out: &mut BitStream) -> QRResult<()> {
        match seg.mode {
            Mode::Numeric => push_numeric_data(&seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(&seg.data, out),
            Mode::Byte => push_byte_data(&seg.data, out),
            Mode::Kanji => push_kanji_data(&seg.data, out)?,
        }
        Ok(())
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = (chunk.len() * 10 + 2) / 3;
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = (chunk.len() * 11 + 1) / 2;
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(1) {
            let data = Mode::Byte.encode_chunk(chunk);
            out.push_bits(data, 8);
        }
    }

    // A single byte anywhere in the stream misaligns the pairs and is rejected
    fn push_kanji_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(2) {
            if chunk.len() != 2 {
                return Err(QRError::InvalidCharacterEncoding);
            }
            let sjis = ((chunk[0] as u16) << 8) | chunk[1] as u16;
            let value = Mode::kanji_value(sjis).ok_or(QRError::InvalidCharacterEncoding)?;
            out.push_bits(value, 13);
        }
        Ok(())
    }

    pub fn push_terminator(out: &mut BitStream) {
        let term_len = std::cmp::min(4, out.remaining());
        out.push_bits(0, term_len);
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0, 8 - offset);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        debug_assert!(
            out.len() & 7 == 0,
            "Bit offset should be zero before padding codewords: {}",
            out.len() & 7
        );

        let remain_byte_capacity = out.remaining() >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

}

// Encoder
//------------------------------------------------------------------------------

mod encode {
    use std::borrow::Cow;

    use super::{
        writer::{pad_remaining_capacity, push_header, push_payload, push_terminator},
        Mode, Segment,
    };
    use crate::common::{
        bit_utils::BitStream,
        debug::debug_log,
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    // Packs the text into data codewords, resolving the smallest fitting version when none is given
    pub fn encode(text: &str, ecl: ECLevel, version: Option<Version>) -> QRResult<(Vec<u8>, Version)> {
        let text = normalize_url(text);
        let mode = Mode::detect(&text);
        let seg = Segment::new(mode, &text);
        debug_log!("Detected {mode:?} mode for {} chars", seg.char_cnt);

        let mut payload = BitStream::new(seg.payload_len());
        push_payload(&seg, &mut payload)?;

        let ver = match version {
            Some(v) if seg.bit_len(v) > v.data_bit_capacity(ecl) => return Err(QRError::DataTooLong),
            Some(v) => v,
            None => find_min_version(&seg, ecl)?,
        };
        debug_log!("Resolved version {} at level {ecl:?}", *ver);

        let mut bs = BitStream::new(ver.data_bit_capacity(ecl));
        push_header(&seg, ver, &mut bs);
        bs.append(&payload);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);

        Ok((bs.data().to_vec(), ver))
    }

    fn find_min_version(seg: &Segment, ecl: ECLevel) -> QRResult<Version> {
        for v in 1..=40 {
            let ver = Version::new(v)?;
            if seg.bit_len(ver) <= ver.data_bit_capacity(ecl) {
                return Ok(ver);
            }
        }
        Err(QRError::DataTooLong)
    }

    // Absolute http(s) urls are upper cased so they can fit alphanumeric mode
    pub(crate) fn normalize_url(text: &str) -> Cow<'_, str> {
        let Some((scheme, rest)) = text.split_once("://") else {
            return Cow::Borrowed(text);
        };
        let is_http = scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https");
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if is_http && !host.is_empty() {
            Cow::Owned(text.to_uppercase())
        } else {
            Cow::Borrowed(text)
        }
    }

}
