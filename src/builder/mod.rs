mod ec;
mod qr;

pub use qr::{Module, QR};

use crate::common::{
    codec::encode,
    debug::debug_log,
    error::QRResult,
    iter::build_sequence,
    mask::{select_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let mask = match self.mask {
            Some(m) => format!("{}", *m),
            None => "Auto".to_string(),
        };
        match self.version {
            Some(v) => format!("{{ Version: {}, Ec level: {:?}, Mask: {mask} }}", *v, self.ec_level),
            None => format!("{{ Version: None, Ec level: {:?}, Mask: {mask} }}", self.ec_level),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug_log!("Generating QR {}", self.metadata());

        let (data, version) = encode(self.text, self.ec_level, self.version)?;
        debug_log!("Packed {} data codewords into version {}", data.len(), *version);

        let codewords = ec::build_final_codewords(&data, version, self.ec_level)?;
        debug_log!("Interleaved {} codewords with ecc", codewords.len());

        let mut base = QR::new(version, self.ec_level);
        base.draw_all_function_patterns();
        base.draw_version_info()?;

        let seq = build_sequence(version);
        let qr = match self.mask {
            Some(m) => {
                debug_log!("Applying forced mask {}", *m);
                let mut qr = base;
                qr.draw_codewords(&codewords, &seq, m)?;
                qr
            }
            None => select_best_mask(&base, &codewords, &seq)?,
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug_log!("Report: {}", qr.metadata());
        debug_log!(
            "Data capacity: {}, Error capacity: {}",
            version.data_codewords(self.ec_level),
            Self::ec_capacity(version, self.ec_level)
        );
        debug_log!(
            "Dark cells: {}, Light cells: {}, Balance: {}%",
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }

    pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
        ec::ec_capacity(version, ec_level)
    }
}
