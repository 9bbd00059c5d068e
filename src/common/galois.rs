use std::borrow::Cow;
use std::ops::{Add, AddAssign, Mul, MulAssign};
use std::sync::OnceLock;

use super::error::{QRError, QRResult};

// Galois field element
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct G(pub u8);

impl G {
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> usize {
        debug_assert!(self.0 != 0, "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }

    pub fn div(self, rhs: Self) -> QRResult<Self> {
        if rhs.0 == 0 {
            return Err(QRError::DivisionByZero);
        }
        if self.0 == 0 {
            return Ok(Self(0));
        }
        Ok(Self(EXP_TABLE[(self.log() + 255 - rhs.log()) % 255]))
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

// Addition and subtraction are both XOR in GF(2^8)
impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        Self(EXP_TABLE[(self.log() + rhs.log()) % 255])
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}


// Polynomial arithmetic
//------------------------------------------------------------------------------

// Coefficients are ordered from the highest degree term to the constant term
pub fn poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
    if p.is_empty() || q.is_empty() {
        return Vec::new();
    }
    let mut res = vec![G(0); p.len() + q.len() - 1];
    for (i, &a) in p.iter().enumerate() {
        for (j, &b) in q.iter().enumerate() {
            res[i + j] += G(a) * G(b);
        }
    }
    res.into_iter().map(u8::from).collect()
}

// Synthetic long division, returns a remainder of exactly divisor.len() - 1 terms
pub fn poly_rem(dividend: &[u8], divisor: &[u8]) -> QRResult<Vec<u8>> {
    debug_assert!(!divisor.is_empty(), "Divisor polynomial is empty");

    let n = divisor.len();
    let rem_len = n - 1;
    let lead_div = G(divisor[0]);

    let mut res = dividend.to_vec();
    let mut start = 0;
    while res.len() - start >= n {
        let lead = G(res[start]);
        if lead.0 != 0 {
            let factor = lead.div(lead_div)?;
            for (r, &d) in res[start..start + n].iter_mut().zip(divisor) {
                *r = (G(*r) + factor * G(d)).into();
            }
        }
        start += 1;
    }

    let tail = &res[start..];
    let mut rem = vec![0; rem_len - tail.len().min(rem_len)];
    rem.extend_from_slice(tail);
    Ok(rem)
}


// Reed-Solomon
//------------------------------------------------------------------------------

pub fn generator_poly(degree: usize) -> Cow<'static, [u8]> {
    if degree <= MAX_EC_SIZE {
        let cache = GENERATOR_POLYNOMIALS.get_or_init(|| {
            let mut polys = Vec::with_capacity(MAX_EC_SIZE + 1);
            polys.push(vec![1]);
            for k in 0..MAX_EC_SIZE {
                let next = poly_mul(&polys[k], &[1, EXP_TABLE[k]]);
                polys.push(next);
            }
            polys
        });
        return Cow::Borrowed(&cache[degree]);
    }
    Cow::Owned(build_generator_poly(degree))
}

fn build_generator_poly(degree: usize) -> Vec<u8> {
    (0..degree).fold(vec![1], |acc, k| poly_mul(&acc, &[1, G::gen_pow(k).0]))
}

// Error correction codewords for a single block of `total` codewords
pub fn ecc(data: &[u8], total: usize) -> QRResult<Vec<u8>> {
    debug_assert!(total >= data.len(), "Block is shorter than its data: {total}");

    let degree = total - data.len();
    let gen_poly = generator_poly(degree);
    let mut msg = data.to_vec();
    msg.resize(total, 0);
    poly_rem(&msg, &gen_poly)
}


// Global constants
//------------------------------------------------------------------------------

// x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut v: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = v as u8;
        log[v as usize] = i as u8;
        v <<= 1;
        if v > 0xFF {
            v ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    exp[255] = 1;
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

pub static EXP_TABLE: [u8; 256] = TABLES.0;

pub static LOG_TABLE: [u8; 256] = TABLES.1;

pub const MAX_EC_SIZE: usize = 64;

static GENERATOR_POLYNOMIALS: OnceLock<Vec<Vec<u8>>> = OnceLock::new();
