//! This crate encodes ASCII text as Code 128 linear barcodes.
//!
//! Encoding happens in two steps. First the text is turned into a sequence
//! of codewords, switching between the three code sets A, B, and C while
//! scanning with a small look-ahead. Then the codewords are mapped to bar
//! and space widths which can be drawn at any stroke width.
//!
//! ## Example
//!
//! ```rust
//! use code128_content::{Code128, RenderOptions};
//!
//! let code = Code128::encode(b"BarCode 1").unwrap();
//! assert_eq!(
//!     code.codewords(),
//!     &[104, 34, 65, 82, 35, 79, 68, 69, 0, 17, 33, 106],
//! );
//!
//! let rendering = code.render(&RenderOptions::default().with_stroke_width(2)).unwrap();
//! assert_eq!(rendering.width(), ((12 - 3) * 11 + 35) * 2);
//! ```
//! To draw the result check out the [Rendering] documentation.
//!
//! ## Charsets
//!
//! Only ASCII, `0x00` to `0x7F`, can be encoded. The control characters
//! `0x00` to `0x1F` are only available in code set A, the lower case letters
//! and `` ` { | } ~ `` plus DEL only in code set B. Everything in between is
//! shared by both. Runs of decimal digits are packed two per codeword in
//! code set C.
//!
//! The function codes FNC1 to FNC4 are not supported.
#![no_std]

#[cfg(not(feature = "std"))]
extern crate alloc as std;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
use std::vec;
use std::vec::Vec;

mod content;
mod encode;
mod patterns;
mod render;
#[cfg(feature = "unicode")]
mod unicode;

pub use content::EncodingError;
pub use encode::{code_value_for_char, codes_for_char, CodeSetAllowed, EncoderStep, LookAhead};
pub use patterns::{pattern_for, start_codeword, stop_codeword};
pub use render::{
    render, Bar, BarCoordinate, Height, RenderError, RenderOptions, Rendering,
    QUIET_ZONE_MODULES,
};

#[cfg(feature = "unicode")]
pub use unicode::bars_to_blocks;

const SHIFT: u8 = 98;
const SWITCH_C: u8 = 99;
const SWITCH_B: u8 = 100;
const SWITCH_A: u8 = 101;
const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 106;

/// Weighted sum modulo 103.
///
/// The start symbol has weight one, every following symbol its position.
fn checksum(symbols: impl Iterator<Item = u8>) -> u8 {
    (symbols
        .enumerate()
        .map(|(i, idx)| (i.max(1) as u64) * idx as u64)
        .sum::<u64>()
        % 103) as u8
}

/// One of the three code sets of Code 128.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CodeSet {
    /// Control characters, punctuation, digits and upper case letters.
    A,
    /// Punctuation, digits, upper and lower case letters.
    B,
    /// Pairs of decimal digits, one codeword per pair.
    C,
}

/// A Code 128 as a sequence of codewords.
///
/// The sequence always has the shape `[start, data..., checksum, stop]`
/// where the data part may contain shift and code set switch codewords.
/// Use [`render()`](Self::render) to get the bar widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128 {
    codewords: Vec<u8>,
}

impl Code128 {
    /// Encode the bytes as Code 128.
    ///
    /// Fails if a byte is outside of ASCII. No partial result is produced.
    pub fn encode(data: &[u8]) -> Result<Self, EncodingError> {
        content::encode_codewords(data).map(|codewords| Self { codewords })
    }

    /// Encode the string as Code 128.
    ///
    /// Fails on the first character outside of ASCII, reporting its position
    /// counted in characters.
    pub fn encode_str(text: &str) -> Result<Self, EncodingError> {
        if let Some((position, ch)) = text.chars().enumerate().find(|(_, ch)| !ch.is_ascii()) {
            return Err(EncodingError::InvalidCharacter {
                position,
                value: ch as u32,
            });
        }
        Self::encode(text.as_bytes())
    }

    /// All codewords, including start, checksum, and stop.
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// The code set announced by the start codeword.
    pub fn start_set(&self) -> CodeSet {
        match self.codewords[0] {
            START_A => CodeSet::A,
            START_B => CodeSet::B,
            _ => CodeSet::C,
        }
    }

    /// The check symbol, second to last in the sequence.
    pub fn checksum(&self) -> u8 {
        self.codewords[self.codewords.len() - 2]
    }

    /// Number of codewords, including start, checksum, and stop.
    pub fn len(&self) -> usize {
        self.codewords.len()
    }

    /// Whether this Code 128 encodes empty data.
    pub fn is_empty(&self) -> bool {
        self.codewords.len() == 3
    }

    /// Compute the bars of this code.
    ///
    /// Since the codewords are known to be valid this only fails for a
    /// stroke width of zero or one so large the total width overflows.
    pub fn render(&self, options: &RenderOptions) -> Result<Rendering, RenderError> {
        render::render(&self.codewords, options)
    }
}

impl AsRef<[u8]> for Code128 {
    fn as_ref(&self) -> &[u8] {
        &self.codewords
    }
}

/// Reads the data back from the codewords, used to check encodings.
#[cfg(test)]
fn decode_codewords(codewords: &[u8]) -> Vec<u8> {
    let (start, rest) = codewords.split_first().unwrap();
    let data = &rest[..rest.len() - 2];
    let mut set = match *start {
        START_A => CodeSet::A,
        START_B => CodeSet::B,
        START_C => CodeSet::C,
        _ => panic!("no start symbol"),
    };
    let mut out = Vec::new();
    let mut shifted = false;
    for &cw in data {
        let active = match (set, shifted) {
            (CodeSet::A, true) => CodeSet::B,
            (CodeSet::B, true) => CodeSet::A,
            (set, _) => set,
        };
        match (active, cw) {
            (CodeSet::A | CodeSet::B, SHIFT) => {
                shifted = true;
                continue;
            }
            (_, SWITCH_A) => set = CodeSet::A,
            (_, SWITCH_B) => set = CodeSet::B,
            (CodeSet::A | CodeSet::B, SWITCH_C) => set = CodeSet::C,
            (CodeSet::A, 0..=63) => out.push(cw + b' '),
            (CodeSet::A, 64..=95) => out.push(cw - 64),
            (CodeSet::B, 0..=95) => out.push(cw + b' '),
            (CodeSet::C, 0..=99) => {
                out.push(cw / 10 + b'0');
                out.push(cw % 10 + b'0');
            }
            (set, cw) => panic!("unexpected codeword {} in {:?}", cw, set),
        }
        shifted = false;
    }
    out
}

#[cfg(test)]
use pretty_assertions::assert_eq;

#[test]
fn test_full_string() {
    let code = Code128::encode(b"BarCode 1").unwrap();
    assert_eq!(
        code.codewords(),
        &[104, 34, 65, 82, 35, 79, 68, 69, 0, 17, 33, 106]
    );
    assert_eq!(code.start_set(), CodeSet::B);
    assert_eq!(code.checksum(), 33);
}

#[test]
fn test_checksum_weights() {
    // start counts once, then every symbol with its position
    assert_eq!(checksum([104, 34, 65].into_iter()), ((104 + 34 + 2 * 65) % 103) as u8);
    assert_eq!(checksum([105].into_iter()), 2);
}

#[test]
fn test_checksum_property() {
    let messages: [&[u8]; 6] = [
        b"",
        b"BarCode 1",
        b"\x01\x02ab\x03",
        b"123456",
        b"abc1234567XYZ\x1f",
        b"\x11S12345",
    ];
    for msg in messages {
        let code = Code128::encode(msg).unwrap();
        let cw = code.codewords();
        let n = cw.len();
        let expected = (cw[0] as u32
            + (1..n - 2).map(|i| i as u32 * cw[i] as u32).sum::<u32>())
            % 103;
        assert_eq!(code.checksum() as u32, expected);
        assert!(code.checksum() <= 102);
        assert_eq!(cw[n - 1], STOP);
        assert!([START_A, START_B, START_C].contains(&cw[0]));
    }
}

#[test]
fn test_is_empty() {
    let code = Code128::encode(b"").unwrap();
    assert!(code.is_empty());
    assert_eq!(code.len(), 3);
    assert_eq!(code.start_set(), CodeSet::B);
    assert_eq!(code.codewords(), &[START_B, START_B % 103, STOP]);
    assert!(!Code128::encode(b".").unwrap().is_empty());
}

#[test]
fn test_all_ascii_round_trip() {
    for x in 0..=127u8 {
        let code = Code128::encode(&[x]).unwrap();
        assert_eq!(decode_codewords(code.codewords()), vec![x]);
        for y in [0u8, b'0', b'A', b'a', 127] {
            let msg = [y, x, y];
            let code = Code128::encode(&msg).unwrap();
            assert_eq!(decode_codewords(code.codewords()), msg.to_vec());
        }
    }
}

#[test]
fn test_pseudo_random_round_trip() {
    // small LCG, enough to mix digits, control characters and letters
    let mut state: u32 = 0x2545_f491;
    let mut next = move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (state >> 16) as u8
    };
    for _ in 0..500 {
        let len = next() as usize % 24;
        let msg: Vec<u8> = (0..len)
            .map(|_| match next() % 4 {
                0 | 1 => b'0' + next() % 10,
                2 => next() % 32,
                _ => next() % 128,
            })
            .collect();
        let code = Code128::encode(&msg).unwrap();
        assert_eq!(decode_codewords(code.codewords()), msg);
    }
}

#[test]
fn test_encode_str() {
    let code = Code128::encode_str("BarCode 1").unwrap();
    assert_eq!(code, Code128::encode(b"BarCode 1").unwrap());
    assert_eq!(
        Code128::encode_str("Füße"),
        Err(EncodingError::InvalidCharacter {
            position: 1,
            value: 'ü' as u32
        })
    );
}

#[test]
fn test_rejects_high_bytes() {
    assert_eq!(
        Code128::encode(b"ab\x80"),
        Err(EncodingError::InvalidCharacter {
            position: 2,
            value: 0x80
        })
    );
}

#[test]
fn test_code_width() {
    let code = Code128::encode(b"foo").unwrap();
    let rendering = code.render(&RenderOptions::default()).unwrap();
    let size = rendering
        .bars()
        .iter()
        .map(|bar| bar.width + bar.space)
        .sum::<u32>();
    assert_eq!(rendering.width(), size);
    assert_eq!(size as usize, (code.len() - 3) * 11 + 35);
}
