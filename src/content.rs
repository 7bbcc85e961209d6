use crate::std::vec::Vec;

#[cfg(feature = "std")]
use thiserror::Error;

use crate::encode::{codes_for_char, CodeSetAllowed, LookAhead};
use crate::patterns::{start_codeword, stop_codeword};
use crate::CodeSet;

/// Errors that can occur during encoding.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum EncodingError {
    /// A character outside of ASCII was given.
    #[cfg_attr(
        feature = "std",
        error("character {value:#x} at position {position} is not ASCII")
    )]
    InvalidCharacter {
        /// Position in the input.
        position: usize,
        /// The rejected byte or Unicode scalar value.
        value: u32,
    },
}

/// Characters considered when choosing the start code set.
const START_VOTES: usize = 4;

/// Choose the code set to start with from the first characters.
///
/// Characters needing A count for A, characters needing B against it.
/// Four leading digits, or data consisting of exactly two digits, start in C.
/// Ties go to B.
pub(crate) fn best_start_set(data: &[u8]) -> CodeSet {
    let mut vote = 0i32;
    let mut vote_c = 0;
    for i in 0..START_VOTES {
        match CodeSetAllowed::for_slot(data.get(i).copied()) {
            CodeSetAllowed::A => vote += 1,
            CodeSetAllowed::B => vote -= 1,
            CodeSetAllowed::C => vote_c += 1,
            CodeSetAllowed::AorB | CodeSetAllowed::AorBorC => (),
        }
    }
    if vote_c == START_VOTES || (vote_c == 2 && data.len() == 2) {
        CodeSet::C
    } else if vote > 0 {
        CodeSet::A
    } else {
        CodeSet::B
    }
}

/// Encode the data as codewords, start, checksum and stop included.
pub(crate) fn encode_codewords(data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    if let Some(position) = data.iter().position(|ch| !ch.is_ascii()) {
        return Err(EncodingError::InvalidCharacter {
            position,
            value: data[position] as u32,
        });
    }

    let mut code_set = best_start_set(data);
    // assume no code set changes
    let mut codewords = Vec::with_capacity(data.len() + 3);
    codewords.push(start_codeword(code_set));

    let mut rest = data;
    while let Some(window) = LookAhead::new(rest) {
        let step = codes_for_char(&window, code_set);
        codewords.extend_from_slice(&step.codewords);
        code_set = step.code_set;
        rest = &rest[step.consumed..];
    }

    codewords.push(crate::checksum(codewords.iter().cloned()));
    codewords.push(stop_codeword());
    Ok(codewords)
}

#[cfg(test)]
use crate::std::vec;

#[cfg(test)]
use crate::{SHIFT, START_A, START_B, START_C, STOP, SWITCH_A, SWITCH_B, SWITCH_C};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Codewords between start and checksum.
#[cfg(test)]
fn data_codewords(data: &[u8]) -> Vec<u8> {
    let codewords = encode_codewords(data).unwrap();
    codewords[1..codewords.len() - 2].to_vec()
}

#[test]
fn test_start_votes() {
    assert_eq!(best_start_set(b""), CodeSet::B);
    assert_eq!(best_start_set(b"BB"), CodeSet::B);
    assert_eq!(best_start_set(b"\x01B"), CodeSet::A);
    assert_eq!(best_start_set(b"\x01a"), CodeSet::B);
    assert_eq!(best_start_set(b"\x01\x02a"), CodeSet::A);
    assert_eq!(best_start_set(b"ab\x01\x02"), CodeSet::B);
    assert_eq!(best_start_set(b"1234"), CodeSet::C);
    assert_eq!(best_start_set(b"1234abc"), CodeSet::C);
    assert_eq!(best_start_set(b"12"), CodeSet::C);
    assert_eq!(best_start_set(b"123"), CodeSet::B);
    assert_eq!(best_start_set(b"12AB"), CodeSet::B);
    assert_eq!(best_start_set(b"1\x01"), CodeSet::A);
    // characters past the fourth do not count
    assert_eq!(best_start_set(b"ABCD\x01\x02"), CodeSet::B);
}

#[test]
fn test_empty() {
    assert_eq!(encode_codewords(b"").unwrap(), vec![START_B, 1, STOP]);
}

#[test]
fn test_bar_code_1() {
    assert_eq!(
        encode_codewords(b"BarCode 1").unwrap(),
        vec![104, 34, 65, 82, 35, 79, 68, 69, 0, 17, 33, 106]
    );
}

#[test]
fn test_digit_start() {
    assert_eq!(
        encode_codewords(b"123456").unwrap(),
        vec![START_C, 12, 34, 56, ((105 + 12 + 2 * 34 + 3 * 56) % 103) as u8, STOP]
    );
    assert_eq!(data_codewords(b"12"), vec![12]);
    assert_eq!(data_codewords(b"1234567"), vec![12, 34, 56, SWITCH_B, b'7' - b' ']);
    assert_eq!(data_codewords(b"123"), vec![17, 18, 19]);
}

#[test]
fn test_digits_inside() {
    assert_eq!(
        data_codewords(b"ab1234cd"),
        vec![65, 66, SWITCH_C, 12, 34, SWITCH_B, 67, 68]
    );
    // odd run at the end, the first digit stays in B
    assert_eq!(
        data_codewords(b"x12345"),
        vec![88, 17, SWITCH_C, 23, 45]
    );
    assert_eq!(data_codewords(b"\x11S12345"), vec![81, 51, 17, SWITCH_C, 23, 45]);
    assert_eq!(encode_codewords(b"\x11S12345").unwrap()[0], START_A);
}

#[test]
fn test_shift_in_a_run() {
    assert_eq!(
        data_codewords(b"\x01\x02a\x03\x04"),
        vec![65, 66, SHIFT, 65, 67, 68]
    );
    assert_eq!(data_codewords(b"abc\x01d"), vec![65, 66, 67, SHIFT, 65, 68]);
}

#[test]
fn test_switch_instead_of_shift() {
    assert_eq!(encode_codewords(b"\x01\x02\x03ab").unwrap()[0], START_A);
    assert_eq!(
        data_codewords(b"\x01\x02\x03ab"),
        vec![65, 66, 67, SWITCH_B, 65, 66]
    );
    assert_eq!(
        data_codewords(b"ab\x01\x02cd"),
        vec![65, 66, SWITCH_A, 65, 66, SWITCH_B, 67, 68]
    );
    // a lone trailing character is shifted
    assert_eq!(
        data_codewords(b"ab\x01\x02c"),
        vec![65, 66, SWITCH_A, 65, 66, SHIFT, 67]
    );
}

#[test]
fn test_leave_c_for_a() {
    assert_eq!(
        data_codewords(b"1234\x01\x02"),
        vec![12, 34, SWITCH_A, 65, 66]
    );
}

#[test]
fn test_rejects_before_encoding() {
    assert_eq!(
        encode_codewords(b"abc\xff"),
        Err(EncodingError::InvalidCharacter {
            position: 3,
            value: 0xff
        })
    );
}
