use arrayvec::ArrayVec;

use super::{CodeSet, SHIFT, SWITCH_A, SWITCH_B, SWITCH_C};

/// Characters visible to the encoder at each step, the current one included.
pub(crate) const LOOK_AHEAD: usize = 6;

/// Which code sets can represent a single character without help.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CodeSetAllowed {
    /// Control characters `0x00` to `0x1F`.
    A,
    /// Lower case letters and friends, `0x60` to `0x7F`.
    B,
    /// A decimal digit.
    ///
    /// It can be encoded in A or B on its own, and in C together with a
    /// neighboring digit.
    C,
    /// Space, punctuation and upper case letters other than digits.
    AorB,
    /// No character at all, which fits everywhere.
    AorBorC,
}

impl CodeSetAllowed {
    /// Classify an ASCII character.
    pub fn for_char(ch: u8) -> Self {
        match ch {
            b'0'..=b'9' => Self::C,
            0..=31 => Self::A,
            32..=95 => Self::AorB,
            _ => Self::B,
        }
    }

    /// Classify a look-ahead slot, `None` is past the end of the data.
    pub fn for_slot(slot: Option<u8>) -> Self {
        slot.map_or(Self::AorBorC, Self::for_char)
    }

    /// Whether a single character of this class can be written in `set`.
    ///
    /// Code set C never holds a single character, so only the absent
    /// character is compatible with it.
    pub fn is_compatible(self, set: CodeSet) -> bool {
        match self {
            Self::A => set == CodeSet::A,
            Self::B => set == CodeSet::B,
            Self::C | Self::AorB => set != CodeSet::C,
            Self::AorBorC => true,
        }
    }
}

/// The symbol value of a character in code set A or B.
///
/// Printable characters start at zero, control characters are folded to
/// 64 and above.
#[inline]
pub fn code_value_for_char(ch: u8) -> u8 {
    if ch >= b' ' {
        ch - b' '
    } else {
        ch + 64
    }
}

/// A fixed window over the data starting at the character to encode.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LookAhead {
    current: u8,
    next: [Option<u8>; LOOK_AHEAD - 1],
}

impl LookAhead {
    /// Take a window from the start of `data`, `None` if it is empty.
    pub fn new(data: &[u8]) -> Option<Self> {
        let (&current, rest) = data.split_first()?;
        let mut next = [None; LOOK_AHEAD - 1];
        for (slot, ch) in next.iter_mut().zip(rest) {
            *slot = Some(*ch);
        }
        Some(Self { current, next })
    }

    /// The character to encode.
    #[inline]
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Character at offset `i`, where zero is the current one.
    #[inline]
    pub fn get(&self, i: usize) -> Option<u8> {
        match i {
            0 => Some(self.current),
            i => self.next.get(i - 1).copied().flatten(),
        }
    }

    #[inline]
    fn is_digit(&self, i: usize) -> bool {
        self.get(i).is_some_and(|ch| ch.is_ascii_digit())
    }

    /// Whether to enter code set C at this position.
    ///
    /// Four digits must follow, but not when the data ends after an odd
    /// fifth one. That digit is better written before the switch.
    fn starts_c_run(&self) -> bool {
        (0..4).all(|i| self.is_digit(i)) && !(self.is_digit(4) && self.get(5).is_none())
    }

    /// Whether code set C, already active, can take the next two characters.
    fn continues_c_run(&self) -> bool {
        self.is_digit(0) && self.is_digit(1)
    }
}

/// Output of a single encoder step.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EncoderStep {
    /// The codewords to append, a data value possibly preceded by a shift
    /// or a code set switch.
    pub codewords: ArrayVec<u8, 2>,
    /// The code set in effect after this step.
    pub code_set: CodeSet,
    /// Number of characters encoded, two for a digit pair in C.
    pub consumed: usize,
}

fn switch_to(set: CodeSet) -> u8 {
    match set {
        CodeSet::A => SWITCH_A,
        CodeSet::B => SWITCH_B,
        CodeSet::C => SWITCH_C,
    }
}

/// Pick the set to continue with after a run in code set C.
///
/// A or B only if the character needs it, otherwise the character after it
/// decides. Ties go to B.
fn leave_c(window: &LookAhead) -> CodeSet {
    match CodeSetAllowed::for_char(window.current()) {
        CodeSetAllowed::A => CodeSet::A,
        CodeSetAllowed::B => CodeSet::B,
        _ => match CodeSetAllowed::for_slot(window.get(1)) {
            CodeSetAllowed::A => CodeSet::A,
            _ => CodeSet::B,
        },
    }
}

/// Encode the character at the start of `window` given the current code set.
///
/// Digit runs go to code set C first. Otherwise a character the current set
/// can not hold is either shifted, affecting only itself, or triggers a
/// permanent switch when the following character needs the other set too.
pub fn codes_for_char(window: &LookAhead, current: CodeSet) -> EncoderStep {
    let mut codewords = ArrayVec::new();

    if current == CodeSet::C {
        if window.continues_c_run() {
            codewords.push(digit_pair(window));
            return EncoderStep {
                codewords,
                code_set: CodeSet::C,
                consumed: 2,
            };
        }
        let next = leave_c(window);
        codewords.push(switch_to(next));
        codewords.push(code_value_for_char(window.current()));
        return EncoderStep {
            codewords,
            code_set: next,
            consumed: 1,
        };
    }

    if window.starts_c_run() {
        codewords.push(SWITCH_C);
        codewords.push(digit_pair(window));
        return EncoderStep {
            codewords,
            code_set: CodeSet::C,
            consumed: 2,
        };
    }

    let ch = window.current();
    let mut code_set = current;
    if !CodeSetAllowed::for_char(ch).is_compatible(current) {
        let next_fits = window
            .get(1)
            .map_or(true, |next| CodeSetAllowed::for_char(next).is_compatible(current));
        if next_fits {
            codewords.push(SHIFT);
        } else {
            code_set = match current {
                CodeSet::A => CodeSet::B,
                _ => CodeSet::A,
            };
            codewords.push(switch_to(code_set));
        }
    }
    codewords.push(code_value_for_char(ch));
    EncoderStep {
        codewords,
        code_set,
        consumed: 1,
    }
}

#[inline]
fn digit_pair(window: &LookAhead) -> u8 {
    let (c1, c2) = (window.current(), window.get(1).unwrap_or(b'0'));
    (c1 - b'0') * 10 + (c2 - b'0')
}

#[cfg(test)]
use crate::std::{vec, vec::Vec};

#[cfg(test)]
use pretty_assertions::assert_eq;

#[cfg(test)]
fn step(data: &[u8], current: CodeSet) -> (Vec<u8>, CodeSet, usize) {
    let step = codes_for_char(&LookAhead::new(data).unwrap(), current);
    (step.codewords.to_vec(), step.code_set, step.consumed)
}

#[test]
fn test_char_ranges() {
    assert_eq!(CodeSetAllowed::for_char(66), CodeSetAllowed::AorB);
    assert_eq!(CodeSetAllowed::for_char(17), CodeSetAllowed::A);
    assert_eq!(CodeSetAllowed::for_char(110), CodeSetAllowed::B);
    assert_eq!(CodeSetAllowed::for_char(b'7'), CodeSetAllowed::C);
    assert_eq!(CodeSetAllowed::for_char(127), CodeSetAllowed::B);
    assert_eq!(CodeSetAllowed::for_slot(None), CodeSetAllowed::AorBorC);
}

#[test]
fn test_compatibility() {
    assert!(CodeSetAllowed::for_char(66).is_compatible(CodeSet::A));
    assert!(CodeSetAllowed::for_char(66).is_compatible(CodeSet::B));
    assert!(CodeSetAllowed::for_char(17).is_compatible(CodeSet::A));
    assert!(!CodeSetAllowed::for_char(17).is_compatible(CodeSet::B));
    assert!(!CodeSetAllowed::for_char(110).is_compatible(CodeSet::A));
    assert!(CodeSetAllowed::for_char(110).is_compatible(CodeSet::B));
    assert!(CodeSetAllowed::for_char(b'5').is_compatible(CodeSet::A));
    assert!(!CodeSetAllowed::for_char(b'5').is_compatible(CodeSet::C));
}

#[test]
fn test_every_char_fits_a_or_b() {
    for ch in 0..=127 {
        let class = CodeSetAllowed::for_char(ch);
        assert!(class.is_compatible(CodeSet::A) || class.is_compatible(CodeSet::B));
    }
}

#[test]
fn test_code_values() {
    assert_eq!(code_value_for_char(32), 0);
    assert_eq!(code_value_for_char(63), 31);
    assert_eq!(code_value_for_char(64), 32);
    assert_eq!(code_value_for_char(95), 63);
    assert_eq!(code_value_for_char(96), 64);
    assert_eq!(code_value_for_char(0), 64);
    assert_eq!(code_value_for_char(31), 95);
    assert_eq!(code_value_for_char(127), 95);
}

#[test]
fn test_look_ahead_padding() {
    let window = LookAhead::new(b"ab").unwrap();
    assert_eq!(window.current(), b'a');
    assert_eq!(window.get(1), Some(b'b'));
    assert_eq!(window.get(2), None);
    assert_eq!(window.get(LOOK_AHEAD), None);
    assert_eq!(LookAhead::new(b""), None);

    let window = LookAhead::new(b"0123456789").unwrap();
    assert_eq!(window.get(5), Some(b'5'));
    assert_eq!(window.get(6), None);
}

#[test]
fn test_in_set_characters() {
    // "B" and "^A" in A, "B" and "n" in B, whatever follows
    let nexts: [&[u8]; 4] = [b"B", b"\x01", b"n", b""];
    for next in nexts {
        let mut data = vec![66];
        data.extend_from_slice(next);
        assert_eq!(step(&data, CodeSet::A), (vec![34], CodeSet::A, 1));
        assert_eq!(step(&data, CodeSet::B), (vec![34], CodeSet::B, 1));

        let mut data = vec![1];
        data.extend_from_slice(next);
        assert_eq!(step(&data, CodeSet::A), (vec![65], CodeSet::A, 1));

        let mut data = vec![110];
        data.extend_from_slice(next);
        assert_eq!(step(&data, CodeSet::B), (vec![78], CodeSet::B, 1));
    }
}

#[test]
fn test_shift() {
    // next character fits the current set, or there is none
    assert_eq!(step(b"nB", CodeSet::A), (vec![SHIFT, 78], CodeSet::A, 1));
    assert_eq!(step(b"n\x01", CodeSet::A), (vec![SHIFT, 78], CodeSet::A, 1));
    assert_eq!(step(b"n", CodeSet::A), (vec![SHIFT, 78], CodeSet::A, 1));
    assert_eq!(step(b"\x01B", CodeSet::B), (vec![SHIFT, 65], CodeSet::B, 1));
    assert_eq!(step(b"\x01n", CodeSet::B), (vec![SHIFT, 65], CodeSet::B, 1));
    assert_eq!(step(b"\x01", CodeSet::B), (vec![SHIFT, 65], CodeSet::B, 1));
}

#[test]
fn test_switch() {
    assert_eq!(step(b"nn", CodeSet::A), (vec![SWITCH_B, 78], CodeSet::B, 1));
    assert_eq!(step(b"\x01\x01", CodeSet::B), (vec![SWITCH_A, 65], CodeSet::A, 1));
}

#[test]
fn test_enter_c() {
    assert_eq!(step(b"1234", CodeSet::B), (vec![SWITCH_C, 12], CodeSet::C, 2));
    assert_eq!(step(b"123456x", CodeSet::A), (vec![SWITCH_C, 12], CodeSet::C, 2));
    assert_eq!(step(b"1234x", CodeSet::B), (vec![SWITCH_C, 12], CodeSet::C, 2));
    assert_eq!(step(b"123456", CodeSet::B), (vec![SWITCH_C, 12], CodeSet::C, 2));
    // five trailing digits, the first one goes out before the switch
    assert_eq!(step(b"12345", CodeSet::B), (vec![17], CodeSet::B, 1));
    assert_eq!(step(b"2345", CodeSet::B), (vec![SWITCH_C, 23], CodeSet::C, 2));
    // too few digits
    assert_eq!(step(b"123", CodeSet::B), (vec![17], CodeSet::B, 1));
    assert_eq!(step(b"123x56", CodeSet::A), (vec![17], CodeSet::A, 1));
}

#[test]
fn test_stay_in_c() {
    assert_eq!(step(b"99", CodeSet::C), (vec![99], CodeSet::C, 2));
    assert_eq!(step(b"05x", CodeSet::C), (vec![5], CodeSet::C, 2));
}

#[test]
fn test_leave_c() {
    assert_eq!(step(b"5", CodeSet::C), (vec![SWITCH_B, 21], CodeSet::B, 1));
    assert_eq!(step(b"5\x01", CodeSet::C), (vec![SWITCH_A, 21], CodeSet::A, 1));
    assert_eq!(step(b"\x01a", CodeSet::C), (vec![SWITCH_A, 65], CodeSet::A, 1));
    assert_eq!(step(b"aB", CodeSet::C), (vec![SWITCH_B, 65], CodeSet::B, 1));
    assert_eq!(step(b"BB", CodeSet::C), (vec![SWITCH_B, 34], CodeSet::B, 1));
}
