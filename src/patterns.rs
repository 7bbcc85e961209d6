use crate::render::RenderError;
use crate::{CodeSet, START_A, START_B, START_C, STOP};

/// Run lengths of every symbol, alternating bar and space.
///
/// Rows 0 to 105 have six runs adding up to 11 modules, the seventh slot is
/// zero. The stop symbol (106) has a seventh run, its terminating bar, and
/// adds up to 13 modules.
pub(crate) static PATTERNS: [[u8; 7]; 107] = [
    [2, 1, 2, 2, 2, 2, 0],
    [2, 2, 2, 1, 2, 2, 0],
    [2, 2, 2, 2, 2, 1, 0],
    [1, 2, 1, 2, 2, 3, 0],
    [1, 2, 1, 3, 2, 2, 0],
    [1, 3, 1, 2, 2, 2, 0],
    [1, 2, 2, 2, 1, 3, 0],
    [1, 2, 2, 3, 1, 2, 0],
    [1, 3, 2, 2, 1, 2, 0],
    [2, 2, 1, 2, 1, 3, 0],
    [2, 2, 1, 3, 1, 2, 0],
    [2, 3, 1, 2, 1, 2, 0],
    [1, 1, 2, 2, 3, 2, 0],
    [1, 2, 2, 1, 3, 2, 0],
    [1, 2, 2, 2, 3, 1, 0],
    [1, 1, 3, 2, 2, 2, 0],
    [1, 2, 3, 1, 2, 2, 0],
    [1, 2, 3, 2, 2, 1, 0],
    [2, 2, 3, 2, 1, 1, 0],
    [2, 2, 1, 1, 3, 2, 0],
    [2, 2, 1, 2, 3, 1, 0],
    [2, 1, 3, 2, 1, 2, 0],
    [2, 2, 3, 1, 1, 2, 0],
    [3, 1, 2, 1, 3, 1, 0],
    [3, 1, 1, 2, 2, 2, 0],
    [3, 2, 1, 1, 2, 2, 0],
    [3, 2, 1, 2, 2, 1, 0],
    [3, 1, 2, 2, 1, 2, 0],
    [3, 2, 2, 1, 1, 2, 0],
    [3, 2, 2, 2, 1, 1, 0],
    [2, 1, 2, 1, 2, 3, 0],
    [2, 1, 2, 3, 2, 1, 0],
    [2, 3, 2, 1, 2, 1, 0],
    [1, 1, 1, 3, 2, 3, 0],
    [1, 3, 1, 1, 2, 3, 0],
    [1, 3, 1, 3, 2, 1, 0],
    [1, 1, 2, 3, 1, 3, 0],
    [1, 3, 2, 1, 1, 3, 0],
    [1, 3, 2, 3, 1, 1, 0],
    [2, 1, 1, 3, 1, 3, 0],
    [2, 3, 1, 1, 1, 3, 0],
    [2, 3, 1, 3, 1, 1, 0],
    [1, 1, 2, 1, 3, 3, 0],
    [1, 1, 2, 3, 3, 1, 0],
    [1, 3, 2, 1, 3, 1, 0],
    [1, 1, 3, 1, 2, 3, 0],
    [1, 1, 3, 3, 2, 1, 0],
    [1, 3, 3, 1, 2, 1, 0],
    [3, 1, 3, 1, 2, 1, 0],
    [2, 1, 1, 3, 3, 1, 0],
    [2, 3, 1, 1, 3, 1, 0],
    [2, 1, 3, 1, 1, 3, 0],
    [2, 1, 3, 3, 1, 1, 0],
    [2, 1, 3, 1, 3, 1, 0],
    [3, 1, 1, 1, 2, 3, 0],
    [3, 1, 1, 3, 2, 1, 0],
    [3, 3, 1, 1, 2, 1, 0],
    [3, 1, 2, 1, 1, 3, 0],
    [3, 1, 2, 3, 1, 1, 0],
    [3, 3, 2, 1, 1, 1, 0],
    [3, 1, 4, 1, 1, 1, 0],
    [2, 2, 1, 4, 1, 1, 0],
    [4, 3, 1, 1, 1, 1, 0],
    [1, 1, 1, 2, 2, 4, 0],
    [1, 1, 1, 4, 2, 2, 0],
    [1, 2, 1, 1, 2, 4, 0],
    [1, 2, 1, 4, 2, 1, 0],
    [1, 4, 1, 1, 2, 2, 0],
    [1, 4, 1, 2, 2, 1, 0],
    [1, 1, 2, 2, 1, 4, 0],
    [1, 1, 2, 4, 1, 2, 0],
    [1, 2, 2, 1, 1, 4, 0],
    [1, 2, 2, 4, 1, 1, 0],
    [1, 4, 2, 1, 1, 2, 0],
    [1, 4, 2, 2, 1, 1, 0],
    [2, 4, 1, 2, 1, 1, 0],
    [2, 2, 1, 1, 1, 4, 0],
    [4, 1, 3, 1, 1, 1, 0],
    [2, 4, 1, 1, 1, 2, 0],
    [1, 3, 4, 1, 1, 1, 0],
    [1, 1, 1, 2, 4, 2, 0],
    [1, 2, 1, 1, 4, 2, 0],
    [1, 2, 1, 2, 4, 1, 0],
    [1, 1, 4, 2, 1, 2, 0],
    [1, 2, 4, 1, 1, 2, 0],
    [1, 2, 4, 2, 1, 1, 0],
    [4, 1, 1, 2, 1, 2, 0],
    [4, 2, 1, 1, 1, 2, 0],
    [4, 2, 1, 2, 1, 1, 0],
    [2, 1, 2, 1, 4, 1, 0],
    [2, 1, 4, 1, 2, 1, 0],
    [4, 1, 2, 1, 2, 1, 0],
    [1, 1, 1, 1, 4, 3, 0],
    [1, 1, 1, 3, 4, 1, 0],
    [1, 3, 1, 1, 4, 1, 0],
    [1, 1, 4, 1, 1, 3, 0],
    [1, 1, 4, 3, 1, 1, 0],
    [4, 1, 1, 1, 1, 3, 0],
    [4, 1, 1, 3, 1, 1, 0],
    [1, 1, 3, 1, 4, 1, 0],
    [1, 1, 4, 1, 3, 1, 0],
    [3, 1, 1, 1, 4, 1, 0],
    [4, 1, 1, 1, 3, 1, 0],
    [2, 1, 1, 4, 1, 2, 0],
    [2, 1, 1, 2, 1, 4, 0],
    [2, 1, 1, 2, 3, 2, 0],
    [2, 3, 3, 1, 1, 1, 2],
];

/// Look up the run lengths of a codeword.
///
/// The returned slice alternates bar and space widths in modules, starting
/// with a bar. It has six entries for codewords 0 to 105 and seven for the
/// stop codeword, which ends on a bar.
pub fn pattern_for(codeword: u8) -> Result<&'static [u8], RenderError> {
    let row = PATTERNS
        .get(codeword as usize)
        .ok_or(RenderError::InvalidCodeword(codeword))?;
    if codeword == STOP {
        Ok(&row[..])
    } else {
        Ok(&row[..6])
    }
}

/// The start codeword announcing the given code set.
pub fn start_codeword(set: CodeSet) -> u8 {
    match set {
        CodeSet::A => START_A,
        CodeSet::B => START_B,
        CodeSet::C => START_C,
    }
}

/// The stop codeword, always the last symbol.
pub fn stop_codeword() -> u8 {
    STOP
}

#[cfg(test)]
fn runs_to_bits(runs: &[u8]) -> u16 {
    let mut bits = 0;
    for (i, run) in runs.iter().enumerate() {
        for _ in 0..*run {
            bits = (bits << 1) | (i % 2 == 0) as u16;
        }
    }
    bits
}

#[test]
fn test_pattern_sizes() {
    for codeword in 0..STOP {
        let runs = pattern_for(codeword).unwrap();
        assert_eq!(runs.len(), 6);
        assert_eq!(runs.iter().map(|r| *r as u32).sum::<u32>(), 11);
    }
    let stop = pattern_for(STOP).unwrap();
    assert_eq!(stop.len(), 7);
    assert_eq!(stop.iter().map(|r| *r as u32).sum::<u32>(), 13);
}

#[test]
fn test_patterns_match_bit_masks() {
    // the same table written as module masks, 1 = bar
    const MASKS: [u16; 107] = [
        0x6cc, 0x66c, 0x666, 0x498, 0x48c, 0x44c, 0x4c8, 0x4c4, 0x464, 0x648, 0x644, 0x624, 0x59c,
        0x4dc, 0x4ce, 0x5cc, 0x4ec, 0x4e6, 0x672, 0x65c, 0x64e, 0x6e4, 0x674, 0x76e, 0x74c, 0x72c,
        0x726, 0x764, 0x734, 0x732, 0x6d8, 0x6c6, 0x636, 0x518, 0x458, 0x446, 0x588, 0x468, 0x462,
        0x688, 0x628, 0x622, 0x5b8, 0x58e, 0x46e, 0x5d8, 0x5c6, 0x476, 0x776, 0x68e, 0x62e, 0x6e8,
        0x6e2, 0x6ee, 0x758, 0x746, 0x716, 0x768, 0x762, 0x71a, 0x77a, 0x642, 0x78a, 0x530, 0x50c,
        0x4b0, 0x486, 0x42c, 0x426, 0x590, 0x584, 0x4d0, 0x4c2, 0x434, 0x432, 0x612, 0x650, 0x7ba,
        0x614, 0x47a, 0x53c, 0x4bc, 0x49e, 0x5e4, 0x4f4, 0x4f2, 0x7a4, 0x794, 0x792, 0x6de, 0x6f6,
        0x7b6, 0x578, 0x51e, 0x45e, 0x5e8, 0x5e2, 0x7a8, 0x7a2, 0x5de, 0x5ee, 0x75e, 0x7ae, 0x684,
        0x690, 0x69c, 0x18eb,
    ];
    for (codeword, mask) in MASKS.iter().enumerate() {
        let runs = pattern_for(codeword as u8).unwrap();
        assert_eq!(runs_to_bits(runs), *mask, "codeword {}", codeword);
    }
}

#[test]
fn test_patterns_distinct() {
    for i in 0..PATTERNS.len() {
        for j in (i + 1)..PATTERNS.len() {
            assert_ne!(PATTERNS[i], PATTERNS[j]);
        }
    }
}

#[test]
fn test_invalid_codeword() {
    assert_eq!(pattern_for(107), Err(RenderError::InvalidCodeword(107)));
    assert_eq!(pattern_for(255), Err(RenderError::InvalidCodeword(255)));
}

#[test]
fn test_start_stop() {
    assert_eq!(start_codeword(CodeSet::A), 103);
    assert_eq!(start_codeword(CodeSet::B), 104);
    assert_eq!(start_codeword(CodeSet::C), 105);
    assert_eq!(stop_codeword(), 106);
}
