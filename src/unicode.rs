use crate::std::string::String;
use crate::std::vec::Vec;

use crate::Rendering;

struct Buffer(String, Vec<bool>);

impl Buffer {
    fn new() -> Self {
        Self(String::new(), Vec::with_capacity(2))
    }

    fn push(&mut self, bar: bool) {
        self.1.push(bar);
        if self.1.len() == 2 {
            match (self.1[0], self.1[1]) {
                (true, true) => self.0.push('█'),
                (true, false) => self.0.push('▌'),
                (false, true) => self.0.push('▐'),
                (false, false) => self.0.push(' '),
            }
            self.1.clear();
        }
    }

    fn push_n(&mut self, bar: bool, n: u32) {
        for _ in 0..n {
            self.push(bar);
        }
    }

    fn into_string(mut self) -> String {
        if !self.1.is_empty() {
            self.push(false);
        }
        self.0
    }
}

/// Create a string representation of the bars using Unicode block characters.
///
/// Every character covers two units of width. The quiet zones of the
/// rendering are included.
///
/// ## Example
/// ```
/// # use code128_content::{Code128, RenderOptions, bars_to_blocks};
/// let code = Code128::encode(b"<3").unwrap();
/// let rendering = code.render(&RenderOptions::default().with_quiet_zone(true)).unwrap();
/// assert_eq!(
///     bars_to_blocks(&rendering),
///     "     █▐ ▌ ▐█ █▐ █ ▌█▌▐  ▌█ █ ▐█▐▐▌     ",
/// );
/// ```
pub fn bars_to_blocks(rendering: &Rendering) -> String {
    let mut buf = Buffer::new();
    buf.push_n(false, rendering.quiet_zone());
    for bar in rendering.bars() {
        buf.push_n(true, bar.width);
        buf.push_n(false, bar.space);
    }
    buf.push_n(false, rendering.quiet_zone());
    buf.into_string()
}

#[test]
fn test_without_quiet_zone() {
    use crate::{Code128, RenderOptions};

    let code = Code128::encode(b"").unwrap();
    let rendering = code.render(&RenderOptions::default()).unwrap();
    let blocks = bars_to_blocks(&rendering);
    // 35 modules, the last half block is padding
    assert_eq!(blocks.chars().count(), 18);
    assert!(blocks.starts_with('█'));
}

#[test]
fn test_stroke_width_doubles() {
    use crate::{Code128, RenderOptions};

    let code = Code128::encode(b"x").unwrap();
    let single = bars_to_blocks(&code.render(&RenderOptions::default()).unwrap());
    let double = bars_to_blocks(
        &code
            .render(&RenderOptions::default().with_stroke_width(2))
            .unwrap(),
    );
    // at stroke width two every module fills a whole character
    assert!(double.chars().all(|ch| ch == '█' || ch == ' '));
    // 46 modules, no padding needed
    assert_eq!(single.chars().count(), 23);
    assert_eq!(double.chars().count(), 46);
}
