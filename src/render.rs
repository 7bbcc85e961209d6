use crate::std::vec::Vec;

#[cfg(feature = "std")]
use thiserror::Error;

use crate::patterns::pattern_for;

/// Width of the blank margin on each side, in modules.
pub const QUIET_ZONE_MODULES: u32 = 10;

/// Errors that can occur when computing bars.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum RenderError {
    /// The stroke width was zero, or so large the code's width overflows.
    #[cfg_attr(feature = "std", error("stroke width {0} is not usable"))]
    InvalidStrokeWidth(u32),
    /// A codeword is not one of the 107 Code 128 symbols.
    #[cfg_attr(feature = "std", error("codeword {0} does not exist"))]
    InvalidCodeword(u8),
}

/// Representation of a "black line" in the code.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Bar {
    /// The width of the line, a multiple of the stroke width.
    pub width: u32,
    /// White space after the line.
    ///
    /// Zero for the final bar of the stop symbol.
    pub space: u32,
}

/// A coordinate of a bar in a barcode.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct BarCoordinate {
    /// The x coordinate, started from the left edge of the image.
    ///
    /// Includes the left quiet zone, if one was requested.
    pub x: u32,
    /// The width of the bar.
    pub width: u32,
}

/// How tall the code should be.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Height {
    /// A percentage of the code's width without quiet zones, rounded up.
    Proportional {
        /// The percentage, 15 by default.
        percent: u32,
    },
    /// A fixed height.
    Fixed(u32),
}

impl Default for Height {
    fn default() -> Self {
        Self::Proportional { percent: 15 }
    }
}

/// Options for [render].
///
/// ```rust
/// # use code128_content::{Height, RenderOptions};
/// let options = RenderOptions::default()
///     .with_stroke_width(2)
///     .with_quiet_zone(true)
///     .with_height(Height::Fixed(40));
/// assert_eq!(options.stroke_width(), 2);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RenderOptions {
    stroke_width: u32,
    quiet_zone: bool,
    height: Height,
}

impl RenderOptions {
    /// Width of a single module.
    ///
    /// One or two work well for printing at the native resolution.
    pub fn with_stroke_width(self, stroke_width: u32) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }

    /// Whether to add the quiet zone of [QUIET_ZONE_MODULES] on both sides.
    pub fn with_quiet_zone(self, quiet_zone: bool) -> Self {
        Self { quiet_zone, ..self }
    }

    /// How to compute the height.
    pub fn with_height(self, height: Height) -> Self {
        Self { height, ..self }
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn quiet_zone(&self) -> bool {
        self.quiet_zone
    }

    pub fn height(&self) -> Height {
        self.height
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stroke_width: 1,
            quiet_zone: false,
            height: Height::default(),
        }
    }
}

/// The bars of a Code 128, ready to be drawn.
///
/// Nothing is drawn here. To paint the code fill the background, then
/// draw a rectangle for every bar coordinate:
///
/// ```rust
/// # use code128_content::{Code128, RenderOptions};
/// let code = Code128::encode(b"Code128 <3").unwrap();
/// let options = RenderOptions::default().with_quiet_zone(true);
/// let rendering = code.render(&options).unwrap();
/// for bar in rendering.bar_coordinates() {
///     // fill (bar.x, 0) to (bar.x + bar.width, rendering.height())
/// #   assert!(bar.x + bar.width <= rendering.width());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    bars: Vec<Bar>,
    symbol_width: u32,
    quiet_zone: u32,
    height: u32,
}

impl Rendering {
    /// The bars from left to right, without quiet zones.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the coordinates of the bars.
    pub fn bar_coordinates(&self) -> impl Iterator<Item = BarCoordinate> + '_ {
        self.bars.iter().scan(self.quiet_zone, |pos, bar| {
            let x = *pos;
            *pos += bar.width + bar.space;
            Some(BarCoordinate {
                x,
                width: bar.width,
            })
        })
    }

    /// Total width, quiet zones included.
    pub fn width(&self) -> u32 {
        self.symbol_width + 2 * self.quiet_zone
    }

    /// Width of the bars alone.
    pub fn symbol_width(&self) -> u32 {
        self.symbol_width
    }

    /// Width of the quiet zone on each side, zero if none was requested.
    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Map codewords to bars.
///
/// The codewords are usually taken from [Code128](crate::Code128), but any
/// sequence of valid symbols can be rendered. Everything is checked before
/// any bar is computed.
pub fn render(codewords: &[u8], options: &RenderOptions) -> Result<Rendering, RenderError> {
    let stroke = options.stroke_width;
    if stroke == 0 {
        return Err(RenderError::InvalidStrokeWidth(stroke));
    }
    let mut modules = 0u64;
    for codeword in codewords {
        modules += pattern_for(*codeword)?
            .iter()
            .map(|run| *run as u64)
            .sum::<u64>();
    }
    let quiet_modules = if options.quiet_zone {
        QUIET_ZONE_MODULES as u64
    } else {
        0
    };
    let total = (modules + 2 * quiet_modules) * stroke as u64;
    if total > u32::MAX as u64 {
        return Err(RenderError::InvalidStrokeWidth(stroke));
    }
    let symbol_width = (modules * stroke as u64) as u32;
    let quiet_zone = (quiet_modules * stroke as u64) as u32;

    let height = match options.height {
        Height::Proportional { percent } => (symbol_width as u64 * percent as u64)
            .div_ceil(100)
            .min(u32::MAX as u64) as u32,
        Height::Fixed(height) => height,
    };

    let mut bars = Vec::with_capacity(codewords.len() * 3 + 1);
    for codeword in codewords {
        // validated above
        let runs = pattern_for(*codeword)?;
        bars.extend(runs.chunks(2).map(|pair| Bar {
            width: pair[0] as u32 * stroke,
            space: pair.get(1).map_or(0, |space| *space as u32 * stroke),
        }));
    }

    Ok(Rendering {
        bars,
        symbol_width,
        quiet_zone,
        height,
    })
}

#[cfg(test)]
use crate::Code128;

#[cfg(test)]
use pretty_assertions::assert_eq;

#[test]
fn test_width_formula() {
    let messages: [&[u8]; 4] = [b"", b"BarCode 1", b"\x01\x02ab", b"1234567890"];
    for msg in messages {
        let code = Code128::encode(msg).unwrap();
        for stroke in 1..=3 {
            let options = RenderOptions::default().with_stroke_width(stroke);
            let rendering = code.render(&options).unwrap();
            let expected = ((code.len() as u32 - 3) * 11 + 35) * stroke;
            assert_eq!(rendering.width(), expected);
            let sum: u32 = rendering.bars().iter().map(|b| b.width + b.space).sum();
            assert_eq!(sum, expected);
        }
    }
}

#[test]
fn test_quiet_zone() {
    let code = Code128::encode(b"BarCode 1").unwrap();
    let plain = code.render(&RenderOptions::default().with_stroke_width(2)).unwrap();
    let quiet = code
        .render(
            &RenderOptions::default()
                .with_stroke_width(2)
                .with_quiet_zone(true),
        )
        .unwrap();
    assert_eq!(quiet.quiet_zone(), 20);
    assert_eq!(quiet.width(), plain.width() + 40);
    assert_eq!(quiet.bars(), plain.bars());
    // the quiet zone does not make the code taller
    assert_eq!(quiet.height(), plain.height());
    assert_eq!(quiet.bar_coordinates().next().unwrap().x, 20);
    assert_eq!(plain.bar_coordinates().next().unwrap().x, 0);
}

#[test]
fn test_height() {
    let code = Code128::encode(b"BarCode 1").unwrap();
    // (9 * 11 + 35) = 134 modules, 15% is 20.1
    let rendering = code.render(&RenderOptions::default()).unwrap();
    assert_eq!(rendering.symbol_width(), 134);
    assert_eq!(rendering.height(), 21);
    let options = RenderOptions::default()
        .with_stroke_width(2)
        .with_height(Height::Proportional { percent: 50 });
    assert_eq!(code.render(&options).unwrap().height(), 134);
    let options = RenderOptions::default().with_height(Height::Fixed(7));
    assert_eq!(code.render(&options).unwrap().height(), 7);
}

#[test]
fn test_empty_bars() {
    let code = Code128::encode(b"").unwrap();
    let rendering = code.render(&RenderOptions::default()).unwrap();
    let bars: Vec<_> = rendering.bar_coordinates().collect();
    assert_eq!(bars[0], BarCoordinate { x: 0, width: 2 });
    assert_eq!(bars[1], BarCoordinate { x: 3, width: 1 });
    assert_eq!(bars[2], BarCoordinate { x: 6, width: 1 });
    assert_eq!(bars[3], BarCoordinate { x: 11, width: 2 });
    assert_eq!(bars[4], BarCoordinate { x: 15, width: 2 });
    assert_eq!(bars[5], BarCoordinate { x: 18, width: 2 });
    assert_eq!(bars[6], BarCoordinate { x: 22, width: 2 });
    assert_eq!(bars[7], BarCoordinate { x: 27, width: 3 });
    assert_eq!(bars[8], BarCoordinate { x: 31, width: 1 });
    assert_eq!(bars[9], BarCoordinate { x: 33, width: 2 });
    assert_eq!(bars.len(), 10);
    assert_eq!(
        rendering.bars().last(),
        Some(&Bar { width: 2, space: 0 })
    );
}

#[test]
fn test_scaling() {
    let bars = render(&[0], &RenderOptions::default().with_stroke_width(3))
        .unwrap()
        .bars()
        .to_vec();
    assert_eq!(
        bars,
        [
            Bar { width: 6, space: 3 },
            Bar { width: 6, space: 6 },
            Bar { width: 6, space: 6 },
        ]
    );
}

#[test]
fn test_errors() {
    let zero = RenderOptions::default().with_stroke_width(0);
    assert_eq!(render(&[104, 1, 106], &zero), Err(RenderError::InvalidStrokeWidth(0)));
    let options = RenderOptions::default();
    assert_eq!(render(&[104, 107, 106], &options), Err(RenderError::InvalidCodeword(107)));
    let huge = RenderOptions::default().with_stroke_width(u32::MAX);
    assert_eq!(
        render(&[104, 1, 106], &huge),
        Err(RenderError::InvalidStrokeWidth(u32::MAX))
    );
}
