use crate::color::Color;

/// One period of a sine wave, scaled to [-100, 100].
pub const SINE_TABLE: [i32; 16] = [0, 38, 71, 92, 100, 92, 71, 38, 0, -38, -71, -92, -100, -92, -71, -38];

/// The number of phases in a wave period.
pub const PHASES: usize = SINE_TABLE.len();

pub const SATURATION: u8 = 255;
pub const VALUE: u8 = 191;

/// The position within the wave period of the character at `char_index`.
pub fn phase_index(step: u64, char_index: usize) -> usize {
    // Reduce both sides first so large steps can't overflow.
    let step = (step % PHASES as u64) as usize;
    (step + char_index % PHASES) % PHASES
}

/// The hue, in degrees, for a phase.
pub fn hue(index: usize) -> u16 {
    (PHASES - 1 - index) as u16 * 16
}

/// How far a glyph is raised above the baseline for a phase.
pub fn lift(index: usize, line_height: i32) -> i32 {
    // |table| <= 100, so the quotient always fits back into an i32.
    (SINE_TABLE[index] as i64 * line_height as i64 / 400) as i32
}

/// Everything needed to compute the look of a single character.
#[derive(Debug, Clone)]
pub struct WaveContext {
    /// Current animation step
    pub step: u64,
    /// Character index within the text
    pub char_index: usize,
    /// The character being rendered
    pub ch: char,
    /// Line height of the font in use
    pub line_height: i32,
}

/// The computed appearance of a single character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphFrame {
    pub ch: char,
    pub index: usize,
    pub hue: u16,
    pub lift: i32,
    pub color: Color,
}

/// Sine wave animation: characters bob up and down while the hue walks from
/// blue to red along the wave.
pub struct Wave;

impl Wave {
    pub fn render_char(&self, ctx: &WaveContext) -> GlyphFrame {
        let index = phase_index(ctx.step, ctx.char_index);
        let hue = hue(index);
        GlyphFrame {
            ch: ctx.ch,
            index,
            hue,
            lift: lift(index, ctx.line_height),
            color: Color::from_hsv(hue, SATURATION, VALUE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 15, 15)]
    #[case(3, 14, 1)]
    #[case(16, 1, 1)]
    #[case(u64::MAX, 1, 0)]
    fn phase_wraps(#[case] step: u64, #[case] char_index: usize, #[case] expected: usize) {
        assert_eq!(phase_index(step, char_index), expected);
    }

    #[test]
    fn hue_per_phase() {
        for step in 0..40u64 {
            for char_index in 0..20usize {
                let index = ((step as usize) + char_index) % 16;
                let expected = (15 - index as u16) * 16;
                assert_eq!(hue(phase_index(step, char_index)), expected);
            }
        }
    }

    #[rstest]
    #[case(0, 400, 0)]
    #[case(4, 400, 100)]
    #[case(12, 400, -100)]
    #[case(1, 20, 1)]
    #[case(2, 20, 3)]
    #[case(9, 20, -1)]
    #[case(1, 8, 0)]
    #[case(4, 8, 2)]
    #[case(3, 30_000_000, 6_900_000)]
    #[case(4, i32::MAX, 536_870_911)]
    #[case(12, i32::MAX, -536_870_911)]
    fn lift_scales_with_line_height(#[case] index: usize, #[case] line_height: i32, #[case] expected: i32) {
        assert_eq!(lift(index, line_height), expected);
    }

    #[test]
    fn render_char() {
        let ctx = WaveContext { step: 3, char_index: 1, ch: 'x', line_height: 40 };
        let frame = Wave.render_char(&ctx);
        assert_eq!(frame.index, 4);
        assert_eq!(frame.hue, 176);
        assert_eq!(frame.lift, 10);
        assert_eq!(frame.color, Color::from_hsv(176, 255, 191));
        assert_eq!(frame.ch, 'x');
    }
}
