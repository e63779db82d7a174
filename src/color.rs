/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from HSV components.
    ///
    /// H: hue in degrees (wraps at 360), S: saturation (0-255), V: value (0-255).
    pub fn from_hsv(h: u16, s: u8, v: u8) -> Self {
        if s == 0 {
            return Self::new(v, v, v);
        }
        let s = s as f32 / 255.0;
        let v = v as f32 / 255.0;

        let h = (h % 360) as f32 / 60.0;
        let sector = h.floor();
        let f = h - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::new(to_channel(r), to_channel(g), to_channel(b))
    }
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        Self::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::red(0, Color::new(191, 0, 0))]
    #[case::green(120, Color::new(0, 191, 0))]
    #[case::blue(240, Color::new(0, 0, 191))]
    #[case::yellow(60, Color::new(191, 191, 0))]
    #[case::wraps(360, Color::new(191, 0, 0))]
    fn primary_hues(#[case] hue: u16, #[case] expected: Color) {
        assert_eq!(Color::from_hsv(hue, 255, 191), expected);
    }

    #[test]
    fn no_saturation_is_gray() {
        assert_eq!(Color::from_hsv(200, 0, 191), Color::new(191, 191, 191));
    }

    #[test]
    fn intermediate_hue() {
        // Halfway between blue and magenta.
        let color = Color::from_hsv(270, 255, 255);
        assert_eq!(color, Color::new(128, 0, 255));
    }

    #[test]
    fn into_terminal_color() {
        let color: crossterm::style::Color = Color::new(1, 2, 3).into();
        assert_eq!(color, crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
