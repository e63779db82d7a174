//! The capabilities a host event loop hands to a display component.
//!
//! A host owns the timers, the font and the drawing surface. Components only
//! see them through these traits, which keeps them testable without a
//! terminal attached.

use crate::color::Color;
use std::time::Duration;

/// Identifies a periodic timer started through a [TimerService].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub(crate) u64);

/// Whether a component consumed an event or left it to the host's default handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Unhandled,
}

/// Schedules periodic ticks.
pub trait TimerService {
    /// Start a timer that fires every `interval`.
    fn start(&mut self, interval: Duration) -> TimerId;

    /// Stop a timer. Stopping an unknown timer does nothing.
    fn stop(&mut self, id: TimerId);
}

/// Lets a component ask the host to paint it again.
pub trait RepaintRequester {
    fn request_repaint(&mut self);
}

/// Font measurements in surface units.
pub trait FontMetrics {
    /// The horizontal advance of a single character.
    fn char_advance(&self, ch: char) -> i32;

    /// The horizontal advance of a whole string.
    fn text_advance(&self, text: &str) -> i32 {
        text.chars().fold(0, |total: i32, ch| total.saturating_add(self.char_advance(ch)))
    }

    fn ascent(&self) -> i32;

    fn descent(&self) -> i32;

    /// The full height of a line of text.
    fn line_height(&self) -> i32;
}

/// A surface glyphs can be drawn on.
pub trait Surface {
    /// The (width, height) of the surface.
    fn size(&self) -> (i32, i32);

    /// Draw a character with its baseline at `(x, baseline)`.
    fn draw_glyph(&mut self, x: i32, baseline: i32, ch: char, color: Color);
}
