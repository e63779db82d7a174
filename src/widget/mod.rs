mod wave;

pub use wave::{GlyphFrame, PHASES, SINE_TABLE, Wave, WaveContext, hue, lift, phase_index};

use crate::host::{EventOutcome, FontMetrics, RepaintRequester, Surface, TimerId, TimerService};
use std::time::Duration;

/// The interval between animation steps.
pub const TICK_INTERVAL: Duration = Duration::from_millis(60);

/// A glyph positioned on a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub x: i32,
    pub baseline: i32,
    pub frame: GlyphFrame,
}

/// A text label whose characters wiggle along a sine wave.
#[derive(Debug, Default)]
pub struct WigglyDisplay {
    text: String,
    step: u64,
    timer: Option<TimerId>,
}

impl WigglyDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the displayed text. This doesn't trigger a repaint on its own.
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start or stop the animation.
    pub fn set_running(&mut self, running: bool, timers: &mut dyn TimerService) {
        if running == self.is_running() {
            return;
        }
        match self.timer.take() {
            Some(id) => {
                timers.stop(id);
                log::debug!("animation stopped at step {}", self.step);
            }
            None => {
                let id = timers.start(TICK_INTERVAL);
                log::debug!("animation started with timer {id:?}");
                self.timer = Some(id);
            }
        }
    }

    /// Handle a timer tick. Ticks from timers this display didn't start are
    /// left to the caller.
    pub fn on_tick(&mut self, timer: TimerId, repaint: &mut dyn RepaintRequester) -> EventOutcome {
        if self.timer != Some(timer) {
            return EventOutcome::Unhandled;
        }
        self.step = self.step.wrapping_add(1);
        repaint.request_repaint();
        EventOutcome::Handled
    }

    /// Compute where every character goes on a surface of the given size.
    pub fn layout(&self, surface_size: (i32, i32), metrics: &dyn FontMetrics) -> Vec<PlacedGlyph> {
        if self.text.is_empty() {
            return Vec::new();
        }
        let (width, height) = surface_size;
        let mut x = width.saturating_sub(metrics.text_advance(&self.text)) / 2;
        let y = height.saturating_add(metrics.ascent()).saturating_sub(metrics.descent()) / 2;

        let line_height = metrics.line_height();
        let mut glyphs = Vec::with_capacity(self.text.len());
        for (char_index, ch) in self.text.chars().enumerate() {
            let ctx = WaveContext { step: self.step, char_index, ch, line_height };
            let frame = Wave.render_char(&ctx);
            let advance = metrics.char_advance(ch);
            glyphs.push(PlacedGlyph { x, baseline: y.saturating_sub(frame.lift), frame });
            x = x.saturating_add(advance);
        }
        glyphs
    }

    /// Draw the text onto a surface. Nothing is drawn when the text is empty.
    pub fn paint(&self, surface: &mut dyn Surface, metrics: &dyn FontMetrics) {
        for glyph in self.layout(surface.size(), metrics) {
            surface.draw_glyph(glyph.x, glyph.baseline, glyph.frame.ch, glyph.frame.color);
        }
    }
}
