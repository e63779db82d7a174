use super::surface::{CellMetrics, TerminalSurface};
use super::timer::IntervalTimer;
use crate::config::Config;
use crate::host::{EventOutcome, RepaintRequester, Surface};
use crate::widget::WigglyDisplay;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// How long to wait for input when no timer is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Tracks whether the frame needs to be painted again.
#[derive(Debug, Default)]
struct Damage {
    dirty: bool,
}

impl Damage {
    fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl RepaintRequester for Damage {
    fn request_repaint(&mut self) {
        self.dirty = true;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Hosts a [WigglyDisplay] on a terminal.
///
/// The last terminal row is used as a status line, the rest belongs to the display.
pub struct App<W: Write> {
    display: WigglyDisplay,
    timers: IntervalTimer,
    surface: TerminalSurface,
    metrics: CellMetrics,
    damage: Damage,
    writer: W,
    tick_limit: Option<u64>,
    handled_ticks: u64,
}

impl<W: Write> App<W> {
    pub fn new(config: &Config, (columns, rows): (u16, u16), writer: W) -> Self {
        let mut timers = IntervalTimer::default();
        let mut display = WigglyDisplay::new();
        display.set_text(config.text.as_str());
        display.set_running(config.running, &mut timers);
        Self {
            display,
            timers,
            surface: TerminalSurface::new(columns, rows.saturating_sub(1)),
            metrics: CellMetrics::new(config.line_height),
            damage: Damage { dirty: true },
            writer,
            tick_limit: None,
            handled_ticks: 0,
        }
    }

    /// Exit after the display handled this many ticks.
    pub fn tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    #[cfg(test)]
    pub(crate) fn display(&self) -> &WigglyDisplay {
        &self.display
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.damage.take() {
                self.repaint()?;
            }
            let timeout = match self.timers.next_deadline() {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => IDLE_POLL,
            };
            if event::poll(timeout)? && self.handle_event(event::read()?) == Flow::Quit {
                return Ok(());
            }
            self.dispatch_ticks(Instant::now());
            if self.tick_limit.is_some_and(|limit| self.handled_ticks >= limit) {
                log::info!("stopping after {} ticks", self.handled_ticks);
                return Ok(());
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(columns, rows) => {
                log::debug!("terminal resized to {columns}x{rows}");
                self.surface.resize(columns, rows.saturating_sub(1));
                self.damage.request_repaint();
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let control = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
            KeyCode::Char(' ') if !control => {
                let running = !self.display.is_running();
                self.display.set_running(running, &mut self.timers);
            }
            KeyCode::Char(ch) if !control => {
                let mut text = self.display.text().to_string();
                text.push(ch);
                self.display.set_text(text);
            }
            KeyCode::Backspace => {
                let mut text = self.display.text().to_string();
                if text.pop().is_none() {
                    return Flow::Continue;
                }
                self.display.set_text(text);
            }
            _ => return Flow::Continue,
        }
        self.damage.request_repaint();
        Flow::Continue
    }

    fn dispatch_ticks(&mut self, now: Instant) {
        for id in self.timers.expired(now) {
            match self.display.on_tick(id, &mut self.damage) {
                EventOutcome::Handled => self.handled_ticks += 1,
                EventOutcome::Unhandled => log::trace!("dropping tick from unknown timer {id:?}"),
            }
        }
    }

    fn repaint(&mut self) -> io::Result<()> {
        self.surface.clear();
        self.display.paint(&mut self.surface, &self.metrics);
        self.surface.render(&mut self.writer)?;

        let (_, rows) = self.surface_size();
        let state = if self.display.is_running() { "running" } else { "paused" };
        let status = format!("[{state}] space: pause/resume  type: edit  esc: quit");
        self.writer
            .queue(MoveTo(0, rows))?
            .queue(SetAttribute(Attribute::Dim))?
            .queue(Print(status))?
            .queue(SetAttribute(Attribute::Reset))?;
        self.writer.flush()
    }

    fn surface_size(&self) -> (u16, u16) {
        let (columns, rows) = self.surface.size();
        (columns as u16, rows as u16)
    }
}

/// Puts the terminal in raw mode on the alternate screen and restores it when dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = stdout.execute(EnterAlternateScreen).and_then(|out| out.execute(Hide)) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(Show).and_then(|out| out.execute(LeaveAlternateScreen));
        let _ = terminal::disable_raw_mode();
    }
}
