mod app;
mod surface;
mod timer;

pub use app::{App, TerminalGuard};
pub use surface::{CellMetrics, TerminalSurface};
pub use timer::IntervalTimer;
