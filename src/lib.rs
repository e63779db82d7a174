//! A text label whose characters wiggle along a sine wave while cycling
//! through hues, plus a terminal host to run it on.

pub mod color;
pub mod config;
pub mod host;
pub mod terminal;
pub mod widget;

pub use color::Color;
pub use config::{Config, ConfigError};
pub use widget::WigglyDisplay;
