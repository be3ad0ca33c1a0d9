//! pmsynth - gesture-controlled phase-modulation drone
//!
//! Run with: cargo run --release
//!
//! Hold the left mouse button and move: up/down picks the note, left/right
//! the brightness. `a` lets the instrument play itself, `q` or Esc quits.

mod app;
mod pointer;
mod ui;

use app::Pmsynth;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::init_logging()?;

    Pmsynth::new().run()
}
