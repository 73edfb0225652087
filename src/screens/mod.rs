//! Full-screen pages other than the watch face.
//!
//! - **Debug Page** ([`debug`]): frame timing, engine counters, state flags
//!   and the engine log (toggled with `Y` in the simulator)

mod debug;

pub use debug::draw_debug_page;
