//! Text analysis: language detection, segmentation, and speech cleanup.
//!
//! Everything in this module is a pure function over string input; no I/O,
//! no shared state, safe to call from any thread.

mod sanitize;
mod script;
mod segment;

pub use sanitize::sanitize_for_speech;
pub use script::{Lang, classify};
pub use segment::{Segment, segment};
