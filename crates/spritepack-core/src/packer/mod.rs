//! Rectangle packing.
//!
//! A single algorithm family lives here: MaxRects, driven by five
//! placement heuristics. The pipeline tries all of them and keeps the best
//! run.

pub mod maxrects;

pub use maxrects::{pack, MaxRectsPacker, PackingRun};
