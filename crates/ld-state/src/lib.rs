//! ld-state: Persistence port for LuckyDraw
//!
//! The draw core never touches disk directly. It reads and writes whole
//! named buckets through a [`Store`]; loads that find nothing, or find
//! something unparsable, fall back to defaults instead of failing.

mod buckets;
mod file_store;
mod store;

pub use buckets::*;
pub use file_store::*;
pub use store::*;
