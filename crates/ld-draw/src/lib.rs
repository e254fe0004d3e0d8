//! # ld-draw: Drawing engine for LuckyDraw
//!
//! Draws winners from a roster of named participants, either one at a time
//! (with an optional no-repeat rule backed by the history ledger) or as a
//! sequence of awards, each with its own winner quota.
//!
//! ## Architecture
//!
//! ```text
//! LotterySession<S: Store>
//!     │
//!     ├── Roster (ordered participants, derived numbering)
//!     ├── DrawEngine (eligible pool, re-entry guard, uniform pick)
//!     ├── HistoryLedger (single-mode results, newest first)
//!     └── AwardSequencer (current award, quotas, completion)
//!           │
//!           v
//!     ld_state buckets (participants, history, settings, awards, award_winners)
//! ```

pub mod awards;
pub mod engine;
pub mod ledger;
pub mod roster;
pub mod session;

pub use awards::*;
pub use engine::*;
pub use ledger::*;
pub use roster::*;
pub use session::*;
