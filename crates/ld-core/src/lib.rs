//! ld-core: Data model and shared capabilities for LuckyDraw
//!
//! Everything the draw engine and the persistence layer agree on:
//! - Participant, history and award records
//! - Zero-padded numbering scheme
//! - Draw settings with serde defaults
//! - Injected id generator and clock
//! - Error types

pub mod clock;
pub mod error;
pub mod ids;
pub mod model;
pub mod numbering;
pub mod settings;

pub use clock::*;
pub use error::*;
pub use ids::*;
pub use model::*;
pub use numbering::*;
pub use settings::*;
