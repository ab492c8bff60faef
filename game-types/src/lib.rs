pub mod game;
pub mod stats;
pub mod errors;

// Re-export all types
pub use game::*;
pub use stats::*;
pub use errors::*;

pub type SessionId = uuid::Uuid;

/// Placeholder substituted for every form of the target word in example sentences.
pub const MASK_TOKEN: &str = "_______";
