pub mod game_state;
pub mod scoring;
pub mod word_source;
pub mod game_events;
pub mod input;
pub mod store;
pub mod stats;
pub mod daily_cache;
pub mod onboarding;
pub mod provider;
pub mod daily_loader;

// Re-export main components
pub use game_state::*;
pub use scoring::*;
pub use word_source::*;
pub use game_events::*;
pub use input::*;
pub use store::*;
pub use stats::*;
pub use daily_cache::*;
pub use onboarding::*;
pub use provider::*;
pub use daily_loader::*;
