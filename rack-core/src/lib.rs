pub mod achievements;
pub mod challenge_generator;
pub mod filters;
pub mod game_modes;
pub mod lexical_search;
pub mod rack_matcher;
pub mod scoring;
pub mod session;
pub mod streak;
pub mod word_source;

// Re-export main components
pub use achievements::*;
pub use challenge_generator::*;
pub use filters::*;
pub use game_modes::*;
pub use lexical_search::*;
pub use rack_matcher::*;
pub use scoring::*;
pub use session::*;
pub use streak::*;
pub use word_source::*;
