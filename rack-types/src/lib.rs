pub mod achievement;
pub mod challenge;
pub mod errors;
pub mod modes;
pub mod rack;
pub mod search;
pub mod stats;

// Re-export all types
pub use achievement::*;
pub use challenge::*;
pub use errors::*;
pub use modes::*;
pub use rack::*;
pub use search::*;
pub use stats::*;
