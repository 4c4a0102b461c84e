pub mod info;
pub mod wallet;

// Re-export all route functions for easy access
pub use info::*;
pub use wallet::*;
