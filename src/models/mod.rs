//! Data models

pub mod reading;
pub mod verdict;
pub mod history;

pub use reading::*;
pub use verdict::*;
pub use history::*;
