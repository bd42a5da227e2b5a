mod config;
mod constants;
mod payload;
mod report;

pub use config::*;
pub use constants::*;
pub use payload::*;
pub use report::*;
