mod config;
mod flake;

pub use config::*;
pub use flake::*;
