mod flake;
mod interface;

pub use flake::*;
pub use interface::*;
