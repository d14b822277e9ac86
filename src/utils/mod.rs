pub mod token;
pub mod constants;
pub mod config_loader;

pub use token::Token;
pub use constants::*;
pub use config_loader::*;
