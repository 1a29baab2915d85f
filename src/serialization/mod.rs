mod command;
pub mod error;
mod script;

pub use command::*;
pub use script::*;
