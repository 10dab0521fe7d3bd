#[allow(clippy::module_inception)]
pub mod cli;

pub use cli::{CommandArgs, OutputFormat};
