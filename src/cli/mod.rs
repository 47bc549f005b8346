mod args;
mod handlers;

pub use args::{Cli, Command, GenerateArgs, MetadataArgs, parse_tiling};
pub use handlers::{BatchSummary, Toolchain, OutputNames, run};
