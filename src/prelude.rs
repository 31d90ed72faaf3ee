pub use clap::Parser;

pub use crate::cli::{Cli, Cookie};
pub use crate::{Outcome, RunOptions, run};
