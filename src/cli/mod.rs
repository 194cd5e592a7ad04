pub mod commands;
pub mod dispatch;
pub mod display;

pub use commands::CliArgs;
pub use dispatch::{execute, run, switch, Action, ClusterAction, CommandOutput};
