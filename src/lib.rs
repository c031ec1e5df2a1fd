//! cmsquery - resolve folder selections to every nested object and build
//! the bulk lookup query for them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::{Cli, Commands, Target};
pub use config::AppConfig;
