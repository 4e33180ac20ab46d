pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod graph;
pub mod license;
pub mod model;
pub mod output;
pub mod style;

pub use cli::Cli;
pub use commands::{
    cmd_components, cmd_graph, cmd_init, cmd_licenses, cmd_packages, cmd_projects, cmd_summary,
    cmd_tree, cmd_vuln,
};
pub use config::Config;
pub use analysis::ProjectReport;
