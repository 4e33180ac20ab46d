mod components;
mod graph;
mod init;
mod licenses;
mod packages;
mod projects;
mod summary;
mod tree;
mod vuln;

pub use components::cmd_components;
pub use graph::cmd_graph;
pub use init::cmd_init;
pub use licenses::cmd_licenses;
pub use packages::cmd_packages;
pub use projects::cmd_projects;
pub use summary::cmd_summary;
pub use tree::cmd_tree;
pub use vuln::cmd_vuln;

use crate::artifact::{ArtifactSource, DirectorySource, HttpSource};
use crate::cli::SourceArgs;
use crate::config::Config;
use crate::style;
use std::path::PathBuf;

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub config: Config,
    pub config_dir: PathBuf,
    pub source: Box<dyn ArtifactSource>,
}

impl CommandContext {
    /// Load the config and resolve the artifact source. Flags beat the
    /// config file; a local root beats a URL. Returns Err(exit_code) when
    /// no source is configured at all.
    pub fn new(args: &SourceArgs) -> Result<Self, i32> {
        let config_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let config = Config::load(&config_dir).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        let source: Box<dyn ArtifactSource> = if let Some(root) = &args.root {
            Box::new(DirectorySource::new(root))
        } else if let Some(url) = &args.url {
            Box::new(HttpSource::new(url.as_str()))
        } else if let Some(root) = &config.source.root {
            Box::new(DirectorySource::new(root))
        } else if let Some(url) = &config.source.base_url {
            Box::new(HttpSource::new(url.as_str()))
        } else {
            style::error("No artifact source configured.");
            style::hint(
                "Pass --root or --url, or set [source] in .sbomscope.toml (try: sbomscope init).",
            );
            return Err(1);
        };

        Ok(Self {
            config,
            config_dir,
            source,
        })
    }
}

/// Render markdown through the terminal skin when attached to one, plain
/// otherwise.
pub(crate) fn emit_markdown(markdown: &str) -> i32 {
    let mut stdout = std::io::stdout();
    let result = if style::is_terminal() {
        style::render_markdown(markdown, &mut stdout)
    } else {
        use std::io::Write;
        stdout.write_all(markdown.as_bytes())
    };
    match result {
        Ok(()) => 0,
        Err(e) => {
            style::error(&format!("Failed to write output: {}", e));
            1
        }
    }
}
