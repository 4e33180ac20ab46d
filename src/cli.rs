use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sbomscope")]
#[command(about = "Explore SBOM scan results: vulnerabilities, licenses, and dependency graphs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List analyzed projects, grouped by name with newest runs first
    Projects(ProjectsArgs),

    /// Print the full analysis report for one project
    Summary(SummaryArgs),

    /// List vulnerabilities, split into reachable and CVE-only
    Vuln(VulnArgs),

    /// List the component inventory, or show one component in detail
    Components(ComponentsArgs),

    /// Show the malicious-package screening summary
    Packages(PackagesArgs),

    /// Show license usage with risk scores
    Licenses(LicensesArgs),

    /// Print the dependency tree rooted at a package
    Tree(TreeArgs),

    /// Launch the interactive dependency dashboard
    Graph(GraphArgs),

    /// Generate a starter .sbomscope.toml configuration file
    Init(InitArgs),
}

/// Where to read artifacts from. A flag beats the config file; a root beats
/// a URL.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Local results directory holding directory.json and per-project folders
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// HTTP endpoint serving the same layout
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct SummaryArgs {
    /// Project run id, e.g. 2024-05-01_10-30-00_shop-backend
    pub project: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cap rows per vulnerability table
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct VulnArgs {
    /// Project run id
    pub project: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Only show this severity (critical, high, medium, low, unknown)
    #[arg(long)]
    pub severity: Option<String>,

    /// Only show vulnerabilities in packages confirmed reachable
    #[arg(long)]
    pub reachable_only: bool,

    /// Only show vulnerabilities with at least this CVSS score
    #[arg(long)]
    pub min_score: Option<f64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ComponentsArgs {
    /// Project run id
    pub project: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Show one component (purl, name@version, or name) instead of the table
    #[arg(long)]
    pub package: Option<String>,

    /// Only list components from one ecosystem (e.g. npm, pypi)
    #[arg(long)]
    pub ecosystem: Option<String>,

    /// Only list components at one screening risk level (red, yellow, green, n/a)
    #[arg(long)]
    pub risk_level: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PackagesArgs {
    /// Project run id
    pub project: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Restrict the breakdown to one ecosystem (e.g. npm, pypi)
    #[arg(long)]
    pub ecosystem: Option<String>,

    /// Only show one risk level (red, yellow, green, n/a)
    #[arg(long)]
    pub risk_level: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LicensesArgs {
    /// Project run id
    pub project: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Project run id
    pub project: String,

    /// Package coordinate to root the tree at, e.g. pkg:npm/lodash@4.17.21
    pub package: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Port for the HTTP server (config default: 8675)
    #[arg(long)]
    pub port: Option<u16>,

    /// Do not open the browser automatically
    #[arg(long)]
    pub no_open: bool,

    /// Export one project's graph as a standalone HTML file instead of serving
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Project run id to export (required with --export)
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Where to create .sbomscope.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}
