use clap::Parser;
use sbomscope::cli::{Cli, Command};
use sbomscope::{
    cmd_components, cmd_graph, cmd_init, cmd_licenses, cmd_packages, cmd_projects, cmd_summary,
    cmd_tree, cmd_vuln,
};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Projects(args) => cmd_projects(args),
        Command::Summary(args) => cmd_summary(args),
        Command::Vuln(args) => cmd_vuln(args),
        Command::Components(args) => cmd_components(args),
        Command::Packages(args) => cmd_packages(args),
        Command::Licenses(args) => cmd_licenses(args),
        Command::Tree(args) => cmd_tree(args),
        Command::Graph(args) => cmd_graph(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
