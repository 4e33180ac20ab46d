use crate::analysis;
use crate::artifact::ProjectLoader;
use crate::cli::{OutputFormat, SummaryArgs};
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;

use super::CommandContext;

pub fn cmd_summary(args: SummaryArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let report = match analysis::analyze(&loader, &args.project) {
        Ok(report) => report,
        Err(e) => {
            style::error(&format!("Failed to analyze {}: {}", args.project, e));
            return 1;
        }
    };

    let mut buffer = Vec::new();
    let formatted = match args.format {
        OutputFormat::Markdown => MarkdownOutput::new(args.limit).format(&report, &mut buffer),
        OutputFormat::Json => JsonOutput::new().format(&report, &mut buffer),
    };
    if let Err(e) = formatted {
        style::error(&format!("Failed to format report: {}", e));
        return 1;
    }

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &buffer) {
                style::error(&format!("Failed to write {}: {}", style::path(&path), e));
                return 1;
            }
            style::success(&format!("Report written to {}", style::path(&path)));
            0
        }
        None => {
            let text = String::from_utf8_lossy(&buffer);
            if matches!(args.format, OutputFormat::Markdown) {
                super::emit_markdown(&text)
            } else {
                print!("{}", text);
                0
            }
        }
    }
}
