mod json;
mod markdown;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::analysis::ProjectReport;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, report: &ProjectReport, writer: &mut W) -> std::io::Result<()>;
}
