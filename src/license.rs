//! License risk data from the global `license_list_with_risk_scores.xlsx`
//! spreadsheet: one row per SPDX license, with a numeric risk score and
//! reference URLs in the trailing columns.

use crate::artifact::ArtifactError;
use calamine::{Data, Reader, Xlsx};
use serde::Serialize;
use std::io::Cursor;

#[derive(Debug, Clone, Serialize)]
pub struct LicenseRisk {
    pub spdx_id: String,
    pub name: String,
    pub risk_score: Option<f64>,
    pub references: Vec<String>,
}

const RISK_SCORE_COLUMN: usize = 11;
const REFERENCES_COLUMN: usize = 12;

/// Parse the spreadsheet's first sheet. The header row is skipped; rows with
/// an empty SPDX id column are ignored.
pub fn parse_risk_sheet(bytes: &[u8]) -> Result<Vec<LicenseRisk>, ArtifactError> {
    let sheet_error = |message: String| ArtifactError::Spreadsheet {
        artifact: crate::artifact::LICENSE_RISK_SHEET.to_string(),
        message,
    };

    let mut workbook =
        Xlsx::new(Cursor::new(bytes.to_vec())).map_err(|e| sheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| sheet_error("workbook has no sheets".to_string()))?
        .map_err(|e| sheet_error(e.to_string()))?;

    let mut licenses = Vec::new();
    for row in range.rows().skip(1) {
        let spdx_id = cell_text(row.first());
        if spdx_id.is_empty() {
            continue;
        }

        let references = row
            .iter()
            .skip(REFERENCES_COLUMN)
            .map(|c| cell_text(Some(c)))
            .filter(|s| !s.is_empty())
            .collect();

        licenses.push(LicenseRisk {
            spdx_id,
            name: cell_text(row.get(1)),
            risk_score: row.get(RISK_SCORE_COLUMN).and_then(cell_number),
            references,
        });
    }
    Ok(licenses)
}

/// Case-insensitive lookup by SPDX id.
pub fn find_license<'a>(licenses: &'a [LicenseRisk], spdx_id: &str) -> Option<&'a LicenseRisk> {
    let wanted = spdx_id.trim().to_lowercase();
    licenses
        .iter()
        .find(|l| l.spdx_id.trim().to_lowercase() == wanted)
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::Empty) | None => String::new(),
        Some(d) => d.to_string().trim().to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<LicenseRisk> {
        vec![
            LicenseRisk {
                spdx_id: "MIT".to_string(),
                name: "MIT License".to_string(),
                risk_score: Some(1.0),
                references: vec!["https://spdx.org/licenses/MIT.html".to_string()],
            },
            LicenseRisk {
                spdx_id: "GPL-3.0-only".to_string(),
                name: "GNU GPL v3.0 only".to_string(),
                risk_score: Some(8.0),
                references: vec![],
            },
        ]
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let licenses = sample();
        assert!(find_license(&licenses, "mit").is_some());
        assert!(find_license(&licenses, "gpl-3.0-ONLY").is_some());
        assert!(find_license(&licenses, "BSD-2-Clause").is_none());
    }
}
