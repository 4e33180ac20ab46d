use crate::style;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `public_directories.json`: the global manifest of analysis run directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryManifest {
    #[serde(default)]
    pub directories: Vec<String>,
}

/// One analysis run, parsed from a `<date>_<time>_<name...>` directory name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// The raw directory name; used as the path segment for artifact fetches.
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
    pub date: String,
    pub time: String,
}

impl Project {
    /// Parse a directory name. Entries that do not decompose into at least
    /// date, time, and name are rejected; hyphens in the time segment are
    /// rewritten to colons for display.
    pub fn parse(dir: &str) -> Option<Self> {
        let parts: Vec<&str> = dir.split('_').collect();
        if parts.len() < 3 {
            return None;
        }

        let date = parts[0].to_string();
        let time = parts[1].replace('-', ":");
        let name = parts[2..].join("_");

        Some(Project {
            id: dir.to_string(),
            created_at: format!("{} {}", date, time),
            name,
            date,
            time,
        })
    }

    /// Parse a manifest, discarding malformed entries with a warning.
    pub fn parse_manifest(manifest: &DirectoryManifest) -> Vec<Project> {
        manifest
            .directories
            .iter()
            .filter_map(|dir| match Project::parse(dir) {
                Some(p) => Some(p),
                None => {
                    style::warning(&format!("Invalid directory format: {}", dir));
                    None
                }
            })
            .collect()
    }
}

/// Projects grouped by name, groups ordered newest-run-first.
pub fn group_projects(projects: &[Project]) -> Vec<(String, Vec<Project>)> {
    let mut groups: BTreeMap<String, Vec<Project>> = BTreeMap::new();
    for p in projects {
        groups.entry(p.name.clone()).or_default().push(p.clone());
    }

    let mut grouped: Vec<(String, Vec<Project>)> = groups.into_iter().collect();
    for (_, runs) in &mut grouped {
        // Newest run first within a group. Timestamps are zero-padded, so
        // lexicographic order matches chronological order.
        runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
    grouped.sort_by(|a, b| {
        let latest_a = a.1.first().map(|p| p.created_at.as_str()).unwrap_or("");
        let latest_b = b.1.first().map(|p| p.created_at.as_str()).unwrap_or("");
        latest_b.cmp(latest_a)
    });
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_time_and_name() {
        let p = Project::parse("2024-11-02_14-30-05_shop_backend").unwrap();
        assert_eq!(p.date, "2024-11-02");
        assert_eq!(p.time, "14:30:05");
        assert_eq!(p.name, "shop_backend");
        assert_eq!(p.created_at, "2024-11-02 14:30:05");
        assert_eq!(p.id, "2024-11-02_14-30-05_shop_backend");
    }

    #[test]
    fn rejects_short_directory_names() {
        assert!(Project::parse("just_two").is_none());
        assert!(Project::parse("single").is_none());
    }

    #[test]
    fn groups_sort_newest_first() {
        let projects = vec![
            Project::parse("2024-01-01_09-00-00_alpha").unwrap(),
            Project::parse("2024-06-01_09-00-00_beta").unwrap(),
            Project::parse("2024-03-01_09-00-00_alpha").unwrap(),
        ];
        let grouped = group_projects(&projects);
        assert_eq!(grouped[0].0, "beta");
        assert_eq!(grouped[1].0, "alpha");
        // Within alpha, the March run comes before the January run.
        assert_eq!(grouped[1].1[0].date, "2024-03-01");
    }
}
