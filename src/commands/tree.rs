use crate::analysis::{self, DependencyGraph, DependencyTreeNode, project_tree};
use crate::artifact::ProjectLoader;
use crate::cli::TreeArgs;
use crate::style;

use super::CommandContext;

pub fn cmd_tree(args: TreeArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let records = match analysis::load_dependency_records(&loader, &args.project) {
        Ok(records) => records,
        Err(e) => {
            style::error(&format!(
                "Failed to load dependencies for {}: {}",
                args.project, e
            ));
            return 1;
        }
    };

    let graph = DependencyGraph::build(&records);
    let Some(tree) = project_tree(&graph, &args.package) else {
        style::error(&format!("Unknown package: {}", args.package));
        style::hint("Pass the full coordinate, e.g. pkg:npm/lodash@4.17.21");
        return 1;
    };

    let mut out = String::new();
    render(&tree, "", true, true, &mut out);
    print!("{}", out);
    0
}

fn render(node: &DependencyTreeNode, prefix: &str, is_last: bool, is_root: bool, out: &mut String) {
    let display = match &node.version {
        Some(version) => format!("{}@{}", node.label, version),
        None => node.label.clone(),
    };
    if is_root {
        out.push_str(&format!("{}\n", display));
    } else {
        let branch = if is_last { "└── " } else { "├── " };
        out.push_str(&format!("{}{}{}\n", prefix, branch, display));
    }

    if let Some(children) = &node.children {
        let child_prefix = if is_root {
            String::new()
        } else {
            format!("{}{}", prefix, if is_last { "    " } else { "│   " })
        };
        for (i, child) in children.iter().enumerate() {
            render(child, &child_prefix, i + 1 == children.len(), false, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_branches_with_box_drawing() {
        let tree = DependencyTreeNode {
            id: "pkg:npm/a@1".to_string(),
            label: "a".to_string(),
            version: Some("1".to_string()),
            children: Some(vec![
                DependencyTreeNode {
                    id: "pkg:npm/b@2".to_string(),
                    label: "b".to_string(),
                    version: Some("2".to_string()),
                    children: None,
                },
                DependencyTreeNode {
                    id: "pkg:npm/c@3".to_string(),
                    label: "c".to_string(),
                    version: Some("3".to_string()),
                    children: None,
                },
            ]),
        };
        let mut out = String::new();
        render(&tree, "", true, true, &mut out);
        assert_eq!(out, "a@1\n├── b@2\n└── c@3\n");
    }
}
