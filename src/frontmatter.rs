//! Front-matter extraction for `SKILL.md` files.
//!
//! Only the handful of fields the tooling needs (name, description,
//! metadata.version) are pulled out with regexes. Full YAML parsing is
//! deliberately out of scope; skill headers are flat enough that it has
//! never been needed.

use std::sync::LazyLock;

use regex::Regex;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---").expect("valid regex"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^name:\s*(.+?)\s*$").expect("valid regex"));

static FIELD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_-]+:").expect("valid regex"));

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version:\s*["']?([^"'\s]+)["']?"#).expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub name: String,
    pub description: String,
}

/// Extract `name` and `description` from a document's front-matter header.
/// Returns `None` if there is no `---` header or either field is missing.
/// Descriptions may continue over indented follow-up lines, which get
/// joined with spaces.
#[must_use]
pub fn extract(content: &str) -> Option<FrontMatter> {
    let header = HEADER.captures(content)?.get(1)?.as_str();

    let name = NAME.captures(header)?.get(1)?.as_str().to_string();
    let description = extract_description(header)?;

    Some(FrontMatter { name, description })
}

fn extract_description(header: &str) -> Option<String> {
    let mut lines = header.lines();
    let first = loop {
        let line = lines.next()?;
        if let Some(rest) = line.strip_prefix("description:") {
            break rest.trim().to_string();
        }
    };

    let mut parts = vec![first];
    for line in lines {
        if line.trim().is_empty() || FIELD_START.is_match(line) {
            break;
        }
        parts.push(line.trim().to_string());
    }

    let description = parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}

/// Extract `metadata.version` from a document's front-matter header.
/// Returns `None` when the header, the metadata block, or the version
/// field is absent.
#[must_use]
pub fn metadata_version(content: &str) -> Option<String> {
    let header = HEADER.captures(content)?.get(1)?.as_str();

    let mut in_metadata = false;
    for line in header.lines() {
        if line.starts_with("metadata:") {
            in_metadata = true;
            continue;
        }
        if in_metadata {
            // block ends at the next top-level field
            if !line.starts_with(' ') && !line.starts_with('\t') && !line.trim().is_empty() {
                break;
            }
            if let Some(caps) = VERSION.captures(line) {
                return Some(caps[1].to_string());
            }
        }
    }
    None
}
