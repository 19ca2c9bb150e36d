//! Package catalog and table-of-contents rendering
//!
//! The catalog accumulates every rendered object during one traversal and
//! is consumed once at the end to render the index document.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::MAIN_SEPARATOR;

/// Title of the generated table of contents
const INDEX_TITLE: &str = "API Documentation";

/// An object registered under a subpackage
#[derive(Debug, Clone)]
struct CatalogEntry {
    name: String,
    path: String,
}

/// Objects grouped under one subpackage, in registration order
#[derive(Debug, Clone)]
struct SubpackageGroup {
    name: String,
    entries: Vec<CatalogEntry>,
}

/// Three-level grouping of every rendered object by
/// package, subpackage and name
///
/// Packages iterate in ascending name order; subpackages and objects keep
/// registration order. Registering a duplicate (package, subpackage, name)
/// key replaces the stored path in place, keeping the original position.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalog {
    packages: BTreeMap<String, Vec<SubpackageGroup>>,
}

impl PackageCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rendered object and its relative output path
    pub fn register(&mut self, package: &str, subpackage: &str, name: &str, path: &str) {
        let subpackages = self.packages.entry(package.to_string()).or_default();
        let position = match subpackages.iter().position(|group| group.name == subpackage) {
            Some(position) => position,
            None => {
                subpackages.push(SubpackageGroup {
                    name: subpackage.to_string(),
                    entries: Vec::new(),
                });
                subpackages.len() - 1
            }
        };
        let group = &mut subpackages[position];

        match group.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.path = path.to_string(),
            None => group.entries.push(CatalogEntry {
                name: name.to_string(),
                path: path.to_string(),
            }),
        }
    }

    /// Render the table-of-contents document from the completed catalog
    ///
    /// One `toctree` entry per object: the registered path with its
    /// extension stripped and directory separators rendered as `/`.
    pub fn render_index(&self) -> String {
        let mut toc = String::new();
        writeln!(toc, "{}", INDEX_TITLE).unwrap();
        writeln!(toc, "{}", "-".repeat(INDEX_TITLE.len())).unwrap();
        writeln!(toc).unwrap();
        toc.push_str(".. toctree::\n");

        for subpackages in self.packages.values() {
            for group in subpackages {
                for entry in &group.entries {
                    let stem = entry.path.strip_suffix(".rst").unwrap_or(&entry.path);
                    write!(toc, "\n\t{}", stem.replace(MAIN_SEPARATOR, "/")).unwrap();
                }
            }
        }

        toc
    }
}
