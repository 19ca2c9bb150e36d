//! Inline documentation markup formatting
//!
//! Rewrites `{@link ...}` references in doc-comment text into PHP-domain
//! cross-reference roles and re-indents multi-line text so continuation
//! lines align with the directive body that embeds them.

use regex::{Captures, Regex};

/// Formats free-text descriptions for embedding in reStructuredText
pub struct DescriptionFormatter {
    line_break: Regex,
    attr_link: Regex,
    method_link: Regex,
    class_link: Regex,
}

impl DescriptionFormatter {
    /// Compile the markup patterns
    pub fn new() -> Self {
        Self {
            line_break: Regex::new(r"\r\n|\r|\n").unwrap(),
            attr_link: Regex::new(r"\{@link ([^}:]+)::\$([^}]+)\}").unwrap(),
            method_link: Regex::new(r"\{@link ([^}:]+)::([^}]+?)(?:\(\))?\}").unwrap(),
            class_link: Regex::new(r"\{@link ([^}]+)\}").unwrap(),
        }
    }

    /// Prepare description text for embedding at the given tab depth
    ///
    /// Trims the text, indents every continuation line by `depth` tabs and
    /// rewrites link references. Empty input stays empty, so callers can
    /// skip the surrounding block entirely.
    pub fn format(&self, text: &str, depth: usize) -> String {
        let indent = "\t".repeat(depth);
        let continuation = format!("\n{indent}");
        let text = self
            .line_break
            .replace_all(text.trim(), continuation.as_str())
            .into_owned();
        self.rewrite_links(&text)
    }

    /// Rewrite `{@link ...}` references into cross-reference roles
    ///
    /// Field references (`Class::$field`) are tried before method
    /// references, and methods before bare class names; the shapes are
    /// mutually exclusive so nothing is rewritten twice. Text that matches
    /// no shape passes through unchanged.
    pub fn rewrite_links(&self, text: &str) -> String {
        let text = self
            .attr_link
            .replace_all(text, ":php:attr:`${1}::$$${2}`")
            .into_owned();
        let text = self
            .method_link
            .replace_all(&text, |caps: &Captures<'_>| {
                // Method references render with exactly one trailing `()`,
                // whether or not the source carried parentheses.
                format!(":php:meth:`{}::{}()`", &caps[1], caps[2].trim_end_matches("()"))
            })
            .into_owned();
        self.class_link
            .replace_all(&text, ":php:class:`${1}`")
            .into_owned()
    }
}

impl Default for DescriptionFormatter {
    fn default() -> Self {
        Self::new()
    }
}
