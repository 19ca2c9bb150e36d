//! Transform engine - documentation model to reStructuredText tree
//!
//! One `transform` call renders every named interface, then every named
//! class, one file per object, and finishes with the table of contents.
//! All state is invocation-scoped; nothing persists between calls.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::catalog::PackageCatalog;
use crate::model::{ApiModel, DocBlock, ObjectDef};
use crate::rst::{ObjectKind, RstGenerator};
use crate::sink::{self, WriteError};

/// Placeholder grouping for objects whose container carries no package or
/// subpackage annotation
pub const UNGROUPED: &str = "NONE";

/// Name of the table-of-contents file written at the destination root
pub const INDEX_FILE: &str = "index.rst";

/// Per-invocation rendering state, discarded when `transform` returns
struct RenderContext<'a> {
    target: &'a Path,
    generator: RstGenerator,
    catalog: PackageCatalog,
    written: Vec<PathBuf>,
}

/// Writes a documentation model as a Sphinx PHP-domain reStructuredText tree
pub struct SphinxWriter;

impl SphinxWriter {
    /// Render every named interface and class under `target`, then write
    /// the table of contents
    ///
    /// Returns the written paths in render order, the index file last. The
    /// index always reflects the complete catalog: it is rendered only
    /// after every object file has been written.
    pub fn transform(model: &ApiModel, target: &Path) -> Result<Vec<PathBuf>, WriteError> {
        let mut context = RenderContext {
            target,
            generator: RstGenerator::new(),
            catalog: PackageCatalog::new(),
            written: Vec::new(),
        };

        for (file, object) in model.interfaces() {
            Self::render_object(&mut context, &file.doc, object, ObjectKind::Interface)?;
        }

        for (file, object) in model.classes() {
            Self::render_object(&mut context, &file.doc, object, ObjectKind::Class)?;
        }

        let index_path = target.join(INDEX_FILE);
        sink::write_file(&index_path, &context.catalog.render_index())?;
        context.written.push(index_path);

        Ok(context.written)
    }

    /// Render one object: resolve its grouping, register it in the
    /// catalog and write its file
    fn render_object(
        context: &mut RenderContext<'_>,
        scope: &DocBlock,
        object: &ObjectDef,
        kind: ObjectKind,
    ) -> Result<(), WriteError> {
        // Grouping metadata lives on the container scope, not the object.
        // Absent and empty annotations both resolve to the placeholder.
        let package = scope.tag_value("package").unwrap_or(UNGROUPED);
        let subpackage = scope.tag_value("subpackage").unwrap_or(UNGROUPED);

        let relative = format!(
            "{package}{sep}{subpackage}{sep}{name}.rst",
            sep = MAIN_SEPARATOR,
            name = object.name,
        );

        context
            .catalog
            .register(package, subpackage, &object.name, &relative);

        let body = context.generator.object(object, kind);
        let path = context.target.join(&relative);
        sink::write_file(&path, &body)?;
        context.written.push(path);

        Ok(())
    }
}
