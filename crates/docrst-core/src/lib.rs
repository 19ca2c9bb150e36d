//! docrst core - rendering engine for Sphinx PHP-domain documentation
//!
//! This crate turns a parsed PHP API-documentation model into a directory
//! tree of reStructuredText files consumable by the Sphinx PHP domain:
//! - Model: the queryable documentation tree
//! - Xml: structure-file loading into the model
//! - Crosslink: inline doc-comment markup rewriting and re-indentation
//! - Rst: per-entity and per-object text templates
//! - Catalog: package grouping and table-of-contents rendering
//! - Writer: the traversal that renders and writes every object

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Documentation model - the queryable tree of documented entities
pub mod model;

/// Structure-file loader - builds the model from phpDocumentor XML
pub mod xml;

/// Inline markup formatting - link rewriting and indentation
pub mod crosslink;

/// reStructuredText templates for entities and objects
pub mod rst;

/// Package catalog and table-of-contents rendering
pub mod catalog;

/// File output for rendered documents
pub mod sink;

/// Transform engine - model to reStructuredText tree
pub mod writer;

/// Convenience re-export of the model root
pub use model::ApiModel;

/// Convenience re-export of the structure loader
pub use xml::parse_structure;

/// Convenience re-export of the transform engine
pub use writer::SphinxWriter;
