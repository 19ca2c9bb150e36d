//! Structure-file loading
//!
//! Parses a phpDocumentor `structure.xml` document into the documentation
//! model. Node selection and scalar reads go through XPath; attribute
//! metadata is read straight off the elements.

use sxd_document::dom::Element;
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};
use thiserror::Error;

use crate::model::{
    ApiModel, ArgumentDef, ConstantDef, DocBlock, MethodDef, ObjectDef, PropertyDef, SourceFile,
    Tag,
};

/// Errors raised while reading a structure document
#[derive(Debug, Error)]
pub enum StructureError {
    /// The document is not well-formed XML
    #[error("malformed structure document: {0}")]
    Xml(#[from] sxd_document::parser::Error),

    /// A query expression failed to compile
    #[error("invalid structure query '{expr}': {message}")]
    Query { expr: String, message: String },

    /// A query failed to evaluate against the document
    #[error("structure query failed: {0}")]
    Evaluate(#[from] sxd_xpath::ExecutionError),
}

/// Parse a structure document into an [`ApiModel`]
pub fn parse_structure(xml: &str) -> Result<ApiModel, StructureError> {
    let package = parser::parse(xml)?;
    let document = package.as_document();
    let queries = Queries::new()?;
    let context = Context::new();

    let mut files = Vec::new();
    for node in eval_nodes(&queries.files, &context, document.root())? {
        let Some(element) = element_of(node) else {
            continue;
        };
        files.push(read_file(&queries, &context, element)?);
    }

    Ok(ApiModel { files })
}

/// Precompiled query set for the structure schema
struct Queries {
    files: XPath,
    interfaces: XPath,
    classes: XPath,
    constants: XPath,
    properties: XPath,
    methods: XPath,
    arguments: XPath,
    tags: XPath,
    name: XPath,
    full_name: XPath,
    value: XPath,
    arg_type: XPath,
    default: XPath,
    description: XPath,
    file_path: XPath,
    doc_description: XPath,
    doc_long_description: XPath,
}

impl Queries {
    fn new() -> Result<Self, StructureError> {
        let factory = Factory::new();
        Ok(Self {
            files: compile(&factory, "//file")?,
            interfaces: compile(&factory, "interface")?,
            classes: compile(&factory, "class")?,
            constants: compile(&factory, "constant")?,
            properties: compile(&factory, "property")?,
            methods: compile(&factory, "method")?,
            arguments: compile(&factory, "argument")?,
            tags: compile(&factory, "docblock/tag")?,
            name: compile(&factory, "string(name[1])")?,
            full_name: compile(&factory, "string(full_name[1])")?,
            value: compile(&factory, "string(value[1])")?,
            arg_type: compile(&factory, "string(type[1])")?,
            default: compile(&factory, "string(default[1])")?,
            description: compile(&factory, "string(description[1])")?,
            file_path: compile(&factory, "string(@path)")?,
            doc_description: compile(&factory, "string(docblock/description[1])")?,
            doc_long_description: compile(&factory, "string(docblock/full_description[1])")?,
        })
    }
}

fn compile(factory: &Factory, expr: &str) -> Result<XPath, StructureError> {
    let compiled = factory.build(expr).map_err(|error| StructureError::Query {
        expr: expr.to_string(),
        message: error.to_string(),
    })?;
    compiled.ok_or_else(|| StructureError::Query {
        expr: expr.to_string(),
        message: "expression is empty".to_string(),
    })
}

/// Evaluate a query to its string value at the given context node
fn eval_string<'d, N>(
    xpath: &XPath,
    context: &Context<'d>,
    node: N,
) -> Result<String, StructureError>
where
    N: Into<Node<'d>>,
{
    Ok(xpath.evaluate(context, node)?.string())
}

/// Evaluate a query to its matching nodes, in document order
fn eval_nodes<'d, N>(
    xpath: &XPath,
    context: &Context<'d>,
    node: N,
) -> Result<Vec<Node<'d>>, StructureError>
where
    N: Into<Node<'d>>,
{
    match xpath.evaluate(context, node)? {
        Value::Nodeset(nodes) => Ok(nodes.document_order()),
        _ => Ok(Vec::new()),
    }
}

fn element_of(node: Node<'_>) -> Option<Element<'_>> {
    match node {
        Node::Element(element) => Some(element),
        _ => None,
    }
}

fn attribute(element: Element<'_>, name: &str) -> String {
    element.attribute_value(name).unwrap_or_default().to_string()
}

fn read_file<'d>(
    queries: &Queries,
    context: &Context<'d>,
    element: Element<'d>,
) -> Result<SourceFile, StructureError> {
    let mut interfaces = Vec::new();
    for node in eval_nodes(&queries.interfaces, context, element)? {
        let Some(object) = element_of(node) else {
            continue;
        };
        interfaces.push(read_object(queries, context, object)?);
    }

    let mut classes = Vec::new();
    for node in eval_nodes(&queries.classes, context, element)? {
        let Some(object) = element_of(node) else {
            continue;
        };
        classes.push(read_object(queries, context, object)?);
    }

    Ok(SourceFile {
        path: eval_string(&queries.file_path, context, element)?,
        doc: read_docblock(queries, context, element)?,
        interfaces,
        classes,
    })
}

fn read_object<'d>(
    queries: &Queries,
    context: &Context<'d>,
    element: Element<'d>,
) -> Result<ObjectDef, StructureError> {
    let mut constants = Vec::new();
    for node in eval_nodes(&queries.constants, context, element)? {
        let Some(constant) = element_of(node) else {
            continue;
        };
        constants.push(ConstantDef {
            name: eval_string(&queries.name, context, constant)?,
            value: eval_string(&queries.value, context, constant)?,
        });
    }

    let mut properties = Vec::new();
    for node in eval_nodes(&queries.properties, context, element)? {
        let Some(property) = element_of(node) else {
            continue;
        };
        properties.push(PropertyDef {
            name: eval_string(&queries.name, context, property)?,
            value: eval_string(&queries.value, context, property)?,
        });
    }

    let mut methods = Vec::new();
    for node in eval_nodes(&queries.methods, context, element)? {
        let Some(method) = element_of(node) else {
            continue;
        };
        methods.push(read_method(queries, context, method)?);
    }

    Ok(ObjectDef {
        name: eval_string(&queries.name, context, element)?,
        full_name: eval_string(&queries.full_name, context, element)?,
        doc: read_docblock(queries, context, element)?,
        constants,
        properties,
        methods,
    })
}

fn read_method<'d>(
    queries: &Queries,
    context: &Context<'d>,
    element: Element<'d>,
) -> Result<MethodDef, StructureError> {
    let mut arguments = Vec::new();
    for node in eval_nodes(&queries.arguments, context, element)? {
        let Some(argument) = element_of(node) else {
            continue;
        };
        arguments.push(ArgumentDef {
            name: eval_string(&queries.name, context, argument)?,
            type_name: eval_string(&queries.arg_type, context, argument)?,
            default: eval_string(&queries.default, context, argument)?,
            description: eval_string(&queries.description, context, argument)?,
        });
    }

    Ok(MethodDef {
        name: eval_string(&queries.name, context, element)?,
        is_static: element.attribute_value("static") == Some("true"),
        doc: read_docblock(queries, context, element)?,
        arguments,
    })
}

/// Read the doc-block directly under the given owner element
fn read_docblock<'d>(
    queries: &Queries,
    context: &Context<'d>,
    owner: Element<'d>,
) -> Result<DocBlock, StructureError> {
    let mut tags = Vec::new();
    for node in eval_nodes(&queries.tags, context, owner)? {
        let Some(tag) = element_of(node) else {
            continue;
        };
        tags.push(Tag {
            name: attribute(tag, "name"),
            type_name: attribute(tag, "type"),
            variable: attribute(tag, "variable"),
            description: attribute(tag, "description"),
        });
    }

    Ok(DocBlock {
        description: eval_string(&queries.doc_description, context, owner)?,
        long_description: eval_string(&queries.doc_long_description, context, owner)?,
        tags,
    })
}
