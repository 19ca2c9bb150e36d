//! Types for the documentation model
//!
//! The model is the neutral, queryable tree the rendering engine consumes.
//! It carries no parser state: the XML loader is one producer, tests build
//! models by hand, and any other front end can do the same.

/// Parsed doc-comment attached to an entity
#[derive(Debug, Clone, Default)]
pub struct DocBlock {
    /// Short description (first paragraph)
    pub description: String,
    /// Long description (everything after the first paragraph)
    pub long_description: String,
    /// Tagged annotations in declaration order
    pub tags: Vec<Tag>,
}

impl DocBlock {
    /// Get the first annotation with the given tag name
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Get the first non-empty value carried by the given tag name
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tag(name)
            .map(|tag| tag.description.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Get the `param` annotation referring to the given argument name
    pub fn param(&self, variable: &str) -> Option<&Tag> {
        self.tags
            .iter()
            .find(|tag| tag.name == "param" && tag.variable == variable)
    }
}

/// A tagged annotation inside a doc-block
#[derive(Debug, Clone, Default)]
pub struct Tag {
    /// Tag name (`package`, `subpackage`, `param`, `return`, ...)
    pub name: String,
    /// Declared type, when the tag carries one
    pub type_name: String,
    /// Referenced argument name, for `param` tags
    pub variable: String,
    /// Tag value or description text
    pub description: String,
}

/// A class constant
#[derive(Debug, Clone, Default)]
pub struct ConstantDef {
    /// Constant name
    pub name: String,
    /// Literal value
    pub value: String,
}

/// A class property
#[derive(Debug, Clone, Default)]
pub struct PropertyDef {
    /// Property name
    pub name: String,
    /// Literal default value
    pub value: String,
}

/// One declared argument of a method
#[derive(Debug, Clone, Default)]
pub struct ArgumentDef {
    /// Argument name
    pub name: String,
    /// Declared type
    pub type_name: String,
    /// Default value; empty when the argument is required
    pub default: String,
    /// Inline description attached to the argument itself
    pub description: String,
}

/// A method belonging to a class or interface
#[derive(Debug, Clone, Default)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Whether the method is declared static
    pub is_static: bool,
    /// Documentation comment
    pub doc: DocBlock,
    /// Arguments in declaration order
    pub arguments: Vec<ArgumentDef>,
}

impl MethodDef {
    /// Create a new method with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A documented class or interface
#[derive(Debug, Clone, Default)]
pub struct ObjectDef {
    /// Short name
    pub name: String,
    /// Fully qualified name; objects without one are skipped by the queries
    pub full_name: String,
    /// Documentation comment
    pub doc: DocBlock,
    /// Constants in declaration order
    pub constants: Vec<ConstantDef>,
    /// Properties in declaration order
    pub properties: Vec<PropertyDef>,
    /// Methods in declaration order
    pub methods: Vec<MethodDef>,
}

impl ObjectDef {
    /// Create a new object where the short and qualified names coincide
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            ..Self::default()
        }
    }
}

/// One source file: the container scope of its classes and interfaces
///
/// Package and subpackage annotations hang off the file's doc-block, not
/// off the objects it declares.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Path of the file in the analyzed project
    pub path: String,
    /// File-level documentation comment
    pub doc: DocBlock,
    /// Interfaces declared in the file
    pub interfaces: Vec<ObjectDef>,
    /// Classes declared in the file
    pub classes: Vec<ObjectDef>,
}

/// The complete documentation model for one analyzed project
#[derive(Debug, Clone, Default)]
pub struct ApiModel {
    /// Source files in analysis order
    pub files: Vec<SourceFile>,
}

impl ApiModel {
    /// Iterate every named interface with its container file, in file order
    pub fn interfaces(&self) -> impl Iterator<Item = (&SourceFile, &ObjectDef)> {
        self.files.iter().flat_map(|file| {
            file.interfaces
                .iter()
                .filter(|object| !object.full_name.is_empty())
                .map(move |object| (file, object))
        })
    }

    /// Iterate every named class with its container file, in file order
    pub fn classes(&self) -> impl Iterator<Item = (&SourceFile, &ObjectDef)> {
        self.files.iter().flat_map(|file| {
            file.classes
                .iter()
                .filter(|object| !object.full_name.is_empty())
                .map(move |object| (file, object))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, description: &str) -> Tag {
        Tag {
            name: name.to_string(),
            description: description.to_string(),
            ..Tag::default()
        }
    }

    #[test]
    fn test_tag_lookup_returns_first_match() {
        let doc = DocBlock {
            tags: vec![tag("package", "Core"), tag("package", "Shadowed")],
            ..DocBlock::default()
        };
        assert_eq!(doc.tag("package").unwrap().description, "Core");
    }

    #[test]
    fn test_tag_value_ignores_empty_values() {
        let doc = DocBlock {
            tags: vec![tag("package", "")],
            ..DocBlock::default()
        };
        assert_eq!(doc.tag_value("package"), None);
        assert_eq!(doc.tag_value("subpackage"), None);
    }

    #[test]
    fn test_param_lookup_by_variable() {
        let doc = DocBlock {
            tags: vec![
                Tag {
                    name: "param".to_string(),
                    variable: "x".to_string(),
                    description: "The x.".to_string(),
                    ..Tag::default()
                },
                Tag {
                    name: "param".to_string(),
                    variable: "y".to_string(),
                    description: "The y.".to_string(),
                    ..Tag::default()
                },
            ],
            ..DocBlock::default()
        };
        assert_eq!(doc.param("y").unwrap().description, "The y.");
        assert!(doc.param("z").is_none());
    }

    #[test]
    fn test_queries_skip_unnamed_objects() {
        let model = ApiModel {
            files: vec![SourceFile {
                classes: vec![
                    ObjectDef::new("Foo"),
                    ObjectDef {
                        name: "Anon".to_string(),
                        full_name: String::new(),
                        ..ObjectDef::default()
                    },
                ],
                ..SourceFile::default()
            }],
        };
        let names: Vec<&str> = model.classes().map(|(_, o)| o.name.as_str()).collect();
        assert_eq!(names, vec!["Foo"]);
        assert_eq!(model.interfaces().count(), 0);
    }

    #[test]
    fn test_queries_preserve_file_order() {
        let mut first = SourceFile::default();
        first.classes.push(ObjectDef::new("Alpha"));
        let mut second = SourceFile::default();
        second.classes.push(ObjectDef::new("Beta"));

        let model = ApiModel {
            files: vec![first, second],
        };
        let names: Vec<&str> = model.classes().map(|(_, o)| o.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }
}
