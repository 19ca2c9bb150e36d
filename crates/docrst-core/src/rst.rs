//! reStructuredText generation for documented objects
//!
//! Every renderer here is a pure function from model data to text: nothing
//! touches the file system and nothing mutates the model. Output follows
//! the Sphinx PHP domain's directive forms, tab-indented.

use std::fmt::Write;

use crate::crosslink::DescriptionFormatter;
use crate::model::{ArgumentDef, ConstantDef, DocBlock, MethodDef, ObjectDef, PropertyDef};

/// Kind of object a generated file documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Class,
    Interface,
}

impl ObjectKind {
    /// Get the PHP-domain directive name for the object kind
    pub fn directive(self) -> &'static str {
        match self {
            ObjectKind::Class => "class",
            ObjectKind::Interface => "interface",
        }
    }
}

/// Generates Sphinx PHP-domain reStructuredText from documented objects
pub struct RstGenerator {
    descriptions: DescriptionFormatter,
}

impl RstGenerator {
    pub fn new() -> Self {
        Self {
            descriptions: DescriptionFormatter::new(),
        }
    }

    /// Generate the complete file body for a class or interface
    ///
    /// Members render in constant, property, method order; within each
    /// group the model's declaration order is kept.
    pub fn object(&self, object: &ObjectDef, kind: ObjectKind) -> String {
        let mut output = String::new();

        // Title with an underline of matching character width
        writeln!(output, "{}", object.name).unwrap();
        writeln!(output, "{}", "-".repeat(object.name.chars().count())).unwrap();
        writeln!(output).unwrap();
        writeln!(output, ".. php:{}:: {}", kind.directive(), object.name).unwrap();
        writeln!(output).unwrap();

        let description = self.descriptions.format(&object.doc.description, 1);
        if !description.is_empty() {
            write!(output, "\t{}\n\n", description).unwrap();
        }

        let long_description = self.descriptions.format(&object.doc.long_description, 1);
        if !long_description.is_empty() {
            write!(output, "\t{}\n\n", long_description).unwrap();
        }

        for constant in &object.constants {
            output.push_str(&Self::constant(constant));
        }

        for property in &object.properties {
            output.push_str(&Self::property(property));
        }

        for method in &object.methods {
            output.push_str(&self.method(method));
        }

        output
    }

    /// Generate the `php:const` fragment for a constant
    pub fn constant(constant: &ConstantDef) -> String {
        format!(
            "\t.. php:const:: {}\n\n\t\t{}\n",
            constant.name, constant.value
        )
    }

    /// Generate the `php:attr` fragment for a property
    pub fn property(property: &PropertyDef) -> String {
        format!(
            "\t.. php:attr:: {}\n\n\t\t{}\n",
            property.name, property.value
        )
    }

    /// Generate the `php:method`/`php:staticmethod` fragment for a method
    pub fn method(&self, method: &MethodDef) -> String {
        let directive = if method.is_static {
            "staticmethod"
        } else {
            "method"
        };
        let mut contents = format!(
            "\t.. php:{}:: {}({})\n\n",
            directive,
            method.name,
            Self::argument_list(&method.arguments)
        );

        let description = self.descriptions.format(&method.doc.description, 2);
        if !description.is_empty() {
            write!(contents, "\t\t{}\n\n", description).unwrap();
        }

        let long_description = self.descriptions.format(&method.doc.long_description, 2);
        if !long_description.is_empty() {
            write!(contents, "\t\t{}\n\n", long_description).unwrap();
        }

        for argument in &method.arguments {
            contents.push_str(&self.argument(argument, &method.doc));
        }

        if let Some(ret) = method.doc.tag("return") {
            writeln!(contents, "\t\t:returns: {}", ret.description).unwrap();
            write!(contents, "\t\t:rtype: {}\n\n", ret.type_name).unwrap();
        }

        contents.push_str("\n\n");
        contents
    }

    /// Build the parenthesized argument list for a method signature
    ///
    /// An argument with a default renders in optional-argument brackets:
    /// `f(a [, b = 1])`. Nothing precedes the first argument.
    fn argument_list(arguments: &[ArgumentDef]) -> String {
        let mut list = String::new();
        let mut first = true;
        for argument in arguments {
            let has_default = !argument.default.is_empty();
            if !first {
                list.push(' ');
            }
            if has_default {
                list.push('[');
            }
            if !first {
                list.push_str(", ");
            }
            list.push_str(&argument.name);
            if has_default {
                write!(list, " = {}]", argument.default).unwrap();
            }
            first = false;
        }
        list
    }

    /// Generate the `:param:` line for one argument
    ///
    /// The argument's own description wins; an empty one falls back to the
    /// owning method's matching `param` annotation. No match renders an
    /// empty description, never an error.
    fn argument(&self, argument: &ArgumentDef, method_doc: &DocBlock) -> String {
        let description = if argument.description.is_empty() {
            method_doc
                .param(&argument.name)
                .map(|tag| self.descriptions.format(&tag.description, 3))
                .unwrap_or_default()
        } else {
            self.descriptions.format(&argument.description, 3)
        };
        format!(
            "\t\t:param {} {}: {}\n",
            argument.type_name, argument.name, description
        )
    }
}

impl Default for RstGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;

    fn argument(name: &str, type_name: &str, default: &str) -> ArgumentDef {
        ArgumentDef {
            name: name.to_string(),
            type_name: type_name.to_string(),
            default: default.to_string(),
            ..ArgumentDef::default()
        }
    }

    #[test]
    fn test_constant_fragment() {
        let constant = ConstantDef {
            name: "VERSION".to_string(),
            value: "'1.0'".to_string(),
        };
        assert_eq!(
            RstGenerator::constant(&constant),
            "\t.. php:const:: VERSION\n\n\t\t'1.0'\n"
        );
    }

    #[test]
    fn test_property_fragment_with_missing_value() {
        let property = PropertyDef {
            name: "$bar".to_string(),
            value: String::new(),
        };
        assert_eq!(
            RstGenerator::property(&property),
            "\t.. php:attr:: $bar\n\n\t\t\n"
        );
    }

    #[test]
    fn test_argument_list_punctuation() {
        let arguments = vec![
            argument("a", "int", ""),
            argument("b", "string", "'x'"),
            argument("c", "array", ""),
        ];
        assert_eq!(
            RstGenerator::argument_list(&arguments),
            "a [, b = 'x'] , c"
        );
    }

    #[test]
    fn test_argument_list_single_optional() {
        let arguments = vec![argument("x", "int", "1")];
        assert_eq!(RstGenerator::argument_list(&arguments), "[x = 1]");
    }

    #[test]
    fn test_method_directive_for_static() {
        let generator = RstGenerator::new();
        let mut method = MethodDef::new("bar");
        method.is_static = true;
        method.arguments.push(argument("x", "int", "1"));
        let fragment = generator.method(&method);
        assert!(fragment.starts_with("\t.. php:staticmethod:: bar([x = 1])\n\n"));
    }

    #[test]
    fn test_method_return_block() {
        let generator = RstGenerator::new();
        let mut method = MethodDef::new("one");
        method.doc.tags.push(Tag {
            name: "return".to_string(),
            type_name: "int".to_string(),
            description: "One.".to_string(),
            ..Tag::default()
        });
        let fragment = generator.method(&method);
        assert!(fragment.contains("\t\t:returns: One.\n\t\t:rtype: int\n\n"));
    }

    #[test]
    fn test_method_without_return_tag_has_no_block() {
        let generator = RstGenerator::new();
        let fragment = generator.method(&MethodDef::new("plain"));
        assert!(!fragment.contains(":returns:"));
        assert!(!fragment.contains(":rtype:"));
        assert_eq!(fragment, "\t.. php:method:: plain()\n\n\n\n");
    }

    #[test]
    fn test_param_line_prefers_inline_description() {
        let generator = RstGenerator::new();
        let mut method = MethodDef::new("f");
        let mut arg = argument("x", "int", "");
        arg.description = "Inline.".to_string();
        method.arguments.push(arg);
        method.doc.tags.push(Tag {
            name: "param".to_string(),
            variable: "x".to_string(),
            description: "From tag.".to_string(),
            ..Tag::default()
        });
        let fragment = generator.method(&method);
        assert!(fragment.contains("\t\t:param int x: Inline.\n"));
    }

    #[test]
    fn test_param_line_falls_back_to_annotation() {
        let generator = RstGenerator::new();
        let mut method = MethodDef::new("f");
        method.arguments.push(argument("x", "int", ""));
        method.doc.tags.push(Tag {
            name: "param".to_string(),
            variable: "x".to_string(),
            description: "From tag.".to_string(),
            ..Tag::default()
        });
        let fragment = generator.method(&method);
        assert!(fragment.contains("\t\t:param int x: From tag.\n"));
    }

    #[test]
    fn test_param_line_with_no_description_anywhere() {
        let generator = RstGenerator::new();
        let mut method = MethodDef::new("f");
        method.arguments.push(argument("x", "", ""));
        let fragment = generator.method(&method);
        assert!(fragment.contains("\t\t:param  x: \n"));
    }

    #[test]
    fn test_object_title_and_directive() {
        let generator = RstGenerator::new();
        let mut object = ObjectDef::new("Foo");
        object.doc.description = "A foo.".to_string();
        let body = generator.object(&object, ObjectKind::Class);
        assert!(body.starts_with("Foo\n---\n\n.. php:class:: Foo\n\n\tA foo.\n\n"));
    }

    #[test]
    fn test_interface_directive() {
        let generator = RstGenerator::new();
        let object = ObjectDef::new("Countable");
        let body = generator.object(&object, ObjectKind::Interface);
        assert!(body.contains(".. php:interface:: Countable\n"));
    }

    #[test]
    fn test_object_member_order() {
        let generator = RstGenerator::new();
        let mut object = ObjectDef::new("Foo");
        object.methods.push(MethodDef::new("m"));
        object.constants.push(ConstantDef {
            name: "C".to_string(),
            value: "1".to_string(),
        });
        object.properties.push(PropertyDef {
            name: "$p".to_string(),
            value: "null".to_string(),
        });
        let body = generator.object(&object, ObjectKind::Class);

        let constant = body.find(".. php:const:: C").unwrap();
        let property = body.find(".. php:attr:: $p").unwrap();
        let method = body.find(".. php:method:: m()").unwrap();
        assert!(constant < property && property < method);
    }

    #[test]
    fn test_object_multiline_description_indented() {
        let generator = RstGenerator::new();
        let mut object = ObjectDef::new("Foo");
        object.doc.description = "Line one.\nLine two.".to_string();
        let body = generator.object(&object, ObjectKind::Class);
        assert!(body.contains("\tLine one.\n\tLine two.\n\n"));
    }
}
