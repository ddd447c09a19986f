/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod check;
mod error;
mod validate;

pub use error::FailureReason;
pub use error::SchemaError;
pub use error::SchemaErrorKind;
pub use error::ValidationFailure;
pub use validate::validate;

/// Attribute must be present on the element.
pub const ATTR_REQUIRED: u32 = 0x0001;

/// All recognised attribute flag bits.
pub const ATTR_FLAGS: u32 = ATTR_REQUIRED;

/// A permitted attribute of an element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeRule {
    pub name: String,
    pub flags: u32,
}

impl AttributeRule {
    pub fn new(name: &str) -> AttributeRule {
        AttributeRule {
            name: name.to_string(),
            flags: 0,
        }
    }

    pub fn required(name: &str) -> AttributeRule {
        AttributeRule {
            name: name.to_string(),
            flags: ATTR_REQUIRED,
        }
    }

    pub fn is_required(&self) -> bool {
        self.flags & ATTR_REQUIRED != 0
    }
}

/// Permitted element at a structural position.
///
/// The path pattern is the structural path of the element, like
/// `file.dir.filesystem`, or the empty string for the root. Without
/// an attribute list the element may have no attributes at all.
///
/// Occurrence bounds count the element among the children of one
/// parent. A zero maximum means unbounded, and rules with both
/// bounds zero are not counted at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElementRule {
    pub element: String,
    pub path: Option<String>,
    pub attributes: Option<Vec<AttributeRule>>,
    pub min_occurs: i32,
    pub max_occurs: i32,
}

impl ElementRule {
    /// Creates a rule for the root element.
    pub fn root(element: &str) -> ElementRule {
        ElementRule::new(element, Some(""))
    }

    /// Creates a rule for a nested element.
    pub fn child(element: &str, path: &str) -> ElementRule {
        ElementRule::new(element, Some(path))
    }

    pub fn new(element: &str, path: Option<&str>) -> ElementRule {
        ElementRule {
            element: element.to_string(),
            path: path.map(str::to_string),
            attributes: None,
            min_occurs: 0,
            max_occurs: 0,
        }
    }

    pub fn attribute(self, name: &str) -> ElementRule {
        self.with_attribute(AttributeRule::new(name))
    }

    pub fn required_attribute(self, name: &str) -> ElementRule {
        self.with_attribute(AttributeRule::required(name))
    }

    pub fn with_attribute(mut self, rule: AttributeRule) -> ElementRule {
        self.attributes.get_or_insert_with(Vec::new).push(rule);
        self
    }

    pub fn occurs(mut self, min_occurs: i32, max_occurs: i32) -> ElementRule {
        self.min_occurs = min_occurs;
        self.max_occurs = max_occurs;
        self
    }

    /// Checks whether the rule has any occurrence bound to enforce.
    pub fn has_occurrence_bounds(&self) -> bool {
        self.min_occurs != 0 || self.max_occurs != 0
    }

    pub fn find_attribute(&self, name: &str) -> Option<&AttributeRule> {
        self.attributes
            .as_deref()?
            .iter()
            .find(|rule| rule.name == name)
    }
}

/// Rules of the documents with a given root element name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub name: String,
    pub rules: Vec<ElementRule>,
}

impl Command {
    pub fn new(name: &str) -> Command {
        Command {
            name: name.to_string(),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: ElementRule) -> Command {
        self.rules.push(rule);
        self
    }
}

/// A declarative description of the permitted documents.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use xmlvet::{Command, Document, ElementRule, Schema, validate};
///
/// let schema = Schema::new().command(
///     Command::new("filesystem")
///         .rule(ElementRule::root("filesystem").attribute("version"))
///         .rule(ElementRule::child("dir", "dir.filesystem").required_attribute("name"))
///         .rule(ElementRule::child("file", "file.dir.filesystem").attribute("name").occurs(1, 0)),
/// );
/// assert!(schema.check().is_ok());
///
/// let doc = Document::from_str("<filesystem><dir name='/'><file/></dir></filesystem>")?;
/// assert!(validate(&doc, &schema).is_ok());
/// # Ok::<(), xmlvet::ParseError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    commands: Vec<Command>,
}

impl Schema {
    pub fn new() -> Schema {
        Schema {
            commands: Vec::new(),
        }
    }

    pub fn command(mut self, command: Command) -> Schema {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Finds the command for a root element name.
    ///
    /// If several commands have the same name the last one wins.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().rev().find(|command| command.name == name)
    }
}

#[cfg(test)]
mod tests;
