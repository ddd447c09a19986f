/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::ElementId;

/// Reason of a failed validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureReason {
    /// No command is named like the root element.
    UnrecognisedCommand,
    /// No rule matches the name and path of the element.
    UnrecognisedElement,
    UnrecognisedAttribute,
    MissingRequiredAttribute,
    TooManyOccurrences { required: i32, actual: i32 },
    TooFewOccurrences { required: i32, actual: i32 },
    PathTooLong,
    EmptyXml,
    RootHasParent,
}

/// The first problem found by [validate](super::validate).
///
/// Besides the reason, the failure names the offending element and
/// its structural path. Attribute failures name the attribute, and
/// occurrence failures name the counted child element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationFailure {
    pub reason: FailureReason,
    pub element: Option<ElementId>,
    pub name: String,
    pub path: String,
    pub attribute: Option<String>,
    pub rule: Option<String>,
}

impl ValidationFailure {
    pub(super) fn new(reason: FailureReason) -> ValidationFailure {
        ValidationFailure {
            reason,
            element: None,
            name: String::new(),
            path: String::new(),
            attribute: None,
            rule: None,
        }
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attribute = self.attribute.as_deref().unwrap_or_default();
        let rule = self.rule.as_deref().unwrap_or_default();
        match self.reason {
            FailureReason::UnrecognisedCommand => {
                write!(f, "unrecognised command '{}'", self.name)
            }
            FailureReason::UnrecognisedElement => {
                write!(f, "unrecognised element '{}' at '{}'", self.name, self.path)
            }
            FailureReason::UnrecognisedAttribute => write!(
                f,
                "unrecognised attribute '{}' in element '{}'",
                attribute, self.path
            ),
            FailureReason::MissingRequiredAttribute => write!(
                f,
                "missing required attribute '{}' in element '{}'",
                attribute, self.path
            ),
            FailureReason::TooManyOccurrences { required, actual } => write!(
                f,
                "too many occurrences of '{}' in '{}': at most {} allowed, {} found",
                rule, self.path, required, actual
            ),
            FailureReason::TooFewOccurrences { required, actual } => write!(
                f,
                "too few occurrences of '{}' in '{}': at least {} required, {} found",
                rule, self.path, required, actual
            ),
            FailureReason::PathTooLong => {
                write!(f, "path of element '{}' is too long", self.name)
            }
            FailureReason::EmptyXml => write!(f, "document is empty"),
            FailureReason::RootHasParent => {
                write!(f, "root element '{}' has a parent", self.name)
            }
        }
    }
}

impl Error for ValidationFailure {}

/// Problem found by [Schema::check](super::Schema::check).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaErrorKind {
    /// Command has no element rules.
    NoCmd,
    /// First rule of a command is not for the root position.
    RootPath,
    /// A nested element rule has no path.
    NoPath,
    InvalidPath,
    UnrecognisedAttrFlag,
    MinOccursNegative,
    MaxOccursNegative,
    MaxLessThanMin,
}

impl Display for SchemaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            SchemaErrorKind::NoCmd => "command has no element rules",
            SchemaErrorKind::RootPath => "first rule must have the root path",
            SchemaErrorKind::NoPath => "element rule has no path",
            SchemaErrorKind::InvalidPath => "element rule has an invalid path",
            SchemaErrorKind::UnrecognisedAttrFlag => "unrecognised attribute flag",
            SchemaErrorKind::MinOccursNegative => "minimum occurrence is negative",
            SchemaErrorKind::MaxOccursNegative => "maximum occurrence is negative",
            SchemaErrorKind::MaxLessThanMin => "maximum occurrence is less than the minimum",
        };
        f.write_str(msg)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub command: String,
    /// Index of the offending rule in the command.
    pub rule: Option<usize>,
    pub element: Option<String>,
    pub attribute: Option<String>,
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "command '{}'", self.command)?;
        if let Some(index) = self.rule {
            write!(f, ", rule {}", index)?;
        }
        if let Some(element) = &self.element {
            write!(f, " ('{}')", element)?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, ", attribute '{}'", attribute)?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl Error for SchemaError {}
