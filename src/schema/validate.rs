/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use tracing::debug;

use crate::Cursor;
use crate::Document;
use crate::path::parent_pattern;

use super::Command;
use super::ElementRule;
use super::FailureReason;
use super::Schema;
use super::ValidationFailure;

fn failure(reason: FailureReason, element: Cursor<'_>, path: &str) -> ValidationFailure {
    ValidationFailure {
        element: element.id(),
        name: element.name().to_string(),
        path: path.to_string(),
        ..ValidationFailure::new(reason)
    }
}

fn rule_matches(rule: &ElementRule, element: Cursor<'_>, path: &str) -> bool {
    if rule.element != element.name() {
        return false;
    }
    match rule.path.as_deref() {
        Some("") => element.parent().is_null(),
        Some(pattern) => pattern == path,
        None => false,
    }
}

fn check_attributes(
    rule: &ElementRule,
    element: Cursor<'_>,
    path: &str,
) -> Result<(), ValidationFailure> {
    for (name, _) in element.attributes() {
        if rule.find_attribute(name).is_none() {
            return Err(ValidationFailure {
                attribute: Some(name.to_string()),
                ..failure(FailureReason::UnrecognisedAttribute, element, path)
            });
        }
    }
    for attribute in rule.attributes.iter().flatten() {
        if attribute.is_required() && element.attribute(&attribute.name).is_none() {
            return Err(ValidationFailure {
                attribute: Some(attribute.name.clone()),
                ..failure(FailureReason::MissingRequiredAttribute, element, path)
            });
        }
    }
    Ok(())
}

// Counts the children of the element for every rule addressing
// the element as the parent position.
fn check_occurrences(
    command: &Command,
    element: Cursor<'_>,
    path: &str,
) -> Result<(), ValidationFailure> {
    for rule in &command.rules {
        if !rule.has_occurrence_bounds() {
            continue;
        }
        let Some(parent) = rule.path.as_deref().and_then(parent_pattern) else {
            continue;
        };
        if parent != path {
            continue;
        }

        let count = element
            .children()
            .filter(|child| child.name() == rule.element)
            .count();
        let actual = i32::try_from(count).unwrap_or(i32::MAX);
        let reason = if actual < rule.min_occurs {
            FailureReason::TooFewOccurrences {
                required: rule.min_occurs,
                actual,
            }
        } else if rule.max_occurs != 0 && actual > rule.max_occurs {
            FailureReason::TooManyOccurrences {
                required: rule.max_occurs,
                actual,
            }
        } else {
            continue;
        };
        return Err(ValidationFailure {
            rule: Some(rule.element.clone()),
            ..failure(reason, element, path)
        });
    }
    Ok(())
}

fn check_element(command: &Command, element: Cursor<'_>) -> Result<(), ValidationFailure> {
    let path = element
        .path()
        .map_err(|_| failure(FailureReason::PathTooLong, element, ""))?;

    let Some(rule) = command
        .rules
        .iter()
        .find(|rule| rule_matches(rule, element, &path))
    else {
        return Err(failure(FailureReason::UnrecognisedElement, element, &path));
    };

    check_attributes(rule, element, &path)?;
    check_occurrences(command, element, &path)
}

fn check_document(doc: &Document, schema: &Schema) -> Result<(), ValidationFailure> {
    let root = doc.root();
    if root.is_null() {
        return Err(ValidationFailure::new(FailureReason::EmptyXml));
    }
    if !root.parent().is_null() {
        return Err(failure(FailureReason::RootHasParent, root, ""));
    }
    let Some(command) = schema.find_command(root.name()) else {
        return Err(failure(
            FailureReason::UnrecognisedCommand,
            root,
            root.name(),
        ));
    };

    // Document order, so the first failure is the first one in the text
    for element in root.descendant_or_self() {
        check_element(command, element)?;
    }
    Ok(())
}

/// Validates the document against the schema.
///
/// The root element selects the command by name. Then every element
/// is checked in document order: it must match a rule by name and
/// path, its attributes must be permitted by the rule, the required
/// ones must be present, and its children must satisfy the
/// occurrence bounds of the rules addressing them. The first problem
/// found is returned.
///
/// Validation only reads the document, so the same document and
/// schema can be validated from several threads at once.
pub fn validate(doc: &Document, schema: &Schema) -> Result<(), ValidationFailure> {
    let result = check_document(doc, schema);
    if let Err(failure) = &result {
        debug!(reason = ?failure.reason, error = %failure, "validation failed");
    }
    result
}
