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

use super::ATTR_FLAGS;
use super::Command;
use super::ElementRule;
use super::Schema;
use super::SchemaError;
use super::SchemaErrorKind;

fn check_rule(index: usize, rule: &ElementRule) -> Result<(), (SchemaErrorKind, Option<String>)> {
    match (index, rule.path.as_deref()) {
        (0, Some("")) => (),
        (0, _) => return Err((SchemaErrorKind::RootPath, None)),
        (_, None) => return Err((SchemaErrorKind::NoPath, None)),
        (_, Some("")) => return Err((SchemaErrorKind::InvalidPath, None)),
        (_, Some(_)) => (),
    }

    for attribute in rule.attributes.iter().flatten() {
        if attribute.flags & !ATTR_FLAGS != 0 {
            return Err((
                SchemaErrorKind::UnrecognisedAttrFlag,
                Some(attribute.name.clone()),
            ));
        }
    }

    if rule.min_occurs < 0 {
        return Err((SchemaErrorKind::MinOccursNegative, None));
    }
    if rule.max_occurs < 0 {
        return Err((SchemaErrorKind::MaxOccursNegative, None));
    }
    if rule.max_occurs != 0 && rule.min_occurs > rule.max_occurs {
        return Err((SchemaErrorKind::MaxLessThanMin, None));
    }
    Ok(())
}

fn check_command(command: &Command) -> Result<(), SchemaError> {
    if command.rules.is_empty() {
        return Err(SchemaError {
            kind: SchemaErrorKind::NoCmd,
            command: command.name.clone(),
            rule: None,
            element: None,
            attribute: None,
        });
    }
    for (index, rule) in command.rules.iter().enumerate() {
        check_rule(index, rule).map_err(|(kind, attribute)| SchemaError {
            kind,
            command: command.name.clone(),
            rule: Some(index),
            element: Some(rule.element.clone()),
            attribute,
        })?;
    }
    Ok(())
}

impl Schema {
    /// Checks the schema itself for mistakes.
    ///
    /// Every command needs rules, the first of which is for the root
    /// position. Nested rules need non-empty paths, attribute flags
    /// must be known, and occurrence bounds must make sense.
    pub fn check(&self) -> Result<(), SchemaError> {
        for command in &self.commands {
            if let Err(err) = check_command(command) {
                debug!(error = %err, "schema check failed");
                return Err(err);
            }
        }
        Ok(())
    }
}
