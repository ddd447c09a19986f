/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::str::FromStr;

use super::*;
use crate::Document;

fn filesystem(file: ElementRule) -> Schema {
    Schema::new().command(
        Command::new("filesystem")
            .rule(ElementRule::root("filesystem").attribute("version"))
            .rule(
                ElementRule::child("dir", "dir.filesystem")
                    .attribute("version")
                    .attribute("name"),
            )
            .rule(file),
    )
}

fn file_rule() -> ElementRule {
    ElementRule::child("file", "file.dir.filesystem")
        .attribute("version")
        .attribute("name")
}

const EXAMPLE: &str = "<filesystem version=\"1\">\
    <dir name=\"/etc\">\
    <file name=\"passwd\"/><file name=\"group\"/><file name=\"hosts\" version=\"2\"/>\
    </dir>\
    <dir name=\"/tmp\" version=\"1\"><file name=\"x\"/></dir>\
    </filesystem>";

fn reason(doc: &Document, schema: &Schema) -> FailureReason {
    validate(doc, schema).unwrap_err().reason
}

#[test]
fn valid() {
    let doc = Document::from_str(EXAMPLE).unwrap();
    let schema = filesystem(file_rule());
    assert_eq!(schema.check(), Ok(()));
    assert_eq!(validate(&doc, &schema), Ok(()));
    // Deterministic
    assert_eq!(validate(&doc, &schema), Ok(()));
}

#[test]
fn unrecognised_command() {
    let doc = Document::from_str(EXAMPLE).unwrap();
    let schema = Schema::new().command(
        Command::new("filesystemp").rule(ElementRule::root("filesystem").attribute("version")),
    );
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(failure.reason, FailureReason::UnrecognisedCommand);
    assert_eq!(failure.name, "filesystem");
    assert_eq!(failure.to_string(), "unrecognised command 'filesystem'");
}

#[test]
fn unrecognised_element() {
    let doc = Document::from_str(EXAMPLE).unwrap();
    let schema = Schema::new().command(
        Command::new("filesystem")
            .rule(ElementRule::root("filesystem").attribute("version"))
            .rule(
                ElementRule::child("dir", "dir.filesystem")
                    .attribute("version")
                    .attribute("name"),
            ),
    );
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(failure.reason, FailureReason::UnrecognisedElement);
    assert_eq!(failure.name, "file");
    assert_eq!(failure.path, "file.dir.filesystem");
    // First file of the first dir in document order
    assert_eq!(
        failure.element,
        doc.find_child("dir").first_child().id()
    );

    // Right name at the wrong position
    let doc = Document::from_str("<filesystem><file/></filesystem>").unwrap();
    let failure = validate(&doc, &filesystem(file_rule())).unwrap_err();
    assert_eq!(failure.reason, FailureReason::UnrecognisedElement);
    assert_eq!(failure.path, "file.filesystem");
}

#[test]
fn attributes() {
    let doc = Document::from_str(EXAMPLE).unwrap();
    let schema = filesystem(ElementRule::child("file", "file.dir.filesystem").attribute("name"));
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(failure.reason, FailureReason::UnrecognisedAttribute);
    assert_eq!(failure.attribute.as_deref(), Some("version"));
    assert_eq!(
        failure.to_string(),
        "unrecognised attribute 'version' in element 'file.dir.filesystem'"
    );

    // No attribute list permits no attributes
    let schema = filesystem(ElementRule::child("file", "file.dir.filesystem"));
    assert_eq!(reason(&doc, &schema), FailureReason::UnrecognisedAttribute);

    let schema = filesystem(
        ElementRule::child("file", "file.dir.filesystem")
            .required_attribute("version")
            .attribute("name"),
    );
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(failure.reason, FailureReason::MissingRequiredAttribute);
    assert_eq!(failure.attribute.as_deref(), Some("version"));
    assert_eq!(failure.element, doc.find_child("dir").first_child().id());

    // Tokenizer rejects duplicates, built documents may still have them
    let doc = Document::from_str("<filesystem version='1' version='2'/>");
    assert!(doc.is_err());
    let mut doc = Document::new();
    let root = doc.add_element(None, "filesystem").unwrap();
    doc.set_attribute(root, "version", "1").unwrap();
    doc.set_attribute(root, "version", "2").unwrap();
    assert_eq!(validate(&doc, &filesystem(file_rule())), Ok(()));
}

#[test]
fn occurrences() {
    // Counts are {a: 2, b: 0}
    let doc = Document::from_str("<r><a/><a/></r>").unwrap();
    let schema = |a: (i32, i32), b: (i32, i32)| {
        Schema::new().command(
            Command::new("r")
                .rule(ElementRule::root("r"))
                .rule(ElementRule::child("a", "a.r").occurs(a.0, a.1))
                .rule(ElementRule::child("b", "b.r").occurs(b.0, b.1)),
        )
    };

    assert_eq!(validate(&doc, &schema((1, 3), (0, 0))), Ok(()));
    assert_eq!(validate(&doc, &schema((2, 2), (0, 5))), Ok(()));
    assert_eq!(validate(&doc, &schema((1, 0), (0, 0))), Ok(()));
    assert_eq!(
        reason(&doc, &schema((3, 0), (0, 0))),
        FailureReason::TooFewOccurrences {
            required: 3,
            actual: 2
        }
    );
    let failure = validate(&doc, &schema((0, 1), (0, 0))).unwrap_err();
    assert_eq!(
        failure.reason,
        FailureReason::TooManyOccurrences {
            required: 1,
            actual: 2
        }
    );
    assert_eq!(failure.rule.as_deref(), Some("a"));
    assert_eq!(failure.name, "r");
    assert_eq!(
        failure.to_string(),
        "too many occurrences of 'a' in 'r': at most 1 allowed, 2 found"
    );
    assert_eq!(
        reason(&doc, &schema((0, 0), (1, 0))),
        FailureReason::TooFewOccurrences {
            required: 1,
            actual: 0
        }
    );
}

#[test]
fn occurrences_per_parent() {
    let doc = Document::from_str(EXAMPLE).unwrap();
    // The first dir has three files, the second has one
    let schema = filesystem(file_rule().occurs(0, 3));
    assert_eq!(validate(&doc, &schema), Ok(()));
    let schema = filesystem(file_rule().occurs(0, 2));
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(
        failure.reason,
        FailureReason::TooManyOccurrences {
            required: 2,
            actual: 3
        }
    );
    assert_eq!(failure.element, doc.find_child("dir").id());
    let schema = filesystem(file_rule().occurs(2, 4));
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(
        failure.reason,
        FailureReason::TooFewOccurrences {
            required: 2,
            actual: 1
        }
    );
    assert_eq!(failure.element, doc.find_child("dir").next().id());
}

#[test]
fn empty_document() {
    let doc = Document::new();
    let failure = validate(&doc, &filesystem(file_rule())).unwrap_err();
    assert_eq!(failure.reason, FailureReason::EmptyXml);
    assert_eq!(failure.element, None);
    assert_eq!(failure.to_string(), "document is empty");

    let mut doc = Document::from_str(EXAMPLE).unwrap();
    doc.clear();
    assert_eq!(reason(&doc, &filesystem(file_rule())), FailureReason::EmptyXml);
}

#[test]
fn path_too_long() {
    let name = "n".repeat(200);
    let mut doc = Document::new();
    let mut parent = None;
    for _ in 0..6 {
        parent = Some(doc.add_element(parent, &name).unwrap());
    }
    // Rules for every level that still fits
    let mut command = Command::new(&name).rule(ElementRule::root(&name));
    for depth in 1..5 {
        let path = vec![name.as_str(); depth + 1].join(".");
        command = command.rule(ElementRule::child(&name, &path));
    }
    let schema = Schema::new().command(command);
    let failure = validate(&doc, &schema).unwrap_err();
    assert_eq!(failure.reason, FailureReason::PathTooLong);
    assert_eq!(failure.element, parent);
}

fn check_error(schema: Schema) -> SchemaErrorKind {
    schema.check().unwrap_err().kind
}

fn single(rules: Vec<ElementRule>) -> Schema {
    let mut command = Command::new("filesystem");
    command.rules = rules;
    Schema::new().command(command)
}

#[test]
fn self_check() {
    assert_eq!(filesystem(file_rule()).check(), Ok(()));
    assert_eq!(Schema::new().check(), Ok(()));

    assert_eq!(
        check_error(Schema::new().command(Command::new("filesystem"))),
        SchemaErrorKind::NoCmd
    );
    assert_eq!(
        check_error(single(vec![ElementRule::child("filesystem", "filesystem")])),
        SchemaErrorKind::RootPath
    );
    assert_eq!(
        check_error(single(vec![ElementRule::new("filesystem", None)])),
        SchemaErrorKind::RootPath
    );
    assert_eq!(
        check_error(single(vec![
            ElementRule::root("filesystem"),
            ElementRule::new("dir", None),
        ])),
        SchemaErrorKind::NoPath
    );
    assert_eq!(
        check_error(single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", ""),
        ])),
        SchemaErrorKind::InvalidPath
    );
    // Only emptiness is checked, such rules just never match
    for path in ["dir.", "file.filesystem", ".filesystem"] {
        let schema = single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", path),
        ]);
        assert_eq!(schema.check(), Ok(()), "{:?}", path);
    }
    assert_eq!(
        check_error(single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", "dir.filesystem").with_attribute(AttributeRule {
                name: "name".to_string(),
                flags: 0xfffffff,
            }),
        ])),
        SchemaErrorKind::UnrecognisedAttrFlag
    );
    assert_eq!(
        check_error(single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", "dir.filesystem").occurs(-1, 0),
        ])),
        SchemaErrorKind::MinOccursNegative
    );
    assert_eq!(
        check_error(single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", "dir.filesystem").occurs(0, -1),
        ])),
        SchemaErrorKind::MaxOccursNegative
    );
    assert_eq!(
        check_error(single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", "dir.filesystem").occurs(5, 3),
        ])),
        SchemaErrorKind::MaxLessThanMin
    );
    // Unbounded maximum
    assert_eq!(
        single(vec![
            ElementRule::root("filesystem"),
            ElementRule::child("dir", "dir.filesystem").occurs(5, 0),
        ])
        .check(),
        Ok(())
    );
}

#[test]
fn self_check_context() {
    let err = single(vec![
        ElementRule::root("filesystem"),
        ElementRule::child("dir", "dir.filesystem").with_attribute(AttributeRule {
            name: "name".to_string(),
            flags: 0x10,
        }),
    ])
    .check()
    .unwrap_err();
    assert_eq!(err.command, "filesystem");
    assert_eq!(err.rule, Some(1));
    assert_eq!(err.element.as_deref(), Some("dir"));
    assert_eq!(err.attribute.as_deref(), Some("name"));
    assert_eq!(
        err.to_string(),
        "command 'filesystem', rule 1 ('dir'), attribute 'name': unrecognised attribute flag"
    );
}

#[test]
fn rule_helpers() {
    let rule = file_rule().required_attribute("size");
    assert!(rule.find_attribute("size").unwrap().is_required());
    assert!(!rule.find_attribute("name").unwrap().is_required());
    assert!(rule.find_attribute("owner").is_none());
    assert!(!rule.has_occurrence_bounds());
    assert!(rule.occurs(0, 1).has_occurrence_bounds());

    let schema = Schema::new()
        .command(Command::new("a").rule(ElementRule::root("a")))
        .command(Command::new("b").rule(ElementRule::root("b")));
    assert_eq!(schema.commands().len(), 2);
    assert_eq!(schema.find_command("b").unwrap().name, "b");
    assert!(schema.find_command("c").is_none());
}
