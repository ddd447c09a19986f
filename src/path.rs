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

use crate::Cursor;

/// Longest structural path in bytes.
pub const MAX_PATH: usize = 1024;

pub const SEPARATOR: char = '.';

/// The accumulated path exceeded [MAX_PATH] bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathTooLong;

impl Display for PathTooLong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "structural path is longer than {} bytes", MAX_PATH)
    }
}

impl Error for PathTooLong {}

/// Returns the structural path of the element.
///
/// Names are joined with dots from the element up to the root,
/// innermost first: in `<root><a><b/></a></root>` the path of `b`
/// is `b.a.root` and the path of the root is `root`. A null cursor
/// has the empty path.
pub fn path(element: Cursor<'_>) -> Result<String, PathTooLong> {
    let mut size = 0;
    let mut current = element;
    while !current.is_null() {
        if size > 0 {
            size += SEPARATOR.len_utf8();
        }
        size += current.name().len();
        if size > MAX_PATH {
            return Err(PathTooLong);
        }
        current = current.parent();
    }

    let mut path = String::with_capacity(size);
    let mut current = element;
    while !current.is_null() {
        if !path.is_empty() {
            path.push(SEPARATOR);
        }
        path.push_str(current.name());
        current = current.parent();
    }
    Ok(path)
}

/// Checks whether a rule path pattern addresses the element.
///
/// The empty pattern stands for the root position and matches only
/// an element without a parent. Other patterns must be equal to the
/// element's structural path, there are no wildcards.
pub fn path_matches(element: Cursor<'_>, pattern: &str) -> Result<bool, PathTooLong> {
    if element.is_null() {
        return Ok(false);
    }
    if pattern.is_empty() {
        return Ok(element.parent().is_null());
    }
    Ok(path(element)? == pattern)
}

/// Returns the pattern with its first segment removed.
///
/// This is the path of the parent position a rule pattern refers to,
/// `file.dir.root` gives `dir.root`. Patterns with a single segment
/// have no parent position.
pub fn parent_pattern(pattern: &str) -> Option<&str> {
    pattern
        .split_once(SEPARATOR)
        .map(|(_, parent)| parent)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::Document;

    #[test]
    fn paths() {
        let doc = Document::from_str("<root><a><b/></a><c/></root>").unwrap();
        assert_eq!(path(doc.root()).unwrap(), "root");
        assert_eq!(path(doc.find_child("a")).unwrap(), "a.root");
        assert_eq!(path(doc.find_child("a").first_child()).unwrap(), "b.a.root");
        assert_eq!(path(doc.find_child("c")).unwrap(), "c.root");
        assert_eq!(path(doc.find_child("x")).unwrap(), "");
    }

    #[test]
    fn child_path_extends_parent_path() {
        let doc = Document::from_str("<x><y><z><w/></z></y></x>").unwrap();
        for element in doc.root().descendant_or_self().skip(1) {
            let parent = path(element.parent()).unwrap();
            assert_eq!(
                path(element).unwrap(),
                format!("{}.{}", element.name(), parent)
            );
        }
    }

    #[test]
    fn matching() {
        let doc = Document::from_str("<root><a><b/></a></root>").unwrap();
        let b = doc.find_child("a").first_child();
        assert!(path_matches(doc.root(), "").unwrap());
        assert!(path_matches(doc.root(), "root").unwrap());
        assert!(!path_matches(b, "").unwrap());
        assert!(path_matches(b, "b.a.root").unwrap());
        assert!(!path_matches(b, "b.a").unwrap());
        assert!(!path_matches(b, "*.a.root").unwrap());
        assert!(!path_matches(doc.find_child("zz"), "").unwrap());
    }

    #[test]
    fn parent_patterns() {
        assert_eq!(parent_pattern("file.dir.root"), Some("dir.root"));
        assert_eq!(parent_pattern("dir.root"), Some("root"));
        assert_eq!(parent_pattern("root"), None);
        assert_eq!(parent_pattern(""), None);
    }

    #[test]
    fn too_long() {
        let mut doc = Document::new();
        let name = "n".repeat(100);
        let mut parent = None;
        let mut last = None;
        for _ in 0..11 {
            let id = doc.add_element(parent, &name).unwrap();
            parent = Some(id);
            last = Some(id);
        }
        let deepest = doc.element(last.unwrap());
        // 11 names of 100 bytes and 10 dots
        assert_eq!(path(deepest), Err(PathTooLong));
        assert_eq!(path_matches(deepest, "x"), Err(PathTooLong));
        // 10 names and 9 dots fit
        assert_eq!(path(deepest.parent()).unwrap().len(), 1009);
    }
}
