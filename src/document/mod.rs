/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod error;
mod iterators;
mod parser;

use std::fmt::Debug;
use std::str::FromStr;

use crate::NoMemory;
use crate::ParseError;
use crate::PathTooLong;
use crate::document::error::description;
use crate::scalar::parse_bool;
use crate::scalar::parse_hex;
use crate::scalar::parse_signed;
use crate::scalar::parse_unsigned;
use crate::serializer;

use super::arena::Arena;
use super::arena::ArenaIndex;
use super::arena::ArenaStats;
pub use builder::DocumentBuilder;
pub use error::DocumentError;
pub use error::ValueError;
pub use iterators::Attributes;
pub use iterators::Children;
pub use iterators::DescendantOrSelf;
pub use parser::DocumentParser;

/// Handle of an element in a [Document].
///
/// Handles stay valid until the element is removed. A handle of a
/// removed element never designates another element, even if the
/// storage is reused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ElementId(ArenaIndex);

struct Attribute {
    name: String,
    value: String,
}

struct Element {
    name: String,
    value: Option<String>,
    attributes: Vec<Attribute>,
    parent: Option<ElementId>,
    first_child: Option<ElementId>,
    last_child: Option<ElementId>,
    next: Option<ElementId>,
    previous: Option<ElementId>,
    depth: usize,
}

fn copy_str(s: &str) -> Result<String, NoMemory> {
    let mut copy = String::new();
    copy.try_reserve_exact(s.len())?;
    copy.push_str(s);
    Ok(copy)
}

macro_rules! number_setters {
    ($attribute_fn:ident, $value_fn:ident, $type:ty, $format:literal) => {
        pub fn $attribute_fn(
            &mut self,
            id: ElementId,
            name: &str,
            number: $type,
        ) -> Result<(), DocumentError> {
            self.set_attribute(id, name, &format!($format, number))
        }

        pub fn $value_fn(&mut self, id: ElementId, number: $type) -> Result<(), DocumentError> {
            self.set_value(id, &format!($format, number))
        }
    };
}

/// An XML document with zero or one root element.
pub struct Document {
    arena: Arena<Element>,
    root: Option<ElementId>,
}

impl Document {
    pub fn new() -> Document {
        Document {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(nr_elements: usize) -> Result<Document, NoMemory> {
        Ok(Document {
            arena: Arena::with_capacity(nr_elements)?,
            root: None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root<'a>(&'a self) -> Cursor<'a> {
        Cursor::new(self, self.root)
    }

    pub fn element<'a>(&'a self, id: ElementId) -> Cursor<'a> {
        if self.arena.contains(id.0) {
            Cursor::new(self, Some(id))
        } else {
            Cursor::new(self, None)
        }
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.arena.get(id.0)
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, DocumentError> {
        self.arena
            .get_mut(id.0)
            .ok_or(DocumentError::Integrity(description::STALE_ELEMENT))
    }

    //
    // Edit methods
    //

    /// Adds a new element as the last child of the parent.
    ///
    /// Without a parent the element becomes the root, which fails if
    /// the document already has one.
    pub fn add_element(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
    ) -> Result<ElementId, DocumentError> {
        if name.is_empty() {
            return Err(DocumentError::Integrity(description::EMPTY_NAME));
        }
        let depth = match parent {
            Some(parent) => self.get_mut(parent)?.depth + 1,
            None => {
                if self.root.is_some() {
                    return Err(DocumentError::Integrity(description::SECOND_ROOT));
                }
                0
            }
        };
        let previous = match parent {
            Some(parent) => self.get_mut(parent)?.last_child,
            None => None,
        };

        let element = Element {
            name: copy_str(name)?,
            value: None,
            attributes: Vec::new(),
            parent,
            first_child: None,
            last_child: None,
            next: None,
            previous,
            depth,
        };
        let id = ElementId(self.arena.alloc(element)?);

        match parent {
            Some(parent) => {
                if let Some(previous) = previous {
                    self.get_mut(previous)?.next = Some(id);
                }
                let parent = self.get_mut(parent)?;
                if parent.first_child.is_none() {
                    parent.first_child = Some(id);
                }
                parent.last_child = Some(id);
            }
            None => self.root = Some(id),
        }

        Ok(id)
    }

    /// Removes the element together with all of its descendants.
    pub fn remove_element(&mut self, id: ElementId) -> Result<(), DocumentError> {
        self.get_mut(id)?;

        // Free the descendants leaf first, walking siblings in order
        let mut current = self.get(id).and_then(|element| element.first_child);
        while let Some(mut node) = current {
            while let Some(child) = self.get(node).and_then(|element| element.first_child) {
                node = child;
            }
            let Some(leaf) = self.arena.free(node.0) else {
                break;
            };
            let Some(parent) = leaf.parent else {
                break;
            };
            self.get_mut(parent)?.first_child = leaf.next;
            current = match leaf.next {
                Some(next) => Some(next),
                None if parent == id => None,
                None => Some(parent),
            };
        }

        let Some(element) = self.arena.free(id.0) else {
            return Err(DocumentError::Integrity(description::STALE_ELEMENT));
        };
        if let Some(next) = element.next {
            self.get_mut(next)?.previous = element.previous;
        }
        if let Some(previous) = element.previous {
            self.get_mut(previous)?.next = element.next;
        }
        match element.parent {
            Some(parent) => {
                let parent = self.get_mut(parent)?;
                if parent.first_child == Some(id) {
                    parent.first_child = element.next;
                }
                if parent.last_child == Some(id) {
                    parent.last_child = element.previous;
                }
            }
            None => self.root = None,
        }

        Ok(())
    }

    /// Removes all elements but keeps the allocated memory.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Replaces the text value of the element with a copy of the given text.
    pub fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), DocumentError> {
        let value = copy_str(value)?;
        self.get_mut(id)?.value = Some(value);
        Ok(())
    }

    pub fn remove_value(&mut self, id: ElementId) -> Result<Option<String>, DocumentError> {
        Ok(self.get_mut(id)?.value.take())
    }

    /// Appends an attribute to the element.
    ///
    /// Attribute names are not checked for uniqueness, lookups by
    /// name return the first one inserted.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        if name.is_empty() {
            return Err(DocumentError::Integrity(description::EMPTY_ATTRIBUTE_NAME));
        }
        let attribute = Attribute {
            name: copy_str(name)?,
            value: copy_str(value)?,
        };
        let element = self.get_mut(id)?;
        element.attributes.try_reserve(1).map_err(NoMemory::from)?;
        element.attributes.push(attribute);
        Ok(())
    }

    number_setters!(set_attribute_i32, set_value_i32, i32, "{}");
    number_setters!(set_attribute_u32, set_value_u32, u32, "{}");
    number_setters!(set_attribute_i64, set_value_i64, i64, "{}");
    number_setters!(set_attribute_u64, set_value_u64, u64, "{}");
    number_setters!(set_attribute_x32, set_value_x32, u32, "0x{:x}");
    number_setters!(set_attribute_x64, set_value_x64, u64, "0x{:x}");

    //
    // Convenience functions to avoid typing .root() all the time
    //

    pub fn find_child<'a>(&'a self, name: &str) -> Cursor<'a> {
        self.root().find_child(name)
    }

    /// Returns the value of the top level element with the given name.
    pub fn find_value(&self, name: &str) -> Option<&str> {
        let root = self.root();
        if root.name() == name {
            root.value()
        } else {
            None
        }
    }

    pub fn str_size(&self) -> usize {
        serializer::generated_size(self, &serializer::GenerateOptions::default())
    }

    pub fn generate(&self, options: &serializer::GenerateOptions) -> Result<String, NoMemory> {
        serializer::generate(self, options)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document ({} elements)", self.arena.len())
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root(), f)
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentParser::new().parse_str(s)
    }
}

macro_rules! number_getters {
    ($attribute_fn:ident, $value_fn:ident, $type:ty, $parse:ident) => {
        pub fn $attribute_fn(&self, name: &str) -> Result<$type, ValueError> {
            let text = self.attribute(name).ok_or(ValueError::Missing)?;
            Ok($parse(text, <$type>::MIN.into(), <$type>::MAX.into())? as $type)
        }

        pub fn $value_fn(&self) -> Result<$type, ValueError> {
            let text = self.value().ok_or(ValueError::Missing)?;
            Ok($parse(text, <$type>::MIN.into(), <$type>::MAX.into())? as $type)
        }
    };
}

/// A read-only position in a [Document].
///
/// A cursor either points to an element or is null. Navigation
/// methods on a null cursor return null cursors, and property
/// methods return empty values, so chains like
/// `doc.root().find_child("a").first_child().name()` never fail.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    doc: &'a Document,
    id: Option<ElementId>,
}

impl<'a> Cursor<'a> {
    fn new(doc: &'a Document, id: Option<ElementId>) -> Cursor<'a> {
        Cursor { doc, id }
    }

    fn element(&self) -> Option<&'a Element> {
        self.id.and_then(|id| self.doc.get(id))
    }

    pub(crate) fn clear(&mut self) {
        self.id = None;
    }

    fn move_to(self, f: impl FnOnce(&Element) -> Option<ElementId>) -> Cursor<'a> {
        let id = self.element().and_then(f);
        Cursor::new(self.doc, id)
    }

    //
    // Navigation methods
    //

    pub fn next(self) -> Cursor<'a> {
        self.move_to(|element| element.next)
    }

    pub fn previous(self) -> Cursor<'a> {
        self.move_to(|element| element.previous)
    }

    pub fn parent(self) -> Cursor<'a> {
        self.move_to(|element| element.parent)
    }

    pub fn first_child(self) -> Cursor<'a> {
        self.move_to(|element| element.first_child)
    }

    pub fn last_child(self) -> Cursor<'a> {
        self.move_to(|element| element.last_child)
    }

    pub fn root(self) -> Cursor<'a> {
        if self.is_null() {
            return self;
        }
        let mut current = self;
        loop {
            let parent = current.parent();
            if parent.is_null() {
                break;
            }
            current = parent;
        }
        current
    }

    pub fn find_child(self, name: &str) -> Cursor<'a> {
        let mut child = self.first_child();
        while !child.is_null() {
            if child.name() == name {
                break;
            }
            child = child.next();
        }
        child
    }

    //
    // Iterator methods
    //

    pub fn children(self) -> Children<'a> {
        Children::new(self.first_child())
    }

    pub fn attributes(self) -> Attributes<'a> {
        Attributes::new(self.element().map(|element| element.attributes.as_slice()))
    }

    pub fn descendant_or_self(self) -> DescendantOrSelf<'a> {
        DescendantOrSelf::new(self)
    }

    //
    // Element property methods
    //

    pub fn is_null(&self) -> bool {
        self.element().is_none()
    }

    pub fn id(&self) -> Option<ElementId> {
        self.element().and(self.id)
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn name(&self) -> &'a str {
        self.element().map_or("", |element| element.name.as_str())
    }

    pub fn value(&self) -> Option<&'a str> {
        self.element().and_then(|element| element.value.as_deref())
    }

    pub fn depth(&self) -> usize {
        self.element().map_or(0, |element| element.depth)
    }

    pub fn has_children(&self) -> bool {
        self.element()
            .is_some_and(|element| element.first_child.is_some())
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element()?
            .attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Structural path of the element, see [path](crate::path).
    pub fn path(&self) -> Result<String, PathTooLong> {
        crate::path::path(*self)
    }

    //
    // Typed getters
    //

    number_getters!(attribute_i32, value_i32, i32, parse_signed);
    number_getters!(attribute_u32, value_u32, u32, parse_unsigned);
    number_getters!(attribute_i64, value_i64, i64, parse_signed);
    number_getters!(attribute_u64, value_u64, u64, parse_unsigned);
    number_getters!(attribute_x32, value_x32, u32, parse_hex);
    number_getters!(attribute_x64, value_x64, u64, parse_hex);

    pub fn attribute_number(&self, name: &str, min: i64, max: i64) -> Result<i64, ValueError> {
        let text = self.attribute(name).ok_or(ValueError::Missing)?;
        Ok(parse_signed(text, min, max)?)
    }

    pub fn value_number(&self, min: i64, max: i64) -> Result<i64, ValueError> {
        let text = self.value().ok_or(ValueError::Missing)?;
        Ok(parse_signed(text, min, max)?)
    }

    pub fn attribute_hex(&self, name: &str, min: u64, max: u64) -> Result<u64, ValueError> {
        let text = self.attribute(name).ok_or(ValueError::Missing)?;
        Ok(parse_hex(text, min, max)?)
    }

    pub fn value_hex(&self, min: u64, max: u64) -> Result<u64, ValueError> {
        let text = self.value().ok_or(ValueError::Missing)?;
        Ok(parse_hex(text, min, max)?)
    }

    pub fn attribute_bool(&self, name: &str) -> Result<bool, ValueError> {
        let text = self.attribute(name).ok_or(ValueError::Missing)?;
        parse_bool(text).ok_or(ValueError::NotBoolean)
    }

    /// Like [attribute_bool](Self::attribute_bool) but a missing
    /// attribute gives the default. Malformed text is still an error.
    pub fn attribute_bool_or(&self, name: &str, default: bool) -> Result<bool, ValueError> {
        match self.attribute_bool(name) {
            Err(ValueError::Missing) => Ok(default),
            result => result,
        }
    }

    pub fn value_bool(&self) -> Result<bool, ValueError> {
        let text = self.value().ok_or(ValueError::Missing)?;
        parse_bool(text).ok_or(ValueError::NotBoolean)
    }

    pub fn value_bool_or(&self, default: bool) -> Result<bool, ValueError> {
        match self.value_bool() {
            Err(ValueError::Missing) => Ok(default),
            result => result,
        }
    }

    pub fn str_size(&self) -> usize {
        serializer::element_size(*self)
    }
}

impl Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cursor ({:?})", self.id())
    }
}

impl std::fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serializer::render(*self, f)
    }
}


mod nocompile;
