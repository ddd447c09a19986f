/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::slice::Iter;

use crate::Cursor;

use super::Attribute;

pub struct Attributes<'a> {
    iter: Option<Iter<'a, Attribute>>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(attributes: Option<&'a [Attribute]>) -> Self {
        Attributes {
            iter: attributes.map(|attributes| attributes.iter()),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let attribute = self.iter.as_mut()?.next()?;
        Some((attribute.name.as_str(), attribute.value.as_str()))
    }
}

impl DoubleEndedIterator for Attributes<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let attribute = self.iter.as_mut()?.next_back()?;
        Some((attribute.name.as_str(), attribute.value.as_str()))
    }
}

pub struct Children<'a> {
    current: Cursor<'a>,
}

impl<'a> Children<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Children { current: cursor }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;
        self.current = self.current.next();
        Some(result)
    }
}

/// Pre-order walk of an element and all of its descendants.
pub struct DescendantOrSelf<'a> {
    current: Cursor<'a>,
    level: usize,
}

impl<'a> DescendantOrSelf<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        DescendantOrSelf {
            current: cursor,
            level: 0,
        }
    }
}

impl<'a> Iterator for DescendantOrSelf<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;

        let child = self.current.first_child();
        if !child.is_null() {
            self.current = child;
            self.level += 1;
            return Some(result);
        }
        loop {
            if self.level == 0 {
                self.current.clear();
                break;
            }
            let next = self.current.next();
            if !next.is_null() {
                self.current = next;
                break;
            }
            self.level -= 1;
            self.current = self.current.parent();
        }
        Some(result)
    }
}
