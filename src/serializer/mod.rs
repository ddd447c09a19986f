/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Write;

use crate::Cursor;
use crate::Document;
use crate::NoMemory;
use crate::entities::escape;

pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n\r\n";

const LINE_END: &str = "\r\n";
const INDENT: &str = "  ";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenerateOptions {
    /// Prepend the XML declaration and a blank line.
    pub header: bool,
}

impl GenerateOptions {
    pub fn with_header() -> GenerateOptions {
        GenerateOptions { header: true }
    }
}

// Sink of the dry run
struct Measure {
    size: usize,
}

impl Write for Measure {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.size += s.len();
        Ok(())
    }
}

enum VisitorStep<'a> {
    StartTag(Cursor<'a>),
    EndTag(Cursor<'a>),
}

// Pre-order walk of a subtree. Elements with a text value are
// leaves here, their children are never rendered. An empty value
// is written like no value at all.
struct Visitor<'a> {
    going_down: bool,
    current: Cursor<'a>,
    level: usize,
}

fn text_value<'a>(element: Cursor<'a>) -> Option<&'a str> {
    element.value().filter(|value| !value.is_empty())
}

fn has_content(element: Cursor<'_>) -> bool {
    text_value(element).is_none() && element.has_children()
}

impl<'a> Visitor<'a> {
    fn new(start: Cursor<'a>) -> Visitor<'a> {
        Visitor {
            going_down: true,
            current: start,
            level: 0,
        }
    }

    fn step(&mut self) {
        if self.going_down && has_content(self.current) {
            self.current = self.current.first_child();
            self.level += 1;
            return;
        }
        if self.level == 0 {
            self.current.clear();
            return;
        }
        let next = self.current.next();
        if next.is_null() {
            self.level -= 1;
            self.current = self.current.parent();
            self.going_down = false;
        } else {
            self.current = next;
            self.going_down = true;
        }
    }

    fn next(&mut self) -> Option<VisitorStep<'a>> {
        if self.current.is_null() {
            return None;
        }
        let old = self.current;
        let old_going_down = self.going_down;
        self.step();
        if old_going_down {
            Some(VisitorStep::StartTag(old))
        } else {
            Some(VisitorStep::EndTag(old))
        }
    }
}

fn indent<W: Write>(depth: usize, out: &mut W) -> std::fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}

/// Writes the element and its subtree as indented XML text.
///
/// Every element goes on its own line, indented by its depth in the
/// document. Elements without a value or children are written in the
/// self-closing form, an empty value counts as no value.
pub fn render<W: Write>(element: Cursor<'_>, out: &mut W) -> std::fmt::Result {
    let mut visitor = Visitor::new(element);
    while let Some(step) = visitor.next() {
        match step {
            VisitorStep::StartTag(element) => {
                indent(element.depth(), out)?;
                out.write_str("<")?;
                out.write_str(element.name())?;
                for (name, value) in element.attributes() {
                    out.write_str(" ")?;
                    out.write_str(name)?;
                    out.write_str("=\"")?;
                    escape(value, out)?;
                    out.write_str("\"")?;
                }
                if let Some(value) = text_value(element) {
                    out.write_str(">")?;
                    escape(value, out)?;
                    out.write_str("</")?;
                    out.write_str(element.name())?;
                    out.write_str(">")?;
                } else if element.has_children() {
                    out.write_str(">")?;
                } else {
                    out.write_str("/>")?;
                }
                out.write_str(LINE_END)?;
            }
            VisitorStep::EndTag(element) => {
                indent(element.depth(), out)?;
                out.write_str("</")?;
                out.write_str(element.name())?;
                out.write_str(">")?;
                out.write_str(LINE_END)?;
            }
        }
    }
    Ok(())
}

/// Exact size of the rendered element in bytes.
pub fn element_size(element: Cursor<'_>) -> usize {
    let mut measure = Measure { size: 0 };
    // Measuring never fails
    let _ = render(element, &mut measure);
    measure.size
}

/// Exact size of the generated document text in bytes.
pub fn generated_size(doc: &Document, options: &GenerateOptions) -> usize {
    let mut size = element_size(doc.root());
    if options.header {
        size += XML_HEADER.len();
    }
    size
}

/// Serializes the document into a string of exactly the needed size.
///
/// The size is computed first with a dry run of the renderer, so the
/// only possible failure is the single allocation.
pub fn generate(doc: &Document, options: &GenerateOptions) -> Result<String, NoMemory> {
    let mut buf = String::new();
    buf.try_reserve_exact(generated_size(doc, options))?;
    if options.header {
        buf.push_str(XML_HEADER);
    }
    render(doc.root(), &mut buf).map_err(|_| NoMemory)?;
    Ok(buf)
}
