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

use crate::ParseError;
use crate::SaxElement;
use crate::SaxHandler;

use super::Document;
use super::ElementId;
use super::error::description;

/// Growth step of the character data buffer in bytes.
pub const DEFAULT_PAGE_SIZE: usize = 1024;

/// Upper limit of the character data buffer in pages.
pub const DEFAULT_MAX_PAGES: usize = 4;

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

struct TextBuffer {
    text: Option<String>,
    allocated: usize,
    page_size: usize,
    max_pages: usize,
}

impl TextBuffer {
    fn new(page_size: usize, max_pages: usize) -> TextBuffer {
        TextBuffer {
            text: None,
            allocated: 0,
            page_size,
            max_pages,
        }
    }

    fn append(&mut self, chunk: &str) -> Result<(), ParseError> {
        // A lone line ending or other control character
        if chunk.len() == 1 && chunk.as_bytes()[0].is_ascii_control() {
            return Ok(());
        }
        let chunk = match self.text {
            None => chunk.trim_start_matches(is_blank),
            Some(_) => chunk,
        };
        if chunk.is_empty() {
            return Ok(());
        }

        let used = self.text.as_ref().map_or(0, String::len);
        let needed = used + chunk.len();
        if needed > self.allocated {
            let nr_pages = needed.div_ceil(self.page_size);
            if nr_pages > self.max_pages {
                return Err(ParseError::Overflow);
            }
            let size = nr_pages * self.page_size;
            let text = self.text.get_or_insert_with(String::new);
            text.try_reserve_exact(size - text.len())
                .map_err(|_| ParseError::Resource)?;
            self.allocated = size;
        }
        if let Some(text) = self.text.as_mut() {
            text.push_str(chunk);
        }
        Ok(())
    }

    /// Releases the accumulated text with the trailing blanks trimmed.
    fn take(&mut self) -> Option<String> {
        self.allocated = 0;
        let mut text = self.text.take()?;
        let size = text.trim_end_matches(is_blank).len();
        text.truncate(size);
        Some(text)
    }

    fn clear(&mut self) {
        self.text = None;
        self.allocated = 0;
    }
}

/// Builds a [Document] from the SAX events.
///
/// The builder keeps a cursor to the innermost open element and a
/// single character data buffer. Whatever text is pending when an
/// element closes becomes its value, so in `<a>x<b/>y</a>` the `b`
/// element gets `x` and `a` gets `y`.
///
/// After the first error the builder refuses all further events
/// with the same error until it is reset.
pub struct DocumentBuilder {
    doc: Option<Document>,
    current: Option<ElementId>,
    depth: usize,
    text: TextBuffer,
    error: Option<ParseError>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::with_text_limits(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGES)
    }

    /// Creates a builder with a custom character data limit.
    ///
    /// The text of a single element may use at most
    /// `page_size * max_pages` bytes.
    pub fn with_text_limits(page_size: usize, max_pages: usize) -> Self {
        DocumentBuilder {
            doc: None,
            current: None,
            depth: 0,
            text: TextBuffer::new(page_size.max(1), max_pages),
            error: None,
        }
    }

    fn start_tag(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), ParseError> {
        let doc = self.doc.get_or_insert_with(Document::new);
        if self.current.is_none() && !doc.is_empty() {
            return Err(ParseError::Integrity(description::SECOND_ROOT));
        }
        let id = doc.add_element(self.current, name)?;
        for (name, value) in attributes {
            doc.set_attribute(id, name, value)?;
        }
        self.depth += 1;
        self.current = Some(id);
        Ok(())
    }

    fn cdata(&mut self, chunk: &str) -> Result<(), ParseError> {
        if self.current.is_none() {
            return Err(ParseError::Integrity(description::TEXT_OUTSIDE_ROOT));
        }
        self.text.append(chunk)
    }

    fn end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        let (Some(doc), Some(id)) = (self.doc.as_mut(), self.current) else {
            return Err(ParseError::Integrity(description::CLOSE_WITHOUT_OPEN));
        };
        let element = doc.element(id);
        if element.name() != name {
            return Err(ParseError::Integrity(description::TAG_MISMATCH));
        }
        let parent = element.parent().id();
        if let Some(value) = self.text.take() {
            if element.value().is_some() {
                return Err(ParseError::Integrity(description::DOUBLE_VALUE));
            }
            doc.set_value(id, &value)?;
        }
        self.depth -= 1;
        self.current = parent;
        Ok(())
    }

    pub fn append_element(&mut self, element: &SaxElement) -> Result<(), ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let result = match element {
            SaxElement::StartTag(name, attributes) => self.start_tag(name, attributes),
            SaxElement::CData(chunk) => self.cdata(chunk),
            SaxElement::EndTag(name) => self.end_tag(name),
        };
        if let Err(err) = &result {
            debug!(depth = self.depth, error = %err, "document build aborted");
            self.error = Some(err.clone());
            self.text.clear();
        }
        result
    }

    /// Checks that a root element is built and closed.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
            && self.current.is_none()
            && self.doc.as_ref().is_some_and(|doc| !doc.is_empty())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn peek(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// Takes the built document out and resets the builder.
    pub fn take(&mut self) -> Option<Document> {
        let doc = self.doc.take();
        self.reset();
        doc
    }

    /// Drops any partial document and clears the error state.
    pub fn reset(&mut self) {
        self.doc = None;
        self.current = None;
        self.depth = 0;
        self.text.clear();
        self.error = None;
    }
}

impl SaxHandler for DocumentBuilder {
    fn handle_element(&mut self, element: &SaxElement) -> Result<(), ParseError> {
        self.append_element(element)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
