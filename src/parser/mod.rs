/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use tracing::trace;

use error::description;
pub use error::ParseError;

/// Default read buffer size for the file and reader inputs.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

const MIN_BUFFER_SIZE: usize = 64;

/// An XML structure event passed to the [SaxHandler].
#[derive(Debug, Eq, PartialEq)]
pub enum SaxElement<'a> {
    /// A start tag or empty element tag.
    ///
    /// Arguments are the full name of the tag and its attributes in
    /// document order. References in the attribute values are already
    /// replaced with the actual characters. An empty element tag is
    /// followed immediately by the matching EndTag.
    StartTag(&'a str, &'a [(&'a str, &'a str)]),

    /// A character data chunk.
    ///
    /// One continuous block of text can arrive as several chunks. Line
    /// endings are normalized to `\n`, and every line ending arrives as
    /// a separate chunk. References arrive as separate chunks with the
    /// replacement text.
    CData(&'a str),

    /// An end tag.
    ///
    /// The argument is the full name of the end tag.
    EndTag(&'a str),
}

pub trait SaxHandler {
    fn handle_element(&mut self, element: &SaxElement) -> Result<(), ParseError>;
}

/// SAX (Simple API for XML) event pump.
///
/// Reads the input with the `quick-xml` tokenizer and invokes the
/// handler for each element structure event. Declarations, comments,
/// processing instructions and doctypes are skipped.
///
/// Parsing stops at the first error, including errors returned by the
/// handler.
///
/// # Examples
///
/// ```
/// use xmlvet::{ParseError, SaxElement, SaxHandler, SaxParser};
///
/// // Example handler which just counts start tags
/// struct Counter { tags: usize }
/// impl SaxHandler for Counter {
///     fn handle_element(&mut self, element: &SaxElement) -> Result<(), ParseError> {
///         if let SaxElement::StartTag(_, _) = element {
///             self.tags += 1;
///         }
///         Ok(())
///     }
/// }
///
/// let mut counter = Counter { tags: 0 };
/// let mut parser = SaxParser::new();
/// match parser.parse_str(&mut counter, "<doc><a/><b>example</b></doc>") {
///     Ok(()) => assert_eq!(counter.tags, 3),
///     Err(err) => println!("parse failed at byte {}: {}", parser.nr_bytes(), err),
/// }
/// ```
pub struct SaxParser {
    buffer_size: usize,
    nr_bytes: u64,
}

impl SaxParser {
    pub fn new() -> SaxParser {
        SaxParser {
            buffer_size: DEFAULT_BUFFER_SIZE,
            nr_bytes: 0,
        }
    }

    pub fn with_buffer_size(buffer_size: usize) -> SaxParser {
        SaxParser {
            buffer_size: buffer_size.max(MIN_BUFFER_SIZE),
            nr_bytes: 0,
        }
    }

    /// Number of input bytes consumed by the last parse.
    ///
    /// After a tokenizer error this is the position of the error.
    pub fn nr_bytes(&self) -> u64 {
        self.nr_bytes
    }

    pub fn parse_str<H>(&mut self, handler: &mut H, s: &str) -> Result<(), ParseError>
    where
        H: SaxHandler + ?Sized,
    {
        self.parse(handler, s.as_bytes())
    }

    pub fn parse_bytes<H>(&mut self, handler: &mut H, bytes: &[u8]) -> Result<(), ParseError>
    where
        H: SaxHandler + ?Sized,
    {
        self.parse(handler, bytes)
    }

    pub fn parse_reader<H, R>(&mut self, handler: &mut H, reader: R) -> Result<(), ParseError>
    where
        H: SaxHandler + ?Sized,
        R: Read,
    {
        let input = BufReader::with_capacity(self.buffer_size, reader);
        self.parse(handler, input)
    }

    pub fn parse_file<H, P>(&mut self, handler: &mut H, path: P) -> Result<(), ParseError>
    where
        H: SaxHandler + ?Sized,
        P: AsRef<Path>,
    {
        self.nr_bytes = 0;
        let file = File::open(path)?;
        self.parse_reader(handler, file)
    }

    fn syntax_error(&self, msg: impl Display) -> ParseError {
        ParseError::Parser(format!("{} at byte {}", msg, self.nr_bytes))
    }

    /// Pumps the whole input through the handler.
    pub fn parse<H, R>(&mut self, handler: &mut H, input: R) -> Result<(), ParseError>
    where
        H: SaxHandler + ?Sized,
        R: BufRead,
    {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().check_end_names = true;

        let mut buf = Vec::new();
        let mut attributes = Vec::new();
        let mut depth: usize = 0;
        let mut seen_root = false;
        self.nr_bytes = 0;

        loop {
            buf.clear();
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(quick_xml::Error::Io(err)) => {
                    self.nr_bytes = reader.error_position();
                    return Err(ParseError::External(err.to_string()));
                }
                Err(err) => {
                    self.nr_bytes = reader.error_position();
                    return Err(self.syntax_error(err));
                }
            };
            self.nr_bytes = reader.buffer_position();

            match event {
                Event::Start(ref tag) | Event::Empty(ref tag) => {
                    if depth == 0 && seen_root {
                        return Err(self.syntax_error(description::TAG_OUTSIDE_ROOT));
                    }
                    let name = self.tag_name(tag.name().into_inner())?;
                    self.collect_attributes(tag, &mut attributes)?;
                    let pairs: Vec<(&str, &str)> = attributes
                        .iter()
                        .map(|(name, value): &(String, String)| (name.as_str(), value.as_str()))
                        .collect();
                    trace!(name, depth, "start tag");
                    handler.handle_element(&SaxElement::StartTag(name, &pairs))?;
                    if matches!(event, Event::Empty(_)) {
                        handler.handle_element(&SaxElement::EndTag(name))?;
                    } else {
                        depth += 1;
                    }
                    seen_root = true;
                }
                Event::End(ref tag) => {
                    let name = self.tag_name(tag.name().into_inner())?;
                    trace!(name, depth, "end tag");
                    handler.handle_element(&SaxElement::EndTag(name))?;
                    depth = depth.saturating_sub(1);
                }
                Event::Text(ref text) => {
                    let text = text.decode().map_err(|err| self.syntax_error(err))?;
                    if depth == 0 {
                        if !text.trim().is_empty() {
                            return Err(self.syntax_error(description::CDATA_OUTSIDE_ROOT));
                        }
                    } else {
                        char_data(handler, &text)?;
                    }
                }
                Event::CData(ref data) => {
                    if depth == 0 {
                        return Err(self.syntax_error(description::CDATA_OUTSIDE_ROOT));
                    }
                    let text = std::str::from_utf8(data).map_err(|err| self.syntax_error(err))?;
                    char_data(handler, text)?;
                }
                Event::GeneralRef(ref reference) => {
                    if depth == 0 {
                        return Err(self.syntax_error(description::CDATA_OUTSIDE_ROOT));
                    }
                    let raw = reference.decode().map_err(|err| self.syntax_error(err))?;
                    let text = self.resolve_reference(&raw)?;
                    handler.handle_element(&SaxElement::CData(&text))?;
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if !seen_root {
            return Err(self.syntax_error(description::NO_ROOT));
        }
        if depth > 0 {
            return Err(self.syntax_error(description::OPEN_TAGS));
        }
        Ok(())
    }

    fn tag_name<'b>(&self, name: &'b [u8]) -> Result<&'b str, ParseError> {
        std::str::from_utf8(name).map_err(|err| self.syntax_error(err))
    }

    fn collect_attributes(
        &self,
        tag: &BytesStart<'_>,
        attributes: &mut Vec<(String, String)>,
    ) -> Result<(), ParseError> {
        attributes.clear();
        for attribute in tag.attributes() {
            let attribute = attribute.map_err(|err| self.syntax_error(err))?;
            let name = self.tag_name(attribute.key.into_inner())?;
            let value = attribute
                .unescape_value()
                .map_err(|err| self.syntax_error(err))?;
            attributes.push((name.to_string(), value.into_owned()));
        }
        Ok(())
    }

    fn resolve_reference(&self, raw: &str) -> Result<String, ParseError> {
        if let Some(resolved) = resolve_xml_entity(raw) {
            return Ok(resolved.to_string());
        }
        let Some(number) = raw.strip_prefix('#') else {
            return Err(self.syntax_error(description::CUSTOM_ENTITY));
        };
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse::<u32>(),
        };
        code.ok()
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| self.syntax_error(description::BAD_CHAR_REFERENCE))
    }
}

impl Default for SaxParser {
    fn default() -> Self {
        Self::new()
    }
}

fn char_data<H>(handler: &mut H, text: &str) -> Result<(), ParseError>
where
    H: SaxHandler + ?Sized,
{
    let mut rest = text;
    while let Some(pos) = rest.find(['\r', '\n']) {
        if pos > 0 {
            handler.handle_element(&SaxElement::CData(&rest[..pos]))?;
        }
        handler.handle_element(&SaxElement::CData("\n"))?;
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
    }
    if !rest.is_empty() {
        handler.handle_element(&SaxElement::CData(rest))?;
    }
    Ok(())
}
