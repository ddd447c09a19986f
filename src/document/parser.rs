/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::ParseError;
use crate::SaxParser;

use super::Document;
use super::DocumentBuilder;
use super::error::description;

/// Parses XML text into a [Document].
///
/// A parser can be used for any number of documents, each parse
/// starts with a fresh builder.
pub struct DocumentParser {
    builder: DocumentBuilder,
    parser: SaxParser,
}

impl DocumentParser {
    pub fn new() -> DocumentParser {
        DocumentParser {
            builder: DocumentBuilder::new(),
            parser: SaxParser::new(),
        }
    }

    pub fn with_text_limits(mut self, page_size: usize, max_pages: usize) -> DocumentParser {
        self.builder = DocumentBuilder::with_text_limits(page_size, max_pages);
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> DocumentParser {
        self.parser = SaxParser::with_buffer_size(buffer_size);
        self
    }

    /// Number of input bytes consumed by the last parse.
    pub fn nr_bytes(&self) -> u64 {
        self.parser.nr_bytes()
    }

    pub fn parse_str(&mut self, s: &str) -> Result<Document, ParseError> {
        self.builder.reset();
        let result = self.parser.parse_str(&mut self.builder, s);
        self.finish(result)
    }

    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<Document, ParseError> {
        self.builder.reset();
        let result = self.parser.parse_bytes(&mut self.builder, bytes);
        self.finish(result)
    }

    pub fn parse_reader<R: Read>(&mut self, reader: R) -> Result<Document, ParseError> {
        self.builder.reset();
        let result = self.parser.parse_reader(&mut self.builder, reader);
        self.finish(result)
    }

    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Document, ParseError> {
        self.builder.reset();
        let result = self.parser.parse_file(&mut self.builder, path);
        self.finish(result)
    }

    fn finish(&mut self, result: Result<(), ParseError>) -> Result<Document, ParseError> {
        if let Err(err) = result {
            debug!(nr_bytes = self.parser.nr_bytes(), error = %err, "parse failed");
            self.builder.reset();
            return Err(err);
        }
        if !self.builder.is_complete() {
            self.builder.reset();
            return Err(ParseError::Integrity(description::NO_DOCUMENT));
        }
        self.builder
            .take()
            .ok_or(ParseError::Integrity(description::NO_DOCUMENT))
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}
