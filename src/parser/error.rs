/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::NoMemory;

/// Type of the error which aborted a parse.
///
/// Every category is terminal for the parse in flight. The partially
/// built document is dropped, and there is no recovery. The categories
/// correspond to the distinct actions the caller might take.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The tokenizer rejected the input as malformed XML.
    ///
    /// The argument describes the problem and its byte position, so
    /// the user can fix the document.
    Parser(String),

    /// Memory for the document or the text buffer could not be allocated.
    Resource,

    /// Reading the input failed.
    ///
    /// The argument is the description of the I/O error.
    External(String),

    /// Character data of a single element exceeded the text buffer limit.
    Overflow,

    /// Events violated the structure of the document being built.
    ///
    /// Examples are an end tag which doesn't match the open element,
    /// a second root element, or a second value for an element.
    Integrity(&'static str),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Parser(msg) => write!(f, "invalid xml syntax: {}", msg),
            ParseError::Resource => write!(f, "not enough memory"),
            ParseError::External(msg) => write!(f, "input error: {}", msg),
            ParseError::Overflow => write!(f, "character data is too long"),
            ParseError::Integrity(msg) => write!(f, "document integrity error: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<NoMemory> for ParseError {
    fn from(_: NoMemory) -> Self {
        ParseError::Resource
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::External(err.to_string())
    }
}

pub(super) mod description {
    pub(in super::super) const NO_ROOT: &str = "document has no root element";
    pub(in super::super) const OPEN_TAGS: &str = "document has unclosed tags";
    pub(in super::super) const TAG_OUTSIDE_ROOT: &str = "tags cannot be outside of the root tag";
    pub(in super::super) const CDATA_OUTSIDE_ROOT: &str =
        "character data not allowed outside of the root tag";
    pub(in super::super) const CUSTOM_ENTITY: &str =
        "non-predefined entity references are not supported";
    pub(in super::super) const BAD_CHAR_REFERENCE: &str = "invalid character reference";
}
