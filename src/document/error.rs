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

use crate::NoMemory;
use crate::NumberError;
use crate::ParseError;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum DocumentError {
    NoMemory,
    Integrity(&'static str),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::NoMemory => write!(f, "not enough memory"),
            DocumentError::Integrity(msg) => write!(f, "document integrity error: {}", msg),
        }
    }
}

impl Error for DocumentError {}

impl From<NoMemory> for DocumentError {
    fn from(_: NoMemory) -> Self {
        DocumentError::NoMemory
    }
}

impl From<DocumentError> for ParseError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NoMemory => ParseError::Resource,
            DocumentError::Integrity(msg) => ParseError::Integrity(msg),
        }
    }
}

/// Error type of the typed value and attribute getters.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ValueError {
    /// Element has no such attribute, or no text value.
    Missing,
    Number(NumberError),
    /// Text is not one of the accepted boolean spellings.
    NotBoolean,
}

impl Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::Missing => write!(f, "value not found"),
            ValueError::Number(err) => write!(f, "number is {}", err),
            ValueError::NotBoolean => write!(f, "not a boolean"),
        }
    }
}

impl Error for ValueError {}

impl From<NumberError> for ValueError {
    fn from(err: NumberError) -> Self {
        ValueError::Number(err)
    }
}

pub(crate) mod description {
    pub(crate) const SECOND_ROOT: &str = "document already has a root element";
    pub(crate) const EMPTY_NAME: &str = "element name cannot be empty";
    pub(crate) const EMPTY_ATTRIBUTE_NAME: &str = "attribute name cannot be empty";
    pub(crate) const STALE_ELEMENT: &str = "element is not in this document";
    pub(crate) const TAG_MISMATCH: &str = "start and end tags have different names";
    pub(crate) const CLOSE_WITHOUT_OPEN: &str = "end tag without an open element";
    pub(crate) const DOUBLE_VALUE: &str = "element already has a value";
    pub(crate) const TEXT_OUTSIDE_ROOT: &str = "character data outside of the root element";
    pub(crate) const NO_DOCUMENT: &str = "no complete root element parsed";
}
