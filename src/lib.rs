/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod document;
mod entities;
mod parser;
mod path;
mod scalar;
mod schema;
mod serializer;

pub use arena::Arena;
pub use arena::ArenaIndex;
pub use arena::ArenaStats;
pub use arena::NoMemory;

pub use parser::DEFAULT_BUFFER_SIZE;
pub use parser::ParseError;
pub use parser::SaxElement;
pub use parser::SaxHandler;
pub use parser::SaxParser;

pub use document::Attributes;
pub use document::Children;
pub use document::Cursor;
pub use document::DescendantOrSelf;
pub use document::Document;
pub use document::DocumentBuilder;
pub use document::DocumentError;
pub use document::DocumentParser;
pub use document::ElementId;
pub use document::ValueError;

pub use scalar::NumberError;
pub use scalar::parse_bool;
pub use scalar::parse_hex;
pub use scalar::parse_signed;
pub use scalar::parse_unsigned;

pub use path::MAX_PATH;
pub use path::PathTooLong;
pub use path::parent_pattern;
pub use path::path;
pub use path::path_matches;

pub use schema::ATTR_REQUIRED;
pub use schema::AttributeRule;
pub use schema::Command;
pub use schema::ElementRule;
pub use schema::FailureReason;
pub use schema::Schema;
pub use schema::SchemaError;
pub use schema::SchemaErrorKind;
pub use schema::ValidationFailure;
pub use schema::validate;

pub use serializer::GenerateOptions;
pub use serializer::XML_HEADER;
pub use serializer::generate;
pub use serializer::generated_size;
