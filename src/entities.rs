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

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const QUOT: &str = "&quot;";
}

fn replacement(c: u8) -> Option<&'static str> {
    match c {
        b'<' => Some(predefined::LT),
        b'>' => Some(predefined::GT),
        b'&' => Some(predefined::AMP),
        b'"' => Some(predefined::QUOT),
        _ => None,
    }
}

/// Writes the text with the markup characters replaced by references.
///
/// Apostrophes are left alone since attribute values are always
/// written inside double quotes.
pub fn escape<W: Write>(s: &str, out: &mut W) -> std::fmt::Result {
    let mut start = 0;
    for (i, c) in s.bytes().enumerate() {
        if let Some(entity) = replacement(c) {
            if start < i {
                out.write_str(&s[start..i])?;
            }
            out.write_str(entity)?;
            start = i + 1;
        }
    }
    if start < s.len() {
        out.write_str(&s[start..])?;
    }
    Ok(())
}
