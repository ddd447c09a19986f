/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Returned Cursor cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlvet::Document;
/// use xmlvet::Cursor;
/// let c: Cursor;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     c = doc.root();
/// }
/// println!("{}", c);
/// # Ok(())
/// # }
/// ```
///
/// Navigated Cursor cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlvet::Document;
/// use xmlvet::Cursor;
/// let c2: Cursor;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     let c1 = doc.root().find_child("b");
///     c2 = c1;
/// }
/// println!("{}", c2);
/// # Ok(())
/// # }
/// ```
///
/// Document cannot be edited while a Cursor is alive:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlvet::Document;
/// let mut doc = Document::from_str("<a><b/></a>")?;
/// let b = doc.find_child("b");
/// doc.clear();
/// println!("{}", b.name());
/// # Ok(())
/// # }
/// ```
///
/// Attribute values cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlvet::Document;
/// let value: Option<&str>;
/// {
///     let doc = Document::from_str("<a x='1'/>")?;
///     value = doc.root().attribute("x");
/// }
/// println!("{:?}", value);
/// # Ok(())
/// # }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
