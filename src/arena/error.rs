/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt::Display;

/// Error type for memory allocation failures.
///
/// Arena and document methods return this error when the global
/// allocator cannot satisfy a `try_reserve` request. Best action is
/// to abort the current operation and drop the partially built
/// document.
///
/// Details about the failed allocation are not included to keep
/// this error as lightweight as possible. The allocation sizes are
/// proportional to the input anyway, so more exact information would
/// be of little help in debugging.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NoMemory;

impl Display for NoMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not enough memory")
    }
}

impl Error for NoMemory {}

impl From<TryReserveError> for NoMemory {
    fn from(_: TryReserveError) -> Self {
        NoMemory
    }
}
