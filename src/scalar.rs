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
use std::num::IntErrorKind;
use std::num::ParseIntError;

/// Reason of a failed number conversion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NumberError {
    /// Text is not a number, or the requested range is empty.
    Invalid,
    TooSmall,
    TooLarge,
}

impl Display for NumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberError::Invalid => write!(f, "invalid"),
            NumberError::TooSmall => write!(f, "too small"),
            NumberError::TooLarge => write!(f, "too large"),
        }
    }
}

impl Error for NumberError {}

impl From<ParseIntError> for NumberError {
    fn from(err: ParseIntError) -> Self {
        match err.kind() {
            IntErrorKind::PosOverflow => NumberError::TooLarge,
            IntErrorKind::NegOverflow => NumberError::TooSmall,
            _ => NumberError::Invalid,
        }
    }
}

macro_rules! check_range {
    ($value:expr, $min:expr, $max:expr) => {{
        let value = $value;
        if value < $min {
            return Err(NumberError::TooSmall);
        }
        if value > $max {
            return Err(NumberError::TooLarge);
        }
        Ok(value)
    }};
}

/// Parses a decimal integer within the inclusive range.
///
/// No whitespace is accepted around the digits.
pub fn parse_signed(s: &str, min: i64, max: i64) -> Result<i64, NumberError> {
    if min > max {
        return Err(NumberError::Invalid);
    }
    check_range!(s.parse::<i64>()?, min, max)
}

pub fn parse_unsigned(s: &str, min: u64, max: u64) -> Result<u64, NumberError> {
    if min > max || s.starts_with(['+', '-']) {
        return Err(NumberError::Invalid);
    }
    check_range!(s.parse::<u64>()?, min, max)
}

/// Parses a hexadecimal integer within the inclusive range.
///
/// The `0x` prefix written by the hexadecimal setters is optional.
pub fn parse_hex(s: &str, min: u64, max: u64) -> Result<u64, NumberError> {
    if min > max {
        return Err(NumberError::Invalid);
    }
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.starts_with(['+', '-']) {
        return Err(NumberError::Invalid);
    }
    check_range!(u64::from_str_radix(digits, 16)?, min, max)
}

/// Parses the accepted boolean spellings.
///
/// Only `true`, `1`, `false` and `0` are recognized, anything else
/// including different letter cases returns `None`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed() {
        assert_eq!(parse_signed("42", 0, 100), Ok(42));
        assert_eq!(parse_signed("-42", -100, 100), Ok(-42));
        assert_eq!(parse_signed("+7", 0, 10), Ok(7));
        assert_eq!(parse_signed("-1", 0, 10), Err(NumberError::TooSmall));
        assert_eq!(parse_signed("11", 0, 10), Err(NumberError::TooLarge));
        assert_eq!(
            parse_signed("99999999999999999999", i64::MIN, i64::MAX),
            Err(NumberError::TooLarge)
        );
        assert_eq!(
            parse_signed("-99999999999999999999", i64::MIN, i64::MAX),
            Err(NumberError::TooSmall)
        );
        assert_eq!(parse_signed("", 0, 10), Err(NumberError::Invalid));
        assert_eq!(parse_signed(" 5", 0, 10), Err(NumberError::Invalid));
        assert_eq!(parse_signed("5x", 0, 10), Err(NumberError::Invalid));
        assert_eq!(parse_signed("5", 10, 0), Err(NumberError::Invalid));
    }

    #[test]
    fn unsigned() {
        assert_eq!(parse_unsigned("0", 0, 1), Ok(0));
        assert_eq!(
            parse_unsigned("18446744073709551615", 0, u64::MAX),
            Ok(u64::MAX)
        );
        assert_eq!(
            parse_unsigned("18446744073709551616", 0, u64::MAX),
            Err(NumberError::TooLarge)
        );
        assert_eq!(parse_unsigned("-0", 0, 1), Err(NumberError::Invalid));
        assert_eq!(parse_unsigned("+1", 0, 1), Err(NumberError::Invalid));
        assert_eq!(parse_unsigned("3", 5, 9), Err(NumberError::TooSmall));
    }

    #[test]
    fn hex() {
        assert_eq!(parse_hex("0xff", 0, u64::MAX), Ok(255));
        assert_eq!(parse_hex("0XFF", 0, u64::MAX), Ok(255));
        assert_eq!(parse_hex("dead", 0, u64::MAX), Ok(0xdead));
        assert_eq!(parse_hex("0x100", 0, 0xff), Err(NumberError::TooLarge));
        assert_eq!(parse_hex("0x1", 2, 0xff), Err(NumberError::TooSmall));
        assert_eq!(parse_hex("0x", 0, 0xff), Err(NumberError::Invalid));
        assert_eq!(parse_hex("0xg", 0, 0xff), Err(NumberError::Invalid));
        assert_eq!(parse_hex("0x-1", 0, 0xff), Err(NumberError::Invalid));
        assert_eq!(
            parse_hex("0x10000000000000000", 0, u64::MAX),
            Err(NumberError::TooLarge)
        );
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("TRUE"), None);
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }
}
