/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

mod name;
pub use name::MetricName;

mod tag;
pub use tag::Tag;

mod value;
pub use value::MetricValue;

mod gauge;
pub use gauge::GaugeMetric;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty string")]
    Empty,
    #[error("invalid graphic char: {0}")]
    InvalidGraphic(char),
    #[error("not alpha numeric char")]
    NotAlphaNumeric,
    #[error("no '{0}' delimiter found")]
    MissingDelimiter(char),
    #[error("reserved char: {0}")]
    ReservedChar(char),
}

fn chars_allowed_in_name(s: &str) -> Result<(), ParseError> {
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    for c in s.chars() {
        if c.is_ascii() {
            match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '/' => {}
                _ => {
                    return if c.is_ascii_graphic() {
                        Err(ParseError::InvalidGraphic(c))
                    } else {
                        Err(ParseError::NotAlphaNumeric)
                    };
                }
            }
        } else if !c.is_alphanumeric() {
            return Err(ParseError::NotAlphaNumeric);
        }
    }
    Ok(())
}

/// Tags and tag values may carry spaces (team names), but not the statsd
/// line delimiters.
pub fn chars_allowed_in_tag(s: &str) -> Result<(), ParseError> {
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    for c in s.chars() {
        match c {
            ',' | '|' | '#' | '\n' | '\r' => return Err(ParseError::ReservedChar(c)),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_chars() {
        assert!(chars_allowed_in_name("modularization.all_packages.count").is_ok());
        assert!(chars_allowed_in_name("packs/foo-bar").is_ok());
        assert_eq!(chars_allowed_in_name(""), Err(ParseError::Empty));
        assert_eq!(
            chars_allowed_in_name("a:b"),
            Err(ParseError::InvalidGraphic(':'))
        );
        assert_eq!(chars_allowed_in_name("a b"), Err(ParseError::NotAlphaNumeric));
    }

    #[test]
    fn tag_value_chars() {
        assert!(chars_allowed_in_tag("Team Payments").is_ok());
        assert_eq!(chars_allowed_in_tag(""), Err(ParseError::Empty));
        assert_eq!(
            chars_allowed_in_tag("a|b"),
            Err(ParseError::ReservedChar('|'))
        );
        assert_eq!(
            chars_allowed_in_tag("a,b"),
            Err(ParseError::ReservedChar(','))
        );
        assert_eq!(
            chars_allowed_in_tag("team:a\nb:9|c"),
            Err(ParseError::ReservedChar('\n'))
        );
    }
}
