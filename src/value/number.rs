//! Lenient number parsing for attribute text.
//!
//! Attribute values are parsed by their leading numeric prefix: leading
//! whitespace is skipped, `"12px"` reads as `12`, and text with no numeric
//! prefix yields `None` so the caller can fall back to a default.

use logos::Logos;

/// Token stream for float prefixes.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum FloatToken {
    /// `Infinity`, optionally signed.
    #[regex(r"[+-]?Infinity")]
    Infinity,

    /// Decimal literal with optional fraction and exponent: `3`, `-0.5`,
    /// `.25`, `1e3`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Decimal,
}

/// Token stream for integer prefixes.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum IntToken {
    #[regex(r"[+-]?[0-9]+")]
    Integer,
}

/// Parse the leading float of `input`.
///
/// Returns `None` when the first token is not a number. A result of `NaN`
/// is impossible; infinities are returned as-is.
pub fn parse_float(input: &str) -> Option<f64> {
    let mut lexer = FloatToken::lexer(input);
    match lexer.next()? {
        Ok(FloatToken::Decimal) => lexer.slice().parse::<f64>().ok(),
        Ok(FloatToken::Infinity) => Some(if lexer.slice().starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }),
        Err(()) => None,
    }
}

/// Parse the leading base-10 integer of `input`.
///
/// `"12.7"` reads as `12`. Values outside `i64` yield `None`.
pub fn parse_int(input: &str) -> Option<i64> {
    let mut lexer = IntToken::lexer(input);
    match lexer.next()? {
        Ok(IntToken::Integer) => lexer.slice().parse::<i64>().ok(),
        Err(()) => None,
    }
}

/// Shortest decimal text for `value`, as written back into an attribute.
///
/// Whole numbers print without a fraction (`50`, not `50.0`) and negative
/// zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{value}")
}
