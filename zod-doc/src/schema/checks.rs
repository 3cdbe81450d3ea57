//! Declared checks on leaf schemas.
//!
//! Each leaf type has its own closed check enum. The shapes mirror the
//! check objects Zod stores in a definition's `checks` array, so a schema
//! document can carry them verbatim (`{"kind": "min", "value": 1}`).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// IP address version constraint for [`StringCheck::Ip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    V4,
    V6,
}

/// Check declared on a string schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StringCheck {
    // ==========================================================================
    // Length
    // ==========================================================================
    /// Minimum length: `.min(n)`
    Min { value: usize },

    /// Maximum length: `.max(n)`
    Max { value: usize },

    /// Exact length: `.length(n)`
    Length { value: usize },

    // ==========================================================================
    // Formats
    // ==========================================================================
    /// Email format: `.email()`
    Email,

    /// URL format: `.url()`
    Url,

    /// Emoji-only content: `.emoji()`
    Emoji,

    /// UUID format: `.uuid()`
    Uuid,

    /// CUID format: `.cuid()`
    Cuid,

    /// CUID2 format: `.cuid2()`
    Cuid2,

    /// ULID format: `.ulid()`
    Ulid,

    /// Regex pattern: `.regex(/pattern/)`
    Regex { regex: String },

    /// Contains substring: `.includes("s")`
    Includes { value: String },

    /// Starts with prefix: `.startsWith("s")`
    StartsWith { value: String },

    /// Ends with suffix: `.endsWith("s")`
    EndsWith { value: String },

    /// ISO datetime: `.datetime({ offset, precision })`
    Datetime {
        #[serde(default)]
        offset: bool,
        #[serde(default)]
        precision: Option<u32>,
    },

    /// IP address: `.ip({ version })`
    Ip {
        #[serde(default)]
        version: Option<IpVersion>,
    },

    // ==========================================================================
    // Transforms
    // ==========================================================================
    /// `.toLowerCase()`
    ToLowerCase,

    /// `.toUpperCase()`
    ToUpperCase,

    /// `.trim()`
    Trim,
}

/// Check declared on a number schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NumberCheck {
    /// Lower bound: `.min(n)` / `.gte(n)` when inclusive, `.gt(n)` otherwise.
    Min { value: f64, inclusive: bool },

    /// Upper bound: `.max(n)` / `.lte(n)` when inclusive, `.lt(n)` otherwise.
    Max { value: f64, inclusive: bool },

    /// `.multipleOf(n)`
    MultipleOf { value: f64 },

    /// `.int()`
    Int,

    /// `.finite()`
    Finite,
}

/// Check declared on a bigint schema.
///
/// Values are read from JSON integers or from decimal strings, since bigints
/// outside the `i64` range have no JSON number form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BigIntCheck {
    /// Lower bound, inclusive or strict.
    Min {
        #[serde(deserialize_with = "deserialize_bigint")]
        value: i128,
        inclusive: bool,
    },

    /// Upper bound, inclusive or strict.
    Max {
        #[serde(deserialize_with = "deserialize_bigint")]
        value: i128,
        inclusive: bool,
    },

    /// `.multipleOf(n)`
    MultipleOf {
        #[serde(deserialize_with = "deserialize_bigint")]
        value: i128,
    },
}

/// The `kind` tags a check enum accepts.
pub(crate) trait CheckKinds {
    const KINDS: &'static [&'static str];
}

impl CheckKinds for StringCheck {
    const KINDS: &'static [&'static str] = &[
        "min",
        "max",
        "length",
        "email",
        "url",
        "emoji",
        "uuid",
        "cuid",
        "cuid2",
        "ulid",
        "regex",
        "includes",
        "startsWith",
        "endsWith",
        "datetime",
        "ip",
        "toLowerCase",
        "toUpperCase",
        "trim",
    ];
}

impl CheckKinds for NumberCheck {
    const KINDS: &'static [&'static str] = &["min", "max", "multipleOf", "int", "finite"];
}

impl CheckKinds for BigIntCheck {
    const KINDS: &'static [&'static str] = &["min", "max", "multipleOf"];
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BigIntRepr {
    Integer(i64),
    Text(String),
}

fn deserialize_bigint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
    match BigIntRepr::deserialize(deserializer)? {
        BigIntRepr::Integer(value) => Ok(value.into()),
        BigIntRepr::Text(text) => text.trim_end_matches('n').parse().map_err(D::Error::custom),
    }
}

/// Length bound on an array schema (`minLength`, `maxLength`, `exactLength`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBound {
    pub value: usize,
}
