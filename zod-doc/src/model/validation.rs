//! Validation tuple definitions.
//!
//! Validations are the normalized, documentation-relevant constraints of a
//! leaf model. They serialize either as a bare tag (`"email"`) or as a
//! `[kind, parameter]` pair (`["min", 1]`), matching what a formatter expects
//! to render.

use serde::ser::{SerializeTuple, Serializer};
use serde::Serialize;

use crate::schema::{IpVersion, JsNumber};

fn tagged<S, T>(serializer: S, kind: &str, value: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(kind)?;
    tuple.serialize_element(value)?;
    tuple.end()
}

/// Parameters of a `datetime` string validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatetimeOptions {
    pub offset: bool,
    pub precision: Option<u32>,
}

/// Parameters of an `ip` string validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<IpVersion>,
}

/// Validation on a string model.
#[derive(Debug, Clone, PartialEq)]
pub enum StringValidation {
    /// `["min", n]`
    Min(usize),
    /// `["max", n]`
    Max(usize),
    /// `["length", n]`
    Length(usize),
    Email,
    Url,
    Emoji,
    Uuid,
    Cuid,
    Cuid2,
    Ulid,
    /// `["regex", pattern]`
    Regex(String),
    /// `["includes", s]`
    Includes(String),
    /// `["startsWith", s]`
    StartsWith(String),
    /// `["endsWith", s]`
    EndsWith(String),
    /// `["datetime", { offset, precision }]`
    Datetime(DatetimeOptions),
    /// `["ip", { version }]`
    Ip(IpOptions),
}

impl StringValidation {
    /// The validation kind as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            StringValidation::Min(_) => "min",
            StringValidation::Max(_) => "max",
            StringValidation::Length(_) => "length",
            StringValidation::Email => "email",
            StringValidation::Url => "url",
            StringValidation::Emoji => "emoji",
            StringValidation::Uuid => "uuid",
            StringValidation::Cuid => "cuid",
            StringValidation::Cuid2 => "cuid2",
            StringValidation::Ulid => "ulid",
            StringValidation::Regex(_) => "regex",
            StringValidation::Includes(_) => "includes",
            StringValidation::StartsWith(_) => "startsWith",
            StringValidation::EndsWith(_) => "endsWith",
            StringValidation::Datetime(_) => "datetime",
            StringValidation::Ip(_) => "ip",
        }
    }
}

impl Serialize for StringValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            StringValidation::Min(n) | StringValidation::Max(n) | StringValidation::Length(n) => {
                tagged(serializer, kind, n)
            }
            StringValidation::Regex(s)
            | StringValidation::Includes(s)
            | StringValidation::StartsWith(s)
            | StringValidation::EndsWith(s) => tagged(serializer, kind, s),
            StringValidation::Datetime(options) => tagged(serializer, kind, options),
            StringValidation::Ip(options) => tagged(serializer, kind, options),
            StringValidation::Email
            | StringValidation::Url
            | StringValidation::Emoji
            | StringValidation::Uuid
            | StringValidation::Cuid
            | StringValidation::Cuid2
            | StringValidation::Ulid => serializer.serialize_str(kind),
        }
    }
}

/// Validation on a number model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValidation {
    /// `["gt", n]`
    Gt(f64),
    /// `["gte", n]`
    Gte(f64),
    /// `["lt", n]`
    Lt(f64),
    /// `["lte", n]`
    Lte(f64),
    /// `["multipleOf", n]`
    MultipleOf(f64),
    Int,
    Finite,
}

impl NumberValidation {
    /// The validation kind as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            NumberValidation::Gt(_) => "gt",
            NumberValidation::Gte(_) => "gte",
            NumberValidation::Lt(_) => "lt",
            NumberValidation::Lte(_) => "lte",
            NumberValidation::MultipleOf(_) => "multipleOf",
            NumberValidation::Int => "int",
            NumberValidation::Finite => "finite",
        }
    }
}

impl Serialize for NumberValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            NumberValidation::Gt(n)
            | NumberValidation::Gte(n)
            | NumberValidation::Lt(n)
            | NumberValidation::Lte(n)
            | NumberValidation::MultipleOf(n) => tagged(serializer, kind, &JsNumber(*n)),
            NumberValidation::Int | NumberValidation::Finite => serializer.serialize_str(kind),
        }
    }
}

/// Validation on a bigint model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigIntValidation {
    Gt(i128),
    Gte(i128),
    Lt(i128),
    Lte(i128),
    MultipleOf(i128),
}

impl BigIntValidation {
    /// The validation kind as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            BigIntValidation::Gt(_) => "gt",
            BigIntValidation::Gte(_) => "gte",
            BigIntValidation::Lt(_) => "lt",
            BigIntValidation::Lte(_) => "lte",
            BigIntValidation::MultipleOf(_) => "multipleOf",
        }
    }
}

impl Serialize for BigIntValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BigIntValidation::Gt(n)
            | BigIntValidation::Gte(n)
            | BigIntValidation::Lt(n)
            | BigIntValidation::Lte(n)
            | BigIntValidation::MultipleOf(n) => tagged(serializer, self.kind(), n),
        }
    }
}

/// Validation on an array model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayValidation {
    /// `["min", n]`
    Min(usize),
    /// `["max", n]`
    Max(usize),
    /// `["length", n]`
    Length(usize),
}

impl ArrayValidation {
    /// The validation kind as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            ArrayValidation::Min(_) => "min",
            ArrayValidation::Max(_) => "max",
            ArrayValidation::Length(_) => "length",
        }
    }
}

impl Serialize for ArrayValidation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArrayValidation::Min(n) | ArrayValidation::Max(n) | ArrayValidation::Length(n) => {
                tagged(serializer, self.kind(), n)
            }
        }
    }
}
