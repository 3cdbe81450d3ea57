//! Constraint extraction.
//!
//! Maps the checks declared on a leaf schema to validation tuples. String
//! transforms (`trim`, `toLowerCase`, `toUpperCase`) rewrite values rather
//! than constrain them and are dropped.

use crate::model::{
    ArrayValidation, BigIntValidation, DatetimeOptions, IpOptions, NumberValidation,
    StringValidation,
};
use crate::schema::{BigIntCheck, LengthBound, NumberCheck, StringCheck};

/// Validations for a string schema, in declaration order.
pub fn string_validations(checks: &[StringCheck]) -> Vec<StringValidation> {
    checks.iter().filter_map(string_validation).collect()
}

fn string_validation(check: &StringCheck) -> Option<StringValidation> {
    let validation = match check {
        StringCheck::Min { value } => StringValidation::Min(*value),
        StringCheck::Max { value } => StringValidation::Max(*value),
        StringCheck::Length { value } => StringValidation::Length(*value),
        StringCheck::Email => StringValidation::Email,
        StringCheck::Url => StringValidation::Url,
        StringCheck::Emoji => StringValidation::Emoji,
        StringCheck::Uuid => StringValidation::Uuid,
        StringCheck::Cuid => StringValidation::Cuid,
        StringCheck::Cuid2 => StringValidation::Cuid2,
        StringCheck::Ulid => StringValidation::Ulid,
        StringCheck::Regex { regex } => StringValidation::Regex(regex.clone()),
        StringCheck::Includes { value } => StringValidation::Includes(value.clone()),
        StringCheck::StartsWith { value } => StringValidation::StartsWith(value.clone()),
        StringCheck::EndsWith { value } => StringValidation::EndsWith(value.clone()),
        StringCheck::Datetime { offset, precision } => {
            StringValidation::Datetime(DatetimeOptions {
                offset: *offset,
                precision: *precision,
            })
        }
        StringCheck::Ip { version } => StringValidation::Ip(IpOptions { version: *version }),
        StringCheck::ToLowerCase | StringCheck::ToUpperCase | StringCheck::Trim => return None,
    };
    Some(validation)
}

/// Validations for a number schema, in declaration order.
pub fn number_validations(checks: &[NumberCheck]) -> Vec<NumberValidation> {
    checks
        .iter()
        .map(|check| match check {
            NumberCheck::Min { value, inclusive: true } => NumberValidation::Gte(*value),
            NumberCheck::Min { value, inclusive: false } => NumberValidation::Gt(*value),
            NumberCheck::Max { value, inclusive: true } => NumberValidation::Lte(*value),
            NumberCheck::Max { value, inclusive: false } => NumberValidation::Lt(*value),
            NumberCheck::MultipleOf { value } => NumberValidation::MultipleOf(*value),
            NumberCheck::Int => NumberValidation::Int,
            NumberCheck::Finite => NumberValidation::Finite,
        })
        .collect()
}

/// Validations for a bigint schema, in declaration order.
pub fn bigint_validations(checks: &[BigIntCheck]) -> Vec<BigIntValidation> {
    checks
        .iter()
        .map(|check| match check {
            BigIntCheck::Min { value, inclusive: true } => BigIntValidation::Gte(*value),
            BigIntCheck::Min { value, inclusive: false } => BigIntValidation::Gt(*value),
            BigIntCheck::Max { value, inclusive: true } => BigIntValidation::Lte(*value),
            BigIntCheck::Max { value, inclusive: false } => BigIntValidation::Lt(*value),
            BigIntCheck::MultipleOf { value } => BigIntValidation::MultipleOf(*value),
        })
        .collect()
}

/// Validations for an array schema: min, max, then exact length.
pub fn array_validations(
    min_length: Option<LengthBound>,
    max_length: Option<LengthBound>,
    exact_length: Option<LengthBound>,
) -> Vec<ArrayValidation> {
    [
        min_length.map(|bound| ArrayValidation::Min(bound.value)),
        max_length.map(|bound| ArrayValidation::Max(bound.value)),
        exact_length.map(|bound| ArrayValidation::Length(bound.value)),
    ]
    .into_iter()
    .flatten()
    .collect()
}
