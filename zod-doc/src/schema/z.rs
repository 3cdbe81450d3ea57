//! Fluent schema constructors mirroring the Zod API.
//!
//! ```rust
//! use zod_doc::schema::z::{self, SchemaExt};
//!
//! let user = z::object()
//!     .field("id", z::string().uuid())
//!     .field("age", z::number().min(0.0).optional())
//!     .field("tags", z::array(z::string()).max(5))
//!     .describe("A registered user");
//!
//! assert_eq!(user.description.as_deref(), Some("A registered user"));
//! ```
//!
//! Leaf builders (`string`, `number`, `bigint`, `array`, `object`) collect
//! checks and convert into a [`SchemaRef`] on first use of a modifier or
//! when passed to a composite constructor. Every constructor creates a new
//! node, so two calls to `z::string()` never yield "the same schema".

use indexmap::IndexMap;

use super::{
    BigIntCheck, DefaultValue, Effect, EnumValue, IpVersion, LengthBound, NumberCheck, Primitive,
    Schema, SchemaKind, SchemaRef, ShapeEntry, StringCheck,
};

fn node(kind: SchemaKind) -> SchemaRef {
    SchemaRef::new(Schema::new(kind))
}

/// A wrapper node that keeps its inner node's description.
fn wrapper(inner: SchemaRef, kind: impl FnOnce(SchemaRef) -> SchemaKind) -> SchemaRef {
    let description = inner.description.clone();
    SchemaRef::new(Schema {
        description,
        ..Schema::new(kind(inner))
    })
}

// =============================================================================
// Modifiers
// =============================================================================

/// Modifier methods available on every schema and builder.
///
/// `optional`, `nullable`, `default`, `brand` and the effect modifiers carry
/// the receiver's description onto the new wrapper. `readonly` and `pipe`
/// start undescribed.
pub trait SchemaExt: Into<SchemaRef> {
    /// `.optional()`
    fn optional(self) -> SchemaRef {
        wrapper(self.into(), |inner| SchemaKind::Optional { inner })
    }

    /// `.nullable()`
    fn nullable(self) -> SchemaRef {
        wrapper(self.into(), |inner| SchemaKind::Nullable { inner })
    }

    /// `.nullish()`, i.e. `.nullable().optional()`
    fn nullish(self) -> SchemaRef {
        self.nullable().optional()
    }

    /// `.default(value)` with a constant value.
    fn default_value(self, value: serde_json::Value) -> SchemaRef {
        self.default_with(DefaultValue::constant(value))
    }

    /// `.default(() => value)` with an explicit resolver.
    fn default_with(self, default: DefaultValue) -> SchemaRef {
        wrapper(self.into(), |inner| SchemaKind::Default { inner, default })
    }

    /// `.readonly()`
    fn readonly(self) -> SchemaRef {
        node(SchemaKind::Readonly { inner: self.into() })
    }

    /// `.brand()`
    fn brand(self) -> SchemaRef {
        wrapper(self.into(), |inner| SchemaKind::Branded { inner })
    }

    /// `.refine(...)`
    fn refine(self) -> SchemaRef {
        wrapper(self.into(), |schema| SchemaKind::Effects {
            schema,
            effect: Effect::Refinement,
        })
    }

    /// `.transform(...)`
    fn transform(self) -> SchemaRef {
        wrapper(self.into(), |schema| SchemaKind::Effects {
            schema,
            effect: Effect::Transform,
        })
    }

    /// `.pipe(output)`
    fn pipe(self, output: impl Into<SchemaRef>) -> SchemaRef {
        node(SchemaKind::Pipeline {
            input: self.into(),
            output: output.into(),
        })
    }

    /// `.describe(text)`: a copy of this node with a new description.
    ///
    /// The copy shares the original's definition, so child nodes stay shared
    /// and reference resolution treats it as the original.
    fn describe(self, description: impl Into<String>) -> SchemaRef {
        let schema: SchemaRef = self.into();
        SchemaRef::new(schema.described(description))
    }
}

impl<T: Into<SchemaRef>> SchemaExt for T {}

// =============================================================================
// Leaves
// =============================================================================

macro_rules! simple_constructors {
    ($($(#[$doc:meta])* $fn_name:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name() -> SchemaRef {
                node(SchemaKind::$kind)
            }
        )*
    };
}

simple_constructors! {
    /// `z.boolean()`
    boolean => Boolean,
    /// `z.date()`
    date => Date,
    /// `z.symbol()`
    symbol => Symbol,
    /// `z.undefined()`
    undefined => Undefined,
    /// `z.null()`
    null => Null,
    /// `z.any()`
    any => Any,
    /// `z.unknown()`
    unknown => Unknown,
    /// `z.void()`
    void => Void,
    /// `z.never()`
    never => Never,
}

/// `z.string()`
pub fn string() -> StringBuilder {
    StringBuilder { checks: Vec::new() }
}

/// Builder for string schemas.
#[derive(Debug, Clone)]
pub struct StringBuilder {
    checks: Vec<StringCheck>,
}

impl StringBuilder {
    fn check(mut self, check: StringCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn min(self, value: usize) -> Self {
        self.check(StringCheck::Min { value })
    }

    pub fn max(self, value: usize) -> Self {
        self.check(StringCheck::Max { value })
    }

    pub fn length(self, value: usize) -> Self {
        self.check(StringCheck::Length { value })
    }

    pub fn email(self) -> Self {
        self.check(StringCheck::Email)
    }

    pub fn url(self) -> Self {
        self.check(StringCheck::Url)
    }

    pub fn emoji(self) -> Self {
        self.check(StringCheck::Emoji)
    }

    pub fn uuid(self) -> Self {
        self.check(StringCheck::Uuid)
    }

    pub fn cuid(self) -> Self {
        self.check(StringCheck::Cuid)
    }

    pub fn cuid2(self) -> Self {
        self.check(StringCheck::Cuid2)
    }

    pub fn ulid(self) -> Self {
        self.check(StringCheck::Ulid)
    }

    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.check(StringCheck::Regex {
            regex: pattern.into(),
        })
    }

    pub fn includes(self, value: impl Into<String>) -> Self {
        self.check(StringCheck::Includes {
            value: value.into(),
        })
    }

    pub fn starts_with(self, value: impl Into<String>) -> Self {
        self.check(StringCheck::StartsWith {
            value: value.into(),
        })
    }

    pub fn ends_with(self, value: impl Into<String>) -> Self {
        self.check(StringCheck::EndsWith {
            value: value.into(),
        })
    }

    pub fn datetime(self, offset: bool, precision: Option<u32>) -> Self {
        self.check(StringCheck::Datetime { offset, precision })
    }

    pub fn ip(self, version: Option<IpVersion>) -> Self {
        self.check(StringCheck::Ip { version })
    }

    pub fn to_lower_case(self) -> Self {
        self.check(StringCheck::ToLowerCase)
    }

    pub fn to_upper_case(self) -> Self {
        self.check(StringCheck::ToUpperCase)
    }

    pub fn trim(self) -> Self {
        self.check(StringCheck::Trim)
    }
}

impl From<StringBuilder> for SchemaRef {
    fn from(builder: StringBuilder) -> Self {
        node(SchemaKind::String {
            checks: builder.checks,
        })
    }
}

/// `z.number()`
pub fn number() -> NumberBuilder {
    NumberBuilder { checks: Vec::new() }
}

/// Builder for number schemas.
#[derive(Debug, Clone)]
pub struct NumberBuilder {
    checks: Vec<NumberCheck>,
}

impl NumberBuilder {
    fn check(mut self, check: NumberCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// `.min(n)`, an alias for `.gte(n)`.
    pub fn min(self, value: f64) -> Self {
        self.gte(value)
    }

    /// `.max(n)`, an alias for `.lte(n)`.
    pub fn max(self, value: f64) -> Self {
        self.lte(value)
    }

    pub fn gte(self, value: f64) -> Self {
        self.check(NumberCheck::Min {
            value,
            inclusive: true,
        })
    }

    pub fn gt(self, value: f64) -> Self {
        self.check(NumberCheck::Min {
            value,
            inclusive: false,
        })
    }

    pub fn lte(self, value: f64) -> Self {
        self.check(NumberCheck::Max {
            value,
            inclusive: true,
        })
    }

    pub fn lt(self, value: f64) -> Self {
        self.check(NumberCheck::Max {
            value,
            inclusive: false,
        })
    }

    /// `.positive()`, i.e. `.gt(0)`.
    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    /// `.nonnegative()`, i.e. `.gte(0)`.
    pub fn nonnegative(self) -> Self {
        self.gte(0.0)
    }

    pub fn multiple_of(self, value: f64) -> Self {
        self.check(NumberCheck::MultipleOf { value })
    }

    pub fn int(self) -> Self {
        self.check(NumberCheck::Int)
    }

    pub fn finite(self) -> Self {
        self.check(NumberCheck::Finite)
    }
}

impl From<NumberBuilder> for SchemaRef {
    fn from(builder: NumberBuilder) -> Self {
        node(SchemaKind::Number {
            checks: builder.checks,
        })
    }
}

/// `z.bigint()`
pub fn bigint() -> BigIntBuilder {
    BigIntBuilder { checks: Vec::new() }
}

/// Builder for bigint schemas.
#[derive(Debug, Clone)]
pub struct BigIntBuilder {
    checks: Vec<BigIntCheck>,
}

impl BigIntBuilder {
    fn check(mut self, check: BigIntCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn gte(self, value: i128) -> Self {
        self.check(BigIntCheck::Min {
            value,
            inclusive: true,
        })
    }

    pub fn gt(self, value: i128) -> Self {
        self.check(BigIntCheck::Min {
            value,
            inclusive: false,
        })
    }

    pub fn lte(self, value: i128) -> Self {
        self.check(BigIntCheck::Max {
            value,
            inclusive: true,
        })
    }

    pub fn lt(self, value: i128) -> Self {
        self.check(BigIntCheck::Max {
            value,
            inclusive: false,
        })
    }

    pub fn multiple_of(self, value: i128) -> Self {
        self.check(BigIntCheck::MultipleOf { value })
    }
}

impl From<BigIntBuilder> for SchemaRef {
    fn from(builder: BigIntBuilder) -> Self {
        node(SchemaKind::BigInt {
            checks: builder.checks,
        })
    }
}

/// `z.literal(value)`
pub fn literal(value: Primitive) -> SchemaRef {
    node(SchemaKind::Literal { value })
}

/// `z.enum([...])`
pub fn enumeration<I, S>(values: I) -> SchemaRef
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    node(SchemaKind::Enum {
        values: values.into_iter().map(Into::into).collect(),
    })
}

/// `z.nativeEnum(Enum)`
pub fn native_enum<I, K>(entries: I) -> SchemaRef
where
    I: IntoIterator<Item = (K, EnumValue)>,
    K: Into<String>,
{
    let entries: IndexMap<String, EnumValue> = entries
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .collect();
    node(SchemaKind::NativeEnum { entries })
}

// =============================================================================
// Composites
// =============================================================================

/// `z.array(element)`
pub fn array(element: impl Into<SchemaRef>) -> ArrayBuilder {
    ArrayBuilder {
        element: element.into(),
        min_length: None,
        max_length: None,
        exact_length: None,
    }
}

/// Builder for array schemas.
#[derive(Debug, Clone)]
pub struct ArrayBuilder {
    element: SchemaRef,
    min_length: Option<LengthBound>,
    max_length: Option<LengthBound>,
    exact_length: Option<LengthBound>,
}

impl ArrayBuilder {
    pub fn min(mut self, value: usize) -> Self {
        self.min_length = Some(LengthBound { value });
        self
    }

    pub fn max(mut self, value: usize) -> Self {
        self.max_length = Some(LengthBound { value });
        self
    }

    pub fn length(mut self, value: usize) -> Self {
        self.exact_length = Some(LengthBound { value });
        self
    }

    /// `.nonempty()`, i.e. `.min(1)`.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }
}

impl From<ArrayBuilder> for SchemaRef {
    fn from(builder: ArrayBuilder) -> Self {
        node(SchemaKind::Array {
            element: builder.element,
            min_length: builder.min_length,
            max_length: builder.max_length,
            exact_length: builder.exact_length,
        })
    }
}

/// `z.object({})`
pub fn object() -> ObjectBuilder {
    ObjectBuilder { shape: Vec::new() }
}

/// Builder for object schemas. Fields keep insertion order.
#[derive(Debug, Clone)]
pub struct ObjectBuilder {
    shape: Vec<(String, ShapeEntry)>,
}

impl ObjectBuilder {
    /// Add a schema-valued property.
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        self.shape
            .push((key.into(), ShapeEntry::Schema(schema.into())));
        self
    }

    /// Add a non-schema property; it is ignored by conversion.
    pub fn value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.shape.push((key.into(), ShapeEntry::Value(value)));
        self
    }
}

impl From<ObjectBuilder> for SchemaRef {
    fn from(builder: ObjectBuilder) -> Self {
        node(SchemaKind::Object {
            shape: builder.shape,
        })
    }
}

fn collect<I, T>(schemas: I) -> Vec<SchemaRef>
where
    I: IntoIterator<Item = T>,
    T: Into<SchemaRef>,
{
    schemas.into_iter().map(Into::into).collect()
}

/// `z.union([...])`
pub fn union<I, T>(options: I) -> SchemaRef
where
    I: IntoIterator<Item = T>,
    T: Into<SchemaRef>,
{
    node(SchemaKind::Union {
        options: collect(options),
    })
}

/// `z.discriminatedUnion(discriminator, [...])`
pub fn discriminated_union<I, T>(discriminator: impl Into<String>, options: I) -> SchemaRef
where
    I: IntoIterator<Item = T>,
    T: Into<SchemaRef>,
{
    node(SchemaKind::DiscriminatedUnion {
        discriminator: discriminator.into(),
        options: collect(options),
    })
}

/// `z.intersection(left, right)`
pub fn intersection(left: impl Into<SchemaRef>, right: impl Into<SchemaRef>) -> SchemaRef {
    node(SchemaKind::Intersection {
        left: left.into(),
        right: right.into(),
    })
}

/// `z.record(key, value)`
pub fn record(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>) -> SchemaRef {
    node(SchemaKind::Record {
        key: key.into(),
        value: value.into(),
    })
}

/// `z.tuple([...])`
pub fn tuple<I, T>(items: I) -> SchemaRef
where
    I: IntoIterator<Item = T>,
    T: Into<SchemaRef>,
{
    node(SchemaKind::Tuple {
        items: collect(items),
        rest: None,
    })
}

/// `z.tuple([...]).rest(rest)`
pub fn tuple_with_rest<I, T>(items: I, rest: impl Into<SchemaRef>) -> SchemaRef
where
    I: IntoIterator<Item = T>,
    T: Into<SchemaRef>,
{
    node(SchemaKind::Tuple {
        items: collect(items),
        rest: Some(rest.into()),
    })
}

/// `z.function().args(...).returns(returns)`
pub fn function<I, T>(args: I, returns: impl Into<SchemaRef>) -> SchemaRef
where
    I: IntoIterator<Item = T>,
    T: Into<SchemaRef>,
{
    node(SchemaKind::Function {
        args: collect(args),
        returns: returns.into(),
    })
}

/// `z.promise(inner)`
pub fn promise(inner: impl Into<SchemaRef>) -> SchemaRef {
    node(SchemaKind::Promise {
        inner: inner.into(),
    })
}
