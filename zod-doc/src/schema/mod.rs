//! Schema node definitions.
//!
//! This module defines the input side of the conversion: an immutable graph
//! of schema nodes, each carrying a variant tag ([`SchemaKind`]) and an
//! optional description. Nodes are shared through [`SchemaRef`], whose
//! equality is pointer identity, so "the same schema" means the same node
//! and not a structurally equal copy.

pub mod checks;
pub mod z;

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use checks::{BigIntCheck, IpVersion, LengthBound, NumberCheck, StringCheck};

/// Shared handle to an immutable schema node.
///
/// Two handles are equal only when they point at the same node.
#[derive(Clone)]
pub struct SchemaRef(Arc<Schema>);

impl SchemaRef {
    /// Wrap a schema node in a new shared handle.
    pub fn new(schema: Schema) -> Self {
        Self(Arc::new(schema))
    }

    /// Check whether two handles point at the identical node.
    pub fn ptr_eq(&self, other: &SchemaRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SchemaRef {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.0
    }
}

impl PartialEq for SchemaRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SchemaRef {}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        SchemaRef::new(schema)
    }
}

/// Identity token of a definition instance.
///
/// Every new node gets a fresh token. [`Schema::described`] copies keep the
/// token of their source.
#[derive(Clone)]
struct DefinitionId(Arc<()>);

impl DefinitionId {
    fn fresh() -> Self {
        Self(Arc::new(()))
    }
}

impl fmt::Debug for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefinitionId({:p})", Arc::as_ptr(&self.0))
    }
}

/// A schema node: a definition plus its human-readable description.
#[derive(Debug, Clone)]
pub struct Schema {
    /// The variant-specific definition.
    pub kind: SchemaKind,

    /// Description attached with `.describe()`.
    pub description: Option<String>,

    definition: DefinitionId,
}

impl Schema {
    /// Create an undescribed node.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            definition: DefinitionId::fresh(),
        }
    }

    /// A copy of this node with a new description.
    ///
    /// The copy shares this node's definition, so
    /// [`shares_definition`](Self::shares_definition) holds between the two.
    pub fn described(&self, description: impl Into<String>) -> Self {
        Self {
            kind: self.kind.clone(),
            description: Some(description.into()),
            definition: self.definition.clone(),
        }
    }

    /// Check whether both nodes come from the same definition instance,
    /// i.e. one is a described copy of the other or both copy a common source.
    pub fn shares_definition(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.definition.0, &other.definition.0)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The Zod type name of this node (`ZodString`, `ZodOptional`, ...).
    ///
    /// Returns `None` for an unrecognized node that carried no tag at all.
    pub fn type_name(&self) -> Option<&str> {
        self.kind.type_name()
    }

    /// The inner node of an `Optional`, `Nullable`, `Default` or `Readonly`
    /// wrapper. Other wrappers name their inner node differently and are not
    /// unwrapped here.
    pub fn inner_type(&self) -> Option<&SchemaRef> {
        match &self.kind {
            SchemaKind::Optional { inner }
            | SchemaKind::Nullable { inner }
            | SchemaKind::Default { inner, .. }
            | SchemaKind::Readonly { inner } => Some(inner),
            _ => None,
        }
    }

    /// Whether the schema accepts `undefined`.
    pub fn is_optional(&self) -> bool {
        match &self.kind {
            SchemaKind::Optional { .. }
            | SchemaKind::Default { .. }
            | SchemaKind::Undefined
            | SchemaKind::Void
            | SchemaKind::Any
            | SchemaKind::Unknown => true,
            SchemaKind::Literal { value } => matches!(value, Primitive::Undefined),
            SchemaKind::Union { options } | SchemaKind::DiscriminatedUnion { options, .. } => {
                options.iter().any(|option| option.is_optional())
            }
            SchemaKind::Intersection { left, right } => left.is_optional() && right.is_optional(),
            SchemaKind::Nullable { inner }
            | SchemaKind::Readonly { inner }
            | SchemaKind::Branded { inner } => inner.is_optional(),
            SchemaKind::Effects { schema, .. } => schema.is_optional(),
            SchemaKind::Pipeline { input, .. } => input.is_optional(),
            _ => false,
        }
    }

    /// Whether the schema accepts `null`.
    pub fn is_nullable(&self) -> bool {
        match &self.kind {
            SchemaKind::Nullable { .. }
            | SchemaKind::Null
            | SchemaKind::Any
            | SchemaKind::Unknown => true,
            SchemaKind::Literal { value } => matches!(value, Primitive::Null),
            SchemaKind::Union { options } | SchemaKind::DiscriminatedUnion { options, .. } => {
                options.iter().any(|option| option.is_nullable())
            }
            SchemaKind::Intersection { left, right } => left.is_nullable() && right.is_nullable(),
            SchemaKind::Optional { inner }
            | SchemaKind::Default { inner, .. }
            | SchemaKind::Readonly { inner }
            | SchemaKind::Branded { inner } => inner.is_nullable(),
            SchemaKind::Effects { schema, .. } => schema.is_nullable(),
            SchemaKind::Pipeline { input, .. } => input.is_nullable(),
            _ => false,
        }
    }
}

/// Variant-specific schema definition.
///
/// Child nodes are [`SchemaRef`]s, so the derived equality compares children
/// by identity and everything else by value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    // ==========================================================================
    // Leaves
    // ==========================================================================
    String {
        checks: Vec<StringCheck>,
    },
    Number {
        checks: Vec<NumberCheck>,
    },
    BigInt {
        checks: Vec<BigIntCheck>,
    },
    Boolean,
    Date,
    Symbol,
    Undefined,
    Null,
    Any,
    Unknown,
    Void,
    Never,

    // ==========================================================================
    // Composites
    // ==========================================================================
    Array {
        element: SchemaRef,
        min_length: Option<LengthBound>,
        max_length: Option<LengthBound>,
        exact_length: Option<LengthBound>,
    },
    /// Object shape in declaration order.
    Object {
        shape: Vec<(String, ShapeEntry)>,
    },
    Union {
        options: Vec<SchemaRef>,
    },
    DiscriminatedUnion {
        discriminator: String,
        options: Vec<SchemaRef>,
    },
    Intersection {
        left: SchemaRef,
        right: SchemaRef,
    },
    Record {
        key: SchemaRef,
        value: SchemaRef,
    },
    Tuple {
        items: Vec<SchemaRef>,
        rest: Option<SchemaRef>,
    },
    Function {
        args: Vec<SchemaRef>,
        returns: SchemaRef,
    },
    Promise {
        inner: SchemaRef,
    },
    /// String enum, values in declared order.
    Enum {
        values: Vec<String>,
    },
    /// TypeScript-style enum object, entries in declared order.
    NativeEnum {
        entries: IndexMap<String, EnumValue>,
    },
    Literal {
        value: Primitive,
    },

    // ==========================================================================
    // Modifier wrappers
    // ==========================================================================
    Optional {
        inner: SchemaRef,
    },
    Nullable {
        inner: SchemaRef,
    },
    Default {
        inner: SchemaRef,
        default: DefaultValue,
    },
    Readonly {
        inner: SchemaRef,
    },
    /// Refinement, transform or preprocess around `schema`.
    Effects {
        schema: SchemaRef,
        effect: Effect,
    },
    Branded {
        inner: SchemaRef,
    },
    /// `input.pipe(output)`
    Pipeline {
        input: SchemaRef,
        output: SchemaRef,
    },

    /// A node whose tag is outside the set above.
    Unrecognized {
        type_name: Option<String>,
    },
}

impl SchemaKind {
    /// The Zod type name for this variant.
    pub fn type_name(&self) -> Option<&str> {
        let name = match self {
            SchemaKind::String { .. } => "ZodString",
            SchemaKind::Number { .. } => "ZodNumber",
            SchemaKind::BigInt { .. } => "ZodBigInt",
            SchemaKind::Boolean => "ZodBoolean",
            SchemaKind::Date => "ZodDate",
            SchemaKind::Symbol => "ZodSymbol",
            SchemaKind::Undefined => "ZodUndefined",
            SchemaKind::Null => "ZodNull",
            SchemaKind::Any => "ZodAny",
            SchemaKind::Unknown => "ZodUnknown",
            SchemaKind::Void => "ZodVoid",
            SchemaKind::Never => "ZodNever",
            SchemaKind::Array { .. } => "ZodArray",
            SchemaKind::Object { .. } => "ZodObject",
            SchemaKind::Union { .. } => "ZodUnion",
            SchemaKind::DiscriminatedUnion { .. } => "ZodDiscriminatedUnion",
            SchemaKind::Intersection { .. } => "ZodIntersection",
            SchemaKind::Record { .. } => "ZodRecord",
            SchemaKind::Tuple { .. } => "ZodTuple",
            SchemaKind::Function { .. } => "ZodFunction",
            SchemaKind::Promise { .. } => "ZodPromise",
            SchemaKind::Enum { .. } => "ZodEnum",
            SchemaKind::NativeEnum { .. } => "ZodNativeEnum",
            SchemaKind::Literal { .. } => "ZodLiteral",
            SchemaKind::Optional { .. } => "ZodOptional",
            SchemaKind::Nullable { .. } => "ZodNullable",
            SchemaKind::Default { .. } => "ZodDefault",
            SchemaKind::Readonly { .. } => "ZodReadonly",
            SchemaKind::Effects { .. } => "ZodEffects",
            SchemaKind::Branded { .. } => "ZodBranded",
            SchemaKind::Pipeline { .. } => "ZodPipeline",
            SchemaKind::Unrecognized { type_name } => return type_name.as_deref(),
        };
        Some(name)
    }
}

/// Entry in an object shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEntry {
    /// A schema-valued property.
    Schema(SchemaRef),
    /// Any other value stored in the shape; skipped during conversion.
    Value(serde_json::Value),
}

impl ShapeEntry {
    /// The schema behind this entry, if it is one.
    pub fn as_schema(&self) -> Option<&SchemaRef> {
        match self {
            ShapeEntry::Schema(schema) => Some(schema),
            ShapeEntry::Value(_) => None,
        }
    }
}

impl From<SchemaRef> for ShapeEntry {
    fn from(schema: SchemaRef) -> Self {
        ShapeEntry::Schema(schema)
    }
}

/// Kind of effect wrapped around a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Refinement,
    Transform,
    Preprocess,
}

/// Value of a native enum entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Number(f64),
}

impl Serialize for EnumValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EnumValue::String(value) => serializer.serialize_str(value),
            EnumValue::Number(value) => JsNumber(*value).serialize(serializer),
        }
    }
}

/// An `f64` that serializes like a JavaScript number: integral values are
/// written without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct JsNumber(pub f64);

impl Serialize for JsNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
        let value = self.0;
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

/// Primitive literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Number(f64),
    BigInt(i128),
    Boolean(bool),
    Null,
    Undefined,
}

impl Primitive {
    /// Check if this is the `undefined` literal.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Primitive::Undefined)
    }
}

// `Undefined` has no JSON form and is written as `null`. Callers that must
// keep it apart from `Null` skip it before serializing (see the literal
// model's `value` field).
impl Serialize for Primitive {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Primitive::String(value) => serializer.serialize_str(value),
            Primitive::Number(value) => JsNumber(*value).serialize(serializer),
            Primitive::BigInt(value) => serializer.serialize_i128(*value),
            Primitive::Boolean(value) => serializer.serialize_bool(*value),
            Primitive::Null | Primitive::Undefined => serializer.serialize_unit(),
        }
    }
}

/// Resolver producing the value of a `.default(...)` wrapper.
///
/// Equality is resolver identity: two defaults built from the same value in
/// different places are different defaults.
#[derive(Clone)]
pub struct DefaultValue(Arc<dyn Fn() -> serde_json::Value + Send + Sync>);

impl DefaultValue {
    /// Create a default from a resolver function.
    pub fn new(resolver: impl Fn() -> serde_json::Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(resolver))
    }

    /// Create a default that always yields a clone of `value`.
    pub fn constant(value: serde_json::Value) -> Self {
        Self::new(move || value.clone())
    }

    /// Invoke the resolver.
    pub fn resolve(&self) -> serde_json::Value {
        (self.0)()
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultValue").field(&self.resolve()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(kind: SchemaKind) -> SchemaRef {
        SchemaRef::new(Schema::new(kind))
    }

    #[test]
    fn test_schema_ref_identity() {
        let a = node(SchemaKind::Boolean);
        let b = node(SchemaKind::Boolean);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_described_copy_shares_definition() {
        let source = Schema::new(SchemaKind::String { checks: vec![] });
        let copy = source.described("Name");
        let twin = Schema::new(SchemaKind::String { checks: vec![] });

        assert_eq!(copy.description.as_deref(), Some("Name"));
        assert!(copy.shares_definition(&source));
        assert!(copy.described("Other").shares_definition(&source));
        assert!(!twin.shares_definition(&source));
        assert!(!twin.with_description("Name").shares_definition(&copy));
    }

    #[test]
    fn test_kind_equality_compares_children_by_identity() {
        let element = node(SchemaKind::String { checks: vec![] });
        let first = SchemaKind::Array {
            element: element.clone(),
            min_length: None,
            max_length: Some(LengthBound { value: 5 }),
            exact_length: None,
        };
        let same_child = SchemaKind::Array {
            element,
            min_length: None,
            max_length: Some(LengthBound { value: 5 }),
            exact_length: None,
        };
        let other_child = SchemaKind::Array {
            element: node(SchemaKind::String { checks: vec![] }),
            min_length: None,
            max_length: Some(LengthBound { value: 5 }),
            exact_length: None,
        };
        assert_eq!(first, same_child);
        assert_ne!(first, other_child);
    }

    #[test]
    fn test_inner_type() {
        let inner = node(SchemaKind::Number { checks: vec![] });
        let optional = Schema::new(SchemaKind::Optional {
            inner: inner.clone(),
        });
        assert_eq!(optional.inner_type(), Some(&inner));

        let branded = Schema::new(SchemaKind::Branded {
            inner: inner.clone(),
        });
        assert!(branded.inner_type().is_none());
    }

    #[test]
    fn test_optionality() {
        let string = node(SchemaKind::String { checks: vec![] });
        assert!(!string.is_optional());
        assert!(node(SchemaKind::Optional {
            inner: string.clone()
        })
        .is_optional());
        assert!(node(SchemaKind::Default {
            inner: string.clone(),
            default: DefaultValue::constant(json!("x")),
        })
        .is_optional());
        assert!(node(SchemaKind::Any).is_optional());
        assert!(node(SchemaKind::Nullable {
            inner: node(SchemaKind::Optional {
                inner: string.clone()
            })
        })
        .is_optional());
        assert!(node(SchemaKind::Union {
            options: vec![string.clone(), node(SchemaKind::Undefined)]
        })
        .is_optional());
        assert!(!node(SchemaKind::Nullable { inner: string }).is_optional());
    }

    #[test]
    fn test_nullability() {
        let string = node(SchemaKind::String { checks: vec![] });
        assert!(!string.is_nullable());
        assert!(node(SchemaKind::Nullable {
            inner: string.clone()
        })
        .is_nullable());
        assert!(node(SchemaKind::Literal {
            value: Primitive::Null
        })
        .is_nullable());
        assert!(node(SchemaKind::Optional {
            inner: node(SchemaKind::Null)
        })
        .is_nullable());
        assert!(!node(SchemaKind::Optional { inner: string }).is_nullable());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(
            Schema::new(SchemaKind::Boolean).type_name(),
            Some("ZodBoolean")
        );
        assert_eq!(
            Schema::new(SchemaKind::Unrecognized {
                type_name: Some("ZodLazy".to_string())
            })
            .type_name(),
            Some("ZodLazy")
        );
        assert_eq!(
            Schema::new(SchemaKind::Unrecognized { type_name: None }).type_name(),
            None
        );
    }

    #[test]
    fn test_numbers_serialize_like_javascript() {
        assert_eq!(serde_json::to_string(&JsNumber(0.0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&JsNumber(-3.0)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&JsNumber(2.5)).unwrap(), "2.5");
        assert_eq!(
            serde_json::to_string(&Primitive::Number(42.0)).unwrap(),
            "42"
        );
        assert_eq!(
            serde_json::to_string(&EnumValue::Number(1.0)).unwrap(),
            "1"
        );
        assert_eq!(serde_json::to_string(&Primitive::Undefined).unwrap(), "null");
    }

    #[test]
    fn test_default_value_identity() {
        let a = DefaultValue::constant(json!(1));
        let b = DefaultValue::constant(json!(1));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.resolve(), json!(1));
    }
}
