//! Documentation IR definitions.
//!
//! This module defines the output side of the conversion. A [`Model`] is the
//! normalized shape of one schema node; nested positions hold a
//! [`ModelOrRef`], which either inlines a model or points at a named export
//! through a [`Ref`]. The serialized form is flat JSON with a `type` tag,
//! ready to be handed to a formatter.

pub mod validation;

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::{EnumValue, Primitive};

pub use validation::{
    ArrayValidation, BigIntValidation, DatetimeOptions, IpOptions, NumberValidation,
    StringValidation,
};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Converted shape of a single schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Variant-specific structure, serialized with a `type` tag.
    #[serde(flatten)]
    pub kind: ModelKind,

    /// Description and modifier flags.
    #[serde(flatten)]
    pub meta: ModelMeta,
}

impl Model {
    /// Create a model with empty meta.
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            meta: ModelMeta::default(),
        }
    }

    /// Merge `meta` over this model's meta.
    pub fn with_meta(mut self, meta: ModelMeta) -> Self {
        self.meta.merge(meta);
        self
    }

    /// The `type` tag of this model.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

/// Model variant enumeration.
///
/// Nested positions hold [`ModelOrRef`]s. Validation lists are omitted from
/// the serialized form when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ModelKind {
    // ==========================================================================
    // Composites
    // ==========================================================================
    Array {
        items: ModelOrRef,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        validations: Vec<ArrayValidation>,
    },

    /// Fields in declaration order.
    Object {
        fields: Vec<Field>,
    },

    Union {
        options: Vec<ModelOrRef>,
    },

    /// Left and right sides, in that order.
    Intersection {
        parts: [ModelOrRef; 2],
    },

    Record {
        keys: ModelOrRef,
        values: ModelOrRef,
    },

    Tuple {
        items: Vec<ModelOrRef>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rest: Option<ModelOrRef>,
    },

    Function {
        parameters: Vec<ModelOrRef>,
        return_value: ModelOrRef,
    },

    Promise {
        resolved_value: ModelOrRef,
    },

    // ==========================================================================
    // Enumerations & literals
    // ==========================================================================
    Enum {
        values: Vec<String>,
    },

    NativeEnum {
        #[serde(rename = "enum")]
        entries: IndexMap<String, EnumValue>,
    },

    /// A literal `undefined` is written without a `value` key.
    Literal {
        #[serde(skip_serializing_if = "Primitive::is_undefined")]
        value: Primitive,
    },

    // ==========================================================================
    // Leaves
    // ==========================================================================
    String {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        validations: Vec<StringValidation>,
    },

    Number {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        validations: Vec<NumberValidation>,
    },

    #[serde(rename = "bigint")]
    BigInt {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        validations: Vec<BigIntValidation>,
    },

    Boolean,
    Date,
    Null,
    Undefined,
    Symbol,
    Unknown,
    Any,
    Void,
    Never,
}

impl ModelKind {
    /// The serialized `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            ModelKind::Array { .. } => "array",
            ModelKind::Object { .. } => "object",
            ModelKind::Union { .. } => "union",
            ModelKind::Intersection { .. } => "intersection",
            ModelKind::Record { .. } => "record",
            ModelKind::Tuple { .. } => "tuple",
            ModelKind::Function { .. } => "function",
            ModelKind::Promise { .. } => "promise",
            ModelKind::Enum { .. } => "enum",
            ModelKind::NativeEnum { .. } => "native-enum",
            ModelKind::Literal { .. } => "literal",
            ModelKind::String { .. } => "string",
            ModelKind::Number { .. } => "number",
            ModelKind::BigInt { .. } => "bigint",
            ModelKind::Boolean => "boolean",
            ModelKind::Date => "date",
            ModelKind::Null => "null",
            ModelKind::Undefined => "undefined",
            ModelKind::Symbol => "symbol",
            ModelKind::Unknown => "unknown",
            ModelKind::Any => "any",
            ModelKind::Void => "void",
            ModelKind::Never => "never",
        }
    }
}

// =============================================================================
// Meta
// =============================================================================

/// Description and modifier flags shared by models and refs.
///
/// Flags are only serialized when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value produced by a `.default(...)` resolver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
}

impl ModelMeta {
    /// Overlay `other` onto `self`. Only fields present in `other` overwrite;
    /// absent ones keep their current value.
    pub fn merge(&mut self, other: ModelMeta) {
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.default.is_some() {
            self.default = other.default;
        }
        self.optional |= other.optional;
        self.nullable |= other.nullable;
        self.readonly |= other.readonly;
    }

    /// Check if no field is present.
    pub fn is_empty(&self) -> bool {
        *self == ModelMeta::default()
    }
}

// =============================================================================
// References
// =============================================================================

/// Pointer to a named export, with the meta of the referencing position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ref {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub path: String,

    #[serde(flatten)]
    pub meta: ModelMeta,
}

/// Either an inlined model or a reference to a named export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelOrRef {
    Model {
        model: Box<Model>,
    },
    Ref {
        #[serde(rename = "ref")]
        reference: Ref,
    },
}

impl ModelOrRef {
    /// Wrap an inlined model.
    pub fn model(model: Model) -> Self {
        ModelOrRef::Model {
            model: Box::new(model),
        }
    }

    /// Wrap a reference.
    pub fn reference(reference: Ref) -> Self {
        ModelOrRef::Ref { reference }
    }

    /// The inlined model, if this is not a reference.
    pub fn as_model(&self) -> Option<&Model> {
        match self {
            ModelOrRef::Model { model } => Some(model),
            ModelOrRef::Ref { .. } => None,
        }
    }

    /// The reference, if this is one.
    pub fn as_ref_target(&self) -> Option<&Ref> {
        match self {
            ModelOrRef::Model { .. } => None,
            ModelOrRef::Ref { reference } => Some(reference),
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, ModelOrRef::Ref { .. })
    }

    /// Meta of the inlined model or of the reference.
    pub fn meta(&self) -> &ModelMeta {
        match self {
            ModelOrRef::Model { model } => &model.meta,
            ModelOrRef::Ref { reference } => &reference.meta,
        }
    }
}

/// Object field: key, requiredness and the field's model or ref.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: String,
    pub required: bool,
    #[serde(flatten)]
    pub target: ModelOrRef,
}

/// A converted export: identity plus its root model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub path: String,

    #[serde(flatten)]
    pub model: Model,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string_model() -> ModelOrRef {
        ModelOrRef::model(Model::new(ModelKind::String {
            validations: vec![],
        }))
    }

    #[test]
    fn test_leaf_serializes_flat() {
        let model = Model::new(ModelKind::Number {
            validations: vec![NumberValidation::Gte(0.0)],
        })
        .with_meta(ModelMeta {
            optional: true,
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "type": "number", "validations": [["gte", 0]], "optional": true })
        );
    }

    #[test]
    fn test_empty_validations_are_omitted() {
        let model = Model::new(ModelKind::String {
            validations: vec![],
        });
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "type": "string" })
        );
    }

    #[test]
    fn test_renamed_tags_and_fields() {
        let bigint = Model::new(ModelKind::BigInt {
            validations: vec![],
        });
        assert_eq!(serde_json::to_value(&bigint).unwrap(), json!({ "type": "bigint" }));

        let mut entries = IndexMap::new();
        entries.insert("Up".to_string(), EnumValue::Number(0.0));
        let native = Model::new(ModelKind::NativeEnum { entries });
        assert_eq!(
            serde_json::to_value(&native).unwrap(),
            json!({ "type": "native-enum", "enum": { "Up": 0 } })
        );

        let function = Model::new(ModelKind::Function {
            parameters: vec![],
            return_value: string_model(),
        });
        assert_eq!(
            serde_json::to_value(&function).unwrap(),
            json!({
                "type": "function",
                "parameters": [],
                "returnValue": { "kind": "model", "model": { "type": "string" } }
            })
        );
    }

    #[test]
    fn test_ref_and_field_shapes() {
        let field = Field {
            key: "owner".to_string(),
            required: true,
            target: ModelOrRef::reference(Ref {
                name: Some("User".to_string()),
                path: "models.ts".to_string(),
                meta: ModelMeta {
                    description: Some("Owner".to_string()),
                    ..Default::default()
                },
            }),
        };

        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "key": "owner",
                "required": true,
                "kind": "ref",
                "ref": { "name": "User", "path": "models.ts", "description": "Owner" }
            })
        );
    }

    #[test]
    fn test_literal_undefined_has_no_value() {
        let model = Model::new(ModelKind::Literal {
            value: Primitive::Undefined,
        });
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "type": "literal" })
        );

        let model = Model::new(ModelKind::Literal {
            value: Primitive::Null,
        });
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "type": "literal", "value": null })
        );
    }

    #[test]
    fn test_named_model_order() {
        let named = NamedModel {
            name: None,
            path: "index.ts".to_string(),
            model: Model::new(ModelKind::Boolean),
        };
        assert_eq!(
            serde_json::to_string(&named).unwrap(),
            r#"{"path":"index.ts","type":"boolean"}"#
        );
    }

    #[test]
    fn test_meta_merge_keeps_absent_fields() {
        let mut meta = ModelMeta {
            readonly: true,
            default: Some(json!("x")),
            description: Some("inner".to_string()),
            ..Default::default()
        };
        meta.merge(ModelMeta {
            description: Some("outer".to_string()),
            nullable: true,
            ..Default::default()
        });

        assert_eq!(meta.description.as_deref(), Some("outer"));
        assert_eq!(meta.default, Some(json!("x")));
        assert!(meta.readonly);
        assert!(meta.nullable);
        assert!(!meta.optional);
        assert!(ModelMeta::default().is_empty());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ModelKind::Void.type_name(), "void");
        assert_eq!(
            Model::new(ModelKind::Enum { values: vec![] }).type_name(),
            "enum"
        );
    }
}
