//! Schema document loader.
//!
//! A schema document is a JSON description of a module's exported schemas:
//!
//! ```json
//! {
//!   "definitions": {
//!     "User": {
//!       "typeName": "ZodObject",
//!       "shape": { "id": { "typeName": "ZodString", "checks": [{ "kind": "uuid" }] } }
//!     }
//!   },
//!   "exports": [{ "name": "User", "path": "models.ts", "schema": { "$ref": "User" } }]
//! }
//! ```
//!
//! Nodes use Zod's definition field names. Every `{"$ref": name}` to a
//! definition resolves to the same shared node, so exports that are reused
//! elsewhere in the document are recognized as the same schema.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::convert::ExportedSchema;
use crate::error::{LoadError, LoadResult};
use crate::schema::checks::CheckKinds;
use crate::schema::{
    DefaultValue, Effect, EnumValue, LengthBound, Primitive, Schema, SchemaKind, SchemaRef,
    ShapeEntry,
};

type JsonObject = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    definitions: IndexMap<String, Value>,
    exports: Vec<RawExport>,
}

#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(default)]
    name: Option<String>,
    path: String,
    schema: Value,
}

/// A loaded schema document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    definitions: IndexMap<String, SchemaRef>,
    exports: Vec<ExportedSchema>,
}

impl SchemaDocument {
    /// Build a document from parsed JSON.
    pub fn from_value(value: Value) -> LoadResult<Self> {
        let raw: RawDocument = serde_json::from_value(value)?;
        let mut loader = Loader::new(&raw.definitions);

        let exports = raw
            .exports
            .iter()
            .enumerate()
            .map(|(index, export)| {
                let schema = loader.node(&export.schema, &format!("exports[{index}].schema"))?;
                Ok(ExportedSchema {
                    name: export.name.clone(),
                    path: export.path.clone(),
                    schema,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let mut definitions = IndexMap::with_capacity(raw.definitions.len());
        for name in raw.definitions.keys() {
            definitions.insert(name.clone(), loader.definition(name)?);
        }

        debug!(
            definitions = definitions.len(),
            exports = exports.len(),
            "Loaded schema document"
        );

        Ok(Self {
            definitions,
            exports,
        })
    }

    /// Exports in document order.
    pub fn exports(&self) -> &[ExportedSchema] {
        &self.exports
    }

    /// Look up a named definition.
    pub fn definition(&self, name: &str) -> Option<&SchemaRef> {
        self.definitions.get(name)
    }

    /// Definition names in document order.
    pub fn definition_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

/// Parse a schema document from JSON text.
pub fn load_document(source: &str) -> LoadResult<SchemaDocument> {
    let value: Value = serde_json::from_str(source)?;
    SchemaDocument::from_value(value)
}

/// Resolves nodes and memoizes definitions.
struct Loader<'d> {
    raw: &'d IndexMap<String, Value>,
    resolved: HashMap<String, SchemaRef>,
    /// Definitions currently being resolved, outermost first.
    stack: Vec<String>,
}

impl<'d> Loader<'d> {
    fn new(raw: &'d IndexMap<String, Value>) -> Self {
        Self {
            raw,
            resolved: HashMap::new(),
            stack: Vec::new(),
        }
    }

    fn definition(&mut self, name: &str) -> LoadResult<SchemaRef> {
        if let Some(schema) = self.resolved.get(name) {
            return Ok(schema.clone());
        }

        if let Some(start) = self.stack.iter().position(|entry| entry == name) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(name.to_string());
            return Err(LoadError::CircularReference { cycle });
        }

        let definitions = self.raw;
        let raw = definitions.get(name).ok_or_else(|| LoadError::UnknownReference {
            name: name.to_string(),
        })?;

        self.stack.push(name.to_string());
        let schema = self.node(raw, &format!("definitions.{name}"))?;
        self.stack.pop();

        self.resolved.insert(name.to_string(), schema.clone());
        Ok(schema)
    }

    fn node(&mut self, value: &Value, path: &str) -> LoadResult<SchemaRef> {
        let object = value
            .as_object()
            .ok_or_else(|| LoadError::invalid_node(path, "expected a schema object"))?;
        let description = description(object, path)?;

        if let Some(reference) = object.get("$ref") {
            let name = reference
                .as_str()
                .ok_or_else(|| LoadError::invalid_node(path, "`$ref` must be a string"))?;
            let target = self.definition(name)?;
            // A described reference is a described copy of the definition.
            return Ok(match description {
                Some(description) => SchemaRef::new(target.described(description)),
                None => target,
            });
        }

        let mut schema = Schema::new(self.kind(object, path)?);
        schema.description = description;
        Ok(SchemaRef::new(schema))
    }

    fn kind(&mut self, object: &JsonObject, path: &str) -> LoadResult<SchemaKind> {
        let type_name = object.get("typeName").and_then(Value::as_str);

        let kind = match type_name {
            Some("ZodString") => SchemaKind::String {
                checks: checks(object, path)?,
            },
            Some("ZodNumber") => SchemaKind::Number {
                checks: checks(object, path)?,
            },
            Some("ZodBigInt") => SchemaKind::BigInt {
                checks: checks(object, path)?,
            },
            Some("ZodBoolean") => SchemaKind::Boolean,
            Some("ZodDate") => SchemaKind::Date,
            Some("ZodSymbol") => SchemaKind::Symbol,
            Some("ZodUndefined") => SchemaKind::Undefined,
            Some("ZodNull") => SchemaKind::Null,
            Some("ZodAny") => SchemaKind::Any,
            Some("ZodUnknown") => SchemaKind::Unknown,
            Some("ZodVoid") => SchemaKind::Void,
            Some("ZodNever") => SchemaKind::Never,

            Some("ZodArray") => SchemaKind::Array {
                element: self.child(object, "type", path)?,
                min_length: field::<LengthBound>(object, "minLength", path)?,
                max_length: field::<LengthBound>(object, "maxLength", path)?,
                exact_length: field::<LengthBound>(object, "exactLength", path)?,
            },
            Some("ZodObject") => SchemaKind::Object {
                shape: self.shape(object, path)?,
            },
            Some("ZodUnion") => SchemaKind::Union {
                options: self.children(object, "options", path)?,
            },
            Some("ZodDiscriminatedUnion") => SchemaKind::DiscriminatedUnion {
                discriminator: required_field(object, "discriminator", path)?,
                options: self.children(object, "options", path)?,
            },
            Some("ZodIntersection") => SchemaKind::Intersection {
                left: self.child(object, "left", path)?,
                right: self.child(object, "right", path)?,
            },
            Some("ZodRecord") => SchemaKind::Record {
                key: self.child(object, "keyType", path)?,
                value: self.child(object, "valueType", path)?,
            },
            Some("ZodTuple") => SchemaKind::Tuple {
                items: self.children(object, "items", path)?,
                rest: self.optional_child(object, "rest", path)?,
            },
            Some("ZodFunction") => SchemaKind::Function {
                args: self.children(object, "args", path)?,
                returns: self.child(object, "returns", path)?,
            },
            Some("ZodPromise") => SchemaKind::Promise {
                inner: self.child(object, "type", path)?,
            },
            Some("ZodEnum") => SchemaKind::Enum {
                values: required_field(object, "values", path)?,
            },
            Some("ZodNativeEnum") => SchemaKind::NativeEnum {
                entries: required_field::<IndexMap<String, EnumValue>>(object, "values", path)?,
            },
            Some("ZodLiteral") => SchemaKind::Literal {
                value: literal(object.get("value"), path)?,
            },

            Some("ZodOptional") => SchemaKind::Optional {
                inner: self.child(object, "innerType", path)?,
            },
            Some("ZodNullable") => SchemaKind::Nullable {
                inner: self.child(object, "innerType", path)?,
            },
            Some("ZodDefault") => {
                let value = object.get("defaultValue").cloned().unwrap_or(Value::Null);
                SchemaKind::Default {
                    inner: self.child(object, "innerType", path)?,
                    default: DefaultValue::constant(value),
                }
            }
            Some("ZodReadonly") => SchemaKind::Readonly {
                inner: self.child(object, "innerType", path)?,
            },
            Some("ZodEffects") => SchemaKind::Effects {
                schema: self.child(object, "schema", path)?,
                effect: effect(object.get("effect"), path)?,
            },
            Some("ZodBranded") => SchemaKind::Branded {
                inner: self.child(object, "type", path)?,
            },
            Some("ZodPipeline") => SchemaKind::Pipeline {
                input: self.child(object, "in", path)?,
                output: self.child(object, "out", path)?,
            },

            other => SchemaKind::Unrecognized {
                type_name: other.map(str::to_string),
            },
        };

        Ok(kind)
    }

    fn child(&mut self, object: &JsonObject, key: &str, path: &str) -> LoadResult<SchemaRef> {
        let value = object
            .get(key)
            .ok_or_else(|| LoadError::invalid_node(path, format!("missing `{key}`")))?;
        self.node(value, &format!("{path}.{key}"))
    }

    fn optional_child(
        &mut self,
        object: &JsonObject,
        key: &str,
        path: &str,
    ) -> LoadResult<Option<SchemaRef>> {
        match object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.node(value, &format!("{path}.{key}")).map(Some),
        }
    }

    fn children(&mut self, object: &JsonObject, key: &str, path: &str) -> LoadResult<Vec<SchemaRef>> {
        let values = object
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| LoadError::invalid_node(path, format!("`{key}` must be an array")))?;
        values
            .iter()
            .enumerate()
            .map(|(index, value)| self.node(value, &format!("{path}.{key}[{index}]")))
            .collect()
    }

    /// Object shape in document order. Entries that are not schema nodes are
    /// kept as plain values.
    fn shape(&mut self, object: &JsonObject, path: &str) -> LoadResult<Vec<(String, ShapeEntry)>> {
        let shape = object
            .get("shape")
            .and_then(Value::as_object)
            .ok_or_else(|| LoadError::invalid_node(path, "`shape` must be an object"))?;

        shape
            .iter()
            .map(|(key, value)| {
                let entry = if is_schema_node(value) {
                    ShapeEntry::Schema(self.node(value, &format!("{path}.shape.{key}"))?)
                } else {
                    ShapeEntry::Value(value.clone())
                };
                Ok((key.clone(), entry))
            })
            .collect()
    }
}

fn is_schema_node(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("typeName") || object.contains_key("$ref"))
}

fn description(object: &JsonObject, path: &str) -> LoadResult<Option<String>> {
    match object.get("description") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(LoadError::invalid_node(path, "`description` must be a string")),
    }
}

/// Declared checks in order. Entries whose `kind` is not known for the leaf
/// type are skipped.
fn checks<T: DeserializeOwned + CheckKinds>(object: &JsonObject, path: &str) -> LoadResult<Vec<T>> {
    let entries = match object.get("checks") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(LoadError::invalid_node(path, "`checks` must be an array")),
    };

    let mut checks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let kind = entry.get("kind").and_then(Value::as_str);
        if !kind.is_some_and(|kind| T::KINDS.contains(&kind)) {
            debug!(path, kind = ?kind, "Skipping unknown check");
            continue;
        }
        let check = serde_json::from_value(entry.clone()).map_err(|err| {
            LoadError::invalid_node(format!("{path}.checks[{index}]"), err.to_string())
        })?;
        checks.push(check);
    }
    Ok(checks)
}

/// Deserialize an optional field. `null` counts as absent.
fn field<T: DeserializeOwned>(object: &JsonObject, key: &str, path: &str) -> LoadResult<Option<T>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|err| LoadError::invalid_node(format!("{path}.{key}"), err.to_string())),
    }
}

fn required_field<T: DeserializeOwned>(object: &JsonObject, key: &str, path: &str) -> LoadResult<T> {
    field(object, key, path)?
        .ok_or_else(|| LoadError::invalid_node(path, format!("missing `{key}`")))
}

/// A literal value. A missing `value` is the `undefined` literal; bigints are
/// written as `{"bigint": "<digits>"}`.
fn literal(value: Option<&Value>, path: &str) -> LoadResult<Primitive> {
    let invalid = |message: &str| LoadError::invalid_node(format!("{path}.value"), message);

    match value {
        None => Ok(Primitive::Undefined),
        Some(Value::Null) => Ok(Primitive::Null),
        Some(Value::Bool(value)) => Ok(Primitive::Boolean(*value)),
        Some(Value::String(value)) => Ok(Primitive::String(value.clone())),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Primitive::Number)
            .ok_or_else(|| invalid("number out of range")),
        Some(Value::Object(object)) => object
            .get("bigint")
            .and_then(Value::as_str)
            .and_then(|digits| digits.parse().ok())
            .map(Primitive::BigInt)
            .ok_or_else(|| invalid("expected a primitive or {\"bigint\": \"<digits>\"}")),
        Some(Value::Array(_)) => Err(invalid("expected a primitive")),
    }
}

/// The effect kind, as a bare string or Zod's `{"type": ...}` object.
/// Defaults to a refinement when absent.
fn effect(value: Option<&Value>, path: &str) -> LoadResult<Effect> {
    let kind = match value {
        None | Some(Value::Null) => return Ok(Effect::Refinement),
        Some(Value::Object(object)) => object.get("type").cloned().unwrap_or(Value::Null),
        Some(other) => other.clone(),
    };
    serde_json::from_value(kind)
        .map_err(|err| LoadError::invalid_node(format!("{path}.effect"), err.to_string()))
}
