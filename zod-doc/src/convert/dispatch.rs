//! Variant dispatch.
//!
//! Converts a single node into a [`Model`]. Modifier wrappers are peeled
//! first; every other variant maps onto its model kind, with nested nodes
//! going through reference resolution.

use super::{constraints, Scope};
use crate::error::{ConvertError, ConvertResult};
use crate::model::{Field, Model, ModelKind, ModelOrRef};
use crate::schema::{SchemaKind, SchemaRef, ShapeEntry};

impl Scope<'_> {
    /// Convert `node` into a model without reference resolution at the top.
    pub(crate) fn convert(&self, node: &SchemaRef) -> ConvertResult<Model> {
        let kind = match &node.kind {
            // =================================================================
            // Modifier wrappers
            // =================================================================
            SchemaKind::Optional { inner } | SchemaKind::Nullable { inner } => {
                return self.convert(inner);
            }
            SchemaKind::Default { inner, default } => {
                let mut model = self.convert(inner)?;
                model.meta.default = Some(default.resolve());
                return Ok(model);
            }
            SchemaKind::Readonly { inner } => {
                let mut model = self.convert(inner)?;
                model.meta.readonly = true;
                return Ok(model);
            }
            SchemaKind::Effects { schema, .. } => return self.convert(schema),
            SchemaKind::Branded { inner } => return self.convert(inner),
            SchemaKind::Pipeline { output, .. } => return self.convert(output),

            // =================================================================
            // Composites
            // =================================================================
            SchemaKind::Array {
                element,
                min_length,
                max_length,
                exact_length,
            } => ModelKind::Array {
                items: self.resolve_ref(element, false)?,
                validations: constraints::array_validations(
                    *min_length,
                    *max_length,
                    *exact_length,
                ),
            },
            SchemaKind::Object { shape } => ModelKind::Object {
                fields: self.convert_fields(shape)?,
            },
            SchemaKind::Union { options } | SchemaKind::DiscriminatedUnion { options, .. } => {
                ModelKind::Union {
                    options: self.resolve_all(options)?,
                }
            }
            SchemaKind::Intersection { left, right } => ModelKind::Intersection {
                parts: [self.resolve_ref(left, false)?, self.resolve_ref(right, false)?],
            },
            SchemaKind::Record { key, value } => ModelKind::Record {
                keys: self.resolve_ref(key, false)?,
                values: self.resolve_ref(value, false)?,
            },
            SchemaKind::Tuple { items, rest } => ModelKind::Tuple {
                items: self.resolve_all(items)?,
                rest: rest
                    .as_ref()
                    .map(|rest| self.resolve_ref(rest, false))
                    .transpose()?,
            },
            SchemaKind::Function { args, returns } => ModelKind::Function {
                parameters: self.resolve_all(args)?,
                return_value: self.resolve_ref(returns, false)?,
            },
            SchemaKind::Promise { inner } => ModelKind::Promise {
                resolved_value: self.resolve_ref(inner, false)?,
            },
            SchemaKind::Enum { values } => ModelKind::Enum {
                values: values.clone(),
            },
            SchemaKind::NativeEnum { entries } => ModelKind::NativeEnum {
                entries: entries.clone(),
            },
            SchemaKind::Literal { value } => ModelKind::Literal {
                value: value.clone(),
            },

            // =================================================================
            // Leaves
            // =================================================================
            SchemaKind::String { checks } => ModelKind::String {
                validations: constraints::string_validations(checks),
            },
            SchemaKind::Number { checks } => ModelKind::Number {
                validations: constraints::number_validations(checks),
            },
            SchemaKind::BigInt { checks } => ModelKind::BigInt {
                validations: constraints::bigint_validations(checks),
            },
            SchemaKind::Boolean => ModelKind::Boolean,
            SchemaKind::Date => ModelKind::Date,
            SchemaKind::Symbol => ModelKind::Symbol,
            SchemaKind::Undefined => ModelKind::Undefined,
            SchemaKind::Null => ModelKind::Null,
            SchemaKind::Any => ModelKind::Any,
            SchemaKind::Unknown => ModelKind::Unknown,
            SchemaKind::Void => ModelKind::Void,
            SchemaKind::Never => ModelKind::Never,

            SchemaKind::Unrecognized { type_name } => {
                return Err(ConvertError::unsupported(
                    type_name.as_deref(),
                    self.export_path,
                ));
            }
        };

        Ok(Model::new(kind))
    }

    fn resolve_all(&self, nodes: &[SchemaRef]) -> ConvertResult<Vec<ModelOrRef>> {
        nodes
            .iter()
            .map(|node| self.resolve_ref(node, false))
            .collect()
    }

    /// Object fields in declaration order. Entries that are not schemas are
    /// skipped.
    fn convert_fields(&self, shape: &[(String, ShapeEntry)]) -> ConvertResult<Vec<Field>> {
        shape
            .iter()
            .filter_map(|(key, entry)| entry.as_schema().map(|schema| (key, schema)))
            .map(|(key, schema)| {
                Ok(Field {
                    key: key.clone(),
                    required: !schema.is_optional(),
                    target: self.resolve_ref(schema, true)?,
                })
            })
            .collect()
    }
}
