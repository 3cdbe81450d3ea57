//! Conversion engine.
//!
//! Walks the schema graph of each export and produces its documentation
//! model. Nested nodes that denote one of the exports become references, so
//! every export is documented once and mutually referencing exports
//! terminate.
//!
//! # Example
//!
//! ```rust
//! use zod_doc::convert::{ExportedSchema, SchemaConverter};
//! use zod_doc::schema::z::{self, SchemaExt};
//! use zod_doc::schema::SchemaRef;
//!
//! let address: SchemaRef = z::object().field("city", z::string()).into();
//! let user: SchemaRef = z::object()
//!     .field("home", address.clone().optional())
//!     .into();
//!
//! let exports = vec![
//!     ExportedSchema::new("Address", "models.ts", address),
//!     ExportedSchema::new("User", "models.ts", user),
//! ];
//! let models = SchemaConverter::new(&exports).convert_all().unwrap();
//! assert_eq!(models.len(), 2);
//! ```

pub mod constraints;
mod dispatch;
pub mod meta;
pub mod reference;

use tracing::debug;

use crate::error::ConvertResult;
use crate::model::{Model, ModelOrRef, NamedModel};
use crate::schema::SchemaRef;

pub use reference::{find_export, is_same_schema};

/// A schema exported from a module: optional identifier, module path and
/// root node.
#[derive(Debug, Clone)]
pub struct ExportedSchema {
    /// Export identifier; `None` for default or anonymous exports.
    pub name: Option<String>,

    /// Module path the schema is exported from.
    pub path: String,

    /// Root node.
    pub schema: SchemaRef,
}

impl ExportedSchema {
    /// Create a named export.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        schema: impl Into<SchemaRef>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            schema: schema.into(),
        }
    }

    /// Create an export without an identifier.
    pub fn anonymous(path: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        Self {
            name: None,
            path: path.into(),
            schema: schema.into(),
        }
    }
}

/// Converter over a fixed pool of exports.
#[derive(Debug, Clone, Copy)]
pub struct SchemaConverter<'a> {
    exports: &'a [ExportedSchema],
}

impl<'a> SchemaConverter<'a> {
    /// Create a converter whose references resolve against `exports`.
    pub fn new(exports: &'a [ExportedSchema]) -> Self {
        Self { exports }
    }

    /// Convert every export, in input order.
    ///
    /// The first failure aborts the pass and no models are returned.
    pub fn convert_all(&self) -> ConvertResult<Vec<NamedModel>> {
        debug!(exports = self.exports.len(), "Converting schemas");
        self.exports
            .iter()
            .map(|export| self.convert_export(export))
            .collect()
    }

    /// Convert one export. Its root node is always converted in full, never
    /// replaced by a reference to itself.
    pub fn convert_export(&self, export: &ExportedSchema) -> ConvertResult<NamedModel> {
        debug!(path = %export.path, name = ?export.name, "Converting export");

        let scope = self.scope(&export.path);
        let meta = meta::extract(&export.schema, false);
        let model = scope.convert(&export.schema)?.with_meta(meta);

        Ok(NamedModel {
            name: export.name.clone(),
            path: export.path.clone(),
            model,
        })
    }

    /// Convert `node` as if reached while converting the export at
    /// `export_path`.
    pub fn convert(&self, node: &SchemaRef, export_path: &str) -> ConvertResult<Model> {
        self.scope(export_path).convert(node)
    }

    /// Resolve `node` to a reference or an inlined model. Set
    /// `implicit_optional` for positions that encode optionality themselves.
    pub fn resolve_ref(
        &self,
        node: &SchemaRef,
        export_path: &str,
        implicit_optional: bool,
    ) -> ConvertResult<ModelOrRef> {
        self.scope(export_path).resolve_ref(node, implicit_optional)
    }

    fn scope<'s>(&'s self, export_path: &'s str) -> Scope<'s> {
        Scope {
            exports: self.exports,
            export_path,
        }
    }
}

/// Convert every export in `exports` into a named model.
pub fn convert_schemas(exports: &[ExportedSchema]) -> ConvertResult<Vec<NamedModel>> {
    SchemaConverter::new(exports).convert_all()
}

/// Conversion state for one export: the pool plus the path reported in
/// errors.
pub(crate) struct Scope<'a> {
    pub(crate) exports: &'a [ExportedSchema],
    pub(crate) export_path: &'a str,
}
