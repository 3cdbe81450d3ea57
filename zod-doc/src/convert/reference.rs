//! Reference resolution against the export pool.

use tracing::trace;

use super::{ExportedSchema, Scope};
use crate::convert::meta;
use crate::error::ConvertResult;
use crate::model::{ModelOrRef, Ref};
use crate::schema::{Schema, SchemaRef};

/// Check whether `node` denotes the export `named`.
///
/// This holds when `node` is `named`, when its one-level unwrapped inner node
/// is `named`, or when either of those is a described alias of `named`: a
/// node sharing `named`'s definition instance but carrying a different
/// description. Independently built nodes never share a definition, however
/// equal they look, so this never walks the graph.
pub fn is_same_schema(node: &SchemaRef, named: &SchemaRef) -> bool {
    let unwrapped = node.inner_type();

    node.ptr_eq(named)
        || unwrapped.is_some_and(|inner| inner.ptr_eq(named))
        || is_described_alias(node, named)
        || unwrapped.is_some_and(|inner| is_described_alias(inner, named))
}

fn is_described_alias(node: &Schema, named: &Schema) -> bool {
    node.shares_definition(named) && node.description != named.description
}

/// The first export, in input order, that `node` denotes.
pub fn find_export<'e>(node: &SchemaRef, exports: &'e [ExportedSchema]) -> Option<&'e ExportedSchema> {
    exports
        .iter()
        .find(|export| is_same_schema(node, &export.schema))
}

impl Scope<'_> {
    /// Emit a reference if `node` denotes a named export, otherwise convert it
    /// in place. The meta of `node` is attached to either result.
    pub(crate) fn resolve_ref(
        &self,
        node: &SchemaRef,
        implicit_optional: bool,
    ) -> ConvertResult<ModelOrRef> {
        let meta = meta::extract(node, implicit_optional);

        if let Some(export) = find_export(node, self.exports) {
            trace!(
                export = self.export_path,
                target = %export.path,
                name = ?export.name,
                "Resolved nested schema to reference"
            );
            return Ok(ModelOrRef::reference(Ref {
                name: export.name.clone(),
                path: export.path.clone(),
                meta,
            }));
        }

        let model = self.convert(node)?.with_meta(meta);
        Ok(ModelOrRef::model(model))
    }
}
