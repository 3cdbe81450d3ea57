//! Meta extraction.

use crate::model::ModelMeta;
use crate::schema::Schema;

/// Derive `{description, optional, nullable}` for a node.
///
/// `implicit_optional` suppresses the `optional` flag for positions that
/// already encode optionality, such as object fields with their `required`
/// key. `default` and `readonly` are never set here.
pub fn extract(node: &Schema, implicit_optional: bool) -> ModelMeta {
    ModelMeta {
        description: node.description.clone(),
        default: None,
        optional: !implicit_optional && node.is_optional(),
        nullable: node.is_nullable(),
        readonly: false,
    }
}
