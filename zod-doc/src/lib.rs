//! # zod-doc
//!
//! Converts exported [Zod](https://zod.dev/) schema definitions into a
//! normalized documentation model.
//!
//! ## Overview
//!
//! The input is a list of exported schemas, each a `(name, path, node)`
//! triple over a shared graph of schema nodes. The output is one
//! [`NamedModel`] per export: the export's shape with modifier wrappers
//! peeled off, validations normalized, and nested uses of other exports
//! replaced by references. The model serializes to JSON for a formatter to
//! render.
//!
//! Schemas are built in Rust with the [`z`](schema::z) constructors or loaded
//! from a JSON schema document with [`load_document`].
//!
//! ## Quick Start
//!
//! ```rust
//! use zod_doc::schema::z::{self, SchemaExt};
//! use zod_doc::{convert_schemas, ExportedSchema};
//!
//! let user = z::object()
//!     .field("id", z::string().uuid())
//!     .field("age", z::number().min(0.0).optional())
//!     .field("tags", z::array(z::string()).max(5));
//!
//! let exports = vec![ExportedSchema::new("User", "models.ts", user)];
//! let models = convert_schemas(&exports).unwrap();
//!
//! let json = serde_json::to_value(&models[0]).unwrap();
//! assert_eq!(json["type"], "object");
//! assert_eq!(json["fields"][1]["required"], false);
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`schema`] | Schema nodes, checks and the `z` builder |
//! | [`model`] | Documentation IR and validation tuples |
//! | [`convert`] | Conversion engine |
//! | [`loader`] | JSON schema document loader |
//! | [`error`] | Error types |

pub mod convert;
pub mod error;
pub mod loader;
pub mod model;
pub mod schema;

pub use convert::{convert_schemas, ExportedSchema, SchemaConverter};
pub use error::{ConvertError, ConvertResult, LoadError, LoadResult};
pub use loader::{load_document, SchemaDocument};
pub use model::{Field, Model, ModelKind, ModelMeta, ModelOrRef, NamedModel, Ref};
pub use schema::{Schema, SchemaKind, SchemaRef};
