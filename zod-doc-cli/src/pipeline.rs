//! Load, convert and render steps shared by the `convert` and `check`
//! commands.

use crate::error::{CliError, CliResult};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};
use zod_doc::{convert_schemas, load_document, NamedModel};

/// Read a schema document from disk and convert every export.
pub fn convert_file(document: &Path) -> CliResult<Vec<NamedModel>> {
    let source = std::fs::read_to_string(document).map_err(|e| CliError::Input {
        path: document.to_path_buf(),
        source: e,
    })?;
    convert_source(&source)
}

/// Convert a schema document held in memory.
pub fn convert_source(source: &str) -> CliResult<Vec<NamedModel>> {
    let document = load_document(source)?;
    let models = convert_schemas(document.exports())?;
    info!(models = models.len(), "Converted schema document");
    Ok(models)
}

/// Render models as a JSON array with a trailing newline.
pub fn render(models: &[NamedModel], pretty: bool) -> CliResult<String> {
    let mut content = if pretty {
        serde_json::to_string_pretty(models)?
    } else {
        serde_json::to_string(models)?
    };
    content.push('\n');
    Ok(content)
}

/// Compare freshly converted models against an existing model file.
///
/// The comparison is structural, so formatting differences between pretty
/// and compact output do not count as changes.
pub fn is_up_to_date(existing: &str, models: &[NamedModel]) -> CliResult<bool> {
    let existing: Value = serde_json::from_str(existing)?;
    // Text round-trip: bigints wider than i64 have no direct `Value` form.
    let current: Value = serde_json::from_str(&serde_json::to_string(models)?)?;
    let up_to_date = existing == current;
    debug!(up_to_date, "Compared model file");
    Ok(up_to_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
      "exports": [
        { "name": "Flag", "path": "flag.ts", "schema": { "typeName": "ZodBoolean" } },
        {
          "name": "Tags",
          "path": "tags.ts",
          "schema": { "typeName": "ZodArray", "type": { "typeName": "ZodString" } }
        }
      ]
    }"#;

    #[test]
    fn test_render_compact() {
        let models = convert_source(DOCUMENT).unwrap();
        assert_eq!(
            render(&models, false).unwrap(),
            concat!(
                r#"[{"name":"Flag","path":"flag.ts","type":"boolean"},"#,
                r#"{"name":"Tags","path":"tags.ts","type":"array","items":{"kind":"model","model":{"type":"string"}}}]"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_up_to_date_ignores_formatting() {
        let models = convert_source(DOCUMENT).unwrap();
        let pretty = render(&models, true).unwrap();
        let compact = render(&models, false).unwrap();

        assert!(is_up_to_date(&pretty, &models).unwrap());
        assert!(is_up_to_date(&compact, &models).unwrap());
        assert!(!is_up_to_date("[]", &models).unwrap());
    }

    #[test]
    fn test_invalid_model_file_is_an_error() {
        let models = convert_source(DOCUMENT).unwrap();
        let err = is_up_to_date("not json", &models).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_unsupported_kind_surfaces_as_convert_error() {
        let err = convert_source(
            r#"{ "exports": [{ "path": "lazy.ts", "schema": { "typeName": "ZodLazy" } }] }"#,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
