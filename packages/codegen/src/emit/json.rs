//! JSON emitter: dumps the catalog model for inspection or for tooling in
//! other languages.

use crate::CodegenError;
use crate::emit::Emitter;
use crate::model::CatalogModel;

/// Renders the model as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit(&self, model: &CatalogModel) -> Result<String, CodegenError> {
        let mut out = serde_json::to_string_pretty(model)?;
        out.push('\n');
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use response_codes_catalog_models::ResponseCode;

    use super::*;
    use crate::model::ModelOptions;

    #[test]
    fn dumps_entries_in_order() {
        let records = vec![
            ResponseCode::new("NoError").with_description("No error."),
            ResponseCode::new("ErrorAccessDenied").with_description("Denied."),
        ];
        let model = CatalogModel::build(&records, ModelOptions::default()).unwrap();
        let out = JsonEmitter.emit(&model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["entries"][0]["identifier"], "no_error");
        assert_eq!(value["entries"][1]["key"], "ErrorAccessDenied");
        assert_eq!(value["entries"][1]["comment"], "Denied.");
    }
}
