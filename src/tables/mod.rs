//! The seven-table output document and its JSON rendering

use serde::Serialize;
use serde_json::Value;

use crate::error::ExtractError;
use crate::loader::DataModule;

/// The document emitted on stdout: logical output filename to table value.
///
/// Field order is the emission order. Optional tables serialize as `null`
/// when the plugin does not define them.
#[derive(Debug, Clone, Serialize)]
pub struct TableDocument {
    #[serde(rename = "game.json")]
    pub game: Value,

    #[serde(rename = "items.json")]
    pub items: Value,

    #[serde(rename = "locations.json")]
    pub locations: Value,

    #[serde(rename = "regions.json")]
    pub regions: Value,

    #[serde(rename = "categories.json")]
    pub categories: Option<Value>,

    #[serde(rename = "options.json")]
    pub options: Option<Value>,

    #[serde(rename = "meta.json")]
    pub meta: Option<Value>,
}

impl TableDocument {
    /// Read the table contract off an executed data module.
    pub fn from_module(module: &DataModule) -> Result<Self, ExtractError> {
        Ok(Self {
            game: required(module, "game_table")?,
            items: required(module, "item_table")?,
            locations: required(module, "location_table")?,
            regions: required(module, "region_table")?,
            categories: module.table("category_table")?,
            options: module.table("option_table")?,
            meta: module.table("meta_table")?,
        })
    }
}

fn required(module: &DataModule, name: &'static str) -> Result<Value, ExtractError> {
    module
        .table(name)?
        .ok_or(ExtractError::MissingTable { table: name })
}

/// Render the document as JSON text.
///
/// `indent` selects pretty printing at that width; `None` emits the compact
/// single-line form.
pub fn render(document: &TableDocument, indent: Option<usize>) -> Result<String, ExtractError> {
    match indent {
        None => Ok(serde_json::to_string(document)?),
        Some(width) => {
            let indent = " ".repeat(width);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            document.serialize(&mut serializer)?;
            Ok(String::from_utf8(out).expect("serde_json emits UTF-8"))
        }
    }
}
