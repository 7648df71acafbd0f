//! Typed views over Notion's property resource model.
//!
//! Notion encodes page properties as one-key objects (`{"select": {...}}`,
//! `{"title": [...]}`). [`PropertyValue`] is the typed equivalent for page
//! values, [`PropertySchema`] for database column definitions. Round-trip
//! holds for every supported shape: `to_json` then `from_json` reproduces
//! the value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::NotionError;

/// Page properties keyed by property name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A page property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// The page title
    Title(String),
    /// Plain rich text
    RichText(String),
    /// Single select option
    Select(String),
    /// Multi select options
    MultiSelect(Vec<String>),
    /// Date (start only)
    Date(DateTime<Utc>),
    /// Number
    Number(f64),
    /// URL
    Url(String),
    /// Checkbox
    Checkbox(bool),
}

impl PropertyValue {
    /// Encode into Notion's property JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Title(text) => json!({ "title": [text_fragment(text)] }),
            Self::RichText(text) => json!({ "rich_text": [text_fragment(text)] }),
            Self::Select(name) => json!({ "select": { "name": name } }),
            Self::MultiSelect(names) => json!({
                "multi_select": names.iter().map(|n| json!({ "name": n })).collect::<Vec<_>>()
            }),
            Self::Date(start) => json!({ "date": { "start": start.to_rfc3339() } }),
            Self::Number(n) => json!({ "number": n }),
            Self::Url(url) => json!({ "url": url }),
            Self::Checkbox(checked) => json!({ "checkbox": checked }),
        }
    }

    /// Decode from Notion's property JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::UnsupportedProperty`] for shapes this crate
    /// does not model and [`NotionError::MissingField`] for malformed ones.
    pub fn from_json(value: &Value) -> Result<Self, NotionError> {
        let object = value
            .as_object()
            .ok_or_else(|| NotionError::UnsupportedProperty(value.to_string()))?;

        if let Some(fragments) = object.get("title") {
            return Ok(Self::Title(collect_text(fragments)?));
        }
        if let Some(fragments) = object.get("rich_text") {
            return Ok(Self::RichText(collect_text(fragments)?));
        }
        if let Some(select) = object.get("select") {
            let name = select
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| NotionError::MissingField("select.name".to_string()))?;
            return Ok(Self::Select(name.to_string()));
        }
        if let Some(options) = object.get("multi_select") {
            let names = options
                .as_array()
                .ok_or_else(|| NotionError::MissingField("multi_select".to_string()))?
                .iter()
                .map(|o| {
                    o.get("name")
                        .and_then(Value::as_str)
                        .map(ToString::to_string)
                        .ok_or_else(|| NotionError::MissingField("multi_select.name".to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::MultiSelect(names));
        }
        if let Some(date) = object.get("date") {
            let start = date
                .get("start")
                .and_then(Value::as_str)
                .ok_or_else(|| NotionError::MissingField("date.start".to_string()))?;
            let parsed = DateTime::parse_from_rfc3339(start)
                .map_err(|e| NotionError::MissingField(format!("date.start: {e}")))?;
            return Ok(Self::Date(parsed.with_timezone(&Utc)));
        }
        if let Some(number) = object.get("number") {
            let n = number
                .as_f64()
                .ok_or_else(|| NotionError::MissingField("number".to_string()))?;
            return Ok(Self::Number(n));
        }
        if let Some(url) = object.get("url") {
            let u = url
                .as_str()
                .ok_or_else(|| NotionError::MissingField("url".to_string()))?;
            return Ok(Self::Url(u.to_string()));
        }
        if let Some(checkbox) = object.get("checkbox") {
            let b = checkbox
                .as_bool()
                .ok_or_else(|| NotionError::MissingField("checkbox".to_string()))?;
            return Ok(Self::Checkbox(b));
        }

        Err(NotionError::UnsupportedProperty(value.to_string()))
    }
}

/// A database column definition.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySchema {
    /// Title column (exactly one per database)
    Title,
    /// Rich text column
    RichText,
    /// Select with fixed options
    Select(Vec<String>),
    /// Multi select with fixed options
    MultiSelect(Vec<String>),
    /// Date column
    Date,
    /// Number column
    Number,
    /// URL column
    Url,
    /// Checkbox column
    Checkbox,
}

impl PropertySchema {
    /// Encode into Notion's database-creation property JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Title => json!({ "title": {} }),
            Self::RichText => json!({ "rich_text": {} }),
            Self::Select(options) => json!({ "select": { "options": option_list(options) } }),
            Self::MultiSelect(options) => {
                json!({ "multi_select": { "options": option_list(options) } })
            }
            Self::Date => json!({ "date": {} }),
            Self::Number => json!({ "number": { "format": "number" } }),
            Self::Url => json!({ "url": {} }),
            Self::Checkbox => json!({ "checkbox": {} }),
        }
    }
}

/// Encode a full property map for a page request.
#[must_use]
pub fn properties_to_json(properties: &Properties) -> Value {
    Value::Object(
        properties
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}

/// Encode a full column map for a database-creation request.
#[must_use]
pub fn schema_to_json(schema: &BTreeMap<String, PropertySchema>) -> Value {
    Value::Object(
        schema
            .iter()
            .map(|(name, column)| (name.clone(), column.to_json()))
            .collect(),
    )
}

/// Decode the property map out of a page resource.
///
/// Properties with shapes this crate does not model are skipped; the caller
/// only sees the typed subset.
///
/// # Errors
///
/// Returns [`NotionError::MissingField`] when the resource has no
/// `properties` object, or when a recognized property is malformed.
pub fn properties_from_page(page: &Value) -> Result<Properties, NotionError> {
    let raw = page
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| NotionError::MissingField("properties".to_string()))?;

    let mut properties = Properties::new();
    for (name, value) in raw {
        match PropertyValue::from_json(value) {
            Ok(parsed) => {
                properties.insert(name.clone(), parsed);
            }
            Err(NotionError::UnsupportedProperty(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(properties)
}

fn text_fragment(text: &str) -> Value {
    json!({ "type": "text", "text": { "content": text } })
}

fn collect_text(fragments: &Value) -> Result<String, NotionError> {
    let fragments = fragments
        .as_array()
        .ok_or_else(|| NotionError::MissingField("rich text array".to_string()))?;

    Ok(fragments
        .iter()
        .filter_map(|f| {
            f.get("plain_text")
                .and_then(Value::as_str)
                .or_else(|| f.pointer("/text/content").and_then(Value::as_str))
        })
        .collect::<Vec<_>>()
        .join(""))
}

fn option_list(options: &[String]) -> Vec<Value> {
    options.iter().map(|name| json!({ "name": name })).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_title_round_trip() {
        let value = PropertyValue::Title("Why hooks matter".to_string());
        let parsed = PropertyValue::from_json(&value.to_json()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_status_select_round_trip() {
        let value = PropertyValue::Select("Drafted".to_string());
        let parsed = PropertyValue::from_json(&value.to_json()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_multi_select_round_trip() {
        let value = PropertyValue::MultiSelect(vec!["LinkedIn".into(), "Twitter".into()]);
        let parsed = PropertyValue::from_json(&value.to_json()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_date_round_trip() {
        let when = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        let value = PropertyValue::Date(when);
        let parsed = PropertyValue::from_json(&value.to_json()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_page_round_trip_preserves_title_and_status() {
        let mut properties = Properties::new();
        properties.insert("Title".into(), PropertyValue::Title("First post".into()));
        properties.insert("Status".into(), PropertyValue::Select("Published".into()));

        let page = serde_json::json!({ "properties": properties_to_json(&properties) });
        let parsed = properties_from_page(&page).unwrap();

        assert_eq!(parsed.get("Title"), properties.get("Title"));
        assert_eq!(parsed.get("Status"), properties.get("Status"));
    }

    #[test]
    fn test_plain_text_preferred_when_present() {
        let value = serde_json::json!({
            "title": [{ "plain_text": "Rendered", "text": { "content": "raw" } }]
        });
        let parsed = PropertyValue::from_json(&value).unwrap();
        assert_eq!(parsed, PropertyValue::Title("Rendered".to_string()));
    }

    #[test]
    fn test_unknown_shape_is_unsupported() {
        let value = serde_json::json!({ "rollup": {} });
        assert!(matches!(
            PropertyValue::from_json(&value),
            Err(NotionError::UnsupportedProperty(_))
        ));
    }

    #[test]
    fn test_unknown_shapes_skipped_when_reading_page() {
        let page = serde_json::json!({
            "properties": {
                "Title": { "title": [{ "text": { "content": "Post" } }] },
                "Computed": { "formula": { "string": "x" } }
            }
        });

        let parsed = properties_from_page(&page).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("Title"));
    }

    #[test]
    fn test_schema_select_options() {
        let column = PropertySchema::Select(vec!["Idea".into(), "Planned".into()]);
        let json = column.to_json();
        assert_eq!(json["select"]["options"][1]["name"], "Planned");
    }
}
