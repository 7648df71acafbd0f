//! Database CRUD and query verbs.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::{
    client::NotionClient,
    error::NotionError,
    pages::resource_id,
    properties::{properties_to_json, schema_to_json, Properties, PropertySchema},
};

/// Sort direction for database queries.
#[derive(Debug, Clone, Copy)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// A sort clause.
#[derive(Debug, Clone)]
pub struct Sort {
    /// Property to sort by
    pub property: String,
    /// Direction
    pub direction: SortDirection,
}

/// A database query: optional filter, sorts, and page size.
#[derive(Debug, Clone, Default)]
pub struct DatabaseQuery {
    filter: Option<Value>,
    sorts: Vec<Sort>,
    page_size: Option<u32>,
}

impl DatabaseQuery {
    /// Create an empty query (returns everything, API default paging).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw Notion filter object.
    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add a sort clause.
    #[must_use]
    pub fn sorted_by(mut self, property: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts.push(Sort {
            property: property.into(),
            direction,
        });
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn to_json(&self) -> Value {
        let mut body = serde_json::Map::new();
        if let Some(filter) = &self.filter {
            body.insert("filter".to_string(), filter.clone());
        }
        if !self.sorts.is_empty() {
            let sorts: Vec<Value> = self
                .sorts
                .iter()
                .map(|s| {
                    json!({ "property": s.property, "direction": s.direction.as_str() })
                })
                .collect();
            body.insert("sorts".to_string(), Value::Array(sorts));
        }
        if let Some(page_size) = self.page_size {
            body.insert("page_size".to_string(), json!(page_size));
        }
        Value::Object(body)
    }
}

impl NotionClient {
    /// Create a database under a parent page.
    ///
    /// Returns the new database ID.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response carries no ID.
    #[instrument(skip(self, schema), fields(title = %title))]
    pub async fn create_database(
        &self,
        parent_page_id: &str,
        title: &str,
        schema: &BTreeMap<String, PropertySchema>,
    ) -> Result<String, NotionError> {
        let body = json!({
            "parent": { "page_id": parent_page_id },
            "title": [{ "type": "text", "text": { "content": title } }],
            "properties": schema_to_json(schema),
        });

        let response = self.request(Method::POST, "/databases", Some(&body)).await?;
        let id = resource_id(&response)?;
        debug!(database_id = %id, "Created database");
        Ok(id)
    }

    /// Retrieve a database resource.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve_database(&self, database_id: &str) -> Result<Value, NotionError> {
        self.request(Method::GET, &format!("/databases/{database_id}"), None)
            .await
    }

    /// Query a database, returning the page resources in `results`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response has no
    /// `results` array.
    #[instrument(skip(self, query))]
    pub async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<Value>, NotionError> {
        let body = query.to_json();
        let response = self
            .request(
                Method::POST,
                &format!("/databases/{database_id}/query"),
                Some(&body),
            )
            .await?;

        response
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| NotionError::MissingField("results".to_string()))
    }

    /// Create a row (page) in a database.
    ///
    /// Returns the new page ID.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self, properties))]
    pub async fn create_database_item(
        &self,
        database_id: &str,
        properties: &Properties,
    ) -> Result<String, NotionError> {
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": properties_to_json(properties),
        });

        let response = self.request(Method::POST, "/pages", Some(&body)).await?;
        resource_id(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_body() {
        let query = DatabaseQuery::new();
        assert_eq!(query.to_json(), json!({}));
    }

    #[test]
    fn test_query_body_with_clauses() {
        let query = DatabaseQuery::new()
            .with_filter(json!({ "property": "Status", "select": { "equals": "Planned" } }))
            .sorted_by("Scheduled Date", SortDirection::Ascending)
            .with_page_size(10);

        let body = query.to_json();
        assert_eq!(body["filter"]["property"], "Status");
        assert_eq!(body["sorts"][0]["direction"], "ascending");
        assert_eq!(body["page_size"], 10);
    }
}
