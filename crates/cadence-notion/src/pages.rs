//! Page CRUD verbs.

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::{
    client::NotionClient,
    error::NotionError,
    properties::{properties_to_json, Properties},
};

/// Parent of a page: either a page or a database.
#[derive(Debug, Clone)]
pub enum Parent {
    /// A page parent
    Page(String),
    /// A database parent (the page becomes a row)
    Database(String),
}

impl Parent {
    fn to_json(&self) -> Value {
        match self {
            Self::Page(id) => json!({ "page_id": id }),
            Self::Database(id) => json!({ "database_id": id }),
        }
    }
}

impl NotionClient {
    /// Create a page under a parent.
    ///
    /// Returns the new page ID.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response carries no ID.
    #[instrument(skip(self, properties))]
    pub async fn create_page(
        &self,
        parent: &Parent,
        properties: &Properties,
    ) -> Result<String, NotionError> {
        let body = json!({
            "parent": parent.to_json(),
            "properties": properties_to_json(properties),
        });

        let response = self.request(Method::POST, "/pages", Some(&body)).await?;
        let id = resource_id(&response)?;
        debug!(page_id = %id, "Created page");
        Ok(id)
    }

    /// Retrieve a page resource.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve_page(&self, page_id: &str) -> Result<Value, NotionError> {
        self.request(Method::GET, &format!("/pages/{page_id}"), None)
            .await
    }

    /// Update a page's properties.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self, properties))]
    pub async fn update_page(
        &self,
        page_id: &str,
        properties: &Properties,
    ) -> Result<(), NotionError> {
        let body = json!({ "properties": properties_to_json(properties) });
        self.request(Method::PATCH, &format!("/pages/{page_id}"), Some(&body))
            .await?;
        Ok(())
    }

    /// Archive a page.
    ///
    /// Notion has no hard delete; archiving flips the `archived` flag.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn archive_page(&self, page_id: &str) -> Result<(), NotionError> {
        let body = json!({ "archived": true });
        self.request(Method::PATCH, &format!("/pages/{page_id}"), Some(&body))
            .await?;
        Ok(())
    }

    /// Delete a page. Alias for [`NotionClient::archive_page`].
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn delete_page(&self, page_id: &str) -> Result<(), NotionError> {
        self.archive_page(page_id).await
    }

    /// Append paragraph blocks to a page.
    ///
    /// Used to attach long-form body text that does not fit the property
    /// model.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self, paragraphs), fields(count = paragraphs.len()))]
    pub async fn append_paragraphs(
        &self,
        page_id: &str,
        paragraphs: &[String],
    ) -> Result<(), NotionError> {
        let children: Vec<Value> = paragraphs
            .iter()
            .map(|text| {
                json!({
                    "object": "block",
                    "type": "paragraph",
                    "paragraph": {
                        "rich_text": [{ "type": "text", "text": { "content": text } }]
                    }
                })
            })
            .collect();

        let body = json!({ "children": children });
        self.request(
            Method::PATCH,
            &format!("/blocks/{page_id}/children"),
            Some(&body),
        )
        .await?;
        Ok(())
    }
}

pub(crate) fn resource_id(resource: &Value) -> Result<String, NotionError> {
    resource
        .get("id")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| NotionError::MissingField("id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_encoding() {
        let page = Parent::Page("abc".to_string());
        assert_eq!(page.to_json(), json!({ "page_id": "abc" }));

        let database = Parent::Database("def".to_string());
        assert_eq!(database.to_json(), json!({ "database_id": "def" }));
    }

    #[test]
    fn test_resource_id() {
        let resource = json!({ "id": "page-1", "object": "page" });
        assert_eq!(resource_id(&resource).unwrap(), "page-1");

        let no_id = json!({ "object": "page" });
        assert!(matches!(
            resource_id(&no_id),
            Err(NotionError::MissingField(_))
        ));
    }
}
