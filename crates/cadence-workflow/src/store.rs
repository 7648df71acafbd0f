//! Persistence of campaign content.
//!
//! The pipeline talks to a [`ContentStore`]; the production implementation
//! writes to a Notion database whose rows track each content piece through
//! its lifecycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{info, instrument};

use cadence_core::Platform;
use cadence_notion::{NotionClient, NotionError, Properties, PropertySchema, PropertyValue};

/// Lifecycle status of a content row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    Idea,
    Planned,
    Drafted,
    Finalized,
    Scheduled,
    Published,
}

impl ContentStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Idea,
        Self::Planned,
        Self::Drafted,
        Self::Finalized,
        Self::Scheduled,
        Self::Published,
    ];

    /// The status name as stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Planned => "Planned",
            Self::Drafted => "Drafted",
            Self::Finalized => "Finalized",
            Self::Scheduled => "Scheduled",
            Self::Published => "Published",
        }
    }
}

/// One content row as the store sees it.
#[derive(Debug, Clone)]
pub struct ContentPage {
    /// Content title
    pub title: String,
    /// Lifecycle status
    pub status: ContentStatus,
    /// When the content entered the pipeline
    pub created_at: DateTime<Utc>,
    /// When the content is scheduled to go out, once known
    pub scheduled_date: Option<DateTime<Utc>>,
    /// The post text
    pub post: String,
    /// Platforms the content targets
    pub platforms: Vec<Platform>,
}

/// Where the pipeline persists content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create the campaign's content database. Returns its id.
    async fn create_content_database(&self, title: &str) -> Result<String, NotionError>;

    /// Add a content row. Returns the new row's id.
    async fn add_content_page(
        &self,
        database_id: &str,
        page: &ContentPage,
    ) -> Result<String, NotionError>;

    /// Rewrite a content row.
    async fn update_content_page(
        &self,
        page_id: &str,
        page: &ContentPage,
    ) -> Result<(), NotionError>;

    /// Archive a content row.
    async fn archive_content_page(&self, page_id: &str) -> Result<(), NotionError>;
}

/// Property schema of the content database.
#[must_use]
pub fn content_schema() -> BTreeMap<String, PropertySchema> {
    let statuses = ContentStatus::ALL
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();
    let platforms = [
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::Facebook,
        Platform::Instagram,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    BTreeMap::from([
        ("Title".to_string(), PropertySchema::Title),
        ("Status".to_string(), PropertySchema::Select(statuses)),
        ("Created At".to_string(), PropertySchema::Date),
        ("Scheduled Date".to_string(), PropertySchema::Date),
        ("Post".to_string(), PropertySchema::RichText),
        ("Platform".to_string(), PropertySchema::MultiSelect(platforms)),
    ])
}

// Notion caps a rich_text fragment at 2000 characters.
const POST_PROPERTY_LIMIT: usize = 2000;

/// Map a content row onto database properties.
#[must_use]
pub fn page_properties(page: &ContentPage) -> Properties {
    let excerpt: String = page.post.chars().take(POST_PROPERTY_LIMIT).collect();
    let platforms = page.platforms.iter().map(ToString::to_string).collect();

    let mut properties = Properties::from([
        ("Title".to_string(), PropertyValue::Title(page.title.clone())),
        (
            "Status".to_string(),
            PropertyValue::Select(page.status.as_str().to_string()),
        ),
        ("Created At".to_string(), PropertyValue::Date(page.created_at)),
        ("Post".to_string(), PropertyValue::RichText(excerpt)),
        ("Platform".to_string(), PropertyValue::MultiSelect(platforms)),
    ]);
    if let Some(scheduled) = page.scheduled_date {
        properties.insert("Scheduled Date".to_string(), PropertyValue::Date(scheduled));
    }
    properties
}

/// [`ContentStore`] backed by a Notion workspace.
pub struct NotionContentStore {
    client: NotionClient,
    parent_page_id: String,
}

impl NotionContentStore {
    /// Create a store writing under the given parent page.
    #[must_use]
    pub fn new(client: NotionClient, parent_page_id: impl Into<String>) -> Self {
        Self {
            client,
            parent_page_id: parent_page_id.into(),
        }
    }
}

#[async_trait]
impl ContentStore for NotionContentStore {
    #[instrument(skip(self))]
    async fn create_content_database(&self, title: &str) -> Result<String, NotionError> {
        let id = self
            .client
            .create_database(&self.parent_page_id, title, &content_schema())
            .await?;
        info!(database_id = %id, "Created content database");
        Ok(id)
    }

    #[instrument(skip(self, page), fields(title = %page.title))]
    async fn add_content_page(
        &self,
        database_id: &str,
        page: &ContentPage,
    ) -> Result<String, NotionError> {
        let page_id = self
            .client
            .create_database_item(database_id, &page_properties(page))
            .await?;

        // The Post property only holds an excerpt; the full text goes into
        // the page body.
        if page.post.chars().count() > POST_PROPERTY_LIMIT {
            let paragraphs: Vec<String> =
                page.post.split("\n\n").map(ToString::to_string).collect();
            self.client.append_paragraphs(&page_id, &paragraphs).await?;
        }

        Ok(page_id)
    }

    #[instrument(skip(self, page), fields(title = %page.title))]
    async fn update_content_page(
        &self,
        page_id: &str,
        page: &ContentPage,
    ) -> Result<(), NotionError> {
        self.client.update_page(page_id, &page_properties(page)).await
    }

    #[instrument(skip(self))]
    async fn archive_content_page(&self, page_id: &str) -> Result<(), NotionError> {
        self.client.archive_page(page_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_notion::properties_to_json;

    fn page() -> ContentPage {
        ContentPage {
            title: "Profiling async services".to_string(),
            status: ContentStatus::Scheduled,
            created_at: Utc::now(),
            scheduled_date: Some(Utc::now()),
            post: "Most latency hides between awaits.".to_string(),
            platforms: vec![Platform::LinkedIn, Platform::Twitter],
        }
    }

    #[test]
    fn test_schema_covers_every_column() {
        let schema = content_schema();
        for column in [
            "Title",
            "Status",
            "Created At",
            "Scheduled Date",
            "Post",
            "Platform",
        ] {
            assert!(schema.contains_key(column), "missing column {column}");
        }
        assert!(matches!(schema["Title"], PropertySchema::Title));
        assert!(matches!(&schema["Status"], PropertySchema::Select(options)
            if options.len() == ContentStatus::ALL.len()));
    }

    #[test]
    fn test_page_properties_encoding() {
        let json = properties_to_json(&page_properties(&page()));

        assert_eq!(
            json["Title"]["title"][0]["text"]["content"],
            "Profiling async services"
        );
        assert_eq!(json["Status"]["select"]["name"], "Scheduled");
        assert_eq!(json["Platform"]["multi_select"][0]["name"], "LinkedIn");
        assert!(json["Scheduled Date"]["date"]["start"].is_string());
    }

    #[test]
    fn test_unscheduled_page_omits_date() {
        let mut unscheduled = page();
        unscheduled.scheduled_date = None;
        let properties = page_properties(&unscheduled);
        assert!(!properties.contains_key("Scheduled Date"));
    }

    #[test]
    fn test_long_post_truncated_in_property() {
        let mut long = page();
        long.post = "x".repeat(5000);
        let properties = page_properties(&long);
        let PropertyValue::RichText(excerpt) = &properties["Post"] else {
            panic!("Post must be rich text");
        };
        assert_eq!(excerpt.chars().count(), 2000);
    }
}
