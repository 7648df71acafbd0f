//! # cadence-notion
//!
//! Notion REST client for the Cadence content pipeline.
//!
//! The pipeline uses Notion as its system of record: a content database per
//! campaign, one page per content item. This crate wraps the HTTP surface:
//!
//! - [`NotionClient`] - generic request dispatch (bearer token, pinned API
//!   version)
//! - page CRUD verbs in [`pages`], database verbs in [`databases`]
//! - [`PropertyValue`]/[`PropertySchema`] - typed views over Notion's
//!   property resource model
//!
//! Archiving is Notion's only deletion: `archive_page` flips the `archived`
//! flag and `delete_page` aliases it.

mod client;
mod databases;
mod error;
mod pages;
mod properties;

pub use client::NotionClient;
pub use databases::{DatabaseQuery, Sort, SortDirection};
pub use error::NotionError;
pub use pages::Parent;
pub use properties::{
    properties_from_page, properties_to_json, schema_to_json, Properties, PropertySchema,
    PropertyValue,
};
