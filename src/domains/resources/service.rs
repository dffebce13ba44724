//! Resource service implementation.
//!
//! The ResourceService lists the registered resources and serves their
//! content. Adding a new resource does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resources;

/// Service for managing and accessing resources.
///
/// The set of resources is fixed at construction; listing is stable across
/// calls.
#[derive(Debug, Clone)]
pub struct ResourceService {
    resources: Vec<ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// Markdown content of the resource.
    pub content: String,
}

impl ResourceService {
    pub fn new() -> Self {
        let resources = get_all_resources();
        info!("Registered {} resources", resources.len());
        Self { resources }
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    fn entry(&self, uri: &str) -> Result<&ResourceEntry, ResourceError> {
        debug!("Reading resource: {}", uri);
        self.resources
            .iter()
            .find(|entry| entry.resource.raw.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))
    }

    /// Content of a resource by URI.
    pub fn read_text(&self, uri: &str) -> Result<&str, ResourceError> {
        self.entry(uri).map(|entry| entry.content.as_str())
    }

    /// Read a resource by URI. The contents carry the mime type the listing declares.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self.entry(uri)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: entry.resource.raw.uri.clone(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text: entry.content.clone(),
                meta: None,
            }],
        })
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}
