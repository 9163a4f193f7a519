//! Read-only client for the upstream enterprise directory service.
//!
//! Applications, modules, pages, sections, and roles are external
//! reference data addressed by opaque ids. This client only serves picker
//! lists through the transport layer; the repositories never call it --
//! reference ids are trusted as opaque foreign keys.

use flowdef_core::types::Id;
use serde::{Deserialize, Serialize};

/// An id + name pair from any directory list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryEntry {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// HTTP client bound to the directory service base URL.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch a list endpoint. An upstream 404 yields `None` rather than an
    /// error, matching how the directory reports empty scoped lists.
    async fn get_list(&self, path: &str) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let entries = response.error_for_status()?.json().await?;
        Ok(Some(entries))
    }

    pub async fn applications(&self) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list("/api/applications").await
    }

    pub async fn modules(&self) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list("/api/modules").await
    }

    pub async fn modules_by_application(
        &self,
        application_id: Id,
    ) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list(&format!("/api/modules/by-application/{application_id}"))
            .await
    }

    pub async fn pages(&self) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list("/api/pages").await
    }

    pub async fn pages_by_module(
        &self,
        module_id: Id,
    ) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list(&format!("/api/pages/by-module/{module_id}")).await
    }

    pub async fn sections(&self) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list("/api/sections").await
    }

    pub async fn sections_by_page(
        &self,
        page_id: Id,
    ) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list(&format!("/api/sections/by-page/{page_id}")).await
    }

    pub async fn roles(&self) -> Result<Option<Vec<DirectoryEntry>>, DirectoryError> {
        self.get_list("/api/roles").await
    }
}
