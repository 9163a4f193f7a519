//! Handlers for the read-only `/directory` reference-data endpoints.
//!
//! These proxy the upstream enterprise directory for picker lists. The
//! stores themselves never consult the directory; richer "no module found
//! for this id" errors are a transport concern and surface here.

use axum::extract::{Query, State};
use axum::Json;
use flowdef_core::types::Id;
use serde::Deserialize;

use crate::directory::{DirectoryEntry, DirectoryError};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ModuleParams {
    pub application_id: Option<Id>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub module_id: Option<Id>,
}

#[derive(Debug, Deserialize)]
pub struct SectionParams {
    pub page_id: Option<Id>,
}

fn upstream(err: DirectoryError) -> AppError {
    AppError::Internal(format!("Error reaching the enterprise directory: {err}"))
}

/// GET /api/v1/directory/applications
pub async fn applications(State(state): State<AppState>) -> AppResult<Json<Vec<DirectoryEntry>>> {
    let entries = state
        .directory
        .applications()
        .await
        .map_err(upstream)?
        .unwrap_or_default();
    Ok(Json(entries))
}

/// GET /api/v1/directory/modules?application_id=...
pub async fn modules(
    State(state): State<AppState>,
    Query(params): Query<ModuleParams>,
) -> AppResult<Json<Vec<DirectoryEntry>>> {
    let entries = match params.application_id {
        Some(app_id) => state
            .directory
            .modules_by_application(app_id)
            .await
            .map_err(upstream)?
            .ok_or_else(|| AppError::NotFound(format!("No modules found for application {app_id}")))?,
        None => state
            .directory
            .modules()
            .await
            .map_err(upstream)?
            .unwrap_or_default(),
    };
    Ok(Json(entries))
}

/// GET /api/v1/directory/pages?module_id=...
pub async fn pages(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<DirectoryEntry>>> {
    let entries = match params.module_id {
        Some(module_id) => state
            .directory
            .pages_by_module(module_id)
            .await
            .map_err(upstream)?
            .ok_or_else(|| AppError::NotFound(format!("No pages found for module {module_id}")))?,
        None => state
            .directory
            .pages()
            .await
            .map_err(upstream)?
            .unwrap_or_default(),
    };
    Ok(Json(entries))
}

/// GET /api/v1/directory/sections?page_id=...
pub async fn sections(
    State(state): State<AppState>,
    Query(params): Query<SectionParams>,
) -> AppResult<Json<Vec<DirectoryEntry>>> {
    let entries = match params.page_id {
        Some(page_id) => state
            .directory
            .sections_by_page(page_id)
            .await
            .map_err(upstream)?
            .ok_or_else(|| AppError::NotFound(format!("No sections found for page {page_id}")))?,
        None => state
            .directory
            .sections()
            .await
            .map_err(upstream)?
            .unwrap_or_default(),
    };
    Ok(Json(entries))
}

/// GET /api/v1/directory/roles
pub async fn roles(State(state): State<AppState>) -> AppResult<Json<Vec<DirectoryEntry>>> {
    let entries = state
        .directory
        .roles()
        .await
        .map_err(upstream)?
        .unwrap_or_default();
    Ok(Json(entries))
}
