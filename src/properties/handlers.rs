use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put, MethodRouter},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::middleware::authenticate,
    error::ApiError,
    properties::{
        dto::{NewProperty, PropertyPatch},
        repo_types::Property,
    },
    state::AppState,
};

const NOT_FOUND: &str = "Property not found";

pub fn property_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/property",
            get(list_properties).merge(guard_writes(state, post(create_property))),
        )
        .route(
            "/property/:id",
            get(get_property).merge(guard_writes(
                state,
                put(update_property).delete(delete_property),
            )),
        )
}

/// Layers token authentication on mutating routes when configured to.
fn guard_writes(state: &AppState, routes: MethodRouter<AppState>) -> MethodRouter<AppState> {
    if state.config.require_auth_for_writes {
        routes.route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
    } else {
        routes
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!(id = %raw, "malformed property id");
        ApiError::validation("Invalid Property ID")
    })
}

#[instrument(skip(state))]
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let items = state.properties.list().await.map_err(|e| {
        error!(error = %e, "list properties failed");
        ApiError::Internal("Failed to retrieve Properties".into())
    })?;
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn create_property(
    State(state): State<AppState>,
    payload: Result<Json<NewProperty>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let Json(body) = payload.map_err(|e| {
        warn!(error = %e, "create property rejected");
        ApiError::rejected("Failed to create Property", e.body_text())
    })?;

    let property = state.properties.create(body).await.map_err(|e| {
        error!(error = %e, "create property failed");
        ApiError::rejected("Failed to create Property", e)
    })?;

    info!(property_id = %property.id, "property created");
    Ok((StatusCode::CREATED, Json(property)))
}

#[instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let id = parse_id(&id)?;
    match state.properties.find_by_id(id).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err(ApiError::NotFound(NOT_FOUND.into())),
        Err(e) => {
            error!(error = %e, %id, "get property failed");
            Err(ApiError::Internal("Failed to retrieve Property".into()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyPatch>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let id = parse_id(&id)?;
    // A request without a JSON content type carries no fields to change.
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(JsonRejection::MissingJsonContentType(_)) => PropertyPatch::default(),
        Err(e) => {
            warn!(error = %e, %id, "update property rejected");
            return Err(ApiError::rejected("Failed to update Property", e.body_text()));
        }
    };

    match state.properties.update(id, patch).await {
        Ok(Some(p)) => {
            info!(property_id = %id, "property updated");
            Ok(Json(p))
        }
        Ok(None) => Err(ApiError::NotFound(NOT_FOUND.into())),
        Err(e) => {
            error!(error = %e, %id, "update property failed");
            Err(ApiError::rejected("Failed to update Property", e))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    match state.properties.delete(id).await {
        Ok(true) => {
            info!(property_id = %id, "property deleted");
            Ok(StatusCode::OK)
        }
        Ok(false) => Err(ApiError::NotFound(NOT_FOUND.into())),
        Err(e) => {
            error!(error = %e, %id, "delete property failed");
            Err(ApiError::rejected("Failed to delete Property", e))
        }
    }
}
