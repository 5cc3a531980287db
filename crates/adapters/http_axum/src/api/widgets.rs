//! JSON REST handlers for widgets.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{ETAG, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use widgethub_app::ports::WidgetRepository;
use widgethub_app::services::widget_service::Precondition;
use widgethub_domain::error::ValidationError;
use widgethub_domain::id::WidgetId;
use widgethub_domain::widget::{Widget, WidgetChanges};

use crate::api::PREFIX;
use crate::error::ApiError;
use crate::headers::{etag, if_match};
use crate::state::AppState;

/// Wire representation of a widget.
///
/// Field names and types here are the public JSON contract:
/// `{"id": number|null, "name": string, "description": string, "version": integer}`.
#[derive(Debug, Serialize)]
pub struct WidgetRepresentation {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub version: i64,
}

impl From<Widget> for WidgetRepresentation {
    fn from(widget: Widget) -> Self {
        Self {
            id: widget.id.map(WidgetId::get),
            name: widget.name,
            description: widget.description,
            version: widget.version.get(),
        }
    }
}

fn item_location(id: Option<WidgetId>) -> String {
    match id {
        Some(id) => format!("{PREFIX}/widget/{id}"),
        None => collection_location(),
    }
}

fn collection_location() -> String {
    format!("{PREFIX}/widgets")
}

/// Request body for creating or updating a widget.
///
/// `version` (and any other unknown field) is ignored: on update the
/// `If-Match` header is authoritative.
#[derive(Debug, Deserialize)]
pub struct WidgetPayload {
    #[serde(default)]
    pub id: Option<WidgetId>,
    pub name: String,
    pub description: String,
}

impl WidgetPayload {
    fn into_changes(self, path_id: WidgetId) -> Result<WidgetChanges, ValidationError> {
        if let Some(body_id) = self.id
            && body_id != path_id
        {
            return Err(ValidationError::IdMismatch {
                path: path_id,
                body: body_id,
            });
        }
        Ok(WidgetChanges {
            name: self.name,
            description: self.description,
        })
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<WidgetRepresentation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => ([(LOCATION, collection_location())], json).into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Widget),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(widget) => {
                let headers = [
                    (LOCATION, item_location(widget.id)),
                    (ETAG, etag(widget.version)),
                ];
                (headers, Json(WidgetRepresentation::from(widget))).into_response()
            }
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Widget),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(widget) => {
                let headers = [
                    (LOCATION, item_location(widget.id)),
                    (ETAG, etag(widget.version)),
                ];
                let body = Json(WidgetRepresentation::from(widget));
                (StatusCode::CREATED, headers, body).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<WidgetId, ApiError> {
    Ok(WidgetId::from_str(raw)?)
}

/// `GET /rest/widgets`
pub async fn list<WR>(State(state): State<AppState<WR>>) -> Result<ListResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    let widgets = state.widget_service.find_all().await?;
    Ok(ListResponse::Ok(Json(
        widgets.into_iter().map(WidgetRepresentation::from).collect(),
    )))
}

/// `GET /rest/widget/{id}`
pub async fn get<WR>(
    State(state): State<AppState<WR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    let widget = state.widget_service.get_widget(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(widget))
}

/// `POST /rest/widget`
pub async fn create<WR>(
    State(state): State<AppState<WR>>,
    Json(req): Json<WidgetPayload>,
) -> Result<CreateResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    let widget = Widget::builder()
        .name(req.name)
        .description(req.description)
        .build()?;
    let created = state.widget_service.save(widget).await?;
    Ok(CreateResponse::Created(created))
}

/// `PUT /rest/widget/{id}`: `If-Match` is optional; without it the current
/// version is updated.
pub async fn update<WR>(
    State(state): State<AppState<WR>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<WidgetPayload>,
) -> Result<GetResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    let precondition = if_match(&headers)?.unwrap_or(Precondition::Any);
    apply_update(&state, &id, precondition, req).await
}

/// `PUT /rest/proper/widget/{id}`: `If-Match` is mandatory.
pub async fn update_checked<WR>(
    State(state): State<AppState<WR>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<WidgetPayload>,
) -> Result<GetResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    let precondition = if_match(&headers)?.ok_or(ApiError::PreconditionRequired)?;
    apply_update(&state, &id, precondition, req).await
}

async fn apply_update<WR>(
    state: &AppState<WR>,
    id: &str,
    precondition: Precondition,
    req: WidgetPayload,
) -> Result<GetResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    let id = parse_id(id)?;
    let changes = req.into_changes(id)?;
    let updated = state
        .widget_service
        .update_widget(id, changes, precondition)
        .await?;
    Ok(GetResponse::Ok(updated))
}

/// `DELETE /rest/widget/{id}`
pub async fn delete<WR>(
    State(state): State<AppState<WR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    state.widget_service.delete_by_id(parse_id(&id)?).await?;
    Ok(DeleteResponse::Ok)
}
