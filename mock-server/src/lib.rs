use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Widget {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct CreateWidget {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateWidget {
    pub name: Option<String>,
    pub quantity: Option<u32>,
}

/// Update addressed by an `id` field in the body, for a single RESTful URL.
#[derive(Deserialize)]
pub struct UpdateWidgetById {
    pub id: Uuid,
    #[serde(flatten)]
    pub changes: UpdateWidget,
}

#[derive(Deserialize)]
pub struct ListFilter {
    pub name: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Widget>>>;

/// Widgets served in two shapes: REST routes (`GET/POST/PATCH /widgets`,
/// `GET/PATCH/DELETE /widgets/{id}`) and explicit action routes
/// (`POST /widgets/{id}/update`, `POST /widgets/{id}/delete`).
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/widgets",
            get(list_widgets).post(create_widget).patch(update_widget_by_body),
        )
        .route(
            "/widgets/{id}",
            get(get_widget).patch(update_widget).delete(delete_widget),
        )
        .route("/widgets/{id}/update", post(update_widget))
        .route("/widgets/{id}/delete", post(delete_widget))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_widgets(
    State(db): State<Db>,
    Query(filter): Query<ListFilter>,
) -> Json<Vec<Widget>> {
    let widgets = db.read().await;
    let mut matching: Vec<Widget> = widgets
        .values()
        .filter(|w| filter.name.as_deref().is_none_or(|name| w.name == name))
        .cloned()
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name));
    Json(matching)
}

async fn create_widget(
    State(db): State<Db>,
    Json(input): Json<CreateWidget>,
) -> (StatusCode, Json<Widget>) {
    let widget = Widget {
        id: Uuid::new_v4(),
        name: input.name,
        quantity: input.quantity,
    };
    debug!(id = %widget.id, "created widget");
    db.write().await.insert(widget.id, widget.clone());
    (StatusCode::CREATED, Json(widget))
}

async fn get_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Widget>, StatusCode> {
    let widgets = db.read().await;
    widgets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateWidget>,
) -> Result<Json<Widget>, StatusCode> {
    apply_update(&db, id, input).await
}

async fn update_widget_by_body(
    State(db): State<Db>,
    Json(input): Json<UpdateWidgetById>,
) -> Result<Json<Widget>, StatusCode> {
    apply_update(&db, input.id, input.changes).await
}

async fn apply_update(db: &Db, id: Uuid, input: UpdateWidget) -> Result<Json<Widget>, StatusCode> {
    let mut widgets = db.write().await;
    let widget = widgets.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        widget.name = name;
    }
    if let Some(quantity) = input.quantity {
        widget.quantity = quantity;
    }
    Ok(Json(widget.clone()))
}

async fn delete_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut widgets = db.write().await;
    widgets.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
