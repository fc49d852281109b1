use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Payload wrapper used by every `/items` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Wrapped<T> {
    pub data: T,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Item>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/status/{code}", get(status))
        .route("/garbled", get(garbled))
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reflect the request back: method, path, auth header, all headers, query
/// and parsed body.
async fn echo(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    let header_map: Map<String, Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
        })
        .collect();
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "authorization": authorization,
        "headers": header_map,
        "query": query,
        "body": body,
    }))
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = status.canonical_reason().unwrap_or("unknown status");
    (status, Json(json!({ "message": message })))
}

/// 200 with a body that is not valid UTF-8.
async fn garbled() -> ([(header::HeaderName, &'static str); 1], Vec<u8>) {
    ([(header::CONTENT_TYPE, "application/octet-stream")], vec![0xff, 0xfe, 0xfd])
}

async fn list_items(State(db): State<Db>) -> Json<Wrapped<Vec<Item>>> {
    let items = db.read().await;
    Json(Wrapped {
        data: items.values().cloned().collect(),
    })
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> (StatusCode, Json<Wrapped<Item>>) {
    let item = Item {
        id: Uuid::new_v4(),
        name: input.name,
        tags: input.tags,
    };
    db.write().await.insert(item.id, item.clone());
    (StatusCode::CREATED, Json(Wrapped { data: item }))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Wrapped<Item>>, StatusCode> {
    let items = db.read().await;
    items
        .get(&id)
        .cloned()
        .map(|data| Json(Wrapped { data }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateItem>,
) -> Result<Json<Wrapped<Item>>, StatusCode> {
    let mut items = db.write().await;
    let item = items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        item.name = name;
    }
    if let Some(tags) = input.tags {
        item.tags = tags;
    }
    Ok(Json(Wrapped { data: item.clone() }))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut items = db.write().await;
    items.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_inside_wrapper() {
        let wrapped = Wrapped {
            data: Item {
                id: Uuid::nil(),
                name: "Test".to_string(),
                tags: vec!["a".to_string()],
            },
        };
        let json = serde_json::to_value(&wrapped).unwrap();
        assert_eq!(json["data"]["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["data"]["name"], "Test");
        assert_eq!(json["data"]["tags"][0], "a");
    }

    #[test]
    fn create_item_defaults_tags() {
        let input: CreateItem = serde_json::from_str(r#"{"name":"No tags"}"#).unwrap();
        assert_eq!(input.name, "No tags");
        assert!(input.tags.is_empty());
    }

    #[test]
    fn create_item_rejects_missing_name() {
        let result: Result<CreateItem, _> = serde_json::from_str(r#"{"tags":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_item_all_fields_optional() {
        let input: UpdateItem = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.tags.is_none());
    }
}
