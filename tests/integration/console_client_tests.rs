//! Console HTTP client tests against local stub and offline servers

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use equiptrack::{
    console::{ClientError, EquipmentApi, HttpApiClient},
    models::{EquipmentRequest, EquipmentStatus, ListParams},
};

use crate::common::{build_offline_app, spawn};

type Seen = Arc<Mutex<Vec<String>>>;

fn equipment_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Air Handler Unit 1",
        "typeId": 1,
        "typeName": "Air Handler",
        "status": "Active",
        "lastCleanedDate": "2024-06-01",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-06-01T00:00:00Z"
    })
}

async fn list(State(seen): State<Seen>, RawQuery(query): RawQuery) -> Json<Value> {
    seen.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({
        "content": [equipment_json(1)],
        "page": 0,
        "size": 10,
        "totalElements": 1,
        "totalPages": 1,
        "last": true
    }))
}

async fn reject_create() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": 400,
            "error": "Validation Failed",
            "message": "One or more fields are invalid",
            "fieldErrors": { "name": "Equipment name is required" },
            "timestamp": "2024-06-01T00:00:00Z"
        })),
    )
}

async fn remove(State(seen): State<Seen>, Path(id): Path<i64>) -> StatusCode {
    seen.lock().unwrap().push(format!("delete {}", id));
    StatusCode::NO_CONTENT
}

async fn history(Path(id): Path<i64>) -> Json<Value> {
    Json(json!([{
        "id": 5,
        "equipmentId": id,
        "equipmentName": "Air Handler Unit 1",
        "maintenanceDate": "2024-06-01",
        "notes": null,
        "performedBy": "Team A",
        "createdAt": "2024-06-01T09:00:00Z"
    }]))
}

async fn stub_server() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/equipment", get(list).post(reject_create))
        .route("/api/equipment/:id", delete(remove))
        .route("/api/equipment/:id/maintenance", get(history))
        .route("/api/maintenance", post(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .with_state(seen.clone());
    (spawn(app).await, seen)
}

#[tokio::test]
async fn test_list_sends_every_parameter() {
    let (base_url, seen) = stub_server().await;
    let client = HttpApiClient::new(base_url);

    let mut params = ListParams::default();
    params.set_search("Air");
    params.set_status_filter(Some(EquipmentStatus::Active));
    let page = client.list_equipment(&params).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].status, EquipmentStatus::Active);

    client.list_equipment(&ListParams::default()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0],
        "search=Air&status=Active&page=0&size=10&sortBy=createdAt&sortDir=desc"
    );
    assert_eq!(seen[1], "page=0&size=10&sortBy=createdAt&sortDir=desc");
}

#[tokio::test]
async fn test_error_body_is_decoded() {
    let (base_url, _) = stub_server().await;
    let client = HttpApiClient::new(format!("{}/", base_url));

    let err = client
        .create_equipment(&EquipmentRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), Some("One or more fields are invalid"));
    assert_eq!(
        err.field_errors().unwrap()["name"],
        "Equipment name is required"
    );
}

#[tokio::test]
async fn test_error_without_body_uses_fallback() {
    let (base_url, _) = stub_server().await;
    let client = HttpApiClient::new(base_url);
    let request = equiptrack::models::MaintenanceRequest::new(
        1,
        chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        "Team A",
        None,
    );

    let err = client.log_maintenance(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 503, .. }));
    assert!(err.field_errors().is_none());
    assert_eq!(err.user_message("Failed to log maintenance."), "Failed to log maintenance.");
}

#[tokio::test]
async fn test_delete_and_history_paths() {
    let (base_url, seen) = stub_server().await;
    let client = HttpApiClient::new(base_url);

    client.delete_equipment(42).await.unwrap();
    assert_eq!(seen.lock().unwrap().as_slice(), ["delete 42"]);

    let entries = client.maintenance_history(42).await.unwrap();
    assert_eq!(entries[0].equipment_id, 42);
    assert_eq!(entries[0].notes, None);
}

#[tokio::test]
async fn test_missing_route_is_api_error() {
    let (base_url, _) = stub_server().await;
    let client = HttpApiClient::new(base_url);

    let err = client.get_equipment(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = HttpApiClient::new("http://127.0.0.1:1");
    let err = client.list_equipment_types().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.user_message("Could not connect to the server."), "Could not connect to the server.");
}

#[tokio::test]
async fn test_service_validation_reaches_client() {
    let base_url = spawn(build_offline_app()).await;
    let client = HttpApiClient::new(base_url);

    let err = client
        .create_equipment(&EquipmentRequest::default())
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields["typeId"], "Equipment type is required");
}
