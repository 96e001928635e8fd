//! API integration tests

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::common::{body_json, build_app, build_offline_app, get, send};

#[tokio::test]
async fn test_health_check() {
    let response = get(build_offline_app(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_readiness_without_database() {
    let response = get(build_offline_app(), "/api/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "unavailable");
}

#[tokio::test]
async fn test_create_with_empty_body_reports_every_field() {
    let response = send(build_offline_app(), Method::POST, "/api/equipment", Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Validation Failed");
    assert_eq!(body["fieldErrors"]["name"], "Equipment name is required");
    assert_eq!(body["fieldErrors"]["typeId"], "Equipment type is required");
    assert_eq!(body["fieldErrors"]["status"], "Status is required");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_status_is_a_field_error() {
    let response = send(
        build_offline_app(),
        Method::PUT,
        "/api/equipment/1",
        Some(json!({ "name": "Pump 1", "typeId": 6, "status": "Broken" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["fieldErrors"]["status"].as_str().unwrap();
    assert!(message.starts_with("Status must be one of"));
}

#[tokio::test]
async fn test_blank_maintenance_request_is_rejected() {
    let response = send(
        build_offline_app(),
        Method::POST,
        "/api/maintenance",
        Some(json!({ "equipmentId": 1, "performedBy": "   " })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["fieldErrors"]["maintenanceDate"].is_string());
    assert!(body["fieldErrors"]["performedBy"].is_string());
}

#[tokio::test]
async fn test_malformed_json_gets_error_body() {
    let app = build_offline_app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/equipment")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_unknown_sort_field_is_bad_request() {
    let response = get(build_offline_app(), "/api/equipment?sortBy=weight").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], 400);
}

#[tokio::test]
async fn test_blank_status_filter_is_accepted() {
    let response = get(build_offline_app(), "/api/equipment?status=&search=").await;
    assert_ne!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_status_filter_is_bad_request() {
    let response = get(build_offline_app(), "/api/equipment?status=Broken").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_lists_equipment_paths() {
    let response = get(build_offline_app(), "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/equipment"].is_object());
    assert!(body["paths"]["/maintenance"].is_object());
}

#[tokio::test]
async fn test_openapi_responses_reference_named_schemas() {
    let body = body_json(get(build_offline_app(), "/api-docs/openapi.json").await).await;
    let list = &body["paths"]["/equipment"]["get"]["responses"];
    assert_eq!(
        list["200"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/EquipmentPage"
    );
    assert_eq!(
        list["400"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/ErrorResponse"
    );
    let log = &body["paths"]["/maintenance"]["post"]["responses"];
    assert_eq!(
        log["404"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/ErrorResponse"
    );
    assert!(body["components"]["schemas"]["ErrorResponse"].is_object());
}

async fn create(pool: &PgPool, body: Value) -> (StatusCode, Value) {
    let response = send(build_app(pool.clone()), Method::POST, "/api/equipment", Some(body)).await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn type_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM equipment_types WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_equipment_lifecycle(pool: PgPool) {
    let air = type_id(&pool, "Air Handler").await;
    let today = Utc::now().date_naive();

    let (status, created) = create(
        &pool,
        json!({ "name": "  Air Handler Unit 1 ", "typeId": air, "status": "Active", "lastCleanedDate": today }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Air Handler Unit 1");
    assert_eq!(created["typeName"], "Air Handler");
    let id = created["id"].as_i64().unwrap();

    let response = get(build_app(pool.clone()), &format!("/api/equipment/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "Active");

    let response = send(
        build_app(pool.clone()),
        Method::PUT,
        &format!("/api/equipment/{}", id),
        Some(json!({ "name": "Air Handler Unit 1", "typeId": air, "status": "Under Maintenance" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "Under Maintenance");
    assert!(updated.get("lastCleanedDate").map_or(true, Value::is_null));

    let response = send(build_app(pool.clone()), Method::DELETE, &format!("/api/equipment/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_app(pool.clone()), &format!("/api/equipment/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        format!("Equipment not found with id: {}", id)
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_activation_requires_recent_cleaning(pool: PgPool) {
    let pump = type_id(&pool, "Pump").await;
    let too_old = Utc::now().date_naive() - Duration::days(31);

    let (status, body) = create(
        &pool,
        json!({ "name": "Pump 1", "typeId": pump, "status": "Active", "lastCleanedDate": too_old }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Business Rule Violation");
    assert!(body["message"].as_str().unwrap().contains("31 days ago"));

    let (status, _) = create(&pool, json!({ "name": "Pump 1", "typeId": pump, "status": "Active" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = create(
        &pool,
        json!({ "name": "Pump 1", "typeId": pump, "status": "Inactive", "lastCleanedDate": too_old }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_unknown_type_is_not_found(pool: PgPool) {
    let (status, body) = create(&pool, json!({ "name": "Mystery", "typeId": 9999, "status": "Inactive" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "EquipmentType not found with id: 9999");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_maintenance_activates_equipment(pool: PgPool) {
    let boiler = type_id(&pool, "Boiler").await;
    let (_, created) = create(&pool, json!({ "name": "Boiler 1", "typeId": boiler, "status": "Inactive" })).await;
    let id = created["id"].as_i64().unwrap();
    let date = Utc::now().date_naive() - Duration::days(2);

    let response = send(
        build_app(pool.clone()),
        Method::POST,
        "/api/maintenance",
        Some(json!({ "equipmentId": id, "maintenanceDate": date, "performedBy": " Team A ", "notes": "Flushed lines" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let log = body_json(response).await;
    assert_eq!(log["equipmentName"], "Boiler 1");
    assert_eq!(log["performedBy"], "Team A");

    let equipment = body_json(get(build_app(pool.clone()), &format!("/api/equipment/{}", id)).await).await;
    assert_eq!(equipment["status"], "Active");
    assert_eq!(equipment["lastCleanedDate"], json!(date));

    let history = body_json(get(build_app(pool.clone()), &format!("/api/equipment/{}/maintenance", id)).await).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let response = send(
        build_app(pool.clone()),
        Method::POST,
        "/api/maintenance",
        Some(json!({ "equipmentId": 424242, "maintenanceDate": date, "performedBy": "Team A" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_delete_cascades_history(pool: PgPool) {
    let chiller = type_id(&pool, "Chiller").await;
    let (_, created) = create(&pool, json!({ "name": "Chiller 1", "typeId": chiller, "status": "Inactive" })).await;
    let id = created["id"].as_i64().unwrap();
    let date = Utc::now().date_naive();

    send(
        build_app(pool.clone()),
        Method::POST,
        "/api/maintenance",
        Some(json!({ "equipmentId": id, "maintenanceDate": date, "performedBy": "Team B" })),
    )
    .await;

    let response = send(build_app(pool.clone()), Method::DELETE, &format!("/api/equipment/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_logs WHERE equipment_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let response = get(build_app(pool.clone()), &format!("/api/equipment/{}/maintenance", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_list_filters_sorts_and_pages(pool: PgPool) {
    let air = type_id(&pool, "Air Handler").await;
    let pump = type_id(&pool, "Pump").await;
    for (name, type_id) in [
        ("Air Handler Unit 2", air),
        ("Air Handler Unit 1", air),
        ("Air Handler Unit 3", air),
        ("Pump 100% duty", pump),
    ] {
        let (status, _) = create(&pool, json!({ "name": name, "typeId": type_id, "status": "Inactive" })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let page = body_json(
        get(
            build_app(pool.clone()),
            "/api/equipment?search=air%20handler&status=Inactive&page=0&size=2&sortBy=name&sortDir=asc",
        )
        .await,
    )
    .await;
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["last"], false);
    let names: Vec<&str> = page["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Air Handler Unit 1", "Air Handler Unit 2"]);

    let page = body_json(get(build_app(pool.clone()), "/api/equipment?search=100%25").await).await;
    assert_eq!(page["totalElements"], 1);

    let page = body_json(get(build_app(pool.clone()), "/api/equipment?status=&search=").await).await;
    assert_eq!(page["totalElements"], 4);

    let page = body_json(get(build_app(pool.clone()), "/api/equipment?status=Active").await).await;
    assert_eq!(page["totalElements"], 0);
    assert_eq!(page["content"], json!([]));

    let types = body_json(get(build_app(pool.clone()), "/api/equipment-types").await).await;
    assert_eq!(types[0]["name"], "Air Handler");
}
