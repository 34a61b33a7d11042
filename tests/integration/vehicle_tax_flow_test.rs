// Integration test: catalog edits flow through to tax assessments
//
// Create a vehicle, assess it at several ownership ranks, change its
// assessed value, reassess, then delete it and confirm assessment fails.

#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::test;
use rust_decimal_macros::dec;
use serde_json::Value;

use helpers::{decimal_field, vehicle_service, TestDataFactory};

#[actix_web::test]
async fn test_vehicle_tax_lifecycle() {
    let app = init_app!().await;

    let req = test::TestRequest::post()
        .uri("/vehicles")
        .set_json(TestDataFactory::vario_payload())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    // Default rank is the first ownership
    let req = test::TestRequest::get()
        .uri(&format!("/vehicles/{}/tax", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(decimal_field(&body, "total_tax"), dec!(555000));
    assert_eq!(decimal_field(&body, "progressive_surcharge"), dec!(0));

    let req = test::TestRequest::get()
        .uri(&format!("/vehicles/{}/tax?ownership_rank=3", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(decimal_field(&body, "base_rate"), dec!(32));
    assert_eq!(decimal_field(&body, "total_tax"), dec!(915000));

    // Doubling the assessed value doubles the vehicle tax
    let req = test::TestRequest::put()
        .uri(&format!("/vehicles/{}", id))
        .set_json(TestDataFactory::vehicle_payload("Vario 125", "Matic", 36_000_000))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/vehicles/{}/tax?ownership_rank=3", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(decimal_field(&body, "vehicle_tax"), dec!(1440000));

    let req = test::TestRequest::delete()
        .uri(&format!("/vehicles/{}", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/vehicles/{}/tax", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_invalid_rank_query_returns_400() {
    let app = init_app!().await;

    let req = test::TestRequest::post()
        .uri("/vehicles")
        .set_json(TestDataFactory::vario_payload())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    for rank in ["0", "-2", "1.5", "abc"] {
        let req = test::TestRequest::get()
            .uri(&format!("/vehicles/{}/tax?ownership_rank={}", id, rank))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "rank {}", rank);
    }
}

#[actix_web::test]
async fn test_invalid_rank_query_message_is_flat() {
    let app = init_app!().await;

    let req = test::TestRequest::post()
        .uri("/vehicles")
        .set_json(TestDataFactory::vario_payload())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/vehicles/{}/tax?ownership_rank=0", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"]["message"],
        "Validation error: Invalid query parameter: Ownership rank must be at least 1"
    );
}

#[actix_web::test]
async fn test_service_shared_across_app_instances() {
    // Two app instances over one service observe the same catalog
    let service = vehicle_service();
    let writer = init_app!(service.clone()).await;
    let reader = init_app!(service).await;

    let name = TestDataFactory::random_vehicle_name();
    let req = test::TestRequest::post()
        .uri("/vehicles")
        .set_json(TestDataFactory::vehicle_payload(&name, "Sport", 40_000_000))
        .to_request();
    let created: Value = test::call_and_read_body_json(&writer, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/vehicles/{}", created["id"]))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&reader, req).await;
    assert_eq!(fetched["name"], name.as_str());
}
