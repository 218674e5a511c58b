//! HTTP tests for the public configurator endpoints.
//!
//! None of these touch the database.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get, post_json};
use serde_json::json;

#[tokio::test]
async fn pricing_returns_the_catalog_in_declaration_order() {
    let response = get(common::build_offline_app(), "/api/v1/houses/pricing").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    let at = |needle: &str| {
        body.find(needle)
            .unwrap_or_else(|| panic!("{needle} missing from {body}"))
    };
    assert!(at("\"locations\"") < at("\"styles\""));
    assert!(at("\"styles\"") < at("\"landscapeTypes\""));
    assert!(at("\"Mountains\"") < at("\"NYC\""));
    assert!(at("\"NYC\"") < at("\"Countryside\""));
    assert!(at("\"White\"") < at("\"Beige\""));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let pricing = &json["pricing"];
    assert_eq!(pricing["locations"]["NYC"], 1_200_000.0);
    assert_eq!(pricing["squareFootRate"], 150.0);
    assert_eq!(pricing["amenities"]["garageExtraSpaceRate"], 15_000.0);
    assert_eq!(pricing["landscapeTypes"]["Lush Garden"], 35_000.0);
}

#[tokio::test]
async fn rules_are_published() {
    let response = get(common::build_offline_app(), "/api/v1/houses/rules").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    // Rule objects keep their field order: kind first, then field.
    assert!(body.starts_with(r#"{"rules":{"location":[{"key":"Desert","rules":[{"kind":"#));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let desert = &json["rules"]["location"][0];
    assert_eq!(desert["key"], "Desert");
    assert_eq!(desert["rules"][0]["kind"], "incompatibility");
    assert_eq!(json["rules"]["amenities"][0]["amenity"], "pool");
}

#[tokio::test]
async fn calculate_price_accepts_form_state() {
    let body = json!({
        "location": "Mountains",
        "style": "",
        "square_feet": "1000",
        "flooring_type": "Marble",
        "bedrooms": "",
        "has_pool": false
    });
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/houses/calculate-price",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["price"], 500_000.0 + 150_000.0 + 15_000.0);
    let components: Vec<&str> = json["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["component"].as_str().unwrap())
        .collect();
    assert_eq!(components, ["location", "square_footage", "flooring"]);
}

#[tokio::test]
async fn calculate_price_of_nothing_is_zero() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/houses/calculate-price",
        json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["price"], 0.0);
    assert_eq!(json["breakdown"], json!([]));
}

#[tokio::test]
async fn validate_reports_errors_with_camel_case_flag() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/houses/validate",
        json!({ "location": "Desert", "landscape_type": "Tropical" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["isValid"], false);
    assert_eq!(json["errors"][0]["field"], "landscape_type");
    assert_eq!(json["warnings"], json!([]));
}

#[tokio::test]
async fn validate_passes_with_warnings() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/houses/validate",
        json!({ "location": "Desert", "has_pool": true }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["isValid"], true);
    assert_eq!(json["warnings"][0]["field"], "has_pool");
}

#[tokio::test]
async fn disabled_options_for_nyc_modern() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/houses/disabled-options",
        json!({ "location": "NYC", "style": "Modern" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["disabledOptions"],
        json!({
            "landscape_type": [],
            "roof_type": ["Gambrel", "Mansard"],
            "style": ["Ranch"],
            "exterior_color": [],
            "kitchen_style": ["Rustic", "Farmhouse"]
        })
    );
}

#[tokio::test]
async fn configurator_endpoints_need_no_token() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/houses/validate",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
