//! Tests for the batch endpoint.

use std::collections::HashMap;

use axum::{extract::State, response::IntoResponse, Json};
use marketlink::{
    model::listing::{BatchRequestDto, BatchResultDto},
    server::{controller::sync::push_batch, tenant::TenantContext},
};
use serde_json::{json, Value};

use super::*;

fn row(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

/// Tests a batch with one unknown code and one invalid row.
///
/// Expected: 200 OK reporting successes and both failures
#[tokio::test]
async fn reports_partial_failures() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-1", 10.0)
        .with_product(1, "SKU-2", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;
    let (state, _) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let payload = BatchRequestDto {
        channel_ids: vec![1],
        rows: vec![
            row(json!({ "code": "SKU-1", "price": 11.5 })),
            row(json!({ "sku": "SKU-404", "price": "12,00" })),
            row(json!({ "codigo": "SKU-2", "preco": "13,90", "estoque": 2 })),
            row(json!({ "code": "SKU-2" })),
        ],
    };

    let resp = push_batch(State(state), TenantContext::new(1), Json(payload))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: BatchResultDto = json_body(resp).await;
    assert_eq!(result.succeeded, 2);
    assert_eq!(result.failed, 2);

    let mut failed_rows: Vec<_> = result.failures.iter().filter_map(|f| f.row).collect();
    failed_rows.sort();
    assert_eq!(failed_rows, vec![1, 3]);

    let unknown = result.failures.iter().find(|f| f.row == Some(1)).unwrap();
    assert_eq!(unknown.code.as_deref(), Some("SKU-404"));

    Ok(())
}

/// Tests a batch that hits a tenant isolation defect.
///
/// Expected: 500 Internal Server Error instead of a success report
#[tokio::test]
async fn invariant_violation_returns_internal_error() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_organization("org_2")
        .with_product(1, "SKU-1", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;
    test.catalog()
        .insert_link(
            2,
            1,
            1,
            Some("X-1"),
            entity::listing_link::SyncStatus::Active,
        )
        .await?;
    let (state, _) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let payload = BatchRequestDto {
        channel_ids: vec![1],
        rows: vec![row(json!({ "code": "SKU-1", "price": 11.5 }))],
    };

    let resp = push_batch(State(state), TenantContext::new(1), Json(payload))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
