// HTTP endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::db::Storage;
use crate::seed;

// Fleet size seeded by `GET /seed`.
const SEED_CUSTOMERS: usize = 10;
const SEED_DEVICES_PER_CUSTOMER: usize = 15;

#[derive(Debug, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

pub fn router(storage: Storage) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/seed", get(seed_handler))
        .route("/api/v1/organizations", get(list_organizations))
        .route("/api/v1/devices", get(list_devices))
        .route("/api/v1/firmware/compliance", get(firmware_compliance))
        .with_state(storage)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Meraki Reporting",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Replace the stored fleet with a freshly generated one.
///
/// GET /seed
async fn seed_handler(State(storage): State<Storage>) -> impl IntoResponse {
    match seed::seed_database(&storage, SEED_CUSTOMERS, SEED_DEVICES_PER_CUSTOMER).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({
                "message": "Database seeded successfully",
                "summary": summary,
            })),
        ),
        Err(e) => {
            log::error!("seeding failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

/// Distinct customers, numbered in name order.
///
/// GET /api/v1/organizations
async fn list_organizations(State(storage): State<Storage>) -> impl IntoResponse {
    match storage.customers().await {
        Ok(customers) => {
            let organizations: Vec<Organization> = customers
                .into_iter()
                .enumerate()
                .map(|(index, name)| Organization {
                    id: format!("org_{}", index + 1),
                    name,
                })
                .collect();
            (StatusCode::OK, Json(json!(organizations)))
        }
        Err(e) => {
            log::error!("failed to list organizations: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to list organizations" })),
            )
        }
    }
}

/// GET /api/v1/devices
async fn list_devices(State(storage): State<Storage>) -> impl IntoResponse {
    match storage.all_devices().await {
        Ok(devices) => (StatusCode::OK, Json(json!(devices))),
        Err(e) => {
            log::error!("failed to list devices: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to list devices" })),
            )
        }
    }
}

/// GET /api/v1/firmware/compliance
async fn firmware_compliance(State(storage): State<Storage>) -> impl IntoResponse {
    match seed::compliance_summary(&storage).await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))),
        Err(e) => {
            log::error!("failed to compute firmware compliance: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to compute firmware compliance" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_storage;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_root() {
        let app = router(memory_storage().await);
        let (status, body) = get_json(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Meraki Reporting");
    }

    #[tokio::test]
    async fn test_organizations_empty_before_seed() {
        let app = router(memory_storage().await);
        let (status, body) = get_json(&app, "/api/v1/organizations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_seed_then_list() {
        let app = router(memory_storage().await);

        let (status, body) = get_json(&app, "/seed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["devices"], 150);
        assert_eq!(body["summary"]["customers"].as_array().unwrap().len(), 10);

        let (status, body) = get_json(&app, "/api/v1/organizations").await;
        assert_eq!(status, StatusCode::OK);
        let organizations = body.as_array().unwrap();
        assert_eq!(organizations.len(), 10);
        assert_eq!(organizations[0]["id"], "org_1");
        assert_eq!(organizations[0]["name"], "Acme Corporation");
        assert_eq!(organizations[9]["id"], "org_10");

        let (status, body) = get_json(&app, "/api/v1/devices").await;
        assert_eq!(status, StatusCode::OK);
        let devices = body.as_array().unwrap();
        assert_eq!(devices.len(), 150);
        assert!(devices[0]["networkId"].as_str().unwrap().starts_with("N_"));
        assert!(devices[0].get("productType").is_some());

        let (status, body) = get_json(&app, "/api/v1/firmware/compliance").await;
        assert_eq!(status, StatusCode::OK);
        let total: u64 = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["total"].as_u64().unwrap())
            .sum();
        assert_eq!(total, 150);
    }

    #[tokio::test]
    async fn test_seed_failure_is_reported() {
        let storage = memory_storage().await;
        let app = router(storage.clone());
        storage.close().await.unwrap();

        let (status, body) = get_json(&app, "/seed").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }
}
