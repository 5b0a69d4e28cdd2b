// End-to-end through the env-configured server and a seeded memory backend.
use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use meshview_api::build_api_server_from_env;
use serde_json::{Value, json};
use serial_test::serial;
use std::{
    env,
    path::{Path, PathBuf},
};
use tower::ServiceExt;

fn write_seed(name: &str) -> Result<PathBuf> {
    let seed = json!({
        "namespaces": [
            {
                "name": "bookinfo",
                "cluster": "Kubernetes",
                "labels": {"istio-injection": "enabled"}
            },
            {"name": "default", "cluster": "Kubernetes"},
            {"name": "bookinfo", "cluster": "east"}
        ],
        "validations": [
            {
                "name": "reviews",
                "objectType": "networking.istio.io/v1, Kind=VirtualService",
                "namespace": "bookinfo",
                "cluster": "Kubernetes",
                "valid": false,
                "checks": [
                    {
                        "code": "KIA1101",
                        "message": "DestinationWeight on route doesn't have a valid service",
                        "severity": "error",
                        "path": "spec/http[0]/route[0]/destination/host"
                    },
                    {
                        "code": "KIA1106",
                        "message": "More than one Virtual Service for same host",
                        "severity": "warning",
                        "path": "spec/hosts"
                    }
                ]
            },
            {
                "name": "reviews",
                "objectType": "networking.istio.io/v1, Kind=DestinationRule",
                "namespace": "bookinfo",
                "cluster": "east",
                "checks": [
                    {
                        "message": "This subset's labels are not found in any matching host",
                        "severity": "error"
                    }
                ]
            }
        ]
    });
    let path = env::temp_dir().join(format!(
        "meshview-seed-{}-{}.json",
        name,
        std::process::id()
    ));
    std::fs::write(&path, serde_json::to_vec(&seed)?)?;
    Ok(path)
}

async fn create_app(seed: &Path) -> Result<Router> {
    unsafe {
        env::set_var("BACKEND_SEED_PATH", seed);
        env::set_var("HOME_CLUSTER", "Kubernetes");
        env::set_var("SERVER_PORT", "0");
    }
    let server = build_api_server_from_env().await?;
    Ok(server.into_router())
}

fn clear_env() {
    unsafe {
        env::remove_var("BACKEND_SEED_PATH");
        env::remove_var("HOME_CLUSTER");
        env::remove_var("SERVER_PORT");
    }
}

async fn call(
    app: &Router,
    request: Request<Body>,
) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

#[tokio::test]
#[serial]
async fn health_endpoint() -> Result<()> {
    let seed = write_seed("health")?;
    let app = create_app(&seed).await?;

    let (status, body) = call(
        &app,
        Request::builder().uri("/health").body(Body::empty())?,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "meshview-api");
    assert!(body["timestamp"].is_string());

    clear_env();
    std::fs::remove_file(seed)?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn seeded_namespaces_and_validations() -> Result<()> {
    let seed = write_seed("summaries")?;
    let app = create_app(&seed).await?;

    let (status, body) = call(
        &app,
        Request::builder().uri("/api/namespaces").body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = call(
        &app,
        Request::builder()
            .uri("/api/istio/validations?namespaces=bookinfo,default")
            .body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "bookinfo": {"errors": 1, "warnings": 1, "objectCount": 1},
            "default": {"errors": 0, "warnings": 0, "objectCount": 0}
        })
    );

    let (status, body) = call(
        &app,
        Request::builder()
            .uri("/api/namespaces/bookinfo/validations?cluster=east")
            .body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"errors": 1, "warnings": 0, "objectCount": 1}));

    clear_env();
    std::fs::remove_file(seed)?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn patch_round_trip_through_memory_backend() -> Result<()> {
    let seed = write_seed("patch")?;
    let app = create_app(&seed).await?;

    let (status, body) = call(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/api/namespaces/bookinfo")
            .body(Body::from(
                r#"{"metadata":{"labels":{"x":"y","istio-injection":null}}}"#,
            ))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labels"], json!({"x": "y"}));

    let (status, body) = call(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/api/clusters/east/namespaces/missing")
            .body(Body::from("{}"))?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = call(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/api/namespaces/bookinfo")
            .body(Body::from("not json"))?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    clear_env();
    std::fs::remove_file(seed)?;
    Ok(())
}
