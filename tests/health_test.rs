use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::util::ServiceExt;

async fn get(uri: &str) -> anyhow::Result<(StatusCode, Option<String>, String)> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .map_err(|e| anyhow::anyhow!("Failed to build request: {}", e))?;

    let response = pocket_ledger::health::router()
        .oneshot(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to execute request: {}", e))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, content_type, String::from_utf8(body.to_vec())?))
}

#[tokio::test]
async fn test_health_returns_ok() -> anyhow::Result<()> {
    let (status, content_type, body) = get("/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(body, "OK");

    Ok(())
}

#[tokio::test]
async fn test_other_paths_are_not_found() -> anyhow::Result<()> {
    for uri in ["/", "/healthz", "/health/extra"] {
        let (status, _, _) = get(uri).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
    }

    Ok(())
}
