use std::time::Duration;

use axum::{body::Body, http::Request};
use nerkh_server::{api::app_router, build_state, config::Config};
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works() {
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        bonbast_url: "http://127.0.0.1:9".to_string(),
        crypto_url: "http://127.0.0.1:9/v1/markets".to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_secs(10),
        cache_ttl: Duration::from_secs(1800),
    };
    let state = build_state(&config);
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
