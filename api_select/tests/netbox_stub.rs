//! Dynamic selects talking to a stub REST API over real HTTP.

use std::sync::Arc;

use api_select::{ApiClientConfig, DynamicSelect, HttpOptionFetcher, LoadError, LoadOutcome, SelectAttributes, SelectRegistry};
use axum::{Json, Router, extract::State, http::{StatusCode, Uri}, response::IntoResponse, routing::get};
use common::api_option::ApiOption;
use common::query_params::QueryValue;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};

#[derive(Clone, Default)]
struct StubState {
    calls: Arc<Mutex<Vec<String>>>,
}

struct NetboxStub {
    base_url: String,
    calls: Arc<Mutex<Vec<String>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for NetboxStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn record(state: &StubState, uri: &Uri) {
    state.calls.lock().await.push(uri.to_string());
}

async fn sites(State(state): State<StubState>, uri: Uri) -> impl IntoResponse {
    record(&state, &uri).await;
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{"id": 1, "display": "DC1"}]
    }))
}

async fn broken(State(state): State<StubState>, uri: Uri) -> impl IntoResponse {
    record(&state, &uri).await;
    (StatusCode::INTERNAL_SERVER_ERROR, "Server Error (500)")
}

async fn garbage(State(state): State<StubState>, uri: Uri) -> impl IntoResponse {
    record(&state, &uri).await;
    "<html>login required</html>"
}

async fn start_stub() -> anyhow::Result<NetboxStub> {
    let state = StubState::default();
    let calls = state.calls.clone();
    let app = Router::new()
        .route("/api/dcim/sites/", get(sites))
        .route("/api/dcim/devices/", get(sites))
        .route("/api/dcim/broken/", get(broken))
        .route("/api/dcim/garbage/", get(garbage))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        let _ = server.await;
    });

    Ok(NetboxStub {
        base_url: format!("http://{addr}"),
        calls,
        shutdown: Some(shutdown_tx),
    })
}

fn fetcher_for(stub: &NetboxStub) -> HttpOptionFetcher {
    HttpOptionFetcher::new(ApiClientConfig::new(stub.base_url.clone())).expect("http fetcher")
}

#[tokio::test]
async fn static_params_and_search_reach_the_api() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let fetcher = fetcher_for(&stub);
    let mut select = DynamicSelect::new(
        &SelectAttributes::new("site")
            .with_url("/api/dcim/sites/")
            .with_static_params(r#"[{"queryParam": "region_id", "queryValue": [5]}]"#),
    );

    let outcome = select.load(&fetcher, "dc").await.expect("widget has a url");

    assert!(matches!(outcome, LoadOutcome::Applied { count: 1 }));
    assert_eq!(stub.calls.lock().await.as_slice(), ["/api/dcim/sites/?region_id=5&brief=true&q=dc"]);
    assert_eq!(select.options(), &[ApiOption::new(1, "DC1")]);
    assert!(!select.is_loading());
    Ok(())
}

#[tokio::test]
async fn static_null_filter_reaches_the_api() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let fetcher = fetcher_for(&stub);
    let mut select = DynamicSelect::new(
        &SelectAttributes::new("devices")
            .with_url("/api/dcim/devices/")
            .with_static_params(r#"[{"queryParam": "virtual_chassis_id", "queryValue": "null"}]"#),
    );

    select.load(&fetcher, "").await.expect("widget has a url");

    assert_eq!(stub.calls.lock().await.as_slice(), ["/api/dcim/devices/?virtual_chassis_id=null&brief=true"]);
    Ok(())
}

#[tokio::test]
async fn server_error_yields_no_options() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let fetcher = fetcher_for(&stub);
    let mut select = DynamicSelect::new(&SelectAttributes::new("site").with_url("/api/dcim/broken/"));

    let outcome = select.load(&fetcher, "dc").await.expect("widget has a url");

    match outcome {
        LoadOutcome::Failed(LoadError::Http { status, .. }) => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(select.options().is_empty());
    assert!(!select.is_loading());
    Ok(())
}

#[tokio::test]
async fn undecodable_body_yields_no_options() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let fetcher = fetcher_for(&stub);
    let mut select = DynamicSelect::new(&SelectAttributes::new("site").with_url("/api/dcim/garbage/"));

    let outcome = select.load(&fetcher, "").await.expect("widget has a url");

    assert!(matches!(outcome, LoadOutcome::Failed(LoadError::Decode { .. })));
    assert!(select.options().is_empty());
    Ok(())
}

#[tokio::test]
async fn no_static_params_requests_brief_only() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let fetcher = fetcher_for(&stub);
    let mut select = DynamicSelect::new(&SelectAttributes::from_attributes("site", [("data-url", "/api/dcim/sites/")]));
    assert!(select.static_params().is_empty());
    assert!(select.query_params().is_empty());

    select.load(&fetcher, "").await.expect("widget has a url");

    assert_eq!(stub.calls.lock().await.as_slice(), ["/api/dcim/sites/?brief=true"]);
    Ok(())
}

#[tokio::test]
async fn unreachable_api_yields_no_options() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let base_url = stub.base_url.clone();
    drop(stub);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let fetcher = HttpOptionFetcher::new(ApiClientConfig::new(base_url))?;
    let mut select = DynamicSelect::new(&SelectAttributes::new("site").with_url("/api/dcim/sites/"));
    let outcome = select.load(&fetcher, "").await.expect("widget has a url");

    assert!(matches!(outcome, LoadOutcome::Failed(LoadError::Network { .. })));
    assert!(select.options().is_empty());
    Ok(())
}

#[tokio::test]
async fn dependent_select_reloads_after_field_change() -> anyhow::Result<()> {
    let stub = start_stub().await?;
    let fetcher = fetcher_for(&stub);
    let mut registry = SelectRegistry::initialize([
        SelectAttributes::new("region").with_url("/api/dcim/regions/"),
        SelectAttributes::new("site")
            .with_url("/api/dcim/sites/")
            .with_static_params(r#"[{"queryParam": "status", "queryValue": "active"}]"#)
            .with_filter_fields(r#"[{"queryParam": "region_id", "fieldName": "region", "includeNull": true}]"#),
    ]);

    registry.get_mut("site").unwrap().load(&fetcher, "").await;
    registry.refresh_dependents(&fetcher, "region", &[QueryValue::Int(3), QueryValue::Int(4)]).await;

    assert_eq!(
        stub.calls.lock().await.as_slice(),
        [
            "/api/dcim/sites/?status=active&region_id=null&brief=true",
            "/api/dcim/sites/?status=active&region_id=3&region_id=4&brief=true",
        ]
    );
    assert_eq!(registry.get("site").unwrap().options().len(), 1);
    Ok(())
}
