#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::Utc;
use shortlink::api::middleware::rate_limit::CreationRateLimiter;
use shortlink::application::services::LinkService;
use shortlink::domain::entities::Link;
use shortlink::domain::repositories::LinkStore;
use shortlink::error::AppError;
use shortlink::infrastructure::qr::QrCodeGenerator;
use shortlink::infrastructure::store::MemoryLinkStore;
use shortlink::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const TEST_BASE_URL: &str = "http://localhost:8080";

pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    create_test_state_with_window(Duration::from_secs(5))
}

pub fn create_test_state_with_window(window: Duration) -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let state = create_test_state_with_store(store.clone(), window);
    (state, store)
}

pub fn create_test_state_with_store(store: Arc<dyn LinkStore>, window: Duration) -> AppState {
    AppState::new(
        Arc::new(LinkService::new(store, TEST_BASE_URL)),
        Arc::new(QrCodeGenerator::default()),
        Arc::new(CreationRateLimiter::new(window, 1_000)),
        false,
    )
}

pub async fn create_test_link(store: &MemoryLinkStore, code: &str, url: &str) -> Link {
    let link = Link::new(code.to_string(), url.to_string(), Utc::now());
    assert!(store.insert(&link).await.unwrap());
    link
}

/// A store whose backend is down.
pub struct UnreachableStore;

fn unavailable() -> AppError {
    AppError::internal("Store unavailable", serde_json::json!({}))
}

#[async_trait]
impl LinkStore for UnreachableStore {
    async fn get(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn exists(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn insert(&self, _link: &Link) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn increment_hits(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> bool {
        false
    }
}

/// Inserts `ConnectInfo` the way `into_make_service_with_connect_info` does.
#[derive(Clone)]
pub struct MockConnectInfoLayer {
    addr: SocketAddr,
}

impl MockConnectInfoLayer {
    pub fn new(addr: &str) -> Self {
        Self {
            addr: addr.parse().unwrap(),
        }
    }
}

impl Default for MockConnectInfoLayer {
    fn default() -> Self {
        Self::new("127.0.0.1:12345")
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
