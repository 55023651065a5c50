#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::routing::post;
use deepword::{Credentials, DeepWordSession, TransportConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-api-key";
pub const SECRET_KEY: &str = "test-secret-key";

/// ローカルで動くモックの DeepWord サーバー
///
/// 受け付けたリクエスト数を数える。/check_apikey は常に登録される。
pub struct MockServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    /// `routes` にはベースURL（ダウンロード用の絶対URL組み立てに使う）が渡される
    pub async fn start(routes: impl FnOnce(&str) -> Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let app = routes(&base_url)
            .route("/check_apikey", post(check_apikey))
            .layer(middleware::from_fn(move |req: Request, next: Next| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    next.run(req).await
                }
            }));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, hits }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(&self.base_url).with_connect_timeout(Duration::from_secs(2))
    }

    pub async fn connect(&self) -> DeepWordSession {
        let credentials = Credentials::new(API_KEY, SECRET_KEY).unwrap();
        DeepWordSession::connect(credentials, self.transport())
            .await
            .unwrap()
    }
}

/// 正しいキーが api_key / secret_key / secerat_key で届いたときだけ成功
async fn check_apikey(headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let success = header("api_key") == Some(API_KEY)
        && header("secret_key") == Some(SECRET_KEY)
        && header("secerat_key") == Some(SECRET_KEY);
    Json(json!({ "success": success }))
}
