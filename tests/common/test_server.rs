use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use tempfile::TempDir;
use tower::ServiceExt;

use jotter::auth::PasswordHasher;
use jotter::config::{RetentionPolicy, SessionConfig};
use jotter::server::{AppState, ImageBank, create_router};
use jotter::store::{SqliteSessionStore, SqliteStore, Store};
use jotter::types::User;

pub const PASSWORD: &str = "secret123";
const SECRET: &str = "integration-test-session-secret";

/// An in-process server with three accounts: `alice`, `bob` and `test`.
/// `test` is the retention account. All share [`PASSWORD`].
pub struct TestServer {
    pub temp_dir: TempDir,
    pub store: Arc<SqliteStore>,
    pub alice: User,
    pub bob: User,
    pub tester: User,
    router: Router,
}

impl TestServer {
    pub fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(SqliteStore::new(temp_dir.path().join("jotter.db")).expect("open db"));
        store.initialize().expect("initialize db");

        let digest = PasswordHasher::new().hash(PASSWORD).expect("hash password");
        let alice = store.create_user("alice", &digest).expect("create alice");
        let bob = store.create_user("bob", &digest).expect("create bob");
        let tester = store.create_user("test", &digest).expect("create tester");

        let static_dir = temp_dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("img")).expect("create image dir");
        std::fs::write(static_dir.join("img").join("lake.jpg"), b"jpg").expect("write image");

        let state = Arc::new(AppState {
            store: store.clone(),
            images: ImageBank::load(&static_dir.join("img")).expect("load images"),
            retention: RetentionPolicy::for_account(tester.id),
            static_dir,
        });

        let session_config = SessionConfig {
            secret: SECRET.to_string(),
            ..SessionConfig::default()
        };
        let router = create_router(
            state,
            SqliteSessionStore::new(store.clone()),
            &session_config,
        )
        .expect("create router");

        Self {
            temp_dir,
            store,
            alice,
            bob,
            tester,
            router,
        }
    }

    /// A browser-like client with its own cookie.
    pub fn client(&self) -> Client<'_> {
        Client {
            router: &self.router,
            cookie: None,
        }
    }
}

pub struct Client<'a> {
    router: &'a Router,
    pub cookie: Option<String>,
}

impl Client<'_> {
    pub async fn get(&mut self, path: &str) -> Response<Body> {
        let request = self.request("GET", path).body(Body::empty()).expect("build request");
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, form: &str) -> Response<Body> {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("build request");
        self.send(request).await
    }

    pub async fn log_in(&mut self, name: &str) {
        let response = self
            .post_form("/login", &format!("name={name}&password={PASSWORD}"))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));
        assert!(self.cookie.is_some(), "login should set a session cookie");
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().trim();
            let removed = set_cookie.contains("Max-Age=0") || pair.ends_with('=');
            self.cookie = if removed { None } else { Some(pair.to_string()) };
        }

        response
    }
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
