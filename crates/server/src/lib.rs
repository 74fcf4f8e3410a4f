use std::sync::Arc;

use axum::{Router, extract::FromRef};
use axum_extra::extract::cookie::Key;
use db::DBService;
use services::services::config::{Config, ConfigError};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod middleware;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    db: DBService,
    config: Arc<Config>,
    session_key: Key,
}

impl AppState {
    /// Without a configured secret a random key is generated, so sessions
    /// end when the process restarts.
    pub fn new(db: DBService, config: Config) -> Result<Self, ConfigError> {
        let session_key = match config.session_secret.as_deref() {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|_| ConfigError::SessionSecretTooShort)?,
            None => Key::generate(),
        };

        Ok(Self {
            db,
            config: Arc::new(config),
            session_key,
        })
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::rooms::router())
        .merge(routes::bookings::router())
        .merge(routes::customers::router())
        .merge(routes::dashboard::router())
        .merge(routes::reports::router())
        .merge(routes::content::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use db::{DBService, models::admin_user::AdminUser};
    use serde_json::Value;
    use services::services::config::Config;
    use tower::ServiceExt;

    use super::{AppState, router};

    pub async fn app() -> (Router, DBService) {
        app_with_config(Config::default()).await
    }

    pub async fn app_with_config(config: Config) -> (Router, DBService) {
        let db = DBService::new_in_memory().await.unwrap();
        // Low cost keeps the suite fast.
        let hash = bcrypt::hash("admin123", 4).unwrap();
        AdminUser::upsert(&db.pool, "admin", &hash).await.unwrap();
        let state = AppState::new(db.clone(), config).unwrap();
        (router(state), db)
    }

    pub fn json_request(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Logs in as the seeded admin and returns the `name=value` cookie pair.
    pub async fn admin_cookie(app: &Router) -> String {
        let response = send(
            app,
            json_request(
                "POST",
                "/api/auth/login",
                &serde_json::json!({"username": "admin", "password": "admin123"}),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }
}
