use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
};
use axum_extra::extract::{
    WithRejection,
    cookie::{Cookie, SameSite, SignedCookieJar},
};
use services::services::auth::{
    AdminSession, AuthError, AuthService, LoginRequest, SESSION_COOKIE_NAME, SESSION_MAX_AGE_SECS,
};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, middleware::AuthenticatedAdmin};

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(SESSION_MAX_AGE_SECS))
        .secure(secure)
        .build()
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(SignedCookieJar, ResponseJson<ApiResponse<AdminSession>>), ApiError> {
    let session = AuthService::login(&state.db().pool, &payload).await?;
    let value = session.encode().map_err(AuthError::from)?;

    let jar = jar.add(session_cookie(value, state.config().session_secure));
    Ok((jar, ResponseJson(ApiResponse::success(session))))
}

/// POST /api/auth/logout
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, ResponseJson<ApiResponse<()>>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (jar, ResponseJson(ApiResponse::success(())))
}

/// GET /api/auth/session
pub async fn current_session(
    AuthenticatedAdmin(session): AuthenticatedAdmin,
) -> ResponseJson<ApiResponse<AdminSession>> {
    ResponseJson(ApiResponse::success(session))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current_session))
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use serde_json::json;
    use services::services::config::Config;

    use crate::test_support::{
        admin_cookie, app, app_with_config, body_json, get, json_request, send,
    };

    #[tokio::test]
    async fn test_login_sets_hardened_cookie() {
        let (app, _db) = app().await;
        let response = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                &json!({"username": "admin", "password": "admin123"}),
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
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("admin-session="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=604800"));
        assert!(!set_cookie.contains("Secure"));

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["username"], "admin");
    }

    #[tokio::test]
    async fn test_secure_cookie_when_configured() {
        let (app, _db) = app_with_config(Config {
            session_secure: true,
            ..Config::default()
        })
        .await;
        let response = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                &json!({"username": "admin", "password": "admin123"}),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("admin-session="));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let (app, _db) = app().await;

        let wrong = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                &json!({"username": "admin", "password": "letmein"}),
                None,
            ),
        )
        .await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(wrong).await["message"],
            "Invalid username or password"
        );

        let missing = send(
            &app,
            json_request("POST", "/api/auth/login", &json!({"username": "admin"}), None),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_session_requires_valid_cookie() {
        let (app, _db) = app().await;

        let anonymous = send(&app, get("/api/auth/session", None)).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(anonymous).await["message"], "Unauthorized");

        // An unsigned cookie carrying a made-up session is ignored.
        let forged = r#"admin-session={"userId":"00000000-0000-0000-0000-000000000000","username":"admin"}"#;
        let response = send(&app, get("/api/auth/session", Some(forged))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let cookie = admin_cookie(&app).await;
        let response = send(&app, get("/api/auth/session", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["username"], "admin");
    }

    #[tokio::test]
    async fn test_logout_expires_cookie() {
        let (app, _db) = app().await;
        let response = send(&app, json_request("POST", "/api/auth/logout", &json!({}), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("admin-session="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
