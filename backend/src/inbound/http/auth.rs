//! Login, logout and session lookup endpoints.
//!
//! ```text
//! POST /api/v1/auth/login   {"password":"..."}  -> {"role":"admin"} + Set-Cookie
//! POST /api/v1/auth/logout                      -> {"success":true}  + expired cookie
//! GET  /api/v1/auth/session                     -> {"role":"guest"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Password, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RoleSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body. A missing password is treated as an empty one.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Role reported by login and session lookup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    #[schema(value_type = RoleSchema)]
    pub role: Role,
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(crate) const fn ok() -> Self {
        Self { success: true }
    }
}

/// Exchange a role password for a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = RoleResponse,
            headers(("Set-Cookie" = String, description = "admin_session role cookie"))),
        (status = 401, description = "Access denied", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let password = Password::new(payload.into_inner().password);
    let role = state.login.authenticate(&password).await?;
    Ok(HttpResponse::Ok()
        .cookie(state.session_cookie.issue(role))
        .json(RoleResponse { role }))
}

/// Clear the session cookie. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Cookie cleared", body = SuccessResponse,
            headers(("Set-Cookie" = String, description = "Expired admin_session cookie")))
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.session_cookie.clear())
        .json(SuccessResponse::ok())
}

/// Report the role resolved from the caller's cookie.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Current role", body = RoleResponse)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/auth/session")]
pub async fn current_session(session: SessionContext) -> web::Json<RoleResponse> {
    web::Json(RoleResponse {
        role: session.role(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockLoginService;
    use crate::domain::{ACCESS_DENIED, Error};
    use crate::inbound::http::session::SESSION_COOKIE;
    use crate::inbound::http::test_utils::{state_with_login, test_app};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn login_service(expected: &'static str, role: Role) -> MockLoginService {
        let mut service = MockLoginService::new();
        service.expect_authenticate().returning(move |password| {
            if password.expose() == expected {
                Ok(role)
            } else {
                Err(Error::unauthorized(ACCESS_DENIED))
            }
        });
        service
    }

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::Visitor)]
    #[actix_web::test]
    async fn login_sets_role_cookie(#[case] role: Role) {
        let app = test::init_service(test_app(state_with_login(login_service("s3cret", role)))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({"password": "s3cret"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .expect("session cookie set");
        assert_eq!(cookie.value(), role.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"role": role.as_str()}));
    }

    #[rstest]
    #[case(json!({"password": "wrong"}))]
    #[case(json!({"password": ""}))]
    #[case(json!({}))]
    #[actix_web::test]
    async fn failed_login_sets_no_cookie(#[case] payload: Value) {
        let app =
            test::init_service(test_app(state_with_login(login_service("s3cret", Role::Admin))))
                .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], ACCESS_DENIED);
    }

    #[actix_web::test]
    async fn logout_expires_cookie() {
        let app = test::init_service(test_app(state_with_login(MockLoginService::new()))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/logout")
                .cookie(Cookie::new(SESSION_COOKIE, "admin"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .expect("expired cookie set");
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"success": true}));
    }

    #[rstest]
    #[case(Some("staff"), "staff")]
    #[case(Some("Admin"), "guest")]
    #[case(None, "guest")]
    #[actix_web::test]
    async fn session_reports_cookie_role(#[case] cookie: Option<&str>, #[case] expected: &str) {
        let app = test::init_service(test_app(state_with_login(MockLoginService::new()))).await;
        let mut request = test::TestRequest::get().uri("/api/v1/auth/session");
        if let Some(value) = cookie {
            request = request.cookie(Cookie::new(SESSION_COOKIE, value.to_owned()));
        }

        let res = test::call_service(&app, request.to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"role": expected}));
    }
}
