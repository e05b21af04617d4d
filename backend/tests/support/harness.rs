//! In-process application harness shared by the HTTP behaviour suites.
//!
//! Each world owns an Actix system runner plus one in-memory guestbook, so
//! state survives across steps while every request is served by a fresh
//! `App` built around the same `HttpState`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Cookie, time::Duration};
use actix_web::http::Method;
use actix_web::rt::SystemRunner;
use actix_web::{App, test, web};
use fansite::Trace;
use fansite::domain::{AccessSecrets, GuestbookService, Role, SecretLoginService, TRACE_ID_HEADER};
use fansite::inbound::http::api_scope;
use fansite::inbound::http::session::{SESSION_COOKIE, SessionCookie};
use fansite::inbound::http::state::{HttpState, HttpStatePorts};
use fansite::outbound::memory::InMemoryGuestbookRepository;
use mockable::DefaultClock;
use serde_json::Value;

pub(crate) const ADMIN_SECRET: &str = "admin-secret";
pub(crate) const STAFF_SECRET: &str = "staff-secret";
pub(crate) const VISITOR_SECRET: &str = "visitor-secret";

/// Outcome of the most recent request.
#[derive(Debug, Default)]
pub(crate) struct LastResponse {
    pub(crate) status: u16,
    pub(crate) body: Value,
    pub(crate) trace_id: Option<String>,
    pub(crate) set_cookie: Option<Cookie<'static>>,
}

pub(crate) struct AppWorld {
    runner: SystemRunner,
    state: HttpState,
    pub(crate) repo: Arc<InMemoryGuestbookRepository>,
    /// Role cookie the simulated browser currently holds.
    pub(crate) cookie: Option<String>,
    pub(crate) last: Option<LastResponse>,
    /// Entry ids in signing order.
    pub(crate) entries: Vec<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<AppWorld>>;

/// Build a world with admin, staff and visitor secrets configured.
pub(crate) fn new_world() -> SharedWorld {
    let repo = Arc::new(InMemoryGuestbookRepository::default());
    let service = Arc::new(GuestbookService::new(repo.clone(), Arc::new(DefaultClock)));
    let secrets = AccessSecrets::default()
        .with_secret(Role::Admin, ADMIN_SECRET)
        .with_secret(Role::Staff, STAFF_SECRET)
        .with_secret(Role::Visitor, VISITOR_SECRET);
    let state = HttpState::new(
        HttpStatePorts {
            login: Arc::new(SecretLoginService::new(secrets)),
            guestbook: service.clone(),
            guestbook_query: service,
        },
        SessionCookie::new(false),
    );

    Rc::new(RefCell::new(AppWorld {
        runner: actix_web::rt::System::new(),
        state,
        repo,
        cookie: None,
        last: None,
        entries: Vec::new(),
    }))
}

/// A request to replay against the application.
pub(crate) struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) path: String,
    /// Role cookie to send instead of the browser's current one.
    pub(crate) role: Option<Role>,
    pub(crate) payload: Option<Value>,
}

impl RequestSpec {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            role: None,
            payload: None,
        }
    }

    pub(crate) fn as_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub(crate) fn json(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Send every request in order within one application instance and record
/// the last response. Set-Cookie headers update the browser cookie.
pub(crate) fn perform_all(world: &SharedWorld, specs: Vec<RequestSpec>) -> Vec<LastResponse> {
    let (state, browser_cookie) = {
        let ctx = world.borrow();
        (ctx.state.clone(), ctx.cookie.clone())
    };

    let responses = {
        let ctx = world.borrow();
        ctx.runner.block_on(async move {
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .wrap(Trace)
                    .service(api_scope()),
            )
            .await;

            let mut responses = Vec::with_capacity(specs.len());
            for spec in specs {
                let mut request = test::TestRequest::default()
                    .method(spec.method)
                    .uri(&spec.path);
                let cookie = spec
                    .role
                    .map(|role| role.as_str().to_owned())
                    .or_else(|| browser_cookie.clone());
                if let Some(value) = cookie {
                    request = request.cookie(Cookie::new(SESSION_COOKIE, value));
                }
                if let Some(payload) = spec.payload {
                    request = request.set_json(payload);
                }

                let res = test::call_service(&app, request.to_request()).await;
                let status = res.status().as_u16();
                let trace_id = res
                    .headers()
                    .get(TRACE_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                let set_cookie = res
                    .response()
                    .cookies()
                    .find(|cookie| cookie.name() == SESSION_COOKIE)
                    .map(Cookie::into_owned);
                let bytes = test::read_body(res).await;
                let body = if bytes.is_empty() {
                    Value::Null
                } else {
                    serde_json::from_slice(&bytes).expect("response body is JSON")
                };
                responses.push(LastResponse {
                    status,
                    body,
                    trace_id,
                    set_cookie,
                });
            }
            responses
        })
    };

    let mut ctx = world.borrow_mut();
    for response in &responses {
        if let Some(cookie) = &response.set_cookie {
            ctx.cookie = if cookie.max_age() == Some(Duration::ZERO) {
                None
            } else {
                Some(cookie.value().to_owned())
            };
        }
    }
    responses
}

/// Send one request and keep its response as the world's last response.
pub(crate) fn perform(world: &SharedWorld, spec: RequestSpec) {
    let last = perform_all(world, vec![spec]).pop();
    world.borrow_mut().last = last;
}

/// Sign `count` entries with contents `entry-1..=entry-count`.
pub(crate) fn sign_entries(world: &SharedWorld, count: usize, user_key: &str) {
    let specs = (1..=count)
        .map(|n| {
            RequestSpec::new(Method::POST, "/api/v1/guestbook").json(serde_json::json!({
                "author": "Mio",
                "content": format!("entry-{n}"),
                "userKey": user_key,
            }))
        })
        .collect();
    let responses = perform_all(world, specs);
    let mut ctx = world.borrow_mut();
    for response in responses {
        assert_eq!(response.status, 201, "sign request failed: {}", response.body);
        let id = response.body["id"]
            .as_str()
            .expect("created entry id")
            .to_owned();
        ctx.entries.push(id);
    }
}

/// Contents of the entries on one page.
pub(crate) fn list_contents(world: &SharedWorld, page: u32, limit: u32) -> Vec<String> {
    perform(
        world,
        RequestSpec::new(
            Method::GET,
            format!("/api/v1/guestbook?page={page}&limit={limit}"),
        ),
    );
    let ctx = world.borrow();
    let last = ctx.last.as_ref().expect("list response");
    assert_eq!(last.status, 200);
    last.body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["content"].as_str().expect("content").to_owned())
        .collect()
}

/// Whether an entry with `id` appears on the first page of up to 1000.
pub(crate) fn is_listed(world: &SharedWorld, id: &str) -> bool {
    perform(
        world,
        RequestSpec::new(Method::GET, "/api/v1/guestbook?page=1&limit=1000"),
    );
    let ctx = world.borrow();
    let last = ctx.last.as_ref().expect("list response");
    last.body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .any(|item| item["id"] == id)
}

/// Currently pinned id as reported by the API.
pub(crate) fn pinned_id(world: &SharedWorld) -> Option<String> {
    perform(world, RequestSpec::new(Method::GET, "/api/v1/guestbook/pinned"));
    let ctx = world.borrow();
    let last = ctx.last.as_ref().expect("pinned response");
    assert_eq!(last.status, 200);
    last.body["pinnedId"].as_str().map(str::to_owned)
}

pub(crate) fn last_status(world: &SharedWorld) -> u16 {
    world.borrow().last.as_ref().expect("a request was sent").status
}
