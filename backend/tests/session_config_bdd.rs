//! Behaviour tests for session configuration toggles.
//!
//! These scenarios validate that release builds enforce explicit
//! configuration and that role passwords are picked up from the environment.

use fansite::domain::Role;
use fansite::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings_from_env,
};
use mockable::MockEnv;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::collections::HashMap;

struct SessionConfigWorld {
    vars: RefCell<HashMap<String, String>>,
    mode: RefCell<BuildMode>,
    outcome: RefCell<Option<Result<SessionSettings, SessionConfigError>>>,
}

impl SessionConfigWorld {
    fn new() -> Self {
        Self {
            vars: RefCell::new(HashMap::new()),
            mode: RefCell::new(BuildMode::Release),
            outcome: RefCell::new(None),
        }
    }

    fn evaluate(&self) {
        let env = mock_env(self.vars.borrow().clone());
        let mode = *self.mode.borrow();
        *self.outcome.borrow_mut() = Some(session_settings_from_env(&env, mode));
    }

    fn with_settings<F>(&self, f: F)
    where
        F: FnOnce(&SessionSettings),
    {
        let outcome = self.outcome.borrow();
        let settings = outcome
            .as_ref()
            .expect("evaluation result")
            .as_ref()
            .expect("expected settings to succeed");
        f(settings);
    }

    fn error(&self) -> SessionConfigError {
        let outcome = self.outcome.borrow();
        match outcome.as_ref().expect("evaluation result") {
            Ok(_) => panic!("expected settings to fail"),
            Err(error) => error.clone(),
        }
    }
}

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn world() -> SessionConfigWorld {
    SessionConfigWorld::new()
}

#[given("a release build configuration")]
fn a_release_build_configuration(world: &SessionConfigWorld) {
    *world.mode.borrow_mut() = BuildMode::Release;
}

#[given("a debug build configuration")]
fn a_debug_build_configuration(world: &SessionConfigWorld) {
    *world.mode.borrow_mut() = BuildMode::Debug;
}

#[given("{name} is set to {value}")]
fn variable_is_set_to(world: &SessionConfigWorld, name: String, value: String) {
    world.vars.borrow_mut().insert(name, value);
}

#[when("the session settings are loaded")]
fn the_session_settings_are_loaded(world: &SessionConfigWorld) {
    world.evaluate();
}

#[then("loading fails because {name} is missing")]
fn loading_fails_because_missing(world: &SessionConfigWorld, name: String) {
    match world.error() {
        SessionConfigError::MissingEnv { name: missing } => assert_eq!(missing, name),
        other => panic!("expected missing {name}, got {other}"),
    }
}

#[then("loading fails because {name} is invalid")]
fn loading_fails_because_invalid(world: &SessionConfigWorld, name: String) {
    match world.error() {
        SessionConfigError::InvalidEnv { name: invalid, .. } => assert_eq!(invalid, name),
        other => panic!("expected invalid {name}, got {other}"),
    }
}

#[then("session cookies are secure")]
fn session_cookies_are_secure(world: &SessionConfigWorld) {
    world.with_settings(|settings| assert!(settings.cookie_secure));
}

#[then("session cookies are not secure")]
fn session_cookies_are_not_secure(world: &SessionConfigWorld) {
    world.with_settings(|settings| assert!(!settings.cookie_secure));
}

#[then("the password {password} grants the {role} role")]
fn the_password_grants_the_role(world: &SessionConfigWorld, password: String, role: String) {
    let role: Role = role.parse().expect("known role");
    world.with_settings(|settings| assert_eq!(settings.secrets.role_for(&password), Some(role)));
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Release builds require an admin password"
)]
fn release_builds_require_an_admin_password(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Release builds reject an unparseable secure toggle"
)]
fn release_builds_reject_an_unparseable_secure_toggle(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Debug builds default to secure cookies"
)]
fn debug_builds_default_to_secure_cookies(world: SessionConfigWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_config.feature",
    name = "Configured passwords map to their roles"
)]
fn configured_passwords_map_to_their_roles(world: SessionConfigWorld) {
    drop(world);
}
