// src/tests/router_tests/mod.rs
mod analyze_tests;
mod cache_tests;
mod session_tests;

use crate::errors::ResultResp;
use crate::report::ReportParser;
use crate::research::{ResearchError, ResearchPipeline, RetryPolicy};
use crate::router::{handle, AppState};
use crate::sessions::SessionStore;
use crate::tests::utils::{RecordingSleeper, ScriptedAgent};
use astra::{Body, Request, Response};
use http::header::{COOKIE, SET_COOKIE};
use http::Method;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

pub const NOW: i64 = 1_700_000_000;

fn fixed_clock() -> i64 {
    NOW
}

/// App state around a scripted agent; retries never really sleep.
pub fn make_state(script: Vec<Result<String, ResearchError>>) -> (AppState, Arc<ScriptedAgent>) {
    let agent = ScriptedAgent::new(script);
    let pipeline = ResearchPipeline::new(agent.clone(), RetryPolicy::new(2, Duration::from_secs(45)))
        .with_sleeper(Box::new(RecordingSleeper::default()));

    let state = AppState {
        pipeline,
        parser: ReportParser::default(),
        sessions: SessionStore::new(3600),
        cache_ttl_secs: 3600,
        clock: fixed_clock,
    };
    (state, agent)
}

pub fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();
    if let Some(cookie) = cookie {
        req.headers_mut().insert(COOKIE, cookie.parse().unwrap());
    }
    req
}

pub fn get(state: &AppState, uri: &str, cookie: Option<&str>) -> ResultResp {
    handle(request(Method::GET, uri, cookie), state)
}

pub fn body_string(resp: &mut Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}

/// `session=<token>` from a response's Set-Cookie header, ready to send back.
pub fn session_cookie_of(resp: &Response) -> String {
    let header = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    header.split(';').next().unwrap().to_string()
}
