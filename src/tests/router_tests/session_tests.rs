// src/tests/router_tests/session_tests.rs
use super::{get, make_state, request, session_cookie_of};
use crate::research::ResearchError;
use crate::router::handle;
use crate::tests::utils::{rate_limited, SAMPLE_REPORT};
use http::header::SET_COOKIE;
use http::Method;

#[test]
fn cookieless_requests_do_not_create_sessions() {
    let (state, _agent) = make_state(vec![]);

    for _ in 0..50 {
        assert!(get(&state, "/nope", None).is_err());
        assert!(get(&state, "/report.xlsx?city=Berlin", None).is_err());
        handle(request(Method::POST, "/cache/clear", None), &state).unwrap();

        let resp = get(&state, "/", None).unwrap();
        assert!(!resp.headers().contains_key(SET_COOKIE));
        let resp = get(&state, "/analyze?city=", None).unwrap();
        assert!(!resp.headers().contains_key(SET_COOKIE));
    }

    assert_eq!(state.sessions.len(), 0);
}

#[test]
fn failed_first_analysis_leaves_no_session() {
    let (state, _agent) = make_state(vec![
        Err(rate_limited(None)),
        Err(rate_limited(None)),
        Err(ResearchError::Unknown("HTTP 500: upstream".into())),
    ]);

    assert!(get(&state, "/analyze?city=Berlin", None).is_err());
    assert!(get(&state, "/analyze?city=Tokyo", None).is_err());

    assert_eq!(state.sessions.len(), 0);
}

#[test]
fn failed_analysis_keeps_an_existing_session() {
    let (state, _agent) = make_state(vec![
        Ok(SAMPLE_REPORT.into()),
        Err(ResearchError::Unknown("HTTP 500: upstream".into())),
    ]);

    let first = get(&state, "/analyze?city=Berlin", None).unwrap();
    let cookie = session_cookie_of(&first);

    assert!(get(&state, "/analyze?city=Tokyo", Some(&cookie)).is_err());

    assert_eq!(state.sessions.len(), 1);
    assert!(get(&state, "/report.xlsx?city=Berlin", Some(&cookie)).is_ok());
}

#[test]
fn one_session_per_browser() {
    let (state, _agent) = make_state(vec![Ok(SAMPLE_REPORT.into()), Ok(SAMPLE_REPORT.into())]);

    let first = get(&state, "/analyze?city=Berlin", None).unwrap();
    let cookie = session_cookie_of(&first);
    get(&state, "/analyze?city=Tokyo", Some(&cookie)).unwrap();
    get(&state, "/", Some(&cookie)).unwrap();

    assert_eq!(state.sessions.len(), 1);
}
