// src/tests/router_tests/cache_tests.rs
use super::{body_string, get, make_state, request, session_cookie_of};
use crate::errors::ServerError;
use crate::responses::xlsx::XLSX_CONTENT_TYPE;
use crate::router::handle;
use crate::tests::utils::SAMPLE_REPORT;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, LOCATION};
use http::Method;

#[test]
fn home_page_renders() {
    let (state, _agent) = make_state(vec![]);

    let mut resp = get(&state, "/", None).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Retail Property Investment Analyzer"));
    assert!(body.contains("action=\"/analyze\""));
    assert!(!body.contains("Cached Cities"));
}

#[test]
fn home_lists_cached_cities() {
    let (state, _agent) = make_state(vec![Ok(SAMPLE_REPORT.into())]);

    let first = get(&state, "/analyze?city=Berlin", None).unwrap();
    let cookie = session_cookie_of(&first);

    let mut resp = get(&state, "/", Some(&cookie)).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Cached Cities"));
    assert!(body.contains("Berlin: cached 0m ago"));
}

#[test]
fn xlsx_export_of_a_cached_report() {
    let (state, _agent) = make_state(vec![Ok(SAMPLE_REPORT.into())]);

    let first = get(&state, "/analyze?city=Berlin", None).unwrap();
    let cookie = session_cookie_of(&first);

    let mut resp = get(&state, "/report.xlsx?city=Berlin", Some(&cookie)).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()[CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        resp.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"neighborhoods_Berlin.xlsx\""
    );

    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut resp.body_mut().reader(), &mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn xlsx_export_needs_a_cached_report() {
    let (state, agent) = make_state(vec![]);

    let err = get(&state, "/report.xlsx?city=Berlin", None).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let err = get(&state, "/report.xlsx", None).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(agent.calls(), 0);
}

#[test]
fn clearing_the_cache_redirects_home() {
    let (state, agent) = make_state(vec![Ok(SAMPLE_REPORT.into()), Ok(SAMPLE_REPORT.into())]);

    let first = get(&state, "/analyze?city=Berlin", None).unwrap();
    let cookie = session_cookie_of(&first);

    let resp = handle(request(Method::POST, "/cache/clear", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()[LOCATION], "/");

    let err = get(&state, "/report.xlsx?city=Berlin", Some(&cookie)).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    get(&state, "/analyze?city=Berlin", Some(&cookie)).unwrap();
    assert_eq!(agent.calls(), 2);
}

#[test]
fn unknown_routes_are_not_found() {
    let (state, _agent) = make_state(vec![]);

    assert!(matches!(get(&state, "/nope", None), Err(ServerError::NotFound)));
    assert!(matches!(
        get(&state, "/cache/clear", None),
        Err(ServerError::NotFound)
    ));
}
