// src/tests/router_tests/analyze_tests.rs
use super::{body_string, get, make_state, session_cookie_of};
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::tests::utils::{rate_limited, SAMPLE_REPORT};
use crate::research::ResearchError;
use http::header::SET_COOKIE;

#[test]
fn analyze_renders_the_parsed_report() {
    let (state, agent) = make_state(vec![Ok(SAMPLE_REPORT.into())]);

    let mut resp = get(&state, "/analyze?city=Berlin", None).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key(SET_COOKIE));

    let body = body_string(&mut resp);
    assert!(body.contains("Analysis completed for"));
    assert!(body.contains("5.00%"), "average yield missing");
    assert!(body.contains("Mitte"));
    assert!(body.contains("Kreuzberg"));
    assert!(body.contains("$1,500,000"));
    assert!(body.contains("$900,000"));
    assert!(body.contains("4.5%"));
    assert!(body.contains("/report.xlsx?city=Berlin"));
    assert!(body.contains("🔍 Starting analysis for Berlin..."));
    assert!(body.contains("✅ Analysis complete for Berlin!"));

    assert_eq!(agent.calls(), 1);
    assert_eq!(agent.tasks()[0].city, "Berlin");
}

#[test]
fn city_is_decoded_and_trimmed() {
    let (state, agent) = make_state(vec![Ok(SAMPLE_REPORT.into())]);

    get(&state, "/analyze?city=+New%20York+", None).unwrap();

    assert_eq!(agent.tasks()[0].city, "New York");
}

#[test]
fn blank_city_shows_a_warning() {
    let (state, agent) = make_state(vec![]);

    let mut resp = get(&state, "/analyze?city=%20%20", None).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Please enter a valid city name."));

    let mut resp = get(&state, "/analyze", None).unwrap();
    assert!(body_string(&mut resp).contains("Please enter a valid city name."));

    assert_eq!(agent.calls(), 0);
}

#[test]
fn repeat_request_is_served_from_the_session_cache() {
    let (state, agent) = make_state(vec![Ok(SAMPLE_REPORT.into())]);

    let first = get(&state, "/analyze?city=Berlin", None).unwrap();
    let cookie = session_cookie_of(&first);

    let mut second = get(&state, "/analyze?city=berlin", Some(&cookie)).unwrap();
    assert!(!second.headers().contains_key(SET_COOKIE));
    let body = body_string(&mut second);
    assert!(body.contains("📦 Using cached results for berlin"));
    assert!(body.contains("(saved within the last 60 minutes)"));
    assert_eq!(agent.calls(), 1);
}

#[test]
fn caches_are_per_session() {
    let (state, agent) = make_state(vec![Ok(SAMPLE_REPORT.into()), Ok(SAMPLE_REPORT.into())]);

    get(&state, "/analyze?city=Berlin", None).unwrap();
    get(&state, "/analyze?city=Berlin", None).unwrap();

    assert_eq!(agent.calls(), 2);
}

#[test]
fn rate_limit_exhaustion_shows_the_rate_limit_page() {
    let (state, agent) = make_state(vec![Err(rate_limited(None)), Err(rate_limited(None))]);

    let err = get(&state, "/analyze?city=Berlin", None).unwrap_err();
    assert!(matches!(err, ServerError::Research(ResearchError::RateLimited { .. })));
    assert_eq!(agent.calls(), 2);

    let mut resp = error_to_response(err);
    assert_eq!(resp.status(), 429);
    assert!(body_string(&mut resp).contains("Rate Limit Reached"));
}

#[test]
fn other_research_errors_suggest_another_try() {
    let (state, _agent) = make_state(vec![Err(ResearchError::Unknown("HTTP 401: invalid key".into()))]);

    let err = get(&state, "/analyze?city=Berlin", None).unwrap_err();
    let mut resp = error_to_response(err);

    assert_eq!(resp.status(), 502);
    let body = body_string(&mut resp);
    assert!(body.contains("HTTP 401: invalid key"));
    assert!(body.contains("Please try again or try a different city."));
}

#[test]
fn report_without_areas_falls_back_to_raw_text() {
    let (state, _agent) = make_state(vec![Ok("Retail is quiet this year. Yields near 3%.".into())]);

    let mut resp = get(&state, "/analyze?city=Oslo", None).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Chart data not available"));
    assert!(body.contains("3.00%"));
    assert!(body.contains("Retail is quiet this year."));
}
