use crate::cache::lock_cache;
use crate::errors::{ResultResp, ServerError};
use crate::report::ReportParser;
use crate::research::ResearchPipeline;
use crate::responses::{html_response, see_other};
use crate::sessions::{session_cookie, session_token, Session, SessionStore};
use crate::spreadsheets::export_records_xlsx;
use crate::templates::pages::{home_page, report_page, HomeVm, ReportVm};
use astra::{Request, Response};
use http::header::SET_COOKIE;
use http::HeaderValue;
use tracing::{debug, info};

/// Everything a request handler needs, shared across astra's worker threads.
pub struct AppState {
    pub pipeline: ResearchPipeline,
    pub parser: ReportParser,
    pub sessions: SessionStore,
    pub cache_ttl_secs: i64,
    /// Unix seconds; swapped out in tests.
    pub clock: fn() -> i64,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    debug!(method, path, "request");

    // Sessions are only minted by a request that fills a cache; everything
    // else reads the existing one, if any.
    let token = session_token(req.headers());
    let token = token.as_deref();
    let now = (state.clock)();

    match (method, path) {
        ("GET", "/") => home(state, state.sessions.lookup(token, now).as_ref(), None),
        ("GET", "/analyze") => analyze(&req, state, token, now),
        ("GET", "/report.xlsx") => export(&req, state, token, now),
        ("POST", "/cache/clear") => clear_cache(state, token, now),
        _ => Err(ServerError::NotFound),
    }
}

fn home(state: &AppState, session: Option<&Session>, warning: Option<&str>) -> ResultResp {
    let cached = session
        .map(|s| lock_cache(&s.cache).fresh_entries((state.clock)()))
        .unwrap_or_default();

    html_response(home_page(&HomeVm {
        city: String::new(),
        warning: warning.map(str::to_string),
        cached,
        cache_ttl_secs: state.cache_ttl_secs,
    }))
}

fn analyze(req: &Request, state: &AppState, token: Option<&str>, now: i64) -> ResultResp {
    let city = query_param(req, "city").unwrap_or_default();
    let city = city.trim();
    if city.is_empty() {
        let session = state.sessions.lookup(token, now);
        return home(state, session.as_ref(), Some("Please enter a valid city name."));
    }

    let session = state.sessions.resolve(token, now);

    let mut log: Vec<String> = Vec::new();
    let outcome = state.pipeline.run_cached(
        city,
        &session.cache,
        state.clock,
        Some(&mut |msg: &str| log.push(msg.to_string())),
    );
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            // The error page carries no cookie, so a session minted here
            // could never be found again.
            if session.is_new {
                state.sessions.discard(&session.token);
            }
            return Err(err.into());
        }
    };

    let parsed = state.parser.parse(&outcome.report);
    info!(
        city,
        from_cache = outcome.from_cache,
        neighborhoods = parsed.records.len(),
        "report parsed"
    );

    let cached = lock_cache(&session.cache).fresh_entries((state.clock)());

    let resp = html_response(report_page(&ReportVm {
        city,
        report: &parsed,
        raw: &outcome.report,
        log: &log,
        from_cache: outcome.from_cache,
        cached: &cached,
        cache_ttl_secs: state.cache_ttl_secs,
    }))?;

    with_session_cookie(resp, &session)
}

/// Spreadsheet of the parsed table. Only serves reports already in this
/// session's cache; it never triggers a new analysis.
fn export(req: &Request, state: &AppState, token: Option<&str>, now: i64) -> ResultResp {
    let city = query_param(req, "city").unwrap_or_default();
    let city = city.trim();
    if city.is_empty() {
        return Err(ServerError::BadRequest("city is required".into()));
    }

    let report = state
        .sessions
        .lookup(token, now)
        .and_then(|session| {
            let cache = lock_cache(&session.cache);
            cache.get(city, now).map(str::to_string)
        })
        .ok_or_else(|| {
            ServerError::BadRequest(format!(
                "No cached report for {city}. Run the analysis first."
            ))
        })?;

    let parsed = state.parser.parse(&report);
    export_records_xlsx(&parsed.records, city)
}

fn clear_cache(state: &AppState, token: Option<&str>, now: i64) -> ResultResp {
    if let Some(session) = state.sessions.lookup(token, now) {
        let mut cache = lock_cache(&session.cache);
        let dropped = cache.len();
        cache.clear();
        info!(dropped, "session cache cleared");
    }

    see_other("/")
}

fn with_session_cookie(mut resp: Response, session: &Session) -> ResultResp {
    if session.is_new {
        let cookie = HeaderValue::from_str(&session_cookie(&session.token))
            .map_err(|_| ServerError::InternalError)?;
        resp.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(resp)
}

fn query_param(req: &Request, name: &str) -> Option<String> {
    let query = req.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
