//! Predicates that let a request bypass a middleware stage

use std::sync::Arc;

use axum::extract::Request;

/// Returns `true` when the request should bypass the middleware
pub type Skipper = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Skipper that never bypasses
pub fn never() -> Skipper {
    Arc::new(|_: &Request| false)
}

/// Skipper that bypasses requests whose path exactly matches one of `paths`
pub fn paths<I, P>(paths: I) -> Skipper
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
    Arc::new(move |req: &Request| paths.iter().any(|p| p == req.uri().path()))
}
