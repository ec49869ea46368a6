// Routing system for HTTP requests

use crate::handler::{HandlerFn, RequestContext};
use crate::{Error, HttpResponse};
use std::collections::HashMap;

/// Route definition: a path pattern with named placeholders and its handler
#[derive(Clone)]
pub struct Route {
    pub pattern: String,
    pub handler: HandlerFn,
}

/// Router for managing routes and dispatching requests
///
/// Routes are matched in registration order and the first matching pattern
/// wins. The table is built at application start and frozen behind an `Arc`
/// when the server starts, so dispatch needs no locking.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Bulk-register pattern-to-handler mappings.
    ///
    /// Registering a pattern that is already in the table is an error.
    pub fn add_routes<I>(&mut self, mappings: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (String, HandlerFn)>,
    {
        for (pattern, handler) in mappings {
            if self.routes.iter().any(|r| r.pattern == pattern) {
                return Err(Error::DuplicateRoute(pattern));
            }
            self.routes.push(Route { pattern, handler });
        }
        Ok(())
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route matching the request path and invoke its handler.
    ///
    /// The query string is split off and parsed before matching. Returns
    /// `Error::RouteNotFound` without invoking any handler when nothing
    /// matches.
    pub async fn dispatch(&self, mut ctx: RequestContext) -> Result<HttpResponse, Error> {
        let (path, query_string) = match ctx.request.path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (ctx.request.path.clone(), None),
        };

        if let Some(query) = query_string {
            ctx.request.query_params = parse_query_string(&query);
        }

        for route in &self.routes {
            if let Some(params) = match_path(&route.pattern, &path) {
                ctx.request.path_params = params;
                return (route.handler)(ctx).await;
            }
        }

        Err(Error::RouteNotFound(path))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a route pattern against a request path.
///
/// Placeholders use `{name}` syntax and bind the literal path segment
/// verbatim; static segments compare exactly. Returns the bound parameters
/// on a match, `None` otherwise.
pub fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pattern_part, path_part) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(name) = pattern_part
            .strip_prefix('{')
            .and_then(|p| p.strip_suffix('}'))
        {
            params.insert(name.to_string(), path_part.to_string());
        } else if pattern_part != path_part {
            return None;
        }
    }

    Some(params)
}

/// Parse a query string into a map of parameters
fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|part| {
            let mut split = part.splitn(2, '=');
            let key = split.next()?;
            let value = split.next().unwrap_or("");
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
