//! Path routing with a back stack.
//!
//! | path | route |
//! |---|---|
//! | `/records` | record list |
//! | `/records/:id` | record detail (numeric id) |
//! | `/`, `/home` | redirect to `/records` |
//! | anything else | not found |

use std::fmt;

use roster_core::RecordId;

pub const RECORDS_PATH: &str = "/records";

static ROOT: Route = Route::Records;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Records,
    RecordDetail(RecordId),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        let normalized = if normalized.starts_with('/') {
            normalized.to_string()
        } else {
            format!("/{normalized}")
        };

        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["home"] => Route::Records,
            ["records"] => Route::Records,
            ["records", id] => match id.parse::<RecordId>() {
                Ok(id) => Route::RecordDetail(id),
                Err(_) => Route::NotFound(normalized),
            },
            _ => Route::NotFound(normalized),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Records => RECORDS_PATH.to_string(),
            Route::RecordDetail(id) => format!("{RECORDS_PATH}/{id}"),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Sidebar highlight: anything under `/records`.
    pub fn in_records(&self) -> bool {
        matches!(self, Route::Records | Route::RecordDetail(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            history: vec![Route::Records],
        }
    }
}

impl Router {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![Route::parse(initial)],
        }
    }

    pub fn current(&self) -> &Route {
        self.history.last().unwrap_or(&ROOT)
    }

    /// Push the route for `path` unless it is already current.
    pub fn navigate(&mut self, path: &str) -> &Route {
        let route = Route::parse(path);
        if &route != self.current() {
            tracing::debug!(from = %self.current(), to = %route, "navigate");
            self.history.push(route);
        }
        self.current()
    }

    /// Pop one entry; `false` when already at the root of the history.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
