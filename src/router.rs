//! Client-side routing
//!
//! Four fixed routes, no guards, no nesting. Unknown paths resolve to no
//! route and the shell shows an empty page.

/// A page reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Options,
    SignUp,
    Login,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Landing, Route::Options, Route::SignUp, Route::Login];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Options => "/option",
            Route::SignUp => "/sign",
            Route::Login => "/login",
        }
    }

    /// Match a path exactly, ignoring trailing slashes
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

/// Current location plus history for back navigation
#[derive(Debug, Clone)]
pub struct Router {
    current: String,
    history: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Start at the landing page
    pub fn new() -> Self {
        Self::at(Route::Landing.path())
    }

    pub fn at(path: &str) -> Self {
        Self {
            current: path.to_string(),
            history: Vec::new(),
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current
    }

    pub fn current_route(&self) -> Option<Route> {
        Route::from_path(&self.current)
    }

    /// Go to `path`. Returns false (and records nothing) if already there.
    pub fn navigate(&mut self, path: &str) -> bool {
        if path == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, path.to_string());
        self.history.push(previous);
        true
    }

    /// Return to the previous path. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}
