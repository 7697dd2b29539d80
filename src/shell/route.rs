use std::fmt;

/// Static routing table of the shell. Anything unknown lands on `Home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Analyzer,
    Optimizer,
    Explainer,
    Scanner,
}

impl Route {
    /// Home menu order; menu index `n` opens `DESTINATIONS[n - 1]`.
    pub const DESTINATIONS: [Route; 4] = [
        Route::Analyzer,
        Route::Optimizer,
        Route::Explainer,
        Route::Scanner,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Analyzer => "code-analyzer",
            Route::Optimizer => "optimizer",
            Route::Explainer => "summarize",
            Route::Scanner => "security",
        }
    }

    pub fn resolve(path: &str) -> Route {
        let path = path.trim().trim_matches('/');

        Route::DESTINATIONS
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Route::Home)
    }

    pub fn from_menu_index(index: usize) -> Option<Route> {
        index
            .checked_sub(1)
            .and_then(|idx| Route::DESTINATIONS.get(idx).copied())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "Home"),
            Route::Analyzer => write!(f, "Code Analyzer"),
            Route::Optimizer => write!(f, "Code Optimizer"),
            Route::Explainer => write!(f, "Code Explainer"),
            Route::Scanner => write!(f, "Security Scanner"),
        }
    }
}
