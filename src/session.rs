use std::env;

/// Authentication state owned by the session collaborator.
pub trait SessionPort: Send + Sync {
    fn bearer_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }
}

/// Reads the token from an environment variable on every call, so a token
/// exported mid-run is picked up.
#[derive(Debug, Clone)]
pub struct EnvSession {
    var: String,
}

impl EnvSession {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SessionPort for EnvSession {
    fn bearer_token(&self) -> Option<String> {
        env::var(&self.var)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnonymousSession;

impl SessionPort for AnonymousSession {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}
