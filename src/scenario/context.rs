//! Session context carried between scenario steps

/// State produced by earlier steps and consumed by later ones
///
/// Each field can be written at most once per run.
#[derive(Debug, Clone)]
pub struct SessionContext {
    run_id: String,
    auth_token: Option<String>,
    product_id: Option<String>,
}

impl SessionContext {
    /// Create a new session with a generated run ID
    pub fn new() -> Self {
        Self::with_run_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_run_id(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            auth_token: None,
            product_id: None,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Store the bearer token. Returns false if one was already set.
    pub fn set_auth_token(&mut self, token: String) -> bool {
        set_once(&mut self.auth_token, token)
    }

    /// Store the created product's id. Returns false if one was already set.
    pub fn set_product_id(&mut self, id: String) -> bool {
        set_once(&mut self.product_id, id)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

fn set_once(slot: &mut Option<String>, value: String) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}
