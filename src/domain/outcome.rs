// Outcome envelope - uniform success/failure record for one upstream call
use serde::{Deserialize, Serialize};

/// Result of a single upstream request.
///
/// Exactly one of `data` / `error` is populated, depending on `ok`. The
/// fields are private so that invariant can't be broken after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
