use once_cell::sync::OnceCell;
use std::collections::HashMap;
use thiserror::Error;

/// Numeric HTTP status code, e.g. 200, 404, 501.
///
/// A `StatusCode` is just the number; the reason phrase lives in the
/// [`StatusRegistry`]. Formatting a response line for a code that was never
/// registered fails with [`UnknownStatus`] rather than inventing a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(501);

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

/// Raised when a status code has no registered reason phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no reason phrase registered for status code {0}")]
pub struct UnknownStatus(pub u16);

/// Mapping from status code to reason phrase.
///
/// The registry is open for extension only before the server starts serving:
/// build one with [`StatusRegistry::with_defaults`], add codes with
/// [`register`](StatusRegistry::register), then [`install`](StatusRegistry::install)
/// it process-wide. Once installed (or once [`global`](StatusRegistry::global) has
/// been read), the mapping is read-only and safe to share across sessions
/// without locking.
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    reasons: HashMap<u16, String>,
}

static GLOBAL: OnceCell<StatusRegistry> = OnceCell::new();

impl StatusRegistry {
    /// Registry pre-populated with the codes the server emits out of the box.
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            reasons: HashMap::new(),
        };
        registry.register(200, "OK");
        registry.register(404, "Not Found");
        registry.register(501, "Not Implemented");
        registry
    }

    /// Adds or replaces a code. Only meaningful before `install`.
    pub fn register(&mut self, code: u16, reason: impl Into<String>) {
        self.reasons.insert(code, reason.into());
    }

    /// Looks up the reason phrase for `code`.
    pub fn reason_for(&self, code: StatusCode) -> Result<&str, UnknownStatus> {
        self.reasons
            .get(&code.as_u16())
            .map(|s| s.as_str())
            .ok_or(UnknownStatus(code.as_u16()))
    }

    /// Installs this registry as the process-wide mapping.
    ///
    /// Fails if a registry is already in place, which keeps the mapping
    /// immutable once any session may be reading it.
    pub fn install(self) -> Result<(), StatusRegistry> {
        GLOBAL.set(self)
    }

    /// The process-wide registry, defaulting to [`with_defaults`](Self::with_defaults)
    /// when none was installed.
    pub fn global() -> &'static StatusRegistry {
        GLOBAL.get_or_init(Self::with_defaults)
    }
}
