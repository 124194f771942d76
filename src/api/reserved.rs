//! Codes that cannot be used as short links.
//!
//! These collide with the service's own top-level paths. The denylist is
//! enforced here at the HTTP boundary, not by the link service. Generated
//! codes are kept off the list by [`NonReservedCodeGenerator`], which the
//! server injects into the service.

use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Reserved path segments.
pub const RESERVED_CODES: &[&str] = &[
    "admin",
    "api",
    "dashboard",
    "favicon",
    "health",
    "links",
    "static",
    "stats",
];

/// Returns true if `code` is a reserved path segment (case-insensitive).
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Wraps a generator and draws again whenever it yields a reserved code.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonReservedCodeGenerator<G = RandomCodeGenerator> {
    inner: G,
}

impl<G: CodeGenerator> NonReservedCodeGenerator<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: CodeGenerator> CodeGenerator for NonReservedCodeGenerator<G> {
    fn generate(&self) -> String {
        loop {
            let code = self.inner.generate();
            if !is_reserved(&code) {
                return code;
            }
            tracing::debug!(code = %code, "Generated code is reserved, drawing again");
        }
    }
}
