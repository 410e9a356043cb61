//! Credential resolution for authenticated API requests.

use std::fmt;

use crate::ports::ShellExecutor;

/// An opaque bearer token.
///
/// Never empty. `Debug` and `Display` redact the value so it cannot leak
/// into logs or reports by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left after trimming; absence of a
    /// credential is never represented as an empty string.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw token for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Produces an optional credential from an ordered set of sources.
///
/// The explicit token always wins; the helper command is only run when no
/// explicit token is configured.
pub struct TokenResolver<'a> {
    explicit: Option<&'a str>,
    helper_command: &'a str,
    shell: &'a dyn ShellExecutor,
}

impl<'a> TokenResolver<'a> {
    /// Creates a resolver over an explicit token and a helper command.
    #[must_use]
    pub fn new(
        explicit: Option<&'a str>,
        helper_command: &'a str,
        shell: &'a dyn ShellExecutor,
    ) -> Self {
        Self { explicit, helper_command, shell }
    }

    /// Resolves a credential, or `None` for anonymous requests.
    ///
    /// A missing helper, a non-zero exit or blank output all mean "no
    /// credential" and are not errors.
    #[must_use]
    pub fn resolve(&self) -> Option<Credential> {
        if let Some(token) = self.explicit.and_then(Credential::new) {
            tracing::debug!("using explicit token");
            return Some(token);
        }
        if self.helper_command.trim().is_empty() {
            return None;
        }

        match self.shell.run(self.helper_command) {
            Ok(output) if output.succeeded() => {
                let token = Credential::new(&output.stdout);
                if token.is_none() {
                    tracing::debug!(helper = self.helper_command, "credential helper printed nothing");
                }
                token
            }
            Ok(output) => {
                tracing::debug!(
                    helper = self.helper_command,
                    exit_code = output.exit_code,
                    "credential helper failed"
                );
                None
            }
            Err(e) => {
                tracing::debug!(helper = self.helper_command, "credential helper unavailable: {e}");
                None
            }
        }
    }
}
