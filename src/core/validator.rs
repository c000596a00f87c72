//! Encryption key validation.
//!
//! A key is accepted when it satisfies the [`ValidationPolicy`]. Failing
//! that, a configured [`TemporaryCredential`] may stand in for a bounded
//! number of uses, tracked through a [`UsageStore`].

use std::fmt;

use tracing::{debug, warn};

use crate::core::constants;
use crate::core::policy::{PolicyViolation, ValidationPolicy};
use crate::core::usage::UsageStore;
use crate::error::Error;

/// A usage-limited fallback secret.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredential {
    pub secret: String,
    pub max_uses: u32,
}

impl TemporaryCredential {
    pub fn new(secret: impl Into<String>, max_uses: u32) -> Self {
        Self {
            secret: secret.into(),
            max_uses,
        }
    }

    /// An empty secret disables the credential.
    pub fn is_enabled(&self) -> bool {
        !self.secret.is_empty()
    }
}

impl Default for TemporaryCredential {
    fn default() -> Self {
        Self::new(String::new(), constants::DEFAULT_TEMP_MAX_USES)
    }
}

impl fmt::Debug for TemporaryCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredential")
            .field("secret", &"<redacted>")
            .field("max_uses", &self.max_uses)
            .finish()
    }
}

/// How a key was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The key satisfied the policy.
    Policy,
    /// The temporary credential was used; `remaining` uses are left.
    Temporary { remaining: u32 },
}

/// Why a key was rejected.
///
/// Only for diagnostics. Every variant converts to [`Error::AccessDenied`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Policy failed and no temporary credential applies.
    Policy(PolicyViolation),
    /// Policy failed and the key is not the temporary credential.
    UnknownCredential,
    /// The temporary credential has no uses left.
    Exhausted,
    /// Usage state could not be read.
    StateUnavailable,
    /// The use could not be recorded.
    StateNotRecorded,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy(violation) => write!(f, "policy: {}", violation),
            Self::UnknownCredential => write!(f, "not the temporary credential"),
            Self::Exhausted => write!(f, "temporary credential exhausted"),
            Self::StateUnavailable => write!(f, "usage state unavailable"),
            Self::StateNotRecorded => write!(f, "usage could not be recorded"),
        }
    }
}

impl From<Rejection> for Error {
    fn from(_: Rejection) -> Self {
        Error::AccessDenied
    }
}

/// Validates candidate encryption keys.
#[derive(Debug)]
pub struct KeyValidator<S> {
    policy: ValidationPolicy,
    temporary: Option<TemporaryCredential>,
    usage: S,
}

impl<S: UsageStore> KeyValidator<S> {
    /// Validator with only the policy path.
    pub fn new(policy: ValidationPolicy, usage: S) -> Self {
        Self {
            policy,
            temporary: None,
            usage,
        }
    }

    /// Enable the temporary-credential fallback.
    ///
    /// A credential with an empty secret leaves the fallback disabled.
    pub fn with_temporary(mut self, credential: TemporaryCredential) -> Self {
        self.temporary = credential.is_enabled().then_some(credential);
        self
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn usage(&self) -> &S {
        &self.usage
    }

    /// Whether `candidate` is an acceptable key.
    ///
    /// Accepting the temporary credential consumes one of its uses.
    pub fn validate(&self, candidate: &str) -> bool {
        self.check(candidate).is_ok()
    }

    /// Validate `candidate`, reporting how it was accepted or why not.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the key is not accepted. Usage state
    /// that cannot be read or written rejects the key (fail closed).
    pub fn check(&self, candidate: &str) -> Result<Grant, Rejection> {
        let violation = match self.policy.check(candidate) {
            Ok(()) => {
                debug!("key accepted by policy");
                return Ok(Grant::Policy);
            }
            Err(violation) => violation,
        };

        let result = match &self.temporary {
            None => Err(Rejection::Policy(violation)),
            Some(credential) => self.use_temporary(credential, candidate),
        };

        if let Err(rejection) = &result {
            debug!(reason = %rejection, "key rejected");
        }
        result
    }

    fn use_temporary(
        &self,
        credential: &TemporaryCredential,
        candidate: &str,
    ) -> Result<Grant, Rejection> {
        if candidate != credential.secret {
            return Err(Rejection::UnknownCredential);
        }

        let mut counter = self.usage.load().map_err(|e| {
            warn!(error = %e, "cannot read usage state, rejecting temporary credential");
            Rejection::StateUnavailable
        })?;

        let used = counter.count(&credential.secret);
        if used >= credential.max_uses {
            return Err(Rejection::Exhausted);
        }

        let used = counter.increment(&credential.secret);
        self.usage.save(&counter).map_err(|e| {
            warn!(error = %e, "cannot record usage, rejecting temporary credential");
            Rejection::StateNotRecorded
        })?;

        let remaining = credential.max_uses.saturating_sub(used);
        debug!(used, remaining, "temporary credential accepted");
        Ok(Grant::Temporary { remaining })
    }
}
