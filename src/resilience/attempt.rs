//! Per-call re-authentication state.
//!
//! Every logical call owns its `Attempt`; nothing here is shared between
//! concurrent calls. A call starts at attempt 1. When the upstream rejects the
//! token, the call moves to attempt 2 with a forced refresh; a second rejection
//! ends the call.

use crate::error::{business_message, is_success, Error};

/// Domain attempts allowed per logical call (one forced re-authentication).
pub const MAX_AUTH_ATTEMPTS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    number: u8,
    force_refresh: bool,
    rejected_token: Option<String>,
}

impl Attempt {
    pub fn first() -> Self {
        Self {
            number: 1,
            force_refresh: false,
            rejected_token: None,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn force_refresh(&self) -> bool {
        self.force_refresh
    }

    /// The token value the upstream rejected on the previous attempt.
    pub fn rejected_token(&self) -> Option<&str> {
        self.rejected_token.as_deref()
    }

    pub fn is_last(&self) -> bool {
        self.number >= MAX_AUTH_ATTEMPTS
    }

    /// Next attempt after `rejected` was refused, if the budget allows one.
    pub fn after_rejection(&self, rejected: &str) -> Option<Attempt> {
        if self.is_last() {
            return None;
        }
        Some(Attempt {
            number: self.number + 1,
            force_refresh: true,
            rejected_token: Some(rejected.to_owned()),
        })
    }
}

impl Default for Attempt {
    fn default() -> Self {
        Self::first()
    }
}

/// Result of evaluating one response envelope.
#[derive(Debug)]
pub enum Verdict {
    Done,
    RetryPending(Attempt),
    Failed(Error),
}

/// Decides what happens after an attempt that sent `token` got `code`/`message` back.
pub fn evaluate(
    attempt: &Attempt,
    token: &str,
    code: i64,
    message: &str,
    invalid_token_codes: &[i64],
) -> Verdict {
    if is_success(code) {
        return Verdict::Done;
    }
    if invalid_token_codes.contains(&code) {
        return match attempt.after_rejection(token) {
            Some(next) => Verdict::RetryPending(next),
            None => Verdict::Failed(Error::InvalidToken {
                code,
                message: business_message(code, message),
            }),
        };
    }
    Verdict::Failed(Error::business(code, message))
}
