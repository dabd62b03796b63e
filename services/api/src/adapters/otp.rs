//! services/api/src/adapters/otp.rs
//!
//! The verification-code registry for the login flow. An explicit value held
//! in `AppState` rather than a module-level singleton, so tests can build
//! their own. Codes expire after a configurable TTL; a new request for the
//! same email overwrites the previous code.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// The mock verification code. Fixed by design: this is demo auth, not a
/// real credential scheme, and the constant doubles as a backdoor code
/// accepted for any email.
pub const MOCK_OTP: &str = "123456";

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: DateTime<Utc>,
}

/// A keyed table of the single currently valid code per email.
pub struct OtpRegistry {
    ttl: Duration,
    entries: Mutex<HashMap<String, OtpEntry>>,
}

impl OtpRegistry {
    pub fn new(ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::seconds(300));
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Issues (or overwrites) the code for `email` and returns it.
    pub fn issue(&self, email: &str) -> String {
        let code = MOCK_OTP.to_string();
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            email.to_string(),
            OtpEntry {
                code: code.clone(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        code
    }

    /// Checks a submitted code. Accepts the fixed mock code for any email,
    /// or the stored, unexpired code for this email. Does not consume the
    /// entry on success.
    pub fn verify(&self, email: &str, submitted: &str) -> bool {
        if submitted == MOCK_OTP {
            return true;
        }
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match entries.get(email) {
            Some(entry) => entry.code == submitted && Utc::now() < entry.expires_at,
            None => false,
        }
    }
}
