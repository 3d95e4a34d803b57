//! Validation of codeless verification tokens.
//!
//! A codeless token is a `(student id, timestamp, hash)` triple handed to a partner site. The hash is an
//! HMAC-SHA512 over `?ud_s=<student id>&ud_t=<timestamp>` keyed with a secret shared between UNiDAYS and the
//! partner, so a matching hash proves the pair was issued by UNiDAYS.
//!
//! Only the signature is checked. No freshness window is applied; callers that care about token age must compare
//! the returned timestamp against their own clock.

use {
    crate::{
        canonical::codeless_query_string,
        crypto::hmac_sha512,
        signing_key::{base64_encode, SigningKey},
        TrackingError,
    },
    chrono::{DateTime, Utc},
    log::{debug, trace},
    subtle::ConstantTimeEq,
};

/// Validates codeless tokens against a shared secret.
///
/// ```
/// use unidays_tracking::CodelessValidator;
///
/// let validator = CodelessValidator::from_base64(
///     "tnFUmqDkq1w9eT65hF9okxL1On+d2BQWUyOFLYE3FTOwHjmnt5Sh/sxMA3/i0od3pV5EBfSAmXo//fjIdAE3cIAatX7ZZqVi0Dr8qEYGtku+ZRVbPSmTcEUTA/gXYo3KyL2JqXaZ/qhUvCMbLWyV07qRiFOjyLdOWhioHlJM5io=",
/// ).unwrap();
///
/// let hash = validator.hash("Do/faqh330SGgCnn4t3X4g==", "1395741712");
/// let attested = validator.validate("Do/faqh330SGgCnn4t3X4g==", "1395741712", &hash).unwrap();
/// assert_eq!(attested.unwrap().timestamp_millis(), 1395741712);
///
/// assert!(validator.validate("Do/faqh330SGgCnn4t3X4g==", "1395741712", "garbage").unwrap().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct CodelessValidator {
    /// The shared secret.
    key: SigningKey,
}

impl CodelessValidator {
    /// Create a validator from a decoded shared secret.
    pub fn new(key: SigningKey) -> Self {
        Self {
            key,
        }
    }

    /// Create a validator from a base64-encoded shared secret.
    pub fn from_base64(key: &str) -> Result<Self, TrackingError> {
        Ok(Self::new(SigningKey::from_base64(key)?))
    }

    /// Compute the base64 hash UNiDAYS would issue for this student id and timestamp.
    pub fn hash(&self, student_id: &str, timestamp: &str) -> String {
        let payload = codeless_query_string(student_id, timestamp);
        trace!("Codeless payload: {}", payload);
        base64_encode(&hmac_sha512(self.key.as_ref(), payload.as_bytes()))
    }

    /// Check `hash` against the expected hash for `student_id` and `timestamp`.
    ///
    /// Returns `Ok(Some(instant))` with the attested time when the hash matches, and `Ok(None)` when it does not.
    /// The timestamp is interpreted as milliseconds since the Unix epoch. If the hash matches but the timestamp is
    /// not an integer (or is out of range), [`TrackingError::InvalidTimestamp`] is returned instead of a bogus
    /// instant.
    pub fn validate(
        &self,
        student_id: &str,
        timestamp: &str,
        hash: &str,
    ) -> Result<Option<DateTime<Utc>>, TrackingError> {
        let expected = self.hash(student_id, timestamp);

        let is_equal: bool = expected.as_bytes().ct_eq(hash.as_bytes()).into();
        if !is_equal {
            debug!("Codeless hash mismatch for timestamp '{}'", timestamp);
            return Ok(None);
        }

        parse_epoch_millis(timestamp).map(Some)
    }
}

/// Parse a count of milliseconds since the Unix epoch.
fn parse_epoch_millis(timestamp: &str) -> Result<DateTime<Utc>, TrackingError> {
    let millis = match timestamp.trim().parse::<i64>() {
        Ok(millis) => millis,
        Err(_) => {
            debug!("Codeless timestamp '{}' is not an integer", timestamp);
            return Err(TrackingError::InvalidTimestamp(format!("Invalid codeless timestamp: '{}'", timestamp)));
        }
    };

    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => Ok(dt),
        None => Err(TrackingError::InvalidTimestamp(format!("Codeless timestamp out of range: {}", millis))),
    }
}
