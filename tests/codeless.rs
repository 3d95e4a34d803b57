use {
    chrono::{DateTime, Utc},
    unidays_tracking::{CodelessValidator, SigningKey, TrackingError},
};

const SHARED_SECRET: &str = "tnFUmqDkq1w9eT65hF9okxL1On+d2BQWUyOFLYE3FTOwHjmnt5Sh/sxMA3/i0od3pV5EBfSAmXo//fjIdAE3cIAatX7ZZqVi0Dr8qEYGtku+ZRVbPSmTcEUTA/gXYo3KyL2JqXaZ/qhUvCMbLWyV07qRiFOjyLdOWhioHlJM5io=";
const STUDENT_ID: &str = "Do/faqh330SGgCnn4t3X4g==";
const TIMESTAMP: &str = "1395741712";
const HASH: &str = "i38dJdX+XLKuE4F5tv+Knpl5NPtu5zrdsjnqBQliJEJE4NkMmfurVnUaT46WluRYoD1/f5spAqU36YgeTMCNeg==";

#[test_log::test]
fn hash_matches_issued_value() {
    let validator = CodelessValidator::from_base64(SHARED_SECRET).unwrap();
    assert_eq!(validator.hash(STUDENT_ID, TIMESTAMP), HASH);
}

#[test_log::test]
fn valid_hash_returns_attested_instant() {
    let validator = CodelessValidator::from_base64(SHARED_SECRET).unwrap();
    let attested = validator.validate(STUDENT_ID, TIMESTAMP, HASH).unwrap().unwrap();
    assert_eq!(attested, DateTime::<Utc>::from_timestamp_millis(1_395_741_712).unwrap());
}

#[test_log::test]
fn tampered_inputs_are_rejected() {
    let validator = CodelessValidator::from_base64(SHARED_SECRET).unwrap();
    assert!(validator.validate("Do/faqh330SGgCnn4t3X4h==", TIMESTAMP, HASH).unwrap().is_none());
    assert!(validator.validate(STUDENT_ID, "1395741711", HASH).unwrap().is_none());
    assert!(validator.validate(STUDENT_ID, TIMESTAMP, &HASH.to_lowercase()).unwrap().is_none());
    assert!(validator.validate(STUDENT_ID, TIMESTAMP, &HASH[..HASH.len() - 2]).unwrap().is_none());
}

#[test_log::test]
fn key_from_bytes_matches_base64() {
    let key: SigningKey = SHARED_SECRET.parse().unwrap();
    let validator = CodelessValidator::new(key);
    assert_eq!(validator.hash(STUDENT_ID, TIMESTAMP), HASH);
}

#[test_log::test]
fn malformed_key_is_rejected() {
    match CodelessValidator::from_base64("not base64!") {
        Err(TrackingError::InvalidKey(msg)) => assert!(msg.starts_with("Signing key is not valid base64")),
        other => panic!("Expected InvalidKey; got {:?}", other),
    }
}
