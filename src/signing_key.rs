use {
    crate::TrackingError,
    base64::{
        alphabet,
        engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
        Engine,
    },
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Decoder for keys handed out by the tracking service. Padding is optional on input so keys
/// that have lost their trailing `=` in transit still decode.
const KEY_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A shared secret used to sign or verify tracking requests.
///
/// Keys are distributed as base64 text; this holds the decoded bytes. The key material is never
/// exposed through `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    /// The decoded key.
    key: Vec<u8>,
}

impl SigningKey {
    /// Create a `SigningKey` from raw key bytes.
    pub fn from_bytes<B: Into<Vec<u8>>>(key: B) -> Self {
        Self {
            key: key.into(),
        }
    }

    /// Create a `SigningKey` by decoding base64 text.
    pub fn from_base64(encoded: &str) -> Result<Self, TrackingError> {
        match KEY_DECODER.decode(encoded.trim()) {
            Ok(key) => Ok(Self {
                key,
            }),
            Err(e) => Err(TrackingError::InvalidKey(format!("Signing key is not valid base64: {}", e))),
        }
    }

    /// Retrieve the decoded key length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Indicates whether the decoded key is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl AsRef<[u8]> for SigningKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SigningKey")
    }
}

impl Display for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SigningKey")
    }
}

impl FromStr for SigningKey {
    type Err = TrackingError;

    /// Create a new `SigningKey` from base64 text.
    fn from_str(encoded: &str) -> Result<Self, TrackingError> {
        Self::from_base64(encoded)
    }
}

/// Encode a digest as standard, padded base64.
#[inline]
pub(crate) fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
