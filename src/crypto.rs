use {
    crate::constants::SHA512_OUTPUT_LEN,
    hmac::{Hmac, Mac},
    sha2::Sha512,
};

type HmacSha512 = Hmac<Sha512>;

/// Wrapper function to form a HMAC-SHA512 operation.
#[inline(always)]
pub(crate) fn hmac_sha512(key: &[u8], value: &[u8]) -> [u8; SHA512_OUTPUT_LEN] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(value);

    let mut result = [0u8; SHA512_OUTPUT_LEN];
    result.copy_from_slice(&mac.finalize().into_bytes());
    result
}

#[cfg(test)]
mod tests {
    use super::hmac_sha512;

    #[test_log::test]
    fn test_rfc4231_case_2() {
        // RFC 4231, test case 2: key "Jefe", data "what do ya want for nothing?"
        let digest = hmac_sha512(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(&digest[..8], &[0x16, 0x4b, 0x7a, 0x7b, 0xfc, 0xf8, 0x19, 0xe2]);
        assert_eq!(&digest[56..], &[0x63, 0x6e, 0x07, 0x0a, 0x38, 0xbc, 0xe7, 0x37]);
    }

    #[test_log::test]
    fn test_key_sensitive() {
        let a = hmac_sha512(b"key-a", b"?PartnerId=x");
        let b = hmac_sha512(b"key-b", b"?PartnerId=x");
        assert_ne!(a, b);
        assert_eq!(a, hmac_sha512(b"key-a", b"?PartnerId=x"));
    }

    #[test_log::test]
    fn test_empty_key() {
        // A zero-length key is legal for HMAC.
        let digest = hmac_sha512(b"", b"");
        assert_eq!(digest.len(), 64);
    }
}
