//! Canonicalization functionality for signature generation and validation.
//!
//! The tracking service recomputes every signature from the query string it receives, so the
//! byte sequence produced here is the contract: parameter order, which parameters are dropped
//! versus left blank, percent-encoding case, and number formatting all have to match exactly.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::{
        constants::*,
        crypto::hmac_sha512,
        signing_key::{base64_encode, SigningKey},
        PartnerIdentity, RedemptionRecord,
    },
    log::trace,
    qualifier_attr::qualifiers,
};

/// Whether a parameter is written when the record does not supply a value for it.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Presence {
    /// `Name=` is always written; the value is blank when not supplied.
    Always,

    /// The parameter, including its `&Name=` prefix, is dropped when not supplied.
    WhenSupplied,
}

/// Produces the encoded value of a parameter, or `None` if the record does not supply one.
type Extractor = fn(&PartnerIdentity, &RedemptionRecord) -> Option<String>;

/// A single parameter of the canonical redemption query string.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct QueryField {
    /// The parameter name as it appears on the wire.
    name: &'static str,

    /// What to do when there is no value.
    presence: Presence,

    /// Where the value comes from.
    value: Extractor,
}

/// The redemption parameters, in wire order.
const QUERY_FIELDS: [QueryField; 14] = [
    QueryField {
        name: QP_PARTNER_ID,
        presence: Presence::Always,
        value: |identity, _| Some(encode_string_value(identity.partner_id())),
    },
    QueryField {
        name: QP_TRANSACTION_ID,
        presence: Presence::Always,
        value: |identity, _| Some(encode_string_value(identity.transaction_id())),
    },
    QueryField {
        name: QP_MEMBER_ID,
        presence: Presence::Always,
        value: |_, record| supplied_string(record.member_id.as_deref()),
    },
    QueryField {
        name: QP_CURRENCY,
        presence: Presence::Always,
        value: |identity, _| Some(encode_string_value(identity.currency())),
    },
    QueryField {
        name: QP_ORDER_TOTAL,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.order_total),
    },
    QueryField {
        name: QP_ITEMS_UNIDAYS_DISCOUNT,
        presence: Presence::Always,
        value: |_, record| supplied_number(record.items_unidays_discount),
    },
    QueryField {
        name: QP_CODE,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_string(record.code.as_deref()),
    },
    QueryField {
        name: QP_ITEMS_TAX,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.items_tax),
    },
    QueryField {
        name: QP_SHIPPING_GROSS,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.shipping_gross),
    },
    QueryField {
        name: QP_SHIPPING_DISCOUNT,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.shipping_discount),
    },
    QueryField {
        name: QP_ITEMS_GROSS,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.items_gross),
    },
    QueryField {
        name: QP_ITEMS_OTHER_DISCOUNT,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.items_other_discount),
    },
    QueryField {
        name: QP_UNIDAYS_DISCOUNT_PERCENTAGE,
        presence: Presence::WhenSupplied,
        value: |_, record| supplied_number(record.discount_percentage),
    },
    QueryField {
        name: QP_NEW_CUSTOMER,
        presence: Presence::Always,
        value: |_, record| match record.new_customer {
            Some(true) => Some(NEW_CUSTOMER_TRUE.to_string()),
            _ => None,
        },
    },
];

/// Build the canonical query string for a redemption, including the leading `?`.
///
/// This is both the query of every tracking URL and the exact byte sequence that is signed.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonical_query_string(identity: &PartnerIdentity, record: &RedemptionRecord) -> String {
    let mut result = String::with_capacity(512);

    for field in QUERY_FIELDS.iter() {
        let value = (field.value)(identity, record);
        if value.is_none() && field.presence == Presence::WhenSupplied {
            continue;
        }

        result.push(if result.is_empty() {
            '?'
        } else {
            '&'
        });
        result.push_str(field.name);
        result.push('=');
        if let Some(value) = value {
            result.push_str(&value);
        }
    }

    trace!("Canonical query string: {}", result);
    result
}

/// Append `&Signature=` and the signature over `query_string` to `query_string`.
///
/// The HMAC-SHA512 covers the exact bytes passed in (including any leading `?`). The base64 digest is
/// string-encoded, so `+`, `/`, and `=` become `%2B`, `%2F`, and `%3D`.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn sign_query_string(query_string: &str, key: &SigningKey) -> String {
    let signature = base64_encode(&hmac_sha512(key.as_ref(), query_string.as_bytes()));
    let mut result = String::with_capacity(query_string.len() + 128);
    result.push_str(query_string);
    result.push('&');
    result.push_str(QP_SIGNATURE);
    result.push('=');
    result.push_str(&encode_string_value(&signature));
    result
}

/// Build the payload a codeless hash is computed over: `?ud_s=<student>&ud_t=<timestamp>`, with every
/// percent-escape in lowercase hex.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn codeless_query_string(student_id: &str, timestamp: &str) -> String {
    format!(
        "?{}={}&{}={}",
        CODELESS_STUDENT_ID,
        uri_encode_component(student_id, &HEX_DIGITS_LOWER, false),
        CODELESS_TIMESTAMP,
        uri_encode_component(timestamp, &HEX_DIGITS_LOWER, false)
    )
}

/// Encode a string parameter value: URI-component encoding with uppercase escapes and spaces as `+`.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn encode_string_value(value: &str) -> String {
    uri_encode_component(value, &HEX_DIGITS_UPPER, true)
}

/// Encode a monetary or percentage value: rounded half away from zero to two decimal places and always
/// written with exactly two fraction digits (`7.07777777` → `7.08`, `209` → `209.00`).

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn encode_number_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;

    // -0.001 rounds to -0.0, which would otherwise print as "-0.00".
    let rounded = if rounded == 0.0 {
        0.0
    } else {
        rounded
    };

    format!("{:.2}", rounded)
}

/// Indicates whether the specified byte can be left as-is by URI component encoding. This is the RFC 3986
/// unreserved set plus the sub-delimiters `!`, `*`, `'`, `(`, and `)`.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
fn is_uri_component_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

/// Percent-encode the UTF-8 bytes of `value` using the given hex digit set. If `space_as_plus` is set, spaces
/// are written as `+` rather than `%20`.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn uri_encode_component(value: &str, hex_digits: &[u8; 16], space_as_plus: bool) -> String {
    let mut result = String::with_capacity(value.len() * 3);

    for c in value.bytes() {
        if is_uri_component_unreserved(c) {
            result.push(c as char);
        } else if c == b' ' && space_as_plus {
            result.push('+');
        } else {
            result.push('%');
            result.push(hex_digits[((c >> 4) & 0xf) as usize] as char);
            result.push(hex_digits[(c & 0xf) as usize] as char);
        }
    }

    result
}

/// The encoded value of a string field, or `None` if it is absent or empty.
fn supplied_string(value: Option<&str>) -> Option<String> {
    match value {
        Some(s) if !s.is_empty() => Some(encode_string_value(s)),
        _ => None,
    }
}

/// The encoded value of a numeric field, or `None` if it is absent, zero, or `NaN`.
fn supplied_number(value: Option<f64>) -> Option<String> {
    match value {
        Some(n) if n != 0.0 && !n.is_nan() => Some(encode_number_value(n)),
        _ => None,
    }
}
