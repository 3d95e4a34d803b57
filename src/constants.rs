//! Common constants used throughout the crate.
//!
//! The wire-level names here are part of the contract with the tracking service; changing the
//! spelling or case of any of them invalidates every signature the service receives.
//!
//! Tests that are testing the content of an error message or a URL should not use these
//! constants; they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically. (This can be a bit hard with comments, etc.)

/// Codeless query parameter carrying the student identifier.
pub(crate) const CODELESS_STUDENT_ID: &str = "ud_s";

/// Codeless query parameter carrying the attestation timestamp.
pub(crate) const CODELESS_TIMESTAMP: &str = "ud_t";

/// Default hostname of the tracking service.
pub(crate) const DEFAULT_HOSTNAME: &str = "api.myunidays.com";

/// Default protocol used to reach the tracking service.
pub(crate) const DEFAULT_PROTOCOL: &str = "https";

/// Lowercase hex digits.
pub(crate) const HEX_DIGITS_LOWER: [u8; 16] =
    [b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'a', b'b', b'c', b'd', b'e', b'f'];

/// Uppercase hex digits.
pub(crate) const HEX_DIGITS_UPPER: [u8; 16] =
    [b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F'];

/// Literal value emitted for a new customer.
pub(crate) const NEW_CUSTOMER_TRUE: &str = "True";

/// Query parameter: `Code`
pub(crate) const QP_CODE: &str = "Code";

/// Query parameter: `Currency`
pub(crate) const QP_CURRENCY: &str = "Currency";

/// Query parameter: `ItemsGross`
pub(crate) const QP_ITEMS_GROSS: &str = "ItemsGross";

/// Query parameter: `ItemsOtherDiscount`
pub(crate) const QP_ITEMS_OTHER_DISCOUNT: &str = "ItemsOtherDiscount";

/// Query parameter: `ItemsTax`
pub(crate) const QP_ITEMS_TAX: &str = "ItemsTax";

/// Query parameter: `ItemsUNiDAYSDiscount`
pub(crate) const QP_ITEMS_UNIDAYS_DISCOUNT: &str = "ItemsUNiDAYSDiscount";

/// Query parameter: `MemberId`
pub(crate) const QP_MEMBER_ID: &str = "MemberId";

/// Query parameter: `NewCustomer`
pub(crate) const QP_NEW_CUSTOMER: &str = "NewCustomer";

/// Query parameter: `OrderTotal`
pub(crate) const QP_ORDER_TOTAL: &str = "OrderTotal";

/// Query parameter: `PartnerId`
pub(crate) const QP_PARTNER_ID: &str = "PartnerId";

/// Query parameter: `ShippingDiscount`
pub(crate) const QP_SHIPPING_DISCOUNT: &str = "ShippingDiscount";

/// Query parameter: `ShippingGross`
pub(crate) const QP_SHIPPING_GROSS: &str = "ShippingGross";

/// Query parameter: `Signature`
pub(crate) const QP_SIGNATURE: &str = "Signature";

/// Query parameter: `TransactionId`
pub(crate) const QP_TRANSACTION_ID: &str = "TransactionId";

/// Query parameter: `UNiDAYSDiscountPercentage`
pub(crate) const QP_UNIDAYS_DISCOUNT_PERCENTAGE: &str = "UNiDAYSDiscountPercentage";

/// Path of the script-embed tracking endpoint.
pub(crate) const SCRIPT_ENDPOINT: &str = "/tracking/v1.2/redemption/js";

/// Path of the server-to-server tracking endpoint.
pub(crate) const SERVER_ENDPOINT: &str = "/tracking/v1.2/redemption";

/// The length of a SHA-512 digest in bytes.
pub(crate) const SHA512_OUTPUT_LEN: usize = 64;

/// Suffix appended to every URL when the client is in test mode.
pub(crate) const TEST_MODE_SUFFIX: &str = "&Test=True";

/// User agent sent with every redemption submitted by this crate.
pub(crate) const USER_AGENT: &str = "UNiDAYS Rust tracking SDK v1.2";
