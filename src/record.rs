//! Data reported to the tracking service.

use {crate::TrackingError, derive_builder::Builder, log::trace};

/// The partner-side identity of a transaction: who is reporting it and in which currency.
///
/// All three values are required and non-empty. A `PartnerIdentity` is immutable once created and is typically
/// reused for every URL built for the transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartnerIdentity {
    /// The partner identifier issued by UNiDAYS.
    partner_id: String,

    /// The partner's own identifier for this transaction.
    transaction_id: String,

    /// ISO 4217 currency code of the order amounts.
    currency: String,
}

impl PartnerIdentity {
    /// Create a new `PartnerIdentity`, rejecting empty values.
    pub fn new<P, T, C>(partner_id: P, transaction_id: T, currency: C) -> Result<Self, TrackingError>
    where
        P: Into<String>,
        T: Into<String>,
        C: Into<String>,
    {
        let partner_id = require("partnerId", partner_id.into())?;
        let transaction_id = require("transactionId", transaction_id.into())?;
        let currency = require("currency", currency.into())?;

        Ok(Self {
            partner_id,
            transaction_id,
            currency,
        })
    }

    /// Retrieve the partner identifier.
    #[inline]
    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    /// Retrieve the transaction identifier.
    #[inline]
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Retrieve the currency code.
    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

fn require(name: &str, value: String) -> Result<String, TrackingError> {
    if value.is_empty() {
        trace!("PartnerIdentity: {} is empty", name);
        Err(TrackingError::MissingParameter(format!("{} is required and cannot be empty.", name)))
    } else {
        Ok(value)
    }
}

/// The financial details of a single redemption.
///
/// Every field is optional. Unset fields, zero amounts, empty strings, and `NaN` are all treated as "not supplied"
/// when the record is serialized; whether that drops the parameter entirely or leaves it blank depends on the
/// parameter.
///
/// ```
/// use unidays_tracking::RedemptionRecord;
///
/// let record = RedemptionRecord {
///     order_total: Some(209.0),
///     code: Some("ABC123".to_string()),
///     new_customer: Some(true),
///     ..Default::default()
/// };
/// assert!(record.member_id.is_none());
///
/// // The same record, through the builder.
/// let built = RedemptionRecord::builder().order_total(209.0).code("ABC123").new_customer(true).build().unwrap();
/// assert_eq!(built, record);
/// ```
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(default, derive(Debug), setter(into, strip_option))]
pub struct RedemptionRecord {
    /// The UNiDAYS member identifier, if known.
    pub member_id: Option<String>,

    /// Total monetary amount paid, after all discounts, including tax and shipping.
    pub order_total: Option<f64>,

    /// Total monetary amount of the UNiDAYS discount applied to items.
    pub items_unidays_discount: Option<f64>,

    /// The discount code used.
    pub code: Option<String>,

    /// Total monetary amount of tax applied to items.
    pub items_tax: Option<f64>,

    /// Total monetary amount of shipping cost before any shipping discount.
    pub shipping_gross: Option<f64>,

    /// Total monetary amount of shipping discount applied.
    pub shipping_discount: Option<f64>,

    /// Total monetary amount of items before any discount.
    pub items_gross: Option<f64>,

    /// Total monetary amount of non-UNiDAYS discounts applied to items.
    pub items_other_discount: Option<f64>,

    /// The UNiDAYS discount, as a percentage.
    pub discount_percentage: Option<f64>,

    /// Whether this is the customer's first order with the partner.
    pub new_customer: Option<bool>,
}

impl RedemptionRecord {
    /// Create a [RedemptionRecordBuilder] to construct a [RedemptionRecord].
    #[inline]
    pub fn builder() -> RedemptionRecordBuilder {
        RedemptionRecordBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::{PartnerIdentity, RedemptionRecord, TrackingError};

    macro_rules! expect_missing {
        ($test:expr, $message:expr) => {
            match $test {
                Err(TrackingError::MissingParameter(msg)) => assert_eq!(msg, $message),
                other => panic!("Expected MissingParameter; got {:?}", other),
            }
        };
    }

    #[test_log::test]
    fn test_requires_all_fields() {
        expect_missing!(PartnerIdentity::new("", "transactionId", "GBP"), "partnerId is required and cannot be empty.");
        expect_missing!(PartnerIdentity::new("partnerId", "", "GBP"), "transactionId is required and cannot be empty.");
        expect_missing!(PartnerIdentity::new("partnerId", "transactionId", ""), "currency is required and cannot be empty.");
    }

    #[test_log::test]
    fn test_accessors() {
        let identity = PartnerIdentity::new("partnerId", "transactionId".to_string(), "GBP").unwrap();
        assert_eq!(identity.partner_id(), "partnerId");
        assert_eq!(identity.transaction_id(), "transactionId");
        assert_eq!(identity.currency(), "GBP");
        assert_eq!(identity, identity.clone());
        assert_eq!(
            format!("{:?}", identity),
            r#"PartnerIdentity { partner_id: "partnerId", transaction_id: "transactionId", currency: "GBP" }"#
        );
    }

    #[test_log::test]
    fn test_record_builder() {
        let record = RedemptionRecord::builder()
            .member_id("memberId")
            .order_total(209)
            .items_tax(34.5)
            .new_customer(false)
            .build()
            .unwrap();
        assert_eq!(record.member_id.as_deref(), Some("memberId"));
        assert_eq!(record.order_total, Some(209.0));
        assert_eq!(record.items_tax, Some(34.5));
        assert_eq!(record.new_customer, Some(false));
        assert!(record.code.is_none());
        assert!(record.discount_percentage.is_none());

        assert_eq!(RedemptionRecord::builder().build().unwrap(), RedemptionRecord::default());
    }
}
