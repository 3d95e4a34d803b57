//! The `unidays_tracking` crate implements the partner side of UNiDAYS redemption tracking and codeless
//! verification.
//!
//! It does two unrelated jobs that share one signing discipline (HMAC-SHA512 over an exact, canonical query
//! string, with base64-encoded keys and signatures):
//!
//! * [`CodelessValidator`] checks that a `(student id, timestamp)` pair handed to your site was issued by UNiDAYS.
//! * [`RedemptionClient`] builds the tracking URLs for a completed order, optionally signed, and can submit the
//!   redemption to the tracking service directly.
//!
//! Every byte of the query string matters: parameter order, which parameters are blank versus absent, the case of
//! percent-escapes, and two-decimal number formatting are all reproduced by the service when it checks the
//! signature.
//!
//! # Example
//! ```rust
//! use unidays_tracking::{ClientOptions, PartnerIdentity, RedemptionClient, RedemptionRecord, SigningKey};
//!
//! let identity = PartnerIdentity::new("a partner Id", "the transaction id", "GBP").unwrap();
//! let options = ClientOptions::builder().test_mode(true).build().unwrap();
//! let client = RedemptionClient::with_transport(identity, options, ());
//!
//! let record = RedemptionRecord {
//!     order_total: Some(209.00),
//!     items_unidays_discount: Some(13.00),
//!     code: Some("a code".to_string()),
//!     new_customer: Some(true),
//!     ..Default::default()
//! };
//!
//! assert_eq!(
//!     client.get_tracking_script_url(&record),
//!     "https://api.myunidays.com/tracking/v1.2/redemption/js?PartnerId=a+partner+Id\
//!      &TransactionId=the+transaction+id&MemberId=&Currency=GBP&OrderTotal=209.00\
//!      &ItemsUNiDAYSDiscount=13.00&Code=a+code&NewCustomer=True&Test=True"
//! );
//!
//! let key: SigningKey = "AAAAAA==".parse().unwrap();
//! let signed = client.get_tracking_server_url(&record, &key);
//! assert!(signed.contains("&Signature="));
//! ```
//!
//! Submitting a redemption needs a transport. [`RedemptionClient::new`] wires in an [`HttpTransport`] backed by
//! `reqwest`; tests and alternative HTTP stacks can supply any [`tower::Service`] through
//! [`RedemptionClient::with_transport`] (see [`transport_fn`]).
//!
//! ```rust
//! use {
//!     bytes::Bytes,
//!     http::{Request, Response},
//!     tower::BoxError,
//!     unidays_tracking::{
//!         transport_fn, ClientOptions, PartnerIdentity, RedemptionClient, RedemptionRecord, SigningKey,
//!     },
//! };
//!
//! # tokio_test::block_on(async {
//! let transport = transport_fn(|req: Request<()>| async move {
//!     assert_eq!(req.method(), "POST");
//!     Ok::<_, BoxError>(Response::new(Bytes::from_static(b"ok")))
//! });
//!
//! let identity = PartnerIdentity::new("partnerId", "transactionId", "GBP").unwrap();
//! let client = RedemptionClient::with_transport(identity, ClientOptions::default(), transport);
//! let key = SigningKey::from_base64("AAAAAA==").unwrap();
//!
//! let response = client.record_redemption(&RedemptionRecord::default(), &key).await.unwrap();
//! assert_eq!(response.status(), 200);
//! # });
//! ```
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

#[cfg(any(doc, feature = "unstable"))]
pub mod canonical;
#[cfg(not(any(doc, feature = "unstable")))]
mod canonical;

mod codeless;
mod constants;
mod crypto;
mod error;
mod record;
mod redemption;
mod signing_key;
mod transport;

pub use crate::{
    codeless::CodelessValidator,
    error::TrackingError,
    record::{PartnerIdentity, RedemptionRecord, RedemptionRecordBuilder, RedemptionRecordBuilderError},
    redemption::{ClientOptions, ClientOptionsBuilder, ClientOptionsBuilderError, RedemptionClient},
    signing_key::SigningKey,
    transport::{transport_fn, HttpTransport},
};
