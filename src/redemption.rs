//! Signed redemption tracking.
//!
//! A [`RedemptionClient`] turns a [`RedemptionRecord`] into one of three tracking URLs, or submits it directly:
//!
//! | Operation | Path | Signed |
//! |-----------|------|--------|
//! | [`get_tracking_script_url`][RedemptionClient::get_tracking_script_url] | `/tracking/v1.2/redemption/js` | no |
//! | [`get_signed_tracking_script_url`][RedemptionClient::get_signed_tracking_script_url] | `/tracking/v1.2/redemption/js` | yes |
//! | [`get_tracking_server_url`][RedemptionClient::get_tracking_server_url] | `/tracking/v1.2/redemption` | yes |
//! | [`record_redemption`][RedemptionClient::record_redemption] | `/tracking/v1.2/redemption` (POST) | yes |

use {
    crate::{
        canonical::{canonical_query_string, sign_query_string},
        constants::*,
        HttpTransport, PartnerIdentity, RedemptionRecord, SigningKey, TrackingError,
    },
    bytes::Bytes,
    derive_builder::Builder,
    http::{header::USER_AGENT as HDR_USER_AGENT, Request, Response},
    log::debug,
    std::{
        any::type_name,
        fmt::{Debug, Formatter, Result as FmtResult},
    },
    tower::{BoxError, Service, ServiceExt},
};

/// Where and how tracking URLs are addressed.
///
/// ClientOptions structs are immutable. Use [`ClientOptionsBuilder`] to override the defaults.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(derive(Debug))]
pub struct ClientOptions {
    /// Hostname of the tracking service. Defaults to `api.myunidays.com`.
    #[builder(setter(into), default = "DEFAULT_HOSTNAME.to_string()")]
    hostname: String,

    /// URL scheme. Defaults to `https`.
    #[builder(setter(into), default = "DEFAULT_PROTOCOL.to_string()")]
    protocol: String,

    /// When set, every URL ends with `&Test=True` so the service treats the redemption as a test.
    #[builder(default)]
    test_mode: bool,
}

impl ClientOptions {
    /// Create a [ClientOptionsBuilder] to construct a [ClientOptions].
    #[inline]
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Retrieve the hostname of the tracking service.
    #[inline]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Retrieve the URL scheme.
    #[inline]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Indicates whether URLs are marked as test redemptions.
    #[inline]
    pub fn test_mode(&self) -> bool {
        self.test_mode
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            test_mode: false,
        }
    }
}

/// Builds and submits redemption tracking requests for a single partner transaction.
///
/// The client holds no mutable state, so a single instance can be shared freely. The transport is cloned for each
/// submission.
#[derive(Clone)]
pub struct RedemptionClient<T = HttpTransport> {
    identity: PartnerIdentity,
    options: ClientOptions,
    transport: T,
}

impl RedemptionClient<HttpTransport> {
    /// Create a client with default options and the default HTTP transport.
    ///
    /// Fails with [`TrackingError::MissingParameter`] if any of the arguments is empty.
    pub fn new<P, I, C>(partner_id: P, transaction_id: I, currency: C) -> Result<Self, TrackingError>
    where
        P: Into<String>,
        I: Into<String>,
        C: Into<String>,
    {
        Self::with_options(partner_id, transaction_id, currency, ClientOptions::default())
    }

    /// Create a client with the given options and the default HTTP transport.
    pub fn with_options<P, I, C>(
        partner_id: P,
        transaction_id: I,
        currency: C,
        options: ClientOptions,
    ) -> Result<Self, TrackingError>
    where
        P: Into<String>,
        I: Into<String>,
        C: Into<String>,
    {
        let identity = PartnerIdentity::new(partner_id, transaction_id, currency)?;
        Ok(Self::with_transport(identity, options, HttpTransport::new()?))
    }
}

impl<T> RedemptionClient<T> {
    /// Create a client that submits redemptions through `transport`.
    pub fn with_transport(identity: PartnerIdentity, options: ClientOptions, transport: T) -> Self {
        Self {
            identity,
            options,
            transport,
        }
    }

    /// Retrieve the partner identity.
    #[inline]
    pub fn identity(&self) -> &PartnerIdentity {
        &self.identity
    }

    /// Retrieve the options.
    #[inline]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Serialize `record` into the canonical query string (with its leading `?`), unsigned.
    pub fn to_query_string(&self, record: &RedemptionRecord) -> String {
        canonical_query_string(&self.identity, record)
    }

    /// Build the unsigned URL for the tracking script, for embedding in a page.
    pub fn get_tracking_script_url(&self, record: &RedemptionRecord) -> String {
        self.build_url(SCRIPT_ENDPOINT, &self.to_query_string(record))
    }

    /// Build the signed URL for the tracking script.
    pub fn get_signed_tracking_script_url(&self, record: &RedemptionRecord, key: &SigningKey) -> String {
        let query = sign_query_string(&self.to_query_string(record), key);
        self.build_url(SCRIPT_ENDPOINT, &query)
    }

    /// Build the signed server-to-server URL, suitable for a tracking pixel or a direct request.
    pub fn get_tracking_server_url(&self, record: &RedemptionRecord, key: &SigningKey) -> String {
        let query = sign_query_string(&self.to_query_string(record), key);
        self.build_url(SERVER_ENDPOINT, &query)
    }

    fn build_url(&self, path: &str, query: &str) -> String {
        let mut url = format!("{}://{}{}{}", self.options.protocol, self.options.hostname, path, query);
        if self.options.test_mode {
            url.push_str(TEST_MODE_SUFFIX);
        }
        url
    }
}

impl<T> RedemptionClient<T>
where
    T: Service<Request<()>, Response = Response<Bytes>, Error = BoxError> + Clone,
{
    /// Submit the redemption to the tracking service.
    ///
    /// This POSTs to the signed server URL and hands back whatever the service answered; the status and body are
    /// not interpreted. Transport failures are returned as [`TrackingError::Transport`] without retrying.
    pub async fn record_redemption(
        &self,
        record: &RedemptionRecord,
        key: &SigningKey,
    ) -> Result<Response<Bytes>, TrackingError> {
        let url = self.get_tracking_server_url(record, key);
        let request = Request::post(url.as_str()).header(HDR_USER_AGENT, USER_AGENT).body(())?;

        debug!("record_redemption: POST {}", url);
        let response = self.transport.clone().oneshot(request).await?;
        debug!("record_redemption: tracking service returned {}", response.status());

        Ok(response)
    }
}

impl<T> Debug for RedemptionClient<T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("RedemptionClient")
            .field("identity", &self.identity)
            .field("options", &self.options)
            .field("transport", &type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            transport_fn, ClientOptions, PartnerIdentity, RedemptionClient, RedemptionRecord, SigningKey,
            TrackingError,
        },
        bytes::Bytes,
        http::{Request, Response},
        tower::BoxError,
    };

    fn client(options: ClientOptions) -> RedemptionClient<()> {
        let identity = PartnerIdentity::new("partnerId", "transaction/Id", "GBP").unwrap();
        RedemptionClient::with_transport(identity, options, ())
    }

    #[test_log::test]
    fn test_options_defaults() {
        let options = ClientOptions::builder().build().unwrap();
        assert_eq!(options, ClientOptions::default());
        assert_eq!(options.hostname(), "api.myunidays.com");
        assert_eq!(options.protocol(), "https");
        assert!(!options.test_mode());

        let options =
            ClientOptions::builder().hostname("localhost:8080").protocol("http").test_mode(true).build().unwrap();
        assert_eq!(options.hostname(), "localhost:8080");
        assert_eq!(options.protocol(), "http");
        assert!(options.test_mode());
    }

    #[test_log::test]
    fn test_new_validates() {
        assert!(matches!(RedemptionClient::new("", "transactionId", "GBP"), Err(TrackingError::MissingParameter(_))));
        assert!(matches!(RedemptionClient::new("partnerId", "", "GBP"), Err(TrackingError::MissingParameter(_))));
        assert!(matches!(
            RedemptionClient::new("partnerId", "transactionId", ""),
            Err(TrackingError::MissingParameter(_))
        ));

        let client = RedemptionClient::new("partnerId", "transactionId", "GBP").unwrap();
        assert_eq!(client.identity().partner_id(), "partnerId");
        assert_eq!(client.identity().transaction_id(), "transactionId");
        assert_eq!(client.identity().currency(), "GBP");
    }

    #[test_log::test]
    fn test_custom_host() {
        let options = ClientOptions::builder().hostname("localhost:8080").protocol("http").build().unwrap();
        let url = client(options).get_tracking_script_url(&RedemptionRecord::default());
        assert_eq!(
            url,
            "http://localhost:8080/tracking/v1.2/redemption/js?PartnerId=partnerId&TransactionId=transaction%2FId\
             &MemberId=&Currency=GBP&ItemsUNiDAYSDiscount=&NewCustomer="
        );
    }

    #[test_log::test]
    fn test_test_mode_suffix() {
        let key = SigningKey::from_bytes(b"key".to_vec());
        let record = RedemptionRecord {
            order_total: Some(7.07777777),
            ..Default::default()
        };
        let test_client = client(ClientOptions::builder().test_mode(true).build().unwrap());
        let live_client = client(ClientOptions::default());

        for (test_url, live_url) in [
            (test_client.get_tracking_script_url(&record), live_client.get_tracking_script_url(&record)),
            (
                test_client.get_signed_tracking_script_url(&record, &key),
                live_client.get_signed_tracking_script_url(&record, &key),
            ),
            (test_client.get_tracking_server_url(&record, &key), live_client.get_tracking_server_url(&record, &key)),
        ] {
            assert!(test_url.ends_with("&Test=True"));
            assert_eq!(test_url.matches("&Test=True").count(), 1);
            assert!(!live_url.contains("Test=True"));
            // Test mode does not change the signed payload.
            assert_eq!(test_url, format!("{}&Test=True", live_url));
            assert!(live_url.contains("&OrderTotal=7.08&"));
        }
    }

    #[test_log::test]
    fn test_debug() {
        let c = client(ClientOptions::default());
        let debug = format!("{:?}", c);
        assert!(debug.starts_with("RedemptionClient { identity: PartnerIdentity"));
        assert!(debug.contains(r#"transport: "()""#));
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_hostname() {
        let identity = PartnerIdentity::new("partnerId", "transactionId", "GBP").unwrap();
        let options = ClientOptions::builder().hostname("bad host").build().unwrap();
        // Reaching the transport would surface as TrackingError::Transport.
        let transport = transport_fn(|_req: Request<()>| async move {
            Err::<Response<Bytes>, BoxError>("transport must not be called".into())
        });
        let client = RedemptionClient::with_transport(identity, options, transport);
        let key = SigningKey::from_bytes(b"key".to_vec());

        match client.record_redemption(&RedemptionRecord::default(), &key).await {
            Err(TrackingError::InvalidUrl(_)) => (),
            other => panic!("Expected InvalidUrl; got {:?}", other),
        }
    }
}
