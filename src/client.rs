use crate::error::{decode_error_body, Error};
use crate::quote::{decode_quote, Quote};
use futures::future::BoxFuture;
use reqwest::RequestBuilder;
use std::borrow::Cow;

const QUOTE_OF_DAY_PATH: &str = "qod";
const LANGUAGE: &str = "en";

/// HTTP client for the quotes.rest API.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) base_url: Cow<'static, str>,
    pub(crate) client: reqwest::Client,
}

impl Client {
    /// Creates a new `Client` with the default base URL, `https://quotes.rest/`. Use
    /// [`Client::with_base_url`] to change the base URL.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // tested to not panic
    pub fn new() -> Client {
        const USER_AGENT: &str = concat!("qotd/", env!("CARGO_PKG_VERSION"));

        Client {
            base_url: Cow::Borrowed("https://quotes.rest/"),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap(),
        }
    }

    /// Creates a new `Client` with a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, mut base_url: String) -> Client {
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = Cow::Owned(base_url);
        self
    }

    /// The base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the English quote of the day.
    ///
    /// Every call is a fresh request; nothing is cached and nothing is retried.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn quote_of_day(&self) -> Result<Quote, Error> {
        let response = self
            .get(QUOTE_OF_DAY_PATH)
            .query(&[("language", LANGUAGE)])
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(%status, body = %String::from_utf8_lossy(&body));

        if !status.is_success() {
            let error = decode_error_body(status, &body);
            tracing::warn!(%error);
            return Err(error);
        }

        let quote = decode_quote(&body).map_err(|kind| Error::Decode { status, kind })?;
        tracing::info!(author = quote.author(), "got quote of the day");
        Ok(quote)
    }

    #[inline]
    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        tracing::info!(path, "Client::get");
        self.client.get(format!("{}{}", self.base_url, path))
    }
}

impl Default for Client {
    fn default() -> Client {
        Client::new()
    }
}

/// Something that can produce the quote of the day.
///
/// [`Client`] is the real implementation; a [`Presenter`][`crate::Presenter`] is generic over
/// this so it can be driven by anything that behaves like the service.
pub trait QuoteSource: Send + Sync + 'static {
    /// Fetches one quote.
    fn quote_of_day(&self) -> BoxFuture<'_, Result<Quote, Error>>;
}

impl QuoteSource for Client {
    fn quote_of_day(&self) -> BoxFuture<'_, Result<Quote, Error>> {
        Box::pin(Client::quote_of_day(self))
    }
}
