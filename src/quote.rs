use crate::error::DecodeError;
use serde::Deserialize;

/// The quote of the day.
///
/// A `Quote` can only be obtained by decoding a response from the service, so every field is
/// guaranteed non-empty.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Quote {
    text: String,
    author: String,
    background_image_url: String,
}

impl Quote {
    /// The quote itself.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Who said it.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// URL of the background image to display behind the quote.
    #[must_use]
    pub fn background_image_url(&self) -> &str {
        &self.background_image_url
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(text: &str, author: &str, background: &str) -> Quote {
        Quote {
            text: text.into(),
            author: author.into(),
            background_image_url: background.into(),
        }
    }
}

#[derive(Deserialize)]
struct QuoteOfDayResponse {
    contents: Option<Contents>,
}

#[derive(Deserialize)]
struct Contents {
    quotes: Option<Vec<ApiQuote>>,
}

#[derive(Debug, Deserialize)]
struct ApiQuote {
    quote: String,
    author: String,
    background: String,
}

impl QuoteOfDayResponse {
    /// Takes the first quote listed under `contents.quotes`.
    fn into_quote(self) -> Result<Quote, DecodeError> {
        let quotes = self
            .contents
            .and_then(|contents| contents.quotes)
            .ok_or(DecodeError::MissingQuotes)?;
        let ApiQuote {
            quote,
            author,
            background,
        } = quotes.into_iter().next().ok_or(DecodeError::EmptyQuotes)?;

        for (name, value) in [
            ("quote", &quote),
            ("author", &author),
            ("background", &background),
        ] {
            if value.is_empty() {
                return Err(DecodeError::EmptyField(name));
            }
        }

        Ok(Quote {
            text: quote,
            author,
            background_image_url: background,
        })
    }
}

/// Decodes a success body into the first quote it lists.
pub(crate) fn decode_quote(body: &[u8]) -> Result<Quote, DecodeError> {
    serde_json::from_slice::<QuoteOfDayResponse>(body)?.into_quote()
}
