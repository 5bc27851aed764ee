use crate::PresentationState;
use std::fmt;

/// What the quote screen should show for a [`PresentationState`].
///
/// Rendering is left to the host UI; the background image is only exposed as a URL for an
/// image-loading collaborator to fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum View<'a> {
    /// A loading indicator and no error text.
    Loading,
    /// A quote card.
    Quote {
        /// Quote text.
        text: &'a str,
        /// Quote author.
        author: &'a str,
        /// Background image URL.
        background_image_url: &'a str,
    },
    /// The error message as plain text.
    Error(&'a str),
}

impl PresentationState {
    /// Projects this state onto the screen.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        match self {
            PresentationState::Idle | PresentationState::Loading => View::Loading,
            PresentationState::Loaded(quote) => View::Quote {
                text: quote.text(),
                author: quote.author(),
                background_image_url: quote.background_image_url(),
            },
            PresentationState::Failed(error) => View::Error(error.message()),
        }
    }
}

/// Plain-text rendering, for terminals and logs.
impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => f.write_str("Loading"),
            View::Quote {
                text,
                author,
                background_image_url,
            } => write!(f, "{}\n\n{}\n[{}]", text, author, background_image_url),
            View::Error(message) => f.write_str(message),
        }
    }
}
