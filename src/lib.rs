//! qotd fetches the quote of the day from [quotes.rest](https://quotes.rest/) and drives the
//! one-shot state machine behind a screen that displays it.
//!
//! ```no_run
//! use qotd::{Client, PresentationState, Presenter};
//! use std::sync::Arc;
//!
//! # async fn f() {
//! // The screen gets its client passed in explicitly
//! let client = Client::new().with_base_url("https://quotes.rest/".into());
//! let presenter = Presenter::new(Arc::new(client));
//!
//! // Mounting starts the one and only fetch; later calls are ignored
//! presenter.mount();
//!
//! // Redraw on every transition until the screen settles
//! let mut changes = presenter.subscribe();
//! loop {
//!     let state = changes.borrow_and_update().clone();
//!     println!("{}", state.view());
//!     if state.is_terminal() || changes.changed().await.is_err() {
//!         break;
//!     }
//! }
//! # }
//! ```
//!
//! Failures never escape as panics: network, server, and decode errors all end in
//! [`PresentationState::Failed`] with a message fit for display.

#![deny(elided_lifetimes_in_paths)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::missing_errors_doc)]

mod client;
mod error;
mod presenter;
mod quote;
mod view;

pub use crate::client::{Client, QuoteSource};
pub use crate::error::{DecodeError, Error, ErrorCode, ErrorKind, FetchError};
pub use crate::presenter::{PresentationState, Presenter, ViewSnapshot};
pub use crate::quote::Quote;
pub use crate::view::View;
