use crate::{FetchError, Quote, QuoteSource, View};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, OnceLock};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Where a [`Presenter`] is in its one-shot lifecycle.
///
/// Transitions only go forward: `Idle → Loading → Loaded | Failed`. `Loaded` and `Failed` are
/// terminal.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum PresentationState {
    /// Nothing has been fetched yet.
    #[default]
    Idle,
    /// The fetch is in flight.
    Loading,
    /// The fetch produced a quote.
    Loaded(Quote),
    /// The fetch failed.
    Failed(FetchError),
}

impl PresentationState {
    /// Returns true for `Loaded` and `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PresentationState::Loaded(_) | PresentationState::Failed(_)
        )
    }
}

/// Drives a single quote screen.
///
/// A presenter fetches at most once in its lifetime. Call [`Presenter::mount`] when the screen is
/// created; dropping the presenter tears the screen down and cancels a fetch that hasn't finished.
///
/// ```no_run
/// use qotd::{Client, Presenter};
/// use std::sync::Arc;
///
/// # async fn f() {
/// let presenter = Presenter::new(Arc::new(Client::new()));
/// presenter.mount();
/// println!("{}", presenter.settled().await.view());
/// # }
/// ```
#[derive(Debug)]
pub struct Presenter<S> {
    source: Arc<S>,
    state: watch::Sender<PresentationState>,
    task: OnceLock<AbortHandle>,
}

impl<S: QuoteSource> Presenter<S> {
    /// Creates an idle presenter that will fetch from `source`.
    #[must_use]
    pub fn new(source: Arc<S>) -> Presenter<S> {
        Presenter {
            source,
            state: watch::Sender::new(PresentationState::Idle),
            task: OnceLock::new(),
        }
    }

    /// Starts the fetch if it hasn't been started yet.
    ///
    /// Returns true only for the call that moved the presenter from `Idle` to `Loading`; every
    /// other call, including ones racing it, does nothing and returns false. Outside of a Tokio
    /// runtime nothing can be spawned, so the presenter stays `Idle` and this returns false.
    #[tracing::instrument(skip(self))]
    pub fn mount(&self) -> bool {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(%err, "mount called outside of a Tokio runtime");
                return false;
            }
        };

        let started = self.state.send_if_modified(|state| {
            if *state == PresentationState::Idle {
                *state = PresentationState::Loading;
                true
            } else {
                false
            }
        });
        if !started {
            tracing::debug!("already mounted, ignoring");
            return false;
        }

        let source = Arc::clone(&self.source);
        let state = self.state.clone();
        let handle = runtime.spawn(async move {
            let fetch = AssertUnwindSafe(async { source.quote_of_day().await }).catch_unwind();
            let next = match fetch.await {
                Ok(Ok(quote)) => PresentationState::Loaded(quote),
                Ok(Err(error)) => {
                    tracing::warn!(kind = %crate::ErrorKind::from(&error), %error, "fetch failed");
                    PresentationState::Failed(error.into())
                }
                Err(_) => {
                    tracing::error!("quote source panicked");
                    PresentationState::Failed(FetchError::fault())
                }
            };
            state.send_replace(next);
        });
        // Only the winner of the Idle check above reaches this point.
        let _ = self.task.set(handle.abort_handle());
        true
    }

    /// A snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> PresentationState {
        self.state.borrow().clone()
    }

    /// What the screen should show right now.
    ///
    /// Owned rather than borrowed, since the state may change at any time.
    #[must_use]
    pub fn view(&self) -> ViewSnapshot {
        ViewSnapshot(self.state())
    }

    /// Subscribes to state changes, for a UI loop that redraws on every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PresentationState> {
        self.state.subscribe()
    }

    /// Waits until the presenter reaches `Loaded` or `Failed` and returns that state.
    ///
    /// Never returns if [`Presenter::mount`] is never called.
    #[allow(clippy::let_and_return)] // the `Ref` temporary must drop before `receiver`
    pub async fn settled(&self) -> PresentationState {
        let mut receiver = self.state.subscribe();
        // The sender lives in `self`, so the channel can't close while we borrow it.
        let state = match receiver.wait_for(PresentationState::is_terminal).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }
}

impl<S> Drop for Presenter<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get() {
            if !task.is_finished() {
                tracing::debug!("presenter dropped mid-fetch, cancelling");
            }
            task.abort();
        }
    }
}

/// An owned [`PresentationState`] that can be rendered with [`ViewSnapshot::as_view`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewSnapshot(PresentationState);

impl ViewSnapshot {
    /// Borrows the view.
    #[must_use]
    pub fn as_view(&self) -> View<'_> {
        self.0.view()
    }
}

impl std::fmt::Display for ViewSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.as_view(), f)
    }
}
