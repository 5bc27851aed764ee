#![deny(elided_lifetimes_in_paths)]
#![warn(clippy::pedantic)]

use anyhow::Result;
use qotd::{Client, Presenter};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let client = match std::env::var("QOTD_BASE_URL") {
        Ok(base_url) => Client::new().with_base_url(base_url),
        Err(std::env::VarError::NotPresent) => Client::new(),
        Err(err) => return Err(err.into()),
    };

    let presenter = Presenter::new(Arc::new(client));
    presenter.mount();

    let mut changes = presenter.subscribe();
    loop {
        let state = changes.borrow_and_update().clone();
        println!("{}\n", state.view());
        if state.is_terminal() || changes.changed().await.is_err() {
            break;
        }
    }

    Ok(())
}
