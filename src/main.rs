use hrdesk::app::{self, State};
use hrdesk::config;
use hrdesk::store::{self, AppState, Store};
use tracing_subscriber::EnvFilter;

fn boot() -> (State, iced::Task<app::Message>) {
    let config = config::load();

    let path = store::default_path();
    let store = match Store::hydrate(&path) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("{}, using in-memory state", e);
            Store::in_memory(AppState::default())
        }
    };

    State::new(config, store)
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting hrdesk");

    iced::daemon(boot, State::update, State::view)
        .title(State::title)
        .subscription(State::subscription)
        .theme(State::theme)
        .style(State::style)
        .run()
}
