//! Cafe Finder: search cafes and browse previously found places
//!
//! Usage:
//!   cafe-finder                   - Open the search window
//!   cafe-finder search <keyword>  - Search once and print the place
//!   cafe-finder history           - Print previously found places
//!   cafe-finder help              - Show help

mod app;
mod backend;
mod commands;
mod config;
mod error;
mod state;
mod ui;

use std::env;
use std::sync::Arc;

use app::CafeFinder;
use backend::BackendClient;
use commands::Command;
use config::Config;
use iced::{window, Size};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // try_init: a subscriber may already be installed
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Arc::new(Config::load());

    match Command::parse(&args) {
        Command::Gui => return start_gui(config),
        Command::Help => println!("{}", Command::help_text()),
        Command::Unknown(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run 'cafe-finder help' for usage");
        }
        Command::Config => match serde_json::to_string_pretty(config.as_ref()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        },
        Command::Search { keyword } => {
            let backend = BackendClient::new(config);
            block_on(async {
                match backend.search(&keyword).await {
                    Ok(place) => print!("{}", ui::report::place(&place)),
                    Err(e) => {
                        tracing::error!("Search failed: {}", e);
                        eprintln!("{}", ui::search::error_message(&e));
                    }
                }
            });
        }
        Command::History => {
            let backend = BackendClient::new(config);
            block_on(async {
                match backend.history().await {
                    Ok(entries) => print!("{}", ui::report::history(&entries)),
                    Err(e) => {
                        tracing::error!("Error fetching history data: {}", e);
                        eprintln!("{}", ui::history::LOAD_FAILED);
                    }
                }
            });
        }
    }

    Ok(())
}

fn block_on(future: impl std::future::Future<Output = ()>) {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(future),
        Err(e) => eprintln!("Failed to create tokio runtime: {}", e),
    }
}

fn start_gui(config: Arc<Config>) -> iced::Result {
    tracing::info!("Starting Cafe Finder (user {})", config.user_id);

    iced::application(CafeFinder::title, CafeFinder::update, CafeFinder::view)
        .subscription(CafeFinder::subscription)
        .theme(CafeFinder::theme)
        .window(window::Settings {
            size: Size::new(800.0, 900.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || CafeFinder::new(config))
}
