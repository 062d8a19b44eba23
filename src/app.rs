//! Application shell: navigation between the screens and their requests
//!
//! Screens only return `Action`s; the shell turns them into tasks against
//! the backend and routes the results back as messages.

use std::sync::Arc;

use iced::widget::{button, column, container, row, text, image};
use iced::{Element, Length, Padding, Subscription, Task, Theme};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::ui::history::{self, HistoryView};
use crate::ui::search::{self, SearchView};
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Search,
    History,
}

/// The mounted screen. Replacing it unmounts the previous one.
#[derive(Debug)]
pub enum Screen {
    Search(SearchView),
    History(HistoryView),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Search(_) => Route::Search,
            Screen::History(_) => Route::History,
        }
    }
}

pub struct CafeFinder {
    backend: BackendClient,
    screen: Screen,
    /// Bumped on every mount of the history screen.
    mounts: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    Search(search::Message),
    History(history::Message),
}

impl CafeFinder {
    pub fn new(config: Arc<Config>) -> (Self, Task<Message>) {
        let app = Self {
            backend: BackendClient::new(config),
            screen: Screen::Search(SearchView::new()),
            mounts: 0,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match self.route() {
            Route::Search => String::from("Cafe Finder"),
            Route::History => String::from("Cafe Finder - History"),
        }
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route),

            Message::Search(message) => match &mut self.screen {
                Screen::Search(view) => {
                    let action = view.update(message);
                    self.perform_search(action)
                }
                _ => {
                    tracing::debug!("Search message after unmount: {:?}", message);
                    Task::none()
                }
            },

            Message::History(message) => match &mut self.screen {
                Screen::History(view) => {
                    let action = view.update(message);
                    self.perform_history(action)
                }
                _ => {
                    tracing::debug!("History message after unmount: {:?}", message);
                    Task::none()
                }
            },
        }
    }

    fn navigate(&mut self, route: Route) -> Task<Message> {
        if route == self.screen.route() {
            return Task::none();
        }

        tracing::info!("Navigating to {:?}", route);
        match route {
            Route::Search => {
                self.screen = Screen::Search(SearchView::new());
                Task::none()
            }
            Route::History => {
                self.mounts += 1;
                let (view, action) = HistoryView::new(self.mounts);
                self.screen = Screen::History(view);
                self.perform_history(action)
            }
        }
    }

    fn perform_search(&self, action: search::Action) -> Task<Message> {
        match action {
            search::Action::None => Task::none(),
            search::Action::Search { token, keyword } => {
                let backend = self.backend.clone();
                Task::perform(async move { backend.search(&keyword).await }, move |outcome| {
                    Message::Search(search::Message::Settled { token, outcome })
                })
            }
            search::Action::LoadPhotos(urls) => self.load_photos(urls, |url, outcome| {
                Message::Search(search::Message::PhotoLoaded(url, outcome))
            }),
        }
    }

    fn perform_history(&mut self, action: history::Action) -> Task<Message> {
        match action {
            history::Action::None => Task::none(),
            history::Action::Fetch { mount } => {
                let backend = self.backend.clone();
                Task::perform(async move { backend.history().await }, move |outcome| {
                    Message::History(history::Message::Loaded { mount, outcome })
                })
            }
            history::Action::LoadPhotos(urls) => self.load_photos(urls, |url, outcome| {
                Message::History(history::Message::PhotoLoaded(url, outcome))
            }),
            history::Action::Navigate(route) => self.navigate(route),
        }
    }

    fn load_photos(
        &self,
        urls: Vec<String>,
        to_message: fn(String, Result<image::Handle, crate::error::ApiError>) -> Message,
    ) -> Task<Message> {
        Task::batch(urls.into_iter().map(|url| {
            let backend = self.backend.clone();
            let key = url.clone();
            Task::perform(
                async move { backend.photo(&url).await.map(image::Handle::from_bytes) },
                move |outcome| to_message(key.clone(), outcome),
            )
        }))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let nav = row![
            button(text("Home")).on_press(Message::Navigate(Route::Search)),
            button(text("History")).on_press(Message::Navigate(Route::History)),
        ]
        .spacing(8);

        let screen = match &self.screen {
            Screen::Search(view) => view.view().map(Message::Search),
            Screen::History(view) => view.view().map(Message::History),
        };

        container(column![nav, screen].spacing(12))
            .padding(Padding::new(16.0))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::window)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Search(view) => view.subscription().map(Message::Search),
            Screen::History(_) => Subscription::none(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
