//! History screen: every place previously found for the user

use iced::widget::image;
use iced::widget::{button, column, container, scrollable, text, Column, Row};
use iced::{Element, Length, Padding};

use super::photos::Photos;
use super::theme;
use crate::app::Route;
use crate::backend::{display_rating, HistoryEntry, HistoryReview};
use crate::error::ApiError;
use crate::state::RequestState;

pub const LOAD_FAILED: &str = "Failed to load history data";
pub const EMPTY: &str = "No history yet.";

const THUMBNAIL_WIDTH: f32 = 100.0;
const PROFILE_WIDTH: f32 = 50.0;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        mount: u64,
        outcome: Result<Vec<HistoryEntry>, ApiError>,
    },
    PhotoLoaded(String, Result<image::Handle, ApiError>),
    GoHome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Fetch { mount: u64 },
    LoadPhotos(Vec<String>),
    Navigate(Route),
}

/// What the screen currently shows.
#[derive(Debug, PartialEq)]
pub enum Body<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Entries(&'a [HistoryEntry]),
}

/// Widgets of one entry: its thumbnails, then one column per review group.
struct EntryParts<'a> {
    thumbnails: Vec<Element<'a, Message>>,
    review_groups: Vec<Vec<Element<'a, Message>>>,
}

#[derive(Debug)]
pub struct HistoryView {
    mount: u64,
    entries: RequestState<Vec<HistoryEntry>>,
    photos: Photos,
}

impl HistoryView {
    /// Mount the screen. The returned `Fetch` is the only one it ever issues.
    pub fn new(mount: u64) -> (Self, Action) {
        let mut entries = RequestState::Idle;
        entries.begin();

        let view = Self {
            mount,
            entries,
            photos: Photos::default(),
        };
        (view, Action::Fetch { mount })
    }

    pub fn body(&self) -> Body<'_> {
        match &self.entries {
            RequestState::Idle | RequestState::Loading => Body::Loading,
            RequestState::Error(message) => Body::Failed(message),
            RequestState::Success(entries) if entries.is_empty() => Body::Empty,
            RequestState::Success(entries) => Body::Entries(entries),
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Loaded { mount, outcome } => {
                if mount != self.mount {
                    tracing::debug!("Discarding history for earlier mount {}", mount);
                    return Action::None;
                }

                match outcome {
                    Ok(entries) => {
                        tracing::info!("Loaded {} history entries", entries.len());
                        let urls = self.photos.request(entries.iter().flat_map(photo_urls));
                        self.entries.succeed(entries);
                        if urls.is_empty() {
                            Action::None
                        } else {
                            Action::LoadPhotos(urls)
                        }
                    }
                    Err(e) => {
                        tracing::error!("Error fetching history data: {}", e);
                        self.entries.fail(LOAD_FAILED);
                        Action::None
                    }
                }
            }

            Message::PhotoLoaded(url, outcome) => {
                self.photos.loaded(url, outcome);
                Action::None
            }

            Message::GoHome => Action::Navigate(Route::Search),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.body() {
            Body::Loading => text("Loading...").color(theme::TEXT_MUTED).into(),
            Body::Failed(message) => text(message).color(theme::ERROR).into(),
            Body::Empty => column![
                text("History").size(28).color(theme::TEXT),
                text(EMPTY).color(theme::TEXT_MUTED),
            ]
            .spacing(16)
            .into(),
            Body::Entries(entries) => column![
                text("History").size(28).color(theme::TEXT),
                button(text("Back to search")).on_press(Message::GoHome),
                Column::with_children(entries.iter().map(|entry| self.view_entry(entry))).spacing(16),
            ]
            .spacing(16)
            .into(),
        };

        scrollable(container(content).padding(20).width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn entry_parts<'a>(&'a self, entry: &'a HistoryEntry) -> EntryParts<'a> {
        EntryParts {
            thumbnails: entry
                .photo_urls
                .iter()
                .map(|url| self.photos.view(url, THUMBNAIL_WIDTH))
                .collect(),
            review_groups: entry
                .reviews
                .iter()
                .map(|group| group.iter().map(|review| self.view_review(review)).collect())
                .collect(),
        }
    }

    fn view_entry<'a>(&'a self, entry: &'a HistoryEntry) -> Element<'a, Message> {
        let EntryParts { thumbnails, review_groups } = self.entry_parts(entry);
        let mut body = column![
            text(&entry.name).size(22).color(theme::TEXT),
            text(format!("Rating: {}", display_rating(entry.rating))).color(theme::TEXT_MUTED),
            text(format!("Place ID: {}", entry.place_id)).size(12).color(theme::TEXT_MUTED),
        ]
        .spacing(6);

        if !thumbnails.is_empty() {
            body = body.push(Row::with_children(thumbnails).spacing(10));
        }

        if !review_groups.is_empty() {
            body = body.push(text("Reviews:").size(18).color(theme::TEXT));
            for reviews in review_groups {
                body = body.push(Column::with_children(reviews).spacing(10));
            }
        }

        container(body)
            .padding(16)
            .width(Length::Fill)
            .style(theme::card)
            .into()
    }

    fn view_review<'a>(&'a self, review: &'a HistoryReview) -> Element<'a, Message> {
        let mut line = Row::new().spacing(10);
        if let Some(photo) = self.profile_photo(review) {
            line = line.push(photo);
        }
        line = line.push(
            column![
                text(format!("{} ({} stars)", review.author_name, review.rating)).color(theme::TEXT),
                text(&review.text).size(14).color(theme::TEXT),
                text(&review.relative_time_description).size(12).color(theme::TEXT_MUTED),
            ]
            .spacing(4),
        );

        container(line).padding(Padding::from([8.0, 0.0])).into()
    }

    /// Reviews without a profile photo show none.
    fn profile_photo<'a>(&'a self, review: &'a HistoryReview) -> Option<Element<'a, Message>> {
        if review.profile_photo_url.is_empty() {
            return None;
        }
        Some(self.photos.view(&review.profile_photo_url, PROFILE_WIDTH))
    }
}

/// Thumbnails and reviewer photos of an entry, in display order.
fn photo_urls(entry: &HistoryEntry) -> impl Iterator<Item = &String> {
    let profiles = entry
        .reviews
        .iter()
        .flatten()
        .map(|review| &review.profile_photo_url)
        .filter(|url| !url.is_empty());

    entry.photo_urls.iter().chain(profiles)
}
