//! Search screen: keyword input, the matching place and a photo preview

use iced::widget::{button, center, column, container, mouse_area, opaque, row, scrollable, stack, text, Column};
use iced::widget::image;
use iced::{Element, Length, Padding, Subscription};

use super::animation::Animation;
use super::photos::Photos;
use super::{search_bar, theme};
use crate::backend::{display_rating, PlaceResult, Review};
use crate::error::ApiError;
use crate::state::RequestState;

pub const NOT_FOUND: &str = "Place not found";
pub const GENERIC_ERROR: &str = "An error occurred while fetching place details";

const PHOTOS_PER_ROW: usize = 3;
const PHOTO_WIDTH: f32 = 180.0;

#[derive(Debug, Clone)]
pub enum Message {
    KeywordChanged(String),
    Submit,
    Settled {
        token: u64,
        outcome: Result<PlaceResult, ApiError>,
    },
    OpenImage(String),
    CloseImage,
    PhotoLoaded(String, Result<image::Handle, ApiError>),
    Tick,
}

/// Work the shell has to start on behalf of the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Search { token: u64, keyword: String },
    LoadPhotos(Vec<String>),
}

#[derive(Debug)]
pub struct SearchView {
    keyword: String,
    place: RequestState<PlaceResult>,
    /// Token of the most recent search; older responses are stale.
    latest: u64,
    selected_image: Option<String>,
    photos: Photos,
    animation: Animation,
}

impl SearchView {
    pub fn new() -> Self {
        Self::with_animation(Animation::start())
    }

    pub fn with_animation(animation: Animation) -> Self {
        Self {
            keyword: String::new(),
            place: RequestState::Idle,
            latest: 0,
            selected_image: None,
            photos: Photos::default(),
            animation,
        }
    }

    pub fn state(&self) -> &RequestState<PlaceResult> {
        &self.place
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::KeywordChanged(keyword) => {
                self.keyword = keyword;
                Action::None
            }

            Message::Submit => {
                self.latest += 1;
                self.place.begin();
                self.photos.clear();
                Action::Search {
                    token: self.latest,
                    keyword: self.keyword.clone(),
                }
            }

            Message::Settled { token, outcome } => {
                if token != self.latest {
                    tracing::debug!("Discarding stale search response {} (latest {})", token, self.latest);
                    return Action::None;
                }

                match outcome {
                    Ok(place) => {
                        tracing::info!("Found {}", place.name);
                        let urls = self.photos.request(&place.photo_urls);
                        self.place.succeed(place);
                        if urls.is_empty() {
                            Action::None
                        } else {
                            Action::LoadPhotos(urls)
                        }
                    }
                    Err(e) => {
                        tracing::error!("Search failed: {}", e);
                        self.place.fail(error_message(&e));
                        Action::None
                    }
                }
            }

            Message::OpenImage(url) => {
                self.selected_image = Some(url);
                Action::None
            }

            Message::CloseImage => {
                self.selected_image = None;
                Action::None
            }

            Message::PhotoLoaded(url, outcome) => {
                self.photos.loaded(url, outcome);
                Action::None
            }

            Message::Tick => {
                self.animation.tick();
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut content = column![
            text("Cafe Search").size(28).color(theme::TEXT),
            text(self.animation.frame()).size(32).color(theme::PRIMARY),
            search_bar::view(&self.keyword, Message::KeywordChanged, Message::Submit),
        ]
        .spacing(20)
        .align_x(iced::Alignment::Center)
        .width(Length::Fill);

        let state = self.state();
        if state.is_loading() {
            content = content.push(text("Searching…").size(14).color(theme::TEXT_MUTED));
        }
        if let Some(error) = state.error() {
            content = content.push(text(error).size(16).color(theme::ERROR));
        }
        if let Some(place) = state.success() {
            content = content.push(self.view_place(place));
        }

        let base = scrollable(container(content).padding(20).width(Length::Fill)).height(Length::Fill);

        match self.selected_image() {
            Some(url) => modal(base, self.view_preview(url), Message::CloseImage),
            None => base.into(),
        }
    }

    fn view_place<'a>(&'a self, place: &'a PlaceResult) -> Element<'a, Message> {
        let photo_rows = place.photo_urls.chunks(PHOTOS_PER_ROW).map(|chunk| -> Element<'a, Message> {
            row(chunk.iter().map(|url| -> Element<'a, Message> {
                mouse_area(self.photos.view(url, PHOTO_WIDTH))
                    .on_press(Message::OpenImage(url.clone()))
                    .into()
            }))
            .spacing(12)
            .into()
        });

        let reviews = place.reviews.iter().map(view_review);

        container(
            column![
                text(&place.name).size(24).color(theme::TEXT),
                text(format!("Rating: {}", display_rating(place.rating))).size(16).color(theme::TEXT_MUTED),
                text("Photos:").size(18).color(theme::TEXT),
                Column::with_children(photo_rows).spacing(12),
                text("Reviews:").size(18).color(theme::TEXT),
                Column::with_children(reviews).spacing(10),
            ]
            .spacing(12),
        )
        .padding(20)
        .max_width(600)
        .style(theme::card)
        .into()
    }

    fn view_preview<'a>(&'a self, url: &'a str) -> Element<'a, Message> {
        column![
            self.photos.view(url, 640.0),
            button(text("Close")).on_press(Message::CloseImage),
        ]
        .spacing(12)
        .align_x(iced::Alignment::Center)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        self.animation.subscription().map(|_| Message::Tick)
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown in place of a result when a search fails.
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::NotFound => NOT_FOUND.to_string(),
        ApiError::Server { message: Some(message), .. } => format!("Server error: {message}"),
        ApiError::Server { message: None, .. } | ApiError::Transport(_) | ApiError::Malformed(_) => {
            GENERIC_ERROR.to_string()
        }
    }
}

fn view_review(review: &Review) -> Element<'_, Message> {
    container(
        column![
            text(format!("{} ({} stars)", review.author_name, review.rating)).color(theme::TEXT),
            text(&review.text).size(14).color(theme::TEXT_MUTED),
        ]
        .spacing(4),
    )
    .padding(Padding::from([10.0, 12.0]))
    .width(Length::Fill)
    .style(theme::card)
    .into()
}

/// `content` centered over `base`; pressing the backdrop sends `on_blur`.
fn modal<'a, Message: Clone + 'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(theme::backdrop))
                .on_press(on_blur)
        )
    ]
    .into()
}
