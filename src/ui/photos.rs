//! Per-screen store of downloaded photos

use std::collections::HashMap;

use iced::widget::{container, image, text};
use iced::{Element, Length};

use super::theme;
use crate::error::ApiError;

#[derive(Debug, Clone)]
enum Photo {
    Pending,
    Ready(image::Handle),
    Failed,
}

/// Display state of one url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Default)]
pub struct Photos {
    photos: HashMap<String, Photo>,
}

impl Photos {
    /// Mark `urls` as wanted and return the ones not requested yet.
    pub fn request<'a>(&mut self, urls: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        let mut wanted = Vec::new();
        for url in urls {
            if !self.photos.contains_key(url.as_str()) {
                self.photos.insert(url.clone(), Photo::Pending);
                wanted.push(url.clone());
            }
        }
        wanted
    }

    /// Store a download; ignored unless the url is still wanted.
    pub fn loaded(&mut self, url: String, outcome: Result<image::Handle, ApiError>) {
        let Some(slot) = self.photos.get_mut(&url) else {
            tracing::debug!("Dropping photo no longer shown: {}", url);
            return;
        };

        *slot = match outcome {
            Ok(handle) => Photo::Ready(handle),
            Err(e) => {
                tracing::warn!("Failed to load photo {}: {}", url, e);
                Photo::Failed
            }
        };
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }

    /// An empty url can never load, so it counts as failed.
    pub fn status(&self, url: &str) -> Status {
        if url.is_empty() {
            return Status::Failed;
        }
        match self.photos.get(url) {
            None | Some(Photo::Pending) => Status::Pending,
            Some(Photo::Ready(_)) => Status::Ready,
            Some(Photo::Failed) => Status::Failed,
        }
    }

    /// The photo at `width`, or a placeholder while it loads.
    pub fn view<'a, Message: 'a>(&self, url: &str, width: f32) -> Element<'a, Message> {
        if let Some(Photo::Ready(handle)) = self.photos.get(url) {
            return image(handle.clone()).width(width).into();
        }
        match self.status(url) {
            Status::Failed => placeholder("✕", width),
            _ => placeholder("…", width),
        }
    }
}

fn placeholder<'a, Message: 'a>(symbol: &'a str, width: f32) -> Element<'a, Message> {
    container(text(symbol).color(theme::TEXT_MUTED))
        .width(width)
        .height(Length::Fixed(width * 0.75))
        .center_x(width)
        .center_y(Length::Fixed(width * 0.75))
        .style(theme::card)
        .into()
}
