//! Screens and widgets

pub mod animation;
pub mod history;
pub mod photos;
pub mod report;
pub mod search;
pub mod search_bar;
pub mod theme;
