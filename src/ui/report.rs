//! Plain-text rendering of places and history, for the command line

use std::fmt::Write;

use crate::backend::{display_rating, HistoryEntry, PlaceResult};

pub fn place(place: &PlaceResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", place.name);
    let _ = writeln!(out, "Rating: {}", display_rating(place.rating));

    for url in &place.photo_urls {
        let _ = writeln!(out, "photo: {url}");
    }
    for review in &place.reviews {
        let _ = writeln!(out, "review: {} ({} stars)", review.author_name, review.rating);
        let _ = writeln!(out, "  {}", review.text);
    }
    out
}

pub fn history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", super::history::EMPTY);
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", entry.name);
        let _ = writeln!(out, "Rating: {}", display_rating(entry.rating));
        let _ = writeln!(out, "Place ID: {}", entry.place_id);

        for url in &entry.photo_urls {
            let _ = writeln!(out, "photo: {url}");
        }
        for (g, group) in entry.reviews.iter().enumerate() {
            let _ = writeln!(out, "reviews #{}:", g + 1);
            for review in group {
                let _ = writeln!(
                    out,
                    "  review: {} ({} stars), {}",
                    review.author_name, review.rating, review.relative_time_description
                );
                let _ = writeln!(out, "    {}", review.text);
            }
        }
    }
    out
}
