//! Keyword input with its submit button

use iced::widget::{button, container, row, text, text_input};
use iced::{Background, Border, Color, Element, Length, Padding};

use super::theme;

pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    let input = text_input("Enter a keyword", value)
        .on_input(on_input)
        .on_submit(on_submit.clone())
        .padding(Padding::new(12.0))
        .size(18)
        .style(|_theme, _status| text_input::Style {
            background: Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            icon: theme::TEXT_MUTED,
            placeholder: theme::TEXT_PLACEHOLDER,
            value: theme::TEXT,
            selection: theme::PRIMARY,
        });

    let submit = button(text("Search").size(16))
        .on_press(on_submit)
        .padding(Padding::from([10.0, 20.0]));

    container(row![input, submit].spacing(8).align_y(iced::Alignment::Center))
        .padding(Padding::from([6.0, 12.0]))
        .width(Length::Fill)
        .max_width(600)
        .style(theme::card)
        .into()
}
