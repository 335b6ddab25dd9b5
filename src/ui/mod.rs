// src/ui/mod.rs

use iced::widget::{container, row, text};
use iced::{Color, Element};
use chrono::NaiveDate;

use crate::calendar::UserColor;
use crate::flow::{FlowState, Screen};
use crate::messages::Message;

pub mod calendar;
pub mod screens;
pub mod styles;
pub mod summary;

pub const APP_TITLE: &str = "Cousinentreffen";

pub mod palette {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.98, 0.97, 0.95); // Warm Sand
    pub const SURFACE: Color = Color::WHITE;
    pub const TEXT_MAIN: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.5, 0.5, 0.5);
    pub const ACCENT: Color = Color::from_rgb(0.45, 0.55, 0.50); // Sage Green
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.35, 0.45, 0.40);
    pub const DANGER: Color = Color::from_rgb(0.8, 0.4, 0.4);
    pub const MATRIX_GREEN: Color = Color::from_rgb(0.0, 1.0, 0.25);
}

pub fn to_color(color: UserColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::from_rgb8(r, g, b)
}

/// Root view: one screen at a time, picked by the flow.
pub fn view(state: &FlowState, today: NaiveDate) -> Element<'_, Message> {
    match state.screen() {
        Screen::Intro => screens::intro(),
        Screen::Title => screens::title(),
        Screen::NameEntry => screens::name_entry(state),
        Screen::Calendar => calendar::view(state, today),
        Screen::Celebration => screens::celebration(),
        Screen::Summary => summary::view(state, today),
    }
}

pub fn section_header(label: &str) -> Element<'static, Message> {
    text(label).size(20).style(palette::ACCENT).into()
}

/// Colored dot followed by the participant's name, as used in legends.
pub fn user_badge(name: &str, color: UserColor) -> Element<'static, Message> {
    row![
        container(text("")).width(12).height(12).style(
            iced::theme::Container::Custom(Box::new(styles::BadgeStyle(to_color(color))))
        ),
        text(name).size(14).style(palette::TEXT_MAIN),
    ]
    .spacing(6)
    .align_items(iced::Alignment::Center)
    .into()
}
