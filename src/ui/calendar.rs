// src/ui/calendar.rs

use chrono::NaiveDate;
use iced::widget::{button, column, container, row, scrollable, text, Column, Row};
use iced::{Alignment, Element, Length};

use super::styles::{
    BackgroundStyle, BadgeStyle, BannerStyle, CardStyle, DayCellStyle, GhostButtonStyle,
    PrimaryButtonStyle,
};
use super::{palette, section_header, to_color, user_badge};
use crate::calendar::{CalendarCell, ColorMap, MonthView, WEEKDAY_LABELS};
use crate::flow::{FlowEvent, FlowState};
use crate::messages::Message;

const CELL_HEIGHT: f32 = 64.0;

pub fn view(state: &FlowState, today: NaiveDate) -> Element<'static, Message> {
    let user = state.current_user().unwrap_or_default();
    let month = MonthView::build(state.records(), state.displayed_month(), today, user);

    let save = {
        let b = button(text("Save"))
            .padding([10, 24])
            .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)));
        if state.is_saving() {
            b
        } else {
            b.on_press(Message::Flow(FlowEvent::SaveRequested))
        }
    };

    let header = column![
        text(format!("Hallo, {}! 👋", user)).size(28).style(palette::TEXT_MAIN),
        text("Wähle die Tage aus, an denen du verfügbar bist")
            .size(14)
            .style(palette::TEXT_MUTED),
    ]
    .spacing(4);

    let status = if state.is_loading() { "Lädt…" } else { "" };

    let navigation = row![
        nav_button("‹", FlowEvent::PrevMonth),
        text(month.title.clone()).size(22).style(palette::TEXT_MAIN),
        nav_button("›", FlowEvent::NextMonth),
        iced::widget::horizontal_space(),
        text(status).size(12).style(palette::TEXT_MUTED),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    let mut content = column![row![header, iced::widget::horizontal_space(), save].align_items(Alignment::Center)]
        .spacing(20);

    if let Some(message) = state.notification() {
        content = content.push(banner(message));
    }

    content = content
        .push(navigation)
        .push(grid(&month, state.is_saving()))
        .push(legend(&month.colors));

    container(scrollable(content.padding(30)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
        .into()
}

fn nav_button(label: &str, event: FlowEvent) -> Element<'static, Message> {
    button(text(label).size(20))
        .padding([4, 14])
        .style(iced::theme::Button::Custom(Box::new(GhostButtonStyle)))
        .on_press(Message::Flow(event))
        .into()
}

fn banner(message: &str) -> Element<'static, Message> {
    container(
        row![
            text(message).size(14),
            iced::widget::horizontal_space(),
            button(text("✕").size(14))
                .style(iced::theme::Button::Custom(Box::new(GhostButtonStyle)))
                .on_press(Message::Flow(FlowEvent::DismissNotification)),
        ]
        .align_items(Alignment::Center),
    )
    .padding([8, 12])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(BannerStyle)))
    .into()
}

fn grid(month: &MonthView, frozen: bool) -> Element<'static, Message> {
    let weekdays = WEEKDAY_LABELS.iter().fold(Row::new().spacing(6), |r, label| {
        r.push(
            container(text(*label).size(12).style(palette::TEXT_MUTED))
                .width(Length::Fill)
                .center_x(),
        )
    });

    let weeks = month.weeks().fold(Column::new().spacing(6), |col, week| {
        let cells = week
            .iter()
            .fold(Row::new().spacing(6), |r, cell| r.push(day_cell(cell, &month.colors, frozen)));
        col.push(cells)
    });

    container(column![weekdays, weeks].spacing(8))
        .padding(16)
        .style(iced::theme::Container::Custom(Box::new(CardStyle)))
        .into()
}

fn day_cell(cell: &CalendarCell, colors: &ColorMap, frozen: bool) -> Element<'static, Message> {
    let dots = cell.badge_users().iter().fold(Row::new().spacing(3), |r, name| {
        r.push(
            container(text(""))
                .width(8)
                .height(8)
                .style(iced::theme::Container::Custom(Box::new(BadgeStyle(to_color(colors.get(name)))))),
        )
    });

    let body = column![text(cell.day_number().to_string()).size(14), dots]
        .spacing(6)
        .align_items(Alignment::Center);

    let b = button(body)
        .width(Length::Fill)
        .height(CELL_HEIGHT)
        .padding(6)
        .style(iced::theme::Button::Custom(Box::new(DayCellStyle {
            in_current_month: cell.in_current_month,
            is_today: cell.is_today,
            is_selected: cell.is_current_user_available,
        })));

    if cell.is_toggleable() && !frozen {
        b.on_press(Message::Flow(FlowEvent::ToggleDay(cell.date))).into()
    } else {
        b.into()
    }
}

fn legend(colors: &ColorMap) -> Element<'static, Message> {
    if colors.is_empty() {
        return column![].into();
    }
    let entries = colors
        .entries()
        .iter()
        .fold(Row::new().spacing(16), |r, (name, color)| r.push(user_badge(name, *color)));

    column![section_header("Teilnehmer"), entries].spacing(10).into()
}
