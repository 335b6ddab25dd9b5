use iced::widget::{button, column, container, radio, text, Column};
use iced::{Alignment, Element, Length};

use super::styles::{BackgroundStyle, CardStyle, NightStyle, PrimaryButtonStyle};
use super::{palette, APP_TITLE};
use crate::flow::{FlowEvent, FlowState};
use crate::messages::Message;
use crate::models::PARTICIPANTS;

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> iced::widget::Container<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
}

pub fn intro() -> Element<'static, Message> {
    centered(
        column![
            text("01000011 01101111 01110101 01110011 01101001 01101110 01110011")
                .size(14)
                .style(palette::MATRIX_GREEN),
            text(APP_TITLE).size(64).style(palette::MATRIX_GREEN),
        ]
        .spacing(30)
        .align_items(Alignment::Center),
    )
    .style(iced::theme::Container::Custom(Box::new(NightStyle)))
    .into()
}

pub fn title() -> Element<'static, Message> {
    centered(text(APP_TITLE).size(56).style(palette::ACCENT))
        .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
        .into()
}

pub fn name_entry(state: &FlowState) -> Element<'static, Message> {
    let options = PARTICIPANTS.iter().fold(Column::new().spacing(10), |col, name| {
        col.push(radio(*name, *name, state.selected_name(), |picked: &str| {
            Message::Flow(FlowEvent::NameSelected(picked.to_string()))
        }))
    });

    let mut form = column![
        text(APP_TITLE).size(40).style(palette::ACCENT),
        text("Wer bist du?").size(20).style(palette::TEXT_MAIN),
        options,
    ]
    .spacing(20)
    .align_items(Alignment::Start);

    if let Some(message) = state.validation_message() {
        form = form.push(text(message).size(14).style(palette::DANGER));
    }

    let submit = button(text("Weiter zum Kalender"))
        .padding([10, 20])
        .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)))
        .on_press(Message::Flow(FlowEvent::NameConfirmed));
    form = form.push(submit);

    centered(
        container(form)
            .padding(30)
            .style(iced::theme::Container::Custom(Box::new(CardStyle))),
    )
    .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
    .into()
}

pub fn celebration() -> Element<'static, Message> {
    centered(
        column![
            text("🎉").size(96),
            text("Gespeichert!").size(40).style(palette::ACCENT),
            text("Ready for Rocking - Cousinentreffen.").size(20).style(palette::TEXT_MAIN),
        ]
        .spacing(20)
        .align_items(Alignment::Center),
    )
    .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
    .into()
}
