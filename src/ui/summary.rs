use chrono::NaiveDate;
use iced::widget::{column, container, row, scrollable, text, Column, Row};
use iced::{Alignment, Element, Length};

use super::styles::{BackgroundStyle, CardStyle, DateBoxStyle};
use super::{palette, section_header};
use crate::aggregation::{DateWindow, MonthGroup, SummaryView};
use crate::flow::FlowState;
use crate::messages::Message;

pub const NO_COMMON_DATES: &str = "Es gibt noch keine Tage, an denen alle Teilnehmer Zeit haben.";

pub fn view(state: &FlowState, today: NaiveDate) -> Element<'static, Message> {
    let summary = SummaryView::build(state.records(), DateWindow::year_end_of(today));

    let participants = summary
        .participants
        .iter()
        .fold(Column::new().spacing(8), |col, p| {
            col.push(
                row![
                    text(p.name.clone()).size(16).style(palette::TEXT_MAIN),
                    iced::widget::horizontal_space(),
                    text(format!("Tage verfügbar: {}", p.days_available))
                        .size(14)
                        .style(palette::TEXT_MUTED),
                ]
                .align_items(Alignment::Center),
            )
        });

    let dates: Element<'static, Message> = if summary.has_common_dates() {
        summary
            .months
            .iter()
            .fold(Column::new().spacing(16), |col, group| col.push(month_group(group)))
            .into()
    } else {
        text(NO_COMMON_DATES).size(14).style(palette::TEXT_MUTED).into()
    };

    let card = container(
        column![
            text("Ready for Rocking - Cousinentreffen.").size(32).style(palette::ACCENT),
            participants,
            section_header("Folgende Tage sind möglich:"),
            dates,
        ]
        .spacing(24),
    )
    .padding(30)
    .max_width(720)
    .style(iced::theme::Container::Custom(Box::new(CardStyle)));

    container(scrollable(container(card).width(Length::Fill).center_x().padding(30)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
        .into()
}

fn month_group(group: &MonthGroup) -> Element<'static, Message> {
    let boxes = group.day_numbers().into_iter().fold(Row::new().spacing(8), |r, day| {
        r.push(
            container(text(day.to_string()).size(16))
                .width(40)
                .height(40)
                .center_x()
                .center_y()
                .style(iced::theme::Container::Custom(Box::new(DateBoxStyle))),
        )
    });

    column![text(group.title).size(18).style(palette::TEXT_MAIN), boxes]
        .spacing(8)
        .into()
}
