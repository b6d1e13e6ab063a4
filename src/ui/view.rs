/// Widget layouts, one builder per screen
use iced::widget::{button, canvas, column, container, image, row, text, Space};
use iced::{Alignment, Element, Length};

use super::workbench::{Slot, Workbench};
use super::ScreenKind;
use crate::Message;

const CHART_HEIGHT: f32 = 100.0;

pub fn main_menu(status: &str) -> Element<'_, Message> {
    let content = column![
        text("Welcome to Image Processing App!")
            .size(36),

        button("Restore Image")
            .on_press(Message::Navigate(ScreenKind::Restore))
            .padding([10, 30]),

        button("Histogram Equalization")
            .on_press(Message::Navigate(ScreenKind::Histogram))
            .padding([10, 30]),

        button("Exit")
            .on_press(Message::Exit)
            .padding(10),

        text(status)
            .size(16),
    ]
    .spacing(20)
    .padding(40)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Layout shared by the Restore and Histogram screens
pub fn workbench<'a>(bench: &'a Workbench, status: &'a str) -> Element<'a, Message> {
    let filter = bench.filter();
    let show_charts = filter.shows_distribution();
    let side = bench.preview_size() as f32;

    let previews = row![
        slot_column("Original Image", bench.original_slot(), side, show_charts),
        slot_column(filter.processed_title(), bench.processed_slot(), side, show_charts),
    ]
    .spacing(40);

    let actions = column![
        button("Browse Image")
            .on_press(Message::Browse)
            .padding(10),

        button("Load from Database")
            .on_press(Message::LoadFromStore)
            .padding(10),

        button(filter.action_label())
            .on_press(Message::ApplyFilter)
            .padding(10),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    let content = column![previews, actions, text(status).size(16)]
        .spacing(20)
        .align_x(Alignment::Center);

    let footer = row![
        button("Main Menu")
            .on_press(Message::Navigate(ScreenKind::MainMenu))
            .padding(10),
        Space::with_width(Length::Fill),
        button("Exit")
            .on_press(Message::Exit)
            .padding(10),
    ]
    .padding(20);

    column![
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
        footer,
    ]
    .into()
}

/// Caption, preview and (optionally) distribution chart for one slot.
/// Empty slots keep their size so the layout doesn't jump.
fn slot_column<'a>(
    title: &'a str,
    slot: Option<&'a Slot>,
    side: f32,
    show_chart: bool,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match slot {
        Some(slot) => image(slot.handle.clone())
            .width(Length::Fixed(slot.width as f32))
            .height(Length::Fixed(slot.height as f32))
            .into(),
        None => Space::new(Length::Fixed(side), Length::Fixed(side)).into(),
    };

    let mut content = column![
        text(title).size(20),
        container(picture)
            .center_x(Length::Fixed(side))
            .center_y(Length::Fixed(side)),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if show_chart {
        let chart: Element<'a, Message> = match slot.and_then(|slot| slot.histogram.as_ref()) {
            Some(histogram) => canvas(histogram.clone())
                .width(Length::Fixed(side))
                .height(Length::Fixed(CHART_HEIGHT))
                .into(),
            None => Space::new(Length::Fixed(side), Length::Fixed(CHART_HEIGHT)).into(),
        };
        content = content.push(chart);
    }

    content.into()
}
