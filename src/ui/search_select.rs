use std::collections::HashMap;

use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Element, Fill};

use crate::app::Message;
use crate::roles::Role;
use crate::select::{Input, Key, Phase, SearchSelect};
use crate::ui::{result_list, theme};

/// The search input ID for focus management
pub const SEARCH_INPUT_ID: &str = "hrdesk-search-input";

/// Dropdown height cap
const DROPDOWN_MAX_HEIGHT: f32 = 260.0;

/// Build the search-select: label, input row, and the dropdown for the current phase
pub fn view<'a>(select: &'a SearchSelect, roles: &HashMap<String, Role>) -> Element<'a, Message> {
    let props = select.props();
    let mut content = Column::new().spacing(6);

    if let Some(label) = &props.label {
        content = content.push(text(label.as_str()).size(13).style(theme::result_subtitle));
    }

    let mut input = text_input(&props.placeholder, select.text())
        .id(SEARCH_INPUT_ID)
        .padding(10)
        .size(16)
        .width(Fill)
        .style(theme::search_input);
    if !props.disabled {
        input = input
            .on_input(|text| Message::Picker(Input::TextChanged(text)))
            .on_submit(Message::Picker(Input::Key(Key::Enter)));
    }

    let mut controls = row![input].spacing(6);
    if !props.disabled {
        if !select.text().is_empty() {
            controls = controls.push(button(text("×")).on_press(Message::Picker(Input::Clear)));
        }
        let toggle = if select.is_open() {
            Message::Picker(Input::Key(Key::Escape))
        } else {
            Message::Picker(Input::Focus)
        };
        controls = controls.push(button(text("▾")).on_press(toggle));
    }
    content = content.push(controls);

    if let Some(error) = &props.error {
        content = content.push(text(error.as_str()).size(12).style(theme::error_text));
    }

    let dropdown: Option<Element<'a, Message>> = match select.phase() {
        Phase::Closed => None,
        Phase::OpenLoading => Some(text("Loading...").size(13).style(theme::result_subtitle).into()),
        Phase::OpenEmpty | Phase::OpenNoResults => Some(
            text(props.empty_message.as_str())
                .size(13)
                .style(theme::result_subtitle)
                .into(),
        ),
        Phase::OpenResults => Some(result_list::view(
            &select.visible_options(),
            select.highlighted(),
            roles,
        )),
    };

    if let Some(dropdown) = dropdown {
        content = content.push(
            container(column![dropdown])
                .padding(6)
                .width(Fill)
                .max_height(DROPDOWN_MAX_HEIGHT)
                .style(theme::dropdown),
        );
    }

    content.into()
}
