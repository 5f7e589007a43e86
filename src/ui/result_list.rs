use std::collections::HashMap;

use iced::widget::{column, container, image, mouse_area, row, scrollable, text, Column};
use iced::{Alignment, Element, Fill, Padding};

use crate::app::Message;
use crate::roles::Role;
use crate::select::{Input, SelectOption};
use crate::ui::theme;

const AVATAR_SIZE: f32 = 28.0;

/// Build the dropdown result rows
pub fn view<'a>(
    options: &[&'a SelectOption],
    highlighted: Option<usize>,
    roles: &HashMap<String, Role>,
) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = options
        .iter()
        .copied()
        .enumerate()
        .map(|(i, option)| {
            let style = if highlighted == Some(i) {
                theme::result_row_selected as fn(&iced::Theme) -> container::Style
            } else {
                theme::result_row
            };

            let name = text(option.label.as_str()).size(15).style(theme::result_name);
            let label: Element<'a, Message> = match &option.subtitle {
                Some(subtitle) => column![name, text(subtitle.as_str()).size(12).style(theme::result_subtitle)]
                    .spacing(2)
                    .into(),
                None => name.into(),
            };

            let mut line = row![].spacing(10).align_y(Alignment::Center);
            if let Some(avatar) = option.image_url.as_deref().and_then(local_path) {
                line = line.push(
                    image(image::Handle::from_path(avatar))
                        .width(AVATAR_SIZE)
                        .height(AVATAR_SIZE),
                );
            }
            line = line.push(container(label).width(Fill));
            if let Some(role) = roles.get(&option.id) {
                line = line.push(role_badge(*role));
            }

            let row = container(line)
                .padding(Padding::from([8, 12]))
                .width(Fill)
                .style(style);

            mouse_area(row)
                .on_press(Message::Picker(Input::OptionPressed(i)))
                .into()
        })
        .collect();

    scrollable(Column::from_vec(rows).spacing(2)).into()
}

pub fn role_badge<'a>(role: Role) -> Element<'a, Message> {
    let color = role.color();
    container(text(role.label()).size(11))
        .padding(Padding::from([2, 8]))
        .style(move |_theme: &iced::Theme| theme::badge(color))
        .into()
}

/// Avatars are only rendered from the local filesystem
fn local_path(url: &str) -> Option<&str> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(path);
    }
    if url.starts_with('/') {
        return Some(url);
    }
    None
}
