use iced::widget::{container, text, text_input};
use iced::{Border, Color, Shadow, Theme};

/// Accent for focus rings and the highlighted row
const ACCENT: Color = Color {
    r: 0.35,
    g: 0.55,
    b: 0.85,
    a: 1.0,
};

const DANGER: Color = Color {
    r: 0.9,
    g: 0.4,
    b: 0.4,
    a: 1.0,
};

fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

/// Blend `over` onto `base` by `amount` (0.0 = base, 1.0 = over)
fn mix(base: Color, over: Color, amount: f32) -> Color {
    Color {
        r: base.r + (over.r - base.r) * amount,
        g: base.g + (over.g - base.g) * amount,
        b: base.b + (over.b - base.b) * amount,
        a: 1.0,
    }
}

fn surface(theme: &Theme) -> Color {
    let palette = theme.palette();
    mix(palette.background, palette.text, 0.06)
}

fn secondary_text(theme: &Theme) -> Color {
    let palette = theme.palette();
    mix(palette.background, palette.text, 0.55)
}

/// Style for the main container wrapping the window content
pub fn main_container(theme: &Theme) -> container::Style {
    let palette = theme.palette();
    container::Style {
        background: Some(palette.background.into()),
        border: Border {
            color: with_alpha(palette.text, 0.15),
            width: 1.0,
            radius: 12.0.into(),
        },
        shadow: Shadow {
            color: Color::BLACK,
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 20.0,
        },
        text_color: Some(palette.text),
        snap: false,
    }
}

/// Style for the search text input
pub fn search_input(theme: &Theme, status: text_input::Status) -> text_input::Style {
    let palette = theme.palette();
    let focused = matches!(status, text_input::Status::Focused { .. });
    text_input::Style {
        background: surface(theme).into(),
        border: Border {
            color: if focused { ACCENT } else { with_alpha(palette.text, 0.2) },
            width: if focused { 2.0 } else { 1.0 },
            radius: 8.0.into(),
        },
        icon: secondary_text(theme),
        placeholder: secondary_text(theme),
        value: palette.text,
        selection: with_alpha(ACCENT, 0.3),
    }
}

/// Dropdown panel under the input
pub fn dropdown(theme: &Theme) -> container::Style {
    let palette = theme.palette();
    container::Style {
        background: Some(surface(theme).into()),
        border: Border {
            color: with_alpha(palette.text, 0.12),
            width: 1.0,
            radius: 8.0.into(),
        },
        text_color: Some(palette.text),
        ..container::Style::default()
    }
}

/// Style for a result row (not highlighted)
pub fn result_row(theme: &Theme) -> container::Style {
    container::Style {
        background: None,
        text_color: Some(theme.palette().text),
        ..container::Style::default()
    }
}

/// Style for the keyboard-highlighted result row
pub fn result_row_selected(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(with_alpha(ACCENT, 0.2).into()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 6.0.into(),
        },
        text_color: Some(theme.palette().text),
        ..container::Style::default()
    }
}

pub fn result_name(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.palette().text),
    }
}

pub fn result_subtitle(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(secondary_text(theme)),
    }
}

pub fn error_text(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(DANGER),
    }
}

/// Rounded chip for roles and request statuses
pub fn badge(color: Color) -> container::Style {
    container::Style {
        background: Some(with_alpha(color, 0.2).into()),
        border: Border {
            color,
            width: 1.0,
            radius: 10.0.into(),
        },
        text_color: Some(color),
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_interpolates_channels() {
        let mid = mix(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!(mid, Color::from_rgb(0.5, 0.5, 0.5));
        assert_eq!(mix(Color::BLACK, Color::WHITE, 0.0), Color::BLACK);
    }
}
