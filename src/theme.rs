use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub border_focused: Color,
    pub value_color: Color,
    pub address_color: Color,
}

pub const THEME: Theme = Theme {
    bg: Color::Rgb(18, 18, 22),
    surface: Color::Rgb(28, 28, 34),
    surface_bright: Color::Rgb(42, 42, 52),
    text: Color::Rgb(222, 222, 226),
    text_muted: Color::Rgb(124, 124, 138),
    text_accent: Color::Rgb(120, 220, 180),
    success: Color::Green,
    error: Color::Red,
    warning: Color::Yellow,
    selected_bg: Color::Rgb(44, 70, 60),
    selected_fg: Color::White,
    border_focused: Color::Rgb(120, 220, 180),
    value_color: Color::Rgb(98, 126, 234),
    address_color: Color::Rgb(255, 179, 71),
};

impl Theme {
    pub const fn header_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub const fn selected_style(&self) -> Style {
        Style::new()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub const fn border_focused_style(&self) -> Style {
        Style::new().fg(self.border_focused)
    }

    pub const fn muted_style(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    pub const fn accent_style(&self) -> Style {
        Style::new().fg(self.text_accent)
    }

    pub const fn success_style(&self) -> Style {
        Style::new().fg(self.success)
    }

    pub const fn error_style(&self) -> Style {
        Style::new().fg(self.error)
    }

    pub const fn value_style(&self) -> Style {
        Style::new().fg(self.value_color)
    }

    pub const fn address_style(&self) -> Style {
        Style::new().fg(self.address_color)
    }

    pub const fn table_header_style(&self) -> Style {
        Style::new()
            .fg(self.text)
            .bg(self.surface_bright)
            .add_modifier(Modifier::BOLD)
    }
}
