use ratatui::style::{Color, Modifier, Style};

// Centralized theme colors. The desktop has exactly two palettes; components
// read the active one from `ComponentContext`.

pub const TRAFFIC_RED_RGB: (u8, u8, u8) = (255, 95, 87);
pub const TRAFFIC_YELLOW_RGB: (u8, u8, u8) = (254, 188, 46);
pub const TRAFFIC_GREEN_RGB: (u8, u8, u8) = (40, 200, 64);
pub const ACCENT_RGB: (u8, u8, u8) = (10, 132, 255);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn traffic_red() -> Color {
    rgb_to_color(TRAFFIC_RED_RGB)
}

pub fn traffic_yellow() -> Color {
    rgb_to_color(TRAFFIC_YELLOW_RGB)
}

pub fn traffic_green() -> Color {
    rgb_to_color(TRAFFIC_GREEN_RGB)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: bool,
    pub desktop_bg: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub dock_bg: Color,
    pub dock_fg: Color,
    pub dock_indicator: Color,
    pub window_bg: Color,
    pub window_fg: Color,
    pub header_bg: Color,
    pub header_inactive_bg: Color,
    pub header_fg: Color,
    pub border: Color,
    pub muted_fg: Color,
    pub input_bg: Color,
    pub selected_bg: Color,
    pub success_fg: Color,
    pub error_fg: Color,
}

impl Palette {
    pub const fn light() -> Self {
        Self {
            dark: false,
            desktop_bg: Color::Rgb(214, 226, 240),
            menu_bg: Color::Rgb(236, 236, 236),
            menu_fg: Color::Black,
            dock_bg: Color::Rgb(245, 245, 245),
            dock_fg: Color::Black,
            dock_indicator: Color::Rgb(60, 60, 60),
            window_bg: Color::White,
            window_fg: Color::Black,
            header_bg: Color::Rgb(228, 228, 228),
            header_inactive_bg: Color::Rgb(244, 244, 244),
            header_fg: Color::Rgb(40, 40, 40),
            border: Color::Rgb(170, 170, 170),
            muted_fg: Color::Rgb(110, 110, 110),
            input_bg: Color::Rgb(240, 240, 240),
            selected_bg: Color::Rgb(220, 234, 252),
            success_fg: Color::Rgb(22, 128, 60),
            error_fg: Color::Rgb(200, 30, 30),
        }
    }

    pub const fn dark() -> Self {
        Self {
            dark: true,
            desktop_bg: Color::Rgb(28, 30, 38),
            menu_bg: Color::Rgb(44, 44, 46),
            menu_fg: Color::White,
            dock_bg: Color::Rgb(38, 38, 40),
            dock_fg: Color::White,
            dock_indicator: Color::Rgb(200, 200, 200),
            window_bg: Color::Rgb(30, 30, 30),
            window_fg: Color::Rgb(230, 230, 230),
            header_bg: Color::Rgb(56, 56, 58),
            header_inactive_bg: Color::Rgb(42, 42, 44),
            header_fg: Color::Rgb(220, 220, 220),
            border: Color::Rgb(80, 80, 84),
            muted_fg: Color::Rgb(150, 150, 150),
            input_bg: Color::Rgb(50, 50, 52),
            selected_bg: Color::Rgb(40, 60, 90),
            success_fg: Color::Rgb(90, 210, 120),
            error_fg: Color::Rgb(255, 110, 100),
        }
    }

    pub const fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    pub fn window_style(&self) -> Style {
        Style::default().bg(self.window_bg).fg(self.window_fg)
    }

    pub fn heading_style(&self) -> Style {
        self.window_style().add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        self.window_style().fg(self.muted_fg)
    }

    pub fn link_style(&self) -> Style {
        self.window_style()
            .fg(accent())
            .add_modifier(Modifier::UNDERLINED)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
