use ratatui::style::{Color, Modifier, Style};
use roster_core::ThemeMode;

#[derive(Debug, Clone, PartialEq)]
pub struct UiTheme {
    pub mode: ThemeMode,
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub border_fg: Color,
    pub accent_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub selection_bg: Color,
    pub skeleton_fg: Color,
    pub error_bg: Color,
    pub error_fg: Color,
    pub chip_admin: Color,
    pub chip_moderator: Color,
    pub chip_user: Color,
    pub chip_fg: Color,
}

impl UiTheme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(33, 33, 33),
            muted_fg: Color::Rgb(110, 110, 110),
            border_fg: Color::Rgb(200, 200, 200),
            accent_fg: Color::Rgb(25, 118, 210),
            header_bg: Color::Rgb(25, 118, 210),
            header_fg: Color::Rgb(255, 255, 255),
            selection_bg: Color::Rgb(227, 242, 253),
            skeleton_fg: Color::Rgb(215, 215, 215),
            error_bg: Color::Rgb(253, 236, 234),
            error_fg: Color::Rgb(198, 40, 40),
            chip_admin: Color::Rgb(211, 47, 47),
            chip_moderator: Color::Rgb(237, 108, 2),
            chip_user: Color::Rgb(46, 125, 50),
            chip_fg: Color::Rgb(255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg: Color::Rgb(18, 18, 18),
            fg: Color::Rgb(230, 230, 230),
            muted_fg: Color::Rgb(160, 160, 160),
            border_fg: Color::Rgb(70, 70, 70),
            accent_fg: Color::Rgb(144, 202, 249),
            header_bg: Color::Rgb(39, 39, 39),
            header_fg: Color::Rgb(230, 230, 230),
            selection_bg: Color::Rgb(45, 55, 72),
            skeleton_fg: Color::Rgb(60, 60, 60),
            error_bg: Color::Rgb(50, 20, 20),
            error_fg: Color::Rgb(244, 143, 143),
            chip_admin: Color::Rgb(239, 83, 80),
            chip_moderator: Color::Rgb(255, 167, 38),
            chip_user: Color::Rgb(102, 187, 106),
            chip_fg: Color::Rgb(18, 18, 18),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border_fg)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.accent_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::light()
    }
}
