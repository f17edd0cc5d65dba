use crate::dialog::DialogType;
use ratatui::style::{Color, Modifier, Style};

/// Colors used by the workbench screen
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,

    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    pub background: Color,
    pub background_alt: Color,

    pub border: Color,
    pub border_focused: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(147, 51, 234),    // Purple
            accent: Color::Rgb(236, 72, 153),     // Pink

            text: Color::Rgb(248, 250, 252),      // Slate-50
            text_dim: Color::Rgb(148, 163, 184),  // Slate-400
            text_bright: Color::Rgb(255, 255, 255),

            background: Color::Rgb(15, 23, 42),   // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800

            border: Color::Rgb(71, 85, 105),      // Slate-600
            border_focused: Color::Rgb(147, 51, 234),

            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(245, 158, 11),
            error: Color::Rgb(239, 68, 68),
            info: Color::Rgb(59, 130, 246),

            selection: Color::Rgb(30, 58, 138),   // Blue-900
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_alt)
    }

    /// Toolbar tab of the active module
    pub fn active_tab_style(&self) -> Style {
        Style::default()
            .fg(self.text_bright)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_style(&self) -> Style {
        Style::default().fg(self.text_dim).bg(self.background_alt)
    }

    pub fn toolbar_control_style(&self) -> Style {
        Style::default().fg(self.accent).bg(self.background_alt)
    }

    /// Applied over everything below a modal overlay
    pub fn backdrop_style(&self) -> Style {
        Style::default().fg(self.text_dim).add_modifier(Modifier::DIM)
    }

    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Border color of a dialog, by dialog type
    pub fn dialog_border_style(&self, dialog_type: DialogType) -> Style {
        let color = match dialog_type {
            DialogType::Information => self.info,
            DialogType::Warning => self.warning,
            DialogType::Error => self.error,
            DialogType::Confirmation => self.primary,
            DialogType::Input => self.success,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
