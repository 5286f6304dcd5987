use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub warn: Style,
}

impl Theme {
    /// Colors only when stdout is a terminal, so redirected output stays plain.
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            success: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
        }
    }

    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warn: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
