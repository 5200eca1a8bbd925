use console::Color;

/// Colours and glyphs used for terminal output.
#[derive(Debug, Clone)]
pub struct Theme {
    pub section_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
    pub path_color: Color,
    pub indent_unit: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            section_color: Color::Cyan,
            success_color: Color::Green,
            warning_color: Color::Yellow,
            path_color: Color::Magenta,
            indent_unit: 2,
        }
    }
}

impl Theme {
    pub fn section(&self, s: &str) -> String {
        console::style(s).fg(self.section_color).bold().to_string()
    }

    pub fn path(&self, s: &str) -> String {
        console::style(s).fg(self.path_color).to_string()
    }

    pub fn dim(&self, s: &str) -> String {
        console::style(s).dim().to_string()
    }

    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_unit * level)
    }

    pub fn success_symbol(&self) -> String {
        console::style("✓").fg(self.success_color).to_string()
    }

    pub fn warning_symbol(&self) -> String {
        console::style("!").fg(self.warning_color).to_string()
    }

    pub fn info_symbol(&self) -> String {
        console::style("-").fg(self.section_color).to_string()
    }

    pub fn arrow_symbol(&self) -> String {
        console::style("→").fg(self.path_color).to_string()
    }
}
