use console::Term;

use super::theme::Theme;

#[derive(Debug, Clone)]
pub struct UserInterface {
    term: Term,
    pub theme: Theme,
    indent: usize,
}

impl UserInterface {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            theme: Theme::default(),
            indent: 0,
        }
    }

    pub fn writeln(&self, message: &str) -> std::io::Result<()> {
        self.term
            .write_line(&(self.theme.indent(self.indent) + message))
    }

    pub fn new_line(&self) -> std::io::Result<()> {
        self.term.write_line("")
    }

    /// Writes a bold, coloured heading that starts a new phase of work.
    pub fn section(&self, message: &str) -> std::io::Result<()> {
        self.writeln(&self.theme.section(message))
    }

    pub fn indented<F>(&self, f: F) -> std::io::Result<()>
    where
        F: FnOnce(&UserInterface) -> std::io::Result<()>,
    {
        f(&UserInterface {
            indent: self.indent + 1,
            ..self.clone()
        })
    }
}

impl UserInterface {
    pub fn success_item(&self, message: &str) -> std::io::Result<()> {
        self.item(&self.theme.success_symbol(), message, None)
    }

    pub fn warning_item(&self, message: &str, suggestion: Option<&str>) -> std::io::Result<()> {
        self.item(&self.theme.warning_symbol(), message, suggestion)
    }

    pub fn info_item(&self, message: &str) -> std::io::Result<()> {
        self.item(&self.theme.info_symbol(), message, None)
    }

    fn item(&self, symbol: &str, message: &str, suggestion: Option<&str>) -> std::io::Result<()> {
        self.writeln(&format!("{symbol} {message}"))?;
        if let Some(suggestion) = suggestion {
            self.term.write_line(&format!(
                "{}{} {}",
                self.theme.indent(self.indent + 1),
                self.theme.arrow_symbol(),
                self.theme.dim(suggestion)
            ))?;
        }
        Ok(())
    }
}
