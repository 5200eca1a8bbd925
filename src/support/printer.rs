use crate::utils::ui::UserInterface;

/// Fire-and-forget user-facing status output.
pub trait Printing {
    fn print_section(&self, message: &str);
    fn print_success(&self, message: &str);
    fn print_warning(&self, message: &str);
}

/// Writes to stdout through the themed [`UserInterface`].
#[derive(Debug, Clone)]
pub struct Printer {
    ui: UserInterface,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            ui: UserInterface::new(),
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

// Output failures never affect control flow, they only end up in the log.
fn report(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to write to terminal: {e}");
    }
}

impl Printing for Printer {
    fn print_section(&self, message: &str) {
        report(self.ui.section(message));
    }

    fn print_success(&self, message: &str) {
        report(self.ui.success_item(message));
    }

    fn print_warning(&self, message: &str) {
        report(self.ui.warning_item(message, None));
    }
}
