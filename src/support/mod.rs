mod printer;
mod resources;
mod system;

pub use printer::{Printer, Printing};
pub use resources::{ResourceLocating, ResourceLocator};
pub use system::{CommandCheck, CommandChecking, System, SystemError, Systeming};
