mod footer;
mod header;
mod help_modal;

pub use footer::{Footer, CREDIT};
pub use header::{Header, MAIN_LINK_LABEL, VERSION};
pub use help_modal::HelpModal;
