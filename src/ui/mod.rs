pub mod actions;
pub mod preview;
pub mod render;
pub mod search;
pub mod table;
pub mod terminal;

pub use actions::{run_row_action, ActionOutcome, Confirm, ConfirmPrompt, Notifier, PromptVariant, RowAction};
pub use preview::{DocumentKind, DocumentSlot, PreviewModal};
pub use search::{ListingQuery, Navigator, SearchBox};
pub use table::{VendorTable, ViewState};
