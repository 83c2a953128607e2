//! Screen state machines shared by every management screen.

pub mod dashboard;
pub mod forms;
pub mod list;
pub mod modal;
pub mod profile;
pub mod render;
pub mod scrape;

pub use list::{ListView, LoadOutcome, PageSource};
pub use modal::{FormModal, FormSpec, ModalState, SubmitError};
