//! List/form state machine sitting between the UI and the store.

mod confirm;
mod controller;

pub use confirm::{AssumeYes, Confirm, TerminalConfirm};
pub use controller::{DeleteOutcome, FormFields, ViewController, ViewState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    List,
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("cannot {action} while in {from:?} mode")]
    InvalidTransition { from: Mode, action: &'static str },
}
