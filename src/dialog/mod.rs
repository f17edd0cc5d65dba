//! Modal request/response dialogs
//!
//! A dialog presents a title, a message and a fixed set of response buttons,
//! and resolves to exactly one of them.

pub mod controller;

pub use controller::{DialogButton, DialogController, DialogEvent, Resolution};

use crate::workbench::WorkbenchContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for dialog instances
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(pub String);

impl DialogId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a button plays in its dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonRole {
    /// Triggered by Enter
    Default,
    /// Triggered by Escape
    Cancel,
    Neutral,
}

/// A selectable response of a dialog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonType {
    pub text: String,
    pub role: ButtonRole,
}

impl ButtonType {
    pub fn new(text: impl Into<String>, role: ButtonRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    pub fn ok() -> Self {
        Self::new("OK", ButtonRole::Default)
    }

    pub fn cancel() -> Self {
        Self::new("Cancel", ButtonRole::Cancel)
    }

    pub fn yes() -> Self {
        Self::new("Yes", ButtonRole::Default)
    }

    pub fn no() -> Self {
        Self::new("No", ButtonRole::Cancel)
    }

    pub fn close() -> Self {
        Self::new("Close", ButtonRole::Cancel)
    }

    pub fn is_default(&self) -> bool {
        self.role == ButtonRole::Default
    }

    pub fn is_cancel(&self) -> bool {
        self.role == ButtonRole::Cancel
    }
}

/// Kind of dialog; determines the default set of buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogType {
    Information,
    Warning,
    Error,
    Confirmation,
    Input,
}

impl DialogType {
    pub fn default_buttons(self) -> Vec<ButtonType> {
        match self {
            DialogType::Information | DialogType::Warning | DialogType::Error => {
                vec![ButtonType::ok()]
            }
            DialogType::Confirmation => vec![ButtonType::yes(), ButtonType::no()],
            DialogType::Input => vec![ButtonType::ok(), ButtonType::cancel()],
        }
    }
}

pub type ResultCallback = Box<dyn FnOnce(&WorkbenchContext, ButtonType)>;

/// Value describing one dialog presentation
pub struct Dialog {
    pub id: DialogId,
    pub dialog_type: DialogType,
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    pub button_types: Vec<ButtonType>,
    /// A blocking dialog is not dismissed by clicking the backdrop
    pub blocking: bool,
    pub maximized: bool,
    on_result: Option<ResultCallback>,
}

impl Dialog {
    pub fn new(dialog_type: DialogType, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: DialogId::new(),
            dialog_type,
            title: title.into(),
            message: message.into(),
            details: None,
            button_types: dialog_type.default_buttons(),
            blocking: false,
            maximized: false,
            on_result: None,
        }
    }

    pub fn information(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogType::Information, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogType::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogType::Error, title, message)
    }

    pub fn confirmation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogType::Confirmation, title, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<ButtonType>) -> Self {
        self.button_types = buttons;
        self
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    /// Callback invoked with the chosen button once the user responds
    pub fn on_result(mut self, callback: impl FnOnce(&WorkbenchContext, ButtonType) + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    pub(crate) fn take_on_result(&mut self) -> Option<ResultCallback> {
        self.on_result.take()
    }
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("dialog_type", &self.dialog_type)
            .field("title", &self.title)
            .field("button_types", &self.button_types)
            .field("blocking", &self.blocking)
            .finish()
    }
}
