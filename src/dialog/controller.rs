//! Presentation state of the current dialog
//!
//! The controller holds at most one dialog at a time, keeps its rebuilt
//! button presentations and records `Shown`/`Hidden` lifecycle events for the
//! workbench to publish once a transition has completed.

use super::{ButtonType, Dialog, DialogId, ResultCallback};
use crate::error::{WorkbenchError, WorkbenchResult};
use tracing::trace;

/// Lifecycle events of the dialog presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Shown(DialogId),
    Hidden(DialogId),
}

/// Presentation of one button of the current dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    pub button_type: ButtonType,
    pub label: String,
    pub is_default: bool,
    pub is_cancel: bool,
}

/// A resolved dialog: the chosen button and the callback still to be run
pub struct Resolution {
    pub dialog_id: DialogId,
    pub button: ButtonType,
    pub callback: Option<ResultCallback>,
}

#[derive(Debug, Default)]
pub struct DialogController {
    dialog: Option<Dialog>,
    buttons: Vec<DialogButton>,
    showing: bool,
    button_text_uppercase: bool,
    pending: Vec<DialogEvent>,
}

impl DialogController {
    pub fn new(button_text_uppercase: bool) -> Self {
        Self {
            button_text_uppercase,
            ..Self::default()
        }
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn buttons(&self) -> &[DialogButton] {
        &self.buttons
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn button_text_uppercase(&self) -> bool {
        self.button_text_uppercase
    }

    /// Button that Enter should trigger
    pub fn default_button(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.is_default)
    }

    /// Button that Escape should trigger
    pub fn cancel_button(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.is_cancel)
    }

    /// Present `dialog`, replacing any dialog currently held. The replaced
    /// dialog's buttons are torn down and its callback is dropped unused.
    pub fn show(&mut self, dialog: Dialog) {
        if let Some(old) = &self.dialog {
            trace!("Replacing dialog {} with {}", old.id, dialog.id);
        }

        let id = dialog.id.clone();
        self.dialog = Some(dialog);
        self.showing = true;
        self.rebuild_buttons();
        self.fire_shown(id);
    }

    /// Replace the button types of the current dialog
    pub fn set_button_types(&mut self, button_types: Vec<ButtonType>) -> WorkbenchResult<()> {
        let dialog = self.dialog.as_mut().ok_or(WorkbenchError::NoDialog)?;
        dialog.button_types = button_types;
        let id = dialog.id.clone();

        self.rebuild_buttons();
        if self.showing {
            self.fire_shown(id);
        }
        Ok(())
    }

    pub fn set_button_text_uppercase(&mut self, uppercase: bool) {
        if self.button_text_uppercase == uppercase {
            return;
        }
        self.button_text_uppercase = uppercase;

        if let Some(id) = self.dialog.as_ref().map(|d| d.id.clone()) {
            self.rebuild_buttons();
            if self.showing {
                self.fire_shown(id);
            }
        }
    }

    /// Resolve the current dialog with the button at `index`
    pub fn select(&mut self, index: usize) -> WorkbenchResult<Resolution> {
        if !self.showing {
            return Err(WorkbenchError::NoDialog);
        }

        let button = self
            .buttons
            .get(index)
            .map(|b| b.button_type.clone())
            .ok_or(WorkbenchError::IndexOutOfRange {
                index,
                len: self.buttons.len(),
            })?;

        self.resolve_with(button)
    }

    /// Resolve the current dialog with `button_type`
    pub fn resolve(&mut self, button_type: &ButtonType) -> WorkbenchResult<Resolution> {
        if !self.showing {
            return Err(WorkbenchError::NoDialog);
        }

        if !self.buttons.iter().any(|b| &b.button_type == button_type) {
            return Err(WorkbenchError::UnknownButton(button_type.text.clone()));
        }

        self.resolve_with(button_type.clone())
    }

    /// Hide the current dialog. Only the showing → hidden edge records a
    /// `Hidden` event; hiding an already hidden dialog does nothing.
    pub fn hide(&mut self) -> bool {
        if !self.showing {
            return false;
        }

        self.showing = false;
        self.buttons.clear();
        if let Some(dialog) = self.dialog.take() {
            trace!("Dialog {} has been hidden", dialog.id);
            self.pending.push(DialogEvent::Hidden(dialog.id));
        }
        true
    }

    /// Lifecycle events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.pending)
    }

    fn resolve_with(&mut self, button: ButtonType) -> WorkbenchResult<Resolution> {
        let dialog = self.dialog.as_mut().ok_or(WorkbenchError::NoDialog)?;
        let dialog_id = dialog.id.clone();
        let callback = dialog.take_on_result();

        trace!("Dialog {} resolved with '{}'", dialog_id, button.text);
        self.hide();

        Ok(Resolution {
            dialog_id,
            button,
            callback,
        })
    }

    fn rebuild_buttons(&mut self) {
        trace!("Updating buttons");
        self.buttons.clear();

        let Some(dialog) = &self.dialog else {
            return;
        };

        // only the first default button keeps its designation
        let mut has_default = false;
        for button_type in &dialog.button_types {
            let label = if self.button_text_uppercase {
                button_type.text.to_uppercase()
            } else {
                button_type.text.clone()
            };

            self.buttons.push(DialogButton {
                button_type: button_type.clone(),
                label,
                is_default: !has_default && button_type.is_default(),
                is_cancel: button_type.is_cancel(),
            });
            has_default |= button_type.is_default();
        }
    }

    fn fire_shown(&mut self, id: DialogId) {
        trace!("Dialog {} is initialized and being shown", id);
        self.pending.push(DialogEvent::Shown(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ButtonRole;
    use crate::workbench::WorkbenchContext;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_defaults() -> Vec<ButtonType> {
        vec![
            ButtonType::new("Save", ButtonRole::Default),
            ButtonType::new("Save As", ButtonRole::Default),
            ButtonType::new("Discard", ButtonRole::Cancel),
        ]
    }

    #[test]
    fn test_first_default_wins() {
        let mut controller = DialogController::new(false);
        controller.show(Dialog::confirmation("Save", "Save changes?").with_buttons(two_defaults()));

        let defaults: Vec<bool> = controller.buttons().iter().map(|b| b.is_default).collect();
        assert_eq!(defaults, vec![true, false, false]);
        assert_eq!(controller.default_button(), Some(0));
        assert_eq!(controller.cancel_button(), Some(2));
    }

    #[test]
    fn test_selecting_second_default_resolves_once() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();

        let mut controller = DialogController::new(false);
        let dialog = Dialog::confirmation("Save", "Save changes?")
            .with_buttons(two_defaults())
            .on_result(move |_, button| sink.borrow_mut().push(button));
        let id = dialog.id.clone();
        controller.show(dialog);
        controller.drain_events();

        let resolution = controller.select(1).unwrap();
        let (context, _commands) = WorkbenchContext::channel();
        (resolution.callback.unwrap())(&context, resolution.button.clone());

        assert_eq!(received.borrow().as_slice(), &[two_defaults()[1].clone()]);
        assert_eq!(controller.drain_events(), vec![DialogEvent::Hidden(id)]);
        assert!(!controller.is_showing());
        assert!(matches!(controller.select(0), Err(WorkbenchError::NoDialog)));

        assert!(!controller.hide());
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_hidden_fires_only_on_edge() {
        let mut controller = DialogController::new(false);
        controller.show(Dialog::information("Info", "Done"));
        controller.drain_events();

        assert!(controller.hide());
        assert!(!controller.hide());
        assert_eq!(controller.drain_events().len(), 1);
    }

    #[test]
    fn test_button_change_rebuilds_and_fires_shown() {
        let mut controller = DialogController::new(false);
        let dialog = Dialog::information("Info", "Done");
        let id = dialog.id.clone();
        controller.show(dialog);
        assert_eq!(controller.drain_events(), vec![DialogEvent::Shown(id.clone())]);

        controller
            .set_button_types(vec![ButtonType::yes(), ButtonType::no()])
            .unwrap();
        let labels: Vec<&str> = controller.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Yes", "No"]);
        assert_eq!(controller.drain_events(), vec![DialogEvent::Shown(id)]);
    }

    #[test]
    fn test_uppercase_labels() {
        let mut controller = DialogController::new(false);
        controller.show(Dialog::confirmation("Quit", "Really?"));
        controller.drain_events();

        controller.set_button_text_uppercase(true);
        assert_eq!(controller.buttons()[0].label, "YES");
        assert_eq!(controller.drain_events().len(), 1);

        // unchanged option does not rebuild
        controller.set_button_text_uppercase(true);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_replacing_dialog_drops_old_bindings() {
        let called = Rc::new(RefCell::new(false));
        let flag = called.clone();

        let mut controller = DialogController::new(false);
        controller.show(Dialog::confirmation("First", "?").on_result(move |_, _| *flag.borrow_mut() = true));
        let second = Dialog::information("Second", "!");
        let second_id = second.id.clone();
        controller.show(second);

        assert_eq!(controller.buttons().len(), 1);
        assert_eq!(controller.dialog().unwrap().id, second_id);

        let resolution = controller.resolve(&ButtonType::ok()).unwrap();
        assert!(resolution.callback.is_none());
        assert!(!*called.borrow());
    }

    #[test]
    fn test_resolve_unknown_button() {
        let mut controller = DialogController::new(false);
        controller.show(Dialog::information("Info", "Done"));
        assert!(matches!(
            controller.resolve(&ButtonType::cancel()),
            Err(WorkbenchError::UnknownButton(_))
        ));
        assert!(controller.is_showing());
        assert!(matches!(
            controller.select(5),
            Err(WorkbenchError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_set_buttons_without_dialog() {
        let mut controller = DialogController::new(false);
        assert!(matches!(
            controller.set_button_types(vec![ButtonType::ok()]),
            Err(WorkbenchError::NoDialog)
        ));
    }
}
