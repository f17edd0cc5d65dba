//! Interactive module views
//!
//! A module whose content reacts to input returns a `ScreenView` from
//! `activate`. The app renders it in the content area and forwards every key
//! the workbench itself does not consume.

use super::styles::Theme;
use super::Frame;
use crate::workbench::WorkbenchContext;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::rc::Rc;

pub trait Screen {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Handle a key press. Returns `true` if the key was consumed.
    fn handle_key(&mut self, key: KeyEvent, context: &WorkbenchContext) -> bool {
        let _ = (key, context);
        false
    }

    /// Shown in the status bar while the screen is active
    fn status(&self) -> Option<String> {
        None
    }
}

/// Shared handle to a `Screen`, stored inside a `ViewHandle`
#[derive(Clone)]
pub struct ScreenView(Rc<RefCell<dyn Screen>>);

impl ScreenView {
    pub fn new<S: Screen + 'static>(screen: S) -> Self {
        Self(Rc::new(RefCell::new(screen)))
    }

    /// Wrap a screen the module keeps a handle to
    pub fn shared(screen: Rc<RefCell<dyn Screen>>) -> Self {
        Self(screen)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.0.borrow().render(frame, area, theme);
    }

    pub fn handle_key(&self, key: KeyEvent, context: &WorkbenchContext) -> bool {
        self.0.borrow_mut().handle_key(key, context)
    }

    pub fn status(&self) -> Option<String> {
        self.0.borrow().status()
    }
}
