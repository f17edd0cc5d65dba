//! State machine deciding which module is active and which modules are open.
//!
//! The controller is the only writer of the open-module list and the active
//! module. Everything else reads them through the slices and references it
//! hands out.

use super::{ModuleRef, ModuleRegistry};
use crate::error::{WorkbenchError, WorkbenchResult};
use crate::view::ViewHandle;
use crate::workbench::WorkbenchContext;
use tracing::trace;

/// Outcome of a transition that changed the active module
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveChange {
    pub previous: Option<ModuleRef>,
    pub current: Option<ModuleRef>,
}

#[derive(Debug, Default)]
pub struct ActiveModuleController {
    /// Open modules in tab order
    open_modules: Vec<ModuleRef>,

    /// `None` while the home screen is shown
    active_module: Option<ModuleRef>,

    /// View returned by the active module's last `activate()`
    active_view: Option<ViewHandle>,
}

impl ActiveModuleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_modules(&self) -> &[ModuleRef] {
        &self.open_modules
    }

    pub fn active_module(&self) -> Option<&ModuleRef> {
        self.active_module.as_ref()
    }

    pub fn active_view(&self) -> Option<&ViewHandle> {
        self.active_view.as_ref()
    }

    pub fn is_open(&self, module: &ModuleRef) -> bool {
        self.open_modules.contains(module)
    }

    pub fn is_home(&self) -> bool {
        self.active_module.is_none()
    }

    /// Make `module` the active module, initializing it on first use.
    ///
    /// Returns `Ok(None)` when the module already was active.
    pub fn open(
        &mut self,
        registry: &ModuleRegistry,
        module: &ModuleRef,
        context: &WorkbenchContext,
    ) -> WorkbenchResult<Option<ActiveChange>> {
        if !registry.contains(module) {
            return Err(WorkbenchError::UnknownModule(module.label()));
        }

        trace!("open - set active module to {}", module.label());
        Ok(self.switch_to(Some(module.clone()), context))
    }

    /// Show the home screen. Open modules stay open in the background.
    pub fn open_home(&mut self) -> Option<ActiveChange> {
        if self.active_module.is_none() {
            return None;
        }

        trace!("open_home - switched to home screen");
        let previous = self.active_module.take();
        self.active_view = None;
        Some(ActiveChange {
            previous,
            current: None,
        })
    }

    /// Close `module`. Returns `Ok(false)` without touching any state when the
    /// module vetoes its destruction.
    pub fn close(
        &mut self,
        module: &ModuleRef,
        context: &WorkbenchContext,
    ) -> WorkbenchResult<(bool, Option<ActiveChange>)> {
        let index = self
            .open_modules
            .iter()
            .position(|m| m == module)
            .ok_or_else(|| WorkbenchError::UnknownModule(module.label()))?;

        // The next active module depends only on tab positions, so it is
        // decided before destroy() gets a chance to run side effects.
        let next = self.next_active_after_close(module, index);

        if !module.borrow_mut().destroy() {
            trace!("close - destroy vetoed by {}", module.label());
            return Ok((false, None));
        }

        trace!("close - destroyed {}", module.label());
        self.open_modules.remove(index);

        trace!(
            "close - set active module to {}",
            next.as_ref().map_or("home screen".to_string(), ModuleRef::label)
        );
        let change = self.switch_to(next, context);
        Ok((true, change))
    }

    fn next_active_after_close(&self, module: &ModuleRef, index: usize) -> Option<ModuleRef> {
        if self.active_module.as_ref() != Some(module) {
            // closing a background tab keeps the current module
            self.active_module.clone()
        } else if self.open_modules.len() == 1 {
            None
        } else if index == 0 {
            Some(self.open_modules[index + 1].clone())
        } else {
            Some(self.open_modules[index - 1].clone())
        }
    }

    fn switch_to(
        &mut self,
        next: Option<ModuleRef>,
        context: &WorkbenchContext,
    ) -> Option<ActiveChange> {
        if self.active_module == next {
            return None;
        }

        let previous = self.active_module.take();
        if let Some(old) = &previous {
            // a module that was just destroyed is no longer open
            if self.is_open(old) {
                trace!("Deactivating {}", old.label());
                old.borrow_mut().deactivate();
            }
        }

        match &next {
            None => {
                self.active_view = None;
            }
            Some(module) => {
                if !self.is_open(module) {
                    trace!("Initializing {}", module.label());
                    module.borrow_mut().init(context);
                    self.open_modules.push(module.clone());
                }
                trace!("Activating {}", module.label());
                self.active_module = Some(module.clone());
                self.active_view = Some(module.borrow_mut().activate());
            }
        }

        Some(ActiveChange {
            previous,
            current: next,
        })
    }
}
