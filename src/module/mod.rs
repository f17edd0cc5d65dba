//! Pluggable modules hosted by the workbench
//!
//! A module is a unit of functionality with a name, an icon and lifecycle
//! hooks. The workbench shows it as a tile on the home screen and, once
//! opened, as a tab.

pub mod controller;
pub mod registry;

pub use controller::{ActiveChange, ActiveModuleController};
pub use registry::ModuleRegistry;

use crate::view::{TextView, ViewHandle};
use crate::workbench::WorkbenchContext;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

/// Capability contract every hosted module implements
pub trait Module {
    /// Display name; may be `None` when the module supplies its own tile and tab
    fn name(&self) -> Option<&str>;

    /// Opaque icon handle (a glyph for terminal renderers)
    fn icon(&self) -> Option<&str> {
        None
    }

    /// Custom home-screen presentation, used instead of the tile factory's default
    fn tile(&self) -> Option<ViewHandle> {
        None
    }

    /// Custom tab presentation, used instead of the tab factory's default
    fn tab(&self) -> Option<ViewHandle> {
        None
    }

    /// Called exactly once, the first time the module becomes active
    fn init(&mut self, context: &WorkbenchContext) {
        let _ = context;
    }

    /// Called every time the module becomes active; returns the view to display
    fn activate(&mut self) -> ViewHandle;

    /// Called when the module stops being active but stays open
    fn deactivate(&mut self) {}

    /// Called when the module is closed. Returning `false` vetoes the close.
    fn destroy(&mut self) -> bool {
        true
    }
}

/// Shared handle to a module. Two handles are equal only if they refer to
/// the same module instance.
#[derive(Clone)]
pub struct ModuleRef(Rc<RefCell<dyn Module>>);

impl ModuleRef {
    pub fn new<M: Module + 'static>(module: M) -> Self {
        Self(Rc::new(RefCell::new(module)))
    }

    pub fn borrow(&self) -> Ref<'_, dyn Module> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Module> {
        self.0.borrow_mut()
    }

    pub fn name(&self) -> Option<String> {
        self.0.borrow().name().map(str::to_string)
    }

    pub fn icon(&self) -> Option<String> {
        self.0.borrow().icon().map(str::to_string)
    }

    /// Human readable label for logs and error messages
    pub fn label(&self) -> String {
        self.name()
            .unwrap_or_else(|| format!("<unnamed module {:p}>", Rc::as_ptr(&self.0)))
    }

    /// Non-owning handle, for a module that needs to refer to itself
    pub fn downgrade(&self) -> WeakModuleRef {
        WeakModuleRef(Rc::downgrade(&self.0))
    }
}

/// Weak counterpart of `ModuleRef`
#[derive(Clone)]
pub struct WeakModuleRef(Weak<RefCell<dyn Module>>);

impl WeakModuleRef {
    pub fn upgrade(&self) -> Option<ModuleRef> {
        self.0.upgrade().map(ModuleRef)
    }
}

impl PartialEq for ModuleRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ModuleRef {}

impl fmt::Debug for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(module) => write!(f, "ModuleRef({:?})", module.name()),
            Err(_) => write!(f, "ModuleRef(<in use>)"),
        }
    }
}

type ViewBuilder = Box<dyn FnMut() -> ViewHandle>;
type CloseGuard = Box<dyn FnMut() -> bool>;

/// Ready-made module for hosts that only need a name, an icon and a view
pub struct BasicModule {
    name: String,
    icon: Option<String>,
    view: ViewBuilder,
    close_guard: Option<CloseGuard>,
}

impl BasicModule {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let title = name.clone();
        Self {
            name,
            icon: None,
            view: Box::new(move || ViewHandle::new(TextView::new(title.clone()))),
            close_guard: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_view(mut self, view: impl FnMut() -> ViewHandle + 'static) -> Self {
        self.view = Box::new(view);
        self
    }

    /// Consulted on close; returning `false` keeps the module open
    pub fn with_close_guard(mut self, guard: impl FnMut() -> bool + 'static) -> Self {
        self.close_guard = Some(Box::new(guard));
        self
    }

    pub fn into_ref(self) -> ModuleRef {
        ModuleRef::new(self)
    }
}

impl Module for BasicModule {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn activate(&mut self) -> ViewHandle {
        (self.view)()
    }

    fn destroy(&mut self) -> bool {
        match self.close_guard.as_mut() {
            Some(guard) => guard(),
            None => true,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_module_ref_identity() {
        let a = BasicModule::new("Calendar").into_ref();
        let b = BasicModule::new("Calendar").into_ref();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_weak_ref_does_not_keep_module_alive() {
        let a = BasicModule::new("Calendar").into_ref();
        let weak = a.downgrade();
        assert_eq!(weak.upgrade(), Some(a.clone()));

        drop(a);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_basic_module_defaults() {
        let module = BasicModule::new("Calendar").with_icon("📅").into_ref();
        assert_eq!(module.name().as_deref(), Some("Calendar"));
        assert_eq!(module.icon().as_deref(), Some("📅"));

        let view = module.borrow_mut().activate();
        assert_eq!(view.downcast_ref::<TextView>().unwrap().title, "Calendar");
        assert!(module.borrow_mut().destroy());
    }

    #[test]
    fn test_basic_module_close_guard() {
        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        let module = BasicModule::new("Notes")
            .with_close_guard(move || !flag.get())
            .into_ref();

        assert!(!module.borrow_mut().destroy());
        dirty.set(false);
        assert!(module.borrow_mut().destroy());
    }
}
