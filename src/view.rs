//! Opaque view handles and the descriptor values produced by the default
//! factories.
//!
//! The core never renders anything. Factories and module hooks hand back
//! `ViewHandle`s which a rendering layer downcasts to whatever it understands.

use crate::module::ModuleRef;
use crate::workbench::WorkbenchContext;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Cheaply cloneable, type-erased presentation handle
#[derive(Clone)]
pub struct ViewHandle(Rc<dyn Any>);

impl ViewHandle {
    pub fn new<T: Any>(view: T) -> Self {
        Self(Rc::new(view))
    }

    /// Borrow the view as `T` if that is what it holds
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Whether both handles point at the same view instance
    pub fn ptr_eq(&self, other: &ViewHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewHandle({:p})", Rc::as_ptr(&self.0))
    }
}

/// Plain text content, the simplest thing a module can display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub title: String,
    pub lines: Vec<String>,
}

impl TextView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Home-screen representation of a module
#[derive(Debug, Clone)]
pub struct Tile {
    pub module: ModuleRef,
    pub name: Option<String>,
    pub icon: Option<String>,
}

/// Open-module representation of a module
#[derive(Debug, Clone)]
pub struct Tab {
    pub module: ModuleRef,
    pub name: Option<String>,
    pub icon: Option<String>,
    /// Whether the module was the active one when the tab was created
    pub active: bool,
}

/// One page of tiles on the home screen
#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub tiles: Vec<ViewHandle>,
}

/// Default navigation drawer description
#[derive(Debug, Clone)]
pub struct NavigationDrawer {
    pub items: Vec<MenuItem>,
}

type Action = Rc<dyn Fn(&WorkbenchContext)>;

/// Entry of the navigation drawer
#[derive(Clone)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    action: Action,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        action: impl Fn(&WorkbenchContext) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            action: Rc::new(action),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Run the item's action against the workbench
    pub fn trigger(&self, context: &WorkbenchContext) {
        (self.action)(context);
    }
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

/// Control placed in the toolbar next to the tabs
#[derive(Clone)]
pub struct ToolbarControl {
    pub id: String,
    pub label: String,
    action: Option<Action>,
}

impl ToolbarControl {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            action: None,
        }
    }

    pub fn on_activate(mut self, action: impl Fn(&WorkbenchContext) + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    pub fn trigger(&self, context: &WorkbenchContext) {
        if let Some(action) = &self.action {
            action(context);
        }
    }
}

impl PartialEq for ToolbarControl {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for ToolbarControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolbarControl")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}
