//! Application workbench: a registry of modules shown as tiles on a paged
//! home screen and as tabs once opened, with overlays, a navigation drawer
//! and modal dialogs on top.
//!
//! The core types are presentation-agnostic. `Workbench` holds all state
//! and exposes it through read-only projections and change notifications;
//! the `tui` module is one renderer for it.

pub mod config;
pub mod dialog;
pub mod error;
pub mod module;
pub mod overlay;
pub mod tui;
pub mod view;
pub mod workbench;

pub use config::Settings;
pub use dialog::{ButtonRole, ButtonType, Dialog, DialogId, DialogType};
pub use error::{WorkbenchError, WorkbenchResult};
pub use module::{BasicModule, Module, ModuleRef, WeakModuleRef};
pub use overlay::OverlayId;
pub use view::{MenuItem, TextView, ToolbarControl, ViewHandle};
pub use workbench::{Workbench, WorkbenchConfig, WorkbenchContext, WorkbenchEvent};
