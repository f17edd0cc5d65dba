//! Handle through which modules, dialog callbacks, menu actions and
//! observers ask the workbench to do something.
//!
//! Requests are queued and applied by `Workbench::process_commands` on the
//! same logical thread, after the transition that produced them completed.

use crate::dialog::{ButtonType, Dialog};
use crate::module::ModuleRef;
use crate::overlay::OverlayId;
use std::fmt;
use tokio::sync::mpsc;
use tracing::warn;

/// Request queued for the workbench
pub enum WorkbenchCommand {
    OpenModule(ModuleRef),
    OpenHome,
    CloseModule(ModuleRef),
    CloseActiveModule,
    ShowOverlay { overlay: OverlayId, modal: bool },
    HideOverlay { overlay: OverlayId, modal: bool },
    HideAllOverlays,
    ShowNavigationDrawer,
    HideNavigationDrawer,
    ShowDialog(Dialog),
    HideDialog,
    SetDialogButtons(Vec<ButtonType>),
}

impl fmt::Debug for WorkbenchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenModule(m) => write!(f, "OpenModule({})", m.label()),
            Self::OpenHome => write!(f, "OpenHome"),
            Self::CloseModule(m) => write!(f, "CloseModule({})", m.label()),
            Self::CloseActiveModule => write!(f, "CloseActiveModule"),
            Self::ShowOverlay { overlay, modal } => write!(f, "ShowOverlay({overlay}, {modal})"),
            Self::HideOverlay { overlay, modal } => write!(f, "HideOverlay({overlay}, {modal})"),
            Self::HideAllOverlays => write!(f, "HideAllOverlays"),
            Self::ShowNavigationDrawer => write!(f, "ShowNavigationDrawer"),
            Self::HideNavigationDrawer => write!(f, "HideNavigationDrawer"),
            Self::ShowDialog(d) => write!(f, "ShowDialog({})", d.title),
            Self::HideDialog => write!(f, "HideDialog"),
            Self::SetDialogButtons(b) => write!(f, "SetDialogButtons({} buttons)", b.len()),
        }
    }
}

#[derive(Clone)]
pub struct WorkbenchContext {
    sender: mpsc::UnboundedSender<WorkbenchCommand>,
}

impl WorkbenchContext {
    /// Create a context together with the receiving end of its queue
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WorkbenchCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, command: WorkbenchCommand) {
        if let Err(e) = self.sender.send(command) {
            warn!("Workbench is gone, dropping command {:?}", e.0);
        }
    }

    pub fn open_module(&self, module: &ModuleRef) {
        self.send(WorkbenchCommand::OpenModule(module.clone()));
    }

    pub fn open_home_screen(&self) {
        self.send(WorkbenchCommand::OpenHome);
    }

    pub fn close_module(&self, module: &ModuleRef) {
        self.send(WorkbenchCommand::CloseModule(module.clone()));
    }

    pub fn close_active_module(&self) {
        self.send(WorkbenchCommand::CloseActiveModule);
    }

    pub fn show_overlay(&self, overlay: impl Into<OverlayId>, modal: bool) {
        self.send(WorkbenchCommand::ShowOverlay {
            overlay: overlay.into(),
            modal,
        });
    }

    pub fn hide_overlay(&self, overlay: impl Into<OverlayId>, modal: bool) {
        self.send(WorkbenchCommand::HideOverlay {
            overlay: overlay.into(),
            modal,
        });
    }

    pub fn hide_all_overlays(&self) {
        self.send(WorkbenchCommand::HideAllOverlays);
    }

    pub fn show_navigation_drawer(&self) {
        self.send(WorkbenchCommand::ShowNavigationDrawer);
    }

    pub fn hide_navigation_drawer(&self) {
        self.send(WorkbenchCommand::HideNavigationDrawer);
    }

    pub fn show_dialog(&self, dialog: Dialog) {
        self.send(WorkbenchCommand::ShowDialog(dialog));
    }

    pub fn hide_dialog(&self) {
        self.send(WorkbenchCommand::HideDialog);
    }

    pub fn set_dialog_buttons(&self, buttons: Vec<ButtonType>) {
        self.send(WorkbenchCommand::SetDialogButtons(buttons));
    }
}

impl fmt::Debug for WorkbenchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkbenchContext")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}
