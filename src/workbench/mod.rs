//! The workbench composition root
//!
//! `Workbench` wires the module registry, the active-module controller, the
//! overlay manager and the dialog controller together. It is the only entry
//! point the view layer talks to: it reads the projections exposed here and
//! calls the imperative operations in response to user input.
//!
//! Every operation updates all derived state first and only then notifies
//! observers, so an observer never sees a half-finished transition.

pub mod config;
pub mod context;
pub mod events;

pub use config::{WorkbenchConfig, DEFAULT_MODULES_PER_PAGE};
pub use context::{WorkbenchCommand, WorkbenchContext};
pub use events::{SubscriptionId, WorkbenchEvent};

use crate::dialog::{ButtonType, Dialog, DialogButton, DialogController, DialogEvent, Resolution};
use crate::error::{WorkbenchError, WorkbenchResult};
use crate::module::{ActiveChange, ActiveModuleController, ModuleRef, ModuleRegistry};
use crate::overlay::{OverlayId, OverlayManager};
use crate::view::{MenuItem, ToolbarControl, ViewHandle};
use events::Observers;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Overlay under which the current dialog is shown
pub const DIALOG_OVERLAY: &str = "workbench.dialog";

/// Overlay under which the navigation drawer is shown
pub const NAVIGATION_DRAWER_OVERLAY: &str = "workbench.navigation-drawer";

/// Upper bound on commands applied by one `process_commands` call
pub const MAX_COMMANDS_PER_BATCH: usize = 256;

pub struct Workbench {
    registry: ModuleRegistry,
    controller: ActiveModuleController,
    overlays: OverlayManager,
    dialogs: DialogController,
    config: WorkbenchConfig,
    navigation_drawer_items: Vec<MenuItem>,
    toolbar_controls: Vec<ToolbarControl>,
    context: WorkbenchContext,
    commands: mpsc::UnboundedReceiver<WorkbenchCommand>,
    observers: Observers,
    version: u64,
}

impl Workbench {
    /// Build a workbench with default options around `modules`
    pub fn of(modules: impl IntoIterator<Item = ModuleRef>) -> WorkbenchResult<Self> {
        Self::new(WorkbenchConfig::new(modules))
    }

    pub fn new(mut config: WorkbenchConfig) -> WorkbenchResult<Self> {
        let mut registry = ModuleRegistry::new(config.modules_per_page)?;
        registry.add(std::mem::take(&mut config.modules))?;

        let mut overlays = OverlayManager::new();
        overlays.register(OverlayId::from(NAVIGATION_DRAWER_OVERLAY));
        overlays.register(OverlayId::from(DIALOG_OVERLAY));
        for overlay in std::mem::take(&mut config.overlays) {
            overlays.register(overlay);
        }

        let mut toolbar_controls: Vec<ToolbarControl> = Vec::new();
        for control in std::mem::take(&mut config.toolbar_controls) {
            if !toolbar_controls.contains(&control) {
                toolbar_controls.push(control);
            }
        }

        let navigation_drawer_items = std::mem::take(&mut config.navigation_drawer_items);
        let dialogs = DialogController::new(config.button_text_uppercase);
        let (context, commands) = WorkbenchContext::channel();

        debug!(
            "Workbench created with {} module(s), {} per page",
            registry.len(),
            registry.modules_per_page()
        );

        Ok(Self {
            registry,
            controller: ActiveModuleController::new(),
            overlays,
            dialogs,
            config,
            navigation_drawer_items,
            toolbar_controls,
            context,
            commands,
            observers: Observers::default(),
            version: 0,
        })
    }

    /// Handle for queueing commands from callbacks
    pub fn context(&self) -> WorkbenchContext {
        self.context.clone()
    }

    // Modules

    pub fn modules(&self) -> &[ModuleRef] {
        self.registry.modules()
    }

    pub fn open_modules(&self) -> &[ModuleRef] {
        self.controller.open_modules()
    }

    /// `None` while the home screen is shown
    pub fn active_module(&self) -> Option<&ModuleRef> {
        self.controller.active_module()
    }

    pub fn active_module_view(&self) -> Option<&ViewHandle> {
        self.controller.active_view()
    }

    pub fn modules_per_page(&self) -> usize {
        self.registry.modules_per_page()
    }

    pub fn page_count(&self) -> usize {
        self.registry.page_count()
    }

    pub fn module_at(&self, index: usize) -> WorkbenchResult<&ModuleRef> {
        self.registry.module_at(index)
    }

    /// Open `module` in a tab, or switch to its tab if it is already open
    pub fn open_module(&mut self, module: &ModuleRef) -> WorkbenchResult<()> {
        let before = self.open_modules().len();
        let change = self.controller.open(&self.registry, module, &self.context)?;

        let mut events = Vec::new();
        if self.open_modules().len() != before {
            events.push(WorkbenchEvent::OpenModulesChanged);
        }
        push_active_change(&mut events, change);
        self.publish(events);
        Ok(())
    }

    /// Go back to the home screen. Open modules stay open.
    pub fn open_home_screen(&mut self) {
        let mut events = Vec::new();
        push_active_change(&mut events, self.controller.open_home());
        self.publish(events);
    }

    /// Close `module`. Returns `Ok(false)` if the module refused to close.
    pub fn close_module(&mut self, module: &ModuleRef) -> WorkbenchResult<bool> {
        let (closed, change) = self.controller.close(module, &self.context)?;

        let mut events = Vec::new();
        if closed {
            events.push(WorkbenchEvent::OpenModulesChanged);
            push_active_change(&mut events, change);
        } else {
            events.push(WorkbenchEvent::ModuleCloseVetoed(module.clone()));
        }
        self.publish(events);
        Ok(closed)
    }

    /// Remove `module` from the registry. Open modules must be closed first.
    pub fn remove_module(&mut self, module: &ModuleRef) -> WorkbenchResult<()> {
        if self.controller.is_open(module) {
            return Err(WorkbenchError::ModuleOpen(module.label()));
        }
        if !self.registry.remove(module) {
            return Err(WorkbenchError::UnknownModule(module.label()));
        }

        debug!("Removed module {}", module.label());
        self.publish(vec![WorkbenchEvent::ModulesChanged]);
        Ok(())
    }

    // Factories

    /// Tab presentation of `module`, freshly created by the tab factory
    pub fn tab(&self, module: &ModuleRef) -> ViewHandle {
        let factory = self.config.tab_factory.clone();
        factory(self, module)
    }

    /// Tile presentation of `module`, freshly created by the tile factory
    pub fn tile(&self, module: &ModuleRef) -> ViewHandle {
        let factory = self.config.tile_factory.clone();
        factory(self, module)
    }

    /// Home-screen page `page_index`, freshly created by the page factory
    pub fn page(&self, page_index: usize) -> WorkbenchResult<ViewHandle> {
        self.registry.page(page_index)?;
        let factory = self.config.page_factory.clone();
        Ok(factory(self, page_index))
    }

    pub fn navigation_drawer(&self) -> ViewHandle {
        let factory = self.config.navigation_drawer_factory.clone();
        factory(self)
    }

    // Overlays

    pub fn overlays(&self) -> &[OverlayId] {
        self.overlays.overlays()
    }

    pub fn shown_modal_overlays(&self) -> &[OverlayId] {
        self.overlays.shown_modal()
    }

    pub fn shown_overlays(&self) -> &[OverlayId] {
        self.overlays.shown()
    }

    pub fn is_overlay_visible(&self, overlay: &OverlayId) -> bool {
        self.overlays.is_visible(overlay)
    }

    /// Whether the dimming backdrop is drawn, i.e. a modal overlay is shown
    pub fn backdrop_visible(&self) -> bool {
        self.overlays.backdrop_visible()
    }

    /// Load an overlay hidden. Registering it twice keeps the first one.
    pub fn register_overlay(&mut self, overlay: impl Into<OverlayId>) {
        if self.overlays.register(overlay.into()) {
            self.publish(vec![WorkbenchEvent::OverlaysChanged]);
        }
    }

    pub fn unregister_overlay(&mut self, overlay: &OverlayId) -> WorkbenchResult<()> {
        self.transition_overlays(|overlays| overlays.unregister(overlay).map(|_| true))
    }

    pub fn show_overlay(&mut self, overlay: &OverlayId, modal: bool) -> WorkbenchResult<()> {
        self.transition_overlays(|overlays| overlays.show(overlay, modal))
    }

    /// Hide an overlay; `modal` must match the flag it was shown with
    pub fn hide_overlay(&mut self, overlay: &OverlayId, modal: bool) -> WorkbenchResult<()> {
        self.transition_overlays(|overlays| overlays.hide(overlay, modal))
    }

    pub fn hide_all_overlays(&mut self) {
        // hide_all cannot fail
        let _ = self.transition_overlays(|overlays| Ok(!overlays.hide_all().is_empty()));
    }

    /// Reaction to a click on the backdrop: dismiss everything unless a
    /// blocking dialog is in front
    pub fn backdrop_clicked(&mut self) {
        let blocked = self.dialogs.is_showing()
            && self.dialogs.dialog().is_some_and(|d| d.blocking)
            && self.overlays.topmost_modal() == Some(&OverlayId::from(DIALOG_OVERLAY));

        if blocked {
            trace!("backdrop click ignored, blocking dialog is shown");
            return;
        }
        self.hide_all_overlays();
    }

    // Navigation drawer

    pub fn navigation_drawer_items(&self) -> &[MenuItem] {
        &self.navigation_drawer_items
    }

    pub fn is_navigation_drawer_shown(&self) -> bool {
        self.overlays.is_visible(&OverlayId::from(NAVIGATION_DRAWER_OVERLAY))
    }

    pub fn show_navigation_drawer(&mut self) -> WorkbenchResult<()> {
        self.show_overlay(&OverlayId::from(NAVIGATION_DRAWER_OVERLAY), true)
    }

    pub fn hide_navigation_drawer(&mut self) -> WorkbenchResult<()> {
        self.hide_overlay(&OverlayId::from(NAVIGATION_DRAWER_OVERLAY), true)
    }

    pub fn add_navigation_drawer_items(&mut self, items: impl IntoIterator<Item = MenuItem>) {
        let before = self.navigation_drawer_items.len();
        self.navigation_drawer_items.extend(items);
        if self.navigation_drawer_items.len() != before {
            self.publish(vec![WorkbenchEvent::NavigationDrawerItemsChanged]);
        }
    }

    pub fn remove_navigation_drawer_items(&mut self, items: &[MenuItem]) {
        let before = self.navigation_drawer_items.len();
        self.navigation_drawer_items.retain(|item| !items.contains(item));
        if self.navigation_drawer_items.len() != before {
            self.publish(vec![WorkbenchEvent::NavigationDrawerItemsChanged]);
        }
    }

    // Toolbar

    pub fn toolbar_controls(&self) -> &[ToolbarControl] {
        &self.toolbar_controls
    }

    /// Append a control unless it is already present
    pub fn add_toolbar_control(&mut self, control: ToolbarControl) -> bool {
        if self.toolbar_controls.contains(&control) {
            return false;
        }
        self.toolbar_controls.push(control);
        self.publish(vec![WorkbenchEvent::ToolbarControlsChanged]);
        true
    }

    pub fn remove_toolbar_control(&mut self, control: &ToolbarControl) -> bool {
        let before = self.toolbar_controls.len();
        self.toolbar_controls.retain(|c| c != control);
        let removed = self.toolbar_controls.len() != before;
        if removed {
            self.publish(vec![WorkbenchEvent::ToolbarControlsChanged]);
        }
        removed
    }

    // Dialogs

    /// The dialog currently being shown, if any
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialogs.dialog()
    }

    pub fn dialog_buttons(&self) -> &[DialogButton] {
        self.dialogs.buttons()
    }

    pub fn default_dialog_button(&self) -> Option<usize> {
        self.dialogs.default_button()
    }

    pub fn cancel_dialog_button(&self) -> Option<usize> {
        self.dialogs.cancel_button()
    }

    /// Show `dialog` as a modal overlay, replacing the current one
    pub fn show_dialog(&mut self, dialog: Dialog) -> WorkbenchResult<()> {
        let overlay = OverlayId::from(DIALOG_OVERLAY);
        if !self.overlays.is_registered(&overlay) {
            return Err(WorkbenchError::NotRegistered(overlay));
        }

        debug!("Showing dialog '{}'", dialog.title);
        let backdrop = self.backdrop_visible();
        self.dialogs.show(dialog);
        let changed = self.overlays.show(&overlay, true)?;

        let mut events = Vec::new();
        if changed {
            events.push(WorkbenchEvent::OverlaysChanged);
        }
        self.finish_overlay_transition(backdrop, events);
        Ok(())
    }

    pub fn hide_dialog(&mut self) {
        let overlay = OverlayId::from(DIALOG_OVERLAY);
        if self.overlays.is_registered(&overlay) {
            let _ = self.hide_overlay(&overlay, true);
        } else if self.dialogs.hide() {
            let backdrop = self.backdrop_visible();
            self.finish_overlay_transition(backdrop, Vec::new());
        }
    }

    pub fn set_dialog_button_types(&mut self, button_types: Vec<ButtonType>) -> WorkbenchResult<()> {
        self.dialogs.set_button_types(button_types)?;
        let events = self.dialog_events();
        self.publish(events);
        Ok(())
    }

    pub fn set_button_text_uppercase(&mut self, uppercase: bool) {
        self.dialogs.set_button_text_uppercase(uppercase);
        let events = self.dialog_events();
        self.publish(events);
    }

    /// Respond to the current dialog with the button at `index`
    pub fn select_dialog_button(&mut self, index: usize) -> WorkbenchResult<()> {
        let resolution = self.dialogs.select(index)?;
        self.complete_resolution(resolution);
        Ok(())
    }

    /// Respond to the current dialog with `button_type`
    pub fn resolve_dialog(&mut self, button_type: &ButtonType) -> WorkbenchResult<()> {
        let resolution = self.dialogs.resolve(button_type)?;
        self.complete_resolution(resolution);
        Ok(())
    }

    // Observation

    /// Register an observer. It is called after every completed transition,
    /// once per event.
    pub fn subscribe(&mut self, observer: impl FnMut(&WorkbenchEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Incremented whenever a transition publishes at least one event
    pub fn version(&self) -> u64 {
        self.version
    }

    // Commands

    /// Apply commands queued through the context. Commands queued while
    /// processing are applied in the same call, up to
    /// `MAX_COMMANDS_PER_BATCH`; the rest wait for the next call. Returns the
    /// errors produced.
    pub fn process_commands(&mut self) -> Vec<WorkbenchError> {
        let mut errors = Vec::new();

        for _ in 0..MAX_COMMANDS_PER_BATCH {
            let Ok(command) = self.commands.try_recv() else {
                return errors;
            };
            debug!("Processing {:?}", command);
            if let Err(e) = self.apply(command) {
                warn!("Command failed: {}", e);
                errors.push(e);
            }
        }

        warn!(
            "Applied {} commands in one batch, deferring the rest",
            MAX_COMMANDS_PER_BATCH
        );
        errors
    }

    fn apply(&mut self, command: WorkbenchCommand) -> WorkbenchResult<()> {
        match command {
            WorkbenchCommand::OpenModule(module) => self.open_module(&module),
            WorkbenchCommand::OpenHome => {
                self.open_home_screen();
                Ok(())
            }
            WorkbenchCommand::CloseModule(module) => self.close_module(&module).map(|_| ()),
            WorkbenchCommand::CloseActiveModule => match self.active_module().cloned() {
                Some(module) => self.close_module(&module).map(|_| ()),
                None => Ok(()),
            },
            WorkbenchCommand::ShowOverlay { overlay, modal } => self.show_overlay(&overlay, modal),
            WorkbenchCommand::HideOverlay { overlay, modal } => self.hide_overlay(&overlay, modal),
            WorkbenchCommand::HideAllOverlays => {
                self.hide_all_overlays();
                Ok(())
            }
            WorkbenchCommand::ShowNavigationDrawer => self.show_navigation_drawer(),
            WorkbenchCommand::HideNavigationDrawer => self.hide_navigation_drawer(),
            WorkbenchCommand::ShowDialog(dialog) => self.show_dialog(dialog),
            WorkbenchCommand::HideDialog => {
                self.hide_dialog();
                Ok(())
            }
            WorkbenchCommand::SetDialogButtons(buttons) => self.set_dialog_button_types(buttons),
        }
    }

    // Internals

    fn transition_overlays<F>(&mut self, change: F) -> WorkbenchResult<()>
    where
        F: FnOnce(&mut OverlayManager) -> WorkbenchResult<bool>,
    {
        let backdrop = self.backdrop_visible();
        let changed = change(&mut self.overlays)?;

        let mut events = Vec::new();
        if changed {
            events.push(WorkbenchEvent::OverlaysChanged);
        }
        self.finish_overlay_transition(backdrop, events);
        Ok(())
    }

    /// Bring the dialog presentation in line with the overlay state and
    /// publish everything that changed
    fn finish_overlay_transition(&mut self, backdrop_before: bool, mut events: Vec<WorkbenchEvent>) {
        // a dialog is only ever presented as a modal overlay
        let dialog_overlay = OverlayId::from(DIALOG_OVERLAY);
        if self.dialogs.is_showing() && !self.overlays.is_shown_modal(&dialog_overlay) {
            self.dialogs.hide();
        }

        let backdrop = self.backdrop_visible();
        if backdrop != backdrop_before {
            events.push(WorkbenchEvent::BackdropChanged(backdrop));
        }
        events.extend(self.dialog_events());
        self.publish(events);
    }

    fn complete_resolution(&mut self, resolution: Resolution) {
        let backdrop = self.backdrop_visible();
        let changed = self
            .overlays
            .hide(&OverlayId::from(DIALOG_OVERLAY), true)
            .unwrap_or(false);

        let mut events = Vec::new();
        if changed {
            events.push(WorkbenchEvent::OverlaysChanged);
        }

        // state is complete, the callback may now queue follow-up commands
        if let Some(callback) = resolution.callback {
            callback(&self.context, resolution.button);
        }
        self.finish_overlay_transition(backdrop, events);
    }

    fn dialog_events(&mut self) -> Vec<WorkbenchEvent> {
        self.dialogs
            .drain_events()
            .into_iter()
            .map(|event| match event {
                DialogEvent::Shown(id) => WorkbenchEvent::DialogShown(id),
                DialogEvent::Hidden(id) => WorkbenchEvent::DialogHidden(id),
            })
            .collect()
    }

    fn publish(&mut self, events: Vec<WorkbenchEvent>) {
        if events.is_empty() {
            return;
        }
        self.version += 1;
        self.observers.notify(&events);
    }
}

fn push_active_change(events: &mut Vec<WorkbenchEvent>, change: Option<ActiveChange>) {
    if let Some(ActiveChange { previous, current }) = change {
        events.push(WorkbenchEvent::ActiveModuleChanged { previous, current });
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("modules", &self.registry.len())
            .field("open_modules", &self.controller.open_modules())
            .field("active_module", &self.controller.active_module())
            .field("overlays", &self.overlays)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::testing::{probe, Probe};
    use crate::module::BasicModule;
    use crate::view::{Page, Tab, Tile};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn workbench_with(probes: &[&Probe]) -> Workbench {
        Workbench::of(probes.iter().map(|p| p.module.clone())).unwrap()
    }

    fn record(workbench: &mut Workbench) -> Rc<RefCell<Vec<WorkbenchEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        workbench.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = Workbench::new(WorkbenchConfig::default().modules_per_page(0));
        assert!(matches!(result, Err(WorkbenchError::InvalidConfig(_))));
    }

    #[test]
    fn test_builtin_overlays_are_registered() {
        let workbench = Workbench::new(WorkbenchConfig::default().overlay("help")).unwrap();
        assert_eq!(
            workbench.overlays(),
            &[
                OverlayId::from(NAVIGATION_DRAWER_OVERLAY),
                OverlayId::from(DIALOG_OVERLAY),
                OverlayId::from("help"),
            ]
        );
        assert!(!workbench.backdrop_visible());
    }

    #[test]
    fn test_open_module_publishes_after_transition() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        let events = record(&mut workbench);

        workbench.open_module(&a.module).unwrap();

        assert_eq!(
            events.borrow().as_slice(),
            &[
                WorkbenchEvent::OpenModulesChanged,
                WorkbenchEvent::ActiveModuleChanged {
                    previous: None,
                    current: Some(a.module.clone()),
                },
            ]
        );
        assert_eq!(workbench.version(), 1);
    }

    #[test]
    fn test_failed_open_publishes_nothing() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        let events = record(&mut workbench);

        let stranger = BasicModule::new("Stranger").into_ref();
        assert!(matches!(
            workbench.open_module(&stranger),
            Err(WorkbenchError::UnknownModule(_))
        ));
        assert!(events.borrow().is_empty());
        assert_eq!(workbench.version(), 0);
        assert!(workbench.open_modules().is_empty());
    }

    #[test]
    fn test_observer_sees_completed_state() {
        let (a, b) = (probe("A"), probe("B"));
        let mut workbench = workbench_with(&[&a, &b]);
        workbench.open_module(&a.module).unwrap();
        workbench.open_module(&b.module).unwrap();

        // the observer gets the change only after destroy and removal happened
        let destroyed_before_event = Rc::new(RefCell::new(None));
        let seen = destroyed_before_event.clone();
        let calls = b.calls.clone();
        workbench.subscribe(move |event| {
            if let WorkbenchEvent::ActiveModuleChanged { .. } = event {
                *seen.borrow_mut() = Some(calls.destroy.get());
            }
        });

        assert!(workbench.close_module(&b.module).unwrap());
        assert_eq!(*destroyed_before_event.borrow(), Some(1));
        assert_eq!(workbench.active_module(), Some(&a.module));
    }

    #[test]
    fn test_vetoed_close_reports_false() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        workbench.open_module(&a.module).unwrap();
        a.allow_close.set(false);
        let events = record(&mut workbench);

        assert!(!workbench.close_module(&a.module).unwrap());
        assert_eq!(workbench.open_modules(), &[a.module.clone()]);
        assert_eq!(workbench.active_module(), Some(&a.module));
        assert_eq!(
            events.borrow().as_slice(),
            &[WorkbenchEvent::ModuleCloseVetoed(a.module.clone())]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let id = workbench.subscribe(move |_| *counter.borrow_mut() += 1);

        workbench.open_module(&a.module).unwrap();
        assert!(workbench.unsubscribe(id));
        workbench.open_home_screen();
        assert_eq!(*count.borrow(), 2);
        assert!(!workbench.unsubscribe(id));
    }

    #[test]
    fn test_default_factories() {
        let (a, b, c) = (probe("A"), probe("B"), probe("C"));
        let workbench = Workbench::new(
            WorkbenchConfig::new([a.module.clone(), b.module.clone(), c.module.clone()])
                .modules_per_page(2),
        )
        .unwrap();

        let tile = workbench.tile(&a.module);
        assert_eq!(tile.downcast_ref::<Tile>().unwrap().name.as_deref(), Some("A"));

        let tab = workbench.tab(&a.module);
        assert!(!tab.downcast_ref::<Tab>().unwrap().active);

        assert_eq!(workbench.page_count(), 2);
        let page = workbench.page(1).unwrap();
        let page = page.downcast_ref::<Page>().unwrap();
        assert_eq!(page.index, 1);
        assert_eq!(page.tiles.len(), 1);
        assert!(matches!(
            workbench.page(2),
            Err(WorkbenchError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_custom_factories_are_called_on_demand() {
        let a = probe("A");
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let workbench = Workbench::new(WorkbenchConfig::new([a.module.clone()]).tile_factory(
            move |_, module| {
                *counter.borrow_mut() += 1;
                ViewHandle::new(module.label())
            },
        ))
        .unwrap();

        let first = workbench.tile(&a.module);
        let second = workbench.tile(&a.module);
        assert_eq!(first.downcast_ref::<String>().unwrap(), "A");
        assert!(!first.ptr_eq(&second));
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_tab_reflects_active_module() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        workbench.open_module(&a.module).unwrap();
        let tab = workbench.tab(&a.module);
        assert!(tab.downcast_ref::<Tab>().unwrap().active);
    }

    #[test]
    fn test_overlay_events_and_backdrop() {
        let mut workbench = Workbench::new(
            WorkbenchConfig::default().overlay("m1").overlay("m2").overlay("n1"),
        )
        .unwrap();
        let events = record(&mut workbench);

        workbench.show_overlay(&"m1".into(), true).unwrap();
        workbench.show_overlay(&"m1".into(), true).unwrap();
        workbench.show_overlay(&"m2".into(), true).unwrap();
        workbench.show_overlay(&"n1".into(), false).unwrap();
        assert!(workbench.backdrop_visible());

        workbench.hide_all_overlays();
        assert!(workbench.shown_modal_overlays().is_empty());
        assert!(workbench.shown_overlays().is_empty());
        assert!(!workbench.backdrop_visible());
        workbench.hide_overlay(&"m1".into(), true).unwrap();

        let backdrop: Vec<bool> = events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                WorkbenchEvent::BackdropChanged(shown) => Some(*shown),
                _ => None,
            })
            .collect();
        assert_eq!(backdrop, vec![true, false]);
    }

    #[test]
    fn test_show_unregistered_overlay_fails() {
        let mut workbench = Workbench::of([]).unwrap();
        assert!(matches!(
            workbench.show_overlay(&"ghost".into(), false),
            Err(WorkbenchError::NotRegistered(_))
        ));
    }

    #[test]
    fn test_dialog_resolution_flow() {
        let mut workbench = Workbench::of([]).unwrap();
        let events = record(&mut workbench);
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let sink = chosen.clone();

        let second = ButtonType::new("Save As", crate::dialog::ButtonRole::Default);
        let dialog = Dialog::confirmation("Save", "Save changes?")
            .with_buttons(vec![
                ButtonType::new("Save", crate::dialog::ButtonRole::Default),
                second.clone(),
            ])
            .on_result(move |_, button| sink.borrow_mut().push(button));
        let id = dialog.id.clone();

        workbench.show_dialog(dialog).unwrap();
        assert!(workbench.backdrop_visible());
        let defaults: Vec<bool> = workbench.dialog_buttons().iter().map(|b| b.is_default).collect();
        assert_eq!(defaults, vec![true, false]);

        workbench.select_dialog_button(1).unwrap();
        assert_eq!(chosen.borrow().as_slice(), &[second]);
        assert!(!workbench.backdrop_visible());
        assert!(workbench.dialog().is_none());

        let hidden = events
            .borrow()
            .iter()
            .filter(|e| **e == WorkbenchEvent::DialogHidden(id.clone()))
            .count();
        assert_eq!(hidden, 1);

        workbench.hide_dialog();
        workbench.hide_all_overlays();
        let hidden_after = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, WorkbenchEvent::DialogHidden(_)))
            .count();
        assert_eq!(hidden_after, 1);
    }

    #[test]
    fn test_hide_all_hides_dialog() {
        let mut workbench = Workbench::of([]).unwrap();
        workbench.show_dialog(Dialog::information("Info", "Done")).unwrap();
        workbench.hide_all_overlays();
        assert!(workbench.dialog().is_none());
        assert!(matches!(
            workbench.select_dialog_button(0),
            Err(WorkbenchError::NoDialog)
        ));
    }

    fn dialog_hidden_count(events: &Rc<RefCell<Vec<WorkbenchEvent>>>) -> usize {
        events
            .borrow()
            .iter()
            .filter(|e| matches!(e, WorkbenchEvent::DialogHidden(_)))
            .count()
    }

    #[test]
    fn test_hide_all_hides_dialog_once() {
        let mut workbench = Workbench::of([]).unwrap();
        let events = record(&mut workbench);
        workbench.show_dialog(Dialog::information("Info", "Done")).unwrap();

        workbench.hide_all_overlays();
        workbench.hide_all_overlays();
        assert!(workbench.dialog().is_none());
        assert_eq!(dialog_hidden_count(&events), 1);
    }

    #[test]
    fn test_hiding_dialog_overlay_hides_dialog() {
        let mut workbench = Workbench::of([]).unwrap();
        let events = record(&mut workbench);
        let overlay = OverlayId::from(DIALOG_OVERLAY);
        workbench.show_dialog(Dialog::information("Info", "Done")).unwrap();

        workbench.hide_overlay(&overlay, true).unwrap();
        assert!(workbench.dialog().is_none());
        assert!(!workbench.backdrop_visible());

        workbench.hide_dialog();
        assert_eq!(dialog_hidden_count(&events), 1);
    }

    #[test]
    fn test_unregistering_dialog_overlay_hides_dialog() {
        let mut workbench = Workbench::of([]).unwrap();
        let events = record(&mut workbench);
        let overlay = OverlayId::from(DIALOG_OVERLAY);
        workbench.show_dialog(Dialog::information("Info", "Done")).unwrap();

        workbench.unregister_overlay(&overlay).unwrap();
        assert!(workbench.dialog().is_none());
        assert!(!workbench.backdrop_visible());
        assert_eq!(dialog_hidden_count(&events), 1);
        assert!(matches!(
            workbench.show_dialog(Dialog::information("Info", "Again")),
            Err(WorkbenchError::NotRegistered(_))
        ));
    }

    #[test]
    fn test_dialog_overlay_shown_non_modal_hides_dialog() {
        let mut workbench = Workbench::of([]).unwrap();
        let events = record(&mut workbench);
        let overlay = OverlayId::from(DIALOG_OVERLAY);
        workbench.show_dialog(Dialog::information("Info", "Done")).unwrap();

        workbench.show_overlay(&overlay, false).unwrap();
        assert!(workbench.dialog().is_none());
        assert!(!workbench.backdrop_visible());
        assert_eq!(dialog_hidden_count(&events), 1);

        // a new dialog moves the overlay back to the modal list
        workbench.show_dialog(Dialog::information("Info", "Again")).unwrap();
        assert_eq!(workbench.shown_modal_overlays(), &[overlay.clone()]);
        assert!(workbench.shown_overlays().is_empty());

        workbench.hide_dialog();
        assert!(workbench.dialog().is_none());
        assert_eq!(dialog_hidden_count(&events), 2);
    }

    #[test]
    fn test_backdrop_click_respects_blocking_dialog() {
        let mut workbench = Workbench::of([]).unwrap();
        workbench
            .show_dialog(Dialog::warning("Careful", "Read this").blocking(true))
            .unwrap();
        workbench.backdrop_clicked();
        assert!(workbench.dialog().is_some());

        workbench.hide_dialog();
        workbench.show_navigation_drawer().unwrap();
        workbench.backdrop_clicked();
        assert!(!workbench.is_navigation_drawer_shown());
    }

    #[test]
    fn test_dialog_callback_can_queue_commands() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        let module = a.module.clone();
        workbench
            .show_dialog(
                Dialog::confirmation("Open", "Open A?")
                    .on_result(move |context, button| {
                        if button.is_default() {
                            context.open_module(&module);
                        }
                    }),
            )
            .unwrap();

        workbench.resolve_dialog(&ButtonType::yes()).unwrap();
        assert!(workbench.active_module().is_none());

        assert!(workbench.process_commands().is_empty());
        assert_eq!(workbench.active_module(), Some(&a.module));
    }

    #[test]
    fn test_process_commands_reports_errors() {
        let a = probe("A");
        let mut workbench = workbench_with(&[&a]);
        let context = workbench.context();

        context.open_module(&a.module);
        context.close_module(&probe("X").module);
        context.show_overlay("ghost", true);
        context.close_active_module();

        let errors = workbench.process_commands();
        assert_eq!(errors.len(), 2);
        assert!(workbench.open_modules().is_empty());
        assert_eq!(a.calls.destroy.get(), 1);
    }

    #[test]
    fn test_self_feeding_commands_are_batched() {
        let mut workbench = Workbench::new(WorkbenchConfig::default().overlay("x")).unwrap();
        let context = workbench.context();
        let modal = Rc::new(RefCell::new(false));
        workbench.subscribe(move |event| {
            if *event == WorkbenchEvent::OverlaysChanged {
                let mut modal = modal.borrow_mut();
                *modal = !*modal;
                context.show_overlay("x", *modal);
            }
        });

        workbench.context().show_overlay("x", false);
        assert!(workbench.process_commands().is_empty());
        let version = workbench.version();
        assert!(version > 0);
        assert!(version <= MAX_COMMANDS_PER_BATCH as u64 * 2);

        // the rest is still queued for the next round
        workbench.process_commands();
        assert!(workbench.version() > version);
    }

    #[test]
    fn test_remove_module() {
        let (a, b) = (probe("A"), probe("B"));
        let mut workbench = workbench_with(&[&a, &b]);
        workbench.open_module(&a.module).unwrap();
        let events = record(&mut workbench);

        assert!(matches!(
            workbench.remove_module(&a.module),
            Err(WorkbenchError::ModuleOpen(_))
        ));
        assert_eq!(workbench.modules().len(), 2);

        workbench.remove_module(&b.module).unwrap();
        assert_eq!(workbench.modules(), &[a.module.clone()]);
        assert_eq!(events.borrow().as_slice(), &[WorkbenchEvent::ModulesChanged]);

        assert!(matches!(
            workbench.remove_module(&b.module),
            Err(WorkbenchError::UnknownModule(_))
        ));
        assert!(matches!(
            workbench.open_module(&b.module),
            Err(WorkbenchError::UnknownModule(_))
        ));
    }

    #[test]
    fn test_toolbar_controls_are_unique() {
        let mut workbench = Workbench::new(WorkbenchConfig::default().toolbar_controls([
            ToolbarControl::new("search", "Search"),
            ToolbarControl::new("search", "Search again"),
        ]))
        .unwrap();
        assert_eq!(workbench.toolbar_controls().len(), 1);

        assert!(!workbench.add_toolbar_control(ToolbarControl::new("search", "Search")));
        assert!(workbench.add_toolbar_control(ToolbarControl::new("user", "User")));
        assert!(workbench.remove_toolbar_control(&ToolbarControl::new("search", "")));
        assert_eq!(workbench.toolbar_controls().len(), 1);
    }

    #[test]
    fn test_navigation_drawer_items() {
        let mut workbench = Workbench::of([]).unwrap();
        let events = record(&mut workbench);
        let home = MenuItem::new("home", "Home", |context| context.open_home_screen());

        workbench.add_navigation_drawer_items([home.clone()]);
        assert_eq!(workbench.navigation_drawer_items().len(), 1);
        workbench.remove_navigation_drawer_items(&[home]);
        assert!(workbench.navigation_drawer_items().is_empty());
        assert_eq!(events.borrow().len(), 2);
    }
}
