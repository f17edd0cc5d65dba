//! Change notifications published by the workbench

use crate::dialog::DialogId;
use crate::module::ModuleRef;
use tracing::trace;

/// Something observable changed. Delivered only after the transition that
/// caused it has fully completed.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkbenchEvent {
    ActiveModuleChanged {
        previous: Option<ModuleRef>,
        current: Option<ModuleRef>,
    },
    OpenModulesChanged,
    ModulesChanged,
    ModuleCloseVetoed(ModuleRef),
    OverlaysChanged,
    BackdropChanged(bool),
    DialogShown(DialogId),
    DialogHidden(DialogId),
    NavigationDrawerItemsChanged,
    ToolbarControlsChanged,
}

/// Handle returned by `Workbench::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&WorkbenchEvent)>;

/// Registered observers, notified in subscription order
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, events: &[WorkbenchEvent]) {
        for event in events {
            trace!("Publishing {:?}", event);
            for (_, observer) in self.observers.iter_mut() {
                observer(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }
}
