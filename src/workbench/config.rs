//! Construction options for a `Workbench`

use super::Workbench;
use crate::config::Settings;
use crate::module::ModuleRef;
use crate::overlay::OverlayId;
use crate::view::{MenuItem, NavigationDrawer, Page, Tab, Tile, ToolbarControl, ViewHandle};
use std::rc::Rc;

pub type ModuleFactory = Rc<dyn Fn(&Workbench, &ModuleRef) -> ViewHandle>;
pub type PageFactory = Rc<dyn Fn(&Workbench, usize) -> ViewHandle>;
pub type DrawerFactory = Rc<dyn Fn(&Workbench) -> ViewHandle>;

pub const DEFAULT_MODULES_PER_PAGE: usize = 9;

/// Every option recognized when building a workbench. Unset options keep
/// their defaults; `Workbench::new` validates the result.
#[derive(Clone)]
pub struct WorkbenchConfig {
    pub modules: Vec<ModuleRef>,
    /// Tiles per home-screen page
    pub modules_per_page: usize,
    pub tab_factory: ModuleFactory,
    pub tile_factory: ModuleFactory,
    pub page_factory: PageFactory,
    pub navigation_drawer_factory: DrawerFactory,
    /// Overlays loaded hidden at construction
    pub overlays: Vec<OverlayId>,
    pub navigation_drawer_items: Vec<MenuItem>,
    pub toolbar_controls: Vec<ToolbarControl>,
    pub button_text_uppercase: bool,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            modules_per_page: DEFAULT_MODULES_PER_PAGE,
            tab_factory: Rc::new(default_tab),
            tile_factory: Rc::new(default_tile),
            page_factory: Rc::new(default_page),
            navigation_drawer_factory: Rc::new(default_navigation_drawer),
            overlays: Vec::new(),
            navigation_drawer_items: Vec::new(),
            toolbar_controls: Vec::new(),
            button_text_uppercase: false,
        }
    }
}

impl WorkbenchConfig {
    pub fn new(modules: impl IntoIterator<Item = ModuleRef>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Apply user settings loaded from file and environment
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.modules_per_page = settings.modules_per_page;
        self.button_text_uppercase = settings.button_text_uppercase;
        self
    }

    pub fn modules_per_page(mut self, modules_per_page: usize) -> Self {
        self.modules_per_page = modules_per_page;
        self
    }

    pub fn tab_factory(mut self, factory: impl Fn(&Workbench, &ModuleRef) -> ViewHandle + 'static) -> Self {
        self.tab_factory = Rc::new(factory);
        self
    }

    pub fn tile_factory(mut self, factory: impl Fn(&Workbench, &ModuleRef) -> ViewHandle + 'static) -> Self {
        self.tile_factory = Rc::new(factory);
        self
    }

    pub fn page_factory(mut self, factory: impl Fn(&Workbench, usize) -> ViewHandle + 'static) -> Self {
        self.page_factory = Rc::new(factory);
        self
    }

    pub fn navigation_drawer_factory(mut self, factory: impl Fn(&Workbench) -> ViewHandle + 'static) -> Self {
        self.navigation_drawer_factory = Rc::new(factory);
        self
    }

    pub fn overlay(mut self, overlay: impl Into<OverlayId>) -> Self {
        self.overlays.push(overlay.into());
        self
    }

    pub fn navigation_drawer_items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.navigation_drawer_items.extend(items);
        self
    }

    pub fn toolbar_controls(mut self, controls: impl IntoIterator<Item = ToolbarControl>) -> Self {
        self.toolbar_controls.extend(controls);
        self
    }

    pub fn button_text_uppercase(mut self, uppercase: bool) -> Self {
        self.button_text_uppercase = uppercase;
        self
    }
}

fn default_tile(_workbench: &Workbench, module: &ModuleRef) -> ViewHandle {
    if let Some(custom) = module.borrow().tile() {
        return custom;
    }
    ViewHandle::new(Tile {
        module: module.clone(),
        name: module.name(),
        icon: module.icon(),
    })
}

fn default_tab(workbench: &Workbench, module: &ModuleRef) -> ViewHandle {
    if let Some(custom) = module.borrow().tab() {
        return custom;
    }
    ViewHandle::new(Tab {
        module: module.clone(),
        name: module.name(),
        icon: module.icon(),
        active: workbench.active_module() == Some(module),
    })
}

fn default_page(workbench: &Workbench, page_index: usize) -> ViewHandle {
    let tiles = workbench
        .modules()
        .iter()
        .skip(page_index * workbench.modules_per_page())
        .take(workbench.modules_per_page())
        .map(|module| workbench.tile(module))
        .collect();

    ViewHandle::new(Page {
        index: page_index,
        tiles,
    })
}

fn default_navigation_drawer(workbench: &Workbench) -> ViewHandle {
    ViewHandle::new(NavigationDrawer {
        items: workbench.navigation_drawer_items().to_vec(),
    })
}
