//! Modules bundled with the binary so the workbench has something to host

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::cell::{OnceCell, RefCell};
use std::rc::Rc;
use tracing::debug;
use workbench::tui::{Frame, KeyMap, Screen, ScreenView, Theme};
use workbench::{
    BasicModule, ButtonRole, ButtonType, Dialog, MenuItem, Module, ModuleRef, TextView,
    ToolbarControl, ViewHandle, WeakModuleRef, WorkbenchContext,
};

/// Scratch pad that refuses to close while it holds unsaved text
pub struct Notes {
    screen: Rc<RefCell<NotesScreen>>,
    context: Option<WorkbenchContext>,
    handle: Rc<OnceCell<WeakModuleRef>>,
}

#[derive(Default)]
struct NotesScreen {
    lines: Vec<String>,
    saved: Vec<String>,
}

impl NotesScreen {
    fn is_dirty(&self) -> bool {
        self.lines != self.saved
    }

    fn current_line(&mut self) -> &mut String {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }
}

impl Screen for NotesScreen {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = if self.is_dirty() { " Notes * " } else { " Notes " };
        let mut text = self.lines.join("\n");
        text.push('▏');

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(theme.focused_border_style()),
                )
                .style(theme.text_style())
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn handle_key(&mut self, key: KeyEvent, _context: &WorkbenchContext) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.saved = self.lines.clone();
                debug!("Notes saved ({} lines)", self.saved.len());
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.current_line().push(c);
            }
            (KeyCode::Enter, _) => self.lines.push(String::new()),
            (KeyCode::Backspace, _) => {
                if self.current_line().pop().is_none() && self.lines.len() > 1 {
                    self.lines.pop();
                }
            }
            _ => return false,
        }
        true
    }

    fn status(&self) -> Option<String> {
        Some(if self.is_dirty() {
            "Notes | unsaved changes, Ctrl+S to save".to_string()
        } else {
            "Notes | saved".to_string()
        })
    }
}

impl Notes {
    /// Create the module. It keeps a weak handle to itself so a discard
    /// confirmation closes this module and not whichever one is active.
    pub fn create() -> ModuleRef {
        let notes = Self {
            screen: Rc::new(RefCell::new(NotesScreen::default())),
            context: None,
            handle: Rc::new(OnceCell::new()),
        };
        let handle = notes.handle.clone();
        let module = ModuleRef::new(notes);
        let _ = handle.set(module.downgrade());
        module
    }
}

impl Module for Notes {
    fn name(&self) -> Option<&str> {
        Some("Notes")
    }

    fn icon(&self) -> Option<&str> {
        Some("✎")
    }

    fn init(&mut self, context: &WorkbenchContext) {
        self.context = Some(context.clone());
    }

    fn activate(&mut self) -> ViewHandle {
        let screen: Rc<RefCell<dyn Screen>> = self.screen.clone();
        ViewHandle::new(ScreenView::shared(screen))
    }

    fn destroy(&mut self) -> bool {
        if !self.screen.borrow().is_dirty() {
            return true;
        }

        // ask first, then close again once the changes are discarded
        if let Some(context) = &self.context {
            let screen = self.screen.clone();
            let handle = self.handle.clone();
            context.show_dialog(
                Dialog::warning("Unsaved notes", "Discard the unsaved notes?")
                    .with_buttons(vec![
                        ButtonType::new("Discard", ButtonRole::Default),
                        ButtonType::cancel(),
                    ])
                    .on_result(move |context, button| {
                        if button.is_default() {
                            let mut screen = screen.borrow_mut();
                            screen.saved = screen.lines.clone();
                            if let Some(notes) = handle.get().and_then(WeakModuleRef::upgrade) {
                                context.close_module(&notes);
                            }
                        }
                    }),
            );
        }
        false
    }
}

fn text_module(name: &str, icon: &str, lines: &[&str]) -> ModuleRef {
    let mut view = TextView::new(name);
    for line in lines {
        view = view.with_line(*line);
    }
    BasicModule::new(name)
        .with_icon(icon)
        .with_view(move || ViewHandle::new(view.clone()))
        .into_ref()
}

/// Modules shown on the home screen
pub fn modules() -> Vec<ModuleRef> {
    let mut modules = vec![
        Notes::create(),
        text_module(
            "About",
            "ℹ",
            &[
                "A workbench hosting modules as tiles and tabs.",
                "",
                "Open a module from the home screen, switch with Ctrl+N / Ctrl+P,",
                "close it with Ctrl+W. Ctrl+D opens the navigation drawer.",
            ],
        ),
    ];

    let help = KeyMap::default().help_lines();
    let help: Vec<&str> = help.iter().map(String::as_str).collect();
    modules.push(text_module("Keys", "⌨", &help));

    for (name, icon) in [
        ("Inbox", "✉"),
        ("Calendar", "◷"),
        ("Contacts", "☺"),
        ("Files", "▤"),
        ("Tasks", "✓"),
        ("Weather", "☀"),
        ("Music", "♪"),
        ("Maps", "⌖"),
    ] {
        let placeholder = format!("{} has no content yet.", name);
        modules.push(text_module(name, icon, &[placeholder.as_str()]));
    }

    modules
}

/// Drawer entries: go home, open each module, close the active one
pub fn navigation_drawer_items(modules: &[ModuleRef]) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::new("home", "Home", |context| context.open_home_screen()).with_icon("⌂")];

    for module in modules {
        let label = module.label();
        let target = module.clone();
        let mut item = MenuItem::new(format!("open.{}", label.to_lowercase()), label, move |context| {
            context.open_module(&target)
        });
        if let Some(icon) = module.icon() {
            item = item.with_icon(icon);
        }
        items.push(item);
    }

    items.push(MenuItem::new("close", "Close active module", |context| {
        context.close_active_module()
    }));
    items
}

pub fn toolbar_controls() -> Vec<ToolbarControl> {
    vec![
        ToolbarControl::new("menu", "☰ Menu").on_activate(|context| context.show_navigation_drawer()),
        ToolbarControl::new("about", "?").on_activate(|context| {
            context.show_dialog(
                Dialog::information("About", "Workbench demo")
                    .with_details(format!("version {}", env!("CARGO_PKG_VERSION"))),
            )
        }),
    ]
}
