use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    pub fn ctrl(c: char, description: &str) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL, description)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }

    /// Short form such as `Ctrl+W`
    pub fn shortcut(&self) -> String {
        let key = match self.key {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key)
        } else {
            key
        }
    }
}

/// Workbench-level actions triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleHelp,
    ShowNavigationDrawer,
    OpenHome,
    CloseModule,
    NextTab,
    PreviousTab,
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub navigation_drawer: KeyBinding,
    pub home: KeyBinding,
    pub close_module: KeyBinding,
    pub next_tab: KeyBinding,
    pub previous_tab: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::ctrl('c', "Quit application"),
            help: KeyBinding::ctrl('g', "Show/hide help"),
            navigation_drawer: KeyBinding::ctrl('d', "Open navigation drawer"),
            home: KeyBinding::ctrl('o', "Go to home screen"),
            close_module: KeyBinding::ctrl('w', "Close active module"),
            next_tab: KeyBinding::ctrl('n', "Next tab"),
            previous_tab: KeyBinding::ctrl('p', "Previous tab"),
        }
    }
}

impl KeyMap {
    fn bindings(&self) -> [(&KeyBinding, KeyAction); 7] {
        [
            (&self.quit, KeyAction::Quit),
            (&self.help, KeyAction::ToggleHelp),
            (&self.navigation_drawer, KeyAction::ShowNavigationDrawer),
            (&self.home, KeyAction::OpenHome),
            (&self.close_module, KeyAction::CloseModule),
            (&self.next_tab, KeyAction::NextTab),
            (&self.previous_tab, KeyAction::PreviousTab),
        ]
    }

    /// Workbench action bound to `event`, if any
    pub fn action(&self, event: &KeyEvent) -> Option<KeyAction> {
        self.bindings()
            .into_iter()
            .find(|(binding, _)| binding.matches(event))
            .map(|(_, action)| action)
    }

    /// One line per binding, for the help overlay
    pub fn help_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .bindings()
            .iter()
            .map(|(binding, _)| format!("{:<8} {}", binding.shortcut(), binding.description))
            .collect();
        lines.push("Arrows   Move on the home screen, PgUp/PgDn to change page".to_string());
        lines.push("Enter    Open the selected module".to_string());
        lines.push("Esc      Dismiss the drawer or a non-blocking dialog".to_string());
        lines
    }
}
