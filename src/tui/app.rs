use crate::config::Settings;
use crate::dialog::Dialog;
use crate::error::WorkbenchResult;
use crate::module::ModuleRef;
use crate::overlay::OverlayId;
use crate::tui::keys::{KeyAction, KeyMap};
use crate::tui::screen::ScreenView;
use crate::tui::styles::Theme;
use crate::tui::utils::{layout, truncate};
use crate::tui::{events::Event, Frame};
use crate::view::{NavigationDrawer, Page, Tab, TextView, Tile};
use crate::workbench::{Workbench, WorkbenchEvent, DIALOG_OVERLAY, NAVIGATION_DRAWER_OVERLAY};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

/// Non-modal overlay listing the key bindings
pub const HELP_OVERLAY: &str = "workbench.help";

const MAX_TAB_WIDTH: usize = 20;

/// Main application state and controller
pub struct App {
    pub workbench: Workbench,
    pub settings: Settings,
    pub key_map: KeyMap,
    pub theme: Theme,
    pub status_message: Option<String>,

    /// Home-screen page and the selected tile on it
    home_page: usize,
    selected_tile: usize,
    selected_button: usize,
    selected_drawer_item: usize,

    /// Events observed since the last input, consumed after each command pass
    observed: Rc<RefCell<Vec<WorkbenchEvent>>>,
    quit_confirmed: Rc<Cell<bool>>,

    // Hit areas from the last frame, for mouse input
    tab_areas: Vec<(Rect, ModuleRef)>,
    tile_areas: Vec<(Rect, ModuleRef)>,
    control_areas: Vec<(Rect, usize)>,
    modal_area: Option<Rect>,
}

impl App {
    pub fn new(mut workbench: Workbench, settings: Settings) -> Self {
        workbench.register_overlay(HELP_OVERLAY);

        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = observed.clone();
        workbench.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Self {
            workbench,
            settings,
            key_map: KeyMap::default(),
            theme: Theme::default(),
            status_message: None,
            home_page: 0,
            selected_tile: 0,
            selected_button: 0,
            selected_drawer_item: 0,
            observed,
            quit_confirmed: Rc::new(Cell::new(false)),
            tab_areas: Vec::new(),
            tile_areas: Vec::new(),
            control_areas: Vec::new(),
            modal_area: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit_confirmed.get()
    }

    pub fn home_page(&self) -> usize {
        self.home_page
    }

    pub fn selected_tile(&self) -> usize {
        self.selected_tile
    }

    pub fn selected_button(&self) -> usize {
        self.selected_button
    }

    /// Handle one input event, then apply whatever the workbench queued.
    /// Returns `true` once the user confirmed quitting.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if self.settings.mouse_enabled => self.handle_mouse(mouse),
            Event::Mouse(_) | Event::Resize(_, _) | Event::Tick => {}
        }

        self.process_commands();
        Ok(self.should_quit())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.workbench.dialog().is_some() {
            self.handle_dialog_key(key);
            return;
        }

        if self.workbench.is_navigation_drawer_shown() {
            self.handle_drawer_key(key);
            return;
        }

        if let Some(action) = self.key_map.action(&key) {
            self.run_action(action);
            return;
        }

        if let Some(screen) = self.active_screen() {
            screen.handle_key(key, &self.workbench.context());
            return;
        }

        if self.workbench.active_module().is_none() {
            self.handle_home_key(key);
        }
    }

    fn run_action(&mut self, action: KeyAction) {
        debug!("Key action {:?}", action);
        match action {
            KeyAction::Quit => {
                let confirmed = self.quit_confirmed.clone();
                let dialog = Dialog::confirmation("Quit", "Leave the workbench?").on_result(
                    move |_, button| {
                        if button.is_default() {
                            confirmed.set(true);
                        }
                    },
                );
                let result = self.workbench.show_dialog(dialog);
                self.report(result);
            }
            KeyAction::ToggleHelp => {
                let help = OverlayId::from(HELP_OVERLAY);
                let result = if self.workbench.is_overlay_visible(&help) {
                    self.workbench.hide_overlay(&help, false)
                } else {
                    self.workbench.show_overlay(&help, false)
                };
                self.report(result);
            }
            KeyAction::ShowNavigationDrawer => {
                self.selected_drawer_item = 0;
                let result = self.workbench.show_navigation_drawer();
                self.report(result);
            }
            KeyAction::OpenHome => self.workbench.open_home_screen(),
            KeyAction::CloseModule => {
                if let Some(module) = self.workbench.active_module().cloned() {
                    let result = self.workbench.close_module(&module).map(|_| ());
                    self.report(result);
                }
            }
            KeyAction::NextTab => self.cycle_tab(1),
            KeyAction::PreviousTab => self.cycle_tab(-1),
        }
    }

    fn cycle_tab(&mut self, step: isize) {
        let open = self.workbench.open_modules();
        if open.is_empty() {
            return;
        }

        let len = open.len() as isize;
        let next = match self.workbench.active_module() {
            Some(active) => {
                let current = open.iter().position(|m| m == active).unwrap_or(0) as isize;
                (current + step).rem_euclid(len)
            }
            None if step > 0 => 0,
            None => len - 1,
        };

        let module = open[next as usize].clone();
        let result = self.workbench.open_module(&module);
        self.report(result);
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let count = self.workbench.dialog_buttons().len();
        match key.code {
            KeyCode::Left | KeyCode::BackTab if count > 0 => {
                self.selected_button = (self.selected_button + count - 1) % count;
            }
            KeyCode::Right | KeyCode::Tab if count > 0 => {
                self.selected_button = (self.selected_button + 1) % count;
            }
            KeyCode::Enter => {
                let result = self.workbench.select_dialog_button(self.selected_button);
                self.report(result);
            }
            KeyCode::Esc => self.workbench.backdrop_clicked(),
            _ => {}
        }
    }

    fn handle_drawer_key(&mut self, key: KeyEvent) {
        let count = self.workbench.navigation_drawer_items().len();
        match key.code {
            KeyCode::Up if count > 0 => {
                self.selected_drawer_item = (self.selected_drawer_item + count - 1) % count;
            }
            KeyCode::Down if count > 0 => {
                self.selected_drawer_item = (self.selected_drawer_item + 1) % count;
            }
            KeyCode::Enter => {
                let context = self.workbench.context();
                if let Some(item) = self.workbench.navigation_drawer_items().get(self.selected_drawer_item) {
                    debug!("Drawer item '{}' selected", item.id);
                    item.trigger(&context);
                }
                let result = self.workbench.hide_navigation_drawer();
                self.report(result);
            }
            KeyCode::Esc => self.workbench.backdrop_clicked(),
            _ if self.key_map.action(&key) == Some(KeyAction::ShowNavigationDrawer) => {
                let result = self.workbench.hide_navigation_drawer();
                self.report(result);
            }
            _ => {}
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        let on_page = self.tiles_on_page();
        let columns = self.settings.columns_per_row;
        let pages = self.workbench.page_count();

        match (key.code, key.modifiers) {
            (KeyCode::Left, _) => self.selected_tile = self.selected_tile.saturating_sub(1),
            (KeyCode::Right, _) if self.selected_tile + 1 < on_page => self.selected_tile += 1,
            (KeyCode::Up, _) => self.selected_tile = self.selected_tile.saturating_sub(columns),
            (KeyCode::Down, _) if self.selected_tile + columns < on_page => {
                self.selected_tile += columns;
            }
            (KeyCode::PageDown, _) if self.home_page + 1 < pages => {
                self.home_page += 1;
                self.selected_tile = 0;
            }
            (KeyCode::PageUp, _) if self.home_page > 0 => {
                self.home_page -= 1;
                self.selected_tile = 0;
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                let index = self.home_page * self.workbench.modules_per_page() + self.selected_tile;
                let result = self
                    .workbench
                    .module_at(index)
                    .cloned()
                    .and_then(|module| self.workbench.open_module(&module));
                self.report(result);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        if self.workbench.backdrop_visible() {
            let inside = self
                .modal_area
                .is_some_and(|area| layout::contains(area, column, row));
            if !inside {
                self.workbench.backdrop_clicked();
            }
            return;
        }

        let hit = |areas: &[(Rect, ModuleRef)]| {
            areas
                .iter()
                .find(|(area, _)| layout::contains(*area, column, row))
                .map(|(_, module)| module.clone())
        };

        if let Some(module) = hit(&self.tab_areas).or_else(|| hit(&self.tile_areas)) {
            let result = self.workbench.open_module(&module);
            self.report(result);
            return;
        }

        let control = self
            .control_areas
            .iter()
            .find(|(area, _)| layout::contains(*area, column, row))
            .map(|(_, index)| *index);
        if let Some(control) = control.and_then(|i| self.workbench.toolbar_controls().get(i)) {
            control.trigger(&self.workbench.context());
        }
    }

    /// Apply queued commands and react to what changed
    fn process_commands(&mut self) {
        for error in self.workbench.process_commands() {
            self.status_message = Some(error.to_string());
        }

        let observed: Vec<WorkbenchEvent> = self.observed.borrow_mut().drain(..).collect();
        for event in observed {
            match event {
                WorkbenchEvent::DialogShown(_) => {
                    self.selected_button = self.workbench.default_dialog_button().unwrap_or(0);
                }
                WorkbenchEvent::ModuleCloseVetoed(module) => {
                    self.status_message = Some(format!("{} was not closed", module.label()));
                }
                WorkbenchEvent::ActiveModuleChanged { current, .. } => {
                    self.status_message = None;
                    if let Some(module) = current {
                        info!("Active module: {}", module.label());
                    }
                }
                _ => {}
            }
        }

        let pages = self.workbench.page_count().max(1);
        self.home_page = self.home_page.min(pages - 1);
        self.selected_tile = self.selected_tile.min(self.tiles_on_page().saturating_sub(1));
    }

    fn report(&mut self, result: WorkbenchResult<()>) {
        if let Err(e) = result {
            self.status_message = Some(e.to_string());
        }
    }

    fn tiles_on_page(&self) -> usize {
        let per_page = self.workbench.modules_per_page();
        self.workbench
            .modules()
            .len()
            .saturating_sub(self.home_page * per_page)
            .min(per_page)
    }

    fn active_screen(&self) -> Option<ScreenView> {
        self.workbench
            .active_module_view()
            .and_then(|view| view.downcast_ref::<ScreenView>())
            .cloned()
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Toolbar
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        frame.render_widget(Block::default().style(self.theme.base_style()), frame.size());
        self.render_toolbar(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);
        self.render_overlays(frame);
    }

    fn render_toolbar(&mut self, frame: &mut Frame, area: Rect) {
        self.tab_areas.clear();
        self.control_areas.clear();

        let mut spans = Vec::new();
        let mut x = area.x;
        let mut push = |spans: &mut Vec<Span<'static>>, text: String, style: Style| -> Rect {
            let width = text.width() as u16;
            let rect = Rect::new(x, area.y, width.min(area.right().saturating_sub(x)), 1);
            x = x.saturating_add(width);
            spans.push(Span::styled(text, style));
            rect
        };

        let home_style = if self.workbench.active_module().is_none() {
            self.theme.active_tab_style()
        } else {
            self.theme.tab_style()
        };
        push(&mut spans, " ⌂ Home ".to_string(), home_style);

        for module in self.workbench.open_modules().to_vec() {
            let view = self.workbench.tab(&module);
            let (label, active) = match view.downcast_ref::<Tab>() {
                Some(tab) => {
                    let name = tab.name.clone().unwrap_or_else(|| module.label());
                    let label = match &tab.icon {
                        Some(icon) => format!("{} {}", icon, name),
                        None => name,
                    };
                    (label, tab.active)
                }
                None => (module.label(), self.workbench.active_module() == Some(&module)),
            };
            let style = if active {
                self.theme.active_tab_style()
            } else {
                self.theme.tab_style()
            };
            let rect = push(&mut spans, format!(" {} ", truncate(&label, MAX_TAB_WIDTH)), style);
            self.tab_areas.push((rect, module));
        }

        let controls: Vec<String> = self
            .workbench
            .toolbar_controls()
            .iter()
            .map(|c| format!(" [{}] ", c.label))
            .collect();
        for (index, label) in controls.into_iter().enumerate() {
            let rect = push(&mut spans, label, self.theme.toolbar_control_style());
            self.control_areas.push((rect, index));
        }

        let toolbar = Paragraph::new(Line::from(spans)).style(self.theme.status_bar_style());
        frame.render_widget(toolbar, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        self.tile_areas.clear();

        let Some(view) = self.workbench.active_module_view().cloned() else {
            self.render_home(frame, area);
            return;
        };

        if let Some(screen) = view.downcast_ref::<ScreenView>() {
            screen.render(frame, area, &self.theme);
        } else if let Some(text) = view.downcast_ref::<TextView>() {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(text.title.as_str())
                .border_style(self.theme.focused_border_style());
            let lines: Vec<Line> = text.lines.iter().map(|l| Line::from(l.as_str())).collect();
            frame.render_widget(
                Paragraph::new(lines)
                    .block(block)
                    .style(self.theme.text_style())
                    .wrap(Wrap { trim: false }),
                area,
            );
        } else {
            let empty = Paragraph::new("This module has no terminal view")
                .block(Block::default().borders(Borders::ALL))
                .style(self.theme.dim_style());
            frame.render_widget(empty, area);
        }
    }

    fn render_home(&mut self, frame: &mut Frame, area: Rect) {
        let pages = self.workbench.page_count();
        let title = format!(" Home {}/{} ", (self.home_page + 1).min(pages.max(1)), pages.max(1));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let page = match self.workbench.page(self.home_page) {
            Ok(page) => page,
            Err(_) => return,
        };
        let Some(page) = page.downcast_ref::<Page>() else {
            return;
        };
        if page.tiles.is_empty() {
            frame.render_widget(
                Paragraph::new("No modules installed").style(self.theme.dim_style()),
                inner,
            );
            return;
        }

        let columns = self.settings.columns_per_row.max(1);
        let rows = page.tiles.len().div_ceil(columns);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
            .split(inner);

        for (index, tile) in page.tiles.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(row_areas[index / columns]);
            let cell = cells[index % columns];

            let Some(tile) = tile.downcast_ref::<Tile>() else {
                continue;
            };
            let selected = index == self.selected_tile;
            let name = tile.name.clone().unwrap_or_else(|| tile.module.label());
            let label = match &tile.icon {
                Some(icon) => format!("{}\n{}", icon, name),
                None => name,
            };

            let block = Block::default().borders(Borders::ALL).border_style(if selected {
                self.theme.focused_border_style()
            } else {
                self.theme.border_style()
            });
            let style = if selected {
                self.theme.selection_style()
            } else {
                self.theme.text_style()
            };
            frame.render_widget(
                Paragraph::new(label)
                    .block(block)
                    .style(style)
                    .alignment(ratatui::layout::Alignment::Center),
                cell,
            );
            self.tile_areas.push((cell, tile.module.clone()));
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = if let Some(message) = &self.status_message {
            message.clone()
        } else if let Some(status) = self.active_screen().and_then(|s| s.status()) {
            status
        } else {
            let location = self
                .workbench
                .active_module()
                .map_or("Home".to_string(), ModuleRef::label);
            format!(
                "{} | {} open | Ctrl+G help | Ctrl+C quit",
                location,
                self.workbench.open_modules().len()
            )
        };

        frame.render_widget(
            Paragraph::new(status_text).style(self.theme.status_bar_style()),
            area,
        );
    }

    fn render_overlays(&mut self, frame: &mut Frame) {
        let area = frame.size();
        self.modal_area = None;

        for overlay in self.workbench.shown_overlays().to_vec() {
            if overlay.as_str() == HELP_OVERLAY {
                self.render_help(frame, area);
            }
        }

        if !self.workbench.backdrop_visible() {
            return;
        }
        frame.buffer_mut().set_style(area, self.theme.backdrop_style());

        for overlay in self.workbench.shown_modal_overlays().to_vec() {
            match overlay.as_str() {
                NAVIGATION_DRAWER_OVERLAY => self.render_drawer(frame, area),
                DIALOG_OVERLAY => self.render_dialog(frame, area),
                other => debug!("No renderer for overlay {}", other),
            }
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let lines = self.key_map.help_lines();
        let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 4;
        let help_area = layout::centered_rect(width, lines.len() as u16 + 2, area);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Paragraph::new(lines.join("\n"))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Help ")
                        .border_style(self.theme.border_style()),
                )
                .style(self.theme.help_style()),
            help_area,
        );
    }

    fn render_drawer(&mut self, frame: &mut Frame, area: Rect) {
        let drawer_area = layout::left_panel(self.settings.drawer_width_percentage, area);
        self.modal_area = Some(drawer_area);

        let view = self.workbench.navigation_drawer();
        let items: Vec<ListItem> = match view.downcast_ref::<NavigationDrawer>() {
            Some(drawer) => drawer
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let label = match &item.icon {
                        Some(icon) => format!("{} {}", icon, item.label),
                        None => item.label.clone(),
                    };
                    let style = if index == self.selected_drawer_item {
                        self.theme.selection_style()
                    } else {
                        self.theme.text_style()
                    };
                    ListItem::new(label).style(style)
                })
                .collect(),
            None => Vec::new(),
        };

        frame.render_widget(Clear, drawer_area);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Menu ")
                    .border_style(self.theme.focused_border_style()),
            ),
            drawer_area,
        );
    }

    fn render_dialog(&mut self, frame: &mut Frame, area: Rect) {
        let Some(dialog) = self.workbench.dialog() else {
            return;
        };

        let mut lines = vec![Line::from(dialog.message.clone()), Line::from("")];
        if let Some(details) = &dialog.details {
            lines.extend(details.lines().map(|l| Line::styled(l.to_string(), self.theme.dim_style())));
            lines.push(Line::from(""));
        }

        let buttons: Vec<Span> = self
            .workbench
            .dialog_buttons()
            .iter()
            .enumerate()
            .flat_map(|(index, button)| {
                let text = if button.is_default {
                    format!("[ {} ]", button.label)
                } else {
                    format!("  {}  ", button.label)
                };
                let style = if index == self.selected_button {
                    self.theme.selection_style()
                } else {
                    self.theme.text_style()
                };
                [Span::styled(text, style), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(buttons));

        let dialog_area = if dialog.maximized {
            area
        } else {
            let width = (area.width / 5 * 3).max(30);
            layout::centered_rect(width, lines.len() as u16 + 4, area)
        };
        self.modal_area = Some(dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dialog.title))
            .border_style(self.theme.dialog_border_style(dialog.dialog_type));

        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(self.theme.base_style())
                .wrap(Wrap { trim: false }),
            dialog_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::BasicModule;
    use crate::workbench::WorkbenchConfig;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn app(names: &[&str]) -> App {
        let modules: Vec<ModuleRef> = names.iter().map(|n| BasicModule::new(*n).into_ref()).collect();
        let settings = Settings {
            modules_per_page: 4,
            columns_per_row: 2,
            ..Settings::default()
        };
        let workbench = Workbench::new(WorkbenchConfig::new(modules).with_settings(&settings)).unwrap();
        App::new(workbench, settings)
    }

    #[test]
    fn test_enter_opens_selected_tile() {
        let mut app = app(&["A", "B", "C"]);
        app.handle_event(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_tile(), 2);
        app.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            app.workbench.active_module().map(ModuleRef::label),
            Some("C".to_string())
        );
    }

    #[test]
    fn test_paging() {
        let mut app = app(&["A", "B", "C", "D", "E"]);
        app.handle_event(key(KeyCode::PageDown)).unwrap();
        assert_eq!(app.home_page(), 1);
        app.handle_event(key(KeyCode::PageDown)).unwrap();
        assert_eq!(app.home_page(), 1);
        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.workbench.active_module().map(ModuleRef::label),
            Some("E".to_string())
        );
    }

    #[test]
    fn test_tab_cycling_and_close() {
        let mut app = app(&["A", "B"]);
        app.handle_event(key(KeyCode::Enter)).unwrap();
        app.handle_event(ctrl('o')).unwrap();
        app.handle_event(key(KeyCode::Right)).unwrap();
        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.workbench.open_modules().len(), 2);

        app.handle_event(ctrl('n')).unwrap();
        assert_eq!(
            app.workbench.active_module().map(ModuleRef::label),
            Some("A".to_string())
        );

        app.handle_event(ctrl('w')).unwrap();
        assert_eq!(
            app.workbench.active_module().map(ModuleRef::label),
            Some("B".to_string())
        );
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut app = app(&["A"]);
        assert!(!app.handle_event(ctrl('c')).unwrap());
        assert!(app.workbench.backdrop_visible());
        assert_eq!(app.selected_button(), 0);

        // move to "No" and back
        app.handle_event(key(KeyCode::Right)).unwrap();
        app.handle_event(key(KeyCode::Left)).unwrap();
        assert!(app.handle_event(key(KeyCode::Enter)).unwrap());
    }

    #[test]
    fn test_escape_dismisses_quit_dialog() {
        let mut app = app(&["A"]);
        app.handle_event(ctrl('c')).unwrap();
        assert!(!app.handle_event(key(KeyCode::Esc)).unwrap());
        assert!(app.workbench.dialog().is_none());
        assert!(!app.workbench.backdrop_visible());
    }

    #[test]
    fn test_help_overlay_is_not_modal() {
        let mut app = app(&["A"]);
        app.handle_event(ctrl('g')).unwrap();
        assert!(app.workbench.is_overlay_visible(&OverlayId::from(HELP_OVERLAY)));
        assert!(!app.workbench.backdrop_visible());
        app.handle_event(ctrl('g')).unwrap();
        assert!(app.workbench.shown_overlays().is_empty());
    }

    #[test]
    fn test_vetoed_close_sets_status() {
        let module = BasicModule::new("Sticky").with_close_guard(|| false).into_ref();
        let settings = Settings::default();
        let workbench = Workbench::of([module.clone()]).unwrap();
        let mut app = App::new(workbench, settings);

        app.handle_event(key(KeyCode::Enter)).unwrap();
        app.handle_event(ctrl('w')).unwrap();
        assert_eq!(app.workbench.active_module(), Some(&module));
        assert_eq!(app.status_message.as_deref(), Some("Sticky was not closed"));
    }
}
