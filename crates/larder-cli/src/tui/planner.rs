//! Interactive weekly planner: recipe list, live search and the grocery
//! drawer.
//!
//! All state changes go through `larder_core::view`, so the TUI and the
//! one-shot commands share the same persistence rules.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use larder_core::export::{ExportAction, ExportActions, Feedback, build_list_text};
use larder_core::search::{SearchHits, search};
use larder_core::store::{KeyValueStore, Persistence};
use larder_core::view::{self, Badge, Drawer};
use larder_core::{Catalog, aggregate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Help,
}

/// One line of the recipe pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaneRow {
    Section(usize),
    Card(usize),
}

pub struct PlannerApp<S: KeyValueStore> {
    catalog: Catalog,
    persistence: Persistence<S>,
    actions: ExportActions,
    selection: BTreeSet<String>,
    badge: Badge,
    drawer: Drawer,
    drawer_cursor: usize,
    hits: SearchHits,
    search_buf: String,
    /// Card indices currently shown, catalog order.
    visible: Vec<usize>,
    cursor: usize,
    input_mode: InputMode,
    feedback: Feedback,
    should_quit: bool,
}

impl<S: KeyValueStore> PlannerApp<S> {
    pub fn new(
        catalog: Catalog,
        persistence: Persistence<S>,
        actions: ExportActions,
        feedback: Duration,
    ) -> Result<Self> {
        let hits = search(&catalog, "");
        let mut app = Self {
            catalog,
            persistence,
            actions,
            selection: BTreeSet::new(),
            badge: Badge::default(),
            drawer: Drawer::default(),
            drawer_cursor: 0,
            hits,
            search_buf: String::new(),
            visible: Vec::new(),
            cursor: 0,
            input_mode: InputMode::Normal,
            feedback: Feedback::new(feedback),
            should_quit: false,
        };
        app.apply_search();
        app.reload()?;
        Ok(app)
    }

    /// Re-read both stored sets and recompute the badge.
    fn reload(&mut self) -> Result<()> {
        self.selection = self.persistence.selected_recipe_ids()?;
        let purchased = self.persistence.purchased_keys()?;
        let aggregation = aggregate(&self.selection, self.catalog.cards());
        self.badge = Badge::compute(&aggregation, &purchased);
        self.drawer.refresh(&self.persistence, self.catalog.cards())?;
        self.clamp_drawer_cursor();
        Ok(())
    }

    fn apply_search(&mut self) {
        self.hits = search(&self.catalog, &self.search_buf);
        self.visible = self.hits.visible_indices().collect();
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }

    /// Open the grocery drawer with the cursor on the first row.
    pub fn open_drawer(&mut self) -> Result<()> {
        self.drawer.open(&self.persistence, self.catalog.cards())?;
        self.drawer_cursor = 0;
        Ok(())
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub const fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub const fn badge(&self) -> Badge {
        self.badge
    }

    pub const fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    pub fn status(&self) -> Option<&str> {
        self.feedback.text()
    }

    pub fn set_status(&mut self, msg: impl Into<String>, now: Instant) {
        self.feedback.set(msg, now);
    }

    /// Expire feedback whose time is up.
    pub fn tick(&mut self, now: Instant) {
        self.feedback.tick(now);
    }

    fn current_card(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.input_mode {
            InputMode::Help => self.handle_help_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::Normal if self.drawer.is_open() => self.handle_drawer_key(key, now)?,
            InputMode::Normal => self.handle_normal_key(key)?,
        }
        Ok(())
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_buf.clear();
                self.apply_search();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.search_buf.pop();
                self.apply_search();
            }
            KeyCode::Char(c) => {
                self.search_buf.push(c);
                self.apply_search();
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.input_mode = InputMode::Help,
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < self.visible.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('g') => self.open_drawer()?,
            KeyCode::Esc if !self.search_buf.is_empty() => {
                self.search_buf.clear();
                self.apply_search();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_drawer_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.input_mode = InputMode::Help,
            KeyCode::Esc | KeyCode::Char('g') => self.drawer.close(),
            KeyCode::Char('j') | KeyCode::Down => {
                let rows = self.drawer.view().map_or(0, |v| v.rows.len());
                if self.drawer_cursor + 1 < rows {
                    self.drawer_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.drawer_cursor = self.drawer_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_purchased()?,
            KeyCode::Char('c') => self.run_action(ExportAction::Copy, now),
            KeyCode::Char('s') => self.run_action(ExportAction::Share, now),
            KeyCode::Char('m') => self.run_action(ExportAction::Sms, now),
            KeyCode::Char('d') => self.run_action(ExportAction::Download, now),
            _ => {}
        }
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(idx) = self.current_card() else {
            return Ok(());
        };
        let id = self.catalog.cards()[idx].id.clone();
        let selected = !self.selection.contains(&id);
        view::set_selected(&mut self.persistence, self.catalog.cards(), &id, selected)?;
        debug!(id, selected, "recipe toggled");
        self.reload()
    }

    fn toggle_purchased(&mut self) -> Result<()> {
        let Some(row) = self
            .drawer
            .view()
            .and_then(|v| v.rows.get(self.drawer_cursor))
        else {
            return Ok(());
        };
        let (key, purchased) = (row.key.clone(), !row.purchased);
        self.badge = view::set_purchased(&mut self.persistence, self.catalog.cards(), &key, purchased)?;
        self.drawer.refresh(&self.persistence, self.catalog.cards())?;
        Ok(())
    }

    fn run_action(&mut self, action: ExportAction, now: Instant) {
        let text = build_list_text(&aggregate(&self.selection, self.catalog.cards()));
        let report = self.actions.run(action, &text);
        if let Some(status) = report.status {
            self.feedback.set(status, now);
        }
    }

    fn clamp_drawer_cursor(&mut self) {
        let rows = self.drawer.view().map_or(0, |v| v.rows.len());
        self.drawer_cursor = self.drawer_cursor.min(rows.saturating_sub(1));
    }

    fn pane_rows(&self) -> Vec<PaneRow> {
        let mut rows = Vec::with_capacity(self.visible.len());
        let mut current: Option<Option<&str>> = None;
        for &idx in &self.visible {
            let section = self.catalog.cards()[idx].section.as_deref();
            if current != Some(section) {
                if let Some(name) = section
                    && let Some(si) = self.catalog.sections().iter().position(|s| s.name == name)
                {
                    rows.push(PaneRow::Section(si));
                }
                current = Some(section);
            }
            rows.push(PaneRow::Card(idx));
        }
        rows
    }

    pub fn render(&self, frame: &mut ratatui::Frame<'_>) {
        render_into(frame, self, frame.area());
    }
}

fn render_into<S: KeyValueStore>(frame: &mut ratatui::Frame<'_>, app: &PlannerApp<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let (content_area, status_area) = (chunks[0], chunks[1]);

    let panes = if app.drawer().is_open() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(content_area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100), Constraint::Percentage(0)])
            .split(content_area)
    };

    render_recipes(frame, app, panes[0]);
    if app.drawer().is_open() && panes[1].width > 0 {
        render_drawer(frame, app, panes[1]);
    }

    frame.render_widget(
        Paragraph::new(build_status_bar(app, status_area.width)).alignment(Alignment::Left),
        status_area,
    );

    if app.input_mode() == InputMode::Help {
        render_help_overlay(frame, area);
    }
}

fn render_recipes<S: KeyValueStore>(frame: &mut ratatui::Frame<'_>, app: &PlannerApp<S>, area: Rect) {
    let rows = app.pane_rows();
    let cursor_card = app.current_card();
    let mut highlighted = None;

    let items: Vec<ListItem<'static>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| match *row {
            PaneRow::Section(si) => {
                let name = app.catalog.sections()[si].name.clone();
                ListItem::new(Line::from(Span::styled(
                    name,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )))
            }
            PaneRow::Card(idx) => {
                if Some(idx) == cursor_card {
                    highlighted = Some(i);
                }
                let card = &app.catalog.cards()[idx];
                let selected = app.selection.contains(&card.id);
                let (mark, style) = if selected {
                    ("[x] ", Style::default().fg(Color::Green))
                } else {
                    ("[ ] ", Style::default().fg(Color::White))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("  {mark}"), style),
                    Span::styled(card.title.clone(), style),
                ]))
            }
        })
        .collect();

    let title = match app.input_mode() {
        InputMode::Search => format!(" search: {}_ ", app.search_buf),
        _ if !app.search_buf.is_empty() => format!(
            " {} of {} recipes matching \"{}\" ",
            app.hits.visible_count(),
            app.catalog.len(),
            app.search_buf
        ),
        _ => format!(" {} ", view::count_line(app.selection.len())),
    };

    let border_style = if app.drawer().is_open() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };

    let body: Vec<ListItem<'static>> = if items.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No recipes match.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        items
    };

    let list = List::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_drawer<S: KeyValueStore>(frame: &mut ratatui::Frame<'_>, app: &PlannerApp<S>, area: Rect) {
    let Some(view) = app.drawer().view() else {
        return;
    };

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(format!(" {} ", app.badge().launcher_label()))
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let dim = Style::default().fg(Color::DarkGray);
    let header = vec![
        Line::from(Span::styled(view.count_line.clone(), dim)),
        Line::from(
            view.tags
                .iter()
                .flat_map(|t| {
                    [
                        Span::styled(format!(" {t} "), Style::default().fg(Color::Black).bg(Color::Cyan)),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
    ];
    frame.render_widget(Paragraph::new(header), sections[0]);

    if view.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Your list is empty. Select recipes to build it.",
                dim,
            )),
            sections[1],
        );
    } else {
        let items: Vec<ListItem<'static>> = view
            .rows
            .iter()
            .map(|row| {
                if row.purchased {
                    ListItem::new(Line::from(Span::styled(
                        format!("[x] {}", row.label),
                        dim.add_modifier(Modifier::CROSSED_OUT),
                    )))
                } else {
                    ListItem::new(Line::from(format!("[ ] {}", row.label)))
                }
            })
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        state.select(Some(app.drawer_cursor));
        frame.render_stateful_widget(list, sections[1], &mut state);
    }

    let key_style = Style::default().fg(Color::Cyan);
    let mut spans = Vec::new();
    for (key, desc) in [("c", "copy"), ("s", "share"), ("m", "sms"), ("d", "download")] {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {desc}  "), dim));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), sections[2]);
}

fn build_status_bar<S: KeyValueStore>(app: &PlannerApp<S>, width: u16) -> Line<'static> {
    if let Some(msg) = app.status() {
        return Line::from(vec![Span::styled(
            msg.to_string(),
            Style::default().fg(Color::Cyan),
        )]);
    }

    let key_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);
    let hints: &[(&str, &str)] = match app.input_mode() {
        InputMode::Search => &[("ESC", "clear"), ("ENTER", "keep filter")],
        InputMode::Help => &[("ESC", "close help")],
        InputMode::Normal if app.drawer().is_open() => &[
            ("j/k", "nav"),
            ("space", "bought"),
            ("g/esc", "close"),
            ("q", "quit"),
        ],
        InputMode::Normal => &[
            ("j/k", "nav"),
            ("space", "select for week"),
            ("/", "search"),
            ("g", "grocery list"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled((*key).to_string(), key_style));
        spans.push(Span::styled(format!(" {desc}  "), dim_style));
    }

    let launcher = app.badge().launcher_label();
    let left_len: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let right_len = launcher.chars().count();
    let width = usize::from(width);
    if width > left_len + right_len + 1 {
        spans.push(Span::raw(" ".repeat(width - left_len - right_len)));
    } else {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(launcher, Style::default().fg(Color::Green)));

    Line::from(spans)
}

const fn help_hotkeys() -> &'static [(&'static str, &'static str, &'static str)] {
    &[
        ("j / k", "list", "Move down / up"),
        ("space", "list", "Select or deselect recipe for the week"),
        ("/", "list", "Search titles, ingredients and steps"),
        ("esc", "list", "Clear search"),
        ("g", "list", "Open grocery list"),
        ("space", "groceries", "Mark item bought"),
        ("c", "groceries", "Copy list to clipboard"),
        ("s", "groceries", "Share list"),
        ("m", "groceries", "Send list by SMS"),
        ("d", "groceries", "Save list as a text file"),
        ("g / esc", "groceries", "Close grocery list"),
        ("?", "any", "Toggle this help"),
        ("q", "any", "Quit"),
    ]
}

fn render_help_overlay(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let popup_w = area.width.saturating_sub(8).min(72);
    let popup_h = area.height.saturating_sub(4).min(18);
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(" Hotkeys ")
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines: Vec<Line<'static>> = help_hotkeys()
        .iter()
        .map(|(key, ctx, desc)| {
            Line::from(vec![
                Span::styled(format!("{key:10}"), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{ctx:11}"), Style::default().fg(Color::DarkGray)),
                Span::styled((*desc).to_string(), Style::default().fg(Color::White)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::export::DownloadTarget;
    use larder_core::{MemoryStore, RecipeCard};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn catalog() -> Catalog {
        Catalog::from_cards(vec![
            RecipeCard::new("Pancakes", ["2 eggs", "1 cup milk"]).with_section("Spring"),
            RecipeCard::new("Omelette", ["2 Eggs", "1 tsp salt"]).with_section("Spring"),
            RecipeCard::new("Gazpacho", ["4 tomatoes"]).with_section("Summer"),
        ])
    }

    fn app() -> PlannerApp<MemoryStore> {
        PlannerApp::new(
            catalog(),
            Persistence::new(MemoryStore::new()),
            ExportActions::default(),
            Duration::from_secs(2),
        )
        .expect("app")
    }

    fn press(app: &mut PlannerApp<MemoryStore>, keys: &[KeyCode], now: Instant) {
        for &code in keys {
            app.handle_key(key(code), now).expect("key");
        }
    }

    #[test]
    fn space_selects_and_updates_badge() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char('j'), KeyCode::Char(' ')], now);
        assert_eq!(app.badge().remaining(), 3);
        assert_eq!(app.badge().launcher_label(), "Grocery List (3)");

        press(&mut app, &[KeyCode::Char(' ')], now);
        assert_eq!(app.badge().remaining(), 2);
    }

    #[test]
    fn drawer_toggles_purchased_and_prunes_on_deselect() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char('g')], now);
        assert!(app.drawer().is_open());

        // rows sorted: "1 cup milk", "2 eggs"
        press(&mut app, &[KeyCode::Char(' ')], now);
        let view = app.drawer().view().expect("open");
        assert!(view.rows[0].purchased);
        assert_eq!(app.badge().remaining(), 1);

        press(&mut app, &[KeyCode::Esc], now);
        assert!(!app.drawer().is_open());
        press(&mut app, &[KeyCode::Char(' ')], now);
        assert_eq!(app.badge().visible(), None);
        assert!(app.persistence.purchased_keys().expect("read").is_empty());
    }

    #[test]
    fn search_filters_and_escape_clears() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, &[KeyCode::Char('/')], now);
        assert_eq!(app.input_mode(), InputMode::Search);
        press(&mut app, &[KeyCode::Char('t'), KeyCode::Char('o'), KeyCode::Char('m')], now);
        assert_eq!(app.visible, [2]);
        assert!(!app.hits.is_section_visible(0));

        press(&mut app, &[KeyCode::Enter], now);
        assert_eq!(app.input_mode(), InputMode::Normal);
        press(&mut app, &[KeyCode::Char(' ')], now);
        assert!(app.selection.contains("gazpacho"));

        press(&mut app, &[KeyCode::Esc], now);
        assert_eq!(app.visible.len(), 3);
    }

    #[test]
    fn actions_report_through_feedback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = PlannerApp::new(
            catalog(),
            Persistence::new(MemoryStore::new()),
            ExportActions {
                download: DownloadTarget {
                    dir: dir.path().to_path_buf(),
                    file_name: "list.txt".into(),
                },
                ..ExportActions::default()
            },
            Duration::from_secs(2),
        )
        .expect("app");
        let t0 = Instant::now();
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char('g'), KeyCode::Char('c')], t0);
        assert_eq!(app.status(), Some("Copy failed"));

        press(&mut app, &[KeyCode::Char('d')], t0);
        assert!(app.status().is_some_and(|s| s.starts_with("Saved to ")));
        let saved = std::fs::read_to_string(dir.path().join("list.txt")).expect("read");
        assert!(saved.starts_with("Groceries for 1 recipe\n"));

        app.tick(t0 + Duration::from_secs(2));
        assert_eq!(app.status(), None);
    }

    #[test]
    fn quit_and_help() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, &[KeyCode::Char('?')], now);
        assert_eq!(app.input_mode(), InputMode::Help);
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')], now);
        assert!(app.should_quit());
    }

    #[test]
    fn renders_list_drawer_and_help() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Char('g')], now);

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Grocery List (2)"));
        assert!(screen.contains("Spring"));
        assert!(screen.contains("1 cup milk"));

        press(&mut app, &[KeyCode::Char('?')], now);
        terminal.draw(|f| app.render(f)).expect("draw");
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Hotkeys"));
    }
}
