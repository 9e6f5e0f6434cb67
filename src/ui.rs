use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use persona_table::{
    FormView, MainController, ModalController, ModalOutcome, ModalStep, ModalView, Persona,
    PersonaForm, PersonaStore, Severity, TableView, ViewError, ViewResult, WindowConfig,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 12;
const MESSAGE_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Name,
    Surname,
    Age,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Table => Focus::Name,
            Focus::Name => Focus::Surname,
            Focus::Surname => Focus::Age,
            Focus::Age => Focus::Table,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Focus::Table => Focus::Age,
            Focus::Name => Focus::Table,
            Focus::Surname => Focus::Name,
            Focus::Age => Focus::Surname,
        }
    }

    /// Like `next`, but the dialog has no table to land on.
    pub fn next_field(&self) -> Self {
        match self.next() {
            Focus::Table => Focus::Name,
            field => field,
        }
    }

    pub fn previous_field(&self) -> Self {
        match self.previous() {
            Focus::Table => Focus::Age,
            field => field,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub name: String,
    pub surname: String,
    pub age: String,
}

impl FormState {
    fn field_mut(&mut self, focus: Focus) -> Option<&mut String> {
        match focus {
            Focus::Table => None,
            Focus::Name => Some(&mut self.name),
            Focus::Surname => Some(&mut self.surname),
            Focus::Age => Some(&mut self.age),
        }
    }

    fn edit(&mut self, focus: Focus, code: KeyCode) {
        if let Some(field) = self.field_mut(focus) {
            match code {
                KeyCode::Char(c) => field.push(c),
                KeyCode::Backspace => {
                    field.pop();
                }
                _ => {}
            }
        }
    }

    fn to_form(&self) -> PersonaForm {
        PersonaForm::new(self.name.clone(), self.surname.clone(), self.age.clone())
    }
}

impl From<&PersonaForm> for FormState {
    fn from(form: &PersonaForm) -> Self {
        FormState {
            name: form.name.clone(),
            surname: form.surname.clone(),
            age: form.age.clone(),
        }
    }
}

/// Where key presses come from; scripted in tests.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Submit,
    Delete,
    Cancel,
    OpenDialog,
    Select(usize),
}

/// Popups drawn over the main screen, bottom first.
enum Layer<'a> {
    Dialog { form: &'a FormState, focus: Focus },
    Message { severity: Severity, text: &'a str },
}

struct Screen<'a> {
    window: &'a WindowConfig,
    rows: &'a [Persona],
    form: &'a FormState,
    focus: Focus,
    selected: Option<usize>,
}

pub struct Tui<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    window: WindowConfig,
    rows: Vec<Persona>,
    table: TableState,
    form: FormState,
    focus: Focus,
}

impl<B: Backend, K: KeySource> Tui<B, K> {
    pub fn new(terminal: Terminal<B>, keys: K, window: WindowConfig) -> Self {
        Self {
            terminal,
            keys,
            window,
            rows: Vec::new(),
            table: TableState::default(),
            form: FormState::default(),
            focus: Focus::Table,
        }
    }

    pub fn run<S: PersonaStore>(&mut self, controller: &mut MainController<S>) -> ViewResult<()> {
        controller.initialize(self);

        loop {
            self.draw(&[])?;

            let key = self.keys.next_key()?;
            match self.command_for(key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Submit) => {
                    controller.submit(self)?;
                }
                Some(Command::Delete) => {
                    controller.delete(self)?;
                }
                Some(Command::Cancel) => {
                    controller.cancel(self);
                }
                Some(Command::OpenDialog) => {
                    controller.open_add_dialog(self);
                }
                Some(Command::Select(row)) => {
                    controller.select_row(self, row);
                }
                None => {}
            }
        }
    }

    fn command_for(&mut self, key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => return Some(Command::Quit),
            KeyCode::Char('s') if ctrl => return Some(Command::Submit),
            KeyCode::Char('d') if ctrl => return Some(Command::Delete),
            KeyCode::Char('n') if ctrl => return Some(Command::OpenDialog),
            KeyCode::Esc => return Some(Command::Cancel),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return None;
            }
            _ => {}
        }

        if self.focus == Focus::Table {
            return self.table_command(key.code);
        }

        match key.code {
            KeyCode::Enter => Some(Command::Submit),
            code => {
                self.form.edit(self.focus, code);
                None
            }
        }
    }

    fn table_command(&self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Down | KeyCode::Char('j') => self.next_row().map(Command::Select),
            KeyCode::Up | KeyCode::Char('k') => self.previous_row().map(Command::Select),
            KeyCode::Home if !self.rows.is_empty() => Some(Command::Select(0)),
            KeyCode::End => self.rows.len().checked_sub(1).map(Command::Select),
            KeyCode::Enter => self.table.selected().map(Command::Select),
            KeyCode::Delete => Some(Command::Delete),
            _ => None,
        }
    }

    fn next_row(&self) -> Option<usize> {
        let len = self.rows.len();
        if len == 0 {
            return None;
        }
        let i = match self.table.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        Some(i)
    }

    fn previous_row(&self) -> Option<usize> {
        let len = self.rows.len();
        if len == 0 {
            return None;
        }
        let i = match self.table.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        Some(i)
    }

    fn draw(&mut self, layers: &[Layer<'_>]) -> io::Result<()> {
        let screen = Screen {
            window: &self.window,
            rows: &self.rows,
            form: &self.form,
            focus: self.focus,
            selected: self.table.selected(),
        };
        let table = &mut self.table;

        self.terminal.draw(|f| ui(f, &screen, table, layers))?;
        Ok(())
    }

    fn wait_for_dismiss(&mut self, layers: &[Layer<'_>]) -> ViewResult<()> {
        loop {
            self.draw(layers)?;

            let key = self.keys.next_key()?;
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                return Ok(());
            }
        }
    }

    /// Nested event loop for the add dialog; the main loop is suspended
    /// until it returns.
    fn run_dialog(&mut self, store: &mut dyn PersonaStore) -> ViewResult<ModalOutcome> {
        let size = self.terminal.size()?;
        if size.width < DIALOG_WIDTH || size.height < DIALOG_HEIGHT {
            return Err(ViewError::Modal(format!(
                "terminal is {}x{}, the dialog needs {}x{}",
                size.width, size.height, DIALOG_WIDTH, DIALOG_HEIGHT
            )));
        }

        let mut controller = ModalController::new(store);
        let mut dialog = DialogView {
            tui: self,
            form: FormState::default(),
            focus: Focus::Name,
            closed: false,
        };
        let mut added = None;

        while !dialog.closed {
            dialog.draw()?;

            let key = dialog.tui.keys.next_key()?;
            match key.code {
                KeyCode::Esc => dialog.close(),
                KeyCode::Enter => {
                    if let ModalStep::Added(persona) = controller.submit(&mut dialog)? {
                        added = Some(persona);
                    }
                }
                KeyCode::Tab | KeyCode::Down => dialog.focus = dialog.focus.next_field(),
                KeyCode::BackTab | KeyCode::Up => dialog.focus = dialog.focus.previous_field(),
                code => dialog.form.edit(dialog.focus, code),
            }
        }

        Ok(match added {
            Some(persona) => ModalOutcome::Added(persona),
            None => ModalOutcome::Cancelled,
        })
    }
}

impl<B: Backend, K: KeySource> FormView for Tui<B, K> {
    fn read_form(&self) -> PersonaForm {
        self.form.to_form()
    }

    fn write_form(&mut self, form: &PersonaForm) {
        self.form = FormState::from(form);
    }

    fn show_message(&mut self, severity: Severity, text: &str) -> ViewResult<()> {
        self.wait_for_dismiss(&[Layer::Message { severity, text }])
    }
}

impl<B: Backend, K: KeySource> TableView for Tui<B, K> {
    fn selected(&self) -> Option<usize> {
        self.table.selected()
    }

    fn set_selected(&mut self, row: Option<usize>) {
        self.table.select(row);
    }

    fn refresh(&mut self, rows: &[Persona]) {
        self.rows = rows.to_vec();
        if self.table.selected().map_or(false, |i| i >= self.rows.len()) {
            self.table.select(None);
        }
    }

    fn open_modal(&mut self, store: &mut dyn PersonaStore) -> ViewResult<ModalOutcome> {
        self.run_dialog(store)
    }
}

/// The add dialog, drawn over the main screen it borrows.
struct DialogView<'t, B: Backend, K: KeySource> {
    tui: &'t mut Tui<B, K>,
    form: FormState,
    focus: Focus,
    closed: bool,
}

impl<'t, B: Backend, K: KeySource> DialogView<'t, B, K> {
    fn draw(&mut self) -> io::Result<()> {
        self.tui.draw(&[Layer::Dialog {
            form: &self.form,
            focus: self.focus,
        }])
    }
}

impl<'t, B: Backend, K: KeySource> FormView for DialogView<'t, B, K> {
    fn read_form(&self) -> PersonaForm {
        self.form.to_form()
    }

    fn write_form(&mut self, form: &PersonaForm) {
        self.form = FormState::from(form);
    }

    fn show_message(&mut self, severity: Severity, text: &str) -> ViewResult<()> {
        self.tui.wait_for_dismiss(&[
            Layer::Dialog {
                form: &self.form,
                focus: self.focus,
            },
            Layer::Message { severity, text },
        ])
    }
}

impl<'t, B: Backend, K: KeySource> ModalView for DialogView<'t, B, K> {
    fn close(&mut self) {
        self.closed = true;
    }
}

pub fn run_ui<S: PersonaStore>(controller: &mut MainController<S>, window: &WindowConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(&window.title))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    // Run the app
    let mut tui = Tui::new(terminal, TerminalKeys, window.clone());
    let res = tui.run(controller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(tui.terminal.backend_mut(), LeaveAlternateScreen)?;
    tui.terminal.show_cursor()?;

    res.context("Terminal UI failed")
}

fn ui(f: &mut Frame, screen: &Screen<'_>, table: &mut TableState, layers: &[Layer<'_>]) {
    let full = f.size();
    if full.width < screen.window.min_columns() || full.height < screen.window.min_rows() {
        render_too_small(f, full, screen.window);
        return;
    }

    let area = Rect {
        width: full.width.min(screen.window.max_columns()),
        ..full
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Records
            Constraint::Length(3), // Input fields
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_header(f, chunks[0], screen);
    render_table(f, chunks[1], screen, table);
    render_form(f, chunks[2], screen.form, screen.focus);
    render_status_bar(f, chunks[3], screen);

    for layer in layers {
        match layer {
            Layer::Dialog { form, focus } => render_dialog(f, area, &screen.window.dialog_title, form, *focus),
            Layer::Message { severity, text } => render_message(f, area, *severity, text),
        }
    }
}

fn render_too_small(f: &mut Frame, area: Rect, window: &WindowConfig) {
    let text = format!(
        "Terminal too small: need at least {}x{}, have {}x{}",
        window.min_columns(),
        window.min_rows(),
        area.width,
        area.height
    );
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_header(f: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let mode = match screen.selected {
        Some(i) => Span::styled(format!("Editing row {}", i + 1), Style::default().fg(Color::Yellow)),
        None => Span::styled("Adding", Style::default().fg(Color::Green)),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            screen.window.title.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(format!("Records: {}", screen.rows.len()), Style::default().fg(Color::White)),
        Span::raw("  |  "),
        mode,
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, screen: &Screen<'_>, state: &mut TableState) {
    let header_cells = ["Name", "Surname", "Age"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = screen.rows.iter().map(|persona| {
        Row::new(vec![
            Cell::from(persona.name.clone()),
            Cell::from(persona.surname.clone()),
            Cell::from(persona.age.to_string()),
        ])
        .height(1)
    });

    let border = if screen.focus == Focus::Table { Color::Yellow } else { Color::White };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(45),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" People "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, state);
}

fn render_form(f: &mut Frame, area: Rect, form: &FormState, focus: Focus) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(area);

    render_input(f, chunks[0], "Name", &form.name, focus == Focus::Name);
    render_input(f, chunks[1], "Surname", &form.surname, focus == Focus::Surname);
    render_input(f, chunks[2], "Age", &form.age, focus == Focus::Age);
}

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let (border, text) = if focused {
        (Color::Yellow, format!("{}_", value))
    } else {
        (Color::White, value.to_string())
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", label)),
    );

    f.render_widget(input, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let hint = |key: &'static str, action: &'static str| {
        vec![
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(action),
        ]
    };

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", screen.selected.map(|i| i + 1).unwrap_or(0), screen.rows.len()),
        Style::default().fg(Color::Cyan),
    )];
    status_spans.push(Span::raw("| "));
    status_spans.extend(hint("Tab", " Focus | "));
    status_spans.extend(hint("Enter", " Save | "));
    status_spans.extend(hint("Del", " Delete | "));
    status_spans.extend(hint("^N", " New | "));
    status_spans.extend(hint("Esc", " Clear | "));
    status_spans.push(Span::styled("^Q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_dialog(f: &mut Frame, area: Rect, title: &str, form: &FormState, focus: Focus) {
    let rect = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    render_input(f, chunks[0], "Name", &form.name, focus == Focus::Name);
    render_input(f, chunks[1], "Surname", &form.surname, focus == Focus::Surname);
    render_input(f, chunks[2], "Age", &form.age, focus == Focus::Age);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Add | "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Close"),
    ]));
    f.render_widget(hint, chunks[3]);
}

fn render_message(f: &mut Frame, area: Rect, severity: Severity, text: &str) {
    let color = match severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };

    let mut content: Vec<Line> = text.lines().map(|line| Line::from(line.to_string())).collect();
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Press Enter to close",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let height = content.len() as u16 + 2;
    let rect = centered_rect(MESSAGE_WIDTH, height, area);
    f.render_widget(Clear, rect);

    let message = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", severity.title())),
    );

    f.render_widget(message, rect);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_table::MemoryStore;
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    struct ScriptedKeys(VecDeque<KeyEvent>);

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self) -> io::Result<KeyEvent> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn text(s: &str) -> Vec<KeyEvent> {
        s.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn script(parts: Vec<Vec<KeyEvent>>) -> ScriptedKeys {
        ScriptedKeys(parts.into_iter().flatten().collect())
    }

    fn tui(width: u16, height: u16, keys: ScriptedKeys) -> Tui<TestBackend, ScriptedKeys> {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        Tui::new(terminal, keys, WindowConfig::default())
    }

    fn screen_text(tui: &Tui<TestBackend, ScriptedKeys>) -> String {
        tui.terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn ana() -> Persona {
        Persona::new("Ana", "Ruiz", 30)
    }

    #[test]
    fn test_add_through_fields() {
        let keys = script(vec![
            vec![key(KeyCode::Tab)],
            text("Ana"),
            vec![key(KeyCode::Tab)],
            text("Ruiz"),
            vec![key(KeyCode::Tab)],
            text("30"),
            vec![key(KeyCode::Enter), key(KeyCode::Enter), ctrl('q')],
        ]);
        let mut controller = MainController::new(MemoryStore::new());
        let mut tui = tui(100, 30, keys);

        tui.run(&mut controller).unwrap();

        assert_eq!(controller.store().as_slice(), &[ana()]);
        let screen = screen_text(&tui);
        assert!(screen.contains("Ruiz"));
        assert!(screen.contains("Records: 1"));
    }

    #[test]
    fn test_edit_selected_row() {
        let keys = script(vec![
            vec![
                key(KeyCode::Down),
                key(KeyCode::Tab),
                key(KeyCode::Tab),
                key(KeyCode::Tab),
                key(KeyCode::Backspace),
                key(KeyCode::Backspace),
            ],
            text("31"),
            vec![key(KeyCode::Enter), key(KeyCode::Enter), ctrl('q')],
        ]);
        let mut controller = MainController::new(MemoryStore::from(vec![ana()]));
        let mut tui = tui(100, 30, keys);

        tui.run(&mut controller).unwrap();

        assert_eq!(controller.store().as_slice(), &[Persona::new("Ana", "Ruiz", 31)]);
    }

    #[test]
    fn test_delete_selected_row() {
        let luis = Persona::new("Luis", "Gomez", 42);
        let keys = script(vec![vec![
            key(KeyCode::Down),
            key(KeyCode::Delete),
            key(KeyCode::Enter),
            key(KeyCode::Char('q')),
        ]]);
        let mut controller = MainController::new(MemoryStore::from(vec![ana(), luis.clone()]));
        let mut tui = tui(100, 30, keys);

        tui.run(&mut controller).unwrap();

        assert_eq!(controller.store().as_slice(), &[luis]);
        assert!(!screen_text(&tui).contains("Ruiz"));
    }

    #[test]
    fn test_delete_without_selection_keeps_rows() {
        let keys = script(vec![vec![
            key(KeyCode::Delete),
            key(KeyCode::Esc),
            key(KeyCode::Char('q')),
        ]]);
        let mut controller = MainController::new(MemoryStore::from(vec![ana()]));
        let mut tui = tui(100, 30, keys);

        tui.run(&mut controller).unwrap();

        assert_eq!(controller.store().len(), 1);
    }

    #[test]
    fn test_dialog_adds_record() {
        let keys = script(vec![
            vec![ctrl('n')],
            text("Luis"),
            vec![key(KeyCode::Tab)],
            text("Gomez"),
            vec![key(KeyCode::Down)],
            text("42"),
            vec![key(KeyCode::Enter), ctrl('q')],
        ]);
        let mut controller = MainController::new(MemoryStore::from(vec![ana()]));
        let mut tui = tui(100, 30, keys);

        tui.run(&mut controller).unwrap();

        assert_eq!(controller.store().len(), 2);
        assert_eq!(controller.store().get(1), Some(&Persona::new("Luis", "Gomez", 42)));
        assert!(screen_text(&tui).contains("Gomez"));
    }

    #[test]
    fn test_dialog_duplicate_then_close() {
        let keys = script(vec![
            vec![ctrl('n')],
            text("Ana"),
            vec![key(KeyCode::Tab)],
            text("Ruiz"),
            vec![key(KeyCode::Tab)],
            text("30"),
            vec![
                key(KeyCode::Enter), // rejected, message shown
                key(KeyCode::Enter), // dismiss message
                key(KeyCode::Esc),   // close dialog
                ctrl('q'),
            ],
        ]);
        let mut controller = MainController::new(MemoryStore::from(vec![ana()]));
        let mut tui = tui(100, 30, keys);

        tui.run(&mut controller).unwrap();

        assert_eq!(controller.store().len(), 1);
    }

    #[test]
    fn test_small_terminal_cannot_open_dialog() {
        let keys = script(vec![vec![ctrl('n'), ctrl('q')]]);
        let mut controller = MainController::new(MemoryStore::new());
        let mut tui = tui(40, 10, keys);

        tui.run(&mut controller).unwrap();

        assert!(controller.store().is_empty());
        assert!(screen_text(&tui).contains("too small"));
    }

    #[test]
    fn test_exhausted_input_is_an_error() {
        let keys = script(vec![text("jj")]);
        let mut controller = MainController::new(MemoryStore::from(vec![ana()]));
        let mut tui = tui(100, 30, keys);

        assert!(matches!(tui.run(&mut controller), Err(ViewError::Io(_))));
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Table.next(), Focus::Name);
        assert_eq!(Focus::Age.next(), Focus::Table);
        assert_eq!(Focus::Age.next_field(), Focus::Name);
        assert_eq!(Focus::Name.previous_field(), Focus::Age);
    }
}
