//! Interactive table browser.
//!
//! Left pane: the catalog. Right pane: the grid of the highlighted table.
//! Moving the highlight in the catalog selects that table; Enter in the grid
//! loads the next batch.

use std::io::{self, Stdout};
use std::panic::PanicHookInfo;
use std::sync::Arc;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{self, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::backend::QuerySource;
use crate::error::DbpagerError;
use crate::format::{Alignment, CellTag, FormattedCell};
use crate::grid::{GridSink, MemoryGrid};
use crate::navigator::{NavOutcome, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tables,
    Content,
}

pub struct App<Q: QuerySource> {
    navigator: Navigator<Q, MemoryGrid>,
    title: String,
    focus: Focus,
    tables: ListState,
    content: TableState,
    error: Option<String>,
    /// Non-fatal problem with the current selection, shown beside the status.
    warning: Option<String>,
    should_quit: bool,
}

impl<Q: QuerySource> App<Q> {
    pub fn new(navigator: Navigator<Q, MemoryGrid>, title: String) -> Self {
        Self {
            navigator,
            title,
            focus: Focus::Tables,
            tables: ListState::default(),
            content: TableState::default(),
            error: None,
            warning: None,
            should_quit: false,
        }
    }

    pub fn navigator(&self) -> &Navigator<Q, MemoryGrid> {
        &self.navigator
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Highlight and load the first table, if there is one.
    pub fn select_first(&mut self) {
        if !self.navigator.catalog().is_empty() {
            self.highlight_table(0);
        }
    }

    fn highlight_table(&mut self, index: usize) {
        self.tables.select(Some(index));
        self.content = TableState::default();
        let result = self.navigator.select_index(index);
        self.record(result);
        self.warning = self
            .navigator
            .take_count_error()
            .map(|err| format!("row count unavailable: {}", err));
    }

    fn move_table(&mut self, delta: isize) {
        let len = self.navigator.catalog().len();
        if len == 0 {
            return;
        }
        let current = self.tables.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        if self.tables.selected() != Some(next) {
            self.highlight_table(next);
        }
    }

    fn move_row(&mut self, delta: isize) {
        let rows = self.navigator.sink().rows().len();
        if rows == 0 {
            return;
        }
        let current = self.content.selected().unwrap_or(0);
        self.content
            .select(Some(current.saturating_add_signed(delta).min(rows - 1)));
    }

    fn load_more(&mut self) {
        let result = self.navigator.on_load_more_requested();
        self.record(result);
    }

    fn record(&mut self, result: Result<NavOutcome, DbpagerError>) {
        self.error = match result {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::F(1) => self.focus = Focus::Tables,
            KeyCode::F(2) => self.focus = Focus::Content,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Tables => Focus::Content,
                    Focus::Content => Focus::Tables,
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::PageDown => self.move_by(20),
            KeyCode::PageUp => self.move_by(-20),
            KeyCode::Enter if self.focus == Focus::Content => self.load_more(),
            KeyCode::Enter => self.focus = Focus::Content,
            _ => {}
        }
    }

    fn move_by(&mut self, delta: isize) {
        match self.focus {
            Focus::Tables => self.move_table(delta),
            Focus::Content => self.move_row(delta),
        }
    }

    /// Footer text: load progress, or the last error.
    pub fn status_line(&self) -> String {
        if let Some(err) = &self.error {
            return err.clone();
        }
        let summary = match self.navigator.status() {
            Some(status) => status.summary(),
            None => "No tables to browse".to_string(),
        };
        match &self.warning {
            Some(warning) => format!("{} ({})", summary, warning),
            None => summary,
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal setup / teardown
// ---------------------------------------------------------------------------

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err);
    }
    Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| reset_terminal())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
}

fn terminal_error(err: io::Error) -> DbpagerError {
    DbpagerError::Terminal {
        message: err.to_string(),
    }
}

/// Leave raw mode and the alternate screen without a `Terminal` handle.
fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Runs `cleanup` before the previous panic hook while alive. Dropping it
/// puts the previous hook back.
struct PanicHookGuard {
    previous: Arc<PanicHook>,
}

impl PanicHookGuard {
    fn install(cleanup: fn()) -> Self {
        let previous: Arc<PanicHook> = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);
        std::panic::set_hook(Box::new(move |info| {
            cleanup();
            chained(info);
        }));
        Self { previous }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        let previous = Arc::clone(&self.previous);
        std::panic::set_hook(Box::new(move |info| previous(info)));
    }
}

/// Run the browser until the user quits.
pub fn run<Q: QuerySource>(mut app: App<Q>) -> Result<(), DbpagerError> {
    let _hook = PanicHookGuard::install(reset_terminal);

    let mut terminal = setup_terminal().map_err(terminal_error)?;
    app.select_first();

    let result = event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal);
    result
}

fn event_loop<Q: QuerySource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<Q>,
) -> Result<(), DbpagerError> {
    while !app.should_quit {
        terminal
            .draw(|frame| ui(frame, app))
            .map_err(terminal_error)?;
        if let Event::Key(key) = event::read().map_err(terminal_error)?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// UI rendering
// ---------------------------------------------------------------------------

fn ui<Q: QuerySource>(frame: &mut Frame, app: &mut App<Q>) {
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(frame.area());
    let panes = Layout::horizontal([Constraint::Ratio(1, 4), Constraint::Ratio(3, 4)])
        .split(chunks[0]);

    render_tables(frame, app, panes[0]);
    render_content(frame, app, panes[1]);
    render_footer(frame, app, chunks[1]);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::Blue };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_tables<Q: QuerySource>(frame: &mut Frame, app: &mut App<Q>, area: Rect) {
    let items: Vec<ListItem> = app
        .navigator
        .catalog()
        .display_names()
        .into_iter()
        .map(ListItem::new)
        .collect();
    let list = List::new(items)
        .block(pane_block(" Tables (F1) ", app.focus == Focus::Tables))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.tables);
}

fn render_content<Q: QuerySource>(frame: &mut Frame, app: &mut App<Q>, area: Rect) {
    let block = pane_block(" Content (F2) ", app.focus == Focus::Content);
    let grid = app.navigator.sink();
    if grid.current_row_count() == 0 {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    }

    let widths: Vec<Constraint> = column_widths(grid)
        .into_iter()
        .map(Constraint::Length)
        .collect();
    let header = Row::new(grid.header().iter().map(styled_cell));
    let rows: Vec<Row> = grid
        .rows()
        .iter()
        .map(|row| Row::new(row.iter().map(styled_cell)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(table, area, &mut app.content);
}

fn render_footer<Q: QuerySource>(frame: &mut Frame, app: &App<Q>, area: Rect) {
    let status_color = if app.error.is_some() {
        Color::Red
    } else {
        Color::Yellow
    };
    let line = Line::from(vec![
        Span::styled(app.title.as_str(), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(app.status_line(), Style::default().fg(status_color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn column_widths(grid: &MemoryGrid) -> Vec<u16> {
    (0..grid.column_count())
        .map(|i| {
            let header = grid.header().get(i).map_or(0, |c| c.text.chars().count());
            let data = grid
                .rows()
                .iter()
                .map(|row| row.get(i).map_or(0, |c| c.text.chars().count()))
                .max()
                .unwrap_or(0);
            header.max(data).clamp(3, 40) as u16
        })
        .collect()
}

fn styled_cell(cell: &FormattedCell) -> Cell<'_> {
    let alignment = match cell.alignment {
        Alignment::Left => layout::Alignment::Left,
        Alignment::Center => layout::Alignment::Center,
        Alignment::Right => layout::Alignment::Right,
    };
    Cell::from(Line::from(cell.text.as_str()).alignment(alignment))
        .style(Style::default().fg(tag_color(cell.tag)))
}

pub fn tag_color(tag: CellTag) -> Color {
    match tag {
        CellTag::Header => Color::Yellow,
        CellTag::Numeric => Color::Cyan,
        CellTag::Temporal => Color::Magenta,
        CellTag::Binary => Color::Green,
        CellTag::NullMarker => Color::Red,
        CellTag::Plain | CellTag::Unknown => Color::Reset,
    }
}
