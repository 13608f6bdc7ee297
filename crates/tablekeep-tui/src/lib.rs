// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::buffer::Buffer;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use std::io;
use std::path::Path;
use tablekeep_app::{
    AddTableField, AddTableForm, EditorBody, EditorGrid, EditorState, ImportStatus, Notifier,
    Panel, PanelKind, Row as TableRow, SpreadsheetUpload, TableListing, TableName, TableService,
    ViewCommand, ViewState, ViewSynchronizer, ID_COLUMN,
};
use time::OffsetDateTime;
use tracing::warn;

const PAGE_ROWS: isize = 10;
const LIST_ACTIONS: &str = "[e]dit  [d]elete";
const ROW_ACTIONS: &str = "[x] delete";
const CURSOR_MARK: &str = "▏";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    ImportSpreadsheet,
    InsertRow,
    AlterTable,
}

impl FormKind {
    const fn title(self) -> &'static str {
        match self {
            Self::ImportSpreadsheet => "import spreadsheet",
            Self::InsertRow => "add row",
            Self::AlterTable => "alter table",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormField {
    label: String,
    value: String,
}

impl FormField {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormOverlay {
    kind: FormKind,
    fields: Vec<FormField>,
    focus: usize,
}

impl FormOverlay {
    fn import_spreadsheet() -> Self {
        Self {
            kind: FormKind::ImportSpreadsheet,
            fields: vec![FormField::new("file (.xlsx path)")],
            focus: 0,
        }
    }

    /// One field per snapshot column; `id` is left to the backend.
    fn insert_row(grid: &EditorGrid) -> Self {
        Self {
            kind: FormKind::InsertRow,
            fields: grid
                .columns()
                .iter()
                .filter(|column| column.as_str() != ID_COLUMN)
                .map(FormField::new)
                .collect(),
            focus: 0,
        }
    }

    fn alter_table() -> Self {
        Self {
            kind: FormKind::AlterTable,
            fields: vec![FormField::new("alter (e.g. ADD COLUMN age INTEGER)")],
            focus: 0,
        }
    }

    fn focused_mut(&mut self) -> Option<&mut String> {
        self.fields
            .get_mut(self.focus)
            .map(|field| &mut field.value)
    }

    fn move_focus(&mut self, delta: isize) {
        if self.fields.is_empty() {
            return;
        }
        let len = self.fields.len() as isize;
        self.focus = (self.focus as isize + delta).rem_euclid(len) as usize;
    }

    fn first_value(&self) -> &str {
        self.fields
            .first()
            .map_or("", |field| field.value.trim())
    }

    /// Filled-in fields only, so omitted columns take their backend defaults.
    fn row_values(&self) -> TableRow {
        TableRow::from_pairs(
            self.fields
                .iter()
                .filter(|field| !field.value.is_empty())
                .map(|field| (field.label.as_str(), field.value.as_str())),
        )
    }
}

/// Terminal-only state that never leaves this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct UiData {
    form: Option<FormOverlay>,
    cell_edit: Option<String>,
    help_visible: bool,
}

pub fn run_app<S: TableService>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut ui = UiData::default();
    sync.load_table_list(view);

    let mut result = Ok(());
    let mut backdrop = Buffer::empty(Rect::default());
    loop {
        match terminal.draw(|frame| render(frame, view, &ui)) {
            Ok(completed) => backdrop = completed.buffer.clone(),
            Err(error) => {
                result = Err(error).context("draw frame");
                break;
            }
        }

        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                let mut prompt = TerminalPrompt {
                    terminal: &mut terminal,
                    backdrop: &backdrop,
                };
                if handle_key_event(view, sync, &mut ui, &mut prompt, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Modal confirm/acknowledge dialogs that block until a key is pressed.
///
/// The view is mutably borrowed by the handler that raised the dialog, so
/// the popup is drawn over `backdrop`, the last full frame.
struct TerminalPrompt<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: &'a Buffer,
}

impl<B: Backend> TerminalPrompt<'_, B> {
    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        let backdrop = self.backdrop;
        self.terminal
            .draw(|frame| {
                if backdrop.area == frame.area() {
                    frame.buffer_mut().merge(backdrop);
                }
                let area = centered_rect(60, 30, frame.area());
                frame.render_widget(Clear, area);
                let dialog = Paragraph::new(body.to_owned())
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .title(title.to_owned())
                            .borders(Borders::ALL)
                            .style(Style::default().fg(Color::Cyan)),
                    );
                frame.render_widget(dialog, area);
            })
            .context("draw prompt")?;
        Ok(())
    }

    fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read().context("read prompt key")? {
                return Ok(key);
            }
        }
    }
}

impl<B: Backend> Notifier for TerminalPrompt<'_, B> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if let Err(error) = self.show("confirm", &format!("{prompt}\n\n[y] yes   [n] no")) {
            warn!(error = %format!("{error:#}"), "confirm prompt failed");
            return false;
        }
        loop {
            match self.next_key() {
                Ok(key) => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Err(error) => {
                    warn!(error = %format!("{error:#}"), "confirm prompt failed");
                    return false;
                }
            }
        }
    }

    fn notify(&mut self, message: &str) {
        let shown = self
            .show("notice", &format!("{message}\n\npress any key"))
            .and_then(|()| self.next_key().map(|_| ()));
        if let Err(error) = shown {
            warn!(error = %format!("{error:#}"), notice = message, "notice prompt failed");
        }
    }
}

fn handle_key_event<S: TableService, N: Notifier>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
    ui: &mut UiData,
    prompt: &mut N,
    key: KeyEvent,
) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
    {
        return true;
    }

    if ui.cell_edit.is_some() {
        handle_cell_edit_key(view, ui, key);
        return false;
    }
    if view.add_table.is_some() {
        handle_add_table_key(view, sync, prompt, key);
        return false;
    }
    if ui.form.is_some() {
        handle_form_key(view, sync, ui, prompt, key);
        return false;
    }
    if ui.help_visible {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            ui.help_visible = false;
        }
        return false;
    }
    if key.code == KeyCode::Char('?') {
        ui.help_visible = true;
        return false;
    }

    view.dispatch(ViewCommand::ClearStatus);
    match view.panel.kind() {
        PanelKind::List => handle_list_key(view, sync, ui, prompt, key),
        PanelKind::Editor => handle_editor_key(view, sync, ui, prompt, key),
    }
}

fn handle_list_key<S: TableService, N: Notifier>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
    ui: &mut UiData,
    prompt: &mut N,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => {
            view.dispatch(ViewCommand::MoveListCursor(-1));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view.dispatch(ViewCommand::MoveListCursor(1));
        }
        KeyCode::PageUp => {
            view.dispatch(ViewCommand::MoveListCursor(-PAGE_ROWS));
        }
        KeyCode::PageDown => {
            view.dispatch(ViewCommand::MoveListCursor(PAGE_ROWS));
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(table) = view.selected_table().cloned() {
                sync.open_table_editor(view, &table);
            }
        }
        KeyCode::Char('d') => {
            if let Some(table) = view.selected_table().cloned() {
                sync.delete_table(view, prompt, &table);
            }
        }
        KeyCode::Char('a') => {
            view.dispatch(ViewCommand::ShowAddTableForm);
        }
        KeyCode::Char('i') => {
            ui.form = Some(FormOverlay::import_spreadsheet());
        }
        KeyCode::Char('r') => {
            sync.load_table_list(view);
            view.dispatch(ViewCommand::SetStatus("table list reloaded".to_owned()));
        }
        _ => {}
    }
    false
}

fn handle_editor_key<S: TableService, N: Notifier>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
    ui: &mut UiData,
    prompt: &mut N,
    key: KeyEvent,
) -> bool {
    let Some(editor) = view.editor() else {
        return false;
    };
    let table = editor.table.clone();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => move_cell(view, -1, 0),
        KeyCode::Down | KeyCode::Char('j') => move_cell(view, 1, 0),
        KeyCode::Left | KeyCode::Char('h') => move_cell(view, 0, -1),
        KeyCode::Right | KeyCode::Char('l') => move_cell(view, 0, 1),
        KeyCode::PageUp => move_cell(view, -PAGE_ROWS, 0),
        KeyCode::PageDown => move_cell(view, PAGE_ROWS, 0),
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(input) = editor.selected_input() {
                ui.cell_edit = Some(input.value.clone());
            }
        }
        KeyCode::Char('s') => sync.save_table_changes(view, prompt),
        KeyCode::Char('x') => match editor.selected_row().map(|row| row.id()) {
            Some(Some(row_id)) => sync.delete_row_and_reload(view, prompt, &table, &row_id),
            Some(None) => {
                view.dispatch(ViewCommand::SetStatus(
                    "row has no id column; cannot delete".to_owned(),
                ));
            }
            None => {}
        },
        KeyCode::Char('n') => match editor.grid() {
            Some(grid) => ui.form = Some(FormOverlay::insert_row(grid)),
            None => {
                view.dispatch(ViewCommand::SetStatus(
                    "no columns known for an empty table; reload after adding data".to_owned(),
                ));
            }
        },
        KeyCode::Char('t') => ui.form = Some(FormOverlay::alter_table()),
        KeyCode::Char('r') => sync.open_table_editor(view, &table),
        KeyCode::Esc | KeyCode::Char('b') => {
            view.dispatch(ViewCommand::BackToList);
        }
        _ => {}
    }
    false
}

fn move_cell(view: &mut ViewState, rows: isize, columns: isize) {
    view.dispatch(ViewCommand::MoveCellCursor { rows, columns });
}

fn handle_cell_edit_key(view: &mut ViewState, ui: &mut UiData, key: KeyEvent) {
    let Some(buffer) = ui.cell_edit.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => ui.cell_edit = None,
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(ch) => buffer.push(ch),
        KeyCode::Enter => {
            let value = ui.cell_edit.take().unwrap_or_default();
            let Some(editor) = view.editor_mut() else {
                return;
            };
            let cursor = editor.cursor;
            let column = editor
                .selected_input()
                .map(|input| input.column.clone())
                .unwrap_or_default();
            let changed = editor
                .body
                .grid_mut()
                .is_some_and(|grid| grid.set_input(cursor.row, cursor.column, value));
            if changed {
                view.dispatch(ViewCommand::SetStatus(format!(
                    "{column} edited; press s to save"
                )));
            }
        }
        _ => {}
    }
}

fn handle_add_table_key<S: TableService, N: Notifier>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
    prompt: &mut N,
    key: KeyEvent,
) {
    let Some(form) = view.add_table.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            view.dispatch(ViewCommand::HideAddTableForm);
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
        KeyCode::Backspace => {
            form.focused_mut().pop();
        }
        KeyCode::Char(ch) => form.focused_mut().push(ch),
        KeyCode::Enter => {
            let table = TableName::new(form.table_name.clone());
            let columns = form.columns.clone();
            sync.create_table(view, prompt, &table, &columns);
        }
        _ => {}
    }
}

fn handle_form_key<S: TableService, N: Notifier>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
    ui: &mut UiData,
    prompt: &mut N,
    key: KeyEvent,
) {
    let Some(form) = ui.form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => ui.form = None,
        KeyCode::Tab | KeyCode::Down => form.move_focus(1),
        KeyCode::BackTab | KeyCode::Up => form.move_focus(-1),
        KeyCode::Backspace => {
            if let Some(value) = form.focused_mut() {
                value.pop();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(value) = form.focused_mut() {
                value.push(ch);
            }
        }
        KeyCode::Enter => {
            if let Some(form) = ui.form.take() {
                submit_form(view, sync, ui, prompt, form);
            }
        }
        _ => {}
    }
}

fn submit_form<S: TableService, N: Notifier>(
    view: &mut ViewState,
    sync: &mut ViewSynchronizer<S>,
    ui: &mut UiData,
    prompt: &mut N,
    form: FormOverlay,
) {
    match form.kind {
        FormKind::ImportSpreadsheet => {
            let path = form.first_value();
            if path.is_empty() {
                // Nothing chosen yet; keep the form open.
                ui.form = Some(form);
                return;
            }
            match SpreadsheetUpload::from_path(Path::new(path)) {
                Ok(upload) => sync.import_spreadsheet(view, &upload),
                Err(error) => {
                    view.import_status = Some(ImportStatus::Failed(format!("{error:#}")));
                }
            }
        }
        FormKind::InsertRow => {
            if let Some(table) = view.editor().map(|editor| editor.table.clone()) {
                sync.insert_row(view, prompt, &table, &form.row_values());
            }
        }
        FormKind::AlterTable => {
            let alter_query = form.first_value();
            if alter_query.is_empty() {
                ui.form = Some(form);
                return;
            }
            if let Some(table) = view.editor().map(|editor| editor.table.clone()) {
                sync.alter_table(view, prompt, &table, alter_query);
            }
        }
    }
}

fn render(frame: &mut ratatui::Frame<'_>, view: &ViewState, ui: &UiData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(title_text(view))
        .block(Block::default().title("tablekeep").borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, layout[0]);

    match &view.panel {
        Panel::List => render_list(frame, layout[1], view),
        Panel::Editor(editor) => render_editor(frame, layout[1], editor, ui),
    }

    let status = Paragraph::new(status_text(view, ui))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(form) = &view.add_table {
        let area = centered_rect(64, 30, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(render_add_table_text(form))
            .block(Block::default().title("add table").borders(Borders::ALL));
        frame.render_widget(overlay, area);
    }

    if let Some(form) = &ui.form {
        let area = centered_rect(64, 50, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(render_form_text(form))
            .block(Block::default().title(form.kind.title()).borders(Borders::ALL));
        frame.render_widget(overlay, area);
    }

    if ui.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_list(frame: &mut ratatui::Frame<'_>, area: Rect, view: &ViewState) {
    let import_height = if view.import_status.is_some() { 3 } else { 0 };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(import_height)])
        .split(area);

    let header = Row::new(["Table", "Actions"].map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let rows = list_rows(&view.listing)
        .into_iter()
        .enumerate()
        .map(|(index, cells)| {
            let style = match &view.listing {
                TableListing::Failed => Style::default().fg(Color::Red),
                _ if index == view.list_cursor => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
            Row::new(cells).style(style)
        });

    let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(20)])
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .title(list_title(view))
                .borders(Borders::ALL),
        );
    // The selection scrolls the table so the cursor row stays on screen.
    let selected = match &view.listing {
        TableListing::Tables(tables) if !tables.is_empty() => Some(view.list_cursor),
        _ => None,
    };
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, sections[0], &mut state);

    if let Some(status) = &view.import_status {
        let color = if status.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        let widget = Paragraph::new(status.text())
            .style(Style::default().fg(color))
            .block(Block::default().title("import").borders(Borders::ALL));
        frame.render_widget(widget, sections[1]);
    }
}

fn render_editor(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    editor: &EditorState,
    ui: &UiData,
) {
    let block = Block::default()
        .title(format!("{} (s save, b back)", editor.table))
        .borders(Borders::ALL);

    let Some(grid) = editor.grid() else {
        let text = editor.body.placeholder().unwrap_or_default();
        let style = match editor.body {
            EditorBody::FetchFailed(_) => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        let table = Table::new([Row::new([Cell::from(text)]).style(style)], [Constraint::Min(1)])
            .block(block);
        frame.render_widget(table, area);
        return;
    };

    let header_labels = grid.header();
    let header = Row::new(header_labels.iter().map(|label| {
        Cell::from((*label).to_owned()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let widths = vec![Constraint::Min(6); header_labels.len()];

    let rows = editor_rows(editor, ui.cell_edit.as_deref())
        .into_iter()
        .enumerate()
        .map(|(row_index, cells)| {
            let selected_row = row_index == editor.cursor.row;
            let cells = cells
                .into_iter()
                .enumerate()
                .map(|(column_index, text)| {
                    let mut style = Style::default();
                    if selected_row {
                        style = style.bg(Color::DarkGray);
                    }
                    if selected_row && column_index == editor.cursor.column {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                    }
                    Cell::from(text).style(style)
                })
                .collect::<Vec<_>>();
            Row::new(cells)
        });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    let mut state = TableState::default().with_selected(Some(editor.cursor.row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn list_rows(listing: &TableListing) -> Vec<Vec<String>> {
    match listing {
        TableListing::Unloaded => Vec::new(),
        TableListing::Tables(tables) => tables
            .iter()
            .map(|table| vec![table.to_string(), LIST_ACTIONS.to_owned()])
            .collect(),
        TableListing::Failed => vec![vec![TableListing::FAILED_TEXT.to_owned()]],
    }
}

/// Cell text per rendered row, with the in-progress edit shown in place.
fn editor_rows(editor: &EditorState, cell_edit: Option<&str>) -> Vec<Vec<String>> {
    let Some(grid) = editor.grid() else {
        return editor
            .body
            .placeholder()
            .map(|text| vec![vec![text]])
            .unwrap_or_default();
    };
    grid.rows()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            row.inputs
                .iter()
                .enumerate()
                .map(|(column_index, input)| {
                    let editing = row_index == editor.cursor.row
                        && column_index == editor.cursor.column;
                    match cell_edit {
                        Some(buffer) if editing => format!("{buffer}{CURSOR_MARK}"),
                        _ => input.value.clone(),
                    }
                })
                .chain(std::iter::once(ROW_ACTIONS.to_owned()))
                .collect()
        })
        .collect()
}

fn title_text(view: &ViewState) -> String {
    match &view.panel {
        Panel::List => "tables".to_owned(),
        Panel::Editor(editor) => format!("tables > {}", editor.table),
    }
}

fn list_title(view: &ViewState) -> String {
    let count = view.listing.tables().len();
    match view.listing_loaded_at {
        Some(loaded_at) => format!("{count} tables, loaded {}", format_clock(loaded_at)),
        None => format!("{count} tables"),
    }
}

fn format_clock(at: OffsetDateTime) -> String {
    at.format(&time::macros::format_description!(
        "[hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| "now".to_owned())
}

fn status_text(view: &ViewState, ui: &UiData) -> String {
    let hints = if ui.cell_edit.is_some() {
        "type to edit | enter keep | esc discard"
    } else if view.add_table.is_some() || ui.form.is_some() {
        "tab field | enter submit | esc cancel"
    } else {
        match view.panel.kind() {
            PanelKind::List => "j/k move | enter edit | d drop | a add | i import | r reload | ? help",
            PanelKind::Editor => {
                "h/j/k/l move | enter edit cell | s save | x delete row | n add row | t alter | b back | ? help"
            }
        }
    };
    match &view.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn render_add_table_text(form: &AddTableForm) -> String {
    let marker = |field: AddTableField| if form.focus == field { ">" } else { " " };
    format!(
        "{} table name: {}\n{} columns:    {}\n\ncolumns are passed to the server as written,\nfor example: id INTEGER PRIMARY KEY, name TEXT",
        marker(AddTableField::TableName),
        form.table_name,
        marker(AddTableField::Columns),
        form.columns,
    )
}

fn render_form_text(form: &FormOverlay) -> String {
    if form.fields.is_empty() {
        return "no editable columns".to_owned();
    }
    form.fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let marker = if index == form.focus { ">" } else { " " };
            format!("{marker} {}: {}", field.label, field.value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
list: j/k move | enter/e edit table | d drop table | a add table | i import .xlsx | r reload | q quit\n\
editor: h/j/k/l move | enter/e edit cell | s save all rows | x delete row | n add row | t alter table | r reload | b/esc back\n\
cell edit: type | backspace | enter keep | esc discard\n\
forms: tab/shift+tab field | enter submit | esc cancel\n\
dialogs: y/n confirm | any key dismiss"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
