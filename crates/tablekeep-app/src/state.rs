// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::{Row, RowId, TableName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    List,
    Editor,
}

/// The two mutually exclusive panels. The editor carries its own data, so an
/// editor without a table (or a list with a stale editor) cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    List,
    Editor(EditorState),
}

impl Panel {
    pub const fn kind(&self) -> PanelKind {
        match self {
            Self::List => PanelKind::List,
            Self::Editor(_) => PanelKind::Editor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableListing {
    #[default]
    Unloaded,
    Tables(Vec<TableName>),
    Failed,
}

impl TableListing {
    pub const FAILED_TEXT: &'static str = "Error fetching tables";

    pub fn tables(&self) -> &[TableName] {
        match self {
            Self::Tables(tables) => tables,
            Self::Unloaded | Self::Failed => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInput {
    pub column: String,
    pub value: String,
}

/// A rendered snapshot row: the fetched values plus the live inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRow {
    pub original: Row,
    pub inputs: Vec<CellInput>,
}

impl EditableRow {
    fn from_row(row: Row) -> Self {
        let inputs = row
            .iter()
            .map(|(column, value)| CellInput {
                column: column.to_owned(),
                value: value.to_owned(),
            })
            .collect();
        Self {
            original: row,
            inputs,
        }
    }

    /// Identity used for deletes. Always read from the fetched row so an
    /// edited `id` input cannot redirect the delete.
    pub fn id(&self) -> Option<RowId> {
        self.original.id()
    }

    pub fn current(&self) -> Row {
        Row::from_pairs(
            self.inputs
                .iter()
                .map(|input| (input.column.as_str(), input.value.as_str())),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorGrid {
    columns: Vec<String>,
    rows: Vec<EditableRow>,
}

impl EditorGrid {
    pub const ACTIONS_HEADER: &'static str = "Actions";

    /// Header columns come from the first row; every row still renders its
    /// own columns.
    pub fn from_snapshot(rows: Vec<Row>) -> Option<Self> {
        let columns = rows
            .first()?
            .columns()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        Some(Self {
            columns,
            rows: rows.into_iter().map(EditableRow::from_row).collect(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn header(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(Self::ACTIONS_HEADER))
            .collect()
    }

    pub fn rows(&self) -> &[EditableRow] {
        &self.rows
    }

    pub fn input(&self, row: usize, column: usize) -> Option<&CellInput> {
        self.rows.get(row)?.inputs.get(column)
    }

    pub fn set_input(&mut self, row: usize, column: usize, value: impl Into<String>) -> bool {
        match self
            .rows
            .get_mut(row)
            .and_then(|row| row.inputs.get_mut(column))
        {
            Some(input) => {
                input.value = value.into();
                true
            }
            None => false,
        }
    }

    /// One mapping per rendered row, in display order.
    pub fn collect_rows(&self) -> Vec<Row> {
        self.rows.iter().map(EditableRow::current).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorBody {
    Grid(EditorGrid),
    NoData,
    FetchFailed(String),
}

impl EditorBody {
    pub const NO_DATA_TEXT: &'static str = "No data available";

    pub fn grid(&self) -> Option<&EditorGrid> {
        match self {
            Self::Grid(grid) => Some(grid),
            Self::NoData | Self::FetchFailed(_) => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut EditorGrid> {
        match self {
            Self::Grid(grid) => Some(grid),
            Self::NoData | Self::FetchFailed(_) => None,
        }
    }

    /// Text of the single placeholder cell shown instead of rows. The cell
    /// always spans exactly one column.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Grid(_) => None,
            Self::NoData => Some(Self::NO_DATA_TEXT.to_owned()),
            Self::FetchFailed(message) => Some(format!("Error fetching table data: {message}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellCursor {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub table: TableName,
    pub body: EditorBody,
    pub cursor: CellCursor,
}

impl EditorState {
    pub fn new(table: TableName, body: EditorBody) -> Self {
        Self {
            table,
            body,
            cursor: CellCursor::default(),
        }
    }

    pub fn with_cursor(mut self, cursor: CellCursor) -> Self {
        self.cursor = cursor;
        self.clamp_cursor();
        self
    }

    pub fn grid(&self) -> Option<&EditorGrid> {
        self.body.grid()
    }

    pub fn selected_row(&self) -> Option<&EditableRow> {
        self.grid()?.rows().get(self.cursor.row)
    }

    pub fn selected_input(&self) -> Option<&CellInput> {
        self.grid()?.input(self.cursor.row, self.cursor.column)
    }

    pub fn move_cursor(&mut self, rows: isize, columns: isize) {
        self.cursor.row = self.cursor.row.saturating_add_signed(rows);
        self.cursor.column = self.cursor.column.saturating_add_signed(columns);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let Some(grid) = self.body.grid() else {
            self.cursor = CellCursor::default();
            return;
        };
        let last_row = grid.rows().len().saturating_sub(1);
        self.cursor.row = self.cursor.row.min(last_row);
        let width = grid
            .rows()
            .get(self.cursor.row)
            .map_or(0, |row| row.inputs.len());
        self.cursor.column = self.cursor.column.min(width.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddTableField {
    #[default]
    TableName,
    Columns,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddTableForm {
    pub table_name: String,
    pub columns: String,
    pub focus: AddTableField,
}

impl AddTableForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AddTableField::TableName => &mut self.table_name,
            AddTableField::Columns => &mut self.columns,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AddTableField::TableName => AddTableField::Columns,
            AddTableField::Columns => AddTableField::TableName,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Uploading,
    Imported(String),
    Rejected(String),
    Failed(String),
}

impl ImportStatus {
    pub fn text(&self) -> String {
        match self {
            Self::Uploading => "Uploading...".to_owned(),
            Self::Imported(message) => message.clone(),
            Self::Rejected(error) => format!("Error: {error}"),
            Self::Failed(message) => format!("Error uploading file: {message}"),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Failed(_))
    }
}

/// Everything the UI draws. Handlers receive it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub panel: Panel,
    pub listing: TableListing,
    pub list_cursor: usize,
    pub listing_loaded_at: Option<OffsetDateTime>,
    pub add_table: Option<AddTableForm>,
    pub import_status: Option<ImportStatus>,
    pub status_line: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            panel: Panel::List,
            listing: TableListing::Unloaded,
            list_cursor: 0,
            listing_loaded_at: None,
            add_table: None,
            import_status: None,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    BackToList,
    ShowAddTableForm,
    HideAddTableForm,
    MoveListCursor(isize),
    MoveCellCursor { rows: isize, columns: isize },
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    PanelChanged(PanelKind),
    AddTableFormShown,
    AddTableFormHidden,
    ListCursorMoved(usize),
    CellCursorMoved(CellCursor),
    StatusUpdated(String),
    StatusCleared,
}

impl ViewState {
    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        match command {
            ViewCommand::BackToList => {
                if self.panel.kind() == PanelKind::List {
                    return Vec::new();
                }
                self.panel = Panel::List;
                vec![ViewEvent::PanelChanged(PanelKind::List)]
            }
            ViewCommand::ShowAddTableForm => {
                if self.add_table.is_none() {
                    self.add_table = Some(AddTableForm::default());
                }
                vec![ViewEvent::AddTableFormShown]
            }
            ViewCommand::HideAddTableForm => {
                self.add_table = None;
                vec![ViewEvent::AddTableFormHidden]
            }
            ViewCommand::MoveListCursor(delta) => {
                let count = self.listing.tables().len();
                if count == 0 {
                    self.list_cursor = 0;
                    return Vec::new();
                }
                self.list_cursor = self
                    .list_cursor
                    .saturating_add_signed(delta)
                    .min(count - 1);
                vec![ViewEvent::ListCursorMoved(self.list_cursor)]
            }
            ViewCommand::MoveCellCursor { rows, columns } => match &mut self.panel {
                Panel::Editor(editor) => {
                    editor.move_cursor(rows, columns);
                    vec![ViewEvent::CellCursorMoved(editor.cursor)]
                }
                Panel::List => Vec::new(),
            },
            ViewCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![ViewEvent::StatusUpdated(message)]
            }
            ViewCommand::ClearStatus => {
                self.status_line = None;
                vec![ViewEvent::StatusCleared]
            }
        }
    }

    pub fn editor(&self) -> Option<&EditorState> {
        match &self.panel {
            Panel::Editor(editor) => Some(editor),
            Panel::List => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorState> {
        match &mut self.panel {
            Panel::Editor(editor) => Some(editor),
            Panel::List => None,
        }
    }

    pub fn selected_table(&self) -> Option<&TableName> {
        self.listing.tables().get(self.list_cursor)
    }

    pub fn set_listing(&mut self, listing: TableListing, loaded_at: OffsetDateTime) {
        self.listing = listing;
        self.listing_loaded_at = Some(loaded_at);
        let count = self.listing.tables().len();
        self.list_cursor = self.list_cursor.min(count.saturating_sub(1));
    }
}
