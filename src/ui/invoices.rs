use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{InvoiceId, InvoiceRecord};
use crate::projection::{project, ViewFilter};
use crate::store::RecordStore;
use crate::ui::components::popup::render_popup;

const DELETE_PROMPT: &str = "Are you sure you want to delete this invoice?";

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FilterField {
    ClientName,
    InvoiceNumber,
}

// Represents the state of the invoice table screen
pub struct InvoicesState {
    filter: ViewFilter,
    table_state: TableState,
    filter_focus: Option<FilterField>,
    pending_delete: Option<InvoiceId>,
    notice: Option<String>,
}

impl InvoicesState {
    pub fn new() -> Self {
        Self {
            filter: ViewFilter::default(),
            table_state: TableState::default(),
            filter_focus: None,
            pending_delete: None,
            notice: None,
        }
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn pending_delete(&self) -> Option<InvoiceId> {
        self.pending_delete
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Keep the selection inside a projection of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (Some(i), len) if i >= len => Some(len - 1),
            (Some(i), _) => Some(i),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_invoice_id(&self, records: &[InvoiceRecord]) -> Option<InvoiceId> {
        let view = project(records, &self.filter);
        self.table_state
            .selected()
            .and_then(|i| view.get(i))
            .map(|record| record.id())
    }

    fn edit_filter(&mut self, field: FilterField, key: KeyCode) {
        let value = match field {
            FilterField::ClientName => &mut self.filter.client_name,
            FilterField::InvoiceNumber => &mut self.filter.invoice_number,
        };

        match key {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }

        // the old row index means nothing in the new projection
        self.table_state.select(Some(0));
    }
}

impl Default for InvoicesState {
    fn default() -> Self {
        Self::new()
    }
}

pub enum InvoiceAction {
    Quit,
    NewInvoice,
    EditInvoice(InvoiceId),
    // Only emitted once the user confirmed the prompt
    DeleteInvoice(InvoiceId),
}

pub fn render_invoices<B: Backend>(frame: &mut Frame<B>, state: &mut InvoicesState, store: &RecordStore) {
    let size = frame.size();
    let view = project(store.list(), &state.filter);
    state.clamp_selection(view.len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    // Search and sort bar
    let focused = |field: FilterField| {
        if state.filter_focus == Some(field) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let cursor = |field: FilterField| if state.filter_focus == Some(field) { "|" } else { "" };
    let search = Paragraph::new(Spans::from(vec![
        Span::styled("Client: ", focused(FilterField::ClientName)),
        Span::raw(format!("{}{}", state.filter.client_name, cursor(FilterField::ClientName))),
        Span::raw("   "),
        Span::styled("Number: ", focused(FilterField::InvoiceNumber)),
        Span::raw(format!("{}{}", state.filter.invoice_number, cursor(FilterField::InvoiceNumber))),
        Span::raw("   "),
        Span::styled("Sort: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.filter.sort.label()),
    ]))
    .block(Block::default().title("Search and Filter").borders(Borders::ALL));
    frame.render_widget(search, chunks[0]);

    let title = format!("Invoices ({} of {})", view.len(), store.len());
    if view.is_empty() {
        let empty = Paragraph::new("No invoices found.")
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, chunks[1]);
    } else {
        let header_cells = ["Number", "Client", "Item", "Total", "Date"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
        let header = Row::new(header_cells)
            .style(Style::default())
            .height(1)
            .bottom_margin(1);

        let rows = view.iter().map(|invoice| {
            let cells = vec![
                Cell::from(invoice.invoice_number().to_string()),
                Cell::from(invoice.client_name().to_string()),
                Cell::from(invoice.item_name().to_string()),
                Cell::from(format!("{:.2}", invoice.total())),
                Cell::from(invoice.created_at().format("%Y-%m-%d").to_string()),
            ];

            Row::new(cells).height(1)
        });

        let table = Table::new(rows)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .widths(&[
                Constraint::Percentage(15),
                Constraint::Percentage(20),
                Constraint::Percentage(30),
                Constraint::Percentage(15),
                Constraint::Percentage(20),
            ]);

        frame.render_stateful_widget(table, chunks[1], &mut state.table_state);
    }

    let buttons_text = if state.filter_focus.is_some() {
        "Type to search | <Enter>/<Esc> Done"
    } else if state.table_state.selected().is_some() {
        "<N> New | <E> Edit | <D> Delete | <C> Client search | <I> Number search | <O> Sort | <Q> Quit"
    } else {
        "<N> New | <C> Client search | <I> Number search | <O> Sort | <Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[2]);

    if state.pending_delete.is_some() {
        render_popup(frame, size, "Delete Invoice", DELETE_PROMPT, "<Y> Yes | <N> No", Color::Yellow);
    } else if let Some(notice) = &state.notice {
        render_popup(frame, size, "Notice", notice, "Press any key to continue", Color::Red);
    }
}

pub fn handle_input(state: &mut InvoicesState, store: &RecordStore) -> Result<Option<InvoiceAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, store.list(), key.code));
    }

    Ok(None)
}

pub fn handle_key(state: &mut InvoicesState, records: &[InvoiceRecord], key: KeyCode) -> Option<InvoiceAction> {
    if state.notice.take().is_some() {
        return None;
    }

    // The confirmation prompt swallows every other key
    if let Some(id) = state.pending_delete {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.pending_delete = None;
                return Some(InvoiceAction::DeleteInvoice(id));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.pending_delete = None;
            }
            _ => {}
        }
        return None;
    }

    if let Some(field) = state.filter_focus {
        match key {
            KeyCode::Enter | KeyCode::Esc => state.filter_focus = None,
            _ => state.edit_filter(field, key),
        }
        return None;
    }

    let len = project(records, &state.filter).len();
    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            return Some(InvoiceAction::Quit);
        }
        KeyCode::Char('n') => {
            return Some(InvoiceAction::NewInvoice);
        }
        KeyCode::Char('e') => {
            if let Some(id) = state.selected_invoice_id(records) {
                return Some(InvoiceAction::EditInvoice(id));
            }
        }
        KeyCode::Char('d') => {
            state.pending_delete = state.selected_invoice_id(records);
        }
        KeyCode::Char('c') => {
            state.filter_focus = Some(FilterField::ClientName);
        }
        KeyCode::Char('i') => {
            state.filter_focus = Some(FilterField::InvoiceNumber);
        }
        KeyCode::Char('o') => {
            state.filter.sort = state.filter.sort.toggle();
        }
        KeyCode::Down => {
            state.next(len);
        }
        KeyCode::Up => {
            state.previous(len);
        }
        _ => {}
    }

    None
}
