use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::error::StoreError;
use crate::form::{InvoiceForm, Submitted};
use crate::models::{ClientRoster, InvoiceId};
use crate::store::RecordStore;
use crate::ui::components::popup::render_popup;
use crate::validation::InvoiceField;

pub enum InvoiceFormAction {
    Cancel,
    Submit,
}

// Represents the add/edit invoice screen
pub struct InvoiceFormState {
    pub form: InvoiceForm,
    roster: ClientRoster,
    current_field: InvoiceField,
    editing: bool,
    active_input: String,
    show_error: Option<String>,
}

impl InvoiceFormState {
    pub fn new(roster: ClientRoster) -> Self {
        Self {
            form: InvoiceForm::new(),
            roster,
            current_field: InvoiceField::InvoiceNumber,
            editing: false,
            active_input: String::new(),
            show_error: None,
        }
    }

    pub fn roster(&self) -> &ClientRoster {
        &self.roster
    }

    pub fn current_field(&self) -> InvoiceField {
        self.current_field
    }

    pub fn is_editing_field(&self) -> bool {
        self.editing
    }

    pub fn error_message(&self) -> Option<&str> {
        self.show_error.as_deref()
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.show_error = Some(message.into());
    }

    /// Load an existing invoice and put the cursor back on the first field
    pub fn begin_edit(&mut self, store: &RecordStore, id: InvoiceId) -> Result<(), StoreError> {
        self.form.begin_edit(store, id)?;
        self.reset_cursor();
        Ok(())
    }

    pub fn submit(&mut self, store: &mut RecordStore) -> Result<Submitted, StoreError> {
        let outcome = self.form.submit(store)?;
        self.reset_cursor();
        Ok(outcome)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
        self.reset_cursor();
    }

    fn reset_cursor(&mut self) {
        self.current_field = InvoiceField::InvoiceNumber;
        self.editing = false;
        self.active_input.clear();
        self.show_error = None;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            InvoiceField::InvoiceNumber => InvoiceField::ClientName,
            InvoiceField::ClientName => InvoiceField::ItemName,
            InvoiceField::ItemName => InvoiceField::Quantity,
            InvoiceField::Quantity => InvoiceField::Amount,
            InvoiceField::Amount => InvoiceField::InvoiceNumber,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            InvoiceField::InvoiceNumber => InvoiceField::Amount,
            InvoiceField::ClientName => InvoiceField::InvoiceNumber,
            InvoiceField::ItemName => InvoiceField::ClientName,
            InvoiceField::Quantity => InvoiceField::ItemName,
            InvoiceField::Amount => InvoiceField::Quantity,
        };
    }

    pub fn next_client(&mut self) {
        let next = self.roster.next_after(&self.form.draft.client_name).to_string();
        self.form.draft.client_name = next;
    }

    pub fn previous_client(&mut self) {
        let previous = self.roster.previous_before(&self.form.draft.client_name).to_string();
        self.form.draft.client_name = previous;
    }

    fn start_editing(&mut self) {
        match self.current_field {
            // the client is picked from the roster, never typed
            InvoiceField::ClientName => self.next_client(),
            InvoiceField::Quantity => {
                self.active_input = input_for(self.form.draft.quantity);
                self.editing = true;
            }
            InvoiceField::Amount => {
                self.active_input = input_for(self.form.draft.amount);
                self.editing = true;
            }
            InvoiceField::InvoiceNumber | InvoiceField::ItemName => {
                self.editing = true;
            }
        }
    }

    /// Leave field editing, parsing numeric input first. Unparseable numbers
    /// keep the field open and raise an error popup.
    fn finish_editing(&mut self) {
        let target = match self.current_field {
            InvoiceField::Quantity => &mut self.form.draft.quantity,
            InvoiceField::Amount => &mut self.form.draft.amount,
            _ => {
                self.editing = false;
                return;
            }
        };

        match parse_number(&self.active_input) {
            Some(value) => {
                *target = value;
                self.active_input.clear();
                self.editing = false;
            }
            None => {
                let name = self.current_field.label().to_lowercase();
                self.show_error = Some(format!("Invalid {}. Please enter a valid number.", name));
            }
        }
    }

    fn abandon_editing(&mut self) {
        self.active_input.clear();
        self.editing = false;
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field_value = match self.current_field {
            InvoiceField::InvoiceNumber => &mut self.form.draft.invoice_number,
            InvoiceField::ItemName => &mut self.form.draft.item_name,
            InvoiceField::Quantity | InvoiceField::Amount => {
                match key {
                    KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                        self.active_input.push(c);
                    }
                    KeyCode::Backspace => {
                        self.active_input.pop();
                    }
                    _ => {}
                }
                return;
            }
            InvoiceField::ClientName => return,
        };

        match key {
            KeyCode::Char(c) => {
                field_value.push(c);
            }
            KeyCode::Backspace => {
                field_value.pop();
            }
            _ => {}
        }
    }

    fn display_value(&self, field: InvoiceField) -> String {
        let draft = &self.form.draft;
        let editing_this = self.editing && self.current_field == field;
        let cursor = if editing_this { "|" } else { "" };

        match field {
            InvoiceField::InvoiceNumber => format!("{}{}", draft.invoice_number, cursor),
            InvoiceField::ItemName => format!("{}{}", draft.item_name, cursor),
            InvoiceField::ClientName => {
                if draft.client_name.is_empty() {
                    "< Select a client >".to_string()
                } else {
                    format!("< {} >", draft.client_name)
                }
            }
            InvoiceField::Quantity if editing_this => format!("{}|", self.active_input),
            InvoiceField::Amount if editing_this => format!("{}|", self.active_input),
            InvoiceField::Quantity => draft.quantity.to_string(),
            InvoiceField::Amount => draft.amount.to_string(),
        }
    }
}

fn input_for(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Empty input reads as zero, which validation then rejects.
fn parse_number(input: &str) -> Option<f64> {
    if input.is_empty() {
        return Some(0.0);
    }
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn render_invoice_form<B: Backend>(frame: &mut Frame<B>, state: &mut InvoiceFormState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),  // Title
                Constraint::Min(10),    // Form
                Constraint::Length(3),  // Help
            ]
            .as_ref(),
        )
        .split(size);

    let title_text = if state.form.is_editing() {
        "Edit Invoice"
    } else {
        "Add Invoice"
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_form(frame, state, chunks[1]);

    let submit_label = if state.form.is_editing() {
        "Save Changes"
    } else {
        "Add Invoice"
    };
    let help_text = match (state.editing, state.current_field) {
        (true, InvoiceField::Quantity | InvoiceField::Amount) => {
            "Enter - Save number | Esc - Discard input".to_string()
        }
        (true, _) => "Enter - Save field | Esc - Stop editing".to_string(),
        (false, InvoiceField::ClientName) => format!(
            "Left/Right - Choose client | Up/Down - Navigate fields | S - {} | Esc - Cancel",
            submit_label
        ),
        (false, _) => format!(
            "Enter - Edit field | Up/Down - Navigate fields | S - {} | Esc - Cancel",
            submit_label
        ),
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);

    if let Some(error) = &state.show_error {
        render_popup(frame, size, "Error", error, "Press any key to continue", Color::Red);
    }
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &mut InvoiceFormState, area: Rect) {
    let errors = state.form.errors();

    let mut items: Vec<ListItem> = InvoiceField::ALL
        .iter()
        .map(|&field| {
            let selected = field == state.current_field;
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value_style = if selected && state.editing {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(format!("{}: ", field.label()), label_style),
                Span::styled(state.display_value(field), value_style),
            ];
            if let Some(message) = errors.get(field) {
                spans.push(Span::styled(format!("  {}", message), Style::default().fg(Color::Red)));
            }

            ListItem::new(Spans::from(spans))
        })
        .collect();

    items.push(ListItem::new(""));
    items.push(ListItem::new(format!("Total: {:.2}", state.form.draft.total())));

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Invoice Details"));

    frame.render_widget(form_list, area);
}

pub fn handle_input(state: &mut InvoiceFormState) -> Result<Option<InvoiceFormAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }

    Ok(None)
}

pub fn handle_key(state: &mut InvoiceFormState, key: KeyCode) -> Option<InvoiceFormAction> {
    // Any key dismisses the error popup
    if state.show_error.take().is_some() {
        return None;
    }

    match key {
        KeyCode::Esc => {
            if state.editing {
                state.abandon_editing();
            } else {
                return Some(InvoiceFormAction::Cancel);
            }
        }
        KeyCode::Enter => {
            if state.editing {
                state.finish_editing();
            } else {
                state.start_editing();
            }
        }
        KeyCode::Up if !state.editing => {
            state.previous_field();
        }
        KeyCode::Down | KeyCode::Tab if !state.editing => {
            state.next_field();
        }
        KeyCode::Left if !state.editing && state.current_field == InvoiceField::ClientName => {
            state.previous_client();
        }
        KeyCode::Right if !state.editing && state.current_field == InvoiceField::ClientName => {
            state.next_client();
        }
        KeyCode::Char('s') if !state.editing => {
            return Some(InvoiceFormAction::Submit);
        }
        _ if state.editing => {
            state.edit_current_field(key);
        }
        _ => {}
    }

    None
}
