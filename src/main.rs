use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::{info, warn};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use invoice_form::config;
use invoice_form::error::StoreError;
use invoice_form::form::Submitted;
use invoice_form::logging;
use invoice_form::models::ClientRoster;
use invoice_form::store::RecordStore;
use invoice_form::ui::{
    invoices::{InvoicesState, InvoiceAction, render_invoices, handle_input as handle_invoices_input},
    invoice_form::{InvoiceFormState, InvoiceFormAction, render_invoice_form, handle_input as handle_invoice_form_input},
};

/// Terminal form for creating, editing, searching and listing invoices
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Client names to choose from, comma separated
    #[arg(long, value_delimiter = ',')]
    clients: Option<Vec<String>>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// Represents the current screen in the app
#[derive(Debug, Clone, Copy, PartialEq)]
enum AppScreen {
    Invoices,
    InvoiceForm,
}

// Main application state
struct AppState {
    store: RecordStore,
    screen: AppScreen,
    invoices_state: InvoicesState,
    invoice_form_state: InvoiceFormState,
}

impl AppState {
    fn new(store: RecordStore, roster: ClientRoster) -> Self {
        Self {
            store,
            screen: AppScreen::Invoices,
            invoices_state: InvoicesState::new(),
            invoice_form_state: InvoiceFormState::new(roster),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?.with_overrides(cli.clients, cli.log_file);
    let roster = config.roster()?;
    logging::init(config.log_file.as_deref())?;
    info!(clients = roster.len(), "starting invoice form");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(RecordStore::new(), roster);

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = result {
        println!("Error: {}", err);
    }

    info!(invoices = app_state.store.len(), "session ended");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        // Render current screen
        terminal.draw(|f| match app_state.screen {
            AppScreen::Invoices => {
                render_invoices(f, &mut app_state.invoices_state, &app_state.store);
            }
            AppScreen::InvoiceForm => {
                render_invoice_form(f, &mut app_state.invoice_form_state);
            }
        })?;

        // Handle input for current screen
        let should_quit = match app_state.screen {
            AppScreen::Invoices => {
                let action = handle_invoices_input(&mut app_state.invoices_state, &app_state.store)?;
                apply_invoice_action(app_state, action)
            }
            AppScreen::InvoiceForm => {
                let action = handle_invoice_form_input(&mut app_state.invoice_form_state)?;
                apply_invoice_form_action(app_state, action);
                false
            }
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

/// Returns true when the app should exit
fn apply_invoice_action(app_state: &mut AppState, action: Option<InvoiceAction>) -> bool {
    match action {
        Some(InvoiceAction::Quit) => {
            return true;
        }
        Some(InvoiceAction::NewInvoice) => {
            // A new invoice always starts from a blank draft
            app_state.invoice_form_state.cancel();
            app_state.screen = AppScreen::InvoiceForm;
        }
        Some(InvoiceAction::EditInvoice(id)) => {
            match app_state.invoice_form_state.begin_edit(&app_state.store, id) {
                Ok(()) => app_state.screen = AppScreen::InvoiceForm,
                Err(err) => app_state.invoices_state.set_notice(notice_for(&err)),
            }
        }
        Some(InvoiceAction::DeleteInvoice(id)) => {
            // Confirmed in the list screen before reaching here
            app_state.store.remove(id);
        }
        None => {}
    }

    false
}

fn apply_invoice_form_action(app_state: &mut AppState, action: Option<InvoiceFormAction>) {
    match action {
        Some(InvoiceFormAction::Cancel) => {
            app_state.invoice_form_state.cancel();
            app_state.screen = AppScreen::Invoices;
        }
        Some(InvoiceFormAction::Submit) => {
            match app_state.invoice_form_state.submit(&mut app_state.store) {
                Ok(Submitted::Added(id)) | Ok(Submitted::Updated(id)) => {
                    info!(id = id.0, "invoice saved");
                    app_state.screen = AppScreen::Invoices;
                }
                // Errors are drawn next to their fields
                Err(StoreError::Validation(_)) => {}
                Err(err @ StoreError::NotFound(_)) => {
                    warn!(%err, "saved invoice disappeared");
                    app_state.invoice_form_state.show_error(notice_for(&err));
                }
            }
        }
        None => {}
    }
}

fn notice_for(err: &StoreError) -> String {
    match err {
        StoreError::NotFound(id) => format!("Invoice {} no longer exists.", id),
        StoreError::Validation(errors) => errors.to_string(),
    }
}
