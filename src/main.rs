use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vendor_admin::config::Settings;
use vendor_admin::services::{VendorBackend, VendorService};
use vendor_admin::ui::render::{render_detail, render_preview, render_table};
use vendor_admin::ui::terminal::{AutoConfirm, ConsoleNotifier, TerminalConfirm};
use vendor_admin::ui::{
    run_row_action, ActionOutcome, Confirm, DocumentSlot, ListingQuery, Navigator, Notifier,
    PreviewModal, RowAction, SearchBox, VendorTable,
};

#[derive(Parser)]
#[command(name = "vendor-admin", version, about = "Review and manage marketplace vendors")]
struct Cli {
    /// Backend base URL, overrides configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Configuration file, without extension
    #[arg(long, global = true, default_value = "config/default")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of the vendor listing
    List {
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show a vendor's details
    Show { id: String },
    /// Search vendors by free text
    Search { query: String },
    /// Approve a pending vendor
    Approve(ActionArgs),
    /// Reject a pending vendor
    Reject(ActionArgs),
    /// Suspend a vendor
    Suspend(ActionArgs),
    /// Delete a vendor and its products
    Delete(ActionArgs),
    /// Preview one of a vendor's documents
    Preview {
        id: String,
        #[arg(value_enum)]
        document: DocumentArg,
        /// Save the document here
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Interactive listing with paging, search and row actions
    Browse {
        /// Starting location, e.g. "q=ada" or "cursor=abc"
        #[arg(long, default_value = "")]
        location: String,
    },
}

#[derive(clap::Args)]
struct ActionArgs {
    id: String,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DocumentArg {
    Incorporation,
    AddressProof,
}

impl From<DocumentArg> for DocumentSlot {
    fn from(arg: DocumentArg) -> Self {
        match arg {
            DocumentArg::Incorporation => DocumentSlot::Incorporation,
            DocumentArg::AddressProof => DocumentSlot::AddressProof,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match (Settings::load(&cli.config), cli.base_url) {
        (Ok(mut settings), Some(base_url)) => {
            settings.api.base_url = base_url;
            settings
        }
        (Ok(settings), None) => settings,
        (Err(e), Some(base_url)) => {
            debug!(error = %e, "No usable configuration, using --base-url only");
            Settings::with_base_url(base_url)
        }
        (Err(e), None) => return Err(e).context("Failed to load configuration"),
    };

    info!(base_url = %settings.api.base_url, "Starting vendor admin");
    let service = VendorService::from_settings(&settings)?;

    match cli.command {
        Command::List { cursor, query } => {
            let location = ListingQuery {
                q: query.filter(|q| !q.is_empty()),
                cursor,
            };
            let mut table = VendorTable::new(location);
            table.refresh(&service).await?;
            print!("{}", render_table(&table));
        }
        Command::Show { id } => {
            let vendor = service.get_vendor(&id).await?;
            print!("{}", render_detail(&vendor));
        }
        Command::Search { query } => {
            let mut table = VendorTable::new(ListingQuery::with_search(&query));
            table.refresh(&service).await?;
            print!("{}", render_table(&table));
        }
        Command::Approve(args) => return Ok(run_action(&service, RowAction::Approve, args).await),
        Command::Reject(args) => return Ok(run_action(&service, RowAction::Reject, args).await),
        Command::Suspend(args) => return Ok(run_action(&service, RowAction::Suspend, args).await),
        Command::Delete(args) => return Ok(run_action(&service, RowAction::Delete, args).await),
        Command::Preview { id, document, out } => {
            preview(&service, &id, document.into(), out).await?;
        }
        Command::Browse { location } => {
            browse(&service, ListingQuery::parse(&location)).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_action(service: &VendorService, action: RowAction, args: ActionArgs) -> ExitCode {
    let confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(TerminalConfirm::default())
    };

    match run_row_action(service, confirm.as_ref(), &ConsoleNotifier, action, &args.id).await {
        ActionOutcome::Failed(_) => ExitCode::FAILURE,
        ActionOutcome::Declined | ActionOutcome::Succeeded => ExitCode::SUCCESS,
    }
}

async fn preview(
    service: &VendorService,
    id: &str,
    slot: DocumentSlot,
    out: Option<PathBuf>,
) -> Result<()> {
    let vendor = service.get_vendor(id).await?;
    let Some(url) = slot.url(&vendor) else {
        bail!("Vendor {} has no {} document", id, slot.title());
    };

    let mut modal = PreviewModal::default();
    modal.open(url);
    print!("{}", render_preview(&modal));

    if let Some(path) = out {
        let bytes = service.fetch_document(url).await?;
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "Saved {} bytes to {}",
            style(bytes.len()).cyan(),
            style(path.display()).cyan()
        );
    }

    modal.close();
    Ok(())
}

#[derive(Clone, Copy)]
enum BrowseChoice {
    Next,
    Previous,
    Search,
    Open,
    Back,
    Forward,
    Quit,
}

impl BrowseChoice {
    fn label(self) -> &'static str {
        match self {
            BrowseChoice::Next => "Next page",
            BrowseChoice::Previous => "Previous page",
            BrowseChoice::Search => "Search",
            BrowseChoice::Open => "Open vendor",
            BrowseChoice::Back => "Back",
            BrowseChoice::Forward => "Forward",
            BrowseChoice::Quit => "Quit",
        }
    }
}

async fn browse(service: &VendorService, start: ListingQuery) -> Result<()> {
    let theme = ColorfulTheme::default();
    let confirm = TerminalConfirm::default();
    let notifier = ConsoleNotifier;
    let mut navigator = Navigator::new(start.clone());
    let mut table = VendorTable::new(start);

    loop {
        if let Err(e) = table.refresh(service).await {
            notifier.error(&e.to_string());
        }
        println!();
        print!("{}", render_table(&table));

        let mut choices = Vec::new();
        if table.can_next_page() {
            choices.push(BrowseChoice::Next);
        }
        if table.can_previous_page() {
            choices.push(BrowseChoice::Previous);
        }
        choices.push(BrowseChoice::Search);
        if !table.rows().is_empty() {
            choices.push(BrowseChoice::Open);
        }
        if navigator.can_go_back() {
            choices.push(BrowseChoice::Back);
        }
        if navigator.can_go_forward() {
            choices.push(BrowseChoice::Forward);
        }
        choices.push(BrowseChoice::Quit);

        let labels: Vec<&str> = choices.iter().map(|choice| choice.label()).collect();
        let selection = Select::with_theme(&theme)
            .with_prompt("Vendors")
            .items(&labels[..])
            .default(0)
            .interact()?;

        match choices[selection] {
            BrowseChoice::Next => {
                if let Some(location) = table.next_page() {
                    navigator.push(location);
                }
            }
            BrowseChoice::Previous => {
                if let Some(location) = table.previous_page() {
                    navigator.push(location);
                }
            }
            BrowseChoice::Search => {
                let mut search = SearchBox::from_location(table.location());
                let input: String = Input::with_theme(&theme)
                    .with_prompt("Search")
                    .with_initial_text(search.input())
                    .allow_empty(true)
                    .interact_text()?;
                search.set_input(input);
                let location = search.submit();
                navigator.push(location.clone());
                table.set_location(location);
            }
            BrowseChoice::Open => {
                let names: Vec<String> = table
                    .rows()
                    .iter()
                    .map(|vendor| format!("{} ({})", vendor.store_name, vendor.email))
                    .collect();
                let row = Select::with_theme(&theme)
                    .with_prompt("Vendor")
                    .items(&names[..])
                    .default(0)
                    .interact()?;
                if let Some(id) = table.open(row).map(str::to_string) {
                    vendor_screen(service, &id, &confirm, &notifier).await?;
                }
            }
            BrowseChoice::Back => {
                if let Some(location) = navigator.back() {
                    table.set_location(location.clone());
                }
            }
            BrowseChoice::Forward => {
                if let Some(location) = navigator.forward() {
                    table.set_location(location.clone());
                }
            }
            BrowseChoice::Quit => return Ok(()),
        }
    }
}

async fn vendor_screen(
    service: &VendorService,
    id: &str,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut modal = PreviewModal::default();

    loop {
        let vendor = match service.get_vendor(id).await {
            Ok(vendor) => vendor,
            Err(e) => {
                notifier.error(&e.to_string());
                return Ok(());
            }
        };
        println!();
        print!("{}", render_detail(&vendor));

        let documents = DocumentSlot::present(&vendor);
        let actions = RowAction::available_for(vendor.status);

        let mut labels: Vec<String> = documents
            .iter()
            .map(|(slot, _)| format!("Preview {}", slot.title()))
            .collect();
        labels.extend(actions.iter().map(|action| action.label().to_string()));
        labels.push("Back to Vendors".to_string());

        let selection = Select::with_theme(&theme)
            .with_prompt(vendor.store_name.as_str())
            .items(&labels[..])
            .default(labels.len() - 1)
            .interact()?;

        if let Some((_, url)) = documents.get(selection) {
            modal.open(url);
            print!("{}", render_preview(&modal));
            Input::<String>::with_theme(&theme)
                .with_prompt("Press enter to close")
                .allow_empty(true)
                .interact_text()?;
            modal.close();
        } else if let Some(action) = actions.get(selection - documents.len()) {
            let outcome = run_row_action(service, confirm, notifier, *action, id).await;
            if *action == RowAction::Delete && outcome == ActionOutcome::Succeeded {
                return Ok(());
            }
        } else {
            return Ok(());
        }
    }
}
