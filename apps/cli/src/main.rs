use std::fmt::Write as _;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_catering_companies, CompanyCard, CompanyViewState, HttpCompanyDirectory, ViewPhase,
};
use shared::domain::{CompanyId, ContextId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Backend base URL; falls back to CATERING_BACKEND_URL.
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long)]
    organization_id: String,
    /// Accepted for parity with the desktop view; not used for filtering.
    #[arg(long)]
    user_role: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one card per catering company, optionally filtered by name.
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Print the detail view of one company from the loaded list.
    Show { company_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let backend_url = cli
        .backend_url
        .or_else(|| std::env::var("CATERING_BACKEND_URL").ok())
        .unwrap_or_default();
    tracing::debug!(
        organization_id = %cli.organization_id,
        user_role = cli.user_role.as_deref().unwrap_or("-"),
        "loading catering companies"
    );

    let mut view = CompanyViewState::new();
    let Some(ticket) = view.sync_context(&ContextId::new(cli.organization_id)) else {
        bail!("no load was started");
    };
    let result = load_catering_companies(&HttpCompanyDirectory::new(backend_url)).await;
    view.complete_load(&ticket, result);
    if let Some(message) = view.error() {
        bail!("{message}");
    }

    match cli.command {
        Command::List { search } => {
            view.set_search(search);
            print!("{}", render_list(&view));
        }
        Command::Show { company_id } => {
            let id = CompanyId::new(company_id);
            if !view.open_details(&id) {
                bail!("company {id} is not in the loaded catering list");
            }
            if let Some(company) = view.dialog_company() {
                print!("{}", render_details(&CompanyCard::from_company(company)));
            }
        }
    }

    Ok(())
}

fn render_list(view: &CompanyViewState) -> String {
    let phase = view.phase();
    if phase != ViewPhase::HasResults {
        return format!("{}\n", phase.message().unwrap_or_default());
    }

    let mut out = String::new();
    for company in view.visible_companies() {
        let card = CompanyCard::from_company(company);
        let _ = writeln!(out, "{} ({}) [{}]", card.title, card.handle, card.status_label());
        if let Some(phone) = &card.phone {
            let _ = writeln!(out, "  phone: {phone}");
        }
        if let Some(address) = &card.address {
            let _ = writeln!(out, "  address: {address}");
        }
        if let Some(total) = card.total_count() {
            let _ = writeln!(out, "  headcount: {total}");
        }
        let _ = writeln!(out, "  created: {}", card.created_on);
    }
    out
}

fn render_details(card: &CompanyCard) -> String {
    let mut out = format!("{}\n", card.title);
    for (label, value) in card.detail_rows() {
        let _ = writeln!(out, "  {label:<10} {value}");
    }
    out
}
