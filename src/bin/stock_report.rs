use chrono::Local;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use stockroom::client::export::csv::CsvExport;
use stockroom::client::export::pdf::PdfExport;
use stockroom::client::export::{Column, Locale};
use stockroom::client::session::SessionGate;
use stockroom::client::{ClientError, Inventory, InventoryApi};
use stockroom::configuration::{get_configuration, ClientSettings};
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inventory dashboard and exports", long_about = None)]
struct Cli {
    /// Service address, defaults to the configured client base url
    #[arg(long)]
    base_url: Option<String>,
    /// pt-BR or en-US
    #[arg(long)]
    locale: Option<Locale>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Pass the password screen
    Login {
        #[arg(short, long)]
        password: String,
    },
    Logout,
    /// Totals, low stock alerts and category distribution
    Summary,
    /// Write the product list as CSV
    Csv {
        #[arg(short, long)]
        output: PathBuf,
        /// Comma separated projection, e.g. name,quantity,min_stock
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<Column>,
    },
    /// Write the product list as PDF
    Pdf {
        #[arg(short, long)]
        output: PathBuf,
    },
}

async fn run(cli: Cli, settings: ClientSettings) -> Result<(), ClientError> {
    let locale = cli.locale.unwrap_or(settings.locale);
    let gate = SessionGate::new(&settings.session_file, &settings.gate_password);

    match &cli.command {
        Commands::Login { password } => {
            if gate.login(password)? {
                println!("Acesso liberado.");
            } else {
                println!("Senha incorreta. Tente novamente!");
            }
            return Ok(());
        }
        Commands::Logout => return gate.logout(),
        _ if !gate.is_authenticated() => {
            println!("Acesso restrito: execute `stock-report login --password <senha>`.");
            return Ok(());
        }
        _ => {}
    }

    let base_url = cli.base_url.unwrap_or(settings.base_url);
    let mut inventory = Inventory::new(InventoryApi::new(&base_url)?);
    inventory.load().await?;

    match cli.command {
        Commands::Summary => {
            let summary = inventory.summary();
            println!("Produtos: {}", summary.total);
            println!(
                "Estoque baixo: {} ({:.1}%)",
                summary.low_stock, summary.low_stock_percentage
            );
            for product in inventory.low_stock() {
                println!(
                    "  {} (Qtd: {} / Min: {})",
                    product.name.as_deref().unwrap_or_default(),
                    product.quantity.unwrap_or_default(),
                    product.min_stock.unwrap_or_default()
                );
            }
            for (category, count) in inventory.category_distribution() {
                println!("{category}: {count}");
            }
        }
        Commands::Csv { output, columns } => {
            let csv = CsvExport::new(locale)
                .with_columns(&columns)
                .render(&inventory.products)?;
            fs::write(&output, csv)?;
            println!("{}", output.display());
        }
        Commands::Pdf { output } => {
            let pdf = PdfExport::new(locale).render(&inventory.products, &Local::now())?;
            fs::write(&output, pdf)?;
            println!("{}", output.display());
        }
        Commands::Login { .. } | Commands::Logout => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();
    let settings = match get_configuration() {
        Ok(settings) => settings.client,
        Err(e) => {
            warn!("using default client settings: {e}");
            ClientSettings::default()
        }
    };
    if let Err(e) = run(cli, settings).await {
        error!("{e}");
        process::exit(1);
    }
}
