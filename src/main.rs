use clap::Parser;
use miette::{IntoDiagnostic, Result};
use printbeat::application::checkout::{
    CheckoutOrchestrator, PaymentMethod, PaymentStatus, Selection,
};
use printbeat::config::CheckoutConfig;
use printbeat::domain::cart::CartState;
use printbeat::domain::ports::NullView;
use printbeat::domain::shipping::Address;
use printbeat::error::CheckoutError;
use printbeat::infrastructure::in_memory::InMemoryChargeGateway;
use printbeat::interfaces::csv::product_reader::ProductReader;
use printbeat::interfaces::csv::summary_writer::{SummaryRecord, SummaryWriter};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cart CSV file with an `id,name,price,image_url` header (prices in cents)
    input: PathBuf,

    /// Checkout configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Customer to charge. Overrides the configured customer.
    #[arg(long)]
    customer: Option<String>,

    /// Shipping destination country code (e.g. US)
    #[arg(long)]
    country: Option<String>,

    /// Shipping method identifier. Defaults to the destination's default method.
    #[arg(long, requires = "country")]
    shipping: Option<String>,

    /// Make the charge backend decline with this message
    #[arg(long)]
    decline: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CheckoutConfig::load(cli.config.as_deref()).into_diagnostic()?;
    if let Some(customer) = cli.customer {
        config.customer_id = customer;
    }
    let settings = config.settings().into_diagnostic()?;
    let formatter = settings.formatter.clone();

    // Build the cart
    let mut cart = CartState::new(config.processing_fee);
    let file = File::open(&cli.input).into_diagnostic()?;
    for product in ProductReader::new(file).products() {
        match product {
            Ok(product) => cart.add_item(product),
            Err(e) => eprintln!("Error reading product: {}", e),
        }
    }

    let gateway = InMemoryChargeGateway::new();
    if let Some(message) = cli.decline {
        gateway.fail_next(message).await;
    }

    let mut checkout = CheckoutOrchestrator::new(Box::new(gateway), Box::new(NullView), settings);
    checkout.open(&cart);

    if let Some(country) = cli.country {
        let address = Address::in_country(country);
        let quote = checkout.shipping_address_changed(&address).into_diagnostic()?;
        let method = match cli.shipping {
            Some(identifier) => checkout
                .settings()
                .rates
                .method(&address, &identifier)
                .into_diagnostic()?,
            None => quote.default,
        };
        let selection = Selection {
            payment_method: Some(PaymentMethod::new("Card")),
            shipping_method: Some(method),
        };
        checkout
            .selection_changed(&mut cart, &selection)
            .into_diagnostic()?;
    }

    // Captured before a successful charge clears the cart
    let totals = cart.totals().into_diagnostic()?;
    let record = match checkout.submit(&mut cart).await {
        Ok(receipt) => {
            checkout.did_finish(PaymentStatus::Success, None);
            SummaryRecord::new(&totals, &formatter, "succeeded", receipt.charge_id)
        }
        Err(e @ CheckoutError::EmptyCart) => {
            SummaryRecord::new(&totals, &formatter, "empty", e.to_string())
        }
        Err(e) => {
            let detail = e.to_string();
            checkout.did_finish(PaymentStatus::Error, Some(&detail));
            SummaryRecord::new(&totals, &formatter, "failed", detail)
        }
    };

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write(&record).into_diagnostic()?;

    Ok(())
}
