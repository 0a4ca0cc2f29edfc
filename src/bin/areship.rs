use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use areship::config::loader::load_config;
use areship::services::order::{CancelOrderRequest, OrderQueryRequest, OrderReference};
use areship::utils::logging::{self, LogLevel};
use areship::Client;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "ARESHIP_CONFIG", default_value = "areship.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a token can be obtained
    Token,
    /// Account code, balance and registered senders
    UserInfo,
    QueryOrder {
        #[arg(long)]
        order_code: Option<String>,
        #[arg(long)]
        reference_no: Option<String>,
    },
    Label {
        #[arg(long)]
        order_code: Option<String>,
        #[arg(long)]
        reference_no: Option<String>,
    },
    CancelOrder {
        #[arg(long)]
        order_code: Option<String>,
        #[arg(long)]
        reference_no: Option<String>,
    },
    /// Generate a scan form for tracking numbers sharing one sender address
    ScanForm {
        #[arg(required = true)]
        tracking_numbers: Vec<String>,
    },
}

#[derive(Serialize)]
struct TokenStatus {
    acquired: bool,
    expires_at: String,
}

fn reference(order_code: Option<String>, reference_no: Option<String>) -> OrderReference {
    OrderReference {
        order_code: order_code.unwrap_or_default(),
        reference_no: reference_no.unwrap_or_default(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args.config).with_context(|| format!("loading {}", args.config))?;
    logging::run(&config, args.log_level);

    let client = Client::new(config)?;
    info!("areship {} ready", areship::utils::constants::VERSION);

    match args.command {
        Command::Token => {
            let token = client
                .token_manager()
                .resolve(&Default::default())
                .await
                .context("authentication failed")?;
            print_json(&TokenStatus {
                acquired: true,
                expires_at: token.expires_at().to_rfc3339(),
            })?;
        }
        Command::UserInfo => print_json(&client.users().info().await?)?,
        Command::QueryOrder { order_code, reference_no } => {
            if order_code.is_none() && reference_no.is_none() {
                bail!("either --order-code or --reference-no is required");
            }
            let request = OrderQueryRequest::by_number(order_code, reference_no);
            print_json(&client.orders().query(&request).await?)?;
        }
        Command::Label { order_code, reference_no } => {
            let request = reference(order_code, reference_no);
            print_json(&client.shipping_labels().detail(&request).await?)?;
        }
        Command::CancelOrder { order_code, reference_no } => {
            let request: CancelOrderRequest = reference(order_code, reference_no);
            print_json(&client.orders().cancel(&request).await?)?;
        }
        Command::ScanForm { tracking_numbers } => {
            print_json(&client.scan_forms().create(&tracking_numbers).await?)?;
        }
    }

    Ok(())
}
