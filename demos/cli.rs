use clap::{Parser, Subcommand};
use tracking51_client_rs::{
    Config, CreateTrackRequest, Error, StatusStatisticRequest, TrackingClient, TrackingItem,
    TracksQueryParams,
};

#[derive(Parser, Debug)]
#[command(
    name = "tracking51",
    about = "Interact with the 51Tracking v3 API (unofficial)",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(short, long, help = "API key")]
    api_key: String,

    #[arg(long, help = "Use the sandbox API")]
    sandbox: bool,

    #[arg(long, help = "Log requests and responses")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the account profile
    Profile,
    /// List supported couriers
    Couriers {
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Register a tracking number
    Create {
        #[arg(long)]
        number: String,
        #[arg(long)]
        courier: String,
    },
    /// Query tracking records
    Query {
        #[arg(long, help = "Comma-separated tracking numbers")]
        numbers: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Force a refresh of one tracking number
    Refresh {
        #[arg(long)]
        number: String,
        #[arg(long)]
        courier: String,
    },
    /// Show status-count statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::new(&cli.api_key);
    config.sandbox = cli.sandbox;
    config.debug = cli.debug;
    let client = TrackingClient::new(config)?;

    match cli.command {
        Commands::Profile => {
            let profile = client.account().profile().await?;
            println!("Email: {}", profile.email);
            println!("Remaining tracking numbers: {}", profile.track_number);
            println!("Remaining SMS: {}", profile.sms);
        }
        Commands::Couriers { lang } => {
            let couriers = client.courier().list(&lang).await?;
            println!("{} courier(s):", couriers.len());
            for courier in couriers {
                println!("  {} ({})", courier.name, courier.code);
            }
        }
        Commands::Create { number, courier } => {
            let req = CreateTrackRequest {
                tracking_number: number,
                courier_code: courier,
                ..CreateTrackRequest::default()
            };
            let result = client.tracking().create(&req).await?;
            println!(
                "created: {}, failed: {}",
                result.success.len(),
                result.error.len()
            );
        }
        Commands::Query { numbers, status } => {
            let params = TracksQueryParams {
                tracking_numbers: numbers,
                delivery_status: status,
                ..TracksQueryParams::default()
            };
            let page = client.tracking().query(&params).await?;
            println!("{} record(s), last page: {}", page.items.len(), page.is_last_page);
            for track in page.items {
                println!(
                    "  {} [{}] {}",
                    track.tracking_number, track.courier_code, track.origin_info.latest_event
                );
            }
        }
        Commands::Refresh { number, courier } => {
            let items = [TrackingItem {
                tracking_number: number,
                courier_code: courier,
            }];
            let result = client.tracking().refresh(&items).await?;
            for item in result.error {
                println!(
                    "failed: {} ({}: {})",
                    item.item.tracking_number, item.error_code, item.error_message
                );
            }
            for item in result.success {
                println!("refreshed: {}", item.tracking_number);
            }
        }
        Commands::Stats => {
            let stat = client
                .tracking()
                .status_statistic(&StatusStatisticRequest::default())
                .await?;
            println!("pending:      {}", stat.pending);
            println!("transit:      {}", stat.transit);
            println!("pickup:       {}", stat.pickup);
            println!("delivered:    {}", stat.delivered);
            println!("undelivered:  {}", stat.undelivered);
            println!("exception:    {}", stat.exception);
            println!("expired:      {}", stat.expired);
            println!("not found:    {}", stat.not_found);
            println!("info received: {}", stat.info_received);
        }
    }

    Ok(())
}
