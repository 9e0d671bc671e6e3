use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use eco_scan::commands::{CommandHandler, OutputOptions};
use eco_scan::config::AppConfig;
use eco_scan::food::config::FoodConfig;
use eco_scan::food::lookup::ProductQuery;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Look up food products and estimate their CO2 footprint", long_about = None)]
struct Args {
    /// Look up a product by barcode and exit
    #[arg(long, conflicts_with_all = ["search", "scan"])]
    barcode: Option<String>,

    /// Look up the first product matching a name and exit
    #[arg(long, conflicts_with = "scan")]
    search: Option<String>,

    /// Read a barcode from the scanner, look it up and exit
    #[arg(long)]
    scan: bool,

    /// Scanner device (repeatable); "stdin" reads from the terminal
    #[arg(long = "device")]
    devices: Vec<String>,

    /// Write the results page and open it in the browser
    #[arg(long)]
    open: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let food_config = FoodConfig::from_env()?;
    let config = AppConfig::from_env().with_devices(&args.devices);
    let output = OutputOptions {
        json: args.json,
        open: args.open,
    };

    let mut handler = CommandHandler::new(food_config, config, output)?;

    let one_shot = if let Some(code) = &args.barcode {
        Some(handler.run_query(ProductQuery::Barcode(code.clone())).await)
    } else if let Some(name) = &args.search {
        Some(handler.run_query(ProductQuery::Name(name.clone())).await)
    } else if args.scan {
        Some(handler.scan().await)
    } else {
        None
    };

    match one_shot {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => {
            eprintln!("{}", e.red());
            std::process::exit(1);
        }
        None => run_cli_mode(&mut handler).await,
    }
}

async fn run_cli_mode(handler: &mut CommandHandler) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Show initial help menu
    handler.handle_command("help").await?;

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("🔎 ") {
            Ok(line) => {
                let input = line.trim();
                let _ = rl.add_history_entry(input);

                if let Err(e) = handler.handle_command(input).await {
                    println!("{}", e.red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
