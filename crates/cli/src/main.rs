//! Stall CLI - drive the storefront widgets from the command line.
//!
//! Each invocation is one page load: records are read from the file store,
//! one event is handled, and the updated records are written back.
//!
//! # Usage
//!
//! ```bash
//! # Upload a product
//! stall upload --name Bag --price 5000 --image bag.png
//!
//! # Click "Add to Cart" on product 1712345678901
//! stall add 1712345678901
//!
//! # Show the rendered gallery or cart
//! stall gallery
//! stall cart
//!
//! # Place the order
//! stall checkout --name "Ada Obi" --address "12 Marina, Lagos"
//!
//! # Step a 3-slide carousel, then let autoplay run for 2 ticks
//! stall carousel --slides 3 --next 4 --autoplay 2
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stall_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "stall")]
#[command(author, version, about = "Stall storefront widgets")]
struct Cli {
    /// Root directory of the file store (overrides `STALL_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Origin the records are scoped to (overrides `STALL_ORIGIN`)
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the product upload form
    Upload {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product price in Naira
        #[arg(short, long, allow_hyphen_values = true)]
        price: String,

        /// Image file to embed
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// MIME type of the image (guessed from the extension if omitted)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Click "Add to Cart" for a product
    Add {
        /// Product ID as shown on the card's `data-id`
        id: String,
    },
    /// Print the rendered product gallery
    Gallery,
    /// Print the rendered cart and total
    Cart,
    /// Submit the order form
    Checkout {
        /// Full name for the order
        #[arg(short, long)]
        name: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,
    },
    /// Drive a carousel
    Carousel {
        /// Number of slides in the slide container
        #[arg(short, long)]
        slides: usize,

        /// Click "next" this many times
        #[arg(long, default_value_t = 0)]
        next: usize,

        /// Then click "previous" this many times
        #[arg(long, default_value_t = 0)]
        previous: usize,

        /// Then wait for this many autoplay advances
        #[arg(long, default_value_t = 0)]
        autoplay: usize,
    },
    /// Remove the stored products and cart for the origin
    Reset,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stall_storefront=info,stall_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }

    match cli.command {
        Commands::Upload {
            name,
            price,
            image,
            mime,
        } => commands::catalog::upload(&config, name, price, image, mime).await?,
        Commands::Add { id } => commands::cart::add(&config, &id)?,
        Commands::Gallery => commands::catalog::gallery(&config)?,
        Commands::Cart => commands::cart::show(&config)?,
        Commands::Checkout { name, address } => {
            commands::cart::checkout(&config, name, address)?;
        }
        Commands::Carousel {
            slides,
            next,
            previous,
            autoplay,
        } => commands::carousel::run(&config, slides, next, previous, autoplay).await?,
        Commands::Reset => commands::cart::reset(&config)?,
    }
    Ok(())
}
