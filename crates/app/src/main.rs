//! Storefront CLI: browse the catalog, open a product, try out the cart.
//!
//! Usage: storefront <COMMAND>
//!
//! Commands:
//!   browse     List products, optionally filtered by a search query
//!   show       Show one product's detail page
//!   demo-cart  Add products to a fresh cart and print it

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use storefront_app::{AppError, ProductCardView, ProductDetailView, QuantityEdit, Session};
use storefront_cart::CartView;
use storefront_client::{CatalogClient, ClientConfig};
use storefront_observability::LogFormat;

/// Storefront - product catalog and cart from the command line
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Catalog API base URL (overrides STOREFRONT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print views as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log output format (json or pretty)
    #[arg(long, global = true, default_value = "json")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List products, optionally filtered by a search query
    Browse {
        /// Load pages up to and including this one (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Fuzzy search over title, brand and category
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one product's detail page
    Show {
        /// Product slug
        slug: String,
    },

    /// Add products to a fresh cart and print it
    DemoCart {
        /// Product slugs, one unit each (repeat a slug to add more)
        #[arg(required = true)]
        slugs: Vec<String>,

        /// Set a cart entry's quantity after adding (product id, e.g. p1=3)
        #[arg(long = "set", value_name = "ID=QTY")]
        edits: Vec<QuantityEdit>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.log_format {
        LogFormat::Json => storefront_observability::init(),
        format => storefront_observability::subscriber::init(format),
    }

    let mut config = ClientConfig::from_env().context("invalid STOREFRONT_* configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    let client = CatalogClient::new(&config).context("failed to build catalog client")?;
    let mut session = Session::new(client, &config);

    match cli.command {
        Commands::Browse { page, query } => {
            session.browse().await.context("failed to load products")?;
            for _ in 0..page {
                if session.load_more("").await.context("failed to load more products")? == 0 {
                    break;
                }
            }

            let query = query.unwrap_or_default();
            let cards = session.search(&query);
            if cli.json {
                print_json(&cards)?;
            } else if cards.is_empty() {
                println!("{}", session.feed().empty_message(&query));
            } else {
                print_cards(&cards);
            }
        }
        Commands::Show { slug } => {
            let view = session
                .open_product(&slug)
                .await
                .with_context(|| format!("failed to open product {slug}"))?;
            if cli.json {
                print_json(&view)?;
            } else {
                print_details(&view);
            }
        }
        Commands::DemoCart { slugs, edits } => {
            for slug in &slugs {
                match session.add_by_slug(slug).await {
                    Ok(state) => {
                        tracing::info!(slug = %slug, items = state.item_count(), "added to cart");
                    }
                    Err(e @ AppError::OutOfStock(_)) => {
                        eprintln!("{slug}: {}", e.user_message());
                    }
                    Err(e) => return Err(e).with_context(|| format!("failed to add {slug}")),
                }
            }
            for edit in &edits {
                session
                    .apply_edit(edit)
                    .with_context(|| format!("failed to set quantity of {}", edit.product_id))?;
            }

            let view = session.cart_view();
            if cli.json {
                print_json(&view)?;
            } else {
                print_cart(&view);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn print_cards(cards: &[ProductCardView]) {
    for card in cards {
        let offer = card
            .offer_label
            .as_deref()
            .map(|l| format!(" [{l}]"))
            .unwrap_or_default();
        let rating = card
            .rating
            .as_deref()
            .map(|r| format!(" ★ {r}"))
            .unwrap_or_default();
        println!("{:<48} {:>14}{offer}{rating}  {}", card.title, card.price, card.link);
    }
}

fn print_details(view: &ProductDetailView) {
    println!("{}", view.title);
    if let Some(brand) = &view.brand {
        println!("by {brand}");
    }
    if let Some(label) = &view.label {
        println!("[{label}]");
    }

    match (&view.regular_price, view.discount_percent) {
        (Some(regular), Some(pct)) => println!("{}  (was {regular}, -{pct}%)", view.price),
        _ => println!("{}", view.price),
    }
    if !view.vat_text.is_empty() {
        println!("{}", view.vat_text);
    }
    println!("{}", view.availability);
    for line in &view.delivery {
        println!("  {line}");
    }
    if let Some(rating) = &view.rating {
        println!("Rating: {rating}");
    }
    if !view.categories.is_empty() {
        println!("Categories: {}", view.categories.join(", "));
    }

    println!();
    println!("{}", view.short_description);

    for review in &view.reviews {
        println!();
        let date = review
            .date
            .as_deref()
            .map(|d| format!(" {d}"))
            .unwrap_or_default();
        println!("{} ({}/5){date}", review.author, review.stars);
        if let Some(text) = &review.text {
            println!("  {text}");
        }
    }
    if let Some(more) = &view.more_reviews {
        println!("{more}");
    }

    println!();
    println!("[ {} ]", view.buy_button.label());
}

fn print_cart(view: &CartView) {
    if let Some(message) = view.empty_message() {
        println!("{message}");
        return;
    }
    for line in &view.lines {
        println!(
            "{:<48} {:>3} x {:>12} = {:>12}",
            line.title, line.quantity, line.unit_price, line.line_total
        );
    }
    println!("{} item(s), total {}", view.item_count, view.total);
}
