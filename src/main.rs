use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::Parser;

use watchvalue::infrastructure::notify::LogNotifier;
use watchvalue::shared::types::Condition;
use watchvalue::{
    ConfigLoader, EbayBrowseClient, EngineConfig, PricingEngine, PricingInput, QuoteDecision,
    QuoteRequest, ValuationService,
};

#[derive(Parser, Debug)]
#[command(version, about = "Market valuation CLI for luxury watch buyback quotes")]
struct Args {
    /// Watch brand (e.g. Rolex)
    #[arg(long)]
    brand: String,

    /// Reference number (e.g. 126610LN)
    #[arg(long)]
    reference: String,

    /// Condition: NEW_UNWORN, EXCELLENT, VERY_GOOD or GOOD
    #[arg(long, default_value = "EXCELLENT")]
    condition: String,

    /// Original box included
    #[arg(long)]
    has_box: bool,

    /// Original papers included
    #[arg(long)]
    has_papers: bool,

    /// Year of manufacture
    #[arg(long)]
    year: i32,

    /// Dial type (e.g. standard, factory_diamond)
    #[arg(long)]
    dial_type: Option<String>,

    /// Bezel type (e.g. original, aftermarket_only)
    #[arg(long)]
    bezel_type: Option<String>,

    /// Skip the marketplace and price against this base market price (CAD)
    #[arg(long)]
    base_price: Option<f64>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        ConfigLoader::from_file(path)?
    } else {
        EngineConfig::default()
    };

    let condition: Condition = args
        .condition
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let request = QuoteRequest {
        brand: args.brand,
        reference_number: args.reference,
        condition,
        has_box: args.has_box,
        has_papers: args.has_papers,
        has_original_bracelet: true,
        year_of_manufacture: args.year,
        dial_type: args.dial_type,
        bezel_type: args.bezel_type,
    };

    if let Some(base_price) = args.base_price {
        // Offline path: no marketplace call, price the supplied base directly
        let engine = PricingEngine::new(config.pricing.clone());
        let input = PricingInput {
            base_market_price: base_price,
            reference_number: request.reference_number.clone(),
            condition: request.condition,
            has_box: request.has_box,
            has_papers: request.has_papers,
            has_original_bracelet: request.has_original_bracelet,
            year_of_manufacture: request.year_of_manufacture,
            evaluation_year: Utc::now().year(),
            is_high_demand: engine.is_high_demand_brand(&request.brand),
            is_low_demand: false,
            dial_type: request.dial_type.clone(),
            bezel_type: request.bezel_type.clone(),
        };
        println!("{}", engine.calculate_quote(&input));
        return Ok(());
    }

    let min_valid_listings = config.quote.min_valid_listings;
    let source = EbayBrowseClient::from_env(config.marketplace.clone())?;
    let service = ValuationService::new(config, source).with_notifier(Box::new(LogNotifier));

    match service.create_quote(&request).await? {
        QuoteDecision::Offer(quote) => {
            println!("Quote {} for {} {}", quote.id, quote.brand, quote.model);
            println!("{}", quote.breakdown);
            println!("Valid until: {}", quote.valid_until);
        }
        QuoteDecision::InsufficientData {
            valid_listing_count,
        } => {
            println!(
                "Insufficient market data: found only {} comparable sales, need at least {}",
                valid_listing_count, min_valid_listings
            );
        }
    }

    Ok(())
}
