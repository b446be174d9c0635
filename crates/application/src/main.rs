//! Shop entry point: loads an optional snapshot and prints the catalog.

use std::process::ExitCode;

use application::{Config, create_default_state, seed};
use domain::PriceFormat;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Load configuration
    let config = Config::from_env();

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Create repositories and services
    let state = create_default_state();

    // 4. Seed from the snapshot file, if any
    if let Some(path) = &config.seed_file {
        match seed::load_file(path, &state).await {
            Ok(summary) => tracing::info!(
                path = %path.display(),
                users = summary.users,
                products = summary.products,
                carts = summary.carts,
                "seeded"
            ),
            Err(error) => {
                tracing::error!(path = %path.display(), %error, "failed to seed");
                return ExitCode::FAILURE;
            }
        }
    }

    // 5. Print the catalog
    let products = match state.catalog.list_products().await {
        Ok(products) => products,
        Err(error) => {
            tracing::error!(%error, "failed to list products");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        locale = %config.locale,
        currency = %config.currency.code(),
        count = products.len(),
        "catalog"
    );
    for product in &products {
        println!("{} ({})", product.title(), product.id());
        for variant in product.variants() {
            let price = variant
                .price()
                .format(PriceFormat::Long, config.locale, config.currency);
            println!("  - {}: {}", variant.name(), price);
        }
    }

    ExitCode::SUCCESS
}
