use anyhow::Result;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use orderlens::config::{Config, DatabaseBackend};
use orderlens::models::{DeliveryDetails, Order, OrderStatus, RestaurantSnapshot};
use orderlens::storage::{OrderStore, PostgresStorage, SqliteStorage, StorageError};
use rand::RngExt;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "orderlens-admin")]
#[command(about = "Orderlens order-store management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with randomized demo orders
    Seed {
        /// Number of orders to create
        #[arg(long, default_value_t = 50)]
        orders: usize,
        /// Spread orders over this many days before now
        #[arg(long, default_value_t = 90)]
        days: i64,
    },
    /// Print the total number of orders in the store
    Count,
    /// Print the creation time of the oldest order
    Earliest,
}

const CITIES: &[&str] = &["London", "Manchester", "Leeds", "Bristol", "Glasgow"];

const RESTAURANTS: &[(&str, &str, &[&str])] = &[
    ("rest-bella", "Bella Napoli", &["Italian", "Pizza"]),
    ("rest-sakura", "Sakura House", &["Japanese", "Sushi"]),
    ("rest-tandoor", "Tandoor Palace", &["Indian", "Curry"]),
    ("rest-elgreco", "El Greco", &["Greek"]),
    ("rest-wok", "Golden Wok", &["Chinese", "Noodles"]),
];

const STATUSES: &[OrderStatus] = &[
    OrderStatus::Placed,
    OrderStatus::Paid,
    OrderStatus::InProgress,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

fn demo_order(days: i64) -> Order {
    let mut rng = rand::rng();

    let (restaurant_id, restaurant_name, cuisines) =
        RESTAURANTS[rng.random_range(0..RESTAURANTS.len())];
    let city = CITIES[rng.random_range(0..CITIES.len())];
    let customer = rng.random_range(1..=20u32);

    let age = Duration::days(rng.random_range(0..days.max(1)))
        + Duration::seconds(rng.random_range(0..86_400));

    Order {
        id: format!("ord-{:012x}", rng.random_range(0..u64::MAX)),
        created_at: Utc::now() - age,
        total_amount: Some(rng.random_range(500..8_000)),
        status: STATUSES[rng.random_range(0..STATUSES.len())],
        customer_id: Some(format!("user-{customer}")),
        delivery: Some(DeliveryDetails {
            name: format!("Customer {customer}"),
            city: Some(city.to_string()),
        }),
        restaurant: Some(RestaurantSnapshot {
            id: restaurant_id.to_string(),
            name: restaurant_name.to_string(),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store: Arc<dyn OrderStore> = match config.database.backend {
        DatabaseBackend::Sqlite => Arc::new(
            SqliteStorage::new(&config.database.url, config.database.max_connections).await?,
        ),
        DatabaseBackend::Postgres => Arc::new(PostgresStorage::new(&config.database.url).await?),
    };

    // Ensure database is initialized
    store.init().await?;

    match cli.command {
        Commands::Seed { orders, days } => {
            let mut seeded = 0usize;
            for _ in 0..orders {
                match store.insert(&demo_order(days)).await {
                    Ok(()) => seeded += 1,
                    Err(StorageError::Conflict) => continue,
                    Err(StorageError::Other(e)) => return Err(e),
                }
            }
            println!("✓ Seeded {} demo orders across the last {} days", seeded, days);
        }
        Commands::Count => {
            let count = store.count_orders().await?;
            println!("{} orders in store", count);
        }
        Commands::Earliest => match store.earliest_order_created_at().await? {
            Some(created_at) => println!("Earliest order created at {}", created_at.to_rfc3339()),
            None => println!("Store is empty."),
        },
    }

    Ok(())
}
