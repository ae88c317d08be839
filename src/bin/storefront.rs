//! Command-line front end for the storefront client.
//!
//! ```text
//! cargo run --features cli --bin storefront -- products --category 3 --in-stock
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use storefront_client::accounts::Registration;
use storefront_client::auth::{FileStore, TokenStorage};
use storefront_client::catalog::ProductQuery;
use storefront_client::config::ClientOptions;
use storefront_client::orders::OrderFilter;
use storefront_client::Storefront;

#[derive(Parser, Debug)]
#[command(name = "storefront", version)]
#[command(about = "Browse the catalog, manage the cart and inspect orders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin. Defaults to BACKEND_BASE_URL or http://localhost:8000.
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token to use instead of the stored one
    #[arg(long)]
    token: Option<String>,

    /// Directory holding the stored token and PKCE verifier.
    /// Defaults to $HOME/.storefront.
    #[arg(long)]
    state_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List products
    Products {
        #[arg(long, default_value = "1")]
        page: u32,
        /// Category id
        #[arg(long)]
        category: Option<u64>,
        /// Only products with stock
        #[arg(long)]
        in_stock: bool,
    },
    /// Show one product
    Product { slug: String },
    /// List categories
    Categories,
    /// List products in a category
    CategoryProducts { category_id: u64 },
    /// Show the cart
    Cart,
    /// Add a product to the cart
    Add {
        product_id: u64,
        #[arg(long, default_value = "1")]
        qty: u32,
    },
    /// Remove a cart line
    Remove { item_id: u64 },
    /// Check out the cart
    Checkout,
    /// List orders
    Orders {
        #[arg(long)]
        status: Option<String>,
        /// Lower bound on creation date (YYYY-MM-DD or ISO 8601)
        #[arg(long)]
        since: Option<String>,
    },
    /// Show the signed-in user
    Whoami,
    /// Change profile fields of the signed-in user
    UpdateProfile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        street_address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Print the URL to open in a browser to sign in
    LoginUrl {
        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Trade the code from the login callback for a stored token
    Exchange {
        code: String,
        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Forget the stored token
    Logout,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn state_dir(cli: &Cli) -> PathBuf {
    cli.state_dir.clone().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".storefront")
    })
}

fn redirect_uri(options: &ClientOptions, given: Option<String>) -> anyhow::Result<String> {
    given
        .or_else(|| options.default_redirect_uri())
        .context("pass --redirect-uri or set FRONTEND_BASE_URL")
}

async fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut options = ClientOptions::from_env()?;
    if let Some(base_url) = &cli.base_url {
        options = options.with_base_url(base_url);
    }

    let dir = state_dir(&cli);
    let tokens = TokenStorage::new(
        Arc::new(FileStore::new(dir.join("tokens.json"))),
        Arc::new(FileStore::new(dir.join("session.json"))),
    );

    let mut shop = Storefront::new_with_options(options, tokens)?;
    if let Some(token) = &cli.token {
        shop = shop.with_auth(token);
    }

    match cli.command {
        Commands::Products {
            page,
            category,
            in_stock,
        } => {
            let mut query = ProductQuery::new().page(page).in_stock_only(in_stock);
            if let Some(category) = category {
                query = query.category(category);
            }
            print_json(&shop.catalog().fetch_products(&query).await?)?;
        }
        Commands::Product { slug } => {
            print_json(&shop.catalog().fetch_product_by_slug(&slug).await?)?;
        }
        Commands::Categories => print_json(&shop.catalog().fetch_categories().await?)?,
        Commands::CategoryProducts { category_id } => {
            print_json(&shop.catalog().fetch_products_by_category(category_id).await?)?;
        }
        Commands::Cart => print_json(&shop.cart().fetch_cart().await?)?,
        Commands::Add { product_id, qty } => {
            print_json(&shop.cart().add_to_cart(product_id, qty).await?)?;
        }
        Commands::Remove { item_id } => {
            print_json(&shop.cart().remove_from_cart(item_id).await?)?;
        }
        Commands::Checkout => print_json(&shop.cart().checkout().await?)?,
        Commands::Orders { status, since } => {
            let mut filter = OrderFilter::new();
            if let Some(status) = status {
                filter = filter.status(status);
            }
            if let Some(since) = since {
                filter = filter.created_after(&since);
            }
            print_json(&shop.orders().fetch_orders(&filter).await?)?;
        }
        Commands::Whoami => match shop.accounts().fetch_current_user().await? {
            Some(profile) => print_json(&profile)?,
            None => println!("Not signed in."),
        },
        Commands::UpdateProfile {
            email,
            first_name,
            last_name,
            phone,
            street_address,
            city,
            state,
            postal_code,
            country,
        } => {
            let mut profile = shop
                .accounts()
                .fetch_current_user()
                .await?
                .context("not signed in")?;
            let changes = [
                (&mut profile.email, email),
                (&mut profile.first_name, first_name),
                (&mut profile.last_name, last_name),
                (&mut profile.phone, phone),
                (&mut profile.street_address, street_address),
                (&mut profile.city, city),
                (&mut profile.state, state),
                (&mut profile.postal_code, postal_code),
                (&mut profile.country, country),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    *field = value;
                }
            }
            print_json(&shop.accounts().update_profile(&profile).await?)?;
        }
        Commands::Register {
            username,
            password,
            email,
        } => {
            let registration = Registration::new(&username, &password).with_email(&email);
            print_json(&shop.accounts().register(&registration).await?)?;
        }
        Commands::LoginUrl { redirect_uri: given } => {
            let redirect = redirect_uri(shop.options(), given)?;
            let request = shop.oauth().begin_authorization(&redirect)?;
            println!("{}", request.url);
        }
        Commands::Exchange {
            code,
            redirect_uri: given,
        } => {
            let redirect = redirect_uri(shop.options(), given)?;
            let token = shop.oauth().exchange_code(&code, &redirect).await?;
            println!(
                "Signed in (scope: {}).",
                token.scope.as_deref().unwrap_or("unknown")
            );
        }
        Commands::Logout => {
            shop.logout()?;
            println!("Signed out.");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
