//! Storefront Application CLI
//!
//! Operator tasks that do not belong on the HTTP surface: provisioning
//! customers and issuing or revoking API tokens.

use std::process;

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;
use uuid::Uuid;

use storefront_app::{
    auth::{ApiTokenUuid, AuthService, PgAuthService},
    database::{self, Db},
    domain::customers::{
        CustomersService, PgCustomersService,
        models::{CustomerRole, CustomerUuid, NewCustomer},
    },
};

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Customer(CustomerCommand),
    Token(TokenCommand),
}

#[derive(Debug, Args)]
struct CustomerCommand {
    #[command(subcommand)]
    command: CustomerSubcommand,
}

#[derive(Debug, Subcommand)]
enum CustomerSubcommand {
    Create(CreateCustomerArgs),
}

#[derive(Debug, Args)]
struct CreateCustomerArgs {
    /// Customer email address
    #[arg(long)]
    email: String,

    /// Customer display name
    #[arg(long)]
    name: String,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Debug, Args)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(CreateTokenArgs),
    Revoke(RevokeTokenArgs),
}

#[derive(Debug, Args)]
struct CreateTokenArgs {
    /// Customer UUID that should own the token
    #[arg(long)]
    customer_uuid: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Debug, Args)]
struct RevokeTokenArgs {
    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Customer(CustomerCommand {
            command: CustomerSubcommand::Create(args),
        }) => create_customer(args).await,
        Commands::Token(TokenCommand {
            command: TokenSubcommand::Create(args),
        }) => create_token(args).await,
        Commands::Token(TokenCommand {
            command: TokenSubcommand::Revoke(args),
        }) => revoke_token(args).await,
    }
}

async fn create_customer(args: CreateCustomerArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;

    let role = if args.admin {
        CustomerRole::Admin
    } else {
        CustomerRole::Customer
    };

    let customer = PgCustomersService::new(db)
        .create_customer(NewCustomer {
            email: args.email,
            name: args.name,
            role,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("customer_email: {}", customer.email);
    println!("customer_role: {}", customer.role);

    Ok(())
}

async fn create_token(args: CreateTokenArgs) -> Result<(), String> {
    let token_expires_at = parse_token_expires_at(args.token_expires_at.as_deref())?;

    if let Some(expires_at) = token_expires_at.as_ref()
        && *expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let db = connect(&args.database_url).await?;

    let issued = PgAuthService::new(db)
        .issue_api_token(CustomerUuid::from_uuid(args.customer_uuid), token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("customer_uuid: {}", issued.metadata.customer_uuid);
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn revoke_token(args: RevokeTokenArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;

    PgAuthService::new(db)
        .revoke_api_token(ApiTokenUuid::from_uuid(args.token_uuid))
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    println!("token_uuid: {}", args.token_uuid);
    println!("revoked");

    Ok(())
}

async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}

fn parse_token_expires_at(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid token-expires-at timestamp: {error}"))
    })
    .transpose()
}
