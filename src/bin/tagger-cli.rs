use clap::{Parser, Subcommand};
use serde::Serialize;
use tag_suggester::auth::{sign_token, Claims};
use tag_suggester_sdk::TagClient;

#[derive(Parser)]
#[command(name = "tagger-cli")]
#[command(about = "Management CLI for the tag suggestion service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service liveness
    Health,
    /// Ask the service for product tags
    Suggest {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: String,
        /// Bearer token
        #[arg(short, long, env = "TAGGER_TOKEN")]
        token: String,
    },
    /// Mint an HS256 token for local testing
    Token {
        /// Shared secret the service verifies with
        #[arg(short, long, env = "SECRET")]
        secret: String,
        #[arg(long, default_value = "dev")]
        subject: String,
        /// Lifetime in seconds
        #[arg(long, default_value_t = 3600)]
        ttl_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TagClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            print_json(&client.healthcheck().await?)?;
        }
        Commands::Suggest { name, description, token } => {
            match client.suggest_tags(&token, &name, &description).await {
                Ok(response) => print_json(&response)?,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Token { secret, subject, ttl_secs } => {
            let now = jsonwebtoken::get_current_timestamp();
            let claims = Claims {
                sub: Some(subject),
                iat: Some(now),
                exp: Some(now + ttl_secs),
                ..Default::default()
            };
            println!("{}", sign_token(&secret, &claims)?);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
