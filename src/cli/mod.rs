pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "awesome")]
#[command(about = "Awesome CLI - operator tools for the Awesome Inc. data API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Hash a password for HASHED__PASSWORD")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
        #[arg(long, help = "Bcrypt cost (default 12)")]
        cost: Option<u32>,
    },

    #[command(about = "Check a password against a bcrypt hash")]
    VerifyPassword {
        #[arg(help = "Plaintext password")]
        password: String,
        #[arg(help = "Bcrypt hash")]
        hash: String,
    },

    #[command(about = "Log in with the configured credentials and print an access token")]
    Token {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Password")]
        password: String,
        #[arg(long, help = "Token lifetime in minutes (default from ACCESS_TOKEN_EXPIRE_MINUTES)")]
        minutes: Option<i64>,
    },

    #[command(about = "List tables in the live database schema")]
    Tables,

    #[command(about = "Print every row of a table as JSON")]
    Dump {
        #[arg(help = "Table name")]
        table: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::HashPassword { password, cost } => {
            commands::password::hash(&password, cost, output_format).await
        }
        Commands::VerifyPassword { password, hash } => {
            commands::password::verify(&password, &hash, output_format).await
        }
        Commands::Token { username, password, minutes } => {
            commands::auth::token(&username, &password, minutes, output_format).await
        }
        Commands::Tables => commands::data::tables(output_format).await,
        Commands::Dump { table } => commands::data::dump(&table, output_format).await,
    }
}
