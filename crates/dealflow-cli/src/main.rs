use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use dealflow_cli::{CliError, authorize, login, logout, open_authority, register, whoami};
use dealflow_config::SessionConfig;
use dealflow_models::{RegistrationForm, Role};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dealflow-cli")]
#[command(about = "DealFlow CLI - log in, inspect and end your DealFlow session", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AccountType {
    Company,
    Investor,
}

impl From<AccountType> for Role {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Company => Role::Seller,
            AccountType::Investor => Role::Investor,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Ask whether the current session may enter a route requiring ROLE
    Authorize {
        /// `seller` (or `company`) or `investor`
        role: String,
    },
    /// Create an account on the remote identity API
    Register {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 't', long = "type", value_enum)]
        account_type: Option<AccountType>,

        /// Password (will be prompted securely, with confirmation, if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<String, CliError> {
    let authority = open_authority(&SessionConfig::from_env()).await?;

    match command {
        Commands::Login { username, password } => {
            let username = prompt_or(username, "Username")?;
            let password = match password {
                Some(p) => p,
                None => Password::new().with_prompt("Password").interact()?,
            };
            login(&authority, &username, &password).await
        }
        Commands::Logout => logout(&authority).await,
        Commands::Whoami => Ok(whoami(&authority)),
        Commands::Authorize { role } => authorize(&authority, &role),
        Commands::Register {
            username,
            email,
            name,
            account_type,
            password,
        } => {
            let username = prompt_or(username, "Username")?;
            let email = prompt_or(email, "Email address")?;
            let name = prompt_or(name, "Full name")?;
            let role = match account_type {
                Some(t) => Role::from(t),
                None => {
                    let choice = Select::new()
                        .with_prompt("Account type")
                        .items(&["Company owner", "Investor"])
                        .default(0)
                        .interact()?;
                    if choice == 0 { Role::Seller } else { Role::Investor }
                }
            };
            let (password, confirm_password) = match password {
                Some(p) => (p.clone(), p),
                None => (
                    Password::new().with_prompt("Password").interact()?,
                    Password::new().with_prompt("Confirm password").interact()?,
                ),
            };

            let form = RegistrationForm {
                username,
                password,
                confirm_password,
                email,
                name,
                role,
            };
            register(&authority, form).await
        }
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}
