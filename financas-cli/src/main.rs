use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use financas_api::{ApiClient, NewTransaction};
use financas_core::{Direction, Transaction};
use financas_ingest::{NotificationClassifier, RawNotification, parse_event_line};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

mod auth;
mod config;
mod simulate;
mod state;

#[derive(Parser, Debug)]
#[command(name = "financas", version, about = "Bank-notification transaction pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single notification without touching the API
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Originating app name, when known
        #[arg(long, default_value = "")]
        app_name: String,
        /// Originating package id, when known
        #[arg(long, default_value = "")]
        package_name: String,
        /// Print the transaction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify an NDJSON stream of captured notification events
    Ingest {
        /// Events file; stdin when omitted
        #[arg(long)]
        events: Option<PathBuf>,
        /// Create a transaction on the API for every hit
        #[arg(long)]
        post: bool,
    },

    /// Run a canned bank notification through the pipeline
    Simulate {
        bank: simulate::Bank,

        /// Simulate the expense variant instead of the income one
        #[arg(long)]
        expense: bool,

        /// Override the demo amount
        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        post: bool,
    },

    /// Session against the persistence API
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Local configuration (~/.financas/config.toml)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show account balances and the monthly summary
    Account,

    /// List recent transactions
    Transactions {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// List savings goals
    Goals,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Log in and store the bearer token in ~/.financas/auth.json
    Login {
        #[arg(long)]
        email: String,
    },
    /// Show the current session
    Status,
    /// Drop the stored session
    Logout,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    Init,
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Command::Classify {
            title,
            body,
            app_name,
            package_name,
            json,
        } => {
            let notif = RawNotification::new(title, body, app_name, package_name);
            match NotificationClassifier::new().classify(&notif) {
                Some(txn) if json => println!("{}", serde_json::to_string_pretty(&txn)?),
                Some(txn) => print_transaction(&txn),
                None => println!("Not a financial transaction notification."),
            }
        }

        Command::Ingest { events, post } => {
            ingest(&cfg, events, post).await?;
        }

        Command::Simulate {
            bank,
            expense,
            amount,
            post,
        } => {
            let income = !expense;
            let amount = amount.unwrap_or_else(|| bank.default_amount(income));
            let event = simulate::sample_event(bank, income, amount);
            println!("Notification: {}: \"{}\"", event.title, event.body);

            match NotificationClassifier::new().classify(&RawNotification::from(&event)) {
                Some(txn) => {
                    print_transaction(&txn);
                    if post {
                        authed_client(&cfg)?
                            .create_transaction(&NewTransaction::from(&txn))
                            .await?;
                        println!("Created via API.");
                    }
                }
                None => println!("Not classified as a transaction."),
            }
        }

        Command::Auth { command } => match command {
            AuthCommand::Login { email } => {
                let password = auth::prompt_secret("Password")?;
                let api = ApiClient::new(&cfg.api.base_url, cfg.api.timeout_secs)?;
                let resp = api.login(&email, &password).await?;
                auth::save_auth(&auth::AuthState {
                    token: Some(resp.token),
                    email: Some(email.clone()),
                })?;
                println!("Logged in as {} <{}>", resp.user.name, email);
            }
            AuthCommand::Status => {
                let a = auth::load_auth()?;
                if a.token.is_none() {
                    println!("Not logged in. Run: financas auth login --email you@example.com");
                } else {
                    match authed_client(&cfg)?.me().await {
                        Ok(user) => println!("Logged in as {} <{}>", user.name, user.email),
                        Err(err) => println!(
                            "Token stored for {} but the API rejected it: {err:#}",
                            a.email.as_deref().unwrap_or("<unknown>")
                        ),
                    }
                }
            }
            AuthCommand::Logout => {
                auth::clear_auth()?;
                println!("Session cleared.");
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },

        Command::Account => {
            let api = authed_client(&cfg)?;
            let account = api.get_account().await?;
            let summary = api.get_summary().await?;
            println!("Main:    R$ {:.2}", account.main_balance);
            println!("Savings: R$ {:.2}", account.savings_balance);
            println!(
                "Total:   R$ {:.2}",
                account.main_balance + account.savings_balance
            );
            println!(
                "\nThis month: +R$ {:.2} / -R$ {:.2}",
                summary.monthly_income, summary.monthly_expenses
            );
        }

        Command::Transactions { limit } => {
            let api = authed_client(&cfg)?;
            for txn in api.list_transactions(Some(limit)).await? {
                let sign = match txn.direction {
                    Direction::Income => '+',
                    Direction::Expense => '-',
                };
                let auto = if txn.is_automatic { " [auto]" } else { "" };
                println!(
                    "{}  {sign}R$ {:<10.2} {:?} | {}{auto}",
                    txn.created_at.as_deref().unwrap_or("-"),
                    txn.amount,
                    txn.method,
                    txn.description
                );
            }
        }

        Command::Goals => {
            let api = authed_client(&cfg)?;
            let goals = api.list_goals().await?;
            if goals.is_empty() {
                println!("No goals yet.");
            }
            for goal in goals {
                let status = if goal.completed { "done" } else { "open" };
                println!(
                    "{:<24} R$ {:>10.2} / R$ {:>10.2}  {:>5.1}% [{}]",
                    goal.name,
                    goal.current_amount,
                    goal.target_amount,
                    goal.progress_percent(),
                    status
                );
                if let Some(deadline) = &goal.deadline {
                    println!("    deadline: {deadline}");
                }
            }
        }
    }

    Ok(())
}

/// Stream NDJSON events, classify each one, and optionally create a
/// transaction per hit. One create call per classified event, in input
/// order; a failed create is reported and the stream keeps going.
async fn ingest(cfg: &config::Config, events: Option<PathBuf>, post: bool) -> Result<()> {
    let reader: Box<dyn BufRead> = match &events {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let api = if post { Some(authed_client(cfg)?) } else { None };
    let classifier = NotificationClassifier::new();

    let mut total = 0usize;
    let mut hits = 0usize;
    let mut malformed = 0usize;
    let mut created = 0usize;

    for line in reader.lines() {
        let line = line.context("read events")?;
        if line.trim().is_empty() {
            continue;
        }
        total += 1;

        let event = match parse_event_line(&line) {
            Ok(event) => event,
            Err(err) => {
                eprintln!("skipping malformed event: {err:#}");
                malformed += 1;
                continue;
            }
        };

        let Some(txn) = classifier.classify(&RawNotification::from(&event)) else {
            continue;
        };
        hits += 1;

        let when = event
            .occurred_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        print!("{when}  ");
        print_transaction(&txn);

        if let Some(api) = &api {
            match api.create_transaction(&NewTransaction::from(&txn)).await {
                Ok(()) => created += 1,
                Err(err) => eprintln!("create failed: {err:#}"),
            }
        }
    }

    let ignored = total - hits - malformed;
    println!("\n{total} events: {hits} transactions, {ignored} ignored, {malformed} malformed");
    if post {
        println!("{created} created via API");
    }
    Ok(())
}

fn print_transaction(txn: &Transaction) {
    let sign = match txn.direction {
        Direction::Income => '+',
        Direction::Expense => '-',
    };
    println!(
        "{sign}R$ {:.2} via {:?} | {}",
        txn.amount, txn.method, txn.description
    );
}

fn authed_client(cfg: &config::Config) -> Result<ApiClient> {
    let auth = auth::load_auth()?;
    let Some(token) = auth.token else {
        bail!("not logged in; run: financas auth login --email you@example.com");
    };
    Ok(ApiClient::new(&cfg.api.base_url, cfg.api.timeout_secs)?.with_token(token))
}
