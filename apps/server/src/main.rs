use anyhow::Context;
use clap::{Parser, Subcommand};
use soapbox_backend_runtime::{telemetry, BackendServices};
use soapbox_config::load as load_config;
use soapbox_gateway::{create_router, GatewayState};
use sqlx::{Row, SqlitePool};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "soapbox-backend")]
#[command(about = "Soapbox backend (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Dump accounts and messages from the database
    DumpData,
    /// Clear all accounts and messages from the database
    ClearData,
    /// Seed the database with test data
    SeedData,
    /// Start interactive console (default)
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Serve => run_server().await,
        Commands::DumpData => dump_data().await,
        Commands::ClearData => clear_data().await,
        Commands::SeedData => seed_data().await,
        Commands::Console => run_console().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Soapbox backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone());
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(soapbox_backend_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("dumping accounts and messages from database");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    dump_tables(&services.db_pool).await
}

async fn dump_tables(pool: &SqlitePool) -> anyhow::Result<()> {
    let accounts = sqlx::query(
        r#"
        SELECT id, username, password
        FROM accounts
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch accounts")?;

    println!("=== ACCOUNTS ===");
    if accounts.is_empty() {
        println!("No accounts found in database");
    } else {
        println!("Found {} accounts:", accounts.len());
        println!("{:<5} {:<30} {:<30}", "ID", "Username", "Password");
        println!("{}", "-".repeat(65));

        for account in accounts {
            let id: i64 = account.get("id");
            let username: String = account.get("username");
            let password: String = account.get("password");

            println!("{:<5} {:<30} {:<30}", id, username, password);
        }
    }

    println!("\n=== MESSAGES ===");
    let messages = sqlx::query(
        r#"
        SELECT id, posted_by, message_text, time_posted_epoch
        FROM messages
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch messages")?;

    if messages.is_empty() {
        println!("No messages found in database");
    } else {
        println!("Found {} messages:", messages.len());
        println!(
            "{:<5} {:<10} {:<50} {:<15}",
            "ID", "Posted By", "Text (truncated)", "Posted Epoch"
        );
        println!("{}", "-".repeat(85));

        for message in messages {
            let id: i64 = message.get("id");
            let posted_by: i64 = message.get("posted_by");
            let message_text: String = message.get("message_text");
            let time_posted_epoch: i64 = message.get("time_posted_epoch");

            let text_display = if message_text.len() > 47 {
                format!("{}...", &message_text[..44])
            } else {
                message_text
            };

            println!(
                "{:<5} {:<10} {:<50} {:<15}",
                id, posted_by, text_display, time_posted_epoch
            );
        }
    }

    Ok(())
}

async fn clear_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("clearing all data from database");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    // Clear messages first (due to foreign key constraints)
    let messages_deleted = sqlx::query("DELETE FROM messages")
        .execute(&services.db_pool)
        .await
        .context("failed to delete messages")?;

    let accounts_deleted = sqlx::query("DELETE FROM accounts")
        .execute(&services.db_pool)
        .await
        .context("failed to delete accounts")?;

    println!("Database cleared:");
    println!("- {} messages deleted", messages_deleted.rows_affected());
    println!("- {} accounts deleted", accounts_deleted.rows_affected());

    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("seeding database with test data");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    sqlx::query("INSERT OR IGNORE INTO accounts (username, password) VALUES (?, ?)")
        .bind("bob")
        .bind("password1")
        .execute(&services.db_pool)
        .await
        .context("failed to insert test account 1")?;

    sqlx::query("INSERT OR IGNORE INTO accounts (username, password) VALUES (?, ?)")
        .bind("alice")
        .bind("password2")
        .execute(&services.db_pool)
        .await
        .context("failed to insert test account 2")?;

    sqlx::query(
        r#"
        INSERT INTO messages (posted_by, message_text, time_posted_epoch)
        SELECT id, ?, ?
        FROM accounts WHERE username = ?
        "#,
    )
    .bind("Hello from the seed data")
    .bind(1_700_000_000i64)
    .bind("bob")
    .execute(&services.db_pool)
    .await
    .context("failed to insert test message 1")?;

    sqlx::query(
        r#"
        INSERT INTO messages (posted_by, message_text, time_posted_epoch)
        SELECT id, ?, ?
        FROM accounts WHERE username = ?
        "#,
    )
    .bind("Second seeded message")
    .bind(1_700_000_100i64)
    .bind("alice")
    .execute(&services.db_pool)
    .await
    .context("failed to insert test message 2")?;

    println!("Database seeded with test data:");
    println!("- 2 accounts created");
    println!("- 2 messages created");
    println!("Run 'dump-data' to see the inserted data");

    Ok(())
}

async fn run_console() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting interactive console");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    println!("Soapbox Interactive Console");
    println!("Type commands like '/help', '/accounts', '/messages', '/clear', '/seed', '/quit'");
    println!("Use Ctrl+C or '/quit' to exit");
    println!("---");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                break;
            }
            "/help" | "/h" => {
                println!("Available commands:");
                println!("  /help, /h          - Show this help");
                println!("  /accounts, /a      - List all accounts");
                println!("  /messages, /m      - List all messages");
                println!("  /clear, /cl        - Clear all data");
                println!("  /seed, /s          - Seed with test data");
                println!("  /dump, /d          - Dump all data");
                println!("  /quit, /exit, /q   - Exit console");
            }
            "/accounts" | "/a" => {
                let accounts = sqlx::query(
                    r#"
                    SELECT id, username
                    FROM accounts
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&services.db_pool)
                .await
                .context("failed to fetch accounts")?;

                if accounts.is_empty() {
                    println!("No accounts found");
                } else {
                    println!("Accounts:");
                    for account in accounts {
                        let id: i64 = account.get("id");
                        let username: String = account.get("username");
                        println!("  {}: {}", id, username);
                    }
                }
            }
            "/messages" | "/m" => {
                let messages = sqlx::query(
                    r#"
                    SELECT id, posted_by, message_text
                    FROM messages
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&services.db_pool)
                .await
                .context("failed to fetch messages")?;

                if messages.is_empty() {
                    println!("No messages found");
                } else {
                    println!("Messages:");
                    for message in messages {
                        let id: i64 = message.get("id");
                        let posted_by: i64 = message.get("posted_by");
                        let message_text: String = message.get("message_text");
                        println!("  {}: (account {}) {}", id, posted_by, message_text);
                    }
                }
            }
            "/clear" | "/cl" => {
                let messages_deleted = sqlx::query("DELETE FROM messages")
                    .execute(&services.db_pool)
                    .await
                    .context("failed to delete messages")?;

                let accounts_deleted = sqlx::query("DELETE FROM accounts")
                    .execute(&services.db_pool)
                    .await
                    .context("failed to delete accounts")?;

                println!(
                    "Cleared {} messages and {} accounts",
                    messages_deleted.rows_affected(),
                    accounts_deleted.rows_affected()
                );
            }
            "/seed" | "/s" => {
                sqlx::query("INSERT OR IGNORE INTO accounts (username, password) VALUES (?, ?)")
                    .bind("console-user")
                    .bind("console-pass")
                    .execute(&services.db_pool)
                    .await
                    .context("failed to insert test account")?;

                sqlx::query(
                    r#"
                    INSERT INTO messages (posted_by, message_text, time_posted_epoch)
                    SELECT id, ?, ?
                    FROM accounts WHERE username = ?
                    "#,
                )
                .bind("Hello from the console!")
                .bind(1_700_000_000i64)
                .bind("console-user")
                .execute(&services.db_pool)
                .await
                .context("failed to insert test message")?;

                println!("Seeded test data (using OR IGNORE to avoid duplicate accounts)");
            }
            "/dump" | "/d" => {
                dump_tables(&services.db_pool).await?;
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type '/help' for available commands");
            }
        }
    }

    Ok(())
}
