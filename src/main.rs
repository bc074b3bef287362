// Copyright (c) 2025 ChainCMS. All rights reserved.

mod address;
mod auth;
mod config;
mod consts;
mod content;
mod dashboard;
mod environment;
mod error_classifier;
mod events;
mod index;
mod logging;
mod pretty;
mod session;

use crate::address::truncate_address;
use crate::auth::WalletAuthClient;
use crate::auth::error::AuthError;
use crate::consts::cli_consts::{DEFAULT_PAGE_SIZE, EVENT_QUEUE_SIZE};
use crate::content::filter::{self, Role, StatusTab};
use crate::content::query::ContentQuery;
use crate::content::record::{ContentRecord, ContentStatus, ContentType};
use crate::dashboard::{DashboardController, Tab};
use crate::environment::Environment;
use crate::events::EventSender;
use crate::index::IndexClient;
use crate::pretty::{print_cmd_error, print_cmd_info, print_cmd_warn};
use crate::session::{SessionState, SessionStore};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect a wallet and establish a session
    Login,
    /// Disconnect the wallet and clear the cached session
    Logout,
    /// Show the identity of the current session
    Whoami,
    /// List content items, filtered like the dashboard's content tab
    List {
        /// Status tab: all, published, draft, or archived
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive search over titles
        #[arg(long)]
        search: Option<String>,

        /// Viewer role for the actions column: admin or member
        #[arg(long, default_value = "member")]
        role: String,
    },
    /// Search content items server-side through the index
    Search {
        /// Search term
        term: String,

        /// Status tab applied to the results
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Create a new content item
    Create {
        /// Content title
        #[arg(long)]
        title: String,

        /// Content type: article, tutorial, guide, or news
        #[arg(long, value_name = "TYPE")]
        content_type: String,

        /// Content body
        #[arg(long)]
        content: String,

        /// Image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Initial status: published or draft
        #[arg(long, default_value = "draft")]
        status: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let environment_str = std::env::var("CHAINCMS_ENVIRONMENT").unwrap_or_default();
    let environment = match environment_str.parse::<Environment>() {
        Ok(environment) => environment,
        Err(()) => {
            if !environment_str.is_empty() {
                print_cmd_warn!(
                    "Unknown environment.",
                    "CHAINCMS_ENVIRONMENT={} is not recognized; using {}.",
                    environment_str,
                    Environment::default()
                );
            }
            Environment::default()
        }
    };

    let config_path = config::get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Login => login(environment, config_path).await,
        Command::Logout => logout(environment, config_path).await,
        Command::Whoami => whoami(environment, config_path).await,
        Command::List {
            status,
            search,
            role,
        } => list(environment, config_path, status, search, role).await,
        Command::Search { term, status } => search(environment, config_path, term, status).await,
        Command::Create {
            title,
            content_type,
            content,
            image_url,
            status,
        } => {
            create(
                environment,
                config_path,
                title,
                content_type,
                content,
                image_url,
                status,
            )
            .await
        }
    }
}

fn session_store(environment: Environment, config_path: PathBuf) -> SessionStore {
    let auth = WalletAuthClient::new(environment, config_path);
    SessionStore::new(Arc::new(auth))
}

async fn login(environment: Environment, config_path: PathBuf) -> Result<(), Box<dyn Error>> {
    let (sender, _events) = mpsc::channel(EVENT_QUEUE_SIZE);
    let session = session_store(environment, config_path);
    let query = ContentQuery::new(Arc::new(IndexClient::new(environment)));
    let mut controller = DashboardController::new(session, query, EventSender::new(sender));

    match controller.login().await {
        Ok(address) => {
            print_cmd_info!(
                "✅ Wallet connected.",
                "Connected as {} ({})",
                address,
                truncate_address(&address)
            );
            Ok(())
        }
        Err(AuthError::Cancelled) => {
            print_cmd_info!("Login cancelled.", "No wallet was connected.");
            Ok(())
        }
        Err(e) => {
            print_cmd_error!("Failed to connect wallet.", "{}", e);
            Err(e.into())
        }
    }
}

async fn logout(environment: Environment, config_path: PathBuf) -> Result<(), Box<dyn Error>> {
    println!("Logging out and clearing wallet session...");
    let mut store = session_store(environment, config_path);
    store.logout().await;
    Ok(())
}

async fn whoami(environment: Environment, config_path: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut store = session_store(environment, config_path);
    store.initialize().await;
    match store.state() {
        SessionState::Active { address, .. } => {
            println!("{} ({})", address, truncate_address(address));
        }
        _ => {
            println!("Not connected. Run `chaincms login` to connect a wallet.");
        }
    }
    Ok(())
}

async fn list(
    environment: Environment,
    config_path: PathBuf,
    status: String,
    search: Option<String>,
    role: String,
) -> Result<(), Box<dyn Error>> {
    let Some(status_filter) = StatusTab::parse(&status) else {
        print_cmd_error!(
            "Unknown status tab.",
            "Expected one of: all, published, draft, archived. Got: {}",
            status
        );
        return Err(Box::from(format!("Unknown status tab: {}", status)));
    };
    let Ok(role) = role.parse::<Role>() else {
        print_cmd_error!("Unknown role.", "Expected admin or member. Got: {}", role);
        return Err(Box::from(format!("Unknown role: {}", role)));
    };

    let (sender, mut event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let session = session_store(environment, config_path);
    let query = ContentQuery::new(Arc::new(IndexClient::new(environment)));
    let mut controller = DashboardController::new(session, query, EventSender::new(sender));

    controller.initialize().await;
    controller.set_status_filter(status_filter);
    controller.set_search_query(search.unwrap_or_default());
    controller.select_tab(Tab::Content).await;

    // Surface controller events the way headless mode logs worker events
    while let Ok(event) = event_receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }

    if !controller.session().is_active() {
        print_cmd_info!("Not connected.", "Run `chaincms login` to connect a wallet.");
        return Ok(());
    }

    let identity = controller.session().identity_address().map(str::to_string);
    let records = controller.visible_records();
    print_records(&records, identity.as_deref(), role);
    println!(
        "Showing {} of {} items",
        records.len(),
        controller.state().records().len()
    );

    Ok(())
}

async fn search(
    environment: Environment,
    config_path: PathBuf,
    term: String,
    status: String,
) -> Result<(), Box<dyn Error>> {
    if StatusTab::parse(&status).is_none() {
        print_cmd_warn!(
            "Unknown status tab.",
            "\"{}\" is not a known tab; nothing will match.",
            status
        );
    }

    let mut store = session_store(environment, config_path);
    store.initialize().await;
    if !store.is_active() {
        print_cmd_info!("Not connected.", "Run `chaincms login` to connect a wallet.");
        return Ok(());
    }
    let identity = store.identity_address().map(str::to_string);

    let query = ContentQuery::new(Arc::new(IndexClient::new(environment)));
    let records = match query.search(&term, DEFAULT_PAGE_SIZE).await {
        Ok(records) => records,
        Err(e) => {
            // Degrade to an empty result set; a broken index is not fatal.
            print_cmd_warn!("Search failed.", "{}", e);
            Vec::new()
        }
    };

    let visible = filter::visible_by_label(&records, &status, "");
    print_records(&visible, identity.as_deref(), Role::Member);

    Ok(())
}

fn print_records(records: &[ContentRecord], identity: Option<&str>, role: Role) {
    if records.is_empty() {
        println!("No content found.");
        return;
    }

    println!(
        "{:<40} {:<10} {:<10} {:<14} {:<12} {:<8}",
        "Title", "Type", "Status", "Author", "Updated", "Actions"
    );
    for record in records {
        let actions = if filter::can_modify(record, role, identity) {
            "edit"
        } else {
            "-"
        };
        println!(
            "{:<40} {:<10} {:<10} {:<14} {:<12} {:<8}",
            record.title,
            record.content_type.to_string(),
            record.status.to_string(),
            record.author_display(identity),
            record.updated_at_display(),
            actions
        );
    }
}

async fn create(
    environment: Environment,
    config_path: PathBuf,
    title: String,
    content_type: String,
    content: String,
    image_url: Option<String>,
    status: String,
) -> Result<(), Box<dyn Error>> {
    let Ok(content_type) = content_type.parse::<ContentType>() else {
        let err_msg = format!(
            "Invalid content type: {}. Expected one of: article, tutorial, guide, news.",
            content_type
        );
        print_cmd_error!("Invalid content type.", "{}", err_msg);
        return Err(Box::from(err_msg));
    };

    let status = match status.parse::<ContentStatus>() {
        Ok(s @ (ContentStatus::Published | ContentStatus::Draft)) => s,
        _ => {
            let err_msg = format!(
                "Invalid status: {}. New content starts as published or draft.",
                status
            );
            print_cmd_error!("Invalid status.", "{}", err_msg);
            return Err(Box::from(err_msg));
        }
    };

    let mut store = session_store(environment, config_path);
    store.initialize().await;
    let Some(author) = store.identity_address().map(str::to_string) else {
        print_cmd_error!(
            "Not connected.",
            "Run `chaincms login` before creating content."
        );
        return Err(Box::from("No wallet connected"));
    };

    let now = chrono::Utc::now().timestamp();
    let record = ContentRecord {
        id: uuid::Uuid::new_v4().to_string(),
        title,
        content_type,
        content,
        image_url: image_url.unwrap_or_default(),
        status,
        author,
        created_at: now,
        updated_at: now,
    };

    let query = ContentQuery::new(Arc::new(IndexClient::new(environment)));
    match query.save(&record).await {
        Ok(receipt) => {
            let object_id = receipt
                .object_ids
                .into_iter()
                .next()
                .unwrap_or_else(|| record.id.clone());
            print_cmd_info!("✅ Content created.", "Object ID: {}", object_id);
            Ok(())
        }
        Err(e) => {
            print_cmd_error!("Failed to create content.", "{}", e);
            Err(e.into())
        }
    }
}
