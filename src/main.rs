mod config;
mod errors;
mod external;
mod logging;
mod models;
mod services;
mod session;
mod state;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::external::dashboard_api::DashboardApi;
use crate::external::rest_gateway::RestGateway;
use crate::services::dashboard::{self, DashboardSnapshot, Section};
use crate::services::fetch::FetchCoordinator;
use crate::services::refresh::RefreshCoordinator;
use crate::services::version_gate::{self, GateDecision};
use crate::session::{SessionEvent, SessionStore, SessionVault};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    let logging_config = logging::LoggingConfig::from_env();
    logging::init_logging(&logging_config).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let config = AppConfig::from_env().map_err(errors::AppError::Config)?;
    tracing::info!("🚀 dashfolio {} starting against {}", config.app_version, config.api_base_url);

    let api = Arc::new(RestGateway::new(&config));
    let vault = SessionVault::open(&config.session_db_path)?;
    let sessions = Arc::new(SessionStore::new(vault));
    let fetches = Arc::new(FetchCoordinator::new());

    // Navigation reacts to session changes; the CLI stand-in logs what the
    // mobile shell would do. Logout also drops any in-flight dashboard
    // tickets so a late response cannot repopulate a cleared screen.
    let fetches_for_events = fetches.clone();
    sessions.subscribe(move |event| match event {
        SessionEvent::LoggedIn(session) => {
            tracing::info!("navigating to dashboard for {}", session.account_id);
        }
        SessionEvent::LoggedOut(reason) => {
            fetches_for_events.invalidate("dashboard");
            tracing::info!("navigating to login screen ({:?})", reason);
        }
        SessionEvent::AccountSwitched { account_type, .. } => {
            if account_type.is_family_group() {
                tracing::info!("resetting navigation to the family-group stack");
            } else {
                tracing::info!("resetting navigation to the standard stack");
            }
        }
    });

    let state = AppState {
        api: api.clone(),
        sessions: sessions.clone(),
        refresh: Arc::new(RefreshCoordinator::new()),
        fetches,
    };

    let restored = sessions.restore()?;
    if restored {
        tracing::info!("restored persisted session");
    }

    // Startup version gate. Fails open when the manifest host is down.
    if let GateDecision::Blocked { update_url } =
        version_gate::check(state.api.as_ref(), &config.app_version).await
    {
        if sessions.is_authenticated() {
            sessions.logout(session::LogoutReason::ForcedUpdate)?;
        }
        println!("This version is no longer supported. Please update: {}", update_url);
        return Ok(());
    }

    // One-shot logout mode: confirm-and-clear, then exit.
    if std::env::var("DASHFOLIO_LOGOUT").is_ok() {
        if sessions.is_authenticated() {
            sessions.logout(session::LogoutReason::UserRequested)?;
            println!("Logged out.");
        } else {
            println!("No active session.");
        }
        return Ok(());
    }

    if !restored {
        let username = std::env::var("DASHFOLIO_USERNAME")
            .map_err(|_| anyhow::anyhow!("DASHFOLIO_USERNAME is not set"))?;
        let password = std::env::var("DASHFOLIO_PASSWORD")
            .map_err(|_| anyhow::anyhow!("DASHFOLIO_PASSWORD is not set"))?;
        let outcome = api.login(&username, &password).await?;
        sessions.login_succeeded(outcome)?;
    }

    // Screens re-fetch when the trigger changes; here a watcher task just
    // makes the signal visible.
    let mut trigger_rx = state.refresh.subscribe();
    tokio::spawn(async move {
        while trigger_rx.changed().await.is_ok() {
            tracing::debug!("refresh trigger advanced to {}", *trigger_rx.borrow());
        }
    });

    let snapshot = state.refresh.run(dashboard::load_snapshot(&state)).await;
    match snapshot {
        Some(snapshot) => render(&snapshot),
        None => tracing::info!("snapshot superseded before it could render"),
    }

    if let Some(session) = sessions.session() {
        match api.linked_accounts(&session.auth_token, &session.account_id).await {
            Ok(linked) => {
                println!("\nAccounts:");
                let options = sessions.account_options(&linked);
                for option in &options {
                    println!("  {} ({:?})", option.label, option.account_type);
                }

                // Optional account switch: re-fetch under the new context.
                if let Ok(target) = std::env::var("DASHFOLIO_ACCOUNT") {
                    if target != session.account_id {
                        match options.iter().find(|o| o.key == target) {
                            Some(option) => {
                                sessions.switch_account(&option.key, option.account_type)?;
                                let snapshot =
                                    state.refresh.run(dashboard::load_snapshot(&state)).await;
                                if let Some(snapshot) = snapshot {
                                    println!();
                                    render(&snapshot);
                                }
                            }
                            None => {
                                tracing::warn!("account {} is not switchable from here", target)
                            }
                        }
                    }
                }
            }
            Err(e) => tracing::warn!("linked accounts fetch failed: {}", e),
        }
    }

    Ok(())
}

fn render(snapshot: &DashboardSnapshot) {
    println!("Dashboard for account {}", snapshot.account_id);

    match &snapshot.overview {
        Section::Ready(overview) => {
            println!(
                "  Market value {:.2} | Book value {:.2} | Cash {:.2}",
                overview.total_market_value, overview.total_book_value, overview.cash_balance
            );
            if let Some(as_of) = overview.as_of_date {
                println!("  As of {}", as_of);
            }
        }
        Section::Unavailable(msg) => println!("  {}", msg),
    }

    println!("Asset allocation:");
    match &snapshot.allocation {
        Section::Ready(data) => {
            for category in &data.asset_categories {
                println!(
                    "  {} {:.2} ({:.2}%)",
                    category.asset_category, category.market_value, category.percentage
                );
                for class in &category.asset_classes {
                    println!(
                        "    {} {:.2} ({:.2}%)",
                        class.asset_class, class.market_value, class.percentage
                    );
                }
            }
            println!(
                "  Total {:.2} ({:.2}%)",
                data.total_market_value, data.total_percentage
            );
        }
        Section::Unavailable(msg) => println!("  {}", msg),
    }

    println!("Recent transactions:");
    match &snapshot.transactions {
        Section::Ready(transactions) if transactions.is_empty() => {
            println!("  (none)");
        }
        Section::Ready(transactions) => {
            for tx in transactions {
                println!(
                    "  {} {} {} {:.2}",
                    tx.transaction_date, tx.transaction_type, tx.description, tx.amount
                );
            }
        }
        Section::Unavailable(msg) => println!("  {}", msg),
    }
}
