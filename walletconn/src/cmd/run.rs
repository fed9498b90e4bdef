//! `walletconn run` — drive the connect control in a terminal loop.
//!
//! Stands in for an embedding UI: the Enter key presses the control and a
//! simulated wallet service plays the external collaborator, reporting
//! lifecycle events back over the session channel. Ctrl-C ends the loop.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::load_config;
use crate::connector::ConnectorSet;
use crate::error::Error;
use crate::session::{self, SessionEvent, UserAction, WalletGateway};
use crate::setup::ConnectionConfig;
use crate::telemetry;

/// Account reported by the simulated wallet service.
const DEMO_ACCOUNT: &str = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";

/// Wallet service stand-in emitting deterministic lifecycle events.
struct SimulatedWallet {
    events: mpsc::Sender<SessionEvent>,
    chain_id: u64,
}

impl WalletGateway for SimulatedWallet {
    fn request_connection(&self, connectors: &ConnectorSet) {
        if let Some(connector) = connectors.iter().next() {
            tracing::info!(connector = connector.name, "simulated wallet pairing");
        }
        let events = self.events.clone();
        let chain_id = self.chain_id;
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(400)).await;
            let _ = events
                .send(SessionEvent::Connected {
                    account: DEMO_ACCOUNT.to_owned(),
                    chain_id,
                })
                .await;
        });
    }

    fn request_disconnect(&self) {
        let events = self.events.clone();
        tokio::spawn(async move {
            let _ = events.send(SessionEvent::Disconnected).await;
        });
    }
}

/// Execute the `run` command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or fails
/// validation; the session loop itself only ends on shutdown.
#[allow(clippy::print_stdout)]
pub async fn run(config_path: &Path) -> Result<(), Error> {
    dotenv().ok();
    telemetry::init("info");

    let config = load_config(config_path)?;
    let connection = Arc::new(ConnectionConfig::configure(&config)?);

    let (session, handle) = session::session(Arc::clone(&connection));
    let gateway = SimulatedWallet {
        events: handle.events.clone(),
        chain_id: connection.networks.first().map_or(1, |n| n.chain_id),
    };

    let cancel = CancellationToken::new();

    let ctrlc_cancel = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        ctrlc_cancel.cancel();
    });

    // Enter presses the control.
    let actions = handle.actions.clone();
    let stdin_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                () = stdin_cancel.cancelled() => break,
                line = lines.next_line() => match line {
                    Ok(Some(_)) => {
                        if actions.send(UserAction::PressButton).await.is_err() {
                            break;
                        }
                    }
                    _ => break,
                },
            }
        }
    });

    // Reprint the control whenever its label changes.
    let mut label = handle.label.clone();
    let render_cancel = cancel.clone();
    let printer = tokio::spawn(async move {
        print_control(&label.borrow().clone());
        loop {
            tokio::select! {
                () = render_cancel.cancelled() => break,
                changed = label.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = label.borrow().clone();
                    print_control(&current);
                }
            }
        }
    });

    session.run(&gateway, cancel).await;
    let _ = printer.await;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_control(label: &crate::button::Label) {
    let hint = if label.enabled { "  (press Enter)" } else { "" };
    println!("[ {} ]{hint}", label.text);
}
