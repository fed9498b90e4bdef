//! Connection session state machine and event loop.
//!
//! The external wallet service reports lifecycle changes over an mpsc
//! channel; a pure reducer folds them into [`ConnectionState`] and every
//! transition republishes the rendered control label on a watch channel.
//! The loop itself is single-threaded and never blocks — anything slow
//! (pairing, RPC, signing) happens inside the wallet service and comes
//! back as an event.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::button::{self, Label};
use crate::connector::ConnectorSet;
use crate::setup::ConnectionConfig;

/// Lifecycle state of the wallet link, mirrored from the wallet service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No active session.
    #[default]
    Disconnected,
    /// A connection attempt is pending at the wallet service.
    Connecting,
    /// A session is live.
    Connected {
        /// Account identifier reported by the wallet.
        account: String,
        /// Chain the session is currently on.
        chain_id: u64,
    },
}

/// One notification folded into the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user asked to connect.
    ConnectRequested,
    /// The wallet service established a session.
    Connected {
        /// Account identifier reported by the wallet.
        account: String,
        /// Chain the session started on.
        chain_id: u64,
    },
    /// The wallet service could not establish a session.
    ConnectFailed {
        /// Human-readable cause, for logging only.
        reason: String,
    },
    /// The session ended (user- or wallet-initiated).
    Disconnected,
    /// The active session moved to another network.
    NetworkSwitched {
        /// Chain the session moved to.
        chain_id: u64,
    },
}

/// User interaction with the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// The single control was pressed.
    PressButton,
}

/// Seam to the external wallet discovery/connection service.
///
/// Implementations own pairing, signing, and session state; they report
/// back through the [`SessionEvent`] channel handed out by [`session`].
/// Methods must not block — kick off work and return.
pub trait WalletGateway: Send + Sync {
    /// Asks the service to open its discovery flow over `connectors`.
    fn request_connection(&self, connectors: &ConnectorSet);

    /// Asks the service to end the active session.
    fn request_disconnect(&self);
}

/// Pure state transition: `(state, event) → state`.
///
/// Pairs outside the lifecycle leave the state unchanged; a failed
/// attempt falls back to disconnected rather than surfacing an error.
#[must_use]
pub fn reduce(state: &ConnectionState, event: &SessionEvent) -> ConnectionState {
    match (state, event) {
        (ConnectionState::Disconnected, SessionEvent::ConnectRequested) => {
            ConnectionState::Connecting
        }
        (ConnectionState::Connecting, SessionEvent::Connected { account, chain_id }) => {
            ConnectionState::Connected {
                account: account.clone(),
                chain_id: *chain_id,
            }
        }
        (ConnectionState::Connecting, SessionEvent::ConnectFailed { .. })
        | (
            ConnectionState::Connecting | ConnectionState::Connected { .. },
            SessionEvent::Disconnected,
        ) => ConnectionState::Disconnected,
        (ConnectionState::Connected { account, .. }, SessionEvent::NetworkSwitched { chain_id }) => {
            ConnectionState::Connected {
                account: account.clone(),
                chain_id: *chain_id,
            }
        }
        _ => state.clone(),
    }
}

const CHANNEL_CAPACITY: usize = 32;

/// Channel endpoints for driving a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    /// Feeds wallet service notifications into the loop.
    pub events: mpsc::Sender<SessionEvent>,
    /// Feeds user interactions into the loop.
    pub actions: mpsc::Sender<UserAction>,
    /// Observes the rendered control label.
    pub label: watch::Receiver<Label>,
}

/// Single-threaded session event loop.
#[derive(Debug)]
pub struct Session {
    config: Arc<ConnectionConfig>,
    state: ConnectionState,
    events: mpsc::Receiver<SessionEvent>,
    actions: mpsc::Receiver<UserAction>,
    label: watch::Sender<Label>,
}

/// Creates a session for `config` plus the handle used to drive it.
#[must_use]
pub fn session(config: Arc<ConnectionConfig>) -> (Session, SessionHandle) {
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (action_tx, action_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let state = ConnectionState::default();
    let (label_tx, label_rx) = watch::channel(button::render(&state));
    (
        Session {
            config,
            state,
            events: event_rx,
            actions: action_rx,
            label: label_tx,
        },
        SessionHandle {
            events: event_tx,
            actions: action_tx,
            label: label_rx,
        },
    )
}

impl Session {
    /// Runs until `cancel` fires or both input channels close.
    ///
    /// Each input is fully applied — state reduced, label re-rendered —
    /// before the next one is taken, so observers never see an
    /// intermediate state.
    pub async fn run<G: WalletGateway>(mut self, gateway: &G, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                action = self.actions.recv() => match action {
                    Some(action) => self.on_action(action, gateway),
                    None => break,
                },
                event = self.events.recv() => match event {
                    Some(event) => self.apply(&event),
                    None => break,
                },
            }
        }
    }

    fn on_action<G: WalletGateway>(&mut self, action: UserAction, gateway: &G) {
        let UserAction::PressButton = action;
        match &self.state {
            ConnectionState::Disconnected => {
                self.apply(&SessionEvent::ConnectRequested);
                gateway.request_connection(&self.config.connectors);
            }
            ConnectionState::Connecting => {
                tracing::debug!("press ignored while a connection attempt is pending");
            }
            ConnectionState::Connected { .. } => gateway.request_disconnect(),
        }
    }

    fn apply(&mut self, event: &SessionEvent) {
        let next = reduce(&self.state, event);
        if next == self.state {
            tracing::debug!(?event, state = ?self.state, "event left state unchanged");
            return;
        }
        if let SessionEvent::ConnectFailed { reason } = event {
            tracing::warn!(reason, "connection attempt failed");
        }
        tracing::info!(from = ?self.state, to = ?next, "connection state changed");
        self.state = next;
        self.label.send_replace(button::render(&self.state));
    }
}
