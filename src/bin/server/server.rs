use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tracing::{info, warn};

use contact_desk::protocol::{self, Request};
use contact_desk::util::Handle;

use crate::notify::Notifier;
use crate::stores::{MessageStore, SettingsStore};

/// Everything that survives a restart: the messages and the settings.
/// Admin sessions are client-local and deliberately not part of this.
#[derive(Default, Serialize, Deserialize)]
pub struct PersistedState {
    pub messages: MessageStore,
    pub settings: SettingsStore,
}

/// Shared handles the request handler works against.
#[derive(Clone)]
pub struct Stores {
    pub messages: Handle<MessageStore>,
    pub settings: Handle<SettingsStore>,
}

pub struct Server {
    interrupt: Notify,
    stores: Stores,
    notifier: Notifier,
}

impl Server {
    pub fn new(state: PersistedState, notifier: Notifier) -> Self {
        Self {
            interrupt: Notify::new(),
            stores: Stores {
                messages: Handle::new(state.messages),
                settings: Handle::new(state.settings),
            },
            notifier,
        }
    }

    /// Snapshot of the current stores, for saving on shutdown.
    pub fn state(&self) -> PersistedState {
        PersistedState {
            messages: self.stores.messages.read().clone(),
            settings: self.stores.settings.read().clone(),
        }
    }

    pub async fn listen(self: Arc<Self>, addr: &str) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        let mut connections = vec![];

        loop {
            tokio::select! {
                _ = self.interrupt.notified() => {
                    info!("stopping the listener");
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Err(e) => warn!(error = %e, "failed to accept connection"),
                        Ok((stream, addr)) => {
                            let process_fut = self.clone().process_connection(stream, addr);
                            let spawn = tokio::task::spawn_local(process_fut);
                            connections.push(spawn);
                        }
                    };
                }
            }
        }

        info!(count = connections.len(), "aborting connection tasks");
        for conn in connections {
            conn.abort();
        }

        Ok(())
    }

    async fn process_connection(self: Arc<Self>, stream: TcpStream, addr: SocketAddr) {
        info!(%addr, "accepted connection");

        let mut frames = protocol::frame(stream);

        loop {
            let request = match protocol::recv::<Request>(&mut frames).await {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(e) => {
                    warn!(%addr, error = %e, "dropping connection on bad frame");
                    break;
                }
            };

            let response = crate::handler::handle(&self.stores, &self.notifier, request).await;

            if let Err(e) = protocol::send(&mut frames, &response).await {
                warn!(%addr, error = %e, "failed to send response");
                break;
            }
        }

        info!(%addr, "peer disconnected");
    }

    fn interrupt(&self) {
        self.interrupt.notify_waiters();
    }
}

impl Server {
    pub fn set_interrupt_handler(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);

        let result = ctrlc::set_handler(move || match weak.upgrade() {
            Some(server) => server.interrupt(),
            None => warn!("server no longer exists, nothing to interrupt"),
        });

        match result {
            Ok(_) => {}

            Err(ctrlc::Error::NoSuchSignal(signal_type)) => {
                warn!(?signal_type, "signal not found, CTRL + C interrupt will not be handled gracefully")
            }

            Err(ctrlc::Error::MultipleHandlers) => {
                warn!("CTRL + C interrupt already has a handler, interrupt may not be handled gracefully")
            }

            Err(ctrlc::Error::System(err)) => {
                warn!(error = %err, "CTRL + C interrupt not set, interrupt may not be handled gracefully")
            }
        }
    }
}
