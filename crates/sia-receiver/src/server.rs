//! SIA DC-09 receiver server.
//!
//! Accepts connections from alarm panels and answers every line with an ACK
//! or a NAK. Each TCP connection runs in its own task with its own
//! [`SiaCodec`]; connections share only the account registry and the
//! availability tracker.
//!
//! # Architecture
//!
//! ```text
//! Panel A ┐                                   ┌──> ACK / NAK
//!         │                                   │
//! Panel B ├──> SiaServer ──> Dispatcher ──────┤
//!         │     (task per     (registry,      │
//! Panel C ┘      connection)   availability)  └──> ReceiverEvent channel
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use sia_receiver::{ReceiverConfig, ReceiverEvent, SiaServer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReceiverConfig::load("receiver.toml")?;
//!
//! let mut server = SiaServer::bind(config).await?;
//! let mut events = server.take_events().expect("events taken once");
//! server.start()?;
//!
//! while let Some(event) = events.recv().await {
//!     if let ReceiverEvent::Event(event) = event {
//!         println!("{} zone {}: {:?}", event.account, event.zone, event.code);
//!     }
//! }
//!
//! server.stop().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Shutdown
//!
//! [`SiaServer::stop`] closes the listening socket, cancels every pending
//! availability timer and waits for the connection tasks. A connection that
//! is in the middle of a line finishes it, reply included, before it exits.

use futures::{SinkExt, StreamExt};
use sia_core::constants::{INTERNAL_ERROR_BURST_LIMIT, INTERNAL_ERROR_WINDOW_MS};
use sia_core::Result;
use sia_protocol::{SiaCodec, StreamParser};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::Instant;
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::availability::AvailabilityTracker;
use crate::config::{ReceiverConfig, ServerConfig, Transport};
use crate::dispatcher::Dispatcher;
use crate::events::ReceiverEvent;
use crate::registry::AccountRegistry;

/// Largest datagram accepted in UDP mode.
const MAX_DATAGRAM: usize = 65_507;

/// Back-off after a failed `accept`, e.g. when out of file descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Errors that can occur during server operations
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to address
    #[error("Failed to bind to {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] sia_core::Error),

    /// `start()` called twice
    #[error("Server already started")]
    AlreadyStarted,

    /// Low-level I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

enum Listener {
    Tcp(TcpListener),
    Udp(UdpSocket),
}

/// SIA DC-09 receiver.
///
/// # Lifecycle
///
/// 1. [`bind`](Self::bind) validates the configuration, builds the account
///    registry and binds the socket
/// 2. [`take_events`](Self::take_events) hands out the event channel
/// 3. [`start`](Self::start) arms the availability timers and starts serving
/// 4. [`stop`](Self::stop) shuts everything down
pub struct SiaServer {
    config: ServerConfig,
    local_addr: SocketAddr,
    listener: Option<Listener>,
    dispatcher: Dispatcher,
    events: Option<mpsc::Receiver<ReceiverEvent>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SiaServer {
    /// Validate `config` and bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid (`ServerError::Config`)
    /// - The address is in use or not permitted (`ServerError::BindFailed`)
    pub async fn bind(config: ReceiverConfig) -> std::result::Result<Self, ServerError> {
        config.validate()?;
        let registry = Arc::new(AccountRegistry::from_accounts(&config.accounts)?);
        let server = config.server;

        info!(
            "Binding {:?} receiver to {}",
            server.protocol, server.bind_addr
        );

        let bind_failed = |source: std::io::Error| ServerError::BindFailed {
            addr: server.bind_addr,
            source,
        };
        let listener = match server.protocol {
            Transport::Tcp => Listener::Tcp(
                TcpListener::bind(server.bind_addr)
                    .await
                    .map_err(bind_failed)?,
            ),
            Transport::Udp => Listener::Udp(
                UdpSocket::bind(server.bind_addr)
                    .await
                    .map_err(bind_failed)?,
            ),
        };
        let local_addr = match &listener {
            Listener::Tcp(listener) => listener.local_addr()?,
            Listener::Udp(socket) => socket.local_addr()?,
        };

        let (tx, rx) = mpsc::channel(server.event_buffer);
        let availability = AvailabilityTracker::new(tx.clone());
        let dispatcher = Dispatcher::new(registry, availability, tx);

        info!(
            "Receiver listening on {} ({} accounts, max {} connections)",
            local_addr,
            dispatcher.registry().len(),
            server.max_connections
        );

        Ok(Self {
            config: server,
            local_addr,
            listener: Some(listener),
            dispatcher,
            events: Some(rx),
            cancel: CancellationToken::new(),
            task: None,
        })
    }

    /// Address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Take the event channel. Returns `None` after the first call.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<ReceiverEvent>> {
        self.events.take()
    }

    pub fn registry(&self) -> &Arc<AccountRegistry> {
        self.dispatcher.registry()
    }

    pub fn availability(&self) -> &AvailabilityTracker {
        self.dispatcher.availability()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Arm every account's availability timer and start serving.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns `ServerError::AlreadyStarted` on a second call.
    pub fn start(&mut self) -> std::result::Result<(), ServerError> {
        let listener = self.listener.take().ok_or(ServerError::AlreadyStarted)?;

        for session in self.dispatcher.registry().sessions() {
            let devices = session.devices()?.zone_device_keys();
            self.dispatcher.availability().register(
                session.account().clone(),
                session.ping_interval().unavailable_after(),
                devices,
            );
        }

        let dispatcher = self.dispatcher.clone();
        let cancel = self.cancel.clone();
        let config = self.config.clone();

        self.task = Some(match listener {
            Listener::Tcp(listener) => {
                tokio::spawn(accept_loop(listener, dispatcher, config, cancel))
            }
            Listener::Udp(socket) => tokio::spawn(datagram_loop(socket, dispatcher, config, cancel)),
        });

        info!(addr = %self.local_addr, "Receiver started");
        Ok(())
    }

    /// Stop accepting, cancel availability timers and wait for connection
    /// tasks to finish their current line.
    pub async fn stop(mut self) {
        info!(addr = %self.local_addr, "Stopping receiver");
        self.cancel.cancel();
        self.dispatcher.availability().stop();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Receiver task failed");
            }
        }
        info!("Receiver stopped");
    }
}

async fn accept_loop(
    listener: TcpListener,
    dispatcher: Dispatcher,
    config: ServerConfig,
    cancel: CancellationToken,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            Some(joined) = connections.join_next(), if !connections.is_empty() => {
                if let Err(e) = joined {
                    error!(error = %e, "Connection task failed");
                }
            }

            accepted = listener.accept() => {
                let (stream, addr) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                };
                debug!("Accepted new connection from {}", addr);

                // Reject this connection but keep accepting others
                if connections.len() >= config.max_connections {
                    error!(
                        addr = %addr,
                        max_connections = config.max_connections,
                        current_connections = connections.len(),
                        "Connection rejected: maximum connections reached"
                    );
                    drop(stream);
                    continue;
                }

                // Set TCP_NODELAY for low latency
                if let Err(e) = stream.set_nodelay(true) {
                    warn!("Failed to set TCP_NODELAY for {}: {}", addr, e);
                }

                info!(
                    "Panel connected from {} (total: {})",
                    addr,
                    connections.len() + 1
                );
                connections.spawn(handle_connection(
                    stream,
                    addr,
                    dispatcher.clone(),
                    config.max_line_length,
                    cancel.clone(),
                ));
            }
        }
    }

    drop(listener);
    while let Some(joined) = connections.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Connection task failed");
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    dispatcher: Dispatcher,
    max_line_length: usize,
    cancel: CancellationToken,
) {
    let mut framed = Framed::new(stream, SiaCodec::with_max_line_length(max_line_length));
    let mut burst = ErrorBurst::new();

    loop {
        let item = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(addr = %addr, "Closing connection: receiver stopping");
                break;
            }
            item = framed.next() => item,
        };

        let line = match item {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!(addr = %addr, error = %e, "I/O error from panel (connection closed)");
                break;
            }
            None => {
                info!("Panel {} disconnected", addr);
                break;
            }
        };

        let outcome = dispatcher.handle_line(line);
        let internal = outcome.is_internal_error();
        trace!(addr = %addr, ack = outcome.is_ack(), "Sending reply");

        if let Err(e) = framed.send(outcome.reply).await {
            warn!(addr = %addr, error = %e, "Failed to send reply (connection closed)");
            break;
        }

        if internal && burst.record(Instant::now()) {
            error!(
                addr = %addr,
                limit = INTERNAL_ERROR_BURST_LIMIT,
                window_ms = INTERNAL_ERROR_WINDOW_MS,
                "Closing connection: repeated internal errors"
            );
            break;
        }
    }
}

async fn datagram_loop(
    socket: UdpSocket,
    dispatcher: Dispatcher,
    config: ServerConfig,
    cancel: CancellationToken,
) {
    let mut buffer = vec![0u8; MAX_DATAGRAM];

    loop {
        let received = tokio::select! {
            _ = cancel.cancelled() => break,
            received = socket.recv_from(&mut buffer) => received,
        };

        let (len, peer) = match received {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "Failed to receive datagram");
                continue;
            }
        };

        if let Err(e) = answer_datagram(&socket, &dispatcher, &config, &buffer[..len], peer).await {
            warn!(addr = %peer, error = %e, "Failed to send reply datagram");
        }
    }
}

/// Frame one datagram and send one reply datagram per line.
async fn answer_datagram(
    socket: &UdpSocket,
    dispatcher: &Dispatcher,
    config: &ServerConfig,
    datagram: &[u8],
    peer: SocketAddr,
) -> Result<()> {
    let mut parser = StreamParser::with_max_line_length(config.max_line_length);
    parser.feed(datagram);
    let lines: Vec<_> = parser.drain_frames().collect();
    trace!(addr = %peer, lines = lines.len(), "Datagram received");

    for line in lines {
        let outcome = dispatcher.handle_line(line);
        socket.send_to(&outcome.reply.encode(), peer).await?;
    }
    Ok(())
}

/// Sliding window of internal-error timestamps for one connection.
#[derive(Debug)]
struct ErrorBurst {
    errors: VecDeque<Instant>,
    window: Duration,
    limit: usize,
}

impl ErrorBurst {
    fn new() -> Self {
        Self {
            errors: VecDeque::with_capacity(INTERNAL_ERROR_BURST_LIMIT + 1),
            window: Duration::from_millis(INTERNAL_ERROR_WINDOW_MS),
            limit: INTERNAL_ERROR_BURST_LIMIT,
        }
    }

    /// Record an error at `now`. Returns `true` once more than `limit` errors
    /// fall within the window.
    fn record(&mut self, now: Instant) -> bool {
        while self
            .errors
            .front()
            .is_some_and(|&at| now.duration_since(at) > self.window)
        {
            self.errors.pop_front();
        }
        self.errors.push_back(now);
        self.errors.len() > self.limit
    }
}
