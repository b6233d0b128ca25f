//! Identify-on-connect session client.

use crate::dispatch::{HandlerError, StateMachine, TickError, Transitioner};
use crate::session::collaborators::{
    Delay, EventSink, IdentitySource, Transport, TransportEvent,
};
use crate::session::config::SessionConfig;
use crate::session::error::SessionError;
use crate::session::identity::identity_frame;
use crate::session::state::SessionState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Session client wired on top of a [`StateMachine`].
///
/// After [`start`](Self::start) the handlers drive this sequence:
///
/// - `Running`: schedule `transport.connect()` after `connect_delay`
/// - transport opened: request `Connected`
/// - `Connected`: request `Ping`, then send the identity frame after
///   `identify_delay`; the send outcome sets the identified flag
/// - `Pong`: no-op
/// - transport closed: request `Done`
///
/// Transport and timer callbacks may fire on any thread. They only request
/// transitions; all handlers run inside [`tick`](Self::tick).
pub struct SessionClient<T, D, I> {
    machine: StateMachine<SessionState>,
    transport: Arc<T>,
    delay: Arc<D>,
    identity: Arc<I>,
    identified: Arc<AtomicBool>,
    config: SessionConfig,
}

impl<T, D, I> SessionClient<T, D, I>
where
    T: Transport,
    D: Delay,
    I: IdentitySource,
{
    pub fn new(transport: Arc<T>, delay: Arc<D>, identity: Arc<I>, config: SessionConfig) -> Self {
        Self {
            machine: StateMachine::default(),
            transport,
            delay,
            identity,
            identified: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    /// Register the session handlers, subscribe to the transport and request
    /// `Running`.
    ///
    /// Calling this twice fails with [`SessionError::Registration`].
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.connect_on_run()?;
        self.identify_on_connect()?;
        self.transport.subscribe(event_sink(self.machine.transitioner()));
        self.machine.run();
        Ok(())
    }

    fn connect_on_run(&mut self) -> Result<(), SessionError> {
        let transport = Arc::clone(&self.transport);
        let delay = Arc::clone(&self.delay);
        let after = self.config.connect_delay;

        self.machine.add_handler(SessionState::Running, move || {
            let transport = Arc::clone(&transport);
            delay.schedule(after, Box::new(move || transport.connect()));
        })?;
        Ok(())
    }

    fn identify_on_connect(&mut self) -> Result<(), SessionError> {
        let handle = self.machine.transitioner();
        let transport = Arc::clone(&self.transport);
        let delay = Arc::clone(&self.delay);
        let identity = Arc::clone(&self.identity);
        let identified = Arc::clone(&self.identified);
        let after = self.config.identify_delay;
        let client_type = self.config.client_type.clone();

        self.machine
            .add_fallible_handler(SessionState::Connected, move || {
                handle.transition(SessionState::Ping);

                let frame = identity_frame(&identity.identity(), &client_type)
                    .map_err(HandlerError::new)?;
                let transport = Arc::clone(&transport);
                let identified = Arc::clone(&identified);
                delay.schedule(
                    after,
                    Box::new(move || {
                        transport.send(
                            frame,
                            Box::new(move |success| {
                                debug!(success, "Identification sent");
                                identified.store(success, Ordering::SeqCst);
                            }),
                        );
                    }),
                );
                Ok(())
            })?;
        self.machine.add_handler(SessionState::Pong, || {})?;
        Ok(())
    }

    /// Send an application frame.
    ///
    /// Only allowed once the transport is connected and the identity frame
    /// was acknowledged; otherwise logs and returns
    /// [`SessionError::NotReady`].
    pub fn send_message(&self, message: impl Into<String>) -> Result<(), SessionError> {
        if !(self.transport.is_connected() && self.is_identified()) {
            warn!("Server not connected or identified");
            return Err(SessionError::NotReady);
        }
        self.transport.send(
            message.into(),
            Box::new(|success| debug!(success, "Message sent")),
        );
        Ok(())
    }

    /// Apply pending transitions; call repeatedly from the driver.
    pub fn tick(&mut self) -> Result<usize, TickError> {
        self.machine.tick()
    }

    pub fn current_state(&self) -> SessionState {
        self.machine.current_state()
    }

    pub fn is_identified(&self) -> bool {
        self.identified.load(Ordering::SeqCst)
    }

    pub fn transitioner(&self) -> Transitioner<SessionState> {
        self.machine.transitioner()
    }

    pub fn machine(&self) -> &StateMachine<SessionState> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut StateMachine<SessionState> {
        &mut self.machine
    }
}

fn event_sink(handle: Transitioner<SessionState>) -> EventSink {
    Arc::new(move |event: TransportEvent| match event {
        TransportEvent::Opened => {
            info!("Transport connected");
            handle.transition(SessionState::Connected);
        }
        TransportEvent::Message(data) => info!(%data, "Message received"),
        TransportEvent::Closed { reason } => {
            info!(%reason, "Transport closed");
            handle.transition(SessionState::Done);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::collaborators::{DelayedAction, SendCallback};
    use crate::session::identity::InstanceIdentity;
    use parking_lot::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct LoopbackTransport {
        sink: Mutex<Option<EventSink>>,
        connected: AtomicBool,
        refuse_sends: AtomicBool,
        sent: Mutex<Vec<String>>,
    }

    impl LoopbackTransport {
        fn emit(&self, event: TransportEvent) {
            let sink = self.sink.lock().clone();
            if let Some(sink) = sink {
                sink(event);
            }
        }
    }

    impl Transport for LoopbackTransport {
        fn subscribe(&self, sink: EventSink) {
            *self.sink.lock() = Some(sink);
        }

        fn connect(&self) {
            self.connected.store(true, Ordering::SeqCst);
            self.emit(TransportEvent::Opened);
        }

        fn send(&self, payload: String, on_complete: SendCallback) {
            self.sent.lock().push(payload);
            on_complete(!self.refuse_sends.load(Ordering::SeqCst));
        }

        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }
    }

    /// Runs actions immediately and records the requested delays.
    #[derive(Default)]
    struct ImmediateDelay {
        requested: Mutex<Vec<Duration>>,
    }

    impl Delay for ImmediateDelay {
        fn schedule(&self, after: Duration, action: DelayedAction) {
            self.requested.lock().push(after);
            action();
        }
    }

    fn client() -> (
        SessionClient<LoopbackTransport, ImmediateDelay, InstanceIdentity>,
        Arc<LoopbackTransport>,
        Arc<ImmediateDelay>,
    ) {
        let transport = Arc::new(LoopbackTransport::default());
        let delay = Arc::new(ImmediateDelay::default());
        let client = SessionClient::new(
            Arc::clone(&transport),
            Arc::clone(&delay),
            Arc::new(InstanceIdentity::fixed("device-1")),
            SessionConfig::default(),
        );
        (client, transport, delay)
    }

    #[test]
    fn start_requests_running_without_dispatching() {
        let (mut client, transport, _) = client();
        client.start().unwrap();

        assert_eq!(client.current_state(), SessionState::NotRunning);
        assert!(!transport.is_connected());
    }

    #[test]
    fn one_tick_connects_and_identifies() {
        let (mut client, transport, delay) = client();
        client.start().unwrap();

        assert_eq!(client.tick().unwrap(), 3);

        assert_eq!(client.current_state(), SessionState::Ping);
        assert!(client.is_identified());
        assert_eq!(
            *transport.sent.lock(),
            vec![r#"[{"proto":{"identity":"device-1","type":"unity"}}]"#.to_string()]
        );
        assert_eq!(
            *delay.requested.lock(),
            vec![Duration::from_millis(100), Duration::from_millis(50)]
        );
    }

    #[test]
    fn send_message_requires_identification() {
        let (mut client, transport, _) = client();
        client.start().unwrap();

        assert!(matches!(
            client.send_message("hello"),
            Err(SessionError::NotReady)
        ));

        client.tick().unwrap();
        client.send_message("hello").unwrap();
        assert_eq!(transport.sent.lock().last().map(String::as_str), Some("hello"));
    }

    #[test]
    fn refused_identification_keeps_client_unidentified() {
        let (mut client, transport, _) = client();
        transport.refuse_sends.store(true, Ordering::SeqCst);
        client.start().unwrap();

        assert_eq!(client.tick().unwrap(), 3);

        assert_eq!(client.current_state(), SessionState::Ping);
        assert!(transport.is_connected());
        assert!(!client.is_identified());
        assert_eq!(transport.sent.lock().len(), 1);
        assert!(matches!(
            client.send_message("hello"),
            Err(SessionError::NotReady)
        ));
        assert_eq!(transport.sent.lock().len(), 1);
    }

    #[test]
    fn close_event_finishes_session() {
        let (mut client, transport, _) = client();
        client.start().unwrap();
        client.tick().unwrap();

        transport.emit(TransportEvent::Message("welcome".to_string()));
        transport.emit(TransportEvent::Closed {
            reason: "server shutdown".to_string(),
        });

        assert_eq!(client.tick().unwrap(), 1);
        assert_eq!(client.current_state(), SessionState::Done);
    }

    #[test]
    fn start_twice_is_rejected() {
        let (mut client, _, _) = client();
        client.start().unwrap();

        assert!(matches!(
            client.start(),
            Err(SessionError::Registration(_))
        ));
    }

    #[test]
    fn pong_is_handled_as_noop() {
        let (mut client, _, _) = client();
        client.start().unwrap();
        client.tick().unwrap();

        client.transitioner().transition(SessionState::Pong);
        assert_eq!(client.tick().unwrap(), 1);
        assert_eq!(client.current_state(), SessionState::Pong);
    }
}
