//! Session Client
//!
//! This demo drives a session client against an in-process echo transport.
//!
//! Key concepts:
//! - Transport callbacks fire on their own thread and only request transitions
//! - Handlers run on the driver task, one at a time, in request order
//! - Waits go through a delay collaborator instead of blocking a handler
//!
//! Run with: cargo run --example session_client

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tickfsm::driver::Ticker;
use tickfsm::session::{
    EventSink, InstanceIdentity, SendCallback, SessionClient, SessionConfig, SessionState,
    TokioDelay, Transport, TransportEvent,
};

/// Transport that echoes every frame back from a background thread.
#[derive(Clone, Default)]
struct EchoTransport {
    sink: Arc<Mutex<Option<EventSink>>>,
    connected: Arc<AtomicBool>,
}

impl EchoTransport {
    fn emit(&self, event: TransportEvent) {
        let sink = self.sink.lock().clone();
        if let Some(sink) = sink {
            sink(event);
        }
    }
}

impl Transport for EchoTransport {
    fn subscribe(&self, sink: EventSink) {
        *self.sink.lock() = Some(sink);
    }

    fn connect(&self) {
        let transport = self.clone();
        thread::spawn(move || {
            transport.connected.store(true, Ordering::SeqCst);
            transport.emit(TransportEvent::Opened);
        });
    }

    fn send(&self, payload: String, on_complete: SendCallback) {
        let transport = self.clone();
        thread::spawn(move || {
            on_complete(true);
            transport.emit(TransportEvent::Message(payload));
        });
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("tickfsm=debug")
        .init();

    println!("=== Session Client Demo ===\n");

    let transport = EchoTransport::default();
    let mut client = SessionClient::new(
        Arc::new(transport.clone()),
        Arc::new(TokioDelay::try_current()?),
        Arc::new(InstanceIdentity::generate()),
        SessionConfig::default(),
    );

    client.start()?;
    let ticker = Ticker::new(Duration::from_millis(16))?;
    ticker
        .drive_until(client.machine_mut(), |state| state == SessionState::Ping)
        .await?;
    println!("Reached {:?}", client.current_state());

    tokio::time::timeout(Duration::from_secs(5), async {
        while !client.is_identified() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .map_err(|_| "identification was not acknowledged within 5s")?;
    client.send_message(r#"{"greeting":"hello"}"#)?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    transport.connected.store(false, Ordering::SeqCst);
    transport.emit(TransportEvent::Closed {
        reason: "demo finished".to_string(),
    });
    ticker
        .drive_until(client.machine_mut(), |state| state == SessionState::Done)
        .await?;

    println!("Path: {:?}", client.machine().history().path());
    println!("\n=== Demo Complete ===");
    Ok(())
}
