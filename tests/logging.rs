//! Structured log events emitted by the dispatcher.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tickfsm::dispatch::{HandlerError, StateMachine};
use tickfsm::state_enum;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

state_enum! {
    enum State {
        NotRunning,
        Running,
        Connected,
        Ping,
    }
    lifecycle: NotRunning => Running
}

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    fields: BTreeMap<String, String>,
}

impl Captured {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
struct Capture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl Capture {
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    fn with_message(&self, message: &str) -> Vec<Captured> {
        self.events()
            .into_iter()
            .filter(|event| event.message() == Some(message))
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            fields,
        });
    }
}

fn captured<R>(f: impl FnOnce(&Capture) -> R) -> R {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, || f(&capture))
}

#[test]
fn each_request_logs_one_queued_event_with_from_and_to() {
    captured(|capture| {
        let machine = StateMachine::<State>::default();
        machine.transition(State::Running);
        machine.transitioner().transition(State::Connected);

        let queued = capture.with_message("Queued transition");
        assert_eq!(queued.len(), 2);
        assert!(queued.iter().all(|event| event.level == Level::DEBUG));

        assert_eq!(queued[0].field("from"), Some("NotRunning"));
        assert_eq!(queued[0].field("to"), Some("Running"));
        assert_eq!(queued[1].field("from"), Some("NotRunning"));
        assert_eq!(queued[1].field("to"), Some("Connected"));
    });
}

#[test]
fn each_applied_entry_logs_one_transitioned_event() {
    captured(|capture| {
        let mut machine = StateMachine::<State>::default();
        let handle = machine.transitioner();
        machine
            .add_handler(State::Connected, move || handle.transition(State::Ping))
            .unwrap();

        machine.transition(State::Connected);
        assert_eq!(machine.tick().unwrap(), 2);

        let applied = capture.with_message("Transitioned");
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].field("from"), Some("NotRunning"));
        assert_eq!(applied[0].field("state"), Some("Connected"));
        assert_eq!(applied[1].field("from"), Some("Connected"));
        assert_eq!(applied[1].field("state"), Some("Ping"));

        // The request made from inside the handler sees its own state.
        let queued = capture.with_message("Queued transition");
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[1].field("from"), Some("Connected"));
        assert_eq!(queued[1].field("to"), Some("Ping"));
    });
}

#[test]
fn empty_tick_logs_nothing() {
    captured(|capture| {
        let mut machine = StateMachine::<State>::default();
        assert_eq!(machine.tick().unwrap(), 0);
        assert!(capture.events().is_empty());

        machine.run();
        machine.tick().unwrap();
        let before = capture.events().len();

        assert_eq!(machine.tick().unwrap(), 0);
        assert_eq!(capture.events().len(), before);
    });
}

#[test]
fn failing_handler_logs_a_warning() {
    captured(|capture| {
        let mut machine = StateMachine::<State>::default();
        machine
            .add_fallible_handler(State::Running, || Err(HandlerError::msg("refused")))
            .unwrap();

        machine.run();
        machine.tick().unwrap_err();

        let warnings: Vec<_> = capture
            .events()
            .into_iter()
            .filter(|event| event.level == Level::WARN)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message(), Some("Handler failed"));
        assert_eq!(warnings[0].field("state"), Some("Running"));
        assert_eq!(warnings[0].field("error"), Some("refused"));
    });
}
