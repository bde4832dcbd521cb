use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("cogito.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("cogito.client.request_errors");

pub(crate) static STREAM_CHUNKS: Counter = Counter::new("cogito.stream.chunks");
pub(crate) static STREAM_ERRORS: Counter = Counter::new("cogito.stream.errors");
pub(crate) static STREAM_BYTES: Counter = Counter::new("cogito.stream.bytes");

pub(crate) static SESSION_TURNS: Counter = Counter::new("cogito.session.turns");
pub(crate) static SESSION_TURN_FAILURES: Counter = Counter::new("cogito.session.turn_failures");
pub(crate) static SESSION_TURN_INTERRUPTS: Counter =
    Counter::new("cogito.session.turn_interrupts");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&STREAM_CHUNKS);
    collector.register_counter(&STREAM_ERRORS);
    collector.register_counter(&STREAM_BYTES);

    collector.register_counter(&SESSION_TURNS);
    collector.register_counter(&SESSION_TURN_FAILURES);
    collector.register_counter(&SESSION_TURN_INTERRUPTS);
}
