use crate::mock::{MockTransport, RecordingLogger};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

mod stream_ext_test;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: String,
}

pub fn payload_json() -> Value {
    json!({ "data": "x" })
}

pub fn accept_all(_: &Value) -> bool {
    true
}

pub fn reject_all(_: &Value) -> bool {
    false
}

pub fn mocks() -> (MockTransport, RecordingLogger) {
    (MockTransport::new(), RecordingLogger::new())
}
