#![allow(dead_code)]

use easefetch::mock::{MockTransport, RecordingLogger};
use easefetch::{Logger, Transport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: String,
}

pub fn successful_guard(_: &Value) -> bool {
    true
}

pub fn failing_guard(_: &Value) -> bool {
    false
}

pub struct Harness {
    pub transport: MockTransport,
    pub logger: RecordingLogger,
}

impl Harness {
    pub fn new() -> Self {
        Harness {
            transport: MockTransport::new(),
            logger: RecordingLogger::new(),
        }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.transport.clone())
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::new(self.logger.clone())
    }
}
