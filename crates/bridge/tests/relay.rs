//! Relay session tests against an in-memory serial link and a recording
//! backend.

use std::sync::Mutex;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use biogate_bridge::client::Backend;
use biogate_bridge::error::BridgeError;
use biogate_bridge::relay::run_session;

const POLL: Duration = Duration::from_millis(10);
const DEADLINE: Duration = Duration::from_secs(5);

#[derive(Default)]
struct Recorded {
    access: Vec<Value>,
    users: Vec<Value>,
    resets: usize,
}

/// Backend double with a single-slot mailbox, like the API.
struct MockBackend {
    command: Mutex<String>,
    fail: bool,
    recorded: Mutex<Recorded>,
}

impl MockBackend {
    fn new(command: &str) -> Self {
        Self {
            command: Mutex::new(command.to_string()),
            fail: false,
            recorded: Mutex::new(Recorded::default()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("DELETE:1")
        }
    }

    fn unreachable() -> BridgeError {
        BridgeError::Status {
            endpoint: "/test",
            status: 503,
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn post_access(&self, payload: &Value) -> Result<(), BridgeError> {
        self.recorded.lock().unwrap().access.push(payload.clone());
        if self.fail {
            return Err(Self::unreachable());
        }
        Ok(())
    }

    async fn post_active_users(&self, payload: &Value) -> Result<(), BridgeError> {
        self.recorded.lock().unwrap().users.push(payload.clone());
        if self.fail {
            return Err(Self::unreachable());
        }
        Ok(())
    }

    async fn poll_command(&self) -> Result<String, BridgeError> {
        if self.fail {
            return Err(Self::unreachable());
        }
        Ok(self.command.lock().unwrap().clone())
    }

    async fn reset_command(&self) -> Result<(), BridgeError> {
        self.recorded.lock().unwrap().resets += 1;
        *self.command.lock().unwrap() = "WAIT:0".to_string();
        Ok(())
    }
}

#[tokio::test]
async fn tagged_lines_are_forwarded_and_the_rest_is_dropped() {
    let backend = MockBackend::new("WAIT:0");
    let (bridge_end, mut device) = tokio::io::duplex(1024);
    let (reader, writer) = tokio::io::split(bridge_end);

    device
        .write_all(
            b"Sensor ready\n\
              __ACCESS__:{\"fingerID\":3,\"confidence\":88}\n\
              __ACCESS__:{broken\n\
              \xff\xfe garbage\n\
              \n\
              __USERS__:{\"ids\":[1,2,5]}\n",
        )
        .await
        .unwrap();
    drop(device);

    let result = tokio::time::timeout(
        DEADLINE,
        run_session(BufReader::new(reader), writer, &backend, POLL),
    )
    .await
    .expect("session should end at end of input");
    assert_matches!(result, Ok(()));

    let recorded = backend.recorded.lock().unwrap();
    assert_eq!(recorded.access, vec![json!({"fingerID": 3, "confidence": 88})]);
    assert_eq!(recorded.users, vec![json!({"ids": [1, 2, 5]})]);
    assert_eq!(recorded.resets, 0);
}

#[tokio::test]
async fn last_line_without_newline_is_still_forwarded() {
    let backend = MockBackend::new("WAIT:0");
    let (bridge_end, mut device) = tokio::io::duplex(1024);
    let (reader, writer) = tokio::io::split(bridge_end);

    device
        .write_all(b"__ACCESS__:{\"fingerID\":-1,\"confidence\":0}")
        .await
        .unwrap();
    drop(device);

    tokio::time::timeout(
        DEADLINE,
        run_session(BufReader::new(reader), writer, &backend, POLL),
    )
    .await
    .unwrap()
    .unwrap();

    let recorded = backend.recorded.lock().unwrap();
    assert_eq!(recorded.access, vec![json!({"fingerID": -1, "confidence": 0})]);
}

#[tokio::test]
async fn pending_command_is_written_once_then_mailbox_reset() {
    let backend = MockBackend::new("DELETE:12");
    let (bridge_end, device) = tokio::io::duplex(1024);
    let (reader, writer) = tokio::io::split(bridge_end);

    let device_task = tokio::spawn(async move {
        let mut lines = BufReader::new(device).lines();
        let first = lines.next_line().await.unwrap();
        // Give the relay a few more polls; no second command may arrive.
        let second = tokio::time::timeout(POLL * 5, lines.next_line()).await;
        (first, second.is_err())
    });

    tokio::time::timeout(
        DEADLINE,
        run_session(BufReader::new(reader), writer, &backend, POLL),
    )
    .await
    .unwrap()
    .unwrap();

    let (first, nothing_more) = device_task.await.unwrap();
    assert_eq!(first.as_deref(), Some("DELETE:12"));
    assert!(nothing_more);
    assert_eq!(backend.recorded.lock().unwrap().resets, 1);
    assert_eq!(*backend.command.lock().unwrap(), "WAIT:0");
}

#[tokio::test]
async fn backend_failures_do_not_end_the_session() {
    let backend = MockBackend::failing();
    let (bridge_end, mut device) = tokio::io::duplex(1024);
    let (reader, writer) = tokio::io::split(bridge_end);

    device
        .write_all(b"__ACCESS__:{\"fingerID\":1,\"confidence\":90}\n__USERS__:{\"ids\":[1]}\n")
        .await
        .unwrap();

    // Let several failing polls happen before closing the link.
    let closer = tokio::spawn(async move {
        tokio::time::sleep(POLL * 5).await;
        drop(device);
    });

    let result = tokio::time::timeout(
        DEADLINE,
        run_session(BufReader::new(reader), writer, &backend, POLL),
    )
    .await
    .unwrap();
    closer.await.unwrap();

    assert_matches!(result, Ok(()));
    let recorded = backend.recorded.lock().unwrap();
    assert_eq!(recorded.access.len(), 1);
    assert_eq!(recorded.users.len(), 1);
    assert_eq!(recorded.resets, 0);
}
