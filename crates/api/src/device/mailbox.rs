use biogate_core::command::DeviceCommand;
use tokio::sync::RwLock;

/// Single-slot, last-write-wins command exchange with the sensor.
///
/// Reads never consume the command; the bridge resets the slot to idle after
/// delivering it.
pub struct CommandMailbox {
    current: RwLock<DeviceCommand>,
}

impl CommandMailbox {
    /// Create a mailbox holding the idle command.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(DeviceCommand::idle()),
        }
    }

    /// Overwrite the pending command.
    pub async fn set(&self, command: DeviceCommand) {
        *self.current.write().await = command;
    }

    /// Current command in the `ACTION:ID` form the device reads.
    pub async fn wire(&self) -> String {
        self.current.read().await.wire_format()
    }
}

impl Default for CommandMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_idle() {
        let mailbox = CommandMailbox::new();
        assert_eq!(mailbox.wire().await, "WAIT:0");
    }

    #[tokio::test]
    async fn reads_do_not_consume() {
        let mailbox = CommandMailbox::new();
        mailbox.set(DeviceCommand::delete(12)).await;

        assert_eq!(mailbox.wire().await, "DELETE:12");
        assert_eq!(mailbox.wire().await, "DELETE:12");
    }

    #[tokio::test]
    async fn last_write_wins() {
        let mailbox = CommandMailbox::new();
        mailbox.set(DeviceCommand::delete(3)).await;
        mailbox.set(DeviceCommand::delete(4)).await;
        assert_eq!(mailbox.wire().await, "DELETE:4");

        mailbox.set(DeviceCommand::idle()).await;
        assert_eq!(mailbox.wire().await, "WAIT:0");
    }
}
