//! Serial device access.
//!
//! The tty is opened twice, once per direction, so reading and writing
//! never contend for the same handle. Line settings (115200 8N1, raw) are
//! applied to the device outside the bridge, e.g.
//! `stty -F /dev/ttyUSB0 115200 raw -echo`.

use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tokio::io::BufReader;

use crate::error::BridgeError;

/// Read and write halves of an open serial device.
pub struct SerialLink {
    pub reader: BufReader<File>,
    pub writer: File,
}

pub async fn open(path: &Path) -> Result<SerialLink, BridgeError> {
    let reader = OpenOptions::new().read(true).open(path).await?;
    let writer = OpenOptions::new().write(true).open(path).await?;
    Ok(SerialLink {
        reader: BufReader::new(reader),
        writer,
    })
}
