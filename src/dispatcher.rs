//! Remote-side dispatch loop.
//!
//! Lifecycle of one connection: `AwaitingConnection` (the caller accepts a
//! connection) → `Configuring` ([`Dispatcher::handshake`]) → `Dispatching`
//! ([`Dispatcher::run`]) → `Closing` (the caller shuts the stream down).
//! One inbound connection per process lifetime; there is no reconnection
//! after `End`.

use crate::cmds::Command;
use crate::drive::Drive;
use crate::error::{Error, Result};
use crate::protocol;
use crate::types::RobotConfig;
use log::{debug, info, warn};
use std::io::{Read, Write};

/// How the dispatch loop came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The controller sent `End`: the expected, controlled termination.
    Requested,

    /// The stream failed mid-session (disconnect, reset). Logged, not an
    /// error: all failure is terminal for the connection anyway.
    ConnectionLost,
}

enum Flow {
    Continue,
    Stop,
}

/// Decodes commands from a stream and invokes them on a local drive.
///
/// The dispatcher owns both the stream and the drive; it runs on a single
/// thread and each command blocks until the drive call completes, so at
/// most one command is ever executing.
#[derive(Debug)]
pub struct Dispatcher<D, T: ?Sized> {
    drive: D,
    stream: Box<T>,
}

impl<D, T: ?Sized> Dispatcher<D, T>
where
    D: Drive,
    T: Read + Write,
{
    /// Performs the configuring phase on a fresh connection: verifies the
    /// protocol version, reads the six configuration fields in order, and
    /// builds the drive from them via `build`.
    ///
    /// Any read failure or version mismatch here is fatal; the caller must
    /// close the stream.
    ///
    /// # Arguments
    ///
    /// * `stream` - The accepted bidirectional byte stream.
    /// * `build` - Constructs the drive capability from the received
    ///   configuration.
    pub fn handshake<F>(mut stream: Box<T>, build: F) -> Result<Dispatcher<D, T>>
    where
        F: FnOnce(&RobotConfig) -> Result<D>,
    {
        protocol::read_hello(&mut stream)?;
        let config = protocol::read_config(&mut stream)?;
        info!("configured: {:?}", config);
        let drive = build(&config)?;
        Ok(Dispatcher { drive, stream })
    }

    /// Runs the dispatch loop until the session ends.
    ///
    /// Reads one command at a time and blocks on the drive until the motion
    /// or scan is complete before reading the next. Returns
    /// `Ok(Shutdown::Requested)` on `End`, `Ok(Shutdown::ConnectionLost)` if
    /// the stream fails mid-session, and `Err` on a protocol violation
    /// (unknown ordinal), which is unrecoverable because the unframed stream
    /// cannot be resynchronized. After this returns, no further reads are
    /// issued.
    pub fn run(&mut self) -> Result<Shutdown> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => {
                    info!("end received, closing connection");
                    return Ok(Shutdown::Requested);
                }
                Err(Error::IoError(err)) => {
                    warn!("connection lost: {}", err);
                    return Ok(Shutdown::ConnectionLost);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self) -> Result<Flow> {
        let command = protocol::read_command(&mut self.stream)?;
        debug!("dispatching {:?}", command);
        match command {
            Command::Translate(distance) => self.drive.translate(distance)?,
            Command::TranslateForward => self.drive.translate_forward()?,
            Command::TranslateBackward => self.drive.translate_backward()?,
            Command::Rotate(angle) => self.drive.rotate(angle)?,
            Command::RotateRight => self.drive.rotate_right()?,
            Command::RotateLeft => self.drive.rotate_left()?,
            Command::Scan => {
                let readings = self.drive.scan()?;
                protocol::write_readings(&mut self.stream, &readings)?;
            }
            Command::End => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    /// The drive, e.g. to inspect state after the loop has finished.
    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Releases the stream so the caller can close it.
    pub fn into_inner(self) -> Box<T> {
        self.stream
    }
}
