//! Controller-side stub: a [`Drive`] whose operations execute on the remote
//! platform.

use crate::drive::Drive;
use crate::error::{Error, Result};
use crate::protocol;
use crate::types::{RangeReadings, RobotConfig};
use crate::cmds::Command;
use log::{debug, error, trace};
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Options for opening the connection to the remote dispatcher.
///
/// The protocol itself defines no timeouts: a hung remote stalls the
/// controller indefinitely. The timeouts here are an extension point layered
/// onto the socket; `None` (the default) preserves unbounded blocking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectOptions {
    /// Applied to the socket's read half; a blocked `scan()` reply read
    /// fails with an I/O timeout error once exceeded.
    pub read_timeout: Option<Duration>,

    /// Applied to the socket's write half.
    pub write_timeout: Option<Duration>,
}

/// Remotely drives a robot over a bidirectional byte stream.
///
/// Each [`Drive`] method serializes one command onto the stream. Motion
/// commands return as soon as the local write is acknowledged (the remote
/// still executes them one at a time); `scan` is the only true synchronous
/// request/response and blocks until the full reply is received. The stub
/// never retries or buffers: every stream failure surfaces to the caller.
///
/// At most one command may be in flight; issuing another before the
/// previous one's effects (and, for `scan`, its reply) are complete is a
/// caller error that desynchronizes the reply stream.
#[derive(Debug)]
pub struct RemoteRobot<T: ?Sized> {
    stream: Box<T>,
    open: bool,
}

impl<T: ?Sized> RemoteRobot<T>
where
    T: Read + Write,
{
    /// Performs the connection handshake over an already-open stream:
    /// writes the protocol version and the six configuration fields, each
    /// flushed individually.
    ///
    /// # Arguments
    ///
    /// * `stream` - A boxed bidirectional byte stream to the dispatcher.
    /// * `config` - The drive configuration the remote builds its drive from.
    pub fn with_stream(mut stream: Box<T>, config: &RobotConfig) -> Result<RemoteRobot<T>> {
        trace!("sending handshake");
        protocol::write_hello(&mut stream)?;
        protocol::write_config(&mut stream, config)?;
        debug!("handshake sent: {:?}", config);
        Ok(RemoteRobot { stream, open: true })
    }

    fn send(&mut self, command: Command) -> Result<()> {
        if !self.open {
            return Err(Error::ConnectionClosed);
        }
        protocol::write_command(&mut self.stream, &command)
    }

    /// Ends the session: writes the `End` command and closes the stub.
    ///
    /// Any stub call after this fails with [`Error::ConnectionClosed`].
    /// Dropping the robot (or [`into_inner`](Self::into_inner) followed by a
    /// socket shutdown) releases the underlying connection.
    pub fn end(&mut self) -> Result<()> {
        self.send(Command::End)?;
        self.open = false;
        debug!("connection ended");
        Ok(())
    }

    /// Releases the underlying stream, e.g. to shut a socket down after
    /// [`end`](Self::end).
    pub fn into_inner(self) -> Box<T> {
        self.stream
    }
}

impl<T: ?Sized> Drive for RemoteRobot<T>
where
    T: Read + Write,
{
    fn translate(&mut self, distance: f64) -> Result<()> {
        trace!("translate({})", distance);
        self.send(Command::Translate(distance))
    }

    fn translate_forward(&mut self) -> Result<()> {
        trace!("translate_forward");
        self.send(Command::TranslateForward)
    }

    fn translate_backward(&mut self) -> Result<()> {
        trace!("translate_backward");
        self.send(Command::TranslateBackward)
    }

    fn rotate(&mut self, angle: f64) -> Result<()> {
        trace!("rotate({})", angle);
        self.send(Command::Rotate(angle))
    }

    fn rotate_right(&mut self) -> Result<()> {
        trace!("rotate_right");
        self.send(Command::RotateRight)
    }

    fn rotate_left(&mut self) -> Result<()> {
        trace!("rotate_left");
        self.send(Command::RotateLeft)
    }

    /// Requests a scan and blocks until the full reply (one reading per
    /// scanning angle, in sweep order) has been received.
    fn scan(&mut self) -> Result<RangeReadings> {
        trace!("scan");
        self.send(Command::Scan)?;
        let readings = protocol::read_readings(&mut self.stream)?;
        debug!("scan returned {} readings", readings.len());
        Ok(readings)
    }
}

impl RemoteRobot<TcpStream> {
    /// Connects to a remote dispatcher and performs the handshake.
    ///
    /// Fails immediately on any connection error; there is no retry.
    pub fn connect<A: ToSocketAddrs>(
        addr: A,
        config: &RobotConfig,
    ) -> Result<RemoteRobot<TcpStream>> {
        Self::connect_with_options(addr, config, &ConnectOptions::default())
    }

    /// Connects with explicit socket options.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the remote dispatcher.
    /// * `config` - The drive configuration to transmit.
    /// * `options` - Socket timeouts; see [`ConnectOptions`].
    pub fn connect_with_options<A: ToSocketAddrs>(
        addr: A,
        config: &RobotConfig,
        options: &ConnectOptions,
    ) -> Result<RemoteRobot<TcpStream>> {
        let stream = TcpStream::connect(addr).map_err(|err| {
            error!("failed to connect: {}", err);
            Error::from(err)
        })?;
        stream.set_read_timeout(options.read_timeout)?;
        stream.set_write_timeout(options.write_timeout)?;
        debug!("connected to {:?}", stream.peer_addr().ok());
        RemoteRobot::with_stream(Box::new(stream), config)
    }
}
