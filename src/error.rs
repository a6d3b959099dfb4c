use std::error;
use std::fmt;
use std::io;

/// Represents errors that can occur while driving a remote robot.
#[derive(Debug)]
pub enum Error {
    /// The stub was used after `end()` closed the connection.
    ConnectionClosed,

    /// The peer sent data that is invalid under the command protocol.
    /// Contains a description of the violation.
    ProtocolError { description: String },

    /// The two ends were built from different protocol versions.
    VersionMismatch { local: u32, remote: u32 },

    /// An I/O error occurred on the underlying stream.
    IoError(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConnectionClosed => write!(f, "connection closed"),
            Error::ProtocolError { description } => write!(f, "protocol error: {}", description),
            Error::VersionMismatch { local, remote } => write!(
                f,
                "protocol version mismatch: local {}, remote {}",
                local, remote
            ),
            Error::IoError(err) => write!(f, "io error: {}", err),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IoError(err)
    }
}

/// A specialized `Result` type for robot protocol operations.
pub type Result<T> = std::result::Result<T, Error>;
