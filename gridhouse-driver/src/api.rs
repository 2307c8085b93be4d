//! Seams toward the Gridhouse execution service.
//!
//! The driver core does not own connection establishment, cluster discovery
//! or the wire format; it talks to an [ExecutionService] and consumes the
//! [RowStream] it hands back. The important traits are:
//! - [ExecutionService], providing [ExecutionService::execute],
//! - [RowStream], the lazy, server-driven sequence of rows under a cursor.

use std::time::Duration;

use crate::errors::DriverError;
use crate::metadata::CursorMetadata;
use crate::value::{Row, Value};

/// One execution request, carrying the statement-level settings that apply
/// to it.
#[derive(Debug, Clone)]
pub struct ExecRequest<'a> {
    pub sql: &'a str,
    /// Positional parameter values.
    pub params: &'a [Value],
    /// Schema to resolve unqualified names against.
    pub schema: Option<&'a str>,
    pub timeout: Option<Duration>,
    /// Server-side buffering hint: rows per network round-trip.
    /// Not a correctness constraint.
    pub fetch_size: Option<usize>,
}

/// Result of one execution: a row set or an update count.
#[derive(Debug)]
pub enum RowOutcome<S> {
    Rows {
        metadata: CursorMetadata,
        stream: S,
    },
    Updated(i64),
}

impl<S> RowOutcome<S> {
    pub fn is_row_set(&self) -> bool {
        matches!(self, RowOutcome::Rows { .. })
    }
}

/// A session with the remote SQL execution service.
pub trait ExecutionService {
    type Stream: RowStream;

    /// Submit a query for execution. Retry of transient cluster errors, if
    /// any, happens behind this call; the driver core never retries.
    fn execute(&mut self, request: ExecRequest<'_>)
        -> Result<RowOutcome<Self::Stream>, DriverError>;

    /// Tear down the session.
    fn shutdown(&mut self) -> Result<(), DriverError>;
}

/// Lazy, possibly unbounded sequence of rows underlying one cursor.
pub trait RowStream {
    /// Pull the next row. Blocking: may wait on network I/O performed by the
    /// service, bounded only by the service's own timeout.
    fn next_row(&mut self) -> Result<Option<Row>, DriverError>;

    /// Release server-side resources of an in-flight or exhausted stream.
    /// Must be safe to call multiple times.
    fn close(&mut self) -> Result<(), DriverError>;
}
