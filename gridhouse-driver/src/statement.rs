//! Statement binding: settings propagation and result-shape classification.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ExecRequest, ExecutionService, RowOutcome, RowStream};
use crate::cursor::{CloseGuard, RowCursor};
use crate::errors::{DriverError, ResultShape};
use crate::value::Value;

/// Update count reported while the last execution produced a row set.
pub const NO_UPDATE_COUNT: i64 = -1;

/// What one execution produced.
pub enum QueryOutcome<S: RowStream> {
    Rows(RowCursor<S>),
    Updated(i64),
}

/// A statement bound to an execution service session.
///
/// Carries the settings that go into every execution request (schema
/// context, timeout, fetch-size hint) and the client-side max-rows cap
/// enforced by the cursors it produces.
pub struct Statement<'conn, E: ExecutionService> {
    exec: &'conn mut E,
    schema: Option<String>,
    timeout: Option<Duration>,
    fetch_size: Option<usize>,
    max_rows: Option<u64>,
    close_on_completion: bool,
    update_count: i64,
    /// Close state shared with the live cursor, if any.
    guard: Option<Arc<CloseGuard>>,
    closed: bool,
}

impl<'conn, E: ExecutionService> Statement<'conn, E> {
    pub fn new(exec: &'conn mut E) -> Self {
        Statement {
            exec,
            schema: None,
            timeout: None,
            fetch_size: None,
            max_rows: None,
            close_on_completion: false,
            update_count: NO_UPDATE_COUNT,
            guard: None,
            closed: false,
        }
    }

    /// Schema to resolve unqualified names against.
    pub fn set_schema(&mut self, schema: Option<String>) {
        self.schema = schema;
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Buffering hint for rows per server round-trip; 0 clears the hint.
    pub fn set_fetch_size(&mut self, fetch_size: usize) {
        self.fetch_size = if fetch_size == 0 {
            None
        } else {
            Some(fetch_size)
        };
    }

    pub fn fetch_size(&self) -> usize {
        self.fetch_size.unwrap_or(0)
    }

    /// Client-enforced cap on rows yielded by produced cursors; 0 removes
    /// the cap.
    pub fn set_max_rows(&mut self, max_rows: u64) {
        self.max_rows = if max_rows == 0 { None } else { Some(max_rows) };
    }

    pub fn max_rows(&self) -> u64 {
        self.max_rows.unwrap_or(0)
    }

    /// Make the cursor's close also close this statement.
    pub fn set_close_on_completion(&mut self) {
        self.close_on_completion = true;
    }

    pub fn is_close_on_completion(&self) -> bool {
        self.close_on_completion
    }

    /// Update count of the last execution, or [NO_UPDATE_COUNT] when it
    /// produced a row set.
    pub fn update_count(&self) -> i64 {
        self.update_count
    }

    pub fn is_closed(&self) -> bool {
        self.closed
            || self
                .guard
                .as_ref()
                .is_some_and(|g| g.statement_closed.load(Ordering::SeqCst))
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.is_closed() {
            return Err(DriverError::ClosedStatement);
        }
        Ok(())
    }

    /// Execute a query, classifying the outcome by shape.
    ///
    /// Any cursor from a previous execution is implicitly closed first.
    pub fn execute(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryOutcome<E::Stream>, DriverError> {
        self.ensure_open()?;
        if sql.trim().is_empty() {
            return Err(DriverError::InvalidArgument(
                "statement text is empty".to_string(),
            ));
        }
        self.discard_cursor();

        log::debug!("executing: {sql}");
        let request = ExecRequest {
            sql,
            params,
            schema: self.schema.as_deref(),
            timeout: self.timeout,
            fetch_size: self.fetch_size,
        };
        match self.exec.execute(request)? {
            RowOutcome::Rows { metadata, stream } => {
                self.update_count = NO_UPDATE_COUNT;
                let guard = Arc::new(CloseGuard::default());
                self.guard = Some(guard.clone());
                Ok(QueryOutcome::Rows(RowCursor::new(
                    stream,
                    Arc::new(metadata),
                    self.max_rows,
                    self.close_on_completion,
                    guard,
                )))
            }
            RowOutcome::Updated(count) => {
                self.update_count = count;
                Ok(QueryOutcome::Updated(count))
            }
        }
    }

    /// Execute a query that must produce a row set.
    pub fn execute_query(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> Result<RowCursor<E::Stream>, DriverError> {
        match self.execute(sql, params)? {
            QueryOutcome::Rows(cursor) => Ok(cursor),
            QueryOutcome::Updated(_) => Err(DriverError::ShapeMismatch {
                expected: ResultShape::RowSet,
                actual: ResultShape::UpdateCount,
            }),
        }
    }

    /// Execute a query that must produce an update count.
    pub fn execute_update(&mut self, sql: &str, params: &[Value]) -> Result<i64, DriverError> {
        match self.execute(sql, params)? {
            QueryOutcome::Updated(count) => Ok(count),
            QueryOutcome::Rows(_) => Err(DriverError::ShapeMismatch {
                expected: ResultShape::UpdateCount,
                actual: ResultShape::RowSet,
            }),
        }
    }

    /// Cancellation is not supported by this layer. Fails loudly instead of
    /// being silently ignored.
    pub fn cancel(&mut self) -> Result<(), DriverError> {
        Err(DriverError::Unsupported("statement cancellation"))
    }

    /// Close the statement and any cursor it produced. Idempotent.
    pub fn close(&mut self) {
        self.discard_cursor();
        self.closed = true;
    }

    /// Flag the live cursor closed through the shared guard. The cursor
    /// releases its stream on its own close or drop.
    fn discard_cursor(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.cursor_closed.store(true, Ordering::SeqCst);
        }
    }
}
