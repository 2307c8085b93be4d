//! Forward-only cursor over a row stream.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::RowStream;
use crate::coerce::{FromSqlValue, NullDefault};
use crate::errors::DriverError;
use crate::metadata::CursorMetadata;
use crate::value::{Row, Value};

/// Advisory iteration hint. The cursor is physically forward-only
/// regardless of the direction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchDirection {
    #[default]
    Forward,
    Reverse,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    OnRow(u64),
    AfterLast,
}

/// Close state shared between a statement and the cursor it produced.
///
/// The two handles never reference each other; each side flips flags here
/// and consults them in its own operations. `closing` breaks the
/// close-on-completion cycle (cursor closes statement closes cursor).
#[derive(Debug, Default)]
pub(crate) struct CloseGuard {
    pub(crate) cursor_closed: AtomicBool,
    pub(crate) statement_closed: AtomicBool,
    closing: AtomicBool,
}

/// Selects a column of the current row, by 1-based index or by label.
pub trait ColumnSelector {
    /// Resolve to a 1-based column index.
    fn resolve(&self, metadata: &CursorMetadata) -> Result<usize, DriverError>;
}

impl ColumnSelector for usize {
    fn resolve(&self, metadata: &CursorMetadata) -> Result<usize, DriverError> {
        if *self < 1 || *self > metadata.column_count() {
            return Err(DriverError::ColumnIndexOutOfBounds(*self));
        }
        Ok(*self)
    }
}

impl ColumnSelector for &str {
    fn resolve(&self, metadata: &CursorMetadata) -> Result<usize, DriverError> {
        metadata.find_column(self)
    }
}

/// The forward-only iteration handle over a query's row stream.
///
/// Position moves `BeforeFirst -> OnRow(1..) -> AfterLast` and never goes
/// backward. Single-owner, single-thread use by contract; there is no
/// internal locking.
pub struct RowCursor<S: RowStream> {
    stream: S,
    metadata: Arc<CursorMetadata>,
    position: Position,
    current: Option<Row>,
    /// Client-enforced cap on rows ever yielded, independent of what the
    /// server sends.
    row_limit: Option<u64>,
    yielded: u64,
    was_null: bool,
    direction: FetchDirection,
    close_on_completion: bool,
    guard: Arc<CloseGuard>,
    released: bool,
}

impl<S: RowStream> RowCursor<S> {
    pub(crate) fn new(
        stream: S,
        metadata: Arc<CursorMetadata>,
        row_limit: Option<u64>,
        close_on_completion: bool,
        guard: Arc<CloseGuard>,
    ) -> Self {
        RowCursor {
            stream,
            metadata,
            position: Position::BeforeFirst,
            current: None,
            row_limit,
            yielded: 0,
            was_null: false,
            direction: FetchDirection::default(),
            close_on_completion,
            guard,
            released: false,
        }
    }

    pub fn metadata(&self) -> &CursorMetadata {
        &self.metadata
    }

    pub fn is_closed(&self) -> bool {
        self.guard.cursor_closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.is_closed() {
            return Err(DriverError::ClosedCursor);
        }
        Ok(())
    }

    /// Move to the next row. Returns false once the stream is exhausted or
    /// the row limit is reached; keeps returning false from then on without
    /// touching the stream again.
    pub fn advance(&mut self) -> Result<bool, DriverError> {
        self.ensure_open()?;

        if self.position == Position::AfterLast {
            return Ok(false);
        }
        if let Some(limit) = self.row_limit {
            if self.yielded >= limit {
                log::debug!("row limit of {limit} reached, cursor is done");
                self.position = Position::AfterLast;
                self.current = None;
                return Ok(false);
            }
        }
        match self.stream.next_row()? {
            Some(row) => {
                self.yielded += 1;
                self.position = Position::OnRow(self.yielded);
                self.current = Some(row);
                Ok(true)
            }
            None => {
                log::debug!("row stream exhausted after {} rows", self.yielded);
                self.position = Position::AfterLast;
                self.current = None;
                Ok(false)
            }
        }
    }

    /// The row the cursor is positioned on.
    ///
    /// # Panics
    ///
    /// Panics when the cursor is before the first or after the last row.
    /// Calling this outside of `advance() == true` is a bug in the caller.
    pub fn current_row(&self) -> &Row {
        match self.position {
            Position::OnRow(_) => self.current.as_ref().expect("row stored while on a row"),
            _ => panic!("cursor is not positioned on a row"),
        }
    }

    pub fn is_before_first(&self) -> Result<bool, DriverError> {
        self.ensure_open()?;
        Ok(self.position == Position::BeforeFirst)
    }

    pub fn is_after_last(&self) -> Result<bool, DriverError> {
        self.ensure_open()?;
        Ok(self.position == Position::AfterLast)
    }

    /// 1-based index of the current row, or 0 when not on a row.
    pub fn row_index(&self) -> Result<u64, DriverError> {
        self.ensure_open()?;
        Ok(match self.position {
            Position::OnRow(n) => n,
            _ => 0,
        })
    }

    /// Read a column of the current row, substituting the representation's
    /// zero value for SQL NULL and recording the null-ness for [Self::was_null].
    pub fn get<T, C>(&mut self, column: C) -> Result<T, DriverError>
    where
        T: NullDefault,
        C: ColumnSelector,
    {
        Ok(self
            .get_opt(column)?
            .unwrap_or_else(|| T::null_default()))
    }

    /// Read a column of the current row; SQL NULL becomes `None`.
    pub fn get_opt<T, C>(&mut self, column: C) -> Result<Option<T>, DriverError>
    where
        T: FromSqlValue,
        C: ColumnSelector,
    {
        self.ensure_open()?;
        let index = column.resolve(&self.metadata)?;

        let value = self.value_at(index)?;
        let is_null = value.is_null();
        let converted = if is_null { None } else { Some(T::from_sql(value)?) };
        self.was_null = is_null;
        Ok(converted)
    }

    fn value_at(&self, index: usize) -> Result<&Value, DriverError> {
        self.current_row()
            .get(index - 1)
            .ok_or(DriverError::ColumnIndexOutOfBounds(index))
    }

    /// Whether the most recent column read saw SQL NULL.
    pub fn was_null(&self) -> bool {
        self.was_null
    }

    pub fn fetch_direction(&self) -> FetchDirection {
        self.direction
    }

    /// Record an iteration hint. Purely advisory.
    pub fn set_fetch_direction(&mut self, direction: FetchDirection) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.direction = direction;
        Ok(())
    }

    /// Release the stream and, when the owning statement asked for close on
    /// completion, mark the statement closed as well. Idempotent.
    pub fn close(&mut self) -> Result<(), DriverError> {
        if self.is_closed() && self.released {
            return Ok(());
        }
        // a close initiated by the other handle is already in flight
        if self.guard.closing.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        log::debug!("closing cursor after {} rows", self.yielded);
        self.guard.cursor_closed.store(true, Ordering::SeqCst);
        self.current = None;

        let released = if self.released {
            Ok(())
        } else {
            self.released = true;
            self.stream.close()
        };

        if self.close_on_completion {
            self.guard.statement_closed.store(true, Ordering::SeqCst);
        }
        self.guard.closing.store(false, Ordering::SeqCst);
        released
    }
}

// the stream itself carries no useful state to report
impl<S: RowStream> fmt::Debug for RowCursor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCursor")
            .field("position", &self.position)
            .field("yielded", &self.yielded)
            .field("row_limit", &self.row_limit)
            .field("direction", &self.direction)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl<S: RowStream> Drop for RowCursor<S> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
