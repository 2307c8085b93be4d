//! Client driver core for the Gridhouse distributed SQL engine.
//!
//! Translates statement/cursor/typed-getter calls into requests against a
//! remote execution service and turns the streamed response back into typed,
//! row-oriented results.
//!
//! Capabilities:
//! - **Statements**: execute queries with positional parameters, schema
//!   context, timeout and fetch-size hints; results are classified into row
//!   sets and update counts.
//! - **Cursors**: forward-only iteration over a lazy, possibly unbounded row
//!   stream, with a client-enforced max-rows cap and deterministic close.
//! - **Typed access**: on-demand coercion of any column into the client's
//!   numeric, string, decimal, temporal or JSON representations.
//! - **Type catalog**: static mapping of engine types to client-visible type
//!   identifiers, display sizes, precision, scale and signedness.
//!
//! Connection establishment and the wire protocol live behind the
//! [api::ExecutionService] and [api::RowStream] seams; an integration
//! provides those and gets the statement and cursor layers for free.

pub mod api;
mod capabilities;
mod coerce;
mod cursor;
mod errors;
mod metadata;
mod statement;
pub mod types;
mod value;

pub use capabilities::CapabilityTable;
pub use coerce::{FromSqlValue, NullDefault};
pub use cursor::{ColumnSelector, FetchDirection, RowCursor};
pub use errors::{DriverError, ResultShape};
pub use metadata::{ColumnDescriptor, CursorMetadata};
pub use statement::{QueryOutcome, Statement, NO_UPDATE_COUNT};
pub use value::{Row, Value};

use api::ExecutionService;

/// Open a statement, execute a single query and collect all of its rows.
pub fn query<E: ExecutionService>(
    exec: &mut E,
    sql: &str,
) -> Result<(CursorMetadata, Vec<Row>), DriverError> {
    log::debug!("query: {sql}");

    let mut stmt = Statement::new(exec);

    let mut cursor = stmt.execute_query(sql, &[])?;
    let metadata = cursor.metadata().clone();

    let mut rows = Vec::new();
    while cursor.advance()? {
        rows.push(cursor.current_row().clone());
    }
    cursor.close()?;
    Ok((metadata, rows))
}
