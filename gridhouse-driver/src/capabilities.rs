//! Fixed capability answers of the driver.
//!
//! The metadata layer renders its capability report from this one constant
//! table instead of implementing a method per question.

/// Capability table of the driver: every answer is fixed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityTable {
    pub driver_name: &'static str,
    pub read_only: bool,
    pub supports_transactions: bool,
    pub supports_batch_updates: bool,
    pub scrollable_cursors: bool,
    pub updatable_cursors: bool,
    /// Cursors answer positional state queries (before-first, after-last,
    /// row index).
    pub positional_state_queries: bool,
    /// Max-rows is cut off on the client, independent of server result size.
    pub client_side_max_rows: bool,
    pub supports_schemas: bool,
    pub supports_catalogs: bool,
    pub identifier_quote: &'static str,
    /// 0 means no limit.
    pub max_statement_length: usize,
    /// 0 means no limit.
    pub max_columns_in_select: usize,
}

impl CapabilityTable {
    pub const DEFAULT: CapabilityTable = CapabilityTable {
        driver_name: "Gridhouse SQL driver",
        read_only: false,
        supports_transactions: false,
        supports_batch_updates: false,
        scrollable_cursors: false,
        updatable_cursors: false,
        positional_state_queries: true,
        client_side_max_rows: true,
        supports_schemas: true,
        supports_catalogs: false,
        identifier_quote: "\"",
        max_statement_length: 0,
        max_columns_in_select: 0,
    };
}

impl Default for CapabilityTable {
    fn default() -> Self {
        CapabilityTable::DEFAULT
    }
}
