//! Read-only column descriptors of one result set.

use itertools::zip_eq;

use crate::errors::DriverError;
use crate::types::TypeTag;

/// Description of one result column. Immutable once the row stream begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub logical_type: TypeTag,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, logical_type: TypeTag, nullable: bool) -> Self {
        ColumnDescriptor {
            name: name.into(),
            logical_type,
            nullable,
        }
    }
}

/// Ordered collection of column descriptors, 1-indexed in the client API.
/// Cardinality is fixed for the lifetime of one cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMetadata {
    columns: Vec<ColumnDescriptor>,
}

impl CursorMetadata {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        CursorMetadata { columns }
    }

    /// Build metadata from parallel name and type lists.
    ///
    /// Columns are nullable: the engine's type system is dynamic and the
    /// stream does not declare non-nullability.
    pub fn from_parts(
        names: impl IntoIterator<Item = String>,
        types: impl IntoIterator<Item = TypeTag>,
    ) -> Self {
        let columns = zip_eq(names, types)
            .map(|(name, logical_type)| ColumnDescriptor {
                name,
                logical_type,
                nullable: true,
            })
            .collect();
        CursorMetadata { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Descriptor of the column at a 1-based index.
    pub fn describe(&self, index: usize) -> Result<&ColumnDescriptor, DriverError> {
        if index < 1 || index > self.columns.len() {
            return Err(DriverError::ColumnIndexOutOfBounds(index));
        }
        Ok(&self.columns[index - 1])
    }

    /// Resolve a column label to its 1-based index.
    ///
    /// Case-sensitive exact match in declared order; when labels are
    /// duplicated, the first match wins.
    pub fn find_column(&self, label: &str) -> Result<usize, DriverError> {
        self.columns
            .iter()
            .position(|c| c.name == label)
            .map(|p| p + 1)
            .ok_or_else(|| DriverError::ColumnNotFound(label.to_string()))
    }
}
