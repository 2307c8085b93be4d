//! Static catalog of Gridhouse column types.
//!
//! The catalog is a pure function of static data: one [TypeInfo] record per
//! [TypeTag], plus the mapping to client-visible type identifiers. It is
//! never mutated and safe for unsynchronized concurrent reads.

use std::fmt;

/// Logical column type of the Gridhouse engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Varchar,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Real,
    Double,
    Date,
    Time,
    Timestamp,
    TimestampWithTz,
    Object,
    Json,
    Null,
}

/// Client-visible characteristics of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Maximum width of the display form, in characters.
    pub display_size: i32,
    pub precision: i32,
    pub scale: i32,
    pub signed: bool,
}

const fn info(display_size: i32, precision: i32, scale: i32, signed: bool) -> TypeInfo {
    TypeInfo {
        display_size,
        precision,
        scale,
        signed,
    }
}

/// Type identifier of the standard relational client interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientTypeId {
    Varchar,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Real,
    Double,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    JavaObject,
    Null,
}

impl ClientTypeId {
    /// Numeric code of this identifier, as defined by the client interface.
    pub fn code(self) -> i32 {
        match self {
            ClientTypeId::Varchar => 12,
            ClientTypeId::Boolean => 16,
            ClientTypeId::TinyInt => -6,
            ClientTypeId::SmallInt => 5,
            ClientTypeId::Integer => 4,
            ClientTypeId::BigInt => -5,
            ClientTypeId::Decimal => 3,
            ClientTypeId::Real => 7,
            ClientTypeId::Double => 8,
            ClientTypeId::Date => 91,
            ClientTypeId::Time => 92,
            ClientTypeId::Timestamp => 93,
            ClientTypeId::TimestampWithTimezone => 2014,
            ClientTypeId::JavaObject => 2000,
            ClientTypeId::Null => 0,
        }
    }
}

impl TypeTag {
    /// Display size, precision, scale and signedness of this type.
    pub fn info(self) -> TypeInfo {
        match self {
            TypeTag::Varchar => info(i32::MAX, i32::MAX, 0, false),
            TypeTag::Boolean => info(5, 1, 0, false),
            TypeTag::TinyInt => info(4, 3, 0, true),
            TypeTag::SmallInt => info(6, 5, 0, true),
            TypeTag::Integer => info(11, 10, 0, true),
            TypeTag::BigInt => info(20, 19, 0, true),
            TypeTag::Decimal => info(i32::MAX, 38, 18, true),
            TypeTag::Real => info(15, 7, 7, true),
            TypeTag::Double => info(24, 15, 15, true),
            TypeTag::Date => info(10, 10, 0, false),
            TypeTag::Time => info(18, 18, 9, false),
            TypeTag::Timestamp => info(29, 29, 9, false),
            TypeTag::TimestampWithTz => info(35, 35, 9, false),
            TypeTag::Object => info(i32::MAX, 0, 0, false),
            TypeTag::Json => info(i32::MAX, 0, 0, false),
            TypeTag::Null => info(4, 0, 0, false),
        }
    }

    /// Client type identifier for this type.
    ///
    /// `None` for types without a standard client analogue (JSON), which the
    /// caller reports as an unmapped type rather than failing.
    pub fn client_type_id(self) -> Option<ClientTypeId> {
        Some(match self {
            TypeTag::Varchar => ClientTypeId::Varchar,
            TypeTag::Boolean => ClientTypeId::Boolean,
            TypeTag::TinyInt => ClientTypeId::TinyInt,
            TypeTag::SmallInt => ClientTypeId::SmallInt,
            TypeTag::Integer => ClientTypeId::Integer,
            TypeTag::BigInt => ClientTypeId::BigInt,
            TypeTag::Decimal => ClientTypeId::Decimal,
            TypeTag::Real => ClientTypeId::Real,
            TypeTag::Double => ClientTypeId::Double,
            TypeTag::Date => ClientTypeId::Date,
            TypeTag::Time => ClientTypeId::Time,
            TypeTag::Timestamp => ClientTypeId::Timestamp,
            TypeTag::TimestampWithTz => ClientTypeId::TimestampWithTimezone,
            TypeTag::Object => ClientTypeId::JavaObject,
            TypeTag::Json => return None,
            TypeTag::Null => ClientTypeId::Null,
        })
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeTag::TinyInt
                | TypeTag::SmallInt
                | TypeTag::Integer
                | TypeTag::BigInt
                | TypeTag::Decimal
                | TypeTag::Real
                | TypeTag::Double
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TypeTag::Varchar => "VARCHAR",
            TypeTag::Boolean => "BOOLEAN",
            TypeTag::TinyInt => "TINYINT",
            TypeTag::SmallInt => "SMALLINT",
            TypeTag::Integer => "INTEGER",
            TypeTag::BigInt => "BIGINT",
            TypeTag::Decimal => "DECIMAL",
            TypeTag::Real => "REAL",
            TypeTag::Double => "DOUBLE",
            TypeTag::Date => "DATE",
            TypeTag::Time => "TIME",
            TypeTag::Timestamp => "TIMESTAMP",
            TypeTag::TimestampWithTz => "TIMESTAMP WITH TIME ZONE",
            TypeTag::Object => "OBJECT",
            TypeTag::Json => "JSON",
            TypeTag::Null => "NULL",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
