use crate::Timestamp;

/// Errors raised while assembling a request
///
/// All of them are local and happen before any byte is sent,
/// so retrying with unchanged inputs will never succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The comparator could not be constructed
    MalformedComparator(String),

    /// The predicate filter could not be constructed
    MalformedFilter(String),

    /// Time window with `from > to`
    InvalidTimeRange { from: Timestamp, to: Timestamp },

    /// A filter is already part of the condition
    ConditionAlreadySet,

    /// The underlying mutation does not target any row
    MissingRowKey,

    /// The request was already serialized and can not be changed anymore
    Sealed,

    /// Not a valid `family:qualifier` column key
    InvalidColumnKey(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedComparator(reason) => write!(f, "malformed comparator: {reason}"),
            Self::MalformedFilter(reason) => write!(f, "malformed filter: {reason}"),
            Self::InvalidTimeRange { from, to } => write!(f, "invalid time range: ({from}, {to})"),
            Self::ConditionAlreadySet => write!(f, "filter has already been set"),
            Self::MissingRowKey => write!(f, "mutation has no row key"),
            Self::Sealed => write!(f, "request has already been serialized"),
            Self::InvalidColumnKey(key) => write!(f, "invalid column key: {key:?}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
