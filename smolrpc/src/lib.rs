//! Conditional mutation requests ("check and mutate") for column stores
//! speaking the HBase RPC protocol.
//!
//! ```
//! use smolrpc::{CheckAndMutate, Mutation};
//!
//! let put = Mutation::put("table", "r1", vec![smolrpc::cell!("cf:q1", None, b"v2".to_vec())]);
//!
//! // Only overwrite if the current value is still "v1"
//! let mut request = CheckAndMutate::if_equals(put, "cf", "q1", "v1")?;
//! request.set_time_range(0, 1_000)?;
//!
//! let message = request.to_proto();
//! assert!(message.condition.is_some());
//! # Ok::<(), smolrpc::Error>(())
//! ```

mod call;
mod check_and_mutate;
mod column_key;
mod comparator;
mod error;
mod filter;
mod mutation;
pub mod pb;

/// Cell version timestamp
pub type Timestamp = u64;

/// Lower bound of the default condition time window
pub const MIN_TIMESTAMP: Timestamp = 0;

/// Upper bound of the default condition time window
pub const MAX_TIMESTAMP: Timestamp = u64::MAX;

pub use {
    call::Call,
    check_and_mutate::CheckAndMutate,
    column_key::ColumnKey,
    comparator::{BitwiseOp, CompareOp, Comparator, ComparatorSpec},
    error::{Error, Result},
    filter::{Filter, FilterListOperator, FilterSpec, MAX_FILTER_DEPTH},
    mutation::{
        ColumnWriteItem, Durability, Mutation, MutationKind, MutationOptions, RowMutation,
        TTL_ATTRIBUTE,
    },
};

#[macro_export]
macro_rules! cell {
    ($key:expr, $timestamp:expr, $value:expr) => {
        $crate::ColumnWriteItem {
            column_key: $crate::ColumnKey::try_from($key).expect("should be column key"),
            timestamp: $timestamp,
            value: $value,
        }
    };
}
