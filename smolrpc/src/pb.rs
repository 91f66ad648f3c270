//! Wire messages of the HBase client protocol
//!
//! Only the subset needed to send (conditional) row mutations is declared.
//! Field tags and enum values are those of the upstream `Client.proto`,
//! `Comparator.proto` and `Filter.proto` definitions (proto2 syntax).

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NameBytesPair {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub value: Option<Vec<u8>>,
}

/// Inclusive time window
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimeRange {
    #[prost(uint64, optional, tag = "1")]
    pub from: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub to: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CompareType {
    Less = 0,
    LessOrEqual = 1,
    Equal = 2,
    NotEqual = 3,
    GreaterOrEqual = 4,
    Greater = 5,
    NoOp = 6,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegionSpecifier {
    #[prost(enumeration = "RegionSpecifierType", required, tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub value: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RegionSpecifierType {
    RegionName = 1,
    EncodedRegionName = 2,
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Encoded comparator, `name` is the server-side class name
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Comparator {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub serialized_comparator: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ByteArrayComparable {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub value: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BinaryComparator {
    #[prost(message, optional, tag = "1")]
    pub comparable: Option<ByteArrayComparable>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BinaryPrefixComparator {
    #[prost(message, optional, tag = "1")]
    pub comparable: Option<ByteArrayComparable>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LongComparator {
    #[prost(message, optional, tag = "1")]
    pub comparable: Option<ByteArrayComparable>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BitComparator {
    #[prost(message, optional, tag = "1")]
    pub comparable: Option<ByteArrayComparable>,
    #[prost(enumeration = "BitwiseOp", required, tag = "2")]
    pub bitwise_op: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum BitwiseOp {
    And = 1,
    Or = 2,
    Xor = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NullComparator {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegexStringComparator {
    #[prost(string, required, tag = "1")]
    pub pattern: String,
    #[prost(int32, required, tag = "2")]
    pub pattern_flags: i32,
    #[prost(string, required, tag = "3")]
    pub charset: String,
    #[prost(string, optional, tag = "4")]
    pub engine: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubstringComparator {
    #[prost(string, required, tag = "1")]
    pub substr: String,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Encoded filter, `name` is the server-side class name
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Filter {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub serialized_filter: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompareFilter {
    #[prost(enumeration = "CompareType", required, tag = "1")]
    pub compare_op: i32,
    #[prost(message, optional, tag = "2")]
    pub comparator: Option<Comparator>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FamilyFilter {
    #[prost(message, optional, tag = "1")]
    pub compare_filter: Option<CompareFilter>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QualifierFilter {
    #[prost(message, optional, tag = "1")]
    pub compare_filter: Option<CompareFilter>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueFilter {
    #[prost(message, optional, tag = "1")]
    pub compare_filter: Option<CompareFilter>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleColumnValueFilter {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub column_family: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub column_qualifier: Option<Vec<u8>>,
    #[prost(enumeration = "CompareType", required, tag = "3")]
    pub compare_op: i32,
    #[prost(message, optional, tag = "4")]
    pub comparator: Option<Comparator>,
    #[prost(bool, optional, tag = "5")]
    pub filter_if_missing: Option<bool>,
    #[prost(bool, optional, tag = "6")]
    pub latest_version_only: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ColumnPrefixFilter {
    #[prost(bytes = "vec", required, tag = "1")]
    pub prefix: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyOnlyFilter {
    #[prost(bool, required, tag = "1")]
    pub len_as_val: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FirstKeyOnlyFilter {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimestampsFilter {
    #[prost(int64, repeated, tag = "1")]
    pub timestamps: Vec<i64>,
    #[prost(bool, optional, tag = "2")]
    pub can_hint: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FilterList {
    #[prost(enumeration = "FilterListOperator", required, tag = "1")]
    pub operator: i32,
    #[prost(message, repeated, tag = "2")]
    pub filters: Vec<Filter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FilterListOperator {
    MustPassAll = 1,
    MustPassOne = 2,
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MutationProto {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub row: Option<Vec<u8>>,
    #[prost(enumeration = "MutationType", optional, tag = "2")]
    pub mutate_type: Option<i32>,
    #[prost(message, repeated, tag = "3")]
    pub column_value: Vec<ColumnValue>,
    #[prost(uint64, optional, tag = "4")]
    pub timestamp: Option<u64>,
    #[prost(message, repeated, tag = "5")]
    pub attribute: Vec<NameBytesPair>,
    #[prost(enumeration = "Durability", optional, tag = "6")]
    pub durability: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ColumnValue {
    #[prost(bytes = "vec", required, tag = "1")]
    pub family: Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub qualifier_value: Vec<QualifierValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QualifierValue {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub qualifier: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub value: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "3")]
    pub timestamp: Option<u64>,
    #[prost(enumeration = "DeleteType", optional, tag = "4")]
    pub delete_type: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MutationType {
    Append = 0,
    Increment = 1,
    Put = 2,
    Delete = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DeleteType {
    DeleteOneVersion = 0,
    DeleteMultipleVersions = 1,
    DeleteFamily = 2,
    DeleteFamilyVersion = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Durability {
    UseDefault = 0,
    SkipWal = 1,
    AsyncWal = 2,
    SyncWal = 3,
    FsyncWal = 4,
}

/// Condition checked by the server before applying a mutation
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Condition {
    #[prost(bytes = "vec", required, tag = "1")]
    pub row: Vec<u8>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub family: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub qualifier: Option<Vec<u8>>,
    #[prost(enumeration = "CompareType", optional, tag = "4")]
    pub compare_type: Option<i32>,
    #[prost(message, optional, tag = "5")]
    pub comparator: Option<Comparator>,
    #[prost(message, optional, tag = "6")]
    pub time_range: Option<TimeRange>,
    #[prost(message, optional, tag = "7")]
    pub filter: Option<Filter>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MutateRequest {
    /// Filled in by the transport once the region is located
    #[prost(message, optional, tag = "1")]
    pub region: Option<RegionSpecifier>,
    #[prost(message, optional, tag = "2")]
    pub mutation: Option<MutationProto>,
    #[prost(message, optional, tag = "3")]
    pub condition: Option<Condition>,
    #[prost(uint64, optional, tag = "4")]
    pub nonce_group: Option<u64>,
}
