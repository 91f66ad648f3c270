use crate::{pb, Call, ColumnKey, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute carrying the cell TTL in milliseconds
pub const TTL_ATTRIBUTE: &str = "_ttl";

/// Write-ahead-log durability requested for a mutation
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Durability {
    /// Use the table's default
    #[default]
    #[serde(rename = "default")]
    UseDefault,

    #[serde(rename = "skip_wal")]
    SkipWal,

    #[serde(rename = "async_wal")]
    AsyncWal,

    #[serde(rename = "sync_wal")]
    SyncWal,

    #[serde(rename = "fsync_wal")]
    FsyncWal,
}

impl From<Durability> for pb::Durability {
    fn from(value: Durability) -> Self {
        match value {
            Durability::UseDefault => Self::UseDefault,
            Durability::SkipWal => Self::SkipWal,
            Durability::AsyncWal => Self::AsyncWal,
            Durability::SyncWal => Self::SyncWal,
            Durability::FsyncWal => Self::FsyncWal,
        }
    }
}

/// Per-request options of a mutation
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MutationOptions {
    /// Timestamp applied to every cell that does not carry its own
    pub timestamp: Option<Timestamp>,

    #[serde(default)]
    pub durability: Durability,

    /// Time-to-live of written cells
    pub ttl_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum MutationKind {
    #[serde(rename = "put")]
    Put,

    #[serde(rename = "delete")]
    Delete,

    #[serde(rename = "append")]
    Append,

    #[serde(rename = "increment")]
    Increment,
}

impl From<MutationKind> for pb::MutationType {
    fn from(value: MutationKind) -> Self {
        match value {
            MutationKind::Put => Self::Put,
            MutationKind::Delete => Self::Delete,
            MutationKind::Append => Self::Append,
            MutationKind::Increment => Self::Increment,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ColumnWriteItem {
    pub column_key: ColumnKey,
    pub timestamp: Option<Timestamp>,
    pub value: Vec<u8>,
}

/// The interface a conditional request needs from the mutation it wraps
///
/// Table, row key and batchability are read through [`Call`].
pub trait RowMutation: Call {
    /// Excludes (or re-includes) the mutation from multi-row batches
    fn set_skip_batch(&mut self, skip: bool);

    /// Renders the base wire form
    fn to_proto(&self) -> pb::MutationProto;
}

/// A single-row mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    table: Vec<u8>,
    key: Vec<u8>,
    kind: MutationKind,
    cells: Vec<ColumnWriteItem>,
    options: MutationOptions,
    skip_batch: bool,
}

impl Mutation {
    pub fn new(
        kind: MutationKind,
        table: impl Into<Vec<u8>>,
        key: impl Into<Vec<u8>>,
        cells: Vec<ColumnWriteItem>,
    ) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
            kind,
            cells,
            options: MutationOptions::default(),
            skip_batch: false,
        }
    }

    /// Writes the given cells
    pub fn put(
        table: impl Into<Vec<u8>>,
        key: impl Into<Vec<u8>>,
        cells: Vec<ColumnWriteItem>,
    ) -> Self {
        Self::new(MutationKind::Put, table, key, cells)
    }

    /// Deletes the given columns
    ///
    /// Without any cells the whole row is deleted. A cell without
    /// qualifier deletes the entire column family. Values are ignored.
    pub fn delete(
        table: impl Into<Vec<u8>>,
        key: impl Into<Vec<u8>>,
        cells: Vec<ColumnWriteItem>,
    ) -> Self {
        Self::new(MutationKind::Delete, table, key, cells)
    }

    /// Appends the given values to the existing cell values
    pub fn append(
        table: impl Into<Vec<u8>>,
        key: impl Into<Vec<u8>>,
        cells: Vec<ColumnWriteItem>,
    ) -> Self {
        Self::new(MutationKind::Append, table, key, cells)
    }

    /// Adds `amount` to a 64-bit counter column
    pub fn increment(
        table: impl Into<Vec<u8>>,
        key: impl Into<Vec<u8>>,
        column_key: ColumnKey,
        amount: i64,
    ) -> Self {
        Self::new(
            MutationKind::Increment,
            table,
            key,
            vec![ColumnWriteItem {
                column_key,
                timestamp: None,
                value: amount.to_be_bytes().to_vec(),
            }],
        )
    }

    #[must_use]
    pub fn with_options(mut self, options: MutationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn cells(&self) -> &[ColumnWriteItem] {
        &self.cells
    }

    pub fn options(&self) -> &MutationOptions {
        &self.options
    }

    fn delete_type(cell: &ColumnWriteItem) -> pb::DeleteType {
        match (&cell.column_key.qualifier, cell.timestamp) {
            (None, None) => pb::DeleteType::DeleteFamily,
            (None, Some(_)) => pb::DeleteType::DeleteFamilyVersion,
            (Some(_), None) => pb::DeleteType::DeleteMultipleVersions,
            (Some(_), Some(_)) => pb::DeleteType::DeleteOneVersion,
        }
    }

    fn qualifier_value(&self, cell: &ColumnWriteItem) -> pb::QualifierValue {
        let timestamp = cell.timestamp.or(self.options.timestamp);

        match self.kind {
            MutationKind::Delete => pb::QualifierValue {
                qualifier: cell
                    .column_key
                    .qualifier
                    .as_ref()
                    .map(|cq| cq.as_bytes().to_vec()),
                value: None,
                timestamp,
                delete_type: Some(Self::delete_type(cell) as i32),
            },
            _ => pb::QualifierValue {
                qualifier: Some(cell.column_key.qualifier_bytes()),
                value: Some(cell.value.clone()),
                timestamp,
                delete_type: None,
            },
        }
    }
}

impl RowMutation for Mutation {
    fn set_skip_batch(&mut self, skip: bool) {
        self.skip_batch = skip;
    }

    fn to_proto(&self) -> pb::MutationProto {
        // NOTE: Families are ordered so the same mutation always encodes the same
        let mut families: BTreeMap<&str, Vec<pb::QualifierValue>> = BTreeMap::new();

        for cell in &self.cells {
            families
                .entry(cell.column_key.family.as_str())
                .or_default()
                .push(self.qualifier_value(cell));
        }

        let column_value = families
            .into_iter()
            .map(|(family, qualifier_value)| pb::ColumnValue {
                family: family.as_bytes().to_vec(),
                qualifier_value,
            })
            .collect();

        let attribute = self
            .options
            .ttl_ms
            .map(|ttl| pb::NameBytesPair {
                name: TTL_ATTRIBUTE.into(),
                value: Some(ttl.to_be_bytes().to_vec()),
            })
            .into_iter()
            .collect();

        let durability = match self.options.durability {
            Durability::UseDefault => None,
            durability => Some(pb::Durability::from(durability) as i32),
        };

        pb::MutationProto {
            row: Some(self.key.clone()),
            mutate_type: Some(pb::MutationType::from(self.kind) as i32),
            column_value,
            timestamp: self.options.timestamp,
            attribute,
            durability,
        }
    }
}

impl Call for Mutation {
    fn name(&self) -> &'static str {
        "Mutate"
    }

    fn table(&self) -> &[u8] {
        &self.table
    }

    fn key(&self) -> &[u8] {
        &self.key
    }

    fn skip_batch(&self) -> bool {
        self.skip_batch
    }

    fn cell_blocks_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn mutation_put_to_proto() {
        let mutation = Mutation::put(
            "table",
            "r1",
            vec![
                crate::cell!("cf:q2", Some(7), b"b".to_vec()),
                crate::cell!("cf:q1", None, b"a".to_vec()),
                crate::cell!("aa:", None, b"c".to_vec()),
            ],
        )
        .with_options(MutationOptions {
            timestamp: Some(100),
            durability: Durability::SkipWal,
            ttl_ms: Some(60_000),
        });

        let proto = RowMutation::to_proto(&mutation);

        assert_eq!(proto.row.as_deref(), Some(&b"r1"[..]));
        assert_eq!(proto.mutate_type(), pb::MutationType::Put);
        assert_eq!(proto.durability(), pb::Durability::SkipWal);
        assert_eq!(proto.timestamp, Some(100));

        assert_eq!(proto.column_value.len(), 2);
        assert_eq!(proto.column_value[0].family, b"aa");
        assert_eq!(
            proto.column_value[0].qualifier_value[0].qualifier.as_deref(),
            Some(&b""[..])
        );

        let cf = &proto.column_value[1];
        assert_eq!(cf.family, b"cf");
        assert_eq!(cf.qualifier_value[0].timestamp, Some(7));
        assert_eq!(cf.qualifier_value[1].timestamp, Some(100));
        assert_eq!(cf.qualifier_value[1].value.as_deref(), Some(&b"a"[..]));

        assert_eq!(proto.attribute.len(), 1);
        assert_eq!(proto.attribute[0].name, TTL_ATTRIBUTE);
        assert_eq!(
            proto.attribute[0].value.as_deref(),
            Some(&60_000u64.to_be_bytes()[..])
        );
    }

    #[test]
    fn mutation_delete_types() {
        let mutation = Mutation::delete(
            "table",
            "r1",
            vec![
                crate::cell!("cf:", None, vec![]),
                crate::cell!("cf:q1", None, vec![]),
                crate::cell!("cf:q2", Some(5), vec![]),
            ],
        );

        let proto = RowMutation::to_proto(&mutation);
        let values = &proto.column_value[0].qualifier_value;

        assert_eq!(values[0].qualifier, None);
        assert_eq!(values[0].delete_type(), pb::DeleteType::DeleteFamily);
        assert_eq!(values[1].delete_type(), pb::DeleteType::DeleteMultipleVersions);
        assert_eq!(values[2].delete_type(), pb::DeleteType::DeleteOneVersion);
        assert!(values.iter().all(|v| v.value.is_none()));

        let row_delete = Mutation::delete("table", "r1", vec![]);
        assert!(RowMutation::to_proto(&row_delete).column_value.is_empty());
    }

    #[test]
    fn mutation_increment() {
        let column_key = ColumnKey::try_from("cf:n").unwrap();
        let mutation = Mutation::increment("table", "r1", column_key, -2);
        let proto = RowMutation::to_proto(&mutation);

        assert_eq!(proto.mutate_type(), pb::MutationType::Increment);
        assert_eq!(
            proto.column_value[0].qualifier_value[0].value.as_deref(),
            Some(&(-2i64).to_be_bytes()[..])
        );
        assert_eq!(proto.durability, None);
    }

    #[test]
    fn mutation_is_batchable_by_default() {
        let mut mutation = Mutation::put("table", "r1", vec![]);
        assert!(!mutation.skip_batch());
        assert!(mutation.cell_blocks_enabled());

        mutation.set_skip_batch(true);
        assert!(mutation.skip_batch());
        assert_eq!(mutation.table(), b"table");
        assert_eq!(mutation.key(), b"r1");
    }

    #[test]
    fn mutation_options_serde() {
        let options: MutationOptions =
            serde_json::from_str(r#"{"timestamp":5,"durability":"fsync_wal"}"#).unwrap();

        assert_eq!(
            options,
            MutationOptions {
                timestamp: Some(5),
                durability: Durability::FsyncWal,
                ttl_ms: None,
            }
        );

        let options: MutationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MutationOptions::default());
    }
}
