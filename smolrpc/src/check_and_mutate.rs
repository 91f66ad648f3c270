use crate::{
    column_key::is_valid_identifier, pb, Call, ColumnKey, CompareOp, Comparator, ComparatorSpec,
    Error, FilterSpec, Mutation, RowMutation, Timestamp, MAX_TIMESTAMP, MIN_TIMESTAMP,
};

/// Column half of a condition
#[derive(Clone, Debug, PartialEq)]
struct ColumnCheck {
    family: Vec<u8>,
    qualifier: Vec<u8>,
    op: pb::CompareType,
    comparator: pb::Comparator,
}

#[derive(Clone, Debug, PartialEq)]
enum Predicate {
    /// Compare a single column
    Column(ColumnCheck),

    /// Predicate filter only
    Filter(pb::Filter),

    /// Column comparison AND filter match
    Compound(ColumnCheck, pb::Filter),
}

/// A mutation that is only applied if a condition on its row holds
///
/// The condition is either a column comparison, a predicate filter, or both.
/// Constructing one marks the wrapped mutation as not batchable, because
/// batched responses do not report whether the condition matched.
///
/// Once [`CheckAndMutate::to_proto`] has been called, the request is sealed:
/// further calls return the same message, while changing the condition fails
/// with [`Error::Sealed`].
#[derive(Clone, Debug)]
pub struct CheckAndMutate<M: RowMutation = Mutation> {
    mutation: M,
    predicate: Predicate,
    from: Timestamp,
    to: Timestamp,
    sealed: bool,
}

impl<M: RowMutation> CheckAndMutate<M> {
    fn with_predicate(mut mutation: M, predicate: Predicate) -> crate::Result<Self> {
        if mutation.key().is_empty() {
            return Err(Error::MissingRowKey);
        }

        // NOTE: Multi responses don't report whether the condition was met,
        // so this request always has to go out on its own.
        //
        // This is the only place the wrapped mutation is modified.
        mutation.set_skip_batch(true);

        Ok(Self {
            mutation,
            predicate,
            from: MIN_TIMESTAMP,
            to: MAX_TIMESTAMP,
            sealed: false,
        })
    }

    /// Applies `mutation` only if the value at `family:qualifier` satisfies
    /// `op` against `comparator`
    ///
    /// The qualifier is arbitrary bytes, the family has to be a valid column
    /// family name.
    ///
    /// Fails with [`Error::MissingRowKey`] if the mutation has no row key,
    /// [`Error::InvalidColumnKey`] if the family is invalid
    /// and [`Error::MalformedComparator`] if the comparator cannot be built.
    pub fn new(
        mutation: M,
        family: &str,
        qualifier: impl AsRef<[u8]>,
        op: CompareOp,
        comparator: &impl ComparatorSpec,
    ) -> crate::Result<Self> {
        let qualifier = qualifier.as_ref();

        if !is_valid_identifier(family) {
            return Err(Error::InvalidColumnKey(format!(
                "{family}:{}",
                String::from_utf8_lossy(qualifier)
            )));
        }

        let comparator = comparator.construct()?;

        log::debug!(
            "Creating check-and-mutate on {family}:{} ({op:?} {})",
            String::from_utf8_lossy(qualifier),
            comparator.name
        );

        Self::with_predicate(
            mutation,
            Predicate::Column(ColumnCheck {
                family: family.as_bytes().to_vec(),
                qualifier: qualifier.to_vec(),
                op: op.into(),
                comparator,
            }),
        )
    }

    /// Like [`CheckAndMutate::new`], addressing the column by its [`ColumnKey`]
    pub fn with_column(
        mutation: M,
        column_key: &ColumnKey,
        op: CompareOp,
        comparator: &impl ComparatorSpec,
    ) -> crate::Result<Self> {
        Self::new(
            mutation,
            &column_key.family,
            column_key.qualifier_bytes(),
            op,
            comparator,
        )
    }

    /// Applies `mutation` only if `family:qualifier` currently holds exactly `value`
    ///
    /// An empty `value` checks for an empty cell value, use
    /// [`CheckAndMutate::if_absent`] to check that the column does not exist.
    pub fn if_equals(
        mutation: M,
        family: &str,
        qualifier: impl AsRef<[u8]>,
        value: impl Into<Vec<u8>>,
    ) -> crate::Result<Self> {
        Self::new(
            mutation,
            family,
            qualifier,
            CompareOp::Equal,
            &Comparator::equals(value),
        )
    }

    /// Applies `mutation` only if `family:qualifier` does not exist
    pub fn if_absent(
        mutation: M,
        family: &str,
        qualifier: impl AsRef<[u8]>,
    ) -> crate::Result<Self> {
        Self::new(
            mutation,
            family,
            qualifier,
            CompareOp::Equal,
            &Comparator::absent(),
        )
    }

    /// Applies `mutation` only if the row matches `filter`
    ///
    /// Fails with [`Error::MalformedFilter`] if the filter cannot be built.
    pub fn if_match(mutation: M, filter: &impl FilterSpec) -> crate::Result<Self> {
        let filter = filter.construct()?;

        log::debug!("Creating check-and-mutate on filter {}", filter.name);

        Self::with_predicate(mutation, Predicate::Filter(filter))
    }

    /// Restricts the condition to cell versions within `[from, to]`
    ///
    /// The last call wins.
    pub fn set_time_range(&mut self, from: Timestamp, to: Timestamp) -> crate::Result<()> {
        if from > to {
            return Err(Error::InvalidTimeRange { from, to });
        }

        if self.sealed {
            return Err(Error::Sealed);
        }

        log::debug!("Narrowing check-and-mutate time range to [{from}, {to}]");

        self.from = from;
        self.to = to;

        Ok(())
    }

    /// Adds a filter next to the column comparison
    ///
    /// Both have to match for the mutation to be applied. Fails with
    /// [`Error::ConditionAlreadySet`] if the condition already has a filter.
    pub fn set_filter(&mut self, filter: &impl FilterSpec) -> crate::Result<()> {
        if self.sealed {
            return Err(Error::Sealed);
        }

        let Predicate::Column(column) = &self.predicate else {
            return Err(Error::ConditionAlreadySet);
        };

        let filter = filter.construct()?;

        log::debug!("Attaching filter {} to column condition", filter.name);

        self.predicate = Predicate::Compound(column.clone(), filter);

        Ok(())
    }

    /// Inclusive time window of the condition
    pub fn time_range(&self) -> (Timestamp, Timestamp) {
        (self.from, self.to)
    }

    /// The wrapped mutation
    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    pub fn into_mutation(self) -> M {
        self.mutation
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn condition(&self) -> pb::Condition {
        let (column, filter) = match &self.predicate {
            Predicate::Column(column) => (Some(column), None),
            Predicate::Filter(filter) => (None, Some(filter)),
            Predicate::Compound(column, filter) => (Some(column), Some(filter)),
        };

        pb::Condition {
            row: self.mutation.key().to_vec(),
            family: column.map(|c| c.family.clone()),
            qualifier: column.map(|c| c.qualifier.clone()),
            compare_type: column.map(|c| c.op as i32),
            comparator: column.map(|c| c.comparator.clone()),
            time_range: Some(pb::TimeRange {
                from: Some(self.from),
                to: Some(self.to),
            }),
            filter: filter.cloned(),
        }
    }

    /// Renders the request and seals it
    ///
    /// Calling this again returns an equal message.
    pub fn to_proto(&mut self) -> pb::MutateRequest {
        self.sealed = true;

        let condition = self.condition();

        log::trace!(
            "Serializing check-and-mutate for row {:?} (filter: {})",
            String::from_utf8_lossy(&condition.row),
            condition.filter.is_some()
        );

        pb::MutateRequest {
            region: None,
            mutation: Some(self.mutation.to_proto()),
            condition: Some(condition),
            nonce_group: None,
        }
    }
}

impl<M: RowMutation> Call for CheckAndMutate<M> {
    fn name(&self) -> &'static str {
        "Mutate"
    }

    fn table(&self) -> &[u8] {
        self.mutation.table()
    }

    fn key(&self) -> &[u8] {
        self.mutation.key()
    }

    fn skip_batch(&self) -> bool {
        self.mutation.skip_batch()
    }

    fn cell_blocks_enabled(&self) -> bool {
        // NOTE: Conditional mutations can't be sent with cellblocks
        false
    }
}
