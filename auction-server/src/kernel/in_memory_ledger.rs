use {
    super::{
        entities::{
            OrgId,
            TransactionContext,
        },
        identity::AuthorizationContext,
        ledger::{
            partial_composite_key_bounds,
            simple_range_bounds,
            KeyValue,
            Ledger,
        },
        policy::EndorsementPolicy,
    },
    axum::async_trait,
    std::{
        collections::{
            BTreeMap,
            HashMap,
        },
        fmt,
        ops::{
            Bound,
            RangeBounds,
        },
        sync::Arc,
    },
    time::OffsetDateTime,
    tokio::sync::{
        Mutex,
        RwLock,
    },
};

pub type Version = u64;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum StateKey {
    Public(String),
    Private { collection: String, key: String },
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Public(key) => write!(f, "{:?}", key),
            StateKey::Private { collection, key } => write!(f, "{}/{:?}", collection, key),
        }
    }
}

#[derive(Clone, Debug)]
struct VersionedValue {
    value:   Vec<u8>,
    version: Version,
}

#[derive(Debug, Default)]
struct WorldState {
    height:   Version,
    public:   BTreeMap<String, VersionedValue>,
    private:  HashMap<String, BTreeMap<String, VersionedValue>>,
    policies: HashMap<String, Vec<OrgId>>,
}

impl WorldState {
    fn get(&self, key: &StateKey) -> Option<&VersionedValue> {
        match key {
            StateKey::Public(key) => self.public.get(key),
            StateKey::Private { collection, key } => {
                self.private.get(collection).and_then(|c| c.get(key))
            }
        }
    }

    fn put(&mut self, key: StateKey, value: VersionedValue) {
        match key {
            StateKey::Public(key) => {
                self.public.insert(key, value);
            }
            StateKey::Private { collection, key } => {
                self.private.entry(collection).or_default().insert(key, value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitError {
    /// A key read by the transaction was changed by another transaction before commit.
    MvccReadConflict { key: String },
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::MvccReadConflict { key } => {
                write!(f, "read conflict on key {}", key)
            }
        }
    }
}

impl std::error::Error for CommitError {}

/// A single-peer ledger with optimistic concurrency control.
///
/// Transactions buffer their writes and remember the version of every key they read.
/// Committing validates the read versions against the current state and then applies all
/// writes at once, so a conflicting writer aborts instead of overwriting.
#[derive(Debug)]
pub struct InMemoryLedger {
    peer_organization: OrgId,
    state:             RwLock<WorldState>,
}

impl InMemoryLedger {
    pub fn new(peer_organization: impl Into<OrgId>) -> Self {
        Self {
            peer_organization: peer_organization.into(),
            state:             RwLock::new(WorldState::default()),
        }
    }

    pub fn begin(self: &Arc<Self>, tx_id: impl Into<String>, tx_timestamp: OffsetDateTime) -> LedgerTransaction {
        LedgerTransaction {
            ledger: self.clone(),
            tx_id: tx_id.into(),
            tx_timestamp,
            read_set: Mutex::new(HashMap::new()),
            write_set: Mutex::new(BTreeMap::new()),
            policy_writes: Mutex::new(HashMap::new()),
        }
    }

    pub async fn height(&self) -> Version {
        self.state.read().await.height
    }
}

/// A running transaction. Dropping it without calling [`LedgerTransaction::commit`]
/// discards every write.
pub struct LedgerTransaction {
    ledger:        Arc<InMemoryLedger>,
    tx_id:         String,
    tx_timestamp:  OffsetDateTime,
    read_set:      Mutex<HashMap<StateKey, Option<Version>>>,
    write_set:     Mutex<BTreeMap<StateKey, Vec<u8>>>,
    policy_writes: Mutex<HashMap<String, Vec<OrgId>>>,
}

impl LedgerTransaction {
    /// The context handed to a call executed inside this transaction.
    pub fn context<'a>(&'a self, caller: &'a dyn AuthorizationContext) -> TransactionContext<'a> {
        TransactionContext::new(self, caller, self)
    }

    async fn read(&self, key: StateKey) -> Option<Vec<u8>> {
        if let Some(value) = self.write_set.lock().await.get(&key) {
            return Some(value.clone());
        }
        let state = self.ledger.state.read().await;
        let current = state.get(&key);
        self.read_set
            .lock()
            .await
            .entry(key)
            .or_insert(current.map(|v| v.version));
        current.map(|v| v.value.clone())
    }

    async fn write(&self, key: StateKey, value: Vec<u8>) {
        self.write_set.lock().await.insert(key, value);
    }

    async fn scan_public(&self, start: &str, end: Option<&str>) -> Vec<KeyValue> {
        if matches!(end, Some(end) if start >= end) {
            return vec![];
        }
        let range = (
            Bound::Included(start.to_string()),
            match end {
                Some(end) => Bound::Excluded(end.to_string()),
                None => Bound::Unbounded,
            },
        );

        let mut merged = BTreeMap::new();
        {
            let state = self.ledger.state.read().await;
            let mut read_set = self.read_set.lock().await;
            for (key, versioned) in state.public.range(range.clone()) {
                read_set
                    .entry(StateKey::Public(key.clone()))
                    .or_insert(Some(versioned.version));
                merged.insert(key.clone(), versioned.value.clone());
            }
        }
        for (key, value) in self.write_set.lock().await.iter() {
            if let StateKey::Public(key) = key {
                if range.contains(key) {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        merged.into_iter().collect()
    }

    /// Validates the read set and applies the write set atomically.
    pub async fn commit(self) -> Result<Version, CommitError> {
        let mut state = self.ledger.state.write().await;
        for (key, read_version) in self.read_set.into_inner() {
            let current_version = state.get(&key).map(|v| v.version);
            if current_version != read_version {
                tracing::warn!(tx_id = self.tx_id, key = %key, "Transaction invalidated by read conflict");
                return Err(CommitError::MvccReadConflict {
                    key: key.to_string(),
                });
            }
        }

        let write_set = self.write_set.into_inner();
        state.height += 1;
        let version = state.height;
        tracing::debug!(tx_id = self.tx_id, version, writes = write_set.len(), "Committing transaction");
        for (key, value) in write_set {
            state.put(key, VersionedValue { value, version });
        }
        for (record_id, orgs) in self.policy_writes.into_inner() {
            state.policies.insert(record_id, orgs);
        }
        Ok(version)
    }
}

#[async_trait]
impl Ledger for LedgerTransaction {
    fn tx_id(&self) -> String {
        self.tx_id.clone()
    }

    fn tx_timestamp(&self) -> OffsetDateTime {
        self.tx_timestamp
    }

    fn peer_organization(&self) -> OrgId {
        self.ledger.peer_organization.clone()
    }

    async fn get_state(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.read(StateKey::Public(key.to_string())).await)
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        if key.is_empty() {
            return Err(anyhow::anyhow!("key must not be an empty string"));
        }
        self.write(StateKey::Public(key.to_string()), value).await;
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> anyhow::Result<Vec<KeyValue>> {
        let (start, end) = simple_range_bounds(start_key, end_key);
        Ok(self.scan_public(start, end).await)
    }

    async fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[String],
    ) -> anyhow::Result<Vec<KeyValue>> {
        let (start, end) = partial_composite_key_bounds(object_type, attributes)?;
        Ok(self.scan_public(&start, Some(&end)).await)
    }

    async fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self
            .read(StateKey::Private {
                collection: collection.to_string(),
                key:        key.to_string(),
            })
            .await)
    }

    async fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> anyhow::Result<()> {
        if key.is_empty() {
            return Err(anyhow::anyhow!("key must not be an empty string"));
        }
        self.write(
            StateKey::Private {
                collection: collection.to_string(),
                key:        key.to_string(),
            },
            value,
        )
        .await;
        Ok(())
    }
}

#[async_trait]
impl EndorsementPolicy for LedgerTransaction {
    async fn grant_mutation_rights(&self, record_id: &str, orgs: &[OrgId]) -> anyhow::Result<()> {
        tracing::debug!(record_id, orgs = ?orgs, "Setting state based endorsement policy");
        self.policy_writes
            .lock()
            .await
            .insert(record_id.to_string(), orgs.to_vec());
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryLedger {
    pub async fn endorsement_policy(&self, record_id: &str) -> Option<Vec<OrgId>> {
        self.state.read().await.policies.get(record_id).cloned()
    }

    pub async fn state_value(&self, key: &str) -> Option<Vec<u8>> {
        self.state
            .read()
            .await
            .public
            .get(key)
            .map(|v| v.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::ledger::create_composite_key,
    };

    fn ledger() -> Arc<InMemoryLedger> {
        Arc::new(InMemoryLedger::new("Org1MSP"))
    }

    #[tokio::test]
    async fn test_reads_own_writes_and_commits_atomically() {
        let ledger = ledger();
        let tx = ledger.begin("tx1", OffsetDateTime::now_utc());
        tx.put_state("a", b"1".to_vec()).await.unwrap();
        tx.put_state("b", b"2".to_vec()).await.unwrap();
        assert_eq!(tx.get_state("a").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(ledger.state_value("a").await, None);

        tx.commit().await.unwrap();
        assert_eq!(ledger.state_value("a").await, Some(b"1".to_vec()));
        assert_eq!(ledger.state_value("b").await, Some(b"2".to_vec()));
        assert_eq!(ledger.height().await, 1);
    }

    #[tokio::test]
    async fn test_dropped_transaction_leaves_no_trace() {
        let ledger = ledger();
        {
            let tx = ledger.begin("tx1", OffsetDateTime::now_utc());
            tx.put_state("a", b"1".to_vec()).await.unwrap();
            tx.grant_mutation_rights("a", &["Org1MSP".to_string()])
                .await
                .unwrap();
        }
        assert_eq!(ledger.state_value("a").await, None);
        assert_eq!(ledger.endorsement_policy("a").await, None);
        assert_eq!(ledger.height().await, 0);
    }

    #[tokio::test]
    async fn test_conflicting_writer_aborts() {
        let ledger = ledger();
        let seed = ledger.begin("seed", OffsetDateTime::now_utc());
        seed.put_state("auction1", b"open".to_vec()).await.unwrap();
        seed.commit().await.unwrap();

        let first = ledger.begin("tx1", OffsetDateTime::now_utc());
        let second = ledger.begin("tx2", OffsetDateTime::now_utc());
        first.get_state("auction1").await.unwrap();
        second.get_state("auction1").await.unwrap();
        first.put_state("auction1", b"closed".to_vec()).await.unwrap();
        second.put_state("auction1", b"ended".to_vec()).await.unwrap();

        first.commit().await.unwrap();
        assert!(matches!(
            second.commit().await,
            Err(CommitError::MvccReadConflict { .. })
        ));
        assert_eq!(ledger.state_value("auction1").await, Some(b"closed".to_vec()));
    }

    #[tokio::test]
    async fn test_range_scan_skips_composite_keys_and_merges_writes() {
        let ledger = ledger();
        let seed = ledger.begin("seed", OffsetDateTime::now_utc());
        seed.put_state("auction1", b"1".to_vec()).await.unwrap();
        let composite = create_composite_key("bid", &["auction1", "tx1"]).unwrap();
        seed.put_state(&composite, b"100".to_vec()).await.unwrap();
        seed.commit().await.unwrap();

        let tx = ledger.begin("tx1", OffsetDateTime::now_utc());
        tx.put_state("auction2", b"2".to_vec()).await.unwrap();
        let keys: Vec<String> = tx
            .get_state_by_range("", "")
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["auction1".to_string(), "auction2".to_string()]);

        let bids = tx
            .get_state_by_partial_composite_key("bid", &["auction1".to_string()])
            .await
            .unwrap();
        assert_eq!(bids, vec![(composite, b"100".to_vec())]);
    }

    #[tokio::test]
    async fn test_private_collections_are_isolated() {
        let ledger = ledger();
        let tx = ledger.begin("tx1", OffsetDateTime::now_utc());
        tx.put_private_data("_implicit_org_Org1MSP", "k", b"v".to_vec())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let tx = ledger.begin("tx2", OffsetDateTime::now_utc());
        assert_eq!(
            tx.get_private_data("_implicit_org_Org1MSP", "k").await.unwrap(),
            Some(b"v".to_vec())
        );
        assert_eq!(
            tx.get_private_data("_implicit_org_Org2MSP", "k").await.unwrap(),
            None
        );
        assert_eq!(tx.get_state("k").await.unwrap(), None);
    }
}
