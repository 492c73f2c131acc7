pub mod entities;
pub mod identity;
pub mod in_memory_ledger;
pub mod ledger;
pub mod policy;

#[cfg(test)]
pub mod test_utils {
    use {
        super::{
            entities::TransactionContext,
            identity::ClientIdentity,
            in_memory_ledger::{
                InMemoryLedger,
                LedgerTransaction,
            },
        },
        std::sync::Arc,
        time::{
            macros::datetime,
            OffsetDateTime,
        },
    };

    pub const DEFAULT_PEER_ORG: &str = "Org1MSP";
    pub const DEFAULT_TX_TIMESTAMP: OffsetDateTime = datetime!(2024-05-01 12:00:00 UTC);

    pub fn new_ledger() -> Arc<InMemoryLedger> {
        Arc::new(InMemoryLedger::new(DEFAULT_PEER_ORG))
    }

    pub fn context<'a>(
        tx: &'a LedgerTransaction,
        caller: &'a ClientIdentity,
    ) -> TransactionContext<'a> {
        tx.context(caller)
    }
}
