use super::{
    identity::AuthorizationContext,
    ledger::Ledger,
    policy::EndorsementPolicy,
};
pub use outcry_api_types::{
    AuctionId,
    OrgId,
    Price,
    Principal,
    RequestId,
};

/// Everything the hosting platform hands to a single call.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    pub ledger: &'a dyn Ledger,
    pub caller: &'a dyn AuthorizationContext,
    pub policy: &'a dyn EndorsementPolicy,
}

impl<'a> TransactionContext<'a> {
    pub fn new(
        ledger: &'a dyn Ledger,
        caller: &'a dyn AuthorizationContext,
        policy: &'a dyn EndorsementPolicy,
    ) -> Self {
        Self {
            ledger,
            caller,
            policy,
        }
    }
}
