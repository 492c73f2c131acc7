use {
    super::repository::Repository,
    crate::{
        api::RestError,
        kernel::entities::{
            OrgId,
            Principal,
            TransactionContext,
        },
        time_oracle::{
            self,
            reconciler::Reconciler,
        },
    },
    std::sync::Arc,
};

pub mod bid;
pub mod close_auction;
pub mod create_auction;
pub mod end_auction;
pub mod get_all_auctions_by_seller;
pub mod get_all_open_auctions;
pub mod get_highest_bid;
pub mod query_auction;
pub mod query_bid;
pub mod submit_bid;

mod get_open_auction;

pub struct Config {
    /// Marks a revealed bid invalid when its organization already holds a valid bid on the auction.
    pub single_valid_bid_per_org: bool,
}

pub struct ServiceInner {
    config:      Config,
    time_oracle: time_oracle::service::Service,
    reconciler:  Arc<dyn Reconciler>,
    repo:        Repository,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        config: Config,
        time_oracle: time_oracle::service::Service,
        reconciler: Arc<dyn Reconciler>,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            time_oracle,
            reconciler,
            repo: Repository::new(),
        }))
    }
}

fn caller_identity(ctx: &TransactionContext) -> Result<Principal, RestError> {
    ctx.caller
        .caller_identity()
        .map_err(|e| RestError::AuthorizationError(format!("failed to get client identity: {}", e)))
}

fn caller_organization(ctx: &TransactionContext) -> Result<OrgId, RestError> {
    ctx.caller.caller_organization().map_err(|e| {
        RestError::AuthorizationError(format!("failed to get client organization: {}", e))
    })
}

fn ledger_unavailable(e: anyhow::Error) -> RestError {
    tracing::error!(error = ?e, "Failed to access the ledger");
    RestError::TemporarilyUnavailable
}

#[cfg(test)]
pub mod tests {
    use {
        super::{
            create_auction::CreateAuctionInput,
            submit_bid::SubmitBidInput,
            *,
        },
        crate::{
            auction::{
                entities,
                service::bid::BidInput,
            },
            kernel::{
                entities::{
                    Price,
                    RequestId,
                },
                identity::ClientIdentity,
                in_memory_ledger::InMemoryLedger,
                test_utils::{
                    context,
                    DEFAULT_TX_TIMESTAMP,
                },
            },
            time_oracle::{
                reconciler::HashSeededReconciler,
                service::tests::mock_source,
                source::MockTimeSource,
            },
        },
        time::{
            format_description::well_known::Rfc3339,
            Duration,
            OffsetDateTime,
        },
    };

    pub const SELLER: &str = "x509::CN=seller,OU=client::CN=ca.org1.example.com";
    pub const SELLER_ORG: &str = "Org1MSP";

    pub fn seller() -> ClientIdentity {
        ClientIdentity::new(SELLER, SELLER_ORG)
    }

    pub fn bidder(name: &str, org: &str) -> ClientIdentity {
        ClientIdentity::new(format!("x509::CN={},OU=client::CN=ca", name), org)
    }

    pub fn time_limit() -> OffsetDateTime {
        DEFAULT_TX_TIMESTAMP + Duration::hours(1)
    }

    pub fn after_time_limit() -> OffsetDateTime {
        DEFAULT_TX_TIMESTAMP + Duration::hours(2)
    }

    impl Service {
        pub fn new_with_sources(single_valid_bid_per_org: bool, sources: Vec<MockTimeSource>) -> Self {
            Self::new(
                Config {
                    single_valid_bid_per_org,
                },
                time_oracle::service::Service::new_with_sources(sources),
                Arc::new(HashSeededReconciler),
            )
        }

        /// Service whose time oracle reports `now` for every request.
        pub fn new_with_clock(now: OffsetDateTime) -> Self {
            Self::new_with_sources(false, vec![mock_source("clock", Some(now))])
        }
    }

    pub async fn create_auction(ledger: &Arc<InMemoryLedger>, auction_id: &str) -> entities::Auction {
        let service = Service::new_with_clock(DEFAULT_TX_TIMESTAMP);
        let tx = ledger.begin(format!("create-{}", auction_id), DEFAULT_TX_TIMESTAMP);
        let seller = seller();
        let auction = service
            .create_auction(
                context(&tx, &seller),
                CreateAuctionInput {
                    auction_id:  auction_id.to_string(),
                    item:        "Laptop".to_string(),
                    time_limit:  time_limit().format(&Rfc3339).unwrap(),
                    description: "A used laptop".to_string(),
                    picture_url: "https://example.com/laptop.png".to_string(),
                },
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();
        auction
    }

    pub async fn place_bid(
        ledger: &Arc<InMemoryLedger>,
        service: &Service,
        auction_id: &str,
        caller: &ClientIdentity,
        price: Price,
        tx_id: &str,
    ) -> Result<RequestId, RestError> {
        let tx = ledger.begin(tx_id, DEFAULT_TX_TIMESTAMP + Duration::minutes(1));
        let request_id = service
            .bid(
                context(&tx, caller),
                BidInput {
                    auction_id: auction_id.to_string(),
                    price,
                },
            )
            .await?;
        tx.commit().await?;
        Ok(request_id)
    }

    pub async fn submit_bid(
        ledger: &Arc<InMemoryLedger>,
        service: &Service,
        auction_id: &str,
        caller: &ClientIdentity,
        request_id: &str,
        now: OffsetDateTime,
    ) -> Result<entities::FullBid, RestError> {
        let tx = ledger.begin(format!("submit-{}", request_id), now);
        let bid = service
            .submit_bid(
                context(&tx, caller),
                SubmitBidInput {
                    auction_id: auction_id.to_string(),
                    request_id: request_id.to_string(),
                },
            )
            .await?;
        tx.commit().await?;
        Ok(bid)
    }

    /// Places and reveals a bid whose trusted timestamp is `revealed_at`.
    pub async fn place_and_submit_bid(
        ledger: &Arc<InMemoryLedger>,
        auction_id: &str,
        caller: &ClientIdentity,
        price: Price,
        tx_id: &str,
        revealed_at: OffsetDateTime,
    ) -> Result<entities::FullBid, RestError> {
        let service = Service::new_with_clock(revealed_at);
        let request_id = place_bid(ledger, &service, auction_id, caller, price, tx_id).await?;
        submit_bid(
            ledger,
            &service,
            auction_id,
            caller,
            &request_id,
            DEFAULT_TX_TIMESTAMP + Duration::minutes(2),
        )
        .await
    }
}
