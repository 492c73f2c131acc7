use {
    super::{
        caller_identity,
        caller_organization,
        ledger_unavailable,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::{
            entities::{
                AuctionId,
                TransactionContext,
            },
            ledger::validate_simple_key,
        },
    },
    time::{
        format_description::well_known::Rfc3339,
        OffsetDateTime,
        UtcOffset,
    },
};

pub struct CreateAuctionInput {
    pub auction_id:  AuctionId,
    pub item:        String,
    /// RFC3339 timestamp, nanosecond precision accepted.
    pub time_limit:  String,
    pub description: String,
    pub picture_url: String,
}

impl Service {
    /// Opens a new auction with the caller as seller. Only the seller's organization may
    /// endorse later changes to the auction record.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id), err(level = tracing::Level::TRACE))]
    pub async fn create_auction(
        &self,
        ctx: TransactionContext<'_>,
        input: CreateAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        validate_simple_key(&input.auction_id).map_err(|e| {
            RestError::ValidationError(format!("invalid auction id {:?}: {}", input.auction_id, e))
        })?;
        let time_limit = OffsetDateTime::parse(&input.time_limit, &Rfc3339).map_err(|e| {
            RestError::ValidationError(format!(
                "invalid datetime format {:?}: {}",
                input.time_limit, e
            ))
        })?;
        let seller = caller_identity(&ctx)?;
        let seller_org = caller_organization(&ctx)?;

        if self
            .repo
            .get_auction(ctx.ledger, &input.auction_id)
            .await
            .map_err(ledger_unavailable)?
            .is_some()
        {
            return Err(RestError::StateError(format!(
                "auction {} already exists",
                input.auction_id
            )));
        }

        let auction = self
            .repo
            .add_auction(
                ctx.ledger,
                entities::Auction {
                    id:            input.auction_id,
                    item:          input.item,
                    seller:        seller.clone(),
                    organizations: vec![seller_org.clone()],
                    winner:        "".to_string(),
                    price:         0,
                    status:        entities::AuctionStatus::Open,
                    time_limit:    time_limit.to_offset(UtcOffset::UTC),
                    description:   input.description,
                    picture_url:   input.picture_url,
                    bids:          vec![],
                },
            )
            .await
            .map_err(ledger_unavailable)?;

        ctx.policy
            .grant_mutation_rights(&auction.id, &[seller_org])
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to set endorsement policy of auction");
                RestError::TemporarilyUnavailable
            })?;

        tracing::info!(seller, "Auction created");
        Ok(auction)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::service::tests::{
                create_auction,
                seller,
                time_limit,
                SELLER,
                SELLER_ORG,
            },
            kernel::{
                entities::TransactionContext,
                identity::ClientIdentity,
                ledger::MockLedger,
                policy::MockEndorsementPolicy,
                test_utils::{
                    context,
                    new_ledger,
                    DEFAULT_TX_TIMESTAMP,
                },
            },
        },
        mockall::predicate::eq,
    };

    fn input(auction_id: &str, time_limit: &str) -> CreateAuctionInput {
        CreateAuctionInput {
            auction_id:  auction_id.to_string(),
            item:        "Laptop".to_string(),
            time_limit:  time_limit.to_string(),
            description: "".to_string(),
            picture_url: "".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_auction() {
        let ledger = new_ledger();
        let auction = create_auction(&ledger, "auction1").await;

        assert_eq!(auction.seller, SELLER);
        assert_eq!(auction.organizations, vec![SELLER_ORG.to_string()]);
        assert_eq!(auction.status, entities::AuctionStatus::Open);
        assert_eq!(auction.winner, "");
        assert_eq!(auction.price, 0);
        assert_eq!(auction.time_limit, time_limit());
        assert!(auction.bids.is_empty());
        assert_eq!(
            ledger.endorsement_policy("auction1").await,
            Some(vec![SELLER_ORG.to_string()])
        );
    }

    #[tokio::test]
    async fn test_create_auction_accepts_nanoseconds_and_offsets() {
        let ledger = new_ledger();
        let tx = ledger.begin("tx1", DEFAULT_TX_TIMESTAMP);
        let seller = seller();
        let auction = Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .create_auction(
                context(&tx, &seller),
                input("auction1", "2025-06-25T21:59:59.315604091+02:00"),
            )
            .await
            .unwrap();
        assert_eq!(auction.time_limit.offset(), UtcOffset::UTC);
        assert_eq!(auction.time_limit.hour(), 19);
        assert_eq!(auction.time_limit.nanosecond(), 315604091);
    }

    #[tokio::test]
    async fn test_create_auction_rejects_malformed_time_limit() {
        let ledger = new_ledger();
        let tx = ledger.begin("tx1", DEFAULT_TX_TIMESTAMP);
        let seller = seller();
        let result = Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .create_auction(context(&tx, &seller), input("auction1", "tomorrow"))
            .await;
        assert!(matches!(result, Err(RestError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_auction_rejects_duplicate_id() {
        let ledger = new_ledger();
        create_auction(&ledger, "auction1").await;

        let tx = ledger.begin("tx2", DEFAULT_TX_TIMESTAMP);
        let seller = seller();
        let result = Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .create_auction(
                context(&tx, &seller),
                input("auction1", "2025-06-25T19:59:59Z"),
            )
            .await;
        assert!(matches!(result, Err(RestError::StateError(_))));
    }

    #[tokio::test]
    async fn test_create_auction_requires_identity() {
        let ledger = new_ledger();
        let tx = ledger.begin("tx1", DEFAULT_TX_TIMESTAMP);
        let anonymous = ClientIdentity::default();
        let result = Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .create_auction(
                context(&tx, &anonymous),
                input("auction1", "2025-06-25T19:59:59Z"),
            )
            .await;
        assert!(matches!(result, Err(RestError::AuthorizationError(_))));
    }

    #[tokio::test]
    async fn test_create_auction_grants_rights_to_seller_org_only() {
        let mut ledger = MockLedger::new();
        ledger
            .expect_get_state()
            .with(eq("auction1"))
            .returning(|_| Ok(None));
        ledger
            .expect_put_state()
            .withf(|key, _| key == "auction1")
            .times(1)
            .returning(|_, _| Ok(()));
        let mut policy = MockEndorsementPolicy::new();
        policy
            .expect_grant_mutation_rights()
            .withf(|record_id, orgs| record_id == "auction1" && orgs == [SELLER_ORG.to_string()])
            .times(1)
            .returning(|_, _| Ok(()));

        let seller = seller();
        Service::new_with_clock(DEFAULT_TX_TIMESTAMP)
            .create_auction(
                TransactionContext::new(&ledger, &seller, &policy),
                input("auction1", "2025-06-25T19:59:59Z"),
            )
            .await
            .unwrap();
    }
}
