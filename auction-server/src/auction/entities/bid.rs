use {
    crate::kernel::entities::{
        AuctionId,
        OrgId,
        Price,
        Principal,
        RequestId,
    },
    std::cmp::Ordering,
    time::OffsetDateTime,
};

/// An unrevealed bid, readable only by the organization that placed it.
#[derive(Clone, Debug, PartialEq)]
pub struct BidPlaceholder {
    pub request_id: RequestId,
    pub price:      Price,
    pub org:        OrgId,
    pub bidder:     Principal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FullBid {
    pub price:     Price,
    pub org:       OrgId,
    pub bidder:    Principal,
    pub valid:     bool,
    pub timestamp: OffsetDateTime,
}

/// A sealed bid together with its reveal, once submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct BidRecord {
    pub auction_id:  AuctionId,
    pub placeholder: BidPlaceholder,
    pub revealed:    Option<FullBid>,
}

impl FullBid {
    /// Higher price first, earlier timestamp on equal prices.
    pub fn rank(&self, other: &FullBid) -> Ordering {
        other
            .price
            .cmp(&self.price)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }

    pub fn dominates(&self, other: &FullBid) -> bool {
        self.rank(other) == Ordering::Less
    }
}

/// Orders revealed bid records the way they were submitted to the auction. Records the
/// auction does not list keep their relative order after the listed ones.
pub fn in_submission_order(mut bids: Vec<FullBid>, submitted: &[FullBid]) -> Vec<FullBid> {
    bids.sort_by_key(|bid| {
        submitted
            .iter()
            .position(|s| s == bid)
            .unwrap_or(submitted.len())
    });
    bids
}

/// The first valid bid in scan order that no other valid bid dominates.
pub fn select_winner<'a>(bids: impl IntoIterator<Item = &'a FullBid>) -> Option<&'a FullBid> {
    bids.into_iter()
        .filter(|bid| bid.valid)
        .fold(None, |highest: Option<&FullBid>, bid| match highest {
            Some(highest) if !bid.dominates(highest) => Some(highest),
            _ => Some(bid),
        })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::{
            macros::datetime,
            Duration,
        },
    };

    const T: OffsetDateTime = datetime!(2024-05-01 12:00:00 UTC);

    fn bid(bidder: &str, price: Price, timestamp: OffsetDateTime) -> FullBid {
        FullBid {
            price,
            org: "Org1MSP".to_string(),
            bidder: bidder.to_string(),
            valid: true,
            timestamp,
        }
    }

    #[test]
    fn test_highest_price_wins() {
        let bids = vec![bid("A", 100, T), bid("B", 300, T + Duration::minutes(1))];
        assert_eq!(select_winner(&bids).unwrap().bidder, "B");
    }

    #[test]
    fn test_tie_is_broken_by_earliest_timestamp() {
        let bids = vec![
            bid("A", 300, T + Duration::minutes(5)),
            bid("B", 300, T + Duration::minutes(2)),
            bid("C", 200, T),
        ];
        assert_eq!(select_winner(&bids).unwrap().bidder, "B");
    }

    #[test]
    fn test_identical_bids_keep_scan_order() {
        let bids = vec![bid("A", 300, T), bid("B", 300, T)];
        assert_eq!(select_winner(&bids).unwrap().bidder, "A");
    }

    #[test]
    fn test_submission_order_breaks_identical_ties() {
        let a = bid("A", 300, T);
        let b = bid("B", 300, T);
        let stray = bid("C", 100, T);
        let ordered = in_submission_order(
            vec![a.clone(), stray.clone(), b.clone()],
            &[b.clone(), a.clone()],
        );
        assert_eq!(ordered, vec![b, a, stray]);
        assert_eq!(select_winner(&ordered).unwrap().bidder, "B");
    }

    #[test]
    fn test_invalid_bids_are_ignored() {
        let mut invalid = bid("A", 500, T);
        invalid.valid = false;
        let bids = vec![invalid.clone(), bid("B", 100, T)];
        assert_eq!(select_winner(&bids).unwrap().bidder, "B");
        assert!(select_winner(&[invalid]).is_none());
        assert!(select_winner(Vec::<FullBid>::new().iter()).is_none());
    }
}
