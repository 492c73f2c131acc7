#[cfg(test)]
use mockall::automock;
use {
    super::entities::OrgId,
    anyhow::anyhow,
    axum::async_trait,
    time::OffsetDateTime,
};

/// Separator of composite key parts; also the first character of every composite key,
/// which keeps composite keys out of simple range scans.
pub const MIN_UNICODE_RUNE: char = '\u{0}';
pub const MAX_UNICODE_RUNE: char = char::MAX;
/// First key of an unbounded simple range scan.
const SIMPLE_KEY_RANGE_START: &str = "\u{1}";

pub type KeyValue = (String, Vec<u8>);

/// The per-transaction view of the shared ledger.
///
/// Every auction and oracle operation receives one of these explicitly. All writes made
/// through it commit together or not at all, and reads observe the state the transaction
/// started from plus its own writes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Unique id of the enclosing transaction.
    fn tx_id(&self) -> String;
    /// Timestamp the submitting client attached to the enclosing transaction.
    fn tx_timestamp(&self) -> OffsetDateTime;
    /// Organization of the peer executing the transaction.
    fn peer_organization(&self) -> OrgId;

    async fn get_state(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    async fn put_state(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()>;
    /// Returns the simple keys in `[start_key, end_key)` in key order. Empty bounds are open.
    /// Composite keys are never part of the result.
    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> anyhow::Result<Vec<KeyValue>>;
    /// Returns every composite key of `object_type` starting with the given attributes,
    /// in key order.
    async fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[String],
    ) -> anyhow::Result<Vec<KeyValue>>;

    async fn get_private_data(&self, collection: &str, key: &str)
        -> anyhow::Result<Option<Vec<u8>>>;
    async fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> anyhow::Result<()>;
}

fn validate_composite_key_attribute(attribute: &str) -> anyhow::Result<()> {
    if attribute.contains(MIN_UNICODE_RUNE) || attribute.contains(MAX_UNICODE_RUNE) {
        return Err(anyhow!(
            "input contains unicode {:#x} or {:#x} which are reserved",
            MIN_UNICODE_RUNE as u32,
            MAX_UNICODE_RUNE as u32
        ));
    }
    Ok(())
}

/// Simple keys must be non empty and stay out of the composite key namespace.
pub fn validate_simple_key(key: &str) -> anyhow::Result<()> {
    if key.is_empty() {
        return Err(anyhow!("key must not be an empty string"));
    }
    validate_composite_key_attribute(key)
}

pub fn create_composite_key(object_type: &str, attributes: &[&str]) -> anyhow::Result<String> {
    validate_composite_key_attribute(object_type)?;
    let mut key = String::new();
    key.push(MIN_UNICODE_RUNE);
    key.push_str(object_type);
    key.push(MIN_UNICODE_RUNE);
    for attribute in attributes {
        validate_composite_key_attribute(attribute)?;
        key.push_str(attribute);
        key.push(MIN_UNICODE_RUNE);
    }
    Ok(key)
}

pub fn split_composite_key(key: &str) -> anyhow::Result<(String, Vec<String>)> {
    let rest = key
        .strip_prefix(MIN_UNICODE_RUNE)
        .ok_or_else(|| anyhow!("{:?} is not a composite key", key))?;
    let mut parts = rest
        .split_terminator(MIN_UNICODE_RUNE)
        .map(str::to_string);
    let object_type = parts
        .next()
        .ok_or_else(|| anyhow!("{:?} has no object type", key))?;
    Ok((object_type, parts.collect()))
}

pub fn is_composite_key(key: &str) -> bool {
    key.starts_with(MIN_UNICODE_RUNE)
}

/// Translates the bounds of a simple range scan into a concrete `[start, end)` pair,
/// `None` standing for an unbounded end.
pub fn simple_range_bounds<'a>(start_key: &'a str, end_key: &'a str) -> (&'a str, Option<&'a str>) {
    let start = if start_key.is_empty() {
        SIMPLE_KEY_RANGE_START
    } else {
        start_key
    };
    let end = (!end_key.is_empty()).then_some(end_key);
    (start, end)
}

/// Bounds covering every composite key of `object_type` whose leading attributes are `attributes`.
pub fn partial_composite_key_bounds(
    object_type: &str,
    attributes: &[String],
) -> anyhow::Result<(String, String)> {
    let attributes: Vec<&str> = attributes.iter().map(String::as_str).collect();
    let start = create_composite_key(object_type, &attributes)?;
    let mut end = start.clone();
    end.push(MAX_UNICODE_RUNE);
    Ok((start, end))
}

/// Name of the private partition that only peers of `org` hold.
pub fn implicit_collection_name(org: &str) -> String {
    format!("_implicit_org_{}", org)
}
