use crate::kernel::entities::RequestId;

/// A trusted timestamp resolved once for a request id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRecord {
    pub request_id: RequestId,
    pub timestamp:  String,
}
