use {
    crate::{
        kernel::{
            entities::RequestId,
            ledger::create_composite_key,
        },
        time_oracle::entities,
    },
    serde::{
        Deserialize,
        Serialize,
    },
};

pub const TIME_RECORD_OBJECT_TYPE: &str = "timerecord";

pub fn time_record_key(request_id: &str) -> anyhow::Result<String> {
    create_composite_key(TIME_RECORD_OBJECT_TYPE, &[request_id])
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeRecord {
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
    pub timestamp:  String,
}

impl From<TimeRecord> for entities::TimeRecord {
    fn from(record: TimeRecord) -> Self {
        Self {
            request_id: record.request_id,
            timestamp:  record.timestamp,
        }
    }
}

impl From<entities::TimeRecord> for TimeRecord {
    fn from(record: entities::TimeRecord) -> Self {
        Self {
            request_id: record.request_id,
            timestamp:  record.timestamp,
        }
    }
}
