mod add_time_record;
mod get_time_record;
mod models;

/// Reads and writes time records through the ledger of the enclosing transaction.
#[derive(Debug, Default)]
pub struct Repository {}

impl Repository {
    pub fn new() -> Self {
        Self {}
    }
}
