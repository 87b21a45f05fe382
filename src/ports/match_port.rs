//! Match data access port trait.

use crate::domain::error::StockError;
use crate::domain::match_record::MatchRecord;

pub trait MatchDataPort {
    /// Every fixture in the source, in source order.
    fn fetch_matches(&self) -> Result<Vec<MatchRecord>, StockError>;

    /// Human-readable name of the source, used in messages.
    fn source_name(&self) -> String;
}
