pub mod enrich;
pub mod record;
pub mod stat_names;
pub mod store;
pub mod type_names;

pub use enrich::{ChainIdEnricher, EnrichReport, DEFAULT_ENRICH_PAUSE};
pub use record::{AbilityRef, BaseRecord};
pub use stat_names::{stat_label, StatLine, MAX_BASE_STAT, STAT_LABEL_TABLE};
pub use store::{CsvRecordStore, HttpRecordStore, RecordStore, DEFAULT_RECORDS_CSV_PATH};
pub use type_names::{TypeNameEntry, TypeNames, TYPE_NAME_TABLE};
