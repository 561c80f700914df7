pub mod export_csv;

use super::*;
pub use export_csv::export_contacts_to_csv;
