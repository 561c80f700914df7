pub mod json;
pub mod memory;
pub mod storage_port;

use indexmap::IndexMap;

use crate::domain::contact::Contact;
use crate::errors::AppError;

/// Contacts keyed by name, in insertion order. Every save of the same map is byte-identical.
pub type ContactMap = IndexMap<String, Contact>;

pub trait ContactStore {
    /// A missing backing resource loads as an empty map.
    fn load(&self) -> Result<ContactMap, AppError>;

    /// Overwrites the backing resource with the whole map.
    fn save(&self, contacts: &ContactMap) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}
