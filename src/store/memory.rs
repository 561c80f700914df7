use super::*;

use std::cell::RefCell;

/// Keeps the "persisted" map in memory. Used where a file would only get in the way.
#[derive(Default)]
pub struct MemStore {
    pub data: RefCell<ContactMap>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<ContactMap, AppError> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, contacts: &ContactMap) -> Result<(), AppError> {
        *self.data.borrow_mut() = contacts.clone();
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
