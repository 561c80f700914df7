use super::*;

use crate::helper::create_file_parent;
use serde::Serialize;
use serde_json::{Serializer, ser::PrettyFormatter};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STORAGE_PATH: &str = "contacts_data.json";

pub struct JsonStore {
    pub medium: String,
    pub path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "json".to_string(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new(STORAGE_PATH)
    }
}

impl ContactStore for JsonStore {
    fn load(&self) -> Result<ContactMap, AppError> {
        if !fs::exists(&self.path)? {
            debug!(path = %self.path.display(), "no contact file yet, starting empty");
            return Ok(ContactMap::new());
        }

        let mut file = OpenOptions::new().read(true).open(&self.path)?;

        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // An existing file must parse, empty or not. Failures abort the caller.
        let contacts: ContactMap = serde_json::from_str(&data)?;

        debug!(path = %self.path.display(), count = contacts.len(), "loaded contacts");
        Ok(contacts)
    }

    fn save(&self, contacts: &ContactMap) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut data = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(b"    "));
        contacts.serialize(&mut serializer)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        file.write_all(&data)?;

        debug!(path = %self.path.display(), count = contacts.len(), "saved contacts");
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}
