use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::contact::{Contact, ContactUpdate};
use crate::errors::AppError;
use crate::store::{ContactMap, ContactStore, storage_port::export_contacts_to_csv};
use crate::validation::{ValidationReq, validate_name};

const CONFIRM_TOKEN: &str = "y";

/// The in-memory contact book and the store it is persisted through.
///
/// Every successful mutation writes the whole map back before returning.
pub struct ContactManager {
    pub contacts: ContactMap,
    pub storage: Box<dyn ContactStore>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GroupStats {
    pub total: usize,
    pub groups: BTreeMap<String, usize>,
}

impl ContactManager {
    pub fn new(storage: Box<dyn ContactStore>) -> Result<Self, AppError> {
        let mut manager = Self {
            contacts: ContactMap::new(),
            storage,
        };
        manager.load()?;
        Ok(manager)
    }

    pub fn load(&mut self) -> Result<(), AppError> {
        self.contacts = self.storage.load()?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.storage.save(&self.contacts)
    }

    pub fn contact_list(&self) -> Vec<(&String, &Contact)> {
        self.contacts.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.contacts.get(name)
    }

    pub fn put(&mut self, name: String, contact: Contact) -> Option<Contact> {
        self.contacts.insert(name, contact)
    }

    pub fn delete(&mut self, name: &str) -> Option<Contact> {
        // shift keeps the remaining contacts in insertion order
        self.contacts.shift_remove(name)
    }

    pub fn add_contact(&mut self, name: String, contact: Contact) -> Result<(), AppError> {
        if !validate_name(&name) {
            return Err(AppError::Validation(ValidationReq::name_req()));
        }

        if self.contacts.contains_key(&name) {
            return Err(AppError::Duplicate(name));
        }

        info!(name = %name, "adding contact");
        self.put(name, contact);
        self.save()
    }

    /// Case-insensitive substring match on names, in insertion order.
    /// The term is used as typed, surrounding spaces included.
    pub fn search(&self, term: &str) -> Vec<(&String, &Contact)> {
        let term = term.to_lowercase();

        self.contacts
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&term))
            .collect()
    }

    pub fn update_contact(&mut self, name: &str, update: ContactUpdate) -> Result<(), AppError> {
        let contact = self
            .contacts
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(format!("Contact '{}'", name)))?;

        info!(name = %name, "updating contact");
        contact.apply(update);
        self.save()
    }

    /// Removes `name` only when `confirmation` is exactly `y` or `Y`.
    /// Returns whether the contact was removed.
    pub fn delete_contact(&mut self, name: &str, confirmation: &str) -> Result<bool, AppError> {
        if !self.contacts.contains_key(name) {
            return Err(AppError::NotFound(format!("Contact '{}'", name)));
        }

        if confirmation.to_lowercase() != CONFIRM_TOKEN {
            return Ok(false);
        }

        info!(name = %name, "deleting contact");
        self.delete(name);
        self.save()?;
        Ok(true)
    }

    pub fn group_statistics(&self) -> GroupStats {
        let mut groups: BTreeMap<String, usize> = BTreeMap::new();

        for contact in self.contacts.values() {
            *groups.entry(contact.group.clone()).or_default() += 1;
        }

        GroupStats {
            total: self.contacts.len(),
            groups,
        }
    }

    pub fn export_contacts_to_csv(&self, des: &Path) -> Result<(PathBuf, u64), AppError> {
        let (path, total) = export_contacts_to_csv(&self.contacts, des)?;
        info!(path = %path.display(), total, "exported contacts");
        Ok((path, total))
    }
}
