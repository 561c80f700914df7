use std::path::{Path, PathBuf};

use super::*;
use crate::helper::create_file_parent;
use csv::WriterBuilder;
use serde::Serialize;

pub const EXPORT_PATH: &str = "contacts.csv";
const HEADER: [&str; 5] = ["Name", "Phone", "Email", "Address", "Group"];

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    phone: &'a str,
    email: Option<&'a str>,
    address: Option<&'a str>,
    group: &'a str,
}

/// Writes one row per contact, in insertion order, and returns the file written with the row count.
///
/// A directory destination gets `contacts.csv` inside it.
pub fn export_contacts_to_csv(contacts: &ContactMap, des: &Path) -> Result<(PathBuf, u64), AppError> {
    let mut file_path = des.to_path_buf();

    if file_path.is_dir() || file_path.extension().is_some_and(|ext| ext != "csv") {
        if file_path.is_dir() {
            file_path = file_path.join(EXPORT_PATH);
        } else {
            return Err(AppError::Validation(
                "Export file must be a .csv file".to_string(),
            ));
        }
    }

    create_file_parent(&file_path)?;

    // Header goes out explicitly so an empty book still gets one.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&file_path)?;
    writer.write_record(HEADER)?;

    let mut counter: u64 = 0;

    for (name, contact) in contacts {
        writer.serialize(CsvRow {
            name,
            phone: &contact.phone,
            email: contact.email.as_deref(),
            address: contact.address.as_deref(),
            group: &contact.group,
        })?;
        counter += 1;
    }

    writer.flush()?;

    Ok((file_path, counter))
}
