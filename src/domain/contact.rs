use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::helper::timestamp;

pub const DEFAULT_GROUP: &str = "Other";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One stored record. The contact's name is its key in the store and is not
/// repeated here.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,

    #[serde(default = "default_group")]
    pub group: String,

    #[serde(serialize_with = "serialize_timestamp", deserialize_with = "deserialize_timestamp")]
    pub created_at: NaiveDateTime,

    #[serde(serialize_with = "serialize_timestamp", deserialize_with = "deserialize_timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Fields to overwrite on an existing contact. `None` leaves the field as it is.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub group: Option<String>,
}

impl Contact {
    /// Blank email, address or group inputs are treated as not supplied.
    pub fn new(phone: String, email: String, address: String, group: String) -> Self {
        let now = timestamp();
        Contact {
            phone,
            email: non_blank(email),
            address: non_blank(address),
            group: non_blank(group).unwrap_or_else(default_group),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ContactUpdate) {
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(group) = update.group {
            self.group = group;
        }

        self.updated_at = timestamp();
    }
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.address.is_none() && self.group.is_none()
    }
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

/// Always six fractional digits, even when they are all zero.
fn serialize_timestamp<S>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&at.format(TIMESTAMP_FORMAT))
}

// Accepts any ISO-8601 local time, with or without a fraction.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<NaiveDateTime>().map_err(serde::de::Error::custom)
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
