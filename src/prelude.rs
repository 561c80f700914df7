pub use crate::cli::{
    command::{self, Cli, MenuChoice},
    run::{run_app, run_menu},
};
pub use crate::domain::{
    contact::{self, Contact, ContactUpdate},
    manager::{ContactManager, GroupStats},
};
pub use crate::errors::AppError;
pub use crate::store::{self, ContactMap, ContactStore, json::JsonStore, memory::MemStore};
pub use crate::validation::{ValidationReq, validate_email, validate_name, validate_phone};
