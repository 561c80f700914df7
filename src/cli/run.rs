use crate::{
    cli::{display_contact, get_input, prompt, prompt_raw, retry, show_menu},
    prelude::{
        AppError, Contact, ContactManager, ContactUpdate, JsonStore, ValidationReq,
        command::{Cli, MenuChoice},
        validate_email, validate_name, validate_phone,
    },
};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

pub fn run_app(cli: &Cli) -> Result<(), AppError> {
    let storage = JsonStore::new(&cli.data_file);
    info!(path = %storage.path().display(), "opening contact book");

    let mut manager = ContactManager::new(Box::new(storage))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();

    run_menu(&mut manager, &cli.export_file, &mut reader, &mut writer)
}

/// Menu loop. Returns after "Exit" or when input runs out, saving once more
/// on the way out. Storage failures end the loop with an error.
pub fn run_menu<R, W>(
    manager: &mut ContactManager,
    export_path: &Path,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    loop {
        show_menu(writer)?;

        let choice = match get_input(reader) {
            Ok(choice) => choice,
            Err(AppError::EndOfInput) => break,
            Err(e) => return Err(e),
        };

        let command = match choice.parse::<MenuChoice>() {
            Ok(command) => command,
            Err(_) => {
                debug!("unrecognized menu choice");
                writeln!(writer, "Invalid choice!")?;
                continue;
            }
        };

        let outcome = match command {
            MenuChoice::Add => add_contact(manager, reader, writer),
            MenuChoice::Search => search_contacts(manager, reader, writer),
            MenuChoice::Update => update_contact(manager, reader, writer),
            MenuChoice::Delete => delete_contact(manager, reader, writer),
            MenuChoice::DisplayAll => display_all_contacts(manager, writer),
            MenuChoice::Export => export_contacts(manager, export_path, writer),
            MenuChoice::Statistics => statistics(manager, writer),
            MenuChoice::Exit => break,
        };

        match outcome {
            Ok(()) => {}
            Err(AppError::EndOfInput) => break,
            Err(e) => return Err(e),
        }
    }

    manager.save()?;
    writeln!(writer, "\nGoodbye!")?;
    Ok(())
}

fn add_contact<R: BufRead, W: Write>(
    manager: &mut ContactManager,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), AppError> {
    writeln!(writer, "\n--- ADD NEW CONTACT ---")?;

    let name = retry(
        reader,
        writer,
        "Enter contact name: ",
        &ValidationReq::name_req(),
        |input| Ok(validate_name(input).then(|| input.to_string())),
    )?;

    if manager.get(&name).is_some() {
        writeln!(writer, "{}", AppError::Duplicate(name))?;
        return Ok(());
    }

    let phone = retry(
        reader,
        writer,
        "Enter phone number: ",
        &ValidationReq::phone_req(),
        |input| Ok(validate_phone(input)),
    )?;

    // blank means no email
    let email = retry(
        reader,
        writer,
        "Enter email (optional): ",
        &ValidationReq::email_req(),
        |input| {
            if input.is_empty() || validate_email(input)? {
                Ok(Some(input.to_string()))
            } else {
                Ok(None)
            }
        },
    )?;

    let address = prompt(reader, writer, "Enter address (optional): ")?;
    let group = prompt(reader, writer, "Enter group (Friends/Family/Work): ")?;

    match manager.add_contact(name, Contact::new(phone, email, address, group)) {
        Ok(()) => writeln!(writer, "Contact added successfully!")?,
        Err(e @ AppError::Duplicate(_)) | Err(e @ AppError::Validation(_)) => {
            writeln!(writer, "{}", e)?
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn search_contacts<R: BufRead, W: Write>(
    manager: &ContactManager,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), AppError> {
    let term = prompt_raw(reader, writer, "Enter name to search: ")?;
    let found = manager.search(&term);

    if found.is_empty() {
        writeln!(writer, "No contacts found.")?;
        return Ok(());
    }

    for (name, contact) in found {
        writeln!(writer, "{}", display_contact(name, contact))?;
    }
    Ok(())
}

fn update_contact<R: BufRead, W: Write>(
    manager: &mut ContactManager,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), AppError> {
    let name = prompt(reader, writer, "Enter contact name to update: ")?;

    if manager.get(&name).is_none() {
        writeln!(writer, "{}", AppError::NotFound(format!("Contact '{}'", name)))?;
        return Ok(());
    }

    let mut update = ContactUpdate::default();

    let phone = prompt(reader, writer, "New phone (Enter to skip): ")?;
    if !phone.is_empty() {
        match validate_phone(&phone) {
            Some(digits) => update.phone = Some(digits),
            None => writeln!(writer, "{} Phone left unchanged.", ValidationReq::phone_req())?,
        }
    }

    let email = prompt(reader, writer, "New email (Enter to skip): ")?;
    if !email.is_empty() {
        if validate_email(&email)? {
            update.email = Some(email);
        } else {
            writeln!(writer, "{} Email left unchanged.", ValidationReq::email_req())?;
        }
    }

    let address = prompt(reader, writer, "New address (Enter to skip): ")?;
    if !address.is_empty() {
        update.address = Some(address);
    }

    let group = prompt(reader, writer, "New group (Enter to skip): ")?;
    if !group.is_empty() {
        update.group = Some(group);
    }

    if update.is_empty() {
        writeln!(writer, "No fields changed.")?;
    }

    manager.update_contact(&name, update)?;
    writeln!(writer, "Contact updated successfully!")?;
    Ok(())
}

fn delete_contact<R: BufRead, W: Write>(
    manager: &mut ContactManager,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), AppError> {
    let name = prompt(reader, writer, "Enter contact name to delete: ")?;

    let Some(contact) = manager.get(&name) else {
        writeln!(writer, "{}", AppError::NotFound(format!("Contact '{}'", name)))?;
        return Ok(());
    };
    writeln!(writer, "{}", display_contact(&name, contact))?;

    let confirmation = prompt_raw(reader, writer, "Are you sure? (y/n): ")?;

    if manager.delete_contact(&name, &confirmation)? {
        writeln!(writer, "Contact deleted!")?;
    } else {
        writeln!(writer, "Delete cancelled.")?;
    }
    Ok(())
}

fn display_all_contacts<W: Write>(manager: &ContactManager, writer: &mut W) -> Result<(), AppError> {
    if manager.is_empty() {
        writeln!(writer, "No contacts available.")?;
        return Ok(());
    }

    for (name, contact) in manager.contact_list() {
        writeln!(writer, "{}", display_contact(name, contact))?;
    }
    Ok(())
}

fn export_contacts<W: Write>(
    manager: &ContactManager,
    export_path: &Path,
    writer: &mut W,
) -> Result<(), AppError> {
    match manager.export_contacts_to_csv(export_path) {
        Ok((path, total)) => {
            writeln!(writer, "Exported {} contacts to {}", total, path.display())?;
            Ok(())
        }
        Err(e @ AppError::Validation(_)) => {
            writeln!(writer, "{}", e)?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn statistics<W: Write>(manager: &ContactManager, writer: &mut W) -> Result<(), AppError> {
    let stats = manager.group_statistics();

    writeln!(writer, "Total contacts: {}", stats.total)?;
    for (group, count) in &stats.groups {
        writeln!(writer, "{:<15} {}", group, count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{ContactStore, MemStore};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run(manager: &mut ContactManager, input: &str) -> Result<String, AppError> {
        let dir = tempdir()?;
        let mut reader = Cursor::new(input.to_string());
        let mut writer = Vec::new();

        run_menu(manager, &dir.path().join("contacts.csv"), &mut reader, &mut writer)?;

        Ok(String::from_utf8_lossy(&writer).into_owned())
    }

    fn mem_manager() -> Result<ContactManager, AppError> {
        ContactManager::new(Box::new(MemStore::new()))
    }

    #[test]
    fn add_reprompts_until_phone_and_email_are_valid() -> Result<(), AppError> {
        let mut manager = mem_manager()?;

        let output = run(
            &mut manager,
            "1\n\nAlice\n123\n(987) 654-3210\nalice@\nalice@example.com\n\nFriends\n8\n",
        )?;

        assert!(output.contains("Name cannot be empty!"));
        assert!(output.contains("Invalid phone number!"));
        assert!(output.contains("Invalid email format!"));
        assert!(output.contains("Contact added successfully!"));
        assert!(output.ends_with("Goodbye!\n"));

        let alice = manager.get("Alice").ok_or(AppError::NotFound("Alice".to_string()))?;
        assert_eq!(alice.phone, "9876543210");
        assert_eq!(alice.email.as_deref(), Some("alice@example.com"));
        assert_eq!(alice.address, None);
        assert_eq!(alice.group, "Friends");
        Ok(())
    }

    #[test]
    fn duplicate_add_stops_early() -> Result<(), AppError> {
        let mut manager = mem_manager()?;
        run(&mut manager, "1\nAlice\n9876543210\n\n\n\n8\n")?;
        let before = manager.contacts.clone();

        // The 5555555555 line is read as a menu choice after the rejection
        let output = run(&mut manager, "1\nAlice\n5555555555\n8\n")?;

        assert!(output.contains("Contact 'Alice' already exists!"));
        assert!(output.contains("Invalid choice!"));
        assert_eq!(manager.contacts, before);
        Ok(())
    }

    #[test]
    fn search_prints_matches_or_nothing_found() -> Result<(), AppError> {
        let mut manager = mem_manager()?;
        run(&mut manager, "1\nAlice\n9876543210\n\n\n\n8\n")?;

        let output = run(&mut manager, "2\nali\n2\nzed\n8\n")?;

        assert!(output.contains("Name   : Alice"));
        assert!(output.contains("No contacts found."));

        let output = run(&mut manager, "2\n ali\n8\n")?;
        assert!(output.contains("No contacts found."));
        Ok(())
    }

    #[test]
    fn update_skips_blank_and_invalid_fields() -> Result<(), AppError> {
        let mut manager = mem_manager()?;
        run(&mut manager, "1\nAlice\n9876543210\nalice@example.com\n1 Main St\nWork\n8\n")?;

        let output = run(&mut manager, "3\nAlice\n12\nnot-an-email\n\nFamily\n8\n")?;

        assert!(output.contains("Phone left unchanged."));
        assert!(output.contains("Email left unchanged."));
        assert!(output.contains("Contact updated successfully!"));

        let alice = manager.get("Alice").ok_or(AppError::NotFound("Alice".to_string()))?;
        assert_eq!(alice.phone, "9876543210");
        assert_eq!(alice.email.as_deref(), Some("alice@example.com"));
        assert_eq!(alice.address.as_deref(), Some("1 Main St"));
        assert_eq!(alice.group, "Family");
        Ok(())
    }

    #[test]
    fn update_with_nothing_supplied_says_so() -> Result<(), AppError> {
        let mut manager = mem_manager()?;
        run(&mut manager, "1\nAlice\n9876543210\n\n\nWork\n8\n")?;
        let before = manager.get("Alice").cloned().ok_or(AppError::NotFound("Alice".to_string()))?;

        let output = run(&mut manager, "3\nAlice\n\n\n\n\n8\n")?;

        assert!(output.contains("No fields changed."));
        assert!(output.contains("Contact updated successfully!"));
        let alice = manager.get("Alice").ok_or(AppError::NotFound("Alice".to_string()))?;
        assert_eq!(alice.phone, before.phone);
        assert_eq!(alice.group, before.group);
        assert!(alice.updated_at >= before.updated_at);
        Ok(())
    }

    #[test]
    fn update_and_delete_report_missing_contacts() -> Result<(), AppError> {
        let mut manager = mem_manager()?;

        let output = run(&mut manager, "3\nGhost\n4\nGhost\n8\n")?;

        assert_eq!(output.matches("Contact 'Ghost' not found!").count(), 2);
        Ok(())
    }

    #[test]
    fn delete_needs_confirmation() -> Result<(), AppError> {
        let mut manager = mem_manager()?;
        run(&mut manager, "1\nAlice\n9876543210\n\n\n\n8\n")?;

        let output = run(&mut manager, "4\nAlice\nn\n")?;
        assert!(output.contains("Delete cancelled."));
        assert!(manager.get("Alice").is_some());

        let output = run(&mut manager, "4\nAlice\n y\n4\nAlice\ny \n8\n")?;
        assert_eq!(output.matches("Delete cancelled.").count(), 2);
        assert!(manager.get("Alice").is_some());

        let output = run(&mut manager, "4\nAlice\nY\n8\n")?;
        assert!(output.contains("Contact deleted!"));
        assert!(manager.is_empty());
        assert!(manager.storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn statistics_and_listing() -> Result<(), AppError> {
        let mut manager = mem_manager()?;
        let output = run(&mut manager, "5\n7\n")?;
        assert!(output.contains("No contacts available."));
        assert!(output.contains("Total contacts: 0"));

        run(
            &mut manager,
            "1\nAlice\n9876543210\n\n\nFriends\n1\nBob\n1234567890\n\n\nFriends\n1\nCarol\n1112223333\n\n\n\n8\n",
        )?;

        let output = run(&mut manager, "5\n7\n8\n")?;
        assert!(output.contains("Name   : Bob"));
        assert!(output.contains("Total contacts: 3"));
        assert!(output.contains("Friends         2"));
        assert!(output.contains("Other           1"));
        Ok(())
    }

    #[test]
    fn unknown_choice_and_closed_input() -> Result<(), AppError> {
        let mut manager = mem_manager()?;

        let output = run(&mut manager, "0\nhello\n")?;

        assert_eq!(output.matches("Invalid choice!").count(), 2);
        assert!(output.ends_with("Goodbye!\n"));
        Ok(())
    }

    #[test]
    fn closed_input_mid_add_discards_partial_contact() -> Result<(), AppError> {
        let mut manager = mem_manager()?;

        let output = run(&mut manager, "1\nAlice\n123\n")?;

        assert!(output.ends_with("Goodbye!\n"));
        assert!(manager.is_empty());
        Ok(())
    }

    #[test]
    fn export_writes_csv() -> Result<(), AppError> {
        let dir = tempdir()?;
        let export_path = dir.path().join("out.csv");
        let mut manager = mem_manager()?;
        let mut reader = Cursor::new("1\nAlice\n9876543210\n\n\n\n6\n8\n");
        let mut writer = Vec::new();

        run_menu(&mut manager, &export_path, &mut reader, &mut writer)?;

        let output = String::from_utf8_lossy(&writer);
        assert!(output.contains("Exported 1 contacts to"));
        assert_eq!(
            std::fs::read_to_string(&export_path)?,
            "Name,Phone,Email,Address,Group\nAlice,9876543210,,,Other\n"
        );
        Ok(())
    }
}
