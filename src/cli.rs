pub mod command;
pub mod run;

use crate::domain::contact::Contact;
use crate::errors::AppError;
use std::io::{BufRead, Write};
use tracing::debug;

// OUTPUT FUNCTIONS
pub fn show_menu<W: Write>(writer: &mut W) -> Result<(), AppError> {
    writeln!(writer)?;
    writeln!(writer, "CONTACT MANAGEMENT SYSTEM")?;
    writeln!(writer, "1. Add Contact")?;
    writeln!(writer, "2. Search Contact")?;
    writeln!(writer, "3. Update Contact")?;
    writeln!(writer, "4. Delete Contact")?;
    writeln!(writer, "5. Display All")?;
    writeln!(writer, "6. Export to CSV")?;
    writeln!(writer, "7. Statistics")?;
    writeln!(writer, "8. Exit")?;
    write!(writer, "Choose option: ")?;
    writer.flush()?;
    Ok(())
}

pub fn display_contact(name: &str, contact: &Contact) -> String {
    let mut output = format!(
        "{}\n\
        Name   : {}\n\
        Phone  : {}\n",
        "-".repeat(40),
        name,
        contact.phone
    );

    if let Some(email) = &contact.email {
        output.push_str(&format!("Email  : {}\n", email));
    }
    if let Some(address) = &contact.address {
        output.push_str(&format!("Address: {}\n", address));
    }
    output.push_str(&format!("Group  : {}", contact.group));

    output
}

// INPUT FUNCTIONS

/// Reads one line with only the line ending removed. A closed input stream
/// is `AppError::EndOfInput`.
pub fn get_raw_input<R: BufRead>(reader: &mut R) -> Result<String, AppError> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(AppError::EndOfInput);
    }
    let line = input.strip_suffix('\n').unwrap_or(&input);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(line.to_string())
}

/// Reads one trimmed line.
pub fn get_input<R: BufRead>(reader: &mut R) -> Result<String, AppError> {
    Ok(get_raw_input(reader)?.trim().to_string())
}

pub fn prompt<R, W>(reader: &mut R, writer: &mut W, message: &str) -> Result<String, AppError>
where
    R: BufRead,
    W: Write,
{
    Ok(prompt_raw(reader, writer, message)?.trim().to_string())
}

/// Like `prompt`, but keeps surrounding whitespace.
pub fn prompt_raw<R, W>(reader: &mut R, writer: &mut W, message: &str) -> Result<String, AppError>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{}", message)?;
    writer.flush()?;
    get_raw_input(reader)
}

/// Prompts until `valid` accepts the input, printing `rejection` after each miss.
pub fn retry<R, W, F, T>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    rejection: &str,
    valid: F,
) -> Result<T, AppError>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<Option<T>, AppError>,
{
    loop {
        let input = prompt(reader, writer, message)?;

        if let Some(value) = valid(&input)? {
            break Ok(value);
        }

        debug!("rejected input");
        writeln!(writer, "{}", rejection)?;
    }
}
