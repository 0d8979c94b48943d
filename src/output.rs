use crate::cli::OutputFormat;
use crate::response::{ApiResponse, Body};
use crate::types::Pet;
use console::{Style, style};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Tabled, Serialize)]
pub struct PetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    animal_type: String,
    #[tabled(rename = "AGE")]
    age: String,
    #[tabled(rename = "PHOTO")]
    photo: String,
}

impl From<&Pet> for PetRow {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            animal_type: pet.animal_type.clone(),
            age: pet.age.clone(),
            photo: if pet.has_photo() { "yes" } else { "-" }.to_string(),
        }
    }
}

/// Print data as a table
pub fn print_table<T: Tabled>(data: Vec<T>) {
    if data.is_empty() {
        println!("{}", style("No items found").dim());
        return;
    }
    let table = Table::new(data).to_string();
    println!("{}", table);
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    print!("{}", yaml);
    Ok(())
}

/// Print a response: status line plus body in table mode, the whole
/// `{status, body}` object otherwise.
pub fn print_response(format: OutputFormat, response: &ApiResponse) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Yaml => print_yaml(response),
        OutputFormat::Table => {
            print_status(response.status);
            print_body(&response.body)
        }
    }
}

/// Like `print_response`, but renders a successful pet list as a table.
pub fn print_pet_list(format: OutputFormat, response: &ApiResponse) -> anyhow::Result<()> {
    if format != OutputFormat::Table || !response.is_success() {
        return print_response(format, response);
    }
    match response.pets() {
        Ok(list) => {
            print_status(response.status);
            print_table(list.pets.iter().map(PetRow::from).collect());
            Ok(())
        }
        Err(_) => print_response(format, response),
    }
}

fn print_body(body: &Body) -> anyhow::Result<()> {
    match body {
        Body::Json(value) => print_json(value),
        Body::Text(text) if text.is_empty() => Ok(()),
        Body::Text(text) => {
            println!("{}", text);
            Ok(())
        }
    }
}

/// Print the status line, colored by class
pub fn print_status(status: u16) {
    println!("{}", status_style(status).apply_to(format!("HTTP {}", status)));
}

/// Style for an HTTP status
pub fn status_style(status: u16) -> Style {
    match status {
        200..=299 => Style::new().green().bold(),
        403 => Style::new().red(),
        400..=499 => Style::new().yellow(),
        500..=599 => Style::new().red().bold(),
        _ => Style::new(),
    }
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
