use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jot::models::{NoteId, SortBy, SortOption, SortOrder};
use jot::utils::{ensure_database_directory, get_database_path};
use jot::weather::{WeatherClientBuilder, WeatherProvider};
use jot::{Database, NoteService, transfer, view};

/// jot - local-first note taking for the terminal
#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "A local-first note-taking tool with search, sort, and JSON transfer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Add a new note
    Add(AddCommand),
    /// List notes, optionally filtered and sorted
    List(ListCommand),
    /// Edit the title and/or content of an existing note
    Edit(EditCommand),
    /// Delete a note by id
    Delete(DeleteCommand),
    /// Export all notes to a JSON file
    Export(ExportCommand),
    /// Import notes from a JSON file, replacing the current set
    Import(ImportCommand),
    /// Show the current temperature for a location
    Weather(WeatherCommand),
    /// Open the interactive terminal UI
    Tui,
}

/// Add a new note
#[derive(Parser)]
struct AddCommand {
    /// The title of the note
    #[arg(value_name = "TITLE")]
    title: Option<String>,

    /// The content of the note
    #[arg(value_name = "CONTENT")]
    content: Option<String>,
}

/// List notes
#[derive(Parser)]
struct ListCommand {
    /// Case-insensitive substring to match against titles and contents
    #[arg(short, long, value_name = "QUERY")]
    search: Option<String>,

    /// Field to sort by
    #[arg(long, value_enum, default_value_t)]
    sort_by: SortBy,

    /// Sort direction
    #[arg(long, value_enum, default_value_t)]
    order: SortOrder,
}

/// Edit an existing note
#[derive(Parser)]
struct EditCommand {
    /// The id of the note to edit
    #[arg(value_name = "ID")]
    id: i64,

    /// New title (unchanged when omitted)
    #[arg(short, long, value_name = "TITLE")]
    title: Option<String>,

    /// New content (unchanged when omitted)
    #[arg(short, long, value_name = "CONTENT")]
    content: Option<String>,
}

/// Delete a note
#[derive(Parser)]
struct DeleteCommand {
    /// The id of the note to delete
    #[arg(value_name = "ID")]
    id: i64,
}

/// Export notes to a file
#[derive(Parser)]
struct ExportCommand {
    /// Destination file path
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// Import notes from a file
#[derive(Parser)]
struct ImportCommand {
    /// Source file path
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// Fetch the current temperature
#[derive(Parser)]
struct WeatherCommand {
    /// Latitude in decimal degrees
    #[arg(long, value_name = "LAT", allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, value_name = "LON", allow_hyphen_values = true)]
    lon: f64,
}

fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Add(cmd) => handle_add(cmd),
        Commands::List(cmd) => handle_list(cmd),
        Commands::Edit(cmd) => handle_edit(cmd),
        Commands::Delete(cmd) => handle_delete(cmd),
        Commands::Export(cmd) => handle_export(cmd),
        Commands::Import(cmd) => handle_import(cmd),
        Commands::Weather(cmd) => handle_weather(cmd),
        Commands::Tui => handle_tui(),
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include validation failures like empty notes, unknown ids,
/// and malformed import documents. Internal errors include database failures
/// and I/O errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        let msg = cause.to_string();
        msg.contains("cannot be empty") || msg.contains("not found") || msg.contains("Malformed")
    })
}

/// Opens the database at its standard location and wraps it in a service.
fn open_service() -> Result<NoteService> {
    let db_path = get_database_path()?;
    ensure_database_directory(&db_path)?;
    let db = Database::open(&db_path).context("Failed to open database")?;
    Ok(NoteService::new(db))
}

/// Handles the add command by creating a new note.
fn handle_add(cmd: &AddCommand) -> Result<()> {
    execute_add(cmd, open_service()?)
}

/// Executes the add command logic with a provided service.
///
/// This function is separated from `handle_add` to allow testing with
/// in-memory databases.
fn execute_add(cmd: &AddCommand, service: NoteService) -> Result<()> {
    let title = cmd.title.as_deref().unwrap_or("");
    let content = cmd.content.as_deref().unwrap_or("");

    if title.trim().is_empty() && content.trim().is_empty() {
        anyhow::bail!("Note cannot be empty");
    }

    let note = service
        .insert_note(title, content)
        .context("Failed to create note")?;

    println!("Note created (id: {})", note.id);
    Ok(())
}

/// Handles the list command.
fn handle_list(cmd: &ListCommand) -> Result<()> {
    execute_list(cmd, open_service()?)
}

/// Executes the list command: pulls the snapshot, derives the view, prints it.
fn execute_list(cmd: &ListCommand, service: NoteService) -> Result<()> {
    for line in render_list(cmd, &service)? {
        println!("{line}");
    }
    Ok(())
}

/// Builds the printed lines for the list command.
///
/// One line per note in the derived view: the id, the display title, and the
/// first line of the content when there is one.
fn render_list(cmd: &ListCommand, service: &NoteService) -> Result<Vec<String>> {
    let notes = service.list_notes().context("Failed to load notes")?;
    let sort = SortOption::new(cmd.sort_by, cmd.order);
    let view = view::derive_view(&notes, cmd.search.as_deref().unwrap_or(""), sort);

    if view.is_empty() {
        return Ok(vec!["No notes".to_string()]);
    }

    Ok(view
        .iter()
        .map(|note| {
            let preview = note.content.lines().next().unwrap_or("");
            if preview.is_empty() {
                format!("[{}] {}", note.id, note.display_title())
            } else {
                format!("[{}] {}: {}", note.id, note.display_title(), preview)
            }
        })
        .collect())
}

/// Handles the edit command.
fn handle_edit(cmd: &EditCommand) -> Result<()> {
    execute_edit(cmd, open_service()?)
}

/// Executes the edit command, merging the provided fields into the note.
fn execute_edit(cmd: &EditCommand, service: NoteService) -> Result<()> {
    let id = NoteId::new(cmd.id);
    let existing = service
        .get_note(id)
        .context("Failed to load note")?
        .ok_or_else(|| anyhow::anyhow!("Note {id} not found"))?;

    let title = cmd.title.as_deref().unwrap_or(&existing.title);
    let content = cmd.content.as_deref().unwrap_or(&existing.content);

    service
        .update_note(id, title, content)
        .context("Failed to update note")?;

    println!("Note {id} updated");
    Ok(())
}

/// Handles the delete command.
fn handle_delete(cmd: &DeleteCommand) -> Result<()> {
    execute_delete(cmd, open_service()?)
}

/// Executes the delete command.
///
/// Reports an unknown id as a user error rather than silently succeeding.
fn execute_delete(cmd: &DeleteCommand, service: NoteService) -> Result<()> {
    let id = NoteId::new(cmd.id);
    if service.get_note(id).context("Failed to load note")?.is_none() {
        anyhow::bail!("Note {id} not found");
    }

    service.delete_note(id).context("Failed to delete note")?;

    println!("Note {id} deleted");
    Ok(())
}

/// Handles the export command.
fn handle_export(cmd: &ExportCommand) -> Result<()> {
    execute_export(cmd, open_service()?)
}

/// Executes the export command, writing the full note set as JSON.
fn execute_export(cmd: &ExportCommand, service: NoteService) -> Result<()> {
    let notes = service.list_notes().context("Failed to load notes")?;
    transfer::export_to_path(&notes, &cmd.file)
        .with_context(|| format!("Failed to export notes to {}", cmd.file.display()))?;

    println!("Exported {} notes to {}", notes.len(), cmd.file.display());
    Ok(())
}

/// Handles the import command.
fn handle_import(cmd: &ImportCommand) -> Result<()> {
    execute_import(cmd, open_service()?)
}

/// Executes the import command.
///
/// The document is decoded strictly before any store mutation, so a
/// malformed file leaves the existing notes untouched.
fn execute_import(cmd: &ImportCommand, service: NoteService) -> Result<()> {
    let notes = transfer::import_from_path(&cmd.file)
        .with_context(|| format!("Failed to import notes from {}", cmd.file.display()))?;

    service
        .replace_all(&notes)
        .context("Failed to store imported notes")?;

    println!("Imported {} notes from {}", notes.len(), cmd.file.display());
    Ok(())
}

/// Handles the weather command by querying the forecast service.
fn handle_weather(cmd: &WeatherCommand) -> Result<()> {
    let client = WeatherClientBuilder::new()
        .build()
        .context("Failed to build weather client")?;

    let temperature = client
        .current_temperature(cmd.lat, cmd.lon)
        .context("Failed to fetch current temperature")?;

    println!("Current temperature: {temperature} C");
    Ok(())
}

/// Handles the tui command by starting the interactive UI.
fn handle_tui() -> Result<()> {
    let service = open_service()?;
    jot::tui::run(&service)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NoteService {
        let db = Database::in_memory().expect("failed to create in-memory database");
        NoteService::new(db)
    }

    fn add(title: Option<&str>, content: Option<&str>) -> AddCommand {
        AddCommand {
            title: title.map(String::from),
            content: content.map(String::from),
        }
    }

    #[test]
    fn add_creates_a_note() {
        let cmd = add(Some("Groceries"), Some("milk, eggs"));
        execute_add(&cmd, service()).expect("add should succeed");
    }

    #[test]
    fn add_rejects_fully_blank_note() {
        let result = execute_add(&add(None, None), service());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));

        let result = execute_add(&add(Some("   "), Some("\n\t")), service());
        assert!(result.is_err());
    }

    #[test]
    fn add_accepts_title_only_and_content_only() {
        execute_add(&add(Some("Title"), None), service()).expect("title only should succeed");
        execute_add(&add(None, Some("content")), service()).expect("content only should succeed");
    }

    #[test]
    fn blank_note_error_is_a_user_error() {
        let err = execute_add(&add(None, None), service()).unwrap_err();
        assert!(is_user_error(&err));
    }

    #[test]
    fn list_renders_derived_view() {
        let service = service();
        service.insert_note("Banana", "yellow").unwrap();
        service.insert_note("apple", "red").unwrap();

        let cmd = ListCommand {
            search: None,
            sort_by: SortBy::Title,
            order: SortOrder::Ascending,
        };
        let lines = render_list(&cmd, &service).expect("list should succeed");

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("apple"), "case-insensitive title sort: {lines:?}");
        assert!(lines[1].contains("Banana"));
    }

    #[test]
    fn list_search_filters_case_insensitively() {
        let service = service();
        service.insert_note("Meeting notes", "agenda").unwrap();
        service.insert_note("Shopping", "milk").unwrap();

        let cmd = ListCommand {
            search: Some("meeting".to_string()),
            sort_by: SortBy::Id,
            order: SortOrder::Ascending,
        };
        let lines = render_list(&cmd, &service).expect("list should succeed");

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Meeting notes"));
    }

    #[test]
    fn list_shows_untitled_for_blank_titles() {
        let service = service();
        service.insert_note("", "orphan content").unwrap();

        let cmd = ListCommand {
            search: None,
            sort_by: SortBy::Id,
            order: SortOrder::Ascending,
        };
        let lines = render_list(&cmd, &service).expect("list should succeed");
        assert!(lines[0].contains("Untitled"));
        assert!(lines[0].contains("orphan content"));
    }

    #[test]
    fn empty_list_prints_placeholder() {
        let cmd = ListCommand {
            search: None,
            sort_by: SortBy::Id,
            order: SortOrder::Ascending,
        };
        let lines = render_list(&cmd, &service()).expect("list should succeed");
        assert_eq!(lines, vec!["No notes".to_string()]);
    }

    #[test]
    fn edit_merges_only_provided_fields() {
        let service = service();
        let note = service.insert_note("Title", "body").unwrap();

        let cmd = EditCommand {
            id: note.id.get(),
            title: Some("New title".to_string()),
            content: None,
        };
        // get_note after execute needs the same store; split the borrow by
        // keeping the service in scope
        execute_edit_with(&cmd, &service).expect("edit should succeed");

        let updated = service.get_note(note.id).unwrap().unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "body", "omitted field stays unchanged");
    }

    // Borrowing variant used by tests that need the service afterwards
    fn execute_edit_with(cmd: &EditCommand, service: &NoteService) -> Result<()> {
        let id = NoteId::new(cmd.id);
        let existing = service
            .get_note(id)?
            .ok_or_else(|| anyhow::anyhow!("Note {id} not found"))?;
        let title = cmd.title.as_deref().unwrap_or(&existing.title);
        let content = cmd.content.as_deref().unwrap_or(&existing.content);
        service.update_note(id, title, content)?;
        Ok(())
    }

    #[test]
    fn edit_unknown_id_is_a_user_error() {
        let cmd = EditCommand {
            id: 999,
            title: Some("x".to_string()),
            content: None,
        };
        let err = execute_edit(&cmd, service()).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(is_user_error(&err));
    }

    #[test]
    fn delete_unknown_id_is_a_user_error() {
        let cmd = DeleteCommand { id: 42 };
        let err = execute_delete(&cmd, service()).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(is_user_error(&err));
    }

    #[test]
    fn export_then_import_replaces_the_store() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("notes.json");

        let source = service();
        source.insert_note("keep", "me").unwrap();
        source.insert_note("and", "me too").unwrap();
        let notes = source.list_notes().unwrap();
        transfer::export_to_path(&notes, &path).expect("export should succeed");

        let target = service();
        target.insert_note("old", "gone after import").unwrap();
        let cmd = ImportCommand { file: path };
        execute_import_with(&cmd, &target).expect("import should succeed");

        let after = target.list_notes().unwrap();
        assert_eq!(after.len(), 2);
        assert!(after.iter().all(|n| n.title != "old"));
    }

    fn execute_import_with(cmd: &ImportCommand, service: &NoteService) -> Result<()> {
        let notes = transfer::import_from_path(&cmd.file)?;
        service.replace_all(&notes)?;
        Ok(())
    }

    #[test]
    fn malformed_import_fails_before_touching_the_store() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json ]").expect("failed to write file");

        let service = service();
        service.insert_note("survivor", "").unwrap();

        let cmd = ImportCommand { file: path };
        let err = execute_import_with(&cmd, &service).unwrap_err();
        assert!(is_user_error(&err), "parse failures are user errors: {err}");

        let after = service.list_notes().unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].title, "survivor");
    }

    #[test]
    fn missing_import_file_is_an_internal_error() {
        let cmd = ImportCommand {
            file: PathBuf::from("/nonexistent/notes.json"),
        };
        let err = execute_import_with(&cmd, &service()).unwrap_err();
        assert!(!is_user_error(&err));
    }
}
