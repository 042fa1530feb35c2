//! # CLI Command Implementations

use super::CliError;
use registrar::{api, config::Config};
use registrar_core::{Major, Registry, Student};

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), CliError> {
    let registry = config.open_registry()?;

    println!("Registrar Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Listen:     {}", config.listen_addr());
    println!("  Backend:    {}", config.storage.backend);
    println!("  Database:   {:?}", config.storage.database);
    println!("  Rate limit: {}/s", config.server.rate_limit);
    println!();
    println!("Pages:");
    println!("  GET  /students             - Student list");
    println!("  GET  /students/new         - New student form");
    println!("  GET  /students/edit/{{id}}   - Edit form");
    println!("  GET  /students/delete/{{id}} - Delete");
    println!("  GET  /health               - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config, registry).await?;
    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// Print every stored student.
pub fn cmd_list(config: &Config, json_mode: bool) -> Result<(), CliError> {
    let registry = config.open_registry()?;
    let students = registry.find_all()?;

    if json_mode {
        let output = serde_json::json!({
            "backend": config.storage.backend.to_string(),
            "count": students.len(),
            "students": students,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    if students.is_empty() {
        println!("No students stored.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<8}  {:<30}  {:<10}  {:<24}  {}",
        "ID", "CODE", "NAME", "BORN", "MAJOR", "GENDER"
    );
    for student in &students {
        println!("{}", format_row(student));
    }
    println!();
    println!("{} student(s)", students.len());

    Ok(())
}

fn format_row(student: &Student) -> String {
    format!(
        "{:>5}  {:<8}  {:<30}  {:<10}  {:<24}  {}",
        student.id.map(|id| id.to_string()).unwrap_or_default(),
        student.student_code,
        student.name,
        student
            .date_of_birth
            .map(|d| d.to_string())
            .unwrap_or_default(),
        student.major.map(Major::label).unwrap_or_default(),
        student.gender,
    )
}

// =============================================================================
// MAJORS COMMAND
// =============================================================================

/// Print the accepted majors.
pub fn cmd_majors(json_mode: bool) -> Result<(), CliError> {
    if json_mode {
        let majors: Vec<_> = Major::ALL
            .iter()
            .map(|m| serde_json::json!({ "value": m.as_str(), "label": m.label() }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&majors).unwrap_or_default()
        );
        return Ok(());
    }

    for major in Major::ALL {
        println!("{:<26} {}", major.as_str(), major.label());
    }
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create an empty redb database at the configured path.
pub fn cmd_init(config: &Config, force: bool) -> Result<(), CliError> {
    let path = &config.storage.database;

    if path.exists() {
        if !force {
            return Err(CliError::Usage(format!(
                "Database {:?} already exists. Use --force to overwrite.",
                path
            )));
        }
        std::fs::remove_file(path).map_err(|e| {
            CliError::Usage(format!("Cannot remove existing database {:?}: {}", path, e))
        })?;
        tracing::info!(database = ?path, "removed existing database");
    }

    let registry = Registry::with_redb(path)?;
    println!(
        "Initialized new redb database at {:?} ({} students)",
        path,
        registry.count()?
    );
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
