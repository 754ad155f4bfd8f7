//! Terminal UI helpers for task display.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::dates::format_day_month;
use crate::entities::{Recurrence, Task, TaskPriority, TaskStatus};

/// Get colored status string
pub fn status_colored(status: TaskStatus) -> String {
    match status {
        TaskStatus::Pending => "pending".yellow().to_string(),
        TaskStatus::Complete => "complete".green().to_string(),
    }
}

/// Get colored priority string
pub fn priority_colored(priority: TaskPriority) -> String {
    match priority {
        TaskPriority::Low => "low".dimmed().to_string(),
        TaskPriority::Medium => "medium".normal().to_string(),
        TaskPriority::High => "high".red().bold().to_string(),
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::Complete => Color::Green,
    }
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::DarkGrey,
        TaskPriority::Medium => Color::White,
        TaskPriority::High => Color::Red,
    }
}

/// Due date as `DD-MMM`, or `None`
pub fn due_label(task: &Task) -> String {
    task.due_date()
        .map_or_else(|| "None".to_string(), format_day_month)
}

/// Create a table for displaying tasks
pub fn task_table<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Header
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Due Date").fg(Color::Cyan),
        Cell::new("Tags").fg(Color::Cyan),
    ]);

    for task in tasks {
        let title = if task.is_recurring() {
            format!("{} ↻", task.title())
        } else {
            task.title().to_string()
        };

        table.add_row(vec![
            Cell::new(task.id()),
            Cell::new(task.status().to_string()).fg(status_color(task.status())),
            Cell::new(task.priority().to_string()).fg(priority_color(task.priority())),
            Cell::new(title),
            Cell::new(due_label(task)),
            Cell::new(task.tags().join(", ")),
        ]);
    }

    table
}

/// Display task details in a formatted way
pub fn display_task_details(task: &Task) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Task".cyan().bold(),
        task.id().to_string().cyan().bold(),
        format!("[{}]", task.status()).yellow()
    );
    println!("{}", "═".repeat(60).dimmed());
    println!();

    println!("{}: {}", "Title".bold(), task.title());
    println!("{}: {}", "Status".bold(), status_colored(task.status()));
    println!(
        "{}: {}",
        "Priority".bold(),
        priority_colored(task.priority())
    );
    println!("{}: {}", "Due".bold(), due_label(task));

    if task.recurrence() != Recurrence::None {
        println!("{}: {}", "Repeats".bold(), task.recurrence());
    }

    if !task.tags().is_empty() {
        println!("{}: {}", "Tags".bold(), task.tags().join(", "));
    }

    if let Some(created) = task.created_at() {
        println!("{}: {}", "Created".bold(), created);
    }

    if !task.description().is_empty() {
        println!();
        println!("{}", "Description".bold().underline());
        println!("{}", task.description());
    }

    println!();
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}
