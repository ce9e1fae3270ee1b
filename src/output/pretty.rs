use colored::Colorize;

use crate::features::tasks::{Summary, Task};

/// Format the task list as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], summary: Summary) -> String {
    if tasks.is_empty() {
        return format!("Tasks ({summary})\n  No tasks yet. Add one with 'pomodo task add'.");
    }

    let mut output = format!("Tasks ({summary})\n");
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        output.push_str(&format_task_line(task));
        output.push('\n');
    }

    output
}

/// Format one task as a single line
pub fn format_task_line(task: &Task) -> String {
    let (icon, text) = if task.completed {
        ("[x]".green(), task.text.strikethrough().dimmed().to_string())
    } else {
        ("[ ]".white(), task.text.bold().to_string())
    };

    format!(
        "{} {}  {}",
        icon,
        text,
        format!("#{}", task.id).dimmed()
    )
}

/// Format a single task with its details
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format_task_line(task);
    output.push('\n');
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        task.created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    ));
    output
}
