//! Todo display formatting

use crate::models::{Todo, TodoList};

/// Format todos as a table. Completed todos are shown only with `all`.
pub fn format_todo_list(list: &TodoList, all: bool) -> String {
    let todos: Vec<&Todo> = if all {
        list.todos.iter().collect()
    } else {
        list.open().collect()
    };

    if todos.is_empty() {
        return "No todos found.\n".to_string();
    }

    let id_width = todos
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>id_width$}  {:<4}  {:<10}  {}\n",
        "ID",
        "Done",
        "Created",
        "Text",
        id_width = id_width,
    ));
    output.push_str(&format!(
        "{:->id_width$}  {:-<4}  {:-<10}  {:-<20}\n",
        "",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for todo in todos {
        output.push_str(&format!(
            "{:>id_width$}  {:<4}  {:<10}  {}\n",
            todo.id,
            if todo.done { "[x]" } else { "[ ]" },
            todo.created_at.format("%Y-%m-%d"),
            todo.text,
            id_width = id_width,
        ));
    }

    output
}
