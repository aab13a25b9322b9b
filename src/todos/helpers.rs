use rusqlite::{params, Connection, Row};

use crate::api_error::{ApiError, ApiResult};

use super::data::*;

const TASK_COLUMNS: &str = "id, title, completed, due_date, priority";

pub fn create_todos_table(db_connection: &Connection) -> rusqlite::Result<()> {
    db_connection.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            due_date TEXT,
            priority TEXT NOT NULL DEFAULT 'Low'
        )",
        params![],
    )?;

    Ok(())
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        due_date: row.get(3)?,
        priority: row.get(4)?,
    })
}

fn validate_title(title: &str) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation(
            "title must not be blank".to_string(),
        ));
    }

    Ok(())
}

pub fn get_tasks_from_db(
    db_connection: &Connection,
    search: Option<&str>,
) -> ApiResult<Vec<Task>> {
    let mut tasks = vec![];

    match search {
        Some(term) => {
            let mut statement = db_connection.prepare(&format!(
                "SELECT {} FROM todos WHERE LOWER(title) LIKE ?1 ORDER BY id DESC",
                TASK_COLUMNS
            ))?;
            let pattern = format!("%{}%", term.to_lowercase());
            let rows = statement.query_map(params![pattern], task_from_row)?;

            for row_result in rows {
                tasks.push(row_result?);
            }
        }
        None => {
            let mut statement = db_connection.prepare(&format!(
                "SELECT {} FROM todos ORDER BY id DESC",
                TASK_COLUMNS
            ))?;
            let rows = statement.query_map(params![], task_from_row)?;

            for row_result in rows {
                tasks.push(row_result?);
            }
        }
    }

    Ok(tasks)
}

pub fn get_task_from_db(db_connection: &Connection, task_id: TaskId) -> ApiResult<Task> {
    let result = db_connection.query_row(
        &format!("SELECT {} FROM todos WHERE id = ?1", TASK_COLUMNS),
        params![task_id],
        task_from_row,
    );

    match result {
        Ok(task) => Ok(task),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            Err(ApiError::NotFound(format!("no task with id {}", task_id)))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn add_task_to_db(
    db_connection: &Connection,
    request: CreateTodoRequest,
) -> ApiResult<Task> {
    validate_title(&request.title)?;

    db_connection.execute(
        "INSERT INTO todos (title, completed, due_date, priority) VALUES (?1, 0, ?2, ?3)",
        params![
            request.title,
            request.due_date,
            request.priority.unwrap_or(Priority::Low)
        ],
    )?;

    get_task_from_db(db_connection, db_connection.last_insert_rowid())
}

pub fn toggle_task_in_db(db_connection: &Connection, task_id: TaskId) -> ApiResult<Task> {
    let changed = db_connection.execute(
        "UPDATE todos SET completed = NOT completed WHERE id = ?1",
        params![task_id],
    )?;

    if changed == 0 {
        return Err(ApiError::NotFound(format!("no task with id {}", task_id)));
    }

    get_task_from_db(db_connection, task_id)
}

pub fn update_task_in_db(
    db_connection: &Connection,
    task_id: TaskId,
    request: UpdateTodoRequest,
) -> ApiResult<Task> {
    validate_title(&request.title)?;

    let changed = db_connection.execute(
        "UPDATE todos SET title = ?1, due_date = ?2, priority = ?3 WHERE id = ?4",
        params![request.title, request.due_date, request.priority, task_id],
    )?;

    if changed == 0 {
        return Err(ApiError::NotFound(format!("no task with id {}", task_id)));
    }

    get_task_from_db(db_connection, task_id)
}

/* Deleting an id that was never stored, or was already deleted, still reports
 * success; only a storage fault is an error here.
 */
pub fn delete_task_from_db(db_connection: &Connection, task_id: TaskId) -> ApiResult<()> {
    db_connection.execute("DELETE FROM todos WHERE id = ?1", params![task_id])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate};

    fn build_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_todos_table(&connection).unwrap();
        connection
    }

    fn create_request(title: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            title: title.to_string(),
            due_date: None,
            priority: None,
        }
    }

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn creation_defaults() {
        let connection = build_connection();

        let task = add_task_to_db(&connection, create_request("No deadline task")).unwrap();

        assert_eq!(task.title, "No deadline task");
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn creation_keeps_supplied_fields() {
        let connection = build_connection();

        let task = add_task_to_db(
            &connection,
            CreateTodoRequest {
                title: "Renew passport".to_string(),
                due_date: Some(day("2026-09-01")),
                priority: Some(Priority::High),
            },
        )
        .unwrap();

        assert_eq!(task.due_date, Some(day("2026-09-01")));
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
    }

    #[test]
    fn blank_titles_are_rejected() {
        let connection = build_connection();

        let create_err = add_task_to_db(&connection, create_request("   ")).unwrap_err();
        assert!(matches!(create_err, ApiError::Validation(_)));

        let task = add_task_to_db(&connection, create_request("Water plants")).unwrap();
        let update_err = update_task_in_db(
            &connection,
            task.id,
            UpdateTodoRequest {
                title: "".to_string(),
                due_date: None,
                priority: Priority::Low,
            },
        )
        .unwrap_err();
        assert!(matches!(update_err, ApiError::Validation(_)));
    }

    #[test]
    fn list_length_tracks_creates_minus_deletes() {
        let connection = build_connection();

        let first = add_task_to_db(&connection, create_request("first")).unwrap();
        add_task_to_db(&connection, create_request("second")).unwrap();
        add_task_to_db(&connection, create_request("third")).unwrap();
        assert_eq!(get_tasks_from_db(&connection, None).unwrap().len(), 3);

        delete_task_from_db(&connection, first.id).unwrap();
        assert_eq!(get_tasks_from_db(&connection, None).unwrap().len(), 2);
    }

    #[test]
    fn list_orders_newest_first() {
        let connection = build_connection();

        let older = add_task_to_db(&connection, create_request("older")).unwrap();
        let newer = add_task_to_db(&connection, create_request("newer")).unwrap();

        let tasks = get_tasks_from_db(&connection, None).unwrap();
        assert_eq!(tasks[0].id, newer.id);
        assert_eq!(tasks[1].id, older.id);
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let connection = build_connection();

        add_task_to_db(&connection, create_request("Buy Milk")).unwrap();
        add_task_to_db(&connection, create_request("Call dentist")).unwrap();

        let matches = get_tasks_from_db(&connection, Some("milk")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Buy Milk");

        let no_matches = get_tasks_from_db(&connection, Some("groceries")).unwrap();
        assert!(no_matches.is_empty());
    }

    #[test]
    fn toggle_is_an_involution() {
        let connection = build_connection();

        let task = add_task_to_db(&connection, create_request("Vacuum")).unwrap();

        let toggled = toggle_task_in_db(&connection, task.id).unwrap();
        assert!(toggled.completed);

        let toggled_back = toggle_task_in_db(&connection, task.id).unwrap();
        assert_eq!(toggled_back.completed, task.completed);
    }

    #[test]
    fn mutating_a_missing_id_is_not_found() {
        let connection = build_connection();

        let toggle_err = toggle_task_in_db(&connection, 42).unwrap_err();
        assert!(matches!(toggle_err, ApiError::NotFound(_)));

        let update_err = update_task_in_db(
            &connection,
            42,
            UpdateTodoRequest {
                title: "ghost".to_string(),
                due_date: None,
                priority: Priority::Medium,
            },
        )
        .unwrap_err();
        assert!(matches!(update_err, ApiError::NotFound(_)));
    }

    #[test]
    fn update_replaces_every_mutable_field() {
        let connection = build_connection();

        let task = add_task_to_db(
            &connection,
            CreateTodoRequest {
                title: "Book flights".to_string(),
                due_date: Some(day("2026-08-20")),
                priority: Some(Priority::Medium),
            },
        )
        .unwrap();

        // An omitted due date is written back as NULL, not left unchanged.
        let updated = update_task_in_db(
            &connection,
            task.id,
            UpdateTodoRequest {
                title: "Book trains".to_string(),
                due_date: None,
                priority: Priority::High,
            },
        )
        .unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "Book trains");
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.priority, Priority::High);
        assert!(!updated.completed);
    }

    #[test]
    fn delete_is_idempotent() {
        let connection = build_connection();

        let task = add_task_to_db(&connection, create_request("Shred documents")).unwrap();

        delete_task_from_db(&connection, task.id).unwrap();
        delete_task_from_db(&connection, task.id).unwrap();
        delete_task_from_db(&connection, 9999).unwrap();

        assert!(get_tasks_from_db(&connection, None).unwrap().is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let connection = build_connection();

        add_task_to_db(&connection, create_request("keep")).unwrap();
        let deleted = add_task_to_db(&connection, create_request("drop")).unwrap();
        delete_task_from_db(&connection, deleted.id).unwrap();

        let replacement = add_task_to_db(&connection, create_request("next")).unwrap();
        assert!(replacement.id > deleted.id);
    }

    #[test]
    fn pay_rent_lifecycle() {
        let connection = build_connection();
        let today = Local::now().date_naive();

        let task = add_task_to_db(
            &connection,
            CreateTodoRequest {
                title: "Pay rent".to_string(),
                due_date: Some(today),
                priority: Some(Priority::High),
            },
        )
        .unwrap();
        assert!(!task.completed);

        let toggled = toggle_task_in_db(&connection, task.id).unwrap();
        assert!(toggled.completed);

        delete_task_from_db(&connection, task.id).unwrap();
        assert!(get_tasks_from_db(&connection, None).unwrap().is_empty());

        delete_task_from_db(&connection, task.id).unwrap();
    }
}
