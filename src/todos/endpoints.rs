use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

use crate::api_error::ApiResult;
use crate::data::DbConnection;

use super::data::*;
use super::helpers::*;

#[get("/todos?<search>")]
pub fn get_todos(
    search: Option<&str>,
    db_connection: &State<DbConnection>,
) -> ApiResult<Json<Vec<Task>>> {
    let db_connection = db_connection.lock()?;

    let tasks = get_tasks_from_db(&db_connection, search)?;

    Ok(Json(tasks))
}

#[post("/todos", format = "json", data = "<create_request>")]
pub fn add_todo(
    create_request: Json<CreateTodoRequest>,
    db_connection: &State<DbConnection>,
) -> ApiResult<Json<Task>> {
    let db_connection = db_connection.lock()?;

    let task = add_task_to_db(&db_connection, create_request.into_inner())?;
    tracing::info!(id = task.id, "created todo");

    Ok(Json(task))
}

#[put("/todos/<id>/toggle")]
pub fn toggle_todo(id: TaskId, db_connection: &State<DbConnection>) -> ApiResult<Json<Task>> {
    let db_connection = db_connection.lock()?;

    let task = toggle_task_in_db(&db_connection, id)?;
    tracing::info!(id, completed = task.completed, "toggled todo");

    Ok(Json(task))
}

#[put("/todos/<id>", format = "json", data = "<update_request>")]
pub fn update_todo(
    id: TaskId,
    update_request: Json<UpdateTodoRequest>,
    db_connection: &State<DbConnection>,
) -> ApiResult<Json<Task>> {
    let db_connection = db_connection.lock()?;

    let task = update_task_in_db(&db_connection, id, update_request.into_inner())?;
    tracing::info!(id, "updated todo");

    Ok(Json(task))
}

#[delete("/todos/<id>")]
pub fn delete_todo(
    id: TaskId,
    db_connection: &State<DbConnection>,
) -> ApiResult<Json<DeleteTodoResponse>> {
    let db_connection = db_connection.lock()?;

    delete_task_from_db(&db_connection, id)?;
    tracing::info!(id, "deleted todo");

    Ok(Json(DeleteTodoResponse {
        message: "Todo deleted".to_string(),
    }))
}
