use rusqlite::Connection;

use std::error::Error;
use std::sync::{Arc, Mutex};

mod api_error;
mod data;
mod todos;

use todos::endpoints;
use todos::helpers::create_todos_table;

#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rtodo=info,rocket=info".into()),
        )
        .init();

    let db_path = std::env::var("RTODO_DB").unwrap_or_else(|_| "rtodo.db".to_string());
    let connection = Connection::open(&db_path)?;

    create_todos_table(&connection)?;
    tracing::info!(path = %db_path, "opened todo database");

    let connection = Arc::new(Mutex::new(connection));

    rocket::build()
        .manage(connection.clone())
        .mount(
            "/",
            routes![
                endpoints::get_todos,
                endpoints::add_todo,
                endpoints::toggle_todo,
                endpoints::update_todo,
                endpoints::delete_todo,
            ],
        )
        .mount(
            "/",
            FileServer::from(concat!(env!("CARGO_MANIFEST_DIR"), "/web")).rank(15),
        )
        .launch()
        .await?;

    Ok(())
}
