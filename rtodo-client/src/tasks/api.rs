use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use yew::format::Json;
use yew::services::fetch::Response;
use yew::services::ConsoleService;

pub type TaskId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

pub const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(text: &str) -> Option<Priority> {
        match text {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateTaskRequest {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

#[derive(Deserialize, Debug)]
pub struct DeleteTaskResponse {
    pub message: String,
}

pub type TaskList = Vec<Task>;

pub type JsonFetchResponse<T> = Response<Json<Result<T, anyhow::Error>>>;

pub fn log_error_to_js(e: anyhow::Error) {
    ConsoleService::log(format!("{}", e).as_str());
}

pub fn log_to_js(d: &impl std::fmt::Debug) {
    ConsoleService::log(format!("{:?}", d).as_str());
}
