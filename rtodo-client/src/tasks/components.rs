use chrono::{Local, NaiveDate};
use yew::services::fetch::{FetchService, FetchTask, Request};
use yew::services::DialogService;
use yew::{
    events::ChangeData,
    format::{Json, Nothing},
    prelude::*,
};

use anyhow::Error;

use super::api::*;
use super::view_state::{derive_view, is_overdue, Filter, TaskCounts, FILTERS};

use crate::root::agents::{EventBus, ModalEvent, Request as BusRequest, TaskEvent};

pub fn view_priority_flag(priority: Priority) -> Html {
    let level_class = match priority {
        Priority::Low => "priority-low",
        Priority::Medium => "priority-medium",
        Priority::High => "priority-high",
    };

    html! {
        <span class=classes!("priority-flag", level_class)>{priority.as_str()}</span>
    }
}

pub fn view_priority_select(selected: Priority, onchange: Callback<ChangeData>) -> Html {
    html! {
        <select onchange=onchange>
            { PRIORITIES.iter().map(|priority| {
                if *priority == selected {
                    html! {
                        <option value=priority.as_str() selected="selected">{priority.as_str()}</option>
                    }
                } else {
                    html! {
                        <option value=priority.as_str()>{priority.as_str()}</option>
                    }
                }
            }).collect::<Html>() }
        </select>
    }
}

fn view_task(task: &Task, today: NaiveDate, link: &ComponentLink<TasksComponent>) -> Html {
    let task_id = task.id;
    let edit_task = task.clone();

    let mut row_class = classes!("taskRow");
    if task.completed {
        row_class.push("completed");
    }
    if is_overdue(task, today) {
        row_class.push("overdue");
    }

    html! {
        <li class=row_class>
            <span
                class="taskTitle"
                onclick=link.callback(move |_| InternalTasksComponentMessage::toggle_task_msg(task_id))
            >
                { &task.title }
            </span>
            { view_priority_flag(task.priority) }
            {
                match task.due_date {
                    Some(due_date) => html! {
                        <span class="taskDue">{ due_date.to_string() }</span>
                    },
                    None => html! {},
                }
            }
            <button
                class="taskEdit"
                onclick=link.callback(move |_| InternalTasksComponentMessage::edit_task_msg(edit_task.clone()))
            >
                {"Edit"}
            </button>
            <button
                class="taskDelete"
                onclick=link.callback(move |_| InternalTasksComponentMessage::delete_task_msg(task_id))
            >
                {"Delete"}
            </button>
        </li>
    }
}

#[derive(Debug)]
pub enum InternalTasksComponentMessage {
    UpdateTasks,
    ReceivedTasks(Result<TaskList, anyhow::Error>),
    SetSearchTerm(String),
    SetFilter(Filter),
    SetTitleInput(String),
    SetDueInput(String),
    SetPriorityInput(Priority),
    AddTask,
    TaskAdded(Result<Task, anyhow::Error>),
    ToggleTask(TaskId),
    TaskToggled(Result<Task, anyhow::Error>),
    EditTask(Task),
    TaskUpdated(Result<Task, anyhow::Error>),
    DeleteTask(TaskId),
    TaskDeleted(TaskId, Result<DeleteTaskResponse, anyhow::Error>),
}

impl InternalTasksComponentMessage {
    pub fn update_tasks_msg() -> TasksComponentMsg {
        TasksComponentMsg::Internal(InternalTasksComponentMessage::UpdateTasks)
    }

    pub fn toggle_task_msg(task_id: TaskId) -> TasksComponentMsg {
        TasksComponentMsg::Internal(InternalTasksComponentMessage::ToggleTask(task_id))
    }

    pub fn edit_task_msg(task: Task) -> TasksComponentMsg {
        TasksComponentMsg::Internal(InternalTasksComponentMessage::EditTask(task))
    }

    pub fn delete_task_msg(task_id: TaskId) -> TasksComponentMsg {
        TasksComponentMsg::Internal(InternalTasksComponentMessage::DeleteTask(task_id))
    }
}

#[derive(Debug)]
pub enum TasksComponentMsg {
    Internal(InternalTasksComponentMessage),
    TaskEvent(TaskEvent),
}

pub struct TasksComponent {
    _get_fetch_task: Option<FetchTask>,
    _add_fetch_task: Option<FetchTask>,
    _toggle_fetch_task: Option<FetchTask>,
    _update_fetch_task: Option<FetchTask>,
    _delete_fetch_task: Option<FetchTask>,
    event_bus: Box<dyn Bridge<EventBus>>,
    tasks: TaskList,
    search_term: String,
    filter: Filter,
    title_input: String,
    due_input: String,
    priority_input: Priority,
    link: ComponentLink<Self>,
}

impl TasksComponent {
    fn fetch_tasks(&mut self) -> Result<(), Error> {
        let request = Request::get("/todos").body(Nothing)?;

        let callback = self.link.callback(|response: JsonFetchResponse<TaskList>| {
            let Json(data) = response.into_body();
            TasksComponentMsg::Internal(InternalTasksComponentMessage::ReceivedTasks(data))
        });

        let task = FetchService::fetch(request, callback)?;

        self._get_fetch_task = Some(task);

        Ok(())
    }

    fn add_task(&mut self) -> Result<(), Error> {
        let due_date = if self.due_input.is_empty() {
            None
        } else {
            Some(NaiveDate::parse_from_str(self.due_input.as_str(), "%Y-%m-%d")?)
        };

        let request_object = CreateTaskRequest {
            title: self.title_input.trim().to_string(),
            due_date,
            priority: Some(self.priority_input),
        };

        let request = Request::post("/todos")
            .header("Content-Type", "application/json")
            .body(Json(&request_object))?;

        let callback = self.link.callback(|response: JsonFetchResponse<Task>| {
            let Json(data) = response.into_body();
            TasksComponentMsg::Internal(InternalTasksComponentMessage::TaskAdded(data))
        });

        let task = FetchService::fetch(request, callback)?;

        self._add_fetch_task = Some(task);

        Ok(())
    }

    fn toggle_task(&mut self, task_id: TaskId) -> Result<(), Error> {
        let request = Request::put(format!("/todos/{}/toggle", task_id)).body(Nothing)?;

        let callback = self.link.callback(|response: JsonFetchResponse<Task>| {
            let Json(data) = response.into_body();
            TasksComponentMsg::Internal(InternalTasksComponentMessage::TaskToggled(data))
        });

        let task = FetchService::fetch(request, callback)?;

        self._toggle_fetch_task = Some(task);

        Ok(())
    }

    fn update_task(&mut self, task_id: TaskId, request_object: UpdateTaskRequest) -> Result<(), Error> {
        let request = Request::put(format!("/todos/{}", task_id))
            .header("Content-Type", "application/json")
            .body(Json(&request_object))?;

        let callback = self.link.callback(|response: JsonFetchResponse<Task>| {
            let Json(data) = response.into_body();
            TasksComponentMsg::Internal(InternalTasksComponentMessage::TaskUpdated(data))
        });

        let task = FetchService::fetch(request, callback)?;

        self._update_fetch_task = Some(task);

        Ok(())
    }

    fn delete_task(&mut self, task_id: TaskId) -> Result<(), Error> {
        let request = Request::delete(format!("/todos/{}", task_id)).body(Nothing)?;

        let callback = self
            .link
            .callback(move |response: JsonFetchResponse<DeleteTaskResponse>| {
                let Json(data) = response.into_body();
                TasksComponentMsg::Internal(InternalTasksComponentMessage::TaskDeleted(
                    task_id, data,
                ))
            });

        let task = FetchService::fetch(request, callback)?;

        self._delete_fetch_task = Some(task);

        Ok(())
    }

    fn patch_task(&mut self, task: Task) {
        if let Some(held) = self.tasks.iter_mut().find(|held| held.id == task.id) {
            *held = task;
        }
    }

    fn view_add_form(&self) -> Html {
        use InternalTasksComponentMessage::*;
        html! {
            <div class="addTaskForm">
                <input
                    placeholder="New task..."
                    value=self.title_input.clone()
                    oninput=self.link.callback(|e: InputData| TasksComponentMsg::Internal(SetTitleInput(e.value)))
                />
                <input
                    type="date"
                    value=self.due_input.clone()
                    oninput=self.link.callback(|e: InputData| TasksComponentMsg::Internal(SetDueInput(e.value)))
                />
                { view_priority_select(self.priority_input, self.link.batch_callback(|change: ChangeData| {
                    match change {
                        ChangeData::Select(select) => Priority::parse(select.value().as_str())
                            .map(|priority| TasksComponentMsg::Internal(SetPriorityInput(priority))),
                        _ => None,
                    }
                })) }
                <button onclick=self.link.callback(|_| TasksComponentMsg::Internal(AddTask))>{"Add"}</button>
            </div>
        }
    }

    fn view_filter_button(&self, filter: Filter, counts: &TaskCounts) -> Html {
        let class = if self.filter == filter {
            classes!("filterButton", "selected")
        } else {
            classes!("filterButton")
        };

        html! {
            <button
                class=class
                onclick=self.link.callback(move |_| TasksComponentMsg::Internal(InternalTasksComponentMessage::SetFilter(filter)))
            >
                { format!("{} ({})", filter.label(), counts.for_filter(filter)) }
            </button>
        }
    }

    fn update_internal(&mut self, msg: InternalTasksComponentMessage) -> bool {
        use InternalTasksComponentMessage::*;
        match msg {
            UpdateTasks => {
                if let Err(e) = self.fetch_tasks() {
                    log_error_to_js(e);
                }
                false
            }
            ReceivedTasks(tasks) => match tasks {
                Ok(tasks) => {
                    self.tasks = tasks;
                    true
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
            SetSearchTerm(term) => {
                self.search_term = term;
                true
            }
            SetFilter(filter) => {
                self.filter = filter;
                true
            }
            SetTitleInput(title) => {
                self.title_input = title;
                true
            }
            SetDueInput(due) => {
                self.due_input = due;
                true
            }
            SetPriorityInput(priority) => {
                self.priority_input = priority;
                true
            }
            AddTask => {
                if self.title_input.trim().is_empty() {
                    return false;
                }

                if let Err(e) = self.add_task() {
                    log_error_to_js(e);
                }
                false
            }
            TaskAdded(task) => match task {
                Ok(task) => {
                    // List responses are newest-first, so the fresh record
                    // goes to the front of the held sequence.
                    self.tasks.insert(0, task);
                    self.title_input.clear();
                    self.due_input.clear();
                    self.priority_input = Priority::Low;
                    true
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
            ToggleTask(task_id) => {
                if let Err(e) = self.toggle_task(task_id) {
                    log_error_to_js(e);
                }
                false
            }
            TaskToggled(task) => match task {
                Ok(task) => {
                    self.patch_task(task);
                    true
                }
                Err(e) => {
                    DialogService::alert("Failed to toggle task");
                    log_error_to_js(e);
                    false
                }
            },
            EditTask(task) => {
                self.event_bus
                    .send(BusRequest::ModalEvent(ModalEvent::OpenTaskEditor(task)));
                false
            }
            TaskUpdated(task) => match task {
                Ok(task) => {
                    self.patch_task(task);
                    true
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
            DeleteTask(task_id) => {
                if let Err(e) = self.delete_task(task_id) {
                    log_error_to_js(e);
                }
                false
            }
            TaskDeleted(task_id, result) => match result {
                Ok(_) => {
                    self.tasks.retain(|task| task.id != task_id);
                    true
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
        }
    }

    fn update_task_events(&mut self, msg: TaskEvent) -> bool {
        match msg {
            TaskEvent::SubmitEdit { task_id, request } => {
                if let Err(e) = self.update_task(task_id, request) {
                    log_error_to_js(e);
                }
                false
            }
        }
    }
}

impl Component for TasksComponent {
    type Message = TasksComponentMsg;
    type Properties = ();

    fn create(_: Self::Properties, link: ComponentLink<Self>) -> Self {
        TasksComponent {
            _get_fetch_task: None,
            _add_fetch_task: None,
            _toggle_fetch_task: None,
            _update_fetch_task: None,
            _delete_fetch_task: None,
            event_bus: EventBus::bridge(link.batch_callback(|msg| match msg {
                BusRequest::TaskEvent(msg) => Some(TasksComponentMsg::TaskEvent(msg)),
                _ => None,
            })),
            tasks: vec![],
            search_term: String::new(),
            filter: Filter::All,
            title_input: String::new(),
            due_input: String::new(),
            priority_input: Priority::Low,
            link,
        }
    }

    fn view(&self) -> Html {
        use InternalTasksComponentMessage::*;
        let today = Local::now().date_naive();
        let counts = TaskCounts::tally(&self.tasks, today);
        let visible = derive_view(&self.tasks, &self.search_term, self.filter, today);

        html! {
            <div class="tasks">
                <h1>{"To-Do"}</h1>
                { self.view_add_form() }
                <div class="searchBar">
                    <input
                        placeholder="Search tasks..."
                        value=self.search_term.clone()
                        oninput=self.link.callback(|e: InputData| TasksComponentMsg::Internal(SetSearchTerm(e.value)))
                    />
                </div>
                <div class="filterBar">
                    { FILTERS.iter().map(|filter| self.view_filter_button(*filter, &counts)).collect::<Html>() }
                </div>
                <div class="statsBar">
                    { format!(
                        "{} total, {} active, {} completed, {} overdue",
                        counts.total, counts.active, counts.completed, counts.overdue
                    ) }
                </div>
                <ul class="taskList">
                    { visible.iter().map(|task| view_task(task, today, &self.link)).collect::<Html>() }
                </ul>
            </div>
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            TasksComponentMsg::Internal(msg) => self.update_internal(msg),
            TasksComponentMsg::TaskEvent(msg) => self.update_task_events(msg),
        }
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        true
    }

    fn rendered(&mut self, first_render: bool) {
        if first_render {
            self.link
                .send_message(InternalTasksComponentMessage::update_tasks_msg());
        }
    }
}
