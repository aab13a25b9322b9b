use yew::prelude::*;
use yew::{events::ChangeData, services::DialogService};

use chrono::NaiveDate;
use web_sys::HtmlElement;

use super::agents::{EventBus, ModalEvent, Request as BusRequest, TaskEvent};
use crate::tasks::api::{log_error_to_js, Priority, Task, TaskId, UpdateTaskRequest};
use crate::tasks::components::{view_priority_select, TasksComponent};

pub enum TaskEditorMessage {
    SetTitleInput(String),
    SetDueInput(String),
    SetPriorityInput(Priority),
    Submit,
}

#[derive(Properties, Clone)]
pub struct TaskEditorProps {
    pub task: Task,
    pub submit_callback: Callback<(TaskId, UpdateTaskRequest)>,
}

pub struct TaskEditor {
    task_id: TaskId,
    title_input: String,
    due_input: String,
    priority_input: Priority,
    submit_callback: Callback<(TaskId, UpdateTaskRequest)>,
    link: ComponentLink<Self>,
}

impl Component for TaskEditor {
    type Message = TaskEditorMessage;
    type Properties = TaskEditorProps;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        Self {
            task_id: props.task.id,
            title_input: props.task.title,
            due_input: props
                .task
                .due_date
                .map(|due_date| due_date.to_string())
                .unwrap_or_default(),
            priority_input: props.task.priority,
            submit_callback: props.submit_callback,
            link,
        }
    }

    fn change(&mut self, props: Self::Properties) -> ShouldRender {
        self.submit_callback = props.submit_callback;

        if props.task.id != self.task_id {
            self.task_id = props.task.id;
            self.title_input = props.task.title;
            self.due_input = props
                .task
                .due_date
                .map(|due_date| due_date.to_string())
                .unwrap_or_default();
            self.priority_input = props.task.priority;
        }

        true
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            TaskEditorMessage::SetTitleInput(title) => {
                self.title_input = title;
                true
            }
            TaskEditorMessage::SetDueInput(due) => {
                self.due_input = due;
                true
            }
            TaskEditorMessage::SetPriorityInput(priority) => {
                self.priority_input = priority;
                true
            }
            TaskEditorMessage::Submit => {
                if self.title_input.trim().is_empty() {
                    DialogService::alert("Task title must not be blank");
                    return false;
                }

                let due_date = if self.due_input.is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(self.due_input.as_str(), "%Y-%m-%d") {
                        Ok(due_date) => Some(due_date),
                        Err(e) => {
                            log_error_to_js(e.into());
                            return false;
                        }
                    }
                };

                self.submit_callback.emit((
                    self.task_id,
                    UpdateTaskRequest {
                        title: self.title_input.trim().to_string(),
                        due_date,
                        priority: self.priority_input,
                    },
                ));

                false
            }
        }
    }

    fn view(&self) -> Html {
        html! {
            <>
            <div class=classes!("modal-title")>
            {"Edit Task"}
            </div>
            <div class="taskEditor">
                <input
                    value=self.title_input.clone()
                    oninput=self.link.callback(|e: InputData| TaskEditorMessage::SetTitleInput(e.value))
                />
                <input
                    type="date"
                    value=self.due_input.clone()
                    oninput=self.link.callback(|e: InputData| TaskEditorMessage::SetDueInput(e.value))
                />
                { view_priority_select(self.priority_input, self.link.batch_callback(|change: ChangeData| {
                    match change {
                        ChangeData::Select(select) => Priority::parse(select.value().as_str())
                            .map(TaskEditorMessage::SetPriorityInput),
                        _ => None,
                    }
                })) }
                <button onclick=self.link.callback(|_| TaskEditorMessage::Submit)>{"Save"}</button>
            </div>
            </>
        }
    }
}

enum ModalState {
    TaskEditor(Task),
    Closed,
}

pub enum ModalComponentMessage {
    ModalEvent(ModalEvent),
    SubmitEdit(TaskId, UpdateTaskRequest),
}

pub struct ModalComponent {
    modal_ref: NodeRef,
    modal_background_ref: NodeRef,
    producer: Box<dyn Bridge<EventBus>>,
    link: ComponentLink<Self>,
    modal_state: ModalState,
}

impl ModalComponent {
    fn set_modal_display(&self, display: &str) {
        for node_ref in [&self.modal_ref, &self.modal_background_ref].iter() {
            node_ref
                .cast::<HtmlElement>()
                .unwrap()
                .style()
                .set_property("display", display)
                .unwrap();
        }
    }

    fn update_modal_event(&mut self, msg: ModalEvent) -> bool {
        match msg {
            ModalEvent::OpenTaskEditor(task) => {
                self.set_modal_display("block");
                self.modal_state = ModalState::TaskEditor(task);
                true
            }
            ModalEvent::CloseModal => {
                self.set_modal_display("none");
                self.modal_state = ModalState::Closed;
                true
            }
        }
    }
}

impl Component for ModalComponent {
    type Message = ModalComponentMessage;
    type Properties = ();

    fn create(_props: Self::Properties, link: ComponentLink<Self>) -> Self {
        Self {
            modal_ref: NodeRef::default(),
            modal_background_ref: NodeRef::default(),
            producer: EventBus::bridge(link.batch_callback(|msg| match msg {
                BusRequest::ModalEvent(msg) => Some(ModalComponentMessage::ModalEvent(msg)),
                _ => None,
            })),
            link,
            modal_state: ModalState::Closed,
        }
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        true
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            ModalComponentMessage::ModalEvent(msg) => self.update_modal_event(msg),
            ModalComponentMessage::SubmitEdit(task_id, request) => {
                self.producer
                    .send(BusRequest::TaskEvent(TaskEvent::SubmitEdit {
                        task_id,
                        request,
                    }));
                self.link
                    .send_message(ModalComponentMessage::ModalEvent(ModalEvent::CloseModal));
                false
            }
        }
    }

    fn view(&self) -> Html {
        html! {
            <>
            <div ref=self.modal_background_ref.clone() class="modal-background" onclick=self.link.callback(|_| ModalComponentMessage::ModalEvent(ModalEvent::CloseModal)) />
            <div ref=self.modal_ref.clone() class="modal">
                {
                match &self.modal_state {
                    ModalState::TaskEditor(task) => {
                        html! {
                            <TaskEditor
                                task=task.clone()
                                submit_callback=self.link.callback(|(task_id, request)| ModalComponentMessage::SubmitEdit(task_id, request))
                            />
                        }
                    },
                    ModalState::Closed => {
                        html! {}
                    },
                }
                }
            </div>
            </>
        }
    }
}

pub struct RootComponent {}

impl Component for RootComponent {
    type Message = ();
    type Properties = ();

    fn create(_props: Self::Properties, _link: ComponentLink<Self>) -> Self {
        Self {}
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        false
    }

    fn update(&mut self, _: Self::Message) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        html! {
            <>
            <ModalComponent />
            <TasksComponent />
            </>
        }
    }
}
