//! Tasks module - planned and live tasks and the reconciliation engine that
//! keeps them in step with submitted task lists.

pub mod reconciliation;
mod tasks_model;
mod tasks_service;
mod tasks_traits;



pub use tasks_model::{
    BudgetStamp, MirrorPolicy, NewTask, ReconcileReport, Task, TaskActivityInput, TaskCreate,
    TaskDraft, TaskExpenseInput, TaskFields, TaskInput, TaskKind, TaskPlan, TaskStage, TaskUpdate,
};
pub use tasks_service::TaskService;
pub use tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
