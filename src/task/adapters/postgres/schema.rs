//! Diesel schema for task, project and executor persistence.

diesel::table! {
    /// Tasks and subtasks.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Containing project.
        project_id -> Uuid,
        /// Parent task for subtasks.
        parent_id -> Nullable<Uuid>,
        /// Assigned executor.
        executor_id -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Nullable<Text>,
        /// Start of the task window.
        start_date -> Timestamptz,
        /// End of the task window.
        due_date -> Timestamptz,
        /// Hourly escalation flag.
        is_urgent -> Bool,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects grouping tasks.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Nullable<Text>,
        /// Color/icon token.
        #[max_length = 64]
        color_icon -> Nullable<Varchar>,
        /// Project start.
        start_date -> Timestamptz,
        /// Planned finish.
        planned_finish -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Executor labels.
    executors (id) {
        /// Executor identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Color/icon token.
        #[max_length = 64]
        color_icon -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
