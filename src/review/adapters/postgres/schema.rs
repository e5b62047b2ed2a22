//! Diesel schema for review persistence.

diesel::table! {
    /// Append-only review history.
    review_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Reviewed task.
        task_id -> Uuid,
        /// Reviewing user.
        owner_id -> Uuid,
        /// Recorded outcome.
        #[max_length = 50]
        outcome -> Varchar,
        /// Optional reviewer note.
        note -> Nullable<Text>,
        /// Replacement due date for extensions.
        new_due_date -> Nullable<Timestamptz>,
        /// Review timestamp.
        reviewed_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user review settings.
    user_settings (owner_id) {
        /// Owning user.
        owner_id -> Uuid,
        /// Local daily review time.
        review_time -> Time,
        /// Push notification preference.
        push_notifications -> Bool,
    }
}
