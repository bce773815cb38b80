use macros::traceable;

traceable! {
    InputError {
        #[no_source]
        #[error("Missing schedule field: {field}")]
        MissingField { field: String } => tracing::Level::WARN,

        #[no_source]
        #[error("Invalid time '{value}', expected HH:mm (24-hour)")]
        InvalidTime { value: String } => tracing::Level::WARN,

        #[no_source]
        #[error("Invalid date '{value}', expected yyyy-MM-dd")]
        InvalidDate { value: String } => tracing::Level::WARN,

        #[no_source]
        #[error("Invalid day of month '{value}', expected a number from 1 to 31")]
        InvalidDayOfMonth { value: String } => tracing::Level::WARN,
    }
}
