//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use topograph_core::log_op_start;
/// log_op_start!("build_graph");
/// log_op_start!("build_graph", node_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::topograph_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::topograph_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use topograph_core::log_op_end;
/// log_op_end!("render", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::topograph_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::topograph_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use topograph_core::{log_op_error, errors::TopographError};
/// let err = TopographError::DuplicateNodeId { node_id: "backend".to_string() };
/// log_op_error!("build_graph", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::TgError;
        let tg_err = TgError::from($err).with_op($op);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::topograph_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?tg_err.kind(),
            err.code = tg_err.code(),
            err.message = %tg_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::TgError;
        let tg_err = TgError::from($err).with_op($op);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::topograph_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?tg_err.kind(),
            err.code = tg_err.code(),
            err.message = %tg_err,
            $($field)*
        );
    }};
}
