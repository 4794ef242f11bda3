use thiserror::Error;

/// Result type alias using TopographError
pub type Result<T> = std::result::Result<T, TopographError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (the CLI, CI wrappers)
/// can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgErrorKind {
    // Malformed input
    /// Two resource records declare the same id
    DuplicateNodeId,
    /// A connection references a node id that is not in the graph
    DanglingEdge,

    // Snapshot parsing
    /// Snapshot bytes are not a JSON object of the expected shape
    InvalidSnapshot,
    /// A required snapshot field is absent
    MissingField,

    // Integration/IO
    Io,
    Serialization,
}

impl TgErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            TgErrorKind::DuplicateNodeId => "ERR_DUPLICATE_NODE_ID",
            TgErrorKind::DanglingEdge => "ERR_DANGLING_EDGE",
            TgErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            TgErrorKind::MissingField => "ERR_MISSING_FIELD",
            TgErrorKind::Io => "ERR_IO",
            TgErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// True for the malformed-input family (fatal to a build/diff call)
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, TgErrorKind::DuplicateNodeId | TgErrorKind::DanglingEdge)
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// offending ids so that a failed build can be reported precisely.
#[derive(Debug, Clone)]
pub struct TgError {
    kind: TgErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    offending_ids: Option<Vec<String>>,
}

impl TgError {
    /// Create a new error with the specified kind
    pub fn new(kind: TgErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            offending_ids: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the ids that made the input malformed
    pub fn with_offending_ids(mut self, ids: Vec<String>) -> Self {
        self.offending_ids = Some(ids);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> TgErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the offending ids, if any
    pub fn offending_ids(&self) -> Option<&[String]> {
        self.offending_ids.as_deref()
    }
}

impl std::fmt::Display for TgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(ids) = &self.offending_ids {
            write!(f, " (offending: {})", ids.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for TgError {}

// ========== End Error Facility ==========

/// Error taxonomy for Topograph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopographError {
    // ===== Malformed input =====
    /// Two resource records share an id
    #[error("Duplicate node id: {node_id}")]
    DuplicateNodeId { node_id: String },

    /// A connection references an id that no resource declares
    #[error("Connection {from} -> {to} references unknown node(s): {}", .missing.join(", "))]
    DanglingEdge {
        from: String,
        to: String,
        missing: Vec<String>,
    },

    // ===== Snapshot errors =====
    /// Snapshot document could not be interpreted
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// A resource entry in a snapshot lacks a required field
    #[error("Snapshot resource #{index} is missing `{field}`")]
    MissingField { index: usize, field: String },

    // ===== Ambient =====
    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Filesystem access failed (CLI boundary only)
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl TopographError {
    /// Convenience accessor for the stable code of this error
    pub fn code(&self) -> &'static str {
        TgError::from(self.clone()).code()
    }
}

impl From<TopographError> for TgError {
    fn from(err: TopographError) -> Self {
        match err {
            TopographError::DuplicateNodeId { node_id } => {
                TgError::new(TgErrorKind::DuplicateNodeId)
                    .with_message("Two resources declare the same id")
                    .with_offending_ids(vec![node_id.clone()])
                    .with_entity_id(node_id)
            }

            TopographError::DanglingEdge { from, to, missing } => {
                TgError::new(TgErrorKind::DanglingEdge)
                    .with_entity_id(format!("{}->{}", from, to))
                    .with_message("Connection references a node that does not exist")
                    .with_offending_ids(missing)
            }

            TopographError::InvalidSnapshot { reason } => {
                TgError::new(TgErrorKind::InvalidSnapshot).with_message(reason)
            }

            TopographError::MissingField { index, field } => {
                TgError::new(TgErrorKind::MissingField)
                    .with_entity_id(format!("resources[{}]", index))
                    .with_message(format!("required field `{}` is absent", field))
            }

            TopographError::Serialization { message } => {
                TgError::new(TgErrorKind::Serialization).with_message(message)
            }

            TopographError::Io { path, message } => TgError::new(TgErrorKind::Io)
                .with_entity_id(path)
                .with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to TopographError
impl From<serde_json::Error> for TopographError {
    fn from(err: serde_json::Error) -> Self {
        TopographError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (TgErrorKind::DuplicateNodeId, "ERR_DUPLICATE_NODE_ID"),
            (TgErrorKind::DanglingEdge, "ERR_DANGLING_EDGE"),
            (TgErrorKind::InvalidSnapshot, "ERR_INVALID_SNAPSHOT"),
            (TgErrorKind::MissingField, "ERR_MISSING_FIELD"),
            (TgErrorKind::Serialization, "ERR_SERIALIZATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_malformed_input_family() {
        assert!(TgErrorKind::DuplicateNodeId.is_malformed_input());
        assert!(TgErrorKind::DanglingEdge.is_malformed_input());
        assert!(!TgErrorKind::InvalidSnapshot.is_malformed_input());
    }

    #[test]
    fn test_dangling_edge_carries_offending_ids() {
        let err: TgError = TopographError::DanglingEdge {
            from: "frontend".into(),
            to: "ghost".into(),
            missing: vec!["ghost".into()],
        }
        .into();
        assert_eq!(err.kind(), TgErrorKind::DanglingEdge);
        assert_eq!(err.offending_ids(), Some(&["ghost".to_string()][..]));
        assert_eq!(err.entity_id(), Some("frontend->ghost"));
    }

    #[test]
    fn test_display_includes_code_and_offenders() {
        let err = TgError::new(TgErrorKind::DuplicateNodeId)
            .with_op("build_graph")
            .with_offending_ids(vec!["backend".into()]);
        let text = err.to_string();
        assert!(text.starts_with("[ERR_DUPLICATE_NODE_ID] in operation 'build_graph'"));
        assert!(text.contains("(offending: backend)"));
    }

    #[test]
    fn test_offending_ids_none_by_default() {
        let err = TgError::new(TgErrorKind::Io);
        assert!(err.offending_ids().is_none());
    }
}
