use thiserror::Error;

/// Result type alias using ApiCompatError
pub type Result<T> = std::result::Result<T, ApiCompatError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests, and tooling that gates releases on the engine's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input decoding
    /// Snapshot bytes are not valid UTF-8 JSON or do not match the signature wire format
    InvalidSnapshot,
    /// A required snapshot field (`version`, `signatures`) is absent
    MissingField,

    // Policy configuration
    /// Policy document failed to parse or validate
    InvalidPolicy,
    /// A change code named in configuration does not exist in the registry
    UnknownChangeCode,
    /// More than one updater is applicable to the same change
    ConflictingUpdaters,

    // Registry
    /// Checker set codes disagree with the change registry
    RegistryMismatch,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidPolicy => "ERR_INVALID_POLICY",
            ExErrorKind::UnknownChangeCode => "ERR_UNKNOWN_CHANGE_CODE",
            ExErrorKind::ConflictingUpdaters => "ERR_CONFLICTING_UPDATERS",
            ExErrorKind::RegistryMismatch => "ERR_REGISTRY_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus the context needed
/// to locate the offending change, member or configuration entry.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    change_code: Option<String>,
    member: Option<String>,
    path: Option<String>,
    updaters: Option<Vec<String>>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            change_code: None,
            member: None,
            path: None,
            updaters: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add change code context
    pub fn with_change_code(mut self, code: impl Into<String>) -> Self {
        self.change_code = Some(code.into());
        self
    }

    /// Add qualified member name context
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Add source file context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the names of the updaters involved in a conflict
    pub fn with_updaters(mut self, names: Vec<String>) -> Self {
        self.updaters = Some(names);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
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

    /// Get the change code context, if any
    pub fn change_code(&self) -> Option<&str> {
        self.change_code.as_deref()
    }

    /// Get the qualified member name, if any
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Get the source file, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the conflicting updater names, if any
    pub fn updaters(&self) -> Option<&[String]> {
        self.updaters.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(code) = &self.change_code {
            write!(f, " (change_code: {})", code)?;
        }
        if let Some(member) = &self.member {
            write!(f, " (member: {})", member)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for apicompat operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiCompatError {
    /// Two or more updaters claim the same change
    #[error(
        "Change '{code}' has multiple applicable updaters: {}{}",
        .updaters.join(", "),
        describe_location(.member.as_deref(), .path.as_deref())
    )]
    ConflictingUpdaters {
        code: String,
        updaters: Vec<String>,
        member: Option<String>,
        path: Option<String>,
    },

    /// Checker set is out of step with the change registry
    #[error("Checker set does not match change registry: missing [{}], duplicated [{}]", .missing.join(", "), .duplicated.join(", "))]
    RegistryMismatch {
        missing: Vec<String>,
        duplicated: Vec<String>,
    },

    /// Unknown change code in configuration
    #[error("Unknown change code: {code}")]
    UnknownChangeCode { code: String },

    /// Policy document is invalid
    #[error("Invalid policy: {reason}")]
    InvalidPolicy { reason: String },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

fn describe_location(member: Option<&str>, path: Option<&str>) -> String {
    match (member, path) {
        (Some(member), Some(path)) => format!(" (member '{}' in '{}')", member, path),
        (Some(member), None) => format!(" (member '{}')", member),
        (None, Some(path)) => format!(" (in '{}')", path),
        (None, None) => String::new(),
    }
}

impl From<serde_json::Error> for ApiCompatError {
    fn from(err: serde_json::Error) -> Self {
        ApiCompatError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<ApiCompatError> for ExError {
    fn from(err: ApiCompatError) -> Self {
        let message = err.to_string();
        match err {
            ApiCompatError::ConflictingUpdaters {
                code,
                updaters,
                member,
                path,
            } => {
                let mut ex = ExError::new(ExErrorKind::ConflictingUpdaters)
                    .with_change_code(code)
                    .with_updaters(updaters)
                    .with_message(message);
                if let Some(member) = member {
                    ex = ex.with_member(member);
                }
                if let Some(path) = path {
                    ex = ex.with_path(path);
                }
                ex
            }

            ApiCompatError::RegistryMismatch { .. } => {
                ExError::new(ExErrorKind::RegistryMismatch).with_message(message)
            }

            ApiCompatError::UnknownChangeCode { code } => {
                ExError::new(ExErrorKind::UnknownChangeCode)
                    .with_change_code(code)
                    .with_message(message)
            }

            ApiCompatError::InvalidPolicy { .. } => {
                ExError::new(ExErrorKind::InvalidPolicy).with_message(message)
            }

            ApiCompatError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
