use thiserror::Error;

/// Result type alias using the canonical error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by the shell, the CLI exit
/// path and structured log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Malformed user input (non-numeric score, bad menu choice, empty id)
    InvalidInput,
    /// A requested student does not exist
    NotFound,
    /// Connectivity, query or constraint failure in the relational store
    Storage,
    /// The slip document could not be built or written
    Render,
    /// Configuration could not be loaded or is invalid
    Config,
    /// Terminal or filesystem I/O outside of rendering
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Storage => "ERR_STORAGE",
            ExErrorKind::Render => "ERR_RENDER",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, student id, underlying cause) for reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (the student id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
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

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (student_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Typed errors raised at their point of origin
///
/// These convert into [`ExError`] when they cross a crate boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlipError {
    /// A required text field was empty
    #[error("{field} must not be empty")]
    EmptyField { field: String },

    /// A score could not be parsed as a number
    #[error("Invalid marks value '{raw}': expected a number")]
    InvalidScore { raw: String },

    /// A count (number of units, menu choice) could not be parsed
    #[error("Invalid {field} '{raw}': expected a whole number")]
    InvalidNumber { field: String, raw: String },

    /// A `UNIT=SCORE` pair was malformed
    #[error("Invalid mark '{raw}': expected UNIT=SCORE")]
    InvalidMarkPair { raw: String },

    /// Student is not in the store
    #[error("Student record not found: {student_id}")]
    StudentNotFound { student_id: String },

    /// The logo file exists but could not be decoded as an image
    #[error("Logo image at {path} could not be read: {reason}")]
    LogoUnreadable { path: String, reason: String },

    /// The PDF document could not be assembled or serialised
    #[error("PDF generation failed: {message}")]
    Pdf { message: String },

    /// Writing the slip to its destination failed
    #[error("Cannot write slip to {path}: {message}")]
    Destination { path: String, message: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Conversion from SlipError to ExError
impl From<SlipError> for ExError {
    fn from(err: SlipError) -> Self {
        let message = err.to_string();
        match err {
            SlipError::EmptyField { .. }
            | SlipError::InvalidScore { .. }
            | SlipError::InvalidNumber { .. }
            | SlipError::InvalidMarkPair { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            SlipError::StudentNotFound { student_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(student_id)
                .with_message("Student record not found"),

            SlipError::LogoUnreadable { .. } => ExError::new(ExErrorKind::Render)
                .with_op("load_logo")
                .with_message(message),

            SlipError::Pdf { .. } => ExError::new(ExErrorKind::Render)
                .with_op("build_pdf")
                .with_message(message),

            SlipError::Destination { .. } => ExError::new(ExErrorKind::Render)
                .with_op("write_slip")
                .with_message(message),

            SlipError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
        }
    }
}

impl From<config::ConfigError> for SlipError {
    fn from(err: config::ConfigError) -> Self {
        SlipError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}
