//! Error types for request construction, with actionable messages.
//!
//! Every error carries:
//! - An error code for programmatic handling
//! - Suggestions for fixing the calling code
//! - Context about the path, type, or parameter involved
//!
//! # Error Codes
//!
//! Codes follow the pattern Q{category}{number}:
//! - 1xxx: Field path errors
//! - 2xxx: Value formatting errors
//! - 3xxx: Parameter errors
//! - 4xxx: Operation errors
//! - 7xxx: Configuration errors
//! - 9xxx: Internal errors
//!
//! None of these are transient. They all point at a defect in the caller's
//! object model, so nothing here is retryable.
//!
//! ```rust
//! use quill_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::malformed_path("spu.serial", "path must start with `.`");
//! assert_eq!(err.code, ErrorCode::MalformedPath);
//! assert!(err.to_string().contains("Q1001"));
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for request construction.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Field path errors (1xxx)
    /// Field path is structurally invalid (Q1001).
    MalformedPath = 1001,

    // Value errors (2xxx)
    /// Value has no literal representation (Q2001).
    UnsupportedValueType = 2001,
    /// Value nesting exceeded the depth limit in strict mode (Q2002).
    MaxDepthExceeded = 2002,

    // Parameter errors (3xxx)
    /// Two parameters share a name (Q3001).
    DuplicateKey = 3001,

    // Operation errors (4xxx)
    /// Operation name is empty (Q4001).
    MissingOperationName = 4001,
    /// Operation kind keyword is not recognised (Q4002).
    UnknownOperationKind = 4002,

    // Configuration errors (7xxx)
    /// Invalid configuration (Q7001).
    InvalidConfiguration = 7001,

    // Internal errors (9xxx)
    /// Internal error (Q9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "Q1001").
    pub fn code(&self) -> String {
        format!("Q{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MalformedPath => "Malformed field path",
            Self::UnsupportedValueType => "Unsupported value type",
            Self::MaxDepthExceeded => "Maximum nesting depth exceeded",
            Self::DuplicateKey => "Duplicate parameter name",
            Self::MissingOperationName => "Missing operation name",
            Self::UnknownOperationKind => "Unknown operation kind",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::Internal => "Internal error",
        }
    }

    /// Get the documentation URL for this error.
    pub fn docs_url(&self) -> String {
        format!("https://docs.rs/quill-query/latest/quill_query/error/enum.ErrorCode.html#{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Suggestion for fixing an error.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The suggestion text.
    pub text: String,
    /// Optional code example.
    pub code: Option<String>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
        }
    }

    /// Add a code example.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being assembled.
    pub operation: Option<String>,
    /// The Rust type involved.
    pub type_name: Option<String>,
    /// The parameter or field name involved.
    pub field: Option<String>,
    /// The field path involved.
    pub path: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<Suggestion>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors raised while building a request string.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Set the operation being assembled.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(suggestion));
        self
    }

    /// Add a code suggestion.
    pub fn with_code_suggestion(mut self, text: impl Into<String>, code: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(text).with_code(code));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the Rust type involved.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.context.type_name = Some(type_name.into());
        self
    }

    /// Set the parameter or field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the field path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.context.path = Some(path.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create a malformed path error.
    pub fn malformed_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::MalformedPath,
            format!("Malformed field path `{}`: {}", path, reason.into()),
        )
        .with_path(&path)
        .with_code_suggestion(
            "Field paths start with `.` followed by at least one field name",
            "#[gql(path = \".spu.serial\")]",
        )
    }

    /// Create an unsupported value error.
    pub fn unsupported_value(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        let kind = kind.into();
        Self::new(
            ErrorCode::UnsupportedValueType,
            format!("Cannot format {} value: {}", kind, reason.into()),
        )
        .with_type(&kind)
        .with_suggestion("Convert the value to a supported scalar before adding it")
    }

    /// Create a max depth error (strict depth policy only).
    pub fn max_depth_exceeded(max_depth: usize) -> Self {
        Self::new(
            ErrorCode::MaxDepthExceeded,
            format!("Value nesting exceeds the maximum depth of {}", max_depth),
        )
        .with_suggestion("Flatten the input object graph")
        .with_help("Use DepthPolicy::Truncate to drop values nested too deeply instead of failing")
    }

    /// Create a duplicate parameter error.
    pub fn duplicate_key(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::DuplicateKey,
            format!("Parameter `{}` is already present in this set", name),
        )
        .with_field(&name)
        .with_suggestion("Parameter names must be unique within one request")
    }

    /// Create a missing operation name error.
    pub fn missing_operation_name() -> Self {
        Self::new(ErrorCode::MissingOperationName, "Operation name must not be empty")
            .with_code_suggestion("Name the operation to call", "Request::query(\"userCount\")")
    }

    /// Create an unknown operation kind error.
    pub fn unknown_operation_kind(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self::new(
            ErrorCode::UnknownOperationKind,
            format!("Unknown operation kind `{}`", kind),
        )
        .with_operation(&kind)
        .with_help("Valid kinds are `query`, `mutation` and `subscription`")
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::InvalidConfiguration,
            format!("Invalid configuration: {}", message),
        )
        .with_suggestion("Check quill.toml against the documented keys")
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, format!("Internal error: {}", message.into()))
    }

    // ============== Error Checks ==============

    /// Check if this is a malformed path error.
    pub fn is_malformed_path(&self) -> bool {
        self.code == ErrorCode::MalformedPath
    }

    /// Check if this is a value formatting error.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::UnsupportedValueType | ErrorCode::MaxDepthExceeded
        )
    }

    /// Check if this is a duplicate parameter error.
    pub fn is_duplicate_key(&self) -> bool {
        self.code == ErrorCode::DuplicateKey
    }

    /// Check if this error comes from an invalid operation descriptor.
    pub fn is_operation_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::MissingOperationName | ErrorCode::UnknownOperationKind
        )
    }

    // ============== Display Functions ==============

    /// Get the documentation URL for this error.
    pub fn docs_url(&self) -> String {
        self.code.docs_url()
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → Operation: {}\n", op));
        }
        if let Some(ref ty) = self.context.type_name {
            output.push_str(&format!("  → Type: {}\n", ty));
        }
        if let Some(ref field) = self.context.field {
            output.push_str(&format!("  → Field: {}\n", field));
        }
        if let Some(ref path) = self.context.path {
            output.push_str(&format!("  → Path: {}\n", path));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion.text));
                if let Some(ref code) = suggestion.code {
                    output.push_str(&format!("     ```\n     {}\n     ```\n", code.replace('\n', "\n     ")));
                }
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output.push_str(&format!("\nMore info: {}\n", self.docs_url()));

        output
    }
}

/// Helper for creating errors with context.
#[macro_export]
macro_rules! query_error {
    ($code:expr, $msg:expr) => {
        $crate::error::QueryError::new($code, $msg)
    };
    ($code:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {{
        let mut err = $crate::error::QueryError::new($code, $msg);
        $(
            err = err.$key($value);
        )+
        err
    }};
}
