use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{entity} '{key}' not found")]
    NotFound { entity: String, key: String },

    #[error("No airport {n} position(s) {direction} of {start}")]
    OutOfRange {
        start: String,
        direction: String,
        n: i64,
    },

    #[error("Airport '{code}' already exists")]
    DuplicateKey { code: String },

    #[error("Position {position} is already taken by airport {code}")]
    DuplicatePosition { position: i64, code: String },

    #[error("A route from {from} to {to} already exists")]
    DuplicateRoute { from: String, to: String },

    #[error("Source and destination airports cannot be the same ({code})")]
    SelfLoop { code: String },

    #[error("Route {from} -> {to} would create a circular route")]
    CycleDetected { from: String, to: String },

    #[error("Duration must be a positive number of minutes, got {duration}")]
    InvalidDuration { duration: i64 },

    #[error("Cannot delete airport {code}: it has {route_count} associated route(s)")]
    Conflict { code: String, route_count: usize },

    #[error("No routes have been added yet")]
    EmptyGraph,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Import failed at line {line}: {source}")]
    ImportError {
        line: u64,
        #[source]
        source: Box<RouteError>,
    },
}

pub type Result<T> = std::result::Result<T, RouteError>;

/// Flat classification of [`RouteError`] for hosts that only need to branch
/// on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    OutOfRange,
    DuplicateKey,
    DuplicateRoute,
    SelfLoop,
    CycleDetected,
    InvalidDuration,
    Conflict,
    EmptyGraph,
    Storage,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RouteError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        RouteError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn airport_not_found(code: &str) -> Self {
        RouteError::NotFound {
            entity: "Airport".to_string(),
            key: code.to_string(),
        }
    }

    pub fn route_not_found(source: &str, destination: &str) -> Self {
        RouteError::NotFound {
            entity: "Route".to_string(),
            key: format!("{} -> {}", source, destination),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::InvalidInput { .. } => ErrorKind::InvalidInput,
            RouteError::NotFound { .. } => ErrorKind::NotFound,
            RouteError::OutOfRange { .. } => ErrorKind::OutOfRange,
            RouteError::DuplicateKey { .. } | RouteError::DuplicatePosition { .. } => {
                ErrorKind::DuplicateKey
            }
            RouteError::DuplicateRoute { .. } => ErrorKind::DuplicateRoute,
            RouteError::SelfLoop { .. } => ErrorKind::SelfLoop,
            RouteError::CycleDetected { .. } => ErrorKind::CycleDetected,
            RouteError::InvalidDuration { .. } => ErrorKind::InvalidDuration,
            RouteError::Conflict { .. } => ErrorKind::Conflict,
            RouteError::EmptyGraph => ErrorKind::EmptyGraph,
            RouteError::IoError(_) | RouteError::SerializationError(_) | RouteError::CsvError(_) => {
                ErrorKind::Storage
            }
            RouteError::ConfigError { .. } => ErrorKind::Config,
            RouteError::ImportError { source, .. } => source.kind(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::EmptyGraph => ErrorSeverity::Low,
            ErrorKind::NotFound | ErrorKind::OutOfRange => ErrorSeverity::Medium,
            ErrorKind::Storage => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RouteError::EmptyGraph => "There are no routes to analyse yet.".to_string(),
            RouteError::OutOfRange { .. } => {
                format!("{}. The position is out of bounds.", self)
            }
            RouteError::IoError(e) => format!("Could not access the route store: {}", e),
            RouteError::SerializationError(e) => {
                format!("The route store file is not valid JSON: {}", e)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidInput => "Check the value format (codes are letters only, names non-empty)",
            ErrorKind::NotFound => "List airports or routes to see which codes exist",
            ErrorKind::OutOfRange => "Use a smaller N or the opposite direction",
            ErrorKind::DuplicateKey => "Choose a different airport code or position",
            ErrorKind::DuplicateRoute => "Remove the existing route first or pick another pair",
            ErrorKind::SelfLoop => "Pick two different airports",
            ErrorKind::CycleDetected => "Routes must not form a loop; remove a route on the path first",
            ErrorKind::InvalidDuration => "Use a duration of at least one minute",
            ErrorKind::Conflict => "Delete the airport's routes before deleting the airport",
            ErrorKind::EmptyGraph => "Add at least one route",
            ErrorKind::Storage => "Check the store path and file permissions",
            ErrorKind::Config => "Fix the configuration file and try again",
        }
    }
}
