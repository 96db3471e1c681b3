use std::fmt;

/// Registration error
///
/// Returned by [`crate::Router::add_controller`] and the event registration
/// methods. Shape and naming errors are raised while routes are derived and
/// are meant to abort startup; a priority conflict leaves the pipeline as it
/// was and the caller may retry with another priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The controller type is not a named record type
    ///
    /// References, pointers, tuples, slices, arrays, function pointers,
    /// trait objects and primitives cannot be controllers.
    Shape {
        /// Full type name as reported by the controller
        type_name: String,
        /// The kind that was found instead (e.g. `reference`)
        kind: &'static str,
    },
    /// The controller type name does not contain `Controller`
    Naming {
        /// Full type name as reported by the controller
        type_name: String,
    },
    /// An event is already registered at this priority
    EventPriority {
        /// The priority that was requested
        priority: i64,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Shape { type_name, kind } => {
                write!(
                    f,
                    "Controller shape error: '{}' is a {}, a named struct type is expected",
                    type_name, kind
                )
            }
            RouterError::Naming { type_name } => {
                write!(
                    f,
                    "Controller naming error: '{}' does not contain \"Controller\"",
                    type_name
                )
            }
            RouterError::EventPriority { priority } => {
                write!(
                    f,
                    "Event priority error: an event with priority {} already exists",
                    priority
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
