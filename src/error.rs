use std::any::Any;
use std::fmt::Display;
use std::path::PathBuf;

/// A failure captured while running a benchmarked operation.
///
/// Failures are data: they are folded into the operation results and never
/// propagate out of a suite run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    /// Short type name of the error, or `panic` for a caught panic
    pub kind: String,
    /// Human readable failure message
    pub message: String,
}

impl Failure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Build a failure from an error value returned by an operation
    pub fn from_error<E: Display>(error: &E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }

    /// Build a failure from a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self::new("panic", message)
    }
}

/// Errors raised while turning benchmark sources into suite modules
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Benchmark source not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("No benchmark suites registered for {} (module `{module}`)", .path.display())]
    NotRegistered { path: PathBuf, module: String },
    #[error("Benchmark module `{module}` of {} is registered by several sources: {}", .path.display(), .sources.join(", "))]
    Ambiguous {
        path: PathBuf,
        module: String,
        sources: Vec<&'static str>,
    },
    #[error("Invalid benchmark pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Last path segment of a type name, without generic arguments
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ParseFailure;

    impl Display for ParseFailure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "bad input")
        }
    }

    #[test]
    fn test_failure_from_error_uses_short_type_name() {
        let failure = Failure::from_error(&ParseFailure);
        assert_eq!(failure.kind, "ParseFailure");
        assert_eq!(failure.message, "bad input");
        assert_eq!(failure.to_string(), "ParseFailure: bad input");
    }

    #[test]
    fn test_failure_from_panic_payloads() {
        let failure = Failure::from_panic(Box::new("static message"));
        assert_eq!(failure, Failure::new("panic", "static message"));

        let failure = Failure::from_panic(Box::new(String::from("owned message")));
        assert_eq!(failure.message, "owned message");

        let failure = Failure::from_panic(Box::new(42u8));
        assert_eq!(failure.message, "Unknown panic");
    }

    #[test]
    fn test_short_type_name_strips_generics() {
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<std::io::Error>(), "Error");
    }
}
