use crate::utils::error::{Result, RouteError};
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

/// Airport code → codes of the airports on the other end of its edges.
pub type Adjacency = HashMap<String, BTreeSet<String>>;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]+$").expect("static airport code pattern"))
}

/// Trims and upper-cases an airport code, then checks it is exactly
/// `code_length` ASCII letters.
pub fn normalize_code(raw: &str, code_length: usize) -> Result<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Err(RouteError::invalid_input("code", raw, "Airport code cannot be empty"));
    }
    if code.chars().count() != code_length {
        return Err(RouteError::invalid_input(
            "code",
            raw,
            format!("Airport code must be exactly {} characters", code_length),
        ));
    }
    if !code_pattern().is_match(&code) {
        return Err(RouteError::invalid_input(
            "code",
            raw,
            "Airport code must contain only letters",
        ));
    }
    Ok(code)
}

pub fn validate_airport_name(name: &str, max_length: usize) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RouteError::invalid_input(
            "name",
            name,
            "Airport name cannot be empty or whitespace-only",
        ));
    }
    if trimmed.chars().count() > max_length {
        return Err(RouteError::invalid_input(
            "name",
            name,
            format!("Airport name must be at most {} characters", max_length),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn check_self_loop(source: &str, destination: &str) -> Result<()> {
    if source == destination {
        return Err(RouteError::SelfLoop {
            code: source.to_string(),
        });
    }
    Ok(())
}

pub fn check_duplicate_route(outgoing: &Adjacency, source: &str, destination: &str) -> Result<()> {
    let exists = outgoing
        .get(source)
        .is_some_and(|targets| targets.contains(destination));
    if exists {
        return Err(RouteError::DuplicateRoute {
            from: source.to_string(),
            to: destination.to_string(),
        });
    }
    Ok(())
}

/// Rejects `source -> destination` if `source` is already reachable from
/// `destination`, i.e. the new edge would close a directed cycle.
///
/// Iterative depth-first search over the outgoing adjacency with a visited
/// set, so every airport and edge is looked at once: O(V + E).
pub fn check_acyclic(outgoing: &Adjacency, source: &str, destination: &str) -> Result<()> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![destination];

    while let Some(current) = stack.pop() {
        if current == source {
            return Err(RouteError::CycleDetected {
                from: source.to_string(),
                to: destination.to_string(),
            });
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(targets) = outgoing.get(current) {
            stack.extend(
                targets
                    .iter()
                    .map(String::as_str)
                    .filter(|next| !visited.contains(next)),
            );
        }
    }

    Ok(())
}

pub fn check_duration(duration: i64) -> Result<()> {
    if duration <= 0 {
        return Err(RouteError::InvalidDuration { duration });
    }
    Ok(())
}

pub fn check_step_count(n: i64) -> Result<()> {
    if n < 0 {
        return Err(RouteError::invalid_input(
            "n",
            n,
            "Number of positions must be non-negative",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(RouteError::ConfigError {
            field: field_name.to_string(),
            message: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RouteError::ConfigError {
            field: field_name.to_string(),
            message: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RouteError::ConfigError {
            field: field_name.to_string(),
            message: format!("Value {} must be between {} and {}", value, min, max),
        });
    }
    Ok(())
}
