use crate::core::registry::AirportRegistry;
use crate::domain::model::{Direction, NthNodeResult};
use crate::utils::error::{Result, RouteError};
use crate::utils::validation;

/// Finds the airport `n` places left or right of `start` in the
/// position-ordered sequence.
///
/// This is a positional lookup only. Route edges play no part: B may be
/// "1 right" of A without any route between them.
pub fn find_nth_node(
    registry: &AirportRegistry,
    start: &str,
    direction: Direction,
    n: i64,
) -> Result<NthNodeResult> {
    validation::check_step_count(n)?;

    let ordered = registry.list_by_position();
    let start_index = ordered
        .iter()
        .position(|a| a.code == start)
        .ok_or_else(|| RouteError::airport_not_found(start))?;

    let out_of_range = || RouteError::OutOfRange {
        start: start.to_string(),
        direction: direction.to_string(),
        n,
    };

    let steps = usize::try_from(n).map_err(|_| out_of_range())?;
    let target_index = match direction {
        Direction::Right => start_index.checked_add(steps),
        Direction::Left => start_index.checked_sub(steps),
    }
    .filter(|&idx| idx < ordered.len())
    .ok_or_else(out_of_range)?;

    tracing::debug!(
        "Nth node: {} {} {} -> index {} ({})",
        start,
        direction,
        n,
        target_index,
        ordered[target_index].code
    );

    Ok(NthNodeResult {
        start: ordered[start_index].clone(),
        direction,
        n,
        start_index,
        target_index,
        target: ordered[target_index].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Airport;
    use crate::utils::error::ErrorKind;

    fn sample() -> AirportRegistry {
        let mut registry = AirportRegistry::new(false);
        for (code, position) in [("A", 1), ("B", 2), ("C", 3), ("D", 4)] {
            registry
                .add_airport(Airport::new(code, format!("Airport {}", code), position))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_left_and_right() {
        let registry = sample();
        let hit = |start, dir, n| find_nth_node(&registry, start, dir, n).map(|r| r.target.code);

        assert_eq!(hit("B", Direction::Right, 1).unwrap(), "C");
        assert_eq!(hit("B", Direction::Left, 1).unwrap(), "A");
        assert_eq!(hit("A", Direction::Right, 3).unwrap(), "D");
        assert_eq!(hit("C", Direction::Right, 0).unwrap(), "C");
    }

    #[test]
    fn test_out_of_bounds() {
        let registry = sample();
        for (start, dir, n) in [
            ("A", Direction::Left, 1),
            ("D", Direction::Right, 1),
            ("A", Direction::Right, 4),
            ("B", Direction::Right, i64::MAX),
        ] {
            let err = find_nth_node(&registry, start, dir, n).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "{} {} {}", start, dir, n);
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let registry = sample();
        assert_eq!(
            find_nth_node(&registry, "B", Direction::Left, -1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            find_nth_node(&registry, "Z", Direction::Left, 1).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_uses_sequence_index_not_raw_position() {
        // Gaps in positions are skipped: 10, 20, 35 are consecutive slots.
        let mut registry = AirportRegistry::new(false);
        registry.add_airport(Airport::new("X", "X", 10)).unwrap();
        registry.add_airport(Airport::new("Y", "Y", 20)).unwrap();
        registry.add_airport(Airport::new("Z", "Z", 35)).unwrap();

        let result = find_nth_node(&registry, "X", Direction::Right, 2).unwrap();
        assert_eq!(result.target.code, "Z");
        assert_eq!((result.start_index, result.target_index), (0, 2));
    }
}
