use crate::domain::model::Airport;
use crate::utils::error::{Result, RouteError};
use std::collections::{BTreeSet, HashMap};

/// Airport records keyed by code, with a secondary `(position, code)` index
/// that yields the traversal order directly.
#[derive(Debug, Default, Clone)]
pub struct AirportRegistry {
    airports: HashMap<String, Airport>,
    by_position: BTreeSet<(i64, String)>,
    unique_positions: bool,
}

impl AirportRegistry {
    pub fn new(unique_positions: bool) -> Self {
        Self {
            unique_positions,
            ..Self::default()
        }
    }

    /// Expects an already-normalised airport; field shape is checked by the caller.
    pub fn add_airport(&mut self, airport: Airport) -> Result<()> {
        if self.airports.contains_key(&airport.code) {
            return Err(RouteError::DuplicateKey { code: airport.code });
        }
        self.check_position_free(airport.position, &airport.code)?;

        self.by_position
            .insert((airport.position, airport.code.clone()));
        self.airports.insert(airport.code.clone(), airport);
        Ok(())
    }

    pub fn update_airport(&mut self, code: &str, name: String, position: i64) -> Result<Airport> {
        let current_position = self.get_airport(code)?.position;
        if position != current_position {
            self.check_position_free(position, code)?;
        }

        let airport = self
            .airports
            .get_mut(code)
            .ok_or_else(|| RouteError::airport_not_found(code))?;
        self.by_position.remove(&(current_position, code.to_string()));
        airport.name = name;
        airport.position = position;
        self.by_position.insert((position, code.to_string()));
        Ok(airport.clone())
    }

    pub fn get_airport(&self, code: &str) -> Result<&Airport> {
        self.airports
            .get(code)
            .ok_or_else(|| RouteError::airport_not_found(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    /// Ascending by position, ties broken by code.
    pub fn list_by_position(&self) -> Vec<Airport> {
        self.iter_by_position().cloned().collect()
    }

    pub fn iter_by_position(&self) -> impl Iterator<Item = &Airport> + '_ {
        self.by_position
            .iter()
            .filter_map(|(_, code)| self.airports.get(code))
    }

    /// Reference checks live in the route store; callers must confirm the
    /// airport is unreferenced before removing it.
    pub fn remove_airport(&mut self, code: &str) -> Result<Airport> {
        let airport = self
            .airports
            .remove(code)
            .ok_or_else(|| RouteError::airport_not_found(code))?;
        self.by_position
            .remove(&(airport.position, airport.code.clone()));
        Ok(airport)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    fn check_position_free(&self, position: i64, code: &str) -> Result<()> {
        if !self.unique_positions {
            return Ok(());
        }
        let taken_by = self
            .by_position
            .range((position, String::new())..)
            .take_while(|(p, _)| *p == position)
            .find(|(_, other)| other != code);
        match taken_by {
            Some((_, other)) => Err(RouteError::DuplicatePosition {
                position,
                code: other.clone(),
            }),
            None => Ok(()),
        }
    }
}
