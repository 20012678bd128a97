use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    entities::{Coordinates, Location},
    error::{invalid_input_error, not_found_error, Error},
};

/// In-memory list of the signed-in user's locations. This list, not the
/// backend, is what the map and panels render from.
#[derive(Debug, Default, Clone)]
pub struct LocationStore {
    locations: Vec<Location>,
    // ids deleted this session; a backend read may predate the delete
    deleted: HashSet<Uuid>,
}

impl LocationStore {
    pub fn list(&self) -> &[Location] {
        &self.locations
    }

    pub fn find(&self, id: Uuid) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn add(&mut self, name: &str, coordinates: Coordinates) -> Result<Location, Error> {
        let name = name.trim();

        if name.is_empty() || !coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        let location = Location::new(name.into(), coordinates);
        self.locations.push(location.clone());

        Ok(location)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Location, Error> {
        let position = self
            .locations
            .iter()
            .position(|location| location.id == id)
            .ok_or_else(not_found_error)?;

        self.deleted.insert(id);

        Ok(self.locations.remove(position))
    }

    /// Replaces the list with what the backend returned, keeping any
    /// location added while the load was in flight and dropping any deleted
    /// meanwhile.
    pub fn load(&mut self, mut loaded: Vec<Location>) {
        loaded.retain(|location| !self.deleted.contains(&location.id));

        let pending: Vec<Location> = self
            .locations
            .drain(..)
            .filter(|location| !loaded.iter().any(|l| l.id == location.id))
            .collect();

        self.locations = loaded;
        self.locations.extend(pending);
    }

    pub fn clear(&mut self) {
        self.locations.clear();
        self.deleted.clear();
    }
}
