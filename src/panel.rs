use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    #[default]
    None,
    Locations,
    Directions,
}

impl Panel {
    /// Opening the panel that is already open closes it.
    pub fn toggle(self, panel: Panel) -> Panel {
        if self == panel {
            Panel::None
        } else {
            panel
        }
    }
}

/// The add-location modal opened by a map click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AddLocationModal {
    coordinates: Option<Coordinates>,
}

impl AddLocationModal {
    pub fn open(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn close(&mut self) -> Option<Coordinates> {
        self.coordinates.take()
    }
}

#[test]
fn toggle_closes_open_panel() {
    assert_eq!(Panel::None.toggle(Panel::Directions), Panel::Directions);
    assert_eq!(Panel::Directions.toggle(Panel::Directions), Panel::None);
    assert_eq!(Panel::Directions.toggle(Panel::Locations), Panel::Locations);
}
