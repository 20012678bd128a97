use std::collections::HashMap;

use uuid::Uuid;

use crate::entities::{Coordinates, Location};

#[derive(Debug, Default, PartialEq)]
pub struct MarkerDelta {
    pub add: Vec<(Uuid, Coordinates)>,
    pub remove: Vec<Uuid>,
}

impl MarkerDelta {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Compares the markers a map should show with the ones it shows. A marker
/// whose location moved is removed and added again.
pub fn diff_markers(desired: &[Location], rendered: &HashMap<Uuid, Coordinates>) -> MarkerDelta {
    let mut delta = MarkerDelta::default();

    for location in desired {
        match rendered.get(&location.id) {
            Some(coordinates) if *coordinates == location.coordinates => {}
            Some(_) => {
                delta.remove.push(location.id);
                delta.add.push((location.id, location.coordinates));
            }
            None => delta.add.push((location.id, location.coordinates)),
        }
    }

    let mut stale: Vec<Uuid> = rendered
        .keys()
        .filter(|id| !desired.iter().any(|location| location.id == **id))
        .copied()
        .collect();
    stale.sort();

    delta.remove.extend(stale);
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str, lng: f64, lat: f64) -> Location {
        Location::new(name.into(), Coordinates::new(lng, lat))
    }

    #[test]
    fn only_deltas_are_issued() {
        let a = location("A", 0.0, 0.0);
        let b = location("B", 1.0, 1.0);
        let gone = Uuid::new_v4();

        let rendered = HashMap::from([(a.id, a.coordinates), (gone, Coordinates::new(5.0, 5.0))]);
        let delta = diff_markers(&[a.clone(), b.clone()], &rendered);

        assert_eq!(delta.add, vec![(b.id, b.coordinates)]);
        assert_eq!(delta.remove, vec![gone]);
    }

    #[test]
    fn in_sync_is_empty() {
        let a = location("A", 0.0, 0.0);
        let rendered = HashMap::from([(a.id, a.coordinates)]);

        assert!(diff_markers(&[a], &rendered).is_empty());
    }

    #[test]
    fn moved_marker_is_replaced() {
        let mut a = location("A", 0.0, 0.0);
        let rendered = HashMap::from([(a.id, a.coordinates)]);
        a.coordinates = Coordinates::new(3.0, 3.0);

        let delta = diff_markers(&[a.clone()], &rendered);
        assert_eq!(delta.remove, vec![a.id]);
        assert_eq!(delta.add, vec![(a.id, a.coordinates)]);
    }
}
