use crate::entities::{MapLayer, Theme};

/// Satellite imagery has no dark variant, so both themes share one style.
pub fn style_url(layer: MapLayer, theme: Theme) -> &'static str {
    match (layer, theme) {
        (MapLayer::Map, Theme::Light) => "mapbox://styles/mapbox/streets-v12",
        (MapLayer::Map, Theme::Dark) => "mapbox://styles/mapbox/dark-v11",
        (MapLayer::Satellite, _) => "mapbox://styles/mapbox/satellite-streets-v12",
    }
}

#[test]
fn satellite_ignores_theme() {
    assert_eq!(
        style_url(MapLayer::Satellite, Theme::Light),
        style_url(MapLayer::Satellite, Theme::Dark)
    );
    assert_ne!(
        style_url(MapLayer::Map, Theme::Light),
        style_url(MapLayer::Map, Theme::Dark)
    );
}
