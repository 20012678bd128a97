//! Human readable distances and durations for the directions panel.

pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{} hr {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(format_distance(500.0), "500 m");
        assert_eq!(format_distance(649.6), "650 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(12345.0), "12.3 km");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(59.0), "0 min");
        assert_eq!(format_duration(300.0), "5 min");
        assert_eq!(format_duration(3900.0), "1 hr 5 min");
        assert_eq!(format_duration(-4.0), "0 min");
    }
}
