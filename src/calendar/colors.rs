use crate::aggregation::distinct_users;
use crate::models::AvailabilityRecord;

/// A display color as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserColor(pub &'static str);

impl UserColor {
    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// Red, green and blue components; black if the hex string is malformed.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.0.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

pub const PALETTE: [UserColor; 10] = [
    UserColor("#ff6b6b"),
    UserColor("#4ecdc4"),
    UserColor("#45b7d1"),
    UserColor("#ffd93d"),
    UserColor("#a29bfe"),
    UserColor("#fd79a8"),
    UserColor("#fdcb6e"),
    UserColor("#6c5ce7"),
    UserColor("#00b894"),
    UserColor("#e17055"),
];

/// User → color, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<(String, UserColor)>,
    fallback: UserColor,
}

impl ColorMap {
    pub fn get(&self, user_name: &str) -> UserColor {
        self.entries
            .iter()
            .find(|(name, _)| name == user_name)
            .map(|(_, color)| *color)
            .unwrap_or(self.fallback)
    }

    /// Legend entries in assignment order.
    pub fn entries(&self) -> &[(String, UserColor)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The i-th distinct user gets `palette[i % palette.len()]`.
///
/// Colors follow enumeration order, so a user showing up earlier in a later
/// snapshot can shift everybody after them.
pub fn assign_colors(records: &[AvailabilityRecord], palette: &[UserColor]) -> ColorMap {
    let fallback = palette.first().copied().unwrap_or(PALETTE[0]);
    let entries = if palette.is_empty() {
        Vec::new()
    } else {
        distinct_users(records)
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, palette[i % palette.len()]))
            .collect()
    };
    ColorMap { entries, fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records(names: &[&str]) -> Vec<AvailabilityRecord> {
        let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        names
            .iter()
            .enumerate()
            .map(|(i, n)| AvailabilityRecord::provisional(i as i64, n, date))
            .collect()
    }

    #[test]
    fn test_first_seen_order() {
        let map = assign_colors(&records(&["Peter", "Wolfi", "Peter", "Robert"]), &PALETTE);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("Peter"), PALETTE[0]);
        assert_eq!(map.get("Wolfi"), PALETTE[1]);
        assert_eq!(map.get("Robert"), PALETTE[2]);
    }

    #[test]
    fn test_palette_cycles() {
        let names: Vec<String> = (0..12).map(|i| format!("user{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let map = assign_colors(&records(&refs), &PALETTE);
        assert_eq!(map.get("user10"), PALETTE[0]);
        assert_eq!(map.get("user11"), PALETTE[1]);
    }

    #[test]
    fn test_unknown_user_falls_back_to_first_color() {
        let map = assign_colors(&records(&["Peter"]), &PALETTE);
        assert_eq!(map.get("Andreas"), PALETTE[0]);
        assert_eq!(assign_colors(&[], &PALETTE).get("anyone"), PALETTE[0]);
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let input = records(&["Tobias", "Andreas", "Wolfi"]);
        assert_eq!(assign_colors(&input, &PALETTE), assign_colors(&input, &PALETTE));
    }

    #[test]
    fn test_rgb_parsing() {
        assert_eq!(UserColor("#ff6b6b").rgb(), (255, 107, 107));
        assert_eq!(UserColor("#00b894").rgb(), (0, 184, 148));
        assert_eq!(UserColor("oops").rgb(), (0, 0, 0));
    }
}
