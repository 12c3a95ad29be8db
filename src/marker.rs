use core::fmt;

/// A shape a user can pin to a word. Variants are declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    Circle,
    Square,
    Up,
    Diamond,
    Down,
    Cross,
    Heart,
    Pentagon,
    Hexagon,
    Trapezoid,
}

impl Marker {
    pub const ALL: [Self; 10] = [
        Self::Circle,
        Self::Square,
        Self::Up,
        Self::Diamond,
        Self::Down,
        Self::Cross,
        Self::Heart,
        Self::Pentagon,
        Self::Hexagon,
        Self::Trapezoid,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|marker| marker.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Up => "up",
            Self::Diamond => "diamond",
            Self::Down => "down",
            Self::Cross => "cross",
            Self::Heart => "heart",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Trapezoid => "trapezoid",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers per unique name.
///
/// Names keep the order in which they were first marked. Each name's markers are kept in
/// [`Marker`] order and without duplicates, and names without markers are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers {
    entries: Vec<(String, Vec<Marker>)>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The markers of `name`, empty if it has none.
    pub fn get(&self, name: &str) -> &[Marker] {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, markers)| markers.as_slice())
            .unwrap_or_default()
    }

    /// Replaces the markers of `name`. An empty list unmarks it.
    pub fn set(&mut self, name: impl Into<String>, markers: Vec<Marker>) {
        let name = name.into();
        let markers = canonicalize(markers);
        let position = self.entries.iter().position(|(key, _)| *key == name);
        match (position, markers.is_empty()) {
            (Some(position), true) => {
                self.entries.remove(position);
            }
            (Some(position), false) => self.entries[position].1 = markers,
            (None, true) => {}
            (None, false) => self.entries.push((name, markers)),
        }
    }

    /// Adds `marker` to `name` if absent and removes it otherwise.
    pub fn toggle(&mut self, name: &str, marker: Marker) {
        let mut markers = self.get(name).to_vec();
        match markers.iter().position(|existing| *existing == marker) {
            Some(index) => {
                markers.remove(index);
            }
            None => markers.push(marker),
        }
        self.set(name, markers);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Marker])> {
        self.entries
            .iter()
            .map(|(name, markers)| (name.as_str(), markers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<Marker>)> for Markers {
    fn from_iter<T: IntoIterator<Item = (N, Vec<Marker>)>>(iter: T) -> Self {
        let mut markers = Self::new();
        for (name, list) in iter {
            markers.set(name, list);
        }
        markers
    }
}

fn canonicalize(mut markers: Vec<Marker>) -> Vec<Marker> {
    markers.sort_unstable();
    markers.dedup();
    markers
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names() {
        for marker in Marker::ALL {
            assert_eq!(Marker::from_name(marker.as_str()), Some(marker));
        }
        assert_eq!(Marker::from_name("star"), None);
        assert_eq!(Marker::Trapezoid.to_string(), "trapezoid");
    }

    #[test]
    fn toggle_keeps_canonical_order() {
        let mut markers = Markers::new();
        markers.toggle("sakil", Marker::Heart);
        markers.toggle("sakil", Marker::Circle);
        markers.toggle("sakil", Marker::Down);
        assert_eq!(markers.get("sakil"), [Marker::Circle, Marker::Down, Marker::Heart]);
        markers.toggle("sakil", Marker::Down);
        assert_eq!(markers.get("sakil"), [Marker::Circle, Marker::Heart]);
    }

    #[test]
    fn empty_lists_are_removed() {
        let mut markers = Markers::new();
        markers.toggle("sakil", Marker::Square);
        markers.toggle("tel", Marker::Square);
        markers.toggle("sakil", Marker::Square);
        assert!(markers.get("sakil").is_empty());
        assert_eq!(markers.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["tel"]);
        markers.set("tel", Vec::new());
        assert!(markers.is_empty());
    }

    #[test]
    fn set_normalizes_and_keeps_position() {
        let mut markers = Markers::from_iter([
            ("a", vec![Marker::Up]),
            ("b", vec![Marker::Cross, Marker::Circle, Marker::Cross]),
        ]);
        assert_eq!(markers.get("b"), [Marker::Circle, Marker::Cross]);
        markers.set("a", vec![Marker::Hexagon]);
        assert_eq!(markers.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["a", "b"]);
    }
}
