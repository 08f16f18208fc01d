//! Player colors and per-color data storage.
//!
//! ## Color
//!
//! The four seats of a Tock table. A color owns four pawns, a hand of cards,
//! one quarter of the shared loop (its 18-cell segment) and a private home
//! lane. Turn order follows the declaration order.
//!
//! ## ColorMap
//!
//! Fixed-size per-color storage backed by an array for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const COLOR_COUNT: usize = 4;

/// A player color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Green,
    Red,
    Yellow,
}

impl Color {
    /// All colors in turn order.
    pub const ALL: [Color; COLOR_COUNT] = [Color::Blue, Color::Green, Color::Red, Color::Yellow];

    /// Seat index (0-based). Also the segment index on the shared loop.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color for a seat index, wrapping around the table.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % COLOR_COUNT]
    }

    /// The color seated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Iterate over all colors in turn order.
    ///
    /// ```
    /// use tock_engine::core::Color;
    ///
    /// let colors: Vec<_> = Color::all().collect();
    /// assert_eq!(colors.len(), 4);
    /// assert_eq!(colors[0], Color::Blue);
    /// assert_eq!(colors[3], Color::Yellow);
    /// ```
    pub fn all() -> impl Iterator<Item = Color> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Red => "Red",
            Color::Yellow => "Yellow",
        };
        f.write_str(name)
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use tock_engine::core::{Color, ColorMap};
///
/// let mut finished: ColorMap<u8> = ColorMap::with_value(0);
/// finished[Color::Red] = 2;
/// assert_eq!(finished[Color::Red], 2);
/// assert_eq!(finished[Color::Blue], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; COLOR_COUNT],
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Color, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Iterate over the stored values in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Default> Default for ColorMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_indices() {
        assert_eq!(Color::Blue.index(), 0);
        assert_eq!(Color::Green.index(), 1);
        assert_eq!(Color::Red.index(), 2);
        assert_eq!(Color::Yellow.index(), 3);
        assert_eq!(Color::from_index(5), Color::Green);
    }

    #[test]
    fn test_turn_order_wraps() {
        assert_eq!(Color::Blue.next(), Color::Green);
        assert_eq!(Color::Yellow.next(), Color::Blue);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Color::Red), "Red");
    }

    #[test]
    fn test_color_map_new() {
        let map: ColorMap<usize> = ColorMap::new(|c| c.index() * 10);

        assert_eq!(map[Color::Blue], 0);
        assert_eq!(map[Color::Green], 10);
        assert_eq!(map[Color::Red], 20);
        assert_eq!(map[Color::Yellow], 30);
    }

    #[test]
    fn test_color_map_mutation() {
        let mut map: ColorMap<Vec<u8>> = ColorMap::with_default();
        map[Color::Yellow].push(7);

        assert!(map[Color::Blue].is_empty());
        assert_eq!(map[Color::Yellow], vec![7]);
    }

    #[test]
    fn test_color_map_iter_order() {
        let map: ColorMap<u8> = ColorMap::new(|c| c.index() as u8);
        let pairs: Vec<_> = map.iter().map(|(c, v)| (c, *v)).collect();
        assert_eq!(
            pairs,
            vec![(Color::Blue, 0), (Color::Green, 1), (Color::Red, 2), (Color::Yellow, 3)]
        );
    }

    #[test]
    fn test_color_map_serialization() {
        let map: ColorMap<u8> = ColorMap::new(|c| c.index() as u8 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: ColorMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
