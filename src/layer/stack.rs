//! Ordered, de-duplicated layer stacks.

use serde::{Deserialize, Deserializer, Serialize};

use super::LayerStackItem;
use crate::color::Color;

/// An ordered sequence of [`LayerStackItem`]s.
///
/// Index 0 is painted first. The `order` field of every item mirrors its
/// index after each operation. Stacks read from JSON are sorted by their
/// `order` values (ties keep input sequence) and then renumbered.
///
/// ```
/// use badgesmith::LayerStack;
///
/// let stack = LayerStack::new().with_added("stars").with_added("ribbon");
/// let moved = stack.with_moved(0, 1);
///
/// assert_eq!(moved.ids().collect::<Vec<_>>(), ["ribbon", "stars"]);
/// // The original stack is untouched.
/// assert_eq!(stack.ids().collect::<Vec<_>>(), ["stars", "ribbon"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct LayerStack {
    items: Vec<LayerStackItem>,
}

impl LayerStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stack from items, keeping their sequence and renumbering
    /// `order` from 0.
    pub fn from_items(items: impl IntoIterator<Item = LayerStackItem>) -> Self {
        Self::renumbered(items.into_iter().collect())
    }

    /// Builds a stack from items carrying arbitrary `order` values, sorting
    /// by `order` first. The sort is stable.
    pub fn from_ordered(items: impl IntoIterator<Item = LayerStackItem>) -> Self {
        let mut items: Vec<_> = items.into_iter().collect();
        items.sort_by_key(|item| item.order);
        Self::renumbered(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<&LayerStackItem> {
        self.items.get(index)
    }

    /// Returns the first item (the one painted first).
    pub fn first(&self) -> Option<&LayerStackItem> {
        self.items.first()
    }

    /// Returns true if an item with `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> impl Iterator<Item = &LayerStackItem> {
        self.items.iter()
    }

    /// Returns an iterator over the item ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn as_slice(&self) -> &[LayerStackItem] {
        &self.items
    }

    /// Returns a stack with `id` appended at `order = len`.
    ///
    /// Adding an id that is already present returns an unchanged copy.
    pub fn with_added(&self, id: impl Into<String>) -> Self {
        self.with_item(LayerStackItem::new(id))
    }

    /// Returns a stack with `item` appended, keeping its colour override.
    ///
    /// Adding an id that is already present returns an unchanged copy.
    pub fn with_item(&self, item: LayerStackItem) -> Self {
        if self.contains(&item.id) {
            tracing::debug!(id = %item.id, "layer already in stack");
            return self.clone();
        }
        let mut items = self.items.clone();
        let order = items.len() as u32;
        items.push(item.with_order(order));
        Self { items }
    }

    /// Returns a stack without the item `id`, with orders closed up.
    ///
    /// Removing an unknown id returns an unchanged copy.
    pub fn without(&self, id: &str) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        Self::renumbered(
            self.items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        )
    }

    /// Returns a stack with the items at `from` and `to` swapped.
    ///
    /// Out-of-range indices return an unchanged copy.
    pub fn with_moved(&self, from: usize, to: usize) -> Self {
        if from >= self.items.len() || to >= self.items.len() {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.swap(from, to);
        Self::renumbered(items)
    }

    /// Returns a stack whose item `id` carries `color` as its override.
    pub fn with_color(&self, id: &str, color: Option<Color>) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    LayerStackItem {
                        color,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Returns true if every item's `order` equals its index.
    pub fn is_contiguous(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(index, item)| item.order as usize == index)
    }

    fn renumbered(mut items: Vec<LayerStackItem>) -> Self {
        for (index, item) in items.iter_mut().enumerate() {
            item.order = index as u32;
        }
        Self { items }
    }
}

impl From<Vec<LayerStackItem>> for LayerStack {
    fn from(items: Vec<LayerStackItem>) -> Self {
        Self::from_items(items)
    }
}

impl<'de> Deserialize<'de> for LayerStack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LayerStackItem>::deserialize(deserializer).map(Self::from_ordered)
    }
}

impl<'a> IntoIterator for &'a LayerStack {
    type Item = &'a LayerStackItem;
    type IntoIter = std::slice::Iter<'a, LayerStackItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stack(ids: &[&str]) -> LayerStack {
        ids.iter().fold(LayerStack::new(), |s, id| s.with_added(*id))
    }

    fn orders(stack: &LayerStack) -> Vec<u32> {
        stack.iter().map(|item| item.order).collect()
    }

    #[test]
    fn add_appends_with_next_order() {
        let s = stack(&["a", "b", "c"]);
        assert_eq!(s.ids().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(orders(&s), [0, 1, 2]);
    }

    #[test]
    fn add_does_not_mutate_input() {
        let original = stack(&["a"]);
        let grown = original.with_added("b");
        assert_eq!(original.len(), 1);
        assert_eq!(grown.len(), 2);
    }

    #[test]
    fn add_duplicate_is_noop() {
        let s = stack(&["a", "b"]);
        assert_eq!(s.with_added("a"), s);
    }

    #[test]
    fn add_item_keeps_color() {
        let red = Color::from_rgb(255, 0, 0);
        let s = stack(&["a"]).with_item(LayerStackItem::new("b").with_color(red).with_order(9));
        assert_eq!(s.get(1).unwrap().color, Some(red));
        assert_eq!(s.get(1).unwrap().order, 1);
    }

    #[test]
    fn remove_renumbers_contiguously() {
        let s = stack(&["a", "b", "c", "d"]).without("b");
        assert_eq!(s.ids().collect::<Vec<_>>(), ["a", "c", "d"]);
        assert_eq!(orders(&s), [0, 1, 2]);
        assert!(s.is_contiguous());
    }

    #[test]
    fn remove_unknown_is_noop() {
        let s = stack(&["a", "b"]);
        assert_eq!(s.without("zzz"), s);
    }

    #[test]
    fn move_swaps_and_renumbers() {
        let s = stack(&["a", "b", "c"]).with_moved(0, 2);
        assert_eq!(s.ids().collect::<Vec<_>>(), ["c", "b", "a"]);
        assert_eq!(orders(&s), [0, 1, 2]);
    }

    #[test]
    fn move_out_of_bounds_is_noop() {
        let s = stack(&["a", "b"]);
        assert_eq!(s.with_moved(0, 2), s);
        assert_eq!(s.with_moved(5, 0), s);
    }

    #[test]
    fn from_items_repairs_orders() {
        let s = LayerStack::from_items(vec![
            LayerStackItem::new("x").with_order(7),
            LayerStackItem::new("y").with_order(3),
        ]);
        assert_eq!(orders(&s), [0, 1]);
    }

    #[test]
    fn with_color_sets_single_override() {
        let blue = Color::from_rgb(0, 0, 255);
        let s = stack(&["a", "b"]).with_color("b", Some(blue));
        assert_eq!(s.get(0).unwrap().color, None);
        assert_eq!(s.get(1).unwrap().color, Some(blue));
    }

    #[test]
    fn deserialize_sorts_by_order_and_renumbers() {
        let s: LayerStack = serde_json::from_str(
            r#"[{"id":"top","order":4},{"id":"bottom","order":1},{"id":"mid","order":4}]"#,
        )
        .unwrap();
        assert_eq!(s.ids().collect::<Vec<_>>(), ["bottom", "top", "mid"]);
        assert_eq!(orders(&s), [0, 1, 2]);
        assert!(s.is_contiguous());
    }

    #[test]
    fn deserialize_missing_orders_keeps_sequence() {
        let s: LayerStack = serde_json::from_str(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(s.ids().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(orders(&s), [0, 1]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&stack(&["a"])).unwrap();
        assert_eq!(json, r#"[{"id":"a","order":0}]"#);
    }
}
