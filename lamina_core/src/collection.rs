// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered-sequence operations shared by containers, selections and the
//! canvas stack.
//!
//! Sequences hold raw slot indices in back-to-front order: index 0 is drawn
//! first. Every mutating function returns whether the sequence changed.

/// Position of `item` in `items`.
#[must_use]
pub fn index_of(items: &[u32], item: u32) -> Option<usize> {
    items.iter().position(|&i| i == item)
}

/// Inserts `item` at `index`, clamped to the end of the sequence.
pub fn insert_at(items: &mut Vec<u32>, index: usize, item: u32) -> bool {
    let index = index.min(items.len());
    items.insert(index, item);
    true
}

/// Removes `item`.
pub fn remove(items: &mut Vec<u32>, item: u32) -> bool {
    match index_of(items, item) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

/// Moves `item` to the top of the stack.
pub fn bring_to_front(items: &mut Vec<u32>, item: u32) -> bool {
    let last = items.len().saturating_sub(1);
    move_to(items, item, last)
}

/// Moves `item` to the bottom of the stack.
pub fn send_to_back(items: &mut Vec<u32>, item: u32) -> bool {
    move_to(items, item, 0)
}

/// Moves `item` one step towards the top.
pub fn bring_forward(items: &mut Vec<u32>, item: u32) -> bool {
    match index_of(items, item) {
        Some(index) if index + 1 < items.len() => {
            items.swap(index, index + 1);
            true
        }
        _ => false,
    }
}

/// Moves `item` one step towards the bottom.
pub fn send_backwards(items: &mut Vec<u32>, item: u32) -> bool {
    match index_of(items, item) {
        Some(index) if index > 0 => {
            items.swap(index, index - 1);
            true
        }
        _ => false,
    }
}

/// Moves `item` to `index`, clamped to the last position.
pub fn move_to(items: &mut Vec<u32>, item: u32, index: usize) -> bool {
    let Some(from) = index_of(items, item) else {
        return false;
    };
    let to = index.min(items.len() - 1);
    if from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_clamps_to_end() {
        let mut items = vec![1, 2];
        insert_at(&mut items, 10, 3);
        insert_at(&mut items, 0, 0);
        assert_eq!(items, [0, 1, 2, 3]);
    }

    #[test]
    fn front_and_back() {
        let mut items = vec![1, 2, 3];
        assert!(bring_to_front(&mut items, 1));
        assert_eq!(items, [2, 3, 1]);
        assert!(!bring_to_front(&mut items, 1));
        assert!(send_to_back(&mut items, 1));
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn single_steps_stop_at_edges() {
        let mut items = vec![1, 2, 3];
        assert!(!send_backwards(&mut items, 1));
        assert!(!bring_forward(&mut items, 3));
        assert!(bring_forward(&mut items, 1));
        assert_eq!(items, [2, 1, 3]);
        assert!(send_backwards(&mut items, 3));
        assert_eq!(items, [2, 3, 1]);
    }

    #[test]
    fn missing_items_are_ignored() {
        let mut items = vec![1, 2];
        assert!(!remove(&mut items, 7));
        assert!(!move_to(&mut items, 7, 0));
        assert!(remove(&mut items, 1));
        assert_eq!(items, [2]);
    }
}
