//! Character ordering helpers.
//!
//! Each function borrows the input and returns a new, sorted list of
//! references; the input order is left untouched.

use std::cmp::Ordering;

use crate::entities::Character;

/// Strongest first, via quicksort. Equal strengths keep their input order.
pub fn sort_by_strength(characters: &[Character]) -> Vec<&Character> {
    let mut indexed: Vec<(usize, &Character)> = characters.iter().enumerate().collect();
    if !indexed.is_empty() {
        let high = indexed.len() - 1;
        quick_sort_by_strength(&mut indexed, 0, high);
    }
    indexed.into_iter().map(|(_, character)| character).collect()
}

type Ranked<'a> = (usize, &'a Character);

/// Descending strength, then ascending input position. No two entries tie.
fn strength_order(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    b.1.strength()
        .total_cmp(&a.1.strength())
        .then(a.0.cmp(&b.0))
}

fn quick_sort_by_strength(list: &mut [Ranked<'_>], low: usize, high: usize) {
    if low >= high {
        return;
    }
    let pivot = partition_by_strength(list, low, high);
    if pivot > low {
        quick_sort_by_strength(list, low, pivot - 1);
    }
    quick_sort_by_strength(list, pivot + 1, high);
}

/// Lomuto partition.
fn partition_by_strength(list: &mut [Ranked<'_>], low: usize, high: usize) -> usize {
    let pivot = list[high];
    let mut store = low;
    for j in low..high {
        if strength_order(&list[j], &pivot) == Ordering::Less {
            list.swap(store, j);
            store += 1;
        }
    }
    list.swap(store, high);
    store
}

/// Youngest first, via bubble sort.
pub fn sort_by_age(characters: &[Character]) -> Vec<&Character> {
    let mut sorted: Vec<&Character> = characters.iter().collect();
    let n = sorted.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if sorted[j].age() > sorted[j + 1].age() {
                sorted.swap(j, j + 1);
            }
        }
    }
    sorted
}

/// Healthiest first.
pub fn sort_by_health(characters: &[Character]) -> Vec<&Character> {
    let mut sorted: Vec<&Character> = characters.iter().collect();
    sorted.sort_by(|a, b| b.health().total_cmp(&a.health()));
    sorted
}

/// Alphabetical, via insertion sort.
pub fn sort_by_name(characters: &[Character]) -> Vec<&Character> {
    let mut sorted: Vec<&Character> = characters.iter().collect();
    for i in 1..sorted.len() {
        let key = sorted[i];
        let mut j = i;
        while j > 0 && sorted[j - 1].name() > key.name() {
            sorted[j] = sorted[j - 1];
            j -= 1;
        }
        sorted[j] = key;
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterKind, Sex};

    fn roster() -> Vec<Character> {
        [("Marcus", 0.9, 40), ("Aelia", 0.5, 25), ("Tara", 0.95, 61), ("Gwen", 0.8, 18)]
            .into_iter()
            .map(|(name, strength, age)| {
                Character::new(CharacterKind::Merchant, name, Sex::Female, 1.7, age, strength)
            })
            .collect()
    }

    fn names(sorted: &[&Character]) -> Vec<String> {
        sorted.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_sort_by_strength_descending() {
        let characters = roster();
        let sorted = sort_by_strength(&characters);
        let strengths: Vec<f64> = sorted.iter().map(|c| c.strength()).collect();
        assert_eq!(strengths, vec![0.95, 0.9, 0.8, 0.5]);

        let mut reference: Vec<&Character> = characters.iter().collect();
        reference.sort_by(|a, b| b.strength().total_cmp(&a.strength()));
        assert_eq!(names(&sorted), names(&reference));
    }

    #[test]
    fn test_sort_by_strength_keeps_ties_in_order() {
        let characters: Vec<Character> =
            [("L1", 0.3), ("L2", 0.3), ("Tara", 0.9), ("Brenna", 0.95), ("Aelia", 0.5)]
                .into_iter()
                .map(|(name, strength)| {
                    Character::new(CharacterKind::Legionary, name, Sex::Male, 1.8, 30, strength)
                })
                .collect();
        let sorted = sort_by_strength(&characters);
        assert_eq!(names(&sorted), vec!["Brenna", "Tara", "Aelia", "L1", "L2"]);

        let mut reference: Vec<&Character> = characters.iter().collect();
        reference.sort_by(|a, b| b.strength().total_cmp(&a.strength()));
        assert_eq!(names(&sorted), names(&reference));
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let characters = roster();
        let sorted = sort_by_name(&characters);
        assert_eq!(names(&sorted), vec!["Aelia", "Gwen", "Marcus", "Tara"]);

        let mut reference: Vec<&Character> = characters.iter().collect();
        reference.sort_by(|a, b| a.name().cmp(b.name()));
        assert_eq!(names(&sorted), names(&reference));
    }

    #[test]
    fn test_sort_by_age_ascending() {
        let characters = roster();
        let ages: Vec<u32> = sort_by_age(&characters).iter().map(|c| c.age()).collect();
        assert_eq!(ages, vec![18, 25, 40, 61]);
    }

    #[test]
    fn test_sort_by_health_descending() {
        let mut characters = roster();
        characters[0].take_damage(40.0);
        characters[2].take_damage(10.0);
        let health: Vec<f64> = sort_by_health(&characters)
            .iter()
            .map(|c| c.health())
            .collect();
        assert_eq!(health, vec![100.0, 100.0, 90.0, 60.0]);
    }

    #[test]
    fn test_input_untouched_and_empty_input() {
        let characters = roster();
        sort_by_strength(&characters);
        assert_eq!(characters[0].name(), "Marcus");
        assert!(sort_by_strength(&[]).is_empty());
        assert!(sort_by_age(&[]).is_empty());
        assert!(sort_by_name(&[]).is_empty());
    }
}
