// Copyright (c) 2024 Mike Tsao

use super::Rng;

const MOODS: &[&str] = &[
    "Groovy", "Mellow", "Stormy", "Velvet", "Lucky", "Sleepy", "Neon", "Dusty", "Brassy", "Cosmic",
    "Wobbly", "Sunny",
];

const PIECES: &[&str] = &[
    "Groove", "Jam", "Etude", "Riff", "Loop", "Ballad", "Anthem", "Shuffle", "Waltz", "Demo",
    "Sketch",
];

/// Makes up a two-word name for a new file, such as "Velvet Shuffle".
pub fn new_file_name(rng: &mut Rng) -> String {
    let mood = rng.choose(MOODS).copied().unwrap_or("Untitled");
    let piece = rng.choose(PIECES).copied().unwrap_or("Piece");
    format!("{mood} {piece}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_two_known_words() {
        let mut rng = Rng::new_with_seed(42);
        for _ in 0..20 {
            let name = new_file_name(&mut rng);
            let (mood, piece) = name.split_once(' ').unwrap();
            assert!(MOODS.contains(&mood), "unexpected first word in {name}");
            assert!(PIECES.contains(&piece), "unexpected second word in {name}");
        }
    }

    #[test]
    fn same_seed_same_name() {
        assert_eq!(
            new_file_name(&mut Rng::new_with_seed(3)),
            new_file_name(&mut Rng::new_with_seed(3))
        );
    }
}
