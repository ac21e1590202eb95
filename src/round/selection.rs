//! Word and carrier phrase selection

use crate::round::GuessedSet;
use crate::words::WordPool;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a random entry that has not been guessed yet
///
/// Every remaining entry is equally likely. The caller must check for
/// completion first: calling this on an exhausted pool panics.
pub fn pick_next<R: Rng + ?Sized>(pool: &WordPool, guessed: &GuessedSet, rng: &mut R) -> usize {
    let remaining: Vec<usize> = (0..pool.len())
        .filter(|index| !guessed.contains(*index))
        .collect();

    assert!(
        !remaining.is_empty(),
        "pick_next called with every word already guessed"
    );
    remaining[rng.gen_range(0..remaining.len())]
}

/// Choose the phrase that introduces the word
pub fn choose_carrier<'t, R: Rng + ?Sized>(
    templates: &'t [String],
    rng: &mut R,
) -> Option<&'t str> {
    templates.choose(rng).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(words: &[&str]) -> WordPool {
        let entries = words
            .iter()
            .filter_map(|w| WordEntry::new([*w]))
            .collect();
        WordPool::new("test", entries).unwrap()
    }

    #[test]
    fn test_never_picks_guessed_entries() {
        let pool = pool(&["one", "two", "three", "four"]);
        let mut guessed = GuessedSet::new();
        guessed.insert(0);
        guessed.insert(2);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let pick = pick_next(&pool, &guessed, &mut rng);
            assert!(pick == 1 || pick == 3);
        }
    }

    #[test]
    fn test_last_remaining_entry_is_forced() {
        let pool = pool(&["cat", "dog"]);
        let mut guessed = GuessedSet::new();
        guessed.insert(0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_next(&pool, &guessed, &mut rng), 1);
    }

    #[test]
    fn test_every_remaining_entry_gets_picked() {
        let pool = pool(&["a", "b", "c"]);
        let guessed = GuessedSet::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[pick_next(&pool, &guessed, &mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    #[should_panic(expected = "already guessed")]
    fn test_exhausted_pool_panics() {
        let pool = pool(&["cat"]);
        let mut guessed = GuessedSet::new();
        guessed.insert(0);
        pick_next(&pool, &guessed, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn test_choose_carrier() {
        let templates = vec!["Spell".to_string(), "Your word is".to_string()];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let carrier = choose_carrier(&templates, &mut rng).unwrap();
            assert!(templates.iter().any(|t| t == carrier));
        }
        assert_eq!(choose_carrier(&[], &mut rng), None);
    }
}
