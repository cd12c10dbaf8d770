//! Puzzle families shown during a hacker attack.

use crate::rng::{RandomSource, pick};

/// Scrambled / canonical pairs for the unscramble family.
pub const WORD_BANK: &[(&str, &str)] = &[("GITID", "DIGIT"), ("CYRBE", "CYBER"), ("MTAH", "MATH")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleFamily {
    Addition,
    Sequence,
    Unscramble,
}

impl PuzzleFamily {
    pub const ALL: [PuzzleFamily; 3] = [Self::Addition, Self::Sequence, Self::Unscramble];

    pub fn name(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Sequence => "sequence",
            Self::Unscramble => "unscramble",
        }
    }
}

/// Expected answer. Numbers compare numerically, words ignore case.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    Number(i64),
    Word(&'static str),
}

impl Answer {
    /// Compare an already trimmed, non-empty submission.
    pub fn matches(&self, input: &str) -> bool {
        match self {
            // "05" and "5.0" both count; anything unparsable is just wrong
            Answer::Number(n) => input.parse::<f64>().is_ok_and(|v| v == *n as f64),
            Answer::Word(w) => input.to_uppercase() == w.to_uppercase(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Puzzle {
    pub family: PuzzleFamily,
    pub prompt: String,
    pub answer: Answer,
    pub placeholder: &'static str,
}

impl Puzzle {
    pub fn addition(a: i64, b: i64) -> Self {
        Self {
            family: PuzzleFamily::Addition,
            prompt: format!("What is {a} + {b}?"),
            answer: Answer::Number(a + b),
            placeholder: "Enter a number",
        }
    }

    pub fn sequence(start: i64, step: i64) -> Self {
        Self {
            family: PuzzleFamily::Sequence,
            prompt: format!(
                "Continue the sequence: {}, {}, {}, ?",
                start,
                start + step,
                start + step * 2
            ),
            answer: Answer::Number(start + step * 3),
            placeholder: "Next number",
        }
    }

    pub fn unscramble(jumbled: &str, word: &'static str) -> Self {
        Self {
            family: PuzzleFamily::Unscramble,
            prompt: format!("Unscramble the word \"{jumbled}\""),
            answer: Answer::Word(word),
            placeholder: "Enter the word",
        }
    }
}

/// Draw one puzzle. First draw picks the family, the rest pick its operands.
pub fn generate(rng: &mut dyn RandomSource) -> Puzzle {
    match PuzzleFamily::ALL[pick(rng, PuzzleFamily::ALL.len())] {
        PuzzleFamily::Addition => {
            let a = pick(rng, 7) as i64 + 3;
            let b = pick(rng, 8) as i64 + 2;
            Puzzle::addition(a, b)
        }
        PuzzleFamily::Sequence => {
            let start = pick(rng, 9) as i64 + 4;
            let step = pick(rng, 4) as i64 + 2;
            Puzzle::sequence(start, step)
        }
        PuzzleFamily::Unscramble => {
            let (jumbled, word) = WORD_BANK[pick(rng, WORD_BANK.len())];
            Puzzle::unscramble(jumbled, word)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use crate::rng::tests::Scripted;

    #[test]
    fn addition_from_lowest_draws() {
        let mut r = Scripted::new(&[0.0, 0.0, 0.0]);
        let p = generate(&mut r);
        assert_eq!(p.family, PuzzleFamily::Addition);
        assert_eq!(p.prompt, "What is 3 + 2?");
        assert_eq!(p.answer, Answer::Number(5));
        assert_eq!(p.placeholder, "Enter a number");
    }

    #[test]
    fn sequence_fourth_term() {
        let p = Puzzle::sequence(4, 2);
        assert_eq!(p.prompt, "Continue the sequence: 4, 6, 8, ?");
        assert_eq!(p.answer, Answer::Number(10));

        // family draw in the middle third, start = 4, step = 2
        let mut r = Scripted::new(&[0.5, 0.0, 0.0]);
        assert_eq!(generate(&mut r), p);
    }

    #[test]
    fn unscramble_picks_from_word_bank() {
        let mut r = Scripted::new(&[0.9, 0.5]);
        let p = generate(&mut r);
        assert_eq!(p.prompt, "Unscramble the word \"CYRBE\"");
        assert_eq!(p.answer, Answer::Word("CYBER"));
        assert_eq!(p.placeholder, "Enter the word");
    }

    #[test]
    fn operands_stay_in_bounds() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..2000 {
            let p = generate(&mut rng);
            assert!(!p.prompt.is_empty());
            assert!(!p.placeholder.is_empty());
            match (p.family, &p.answer) {
                (PuzzleFamily::Addition, Answer::Number(n)) => assert!((5..=18).contains(n)),
                (PuzzleFamily::Sequence, Answer::Number(n)) => assert!((10..=27).contains(n)),
                (PuzzleFamily::Unscramble, Answer::Word(w)) => {
                    assert!(WORD_BANK.iter().any(|(_, c)| c == w));
                }
                (f, a) => panic!("family {f:?} produced mismatched answer {a:?}"),
            }
        }
    }

    #[test]
    fn every_family_is_reachable() {
        let mut rng = SeededRandom::new(99);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let f = generate(&mut rng).family;
            seen[PuzzleFamily::ALL.iter().position(|x| *x == f).unwrap()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn numeric_answers_coerce() {
        let a = Answer::Number(5);
        assert!(a.matches("5"));
        assert!(a.matches("05"));
        assert!(a.matches("5.0"));
        assert!(!a.matches("five"));
        assert!(!a.matches("6"));
        assert!(!a.matches("NaN"));
    }

    #[test]
    fn word_answers_ignore_case_only() {
        let a = Answer::Word("DIGIT");
        assert!(a.matches("digit"));
        assert!(a.matches("Digit"));
        assert!(a.matches("DIGIT"));
        assert!(!a.matches("DIGITS"));
        assert!(!a.matches("DIG IT"));
    }
}
