//! Hacker-attack state machine.
//!
//! The controller is the only owner of the active puzzle. It never talks to the
//! page directly: each transition appends [`Signal`]s that the session turns into
//! surface calls and delayed tones, so the machine runs the same with or
//! without a page attached.

use crate::puzzle::{self, Puzzle};
use crate::rng::RandomSource;
use crate::surface::{self, Tone};

pub const STATUS_SOLVE: &str = "Solve the puzzle to stop the attack!";
pub const STATUS_EMPTY: &str = "Enter an answer to defend the system.";
pub const STATUS_WRONG: &str = "Incorrect! Try again.";
pub const ALERT_BREACH: &str = "HACKER ATTACK: Firewall breached!";
pub const SAY_ALERT: &str = "Alert! Solve the puzzle quickly!";
pub const SAY_REPELLED: &str = "Great job! Attack repelled!";
pub const TOAST_DEFENDED: &str = "System defended! Firewall back online.";

/// Presentation request produced by a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    ShowAttackUi { prompt: String, placeholder: &'static str },
    HideAttackUi,
    Status(&'static str),
    MissionAlert(&'static str),
    Narrate(&'static str),
    /// Tone to play `delay_ms` after the transition.
    Tone { delay_ms: f64, tone: Tone },
    FlashSuccess,
    Toast(&'static str),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum AttackState {
    #[default]
    Idle,
    UnderAttack(Puzzle),
}

/// Result of one answer submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// No attack in progress; nothing happened.
    Ignored,
    /// Blank input; state unchanged.
    Empty,
    Rejected,
    Accepted,
}

#[derive(Debug, Default)]
pub struct AttackController {
    state: AttackState,
}

impl AttackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AttackState {
        &self.state
    }

    pub fn is_under_attack(&self) -> bool {
        matches!(self.state, AttackState::UnderAttack(_))
    }

    pub fn active_puzzle(&self) -> Option<&Puzzle> {
        match &self.state {
            AttackState::UnderAttack(p) => Some(p),
            AttackState::Idle => None,
        }
    }

    /// Start an attack with a fresh puzzle. Returns `false` and emits nothing
    /// while one is already running.
    pub fn trigger_attack(&mut self, rng: &mut dyn RandomSource, out: &mut Vec<Signal>) -> bool {
        if self.is_under_attack() {
            return false;
        }
        let puzzle = puzzle::generate(rng);
        out.push(Signal::ShowAttackUi {
            prompt: puzzle.prompt.clone(),
            placeholder: puzzle.placeholder,
        });
        out.push(Signal::Status(STATUS_SOLVE));
        out.push(Signal::Narrate(SAY_ALERT));
        out.push(Signal::MissionAlert(ALERT_BREACH));
        out.push(Signal::Tone { delay_ms: 0.0, tone: surface::ALARM_HIGH });
        out.push(Signal::Tone { delay_ms: 120.0, tone: surface::ALARM_LOW });
        self.state = AttackState::UnderAttack(puzzle);
        true
    }

    pub fn submit_answer(&mut self, raw: &str, out: &mut Vec<Signal>) -> Submission {
        let AttackState::UnderAttack(puzzle) = &self.state else {
            return Submission::Ignored;
        };
        let input = raw.trim();
        if input.is_empty() {
            out.push(Signal::Status(STATUS_EMPTY));
            return Submission::Empty;
        }
        if !puzzle.answer.matches(input) {
            out.push(Signal::Status(STATUS_WRONG));
            out.push(Signal::Tone { delay_ms: 0.0, tone: surface::BUZZER });
            return Submission::Rejected;
        }

        self.state = AttackState::Idle;
        out.push(Signal::HideAttackUi);
        out.push(Signal::FlashSuccess);
        out.push(Signal::Toast(TOAST_DEFENDED));
        out.push(Signal::Status(""));
        out.push(Signal::Narrate(SAY_REPELLED));
        out.push(Signal::Tone { delay_ms: 0.0, tone: surface::CONFIRM_LOW });
        out.push(Signal::Tone { delay_ms: 90.0, tone: surface::CONFIRM_HIGH });
        Submission::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Answer;
    use crate::rng::tests::Scripted;

    fn attacked_with(draws: &[f64]) -> AttackController {
        let mut c = AttackController::new();
        let mut out = Vec::new();
        assert!(c.trigger_attack(&mut Scripted::new(draws), &mut out));
        c
    }

    fn tones(signals: &[Signal]) -> Vec<(f64, f32)> {
        signals
            .iter()
            .filter_map(|s| match s {
                Signal::Tone { delay_ms, tone } => Some((*delay_ms, tone.freq_hz)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_idle() {
        let c = AttackController::new();
        assert_eq!(c.state(), &AttackState::Idle);
        assert!(c.active_puzzle().is_none());
    }

    #[test]
    fn trigger_shows_overlay_and_staggers_alarm() {
        let mut c = AttackController::new();
        let mut out = Vec::new();
        assert!(c.trigger_attack(&mut Scripted::new(&[0.0]), &mut out));
        assert!(c.is_under_attack());
        assert_eq!(
            out[0],
            Signal::ShowAttackUi { prompt: "What is 3 + 2?".into(), placeholder: "Enter a number" }
        );
        assert!(out.contains(&Signal::Narrate(SAY_ALERT)));
        assert!(out.contains(&Signal::MissionAlert(ALERT_BREACH)));
        assert_eq!(tones(&out), vec![(0.0, 170.0), (120.0, 130.0)]);
    }

    #[test]
    fn second_trigger_keeps_puzzle() {
        let mut c = attacked_with(&[0.0]);
        let before = c.active_puzzle().cloned();
        let mut out = Vec::new();
        assert!(!c.trigger_attack(&mut Scripted::new(&[0.9, 0.0]), &mut out));
        assert!(out.is_empty());
        assert_eq!(c.active_puzzle().cloned(), before);
    }

    #[test]
    fn submit_while_idle_is_ignored() {
        let mut c = AttackController::new();
        let mut out = Vec::new();
        assert_eq!(c.submit_answer("5", &mut out), Submission::Ignored);
        assert!(out.is_empty());
    }

    #[test]
    fn blank_submission_reports_and_keeps_state() {
        let mut c = attacked_with(&[0.0]);
        let mut out = Vec::new();
        assert_eq!(c.submit_answer("   \t", &mut out), Submission::Empty);
        assert_eq!(out, vec![Signal::Status(STATUS_EMPTY)]);
        assert!(c.is_under_attack());
    }

    #[test]
    fn numeric_submissions() {
        for good in ["5", "05", " 5 "] {
            let mut c = attacked_with(&[0.0]);
            assert_eq!(c.submit_answer(good, &mut Vec::new()), Submission::Accepted);
            assert_eq!(c.state(), &AttackState::Idle);
        }
        let mut c = attacked_with(&[0.0]);
        let mut out = Vec::new();
        assert_eq!(c.submit_answer("five", &mut out), Submission::Rejected);
        assert!(c.is_under_attack());
        assert_eq!(tones(&out), vec![(0.0, 250.0)]);
    }

    #[test]
    fn word_submissions_ignore_case() {
        // unscramble family, first word (DIGIT)
        for good in ["digit", "Digit", "DIGIT"] {
            let mut c = attacked_with(&[0.9, 0.0]);
            assert_eq!(c.active_puzzle().map(|p| &p.answer), Some(&Answer::Word("DIGIT")));
            assert_eq!(c.submit_answer(good, &mut Vec::new()), Submission::Accepted);
        }
        let mut c = attacked_with(&[0.9, 0.0]);
        assert_eq!(c.submit_answer("DIGITS", &mut Vec::new()), Submission::Rejected);
    }

    #[test]
    fn retries_are_unlimited_and_puzzle_persists() {
        let mut c = attacked_with(&[0.0]);
        let held = c.active_puzzle().cloned();
        for _ in 0..25 {
            assert_eq!(c.submit_answer("4", &mut Vec::new()), Submission::Rejected);
            assert_eq!(c.active_puzzle().cloned(), held);
        }
        assert_eq!(c.submit_answer("5", &mut Vec::new()), Submission::Accepted);
    }

    #[test]
    fn resolution_hides_ui_and_plays_ascending_pair() {
        let mut c = attacked_with(&[0.0]);
        let mut out = Vec::new();
        c.submit_answer("5", &mut out);
        assert_eq!(out[0], Signal::HideAttackUi);
        assert!(out.contains(&Signal::FlashSuccess));
        assert!(out.contains(&Signal::Toast(TOAST_DEFENDED)));
        assert!(out.contains(&Signal::Narrate(SAY_REPELLED)));
        assert_eq!(tones(&out), vec![(0.0, 680.0), (90.0, 980.0)]);
        assert!(c.active_puzzle().is_none());
    }

    #[test]
    fn new_attack_after_resolution_gets_new_puzzle() {
        let mut c = attacked_with(&[0.0]);
        c.submit_answer("5", &mut Vec::new());
        let mut out = Vec::new();
        assert!(c.trigger_attack(&mut Scripted::new(&[0.5, 0.0, 0.0]), &mut out));
        assert_eq!(c.active_puzzle().map(|p| &p.answer), Some(&Answer::Number(10)));
    }
}
