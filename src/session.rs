//! One running game: attack controller, timers, narration and sound flag,
//! bound to a presentation surface.
//!
//! All entry points run to completion before returning, which is the only
//! ordering guarantee the page gives us. The render loop is not part of the
//! session.

use crate::attack::{AttackController, Signal, Submission};
use crate::config::GameConfig;
use crate::log::console_log;
use crate::rng::{RandomSource, pick};
use crate::schedule::{AmbushPolicy, Task, TaskQueue};
use crate::surface::{self, PresentationSurface, Tone};
use crate::{MISSION_LINES, SPEECH_LINES};

/// What started an attack, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSource {
    Mission,
    Ambush,
}

pub struct Session<S: PresentationSurface> {
    controller: AttackController,
    queue: TaskQueue,
    ambush: AmbushPolicy,
    rng: Box<dyn RandomSource>,
    surface: S,
    sound_enabled: bool,
    flash_ms: f64,
    toast_ms: f64,
    signals: Vec<Signal>,
}

impl<S: PresentationSurface> Session<S> {
    /// Build a session whose clock starts at `now_ms` and arm the periodic
    /// timers (ambush, speech rotation, mission rotation).
    pub fn new(config: &GameConfig, rng: Box<dyn RandomSource>, surface: S, now_ms: f64) -> Self {
        let ambush = config.ambush_policy();
        let mut queue = TaskQueue::new(now_ms);
        queue.every(config.mission_interval_ms, Task::CycleMission);
        queue.every(config.speech_interval_ms, Task::RotateSpeech);
        queue.every(ambush.interval_ms, Task::AmbushTick);
        let mut session = Self {
            controller: AttackController::new(),
            queue,
            ambush,
            rng,
            surface,
            sound_enabled: config.sound_enabled,
            flash_ms: config.success_flash_ms,
            toast_ms: config.toast_ms,
            signals: Vec::new(),
        };
        session.surface.set_sound_indicator(session.sound_enabled);
        session
    }

    pub fn controller(&self) -> &AttackController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn now(&self) -> f64 {
        self.queue.now()
    }

    /// Launch button: fresh mission banner and speech, then an attack unless
    /// one is already running.
    pub fn launch_mission(&mut self) {
        self.cycle_mission();
        self.rotate_speech();
        self.trigger(TriggerSource::Mission);
        self.play(surface::LAUNCH_LOW);
        self.queue.after(110.0, Task::PlayTone(surface::LAUNCH_HIGH));
    }

    pub fn submit_answer(&mut self, raw: &str) -> Submission {
        let result = self.controller.submit_answer(raw, &mut self.signals);
        match result {
            Submission::Accepted => console_log!("attack repelled"),
            Submission::Rejected => console_log!("answer {:?} rejected", raw.trim()),
            Submission::Empty | Submission::Ignored => {}
        }
        self.flush();
        result
    }

    /// Run every task due up to `now_ms`, in due order.
    pub fn advance_to(&mut self, now_ms: f64) {
        while let Some(task) = self.queue.pop_due(now_ms) {
            self.run(task);
        }
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        self.surface.set_sound_indicator(self.sound_enabled);
        self.play(surface::SOUND_ON);
    }

    pub fn mascot_hover(&mut self) {
        self.surface.set_mascot_hovered(true);
        self.rotate_speech();
        self.play(surface::MASCOT_HOVER);
    }

    pub fn mascot_leave(&mut self) {
        self.surface.set_mascot_hovered(false);
    }

    pub fn mascot_click(&mut self) {
        self.rotate_speech();
        self.play(surface::MASCOT_CLICK);
    }

    /// Pointer over a mission card: Digit reads the card's mission out.
    pub fn mission_card_hover(&mut self, mission: &str) {
        self.surface.narrate(&format!("Digit says: {mission}"));
        self.play(surface::MISSION_CARD);
    }

    /// Pointer over a map zone: show its blurb.
    pub fn zone_hover(&mut self, info: &str) {
        self.surface.set_zone_info(info);
        self.play(surface::ZONE);
    }

    fn trigger(&mut self, source: TriggerSource) -> bool {
        let started = self.controller.trigger_attack(self.rng.as_mut(), &mut self.signals);
        if started {
            if let Some(p) = self.controller.active_puzzle() {
                console_log!("hacker attack ({source:?}): {} puzzle", p.family.name());
            }
        }
        self.flush();
        started
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::AmbushTick => {
                if self.ambush.should_fire(self.controller.is_under_attack(), self.rng.as_mut()) {
                    self.trigger(TriggerSource::Ambush);
                } else if !self.controller.is_under_attack() {
                    console_log!("ambush tick skipped");
                }
            }
            Task::RotateSpeech => self.rotate_speech(),
            Task::CycleMission => self.cycle_mission(),
            Task::PlayTone(tone) => self.play(tone),
            Task::EndSuccessFlash => self.surface.end_success_flash(),
            Task::HideToast => self.surface.hide_toast(),
        }
    }

    fn rotate_speech(&mut self) {
        let line = SPEECH_LINES[pick(self.rng.as_mut(), SPEECH_LINES.len())];
        self.surface.narrate(line);
    }

    fn cycle_mission(&mut self) {
        let line = MISSION_LINES[pick(self.rng.as_mut(), MISSION_LINES.len())];
        self.surface.set_mission_alert(line);
    }

    fn play(&mut self, tone: Tone) {
        if self.sound_enabled {
            self.surface.play_tone(tone);
        }
    }

    /// Hand pending controller signals to the surface; delayed tones and
    /// timed clears go through the queue.
    fn flush(&mut self) {
        for signal in std::mem::take(&mut self.signals) {
            match signal {
                Signal::ShowAttackUi { prompt, placeholder } => {
                    self.surface.show_attack_ui(&prompt, placeholder);
                }
                Signal::HideAttackUi => self.surface.hide_attack_ui(),
                Signal::Status(msg) => self.surface.report_status(msg),
                Signal::MissionAlert(line) => self.surface.set_mission_alert(line),
                Signal::Narrate(line) => self.surface.narrate(line),
                Signal::Tone { delay_ms, tone } if delay_ms <= 0.0 => self.play(tone),
                Signal::Tone { delay_ms, tone } => self.queue.after(delay_ms, Task::PlayTone(tone)),
                Signal::FlashSuccess => {
                    self.surface.flash_success();
                    self.queue.after(self.flash_ms, Task::EndSuccessFlash);
                }
                Signal::Toast(msg) => {
                    self.surface.show_toast(msg);
                    self.queue.after(self.toast_ms, Task::HideToast);
                }
            }
        }
    }
}
