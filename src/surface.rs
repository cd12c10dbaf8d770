//! Presentation surface: everything the game shows or plays goes through here.

/// Oscillator shape for a synthesized tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One short synthesized beep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_s: f64,
    pub waveform: Waveform,
    pub volume: f32,
}

impl Tone {
    pub const fn new(freq_hz: f32, duration_s: f64, waveform: Waveform, volume: f32) -> Self {
        Self { freq_hz, duration_s, waveform, volume }
    }
}

// Cue table
pub const ALARM_HIGH: Tone = Tone::new(170.0, 0.24, Waveform::Sawtooth, 0.05);
pub const ALARM_LOW: Tone = Tone::new(130.0, 0.2, Waveform::Square, 0.04);
pub const CONFIRM_LOW: Tone = Tone::new(680.0, 0.09, Waveform::Triangle, 0.03);
pub const CONFIRM_HIGH: Tone = Tone::new(980.0, 0.1, Waveform::Triangle, 0.03);
pub const BUZZER: Tone = Tone::new(250.0, 0.1, Waveform::Sawtooth, 0.04);
pub const LAUNCH_LOW: Tone = Tone::new(720.0, 0.1, Waveform::Square, 0.033);
pub const LAUNCH_HIGH: Tone = Tone::new(960.0, 0.09, Waveform::Triangle, 0.03);
pub const SOUND_ON: Tone = Tone::new(520.0, 0.06, Waveform::Triangle, 0.028);
pub const MASCOT_HOVER: Tone = Tone::new(660.0, 0.1, Waveform::Square, 0.03);
pub const MASCOT_CLICK: Tone = Tone::new(760.0, 0.11, Waveform::Triangle, 0.036);
pub const MISSION_CARD: Tone = Tone::new(490.0, 0.08, Waveform::Triangle, 0.03);
pub const ZONE: Tone = Tone::new(570.0, 0.07, Waveform::Triangle, 0.028);

/// Output side of the game. Implementations must tolerate any call at any
/// time; a missing element or muted audio is a silent no-op.
pub trait PresentationSurface {
    /// Open the puzzle overlay and raise alarm indicators.
    fn show_attack_ui(&mut self, prompt: &str, placeholder: &str);
    /// Close the overlay and drop all alarm indicators.
    fn hide_attack_ui(&mut self);
    fn report_status(&mut self, message: &str);
    fn play_tone(&mut self, tone: Tone);
    fn flash_success(&mut self);
    fn end_success_flash(&mut self);
    fn show_toast(&mut self, message: &str);
    fn hide_toast(&mut self);
    /// Mascot speech bubble.
    fn narrate(&mut self, line: &str);
    /// Mission banner above the grid.
    fn set_mission_alert(&mut self, line: &str);
    fn set_sound_indicator(&mut self, enabled: bool);
    /// Caption under the cyber map.
    fn set_zone_info(&mut self, info: &str);
    fn set_mascot_hovered(&mut self, hovered: bool);
}

/// Surface that drops everything. Useful when no page is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl PresentationSurface for NullSurface {
    fn show_attack_ui(&mut self, _prompt: &str, _placeholder: &str) {}
    fn hide_attack_ui(&mut self) {}
    fn report_status(&mut self, _message: &str) {}
    fn play_tone(&mut self, _tone: Tone) {}
    fn flash_success(&mut self) {}
    fn end_success_flash(&mut self) {}
    fn show_toast(&mut self, _message: &str) {}
    fn hide_toast(&mut self) {}
    fn narrate(&mut self, _line: &str) {}
    fn set_mission_alert(&mut self, _line: &str) {}
    fn set_sound_indicator(&mut self, _enabled: bool) {}
    fn set_zone_info(&mut self, _info: &str) {}
    fn set_mascot_hovered(&mut self, _hovered: bool) {}
}
