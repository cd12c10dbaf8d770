// Oscillator beeps on a lazily created AudioContext.
// Browsers refuse to start audio before a user gesture, so creation is retried
// on every call until it succeeds; `warm_up` is wired to the first pointerdown.
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::surface::{Tone, Waveform};

#[derive(Default)]
pub(crate) struct ToneSynth {
    ctx: Option<AudioContext>,
}

impl ToneSynth {
    pub(crate) fn warm_up(&mut self) {
        let _ = self.context();
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
        }
        self.ctx.as_ref()
    }

    /// Fire and forget: a blocked or broken audio stack is ignored.
    pub(crate) fn play(&mut self, tone: Tone) {
        if let Some(ac) = self.context() {
            let _ = beep(ac, tone);
        }
    }
}

fn oscillator_type(w: Waveform) -> OscillatorType {
    match w {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

fn beep(ac: &AudioContext, tone: Tone) -> Result<(), JsValue> {
    let osc = ac.create_oscillator()?;
    let gain = ac.create_gain()?;
    osc.set_type(oscillator_type(tone.waveform));
    osc.frequency().set_value(tone.freq_hz);
    gain.gain().set_value(tone.volume);

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ac.destination())?;

    let now = ac.current_time();
    let end = now + tone.duration_s;
    gain.gain().set_value_at_time(tone.volume, now)?;
    // exponential ramps cannot reach zero
    gain.gain().exponential_ramp_to_value_at_time(0.0001, end)?;
    osc.start_with_when(now)?;
    osc.stop_with_when(end)?;
    Ok(())
}
