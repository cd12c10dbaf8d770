// Presentation surface backed by the page's elements.
// Every element is looked up once and kept as an Option: a page that lacks one
// simply loses that piece of feedback.
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::audio::ToneSynth;
use crate::surface::{PresentationSurface, Tone};

pub struct DomSurface {
    body: Option<Element>,
    modal: Option<Element>,
    prompt: Option<Element>,
    input: Option<HtmlInputElement>,
    status: Option<Element>,
    alarm_overlay: Option<Element>,
    hacker_alert: Option<Element>,
    success_flash: Option<HtmlElement>,
    toast: Option<Element>,
    speech: Option<Element>,
    mission: Option<Element>,
    mute_toggle: Option<Element>,
    zone_info: Option<Element>,
    mascot: Option<Element>,
    synth: ToneSynth,
}

fn set_class(el: &Option<Element>, class: &str, on: bool) {
    if let Some(el) = el {
        let list = el.class_list();
        let _ = if on { list.add_1(class) } else { list.remove_1(class) };
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

impl DomSurface {
    pub fn from_document(doc: &Document) -> Self {
        let by_id = |id: &str| doc.get_element_by_id(id);
        Self {
            body: doc.body().map(Element::from),
            modal: by_id("puzzleModal"),
            prompt: by_id("puzzlePrompt"),
            input: by_id("puzzleInput").and_then(|e| e.dyn_into().ok()),
            status: by_id("puzzleStatus"),
            alarm_overlay: by_id("alarmOverlay"),
            hacker_alert: by_id("hackerAlert"),
            success_flash: by_id("successFlash").and_then(|e| e.dyn_into().ok()),
            toast: by_id("defenseToast"),
            speech: by_id("speechText"),
            mission: by_id("missionAlert"),
            mute_toggle: by_id("muteToggle"),
            zone_info: by_id("zoneInfo"),
            mascot: by_id("digitCharacter"),
            synth: ToneSynth::default(),
        }
    }

    /// Current contents of the answer box, empty when there is none.
    pub fn answer_text(&self) -> String {
        self.input.as_ref().map(|i| i.value()).unwrap_or_default()
    }

    pub fn warm_up_audio(&mut self) {
        self.synth.warm_up();
    }

    fn flash_element(&self) -> Option<Element> {
        self.success_flash.clone().map(Element::from)
    }
}

impl PresentationSurface for DomSurface {
    fn show_attack_ui(&mut self, prompt: &str, placeholder: &str) {
        set_class(&self.hacker_alert, "hidden", false);
        set_class(&self.hacker_alert, "visible", true);
        set_class(&self.body, "alarm-active", true);
        set_class(&self.alarm_overlay, "active", true);
        set_class(&self.modal, "active", true);
        set_text(&self.prompt, prompt);
        if let Some(input) = &self.input {
            input.set_placeholder(placeholder);
            input.set_value("");
            let _ = input.focus();
        }
    }

    fn hide_attack_ui(&mut self) {
        set_class(&self.modal, "active", false);
        set_class(&self.alarm_overlay, "active", false);
        set_class(&self.body, "alarm-active", false);
        set_class(&self.hacker_alert, "visible", false);
        set_class(&self.hacker_alert, "hidden", true);
    }

    fn report_status(&mut self, message: &str) {
        set_text(&self.status, message);
    }

    fn play_tone(&mut self, tone: Tone) {
        self.synth.play(tone);
    }

    fn flash_success(&mut self) {
        let flash = self.flash_element();
        set_class(&flash, "active", false);
        // reading layout restarts the CSS animation
        if let Some(el) = &self.success_flash {
            let _ = el.offset_width();
        }
        set_class(&flash, "active", true);
    }

    fn end_success_flash(&mut self) {
        set_class(&self.flash_element(), "active", false);
    }

    fn show_toast(&mut self, message: &str) {
        set_text(&self.toast, message);
        set_class(&self.toast, "show", true);
    }

    fn hide_toast(&mut self) {
        set_class(&self.toast, "show", false);
    }

    fn narrate(&mut self, line: &str) {
        set_text(&self.speech, line);
    }

    fn set_mission_alert(&mut self, line: &str) {
        set_text(&self.mission, line);
    }

    fn set_sound_indicator(&mut self, enabled: bool) {
        set_text(&self.mute_toggle, if enabled { "🔊" } else { "🔈" });
    }

    fn set_zone_info(&mut self, info: &str) {
        set_text(&self.zone_info, info);
    }

    fn set_mascot_hovered(&mut self, hovered: bool) {
        set_class(&self.mascot, "hovered", hovered);
    }
}
