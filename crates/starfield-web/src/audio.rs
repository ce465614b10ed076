//! Keystroke click synthesis: a lazily-created AudioContext and one short
//! square-wave percussive envelope per trigger.

use web_sys as web;

use starfield_core::KeyClick;

use crate::constants::*;

pub struct KeyClickSynth {
    context: Option<web::AudioContext>,
}

impl KeyClickSynth {
    pub fn new() -> Self {
        Self { context: None }
    }

    /// The context is created on first use and resumed whenever the browser
    /// has suspended it. `None` means no audio support; callers degrade to
    /// a no-op.
    fn ensure_context(&mut self) -> Option<&web::AudioContext> {
        if self.context.is_none() {
            match web::AudioContext::new() {
                Ok(context) => self.context = Some(context),
                Err(e) => {
                    log::warn!("[fx] AudioContext unavailable: {e:?}");
                    return None;
                }
            }
        }
        let context = self.context.as_ref()?;
        if context.state() == web::AudioContextState::Suspended {
            let _ = context.resume();
        }
        Some(context)
    }

    /// square osc -> highpass -> gain envelope -> destination
    pub fn trigger(&mut self, click: KeyClick) {
        let Some(context) = self.ensure_context() else {
            return;
        };
        let now = context.current_time();

        let Ok(osc) = web::OscillatorNode::new(context) else {
            return;
        };
        osc.set_type(web::OscillatorType::Square);
        let _ = osc.frequency().set_value_at_time(click.frequency_hz, now);
        let _ = osc.detune().set_value_at_time(click.detune_cents, now);

        let Ok(filter) = web::BiquadFilterNode::new(context) else {
            return;
        };
        filter.set_type(web::BiquadFilterType::Highpass);
        let _ = filter.frequency().set_value_at_time(click.cutoff_hz, now);

        let Ok(gain) = web::GainNode::new(context) else {
            return;
        };
        let _ = gain.gain().set_value_at_time(KEY_CLICK_FLOOR, now);
        let _ = gain
            .gain()
            .linear_ramp_to_value_at_time(KEY_CLICK_LEVEL, now + KEY_CLICK_ATTACK_S);
        let _ = gain
            .gain()
            .exponential_ramp_to_value_at_time(KEY_CLICK_FLOOR, now + click.decay_s);

        let _ = osc.connect_with_audio_node(&filter);
        let _ = filter.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&context.destination());
        let _ = osc.start_with_when(now);
        let _ = osc.stop_with_when(now + KEY_CLICK_STOP_S);
    }

    /// Closes the context. Errors from an already-closed context are
    /// ignored; the synth can be re-enabled later through a fresh context.
    pub fn release(&mut self) {
        if let Some(context) = self.context.take() {
            if context.state() != web::AudioContextState::Closed {
                let _ = context.close();
            }
        }
    }
}

impl Default for KeyClickSynth {
    fn default() -> Self {
        Self::new()
    }
}
