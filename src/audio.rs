//! Sound cues
//!
//! The simulation asks for named cues and never waits on them. On the web the
//! cues are synthesized with the Web Audio API; no sound files are shipped.

use std::cell::RefCell;
use std::rc::Rc;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// UI tap, view change
    Click,
    /// Equip, minor score milestone
    Pop,
    /// Money gained, heart caught
    Coin,
    /// Food applied
    Eat,
    Jump,
    /// Minigame crash, bomb caught, rejected purchase
    Crash,
    /// Promotion, secret bonus, shower done
    Success,
    /// Pet is about to poop
    Loose,
    /// Play session reward
    Powerup,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Pop => "pop",
            Cue::Coin => "coin",
            Cue::Eat => "eat",
            Cue::Jump => "jump",
            Cue::Crash => "crash",
            Cue::Success => "success",
            Cue::Loose => "loose",
            Cue::Powerup => "powerup",
        }
    }
}

/// Something that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: Cue);

    /// Master volume (0.0 - 1.0). Sinks without a level ignore it.
    fn set_volume(&mut self, _volume: f32) {}
}

/// Drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Logs cues at debug level (native runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("♪ {}", cue.name());
    }
}

/// Remembers every cue; clones share the same history
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<Cue>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, oldest first
    pub fn played(&self) -> Vec<Cue> {
        self.played.borrow().clone()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.borrow().iter().filter(|c| **c == cue).count()
    }

    pub fn clear(&self) {
        self.played.borrow_mut().clear();
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.played.borrow_mut().push(cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::OscillatorType::{Sawtooth, Sine, Square, Triangle};
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Cue};

    /// Procedural Web Audio synth
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Context creation fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 1.0,
            }
        }

        /// Oscillator routed through its own gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Frequency sweep with a fade out
        fn sweep(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            level: f32,
            start: f64,
            duration: f64,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let end = start + duration;
            osc.frequency().set_value_at_time(from, start).ok();
            osc.frequency().linear_ramp_to_value_at_time(to, end).ok();
            gain.gain().set_value_at_time(level, start).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(end).ok();
        }

        /// Fixed pitch note with a linear fade
        fn note(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            freq: f32,
            level: f32,
            start: f64,
            duration: f64,
        ) {
            Self::sweep(ctx, osc_type, freq, freq, level, start, duration);
        }

        /// Sharp exponential decay, used for blips
        fn blip(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            level: f32,
            duration: f64,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();
            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + duration)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: Cue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let v = self.volume;
            let t = ctx.current_time();
            match cue {
                Cue::Click => Self::blip(ctx, Square, 400.0, 100.0, v * 0.05, 0.1),
                Cue::Pop => Self::sweep(ctx, Sine, 400.0, 600.0, v * 0.1, t, 0.1),
                Cue::Coin => {
                    // Double ding
                    Self::note(ctx, Square, 1200.0, v * 0.05, t, 0.1);
                    Self::note(ctx, Square, 1600.0, v * 0.05, t + 0.1, 0.2);
                }
                Cue::Eat => {
                    // Two crunches
                    Self::sweep(ctx, Sawtooth, 200.0, 50.0, v * 0.1, t, 0.15);
                    Self::sweep(ctx, Sawtooth, 250.0, 50.0, v * 0.1, t + 0.15, 0.15);
                }
                Cue::Jump => Self::sweep(ctx, Square, 150.0, 300.0, v * 0.05, t, 0.1),
                Cue::Crash => Self::blip(ctx, Sawtooth, 100.0, 20.0, v * 0.1, 0.3),
                Cue::Success => {
                    // C major arpeggio
                    let notes = [
                        (523.25, 0.0, 0.1),
                        (659.25, 0.1, 0.1),
                        (783.99, 0.2, 0.2),
                        (1046.5, 0.3, 0.4),
                    ];
                    for (freq, offset, duration) in notes {
                        let start = t + offset;
                        Self::note(ctx, Square, freq, v * 0.05, start, duration);
                    }
                }
                Cue::Loose => Self::sweep(ctx, Triangle, 300.0, 100.0, v * 0.1, t, 0.5),
                Cue::Powerup => {
                    Self::note(ctx, Sine, 600.0, v * 0.05, t, 0.1);
                    Self::note(ctx, Sine, 1200.0, v * 0.05, t + 0.1, 0.2);
                }
            }
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}
