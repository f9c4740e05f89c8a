//! Cue sink using the Web Audio API
//!
//! Procedurally generated sounds - no external files needed. Every cue runs
//! through oscillator -> gain -> stereo panner -> destination, so pan and
//! loudness can be moved while an approach loop is playing.

use std::collections::HashMap;

use web_sys::{
    AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType, StereoPannerNode,
};

use super::{CueId, CueKind, CueParams, CueSink};

/// Seconds over which pan/volume changes glide, to avoid zipper noise
const GLIDE: f64 = 0.03;

/// One playing oscillator chain
struct Voice {
    osc: OscillatorNode,
    gain: GainNode,
    panner: StereoPannerNode,
    /// Extra scaling for this cue's timbre
    level: f32,
}

/// Audio engine for the browser build
pub struct WebAudioSink {
    ctx: Option<AudioContext>,
    volume: f32,
    loops: HashMap<CueId, Voice>,
}

impl Default for WebAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioSink {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.0,
            loops: HashMap::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    fn voice(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        level: f32,
    ) -> Option<Voice> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        let panner = ctx.create_stereo_panner().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&panner).ok()?;
        panner.connect_with_audio_node(&ctx.destination()).ok()?;

        Some(Voice {
            osc,
            gain,
            panner,
            level,
        })
    }

    fn set_params(&self, ctx: &AudioContext, voice: &Voice, params: CueParams) {
        let t = ctx.current_time();
        voice
            .panner
            .pan()
            .set_target_at_time(params.pan.clamp(-1.0, 1.0), t, GLIDE)
            .ok();
        voice
            .gain
            .gain()
            .set_target_at_time(params.volume * voice.level * self.volume, t, GLIDE)
            .ok();
    }

    /// Approach loop for an obstacle; runs until stopped
    fn start_loop(&mut self, ctx: &AudioContext, id: CueId, kind: CueKind, params: CueParams) {
        let (freq, osc_type, level) = match kind {
            // Dry, clicky tapping
            CueKind::CaneApproach => (220.0, OscillatorType::Square, 0.15),
            // Low rumble of wheels
            CueKind::SkateboardApproach => (85.0, OscillatorType::Sawtooth, 0.25),
            // Bright shimmer
            CueKind::CoinLoop => (1320.0, OscillatorType::Triangle, 0.2),
            _ => return,
        };
        let Some(voice) = Self::voice(ctx, freq, osc_type, level) else {
            return;
        };
        voice.gain.gain().set_value(0.0);
        self.set_params(ctx, &voice, params);
        voice.osc.start().ok();
        if let Some(old) = self.loops.insert(id, voice) {
            old.osc.stop().ok();
        }
    }

    /// Fire-and-forget sound with a pitch sweep and decay envelope
    fn one_shot(
        &self,
        ctx: &AudioContext,
        params: CueParams,
        (from_hz, to_hz): (f32, f32),
        osc_type: OscillatorType,
        peak: f32,
        duration: f64,
    ) {
        let Some(voice) = Self::voice(ctx, from_hz, osc_type, 1.0) else {
            return;
        };
        let t = ctx.current_time();
        let vol = self.volume * params.volume * peak;

        voice.panner.pan().set_value(params.pan);
        voice.gain.gain().set_value_at_time(vol, t).ok();
        voice
            .gain
            .gain()
            .exponential_ramp_to_value_at_time(0.001, t + duration)
            .ok();
        voice.osc.frequency().set_value_at_time(from_hz, t).ok();
        voice
            .osc
            .frequency()
            .exponential_ramp_to_value_at_time(to_hz, t + duration)
            .ok();

        voice.osc.start().ok();
        voice.osc.stop_with_when(t + duration + 0.05).ok();
    }

    fn play_one_shot(&self, ctx: &AudioContext, kind: CueKind, params: CueParams) {
        match kind {
            CueKind::CoinPickup => {
                self.one_shot(ctx, params, (880.0, 1760.0), OscillatorType::Sine, 0.4, 0.15)
            }
            CueKind::CaneHit => {
                self.one_shot(ctx, params, (300.0, 80.0), OscillatorType::Square, 0.5, 0.4)
            }
            CueKind::SkateboardHit => {
                self.one_shot(ctx, params, (200.0, 40.0), OscillatorType::Sawtooth, 0.6, 0.6)
            }
            CueKind::LevelUp => {
                self.one_shot(ctx, params, (523.0, 1047.0), OscillatorType::Triangle, 0.4, 0.5)
            }
            CueKind::Footstep { step } => {
                // Slightly different thud per sample so the gait is audible
                let base = 90.0 + step as f32 * 12.0;
                self.one_shot(ctx, params, (base, base * 0.6), OscillatorType::Sine, 0.3, 0.08)
            }
            CueKind::TurnLeft => self.one_shot(
                ctx,
                CueParams::new(-0.8, params.volume),
                (500.0, 400.0),
                OscillatorType::Sine,
                0.25,
                0.06,
            ),
            CueKind::TurnRight => self.one_shot(
                ctx,
                CueParams::new(0.8, params.volume),
                (500.0, 400.0),
                OscillatorType::Sine,
                0.25,
                0.06,
            ),
            CueKind::Jump => {
                self.one_shot(ctx, params, (300.0, 900.0), OscillatorType::Triangle, 0.3, 0.2)
            }
            CueKind::CaneApproach | CueKind::SkateboardApproach | CueKind::CoinLoop => {}
        }
    }
}

impl CueSink for WebAudioSink {
    fn start(&mut self, id: CueId, kind: CueKind, params: CueParams) {
        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        if kind.is_looping() {
            self.start_loop(&ctx, id, kind, params);
        } else if self.volume > 0.0 {
            self.play_one_shot(&ctx, kind, params);
        }
    }

    fn update(&mut self, id: CueId, params: CueParams) {
        let (Some(ctx), Some(voice)) = (&self.ctx, self.loops.get(&id)) else {
            return;
        };
        self.set_params(ctx, voice, params);
    }

    fn stop(&mut self, id: CueId) {
        if let Some(voice) = self.loops.remove(&id) {
            voice.osc.stop().ok();
            voice.panner.disconnect().ok();
        }
    }

    fn set_output_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        // Approach loops pick this up on their next per-tick update
        log::info!("Output volume {:.2}", self.volume);
    }
}
