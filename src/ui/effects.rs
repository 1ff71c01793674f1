//! Short-lived visual effects on the board: score pop-ups, star bursts, the
//! bomb flash, the combo pulse and targets sinking back into their holes.

use crate::core::constants::*;
use crate::whack::Target;

#[derive(Debug, Clone)]
pub struct VisualEffect {
    pub effect_type: EffectType,
    /// Milliseconds since the effect started.
    pub lifetime: f64,
    pub max_lifetime: f64,
}

#[derive(Debug, Clone)]
pub enum EffectType {
    ScorePopup { hole: usize, points: i64 },
    /// Three stars flying out above a hit mole.
    StarBurst { hole: usize },
    ScreenFlash,
    ComboPulse,
    /// A resolved target playing its sink animation.
    Sinking { target: Target, was_hit: bool },
}

impl VisualEffect {
    pub fn new(effect_type: EffectType) -> Self {
        let max_lifetime = match &effect_type {
            EffectType::ScorePopup { .. } => POPUP_MS,
            EffectType::StarBurst { .. } => STAR_BURST_MS,
            EffectType::ScreenFlash => FLASH_MS,
            EffectType::ComboPulse => COMBO_PULSE_MS,
            EffectType::Sinking { was_hit: true, .. } => SINK_HIT_ANIM_MS,
            EffectType::Sinking { was_hit: false, .. } => SINK_MISS_ANIM_MS,
        } as f64;
        Self {
            effect_type,
            lifetime: 0.0,
            max_lifetime,
        }
    }

    pub fn update(&mut self, delta_ms: f64) -> bool {
        self.lifetime += delta_ms;
        self.lifetime <= self.max_lifetime
    }

    pub fn is_active(&self) -> bool {
        self.lifetime <= self.max_lifetime
    }

    /// 0.0 at start, 1.0 at the end.
    pub fn progress(&self) -> f64 {
        if self.max_lifetime <= 0.0 {
            1.0
        } else {
            (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
        }
    }
}

/// All running effects for one session.
#[derive(Debug, Clone, Default)]
pub struct EffectLayer {
    effects: Vec<VisualEffect>,
}

impl EffectLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect_type: EffectType) {
        self.effects.push(VisualEffect::new(effect_type));
    }

    /// Age every effect and drop the finished ones.
    pub fn update(&mut self, delta_ms: f64) {
        self.effects.retain_mut(|e| e.update(delta_ms));
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn flash_active(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e.effect_type, EffectType::ScreenFlash))
    }

    /// Scale bump for the combo banner: rises to 1.3 and back.
    pub fn combo_scale(&self) -> f64 {
        self.effects
            .iter()
            .find(|e| matches!(e.effect_type, EffectType::ComboPulse))
            .map(|e| 1.0 + 0.3 * yoyo(e.progress()))
            .unwrap_or(1.0)
    }
}

/// Phaser-style Back.Out easing: overshoots slightly before settling at 1.
pub fn ease_back_out(t: f64) -> f64 {
    const S: f64 = 1.70158;
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * ((S + 1.0) * t + S) + 1.0
}

/// 0 -> 1 -> 0 over `t` in [0, 1], sine shaped.
pub fn yoyo(t: f64) -> f64 {
    (t.clamp(0.0, 1.0) * std::f64::consts::PI).sin()
}

/// How far a target has risen out of its hole, `age_ms` after spawning.
pub fn rise_fraction(age_ms: u64) -> f64 {
    ease_back_out(age_ms as f64 / RISE_ANIM_MS as f64)
}

/// Bomb sparks blink on a yo-yo cycle.
pub fn spark_lit(now_ms: u64) -> bool {
    (now_ms / SPARK_BLINK_MS) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_lifetimes() {
        assert_eq!(
            VisualEffect::new(EffectType::ScorePopup { hole: 0, points: 100 }).max_lifetime,
            1000.0
        );
        assert_eq!(VisualEffect::new(EffectType::ScreenFlash).max_lifetime, 200.0);
        assert_eq!(VisualEffect::new(EffectType::StarBurst { hole: 3 }).max_lifetime, 500.0);
    }

    #[test]
    fn test_effect_update() {
        let mut effect = VisualEffect::new(EffectType::ScreenFlash);
        assert!(effect.update(100.0)); // Still active
        assert!(effect.update(100.0)); // Exactly at the end
        assert!(!effect.update(1.0));
        assert_eq!(effect.progress(), 1.0);
    }

    #[test]
    fn test_layer_drops_finished_effects() {
        let mut layer = EffectLayer::new();
        layer.push(EffectType::ScreenFlash);
        layer.push(EffectType::ScorePopup { hole: 1, points: -200 });
        assert!(layer.flash_active());

        layer.update(300.0);
        assert_eq!(layer.len(), 1);
        assert!(!layer.flash_active());

        layer.update(800.0);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_combo_scale_pulses() {
        let mut layer = EffectLayer::new();
        assert_eq!(layer.combo_scale(), 1.0);
        layer.push(EffectType::ComboPulse);
        layer.update(COMBO_PULSE_MS as f64 / 2.0);
        assert!((layer.combo_scale() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_back_out_easing() {
        assert!(ease_back_out(0.0).abs() < 1e-9);
        assert!((ease_back_out(1.0) - 1.0).abs() < 1e-9);
        // Overshoots near the end
        assert!(ease_back_out(0.8) > 1.0);
    }

    #[test]
    fn test_rise_and_spark() {
        assert!(rise_fraction(0) < 0.01);
        assert!((rise_fraction(RISE_ANIM_MS) - 1.0).abs() < 1e-9);
        assert!((rise_fraction(10_000) - 1.0).abs() < 1e-9);
        assert!(spark_lit(0));
        assert!(!spark_lit(SPARK_BLINK_MS));
        assert!(spark_lit(SPARK_BLINK_MS * 2));
    }
}
