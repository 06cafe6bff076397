//! Frame-by-frame easing of the composed card stack.
//!
//! The engine only says where each card should be and how to get there.
//! [`StackMotion`] remembers where cards were on the previous frame and
//! eases toward the new targets. A card that shows a different item snaps
//! straight to its target, so a freshly promoted card never slides in.

use std::time::{Duration, Instant};

use swipedeck_engine::{BoundarySide, CardStack, EXIT_ROTATION_DEG};
use swipedeck_types::ui::{EffectTimer, Transition, ease_out_cubic};

#[derive(Debug, Clone)]
struct Tween {
    from: f32,
    to: f32,
    timer: Option<EffectTimer>,
}

impl Tween {
    fn at(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            timer: None,
        }
    }

    fn value(&self) -> f32 {
        match &self.timer {
            Some(timer) => self.from + (self.to - self.from) * ease_out_cubic(timer.progress()),
            None => self.to,
        }
    }

    fn retarget(&mut self, to: f32, transition: Transition, reduced_motion: bool) {
        if (to - self.to).abs() <= f32::EPSILON {
            return;
        }
        let duration = transition.duration();
        if reduced_motion || duration.is_zero() {
            *self = Self::at(to);
            return;
        }
        self.from = self.value();
        self.to = to;
        self.timer = Some(EffectTimer::new(duration));
    }

    fn advance(&mut self, delta: Duration) {
        if let Some(timer) = self.timer.as_mut() {
            timer.advance(delta);
            if timer.is_finished() {
                *self = Self::at(self.to);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

#[derive(Debug, Clone)]
struct ForegroundMotion {
    index: usize,
    offset: Tween,
    rotate: Tween,
    opacity: Tween,
}

#[derive(Debug, Clone)]
struct BackgroundMotion {
    index: usize,
    scale: Tween,
    opacity: Tween,
    grayscale: Tween,
}

#[derive(Debug, Clone)]
struct OverlayMotion {
    side: BoundarySide,
    opacity: Tween,
}

/// Current on-screen values of the top card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForegroundFrame {
    pub index: usize,
    /// Horizontal shift in drag units.
    pub offset: f32,
    /// Rows the card drops to suggest its tilt.
    pub tilt_rows: u16,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundFrame {
    pub index: usize,
    pub scale: f32,
    pub opacity: f32,
    pub grayscale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub side: BoundarySide,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionFrame {
    pub foreground: Option<ForegroundFrame>,
    pub background: Option<BackgroundFrame>,
    pub overlay: Option<OverlayFrame>,
}

#[derive(Debug, Clone, Default)]
pub struct StackMotion {
    reduced_motion: bool,
    last_update: Option<Instant>,
    foreground: Option<ForegroundMotion>,
    background: Option<BackgroundMotion>,
    overlay: Option<OverlayMotion>,
}

impl StackMotion {
    #[must_use]
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    /// Advance running tweens to `now` and retarget them at `stack`.
    ///
    /// `card_width` is in drag units and resolves off-stage positions.
    pub fn update(&mut self, stack: &CardStack, card_width: f32, now: Instant) -> MotionFrame {
        let delta = self
            .last_update
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_update = Some(now);
        self.advance(delta);

        let reduced = self.reduced_motion;

        self.foreground = stack.foreground.map(|card| {
            let offset = card.translate.resolve(card_width);
            match self.foreground.take() {
                Some(mut motion) if motion.index == card.index => {
                    motion.offset.retarget(offset, card.transition, reduced);
                    motion.rotate.retarget(card.rotate_deg, card.transition, reduced);
                    motion.opacity.retarget(card.opacity, card.transition, reduced);
                    motion
                }
                _ => ForegroundMotion {
                    index: card.index,
                    offset: Tween::at(offset),
                    rotate: Tween::at(card.rotate_deg),
                    opacity: Tween::at(card.opacity),
                },
            }
        });

        self.background = stack.background.map(|card| match self.background.take() {
            Some(mut motion) if motion.index == card.index => {
                motion.scale.retarget(card.scale, card.transition, reduced);
                motion.opacity.retarget(card.opacity, card.transition, reduced);
                motion.grayscale.retarget(card.grayscale, card.transition, reduced);
                motion
            }
            _ => BackgroundMotion {
                index: card.index,
                scale: Tween::at(card.scale),
                opacity: Tween::at(card.opacity),
                grayscale: Tween::at(card.grayscale),
            },
        });

        self.overlay = stack.overlay.map(|overlay| match self.overlay.take() {
            Some(mut motion) if motion.side == overlay.side => {
                motion
                    .opacity
                    .retarget(overlay.opacity, overlay.transition, reduced);
                motion
            }
            _ => OverlayMotion {
                side: overlay.side,
                opacity: Tween::at(overlay.opacity),
            },
        });

        self.frame()
    }

    fn advance(&mut self, delta: Duration) {
        if let Some(fg) = self.foreground.as_mut() {
            fg.offset.advance(delta);
            fg.rotate.advance(delta);
            fg.opacity.advance(delta);
        }
        if let Some(bg) = self.background.as_mut() {
            bg.scale.advance(delta);
            bg.opacity.advance(delta);
            bg.grayscale.advance(delta);
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.opacity.advance(delta);
        }
    }

    fn frame(&self) -> MotionFrame {
        MotionFrame {
            foreground: self.foreground.as_ref().map(|fg| ForegroundFrame {
                index: fg.index,
                offset: fg.offset.value(),
                tilt_rows: tilt_rows(fg.rotate.value()),
                opacity: fg.opacity.value(),
            }),
            background: self.background.as_ref().map(|bg| BackgroundFrame {
                index: bg.index,
                scale: bg.scale.value(),
                opacity: bg.opacity.value(),
                grayscale: bg.grayscale.value(),
            }),
            overlay: self.overlay.as_ref().map(|overlay| OverlayFrame {
                side: overlay.side,
                opacity: overlay.opacity.value(),
            }),
        }
    }

    /// True while any tween still has somewhere to go.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.foreground
            .as_ref()
            .is_some_and(|fg| fg.offset.is_running() || fg.rotate.is_running() || fg.opacity.is_running())
            || self.background.as_ref().is_some_and(|bg| {
                bg.scale.is_running() || bg.opacity.is_running() || bg.grayscale.is_running()
            })
            || self
                .overlay
                .as_ref()
                .is_some_and(|overlay| overlay.opacity.is_running())
    }
}

fn tilt_rows(rotate_deg: f32) -> u16 {
    (rotate_deg.abs() / (EXIT_ROTATION_DEG / 2.0)).round().min(2.0) as u16
}

#[cfg(test)]
mod tests {
    use super::StackMotion;
    use std::time::{Duration, Instant};
    use swipedeck_engine::{
        BackgroundCard, CardStack, ExitDirection, ForegroundCard, Translate,
    };
    use swipedeck_types::ui::Transition;

    fn foreground(index: usize, translate: Translate, transition: Transition) -> CardStack {
        CardStack {
            foreground: Some(ForegroundCard {
                index,
                translate,
                rotate_deg: 0.0,
                opacity: 1.0,
                transition,
            }),
            ..CardStack::default()
        }
    }

    #[test]
    fn dragging_tracks_one_to_one() {
        let t0 = Instant::now();
        let mut motion = StackMotion::new(false);
        motion.update(&foreground(0, Translate::Offset(0.0), Transition::None), 400.0, t0);
        let frame = motion.update(
            &foreground(0, Translate::Offset(-80.0), Transition::None),
            400.0,
            t0 + Duration::from_millis(16),
        );
        assert_eq!(frame.foreground.unwrap().offset, -80.0);
        assert!(!motion.is_animating());
    }

    #[test]
    fn release_eases_back() {
        let t0 = Instant::now();
        let mut motion = StackMotion::new(false);
        motion.update(&foreground(0, Translate::Offset(-80.0), Transition::None), 400.0, t0);
        let settle = Transition::ease_out_ms(300);
        let start = motion.update(&foreground(0, Translate::Offset(0.0), settle), 400.0, t0);
        assert_eq!(start.foreground.unwrap().offset, -80.0);

        let mid = motion.update(
            &foreground(0, Translate::Offset(0.0), settle),
            400.0,
            t0 + Duration::from_millis(150),
        );
        let offset = mid.foreground.unwrap().offset;
        assert!(offset > -80.0 && offset < 0.0, "offset {offset}");

        let done = motion.update(
            &foreground(0, Translate::Offset(0.0), settle),
            400.0,
            t0 + Duration::from_millis(400),
        );
        assert_eq!(done.foreground.unwrap().offset, 0.0);
        assert!(!motion.is_animating());
    }

    #[test]
    fn new_item_snaps_in() {
        let t0 = Instant::now();
        let mut motion = StackMotion::new(false);
        let exit = Transition::ease_out_ms(300);
        motion.update(&foreground(0, Translate::Offset(0.0), exit), 400.0, t0);
        motion.update(
            &foreground(0, Translate::OffStage(ExitDirection::Left), exit),
            400.0,
            t0,
        );
        let frame = motion.update(
            &foreground(1, Translate::Offset(0.0), exit),
            400.0,
            t0 + Duration::from_millis(200),
        );
        let fg = frame.foreground.unwrap();
        assert_eq!(fg.index, 1);
        assert_eq!(fg.offset, 0.0);
    }

    #[test]
    fn reduced_motion_snaps() {
        let t0 = Instant::now();
        let mut motion = StackMotion::new(true);
        motion.update(&foreground(0, Translate::Offset(0.0), Transition::None), 400.0, t0);
        let frame = motion.update(
            &foreground(
                0,
                Translate::OffStage(ExitDirection::Right),
                Transition::ease_out_ms(300),
            ),
            400.0,
            t0,
        );
        assert_eq!(frame.foreground.unwrap().offset, 600.0);
    }

    #[test]
    fn background_follows_index() {
        let t0 = Instant::now();
        let mut motion = StackMotion::new(false);
        let mut stack = foreground(1, Translate::Offset(-50.0), Transition::None);
        stack.background = Some(BackgroundCard {
            index: 2,
            scale: 0.95,
            opacity: 0.75,
            grayscale: 0.5,
            interactive: false,
            transition: Transition::None,
        });
        let frame = motion.update(&stack, 400.0, t0);
        let bg = frame.background.unwrap();
        assert_eq!(bg.index, 2);
        assert_eq!(bg.scale, 0.95);

        stack.background = None;
        assert!(motion.update(&stack, 400.0, t0).background.is_none());
    }
}
