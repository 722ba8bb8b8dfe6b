use glam::Vec2;
use witching_engine::{Handoff, InputEvent, InputQueue, Timeline};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::beam::{self, BeamParams, BeamPath, Mirror, MIRROR_LENGTH};
use crate::challenge::{Challenge, ChallengeRules};
use crate::events::{EVENT_TARGET_LIT, SOUND_CLICK, SOUND_VICTORY};
use crate::view::{MirrorView, RitualView, SceneView, TargetView};

const RULES: ChallengeRules = ChallengeRules {
    scene: SceneKey::Ritual,
    title: "THE FINAL RITUAL",
    instructions: "Direct the mystical beams to all three targets using the mirrors.\nClick and drag mirrors to rotate them and redirect the light.",
    hint: "The final incantation: \"Let light find its way through reflection and guide us to salvation\"",
    success_banner: "THE RITUAL IS COMPLETE!",
    seconds: 240,
    show_next: false,
};

/// Mirror layout as (x, y) screen fractions and angle in degrees.
const MIRRORS: [(f32, f32, f32); 5] = [
    (0.3, 0.4, 45.0),
    (0.5, 0.35, 135.0),
    (0.7, 0.4, 45.0),
    (0.4, 0.65, 315.0),
    (0.6, 0.7, 225.0),
];
const TARGET_ROWS: [f32; 3] = [0.25, 0.5, 0.75];
/// Pointer distance from a mirror's centre that grabs it.
const GRAB_RADIUS: f32 = MIRROR_LENGTH / 2.0;
const RESTART_AFTER_MS: u32 = 4000;

const EPILOGUE: [&str; 2] = [
    "The Witching Hour has passed.",
    "The darkness retreats, and dawn approaches.",
];
const THANKS: &str = "Thank you for playing The Witching Hour!";
const RESTART_PROMPT: &str = "Click anywhere to restart the adventure";

/// Steer the beam through the mirrors until every target has been lit.
pub struct RitualScene {
    challenge: Challenge,
    source: Vec2,
    targets: [Vec2; 3],
    mirrors: Vec<Mirror>,
    lit: [bool; 3],
    beam: BeamPath,
    params: BeamParams,
    dragging: Option<usize>,
    timeline: Timeline<()>,
    restart_ready: bool,
}

impl RitualScene {
    pub fn enter(handoff: Handoff, cx: &mut SceneContext) -> Self {
        let (w, h) = (cx.bounds.width, cx.bounds.height);
        let source = Vec2::new(w * 0.1, h * 0.5);
        let params = BeamParams::default();
        let mut scene = Self {
            challenge: Challenge::start(RULES, handoff, cx),
            source,
            targets: TARGET_ROWS.map(|row| Vec2::new(w * 0.9, h * row)),
            mirrors: MIRRORS
                .iter()
                .map(|&(x, y, angle)| Mirror::new(Vec2::new(w * x, h * y), angle))
                .collect(),
            lit: [false; 3],
            beam: BeamPath { points: vec![source], end: beam::BeamEnd::Edge, bounces: 0 },
            params,
            dragging: None,
            timeline: Timeline::new(),
            restart_ready: false,
        };
        scene.recompute(cx);
        scene
    }

    /// Retrace the beam and light whatever target it now reaches.
    fn recompute(&mut self, cx: &mut SceneContext) {
        self.beam = beam::trace(
            self.source,
            0.0,
            &self.mirrors,
            &self.targets,
            cx.bounds,
            &self.params,
        );
        let Some(target) = self.beam.hit_target() else {
            return;
        };
        if self.lit[target] || !self.challenge.is_running() {
            return;
        }
        self.lit[target] = true;
        log::info!("ritual: target {} lit", target + 1);
        cx.emit(EVENT_TARGET_LIT, target as f32);
        cx.sound(SOUND_CLICK);

        if self.lit.iter().all(|&l| l) {
            self.challenge.complete(cx);
            cx.sound(SOUND_VICTORY);
            self.dragging = None;
            self.timeline.after(RESTART_AFTER_MS, ());
        }
    }

    fn mirror_at(&self, point: Vec2) -> Option<usize> {
        self.mirrors
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.center.distance(point)))
            .filter(|(_, d)| *d <= GRAB_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn pointer(&mut self, cx: &mut SceneContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.dragging = self.mirror_at(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                if let Some(i) = self.dragging {
                    self.mirrors[i].aim_at(Vec2::new(x, y));
                    self.recompute(cx);
                }
            }
            InputEvent::PointerUp { .. } => self.dragging = None,
            _ => {}
        }
    }
}

impl Scene for RitualScene {
    fn key(&self) -> SceneKey {
        SceneKey::Ritual
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        let cmd = self.challenge.update(cx);
        if cmd != SceneCommand::Stay {
            return cmd;
        }
        if !self.timeline.advance(cx.dt()).is_empty() {
            self.restart_ready = true;
        }
        if self.restart_ready && input.has_pointer_down() {
            return SceneCommand::Goto(SceneKey::Intro, Handoff::empty());
        }
        if self.challenge.is_running() {
            for event in input.iter() {
                self.pointer(cx, event);
            }
        }
        self.challenge.navigate(input)
    }

    fn view(&self) -> SceneView {
        let complete = self.challenge.is_complete();
        let mut epilogue = Vec::new();
        if complete {
            epilogue.extend(EPILOGUE);
        }
        if self.restart_ready {
            epilogue.push(THANKS);
        }
        SceneView::Ritual(RitualView {
            challenge: self.challenge.view(),
            source: self.source.into(),
            mirrors: self
                .mirrors
                .iter()
                .enumerate()
                .map(|(i, m)| MirrorView {
                    center: m.center.into(),
                    angle_deg: m.angle_deg,
                    length: MIRROR_LENGTH,
                    dragging: self.dragging == Some(i),
                })
                .collect(),
            targets: self
                .targets
                .iter()
                .zip(self.lit)
                .map(|(&t, lit)| TargetView { position: t.into(), lit })
                .collect(),
            beam: self.beam.points.iter().map(|&p| p.into()).collect(),
            epilogue,
            restart_prompt: self.restart_ready.then_some(RESTART_PROMPT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EVENT_SOLVED;
    use crate::scenes::testing::{click, Harness};

    /// Remove every mirror so the source shines straight along the middle row.
    fn clear_field(scene: &mut RitualScene) {
        for m in &mut scene.mirrors {
            m.center.y = -500.0;
        }
    }

    /// Aim mirror `i` so it bounces the horizontal source beam at target `t`.
    fn steer(h: &mut Harness, scene: &mut RitualScene, i: usize, t: usize) {
        let center = Vec2::new(scene.source.x + 200.0, scene.source.y);
        scene.mirrors[i].center = center;
        // A beam travelling at angle 0 leaves a mirror at angle s along 2s.
        let out = (scene.targets[t] - center).to_angle();
        scene.mirrors[i].angle_deg = (out / 2.0).to_degrees();
        scene.recompute(&mut h.cx());
    }

    #[test]
    fn opening_layout_lights_the_middle_target() {
        let mut h = Harness::new();
        let scene = RitualScene::enter(Handoff::empty(), &mut h.cx());
        assert_eq!(scene.beam.hit_target(), Some(1));
        assert!(h.has_event(EVENT_TARGET_LIT));
        assert_eq!(scene.lit, [false, true, false]);
    }

    #[test]
    fn lit_targets_stay_lit_and_all_three_complete() {
        let mut h = Harness::new();
        let mut scene = RitualScene::enter(Handoff::empty(), &mut h.cx());
        clear_field(&mut scene);
        steer(&mut h, &mut scene, 0, 0);
        assert_eq!(scene.beam.hit_target(), Some(0));
        assert_eq!(scene.lit, [true, true, false]);
        assert!(scene.challenge.is_running());

        h.engine.clear_frame_data();
        steer(&mut h, &mut scene, 0, 2);
        assert!(h.has_event(EVENT_SOLVED));
        assert!(scene.challenge.is_complete());
    }

    #[test]
    fn relighting_a_target_emits_nothing() {
        let mut h = Harness::new();
        let mut scene = RitualScene::enter(Handoff::empty(), &mut h.cx());
        h.engine.clear_frame_data();
        scene.recompute(&mut h.cx());
        assert!(!h.has_event(EVENT_TARGET_LIT));
    }

    #[test]
    fn restart_prompt_after_victory() {
        let mut h = Harness::new();
        let mut scene = RitualScene::enter(Handoff::empty(), &mut h.cx());
        scene.lit = [true, true, false];
        clear_field(&mut scene);
        steer(&mut h, &mut scene, 0, 2);
        assert!(scene.challenge.is_complete());

        assert_eq!(h.step(&mut scene, vec![click(10.0, 10.0)]), SceneCommand::Stay);
        h.idle(&mut scene, 4.1);
        assert!(scene.restart_ready);
        assert_eq!(
            h.step(&mut scene, vec![click(10.0, 10.0)]),
            SceneCommand::Goto(SceneKey::Intro, Handoff::empty())
        );
    }

    #[test]
    fn dragging_a_mirror_rotates_it() {
        let mut h = Harness::new();
        let mut scene = RitualScene::enter(Handoff::empty(), &mut h.cx());
        let c = scene.mirrors[1].center;
        h.step(
            &mut scene,
            vec![
                click(c.x + 5.0, c.y),
                InputEvent::PointerMove { x: c.x + 100.0, y: c.y },
                InputEvent::PointerUp { x: c.x + 100.0, y: c.y },
            ],
        );
        assert!((scene.mirrors[1].angle_deg - 90.0).abs() < 1e-3);
        assert_eq!(scene.dragging, None);
    }
}
