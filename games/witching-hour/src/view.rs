//! Serializable snapshots the host page draws from.

use glam::Vec2;
use serde::Serialize;

use crate::scenes::SceneKey;
use crate::settings::Round;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl From<(Vec2, Vec2)> for Line {
    fn from((a, b): (Vec2, Vec2)) -> Self {
        Self { from: a.into(), to: b.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub scene: SceneKey,
    pub round: Round,
    pub view: SceneView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SceneView {
    Story(StoryView),
    Prophecy(ProphecyView),
    Forest(ForestView),
    Crypt(CryptView),
    Ritual(RitualView),
    Quiz(QuizView),
    Finish(FinishView),
    GameOver(GameOverView),
}

/// Title card scenes: prologue, round start and intro.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryView {
    pub title: &'static str,
    /// Story lines revealed so far.
    pub lines: Vec<&'static str>,
    pub prompt: Option<&'static str>,
    pub button: Option<&'static str>,
    /// Fading out toward the next scene; input is ignored.
    pub fading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChallengeStatus {
    Running,
    Complete,
    Failed,
}

/// Timer, banner and navigation state shared by the timed puzzles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeView {
    pub title: &'static str,
    pub instructions: &'static str,
    pub time_left: u32,
    pub warning: bool,
    pub status: ChallengeStatus,
    pub banner: Option<&'static str>,
    pub feedback: Option<String>,
    pub hint: Option<&'static str>,
    pub failures: u32,
    pub attempts_left: Option<u32>,
    pub back_enabled: bool,
    pub next_visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRuneView {
    pub symbol: &'static str,
    pub position: Point,
    pub slot: Option<usize>,
    pub dragging: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProphecyView {
    pub challenge: ChallengeView,
    pub slots: Vec<Point>,
    pub slot_size: f32,
    pub rune_size: f32,
    pub runes: Vec<SlotRuneView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub symbol: &'static str,
    pub name: &'static str,
    pub position: Point,
    pub active: bool,
    /// Briefly true after this node was clicked out of order.
    pub flash: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForestView {
    pub challenge: ChallengeView,
    pub nodes: Vec<NodeView>,
    pub star: Vec<Line>,
    pub path: Vec<Line>,
    pub connections: Vec<[usize; 2]>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptRuneView {
    pub symbol: &'static str,
    pub position: Point,
    pub rotation_deg: u32,
    pub target_deg: u32,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptView {
    pub challenge: ChallengeView,
    pub runes: Vec<CryptRuneView>,
    /// Runes already facing their direction.
    pub locked: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorView {
    pub center: Point,
    pub angle_deg: f32,
    pub length: f32,
    pub dragging: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetView {
    pub position: Point,
    pub lit: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualView {
    pub challenge: ChallengeView,
    pub source: Point,
    pub mirrors: Vec<MirrorView>,
    pub targets: Vec<TargetView>,
    pub beam: Vec<Point>,
    /// Closing lines shown once the ritual is complete.
    pub epilogue: Vec<&'static str>,
    pub restart_prompt: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: u32,
    pub prompt: &'static str,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub title: &'static str,
    pub questions: Vec<QuestionView>,
    pub submitted: bool,
    pub score_text: Option<String>,
    pub next_visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishView {
    pub title: &'static str,
    pub time_taken: String,
    pub score_text: Option<String>,
    pub button: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverView {
    pub title: &'static str,
}
