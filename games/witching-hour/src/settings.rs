use serde::{Deserialize, Serialize};

use crate::scenes::SceneKey;

/// Which scene list the game plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    /// Vault, forest, crypt and the final mirror ritual.
    #[default]
    Ritual,
    /// The aptitude quiz followed by the round summary.
    Quiz,
}

impl Round {
    pub fn scenes(self) -> Vec<SceneKey> {
        use SceneKey::*;
        match self {
            Round::Ritual => vec![Prologue, Start, Intro, Prophecy, Forest, Crypt, Ritual],
            Round::Quiz => vec![Prologue, Start, Intro, Quiz, Finish],
        }
    }
}

/// Game-level settings, loaded from JSON by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub round: Round,
    /// Mirror the running countdown to local storage for resume.
    pub persist_progress: bool,
    /// Where an expired or failed challenge sends the player.
    pub timeout_scene: SceneKey,
    /// The timer is flagged as a warning at or below this many seconds.
    pub warning_seconds: u32,
    /// Wrong answers before the hint appears. 0 shows it from the start.
    pub hint_after_failures: u32,
    /// Wrong answers that fail a challenge. `None` allows unlimited tries.
    pub max_attempts: Option<u32>,
    /// Move on by itself shortly after a challenge is solved.
    pub auto_advance: bool,
    /// Keep the player on the Game Over screen once it has been reached.
    pub lock_after_game_over: bool,
    /// Seed for shuffles and initial rotations. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round: Round::Ritual,
            persist_progress: true,
            timeout_scene: SceneKey::Intro,
            warning_seconds: 30,
            hint_after_failures: 0,
            max_attempts: None,
            auto_advance: false,
            lock_after_game_over: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn partial_settings() {
        let s = Settings::from_json(
            r#"{ "round": "quiz", "timeout_scene": "GameOver", "max_attempts": 3, "seed": 9 }"#,
        )
        .unwrap();
        assert_eq!(s.round, Round::Quiz);
        assert_eq!(s.timeout_scene, SceneKey::GameOver);
        assert_eq!(s.max_attempts, Some(3));
        assert_eq!(s.seed, Some(9));
        assert!(s.persist_progress);
    }

    #[test]
    fn unknown_round_is_an_error() {
        assert!(Settings::from_json(r#"{ "round": "bonus" }"#).is_err());
    }

    #[test]
    fn rounds_share_the_opening() {
        let ritual = Round::Ritual.scenes();
        let quiz = Round::Quiz.scenes();
        assert_eq!(ritual[..3], quiz[..3]);
        assert_eq!(ritual.last(), Some(&SceneKey::Ritual));
        assert_eq!(quiz.last(), Some(&SceneKey::Finish));
    }
}
