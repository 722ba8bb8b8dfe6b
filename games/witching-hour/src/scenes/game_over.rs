use witching_engine::InputQueue;

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::save;
use crate::view::{GameOverView, SceneView};

/// Terminal screen. Entering it records the lock flag.
pub struct GameOverScene;

impl GameOverScene {
    pub fn enter(cx: &mut SceneContext) -> Self {
        log::info!("game over");
        save::mark_game_over(cx.storage());
        Self
    }
}

impl Scene for GameOverScene {
    fn key(&self) -> SceneKey {
        SceneKey::GameOver
    }

    fn update(&mut self, _cx: &mut SceneContext, _input: &InputQueue) -> SceneCommand {
        SceneCommand::Stay
    }

    fn view(&self) -> SceneView {
        SceneView::GameOver(GameOverView { title: "GAME OVER" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CUSTOM_BACK, CUSTOM_NEXT};
    use crate::scenes::testing::{click, custom, Harness};

    #[test]
    fn entering_sets_the_flag() {
        let mut h = Harness::new();
        GameOverScene::enter(&mut h.cx());
        assert!(save::is_game_over(h.engine.storage.as_ref()));
    }

    #[test]
    fn ignores_every_input() {
        let mut h = Harness::new();
        let mut scene = GameOverScene::enter(&mut h.cx());
        let events = vec![click(500.0, 400.0), custom(CUSTOM_BACK), custom(CUSTOM_NEXT)];
        assert_eq!(h.step(&mut scene, events), SceneCommand::Stay);
        assert!(h.engine.events.is_empty());
    }
}
