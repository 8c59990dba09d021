use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the viewer manifest.
    #[default]
    Loading,
    Ready,
}

// Ready once the manifest is installed, or replaced by defaults
pub fn transition_to_ready(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded || loading_progress.manifest_failed {
        println!("→ Transitioning to Ready state");
        next_state.set(AppState::Ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_ready.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn waits_for_the_manifest() {
        let mut app = test_app();
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);
    }

    #[test]
    fn fallback_manifest_still_reaches_ready() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .manifest_failed = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Ready);
    }
}
