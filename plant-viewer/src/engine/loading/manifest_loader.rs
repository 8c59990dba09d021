use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::MANIFEST_PATH;

use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::page::catalog::Catalog;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<ViewerManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading viewer manifest from {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

// Install the manifest and catalogue once the JSON is parsed
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<ViewerManifest>>,
) {
    if loading_progress.manifest_loaded || loading_progress.manifest_failed {
        return;
    }

    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        match manifest.validate() {
            Ok(()) => {
                println!("✓ Viewer manifest loaded ({} catalogue entries)", manifest.catalog.len());
                install_manifest(&mut commands, manifest.clone());
                loading_progress.manifest_loaded = true;
            }
            Err(e) => {
                error!("{}", e);
                install_manifest(&mut commands, ViewerManifest::default());
                loading_progress.manifest_failed = true;
            }
        }
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Viewer manifest unavailable ({}), using defaults", err);
        install_manifest(&mut commands, ViewerManifest::default());
        loading_progress.manifest_failed = true;
    }
}

fn install_manifest(commands: &mut Commands, manifest: ViewerManifest) {
    commands.insert_resource(Catalog::new(manifest.catalog.clone()));
    commands.insert_resource(manifest);
}
