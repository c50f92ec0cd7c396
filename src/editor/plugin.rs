//! Bündelt die Erfassungsgeste als Bevy `Plugin`.

use super::{
    events::{PointAddedEvent, RegionCommitted, SessionCancelled, SessionCommand},
    regions::RegionCatalog,
    resources::{ActiveSession, EditorParameters},
    systems::*,
};
use bevy::prelude::*;

/// Registriert Sitzung, Katalog, Parameter und Events.
///
/// Die Systeme laufen verkettet: Eingabe → Befehle anwenden → Ergebnis verbuchen,
/// damit ein Klick und ein Enter im selben Frame in dieser Reihenfolge greifen.
pub struct RegionEditorPlugin;

impl Plugin for RegionEditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorParameters>()
            .init_resource::<ActiveSession>()
            .init_resource::<RegionCatalog>()
            .add_event::<PointAddedEvent>()
            .add_event::<SessionCommand>()
            .add_event::<RegionCommitted>()
            .add_event::<SessionCancelled>()
            .add_systems(
                Update,
                (
                    session_keyboard_system,
                    pick_point_system,
                    apply_session_commands_system,
                    handle_region_committed_system,
                    log_point_added_system,
                    export_svg_system,
                )
                    .chain(),
            );
    }
}
