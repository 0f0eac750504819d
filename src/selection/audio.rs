// Audio cue playback for selection confirmations.
use bevy::prelude::*;
use rand::Rng;

use super::events::CueRequest;
use super::observer::SelectionCue;
use super::SelectionConfig;

/// Preloaded cue variants. Audio is fire-and-forget: missing files degrade
/// to silence with a warning and the selection flow never notices.
#[derive(Resource)]
pub struct SelectionAudio {
    single_cues: Vec<Handle<AudioSource>>,
    multi_cues: Vec<Handle<AudioSource>>,
}

impl SelectionAudio {
    fn pick_variant(&self, cue: SelectionCue) -> Option<Handle<AudioSource>> {
        let pool = match cue {
            SelectionCue::Single => &self.single_cues,
            SelectionCue::Multiple => &self.multi_cues,
        };
        if pool.is_empty() {
            return None;
        }
        let mut rng = rand::thread_rng();
        Some(pool[rng.gen_range(0..pool.len())].clone())
    }
}

pub fn load_selection_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SelectionAudio {
        single_cues: vec![
            asset_server.load("audio/sfx/select_single_0.wav"),
            asset_server.load("audio/sfx/select_single_1.wav"),
        ],
        multi_cues: vec![
            asset_server.load("audio/sfx/select_multi_0.wav"),
            asset_server.load("audio/sfx/select_multi_1.wav"),
        ],
    });
    info!("Queued selection audio cues for loading");
}

/// System: spawns a despawn-on-finish audio player per requested cue, with
/// a random variant so repeated picks do not sound robotic.
pub fn cue_playback_system(
    mut commands: Commands,
    mut cue_events: EventReader<CueRequest>,
    audio: Option<Res<SelectionAudio>>,
    config: Res<SelectionConfig>,
) {
    for request in cue_events.read() {
        let Some(audio) = audio.as_ref() else {
            warn!("selection audio not loaded, dropping {:?} cue", request.cue);
            continue;
        };
        match audio.pick_variant(request.cue) {
            Some(source) => {
                commands.spawn((
                    AudioPlayer::new(source),
                    PlaybackSettings::DESPAWN
                        .with_volume(bevy::audio::Volume::Linear(config.cue_volume)),
                ));
            }
            None => warn!("no audio variants registered for {:?} cue", request.cue),
        }
    }
}
