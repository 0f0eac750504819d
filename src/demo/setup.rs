// Demo scene setup: checkerboard ground, two teams of units, HUD
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;
use std::f32::consts::PI;

use bevy_rts_select::constants::*;
use bevy_rts_select::selection::SelectionChanged;
use bevy_rts_select::{PickCamera, UnitId, UnitRecord, UnitRegistry};

use super::camera::RtsCamera;

#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Links a scene entity back to its registry handle
#[derive(Component)]
pub struct DemoUnit {
    pub unit: UnitId,
}

#[derive(Component)]
pub struct HudText;

/// Registry handle to entity lookup, for order dispatch and despawning
#[derive(Resource, Default)]
pub struct UnitLookup {
    pub by_id: HashMap<UnitId, Entity>,
}

const HUD_HELP: &str = "LMB: Select | Drag: Box select | Shift: Add | RMB: Move | K: Destroy\n\
    Ctrl+1-9: Assign group | 1-9: Recall group | WASD: Pan | Middle-drag: Orbit | Scroll: Zoom";

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Checkerboard ground built from flat cells sharing one mesh
    let cell_size = BATTLEFIELD_SIZE / GROUND_CHECKER_CELLS as f32;
    let cell_mesh = meshes.add(Rectangle::new(cell_size, cell_size));
    let light_cell = materials.add(StandardMaterial {
        base_color: Color::srgb(0.47, 0.31, 0.16),
        perceptual_roughness: 0.8,
        metallic: 0.0,
        ..default()
    });
    let dark_cell = materials.add(StandardMaterial {
        base_color: Color::srgb(0.31, 0.24, 0.12),
        perceptual_roughness: 0.8,
        metallic: 0.0,
        ..default()
    });

    let half = BATTLEFIELD_SIZE / 2.0;
    for row in 0..GROUND_CHECKER_CELLS {
        for col in 0..GROUND_CHECKER_CELLS {
            let material = if (row + col) % 2 == 0 {
                light_cell.clone()
            } else {
                dark_cell.clone()
            };
            commands.spawn((
                Mesh3d(cell_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(
                    (col as f32 + 0.5) * cell_size - half,
                    0.0,
                    (row as f32 + 0.5) * cell_size - half,
                )
                .with_rotation(Quat::from_rotation_x(-PI / 2.0)),
            ));
        }
    }

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 50.0, 0.0),
            rotation: Quat::from_rotation_x(-PI / 4.0),
            ..default()
        },
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.4, 0.4, 0.6),
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    // RTS camera, tagged as the selection pick camera
    let rig = RtsCamera {
        focus: Vec3::ZERO,
        yaw: 0.0,
        pitch: -0.9,
        distance: CAMERA_INITIAL_DISTANCE,
    };
    let mut camera_transform = Transform::default();
    rig.apply_to(&mut camera_transform);
    commands.spawn((
        Camera3d::default(),
        Camera::default(),
        camera_transform,
        rig,
        PickCamera,
    ));

    // HUD with selection count and keybinds
    commands.spawn((
        Text::new(format!("Selected: 0/{}\n{}", MAX_SELECTED, HUD_HELP)),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

pub fn spawn_units(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<UnitRegistry>,
    mut lookup: ResMut<UnitLookup>,
) {
    let unit_mesh = meshes.add(Capsule3d::new(0.8, 1.6));

    let player_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.5, 0.85),
        metallic: 0.3,
        perceptual_roughness: 0.5,
        ..default()
    });
    let enemy_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.75, 0.25, 0.2),
        metallic: 0.2,
        perceptual_roughness: 0.6,
        ..default()
    });

    spawn_team(
        &mut commands,
        &mut registry,
        &mut lookup,
        &unit_mesh,
        &player_material,
        Team::Player,
        20.0,
    );
    // Enemies are not selectable but still block picks in front of friendlies
    spawn_team(
        &mut commands,
        &mut registry,
        &mut lookup,
        &unit_mesh,
        &enemy_material,
        Team::Enemy,
        -20.0,
    );

    info!(
        "spawned {} player and {} enemy units",
        UNITS_PER_TEAM, UNITS_PER_TEAM
    );
}

fn spawn_team(
    commands: &mut Commands,
    registry: &mut UnitRegistry,
    lookup: &mut UnitLookup,
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
    team: Team,
    base_z: f32,
) {
    let mut rng = rand::thread_rng();
    // Rows grow away from the battlefield center
    let row_direction = if base_z >= 0.0 { 1.0 } else { -1.0 };

    for i in 0..UNITS_PER_TEAM {
        let row = i / UNIT_GRID_WIDTH;
        let col = i % UNIT_GRID_WIDTH;

        let x = (col as f32 - (UNIT_GRID_WIDTH as f32 - 1.0) / 2.0) * UNIT_SPACING
            + rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER);
        let z = base_z
            + row as f32 * UNIT_SPACING * row_direction
            + rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER);
        let position = Vec3::new(x, 1.6, z);

        let unit = registry.register(UnitRecord {
            position,
            selectable: team == Team::Player,
            collider_radius: UNIT_COLLIDER_RADIUS,
            footprint_radius: UNIT_FOOTPRINT_RADIUS,
        });

        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(position)
                    .looking_at(position + Vec3::new(0.0, 0.0, -row_direction), Vec3::Y),
                DemoUnit { unit },
                team,
            ))
            .id();
        lookup.by_id.insert(unit, entity);
    }
}

/// System: Mirror entity transforms into the registry so picking sees
/// current positions
pub fn sync_unit_positions(
    mut registry: ResMut<UnitRegistry>,
    units: Query<(&Transform, &DemoUnit)>,
) {
    for (transform, demo_unit) in units.iter() {
        if let Some(record) = registry.get_mut(demo_unit.unit) {
            record.position = transform.translation;
        }
    }
}

/// System: Deregister units whose scene entity despawned outside the
/// explicit removal path
pub fn sync_despawned_units(
    mut removed_units: RemovedComponents<DemoUnit>,
    mut registry: ResMut<UnitRegistry>,
    mut lookup: ResMut<UnitLookup>,
) {
    for entity in removed_units.read() {
        let Some(unit) = lookup
            .by_id
            .iter()
            .find_map(|(&unit, &mapped)| (mapped == entity).then_some(unit))
        else {
            continue;
        };
        lookup.by_id.remove(&unit);
        registry.deregister(unit);
    }
}

/// System: Refresh the HUD line whenever the selection changes
pub fn update_hud_system(
    mut events: EventReader<SelectionChanged>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    for mut text in query.iter_mut() {
        *text = Text::new(format!(
            "Selected: {}/{}\n{}",
            event.selected.len(),
            MAX_SELECTED,
            HUD_HELP
        ));
    }
}
