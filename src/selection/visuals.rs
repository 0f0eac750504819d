// Selection feedback visuals - rings under selected units, drag box overlay
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use std::collections::HashSet;

use crate::constants::*;
use crate::registry::{UnitId, UnitRecord, UnitRegistry};

use super::SelectionContext;

/// Ring entity marker, pointing back at the unit it sits under
#[derive(Component)]
pub struct SelectionRing {
    pub unit: UnitId,
    pub is_primary: bool,
}

/// Marker for the drag box overlay node
#[derive(Component)]
pub struct DragRectVisual;

/// System: Update and cleanup selection ring visuals
///
/// Rings spawn for newly selected units, despawn for departed ones, and
/// follow their unit every frame. A member whose registry slot has died
/// simply loses its ring; the selection itself is cleaned up lazily by
/// the next mutating operation, not here.
pub fn selection_ring_system(
    mut commands: Commands,
    context: Res<SelectionContext>,
    registry: Res<UnitRegistry>,
    mut existing_rings: Query<(
        Entity,
        &mut SelectionRing,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Remove rings for deselected or dead units
    for (entity, ring, _, _) in existing_rings.iter() {
        let should_remove =
            !context.core.is_selected(ring.unit) || registry.get(ring.unit).is_none();
        if should_remove {
            commands.entity(entity).despawn();
        }
    }

    // Find which selected units already have rings
    let ringed: HashSet<UnitId> = existing_rings.iter().map(|(_, ring, _, _)| ring.unit).collect();

    let primary = context.core.primary();

    // Create rings for newly selected units
    for &unit in context.core.selected() {
        if ringed.contains(&unit) {
            continue;
        }
        let Some(record) = registry.get(unit) else { continue };
        spawn_selection_ring(
            &mut commands,
            &mut meshes,
            &mut materials,
            unit,
            record,
            primary == Some(unit),
        );
    }

    // Update positions and colors of surviving rings
    for (_, mut ring, mut transform, material_handle) in existing_rings.iter_mut() {
        if !context.core.is_selected(ring.unit) {
            continue;
        }
        let Some(record) = registry.get(ring.unit) else { continue };

        transform.translation =
            Vec3::new(record.position.x, SELECTION_RING_HEIGHT, record.position.z);

        // Recolor in place when a unit gains or loses primary status
        let is_now_primary = primary == Some(ring.unit);
        if ring.is_primary != is_now_primary {
            ring.is_primary = is_now_primary;
            if let Some(material) = materials.get_mut(&material_handle.0) {
                if is_now_primary {
                    material.base_color = PRIMARY_RING_COLOR;
                    material.emissive = LinearRgba::new(0.3, 0.9, 1.0, 1.0);
                } else {
                    material.base_color = SELECTION_RING_COLOR;
                    material.emissive = LinearRgba::new(0.1, 0.6, 0.8, 1.0);
                }
            }
        }
    }
}

/// Spawn a flat ring sized to the unit's footprint
fn spawn_selection_ring(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    unit: UnitId,
    record: &UnitRecord,
    is_primary: bool,
) {
    // Torus lies flat in XZ out of the box
    let mesh = meshes.add(Torus::new(
        record.footprint_radius,
        record.footprint_radius + SELECTION_RING_THICKNESS,
    ));

    let (base_color, emissive) = if is_primary {
        (PRIMARY_RING_COLOR, LinearRgba::new(0.3, 0.9, 1.0, 1.0))
    } else {
        (SELECTION_RING_COLOR, LinearRgba::new(0.1, 0.6, 0.8, 1.0))
    };

    let material = materials.add(StandardMaterial {
        base_color,
        emissive,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None, // Visible from both sides
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::new(
            record.position.x,
            SELECTION_RING_HEIGHT,
            record.position.z,
        )),
        SelectionRing { unit, is_primary },
        NotShadowCaster,
        NotShadowReceiver,
    ));
}

/// System: Render the drag rectangle while a box drag is in progress
pub fn drag_rect_visual_system(
    mut commands: Commands,
    context: Res<SelectionContext>,
    existing_visual: Query<Entity, With<DragRectVisual>>,
) {
    // Despawn existing visual (we'll recreate it with new dimensions)
    for entity in existing_visual.iter() {
        commands.entity(entity).despawn();
    }

    let Some((start, current)) = context.drag.drag_corners() else {
        return;
    };

    let min_x = start.x.min(current.x);
    let min_y = start.y.min(current.y);
    let width = (start.x - current.x).abs();
    let height = (start.y - current.y).abs();

    // Skip if too small
    if width < 2.0 || height < 2.0 {
        return;
    }

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(min_x),
            top: Val::Px(min_y),
            width: Val::Px(width),
            height: Val::Px(height),
            border: UiRect::all(Val::Px(DRAG_RECT_BORDER_PX)),
            ..default()
        },
        BackgroundColor(DRAG_RECT_FILL_COLOR),
        BorderColor(DRAG_RECT_BORDER_COLOR),
        DragRectVisual,
    ));
}
