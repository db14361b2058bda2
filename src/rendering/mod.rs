//! Rendering plugin - draws the arena and turns each game frame into sprites.

use std::collections::HashMap;

use arcade_snake::game::{Board, GameOverReason, GamePhase, GridPosition, Pose, Status};
use arcade_snake::sprite::{Bitmap, SpriteKey};
use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_vector_shapes::prelude::*;

use crate::driver::{GameSession, GameSet};

// Colors
pub const BACKGROUND_COLOR: Color = Color::srgba(0.04, 0.04, 0.04, 1.0);
const CELL_LIGHT_COLOR: Color = Color::srgb(0.545, 0.961, 0.176);
const CELL_DARK_COLOR: Color = Color::srgb(0.431, 0.741, 0.157);
const ARENA_BORDER_COLOR: Color = Color::srgba(0.3, 0.6, 0.2, 1.0);

// Z-index constants for rendering layers
const Z_BACKGROUND: f32 = 0.0;
const Z_BORDER: f32 = 0.1;
const Z_SPRITES: f32 = 1.0;
const Z_SPRITE_STEP: f32 = 0.001;

/// Plugin for arena and sprite rendering.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteImages>()
            .init_resource::<Playback>()
            .add_message::<FrameDrawn>()
            .add_systems(Startup, spawn_arena)
            .add_systems(Update, (draw_frame, animate_sprites).chain().in_set(GameSet::Draw));
    }
}

/// Board size and cell edge in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct BoardLayout {
    pub board: Board,
    pub cell_size: f32,
}

impl BoardLayout {
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.board.width as f32 * self.cell_size,
            self.board.height as f32 * self.cell_size,
        )
    }

    /// Center of `pos` in world space. Row 0 is the top of the window.
    pub fn translation(&self, pos: GridPosition, z: f32) -> Vec3 {
        self.point(pos.col as f32, pos.row as f32, z)
    }

    /// Same as [`Self::translation`] for a cell position part way between cells.
    pub fn point(&self, col: f32, row: f32, z: f32) -> Vec3 {
        let x = (col - self.board.width as f32 / 2.0 + 0.5) * self.cell_size;
        let y = (self.board.height as f32 / 2.0 - row - 0.5) * self.cell_size;
        Vec3::new(x, y, z)
    }
}

/// Message sent after a frame hit the screen.
#[derive(Message)]
pub struct FrameDrawn {
    pub status: Status,
    pub phase: GamePhase,
    pub game_over: Option<GameOverReason>,
    pub cheat: bool,
}

/// Uploaded images, one per rendered sprite variant.
#[derive(Resource, Default)]
struct SpriteImages(HashMap<SpriteKey, Handle<Image>>);

/// Marks sprites that belong to the current frame, by drawing order.
#[derive(Component)]
struct BoardSprite {
    slot: usize,
}

/// Keyframes of the frame on screen, spread over its tick interval.
#[derive(Resource, Default)]
struct Playback {
    keyframes: Vec<Vec<Pose>>,
    timer: Timer,
    shown: usize,
}

impl Playback {
    /// Index of the keyframe due at the current point of the interval.
    fn due(&self) -> usize {
        let steps = self.keyframes.len().max(1);
        ((self.timer.fraction() * steps as f32) as usize).min(steps - 1)
    }
}

fn sprite_z(slot: usize) -> f32 {
    Z_SPRITES + slot as f32 * Z_SPRITE_STEP
}

fn image_for(uploaded: &mut SpriteImages, images: &mut Assets<Image>, pose: &Pose) -> Handle<Image> {
    uploaded
        .0
        .entry(pose.key.clone())
        .or_insert_with(|| images.add(to_image(&pose.bitmap)))
        .clone()
}

fn to_image(bitmap: &Bitmap) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: bitmap.width(),
            height: bitmap.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bitmap.rgba().to_vec(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.sampler = ImageSampler::nearest();
    image
}

/// Startup system - camera, checkerboard arena and its border.
fn spawn_arena(mut commands: Commands, layout: Res<BoardLayout>) {
    commands.spawn(Camera2d);

    let cell = Vec2::splat(layout.cell_size);
    for pos in layout.board.cells() {
        let color = if (pos.col + pos.row) % 2 == 0 {
            CELL_LIGHT_COLOR
        } else {
            CELL_DARK_COLOR
        };
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(cell),
                ..default()
            },
            Transform::from_translation(layout.translation(pos, Z_BACKGROUND)),
        ));
    }

    let arena = layout.pixel_size();
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: ARENA_BORDER_COLOR,
            hollow: true,
            thickness: 4.0,
            corner_radii: Vec4::splat(0.02),
            transform: Transform::from_xyz(0.0, 0.0, Z_BORDER),
            ..ShapeConfig::default_2d()
        },
        Vec2::new(arena.x + 4.0, arena.y + 4.0),
    ));
}

/// System to replace the previous frame's sprites with the pending frame.
fn draw_frame(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    layout: Res<BoardLayout>,
    mut images: ResMut<Assets<Image>>,
    mut uploaded: ResMut<SpriteImages>,
    mut playback: ResMut<Playback>,
    drawn: Query<Entity, With<BoardSprite>>,
    mut frame_writer: MessageWriter<FrameDrawn>,
) {
    let Some(frame) = session.0.renderer_mut().take() else {
        return;
    };

    for entity in drawn.iter() {
        commands.entity(entity).despawn();
    }

    if let Some(first) = frame.keyframes.first() {
        for (slot, pose) in first.iter().enumerate() {
            let image = image_for(&mut uploaded, &mut images, pose);
            commands.spawn((
                Sprite {
                    image,
                    custom_size: Some(Vec2::splat(layout.cell_size)),
                    ..default()
                },
                Transform::from_translation(layout.point(pose.col, pose.row, sprite_z(slot))),
                BoardSprite { slot },
            ));
        }
    }

    *playback = Playback {
        keyframes: frame.keyframes,
        timer: Timer::new(frame.status.interval, TimerMode::Once),
        shown: 0,
    };

    frame_writer.write(FrameDrawn {
        status: frame.status,
        phase: frame.phase,
        game_over: frame.game_over,
        cheat: frame.cheat,
    });
}

/// System to move the frame's sprites on to the keyframe due now.
fn animate_sprites(
    time: Res<Time>,
    layout: Res<BoardLayout>,
    mut images: ResMut<Assets<Image>>,
    mut uploaded: ResMut<SpriteImages>,
    mut playback: ResMut<Playback>,
    mut sprites: Query<(&BoardSprite, &mut Sprite, &mut Transform)>,
) {
    playback.timer.tick(time.delta());
    let due = playback.due();
    if due == playback.shown {
        return;
    }
    let Some(poses) = playback.keyframes.get(due) else {
        return;
    };

    for (board_sprite, mut sprite, mut transform) in sprites.iter_mut() {
        let Some(pose) = poses.get(board_sprite.slot) else {
            continue;
        };
        sprite.image = image_for(&mut uploaded, &mut images, pose);
        transform.translation = layout.point(pose.col, pose.row, sprite_z(board_sprite.slot));
    }
    playback.shown = due;
}
