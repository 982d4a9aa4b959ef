//! Level setup and the per-frame schedule.
//!
//! [`Level::build`] turns the four map layers into entities, inserts every
//! resource the systems read, registers the combat observers and prepares a
//! strictly chained schedule. [`Level::tick`] stores the input snapshot,
//! advances the clock and runs one frame.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::{debug, info, warn};

use crate::components::animation::Animation;
use crate::components::boxcollider::{BoxCollider, CHARACTER_INSET_Y};
use crate::components::enemy::{ENEMY_INVULNERABILITY, Enemy};
use crate::components::heading::{Facing, Heading};
use crate::components::health::Health;
use crate::components::player::{PLAYER_INVULNERABILITY, Player};
use crate::components::sprite::Sprite;
use crate::components::tile::{Destructible, Tile, TileCategory};
use crate::components::weapon::{magic_image_path, weapon_icon_path, weapon_image_path};
use crate::error::LevelError;
use crate::events::combat::{observe_enemy_defeated, observe_player_hurt};
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::assets::{ImageInfo, ImageLoader, import_numbered_folder};
use crate::resources::camera2d::{Camera2D, FloorLayer};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamedata::{
    EnemyKind, GameData, MagicKind, PLAYER_MAP_CODE, TILE_SIZE, WeaponKind,
};
use crate::resources::group::{GroupKind, SpriteGroups};
use crate::resources::input::InputState;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::{MapLayers, cell_origin, occupied_cells};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animate_enemies, animate_player};
use crate::systems::camera::camera_follow;
use crate::systems::combat::{enemy_attack_logic, player_attack_logic};
use crate::systems::enemy::enemy_ai;
use crate::systems::hud::draw_hud;
use crate::systems::player::{player_control, refresh_vulnerability};
use crate::systems::prune::prune_defeated;
use crate::systems::render::{Canvas, render_pass};
use crate::systems::time::update_world_time;

pub const FLOOR_IMAGE: &str = "graphics/tilemap/ground.png";
pub const GRASS_FOLDER: &str = "graphics/Grass";
pub const OBJECTS_FOLDER: &str = "graphics/objects";

const BOUNDARY_GROUPS: &[GroupKind] = &[GroupKind::Obstacles];
const GRASS_GROUPS: &[GroupKind] = &[
    GroupKind::Visible,
    GroupKind::Obstacles,
    GroupKind::Attackable,
];
const OBJECT_GROUPS: &[GroupKind] = &[GroupKind::Visible, GroupKind::Obstacles];

/// A running level: the entity arena, its schedule and the player id.
pub struct Level {
    world: World,
    schedule: Schedule,
    player: Entity,
}

/// Images shared by tile construction.
struct TileImages {
    grass: Vec<ImageInfo>,
    objects: Vec<ImageInfo>,
}

fn load_folder(loader: &dyn ImageLoader, dir: &Path) -> Vec<ImageInfo> {
    match import_numbered_folder(loader, dir) {
        Ok(images) => images,
        Err(e) => {
            warn!("{}; tiles fall back to untextured squares", e);
            Vec::new()
        }
    }
}

/// Texture key and size of an optional image, `TILE_SIZE` squares otherwise.
fn image_or_tile(image: Option<&ImageInfo>) -> (Option<Arc<str>>, i32, i32) {
    match image {
        Some(info) => (Some(info.key.clone()), info.width, info.height),
        None => (None, TILE_SIZE, TILE_SIZE),
    }
}

impl Level {
    pub fn build(
        config: &GameConfig,
        data: GameData,
        layers: &MapLayers,
        loader: &dyn ImageLoader,
    ) -> Result<Level, LevelError> {
        let root = config.assets_root.as_path();
        let mut world = World::new();

        let mut animations = AnimationStore::default();
        animations.load_player(loader, root);
        animations.load_monsters(loader, root);

        let mut textures = TextureStore::default();
        for kind in WeaponKind::ALL {
            for facing in Facing::ALL {
                textures.load(loader, &config.asset_path(weapon_image_path(kind, facing)));
            }
            textures.load(loader, &config.asset_path(weapon_icon_path(kind)));
        }
        for kind in MagicKind::ALL {
            textures.load(loader, &config.asset_path(magic_image_path(kind)));
        }
        let floor = match textures.load(loader, &config.asset_path(FLOOR_IMAGE)) {
            Some(info) => FloorLayer {
                tex_key: Some(info.key.clone()),
                rect: Rect::new(0, 0, info.width, info.height),
            },
            None => FloorLayer::default(),
        };

        let images = TileImages {
            grass: load_folder(loader, &config.asset_path(GRASS_FOLDER)),
            objects: load_folder(loader, &config.asset_path(OBJECTS_FOLDER)),
        };

        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());
        world.insert_resource(SpriteGroups::default());
        world.insert_resource(Camera2D::new(
            config.window_width as i32,
            config.window_height as i32,
        ));
        world.insert_resource(floor);

        let mut rng = fastrand::Rng::with_seed(config.seed);
        spawn_tiles(&mut world, layers, &images, &mut rng)?;
        let player = spawn_characters(&mut world, layers, &data, &animations)?;

        world.insert_resource(animations);
        world.insert_resource(textures);
        world.insert_resource(config.clone());
        world.insert_resource(data);

        world.add_observer(observe_enemy_defeated);
        world.add_observer(observe_player_hurt);
        world.flush();

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                refresh_vulnerability,
                player_control,
                player_attack_logic,
                enemy_ai,
                enemy_attack_logic,
                animate_player,
                animate_enemies,
                prune_defeated,
                camera_follow,
            )
                .chain(),
        );

        let mut level = Level {
            world,
            schedule,
            player,
        };
        level.center_camera();
        {
            let groups = level.world.resource::<SpriteGroups>();
            let counts: Vec<String> = [&groups.visible, &groups.obstacles, &groups.attackable]
                .iter()
                .map(|group| format!("{} {}", group.len(), group.name()))
                .collect();
            info!("Level ready: {}", counts.join(", "));
        }
        Ok(level)
    }

    /// Runs one frame with `input` held for `dt` seconds.
    pub fn tick(&mut self, input: InputState, dt: f32) {
        self.world.insert_resource(input);
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    /// World pass followed by the HUD.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        render_pass(&mut self.world, canvas);
        draw_hud(&mut self.world, canvas);
    }

    pub fn is_game_over(&self) -> bool {
        self.world
            .get::<Health>(self.player)
            .is_none_or(|health| !health.alive)
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Alive enemies still in the attackable group.
    pub fn enemy_count(&self) -> usize {
        let groups = self.world.resource::<SpriteGroups>();
        groups
            .attackable
            .iter()
            .filter(|&e| {
                self.world.get::<Enemy>(e).is_some()
                    && self.world.get::<Health>(e).is_some_and(|h| h.alive)
            })
            .count()
    }

    fn center_camera(&mut self) {
        let Some(collider) = self.world.get::<BoxCollider>(self.player).copied() else {
            return;
        };
        self.world.resource_mut::<Camera2D>().center_on(collider.rect);
    }
}

fn spawn_tiles(
    world: &mut World,
    layers: &MapLayers,
    images: &TileImages,
    rng: &mut fastrand::Rng,
) -> Result<(), LevelError> {
    let mut spawned: Vec<(Entity, &'static [GroupKind])> = Vec::new();

    for (row, column, _) in occupied_cells("boundary", &layers.boundary)? {
        let (x, y) = cell_origin(row, column);
        let tile = Tile::new(TileCategory::Invisible);
        let entity = world
            .spawn((tile, tile.collider(x, y, TILE_SIZE, TILE_SIZE)))
            .id();
        spawned.push((entity, BOUNDARY_GROUPS));
    }

    for (row, column, _) in occupied_cells("grass", &layers.grass)? {
        let (x, y) = cell_origin(row, column);
        let image = if images.grass.is_empty() {
            None
        } else {
            images.grass.get(rng.usize(..images.grass.len()))
        };
        let (key, w, h) = image_or_tile(image);
        let tile = Tile::new(TileCategory::Grass);
        let entity = world
            .spawn((tile, tile.collider(x, y, w, h), Sprite::new(key), Destructible))
            .id();
        spawned.push((entity, GRASS_GROUPS));
    }

    for (row, column, code) in occupied_cells("objects", &layers.objects)? {
        let (x, y) = cell_origin(row, column);
        let image = usize::try_from(code)
            .ok()
            .and_then(|index| images.objects.get(index));
        if image.is_none() {
            warn!("No object image for code {} at ({}, {})", code, row, column);
        }
        let (key, w, h) = image_or_tile(image);
        let tile = Tile::new(TileCategory::Object);
        let entity = world
            .spawn((tile, tile.collider(x, y, w, h), Sprite::new(key)))
            .id();
        spawned.push((entity, OBJECT_GROUPS));
    }

    let mut groups = world.resource_mut::<SpriteGroups>();
    for (entity, kinds) in spawned {
        groups.add(entity, kinds);
    }
    Ok(())
}

/// Character rect at a cell origin, sized by the first frame of `track`.
fn character_collider(animations: &AnimationStore, track: &str, x: i32, y: i32) -> BoxCollider {
    let (w, h) = animations
        .frame(track, 0)
        .map(|f| (f.width, f.height))
        .unwrap_or((TILE_SIZE, TILE_SIZE));
    BoxCollider::inset(Rect::new(x, y, w, h), CHARACTER_INSET_Y)
}

fn first_frame_sprite(animations: &AnimationStore, track: &str) -> Sprite {
    Sprite::new(animations.frame(track, 0).map(|f| f.key.clone()))
}

/// Spawns the player, then every enemy with the player as damage sink.
fn spawn_characters(
    world: &mut World,
    layers: &MapLayers,
    data: &GameData,
    animations: &AnimationStore,
) -> Result<Entity, LevelError> {
    let cells = occupied_cells("entities", &layers.entities)?;

    let mut player = None;
    for &(row, column, code) in &cells {
        if code != PLAYER_MAP_CODE {
            continue;
        }
        if player.is_some() {
            warn!("Extra player spawn at ({}, {}) ignored", row, column);
            continue;
        }
        let (x, y) = cell_origin(row, column);
        let component = Player::new(data.player);
        let track = component.animation_track(Facing::Down);
        let entity = world
            .spawn((
                character_collider(animations, &track, x, y),
                first_frame_sprite(animations, &track),
                Animation::new(track),
                Heading::facing(Facing::Down),
                Health::new(data.player.health, PLAYER_INVULNERABILITY),
                component,
            ))
            .id();
        world
            .resource_mut::<SpriteGroups>()
            .add(entity, &[GroupKind::Visible]);
        debug!("Player {:?} at ({}, {})", entity, x, y);
        player = Some(entity);
    }
    let player = player.ok_or(LevelError::MissingPlayer)?;

    for &(row, column, code) in &cells {
        if code == PLAYER_MAP_CODE {
            continue;
        }
        let kind = EnemyKind::from_map_code(code)
            .ok_or(LevelError::UnknownEntityCode { code, row, column })?;
        let stats = data.monster(kind)?.clone();
        let (x, y) = cell_origin(row, column);
        let health = Health::new(stats.health, ENEMY_INVULNERABILITY);
        let enemy = Enemy::new(kind, stats, player);
        let track = enemy.animation_track();
        let entity = world
            .spawn((
                character_collider(animations, &track, x, y),
                first_frame_sprite(animations, &track),
                Animation::new(track),
                Heading::default(),
                health,
                enemy,
            ))
            .id();
        world
            .resource_mut::<SpriteGroups>()
            .add(entity, &[GroupKind::Visible, GroupKind::Attackable]);
        debug!("{} {:?} at ({}, {})", kind, entity, x, y);
    }
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assets::tests::FixedSizeLoader;
    use crate::resources::tilemap::parse_csv_layout;

    fn headless_config() -> GameConfig {
        GameConfig {
            assets_root: "/nonexistent/dokutsu-assets".into(),
            ..GameConfig::new()
        }
    }

    #[test]
    fn missing_assets_still_build_a_level() {
        let layers = MapLayers {
            boundary: parse_csv_layout("395,395,395\n395,-1,395\n395,395,395"),
            entities: parse_csv_layout("-1,-1,-1\n-1,394,-1\n-1,-1,-1"),
            ..Default::default()
        };
        let level = Level::build(
            &headless_config(),
            GameData::default(),
            &layers,
            &FixedSizeLoader(64, 64),
        )
        .unwrap();
        let world = level.world();
        let collider = world.get::<BoxCollider>(level.player()).unwrap();
        assert_eq!(collider.rect, Rect::new(64, 64, 64, 64));
        assert_eq!(collider.hitbox, Rect::new(64, 74, 64, 44));
        assert_eq!(world.resource::<SpriteGroups>().obstacles.len(), 8);
        assert!(!level.is_game_over());
    }

    #[test]
    fn objects_use_their_numbered_image_size() {
        let layers = MapLayers {
            entities: parse_csv_layout("394"),
            objects: parse_csv_layout("-1,7"),
            ..Default::default()
        };
        let level = Level::build(
            &headless_config(),
            GameData::default(),
            &layers,
            &FixedSizeLoader(64, 64),
        )
        .unwrap();
        let groups = level.world().resource::<SpriteGroups>();
        assert_eq!(groups.obstacles.len(), 1);
        let object = groups.obstacles.sprites()[0];
        let collider = level.world().get::<BoxCollider>(object).unwrap();
        assert_eq!(collider.rect, Rect::new(64, 0, 64, 64));
        assert!(level.world().get::<Sprite>(object).unwrap().tex_key.is_none());
    }
}
