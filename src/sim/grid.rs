//! Tile maze: lookup, move legality, and level instantiation

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// Tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Item,
    PlayerSpawn,
    EnemySpawn,
}

impl Tile {
    /// Decode a template cell (0 empty, 1 wall, 2 item, 3 player, 4 enemy)
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Tile::Wall,
            2 => Tile::Item,
            3 => Tile::PlayerSpawn,
            4 => Tile::EnemySpawn,
            _ => Tile::Empty,
        }
    }
}

/// Immutable level layout, row-major
pub type MapTemplate = [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

/// Dungeon with four rooms joined by corridors
pub const DEFAULT_MAP: MapTemplate = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 3, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 2, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 4, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 2, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// The four cardinal steps, in enemy selection order (up, down, left, right)
pub const CARDINALS: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
];

/// Spawn points pulled out of a template when a level is instantiated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spawns {
    /// Last player spawn marker found (row-major scan); origin+1 if none
    pub player: IVec2,
    /// Enemy spawn markers in row-major order
    pub enemies: Vec<IVec2>,
}

/// Working copy of the maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a working grid from a template, converting spawn markers to
    /// empty floor and returning where they were.
    pub fn from_template(template: &MapTemplate) -> (Self, Spawns) {
        let mut tiles = Vec::with_capacity((GRID_WIDTH * GRID_HEIGHT) as usize);
        let mut spawns = Spawns {
            player: IVec2::ONE,
            enemies: Vec::new(),
        };

        for (y, row) in template.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                let tile = match Tile::from_code(code) {
                    Tile::PlayerSpawn => {
                        spawns.player = pos;
                        Tile::Empty
                    }
                    Tile::EnemySpawn => {
                        spawns.enemies.push(pos);
                        Tile::Empty
                    }
                    other => other,
                };
                tiles.push(tile);
            }
        }

        (Self { tiles }, spawns)
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < GRID_WIDTH && pos.y >= 0 && pos.y < GRID_HEIGHT
    }

    #[inline]
    fn index(pos: IVec2) -> usize {
        (pos.y * GRID_WIDTH + pos.x) as usize
    }

    /// Tile at a position, `None` when out of bounds
    pub fn get(&self, pos: IVec2) -> Option<Tile> {
        self.in_bounds(pos).then(|| self.tiles[Self::index(pos)])
    }

    pub fn is_wall(&self, pos: IVec2) -> bool {
        self.get(pos) == Some(Tile::Wall)
    }

    /// A destination is legal iff it is in bounds and not a wall
    pub fn can_move(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(tile) if tile != Tile::Wall)
    }

    /// True if any of the four orthogonal neighbours is a wall
    pub fn is_adjacent_to_wall(&self, pos: IVec2) -> bool {
        CARDINALS.iter().any(|&step| self.is_wall(pos + step))
    }

    /// Legal cardinal steps out of `pos`, in `CARDINALS` order
    pub fn legal_steps(&self, pos: IVec2) -> impl Iterator<Item = IVec2> + '_ {
        CARDINALS
            .iter()
            .copied()
            .filter(move |&step| self.can_move(pos + step))
    }

    /// Pick up an item; returns true if one was there
    pub fn take_item(&mut self, pos: IVec2) -> bool {
        if self.get(pos) == Some(Tile::Item) {
            self.tiles[Self::index(pos)] = Tile::Empty;
            true
        } else {
            false
        }
    }

    pub fn count_items(&self) -> u32 {
        self.tiles.iter().filter(|&&t| t == Tile::Item).count() as u32
    }

    /// Row-major iteration for renderers
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &tile)| {
            let i = i as i32;
            (IVec2::new(i % GRID_WIDTH, i / GRID_WIDTH), tile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_consumes_spawns() {
        let (grid, spawns) = Grid::from_template(&DEFAULT_MAP);
        assert_eq!(spawns.player, IVec2::new(3, 2));
        assert_eq!(
            spawns.enemies,
            vec![IVec2::new(9, 7), IVec2::new(9, 11), IVec2::new(15, 12)]
        );
        assert_eq!(grid.get(spawns.player), Some(Tile::Empty));
        for &enemy in &spawns.enemies {
            assert_eq!(grid.get(enemy), Some(Tile::Empty));
        }
        assert!(grid.iter().all(|(_, t)| !matches!(t, Tile::PlayerSpawn | Tile::EnemySpawn)));
    }

    #[test]
    fn test_border_is_wall() {
        let (grid, _) = Grid::from_template(&DEFAULT_MAP);
        for x in 0..GRID_WIDTH {
            assert!(grid.is_wall(IVec2::new(x, 0)));
            assert!(grid.is_wall(IVec2::new(x, GRID_HEIGHT - 1)));
        }
        for y in 0..GRID_HEIGHT {
            assert!(grid.is_wall(IVec2::new(0, y)));
            assert!(grid.is_wall(IVec2::new(GRID_WIDTH - 1, y)));
        }
    }

    #[test]
    fn test_can_move() {
        let (grid, _) = Grid::from_template(&DEFAULT_MAP);
        assert!(grid.can_move(IVec2::new(1, 1)));
        assert!(!grid.can_move(IVec2::new(0, 0)));
        assert!(!grid.can_move(IVec2::new(-1, 3)));
        assert!(!grid.can_move(IVec2::new(GRID_WIDTH, 3)));
        // Items are walkable
        assert!(grid.can_move(IVec2::new(15, 2)));
    }

    #[test]
    fn test_wall_adjacency() {
        let (grid, _) = Grid::from_template(&DEFAULT_MAP);
        assert!(grid.is_adjacent_to_wall(IVec2::new(1, 1)));
        assert!(!grid.is_adjacent_to_wall(IVec2::new(3, 3)));
    }

    #[test]
    fn test_take_item() {
        let (mut grid, _) = Grid::from_template(&DEFAULT_MAP);
        assert_eq!(grid.count_items(), 3);
        assert!(grid.take_item(IVec2::new(15, 2)));
        assert!(!grid.take_item(IVec2::new(15, 2)));
        assert_eq!(grid.count_items(), 2);
    }

    #[test]
    fn test_legal_steps_order() {
        let (grid, _) = Grid::from_template(&DEFAULT_MAP);
        // Top-left corner of the first room: only down and right are open
        let steps: Vec<_> = grid.legal_steps(IVec2::new(1, 1)).collect();
        assert_eq!(steps, vec![IVec2::new(0, 1), IVec2::new(1, 0)]);
    }
}
