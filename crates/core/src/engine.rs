//! Engine module - the match-3 simulation state machine
//!
//! [`Match3Game`] owns the grid, the RNG and the goal tracker of one level
//! attempt. Every public action runs to completion before returning: the
//! swap or booster is applied, specials fire, matches are processed, the
//! cascade loop runs until the board is stable and the end conditions are
//! evaluated. Observable changes are appended to an event buffer that the
//! caller drains with [`Match3Game::consume_events`].
//!
//! Invalid input never errors: rejected actions return
//! [`SwapResult::Rejected`] or `false` and leave the engine untouched.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use log::{debug, trace, warn};

use crate::cell::{Cell, Special};
use crate::error::InitError;
use crate::goals::GoalTracker;
use crate::grid::Grid;
use crate::level::{LayoutEntry, LevelConfig, Placement};
use crate::matcher::{find_matches, has_matches, MatchGroup};
use crate::rng::SeededRandom;
use crate::snapshot::GameSnapshot;
use crate::spawn::SpawnTable;
use crate::tuning::{BossTuning, RemoteTuning};
use crate::types::{
    BoosterType, ClearSource, Coord, EndResult, GameState, LevelResult, LevelType, LogicEvent,
    RocketOrientation, SpecialKind, SwapResult, TileColor, MAX_FILL_ATTEMPTS,
};

/// Cells in a bomb's 3x3 blast.
const BOMB_AREA: u32 = 9;

/// Fewest distinct colours the cascade loop can settle with.
const MIN_ENGINE_COLORS: usize = 2;

#[derive(Debug, Clone)]
pub struct Match3Game {
    state: GameState,
    grid: Grid,
    rng: SeededRandom,
    spawn: SpawnTable,
    goals: GoalTracker,
    tuning: BossTuning,
    /// Remote fallback weights for colours a level leaves unweighted.
    spawn_defaults: BTreeMap<TileColor, u32>,
    level_type: LevelType,
    seed: u64,
    remaining_moves: u32,
    /// `None` on non-boss levels.
    boss_hp: Option<u32>,
    moves_used: u32,
    boosters_used: u32,
    reward_coins: u32,
    events: Vec<LogicEvent>,
    end_result: Option<EndResult>,
}

impl Default for Match3Game {
    fn default() -> Self {
        Self::new(BossTuning::default())
    }
}

impl Match3Game {
    /// Create an idle engine. Call [`Match3Game::initialize`] before playing.
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            state: GameState::Idle,
            grid: Grid::default(),
            rng: SeededRandom::default(),
            spawn: SpawnTable::default(),
            goals: GoalTracker::default(),
            tuning,
            spawn_defaults: BTreeMap::new(),
            level_type: LevelType::Normal,
            seed: 0,
            remaining_moves: 0,
            boss_hp: None,
            moves_used: 0,
            boosters_used: 0,
            reward_coins: 0,
            events: Vec::new(),
            end_result: None,
        }
    }

    /// Idle engine configured from a remote tuning document.
    pub fn from_remote(remote: &RemoteTuning) -> Self {
        Self::new(remote.boss).with_spawn_defaults(remote.spawn_weights_default.clone())
    }

    pub fn with_spawn_defaults(mut self, defaults: BTreeMap<TileColor, u32>) -> Self {
        self.spawn_defaults = defaults;
        self
    }

    /// Create and initialize in one step.
    pub fn start(level: &LevelConfig, seed: u64, tuning: BossTuning) -> Result<Self, InitError> {
        let mut game = Self::new(tuning);
        game.initialize(level, seed)?;
        Ok(game)
    }

    /// Build the board for `level` and enter `Running`.
    ///
    /// Only accepted once, from `Idle`.
    pub fn initialize(&mut self, level: &LevelConfig, seed: u64) -> Result<(), InitError> {
        if self.state != GameState::Idle {
            return Err(InitError::AlreadyInitialized);
        }
        if level.board.colors.is_empty() {
            return Err(InitError::EmptyColors);
        }
        let distinct = level.board.distinct_colors();
        if distinct < MIN_ENGINE_COLORS {
            return Err(InitError::TooFewColors { distinct });
        }
        let (width, height) = (level.board.width, level.board.height);
        if width == 0 || height == 0 {
            return Err(InitError::ZeroDimension { width, height });
        }
        let boss_hp = match (level.level_type, level.boss) {
            (LevelType::BossAttack, Some(boss)) => Some(boss.hp),
            (LevelType::BossAttack, None) => return Err(InitError::MissingBoss),
            (LevelType::Normal, _) => None,
        };

        debug!(
            "initialize level={} {}x{} type={:?} seed={}",
            level.id, width, height, level.level_type, seed
        );

        self.grid = Grid::new(width as usize, height as usize);
        self.rng = SeededRandom::new(seed);
        self.spawn = SpawnTable::build(&level.board, &self.spawn_defaults);
        self.goals = GoalTracker::new(level.goals.clone());
        self.level_type = level.level_type;
        self.seed = seed;
        self.remaining_moves = level.moves;
        self.boss_hp = boss_hp;
        self.moves_used = 0;
        self.boosters_used = 0;
        self.reward_coins = level.rewards.coins;
        self.events.clear();
        self.end_result = None;

        self.fill_board();
        self.apply_layout(level);
        self.state = GameState::Running;
        Ok(())
    }

    /// Swap two orthogonally adjacent cells.
    ///
    /// Accepted when a special tile is involved or the exchange produces at
    /// least one match; otherwise the exchange is reverted. A rejected swap
    /// changes nothing and emits no events.
    pub fn try_swap(&mut self, a: Coord, b: Coord) -> SwapResult {
        if self.state != GameState::Running {
            trace!("swap {a}->{b} rejected: state {:?}", self.state);
            return SwapResult::Rejected;
        }
        let (Some(&cell_a), Some(&cell_b)) = (self.grid.get(a), self.grid.get(b)) else {
            trace!("swap {a}->{b} rejected: out of bounds");
            return SwapResult::Rejected;
        };
        if !a.is_adjacent(b) || !cell_a.is_swappable() || !cell_b.is_swappable() {
            trace!("swap {a}->{b} rejected: not adjacent or not swappable");
            return SwapResult::Rejected;
        }

        let special_a = cell_a.as_special();
        let special_b = cell_b.as_special();

        self.grid.swap(a, b);
        let groups = find_matches(&self.grid);
        if groups.is_empty() && special_a.is_none() && special_b.is_none() {
            self.grid.swap(a, b);
            trace!("swap {a}->{b} rejected: no match");
            return SwapResult::Rejected;
        }

        self.events.push(LogicEvent::Swap { a, b });

        // After the exchange the special that started at `a` sits at `b`.
        match (special_a, special_b) {
            (Some(first), Some(second)) => self.resolve_combo(a, b, first, second),
            (Some(special), None) => self.activate_special(b, special),
            (None, Some(special)) => self.activate_special(a, special),
            (None, None) => {}
        }

        if !groups.is_empty() {
            self.process_matches(groups);
        }
        self.cascade();

        self.remaining_moves = self.remaining_moves.saturating_sub(1);
        self.moves_used += 1;
        self.check_end_conditions();
        SwapResult::Accepted
    }

    /// Use a booster. Returns false (and changes nothing) when the engine is
    /// not running or the target is missing, out of bounds or empty.
    pub fn use_booster(&mut self, booster: BoosterType, target: Option<Coord>) -> bool {
        if self.state != GameState::Running {
            return false;
        }

        match booster {
            BoosterType::Hammer => {
                let Some(pos) = target else {
                    return false;
                };
                match self.grid.get(pos) {
                    Some(cell) if !cell.is_empty() => {}
                    _ => {
                        trace!("hammer at {pos} rejected");
                        return false;
                    }
                }
                self.hammer(pos);
            }
        }

        self.cascade();
        self.boosters_used += 1;
        self.check_end_conditions();
        true
    }

    /// Drain the event buffer.
    pub fn consume_events(&mut self) -> Vec<LogicEvent> {
        std::mem::take(&mut self.events)
    }

    /// Present once the engine left `Running`.
    pub fn end_result(&self) -> Option<EndResult> {
        self.end_result
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn remaining_moves(&self) -> u32 {
        self.remaining_moves
    }

    /// `None` means "not a boss level".
    pub fn boss_hp(&self) -> Option<u32> {
        self.boss_hp
    }

    pub fn moves_used(&self) -> u32 {
        self.moves_used
    }

    pub fn boosters_used(&self) -> u32 {
        self.boosters_used
    }

    pub fn level_type(&self) -> LevelType {
        self.level_type
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    pub fn goals(&self) -> &GoalTracker {
        &self.goals
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            state: self.state,
            remaining_moves: self.remaining_moves,
            boss_hp: self.boss_hp,
            moves_used: self.moves_used,
            boosters_used: self.boosters_used,
        }
    }

    /// Damage the boss, clamping at 0.
    ///
    /// No-op (and no event) on non-boss levels or outside `Running`.
    pub fn apply_boss_damage(&mut self, amount: u32) {
        if self.state != GameState::Running {
            return;
        }
        let Some(hp) = self.boss_hp else {
            return;
        };
        let remaining_hp = hp.saturating_sub(amount);
        self.boss_hp = Some(remaining_hp);
        self.events.push(LogicEvent::BossDamaged {
            amount,
            remaining_hp,
        });
    }

    // ── Match processing ────────────────────────────────────────────────

    fn process_matches(&mut self, groups: Vec<MatchGroup>) {
        for group in groups {
            let special = group.special_to_spawn();
            let anchor = group.anchor();
            let mut cleared = Vec::with_capacity(group.len());

            for &pos in &group.cells {
                // An activation earlier in the step may already have taken it.
                let cell = self.grid[pos];
                if cell.is_empty() || (special.is_some() && pos == anchor) {
                    continue;
                }

                if let Some(color) = cell.normal_color() {
                    self.goals.on_tile_collected(color);
                }
                cleared.push(pos);
                self.damage_adjacent(pos);
                self.grid[pos].clear();
                self.apply_boss_damage(self.tuning.damage_per_tile);
            }

            if !cleared.is_empty() {
                self.events.push(LogicEvent::MatchClear {
                    cells: cleared,
                    source: ClearSource::Match,
                });
            }

            if let Some(kind) = special {
                if self.grid[anchor].is_empty() {
                    continue;
                }
                self.grid[anchor].set_special(kind, group.color);
                self.events.push(LogicEvent::SpecialCreated { cell: anchor, kind });
            }
        }
    }

    // ── Specials ────────────────────────────────────────────────────────

    fn activate_special(&mut self, pos: Coord, special: Special) {
        match special.kind {
            SpecialKind::Rocket(orientation) => self.activate_rocket(pos, orientation),
            SpecialKind::Bomb => self.activate_bomb(pos),
            SpecialKind::Disco => self.activate_disco(pos, special.color),
        }
    }

    /// Two specials swapped together. `first` started at `a`, `second` at `b`.
    fn resolve_combo(&mut self, a: Coord, b: Coord, first: Special, second: Special) {
        self.grid[a].clear();
        self.grid[b].clear();

        match (first.kind, second.kind) {
            (SpecialKind::Rocket(_), SpecialKind::Rocket(_))
            | (SpecialKind::Rocket(_), SpecialKind::Bomb)
            | (SpecialKind::Bomb, SpecialKind::Rocket(_)) => {
                self.activate_rocket(a, RocketOrientation::Horizontal);
                self.activate_rocket(a, RocketOrientation::Vertical);
            }
            (SpecialKind::Disco, _) => self.activate_disco(a, second.color),
            (_, SpecialKind::Disco) => self.activate_disco(a, first.color),
            _ => {
                self.activate_special(b, first);
                self.activate_special(a, second);
            }
        }
    }

    fn activate_rocket(&mut self, pos: Coord, orientation: RocketOrientation) {
        self.grid[pos].clear();

        let mut cleared = Vec::new();
        match orientation {
            RocketOrientation::Horizontal => {
                for x in 0..self.grid.width() as i32 {
                    self.clear_cell(Coord::new(x, pos.y), &mut cleared);
                }
            }
            RocketOrientation::Vertical => {
                for y in 0..self.grid.height() as i32 {
                    self.clear_cell(Coord::new(pos.x, y), &mut cleared);
                }
            }
        }
        self.events.push(LogicEvent::MatchClear {
            cells: cleared,
            source: ClearSource::Special,
        });

        let span = self.grid.width().max(self.grid.height()) as u32;
        let damage = self
            .tuning
            .damage_per_tile
            .saturating_mul(span)
            .saturating_add(self.tuning.rocket_damage_bonus);
        self.apply_boss_damage(damage);
    }

    fn activate_bomb(&mut self, center: Coord) {
        self.grid[center].clear();

        let mut cleared = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                self.clear_cell(center.offset(dx, dy), &mut cleared);
            }
        }
        self.events.push(LogicEvent::MatchClear {
            cells: cleared,
            source: ClearSource::Special,
        });

        let damage = self
            .tuning
            .damage_per_tile
            .saturating_mul(BOMB_AREA)
            .saturating_add(self.tuning.bomb_damage_bonus);
        self.apply_boss_damage(damage);
    }

    fn activate_disco(&mut self, pos: Coord, target: TileColor) {
        self.grid[pos].clear();

        let mut cleared = Vec::new();
        let mut hits = 0u32;
        let targets: Vec<Coord> = self
            .grid
            .coords()
            .filter(|&c| self.grid[c].normal_color() == Some(target))
            .collect();
        for c in targets {
            self.clear_cell(c, &mut cleared);
            hits += 1;
        }
        self.events.push(LogicEvent::MatchClear {
            cells: cleared,
            source: ClearSource::Special,
        });

        self.apply_boss_damage(self.tuning.damage_per_tile.saturating_mul(hits));
    }

    /// One hit from a special effect. Obstacles and overlays absorb it;
    /// anything else is removed (other specials do not chain).
    fn clear_cell(&mut self, pos: Coord, cleared: &mut Vec<Coord>) {
        let Some(&cell) = self.grid.get(pos) else {
            return;
        };
        if cell.is_empty() {
            return;
        }
        if cell.is_obstacle() {
            self.damage_obstacle(pos);
            return;
        }
        if cell.has_overlay() {
            self.grid[pos].damage_overlay();
            return;
        }

        if let Some(color) = cell.normal_color() {
            self.goals.on_tile_collected(color);
        }
        cleared.push(pos);
        self.grid[pos].clear();
    }

    fn hammer(&mut self, pos: Coord) {
        self.events.push(LogicEvent::MatchClear {
            cells: vec![pos],
            source: ClearSource::Booster,
        });

        let cell = self.grid[pos];
        if cell.is_obstacle() {
            self.damage_obstacle(pos);
        } else {
            if let Some(color) = cell.normal_color() {
                self.goals.on_tile_collected(color);
            }
            self.grid[pos].clear();
        }
        self.apply_boss_damage(self.tuning.damage_per_tile);
    }

    // ── Damage ──────────────────────────────────────────────────────────

    fn damage_obstacle(&mut self, pos: Coord) {
        let Some(hit) = self.grid[pos].damage_obstacle() else {
            return;
        };
        self.events.push(LogicEvent::ObstacleDamaged {
            cell: pos,
            kind: hit.kind,
            remaining_hp: hit.remaining_hp,
        });
        if hit.destroyed() {
            self.goals.on_obstacle_destroyed(hit.kind);
        }
    }

    fn damage_adjacent(&mut self, pos: Coord) {
        for n in self.grid.neighbors(pos) {
            if self.grid[n].is_obstacle() {
                self.damage_obstacle(n);
            } else {
                self.grid[n].damage_overlay();
            }
        }
    }

    // ── Cascade ─────────────────────────────────────────────────────────

    /// Gravity, refill and rematch until a pass finds nothing.
    fn cascade(&mut self) {
        let mut passes = 0u32;
        loop {
            self.apply_gravity();
            self.spawn_new_tiles();
            let groups = find_matches(&self.grid);
            if groups.is_empty() {
                break;
            }
            self.process_matches(groups);
            passes += 1;
        }
        trace!("cascade settled after {passes} pass(es)");
    }

    /// Compact every column downward. Obstacles never move and act as a
    /// floor for the tiles above them. Tiles carry their overlay.
    fn apply_gravity(&mut self) {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        for x in 0..w {
            let mut write_y = 0;
            for y in 0..h {
                let from = Coord::new(x, y);
                let cell = self.grid[from];
                if cell.is_obstacle() {
                    write_y = y + 1;
                    continue;
                }
                if cell.is_empty() {
                    continue;
                }
                if write_y != y {
                    let to = Coord::new(x, write_y);
                    self.grid[to] = cell;
                    self.grid[from] = Cell::EMPTY;
                    self.events.push(LogicEvent::TileFell { from, to });
                }
                write_y += 1;
            }
        }
    }

    fn spawn_new_tiles(&mut self) {
        let empty: Vec<Coord> = self
            .grid
            .coords()
            .filter(|&c| self.grid[c].is_empty())
            .collect();
        for at in empty {
            let color = self.spawn.pick(&mut self.rng);
            self.grid[at].set_normal(color);
            self.events.push(LogicEvent::TileSpawned { at, color });
        }
    }

    // ── Board setup ─────────────────────────────────────────────────────

    fn fill_board(&mut self) {
        for attempt in 1..=MAX_FILL_ATTEMPTS {
            self.fill_attempt();
            if !has_matches(&self.grid) {
                if attempt > 1 {
                    debug!("match-free fill after {attempt} attempts");
                }
                return;
            }
        }
        warn!(
            "starting board still has matches after {} attempts (colours: {:?})",
            MAX_FILL_ATTEMPTS,
            self.spawn.colors()
        );
    }

    /// Column by column, bottom-up; each cell avoids completing a run with
    /// the two cells to its left or the two below it.
    fn fill_attempt(&mut self) {
        let coords: Vec<Coord> = self.grid.coords().collect();
        for pos in coords {
            let mut forbidden = ArrayVec::<TileColor, 2>::new();
            for (dx, dy) in [(-1, 0), (0, -1)] {
                let near = self.normal_at(pos.offset(dx, dy));
                let far = self.normal_at(pos.offset(2 * dx, 2 * dy));
                if let (Some(near), Some(far)) = (near, far) {
                    if near == far && !forbidden.contains(&near) {
                        forbidden.push(near);
                    }
                }
            }
            let color = self.spawn.pick_avoiding(&mut self.rng, &forbidden);
            self.grid[pos] = Cell::normal(color);
        }
    }

    fn normal_at(&self, pos: Coord) -> Option<TileColor> {
        self.grid.get(pos).and_then(Cell::normal_color)
    }

    /// Best-effort placement of obstacles and overlays; bad entries are skipped.
    fn apply_layout(&mut self, level: &LevelConfig) {
        for raw in &level.layout.cells {
            let Some(entry) = LayoutEntry::parse(raw) else {
                warn!("level {}: skipping malformed layout entry {raw:?}", level.id);
                continue;
            };
            let Some(cell) = self.grid.get_mut(entry.pos) else {
                warn!("level {}: layout entry {raw:?} out of bounds", level.id);
                continue;
            };
            match entry.placement {
                Placement::Obstacle { kind, hp } => cell.set_obstacle(kind, hp),
                Placement::Overlay { kind, hp } => {
                    if cell.is_obstacle() {
                        warn!("level {}: overlay {raw:?} on an obstacle", level.id);
                        continue;
                    }
                    cell.set_overlay(kind, hp);
                }
            }
        }
    }

    // ── End conditions ──────────────────────────────────────────────────

    fn check_end_conditions(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        let won = match self.boss_hp {
            Some(hp) => hp == 0,
            None => self.goals.all_goals_met(),
        };

        if won {
            self.finish(LevelResult::Win, self.reward_coins);
        } else if self.remaining_moves == 0 {
            self.finish(LevelResult::Lose, 0);
        }
    }

    fn finish(&mut self, result: LevelResult, coins_gained: u32) {
        self.state = match result {
            LevelResult::Win => GameState::Won,
            LevelResult::Lose => GameState::Lost,
        };
        self.end_result = Some(EndResult {
            result,
            moves_used: self.moves_used,
            boss_hp_remaining: self.boss_hp,
            coins_gained,
            boosters_used: self.boosters_used,
        });
        debug!(
            "level finished: {:?} after {} moves, {} boosters",
            result, self.moves_used, self.boosters_used
        );
    }
}
