//! Goal tracking for a single level attempt
//!
//! Counters are fixed-size tables indexed by the closed colour and obstacle
//! sets. Only the engine mutates them.

use crate::level::GoalConfig;
use crate::types::{GoalKind, ObstacleKind, TileColor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalTracker {
    goals: Vec<GoalConfig>,
    color_collected: [u32; TileColor::COUNT],
    obstacles_destroyed: [u32; ObstacleKind::COUNT],
    tiles_cleared: u32,
    score: u32,
}

impl GoalTracker {
    pub fn new(goals: Vec<GoalConfig>) -> Self {
        Self {
            goals,
            ..Self::default()
        }
    }

    /// A `Normal` tile left the board (any mechanism).
    pub fn on_tile_collected(&mut self, color: TileColor) {
        self.color_collected[color.index()] += 1;
        self.tiles_cleared += 1;
    }

    /// An obstacle reached 0 hp.
    pub fn on_obstacle_destroyed(&mut self, kind: ObstacleKind) {
        self.obstacles_destroyed[kind.index()] += 1;
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Every configured goal satisfied. An empty goal list is trivially met.
    pub fn all_goals_met(&self) -> bool {
        self.goals.iter().all(|goal| self.is_met(goal))
    }

    pub fn is_met(&self, goal: &GoalConfig) -> bool {
        self.progress(goal) >= goal.count
    }

    /// Current progress toward one goal.
    ///
    /// A colour/obstacle goal without its target reports 0.
    pub fn progress(&self, goal: &GoalConfig) -> u32 {
        match goal.kind {
            GoalKind::CollectColor => goal.color.map(|c| self.color_progress(c)).unwrap_or(0),
            GoalKind::DestroyObstacles => goal
                .obstacle
                .map(|k| self.obstacle_progress(k))
                .unwrap_or(0),
            GoalKind::ClearTiles => self.tiles_cleared,
            GoalKind::Score => self.score,
        }
    }

    pub fn color_progress(&self, color: TileColor) -> u32 {
        self.color_collected[color.index()]
    }

    pub fn obstacle_progress(&self, kind: ObstacleKind) -> u32 {
        self.obstacles_destroyed[kind.index()]
    }

    pub fn tiles_cleared(&self) -> u32 {
        self.tiles_cleared
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn goals(&self) -> &[GoalConfig] {
        &self.goals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_goals_trivially_met() {
        assert!(GoalTracker::new(Vec::new()).all_goals_met());
    }

    #[test]
    fn test_collect_color() {
        let mut t = GoalTracker::new(vec![GoalConfig::collect(TileColor::Red, 2)]);
        t.on_tile_collected(TileColor::Red);
        t.on_tile_collected(TileColor::Blue);
        assert!(!t.all_goals_met());
        t.on_tile_collected(TileColor::Red);
        assert!(t.all_goals_met());
        assert_eq!(t.tiles_cleared(), 3);
        assert_eq!(t.color_progress(TileColor::Blue), 1);
    }

    #[test]
    fn test_all_goals_must_hold() {
        let mut t = GoalTracker::new(vec![
            GoalConfig::clear_tiles(1),
            GoalConfig::destroy(ObstacleKind::Crate, 1),
        ]);
        t.on_tile_collected(TileColor::Green);
        assert!(!t.all_goals_met());
        t.on_obstacle_destroyed(ObstacleKind::Stone);
        assert!(!t.all_goals_met());
        t.on_obstacle_destroyed(ObstacleKind::Crate);
        assert!(t.all_goals_met());
    }

    #[test]
    fn test_score_goal() {
        let mut t = GoalTracker::new(vec![GoalConfig::score(100)]);
        t.add_score(60);
        assert!(!t.all_goals_met());
        t.add_score(40);
        assert_eq!(t.score(), 100);
        assert!(t.all_goals_met());
    }

    #[test]
    fn test_goal_without_target_never_met() {
        let goal = GoalConfig {
            kind: GoalKind::CollectColor,
            color: None,
            obstacle: None,
            count: 1,
        };
        let mut t = GoalTracker::new(vec![goal]);
        t.on_tile_collected(TileColor::Red);
        assert!(!t.all_goals_met());
    }
}
