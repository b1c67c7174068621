//! Greedy auto-player used to produce replay recordings.

use log::debug;

use match3_core::types::{Coord, GameState};
use match3_core::Match3Game;

use crate::record::{Action, Recorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoplayReport {
    pub actions: usize,
    /// Stopped because no swap on the board was accepted.
    pub stuck: bool,
}

/// Play until the game ends, no swap is accepted, or `max_actions` is hit.
///
/// Each turn applies the first accepted swap scanning rows bottom to top,
/// left to right, trying the right neighbour and then the upper one.
/// Rejected swaps leave the engine untouched, so candidates are tried on the
/// live game.
pub fn autoplay(game: &mut Match3Game, recorder: &mut Recorder, max_actions: usize) -> AutoplayReport {
    let mut report = AutoplayReport::default();

    while game.state() == GameState::Running && report.actions < max_actions {
        let Some((a, b)) = play_first_accepted(game) else {
            report.stuck = true;
            break;
        };
        recorder.record(Action::Swap { a, b });
        game.consume_events();
        report.actions += 1;
    }

    debug!(
        "autoplay finished: {} action(s), state {:?}, stuck={}",
        report.actions,
        game.state(),
        report.stuck
    );
    report
}

fn play_first_accepted(game: &mut Match3Game) -> Option<(Coord, Coord)> {
    let (w, h) = (game.grid().width() as i32, game.grid().height() as i32);
    for y in 0..h {
        for x in 0..w {
            let a = Coord::new(x, y);
            for b in [a.offset(1, 0), a.offset(0, 1)] {
                if game.try_swap(a, b).is_accepted() {
                    return Some((a, b));
                }
            }
        }
    }
    None
}
