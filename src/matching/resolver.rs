//! The match resolver.
//!
//! Serializes flipped cards into pairs and resolves one pair at a time. Every
//! wait is an explicit countdown advanced by [`MatchResolver::process`], so the
//! whole cycle runs on the caller's tick.
//!
//! ## Cycle
//!
//! ```text
//! Idle ──(2 queued)──► compare ─┬─ match ────► MatchSettle ──► Yield
//!                               └─ mismatch ─► MismatchReveal ─► MismatchSettle ──► Yield
//! Yield ──(2 queued)──► compare
//! Yield ──(otherwise)─► Idle
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::queue::FlipQueue;
use crate::cards::Board;
use crate::core::{CardIndex, GameConfig};
use crate::ports::{Presentation, SoundCue};
use crate::session::ScoreKeeper;

/// Where the resolver is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResolverPhase {
    /// No pair under comparison.
    Idle,
    /// Pair matched; waiting for the reveal to settle before the match sound
    /// and win check.
    MatchSettle { remaining: f32 },
    /// Pair mismatched; both cards stay visible so the player can memorize
    /// them.
    MismatchReveal { remaining: f32 },
    /// Mismatched pair is turning back.
    MismatchSettle { remaining: f32 },
    /// One tick between pairs.
    Yield,
}

/// Status returned by [`MatchResolver::process`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Nothing left to resolve.
    Idle,
    /// A cycle is still running.
    Resolving,
}

/// Everything the resolver touches while it works.
pub struct ResolveContext<'a> {
    pub board: &'a mut Board,
    pub score: &'a mut ScoreKeeper,
    pub presentation: &'a mut dyn Presentation,
    pub config: &'a GameConfig,
}

/// Pairs flipped cards in click order and scores them.
#[derive(Clone, Debug)]
pub struct MatchResolver {
    queue: FlipQueue,
    /// Pair under comparison, until its cards are matched or turning back.
    active: SmallVec<[CardIndex; 2]>,
    phase: ResolverPhase,
    won: bool,
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchResolver {
    pub fn new() -> Self {
        Self {
            queue: FlipQueue::new(),
            active: SmallVec::new(),
            phase: ResolverPhase::Idle,
            won: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ResolverPhase {
        self.phase
    }

    /// Whether a resolution cycle is running.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.phase != ResolverPhase::Idle
    }

    /// Whether this deal has been won.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Cards queued and not yet compared.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether the card is queued or part of the pair being compared.
    #[must_use]
    pub fn is_pending(&self, index: CardIndex) -> bool {
        self.queue.contains(index) || self.active.contains(&index)
    }

    /// Queue a card the player just flipped.
    ///
    /// Matched and already pending cards are dropped. Starts a cycle at once
    /// when this completes a pair and none is running. Returns whether the
    /// card was queued.
    pub fn on_card_flipped(&mut self, index: CardIndex, ctx: &mut ResolveContext<'_>) -> bool {
        let Some(card) = ctx.board.get(index) else {
            return false;
        };
        if card.is_matched() || self.is_pending(index) {
            tracing::trace!(index, "Dropping flip of matched or pending card");
            return false;
        }

        self.queue.push(index);
        ctx.presentation.play_sound(SoundCue::Flip);

        if self.phase == ResolverPhase::Idle && self.queue.len() >= 2 {
            self.begin_pair(ctx);
        }
        true
    }

    /// Advance the running cycle by `dt` seconds.
    pub fn process(&mut self, dt: f32, ctx: &mut ResolveContext<'_>) -> ResolutionStatus {
        let timings = ctx.config.timings;

        match self.phase {
            ResolverPhase::Idle => {
                if self.queue.len() >= 2 {
                    self.begin_pair(ctx);
                }
            }
            ResolverPhase::MatchSettle { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    ctx.presentation.play_sound(SoundCue::Match);
                    self.check_win(ctx);
                    self.phase = ResolverPhase::Yield;
                } else {
                    self.phase = ResolverPhase::MatchSettle { remaining };
                }
            }
            ResolverPhase::MismatchReveal { remaining } => {
                let remaining = remaining - dt;
                // Both cards must have finished turning up before they turn back
                let settled = self
                    .active
                    .iter()
                    .all(|&i| ctx.board.get(i).map_or(true, |card| !card.is_animating()));

                if remaining <= 0.0 && settled {
                    for index in self.active.drain(..) {
                        if let Some(card) = ctx.board.get_mut(index) {
                            card.reset_flip_animated(timings.flip_duration);
                        }
                    }
                    self.phase = ResolverPhase::MismatchSettle {
                        remaining: timings.settle_delay,
                    };
                } else {
                    self.phase = ResolverPhase::MismatchReveal {
                        remaining: remaining.max(0.0),
                    };
                }
            }
            ResolverPhase::MismatchSettle { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    ctx.presentation.play_sound(SoundCue::Mismatch);
                    self.phase = ResolverPhase::Yield;
                } else {
                    self.phase = ResolverPhase::MismatchSettle { remaining };
                }
            }
            ResolverPhase::Yield => {
                if self.queue.len() >= 2 {
                    self.begin_pair(ctx);
                } else {
                    self.phase = ResolverPhase::Idle;
                }
            }
        }

        if self.is_resolving() {
            ResolutionStatus::Resolving
        } else {
            ResolutionStatus::Idle
        }
    }

    /// Drop every queued card and any cycle in flight.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.active.clear();
        self.phase = ResolverPhase::Idle;
        self.won = false;
    }

    /// Pop the two oldest cards and decide the pair.
    fn begin_pair(&mut self, ctx: &mut ResolveContext<'_>) {
        let Some((first, second)) = self.queue.pop_pair() else {
            self.phase = ResolverPhase::Idle;
            return;
        };
        let timings = ctx.config.timings;

        let moves = ctx.score.record_move();
        ctx.presentation.update_moves(moves);

        let faces = (
            ctx.board.get(first).map(|card| card.face()),
            ctx.board.get(second).map(|card| card.face()),
        );

        match faces {
            (Some(a), Some(b)) if a == b => {
                for index in [first, second] {
                    if let Some(card) = ctx.board.get_mut(index) {
                        card.mark_matched();
                    }
                }
                self.active.clear();

                let points = ctx.score.record_match();
                ctx.presentation.update_combo(ctx.score.combo());
                ctx.presentation.update_score(ctx.score.score());
                tracing::debug!(
                    first,
                    second,
                    face = a.raw(),
                    points,
                    combo = ctx.score.combo(),
                    "Pair matched"
                );

                self.phase = ResolverPhase::MatchSettle {
                    remaining: timings.settle_delay,
                };
            }
            _ => {
                self.active.clear();
                self.active.push(first);
                self.active.push(second);

                ctx.score.record_mismatch();
                ctx.presentation.update_combo(ctx.score.combo());
                tracing::debug!(first, second, "Pair mismatched");

                self.phase = ResolverPhase::MismatchReveal {
                    remaining: timings.reveal_delay,
                };
            }
        }
    }

    /// Declare the win once every card is matched.
    ///
    /// With `exclude_singleton_from_win`, an odd grid is won when only one
    /// card is left.
    fn check_win(&mut self, ctx: &mut ResolveContext<'_>) {
        if self.won || ctx.board.is_empty() {
            return;
        }

        let allowance = usize::from(
            ctx.config.exclude_singleton_from_win && ctx.board.grid().has_singleton(),
        );
        if ctx.board.unmatched_count() > allowance {
            return;
        }

        self.won = true;
        let summary = ctx.score.summary();
        tracing::info!(
            score = summary.score,
            moves = summary.moves,
            combo = summary.combo,
            "Board cleared"
        );
        ctx.presentation.play_sound(SoundCue::Win);
        ctx.presentation.show_game_over(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DealId, FaceId, GridSize};
    use crate::ports::Recorder;

    struct Fixture {
        board: Board,
        score: ScoreKeeper,
        recorder: Recorder,
        config: GameConfig,
        resolver: MatchResolver,
    }

    impl Fixture {
        fn new(grid: GridSize, faces: &[u32]) -> Self {
            let config = GameConfig::default();
            let faces: Vec<_> = faces.iter().copied().map(FaceId::new).collect();
            Self {
                board: Board::deal(DealId(1), grid, &faces),
                score: ScoreKeeper::new(config.scoring, &config.timings),
                recorder: Recorder::new(),
                config,
                resolver: MatchResolver::new(),
            }
        }

        fn flip(&mut self, index: CardIndex) -> bool {
            let flip = self.config.timings.flip_duration;
            self.board.get_mut(index).unwrap().request_flip(flip);
            let mut ctx = ResolveContext {
                board: &mut self.board,
                score: &mut self.score,
                presentation: &mut self.recorder,
                config: &self.config,
            };
            self.resolver.on_card_flipped(index, &mut ctx)
        }

        fn step(&mut self, dt: f32) -> ResolutionStatus {
            self.board.tick(dt);
            let mut ctx = ResolveContext {
                board: &mut self.board,
                score: &mut self.score,
                presentation: &mut self.recorder,
                config: &self.config,
            };
            self.resolver.process(dt, &mut ctx)
        }

        fn run_until_idle(&mut self) {
            for _ in 0..10_000 {
                if self.step(1.0 / 60.0) == ResolutionStatus::Idle && !self.board.any_animating()
                {
                    return;
                }
            }
            panic!("resolver never went idle");
        }
    }

    #[test]
    fn test_single_flip_waits() {
        let mut fx = Fixture::new(GridSize::new(1, 2), &[0, 0]);
        assert!(fx.flip(0));
        assert_eq!(fx.resolver.pending(), 1);
        assert!(!fx.resolver.is_resolving());
        assert_eq!(fx.recorder.sounds(), vec![SoundCue::Flip]);
    }

    #[test]
    fn test_second_flip_starts_cycle_immediately() {
        let mut fx = Fixture::new(GridSize::new(1, 2), &[0, 0]);
        fx.flip(0);
        fx.flip(1);

        assert!(fx.resolver.is_resolving());
        assert_eq!(fx.score.moves(), 1);
        assert_eq!(fx.score.score(), 1);
        assert!(fx.board.get(0).unwrap().is_matched());
        assert!(matches!(
            fx.resolver.phase(),
            ResolverPhase::MatchSettle { .. }
        ));
    }

    #[test]
    fn test_match_sound_after_settle_then_win() {
        let mut fx = Fixture::new(GridSize::new(1, 2), &[0, 0]);
        fx.flip(0);
        fx.flip(1);

        fx.step(0.1);
        assert_eq!(fx.recorder.sound_count(SoundCue::Match), 0);
        fx.step(0.1);
        assert_eq!(fx.recorder.sound_count(SoundCue::Match), 1);
        assert!(fx.resolver.has_won());
        assert_eq!(
            fx.recorder.game_overs(),
            vec![crate::ports::GameSummary {
                score: 1,
                moves: 1,
                combo: 1
            }]
        );

        assert_eq!(fx.step(0.1), ResolutionStatus::Idle);
    }

    #[test]
    fn test_mismatch_flips_back() {
        let mut fx = Fixture::new(GridSize::new(2, 2), &[0, 1, 0, 1]);
        fx.flip(0);
        fx.flip(1);
        assert!(fx.resolver.is_pending(0));

        fx.run_until_idle();

        assert_eq!(fx.score.score(), 0);
        assert_eq!(fx.score.combo(), 0);
        assert_eq!(fx.score.moves(), 1);
        assert!(!fx.board.get(0).unwrap().is_face_up());
        assert!(!fx.board.get(1).unwrap().is_face_up());
        assert!(!fx.resolver.is_pending(0));
        assert_eq!(fx.recorder.sound_count(SoundCue::Mismatch), 1);
        assert!(!fx.resolver.has_won());
    }

    #[test]
    fn test_mismatch_reveal_lasts_reveal_delay() {
        let mut fx = Fixture::new(GridSize::new(1, 2), &[0, 1]);
        fx.flip(0);
        fx.flip(1);

        fx.step(0.5);
        assert!(fx.board.get(0).unwrap().is_face_up());
        assert!(!fx.board.get(0).unwrap().is_animating());

        fx.step(0.6);
        assert!(matches!(
            fx.resolver.phase(),
            ResolverPhase::MismatchSettle { .. }
        ));
        assert!(fx.board.get(0).unwrap().is_animating());
    }

    #[test]
    fn test_fifo_order_not_eager_matching() {
        // A=0 and C=2 share a face, but A pairs with B because B came next
        let mut fx = Fixture::new(GridSize::new(2, 2), &[0, 1, 0, 1]);
        fx.flip(0);
        fx.flip(1);
        fx.flip(2);
        fx.flip(3);

        assert_eq!(fx.score.moves(), 1);
        assert!(!fx.board.get(0).unwrap().is_matched());
        assert_eq!(fx.resolver.pending(), 2);

        fx.run_until_idle();

        assert_eq!(fx.score.moves(), 2);
        assert_eq!(fx.score.score(), 0);
        assert!(fx.board.iter().all(|card| !card.is_matched()));
    }

    #[test]
    fn test_matched_and_pending_cards_dropped() {
        let mut fx = Fixture::new(GridSize::new(2, 2), &[0, 0, 1, 1]);
        fx.flip(2);
        assert!(!fx.resolver.on_card_flipped(
            2,
            &mut ResolveContext {
                board: &mut fx.board,
                score: &mut fx.score,
                presentation: &mut fx.recorder,
                config: &fx.config,
            }
        ));

        fx.flip(3);
        fx.run_until_idle();
        assert!(fx.board.get(2).unwrap().is_matched());

        let mut ctx = ResolveContext {
            board: &mut fx.board,
            score: &mut fx.score,
            presentation: &mut fx.recorder,
            config: &fx.config,
        };
        assert!(!fx.resolver.on_card_flipped(2, &mut ctx));
        assert!(!fx.resolver.on_card_flipped(99, &mut ctx));
        assert_eq!(fx.recorder.sound_count(SoundCue::Flip), 2);
    }

    #[test]
    fn test_odd_grid_never_won_by_default() {
        let mut fx = Fixture::new(GridSize::new(1, 3), &[0, 0, 1]);
        fx.flip(0);
        fx.flip(1);
        fx.run_until_idle();

        assert!(!fx.resolver.has_won());
        assert_eq!(fx.recorder.sound_count(SoundCue::Win), 0);
    }

    #[test]
    fn test_odd_grid_won_when_singleton_excluded() {
        let mut fx = Fixture::new(GridSize::new(1, 3), &[0, 1, 0]);
        fx.config = fx.config.clone().excluding_singleton_from_win();
        fx.flip(0);
        fx.flip(2);
        fx.run_until_idle();

        assert!(fx.resolver.has_won());
        assert_eq!(fx.recorder.sound_count(SoundCue::Win), 1);
    }

    #[test]
    fn test_clear_drops_cycle() {
        let mut fx = Fixture::new(GridSize::new(1, 2), &[0, 1]);
        fx.flip(0);
        fx.flip(1);
        assert!(fx.resolver.is_resolving());

        fx.resolver.clear();
        assert!(!fx.resolver.is_resolving());
        assert_eq!(fx.resolver.pending(), 0);
        assert!(!fx.resolver.is_pending(0));
        assert_eq!(fx.step(0.1), ResolutionStatus::Idle);
    }
}
