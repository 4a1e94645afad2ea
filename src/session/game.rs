//! Game session: owns the board, the resolver and the counters for one
//! playthrough, and drives both ports.

use im::Vector;

use crate::cards::{singleton_face, Board, Card, DeckGenerator};
use crate::core::{CardRef, DealId, GameConfig, GameRng, GameRngState, GridSize};
use crate::error::{GameError, StoreError};
use crate::matching::{MatchResolver, ResolutionStatus, ResolveContext};
use crate::ports::{Presentation, ScoreStore};

use super::score::ScoreKeeper;

/// One player's game.
///
/// The host forwards clicks through [`GameSession::click_card`] and calls
/// [`GameSession::tick`] once per frame with the elapsed seconds. Everything
/// the player should see or hear comes back through the [`Presentation`].
pub struct GameSession<P, S> {
    config: GameConfig,
    /// Grid used by the next `start_game`.
    grid: GridSize,
    generator: DeckGenerator,
    rng: GameRng,
    board: Board,
    resolver: MatchResolver,
    score: ScoreKeeper,
    input_locked: bool,
    presentation: P,
    store: S,
}

impl<P: Presentation, S: ScoreStore> GameSession<P, S> {
    /// Create a session. Restores the persisted grid choice if there is one.
    pub fn new(config: GameConfig, presentation: P, store: S) -> Self {
        let grid = match store.load_grid_choice() {
            Ok(Some(grid)) => grid,
            Ok(None) => config.grid,
            Err(err) => {
                tracing::warn!("Failed to load grid choice, using {}: {}", config.grid, err);
                config.grid
            }
        };
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        tracing::info!(
            grid = %grid,
            palette = config.palette_size,
            seed = rng.seed(),
            "Session created"
        );

        Self {
            generator: DeckGenerator::new(config.palette_size),
            score: ScoreKeeper::new(config.scoring, &config.timings),
            grid,
            rng,
            board: Board::empty(DealId::default()),
            resolver: MatchResolver::new(),
            input_locked: false,
            config,
            presentation,
            store,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Grid the next game will use.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Current deal. Refs from other deals are ignored.
    #[must_use]
    pub fn deal(&self) -> DealId {
        self.board.deal_id()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cheap snapshot of every card for rendering.
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.board.snapshot()
    }

    /// Ref for the card at `index` in the current deal.
    #[must_use]
    pub fn card_ref(&self, index: usize) -> CardRef {
        self.board.card_ref(index)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.score.moves()
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    #[must_use]
    pub fn combo_timer(&self) -> f32 {
        self.score.combo_timer()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.resolver.has_won()
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.resolver.is_resolving()
    }

    /// Cards flipped and waiting for a partner.
    #[must_use]
    pub fn pending_flips(&self) -> usize {
        self.resolver.pending()
    }

    /// RNG state, for replaying the next deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // === Input ===

    /// Lock or unlock card input (menus, game-over screen, ...).
    pub fn set_input_locked(&mut self, locked: bool) {
        self.input_locked = locked;
    }

    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Choose the grid for the next game and persist the choice.
    pub fn set_grid(&mut self, rows: u16, cols: u16) -> Result<(), StoreError> {
        self.grid = GridSize::new(rows, cols);
        tracing::debug!(grid = %self.grid, "Grid chosen");

        self.store.save_grid_choice(self.grid).inspect_err(|err| {
            tracing::warn!("Failed to save grid choice: {}", err);
        })
    }

    /// Player clicked a card.
    ///
    /// Dropped while input is locked, for stale or unknown refs, and for
    /// cards that are matched, face-up or mid-flip. Returns whether the flip
    /// was accepted.
    pub fn click_card(&mut self, card: CardRef) -> bool {
        if self.input_locked {
            tracing::trace!(%card, "Input locked, ignoring click");
            return false;
        }
        let Some(index) = self.board.resolve(card) else {
            tracing::trace!(%card, "Ignoring click on stale card");
            return false;
        };

        let flip_duration = self.config.timings.flip_duration;
        let accepted = self
            .board
            .get_mut(index)
            .is_some_and(|c| c.request_flip(flip_duration));
        if !accepted {
            return false;
        }

        let mut ctx = ResolveContext {
            board: &mut self.board,
            score: &mut self.score,
            presentation: &mut self.presentation,
            config: &self.config,
        };
        self.resolver.on_card_flipped(index, &mut ctx)
    }

    // === Time ===

    /// Advance the game by `dt` seconds.
    ///
    /// Order: combo window, card flips, resolver.
    pub fn tick(&mut self, dt: f32) -> ResolutionStatus {
        let dt = dt.max(0.0);

        if self.score.tick(dt) {
            tracing::debug!("Combo window lapsed");
            self.presentation.update_combo(self.score.combo());
        }

        for index in self.board.tick(dt) {
            if let Some(card) = self.board.get(index) {
                self.presentation
                    .render_card(self.board.card_ref(index), card.is_face_up(), card.face());
            }
        }

        let mut ctx = ResolveContext {
            board: &mut self.board,
            score: &mut self.score,
            presentation: &mut self.presentation,
            config: &self.config,
        };
        self.resolver.process(dt, &mut ctx)
    }

    // === Lifecycle ===

    /// Validate the grid and deal a new board.
    ///
    /// An empty or oversized grid is reported to the presentation once and
    /// nothing else changes. Moves, combo and the combo window start from
    /// zero; the score is kept so one restored with
    /// [`GameSession::load_progress`] survives into the new game.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if let Err(err) = self.config.layout.check(self.grid) {
            tracing::warn!("Grid too large for the screen, choose fewer rows or columns: {}", err);
            self.presentation.report_layout_infeasible(&err);
            return Err(err.into());
        }

        self.score.start_round();

        let layout = self.config.layout.auto_scale(self.grid);
        self.presentation.arrange_grid(&layout);
        self.deal_board(self.grid);
        self.push_counters();
        Ok(())
    }

    /// Zero the counters and deal a fresh board of the same grid.
    ///
    /// Before the first game only the counters are reset.
    pub fn reset_game(&mut self) {
        self.score.reset();

        if self.board.is_empty() {
            self.resolver.clear();
            self.push_counters();
            return;
        }

        let grid = self.board.grid();
        self.push_counters();
        self.deal_board(grid);
        tracing::info!(grid = %grid, "Game reset");
    }

    /// Persist the current score.
    pub fn save_progress(&mut self) -> Result<(), StoreError> {
        let score = self.score.score();
        self.store.save_score(score).inspect_err(|err| {
            tracing::warn!("Failed to save score: {}", err);
        })?;
        tracing::info!(score, "Progress saved");
        Ok(())
    }

    /// Restore the persisted score (0 if none was saved).
    pub fn load_progress(&mut self) -> Result<u32, StoreError> {
        let score = self
            .store
            .load_score()
            .inspect_err(|err| tracing::warn!("Failed to load score: {}", err))?
            .unwrap_or(0);

        self.score.restore_score(score);
        self.presentation.update_score(score);
        tracing::info!(score, "Progress loaded");
        Ok(score)
    }

    /// Replace the board with a freshly shuffled deal.
    fn deal_board(&mut self, grid: GridSize) {
        if !self.board.is_empty() {
            self.presentation.clear_board();
        }
        self.resolver.clear();

        let faces = self.generator.generate(grid, &mut self.rng);
        if let Some(face) = singleton_face(&faces) {
            tracing::debug!(face = face.raw(), "Odd grid, one card has no partner");
        }

        let deal = self.board.deal_id().next();
        self.board = Board::deal(deal, grid, &faces);

        for (index, card) in self.board.iter().enumerate() {
            self.presentation
                .render_card(CardRef::new(deal, index), false, card.face());
        }
        tracing::info!(grid = %grid, deal = deal.0, "Dealt new board");
    }

    fn push_counters(&mut self) {
        self.presentation.update_score(self.score.score());
        self.presentation.update_moves(self.score.moves());
        self.presentation.update_combo(self.score.combo());
    }
}
