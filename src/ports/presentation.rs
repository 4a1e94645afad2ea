//! Presentation port: everything the core asks the host to show or play.

use serde::{Deserialize, Serialize};

use crate::core::{CardRef, FaceId};
use crate::error::LayoutError;
use crate::layout::GridLayout;

/// Sound effects the core triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Flip,
    Match,
    Mismatch,
    Win,
}

/// Snapshot shown on the game-over screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u32,
    pub moves: u32,
    pub combo: u32,
}

/// Host-side rendering, audio and UI.
///
/// The core calls these as side effects; it never waits on them and never
/// reads anything back.
pub trait Presentation {
    /// Show a card's current face.
    fn render_card(&mut self, card: CardRef, face_up: bool, face: FaceId);

    fn play_sound(&mut self, cue: SoundCue);

    fn update_score(&mut self, score: u32);

    fn update_moves(&mut self, moves: u32);

    fn update_combo(&mut self, combo: u32);

    fn show_game_over(&mut self, summary: GameSummary);

    /// The requested grid cannot be shown; the game was not started.
    fn report_layout_infeasible(&mut self, error: &LayoutError);

    /// Apply the grid layout for a new game.
    fn arrange_grid(&mut self, _layout: &GridLayout) {}

    /// Remove every card of the previous deal.
    fn clear_board(&mut self) {}
}

/// One recorded presentation call.
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationEvent {
    RenderCard {
        card: CardRef,
        face_up: bool,
        face: FaceId,
    },
    Sound(SoundCue),
    Score(u32),
    Moves(u32),
    Combo(u32),
    GameOver(GameSummary),
    LayoutInfeasible(LayoutError),
    ArrangeGrid(GridLayout),
    ClearBoard,
}

/// Presentation that records every call.
///
/// Useful for headless hosts, replays and tests.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<PresentationEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Sounds played, in order.
    #[must_use]
    pub fn sounds(&self) -> Vec<SoundCue> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresentationEvent::Sound(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    /// How many times `cue` was played.
    #[must_use]
    pub fn sound_count(&self, cue: SoundCue) -> usize {
        self.sounds().into_iter().filter(|&c| c == cue).count()
    }

    /// Every game-over summary shown.
    #[must_use]
    pub fn game_overs(&self) -> Vec<GameSummary> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresentationEvent::GameOver(summary) => Some(*summary),
                _ => None,
            })
            .collect()
    }

    /// Last score pushed to the UI.
    #[must_use]
    pub fn last_score(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|event| match event {
            PresentationEvent::Score(score) => Some(*score),
            _ => None,
        })
    }

    /// Last move count pushed to the UI.
    #[must_use]
    pub fn last_moves(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|event| match event {
            PresentationEvent::Moves(moves) => Some(*moves),
            _ => None,
        })
    }

    /// Last combo pushed to the UI.
    #[must_use]
    pub fn last_combo(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|event| match event {
            PresentationEvent::Combo(combo) => Some(*combo),
            _ => None,
        })
    }
}

impl Presentation for Recorder {
    fn render_card(&mut self, card: CardRef, face_up: bool, face: FaceId) {
        self.events.push(PresentationEvent::RenderCard {
            card,
            face_up,
            face,
        });
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.events.push(PresentationEvent::Sound(cue));
    }

    fn update_score(&mut self, score: u32) {
        self.events.push(PresentationEvent::Score(score));
    }

    fn update_moves(&mut self, moves: u32) {
        self.events.push(PresentationEvent::Moves(moves));
    }

    fn update_combo(&mut self, combo: u32) {
        self.events.push(PresentationEvent::Combo(combo));
    }

    fn show_game_over(&mut self, summary: GameSummary) {
        self.events.push(PresentationEvent::GameOver(summary));
    }

    fn report_layout_infeasible(&mut self, error: &LayoutError) {
        self.events
            .push(PresentationEvent::LayoutInfeasible(error.clone()));
    }

    fn arrange_grid(&mut self, layout: &GridLayout) {
        self.events.push(PresentationEvent::ArrangeGrid(*layout));
    }

    fn clear_board(&mut self) {
        self.events.push(PresentationEvent::ClearBoard);
    }
}
