//! Room entity: the state machine owning one game session.
//!
//! A room moves `Lobby -> Question -> ... -> Finished`. Changing the category
//! sends it back to `Lobby` from any phase.
//!
//! ## Invariants
//!
//! - the keys of `scores` are exactly the ids in `players`
//! - `leaderboard` is recomputed from `scores` and `players` after every
//!   mutation that can change it, never edited directly
//! - `current_round <= total_rounds` while the phase is not `Finished`
//!
//! Mutators are tolerant: unknown players, unknown categories and
//! out-of-order calls are absorbed without errors. Only `add_player` can
//! reject input (capacity).

use std::collections::BTreeMap;

use super::{
    answer_matcher::{self, AnswerValidation},
    error::RoomError,
    player::{LeaderboardEntry, Player},
    question::{Question, QuestionProvider},
    value_object::{CategoryId, ConnectionId, PlayerId, RoomId, Timestamp},
};

pub const DEFAULT_TOTAL_ROUNDS: u32 = 3;
pub const DEFAULT_QUESTION_TIME_LIMIT_MS: i64 = 60_000;

/// Coarse room state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Lobby,
    Question,
    Finished,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Lobby => "lobby",
            GamePhase::Question => "question",
            GamePhase::Finished => "finished",
        }
    }
}

/// How repeated correct answers are scored within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
    /// Every correct submission scores, including repeats of the same item
    #[default]
    ReAward,
    /// Each answer-key item scores at most once per player per round
    OncePerItem,
}

/// Per-room settings, fixed when the room is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSettings {
    pub total_rounds: u32,
    pub question_time_limit_ms: i64,
    pub scoring: ScoringMode,
    /// `None` means unbounded
    pub max_players: Option<usize>,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            question_time_limit_ms: DEFAULT_QUESTION_TIME_LIMIT_MS,
            scoring: ScoringMode::default(),
            max_players: None,
        }
    }
}

/// Whether `add_player` seated a new player or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Joined,
    Rejoined,
}

/// Result of one answer submission, delivered privately to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub points: u32,
    pub new_score: u32,
}

/// Public projection of a room, broadcast to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub category_id: CategoryId,
    pub phase: GamePhase,
    pub current_round: u32,
    pub total_rounds: u32,
    pub current_question: Option<Question>,
    pub players: Vec<Player>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub question_start_time: Option<Timestamp>,
    pub question_time_limit_ms: i64,
    pub created_at: Timestamp,
}

/// One game session.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    category_id: CategoryId,
    phase: GamePhase,
    current_round: u32,
    current_question: Option<Question>,
    players: Vec<Player>,
    scores: BTreeMap<PlayerId, u32>,
    answers_given: BTreeMap<PlayerId, Vec<String>>,
    leaderboard: Vec<LeaderboardEntry>,
    question_start_time: Option<Timestamp>,
    settings: RoomSettings,
    created_at: Timestamp,
}

impl Room {
    pub fn new(
        id: RoomId,
        category_id: CategoryId,
        settings: RoomSettings,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            category_id,
            phase: GamePhase::Lobby,
            current_round: 1,
            current_question: None,
            players: Vec::new(),
            scores: BTreeMap::new(),
            answers_given: BTreeMap::new(),
            leaderboard: Vec::new(),
            question_start_time: None,
            settings,
            created_at,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.settings.total_rounds
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    pub fn scores(&self) -> &BTreeMap<PlayerId, u32> {
        &self.scores
    }

    pub fn score_of(&self, player_id: &PlayerId) -> Option<u32> {
        self.scores.get(player_id).copied()
    }

    pub fn answers_of(&self, player_id: &PlayerId) -> &[String] {
        self.answers_given
            .get(player_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn question_start_time(&self) -> Option<Timestamp> {
        self.question_start_time
    }

    pub fn settings(&self) -> &RoomSettings {
        &self.settings
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Connections of every seated player, in join order.
    pub fn connections(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.connection).collect()
    }

    /// Seat a player.
    ///
    /// Whether `player_id` could be seated right now. Seated players can
    /// always rejoin.
    pub fn check_seat(&self, player_id: &PlayerId) -> Result<(), RoomError> {
        if self.player(player_id).is_some() {
            return Ok(());
        }
        match self.settings.max_players {
            Some(capacity) if self.players.len() >= capacity => {
                Err(RoomError::CapacityExceeded { capacity })
            }
            _ => Ok(()),
        }
    }

    /// A player id that is already seated is treated as a rejoin: the
    /// connection and display name are replaced, score and position kept.
    pub fn add_player(&mut self, player: Player) -> Result<JoinKind, RoomError> {
        self.check_seat(&player.id)?;
        if let Some(existing) = self.players.iter_mut().find(|p| p.id == player.id) {
            existing.name = player.name;
            existing.connection = player.connection;
            self.recompute_leaderboard();
            return Ok(JoinKind::Rejoined);
        }

        self.scores.insert(player.id.clone(), 0);
        self.answers_given.insert(player.id.clone(), Vec::new());
        self.players.push(player);
        self.recompute_leaderboard();
        Ok(JoinKind::Joined)
    }

    /// Remove a player. Idempotent.
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| &p.id == player_id)?;
        let player = self.players.remove(index);
        self.scores.remove(player_id);
        self.answers_given.remove(player_id);
        self.recompute_leaderboard();
        Some(player)
    }

    /// Switch category. Any change is a hard reset back to the lobby.
    ///
    /// Returns `false` when the category is unchanged.
    pub fn update_category(&mut self, category_id: CategoryId) -> bool {
        if self.category_id == category_id {
            return false;
        }
        self.category_id = category_id;
        self.current_question = None;
        self.question_start_time = None;
        self.clear_answers();
        self.scores.values_mut().for_each(|score| *score = 0);
        self.phase = GamePhase::Lobby;
        self.current_round = 1;
        self.recompute_leaderboard();
        true
    }

    /// (Re)start the game from round 1. Valid from any phase.
    pub fn start_game(&mut self, provider: &dyn QuestionProvider, now: Timestamp) {
        self.phase = GamePhase::Question;
        self.current_round = 1;
        self.current_question = Some(provider.pick(&self.category_id));
        self.question_start_time = Some(now);
        self.clear_answers();
        self.recompute_leaderboard();
    }

    /// Record and score a submission.
    ///
    /// Does not check the phase. Submissions from unknown players are
    /// recorded but never scored.
    pub fn submit_answer(&mut self, player_id: &PlayerId, answer_text: &str) -> AnswerOutcome {
        let validation = match &self.current_question {
            Some(question) => {
                let previous = self.answers_given.get(player_id);
                score_submission(
                    answer_text,
                    &question.answers,
                    previous.map(Vec::as_slice).unwrap_or_default(),
                    self.settings.scoring,
                )
            }
            None => AnswerValidation::INCORRECT,
        };

        self.answers_given
            .entry(player_id.clone())
            .or_default()
            .push(answer_text.to_string());

        if validation.is_correct
            && let Some(score) = self.scores.get_mut(player_id)
        {
            *score = score.saturating_add(validation.points);
            self.recompute_leaderboard();
        }

        AnswerOutcome {
            is_correct: validation.is_correct,
            points: validation.points,
            new_score: self.score_of(player_id).unwrap_or(0),
        }
    }

    /// Advance to the next round, or finish once all rounds are played.
    ///
    /// Never changes the phase except to `Finished`; only `start_game`
    /// leaves the lobby. No-op on a finished room.
    pub fn next_question(&mut self, provider: &dyn QuestionProvider, now: Timestamp) {
        if self.phase == GamePhase::Finished {
            return;
        }
        self.current_round += 1;
        if self.current_round > self.settings.total_rounds {
            self.phase = GamePhase::Finished;
        } else {
            self.current_question = Some(provider.pick(&self.category_id));
            self.question_start_time = Some(now);
            self.clear_answers();
        }
        self.recompute_leaderboard();
    }

    /// Finish the game regardless of the round counter.
    pub fn end_game(&mut self) {
        self.phase = GamePhase::Finished;
    }

    /// Advisory: true once the current question has been open for at least
    /// the time limit. The room never advances by itself.
    pub fn is_question_expired(&self, now: Timestamp) -> bool {
        self.question_start_time
            .is_some_and(|start| start.elapsed_until(now) >= self.settings.question_time_limit_ms)
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            category_id: self.category_id.clone(),
            phase: self.phase,
            current_round: self.current_round,
            total_rounds: self.settings.total_rounds,
            current_question: self.current_question.clone(),
            players: self.players.clone(),
            scores: self.scores.clone(),
            leaderboard: self.leaderboard.clone(),
            question_start_time: self.question_start_time,
            question_time_limit_ms: self.settings.question_time_limit_ms,
            created_at: self.created_at,
        }
    }

    fn clear_answers(&mut self) {
        self.answers_given = self
            .players
            .iter()
            .map(|p| (p.id.clone(), Vec::new()))
            .collect();
    }

    // Stable sort: ties keep join order.
    fn recompute_leaderboard(&mut self) {
        let mut leaderboard: Vec<LeaderboardEntry> = self
            .players
            .iter()
            .map(|p| LeaderboardEntry {
                player_id: p.id.clone(),
                player_name: p.name.clone(),
                score: self.scores.get(&p.id).copied().unwrap_or(0),
            })
            .collect();
        leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
        self.leaderboard = leaderboard;
    }
}

fn score_submission(
    answer_text: &str,
    answer_key: &[super::question::AnswerEntry],
    previous_answers: &[String],
    scoring: ScoringMode,
) -> AnswerValidation {
    let Some(entry) = answer_matcher::find_match(answer_text, answer_key) else {
        return AnswerValidation::INCORRECT;
    };
    if scoring == ScoringMode::OncePerItem
        && previous_answers
            .iter()
            .any(|prev| answer_matcher::find_match(prev, answer_key) == Some(entry))
    {
        return AnswerValidation::INCORRECT;
    }
    answer_matcher::validate(answer_text, answer_key)
}
