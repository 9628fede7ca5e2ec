//! A logged-in user's session.
//!
//! The session owns the user's in-memory profile, both maze worlds and the
//! per-session activity flags. Every point change goes through the
//! [`RewardDispatcher`], so the profile held here always matches the ledger
//! after a successful call and is left untouched by a failed one.

use crate::activities::{
    self, CrosswordClue, CrosswordScore, QuizQuestion, QuizScore, RecyclingScenario, SpinPrize,
};
use crate::auth::Authenticator;
use crate::core::config::EcoConfig;
use crate::core::error::{Activity, EcoError, EcoResult};
use crate::daily::{self, DailyState, Rollover};
use crate::ledger::{Ledger, ProgressStore, Ranking, UserProfile};
use crate::maze::{Direction, MazeKind, MazeRewards, MazeWorld, Step, WorldSlot, WorldSpec};
use crate::proof::{ProofReceipt, ProofStore};
use crate::rewards::{RewardDispatcher, RewardResult};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Result of an upload-backed activity (daily challenge, photo task).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOutcome {
    pub proof: ProofReceipt,
    pub reward: RewardResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub step: Step,
    /// Present when the step earned points
    pub reward: Option<RewardResult>,
    pub items_left: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: QuizScore,
    pub reward: RewardResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosswordOutcome {
    pub score: CrosswordScore,
    pub reward: RewardResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecyclingOutcome {
    pub choice: &'static str,
    pub reward: RewardResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub prize: SpinPrize,
    pub reward: RewardResult,
}

pub struct Session<'l, S: ProgressStore, R: Rng = StdRng> {
    id: Uuid,
    ledger: &'l Ledger<S>,
    config: EcoConfig,
    proofs: ProofStore,
    profile: UserProfile,
    land: WorldSlot,
    water: WorldSlot,
    quiz_done: bool,
    crossword_done: bool,
    /// Rounds handed out and not yet answered
    pending_quiz: Option<Vec<QuizQuestion>>,
    pending_crossword: Option<Vec<CrosswordClue>>,
    pending_recycling: Option<RecyclingScenario>,
    spin_used: Option<NaiveDate>,
    rng: R,
}

impl<'l, S: ProgressStore> Session<'l, S, StdRng> {
    /// Authenticate and open a session seeded from OS entropy.
    pub fn login(
        ledger: &'l Ledger<S>,
        auth: &dyn Authenticator,
        config: &EcoConfig,
        username: &str,
        password: &str,
        today: NaiveDate,
    ) -> EcoResult<Self> {
        Self::login_with_rng(
            ledger,
            auth,
            config,
            username,
            password,
            today,
            StdRng::from_entropy(),
        )
    }
}

impl<'l, S: ProgressStore, R: Rng> Session<'l, S, R> {
    /// Authenticate, load (or create) the profile and run the daily rollover.
    ///
    /// Rejected credentials return [`EcoError::Auth`] before anything is read
    /// or written.
    pub fn login_with_rng(
        ledger: &'l Ledger<S>,
        auth: &dyn Authenticator,
        config: &EcoConfig,
        username: &str,
        password: &str,
        today: NaiveDate,
        rng: R,
    ) -> EcoResult<Self> {
        if !auth.verify(username, password) {
            log::warn!("[AUTH] rejected login for {}", username);
            return Err(EcoError::Auth);
        }

        let profile = ledger.load(username)?;
        let mut session = Self {
            id: Uuid::new_v4(),
            ledger,
            config: config.clone(),
            proofs: ProofStore::open(config)?,
            profile,
            land: WorldSlot::new(
                WorldSpec::from_config(MazeKind::Land, config),
                config.regenerate_on_goal,
            ),
            water: WorldSlot::new(
                WorldSpec::from_config(MazeKind::Water, config),
                config.regenerate_on_goal,
            ),
            quiz_done: false,
            crossword_done: false,
            pending_quiz: None,
            pending_crossword: None,
            pending_recycling: None,
            spin_used: None,
            rng,
        };

        let rollover = session.roll_over(today)?;
        log::info!(
            "[DAILY] {} logged in (session {}) streak:{} {:?}",
            username,
            session.id,
            session.profile.streak,
            rollover
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn config(&self) -> &EcoConfig {
        &self.config
    }

    pub fn daily_state(&self) -> DailyState {
        daily::daily_state(&self.profile)
    }

    fn dispatcher(&self) -> RewardDispatcher<'l, S> {
        RewardDispatcher::new(self.ledger)
    }

    /// Apply the date transition and persist it if anything changed.
    fn roll_over(&mut self, today: NaiveDate) -> EcoResult<Rollover> {
        let rollover = daily::evaluate(&mut self.profile.clone(), today);
        if rollover.changed() {
            self.dispatcher()
                .grant_with(&mut self.profile, 0, |p| {
                    daily::evaluate(p, today);
                })?;
        }
        Ok(rollover)
    }

    fn store_proof(&self, id: &str, bytes: &[u8]) -> EcoResult<ProofReceipt> {
        if bytes.is_empty() {
            return Err(EcoError::InvalidInput("proof upload is empty".to_string()));
        }
        Ok(self.proofs.store(&self.profile.username, id, bytes)?)
    }

    /// Today's challenge prompt.
    pub fn daily_challenge(&self, today: NaiveDate) -> &'static str {
        daily::challenge_for(today)
    }

    /// Submit the photo proof for today's challenge.
    ///
    /// Grants the base reward plus the current streak once per calendar day.
    pub fn submit_daily(&mut self, proof: &[u8], today: NaiveDate) -> EcoResult<ProofOutcome> {
        self.roll_over(today)?;
        if self.daily_state() == DailyState::Completed {
            return Err(EcoError::AlreadyCompleted(Activity::DailyChallenge));
        }

        let receipt = self.store_proof(&daily::proof_id(today), proof)?;
        let points = daily::daily_reward(self.config.daily_base_reward, self.profile.streak);
        let reward = self
            .dispatcher()
            .grant_with(&mut self.profile, points, |p| p.daily_done = true)?;

        log::info!(
            "[DAILY] {} completed {} digest:{}",
            self.profile.username,
            today,
            receipt.digest
        );
        Ok(ProofOutcome {
            proof: receipt,
            reward,
        })
    }

    /// Submit the proof for a one-time photo task.
    pub fn complete_task(&mut self, task: &str, proof: &[u8]) -> EcoResult<ProofOutcome> {
        let task =
            activities::find_task(task).ok_or_else(|| EcoError::UnknownTask(task.to_string()))?;
        if self.profile.has_completed(task.name) {
            return Err(EcoError::AlreadyCompleted(Activity::PhotoTask(
                task.name.to_string(),
            )));
        }

        let receipt = self.store_proof(&task.proof_id(), proof)?;
        let reward = self
            .dispatcher()
            .grant_with(&mut self.profile, task.reward(), |p| {
                p.mark_completed(task.name);
            })?;
        Ok(ProofOutcome {
            proof: receipt,
            reward,
        })
    }

    /// Tap a repeatable eco card.
    pub fn tap_card(&mut self, card: &str) -> EcoResult<RewardResult> {
        let card =
            activities::find_card(card).ok_or_else(|| EcoError::UnknownTask(card.to_string()))?;
        Ok(self.dispatcher().grant(&mut self.profile, card.points)?)
    }

    /// Move the agent in one of the worlds, generating it on first use.
    ///
    /// The reward is persisted before the step is applied, so a failed save
    /// leaves the item on the map and the agent where it was.
    pub fn move_agent(&mut self, kind: MazeKind, direction: Direction) -> EcoResult<MoveResult> {
        let rewards = MazeRewards {
            item: self.config.item_reward,
            goal: self.config.goal_bonus,
        };
        let slot = match kind {
            MazeKind::Land => &mut self.land,
            MazeKind::Water => &mut self.water,
        };
        let world = slot.get_or_create(&mut self.rng);
        let step = world.plan_move(direction, rewards);

        let reward = if step.points > 0 {
            Some(RewardDispatcher::new(self.ledger).grant(&mut self.profile, step.points)?)
        } else {
            None
        };
        world.apply(&step);
        slot.after_step(&step, &mut self.rng);

        let items_left = slot.get().map_or(0, MazeWorld::items_remaining);
        log::debug!(
            "[MAZE] {} {:?} {:?} -> {:?}",
            kind.name(),
            direction,
            step.event,
            step.to
        );
        Ok(MoveResult {
            step,
            reward,
            items_left,
        })
    }

    /// The world of `kind`, generated lazily.
    pub fn world(&mut self, kind: MazeKind) -> &MazeWorld {
        let slot = match kind {
            MazeKind::Land => &mut self.land,
            MazeKind::Water => &mut self.water,
        };
        slot.get_or_create(&mut self.rng)
    }

    /// Discard a world; the next move generates a fresh one.
    pub fn reset_world(&mut self, kind: MazeKind) {
        match kind {
            MazeKind::Land => self.land.reset(),
            MazeKind::Water => self.water.reset(),
        }
        log::info!("[MAZE] {} reset by {}", kind.name(), self.profile.username);
    }

    /// Sample a quiz round. Available once per session.
    ///
    /// The round is kept so that only these questions can be scored; asking
    /// again replaces it.
    pub fn quiz_round(&mut self) -> EcoResult<Vec<QuizQuestion>> {
        if self.quiz_done {
            return Err(EcoError::AlreadyCompleted(Activity::Quiz));
        }
        let questions = activities::sample_quiz(&mut self.rng);
        self.pending_quiz = Some(questions.clone());
        Ok(questions)
    }

    /// Score answers to the pending quiz round, in question order. The quiz
    /// counts as attempted whatever the score.
    pub fn submit_quiz(&mut self, answers: &[String]) -> EcoResult<QuizOutcome> {
        if self.quiz_done {
            return Err(EcoError::AlreadyCompleted(Activity::Quiz));
        }
        let questions = self
            .pending_quiz
            .as_deref()
            .ok_or_else(|| EcoError::InvalidInput("no quiz round in progress".to_string()))?;

        let score = activities::score_quiz(questions, answers);
        let reward = self.dispatcher().grant(&mut self.profile, score.points)?;
        self.pending_quiz = None;
        self.quiz_done = true;
        Ok(QuizOutcome { score, reward })
    }

    /// Sample crossword clues. Available until solved once this session.
    pub fn crossword_round(&mut self) -> EcoResult<Vec<CrosswordClue>> {
        if self.crossword_done {
            return Err(EcoError::AlreadyCompleted(Activity::Crossword));
        }
        let clues = activities::sample_crossword(&mut self.rng);
        self.pending_crossword = Some(clues.clone());
        Ok(clues)
    }

    /// Check answers against the pending clues. A miss keeps the round open
    /// for another try.
    pub fn submit_crossword(&mut self, answers: &[String]) -> EcoResult<CrosswordOutcome> {
        if self.crossword_done {
            return Err(EcoError::AlreadyCompleted(Activity::Crossword));
        }
        let clues = self
            .pending_crossword
            .as_deref()
            .ok_or_else(|| EcoError::InvalidInput("no crossword round in progress".to_string()))?;

        let score = activities::check_crossword(clues, answers);
        let reward = self.dispatcher().grant(&mut self.profile, score.points())?;
        if score.solved() {
            self.pending_crossword = None;
            self.crossword_done = true;
        }
        Ok(CrosswordOutcome { score, reward })
    }

    pub fn recycling_round(&mut self) -> RecyclingScenario {
        let scenario = activities::pick_scenario(&mut self.rng);
        self.pending_recycling = Some(scenario);
        scenario
    }

    /// Answer the pending recycling scenario; Recycle and Compost earn points.
    pub fn submit_recycling(&mut self, response: &str) -> EcoResult<RecyclingOutcome> {
        let scenario = self.pending_recycling.ok_or_else(|| {
            EcoError::InvalidInput("no recycling scenario in progress".to_string())
        })?;
        let choice = scenario.resolve(response).ok_or_else(|| {
            EcoError::InvalidInput(format!(
                "'{}' is not one of: {}",
                response.trim(),
                scenario.choices.join(", ")
            ))
        })?;
        let reward = self
            .dispatcher()
            .grant(&mut self.profile, activities::choice_reward(choice))?;
        self.pending_recycling = None;
        Ok(RecyclingOutcome { choice, reward })
    }

    /// Spin the wheel once per calendar day.
    pub fn spin(&mut self, today: NaiveDate) -> EcoResult<SpinOutcome> {
        if !activities::can_spin(self.spin_used, today) {
            return Err(EcoError::AlreadyCompleted(Activity::SpinWheel));
        }
        let prize = activities::spin_wheel(&mut self.rng);
        let reward = self.dispatcher().grant(&mut self.profile, prize.points)?;
        self.spin_used = Some(today);
        Ok(SpinOutcome { prize, reward })
    }

    /// Fact of the day. A zero-point event: writes nothing unless the profile
    /// drifted from the stored row.
    pub fn fact(&mut self, today: NaiveDate) -> EcoResult<&'static str> {
        self.dispatcher().grant(&mut self.profile, 0)?;
        Ok(activities::fact_for(today))
    }

    pub fn motivation(&mut self) -> &'static str {
        activities::motivational_message(&mut self.rng)
    }

    pub fn leaderboard(&self) -> EcoResult<Ranking> {
        Ok(self.ledger.ranked()?)
    }

    /// Zero the user's progress and discard both worlds.
    pub fn reset_progress(&mut self) -> EcoResult<()> {
        self.profile = self.ledger.reset(&self.profile.username)?;
        self.land.reset();
        self.water.reset();
        Ok(())
    }
}
