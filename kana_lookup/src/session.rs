use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, warn};

use super::entities::*;
use super::error::*;
use super::kana_data::*;
use super::raster::*;
use super::recognizer::*;
use super::stats::*;
use super::*;

pub const NO_INK_FEEDBACK: &str = "Draw a kana character first, then submit.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    AwaitingDrawing,
    Graded { correct: bool },
}

// Outcome of grading one drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeReport {
    pub prompt: Prompt,
    // None when no candidate had a template
    pub guess: Option<Match>,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submission {
    Graded(GradeReport),
    // Nothing was drawn; nothing was scored or counted
    NoInk,
    // The current prompt was graded already
    AlreadyGraded,
}

/// Everything a drill session tracks between transitions.
///
/// Transitions on [`SessionController`] read a state and return the next one.
/// While awaiting a drawing the active prompt is never also waiting in the
/// retry queue; a missed prompt is queued as soon as it is graded.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    mode: Mode,
    prompt: Prompt,
    phase: Phase,
    retry_queue: VecDeque<Prompt>,
    misses: BTreeMap<char, u32>,
    asked: u32,
    correct: u32,
    incorrect: u32,
    best_guess: Option<char>,
    feedback: String,
}

impl SessionState {
    fn new(mode: Mode, prompt: Prompt) -> SessionState {
        SessionState {
            mode: mode,
            prompt: prompt,
            phase: Phase::AwaitingDrawing,
            retry_queue: VecDeque::new(),
            misses: BTreeMap::new(),
            asked: 0,
            correct: 0,
            incorrect: 0,
            best_guess: None,
            feedback: String::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn retry_queue(&self) -> &VecDeque<Prompt> {
        &self.retry_queue
    }

    pub fn misses(&self, glyph: char) -> u32 {
        self.misses.get(&glyph).copied().unwrap_or(0)
    }

    pub fn asked(&self) -> u32 {
        self.asked
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn best_guess(&self) -> Option<char> {
        self.best_guess
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

/// Drives the drawing drill: prompt selection, grading and the retry policy.
pub struct SessionController<R: Rng, S: StatsSink> {
    pool: Vec<KanaSymbol>,
    recognizer: Recognizer,
    rng: R,
    stats: S,
}

impl<S: StatsSink> SessionController<ChaCha8Rng, S> {
    pub fn with_seed(pool: Vec<KanaSymbol>, recognizer: Recognizer, stats: S, seed: u64) -> Self {
        SessionController::new(pool, recognizer, ChaCha8Rng::seed_from_u64(seed), stats)
    }

    pub fn from_entropy(pool: Vec<KanaSymbol>, recognizer: Recognizer, stats: S) -> Self {
        SessionController::new(pool, recognizer, ChaCha8Rng::from_entropy(), stats)
    }
}

impl<R: Rng, S: StatsSink> SessionController<R, S> {
    pub fn new(pool: Vec<KanaSymbol>, recognizer: Recognizer, rng: R, stats: S) -> Self {
        SessionController {
            pool: pool,
            recognizer: recognizer,
            rng: rng,
            stats: stats,
        }
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn pool(&self) -> &[KanaSymbol] {
        &self.pool
    }

    // Uniform draw from the mode-filtered pool
    fn sample(&mut self, mode: Mode) -> Result<Prompt> {
        let candidates = filter_pool(&self.pool, mode);
        if candidates.is_empty() {
            return Err(RecognizerError::EmptyPool(mode.to_string()));
        }
        let ix = self.rng.gen_range(0..candidates.len());
        Ok(*candidates[ix])
    }

    // Retry head first, otherwise a fresh sample
    fn pick_prompt(&mut self, state: &mut SessionState) -> Result<Prompt> {
        if let Some(prompt) = state.retry_queue.pop_front() {
            return Ok(prompt);
        }
        self.sample(state.mode)
    }

    pub fn start(&mut self, mode: Mode) -> Result<SessionState> {
        let prompt = self.sample(mode)?;
        Ok(SessionState::new(mode, prompt))
    }

    /// Grades the drawing currently on the surface.
    pub fn submit<F: Surface + ?Sized>(&mut self, state: &SessionState, surface: &F) -> Result<(SessionState, Submission)> {
        let mut next = state.clone();
        if let Phase::Graded { .. } = state.phase {
            return Ok((next, Submission::AlreadyGraded));
        }
        if !self.recognizer.is_ready() {
            return Err(RecognizerError::NotReady(
                self.recognizer.status_message().unwrap_or(INIT_FAILURE_MESSAGE).to_string(),
            ));
        }
        let raster = surface.raster();
        if self.recognizer.normalizer().ink_bounds(raster).is_none() {
            next.feedback = NO_INK_FEEDBACK.to_string();
            return Ok((next, Submission::NoInk));
        }

        let guess = self.recognizer.classify_raster(raster, &self.pool, state.mode)?;
        let prompt = state.prompt;
        let correct = match &guess {
            Some(mc) => mc.glyph == prompt.kana,
            None => false,
        };
        next.asked += 1;
        next.best_guess = guess.map(|mc| mc.glyph);
        next.phase = Phase::Graded { correct: correct };
        if correct {
            next.correct += 1;
            next.feedback = format!("Correct: {} -> {}", prompt.romaji, prompt.kana);
        } else {
            next.incorrect += 1;
            next.retry_queue.push_back(prompt);
            *next.misses.entry(prompt.kana).or_insert(0) += 1;
            let drawn = match &guess {
                Some(mc) => mc.glyph.to_string(),
                None => "nothing recognizable".to_string(),
            };
            next.feedback = format!("Not quite. You drew {}, expected {}.", drawn, prompt.kana);
        }
        debug!(prompt = %prompt.kana, guess = ?next.best_guess, correct, "graded drawing");
        // A failing stats store must not interrupt the drill
        if let Err(e) = self.stats.record(prompt.kana, correct) {
            warn!(error = %e, "could not record result");
        }
        Ok((
            next,
            Submission::Graded(GradeReport {
                prompt: prompt,
                guess: guess,
                correct: correct,
            }),
        ))
    }

    pub fn next_prompt<F: Surface + ?Sized>(&mut self, state: &SessionState, surface: &mut F) -> Result<SessionState> {
        let mut next = state.clone();
        next.prompt = self.pick_prompt(&mut next)?;
        next.phase = Phase::AwaitingDrawing;
        next.best_guess = None;
        next.feedback.clear();
        surface.clear();
        Ok(next)
    }

    // Enter advances past a graded prompt, otherwise submits
    pub fn on_enter<F: Surface + ?Sized>(&mut self, state: &SessionState, surface: &mut F) -> Result<(SessionState, Option<Submission>)> {
        match state.phase {
            Phase::Graded { .. } => Ok((self.next_prompt(state, surface)?, None)),
            Phase::AwaitingDrawing => {
                let (next, submission) = self.submit(state, surface)?;
                Ok((next, Some(submission)))
            }
        }
    }

    // Retries from the previous mode are dropped
    pub fn change_mode<F: Surface + ?Sized>(&mut self, state: &SessionState, mode: Mode, surface: &mut F) -> Result<SessionState> {
        let mut next = state.clone();
        next.mode = mode;
        next.retry_queue.clear();
        self.next_prompt(&next, surface)
    }
}
