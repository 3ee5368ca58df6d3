//! Caller-owned quiz session: navigation, answer recording, debounced auto-advance and
//! tracking marks.
//!
//! Timers are modelled as deadlines. The caller passes the current [`Instant`] to
//! [`QuizSession::select_answer`] and [`QuizSession::poll`]; nothing runs in the background.

mod marks;

pub use marks::TrackingMarks;

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::profile::{compute_profile, Profile};
use crate::questionnaire::{Answer, AnswerId, AnswerSelection, QuestionId, Questionnaire};

/// Delay before moving on after an answer when auto-advance is enabled.
pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(220);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "step", content = "index")]
pub enum QuizStep {
    Intro,
    Question(usize),
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub show_intro: bool,
    /// `None` disables auto-advance; answers then wait for [`QuizSession::next`].
    pub auto_advance: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_intro: true,
            auto_advance: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no question is active on the {0:?} step")]
    NotOnQuestion(QuizStep),
    #[error("question {question} has no answer {answer}")]
    UnknownAnswer {
        question: QuestionId,
        answer: AnswerId,
    },
    #[error("question {question} has no answer at position {position}")]
    NoAnswerAtPosition { question: QuestionId, position: usize },
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    question_count: usize,
    options: SessionOptions,
    step: QuizStep,
    selections: AnswerSelection,
    pending_advance: Option<Instant>,
    marks: TrackingMarks,
}

impl QuizSession {
    pub fn new(questionnaire: &Questionnaire, options: SessionOptions) -> Self {
        let question_count = questionnaire.questions.len();
        Self {
            question_count,
            options,
            step: initial_step(question_count, options),
            selections: AnswerSelection::new(),
            pending_advance: None,
            marks: TrackingMarks::default(),
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn selections(&self) -> &AnswerSelection {
        &self.selections
    }

    pub fn marks(&self) -> &TrackingMarks {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut TrackingMarks {
        &mut self.marks
    }

    pub fn is_finished(&self) -> bool {
        self.step == QuizStep::Result
    }

    pub fn pending_advance(&self) -> Option<Instant> {
        self.pending_advance
    }

    /// Leave the intro screen. No-op on any other step.
    pub fn start(&mut self) {
        if self.step == QuizStep::Intro {
            self.step = self.step_after(QuizStep::Intro);
        }
    }

    /// Record `answer_id` for the active question and (re)arm auto-advance.
    pub fn select_answer<'q>(
        &mut self,
        questionnaire: &'q Questionnaire,
        answer_id: &AnswerId,
        now: Instant,
    ) -> Result<&'q Answer, SessionError> {
        let QuizStep::Question(index) = self.step else {
            return Err(SessionError::NotOnQuestion(self.step));
        };
        let question = questionnaire
            .questions
            .get(index)
            .ok_or(SessionError::NotOnQuestion(self.step))?;
        let answer = question
            .answer(answer_id)
            .ok_or_else(|| SessionError::UnknownAnswer {
                question: question.id.clone(),
                answer: answer_id.clone(),
            })?;

        self.selections.select(question.id.clone(), answer.id.clone());

        // a newer answer replaces any advance still pending
        self.pending_advance = self.options.auto_advance.map(|delay| now + delay);

        tracing::debug!(question = %question.id, answer = %answer.id, "answer selected");
        Ok(answer)
    }

    /// Hot-key selection: `key` is the 1-based position of the answer.
    pub fn select_by_key<'q>(
        &mut self,
        questionnaire: &'q Questionnaire,
        key: usize,
        now: Instant,
    ) -> Result<&'q Answer, SessionError> {
        let QuizStep::Question(index) = self.step else {
            return Err(SessionError::NotOnQuestion(self.step));
        };
        let question = questionnaire
            .questions
            .get(index)
            .ok_or(SessionError::NotOnQuestion(self.step))?;
        let answer = key
            .checked_sub(1)
            .and_then(|position| question.answers.get(position))
            .ok_or_else(|| SessionError::NoAnswerAtPosition {
                question: question.id.clone(),
                position: key,
            })?;

        self.select_answer(questionnaire, &answer.id, now)
    }

    /// Fire a due auto-advance. Returns whether the step changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_advance {
            Some(deadline) if deadline <= now => {
                self.pending_advance = None;
                let before = self.step;
                self.step = self.step_after(before);
                self.step != before
            }
            _ => false,
        }
    }

    /// Manual advance; only allowed once the active question has an answer.
    pub fn next(&mut self, questionnaire: &Questionnaire) -> bool {
        let QuizStep::Question(index) = self.step else {
            return false;
        };
        let answered = questionnaire
            .questions
            .get(index)
            .map(|question| self.selections.contains(&question.id))
            .unwrap_or(false);
        if !answered {
            return false;
        }

        self.pending_advance = None;
        self.step = self.step_after(self.step);
        true
    }

    /// Drop all answers and go back to the first screen.
    pub fn restart(&mut self) {
        self.selections.clear();
        self.pending_advance = None;
        self.marks.reset();
        self.step = initial_step(self.question_count, self.options);
    }

    pub fn profile(&self, questionnaire: &Questionnaire) -> Profile {
        compute_profile(questionnaire, &self.selections)
    }

    /// Claims the one-per-run "finish" event once the result screen is reached.
    pub fn claim_finish_event(&mut self) -> bool {
        self.is_finished() && self.marks.claim_finish()
    }

    fn step_after(&self, step: QuizStep) -> QuizStep {
        let next_index = match step {
            QuizStep::Intro => 0,
            QuizStep::Question(index) => index + 1,
            QuizStep::Result => return QuizStep::Result,
        };

        if next_index < self.question_count {
            QuizStep::Question(next_index)
        } else {
            QuizStep::Result
        }
    }
}

fn initial_step(question_count: usize, options: SessionOptions) -> QuizStep {
    if options.show_intro {
        QuizStep::Intro
    } else if question_count == 0 {
        QuizStep::Result
    } else {
        QuizStep::Question(0)
    }
}
