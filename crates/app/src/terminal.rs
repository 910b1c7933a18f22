//! Line-driven front end over `StudyController`.
//!
//! Only the question/answer flip lives here; every count and cursor is read
//! from the controller.

use std::io::{self, BufRead, Write};

use flashdeck_core::model::{CardDraft, CardId, DeckKind};
use flashdeck_core::session::{SessionError, SessionPhase, StudySession, empty_deck_guidance};
use services::{ControllerError, POPULAR_TOPICS, RETRY_GUIDANCE, Screen, StudyController};

enum Flow {
    Continue,
    Quit,
}

#[derive(Clone, Copy)]
enum View {
    Topics,
    Failed,
    Custom,
    Session,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    revealed: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            revealed: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Render, read a line, dispatch; until `q` or end of input.
    pub async fn run(&mut self, controller: &mut StudyController) -> io::Result<()> {
        loop {
            self.render(controller)?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            if let Flow::Quit = self.dispatch(controller, line.trim()).await? {
                return Ok(());
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt_field(&mut self, label: &str) -> io::Result<String> {
        writeln!(self.output, "{label}:")?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    //
    // ─── RENDERING ─────────────────────────────────────────────────────────────
    //

    fn render(&mut self, controller: &StudyController) -> io::Result<()> {
        writeln!(self.output)?;
        match controller.screen() {
            Screen::TopicSelection => self.render_topics(),
            Screen::GenerationFailed { message, .. } => {
                writeln!(self.output, "{message}")?;
                writeln!(self.output, "{RETRY_GUIDANCE}")?;
                writeln!(self.output, "[r] try again  [t] topics  [q] quit")
            }
            Screen::CustomCards => self.render_custom(controller),
            Screen::Studying(session) => self.render_session(session),
        }
    }

    fn render_topics(&mut self) -> io::Result<()> {
        writeln!(self.output, "Enter a topic for flashcards, or pick one:")?;
        for (i, topic) in POPULAR_TOPICS.iter().enumerate() {
            writeln!(self.output, "  {}) {topic}", i + 1)?;
        }
        writeln!(self.output, "[c] create your own flashcards  [q] quit")
    }

    fn render_custom(&mut self, controller: &StudyController) -> io::Result<()> {
        let cards = controller.custom_cards();
        if cards.is_empty() {
            writeln!(self.output, "No custom flashcards yet.")?;
        }
        for (i, card) in cards.iter().enumerate() {
            writeln!(self.output, "  {}) {} / {}", i + 1, card.question(), card.answer())?;
        }
        writeln!(
            self.output,
            "[a] add card  [x N] delete card N  [s] study  [t] back  [q] quit"
        )
    }

    fn render_session(&mut self, session: &StudySession) -> io::Result<()> {
        let title = session.kind().topic().unwrap_or("Custom");
        let progress = session.progress();
        match progress.phase {
            SessionPhase::NoCards => {
                writeln!(self.output, "{}", empty_deck_guidance(session.kind()))?;
                writeln!(self.output, "[b] back  [q] quit")
            }
            SessionPhase::Active => {
                let (Some(card), Some(index)) = (session.current_card(), progress.display_index())
                else {
                    return Ok(());
                };
                writeln!(
                    self.output,
                    "{title} flashcards ({index} of {} cards)",
                    progress.total
                )?;
                writeln!(self.output, "Q: {}", card.question())?;
                if self.revealed {
                    writeln!(self.output, "A: {}", card.answer())?;
                }
                writeln!(
                    self.output,
                    "Known: {}  Don't Know: {}",
                    progress.known, progress.unknown
                )?;
                writeln!(self.output, "[f] flip  [k] know  [d] don't know  [b] back  [q] quit")
            }
            SessionPhase::Reviewing => {
                let Some(review) = session.review() else {
                    return Ok(());
                };
                writeln!(
                    self.output,
                    "{title} review (Review: {} of {})",
                    review.cursor() + 1,
                    review.len()
                )?;
                writeln!(self.output, "Q: {}", review.current().question())?;
                writeln!(self.output, "A: {}", review.current().answer())?;
                let forward = if review.has_next() { "[n] next" } else { "[n] finish review" };
                if review.has_prev() {
                    writeln!(self.output, "[p] previous  {forward}  [f] finish review")
                } else {
                    writeln!(self.output, "{forward}  [f] finish review")
                }
            }
            SessionPhase::Completed
            | SessionPhase::AwaitingReview
            | SessionPhase::ReviewFinished => {
                writeln!(self.output, "All Done!")?;
                match session.kind().topic() {
                    Some(topic) => {
                        writeln!(self.output, "You've completed all flashcards on {topic}.")?;
                    }
                    None => {
                        writeln!(
                            self.output,
                            "You've completed all flashcards in your custom deck."
                        )?;
                    }
                }
                writeln!(
                    self.output,
                    "Known: {}  Don't Know: {}",
                    progress.known, progress.unknown
                )?;
                let mut actions = Vec::new();
                if progress.missed > 0 {
                    actions.push("[r] review \"Don't Know\" cards");
                }
                if session.kind().is_generated() {
                    actions.push("[n] generate new cards");
                } else {
                    actions.push("[b] back to custom cards");
                }
                actions.push("[t] topics  [q] quit");
                writeln!(self.output, "{}", actions.join("  "))
            }
        }
    }

    //
    // ─── INPUT ─────────────────────────────────────────────────────────────────
    //

    async fn dispatch(
        &mut self,
        controller: &mut StudyController,
        input: &str,
    ) -> io::Result<Flow> {
        if input == "q" {
            return Ok(Flow::Quit);
        }
        let view = match controller.screen() {
            Screen::TopicSelection => View::Topics,
            Screen::GenerationFailed { .. } => View::Failed,
            Screen::CustomCards => View::Custom,
            Screen::Studying(_) => View::Session,
        };
        let result = match view {
            View::Topics => self.on_topics(controller, input).await,
            View::Failed => match input {
                "r" => controller.retry_generation().await.map(|_| ()),
                "t" => {
                    controller.reset();
                    Ok(())
                }
                _ => Ok(()),
            },
            View::Custom => self.on_custom(controller, input)?,
            View::Session => self.on_session(controller, input).await,
        };
        if let Err(err) = result {
            writeln!(self.output, "{err}")?;
        }
        Ok(Flow::Continue)
    }

    async fn on_topics(
        &mut self,
        controller: &mut StudyController,
        input: &str,
    ) -> Result<(), ControllerError> {
        if input == "c" {
            return controller.open_custom_cards();
        }
        let topic = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| POPULAR_TOPICS.get(i).copied())
            .unwrap_or(input);
        self.revealed = false;
        controller.select_topic(topic).await.map(|_| ())
    }

    fn on_custom(
        &mut self,
        controller: &mut StudyController,
        input: &str,
    ) -> io::Result<Result<(), ControllerError>> {
        let result = match input {
            "a" => {
                let question = self.prompt_field("Question")?;
                let answer = self.prompt_field("Answer")?;
                controller
                    .add_custom_card(CardDraft::new(question, answer))
                    .map(|_| ())
            }
            "s" => {
                self.revealed = false;
                match controller.start_custom_study() {
                    Err(ControllerError::Session(SessionError::Empty)) => {
                        writeln!(self.output, "{}", empty_deck_guidance(&DeckKind::Custom))?;
                        Ok(())
                    }
                    other => other.map(|_| ()),
                }
            }
            "t" => {
                controller.reset();
                Ok(())
            }
            other => {
                let target = other
                    .strip_prefix('x')
                    .and_then(|n| n.trim().parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| controller.custom_cards().get(i))
                    .map(|card| card.id().clone());
                match target {
                    Some(id) => delete(controller, &id),
                    None => Ok(()),
                }
            }
        };
        Ok(result)
    }

    async fn on_session(
        &mut self,
        controller: &mut StudyController,
        input: &str,
    ) -> Result<(), ControllerError> {
        let Some(session) = controller.session() else {
            return Ok(());
        };
        let phase = session.phase();
        let generated = session.kind().is_generated();

        match (phase, input) {
            (_, "b") if generated => {
                controller.reset();
                Ok(())
            }
            (_, "b") => controller.back_to_custom_cards(),
            (_, "t") if phase != SessionPhase::Active => {
                controller.reset();
                Ok(())
            }
            (SessionPhase::Active, "f") => {
                self.revealed = !self.revealed;
                Ok(())
            }
            (SessionPhase::Active, "k") => {
                self.revealed = false;
                controller.report_known().map(|_| ())
            }
            (SessionPhase::Active, "d") => {
                self.revealed = false;
                controller.report_unknown().map(|_| ())
            }
            (SessionPhase::Reviewing, "n") => controller.review_next().map(|_| ()),
            (SessionPhase::Reviewing, "p") => controller.review_prev().map(|_| ()),
            (SessionPhase::Reviewing, "f") => controller.finish_review(),
            (_, "r") if phase.is_terminal() => controller.enter_review(),
            (_, "n") if phase.is_terminal() && generated => {
                self.revealed = false;
                controller.generate_new_cards().await.map(|_| ())
            }
            _ => Ok(()),
        }
    }
}

fn delete(controller: &mut StudyController, id: &CardId) -> Result<(), ControllerError> {
    controller.delete_custom_card(id).map(|_| ())
}
