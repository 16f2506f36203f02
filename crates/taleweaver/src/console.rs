//! Line-oriented interactive storytelling console.
//!
//! Reads reader input from any async buffered reader and writes to any
//! [`Write`], so the binary drives it with stdin/stdout and tests drive it
//! with in-memory buffers.

use std::fmt::Display;
use std::io::Write;
use taleweaver_error::{ConsoleError, ConsoleErrorKind, TaleweaverResult};
use taleweaver_story::{RewriteKind, SegmentOutcome, StorySession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

const RULE: &str = "============================================================";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    /// Write the next segment
    Continue,
    /// Write the ending and leave
    End,
    /// Write the next segment around a reader idea
    ContinueWithSuggestion,
    /// Free-form change to the whole story
    RequestChanges,
    /// Retell the story in another tone
    ChangeTone,
    /// Add a character to the story
    AddCharacter,
    /// Move the story somewhere else
    ChangeSetting,
    /// Throw the story away and start again
    NewStory,
    /// Leave without an ending
    Exit,
}

impl MenuChoice {
    /// Menu entries in display order; entry `n` is chosen by typing `n + 1`.
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::Continue,
        MenuChoice::End,
        MenuChoice::ContinueWithSuggestion,
        MenuChoice::RequestChanges,
        MenuChoice::ChangeTone,
        MenuChoice::AddCharacter,
        MenuChoice::ChangeSetting,
        MenuChoice::NewStory,
        MenuChoice::Exit,
    ];

    /// Parse a typed menu number.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver::MenuChoice;
    ///
    /// assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::End));
    /// assert_eq!(MenuChoice::parse("10"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    /// Menu text.
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Continue => "Continue the story",
            MenuChoice::End => "End the story here",
            MenuChoice::ContinueWithSuggestion => "Continue with a suggestion",
            MenuChoice::RequestChanges => "Request changes to the story",
            MenuChoice::ChangeTone => "Change story tone or style",
            MenuChoice::AddCharacter => "Add a new character",
            MenuChoice::ChangeSetting => "Change the setting",
            MenuChoice::NewStory => "Start a new story",
            MenuChoice::Exit => "Exit",
        }
    }

    /// The rewrite this entry asks for, with the question put to the reader.
    pub fn rewrite(self) -> Option<(RewriteKind, &'static str)> {
        match self {
            MenuChoice::RequestChanges => Some((
                RewriteKind::ChangeRequest,
                "What changes would you like to make to the story? ",
            )),
            MenuChoice::ChangeTone => Some((
                RewriteKind::Tone,
                "How should the tone or style change? (e.g. 'make it funnier') ",
            )),
            MenuChoice::AddCharacter => Some((
                RewriteKind::Character,
                "What new character would you like to add? ",
            )),
            MenuChoice::ChangeSetting => Some((
                RewriteKind::Setting,
                "Where should the story take place instead? ",
            )),
            _ => None,
        }
    }
}

/// Interactive loop over a [`StorySession`].
pub struct StoryConsole<R, W> {
    session: StorySession,
    input: R,
    output: W,
}

impl<R, W> StoryConsole<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Create a console.
    pub fn new(session: StorySession, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &StorySession {
        &self.session
    }

    /// Give back the session and the output sink.
    pub fn into_parts(self) -> (StorySession, W) {
        (self.session, self.output)
    }

    /// Run until the reader ends the story, exits, or input runs out.
    ///
    /// # Errors
    ///
    /// Backend failures while writing segments end the loop. Failed
    /// rewrites are reported to the reader and the loop continues.
    pub async fn run(&mut self) -> TaleweaverResult<()> {
        self.say("Welcome to Taleweaver, the storytelling companion!")?;
        self.say("Every part of your story is checked to make sure it is safe and fun.")?;

        if !self.start_story("YOUR STORY BEGINS").await? {
            return self.farewell();
        }

        loop {
            let Some(choice) = self.read_choice().await? else {
                return self.farewell();
            };
            info!(?choice, "Menu choice");

            if let Some((kind, question)) = choice.rewrite() {
                let Some(request) = self.ask(question).await? else {
                    return self.farewell();
                };
                self.apply_rewrite(kind, &request).await?;
                continue;
            }

            match choice {
                MenuChoice::Continue => {
                    self.say("\nContinuing your story...")?;
                    let outcome = self.session.continue_story(None).await?;
                    self.show_segment("STORY CONTINUES", &outcome)?;
                }
                MenuChoice::ContinueWithSuggestion => {
                    let Some(idea) = self.ask("What would you like to happen next? ").await?
                    else {
                        return self.farewell();
                    };
                    self.say(format!("\nAdding your idea: {idea}"))?;
                    let outcome = self.session.continue_story(Some(&idea)).await?;
                    self.show_segment("STORY CONTINUES", &outcome)?;
                }
                MenuChoice::End => {
                    self.say("\nCreating a perfect ending...")?;
                    let outcome = self.session.end_story().await?;
                    self.show_segment("THE END", &outcome)?;
                    self.say("\nThank you for enjoying this story adventure!")?;
                    return Ok(());
                }
                MenuChoice::NewStory => {
                    self.say("\nStarting a brand new story!")?;
                    if !self.start_story("YOUR NEW STORY BEGINS").await? {
                        return self.farewell();
                    }
                }
                MenuChoice::Exit => return self.farewell(),
                _ => {}
            }
        }
    }

    /// Ask for a story request and write the opening. `false` when input ran out.
    async fn start_story(&mut self, heading: &str) -> TaleweaverResult<bool> {
        let Some(request) = self.ask("What kind of story would you like to hear? ").await? else {
            return Ok(false);
        };
        self.say(format!("\nCreating a story about: {request}"))?;
        self.say("Writing and checking your story...")?;

        let outcome = self.session.begin(&request).await?;
        self.show_segment(heading, &outcome)?;
        Ok(true)
    }

    async fn apply_rewrite(&mut self, kind: RewriteKind, request: &str) -> TaleweaverResult<()> {
        self.say(format!("\nWorking on your {kind}: {request}"))?;
        match self.session.rewrite(kind, request).await {
            Ok(outcome) if *outcome.applied() => {
                self.banner("STORY UPDATED")?;
                let transcript = self.session.transcript().to_string();
                self.say(transcript)
            }
            Ok(_) => self.say(
                "The story checker didn't approve that change, so the story stays as it was.",
            ),
            Err(e) => {
                warn!(error = %e, %kind, "Rewrite failed");
                self.say(format!(
                    "Sorry, I couldn't make that {kind}. Let's continue with the story."
                ))
            }
        }
    }

    async fn read_choice(&mut self) -> TaleweaverResult<Option<MenuChoice>> {
        self.say(format!("\n{RULE}"))?;
        self.say("What would you like to do next?")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, choice.label()))?;
        }
        self.say(RULE)?;

        loop {
            let Some(line) = self.ask("Your choice (1-9): ").await? else {
                return Ok(None);
            };
            match MenuChoice::parse(&line) {
                Some(choice) => return Ok(Some(choice)),
                None => self.say("Please enter a number between 1 and 9.")?,
            }
        }
    }

    fn show_segment(&mut self, heading: &str, outcome: &SegmentOutcome) -> TaleweaverResult<()> {
        if outcome.used_fallback() {
            self.say("Had to use a backup story part because the new one didn't pass the safety check.")?;
        }
        self.banner(heading)?;
        self.say(outcome.text())
    }

    fn banner(&mut self, heading: &str) -> TaleweaverResult<()> {
        self.say(format!("\n{RULE}\n{heading}:\n{RULE}"))
    }

    fn farewell(&mut self) -> TaleweaverResult<()> {
        self.say("\nThank you for using Taleweaver! Have a wonderful day full of stories.")
    }

    async fn ask(&mut self, question: &str) -> TaleweaverResult<Option<String>> {
        write!(self.output, "{question}")
            .and_then(|_| self.output.flush())
            .map_err(|e| ConsoleError::new(ConsoleErrorKind::Write(e.to_string())))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .map_err(|e| ConsoleError::new(ConsoleErrorKind::Read(e.to_string())))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: impl Display) -> TaleweaverResult<()> {
        writeln!(self.output, "{text}")
            .map_err(|e| ConsoleError::new(ConsoleErrorKind::Write(e.to_string())).into())
    }
}
