//! Interactive session state machine
//!
//! A session starts in [`SessionState::AwaitingChoice`] and loops until it
//! reaches the terminal [`SessionState::Finished`]. Rendering choices append
//! to the artifact list; the preview is a pure query; exit writes the report.
//! End of input counts as an operator interrupt and skips the report.

use crate::menu::{self, MenuChoice, INTERRUPTED_MESSAGE, RULE};
use crate::viewer::ChartViewer;
use anyhow::Result;
use datavis_core::{preview, report, ChartKind, ChartRenderer, Table};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Operator chose Exit
    Exited,
    /// Input closed before Exit was chosen
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingChoice,
    Finished(Outcome),
}

pub struct Session<'a, R, W> {
    table: &'a Table,
    renderer: ChartRenderer,
    viewer: Box<dyn ChartViewer>,
    report_path: PathBuf,
    artifacts: Vec<PathBuf>,
    state: SessionState,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        table: &'a Table,
        renderer: ChartRenderer,
        viewer: Box<dyn ChartViewer>,
        report_path: impl AsRef<Path>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            table,
            renderer,
            viewer,
            report_path: report_path.as_ref().to_path_buf(),
            artifacts: Vec::new(),
            state: SessionState::AwaitingChoice,
            input,
            output,
        }
    }

    /// Charts produced so far, in the order they were rendered
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the loop to a terminal state. Errors end the session without a
    /// report; the caller prints the generic failure message.
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            write!(self.output, "{}", menu::menu_text())?;
            self.state = match self.read_choice()? {
                Some(choice) => self.handle(choice)?,
                None => SessionState::Finished(Outcome::Interrupted),
            };

            if let SessionState::Finished(outcome) = self.state {
                if outcome == Outcome::Interrupted {
                    writeln!(self.output, "{}", INTERRUPTED_MESSAGE)?;
                }
                log::debug!("Session finished: {:?}", outcome);
                return Ok(outcome);
            }
        }
    }

    /// Apply one validated choice and return the next state
    pub fn handle(&mut self, choice: MenuChoice) -> Result<SessionState> {
        log::debug!("Menu choice: {:?}", choice);
        match choice {
            MenuChoice::Preview => {
                writeln!(self.output, "\n{}\nDATA PREVIEW\n{}", RULE, RULE)?;
                write!(self.output, "{}", preview::preview(self.table))?;
                Ok(SessionState::AwaitingChoice)
            }
            MenuChoice::Exit => {
                self.finish()?;
                Ok(SessionState::Finished(Outcome::Exited))
            }
            MenuChoice::Render(kind) => {
                self.generating_header()?;
                self.render(kind)?;
                self.pause()
            }
            MenuChoice::RenderAll => {
                self.generating_header()?;
                writeln!(self.output, "Generating all visualizations...")?;
                for kind in ChartKind::ALL {
                    self.render(kind)?;
                }
                writeln!(self.output, "✓ All visualizations generated!")?;
                self.pause()
            }
        }
    }

    fn generating_header(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}\nGENERATING VISUALIZATION...\n{}", RULE, RULE)?;
        Ok(())
    }

    fn render(&mut self, kind: ChartKind) -> Result<()> {
        let path = self.renderer.render_kind(self.table, kind)?;
        writeln!(self.output, "✓ {} saved as: {}", kind, path.display())?;
        self.viewer.show(&path);
        self.artifacts.push(path);
        Ok(())
    }

    /// Wait for Enter; closed input ends the session
    fn pause(&mut self) -> Result<SessionState> {
        write!(self.output, "\nPress Enter to continue...")?;
        self.output.flush()?;
        match self.read_line()? {
            Some(_) => Ok(SessionState::AwaitingChoice),
            None => Ok(SessionState::Finished(Outcome::Interrupted)),
        }
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.output, "\nThank you for using DataVis!")?;
        writeln!(
            self.output,
            "Your visualizations have been saved in the '{}' folder.",
            self.renderer.config().output_dir.display()
        )?;

        if self.artifacts.is_empty() {
            log::info!("No charts generated, skipping report");
            writeln!(self.output, "No visualizations were generated; no report written.")?;
            return Ok(());
        }

        let text = report::generate_report(self.table, &self.artifacts)?;
        match report::save_report(&self.report_path, &text) {
            Ok(()) => {
                writeln!(
                    self.output,
                    "✓ Analysis report saved as: {}",
                    self.report_path.display()
                )?;
                writeln!(self.output, "Analysis report generated!")?;
            }
            Err(e) => {
                log::error!("Failed to save report {:?}: {}", self.report_path, e);
                writeln!(self.output, "Error saving report: {}", e)?;
            }
        }
        Ok(())
    }

    /// Prompt until a valid choice arrives. None when input is closed.
    fn read_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            write!(self.output, "\nEnter your choice (1-8): ")?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            match MenuChoice::parse(&line) {
                Ok(choice) => return Ok(Some(choice)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
