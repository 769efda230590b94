use std::io::{BufRead, Write};

use crossterm::style::{Stylize, style};
use winwatch_core::MonitorError;
use winwatch_types::{MonitorMode, OcrTarget, WindowHandle};

pub const RULE: &str = "═══════════════════════════════════════════════════════";

const OWNER_WIDTH: usize = 20;
const TITLE_WIDTH: usize = 40;

/// Numbered-menu prompts over any reader/writer pair.
///
/// Every prompt loops until it gets valid input; `q` or end of input cancels.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn choose_mode(&mut self) -> Result<Option<MonitorMode>, MonitorError> {
        loop {
            self.menu("Pick a Mode:", &["Save Pictures in Folder", "Scan for OCR"])?;
            let Some(line) = self.ask("Enter your choice (or 'q' to quit):")? else {
                return Ok(None);
            };

            match parse_menu(&line, 2) {
                Ok(1) => return Ok(Some(MonitorMode::SavePictures)),
                Ok(_) => return Ok(self.choose_ocr_target()?.map(MonitorMode::ScanOcr)),
                Err(e) => self.complain(&e)?,
            }
        }
    }

    pub fn choose_ocr_target(&mut self) -> Result<Option<OcrTarget>, MonitorError> {
        loop {
            self.menu(
                "OCR Mode Selection:",
                &[
                    "Custom - Enter your own phrase to search for",
                    "Cursor App - Scan right 1/3 for \"Run this command?\"",
                    "Cursor Agent - Terminal bottom half scan",
                ],
            )?;
            let Some(line) = self.ask("Enter your choice (or 'q' to quit):")? else {
                return Ok(None);
            };

            match parse_menu(&line, 3) {
                Ok(1) => {
                    let Some(raw) =
                        self.ask_raw("Enter the phrase to search for (max 20 characters):")?
                    else {
                        return Ok(None);
                    };
                    match OcrTarget::custom(&raw) {
                        Ok(target) => return Ok(Some(target)),
                        Err(e) => self.complain(&MonitorError::InvalidUserInput(e.to_string()))?,
                    }
                }
                Ok(2) => return Ok(Some(OcrTarget::CursorPreset)),
                Ok(_) => return Ok(Some(OcrTarget::CursorAgentPreset)),
                Err(e) => self.complain(&e)?,
            }
        }
    }

    pub fn choose_window(
        &mut self,
        windows: &[WindowHandle],
    ) -> Result<Option<WindowHandle>, MonitorError> {
        if windows.is_empty() {
            writeln!(self.output, "{}", style("No windows found.").red())?;
            return Ok(None);
        }

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", style(RULE).cyan())?;
            writeln!(self.output, "{}", style("Available Windows:").green())?;
            writeln!(self.output, "{}", style(RULE).cyan())?;
            for (index, window) in windows.iter().enumerate() {
                writeln!(
                    self.output,
                    "{} {} │ {}",
                    style(format!("[{:2}]", index + 1)).yellow(),
                    style(pad_owner(&window.owner_name)).blue(),
                    truncate_title(&window.title)
                )?;
            }
            writeln!(self.output, "{}", style(RULE).cyan())?;

            let Some(line) = self.ask("Enter the number of the window to monitor (or 'q' to quit):")?
            else {
                return Ok(None);
            };

            match parse_menu(&line, windows.len()) {
                Ok(n) => return Ok(Some(windows[n - 1].clone())),
                Err(e) => self.complain(&e)?,
            }
        }
    }

    fn menu(&mut self, title: &str, options: &[&str]) -> Result<(), MonitorError> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", style(RULE).cyan())?;
        writeln!(self.output, "{}", style(title).green())?;
        writeln!(self.output, "{}", style(RULE).cyan())?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "{} {}", style(format!("[{}]", index + 1)).yellow(), option)?;
        }
        writeln!(self.output, "{}", style(RULE).cyan())?;
        Ok(())
    }

    /// Ask and read one trimmed line; `q` and end of input both cancel
    fn ask(&mut self, question: &str) -> Result<Option<String>, MonitorError> {
        Ok(self
            .ask_raw(question)?
            .filter(|line| !line.eq_ignore_ascii_case("q")))
    }

    /// Like `ask`, but `q` is a valid answer
    fn ask_raw(&mut self, question: &str) -> Result<Option<String>, MonitorError> {
        writeln!(self.output)?;
        write!(self.output, "{} ", style(question).green())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn complain(&mut self, error: &MonitorError) -> Result<(), MonitorError> {
        let message = match error {
            MonitorError::InvalidUserInput(reason) => reason.clone(),
            other => other.to_string(),
        };
        writeln!(self.output, "{}", style(message).red())?;
        Ok(())
    }
}

/// Parse a 1-based menu selection in `1..=max`
pub fn parse_menu(input: &str, max: usize) -> Result<usize, MonitorError> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(MonitorError::InvalidUserInput(
            "Invalid selection. Please try again.".to_string(),
        )),
    }
}

pub fn pad_owner(owner: &str) -> String {
    let clipped: String = owner.chars().take(OWNER_WIDTH).collect();
    format!("{clipped:<OWNER_WIDTH$}")
}

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let head: String = title.chars().take(TITLE_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}
