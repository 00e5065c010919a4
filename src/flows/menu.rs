//! Interactive menu
//!
//! The numbered menu loop for browsing the tally from a terminal. Input is
//! read word by word, so `1 apple` on a single line works as well as two
//! separate lines.

use anyhow::Result;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::frequency::format_lines;
use crate::core::model::ErrorItem;
use crate::core::render::lookup_message;
use crate::core::tally::TallyReporter;
use crate::flows::histogram::{build_histogram, DEFAULT_SYMBOL};

const RULE: &str =
    "*************************************************************************************";

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Lookup,
    List,
    Histogram,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::Lookup),
            2 => Some(MenuChoice::List),
            3 => Some(MenuChoice::Histogram),
            4 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Menu session over arbitrary input/output streams
pub struct Menu<R, W> {
    reporter: TallyReporter,
    data_file: PathBuf,
    color: bool,
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(reporter: TallyReporter, data_file: PathBuf, input: R, output: W) -> Self {
        Self {
            reporter,
            data_file,
            color: false,
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_main_menu()?;
            let Some(number) = self.read_number()? else {
                writeln!(self.output)?;
                break;
            };

            let choice = MenuChoice::from_number(number);
            debug!(number, ?choice, "menu selection");

            match choice {
                Some(MenuChoice::Lookup) => self.specific_item()?,
                Some(MenuChoice::List) => self.item_list()?,
                Some(MenuChoice::Histogram) => self.histogram()?,
                Some(MenuChoice::Exit) => break,
                None => writeln!(self.output, "Invalid selection.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Give back the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_main_menu(&mut self) -> Result<()> {
        let out = &mut self.output;
        writeln!(out, "{}", RULE)?;
        writeln!(out, "{:^85}", "Corner Grocer Tracking")?;
        writeln!(out, "{}", RULE)?;
        writeln!(out)?;
        writeln!(out, "Please enter your selection as a number (1, 2, 3, or 4)")?;
        writeln!(out)?;
        writeln!(out, "1: Look up how many times a specific item was purchased")?;
        writeln!(out, "2: See a list of all items and how many times each was purchased")?;
        writeln!(out, "3: View a star chart showing item purchase frequency")?;
        writeln!(out, "4: Exit program")?;
        writeln!(out)?;
        write!(out, "Enter your selection: ")?;
        out.flush()?;
        Ok(())
    }

    fn specific_item(&mut self) -> Result<()> {
        write!(
            self.output,
            "Please enter the item or word you wish to look for: "
        )?;
        self.output.flush()?;

        let Some(word) = self.next_word()? else {
            return Ok(());
        };
        writeln!(self.output)?;

        match self.reporter.lookup(&word) {
            Ok(lookup) if lookup.is_found() => {
                writeln!(
                    self.output,
                    "Total of {} {} sold today.",
                    lookup.count, word
                )?;
                writeln!(self.output)?;
            }
            Ok(lookup) => writeln!(self.output, "{}", lookup_message(&lookup))?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn item_list(&mut self) -> Result<()> {
        match self.reporter.report_all_items() {
            Ok(items) => write!(self.output, "{}", format_lines(items))?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn histogram(&mut self) -> Result<()> {
        match build_histogram(&self.reporter, &self.data_file, DEFAULT_SYMBOL, self.color) {
            Ok(chart) => {
                write!(self.output, "{}", chart)?;
                writeln!(self.output)?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn report_error(&mut self, err: &crate::core::error::TallyError) -> Result<()> {
        warn!(error = %err, "menu operation failed");
        let item = ErrorItem::from(err);
        writeln!(self.output, "Error: {}", item.message)?;
        Ok(())
    }

    /// Read a whole number, re-prompting on anything else. `None` at end of input.
    fn read_number(&mut self) -> Result<Option<i64>> {
        loop {
            let Some(word) = self.next_word()? else {
                return Ok(None);
            };
            match word.parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => {
                    // Discard the rest of the line, like a failed stream extraction
                    self.pending.clear();
                    write!(self.output, "Invalid Input! Please enter 1, 2, 3, or 4: ")?;
                    self.output.flush()?;
                }
            }
        }
    }

    fn next_word(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
