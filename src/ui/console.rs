use crate::model::error::Error;
use crate::model::error::io::IOError;
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented operator dialogue. Every question loops until it gets an
/// acceptable answer; only I/O failures and end of input escape.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool, Error> {
        let hint = if default { "y" } else { "n" };
        loop {
            self.prompt(&format!("{question} {}", format!("[y/n] ({hint}):").dimmed()))?;
            let answer = self.read_line()?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.error("Please answer y or n.")?,
            }
        }
    }

    /// Free text; blank answers are asked again.
    pub fn ask(&mut self, question: &str) -> Result<String, Error> {
        loop {
            self.prompt(question)?;
            let answer = self.read_line()?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    pub fn ask_with<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Option<T>,
        invalid: &str,
    ) -> Result<T, Error> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.error(invalid)?,
            }
        }
    }

    /// Numbered menu. Accepts the number or the label itself.
    pub fn select<T: Copy + Display>(&mut self, title: &str, choices: &[T]) -> Result<T, Error> {
        self.line(title)?;
        for (index, choice) in choices.iter().enumerate() {
            self.line(&format!("  {}. {choice}", index + 1))?;
        }
        let question = format!("Enter choice (1-{}):", choices.len());
        loop {
            let answer = self.ask(&question)?;
            let by_number = answer
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| choices.get(index));
            let by_label = || {
                choices
                    .iter()
                    .find(|choice| choice.to_string().eq_ignore_ascii_case(&answer))
            };
            match by_number.or_else(by_label) {
                Some(choice) => return Ok(*choice),
                None => self.error("Not one of the listed choices.")?,
            }
        }
    }

    pub fn success(&mut self, message: &str) -> Result<(), Error> {
        self.line(&message.green().to_string())
    }

    pub fn warning(&mut self, message: &str) -> Result<(), Error> {
        self.line(&message.yellow().to_string())
    }

    pub fn error(&mut self, message: &str) -> Result<(), Error> {
        self.line(&message.red().to_string())
    }

    pub fn info(&mut self, message: &str) -> Result<(), Error> {
        self.line(&message.blue().to_string())
    }

    pub fn muted(&mut self, message: &str) -> Result<(), Error> {
        self.line(&message.dimmed().to_string())
    }

    pub fn line(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.output, "{text}").map_err(IOError::WriteOutputFailed)?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), Error> {
        write!(self.output, "{text} ").map_err(IOError::WriteOutputFailed)?;
        self.output.flush().map_err(IOError::WriteOutputFailed)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(IOError::ReadInputFailed)?;
        if read == 0 {
            Err(IOError::InputClosed)?
        }
        Ok(line.trim().to_string())
    }
}
