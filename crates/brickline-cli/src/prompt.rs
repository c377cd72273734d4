//! Line-based terminal input for the interactive wizard.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

/// Answer to a multiple-choice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    Pick(T),
    Back,
}

/// Interpret one line typed at a multiple-choice prompt.
///
/// Accepts a 1-based option number, an option's wire string, or `b` /
/// `back`. Anything else yields `None`.
pub fn parse_choice<T: Copy>(
    input: &str,
    options: &[T],
    wire: impl Fn(T) -> &'static str,
) -> Option<Choice<T>> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("b") || input.eq_ignore_ascii_case("back") {
        return Some(Choice::Back);
    }
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .copied()
            .map(Choice::Pick);
    }
    options
        .iter()
        .copied()
        .find(|o| wire(*o).eq_ignore_ascii_case(input))
        .map(Choice::Pick)
}

/// Reads answers from a line source, echoing prompts to stdout.
pub struct Prompter<R> {
    reader: R,
}

impl Prompter<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Print `label` and read one line, without its line terminator.
    pub fn line(&mut self, label: &str) -> Result<String> {
        print!("  {label}: ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let mut buf = String::new();
        let n = self
            .reader
            .read_line(&mut buf)
            .context("failed to read input")?;
        if n == 0 {
            bail!("input closed before the form was complete");
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Ask until the answer is a valid choice.
    pub fn choose<T: Copy>(
        &mut self,
        options: &[T],
        wire: impl Fn(T) -> &'static str + Copy,
    ) -> Result<Choice<T>> {
        loop {
            let answer = self.line("Choice")?;
            match parse_choice(&answer, options, wire) {
                Some(choice) => return Ok(choice),
                None => println!("  Enter a number between 1 and {}, or b to go back.", options.len()),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use brickline_core::{ProjectScale, UserType};

    use super::*;

    #[test]
    fn choice_by_number() {
        assert_eq!(
            parse_choice("2", &UserType::ALL, UserType::as_str),
            Some(Choice::Pick(UserType::Developer))
        );
        assert_eq!(parse_choice("0", &UserType::ALL, UserType::as_str), None);
        assert_eq!(parse_choice("4", &UserType::ALL, UserType::as_str), None);
    }

    #[test]
    fn choice_by_wire_string() {
        assert_eq!(
            parse_choice(" 10m_50m ", &ProjectScale::ALL, ProjectScale::as_str),
            Some(Choice::Pick(ProjectScale::TenToFiftyMillion))
        );
        assert_eq!(
            parse_choice("PARTNER", &UserType::ALL, UserType::as_str),
            Some(Choice::Pick(UserType::Partner))
        );
        assert_eq!(parse_choice("landlord", &UserType::ALL, UserType::as_str), None);
    }

    #[test]
    fn back_keyword() {
        assert_eq!(
            parse_choice("b", &UserType::ALL, UserType::as_str),
            Some(Choice::Back)
        );
        assert_eq!(
            parse_choice("Back", &UserType::ALL, UserType::as_str),
            Some(Choice::Back)
        );
    }

    #[test]
    fn line_strips_terminator() {
        let mut prompter = Prompter::new("Jane Doe\r\nsecond\n".as_bytes());
        assert_eq!(prompter.line("Name").unwrap(), "Jane Doe");
        assert_eq!(prompter.line("Next").unwrap(), "second");
        assert!(prompter.line("Eof").is_err());
    }

    #[test]
    fn choose_retries_until_valid() {
        let mut prompter = Prompter::new("nope\n9\n3\n".as_bytes());
        let choice = prompter.choose(&UserType::ALL, UserType::as_str).unwrap();
        assert_eq!(choice, Choice::Pick(UserType::Partner));
    }
}
