//! Line-oriented prompting and the parsers behind each question

use glyphcast::{GlyphRamp, RampPreset};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

pub const TRY_AGAIN: &str = "Try again";

/// Brightness deltas accepted by the brightness prompt
pub const BRIGHTNESS_RANGE: std::ops::RangeInclusive<i32> = -255..=255;

/// Most filter options that can be chosen in one round
const MAX_FILTERS: usize = 4;

/// What the main menu answer asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Zero-based index into the collection
    Edit(usize),
    Add,
    Animate,
    Quit,
}

/// Filters picked for one round of the edit loop
///
/// Application order is fixed regardless of how they were typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub negate: bool,
    pub mirror: bool,
    pub brightness: bool,
    pub ramp: bool,
}

impl FilterSet {
    pub fn count(&self) -> usize {
        [self.negate, self.mirror, self.brightness, self.ramp]
            .iter()
            .filter(|&&on| on)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChoice {
    Apply(FilterSet),
    Back,
}

/// Unwrap a path that was pasted or dropped into the terminal
///
/// Surrounding whitespace goes, then one matching pair of single or double
/// quotes.
pub fn clean_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|&q| {
            trimmed
                .strip_prefix(q)
                .and_then(|rest| rest.strip_suffix(q))
        })
        .unwrap_or(trimmed);
    PathBuf::from(unquoted)
}

/// Main menu numbering: `1..=n` edit image n, then add, animate, quit
pub fn parse_menu_choice(line: &str, image_count: usize) -> Option<MenuChoice> {
    let choice: usize = line.trim().parse().ok()?;
    match choice {
        0 => None,
        n if n <= image_count => Some(MenuChoice::Edit(n - 1)),
        n if n == image_count + 1 => Some(MenuChoice::Add),
        n if n == image_count + 2 => Some(MenuChoice::Animate),
        n if n == image_count + 3 => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Parse a filter line such as `1 3`
///
/// Digits may be space separated or run together. `5` anywhere means back,
/// `0` selects nothing, repeats collapse, and at most four options count.
/// Anything other than the digits 0 to 5 rejects the line.
pub fn parse_filter_options(line: &str) -> Option<FilterChoice> {
    let digits: Vec<u32> = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10).filter(|&d| d <= 5))
        .collect::<Option<_>>()?;

    if digits.is_empty() {
        return None;
    }
    if digits.contains(&5) {
        return Some(FilterChoice::Back);
    }

    let mut set = FilterSet::default();
    for digit in digits {
        if set.count() == MAX_FILTERS {
            break;
        }
        match digit {
            1 => set.negate = true,
            2 => set.mirror = true,
            3 => set.brightness = true,
            4 => set.ramp = true,
            _ => {}
        }
    }
    Some(FilterChoice::Apply(set))
}

pub fn parse_brightness(line: &str) -> Option<i32> {
    line.trim()
        .parse()
        .ok()
        .filter(|delta| BRIGHTNESS_RANGE.contains(delta))
}

/// What the ramp menu answer asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampChoice {
    Preset(RampPreset),
    Custom,
}

pub fn parse_ramp_choice(line: &str) -> Option<RampChoice> {
    match line.trim() {
        "1" => Some(RampChoice::Preset(RampPreset::Dense)),
        "2" => Some(RampChoice::Preset(RampPreset::Sparse)),
        "3" => Some(RampChoice::Custom),
        _ => None,
    }
}

/// A custom ramp is taken verbatim, spaces included
pub fn parse_custom_ramp(line: &str) -> Option<GlyphRamp> {
    GlyphRamp::new(line).ok()
}

/// Non-negative seconds, fractional allowed
pub fn parse_delay(line: &str) -> Option<Duration> {
    let secs: f64 = line.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

pub fn parse_loops(line: &str) -> Option<u32> {
    line.trim().parse().ok()
}

/// Parse a 1-based play order into zero-based indices
///
/// A `0` anywhere plays the whole collection in order. Indices past the end
/// are dropped; an entry that is not a number rejects the line.
pub fn parse_order(line: &str, image_count: usize) -> Option<Vec<usize>> {
    let numbers: Vec<usize> = line
        .split_whitespace()
        .map(|token| token.parse().ok())
        .collect::<Option<_>>()?;

    if numbers.is_empty() || numbers.contains(&0) {
        return Some((0..image_count).collect());
    }
    Some(
        numbers
            .into_iter()
            .filter(|&n| n <= image_count)
            .map(|n| n - 1)
            .collect(),
    )
}

/// Asks questions over a line-based input and output pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Read one line without its terminator, `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<&str>> {
        self.output.flush()?;
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        let end = self.line.trim_end_matches(['\n', '\r']).len();
        self.line.truncate(end);
        Ok(Some(&self.line))
    }

    /// Print `question`, then keep reading until `parse` accepts a line
    ///
    /// Each rejected line prints [`TRY_AGAIN`]. `None` means the input ran
    /// out before an answer was accepted.
    pub fn ask<T>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        self.say(question)?;
        loop {
            write!(self.output, ">> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if let Some(answer) = parse(line) {
                return Ok(Some(answer));
            }
            log::trace!("rejected answer {line:?}");
            self.say(TRY_AGAIN)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(p.output()).into_owned()
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("  photo.jpg \n"), Path::new("photo.jpg"));
        assert_eq!(clean_path("'/tmp/my photo.jpg' "), Path::new("/tmp/my photo.jpg"));
        assert_eq!(clean_path("\"a.bmp\""), Path::new("a.bmp"));
        // Unmatched quotes are left alone
        assert_eq!(clean_path("'a.bmp\""), Path::new("'a.bmp\""));
        assert_eq!(clean_path("it's.bmp"), Path::new("it's.bmp"));
    }

    #[test]
    fn test_menu_numbering() {
        assert_eq!(parse_menu_choice("1", 0), Some(MenuChoice::Add));
        assert_eq!(parse_menu_choice("2", 0), Some(MenuChoice::Animate));
        assert_eq!(parse_menu_choice("3", 0), Some(MenuChoice::Quit));

        assert_eq!(parse_menu_choice(" 2 ", 2), Some(MenuChoice::Edit(1)));
        assert_eq!(parse_menu_choice("3", 2), Some(MenuChoice::Add));
        assert_eq!(parse_menu_choice("5", 2), Some(MenuChoice::Quit));
    }

    #[test]
    fn test_menu_rejects() {
        for line in ["0", "4", "-1", "one", "", "1 2"] {
            assert_eq!(parse_menu_choice(line, 0), None, "{line:?}");
        }
    }

    #[test]
    fn test_filter_options() {
        let apply = |negate, mirror, brightness, ramp| {
            Some(FilterChoice::Apply(FilterSet {
                negate,
                mirror,
                brightness,
                ramp,
            }))
        };

        assert_eq!(parse_filter_options("0"), apply(false, false, false, false));
        assert_eq!(parse_filter_options("1"), apply(true, false, false, false));
        assert_eq!(parse_filter_options("3 1"), apply(true, false, true, false));
        assert_eq!(parse_filter_options("24"), apply(false, true, false, true));
        assert_eq!(parse_filter_options("1 1 1 2"), apply(true, true, false, false));
        assert_eq!(parse_filter_options("4 3 2 1 0"), apply(true, true, true, true));
    }

    #[test]
    fn test_filter_back_wins() {
        assert_eq!(parse_filter_options("5"), Some(FilterChoice::Back));
        assert_eq!(parse_filter_options("1 2 5"), Some(FilterChoice::Back));
    }

    #[test]
    fn test_filter_rejects() {
        for line in ["", "   ", "6", "1 x", "-1", "12 9"] {
            assert_eq!(parse_filter_options(line), None, "{line:?}");
        }
    }

    #[test]
    fn test_brightness_bounds() {
        assert_eq!(parse_brightness("-255"), Some(-255));
        assert_eq!(parse_brightness(" 255 "), Some(255));
        assert_eq!(parse_brightness("0"), Some(0));
        assert_eq!(parse_brightness("256"), None);
        assert_eq!(parse_brightness("-256"), None);
        assert_eq!(parse_brightness("bright"), None);
    }

    #[test]
    fn test_ramp_choice() {
        assert_eq!(parse_ramp_choice("1"), Some(RampChoice::Preset(RampPreset::Dense)));
        assert_eq!(parse_ramp_choice("2"), Some(RampChoice::Preset(RampPreset::Sparse)));
        assert_eq!(parse_ramp_choice("3"), Some(RampChoice::Custom));
        assert_eq!(parse_ramp_choice("4"), None);
    }

    #[test]
    fn test_custom_ramp_keeps_spaces() {
        assert_eq!(parse_custom_ramp(" .#").unwrap().len(), 3);
        assert!(parse_custom_ramp("#").is_none());
        assert!(parse_custom_ramp("").is_none());
    }

    #[test]
    fn test_delay_and_loops() {
        assert_eq!(parse_delay("0.5"), Some(Duration::from_millis(500)));
        assert_eq!(parse_delay("2"), Some(Duration::from_secs(2)));
        assert_eq!(parse_delay("0"), Some(Duration::ZERO));
        assert_eq!(parse_delay("-1"), None);
        assert_eq!(parse_delay("NaN"), None);
        assert_eq!(parse_delay("soon"), None);

        assert_eq!(parse_loops("0"), Some(0));
        assert_eq!(parse_loops("3"), Some(3));
        assert_eq!(parse_loops("-3"), None);
        assert_eq!(parse_loops("1.5"), None);
    }

    #[test]
    fn test_order() {
        assert_eq!(parse_order("2 1 2", 2), Some(vec![1, 0, 1]));
        assert_eq!(parse_order("0", 3), Some(vec![0, 1, 2]));
        assert_eq!(parse_order("2 0", 3), Some(vec![0, 1, 2]));
        assert_eq!(parse_order("", 2), Some(vec![0, 1]));
        // Out of range is skipped, not an error
        assert_eq!(parse_order("3 1 9", 2), Some(vec![0]));
        assert_eq!(parse_order("1 x", 2), None);
        assert_eq!(parse_order("-1", 2), None);
    }

    #[test]
    fn test_ask_retries_until_valid() {
        let mut p = prompter("nope\n300\n-12\n");
        let answer = p.ask("Brightness?", parse_brightness).unwrap();
        assert_eq!(answer, Some(-12));

        let out = transcript(&p);
        assert!(out.starts_with("Brightness?\n>> "));
        assert_eq!(out.matches(TRY_AGAIN).count(), 2);
    }

    #[test]
    fn test_ask_at_end_of_input() {
        let mut p = prompter("bad\n");
        assert_eq!(p.ask("Loops?", parse_loops).unwrap(), None);
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut p = prompter("a.bmp\r\n\nlast");
        assert_eq!(p.read_line().unwrap(), Some("a.bmp"));
        assert_eq!(p.read_line().unwrap(), Some(""));
        assert_eq!(p.read_line().unwrap(), Some("last"));
        assert_eq!(p.read_line().unwrap(), None);
    }
}
