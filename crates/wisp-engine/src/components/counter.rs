use std::fmt;

/// Unit suffix appended to a rendered counter value.
///
/// Matching is case-sensitive and `Nanometers` wins over `Billions`, so
/// markup like `5nm` never renders as a billions figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Suffix {
    #[default]
    None,
    Nanometers,
    Billions,
}

impl Suffix {
    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::None => "",
            Suffix::Nanometers => "nm",
            Suffix::Billions => "B",
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animated count-up attached to a stat target.
///
/// Parsed once from the markup text, advanced one fixed tick at a time, and
/// pinned to the final value when it gets there. A counter runs at most
/// once; `start` on a started counter is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    end: i64,
    current: f64,
    increment: f64,
    suffix: Suffix,
    has_plus: bool,
    started: bool,
    done: bool,
}

impl Counter {
    /// Parse markup text like `128+`, `7nm` or `2.4B` into a counter.
    ///
    /// The numeric value is every ASCII digit in the text concatenated, so
    /// `2.4B` counts to 24. Text without digits yields `None` and the
    /// target simply keeps its static text.
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        let end = digits.parse::<i64>().ok()?;
        let suffix = if text.contains("nm") {
            Suffix::Nanometers
        } else if text.contains('B') {
            Suffix::Billions
        } else {
            Suffix::None
        };
        Some(Self {
            end,
            current: 0.0,
            increment: 0.0,
            suffix,
            has_plus: text.contains('+'),
            started: false,
            done: false,
        })
    }

    /// Arm the counter. The per-tick increment is sized so the run spans
    /// `duration_ms` at one step per `tick_ms`. Returns false when the
    /// counter already ran.
    pub fn start(&mut self, duration_ms: f64, tick_ms: f64) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        let ticks = (duration_ms / tick_ms).max(1.0);
        self.increment = self.end as f64 / ticks;
        true
    }

    /// Advance one fixed tick. Returns the text to display, or `None` once
    /// the counter is finished (or was never started).
    pub fn step(&mut self) -> Option<String> {
        if !self.started || self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.end as f64 {
            self.current = self.end as f64;
            self.done = true;
        }
        Some(self.render())
    }

    fn render(&self) -> String {
        let shown = self.current.floor() as i64;
        let plus = if self.has_plus { "+" } else { "" };
        format!("{}{}{}", shown, self.suffix, plus)
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(counter: &mut Counter) -> (String, usize) {
        let mut last = String::new();
        let mut steps = 0;
        while let Some(text) = counter.step() {
            last = text;
            steps += 1;
            assert!(steps < 10_000, "counter never finished");
        }
        (last, steps)
    }

    #[test]
    fn parses_plus_form() {
        let c = Counter::parse("128+").unwrap();
        assert_eq!(c.end(), 128);
        assert!(c.has_plus);
        assert_eq!(c.suffix, Suffix::None);
    }

    #[test]
    fn parses_nanometer_form() {
        let c = Counter::parse("7nm").unwrap();
        assert_eq!(c.end(), 7);
        assert_eq!(c.suffix, Suffix::Nanometers);
        assert!(!c.has_plus);
    }

    #[test]
    fn parses_billions_form_digits_only() {
        // The decimal point is stripped with every other non-digit.
        let mut c = Counter::parse("2.4B").unwrap();
        assert_eq!(c.end(), 24);
        assert_eq!(c.suffix, Suffix::Billions);

        c.start(1500.0, 16.0);
        let (last, _) = run_to_end(&mut c);
        assert_eq!(last, "24B");
    }

    #[test]
    fn nanometers_win_over_billions() {
        let c = Counter::parse("3nmB").unwrap();
        assert_eq!(c.suffix, Suffix::Nanometers);
    }

    #[test]
    fn rejects_text_without_digits() {
        assert!(Counter::parse("fast").is_none());
        assert!(Counter::parse("").is_none());
    }

    #[test]
    fn full_run_lands_on_final_text() {
        let mut c = Counter::parse("128+").unwrap();
        assert!(c.start(1500.0, 16.0));
        let (last, steps) = run_to_end(&mut c);
        assert_eq!(last, "128+");
        // 1500 / 16 = 93.75 ticks of increment, so the run pins on step 94.
        assert_eq!(steps, 94);
        assert!(c.is_done());
    }

    #[test]
    fn small_values_floor_to_zero_early_on() {
        let mut c = Counter::parse("7nm").unwrap();
        c.start(1500.0, 16.0);
        assert_eq!(c.step().unwrap(), "0nm");
        let (last, _) = run_to_end(&mut c);
        assert_eq!(last, "7nm");
    }

    #[test]
    fn start_is_one_shot() {
        let mut c = Counter::parse("42").unwrap();
        assert!(c.start(1500.0, 16.0));
        assert!(!c.start(1500.0, 16.0));
    }

    #[test]
    fn finished_counter_stays_silent() {
        let mut c = Counter::parse("5").unwrap();
        c.start(80.0, 16.0);
        let _ = run_to_end(&mut c);
        assert_eq!(c.step(), None);
    }

    #[test]
    fn zero_target_pins_immediately() {
        let mut c = Counter::parse("0").unwrap();
        c.start(1500.0, 16.0);
        assert_eq!(c.step().unwrap(), "0");
        assert!(c.is_done());
    }

    #[test]
    fn unstarted_counter_does_not_tick() {
        let mut c = Counter::parse("9").unwrap();
        assert_eq!(c.step(), None);
    }
}
