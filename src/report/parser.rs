// report/parser.rs
use crate::report::models::{NeighborhoodRecord, ParsedReport, SummaryMetrics};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Percent tokens at or above this are treated as unrelated stats (growth, occupancy...).
pub const DEFAULT_YIELD_PLAUSIBILITY_MAX: f64 = 50.0;

const AREA_KEYWORDS: &str = "area|neighborhood|neighbourhood|district|location";
const MAGNITUDE: &str = "million|mil|m|k|thousand";
const NUMBER: &str = r"(\d[\d,]*(?:\.\d+)?)";

// Area headers, tried in order; the first one that yields a non-empty name wins.
//   1. **Area 2: Name**
//   2. **Name** Price ... / **Name**: Yield ...
//   3. Area: Name   (ends at end of line, `,` `*` `|` or a Price keyword)
static AREA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(&format!(
            r"(?i)\*\*\s*(?:{AREA_KEYWORDS})\s*\d+[:.\s-]*([^*\n]+)\*\*"
        )),
        compile(r"(?i)\*\*([a-z][a-z\s'.&-]*)\*\*[:\s]*(?:price|yield|rental)"),
        compile(&format!(
            r"(?i)\b(?:{AREA_KEYWORDS})\s*\d*\s*:\s*([a-z][a-z\s'.&-]*?)\s*(?:$|[,*|]|\bprice\b)"
        )),
    ]
});

static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?i)\b(?:price|cost|range)[:\s]*[$€£¥]?\s*{NUMBER}(?:\s*({MAGNITUDE})\b)?\s*(?:to|-|–)\s*[$€£¥]?\s*{NUMBER}(?:\s*({MAGNITUDE})\b)?"
    ))
});

static SINGLE_PRICE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?i)[$€£¥]\s*{NUMBER}(?:\s*({MAGNITUDE})\b)?"
    ))
});

static MILLION_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\b(?:million|mil)\b"));
static THOUSAND_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\bthousand\b"));

static AREA_YIELD: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)(?:rental\s*)?yield[:\s]*(\d+(?:\.\d+)?)(?:\s*%?\s*(?:-|–|to)\s*(\d+(?:\.\d+)?))?\s*%",
    )
});

static PERCENT_TOKEN: Lazy<Regex> = Lazy::new(|| compile(r"(\d+(?:\.\d+)?)\s*%"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid report pattern {pattern:?}: {e}"))
}

/// Best-effort extraction of neighborhood data from an agent's free-text report.
///
/// Nothing in here fails: text that doesn't match simply produces empty output.
#[derive(Debug, Clone)]
pub struct ReportParser {
    yield_plausibility_max: f64,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self {
            yield_plausibility_max: DEFAULT_YIELD_PLAUSIBILITY_MAX,
        }
    }
}

impl ReportParser {
    pub fn new(yield_plausibility_max: f64) -> Self {
        Self {
            yield_plausibility_max,
        }
    }

    pub fn parse(&self, text: &str) -> ParsedReport {
        let mut neighborhoods: Vec<String> = Vec::new();
        let mut records = Vec::new();
        let mut current: Option<AreaAccumulator> = None;

        for line in text.lines() {
            if let Some(name) = match_area(line) {
                if let Some(record) = current.take().and_then(AreaAccumulator::into_record) {
                    records.push(record);
                }
                if !neighborhoods.contains(&name) {
                    neighborhoods.push(name.clone());
                }
                current = Some(AreaAccumulator::new(name));
            }

            // Prices and yields only count once an area is open.
            let Some(area) = current.as_mut() else {
                continue;
            };
            area.observe_price(line);
            area.observe_yield(line);
        }

        if let Some(record) = current.and_then(AreaAccumulator::into_record) {
            records.push(record);
        }

        ParsedReport {
            summary: self.summarize(text),
            neighborhoods,
            records,
        }
    }

    /// Mean of every percent token below the plausibility bound, over the whole text.
    pub fn summarize(&self, text: &str) -> SummaryMetrics {
        let yields: Vec<f64> = PERCENT_TOKEN
            .captures_iter(text)
            .filter_map(|caps| parse_number(&caps[1]))
            .filter(|v| *v < self.yield_plausibility_max)
            .collect();

        let avg_rental_yield_pct = if yields.is_empty() {
            None
        } else {
            Some(yields.iter().sum::<f64>() / yields.len() as f64)
        };

        SummaryMetrics {
            avg_rental_yield_pct,
        }
    }
}

struct AreaAccumulator {
    name: String,
    price: Option<f64>,
    yield_pct: Option<f64>,
}

impl AreaAccumulator {
    fn new(name: String) -> Self {
        Self {
            name,
            price: None,
            yield_pct: None,
        }
    }

    fn observe_price(&mut self, line: &str) {
        if let Some(price) = range_price(line) {
            self.price = Some(price);
            return;
        }
        // A lone figure never replaces one we already have.
        if self.price.is_none() {
            self.price = single_price(line);
        }
    }

    fn observe_yield(&mut self, line: &str) {
        if let Some(y) = area_yield(line) {
            self.yield_pct = Some(y);
        }
    }

    fn into_record(self) -> Option<NeighborhoodRecord> {
        let avg_price = self.price?;
        Some(NeighborhoodRecord {
            name: self.name,
            avg_price,
            rental_yield_pct: self.yield_pct.unwrap_or(0.0),
        })
    }
}

fn match_area(line: &str) -> Option<String> {
    AREA_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(line)?;
        let name = caps[1]
            .trim()
            .trim_end_matches(|c: char| c == ':' || c == '-')
            .trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    })
}

fn range_price(line: &str) -> Option<f64> {
    let caps = PRICE_RANGE.captures(line)?;
    let low = parse_number(&caps[1])?;
    let high = parse_number(&caps[3])?;

    // "$1-2 million": a suffix on the high bound alone covers both.
    let high_scale = caps.get(4).map(|m| magnitude(m.as_str())).unwrap_or(1.0);
    let low_scale = caps
        .get(2)
        .map(|m| magnitude(m.as_str()))
        .unwrap_or(high_scale);

    Some((low * low_scale + high * high_scale) / 2.0)
}

fn single_price(line: &str) -> Option<f64> {
    let caps = SINGLE_PRICE.captures(line)?;
    let value = parse_number(&caps[1])?;
    Some(value * suffix_or_line_scale(&caps, line))
}

fn suffix_or_line_scale(caps: &Captures<'_>, line: &str) -> f64 {
    if let Some(suffix) = caps.get(2) {
        return magnitude(suffix.as_str());
    }
    if MILLION_WORD.is_match(line) {
        1_000_000.0
    } else if THOUSAND_WORD.is_match(line) {
        1_000.0
    } else {
        1.0
    }
}

fn area_yield(line: &str) -> Option<f64> {
    let caps = AREA_YIELD.captures(line)?;
    let low = parse_number(&caps[1])?;
    match caps.get(2).and_then(|m| parse_number(m.as_str())) {
        Some(high) => Some((low + high) / 2.0),
        None => Some(low),
    }
}

fn magnitude(word: &str) -> f64 {
    match word.to_ascii_lowercase().as_str() {
        "million" | "mil" | "m" => 1_000_000.0,
        "k" | "thousand" => 1_000.0,
        _ => 1.0,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}
