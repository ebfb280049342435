use once_cell::sync::Lazy;
use regex::Regex;

/// Box-count and per-box-count values above these bounds are treated as noise.
const MAX_BOXES: u32 = 100;
const MAX_PER_BOX: u32 = 1000;

/// Standalone numbers outside this range are assumed to be barcodes or SKUs.
const PLAUSIBLE_RANGE: std::ops::RangeInclusive<u64> = 1..=1000;

static BOX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*(?:box(?:es)?|packs?)").expect("valid box pattern"));

static COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\s*(?:pairs?|pcs?|pieces?|count|gloves?|per\s*box)")
        .expect("valid count pattern")
});

/// ASCII digits only. Unicode `\d` would also match fullwidth or
/// Arabic-Indic digits, which `str::parse` cannot read.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("valid number pattern"));

/// Best-guess unit quantity from label text. Never returns 0.
pub fn infer_quantity(text: &str) -> u32 {
    let text = text.to_lowercase();

    if let Some(total) = box_multiplication(&text) {
        return total;
    }

    let plausible = plausible_numbers(&text);
    match plausible.len() {
        0 => 1,
        1 | 2 => plausible[0],
        n => {
            let mut sorted = plausible;
            sorted.sort_unstable();
            sorted[n / 2]
        }
    }
}

/// "2 boxes of 50 count" style labels. Only the first match of each pattern
/// is considered, so multiple box/count pairs are not correlated.
fn box_multiplication(text: &str) -> Option<u32> {
    let boxes = first_capture(&BOX_PATTERN, text)?;
    let per_box = first_capture(&COUNT_PATTERN, text)?;

    if boxes < MAX_BOXES && per_box < MAX_PER_BOX {
        let total = boxes * per_box;
        // a zero box or per-box count is not a signal
        (total > 0).then_some(total)
    } else {
        None
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Every digit run in text order, kept when within the plausible range.
fn plausible_numbers(text: &str) -> Vec<u32> {
    NUMBER_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u64>().ok())
        .filter(|n| PLAUSIBLE_RANGE.contains(n))
        .map(|n| n as u32)
        .collect()
}
