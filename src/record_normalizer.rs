use tracing::debug;

use crate::records::{
    NutrientField, NutritionRow, RawAnalyteRecord, RawPayload, SummaryRecord, SAMPLE_NAME_COL,
};

pub const UNKNOWN_SAMPLE_NAME: &str = "unknown sample";

/// Ordered analyte classification rules. A label is tested against each rule in turn
/// and the first rule with a matching substring decides the field.
pub const CLASSIFICATION_RULES: &[(&[&str], NutrientField)] = &[
    (&["熱量"], NutrientField::Calories),
    (&["蛋白"], NutrientField::Protein),
    (&["脂肪"], NutrientField::Fat),
    (&["碳水", "醣類"], NutrientField::Carbs),
    (&["水分"], NutrientField::Water),
    (&["灰分"], NutrientField::Ash),
    (&["纖維"], NutrientField::Fiber),
    (&["糖"], NutrientField::Sugar),
];

// Column aliases seen across wide-format dataset versions, most specific first
pub const NAME_ALIASES: &[&str] = &[SAMPLE_NAME_COL, "食品名稱", "品名"];
const SUMMARY_ALIASES: &[(&[&str], NutrientField)] = &[
    (&["能量(kcal)", "熱量(kcal)", "熱量"], NutrientField::Calories),
    (&["蛋白質(g)", "蛋白質"], NutrientField::Protein),
    (&["脂肪(g)", "總脂肪(g)", "脂肪"], NutrientField::Fat),
    (&["碳水化合物(g)", "總碳水化合物(g)", "碳水化合物"], NutrientField::Carbs),
];

/// Maps a free-text analyte label to the nutrient it describes, if any.
pub fn classify(analyte_name: &str) -> Option<NutrientField> {
    let label = analyte_name.trim();
    CLASSIFICATION_RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| label.contains(p)))
        .map(|(_, field)| *field)
}

/// Parses a string-encoded decimal. Empty, malformed and non-finite values yield `None`.
pub fn parse_amount(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Keeps only the records sharing the first record's sample name, in input order.
///
/// The upstream source matches the query loosely, so a response can mix several samples.
pub fn select_first_sample(records: &[RawAnalyteRecord]) -> Vec<RawAnalyteRecord> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let wanted = first.sample_name.trim();
    let selected: Vec<RawAnalyteRecord> = records
        .iter()
        .filter(|r| r.sample_name.trim() == wanted)
        .cloned()
        .collect();

    let discarded = records.len() - selected.len();
    if discarded > 0 {
        debug!(sample = wanted, discarded, "discarded records of other samples");
    }
    selected
}

/// Folds the records of a single sample into one per-100g row.
///
/// Records without a usable amount or with an unrecognised label are skipped.
/// When several records map to the same field the later one wins.
pub fn normalize(records: &[RawAnalyteRecord]) -> Option<NutritionRow> {
    let first = records.first()?;
    let name = first.sample_name.trim();
    let mut row = NutritionRow::new(if name.is_empty() { UNKNOWN_SAMPLE_NAME } else { name });

    for record in records {
        let Some(amount) = record.amount_per_100g.as_deref().and_then(parse_amount) else {
            continue;
        };
        if let Some(field) = classify(&record.analyte_name) {
            row.set(field, amount);
        }
    }
    Some(row)
}

fn pick<'a>(row: &'a SummaryRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| row.get(*alias)).map(String::as_str)
}

/// Normalizes a wide-format row. Each field comes from the first alias column present.
pub fn normalize_summary(row: &SummaryRecord) -> NutritionRow {
    let name = pick(row, NAME_ALIASES).map(str::trim).unwrap_or_default();
    let mut result = NutritionRow::new(if name.is_empty() { UNKNOWN_SAMPLE_NAME } else { name });

    for (aliases, field) in SUMMARY_ALIASES {
        if let Some(value) = pick(row, aliases).and_then(parse_amount) {
            result.set(*field, value);
        }
    }
    result
}

/// Resolves a whole response into the row of its first sample, or `None` when it is empty.
pub fn row_from_payload(payload: &RawPayload) -> Option<NutritionRow> {
    match payload {
        RawPayload::Analytes(records) => normalize(&select_first_sample(records)),
        RawPayload::Summaries(rows) => rows.first().map(normalize_summary),
    }
}
