use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Column labels used by the FDA food composition export (InfoId 20)
pub const SAMPLE_ID_COL: &str = "整合編號";
pub const SAMPLE_NAME_COL: &str = "樣品名稱";
pub const ANALYTE_NAME_COL: &str = "分析項";
pub const AMOUNT_PER_100G_COL: &str = "每100克含量";
pub const UNIT_COL: &str = "含量單位";
pub const CATEGORY_COL: &str = "分析項分類";

/// One analyte of one sample, as exported by the upstream source.
/// Many records share a sample name; each describes a single nutrient.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RawAnalyteRecord {
    #[serde(rename = "整合編號", default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(rename = "樣品名稱", default)]
    pub sample_name: String,
    #[serde(rename = "分析項", default)]
    pub analyte_name: String,
    #[serde(rename = "每100克含量", default, skip_serializing_if = "Option::is_none")]
    pub amount_per_100g: Option<String>, // string-encoded decimal, may carry whitespace
    #[serde(rename = "含量單位", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "分析項分類", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RawAnalyteRecord {
    /// Builds a record from a loosely typed row keyed by column label.
    pub fn from_columns(columns: &SummaryRecord) -> Self {
        let text = |col: &str| columns.get(col).cloned();
        Self {
            sample_id: text(SAMPLE_ID_COL),
            sample_name: text(SAMPLE_NAME_COL).unwrap_or_default(),
            analyte_name: text(ANALYTE_NAME_COL).unwrap_or_default(),
            amount_per_100g: text(AMOUNT_PER_100G_COL),
            unit: text(UNIT_COL),
            category: text(CATEGORY_COL),
        }
    }
}

/// A wide-format row (one food per row, one column per nutrient), keyed by column label.
pub type SummaryRecord = BTreeMap<String, String>;

/// A decoded response body, in whichever layout the dataset version used.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// Long format: one analyte per row.
    Analytes(Vec<RawAnalyteRecord>),
    /// Wide format: one food per row.
    Summaries(Vec<SummaryRecord>),
}

impl RawPayload {
    pub fn is_empty(&self) -> bool {
        match self {
            RawPayload::Analytes(records) => records.is_empty(),
            RawPayload::Summaries(rows) => rows.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawPayload::Analytes(records) => records.len(),
            RawPayload::Summaries(rows) => rows.len(),
        }
    }
}

/// Target fields of a `NutritionRow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientField {
    Calories,
    Protein,
    Fat,
    Carbs,
    Water,
    Ash,
    Fiber,
    Sugar,
}

/// Nutrition facts of one food, per 100g. `None` means "not reported", never zero.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NutritionRow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>, // kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
}

impl NutritionRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Protein => self.protein,
            NutrientField::Fat => self.fat,
            NutrientField::Carbs => self.carbs,
            NutrientField::Water => self.water,
            NutrientField::Ash => self.ash,
            NutrientField::Fiber => self.fiber,
            NutrientField::Sugar => self.sugar,
        }
    }

    pub fn set(&mut self, field: NutrientField, value: f64) {
        let slot = match field {
            NutrientField::Calories => &mut self.calories,
            NutrientField::Protein => &mut self.protein,
            NutrientField::Fat => &mut self.fat,
            NutrientField::Carbs => &mut self.carbs,
            NutrientField::Water => &mut self.water,
            NutrientField::Ash => &mut self.ash,
            NutrientField::Fiber => &mut self.fiber,
            NutrientField::Sugar => &mut self.sugar,
        };
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_uses_chinese_wire_labels() {
        let json = r#"{
            "整合編號": "A1234",
            "樣品名稱": "雞胸肉",
            "分析項": "粗蛋白",
            "每100克含量": " 22.4 ",
            "含量單位": "g",
            "分析項分類": "一般成分",
            "食品分類": "肉類"
        }"#;
        let record: RawAnalyteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sample_id.as_deref(), Some("A1234"));
        assert_eq!(record.sample_name, "雞胸肉");
        assert_eq!(record.analyte_name, "粗蛋白");
        assert_eq!(record.amount_per_100g.as_deref(), Some(" 22.4 "));
        assert_eq!(record.category.as_deref(), Some("一般成分"));
    }

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let record: RawAnalyteRecord = serde_json::from_str(r#"{"樣品名稱": "白飯"}"#).unwrap();
        assert_eq!(record.sample_name, "白飯");
        assert!(record.analyte_name.is_empty());
        assert_eq!(record.amount_per_100g, None);
    }

    #[test]
    fn test_from_columns() {
        let mut columns = SummaryRecord::new();
        columns.insert(SAMPLE_NAME_COL.to_string(), "豆腐".to_string());
        columns.insert(ANALYTE_NAME_COL.to_string(), "水分".to_string());
        columns.insert(AMOUNT_PER_100G_COL.to_string(), "84.9".to_string());

        let record = RawAnalyteRecord::from_columns(&columns);
        assert_eq!(record.sample_name, "豆腐");
        assert_eq!(record.analyte_name, "水分");
        assert_eq!(record.amount_per_100g.as_deref(), Some("84.9"));
        assert_eq!(record.unit, None);
    }

    #[test]
    fn test_row_get_set() {
        let mut row = NutritionRow::new("蛋");
        assert_eq!(row.get(NutrientField::Ash), None);
        row.set(NutrientField::Ash, 0.9);
        row.set(NutrientField::Calories, 134.0);
        assert_eq!(row.get(NutrientField::Ash), Some(0.9));
        assert_eq!(row.calories, Some(134.0));
    }

    #[test]
    fn test_row_serialization_skips_unreported_fields() {
        let mut row = NutritionRow::new("蘋果");
        row.calories = Some(52.0);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["calories"], 52.0);
        assert!(value.get("protein").is_none());
    }
}
