use foodcount::api_connection::{parse_payload, LocalDataset};
use foodcount::label::render_label;
use foodcount::record_normalizer::row_from_payload;
use foodcount::records::RawPayload;
use foodcount::session::RecipeSession;
use std::io::Write;
use tempfile::NamedTempFile;

// Shape of the FDA export: several samples and every analyte as its own row.
const EGG_RESPONSE: &str = r#"[
    {"整合編號": "E0101", "食品分類": "蛋類", "樣品名稱": "雞蛋", "分析項分類": "一般成分", "分析項": "修正熱量", "含量單位": "kcal", "每100克含量": "134"},
    {"整合編號": "E0101", "食品分類": "蛋類", "樣品名稱": "雞蛋", "分析項分類": "一般成分", "分析項": "粗蛋白", "含量單位": "g", "每100克含量": " 12.5 "},
    {"整合編號": "E0101", "食品分類": "蛋類", "樣品名稱": "雞蛋", "分析項分類": "一般成分", "分析項": "粗脂肪", "含量單位": "g", "每100克含量": "8.9"},
    {"整合編號": "E0101", "食品分類": "蛋類", "樣品名稱": "雞蛋", "分析項分類": "一般成分", "分析項": "總碳水化合物", "含量單位": "g", "每100克含量": "1.8"},
    {"整合編號": "E0101", "食品分類": "蛋類", "樣品名稱": "雞蛋", "分析項分類": "一般成分", "分析項": "膳食纖維", "含量單位": "g", "每100克含量": ""},
    {"整合編號": "E0102", "食品分類": "蛋類", "樣品名稱": "雞蛋白", "分析項分類": "一般成分", "分析項": "修正熱量", "含量單位": "kcal", "每100克含量": "48"}
]"#;

const RICE_RESPONSE: &str = "樣品名稱,分析項,每100克含量\n白飯,熱量,183\n白飯,粗蛋白,3.1\n白飯,粗脂肪,0.3\n白飯,總碳水化合物,41\n";

#[test]
fn test_fda_response_normalizes_first_sample() {
    let payload = parse_payload(EGG_RESPONSE).unwrap();
    assert!(matches!(payload, RawPayload::Analytes(ref records) if records.len() == 6));

    let row = row_from_payload(&payload).unwrap();
    assert_eq!(row.name, "雞蛋");
    assert_eq!(row.calories, Some(134.0));
    assert_eq!(row.protein, Some(12.5));
    assert_eq!(row.fat, Some(8.9));
    assert_eq!(row.carbs, Some(1.8));
    assert_eq!(row.fiber, None);
}

#[test]
fn test_recipe_totals_from_two_sources() {
    let egg = row_from_payload(&parse_payload(EGG_RESPONSE).unwrap()).unwrap();
    let rice = row_from_payload(&parse_payload(RICE_RESPONSE).unwrap()).unwrap();

    let mut session = RecipeSession::new();
    session.upsert_row(egg);
    session.upsert_row(rice);
    session.set_grams("雞蛋", 50.0).unwrap();
    session.set_grams("白飯", 200.0).unwrap();

    let nutrition = session.totals();
    // egg: 67 kcal, 6.3 P (6.25 rounds away from zero), 4.5 F, 0.9 C
    // rice: 366 kcal, 6.2 P, 0.6 F, 82.0 C
    assert_eq!(nutrition.totals.kcal, 433);
    assert_eq!(nutrition.totals.protein, Some(12.5));
    assert_eq!(nutrition.totals.fat, Some(5.1));
    assert_eq!(nutrition.totals.carbs, Some(82.9));

    let label = render_label(&nutrition);
    assert!(label.contains("熱量：433 kcal"));
    assert!(label.contains("碳水化合物：82.9 g"));
}

#[test]
fn test_requerying_a_food_overwrites_its_row() {
    let mut session = RecipeSession::new();
    session.upsert_row(row_from_payload(&parse_payload(RICE_RESPONSE).unwrap()).unwrap());
    session.set_grams("白飯", 150.0).unwrap();

    let updated = "樣品名稱,分析項,每100克含量\n白飯,熱量,190\n";
    session.upsert_row(row_from_payload(&parse_payload(updated).unwrap()).unwrap());

    assert_eq!(session.rows().len(), 1);
    assert_eq!(session.rows()[0].calories, Some(190.0));
    assert_eq!(session.rows()[0].protein, None);
    assert_eq!(session.totals().totals.kcal, 285);
}

#[tokio::test]
async fn test_local_export_lookup() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EGG_RESPONSE.as_bytes()).unwrap();
    file.flush().unwrap();

    let dataset = LocalDataset::from_path(file.path()).await.unwrap();
    let row = dataset.lookup("雞蛋").unwrap().unwrap();
    assert_eq!(row.name, "雞蛋");
    assert_eq!(dataset.lookup("鴨蛋").unwrap(), None);
}
