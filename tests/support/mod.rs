use dragonfly_atlas::test_support::occurrence;
use dragonfly_atlas::Dataset;

/// The three-row reference dataset used across the filter tests:
/// USA/A/null, USA/B/M, UK/A/F.
#[allow(dead_code)]
pub fn three_row_dataset() -> Dataset {
    Dataset::from_rows(vec![
        occurrence(0, "USA", Some("A"), None),
        occurrence(1, "USA", Some("B"), Some("M")),
        occurrence(2, "UK", Some("A"), Some("F")),
    ])
}

/// A richer fixed dataset exercising nulls in every nullable column.
#[allow(dead_code)]
pub fn mixed_dataset() -> Dataset {
    let mut rows = vec![
        occurrence(0, "Sweden", Some("Aeshna cyanea"), Some("M")),
        occurrence(1, "Sweden", Some("Aeshna cyanea"), Some("F")),
        occurrence(2, "Sweden", Some("Libellula depressa"), None),
        occurrence(3, "Norway", Some("Aeshna grandis"), Some("F")),
        occurrence(4, "Norway", None, Some("M")),
        occurrence(5, "Finland", None, None),
    ];
    rows[0].life_stage = Some("Adult".to_string());
    rows[1].life_stage = Some("Larva".to_string());
    rows[2].life_stage = None;
    rows[3].life_stage = Some("Adult".to_string());
    rows[4].life_stage = None;
    rows[5].life_stage = Some("Juvenile".to_string());

    rows[0].uncertainty_m = Some(5.0);
    rows[1].uncertainty_m = Some(50.0);
    rows[2].uncertainty_m = None;
    rows[3].uncertainty_m = Some(500.0);
    rows[4].uncertainty_m = Some(8.0);
    rows[5].uncertainty_m = None;

    Dataset::from_rows(rows)
}
