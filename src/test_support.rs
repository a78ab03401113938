//! Synthetic occurrence datasets for tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::Dataset;
use crate::model::{Occurrence, RowId};

const COUNTRIES: [&str; 5] = ["Sweden", "Norway", "Finland", "Denmark", "Germany"];

const SPECIES: [&str; 6] = [
    "Aeshna cyanea",
    "Aeshna grandis",
    "Calopteryx virgo",
    "Coenagrion puella",
    "Libellula depressa",
    "Sympetrum vulgatum",
];

const PUBLISHERS: [&str; 3] = [
    "SLU Artdatabanken",
    "Norwegian Biodiversity Information Centre",
    "naturgucker.de",
];

const LIFE_STAGES: [&str; 3] = ["Adult", "Juvenile", "Larva"];

const SEXES: [&str; 2] = ["F", "M"];

const BASES: [&str; 2] = ["HUMAN_OBSERVATION", "PRESERVED_SPECIMEN"];

/// A single occurrence row with the given categorical values and defaults
/// everywhere else. Tests mutate the public fields for anything beyond that.
pub fn occurrence(
    row: u32,
    country: &str,
    species: Option<&str>,
    sex: Option<&str>,
) -> Occurrence {
    Occurrence {
        row: RowId(row),
        gbif_id: Some(1_000_000 + row as i64),
        occurrence_id: Some(format!("occ:{row:06}")),
        country: country.to_string(),
        species: species.map(str::to_string),
        genus: species.and_then(|name| name.split_whitespace().next().map(str::to_string)),
        sex: sex.map(str::to_string),
        life_stage: Some("Adult".to_string()),
        publisher: PUBLISHERS[0].to_string(),
        basis_of_record: BASES[0].to_string(),
        latitude: Some(59.0),
        longitude: Some(18.0),
        uncertainty_m: Some(50.0),
    }
}

/// Generate a seeded synthetic dataset.
///
/// Nullable columns carry realistic null rates so the Unknown bucketing
/// paths are always exercised; coordinates spread over a Scandinavian-ish
/// bounding box.
pub fn generate_dataset(count: u32, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(count as usize);

    for i in 0..count {
        let country = COUNTRIES[rng.random_range(0..COUNTRIES.len())];
        let species = if rng.random_bool(0.9) {
            Some(SPECIES[rng.random_range(0..SPECIES.len())])
        } else {
            None
        };
        let sex = if rng.random_bool(0.8) {
            Some(SEXES[rng.random_range(0..SEXES.len())])
        } else {
            None
        };
        let life_stage = if rng.random_bool(0.7) {
            Some(LIFE_STAGES[rng.random_range(0..LIFE_STAGES.len())])
        } else {
            None
        };
        let geolocated = rng.random_bool(0.9);

        rows.push(Occurrence {
            row: RowId(i),
            gbif_id: Some(2_000_000 + i as i64),
            occurrence_id: Some(format!("occ:{i:06}")),
            country: country.to_string(),
            species: species.map(str::to_string),
            genus: species
                .and_then(|name| name.split_whitespace().next().map(str::to_string)),
            sex: sex.map(str::to_string),
            life_stage: life_stage.map(str::to_string),
            publisher: PUBLISHERS[rng.random_range(0..PUBLISHERS.len())].to_string(),
            basis_of_record: BASES[rng.random_range(0..BASES.len())].to_string(),
            latitude: geolocated.then(|| rng.random_range(55.0..65.0)),
            longitude: geolocated.then(|| rng.random_range(5.0..25.0)),
            uncertainty_m: if rng.random_bool(0.85) {
                Some(rng.random_range(1.0..5_000.0))
            } else {
                None
            },
        });
    }

    Dataset::from_rows(rows)
}
