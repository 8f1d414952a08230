// Unit tests for BSL Dupcheck

use bsl_dupcheck::core::{
    matcher::DuplicateMatcher,
    normalize::{breed_set, jaccard, normalize},
    scoring::{breed_overlap_score, location_score, score_record},
};
use bsl_dupcheck::models::{
    Candidate, Confidence, LegislationRecord, LegislationType, MunicipalityType, ScoringWeights,
};

fn candidate(municipality: &str, state: &str, breeds: Vec<&str>) -> Candidate {
    Candidate {
        municipality: municipality.to_string(),
        state: state.to_string(),
        municipality_type: MunicipalityType::City,
        banned_breeds: breeds.into_iter().map(String::from).collect(),
        legislation_type: LegislationType::Ban,
    }
}

fn record(id: &str, municipality: &str, state: &str, breeds: Vec<&str>) -> LegislationRecord {
    LegislationRecord {
        id: id.to_string(),
        municipality: municipality.to_string(),
        state: state.to_string(),
        municipality_type: MunicipalityType::City,
        banned_breeds: breeds.into_iter().map(String::from).collect(),
        legislation_type: Some(LegislationType::Ban),
        ordinance_text: None,
        latitude: None,
        longitude: None,
        population: None,
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize("  Pit   Bull ");
    let twice = normalize(&once);
    assert_eq!(once, twice);
    assert_eq!(once, "pit bull");
}

#[test]
fn test_jaccard_matches_hand_computation() {
    let a = breed_set(&vec!["pit bull".to_string(), "rottweiler".to_string(), "akita".to_string()]);
    let b = breed_set(&vec!["rottweiler".to_string(), "akita".to_string(), "chow chow".to_string()]);

    // 2 shared of 4 distinct
    assert!((jaccard(&a, &b) - 0.5).abs() < 1e-9);
}

#[test]
fn test_location_score_requires_all_three_fields() {
    let cand = candidate("Denver", "Colorado", vec!["Pit Bull"]);

    assert_eq!(location_score(&cand, &record("1", "Denver", "Colorado", vec![])), 1.0);
    assert_eq!(location_score(&cand, &record("2", "Aurora", "Colorado", vec![])), 0.0);
    assert_eq!(location_score(&cand, &record("3", "Denver", "Ohio", vec![])), 0.0);

    let mut county = record("4", "Denver", "Colorado", vec![]);
    county.municipality_type = MunicipalityType::County;
    assert_eq!(location_score(&cand, &county), 0.0);
}

#[test]
fn test_breed_overlap_is_symmetric() {
    let cand_a = candidate("Denver", "Colorado", vec!["Pit Bull", "Rottweiler"]);
    let rec_a = record("1", "Denver", "Colorado", vec!["Rottweiler", "Akita"]);

    let cand_b = candidate("Denver", "Colorado", vec!["Rottweiler", "Akita"]);
    let rec_b = record("1", "Denver", "Colorado", vec!["Pit Bull", "Rottweiler"]);

    let (score_ab, _) = breed_overlap_score(&cand_a, &rec_a);
    let (score_ba, _) = breed_overlap_score(&cand_b, &rec_b);
    assert_eq!(score_ab, score_ba);
}

#[test]
fn test_casing_and_whitespace_do_not_depress_scores() {
    let clean = candidate("Denver", "Colorado", vec!["Pit Bull"]);
    let messy = candidate("  DENVER ", " colorado", vec![" pit   bull "]);
    let rec = record("1", "Denver", "Colorado", vec!["Pit Bull"]);

    let weights = ScoringWeights::default();
    let clean_score = score_record(&clean, &rec, &weights).composite;
    let messy_score = score_record(&messy, &rec, &weights).composite;
    assert_eq!(clean_score, messy_score);
}

#[test]
fn test_has_duplicates_implies_high_confidence() {
    let matcher = DuplicateMatcher::with_defaults();
    let cand = candidate("Denver", "Colorado", vec!["Pit Bull"]);

    let cases = vec![
        vec![],
        vec![record("1", "Denver", "Colorado", vec!["Pit Bull"])],
        vec![record("1", "Aurora", "Colorado", vec!["Pit Bull"])],
        vec![record("1", "Denver", "Colorado", vec![])],
        vec![
            record("1", "Denver", "Colorado", vec!["Rottweiler"]),
            record("2", "Boulder", "Colorado", vec!["Pit Bull"]),
        ],
    ];

    for records in cases {
        let report = matcher.detect_duplicates(&cand, &records);
        if report.has_duplicates {
            assert_eq!(report.confidence, Confidence::High);
            let top = report.matches.first().expect("duplicate report must have a top match");
            assert!(top.similarity_score >= matcher.thresholds().likely);
        }
    }
}

#[test]
fn test_location_mismatch_dominance_property() {
    let matcher = DuplicateMatcher::with_defaults();
    let cand = candidate("Denver", "Colorado", vec!["Pit Bull", "Rottweiler"]);

    let records = vec![
        // Identical breed set, different municipality
        record("other-town", "Aurora", "Colorado", vec!["Pit Bull", "Rottweiler"]),
        // Same municipality, partially overlapping breeds
        record("same-town", "Denver", "Colorado", vec!["Pit Bull", "Akita"]),
    ];

    let report = matcher.detect_duplicates(&cand, &records);
    assert_eq!(report.matches[0].record.id, "same-town");

    let same_town = &report.matches[0];
    let other_town = report
        .matches
        .iter()
        .find(|m| m.record.id == "other-town")
        .expect("breed-identical record should still be advisory");
    assert!(same_town.similarity_score > other_town.similarity_score);
}

#[test]
fn test_scores_always_in_unit_range() {
    let matcher = DuplicateMatcher::with_defaults();
    let cand = candidate("Denver", "Colorado", vec!["Pit Bull"]);

    let records: Vec<LegislationRecord> = (0..50)
        .map(|i| {
            record(
                &format!("rec_{}", i),
                if i % 2 == 0 { "Denver" } else { "Aurora" },
                "Colorado",
                if i % 3 == 0 { vec!["Pit Bull"] } else { vec!["Akita"] },
            )
        })
        .collect();

    let report = matcher.detect_duplicates(&cand, &records);
    for m in &report.matches {
        assert!(m.similarity_score >= 0.0 && m.similarity_score <= 1.0);
    }
}
