use std::collections::HashSet;

use skumatch_core::{
    normalize_sku, ConfidenceLevel, PairOutcome, ProductRecord, RejectReason, SkuMatcher,
};

fn record(sku: &str, name: &str) -> ProductRecord {
    ProductRecord::new(sku, name)
}

fn mixed_catalog() -> Vec<ProductRecord> {
    vec![
        record("PTB-GBC-HIO", "Premium Turf Base Golf Ball Case Hole In One"),
        record("VANTAGE-GBC-HIO", "Vantage Golf Ball Case Hole In One Display"),
        record("GBC-EAGLE-MAH", "Golf Ball Case Eagle Mahogany"),
        record("GBC-EAGLE-AHW", "Golf Ball Case Eagle African Hardwood"),
        record("GBC-EAGLE-OAK", "Golf Ball Case Eagle Oak"),
        record("TBC-EAGLE", "Tennis Ball Case Eagle"),
        record("COINSLAB-40", "Coin Slab Display 40mm"),
        record("COINSLAB-45", "Coin Slab Display 45mm"),
        record("NECKLACE-GOLD-01", "Gold Necklace"),
        record("NECKLACE-GOLD-02", "Gold Necklace Large"),
        record("RS", "Replacement Stand"),
        record("RS2", "Replacement Stand"),
        record("gbc-hio-set", "Golf Ball Case Hole In One Set"),
        record("GBC-HIO-P", "Golf Ball Case Hole In One"),
        record("", ""),
    ]
}

#[test]
fn legacy_code_maps_to_current_line_with_high_confidence() {
    let catalog = vec![
        record("PTB-GBC-HIO", "Premium Turf Base Golf Ball Case Hole In One"),
        record("VANTAGE-GBC-HIO", "Vantage Golf Ball Case Hole In One Display"),
    ];

    let suggestions = SkuMatcher::new().suggest_all(&catalog, Vec::<String>::new());

    assert_eq!(suggestions.len(), 1);
    let suggestion = &suggestions[0];
    assert_eq!(suggestion.source_sku, "PTB-GBC-HIO");
    assert_eq!(suggestion.target_sku, "VANTAGE-GBC-HIO");
    assert_eq!(suggestion.confidence, ConfidenceLevel::High);
    assert!(suggestion.reason.starts_with("SKU similarity 60%; title overlap 50%"));
    assert!(suggestion.reason.contains("legacy code resolves to VANTAGE"));
}

#[test]
fn numbered_coin_slabs_never_match() {
    let catalog =
        vec![record("COINSLAB-40", "Coin Slab Display 40mm"), record("COINSLAB-45", "Coin Slab Display 45mm")];

    assert!(SkuMatcher::new().suggest_all(&catalog, Vec::<String>::new()).is_empty());
}

#[test]
fn different_category_prefixes_never_match() {
    let catalog =
        vec![record("GBC-EAGLE", "Golf Ball Case Eagle"), record("TBC-EAGLE", "Golf Ball Case Eagle")];

    assert!(SkuMatcher::new().suggest_all(&catalog, Vec::<String>::new()).is_empty());
}

#[test]
fn excluded_categories_never_match() {
    let catalog = vec![
        record("NECKLACE-GOLD-01", "Gold Necklace"),
        record("NECKLACE-GOLD-02", "Gold Necklace"),
    ];

    assert!(SkuMatcher::new().suggest_all(&catalog, Vec::<String>::new()).is_empty());
}

#[test]
fn title_only_exclusion_keeps_record_out_of_batch() {
    let pendant = record("GBC-STAR-A", "Golf Ball Case Star Pendant");
    let plain = record("GBC-STAR-B", "Golf Ball Case Star");
    let matcher = SkuMatcher::new();

    assert_eq!(matcher.evaluate_pair(&plain, &pendant), PairOutcome::Rejected(RejectReason::Excluded));
    assert!(matcher.suggest_all(&[pendant, plain], Vec::<String>::new()).is_empty());
}

#[test]
fn legacy_code_with_different_prefix_is_rejected_before_scoring() {
    let matcher = SkuMatcher::new();
    let legacy = record("PTB-TBC-HIO", "Premium Turf Base Tennis Ball Case Hole In One");
    let current = record("VANTAGE-GBC-HIO", "Vantage Golf Ball Case Hole In One Display");

    assert!(matcher.analyze(&legacy).is_legacy());
    assert_eq!(
        matcher.evaluate_pair(&legacy, &current),
        PairOutcome::Rejected(RejectReason::CategoryPrefix)
    );
}

#[test]
fn stacked_display_and_variant_suffixes_never_match() {
    let matcher = SkuMatcher::new();
    let ball_pack = record("GBC-HIO-BALL-P", "Golf Ball Case Hole In One");
    let refill = record("GBC-HIO-R", "Golf Ball Case Hole In One");
    let set_pack = record("GBC-HIO-SET-P", "Golf Ball Case Hole In One");
    let base = record("GBC-HIO", "Golf Ball Case Hole In One");

    assert_eq!(
        matcher.evaluate_pair(&ball_pack, &refill),
        PairOutcome::Rejected(RejectReason::DisplayGroupBase)
    );
    assert_eq!(
        matcher.evaluate_pair(&set_pack, &base),
        PairOutcome::Rejected(RejectReason::DisplayGroupBase)
    );
    assert!(matcher
        .suggest_all(&[ball_pack, refill, set_pack, base], Vec::<String>::new())
        .is_empty());
}

#[test]
fn trailing_digit_never_matches_in_either_direction() {
    let matcher = SkuMatcher::new();
    let plain = record("RS", "Replacement Stand");
    let numbered = record("RS2", "Replacement Stand");

    assert_eq!(
        matcher.evaluate_pair(&plain, &numbered),
        PairOutcome::Rejected(RejectReason::NumericSegment)
    );
    assert_eq!(
        matcher.evaluate_pair(&numbered, &plain),
        PairOutcome::Rejected(RejectReason::NumericSegment)
    );
}

#[test]
fn interchangeable_materials_match_but_standalone_materials_do_not() {
    let matcher = SkuMatcher::new();
    let mahogany = record("GBC-EAGLE-MAH", "Golf Ball Case Eagle Mahogany");
    let hardwood = record("GBC-EAGLE-AHW", "Golf Ball Case Eagle African Hardwood");
    let oak = record("GBC-EAGLE-OAK", "Golf Ball Case Eagle Oak");

    let accepted = matcher.evaluate_pair(&mahogany, &hardwood).accepted();
    let accepted = accepted.expect("MAH and AHW should be accepted");
    assert!(accepted.reason().contains("equivalent materials"));

    assert_eq!(
        matcher.evaluate_pair(&mahogany, &oak),
        PairOutcome::Rejected(RejectReason::MaterialConflict)
    );
}

#[test]
fn batch_never_suggests_a_record_to_itself() {
    let mut catalog = mixed_catalog();
    catalog.push(record(" vantage-gbc-hio ", "Vantage Golf Ball Case Hole In One Display"));

    let suggestions = SkuMatcher::new().suggest_all(&catalog, Vec::<String>::new());

    assert!(!suggestions.is_empty());
    for suggestion in &suggestions {
        assert_ne!(normalize_sku(&suggestion.source_sku), normalize_sku(&suggestion.target_sku));
    }
}

#[test]
fn batch_reports_each_unordered_pair_once() {
    let suggestions = SkuMatcher::new().suggest_all(&mixed_catalog(), Vec::<String>::new());

    let mut seen = HashSet::new();
    for suggestion in &suggestions {
        assert!(seen.insert(suggestion.pair_key()), "duplicate pair {:?}", suggestion.pair_key());
    }
}

#[test]
fn batch_output_respects_every_hard_rule() {
    let suggestions = SkuMatcher::new().suggest_all(&mixed_catalog(), Vec::<String>::new());

    let pairs: HashSet<(String, String)> =
        suggestions.iter().map(|suggestion| suggestion.pair_key()).collect();
    assert!(pairs.contains(&("GBC-EAGLE-AHW".to_string(), "GBC-EAGLE-MAH".to_string())));

    for suggestion in &suggestions {
        for sku in [&suggestion.source_sku, &suggestion.target_sku] {
            assert!(!sku.contains("NECKLACE"), "excluded record surfaced: {sku}");
        }
        let key = suggestion.pair_key();
        assert_ne!(key, ("COINSLAB-40".to_string(), "COINSLAB-45".to_string()));
        assert_ne!(key, ("RS".to_string(), "RS2".to_string()));
        assert_ne!(key, ("GBC-EAGLE-MAH".to_string(), "GBC-EAGLE-OAK".to_string()));
        assert_ne!(key, ("GBC-HIO-P".to_string(), "GBC-HIO-SET".to_string()));
    }
}

#[test]
fn batch_keeps_at_most_two_per_source() {
    let suggestions = SkuMatcher::new().suggest_all(&mixed_catalog(), Vec::<String>::new());

    let mut per_source = std::collections::HashMap::new();
    for suggestion in &suggestions {
        *per_source.entry(normalize_sku(&suggestion.source_sku)).or_insert(0usize) += 1;
    }
    assert!(per_source.values().all(|count| *count <= 2));
}

#[test]
fn mapped_skus_are_not_used_as_sources() {
    let suggestions =
        SkuMatcher::new().suggest_all(&mixed_catalog(), ["ptb-gbc-hio", " GBC-EAGLE-MAH "]);

    for suggestion in &suggestions {
        let source = normalize_sku(&suggestion.source_sku);
        assert_ne!(source, "PTB-GBC-HIO");
        assert_ne!(source, "GBC-EAGLE-MAH");
    }
    assert!(suggestions
        .iter()
        .any(|s| s.source_sku == "VANTAGE-GBC-HIO" && s.target_sku == "PTB-GBC-HIO"));
}

#[test]
fn batch_output_is_deterministic() {
    let matcher = SkuMatcher::new();
    let catalog = mixed_catalog();

    let first = matcher.suggest_all(&catalog, Vec::<String>::new());
    let second = matcher.suggest_all(&catalog, Vec::<String>::new());
    assert_eq!(first, second);
}

#[test]
fn single_source_results_are_ranked_and_capped() {
    let source = record("GBC-STAR", "Golf Ball Case Star Edition");
    let catalog = vec![
        record("GBC-STARS", "Golf Ball Case Star"),
        record("GBC-STAR-X", "Golf Ball Case Star Edition"),
        record("GBC-STAR-XL", "Golf Ball Case Star Edition"),
        record("GBC-STAR-XXL", "Golf Ball Case Star Edition"),
        record("GBC-STAR", "Golf Ball Case Star Edition"),
    ];

    let suggestions = SkuMatcher::new().suggest_for(&source, &catalog);

    assert_eq!(suggestions.len(), 3);
    assert!(suggestions.windows(2).all(|pair| pair[0].score >= pair[1].score));
    assert!(suggestions.iter().all(|s| s.target_sku != "GBC-STAR"));
}

#[test]
fn empty_inputs_produce_no_suggestions() {
    let matcher = SkuMatcher::new();

    assert!(matcher.suggest_all(&[], Vec::<String>::new()).is_empty());
    assert!(matcher.suggest_for(&record("", ""), &[record("", "")]).is_empty());
}
