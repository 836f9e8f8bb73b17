//! dermarank-test-utils — Shared fixtures for workspace tests.
//!
//! One small, internally consistent reference bundle plus a handful of raw
//! catalog records that exercise disclosed percentages, alias resolution,
//! irritant combinations, and skin-type tags.

use dermarank_common::{RawProductRecord, SkinType};
use dermarank_reference::ReferenceBundle;

/// Raw JSON for the fixture reference bundle.
pub fn sample_reference_json() -> &'static str {
    r#"{
        "ingredients": [
            {"key": "water", "name": "Water", "aliases": ["Aqua"]},
            {"key": "niacinamide", "name": "Niacinamide", "aliases": ["Vitamin B3", "Nicotinamide"]},
            {"key": "glycerin", "name": "Glycerin", "aliases": ["Glycerol"]},
            {"key": "salicylic-acid", "name": "Salicylic Acid", "aliases": ["BHA"]},
            {"key": "hyaluronic-acid", "name": "Hyaluronic Acid", "aliases": ["Sodium Hyaluronate"]},
            {"key": "retinol", "name": "Retinol", "aliases": ["Vitamin A"]},
            {"key": "glycolic-acid", "name": "Glycolic Acid", "aliases": []},
            {"key": "squalane", "name": "Squalane", "aliases": []}
        ],
        "actives": [
            "niacinamide", "glycerin", "salicylic-acid", "hyaluronic-acid",
            "retinol", "glycolic-acid", "squalane"
        ],
        "concerns": {
            "acne": ["salicylic-acid", "niacinamide"],
            "aging": ["retinol", "niacinamide"],
            "dryness": ["hyaluronic-acid", "glycerin", "squalane"]
        },
        "irritants": {
            "irritants": [
                {"key": "retinol", "severity": "medium"},
                {"key": "salicylic-acid", "severity": "low"}
            ],
            "combinations": [
                {"keys": ["retinol", "glycolic-acid"], "severity": "high"}
            ]
        }
    }"#
}

/// The fixture bundle, validated.
pub fn sample_bundle() -> ReferenceBundle {
    ReferenceBundle::from_json_str(sample_reference_json()).expect("fixture bundle is valid")
}

/// Four catalog records covering the paths tests care about.
pub fn sample_records() -> Vec<RawProductRecord> {
    vec![
        RawProductRecord {
            id: "p1".into(),
            name: "Clear Serum".into(),
            brand: Some("Fixture Labs".into()),
            price: 24.0,
            skin_types: vec![SkinType::Oily, SkinType::Combination],
            ingredients: "Water, Salicylic Acid 2%, Niacinamide, Glycerin".into(),
        },
        RawProductRecord {
            id: "p2".into(),
            name: "Rich Cream".into(),
            brand: Some("Fixture Labs".into()),
            price: 35.0,
            skin_types: vec![SkinType::Dry],
            ingredients: "Water, Glycerin, Hyaluronic Acid (Sodium Hyaluronate), Squalane".into(),
        },
        RawProductRecord {
            id: "p3".into(),
            name: "Night Repair".into(),
            brand: None,
            price: 48.0,
            skin_types: vec![],
            ingredients: "Water, Retinol 0.3%, Glycolic Acid, Squalane".into(),
        },
        RawProductRecord {
            id: "p4".into(),
            name: "Budget Gel".into(),
            brand: None,
            price: 8.0,
            skin_types: vec![],
            ingredients: "Aqua, Glycerin".into(),
        },
    ]
}
