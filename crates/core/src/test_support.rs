//! Shared fixtures for unit tests.

use chrono::{TimeZone, Utc};

use crate::catalog::Component;
use crate::compatibility::rules::{CompatibilityRule, Operator};
use crate::types::DbId;

/// A published, in-stock component with no attributes.
///
/// `age_minutes` offsets `created_at` so larger values are newer.
pub(crate) fn component(id: &str, category: &str, age_minutes: i64) -> Component {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Component {
        id: id.to_string(),
        name: format!("Product {id}"),
        slug: id.to_string(),
        category: category.to_string(),
        price: 1_000_000,
        image_url: None,
        is_published: true,
        is_featured: false,
        stock: 10,
        created_at: base + chrono::Duration::minutes(age_minutes),
        attributes: Vec::new(),
    }
}

pub(crate) fn rule(
    id: DbId,
    left_category: Option<&str>,
    left_attribute: &str,
    right_category: Option<&str>,
    right_attribute: Option<&str>,
    operator: Operator,
) -> CompatibilityRule {
    CompatibilityRule {
        id,
        left_category: left_category.map(str::to_string),
        left_attribute: left_attribute.to_string(),
        right_category: right_category.map(str::to_string),
        right_attribute: right_attribute.map(str::to_string),
        operator,
        note: None,
    }
}

/// The seeded rule set used by the storefront, as rule records.
pub(crate) fn standard_rules() -> Vec<CompatibilityRule> {
    let with_note = |mut r: CompatibilityRule, note: &str| {
        r.note = Some(note.to_string());
        r
    };
    vec![
        with_note(
            rule(
                1,
                Some("cpu"),
                "CPU_SOCKET",
                Some("mainboard"),
                Some("MB_SOCKET"),
                Operator::Equal,
            ),
            "CPU socket must match the mainboard socket",
        ),
        with_note(
            rule(
                2,
                Some("ram"),
                "RAM_TYPE",
                Some("mainboard"),
                Some("MB_RAM_TYPE"),
                Operator::Equal,
            ),
            "RAM type must match the mainboard memory type",
        ),
        with_note(
            rule(
                3,
                Some("ram"),
                "RAM_MODULES",
                Some("mainboard"),
                Some("MB_RAM_SLOTS"),
                Operator::LessThanOrEqual,
            ),
            "Total RAM modules must fit the mainboard slots",
        ),
        with_note(
            rule(
                4,
                Some("ram"),
                "RAM_CAPACITY_GB",
                Some("mainboard"),
                Some("MB_MAX_RAM_GB"),
                Operator::LessThanOrEqual,
            ),
            "Total RAM capacity must not exceed the mainboard maximum",
        ),
        with_note(
            rule(
                5,
                Some("ram"),
                "RAM_SPEED_MHZ",
                Some("mainboard"),
                Some("MB_MAX_RAM_SPEED_MHZ"),
                Operator::LessThanOrEqual,
            ),
            "RAM will run below its rated speed on this mainboard",
        ),
        with_note(
            rule(
                6,
                Some("gpu"),
                "GPU_LENGTH_MM",
                Some("case"),
                Some("CASE_GPU_CLEARANCE_MM"),
                Operator::LessThanOrEqual,
            ),
            "Graphics card must fit the case clearance",
        ),
        with_note(
            rule(
                7,
                Some("cooler"),
                "COOLER_HEIGHT_MM",
                Some("case"),
                Some("CASE_MAX_COOLER_HEIGHT_MM"),
                Operator::LessThanOrEqual,
            ),
            "CPU cooler must fit the case height limit",
        ),
        with_note(
            rule(
                8,
                Some("gpu"),
                "GPU_RECOMMENDED_PSU_W",
                Some("psu"),
                Some("PSU_WATTAGE"),
                Operator::LessThanOrEqual,
            ),
            "PSU wattage must cover the graphics card recommendation",
        ),
    ]
}
