//! Variation aggregation tests.

mod common;

use common::{line, order};
use packdesk::aggregate::{orders_for_variation, product_totals};
use packdesk::{aggregate_variations, parse_product_cell, Order, OrderStatus, VariationSummary};

fn summary(name: &str, sku: Option<&str>, quantity: u64) -> VariationSummary {
    VariationSummary {
        name: name.to_string(),
        sku: sku.map(str::to_string),
        quantity,
    }
}

// ---------------------------------------------------------------------------
// aggregate_variations
// ---------------------------------------------------------------------------

#[test]
fn sums_quantities_per_variation_and_sku() {
    let (desk, _tmp) = common::setup_offline_desk();
    let summaries = desk.variations().summaries();
    assert_eq!(
        summaries,
        vec![
            summary("Lavanda", None, 3),
            summary("Lavanda", Some("AR-LAV"), 3),
            summary("Vermelha", Some("BO-RED"), 1),
        ]
    );
}

#[test]
fn same_name_different_sku_are_separate() {
    let orders = vec![
        order("1", vec![line("Areia", "Lavanda", 1, Some("A")), line("Areia", "Lavanda", 2, Some("B"))]),
        order("2", vec![line("Areia", "Lavanda", 4, None), line("Areia", "Lavanda", 5, None)]),
    ];
    let summaries = aggregate_variations(&orders);
    assert_eq!(
        summaries,
        vec![
            summary("Lavanda", None, 9),
            summary("Lavanda", Some("B"), 2),
            summary("Lavanda", Some("A"), 1),
        ]
    );
}

#[test]
fn parent_sku_groups_item_skus_together() {
    let orders = vec![
        Order::new(
            "1",
            parse_product_cell(
                "[1] Product Name:Areia; Variation Name:Lavanda; Quantity:1; SKU Reference No.:AR-LAV; Parent SKU Reference No.:AR",
            ),
        ),
        Order::new(
            "2",
            parse_product_cell(
                "[1] Product Name:Areia; Variation Name:Lavanda; Quantity:2; SKU Reference No.:AR-LAV2; Parent SKU Reference No.:AR",
            ),
        ),
    ];
    assert_eq!(aggregate_variations(&orders), vec![summary("Lavanda", Some("AR"), 3)]);
    assert_eq!(orders_for_variation(&orders, "Lavanda", Some("AR")).len(), 2);
}

#[test]
fn huge_quantities_saturate() {
    let orders = vec![
        order("1", vec![line("Areia", "Lavanda", u64::MAX, None)]),
        order("2", vec![line("Areia", "Lavanda", 1, None)]),
    ];
    assert_eq!(aggregate_variations(&orders)[0].quantity, u64::MAX);
    assert_eq!(product_totals(&orders).sand_units, u64::MAX);
}

#[test]
fn ties_keep_discovery_order() {
    let orders = vec![order(
        "1",
        vec![
            line("Areia", "Jasmim", 2, None),
            line("Areia", "Lavanda", 2, None),
            line("Areia", "Rosa", 5, None),
        ],
    )];
    let names: Vec<String> = aggregate_variations(&orders).into_iter().map(|v| v.name).collect();
    assert_eq!(names, vec!["Rosa", "Jasmim", "Lavanda"]);
}

#[test]
fn totals_do_not_depend_on_order() {
    let orders = vec![
        order("1", vec![line("Areia", "Lavanda", 1, Some("A"))]),
        order("2", vec![line("Bolinha", "Azul", 3, None), line("Areia", "Lavanda", 2, Some("A"))]),
        order("3", vec![line("Areia", "Jasmim", 4, None)]),
    ];
    let mut reversed = orders.clone();
    reversed.reverse();

    let mut forward = aggregate_variations(&orders);
    let mut backward = aggregate_variations(&reversed);
    forward.sort_by(|a, b| (&a.name, &a.sku).cmp(&(&b.name, &b.sku)));
    backward.sort_by(|a, b| (&a.name, &a.sku).cmp(&(&b.name, &b.sku)));
    assert_eq!(forward, backward);
}

#[test]
fn repeated_aggregation_is_identical() {
    let (desk, _tmp) = common::setup_offline_desk();
    assert_eq!(desk.variations().summaries(), desk.variations().summaries());
}

#[test]
fn no_orders_no_variations() {
    assert!(aggregate_variations(&[]).is_empty());
}

// ---------------------------------------------------------------------------
// product_totals
// ---------------------------------------------------------------------------

#[test]
fn sand_is_counted_separately() {
    let (desk, _tmp) = common::setup_offline_desk();
    let totals = desk.variations().product_totals();
    assert_eq!(totals.order_count, 3);
    assert_eq!(totals.sand_units, 6);
    assert_eq!(totals.other_units, 1);
}

#[test]
fn sand_match_is_case_insensitive() {
    let orders = vec![order(
        "1",
        vec![line("AREIA fina", "-", 2, None), line("Kit areia", "-", 1, None), line("Bola", "-", 5, None)],
    )];
    let totals = product_totals(&orders);
    assert_eq!(totals.sand_units, 3);
    assert_eq!(totals.other_units, 5);
}

// ---------------------------------------------------------------------------
// Orders per variation
// ---------------------------------------------------------------------------

#[test]
fn orders_for_variation_lists_pending_first() {
    let mut orders = vec![
        order("1", vec![line("Areia", "Lavanda", 1, None)]),
        order("2", vec![line("Areia", "Lavanda", 1, None)]),
        order("3", vec![line("Areia", "Rosa", 1, None)]),
        order("4", vec![line("Areia", "Lavanda", 1, None)]),
    ];
    orders[0].status = OrderStatus::Packed;

    let ids: Vec<&str> = orders_for_variation(&orders, "Lavanda", None)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "4", "1"]);
}

#[test]
fn variation_views_over_loaded_orders() {
    let (mut desk, _tmp) = common::setup_offline_desk();
    let lavanda = summary("Lavanda", Some("AR-LAV"), 3);

    assert_eq!(desk.variations().order_count(&lavanda), 2);
    assert!(!desk.variations().all_packed(&lavanda));

    desk.mark_variation("Lavanda", Some("AR-LAV"), OrderStatus::Packed).unwrap();
    assert!(desk.variations().all_packed(&lavanda));

    let unknown = summary("Nada", None, 0);
    assert!(!desk.variations().all_packed(&unknown));
}

#[test]
fn top_and_search() {
    let (desk, _tmp) = common::setup_offline_desk();
    let variations = desk.variations();

    assert_eq!(variations.top(2).len(), 2);
    assert_eq!(variations.top(10).len(), 3);

    let by_sku = variations.search("bo-red");
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].name, "Vermelha");
    assert_eq!(variations.search("LAVANDA").len(), 2);
}

#[test]
fn unique_order_count_deduplicates() {
    let (desk, _tmp) = common::setup_offline_desk();
    let variations = desk.variations();
    let all = variations.summaries();
    assert_eq!(variations.unique_order_count(&all), 3);
    assert_eq!(variations.unique_order_count(&all[1..]), 2);
}
