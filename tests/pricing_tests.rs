/// End-to-end pricing through the session: the latte scenario,
/// promo round-trips and recomputation determinism.
///
/// Run with: cargo test --test pricing_tests
use std::sync::Arc;

use brewhaven::{
    Catalog, Customization, MemorySessionStore, Money, OrderSession, SessionConfig,
};

fn session() -> OrderSession {
    OrderSession::open(
        Arc::new(Catalog::sample()),
        SessionConfig::new().with_seed(5).without_promo_prefill(),
        Box::new(MemorySessionStore::new()),
    )
}

fn add_small_latte(session: &mut OrderSession) {
    session
        .add_item("Latte", Customization::new().select("size", "small"))
        .unwrap();
}

#[test]
fn test_single_latte_totals() {
    let mut session = session();
    add_small_latte(&mut session);

    let summary = session.summary();
    assert_eq!(summary.item_count, 1);
    assert_eq!(summary.subtotal, Money::from_dollars(4, 50));
    assert_eq!(summary.taxes, Money::from_cents(36));
    assert_eq!(summary.fee, Money::from_cents(150));
    assert_eq!(summary.savings, Money::ZERO);
    assert_eq!(summary.total, Money::from_cents(636));
}

#[test]
fn test_single_latte_with_promo() {
    let mut session = session();
    add_small_latte(&mut session);
    session.apply_promo("BREWHAVEN20");

    let summary = session.summary();
    assert_eq!(summary.savings, Money::from_cents(90));
    assert_eq!(summary.total, Money::from_cents(546));
    assert_eq!(summary.promo_code.as_deref(), Some("BREWHAVEN20"));
}

#[test]
fn test_second_latte_merges_and_reprices() {
    let mut session = session();
    add_small_latte(&mut session);
    add_small_latte(&mut session);

    let summary = session.summary();
    assert_eq!(session.cart().len(), 1);
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.subtotal, Money::from_dollars(9, 0));
    assert_eq!(summary.taxes, Money::from_cents(72));
    assert_eq!(summary.fee, Money::from_cents(150));
    assert_eq!(summary.total, Money::from_cents(1122));
}

#[test]
fn test_priced_options_and_attached_add_ons_reach_the_subtotal() {
    let mut session = session();
    session
        .add_item(
            "Latte",
            Customization::new()
                .select("size", "large")
                .select("milk", "oat")
                .select_many("extras", ["extra-shot"]),
        )
        .unwrap();

    // 4.50 + 0.80 + 0.70 + 1.00
    assert_eq!(session.summary().subtotal, Money::from_cents(700));
}

#[test]
fn test_promo_round_trip_restores_discount_exactly() {
    let mut session = session();
    add_small_latte(&mut session);

    session.apply_promo("BREWHAVEN20");
    let discounted = session.summary().clone();
    assert_eq!(discounted.savings, Money::from_cents(90));

    session.apply_promo("TOTALLYFAKE");
    let full_price = session.summary();
    assert_eq!(full_price.savings, Money::ZERO);
    assert_eq!(full_price.promo_code.as_deref(), Some("TOTALLYFAKE"));
    assert_eq!(full_price.total, Money::from_cents(636));

    session.apply_promo("BREWHAVEN20");
    assert_eq!(session.summary(), &discounted);
}

#[test]
fn test_summary_is_recomputed_not_adjusted() {
    let mut bounced = session();
    add_small_latte(&mut bounced);
    let identity = bounced.cart().lines().next().unwrap().identity();

    bounced.change_quantity(&identity, 10).unwrap();
    bounced.change_quantity(&identity, 1).unwrap();

    // Down-and-up leaves no residue: the summary matches a fresh session
    // that only ever saw one latte.
    let mut fresh = session();
    add_small_latte(&mut fresh);
    assert_eq!(bounced.summary(), fresh.summary());
}

#[test]
fn test_selected_recommendation_prices_into_the_order() {
    let mut session = session();
    add_small_latte(&mut session);

    let entry = session.recommended().entries()[0].clone();
    session.toggle_recommended(&entry.id());
    assert_eq!(
        session.summary().subtotal,
        Money::from_dollars(4, 50) + entry.price()
    );

    session.toggle_recommended(&entry.id());
    assert_eq!(session.summary().subtotal, Money::from_dollars(4, 50));
}

#[test]
fn test_emptied_cart_prices_to_zero_with_no_fee() {
    let mut session = session();
    add_small_latte(&mut session);
    let identity = session.cart().lines().next().unwrap().identity();
    session.remove_item(&identity).unwrap();

    let summary = session.summary();
    assert_eq!(summary.subtotal, Money::ZERO);
    assert_eq!(summary.fee, Money::ZERO);
    assert_eq!(summary.total, Money::ZERO);
}
