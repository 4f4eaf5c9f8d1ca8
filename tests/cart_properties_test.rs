use printbeat::domain::cart::{CartState, ProcessingFee};
use printbeat::domain::money::Money;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;

fn policies() -> [ProcessingFee; 3] {
    [
        ProcessingFee::None,
        ProcessingFee::Fixed {
            amount: Money::from_minor(150),
        },
        ProcessingFee::default(),
    ]
}

#[test]
fn test_total_matches_components_after_every_mutation() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for policy in policies() {
        let mut cart = CartState::new(policy);
        for step in 0..2_000 {
            let product = common::random_product(&mut rng);
            match rng.gen_range(0..10) {
                0..=4 => cart.add_item(product),
                5..=7 => {
                    cart.remove_item(&product);
                }
                8 => cart
                    .set_shipping_fee(Money::from_minor(rng.gen_range(0..2_000)))
                    .unwrap(),
                _ => {
                    if step % 7 == 0 {
                        cart.clear();
                    }
                }
            }

            let expected_subtotal: i64 = cart.items().iter().map(|p| p.price.minor_units()).sum();
            let totals = cart.totals().unwrap();
            assert_eq!(totals.subtotal, Money::from_minor(expected_subtotal));
            assert_eq!(
                totals.total.minor_units(),
                totals.subtotal.minor_units()
                    + cart.processing_fee().unwrap().minor_units()
                    + cart.shipping_fee().minor_units()
            );
        }
    }
}

#[test]
fn test_clear_always_empties() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let mut cart = CartState::default();
        for _ in 0..rng.gen_range(0..20) {
            cart.add_item(common::random_product(&mut rng));
        }
        cart.set_shipping_fee(Money::from_minor(rng.gen_range(0..5_000)))
            .unwrap();

        cart.clear();

        assert!(cart.items().is_empty());
        assert_eq!(cart.shipping_fee(), Money::ZERO);
        assert_eq!(cart.total().unwrap(), Money::ZERO);
    }
}

#[test]
fn test_removal_of_absent_product_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut cart = CartState::default();
    for _ in 0..10 {
        cart.add_item(common::random_product(&mut rng));
    }
    let before: Vec<String> = cart.items().iter().map(|p| p.id.to_string()).collect();

    let stranger = printbeat::domain::product::Product::new("not-in-catalog", "x", 1, "");
    assert!(!cart.remove_item(&stranger));

    let after: Vec<String> = cart.items().iter().map(|p| p.id.to_string()).collect();
    assert_eq!(before, after);
}
