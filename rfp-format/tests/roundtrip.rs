//! Property-based coverage: encode/decode is the identity for every recipe
//! whose strings fit the 16-bit length prefix.

use proptest::prelude::*;
use rfp_format::{decode, encode, Recipe};

fn short_text() -> impl Strategy<Value = String> {
    // Arbitrary UTF-8 up to a few hundred bytes; the 16-bit ceiling is
    // exercised separately to keep the cases fast.
    ".{0,80}"
}

fn arb_recipe() -> impl Strategy<Value = Recipe> {
    (
        short_text(),
        short_text(),
        prop::collection::btree_map(short_text(), short_text(), 0..8),
        prop::collection::vec(short_text(), 0..12),
        prop::collection::vec(short_text(), 0..12),
    )
        .prop_map(
            |(name, image_ref, properties, ingredients, steps)| Recipe {
                name,
                image_ref,
                properties,
                ingredients,
                steps,
            },
        )
}

proptest! {
    #[test]
    fn round_trip_is_identity(recipe in arb_recipe()) {
        let decoded = decode(&encode(&recipe).unwrap()).unwrap();
        prop_assert_eq!(decoded, recipe);
    }

    #[test]
    fn sequences_survive_position_for_position(
        ingredients in prop::collection::vec(short_text(), 0..20),
        steps in prop::collection::vec(short_text(), 0..20),
    ) {
        let recipe = Recipe {
            ingredients: ingredients.clone(),
            steps: steps.clone(),
            ..Recipe::new("order")
        };
        let decoded = decode(&encode(&recipe).unwrap()).unwrap();
        prop_assert_eq!(decoded.ingredients, ingredients);
        prop_assert_eq!(decoded.steps, steps);
    }

    #[test]
    fn truncations_never_yield_a_partial_recipe(
        recipe in arb_recipe(),
        frac in 0.0f64..1.0,
    ) {
        let encoded = encode(&recipe).unwrap();
        let cut = (encoded.len() as f64 * frac) as usize;
        prop_assert!(decode(&encoded[..cut]).is_err());
    }
}

#[test]
fn strings_at_the_exact_ceiling_round_trip() {
    let mut recipe = Recipe::new("max");
    recipe.ingredients.push("x".repeat(u16::MAX as usize));
    let decoded = decode(&encode(&recipe).unwrap()).unwrap();
    assert_eq!(decoded.ingredients[0].len(), u16::MAX as usize);
}

#[test]
fn strings_over_the_ceiling_are_refused() {
    let mut recipe = Recipe::new("max");
    recipe.properties.insert(
        "notes".into(),
        "x".repeat(u16::MAX as usize + 1),
    );
    assert!(encode(&recipe).is_err());
}
