//! Property-based tests for the deck engine
//!
//! Any deck, any choices: regroup permutes, piles tile the deck, and three
//! honest answers always put the chosen card at position 10.

use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_deck() -> impl Strategy<Value = Deck> {
    any::<u64>().prop_map(|seed| {
        let cards = (1..=DECK_SIZE).map(|i| Card::new(format!("card-{i}"))).collect();
        Deck::initialize(cards, &mut StdRng::seed_from_u64(seed)).unwrap()
    })
}

fn arb_choice() -> impl Strategy<Value = PileChoice> {
    prop_oneof![
        Just(PileChoice::First),
        Just(PileChoice::Second),
        Just(PileChoice::Third),
    ]
}

fn sorted(cards: &[Card]) -> Vec<Card> {
    let mut cards = cards.to_vec();
    cards.sort();
    cards
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_piles_reconstruct_the_deck(
        deck in arb_deck(),
        choices in proptest::collection::vec(arb_choice(), 0..6),
    ) {
        let mut deck = deck;
        for choice in choices {
            deck.regroup(choice);
        }
        let joined = [
            deck.pile(PileChoice::First),
            deck.pile(PileChoice::Second),
            deck.pile(PileChoice::Third),
        ]
        .concat();
        prop_assert_eq!(joined.as_slice(), deck.cards());
    }

    #[test]
    fn prop_regroup_is_a_permutation(deck in arb_deck(), choice in arb_choice()) {
        let before = sorted(deck.cards());
        let mut deck = deck;
        deck.regroup(choice);
        prop_assert_eq!(deck.cards().len(), DECK_SIZE);
        prop_assert_eq!(sorted(deck.cards()), before);
    }

    #[test]
    fn prop_three_honest_answers_reveal_the_target(
        deck in arb_deck(),
        target_index in 0..DECK_SIZE,
    ) {
        let mut deck = deck;
        let target = deck.cards()[target_index].clone();
        for _ in 0..3 {
            let choice = deck.pile_containing(&target).unwrap();
            deck.regroup(choice);
        }
        prop_assert_eq!(deck.reveal_card(), &target);
    }

    #[test]
    fn prop_shuffle_preserves_cards(deck in arb_deck(), seed in any::<u64>()) {
        let before = sorted(deck.cards());
        let mut deck = deck;
        deck.shuffle(&mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(sorted(deck.cards()), before);
    }
}
