use crate::cards::Card;
use crate::errors::GameError;
use crate::place::{BoardPlace, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedPlacement {
    /// Put the turn player's chip on the place
    Claim,
    /// Take the opponent's chip off the place
    Remove,
}

/// Validates playing `card` on `place` for the player in `seat`.
///
/// Legal combinations:
/// - empty place whose printed card equals the played card
/// - empty, non-wild place and a two-eyed jack
/// - opponent-occupied, unlocked place and a one-eyed jack
///
/// # Errors
///
/// Returns [`GameError::InvalidPlacement`] for every other combination.
/// `index` is only used to label the error.
///
/// # Examples
///
/// ```
/// use sequence_engine::cards::{Card, Rank, Suit};
/// use sequence_engine::place::{BoardPlace, Seat};
/// use sequence_engine::rules::{validate_placement, ValidatedPlacement};
///
/// let place = BoardPlace::new(Card::new(Rank::Seven, Suit::Diamonds));
///
/// let jack = Card::new(Rank::Jack, Suit::Clubs);
/// assert_eq!(validate_placement(jack, &place, Seat::Local, 0), Ok(ValidatedPlacement::Claim));
///
/// let three = Card::new(Rank::Three, Suit::Hearts);
/// assert!(validate_placement(three, &place, Seat::Local, 0).is_err());
/// ```
pub fn validate_placement(
    card: Card,
    place: &BoardPlace,
    seat: Seat,
    index: usize,
) -> Result<ValidatedPlacement, GameError> {
    let legal = match place.occupant() {
        None => {
            let wild_claim = card.is_two_eyed_jack() && !place.is_wild();
            (card == place.card() || wild_claim).then_some(ValidatedPlacement::Claim)
        }
        Some(occupant) => (card.is_one_eyed_jack() && occupant != seat && !place.is_locked())
            .then_some(ValidatedPlacement::Remove),
    };
    legal.ok_or(GameError::InvalidPlacement { index })
}

/// A card is dead when no place on the board accepts it.
pub fn is_dead_card(card: Card, places: &[BoardPlace], seat: Seat) -> bool {
    !places
        .iter()
        .enumerate()
        .any(|(i, p)| validate_placement(card, p, seat, i).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn place(rank: Rank, suit: Suit) -> BoardPlace {
        BoardPlace::new(Card::new(rank, suit))
    }

    #[test]
    fn matching_card_claims_empty_place() {
        let p = place(Rank::Four, Suit::Spades);
        let card = Card::new(Rank::Four, Suit::Spades);
        assert_eq!(
            validate_placement(card, &p, Seat::Local, 3),
            Ok(ValidatedPlacement::Claim)
        );
    }

    #[test]
    fn matching_card_rejected_when_occupied() {
        let mut p = place(Rank::Four, Suit::Spades);
        p.place_chip(Seat::Remote);
        let card = Card::new(Rank::Four, Suit::Spades);
        assert_eq!(
            validate_placement(card, &p, Seat::Local, 3),
            Err(GameError::InvalidPlacement { index: 3 })
        );
    }

    #[test]
    fn two_eyed_jack_cannot_claim_joker() {
        let p = BoardPlace::new(Card::joker());
        let jack = Card::new(Rank::Jack, Suit::Diamonds);
        assert!(validate_placement(jack, &p, Seat::Local, 0).is_err());
    }

    #[test]
    fn one_eyed_jack_removes_only_unlocked_opponent_chip() {
        let jack = Card::new(Rank::Jack, Suit::Spades);
        let mut p = place(Rank::King, Suit::Hearts);
        assert!(validate_placement(jack, &p, Seat::Local, 0).is_err());

        p.place_chip(Seat::Local);
        assert!(validate_placement(jack, &p, Seat::Local, 0).is_err());

        p.place_chip(Seat::Remote);
        assert_eq!(
            validate_placement(jack, &p, Seat::Local, 0),
            Ok(ValidatedPlacement::Remove)
        );

        p.lock_into_sequence();
        assert!(validate_placement(jack, &p, Seat::Local, 0).is_err());
    }

    #[test]
    fn one_eyed_jack_is_not_a_wild_placement() {
        let p = place(Rank::King, Suit::Hearts);
        let jack = Card::new(Rank::Jack, Suit::Hearts);
        assert!(validate_placement(jack, &p, Seat::Local, 0).is_err());
    }

    #[test]
    fn dead_card_detection() {
        let seven = Card::new(Rank::Seven, Suit::Clubs);
        let mut places = vec![
            place(Rank::Seven, Suit::Clubs),
            place(Rank::Seven, Suit::Clubs),
            BoardPlace::new(Card::joker()),
        ];
        assert!(!is_dead_card(seven, &places, Seat::Local));
        places[0].place_chip(Seat::Local);
        places[1].place_chip(Seat::Remote);
        assert!(is_dead_card(seven, &places, Seat::Local));

        let one_eyed = Card::new(Rank::Jack, Suit::Hearts);
        assert!(!is_dead_card(one_eyed, &places, Seat::Local));
        places[1].lock_into_sequence();
        assert!(is_dead_card(one_eyed, &places, Seat::Local));

        let two_eyed = Card::new(Rank::Jack, Suit::Diamonds);
        assert!(is_dead_card(two_eyed, &places, Seat::Local));
    }
}
