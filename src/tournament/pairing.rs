use super::models::{Pairing, Standing};

/// Pairs adjacent players in standings order: index 0 with 1, 2 with 3,
/// and so on. Players next to each other in the standings have equal or
/// nearly-equal records, which is the Swiss-system pairing goal.
///
/// With an odd number of players the last (lowest-ranked) one is left out
/// of the result. That is deliberate policy, not an error: no bye round is
/// synthesized and nothing is raised.
pub fn pair_adjacent(standings: &[Standing]) -> Vec<Pairing> {
    standings
        .chunks_exact(2)
        .map(|pair| Pairing {
            id1: pair[0].id,
            name1: pair[0].name.clone(),
            id2: pair[1].id,
            name2: pair[1].name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn standing(id: i64, wins: i32) -> Standing {
        Standing {
            id,
            name: format!("player-{}", id),
            wins,
            matches_played: wins,
        }
    }

    #[test]
    fn pairs_follow_standings_order() {
        let standings = vec![standing(3, 2), standing(1, 1), standing(4, 1), standing(2, 0)];

        let pairings = pair_adjacent(&standings);

        assert_eq!(pairings.len(), 2);
        assert_eq!((pairings[0].id1, pairings[0].id2), (3, 1));
        assert_eq!((pairings[1].id1, pairings[1].id2), (4, 2));
        assert_eq!(pairings[0].name1, "player-3");
        assert_eq!(pairings[0].name2, "player-1");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 1)]
    #[case(4, 2)]
    #[case(8, 4)]
    fn even_counts_pair_everyone(#[case] players: i64, #[case] expected_pairs: usize) {
        let standings: Vec<Standing> = (1..=players).map(|id| standing(id, 0)).collect();

        let pairings = pair_adjacent(&standings);

        assert_eq!(pairings.len(), expected_pairs);

        let mut seen = std::collections::HashSet::new();
        for pairing in &pairings {
            assert!(seen.insert(pairing.id1));
            assert!(seen.insert(pairing.id2));
        }
        assert_eq!(seen.len(), players as usize);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(7)]
    fn odd_counts_drop_the_lowest_ranked(#[case] players: i64) {
        let standings: Vec<Standing> = (1..=players).map(|id| standing(id, 0)).collect();

        let pairings = pair_adjacent(&standings);

        assert_eq!(pairings.len(), (players as usize - 1) / 2);

        let last_id = standings.last().unwrap().id;
        for pairing in &pairings {
            assert_ne!(pairing.id1, last_id);
            assert_ne!(pairing.id2, last_id);
        }
    }

    #[test]
    fn paired_players_are_adjacent_in_rank() {
        let standings: Vec<Standing> = (0..6).map(|i| standing(i + 1, 5 - i as i32)).collect();

        let pairings = pair_adjacent(&standings);

        for (rank, pairing) in pairings.iter().enumerate() {
            let first_rank = standings.iter().position(|s| s.id == pairing.id1).unwrap();
            let second_rank = standings.iter().position(|s| s.id == pairing.id2).unwrap();
            assert_eq!(first_rank, rank * 2);
            assert_eq!(second_rank, rank * 2 + 1);
        }
    }
}
