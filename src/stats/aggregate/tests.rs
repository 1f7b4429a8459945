//! Unit tests for aggregation and name correlation

use super::*;

fn window(entity: &str, label: &str, games: u32, points: u32) -> RawStatRecord {
    RawStatRecord {
        games_played: games,
        games_won: games / 2,
        games_lost: games - games / 2,
        points,
        assists: games,
        field_goals_made: points / 3,
        field_goals_attempted: points / 2,
        ..RawStatRecord::new(entity, label)
    }
}

fn park_row(uuid: &str, name: &str, games: u32, points: u32) -> ParkGameStats {
    ParkGameStats {
        player_uuid: uuid.to_string(),
        player_name: name.to_string(),
        season: 1,
        wins: 3,
        losses: games.saturating_sub(3),
        games_played: games,
        points,
        assists: 4,
        rebounds: 9,
        steals: 1,
        blocks: 2,
        turnovers: 5,
        fg_made: 10,
        fg_attempted: 20,
        three_fg_made: 2,
        three_fg_attempted: 8,
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[test]
    fn test_aggregate_empty_is_all_zero() {
        let r = aggregate(&[]);
        assert_eq!(r, RawStatRecord::default());
        assert_eq!(r.games_played, 0);
        assert_eq!(r.points, 0);
        assert_eq!(r.free_throws_made, 0);
    }

    #[test]
    fn test_aggregate_single_is_identity() {
        let r = window("discord-1", "S1", 10, 150);
        assert_eq!(aggregate(std::slice::from_ref(&r)), r);
    }

    #[test]
    fn test_aggregate_sums_every_field() {
        let a = window("discord-1", "S1", 10, 150);
        let b = window("discord-1", "S1", 4, 30);
        let total = aggregate(&[a.clone(), b.clone()]);

        assert_eq!(total.games_played, 14);
        assert_eq!(total.games_won, a.games_won + b.games_won);
        assert_eq!(total.games_lost, a.games_lost + b.games_lost);
        assert_eq!(total.points, 180);
        assert_eq!(total.assists, 14);
        assert_eq!(total.field_goals_made, 50 + 10);
        assert_eq!(total.field_goals_attempted, 75 + 15);
        assert_eq!(total.window, "S1");
    }

    #[test]
    fn test_aggregate_mixed_windows_is_combined() {
        let a = window("discord-1", "S1", 10, 150);
        let b = window("discord-1", "park-1", 4, 30);
        assert_eq!(aggregate(&[a, b]).window, COMBINED_WINDOW);
    }

    #[test]
    fn test_aggregate_defers_averaging() {
        // 20 ppg over 10 games and 5 ppg over 2 games is 17.5 combined, not the 12.5 mean of means.
        let a = window("discord-1", "S1", 10, 200);
        let b = window("discord-1", "S1", 2, 10);
        let m = crate::stats::derive::derive(&aggregate(&[a, b]));
        assert_eq!(m.ppg, 17.5);
    }

    #[test]
    fn test_aggregate_for_drops_other_players() {
        let mine = window("discord-1", "S1", 10, 150);
        let theirs = window("discord-2", "S1", 8, 80);
        let agg = aggregate_for("discord-1", &[mine.clone(), theirs]);

        assert_eq!(agg.dropped, 1);
        assert_eq!(agg.record, mine);
    }

    #[test]
    fn test_aggregate_for_with_no_matching_sources() {
        let theirs = window("discord-2", "S1", 8, 80);
        let agg = aggregate_for("discord-1", &[theirs]);

        assert_eq!(agg.dropped, 1);
        assert_eq!(agg.record.entity_id, "discord-1");
        assert_eq!(agg.record.games_played, 0);
    }
}

#[cfg(test)]
mod correlation_tests {
    use super::*;

    #[test]
    fn test_correlate_matches_case_insensitively() {
        let rows = vec![
            park_row("uuid-a", "Steve", 6, 60),
            park_row("uuid-b", "Alex", 4, 20),
        ];

        match correlate_by_name("discord-1", "  steve ", &rows, "park-1") {
            Correlation::Matched(r) => {
                assert_eq!(r.entity_id, "discord-1");
                assert_eq!(r.window, "park-1");
                assert_eq!(r.games_played, 6);
                assert_eq!(r.points, 60);
                assert_eq!(r.games_won, 3);
                assert_eq!(r.field_goals_attempted, 20);
                assert_eq!(r.three_pointers_made, 2);
                assert_eq!(r.free_throws_attempted, 0);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_correlate_unmatched() {
        let rows = vec![park_row("uuid-a", "Steve", 6, 60)];
        assert_eq!(
            correlate_by_name("discord-1", "Herobrine", &rows, "park-1"),
            Correlation::Unmatched
        );
        assert_eq!(
            correlate_by_name("discord-1", "   ", &rows, "park-1"),
            Correlation::Unmatched
        );
    }

    #[test]
    fn test_correlate_ambiguous_is_not_merged() {
        let rows = vec![
            park_row("uuid-a", "Steve", 6, 60),
            park_row("uuid-b", "Alex", 4, 20),
            park_row("uuid-c", "STEVE", 2, 10),
        ];
        assert_eq!(
            correlate_by_name("discord-1", "Steve", &rows, "park-1"),
            Correlation::Ambiguous(2)
        );
    }

    #[test]
    fn test_correlate_duplicate_rows_for_one_uuid_still_match() {
        let rows = vec![
            park_row("uuid-a", "Steve", 6, 60),
            park_row("uuid-b", "Alex", 4, 20),
            park_row("uuid-a", "Steve", 6, 60),
        ];
        assert!(matches!(
            correlate_by_name("discord-1", "steve", &rows, "park-1"),
            Correlation::Matched(_)
        ));
    }
}
