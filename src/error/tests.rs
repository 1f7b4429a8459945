//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod mba_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = MbaError::from(json_error);

        match err {
            MbaError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err = MbaError::from(io_error);

        match err {
            MbaError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_database_error_conversion() {
        let err = MbaError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, MbaError::Database(_)));
        assert!(err.to_string().starts_with("Database error"));
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
        let err = MbaError::from(header_error);

        assert!(matches!(err, MbaError::InvalidHeader(_)));
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "abc".parse::<u32>().unwrap_err();
        let err = MbaError::from(parse_error);

        assert!(matches!(err, MbaError::InvalidNumber(_)));
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_invalid_metric_display() {
        let err = MbaError::InvalidMetric {
            value: "xyz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown stat category: xyz (expected ppg, rpg, apg, spg, bpg or tpg)"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = MbaError::InvalidConfig {
            env_var: "MBA_CACHE_TTL_SECS".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for MBA_CACHE_TTL_SECS: soon");
    }

    #[test]
    fn test_player_not_found_display() {
        let err = MbaError::PlayerNotFound {
            id: "discord-42".to_string(),
        };
        assert_eq!(err.to_string(), "Player not found: discord-42");
    }

    #[test]
    fn test_invalid_player_id_display() {
        let err = MbaError::InvalidPlayerId {
            value: " ".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid player id: \" \"");
    }

    #[test]
    fn test_status_display() {
        let err = MbaError::Status {
            service: "park stats",
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "park stats responded with 500: boom");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MbaError>();
    }
}
