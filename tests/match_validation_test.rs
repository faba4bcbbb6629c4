use rivalry_tracker::error::TrackerError;
use rivalry_tracker::game::match_validator::{MatchValidator, MAX_GOALS_PER_TYPE, MAX_MATCH_DATE_LEN};
use rivalry_tracker::models::common::MatchResult;
use rivalry_tracker::models::match_record::{MatchGoals, MatchPayload};
use rivalry_tracker::models::player::{PlayerFieldsUpdate, StatsPatch};

#[test]
fn test_validate_payload() {
    let validator = MatchValidator::new();

    let valid = MatchPayload::new("2024-06-01", MatchResult::Win).with_goals(MatchGoals {
        me_normal_goals: 3,
        ..MatchGoals::default()
    });
    assert!(validator.validate_payload(&valid).is_ok());
    assert!(validator.validate_payload(&MatchPayload::new("2024-06-01", MatchResult::Draw)).is_ok());

    // Missing date
    assert!(matches!(
        validator.validate_payload(&MatchPayload::new("   ", MatchResult::Draw)),
        Err(TrackerError::Validation(_))
    ));
}

#[test]
fn test_negative_goals_rejected() {
    let validator = MatchValidator::new();
    let goals = MatchGoals {
        friend_corner_goals: -2,
        ..MatchGoals::default()
    };

    match validator.validate_goals(&goals) {
        Err(TrackerError::Validation(message)) => assert!(message.contains("friend_cornerGoals")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_goal_counts_above_limit_rejected() {
    let validator = MatchValidator::new();

    let at_limit = MatchGoals {
        me_normal_goals: MAX_GOALS_PER_TYPE,
        ..MatchGoals::default()
    };
    assert!(validator.validate_goals(&at_limit).is_ok());

    let overflowing = MatchGoals {
        me_normal_goals: i32::MAX,
        me_penalty_goals: 1,
        ..MatchGoals::default()
    };
    match validator.validate_goals(&overflowing) {
        Err(TrackerError::Validation(message)) => assert!(message.contains("me_normalGoals")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_match_date_longer_than_column_rejected() {
    let validator = MatchValidator::new();

    let longest = "d".repeat(MAX_MATCH_DATE_LEN);
    assert!(validator.validate_match_date(&longest).is_ok());

    let too_long = "d".repeat(MAX_MATCH_DATE_LEN + 1);
    assert!(matches!(
        validator.validate_payload(&MatchPayload::new(too_long, MatchResult::Win)),
        Err(TrackerError::Validation(_))
    ));
}

#[test]
fn test_validate_fields_update() {
    let validator = MatchValidator::new();

    let valid = PlayerFieldsUpdate {
        stats: Some(StatsPatch { wins: Some(4), ..StatsPatch::default() }),
        conceded_matches: Some(0),
    };
    assert!(validator.validate_fields_update(&valid).is_ok());
    assert!(validator.validate_fields_update(&PlayerFieldsUpdate::default()).is_ok());

    let negative_stat = PlayerFieldsUpdate {
        stats: Some(StatsPatch { draws: Some(-1), ..StatsPatch::default() }),
        conceded_matches: None,
    };
    assert!(validator.validate_fields_update(&negative_stat).is_err());

    let negative_conceded = PlayerFieldsUpdate {
        stats: None,
        conceded_matches: Some(-3),
    };
    assert!(validator.validate_fields_update(&negative_conceded).is_err());
}

#[test]
fn test_payload_wire_format() {
    let payload: MatchPayload = serde_json::from_value(serde_json::json!({
        "matchDate": "2024-06-01",
        "result": "loss",
        "friend_penaltyGoals": 1,
        "me_ownGoals": 1
    }))
    .expect("payload should parse");

    assert_eq!(payload.result, MatchResult::Loss);
    assert_eq!(payload.goals.friend_penalty_goals, 1);
    assert_eq!(payload.goals.me_own_goals, 1);
    assert_eq!(payload.goals.me_normal_goals, 0);

    let bad_result = serde_json::from_value::<MatchPayload>(serde_json::json!({
        "matchDate": "2024-06-01",
        "result": "forfeit"
    }));
    assert!(bad_result.is_err());
}

#[test]
fn test_null_goal_fields_count_as_zero() {
    let payload: MatchPayload = serde_json::from_value(serde_json::json!({
        "matchDate": "2024-06-01",
        "result": "win",
        "me_normalGoals": 2,
        "me_penaltyGoals": null,
        "friend_ownGoals": null
    }))
    .expect("null goal fields should parse");

    assert_eq!(payload.goals.me_normal_goals, 2);
    assert_eq!(payload.goals.me_penalty_goals, 0);
    assert_eq!(payload.goals.friend_own_goals, 0);
}
