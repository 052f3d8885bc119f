//! Request shell tests: command dispatch, cursor handling, error mapping.

use roi_core::{
    command::{DeskCommand, DeskResponse},
    config::SUBSCRIPTION_COST,
    desk::RoiDesk,
    period::PeriodRecord,
};

fn record(label: &str) -> PeriodRecord {
    PeriodRecord {
        label: label.into(),
        card_volume: 1000.0,
        card_count: 10,
        debit_volume: 1000.0,
        debit_count: 10,
        card_rate_percent: 3.2,
        convenience_fee_percent: 2.5,
    }
}

fn desk_with(n: usize) -> RoiDesk {
    let mut desk = RoiDesk::default();
    for i in 1..=n {
        desk.handle(DeskCommand::AddPeriod(record(&format!("Period {i}"))));
    }
    desk
}

fn report_len(desk: &mut RoiDesk) -> usize {
    match desk.handle(DeskCommand::GetRoi) {
        DeskResponse::Report(report) => report.results.len(),
        other => panic!("expected a report, got {other:?}"),
    }
}

#[test]
fn cursor_starts_at_zero() {
    let mut desk = desk_with(3);
    assert_eq!(desk.current_period(), 0);
    assert_eq!(report_len(&mut desk), 1, "only Period 0 before advancing");
}

#[test]
fn next_period_advances_until_exhausted() {
    let mut desk = desk_with(2);

    for expected in 1..=2 {
        match desk.handle(DeskCommand::NextPeriod) {
            DeskResponse::Ok { message, current_period } => {
                assert_eq!(current_period, expected);
                assert_eq!(message, format!("Advanced to period {expected}"));
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    match desk.handle(DeskCommand::NextPeriod) {
        DeskResponse::Ok { message, current_period } => {
            assert_eq!(message, "All periods loaded");
            assert_eq!(current_period, 2);
        }
        other => panic!("unexpected response {other:?}"),
    }
    assert_eq!(report_len(&mut desk), 3);
}

#[test]
fn reset_returns_cursor_to_zero() {
    let mut desk = desk_with(2);
    desk.handle(DeskCommand::NextPeriod);
    desk.handle(DeskCommand::ResetPeriods);

    assert_eq!(desk.current_period(), 0);
    assert_eq!(report_len(&mut desk), 1);
}

#[test]
fn delete_periods_empties_the_engine() {
    let mut desk = desk_with(3);
    desk.seek(3);
    desk.handle(DeskCommand::DeletePeriods);

    assert!(desk.engine().is_empty());
    // Stale cursor is clamped by the engine.
    let report = desk.report();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].roi, -SUBSCRIPTION_COST);
}

#[test]
fn seek_clamps_to_sequence_length() {
    let mut desk = desk_with(2);
    assert_eq!(desk.seek(10), 2);
    assert_eq!(desk.seek(1), 1);
}

#[test]
fn list_periods_returns_records_in_order() {
    let mut desk = desk_with(2);
    match desk.handle(DeskCommand::ListPeriods) {
        DeskResponse::Periods { periods } => {
            let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
            assert_eq!(labels, vec!["Period 1", "Period 2"]);
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn health_reports_healthy() {
    let mut desk = RoiDesk::default();
    let json = serde_json::to_string(&desk.handle(DeskCommand::Health)).unwrap();
    assert_eq!(json, r#"{"status":"healthy"}"#);
}

#[test]
fn add_period_json_uses_inline_fields() {
    let mut desk = RoiDesk::default();
    let response = desk.handle_json(
        r#"{"cmd":"add_period","label":"Period 1","card_volume":1000.0,"card_count":10,
            "debit_volume":1000.0,"debit_count":10,"card_rate_percent":3.2,
            "convenience_fee_percent":2.5}"#,
    );

    assert!(!response.is_error(), "unexpected {response:?}");
    assert_eq!(desk.engine().periods(), &[record("Period 1")]);
}

#[test]
fn missing_field_is_a_client_error() {
    let mut desk = RoiDesk::default();
    let response = desk.handle_json(r#"{"cmd":"add_period","label":"Period 1","card_volume":1.0}"#);

    assert!(matches!(response, DeskResponse::ClientError { .. }), "got {response:?}");
    assert!(desk.engine().is_empty());
}

#[test]
fn mistyped_field_is_a_client_error() {
    let mut desk = RoiDesk::default();
    let response = desk.handle_json(
        r#"{"cmd":"add_period","label":"Period 1","card_volume":1000.0,"card_count":-3,
            "debit_volume":1000.0,"debit_count":10,"card_rate_percent":3.2,
            "convenience_fee_percent":2.5}"#,
    );
    assert!(matches!(response, DeskResponse::ClientError { .. }), "got {response:?}");
}

#[test]
fn unknown_command_is_a_client_error() {
    let mut desk = RoiDesk::default();
    let json = serde_json::to_value(desk.handle_json(r#"{"cmd":"launch"}"#)).unwrap();
    assert_eq!(json["status"], "client_error");
    assert!(json["detail"].as_str().unwrap().contains("Malformed input"));
}

#[test]
fn report_serializes_results_alerts_and_cursor() {
    let mut desk = desk_with(2);
    desk.seek(2);
    let json = serde_json::to_value(desk.handle_json(r#"{"cmd":"get_roi"}"#)).unwrap();

    assert_eq!(json["status"], "report");
    assert_eq!(json["current_period"], 2);
    assert_eq!(json["results"].as_array().unwrap().len(), 3);
    assert_eq!(json["results"][0]["period"], "Period 0");
    assert!(json["results"][1]["raw_numbers"]["card_fee_savings"].is_number());
    assert!(!json["alerts"].as_array().unwrap().is_empty());
    assert_eq!(json["trajectory"]["verdict"], "projected");
}

#[test]
fn quit_outside_a_session_is_a_client_error() {
    let mut desk = desk_with(1);
    let response = desk.handle_json(r#"{"cmd":"quit"}"#);

    assert!(matches!(response, DeskResponse::ClientError { .. }), "got {response:?}");
    assert_eq!(desk.engine().len(), 1);
}
