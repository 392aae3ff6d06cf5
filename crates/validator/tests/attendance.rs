//! End-to-end test of a realistic request validator: submitting a batch
//! of daily attendance records.
//!
//! Exercises the whole surface at once: date parsing, enum membership,
//! alphanumeric content, required/optional presence, array-of-object
//! composition, existence checks against a store fake, and custom
//! wildcard-addressed messages.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

use skema_validator::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// Store fake: a couple of known classes and students.
struct School;

#[async_trait]
impl ExistenceLookup for School {
    async fn exists(
        &self,
        collection: &str,
        column: &str,
        value: &str,
    ) -> Result<bool, LookupError> {
        let rows: &[&str] = match collection {
            "academic.classes" => &["class-7a", "class-7b"],
            "academic.students" => &["student-1", "student-2"],
            _ => &[],
        };
        Ok(column == "id" && rows.contains(&value))
    }
}

fn attendance_schema() -> Schema {
    Schema::new(object().field(
        "dailyAttendance",
        array(
            object()
                .field("date_in", date("yyyy-MM-dd HH:mm:ss"))
                .field("date_out", date("yyyy-MM-dd HH:mm:ss").optional())
                .field("status", one_of(["present", "absent", "permission", "sick"]))
                .field(
                    "description",
                    string().optional().rule(alpha_numeric().allow(' ')),
                )
                .field("classId", string().rule(exists("academic.classes", "id")))
                .field("studentId", string().rule(exists("academic.students", "id"))),
        ),
    ))
}

fn attendance_validator() -> Validator {
    Validator::new(attendance_schema()).with_messages(
        CustomMessages::new()
            .add(
                "dailyAttendance.*.status.enum",
                "Status must be one of 'present', 'absent', 'permission', 'sick'",
            )
            .add(
                "dailyAttendance.*.date_in.date",
                "date_in must use the 'yyyy-MM-dd HH:mm:ss' format",
            )
            .add(
                "dailyAttendance.*.date_out.date",
                "date_out must use the 'yyyy-MM-dd HH:mm:ss' format",
            ),
    )
}

fn valid_record() -> serde_json::Value {
    json!({
        "date_in": "2024-01-15 08:30:00",
        "date_out": "2024-01-15 14:00:00",
        "status": "present",
        "description": "Morning roll call 1",
        "classId": "class-7a",
        "studentId": "student-1",
    })
}

// ============================================================================
// HAPPY PATH
// ============================================================================

#[tokio::test]
async fn valid_batch_passes_and_normalizes() {
    let validator = attendance_validator();
    let payload = json!({ "dailyAttendance": [valid_record(), valid_record()] });

    let data = validator.validate(&payload, &School).await.unwrap();
    let records = data.get("dailyAttendance").and_then(Validated::as_array).unwrap();
    assert_eq!(records.len(), 2);

    let record = &records[0];
    // Dates are parsed values, everything else is preserved.
    let date_in = record.get("date_in").and_then(Validated::as_datetime).unwrap();
    assert_eq!(date_in.to_string(), "2024-01-15 08:30:00");
    assert_eq!(record.get("status").and_then(Validated::as_str), Some("present"));
    assert_eq!(
        record.get("description").and_then(Validated::as_str),
        Some("Morning roll call 1")
    );
}

#[tokio::test]
async fn optional_fields_may_be_absent() {
    let validator = attendance_validator();
    let payload = json!({
        "dailyAttendance": [{
            "date_in": "2024-01-15 08:30:00",
            "status": "sick",
            "classId": "class-7b",
            "studentId": "student-2",
        }]
    });

    let data = validator.validate(&payload, &School).await.unwrap();
    let record = data.get("dailyAttendance").and_then(|v| v.at(0)).unwrap();
    assert_eq!(record.get("date_out"), None);
    assert_eq!(record.get("description"), None);
}

#[tokio::test]
async fn undeclared_keys_are_tolerated() {
    let validator = attendance_validator();
    let mut record = valid_record();
    record["deviceId"] = json!("tablet-3");
    let payload = json!({ "dailyAttendance": [record] });

    let data = validator.validate(&payload, &School).await.unwrap();
    let record = data.get("dailyAttendance").and_then(|v| v.at(0)).unwrap();
    assert_eq!(record.get("deviceId"), None);
}

// ============================================================================
// FAILURES
// ============================================================================

#[tokio::test]
async fn unknown_status_resolves_custom_wildcard_message() {
    let validator = attendance_validator();
    let mut record = valid_record();
    record["status"] = json!("late");
    let payload = json!({ "dailyAttendance": [valid_record(), record] });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    assert_eq!(errors.len(), 1);

    let error = errors.first().unwrap();
    assert_eq!(error.path.to_string(), "dailyAttendance.1.status");
    assert_eq!(error.rule, "enum");
    assert_eq!(error.code, ErrorCode::NotInEnum);
    assert_eq!(
        error.message,
        "Status must be one of 'present', 'absent', 'permission', 'sick'"
    );
}

#[tokio::test]
async fn bad_date_format_resolves_custom_message() {
    let validator = attendance_validator();
    let mut record = valid_record();
    record["date_in"] = json!("15/01/2024");
    let payload = json!({ "dailyAttendance": [record] });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    let error = errors.first().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
    assert_eq!(error.message, "date_in must use the 'yyyy-MM-dd HH:mm:ss' format");
}

#[tokio::test]
async fn every_invalid_element_is_reported() {
    let validator = attendance_validator();
    let mut bad_date = valid_record();
    bad_date["date_in"] = json!("yesterday");
    let mut bad_status = valid_record();
    bad_status["status"] = json!("late");

    let payload = json!({ "dailyAttendance": [bad_date, valid_record(), bad_status] });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    let paths: Vec<_> = errors.errors().iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        vec!["dailyAttendance.0.date_in", "dailyAttendance.2.status"]
    );
}

#[tokio::test]
async fn sibling_fields_fail_independently() {
    let validator = attendance_validator();
    let payload = json!({
        "dailyAttendance": [{
            // date_in missing, status invalid, studentId unknown
            "status": "late",
            "description": "ok text",
            "classId": "class-7a",
            "studentId": "student-99",
        }]
    });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    let reported: Vec<_> = errors
        .errors()
        .iter()
        .map(|e| (e.path.to_string(), e.code))
        .collect();
    assert_eq!(
        reported,
        vec![
            ("dailyAttendance.0.date_in".to_string(), ErrorCode::Required),
            ("dailyAttendance.0.status".to_string(), ErrorCode::NotInEnum),
            ("dailyAttendance.0.studentId".to_string(), ErrorCode::NotFound),
        ]
    );
}

#[tokio::test]
async fn description_rejects_punctuation() {
    let validator = attendance_validator();
    let mut record = valid_record();
    record["description"] = json!("late-arrival!");
    let payload = json!({ "dailyAttendance": [record] });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    let error = errors.first().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidCharacters);
    assert_eq!(error.rule, "alphaNum");
}

#[tokio::test]
async fn missing_batch_is_required_at_top_level() {
    let validator = attendance_validator();
    let errors = validator.validate(&json!({}), &School).await.unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = errors.first().unwrap();
    assert_eq!(error.path.to_string(), "dailyAttendance");
    assert_eq!(error.code, ErrorCode::Required);
}

#[tokio::test]
async fn unknown_class_fails_not_found() {
    let validator = attendance_validator();
    let mut record = valid_record();
    record["classId"] = json!("class-9z");
    let payload = json!({ "dailyAttendance": [record] });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    let error = errors.first().unwrap();
    assert_eq!(error.path.to_string(), "dailyAttendance.0.classId");
    assert_eq!(error.code, ErrorCode::NotFound);
    assert_eq!(error.param("collection"), Some("academic.classes"));
}

// ============================================================================
// CALLER-FACING ERROR SHAPE
// ============================================================================

#[tokio::test]
async fn error_list_serializes_for_api_responses() {
    let validator = attendance_validator();
    let mut record = valid_record();
    record["status"] = json!("late");
    let payload = json!({ "dailyAttendance": [record] });

    let errors = validator.validate(&payload, &School).await.unwrap_err();
    let body = serde_json::to_value(&errors).unwrap();

    assert_eq!(body[0]["path"], "dailyAttendance.0.status");
    assert_eq!(body[0]["rule"], "enum");
    assert_eq!(body[0]["code"], "not_in_enum");
}
