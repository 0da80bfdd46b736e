/// Integration tests for the Steward API
///
/// Each test drives the real router over a fresh seeded in-memory database:
/// entity round-trips through the camelCase wire shape, uniqueness conflicts,
/// login through both credential paths, reports aggregation, the reset scope,
/// and the backup download guard.
mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_health_reports_engine() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"], "sqlite");
}

#[tokio::test]
async fn test_donation_round_trip() {
    let ctx = TestContext::new().await.unwrap();

    let (status, created) = ctx
        .post(
            "/api/donations",
            json!({
                "donorName": "Jane Smith",
                "amount": 125.50,
                "date": "2024-03-10",
                "category": "Tithe",
                "serviceTime": "First Service",
                "reference": "CHK-1001"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["donorName"], "Jane Smith");
    assert_eq!(created["serviceTime"], "First Service");
    // snake_case must not leak onto the wire
    assert!(created.get("donor_name").is_none());

    let (status, listing) = ctx.get("/api/donations").await;
    assert_eq!(status, StatusCode::OK);
    let listing = listing.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["id"], id.as_str());

    let (status, updated) = ctx
        .put(
            "/api/donations",
            json!({
                "id": id,
                "donorName": "Jane Smith",
                "amount": 150.0,
                "date": "2024-03-10",
                "category": "Offering"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"], 150.0);
    assert_eq!(updated["category"], "Offering");

    let (status, _) = ctx.delete(&format!("/api/donations?id={id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = ctx.get("/api/donations").await;
    assert!(listing.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_id_succeeds_silently() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.delete("/api/members?id=no-such-row").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_duplicate_lookup_label_conflicts() {
    let ctx = TestContext::new().await.unwrap();

    // "Tithe" is part of the seed data
    let (status, body) = ctx
        .post("/api/donation-categories", json!({ "name": "Tithe" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, created) = ctx
        .post("/api/donation-categories", json!({ "name": "Building Fund" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Building Fund");
}

#[tokio::test]
async fn test_service_times_use_their_own_label_field() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx
        .post("/api/service-times", json!({ "name": "First Service" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = ctx
        .post("/api/service-times", json!({ "time": "First Service" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["time"], "First Service");

    let (_, listing) = ctx.get("/api/service-times").await;
    assert_eq!(listing.as_array().unwrap()[0]["time"], "First Service");
}

#[tokio::test]
async fn test_member_email_is_validated() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post(
            "/api/members",
            json!({
                "name": "Sam Jones",
                "email": "not-an-email",
                "joinDate": "2024-01-15",
                "network": "Main Campus"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_login_with_seeded_plaintext_credential() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post(
            "/api/auth",
            json!({ "username": "admin", "password": "admin123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "Admin");
    // the credential never leaves the server
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_login_with_hashed_credential() {
    let ctx = TestContext::new().await.unwrap();

    let (status, created) = ctx
        .post(
            "/api/users",
            json!({
                "name": "Clerk",
                "username": "clerk",
                "role": "Staff",
                "password": "letmein42",
                "permissions": { "donations": true }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());

    // stored value must be a bcrypt hash, not the plaintext
    let user = steward_shared::models::user::User::find_by_username(&ctx.db, "clerk")
        .await
        .unwrap()
        .unwrap();
    assert!(user.password.as_deref().unwrap().starts_with("$2"));

    let (status, body) = ctx
        .post(
            "/api/auth",
            json!({ "username": "clerk", "password": "letmein42" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "clerk");
}

#[tokio::test]
async fn test_login_failures() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post(
            "/api/auth",
            json!({ "username": "admin", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("user").is_none());

    let (status, _) = ctx
        .post("/api/auth", json!({ "username": "admin" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .post(
            "/api/auth",
            json!({ "username": "nobody", "password": "whatever" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reports_aggregate_by_category() {
    let ctx = TestContext::new().await.unwrap();

    for (amount, category) in [(100.0, "Tithe"), (200.0, "Offering"), (300.0, "Tithe")] {
        let (status, _) = ctx
            .post(
                "/api/donations",
                json!({
                    "donorName": "Donor",
                    "amount": amount,
                    "date": "2024-05-12",
                    "category": category
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = ctx
        .get("/api/reports?startDate=2024-01-01&endDate=2024-12-31")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalDonations"], 600.0);
    assert_eq!(report["incomeVsExpenses"]["income"], 600.0);

    let by_category = report["donationsByCategory"].as_array().unwrap();
    let amount_for = |name: &str| {
        by_category
            .iter()
            .find(|e| e["name"] == name)
            .map(|e| e["amount"].as_f64().unwrap())
    };
    assert_eq!(amount_for("Tithe"), Some(400.0));
    assert_eq!(amount_for("Offering"), Some(200.0));

    // no service time recorded on any of them
    let by_service = report["donationsByServiceTime"].as_array().unwrap();
    assert_eq!(by_service[0]["name"], "Unknown Service Time");
    assert_eq!(by_service[0]["amount"], 600.0);
}

#[tokio::test]
async fn test_reports_without_dates_include_all_donations() {
    let ctx = TestContext::new().await.unwrap();

    // outside the 2024 default window used by the growth series
    let (status, _) = ctx
        .post(
            "/api/donations",
            json!({
                "donorName": "Donor",
                "amount": 10.0,
                "date": "2026-05-01",
                "category": "Tithe"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, report) = ctx.get("/api/reports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalDonations"], 10.0);

    // the growth series still falls back to its fixed 2024 range
    let growth = report["membershipGrowth"].as_array().unwrap();
    assert_eq!(growth.len(), 12);
    assert_eq!(growth[0]["month"], "Jan 2024");
    assert_eq!(growth[11]["month"], "Dec 2024");
}

#[tokio::test]
async fn test_blank_service_time_is_not_a_filter_option() {
    let ctx = TestContext::new().await.unwrap();

    for (amount, service_time) in [(40.0, Some("First Service")), (60.0, Some("")), (80.0, None)] {
        let (status, _) = ctx
            .post(
                "/api/donations",
                json!({
                    "donorName": "Donor",
                    "amount": amount,
                    "date": "2024-04-07",
                    "category": "Tithe",
                    "serviceTime": service_time
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = ctx
        .get("/api/reports?startDate=2024-01-01&endDate=2024-12-31")
        .await;
    assert_eq!(status, StatusCode::OK);

    // blank and missing service times never surface as filter choices
    assert_eq!(
        report["serviceTimes"].as_array().unwrap(),
        &vec![json!("First Service")]
    );

    // but their amounts still land in the unknown bucket
    let by_service = report["donationsByServiceTime"].as_array().unwrap();
    let amount_for = |name: &str| {
        by_service
            .iter()
            .find(|e| e["name"] == name)
            .map(|e| e["amount"].as_f64().unwrap())
    };
    assert_eq!(amount_for("First Service"), Some(40.0));
    assert_eq!(amount_for("Unknown Service Time"), Some(140.0));
}

#[tokio::test]
async fn test_reports_membership_growth_series() {
    let ctx = TestContext::new().await.unwrap();

    for (email, join_date) in [
        ("a@example.com", "2024-01-10"),
        ("b@example.com", "2024-02-05"),
        ("c@example.com", "2024-02-20"),
    ] {
        let (status, _) = ctx
            .post(
                "/api/members",
                json!({
                    "name": "Member",
                    "email": email,
                    "joinDate": join_date,
                    "network": "Main Campus"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = ctx
        .get("/api/reports?startDate=2024-01-01&endDate=2024-02-28")
        .await;
    assert_eq!(status, StatusCode::OK);

    let growth = report["membershipGrowth"].as_array().unwrap();
    assert_eq!(growth.len(), 2);
    assert_eq!(growth[0]["month"], "Jan 2024");
    assert_eq!(growth[0]["newMembers"], 1);
    assert_eq!(growth[0]["totalMembers"], 1);
    assert_eq!(growth[1]["month"], "Feb 2024");
    assert_eq!(growth[1]["newMembers"], 2);
    assert_eq!(growth[1]["totalMembers"], 3);
}

#[tokio::test]
async fn test_reset_wipes_operational_data_only() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx
        .post(
            "/api/members",
            json!({
                "name": "Member",
                "email": "m@example.com",
                "joinDate": "2024-01-15",
                "network": "Main Campus"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = ctx
        .post(
            "/api/donations",
            json!({
                "donorName": "Donor",
                "amount": 10.0,
                "date": "2024-01-20",
                "category": "Tithe"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx
        .send(
            "POST",
            "/api/reset",
            Some(json!({ "confirmReset": true })),
            &[("x-user-id", "admin-1")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, members) = ctx.get("/api/members").await;
    assert!(members.as_array().unwrap().is_empty());
    let (_, donations) = ctx.get("/api/donations").await;
    assert!(donations.as_array().unwrap().is_empty());

    // accounts and settings survive
    let (_, users) = ctx.get("/api/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    let (status, settings) = ctx.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["appName"], "Steward");
}

#[tokio::test]
async fn test_reset_requires_stored_admin_role() {
    let ctx = TestContext::new().await.unwrap();

    let (_, staff) = ctx
        .post(
            "/api/users",
            json!({
                "name": "Clerk",
                "username": "clerk",
                "role": "Staff",
                "password": "pw"
            }),
        )
        .await;
    let staff_id = staff["id"].as_str().unwrap();

    let (status, _) = ctx
        .send(
            "POST",
            "/api/reset",
            Some(json!({ "confirmReset": true })),
            &[("x-user-id", staff_id)],
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .send(
            "POST",
            "/api/reset",
            Some(json!({ "confirmReset": true })),
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .send(
            "POST",
            "/api/reset",
            Some(json!({ "confirmReset": false })),
            &[("x-user-id", "admin-1")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let ctx = TestContext::new().await.unwrap();

    let (status, initial) = ctx.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["theme"], "dark");
    assert_eq!(initial["backupTime"], "02:00");

    let (status, _) = ctx
        .post(
            "/api/settings",
            json!({
                "appName": "Grace Chapel",
                "logoUrl": "/logo.png",
                "theme": "light",
                "backupTime": "03:30",
                "backupEnabled": false
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, saved) = ctx.get("/api/settings").await;
    assert_eq!(saved["appName"], "Grace Chapel");
    assert_eq!(saved["theme"], "light");
    assert_eq!(saved["backupTime"], "03:30");
    assert_eq!(saved["backupEnabled"], false);

    let (status, _) = ctx
        .post(
            "/api/settings",
            json!({
                "appName": "Grace Chapel",
                "logoUrl": "/logo.png",
                "theme": "blue",
                "backupTime": "03:30",
                "backupEnabled": true
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .post(
            "/api/settings",
            json!({
                "appName": "Grace Chapel",
                "logoUrl": "/logo.png",
                "theme": "light",
                "backupTime": "25:00",
                "backupEnabled": true
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_backup_download_rejects_bad_filenames() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx.get("/api/backup/download/database.sqlite").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .get("/api/backup/download/backup-missing-artifact.db")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seeded_lookups_and_resources_are_listed() {
    let ctx = TestContext::new().await.unwrap();

    let (status, categories) = ctx.get("/api/donation-categories").await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(labels.contains(&"Tithe"));
    assert!(labels.contains(&"Offering"));

    let (status, resources) = ctx.get("/api/resources").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resources.as_array().unwrap().len(), 3);
}
