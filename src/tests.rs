#[cfg(test)]
mod integration_tests {
    use crate::test_utils::test_utils::{login, setup_test_app};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;
    use serde_json::json;

    /// Id of the seeded employee record, looked up through the API
    async fn seeded_employee_id(server: &TestServer, staff_token: &str) -> i64 {
        let response = server
            .get("/api/v1/employees")
            .authorization_bearer(staff_token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["email"] == "eve@example.com")
            .expect("seeded employee present")["id"]
            .as_i64()
            .unwrap()
    }

    fn decimal(value: &serde_json::Value) -> Decimal {
        value
            .as_str()
            .unwrap_or_else(|| panic!("expected decimal string, got {}", value))
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "hr", "password": "hr123"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["role"], "HR");
        assert!(body["data"]["token"].as_str().unwrap().len() > 20);

        // Wrong password and unknown user both come back as the same 401
        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "hr", "password": "wrong"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "invalid_credentials");

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "nobody", "password": "hr123"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_routes_require_session() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/dashboard").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/v1/dashboard")
            .authorization_bearer("not-a-real-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_acknowledges_session() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "emp", "emp123").await;

        let response = server
            .post("/api/v1/auth/logout")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Logged out");
    }

    #[tokio::test]
    async fn test_department_create_list_delete() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "admin", "admin123").await;

        let response = server
            .post("/api/v1/departments")
            .authorization_bearer(&token)
            .json(&json!({"name": "Finance"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Department added");
        let dept_id = body["data"]["id"].as_i64().unwrap();

        // Listing is ordered by name
        let response = server
            .get("/api/v1/departments")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Engineering", "Finance"]);

        // An empty department can be deleted
        let response = server
            .delete(&format!("/api/v1/departments/{}", dept_id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .delete(&format!("/api/v1/departments/{}", dept_id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_department_duplicate_name_conflicts() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "hr", "hr123").await;

        let response = server
            .post("/api/v1/departments")
            .authorization_bearer(&token)
            .json(&json!({"name": "Engineering"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "conflict");
    }

    #[tokio::test]
    async fn test_department_with_employees_cannot_be_deleted() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "admin", "admin123").await;

        // The seeded employee belongs to Engineering
        let response = server
            .get("/api/v1/departments")
            .authorization_bearer(&token)
            .await;
        let body: serde_json::Value = response.json();
        let engineering = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["name"] == "Engineering")
            .unwrap()["id"]
            .as_i64()
            .unwrap();

        let response = server
            .delete(&format!("/api/v1/departments/{}", engineering))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_department_blank_name_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "admin", "admin123").await;

        let response = server
            .post("/api/v1/departments")
            .authorization_bearer(&token)
            .json(&json!({"name": ""}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/v1/departments")
            .authorization_bearer(&token)
            .json(&json!({"name": "   "}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_employee_role_cannot_manage_directory() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;
        let hr_token = login(&server, "hr", "hr123").await;

        let response = server
            .post("/api/v1/departments")
            .authorization_bearer(&emp_token)
            .json(&json!({"name": "Shadow"}))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let response = server
            .get("/api/v1/employees")
            .authorization_bearer(&emp_token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        // The refused write must not have landed
        let response = server
            .get("/api/v1/departments")
            .authorization_bearer(&hr_token)
            .await;
        let body: serde_json::Value = response.json();
        assert!(body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|d| d["name"] != "Shadow"));
    }

    #[tokio::test]
    async fn test_employee_create_update_delete() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "hr", "hr123").await;

        let response = server
            .post("/api/v1/employees")
            .authorization_bearer(&token)
            .json(&json!({
                "name": "Bob Builder",
                "email": "bob@example.com",
                "position": "Technician",
                "salary": "18000"
            }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Employee added");
        let bob_id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(decimal(&body["data"]["salary"]), Decimal::new(18_000, 0));
        assert!(body["data"]["department_name"].is_null());

        // Partial update leaves missing fields alone
        let response = server
            .put(&format!("/api/v1/employees/{}", bob_id))
            .authorization_bearer(&token)
            .json(&json!({"position": "Senior Technician"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["position"], "Senior Technician");
        assert_eq!(body["data"]["name"], "Bob Builder");

        let response = server
            .delete(&format!("/api/v1/employees/{}", bob_id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .delete(&format!("/api/v1/employees/{}", bob_id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_employee_invalid_email_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "hr", "hr123").await;

        let response = server
            .post("/api/v1/employees")
            .authorization_bearer(&token)
            .json(&json!({"name": "Bad Email", "email": "not-an-email"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_attendance_upsert_keeps_latest_status() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "admin", "admin123").await;
        let emp_id = seeded_employee_id(&server, &token).await;

        let response = server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({
                "employee_id": emp_id,
                "date": "2025-03-10",
                "status": "Present"
            }))
            .await;
        response.assert_status(StatusCode::OK);

        // Second mark for the same day replaces, it does not duplicate
        let response = server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({
                "employee_id": emp_id,
                "date": "2025-03-10",
                "status": "Absent"
            }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "Absent");

        let response = server
            .get("/api/v1/attendance")
            .authorization_bearer(&token)
            .await;
        let body: serde_json::Value = response.json();
        let for_day: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|r| r["date"] == "2025-03-10")
            .collect();
        assert_eq!(for_day.len(), 1);
        assert_eq!(for_day[0]["status"], "Absent");
    }

    #[tokio::test]
    async fn test_attendance_rejects_bad_input() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "hr", "hr123").await;
        let emp_id = seeded_employee_id(&server, &token).await;

        // Unknown status word
        let response = server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({"employee_id": emp_id, "status": "Late"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Staff must say which employee
        let response = server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({"status": "Present"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Unknown employee
        let response = server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({"employee_id": 9999, "status": "Present"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attendance_employee_marks_self_only() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let staff_token = login(&server, "hr", "hr123").await;
        let emp_token = login(&server, "emp", "emp123").await;
        let own_id = seeded_employee_id(&server, &staff_token).await;

        // A second employee the actor must never see
        let response = server
            .post("/api/v1/employees")
            .authorization_bearer(&staff_token)
            .json(&json!({"name": "Other One", "email": "other@example.com"}))
            .await;
        let other_id = response.json::<serde_json::Value>()["data"]["id"]
            .as_i64()
            .unwrap();
        server
            .post("/api/v1/attendance")
            .authorization_bearer(&staff_token)
            .json(&json!({
                "employee_id": other_id,
                "date": "2025-03-11",
                "status": "Present"
            }))
            .await
            .assert_status(StatusCode::OK);

        // EMPLOYEE marks without naming a target; a smuggled foreign
        // employee_id is ignored
        let response = server
            .post("/api/v1/attendance")
            .authorization_bearer(&emp_token)
            .json(&json!({
                "employee_id": other_id,
                "date": "2025-03-12",
                "status": "Present"
            }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["employee_id"].as_i64().unwrap(), own_id);

        // And the listing shows own rows only
        let response = server
            .get("/api/v1/attendance")
            .authorization_bearer(&emp_token)
            .await;
        let body: serde_json::Value = response.json();
        let rows = body["data"].as_array().unwrap();
        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .all(|r| r["employee_id"].as_i64().unwrap() == own_id));
    }

    #[tokio::test]
    async fn test_leave_lifecycle() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;
        let hr_token = login(&server, "hr", "hr123").await;

        // Submission always lands as Pending
        let response = server
            .post("/api/v1/leaves")
            .authorization_bearer(&emp_token)
            .json(&json!({"start_date": "2025-04-01", "end_date": "2025-04-03"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "Pending");
        let leave_id = body["data"]["id"].as_i64().unwrap();

        // HR approves
        let response = server
            .post(&format!("/api/v1/leaves/{}/Approved", leave_id))
            .authorization_bearer(&hr_token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "Approved");

        // A settled request cannot be acted on again
        let response = server
            .post(&format!("/api/v1/leaves/{}/Rejected", leave_id))
            .authorization_bearer(&hr_token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "invalid_action");
    }

    #[tokio::test]
    async fn test_leave_invalid_submissions_and_actions() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;
        let hr_token = login(&server, "hr", "hr123").await;
        let admin_token = login(&server, "admin", "admin123").await;

        // Only EMPLOYEE accounts submit leave
        let response = server
            .post("/api/v1/leaves")
            .authorization_bearer(&admin_token)
            .json(&json!({"start_date": "2025-04-01", "end_date": "2025-04-02"}))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        // Reversed range
        let response = server
            .post("/api/v1/leaves")
            .authorization_bearer(&emp_token)
            .json(&json!({"start_date": "2025-04-05", "end_date": "2025-04-01"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Only Approved/Rejected are actions
        let response = server
            .post("/api/v1/leaves")
            .authorization_bearer(&emp_token)
            .json(&json!({"start_date": "2025-04-01", "end_date": "2025-04-02"}))
            .await;
        let leave_id = response.json::<serde_json::Value>()["data"]["id"]
            .as_i64()
            .unwrap();
        let response = server
            .post(&format!("/api/v1/leaves/{}/Cancelled", leave_id))
            .authorization_bearer(&hr_token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Unknown leave id
        let response = server
            .post("/api/v1/leaves/9999/Approved")
            .authorization_bearer(&hr_token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        // EMPLOYEE cannot decide leaves
        let response = server
            .post(&format!("/api/v1/leaves/{}/Approved", leave_id))
            .authorization_bearer(&emp_token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_leave_listing_is_scoped() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;
        let hr_token = login(&server, "hr", "hr123").await;

        server
            .post("/api/v1/leaves")
            .authorization_bearer(&emp_token)
            .json(&json!({"start_date": "2025-05-01", "end_date": "2025-05-02"}))
            .await
            .assert_status(StatusCode::OK);

        // Staff see every request with the employee name joined
        let response = server
            .get("/api/v1/leaves")
            .authorization_bearer(&hr_token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["employee_name"], "Eve Engineer");

        // The employee sees their own
        let response = server
            .get("/api/v1/leaves")
            .authorization_bearer(&emp_token)
            .await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_payroll_formula_with_absence_deduction() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "admin", "admin123").await;
        let emp_id = seeded_employee_id(&server, &token).await;

        // Three absences inside the period
        for day in ["2025-01-07", "2025-01-14", "2025-01-21"] {
            server
                .post("/api/v1/attendance")
                .authorization_bearer(&token)
                .json(&json!({"employee_id": emp_id, "date": day, "status": "Absent"}))
                .await
                .assert_status(StatusCode::OK);
        }
        // A Present day must not count as an absence
        server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({"employee_id": emp_id, "date": "2025-01-08", "status": "Present"}))
            .await
            .assert_status(StatusCode::OK);

        // 30000 basic, 3 absences at 1000/day, 500 manual, 200 bonus
        let response = server
            .post("/api/v1/payroll")
            .authorization_bearer(&token)
            .json(&json!({
                "employee_id": emp_id,
                "period_start": "2025-01-01",
                "period_end": "2025-01-31",
                "deductions": "500",
                "bonuses": "200"
            }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(decimal(&body["data"]["basic_salary"]), Decimal::new(30_000, 0));
        assert_eq!(decimal(&body["data"]["deductions"]), Decimal::new(3_500, 0));
        assert_eq!(decimal(&body["data"]["bonuses"]), Decimal::new(200, 0));
        assert_eq!(decimal(&body["data"]["net_salary"]), Decimal::new(26_700, 0));
    }

    #[tokio::test]
    async fn test_payroll_regeneration_overwrites_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "hr", "hr123").await;
        let emp_id = seeded_employee_id(&server, &token).await;

        let period = json!({
            "employee_id": emp_id,
            "period_start": "2025-02-01",
            "period_end": "2025-02-28"
        });

        let mut first = period.clone();
        first["deductions"] = json!("100");
        server
            .post("/api/v1/payroll")
            .authorization_bearer(&token)
            .json(&first)
            .await
            .assert_status(StatusCode::OK);

        let mut second = period.clone();
        second["bonuses"] = json!("1000");
        let response = server
            .post("/api/v1/payroll")
            .authorization_bearer(&token)
            .json(&second)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(decimal(&body["data"]["net_salary"]), Decimal::new(31_000, 0));

        // Still a single record for the period
        let response = server
            .get("/api/v1/payroll")
            .authorization_bearer(&token)
            .await;
        let body: serde_json::Value = response.json();
        let rows: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|r| r["period_start"] == "2025-02-01")
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(decimal(&rows[0]["deductions"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_payroll_unknown_employee_and_role_gate() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let hr_token = login(&server, "hr", "hr123").await;
        let emp_token = login(&server, "emp", "emp123").await;

        let response = server
            .post("/api/v1/payroll")
            .authorization_bearer(&hr_token)
            .json(&json!({
                "employee_id": 9999,
                "period_start": "2025-02-01",
                "period_end": "2025-02-28"
            }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server
            .post("/api/v1/payroll")
            .authorization_bearer(&emp_token)
            .json(&json!({
                "employee_id": 1,
                "period_start": "2025-02-01",
                "period_end": "2025-02-28"
            }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_payslip_access_control() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let staff_token = login(&server, "admin", "admin123").await;
        let emp_token = login(&server, "emp", "emp123").await;
        let own_id = seeded_employee_id(&server, &staff_token).await;

        // Payroll for the linked employee and for a stranger
        let response = server
            .post("/api/v1/employees")
            .authorization_bearer(&staff_token)
            .json(&json!({"name": "Stranger", "email": "stranger@example.com", "salary": "9000"}))
            .await;
        let stranger_id = response.json::<serde_json::Value>()["data"]["id"]
            .as_i64()
            .unwrap();

        let mut own_payroll_id = 0;
        let mut stranger_payroll_id = 0;
        for (target, slot) in [
            (own_id, &mut own_payroll_id),
            (stranger_id, &mut stranger_payroll_id),
        ] {
            let response = server
                .post("/api/v1/payroll")
                .authorization_bearer(&staff_token)
                .json(&json!({
                    "employee_id": target,
                    "period_start": "2025-03-01",
                    "period_end": "2025-03-31"
                }))
                .await;
            response.assert_status(StatusCode::OK);
            *slot = response.json::<serde_json::Value>()["data"]["id"]
                .as_i64()
                .unwrap();
        }

        // Own payslip is visible with the employee details joined
        let response = server
            .get(&format!("/api/v1/payroll/{}/payslip", own_payroll_id))
            .authorization_bearer(&emp_token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["employee_name"], "Eve Engineer");
        assert_eq!(body["data"]["email"], "eve@example.com");

        // Another employee's payslip is not
        let response = server
            .get(&format!("/api/v1/payroll/{}/payslip", stranger_payroll_id))
            .authorization_bearer(&emp_token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        // Staff read any payslip; unknown ids are a 404
        let response = server
            .get(&format!("/api/v1/payroll/{}/payslip", stranger_payroll_id))
            .authorization_bearer(&staff_token)
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/payroll/9999/payslip")
            .authorization_bearer(&staff_token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_payroll_listing_scoped_for_employee() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let staff_token = login(&server, "hr", "hr123").await;
        let emp_token = login(&server, "emp", "emp123").await;
        let own_id = seeded_employee_id(&server, &staff_token).await;

        let response = server
            .post("/api/v1/employees")
            .authorization_bearer(&staff_token)
            .json(&json!({"name": "Second", "email": "second@example.com"}))
            .await;
        let second_id = response.json::<serde_json::Value>()["data"]["id"]
            .as_i64()
            .unwrap();

        for target in [own_id, second_id] {
            server
                .post("/api/v1/payroll")
                .authorization_bearer(&staff_token)
                .json(&json!({
                    "employee_id": target,
                    "period_start": "2025-04-01",
                    "period_end": "2025-04-30"
                }))
                .await
                .assert_status(StatusCode::OK);
        }

        let response = server
            .get("/api/v1/payroll")
            .authorization_bearer(&staff_token)
            .await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let response = server
            .get("/api/v1/payroll")
            .authorization_bearer(&emp_token)
            .await;
        let body: serde_json::Value = response.json();
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["employee_id"].as_i64().unwrap(), own_id);
    }

    #[tokio::test]
    async fn test_reports_require_staff_role() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;

        for path in ["/api/v1/reports/attendance", "/api/v1/reports/payroll"] {
            let response = server.get(path).authorization_bearer(&emp_token).await;
            response.assert_status(StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn test_attendance_report_counts_recent_window() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "hr", "hr123").await;
        let emp_id = seeded_employee_id(&server, &token).await;

        // Today falls inside the report window
        server
            .post("/api/v1/attendance")
            .authorization_bearer(&token)
            .json(&json!({"employee_id": emp_id, "status": "Present"}))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/reports/attendance")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let eve = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["name"] == "Eve Engineer")
            .expect("seeded employee appears in the summary");
        assert_eq!(eve["present_days"].as_i64().unwrap(), 1);
        assert_eq!(eve["absent_days"].as_i64().unwrap(), 0);

        // Second call is served from cache with identical data
        let response = server
            .get("/api/v1/reports/attendance")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let cached: serde_json::Value = response.json();
        assert_eq!(cached["data"], body["data"]);
    }

    #[tokio::test]
    async fn test_payroll_report_lists_generated_records() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let token = login(&server, "admin", "admin123").await;
        let emp_id = seeded_employee_id(&server, &token).await;

        server
            .post("/api/v1/payroll")
            .authorization_bearer(&token)
            .json(&json!({
                "employee_id": emp_id,
                "period_start": "2025-05-01",
                "period_end": "2025-05-31"
            }))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/reports/payroll")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["employee_name"], "Eve Engineer");
        assert_eq!(decimal(&rows[0]["net_salary"]), Decimal::new(30_000, 0));
    }

    #[tokio::test]
    async fn test_profile_read_and_update() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;

        let response = server
            .get("/api/v1/profile")
            .authorization_bearer(&emp_token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["name"], "Eve Engineer");
        assert_eq!(body["data"]["department_name"], "Engineering");

        // Only name and phone are writable
        let response = server
            .put("/api/v1/profile")
            .authorization_bearer(&emp_token)
            .json(&json!({"name": "Eve E.", "phone": "555-0199"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["name"], "Eve E.");
        assert_eq!(body["data"]["phone"], "555-0199");
        assert_eq!(body["data"]["position"], "Engineer");
    }

    #[tokio::test]
    async fn test_profile_requires_linked_employee() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let admin_token = login(&server, "admin", "admin123").await;

        let response = server
            .get("/api/v1/profile")
            .authorization_bearer(&admin_token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "no_linked_employee");

        let response = server
            .put("/api/v1/profile")
            .authorization_bearer(&admin_token)
            .json(&json!({"name": "Nobody"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_rejects_blank_name() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let emp_token = login(&server, "emp", "emp123").await;

        let response = server
            .put("/api/v1/profile")
            .authorization_bearer(&emp_token)
            .json(&json!({"name": "   "}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_counts_and_self_snapshot() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let admin_token = login(&server, "admin", "admin123").await;
        let emp_token = login(&server, "emp", "emp123").await;

        server
            .post("/api/v1/leaves")
            .authorization_bearer(&emp_token)
            .json(&json!({"start_date": "2025-06-01", "end_date": "2025-06-02"}))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/dashboard")
            .authorization_bearer(&admin_token)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["employees"].as_u64().unwrap(), 1);
        assert_eq!(body["data"]["departments"].as_u64().unwrap(), 1);
        assert_eq!(body["data"]["pending_leaves"].as_u64().unwrap(), 1);
        // No employee record linked to the admin account
        assert!(body["data"]["today_status"].is_null());

        // Nothing marked today for the linked employee
        let response = server
            .get("/api/v1/dashboard")
            .authorization_bearer(&emp_token)
            .await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["today_status"], "Not Marked");
        assert!(body["data"]["last_payroll"].is_null());

        // Marking today changes the snapshot
        server
            .post("/api/v1/attendance")
            .authorization_bearer(&emp_token)
            .json(&json!({"status": "Present"}))
            .await
            .assert_status(StatusCode::OK);
        let response = server
            .get("/api/v1/dashboard")
            .authorization_bearer(&emp_token)
            .await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["today_status"], "Present");
    }
}
