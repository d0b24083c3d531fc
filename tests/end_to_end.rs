mod common;

use common::{StubApi, StubRequest, TestEnv};
use predicates::prelude::*;
use serde_json::{Value, json};

const TOKEN: &str = "stub-token";

fn unauthenticated() -> Value {
    json!({
        "data": null,
        "errors": [{"message": "Unauthorized", "extensions": {"code": "UNAUTHENTICATED"}}]
    })
}

/// CRM backend that issues TOKEN on login and only accepts it afterwards.
fn crm_backend() -> StubApi {
    StubApi::start(|req: &StubRequest| {
        let query = req.query();
        if query.contains("login(") {
            return json!({"data": {"login": {"accessToken": TOKEN}}});
        }
        if req.header("authorization") != Some("Bearer stub-token") {
            return unauthenticated();
        }
        if query.contains("companies(") {
            json!({"data": {"companies": {"totalCount": 3, "nodes": [
                {"id": "1", "name": "Dunder Mifflin", "salesOwner": {"id": "9", "name": "Michael Scott"}},
                {"id": "2", "name": "Staples"}
            ]}}})
        } else if query.contains("createOneCompany") {
            let company = &req.body["variables"]["input"]["company"];
            json!({"data": {"createOneCompany": {"id": "77", "name": company["name"]}}})
        } else if query.contains("tasks(") {
            json!({"data": {"tasks": {"totalCount": 2, "nodes": [
                {"id": "10", "title": "Order toner", "stage": {"id": "1", "title": "TODO"}},
                {"id": "11", "title": "Plan party"}
            ]}}})
        } else if query.contains("users(") {
            json!({"data": {"users": {"totalCount": 1, "nodes": [{"id": "9", "name": "Michael Scott"}]}}})
        } else if query.contains("me") {
            json!({"data": {"me": {
                "id": "9",
                "name": "Michael Scott",
                "email": "michael.scott@dundermifflin.com",
                "jobTitle": "Regional Manager"
            }}})
        } else {
            json!({"data": {"echo": req.body["variables"].clone()}})
        }
    })
}

// --- session lifecycle ---

#[test]
fn login_check_whoami_logout_cycle() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);

    env.cmd()
        .args(["login", "--email", "michael.scott@dundermifflin.com", "--password", "demodemo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"));
    assert_eq!(env.stored_token().as_deref(), Some(TOKEN));

    env.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Authenticated"));

    env.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Michael Scott"))
        .stdout(predicate::str::contains("Regional Manager"));

    env.cmd().arg("logout").assert().success();
    assert_eq!(env.stored_token(), None);

    env.cmd()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Not authenticated"));
}

#[test]
fn login_sends_email_only_with_required_headers() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);

    env.cmd()
        .args(["login", "--email", "pam@dundermifflin.com", "--password", "secret"])
        .assert()
        .success();

    let login = &api.requests()[0];
    assert_eq!(login.body["variables"], json!({"email": "pam@dundermifflin.com"}));
    assert!(!login.body.to_string().contains("secret"));
    assert_eq!(login.header("content-type"), Some("application/json"));
    assert_eq!(login.header("apollo-require-preflight"), Some("true"));
    assert_eq!(login.header("authorization"), None);
}

#[test]
fn login_json_reports_redirect() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);

    let output = env.cmd_json().arg("login").output().unwrap();

    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response, json!({"success": true, "redirectTo": "/"}));
}

#[test]
fn login_graphql_error_fails_without_storing_token() {
    let api = StubApi::start(|_| {
        json!({"errors": [{"message": "User not found", "extensions": {"code": "NOT_FOUND"}}]})
    });
    let env = TestEnv::with_api(&api.url);

    let output = env.cmd_json().arg("login").output().unwrap();

    assert!(!output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        response,
        json!({
            "success": false,
            "error": {"message": "User not found", "name": "Invalid email or password"}
        })
    );
    assert_eq!(env.stored_token(), None);
}

#[test]
fn whoami_without_token_sends_no_authorization() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);

    env.cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load identity"));

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("authorization"), None);
}

#[test]
fn api_url_from_config_file() {
    let api = crm_backend();
    let env = TestEnv::with_api("unused");
    env.store_token(TOKEN);
    let config_dir = env.config_home().join("crmc");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!("api_url = \"{}\"\n", api.url),
    )
    .unwrap();

    env.bare_cmd().arg("check").assert().success();
    assert_eq!(api.requests().len(), 1);
}

// --- resources ---

#[test]
fn companies_list_shows_rows_and_totals() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);
    env.store_token(TOKEN);

    env.cmd()
        .args(["companies", "list", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dunder Mifflin (Michael Scott)"))
        .stdout(predicate::str::contains("Staples"))
        .stdout(predicate::str::contains("(2 of 3 shown)"));

    assert_eq!(
        api.requests()[0].body["variables"]["paging"],
        json!({"limit": 2, "offset": 0})
    );
}

#[test]
fn companies_create_json() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);
    env.store_token(TOKEN);

    let output = env
        .cmd_json()
        .args(["companies", "create", "--name", "Prince Paper", "--sales-owner", "9"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let company: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(company["id"], "77");
    assert_eq!(company["name"], "Prince Paper");
}

#[test]
fn tasks_by_stage_json_groups_unassigned_first() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);
    env.store_token(TOKEN);

    let output = env
        .cmd_json()
        .args(["tasks", "list", "--by-stage"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let columns: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0]["stage"], "unassigned");
    assert_eq!(columns[0]["tasks"][0]["title"], "Plan party");
    assert_eq!(columns[1]["stage"], "TODO");
}

#[test]
fn users_list_shows_names() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);
    env.store_token(TOKEN);

    env.cmd()
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9 Michael Scott"));
}

#[test]
fn query_prints_data_with_variables() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);
    env.store_token(TOKEN);

    let output = env
        .cmd()
        .args(["query", "query Echo { echo }", "--variables", r#"{"x": 1}"#])
        .output()
        .unwrap();

    assert!(output.status.success());
    let data: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data, json!({"echo": {"x": 1}}));
}

#[test]
fn rejected_token_clears_session() {
    let api = crm_backend();
    let env = TestEnv::with_api(&api.url);
    env.store_token("stale-token");

    env.cmd()
        .args(["companies", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired"));

    assert_eq!(env.stored_token(), None);
    assert_eq!(
        api.requests()[0].header("authorization"),
        Some("Bearer stale-token")
    );
}
