mod test_support;

use serde_json::json;
use test_support::{request_err_code, request_ok, screen, spawn_sidecar, spawn_sidecar_with, temp_dir};

#[test]
fn teacher_and_student_codes_resolve_to_their_roles() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let t = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "auth.login",
        json!({ "code": "coddocente2025" }),
    );
    assert_eq!(t["user"]["role"], "teacher");
    assert_eq!(t["user"]["code"], "CODDOCENTE2025");
    assert_eq!(screen(&t), "grades");
    assert!(t["notification"]["title"].is_string());

    let s = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "auth.login",
        json!({ "code": " CODESTUDIANTE2025 " }),
    );
    assert_eq!(s["user"]["role"], "student");
    assert_eq!(s["user"]["grade"], "3ro Secundaria");
    assert_eq!(screen(&s), "assignedProject");
}

#[test]
fn invalid_code_leaves_session_unset() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "1",
        "auth.login",
        json!({ "code": "NOT-A-CODE" }),
    );
    assert_eq!(code, "invalid_code");
    let code = request_err_code(&mut stdin, &mut reader, "2", "auth.login", json!({ "code": "" }));
    assert_eq!(code, "bad_params");
    let code = request_err_code(&mut stdin, &mut reader, "3", "auth.login", json!({}));
    assert_eq!(code, "bad_params");

    let session = request_ok(&mut stdin, &mut reader, "4", "session.get", json!({}));
    assert!(session["user"].is_null());
    assert_eq!(screen(&session), "signedOut");
}

#[test]
fn logout_then_login_again_succeeds() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    request_ok(&mut stdin, &mut reader, "1", "auth.login", json!({ "code": "CODDOCENTE2025" }));
    let out = request_ok(&mut stdin, &mut reader, "2", "auth.logout", json!({}));
    assert_eq!(screen(&out), "signedOut");
    // Logging out twice is fine.
    request_ok(&mut stdin, &mut reader, "3", "auth.logout", json!({}));
    let again = request_ok(&mut stdin, &mut reader, "4", "auth.login", json!({ "code": "CODDOCENTE2025" }));
    assert_eq!(again["user"]["role"], "teacher");
}

#[test]
fn custom_credentials_file_replaces_bundled_table() {
    let dir = temp_dir("yatina-credentials");
    let path = dir.join("credentials.json");
    std::fs::write(
        &path,
        r#"{ "teachers": [{ "code": "ZZZ1", "displayName": "Prof. Z" }], "students": [] }"#,
    )
    .expect("write credentials");

    let (_child, mut stdin, mut reader) =
        spawn_sidecar_with(&["--credentials", path.to_str().expect("utf8 path")]);
    let ok = request_ok(&mut stdin, &mut reader, "1", "auth.login", json!({ "code": "zzz1" }));
    assert_eq!(ok["user"]["displayName"], "Prof. Z");
    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "2",
        "auth.login",
        json!({ "code": "CODDOCENTE2025" }),
    );
    assert_eq!(code, "invalid_code");
}
