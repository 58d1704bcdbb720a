mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_course, create_student, create_teacher, filter_body, post_empty, post_json,
    setup_test_app, status_codes,
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Backend is running!");
}

#[tokio::test]
async fn test_upsert_course_inserts_and_updates() {
    let app = setup_test_app();

    let (status, body) = post_json(
        &app,
        "/course/upsert",
        json!({"code": "MAT-101", "title": "Mathematics", "year": 2025}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!([]));
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["code"], "MAT-101");
    assert!(body["data"]["teacher"].is_null());
    assert_eq!(body["data"]["students"], json!([]));

    let (status, body) = post_json(
        &app,
        "/course/upsert",
        json!({"id": id, "code": "MAT-101", "title": "Linear Algebra", "year": 2026}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["title"], "Linear Algebra");
    assert_eq!(body["data"]["year"], 2026);
}

#[tokio::test]
async fn test_upsert_keeps_existing_links() {
    let app = setup_test_app();
    let course = create_course(&app, "PHY-1", "Physics").await;
    let teacher = create_teacher(&app, "Marie", "Curie").await;
    post_json(
        &app,
        "/associateTeacherToCourse",
        json!({"idCourse": course, "idTeacher": teacher}),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/course/upsert",
        json!({"id": course, "code": "PHY-1", "title": "Physics I", "teacher": null}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["teacher"]["id"], teacher);
}

#[tokio::test]
async fn test_upsert_course_missing_body() {
    let app = setup_test_app();

    let (status, body) = post_empty(&app, "/course/upsert").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"].is_null());
    assert_eq!(status_codes(&body), vec!["COURSE_MISSING"]);
    assert_eq!(body["status"][0]["message"], "Course is missing or incomplete!");
    assert_eq!(body["status"][0]["action"], "Enter all required data");
    assert_eq!(body["status"][0]["severity"], "ERROR");
    assert!(body["status"][0]["traceId"].as_str().is_some());
}

#[tokio::test]
async fn test_upsert_course_incomplete() {
    let app = setup_test_app();

    let (status, body) = post_json(&app, "/course/upsert", json!({"code": "  ", "title": "X"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(status_codes(&body), vec!["COURSE_MISSING"]);
}

#[tokio::test]
async fn test_get_course_with_links() {
    let app = setup_test_app();
    let course = create_course(&app, "BIO-2", "Biology").await;
    let student = create_student(&app, "Rosalind", "Franklin").await;
    post_json(
        &app,
        "/associateStudentToCourse",
        json!({"idCourse": course, "idStudent": student}),
    )
    .await;

    let (status, body) = post_json(&app, "/course/get", json!({"id": course})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"][0]["id"], student);
    assert_eq!(body["data"]["students"][0]["firstName"], "Rosalind");
}

#[tokio::test]
async fn test_get_course_missing_and_not_found() {
    let app = setup_test_app();

    let (status, body) = post_json(&app, "/course/get", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(status_codes(&body), vec!["COURSE_MISSING"]);

    let (status, body) = post_json(&app, "/course/get", json!({"id": 999})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(status_codes(&body), vec!["COURSE_NOT_FOUND"]);
    assert_eq!(body["status"][0]["message"], "Course id has not been found.");
}

#[tokio::test]
async fn test_delete_course() {
    let app = setup_test_app();
    let course = create_course(&app, "ART-1", "Art").await;

    let (status, body) = post_json(&app, "/course/delete", json!({"id": course})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());
    assert_eq!(body["status"], json!([]));

    let (status, body) = post_json(&app, "/course/get", json!({"id": course})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(status_codes(&body), vec!["COURSE_NOT_FOUND"]);
}

#[tokio::test]
async fn test_delete_course_with_teacher_not_allowed() {
    let app = setup_test_app();
    let course = create_course(&app, "CHE-1", "Chemistry").await;
    let teacher = create_teacher(&app, "Linus", "Pauling").await;
    post_json(
        &app,
        "/associateTeacherToCourse",
        json!({"idCourse": course, "idTeacher": teacher}),
    )
    .await;

    let (status, body) = post_json(&app, "/course/delete", json!({"id": course})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(status_codes(&body), vec!["DELETE_COURSE_NOT_ALLOWED"]);

    let (status, body) = post_json(&app, "/course/get", json!({"id": course})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["teacher"]["id"], teacher);
}

#[tokio::test]
async fn test_delete_course_with_students_not_allowed() {
    let app = setup_test_app();
    let course = create_course(&app, "HIS-1", "History").await;
    let student = create_student(&app, "Ada", "Lovelace").await;
    post_json(
        &app,
        "/associateStudentToCourse",
        json!({"idCourse": course, "idStudent": student}),
    )
    .await;

    let (status, body) = post_json(&app, "/course/delete", json!({"id": course})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(status_codes(&body), vec!["DELETE_COURSE_NOT_ALLOWED"]);
    assert_eq!(
        body["status"][0]["action"],
        "Remove relationships to delete the course"
    );
}

#[tokio::test]
async fn test_filter_empty_store() {
    let app = setup_test_app();

    let (status, body) = post_json(&app, "/course/filter", filter_body("", 0, 20)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slice"]["content"], json!([]));
    assert_eq!(body["slice"]["hasNext"], false);
    assert_eq!(body["slice"]["pageNumber"], 0);
    assert_eq!(body["slice"]["pageSize"], 20);
}

#[tokio::test]
async fn test_filter_by_substring() {
    let app = setup_test_app();
    create_course(&app, "MAT-101", "math basics").await;
    create_course(&app, "ENG-1", "English").await;
    create_course(&app, "STA-1", "Applied mathematics").await;
    create_course(&app, "MAT-2", "Mathematics").await;

    let (status, body) = post_json(&app, "/course/filter", filter_body("math", 0, 20)).await;

    assert_eq!(status, StatusCode::OK);
    let content = body["slice"]["content"].as_array().unwrap();
    let titles: Vec<_> = content.iter().map(|c| c["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["math basics", "Applied mathematics"]);
    for course in content {
        let fields = [&course["code"], &course["title"], &course["description"]];
        assert!(
            fields
                .iter()
                .any(|f| f.as_str().is_some_and(|s| s.contains("math")))
        );
    }
}

#[tokio::test]
async fn test_filter_is_case_sensitive() {
    let app = setup_test_app();
    create_course(&app, "GEO-1", "Geography").await;

    let (_, body) = post_json(&app, "/course/filter", filter_body("geo", 0, 20)).await;
    assert_eq!(body["slice"]["content"], json!([]));

    let (_, body) = post_json(&app, "/course/filter", filter_body("Geo", 0, 20)).await;
    assert_eq!(body["slice"]["content"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_filter_pages() {
    let app = setup_test_app();
    for i in 0..5 {
        create_course(&app, &format!("LAB-{i}"), "Lab work").await;
    }

    let (_, body) = post_json(&app, "/course/filter", filter_body("Lab", 0, 2)).await;
    assert_eq!(body["slice"]["content"].as_array().unwrap().len(), 2);
    assert_eq!(body["slice"]["hasNext"], true);

    let (_, body) = post_json(&app, "/course/filter", filter_body("Lab", 2, 2)).await;
    assert_eq!(body["slice"]["content"].as_array().unwrap().len(), 1);
    assert_eq!(body["slice"]["hasNext"], false);
}

#[tokio::test]
async fn test_filter_missing() {
    let app = setup_test_app();

    let (status, body) = post_empty(&app, "/course/filter").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"].is_null());
    assert_eq!(status_codes(&body), vec!["FILTER_MISSING"]);

    let (status, body) = post_json(&app, "/course/filter", json!({"filter": "math"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(status_codes(&body), vec!["FILTER_MISSING"]);
}

#[tokio::test]
async fn test_filter_sort_not_supported() {
    let app = setup_test_app();

    let (status, body) = post_json(
        &app,
        "/course/filter",
        json!({
            "filter": "",
            "pagination": {
                "pageNumber": 0,
                "pageSize": 20,
                "sort": [{"field": "code", "direction": "ASC"}]
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(status_codes(&body), vec!["SORT_NOT_SUPPORTED"]);
}
