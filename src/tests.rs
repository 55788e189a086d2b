//! Integration tests for the admin client against an in-process mock API.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::config::SubmitPolicy;
use crate::controller::CrudController;
use crate::errors::{ClientError, FailureKind};
use crate::models::{
    Classroom, ClassroomAllocation, Resource, Student, Subject, SubjectAllocation, Teacher,
};
use crate::notify::Tone;
use crate::screens::{
    ClassroomAllocations, StudentRegistration, StudentReport, SubjectAllocations, TeacherRoster,
};

type HitKey = (&'static str, String, Option<i64>);

#[derive(Default)]
struct MockData {
    collections: HashMap<String, Vec<Value>>,
    next_id: i64,
    hits: HashMap<HitKey, usize>,
    failing: HashSet<String>,
    stalled: HashSet<String>,
}

/// In-memory stand-in for the SMS REST API with request counters and
/// failure / stall injection keyed by `Resource` or `Resource/id`.
#[derive(Clone, Default)]
struct MockApi {
    data: Arc<Mutex<MockData>>,
}

fn id_field(resource: &str) -> &'static str {
    match resource {
        "Students" => Student::ID_FIELD,
        "Teachers" => Teacher::ID_FIELD,
        "Subjects" => Subject::ID_FIELD,
        "Classrooms" => Classroom::ID_FIELD,
        _ => SubjectAllocation::ID_FIELD,
    }
}

fn record_id(record: &Value, resource: &str) -> Option<i64> {
    record.get(id_field(resource)).and_then(Value::as_i64)
}

impl MockApi {
    fn router(&self) -> Router {
        Router::new()
            .route("/api/{resource}", get(list_records).post(create_record))
            .route(
                "/api/{resource}/{id}",
                get(get_record).put(update_record).delete(delete_record),
            )
            .with_state(self.clone())
    }

    fn seed(&self, resource: &str, records: Vec<Value>) {
        let mut data = self.data.lock().unwrap();
        data.collections.insert(resource.to_string(), records);
    }

    fn fail(&self, target: &str) {
        self.data.lock().unwrap().failing.insert(target.to_string());
    }

    fn heal(&self, target: &str) {
        self.data.lock().unwrap().failing.remove(target);
    }

    fn stall(&self, target: &str) {
        self.data.lock().unwrap().stalled.insert(target.to_string());
    }

    /// Requests to the collection path.
    fn count(&self, method: &'static str, resource: &str) -> usize {
        let data = self.data.lock().unwrap();
        data.hits
            .get(&(method, resource.to_string(), None))
            .copied()
            .unwrap_or(0)
    }

    /// Requests to one record path.
    fn count_at(&self, method: &'static str, resource: &str, id: i64) -> usize {
        let data = self.data.lock().unwrap();
        data.hits
            .get(&(method, resource.to_string(), Some(id)))
            .copied()
            .unwrap_or(0)
    }

    /// Requests to any record path of the resource.
    fn count_items(&self, method: &'static str, resource: &str) -> usize {
        let data = self.data.lock().unwrap();
        data.hits
            .iter()
            .filter(|((m, r, id), _)| *m == method && r == resource && id.is_some())
            .map(|(_, n)| *n)
            .sum()
    }

    fn records(&self, resource: &str) -> Vec<Value> {
        let data = self.data.lock().unwrap();
        data.collections.get(resource).cloned().unwrap_or_default()
    }

    /// Record the hit, then apply any injected stall or failure.
    async fn intercept(
        &self,
        method: &'static str,
        resource: &str,
        id: Option<i64>,
    ) -> Option<Response> {
        let (fail, stall) = {
            let mut data = self.data.lock().unwrap();
            *data
                .hits
                .entry((method, resource.to_string(), id))
                .or_default() += 1;
            let item = id.map(|id| format!("{resource}/{id}"));
            let matches = |set: &HashSet<String>| {
                set.contains(resource) || item.as_ref().is_some_and(|key| set.contains(key))
            };
            (matches(&data.failing), matches(&data.stalled))
        };

        if stall {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        if fail {
            return Some((StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response());
        }
        None
    }
}

async fn list_records(State(mock): State<MockApi>, Path(resource): Path<String>) -> Response {
    if let Some(response) = mock.intercept("GET", &resource, None).await {
        return response;
    }
    Json(mock.records(&resource)).into_response()
}

async fn create_record(
    State(mock): State<MockApi>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(response) = mock.intercept("POST", &resource, None).await {
        return response;
    }
    let mut data = mock.data.lock().unwrap();
    data.next_id += 1;
    let id = 100 + data.next_id;
    body[id_field(&resource)] = json!(id);
    data.collections
        .entry(resource)
        .or_default()
        .push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn get_record(
    State(mock): State<MockApi>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    if let Some(response) = mock.intercept("GET", &resource, Some(id)).await {
        return response;
    }
    match mock
        .records(&resource)
        .into_iter()
        .find(|record| record_id(record, &resource) == Some(id))
    {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_record(
    State(mock): State<MockApi>,
    Path((resource, id)): Path<(String, i64)>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(response) = mock.intercept("PUT", &resource, Some(id)).await {
        return response;
    }
    let mut data = mock.data.lock().unwrap();
    let records = data.collections.entry(resource.clone()).or_default();
    match records
        .iter_mut()
        .find(|record| record_id(record, &resource) == Some(id))
    {
        Some(record) => {
            body[id_field(&resource)] = json!(id);
            *record = body;
            StatusCode::NO_CONTENT.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_record(
    State(mock): State<MockApi>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    if let Some(response) = mock.intercept("DELETE", &resource, Some(id)).await {
        return response;
    }
    let mut data = mock.data.lock().unwrap();
    let records = data.collections.entry(resource.clone()).or_default();
    let before = records.len();
    records.retain(|record| record_id(record, &resource) != Some(id));
    if records.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    mock: MockApi,
    api: ApiClient,
}

impl TestFixture {
    async fn new() -> Self {
        let mock = MockApi::default();
        let app = mock.router();

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = ApiClient::with_client(reqwest::Client::new(), &format!("http://{}", addr));
        let fixture = TestFixture { mock, api };
        fixture.seed_school();
        fixture
    }

    fn seed_school(&self) {
        self.mock.seed(
            "Teachers",
            vec![
                json!({"teacherId": 3, "firstName": "Ada", "lastName": "Lovelace", "contactNo": "0711111111", "emailAddress": "ada@school.lk"}),
                json!({"teacherId": 1, "firstName": "Alan", "lastName": "Turing", "contactNo": "0722222222", "emailAddress": "alan@school.lk"}),
                json!({"teacherId": 2, "firstName": "Grace", "lastName": "Hopper", "contactNo": "0733333333", "emailAddress": "grace@school.lk"}),
            ],
        );
        self.mock.seed(
            "Subjects",
            vec![
                json!({"subjectId": 10, "subjectName": "Mathematics"}),
                json!({"subjectId": 11, "subjectName": "Science"}),
            ],
        );
        self.mock.seed(
            "Classrooms",
            vec![
                json!({"classroomId": 20, "classroomName": "Grade 6A"}),
                json!({"classroomId": 21, "classroomName": "Grade 6B"}),
            ],
        );
        self.mock.seed(
            "Students",
            vec![json!({
                "studentId": 5,
                "firstName": "Nimal",
                "lastName": "Perera",
                "contactPerson": "Sunil Perera",
                "contactNo": "0771234567",
                "emailAddress": "nimal@example.com",
                "dateOfBirth": "2012-03-01",
                "age": "12",
                "classroomId": 20
            })],
        );
        self.mock.seed(
            "AllocateSubjects",
            vec![
                json!({"allocationId": 40, "teacherId": 1, "subjectId": 10}),
                json!({"allocationId": 41, "teacherId": 2, "subjectId": 11}),
                json!({"allocationId": 42, "teacherId": 3, "subjectId": 10}),
            ],
        );
        self.mock.seed(
            "AllocateClassrooms",
            vec![json!({"allocationId": 50, "classroomId": 21, "subjectId": 11})],
        );
    }

    fn teachers(&self, policy: SubmitPolicy) -> TeacherRoster {
        CrudController::new(self.api.clone(), policy)
    }
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

fn fill_teacher(roster: &mut TeacherRoster) {
    roster.update_draft_field("firstName", "Katherine").unwrap();
    roster.update_draft_field("lastName", "Johnson").unwrap();
    roster.update_draft_field("contactNo", "0744444444").unwrap();
    roster
        .update_draft_field("emailAddress", "katherine@school.lk")
        .unwrap();
}

fn notification_message<R: Resource>(controller: &CrudController<R>) -> String {
    controller
        .notifications()
        .current()
        .map(|n| n.message.clone())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_load_mirrors_server_list_in_order() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);

    roster.activate().await.unwrap();

    let ids: Vec<i64> = roster.records().iter().map(|t| t.teacher_id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(roster.records()[0].first_name, "Ada");
    assert_eq!(fixture.mock.count("GET", "Teachers"), 1);
    assert!(!roster.notifications().is_open());
}

#[tokio::test]
async fn test_load_failure_keeps_previous_list() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    fixture.mock.fail("Teachers");
    let err = roster.load().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert_eq!(roster.records().len(), 3);
    let notification = roster.notifications().current().unwrap();
    assert_eq!(notification.tone, Tone::Error);
    assert_eq!(
        notification.message,
        "An error occurred while loading the teachers."
    );
}

#[tokio::test]
async fn test_create_posts_once_then_reloads_once() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.begin_create();
    fill_teacher(&mut roster);
    roster.submit().await.unwrap();

    assert_eq!(fixture.mock.count("POST", "Teachers"), 1);
    assert_eq!(fixture.mock.count("GET", "Teachers"), 2);
    assert_eq!(roster.records().len(), 4);
    assert_eq!(roster.records()[3].first_name, "Katherine");
    assert_eq!(roster.draft(), &Teacher::default());
    assert_eq!(roster.editing(), None);
    assert_eq!(notification_message(&roster), "Teacher added successfully!");

    roster.notifications_mut().dismiss();
    assert!(!roster.notifications().is_open());
}

#[tokio::test]
async fn test_edit_issues_put_to_edited_id() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.begin_edit(2).unwrap();
    assert_eq!(roster.editing(), Some(2));
    assert_eq!(roster.draft().first_name, "Grace");
    assert_eq!(roster.draft().email_address, "grace@school.lk");

    roster.update_draft_field("lastName", "Brewster").unwrap();
    roster.submit().await.unwrap();

    assert_eq!(fixture.mock.count_at("PUT", "Teachers", 2), 1);
    assert_eq!(fixture.mock.count("POST", "Teachers"), 0);
    assert_eq!(fixture.mock.count("GET", "Teachers"), 2);
    let grace = roster.records().iter().find(|t| t.teacher_id == 2).unwrap();
    assert_eq!(grace.last_name, "Brewster");
    assert_eq!(roster.editing(), None);
    assert_eq!(notification_message(&roster), "Teacher edited successfully!");
}

#[tokio::test]
async fn test_begin_edit_unknown_id_leaves_state() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();
    roster.begin_edit(1).unwrap();

    let err = roster.begin_edit(99).unwrap_err();

    assert!(matches!(err, ClientError::UnknownRecord(99)));
    assert_eq!(roster.editing(), Some(1));
    assert_eq!(roster.draft().first_name, "Alan");
}

#[tokio::test]
async fn test_new_edit_discards_previous_errors() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.begin_edit(1).unwrap();
    roster.update_draft_field("emailAddress", "").unwrap();
    assert!(roster.submit().await.is_err());
    assert!(roster.errors().contains_key("emailAddress"));

    roster.begin_edit(3).unwrap();
    assert!(roster.errors().is_empty());
    assert_eq!(roster.draft().first_name, "Ada");
}

#[tokio::test]
async fn test_blocking_policy_stops_invalid_submit() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.begin_create();
    roster.update_draft_field("firstName", "Katherine").unwrap();
    roster.update_draft_field("contactNo", "07a").unwrap();
    let err = roster.submit().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Validation);
    assert_eq!(fixture.mock.count("POST", "Teachers"), 0);
    assert_eq!(roster.errors()["lastName"], "Last Name is required");
    assert_eq!(
        roster.errors()["contactNo"],
        "Please enter a valid phone number"
    );
    assert_eq!(roster.errors()["emailAddress"], "Email is required");
    assert!(!roster.errors().contains_key("firstName"));
    assert_eq!(roster.draft().first_name, "Katherine");
    assert_eq!(
        roster.notifications().current().unwrap().tone,
        Tone::Error
    );

    roster.update_draft_field("emailAddress", "abc").unwrap();
    assert!(!roster.errors().contains_key("emailAddress"));
    assert_eq!(roster.validate()["emailAddress"], "Invalid email format");
}

#[tokio::test]
async fn test_advisory_policy_submits_despite_errors() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Advisory);
    roster.activate().await.unwrap();

    roster.begin_create();
    roster.update_draft_field("firstName", "Katherine").unwrap();
    roster.submit().await.unwrap();

    assert_eq!(fixture.mock.count("POST", "Teachers"), 1);
    assert_eq!(fixture.mock.count("GET", "Teachers"), 2);
}

#[tokio::test]
async fn test_failed_submit_keeps_draft_for_retry() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.begin_create();
    fill_teacher(&mut roster);
    fixture.mock.fail("Teachers");
    let err = roster.submit().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert_eq!(roster.draft().first_name, "Katherine");
    assert_eq!(fixture.mock.count("GET", "Teachers"), 1);
    assert_eq!(
        notification_message(&roster),
        "An error occurred while adding the teacher."
    );

    fixture.mock.heal("Teachers");
    roster.submit().await.unwrap();
    assert_eq!(fixture.mock.count("POST", "Teachers"), 2);
    assert_eq!(roster.records().len(), 4);
}

#[tokio::test]
async fn test_remove_deletes_once_and_reloads_once() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.remove(1).await.unwrap();

    assert_eq!(fixture.mock.count_at("DELETE", "Teachers", 1), 1);
    assert_eq!(fixture.mock.count("GET", "Teachers"), 2);
    let ids: Vec<i64> = roster.records().iter().map(|t| t.teacher_id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(notification_message(&roster), "Teacher deleted successfully!");
}

#[tokio::test]
async fn test_failed_remove_does_not_reload() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    fixture.mock.fail("Teachers/1");
    assert!(roster.remove(1).await.is_err());

    assert_eq!(fixture.mock.count_at("DELETE", "Teachers", 1), 1);
    assert_eq!(fixture.mock.count("GET", "Teachers"), 1);
    assert_eq!(roster.records().len(), 3);
    assert_eq!(
        notification_message(&roster),
        "An error occurred while deleting the teacher."
    );
}

#[tokio::test]
async fn test_cancel_drops_stalled_load() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    fixture.mock.stall("Teachers");
    let handle = roster.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let err = roster.load().await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(roster.records().len(), 3);
    assert!(!roster.notifications().is_open());
}

#[tokio::test]
async fn test_reactivation_opens_fresh_scope() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);
    roster.activate().await.unwrap();

    roster.deactivate();
    assert!(roster.load().await.unwrap_err().is_cancelled());

    roster.activate().await.unwrap();
    assert_eq!(fixture.mock.count("GET", "Teachers"), 2);
}

#[tokio::test]
async fn test_student_registration_derives_age() {
    let fixture = TestFixture::new().await;
    let mut screen = StudentRegistration::new(fixture.api.clone(), SubmitPolicy::Blocking)
        .with_clock(fixed_today);
    screen.activate().await.unwrap();

    assert_eq!(screen.classrooms().len(), 2);
    let nimal = &screen.students().records()[0];
    assert_eq!(screen.classroom_name(nimal), Some("Grade 6A"));

    let students = screen.students_mut();
    students.begin_create();
    students.update_draft_field("firstName", "Kamala").unwrap();
    students.update_draft_field("lastName", "Silva").unwrap();
    students
        .update_draft_field("contactPerson", "Ruwan Silva")
        .unwrap();
    students.update_draft_field("contactNo", "0779876543").unwrap();
    students
        .update_draft_field("emailAddress", "kamala@example.com")
        .unwrap();
    students
        .update_draft_field("dateOfBirth", "2010-06-15")
        .unwrap();
    assert_eq!(students.draft().age, "13");

    assert_eq!(students.validate()["classroomId"], "Classroom is required");
    students.update_draft_field("classroomId", "21").unwrap();
    assert!(students.validate().is_empty());

    students.submit().await.unwrap();
    assert_eq!(fixture.mock.count("POST", "Students"), 1);

    let stored = fixture.mock.records("Students");
    let created: Student = serde_json::from_value(stored[1].clone()).unwrap();
    assert_eq!(created.age, "13");
    assert_eq!(created.classroom_id, 21);
    assert_eq!(
        notification_message(students),
        "Student registration successful!"
    );
}

#[tokio::test]
async fn test_student_load_failure_still_fills_classrooms() {
    let fixture = TestFixture::new().await;
    let mut screen = StudentRegistration::new(fixture.api.clone(), SubmitPolicy::Blocking);

    fixture.mock.fail("Students");
    let err = screen.activate().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(screen.students().records().is_empty());
    assert_eq!(screen.classrooms().len(), 2);
    assert_eq!(fixture.mock.count("GET", "Classrooms"), 1);
    assert_eq!(
        notification_message(screen.students()),
        "An error occurred while loading the students."
    );
}

#[tokio::test]
async fn test_deactivated_registration_ignores_classrooms() {
    let fixture = TestFixture::new().await;
    let mut screen = StudentRegistration::new(fixture.api.clone(), SubmitPolicy::Blocking);
    screen.activate().await.unwrap();
    assert_eq!(screen.classrooms().len(), 2);

    fixture.mock.seed(
        "Classrooms",
        vec![json!({"classroomId": 22, "classroomName": "Grade 7A"})],
    );
    screen.deactivate();
    let err = screen.load_classrooms().await.unwrap_err();

    assert!(err.is_cancelled());
    let ids: Vec<i64> = screen.classrooms().iter().map(|c| c.classroom_id).collect();
    assert_eq!(ids, vec![20, 21]);
    assert_eq!(fixture.mock.count("GET", "Classrooms"), 1);

    screen.activate().await.unwrap();
    assert_eq!(screen.classrooms()[0].classroom_id, 22);
}

#[tokio::test]
async fn test_new_birth_date_clears_stale_age_error() {
    let fixture = TestFixture::new().await;
    let mut screen = StudentRegistration::new(fixture.api.clone(), SubmitPolicy::Blocking)
        .with_clock(fixed_today);
    screen.activate().await.unwrap();

    let students = screen.students_mut();
    students.begin_create();
    students.update_draft_field("dateOfBirth", "soon").unwrap();
    assert_eq!(students.draft().age, "");
    assert!(students.submit().await.is_err());
    assert_eq!(students.errors()["age"], "Please enter a valid age");

    students
        .update_draft_field("dateOfBirth", "2010-06-15")
        .unwrap();

    assert_eq!(students.draft().age, "13");
    assert!(!students.errors().contains_key("age"));
    assert!(!students.errors().contains_key("dateOfBirth"));
    assert!(students.errors().contains_key("firstName"));
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let fixture = TestFixture::new().await;
    let mut roster = fixture.teachers(SubmitPolicy::Blocking);

    let err = roster.update_draft_field("salary", "1000").unwrap_err();
    assert!(matches!(err, ClientError::UnknownField(ref name) if name == "salary"));
}

#[tokio::test]
async fn test_allocation_resolution_fans_out_two_lookups_per_row() {
    let fixture = TestFixture::new().await;
    let mut screen = SubjectAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);

    screen.load().await.unwrap();

    assert_eq!(fixture.mock.count("GET", "AllocateSubjects"), 1);
    assert_eq!(fixture.mock.count_items("GET", "Teachers"), 3);
    assert_eq!(fixture.mock.count_items("GET", "Subjects"), 3);

    let rows: Vec<(i64, String, String)> = screen
        .rows()
        .iter()
        .map(|row| (row.allocation_id, row.left.full_name(), row.right.subject_name.clone()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (40, "Alan Turing".to_string(), "Mathematics".to_string()),
            (41, "Grace Hopper".to_string(), "Science".to_string()),
            (42, "Ada Lovelace".to_string(), "Mathematics".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_allocation_list_needs_no_lookups() {
    let fixture = TestFixture::new().await;
    fixture.mock.seed("AllocateSubjects", vec![]);
    let mut screen = SubjectAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);

    screen.load().await.unwrap();

    assert!(screen.rows().is_empty());
    assert_eq!(fixture.mock.count_items("GET", "Teachers"), 0);
    assert_eq!(fixture.mock.count_items("GET", "Subjects"), 0);
}

#[tokio::test]
async fn test_failed_lookup_publishes_nothing() {
    let fixture = TestFixture::new().await;
    let mut screen = SubjectAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);
    screen.load().await.unwrap();
    assert_eq!(screen.rows().len(), 3);

    fixture.mock.seed(
        "AllocateSubjects",
        vec![json!({"allocationId": 43, "teacherId": 2, "subjectId": 11})],
    );
    fixture.mock.fail("Subjects/11");
    let err = screen.load().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    let ids: Vec<i64> = screen.rows().iter().map(|row| row.allocation_id).collect();
    assert_eq!(ids, vec![40, 41, 42]);
    assert_eq!(
        screen.notifications().current().unwrap().tone,
        Tone::Error
    );
}

#[tokio::test]
async fn test_missing_referenced_record_fails_batch() {
    let fixture = TestFixture::new().await;
    fixture.mock.seed(
        "AllocateSubjects",
        vec![
            json!({"allocationId": 40, "teacherId": 1, "subjectId": 10}),
            json!({"allocationId": 44, "teacherId": 77, "subjectId": 10}),
        ],
    );
    let mut screen = SubjectAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);

    let err = screen.load().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 404, .. }));
    assert!(screen.rows().is_empty());
}

#[tokio::test]
async fn test_deallocate_reloads_and_refans() {
    let fixture = TestFixture::new().await;
    let mut screen = SubjectAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);
    screen.load().await.unwrap();

    screen.deallocate(41).await.unwrap();

    assert_eq!(fixture.mock.count_at("DELETE", "AllocateSubjects", 41), 1);
    assert_eq!(fixture.mock.count("GET", "AllocateSubjects"), 2);
    assert_eq!(fixture.mock.count_items("GET", "Teachers"), 5);
    assert_eq!(fixture.mock.count_items("GET", "Subjects"), 5);
    let ids: Vec<i64> = screen.rows().iter().map(|row| row.allocation_id).collect();
    assert_eq!(ids, vec![40, 42]);
    assert_eq!(
        screen.notifications().current().unwrap().message,
        "Subject deallocated successfully!"
    );
}

#[tokio::test]
async fn test_allocate_subject_requires_selections() {
    let fixture = TestFixture::new().await;
    let mut screen = SubjectAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);
    screen.activate().await.unwrap();

    assert_eq!(screen.left_options().len(), 3);
    assert_eq!(screen.right_options().len(), 2);

    screen.update_draft_field("teacherId", "3").unwrap();
    let err = screen.submit().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Validation);
    assert_eq!(screen.errors()["subjectId"], "Subject is required");
    assert_eq!(fixture.mock.count("POST", "AllocateSubjects"), 0);

    screen.update_draft_field("subjectId", "11").unwrap();
    screen.submit().await.unwrap();

    assert_eq!(fixture.mock.count("POST", "AllocateSubjects"), 1);
    assert_eq!(screen.rows().len(), 4);
    assert_eq!(screen.draft(), &SubjectAllocation::default());
    let last = screen.rows().last().unwrap();
    assert_eq!(last.left.first_name, "Ada");
    assert_eq!(last.right.subject_name, "Science");
}

#[tokio::test]
async fn test_classroom_allocations_resolve() {
    let fixture = TestFixture::new().await;
    let mut screen = ClassroomAllocations::new(fixture.api.clone(), SubmitPolicy::Blocking);

    screen.load().await.unwrap();

    assert_eq!(fixture.mock.count_at("GET", "Classrooms", 21), 1);
    assert_eq!(fixture.mock.count_at("GET", "Subjects", 11), 1);
    let row = &screen.rows()[0];
    assert_eq!(row.allocation_id, 50);
    assert_eq!(row.left.classroom_name, "Grade 6B");
    assert_eq!(row.right.subject_name, "Science");
    assert_eq!(screen.draft(), &ClassroomAllocation::default());
}

#[tokio::test]
async fn test_student_report_selection() {
    let fixture = TestFixture::new().await;
    let mut report = StudentReport::new(fixture.api.clone());
    report.activate().await.unwrap();

    assert_eq!(report.students().len(), 1);
    assert!(report.details().is_none());

    report.select(5).await.unwrap();
    assert_eq!(report.selected(), Some(5));
    assert_eq!(report.details().unwrap().full_name(), "Nimal Perera");
    assert_eq!(fixture.mock.count_at("GET", "Students", 5), 1);

    assert!(report.select(999).await.is_err());
    assert_eq!(report.selected(), Some(5));
    assert_eq!(report.details().unwrap().student_id, 5);
}
