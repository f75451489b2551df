mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::{MockTransport, dataset_body};
use labellerr_client::transport::{ApiRequest, RequestBody};
use labellerr_client::{
    ClientError, LabellerrClient, PollError, WorkflowError, WorkflowOptions, WorkflowStep,
};
use labellerr_core::dto::project::ProjectPayload;
use serde_json::{Value, json};

struct Fixture {
    folder: PathBuf,
}

impl Fixture {
    fn new(files: &[&str]) -> Self {
        let folder =
            std::env::temp_dir().join(format!("labellerr-workflow-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&folder).unwrap();
        for name in files {
            std::fs::write(folder.join(name), b"image bytes").unwrap();
        }
        Self { folder }
    }

    fn payload(&self) -> ProjectPayload {
        serde_json::from_value(json!({
            "client_id": "67890",
            "dataset_name": "cats",
            "dataset_description": "pictures of cats",
            "data_type": "image",
            "created_by": "owner@example.com",
            "project_name": "cat detection",
            "annotation_guide": [{
                "question_number": 1,
                "question": "Where is the cat?",
                "question_id": "q-1",
                "option_type": "BoundingBox",
                "required": true,
                "color": "#00ff00"
            }],
            "folder_to_upload": self.folder
        }))
        .unwrap()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.folder);
    }
}

/// Platform that accepts every step; `dataset_status` is served on dataset reads
fn platform(dataset_status: u16) -> Arc<MockTransport> {
    MockTransport::new(move |request: &ApiRequest| {
        let body = match (request.method.as_str(), request.path.as_str()) {
            ("POST", "/datasets/create") => json!({ "response": "success" }),
            ("POST", "/connectors/upload/local") => json!({ "response": {} }),
            ("GET", path) if path.starts_with("/datasets/") => dataset_body(dataset_status),
            ("POST", "/annotations/create_template") => {
                json!({ "response": { "template_id": "template-1" } })
            }
            ("POST", "/projects/create") => {
                json!({ "response": { "project_id": "project-1" } })
            }
            (method, path) => panic!("unexpected request {} {}", method, path),
        };
        Ok(body)
    })
}

fn client(transport: &Arc<MockTransport>) -> LabellerrClient {
    common::client(transport)
}

fn json_body(request: &ApiRequest) -> &Value {
    match &request.body {
        RequestBody::Json(body) => body,
        other => panic!("expected a JSON body, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_client_id_sends_nothing() {
    let fixture = Fixture::new(&["cat.jpg"]);
    let mut payload = fixture.payload();
    payload.client_id = String::new();
    let transport = platform(300);

    let err = client(&transport)
        .create_project_with_dataset(&payload, WorkflowOptions::default())
        .await
        .unwrap_err();

    match err {
        WorkflowError::Validation(e) => {
            assert_eq!(e.field, "client_id");
            assert!(e.to_string().contains("client_id"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_creates_dataset_template_and_project_in_order() {
    let fixture = Fixture::new(&["cat1.jpg", "cat2.png", "readme.md"]);
    let transport = platform(300);

    let created = client(&transport)
        .create_project_with_dataset(&fixture.payload(), WorkflowOptions::default())
        .await
        .unwrap();

    assert!(created.dataset_id.starts_with("dataset-image-"));
    assert_eq!(created.template_id, "template-1");
    assert_eq!(created.project_id, "project-1");
    assert_eq!(created.files_uploaded, 2);

    let dataset_path = format!("/datasets/{}", created.dataset_id);
    assert_eq!(
        transport.paths(),
        vec![
            "/datasets/create",
            "/connectors/upload/local",
            dataset_path.as_str(),
            "/annotations/create_template",
            "/projects/create",
        ]
    );

    let calls = transport.calls();
    assert!(calls.iter().all(|request| request.client_id == "67890"));

    let upload = &calls[1];
    assert_eq!(upload.query_value("dataset_id"), Some(created.dataset_id.as_str()));
    assert!(matches!(&upload.body, RequestBody::Files(files) if files.len() == 2));

    let template = json_body(&calls[3]);
    assert_eq!(template["templateName"], "cat detection");
    assert_eq!(template["questions"][0]["options"][0]["option_name"], "#00ff00");

    let project = json_body(&calls[4]);
    assert_eq!(project["attached_datasets"], json!([created.dataset_id]));
    assert_eq!(project["annotation_template_id"], "template-1");
    assert_eq!(project["data_type"], "image");
    assert_eq!(project["rotations"]["annotation_rotation_count"], 1);
    assert_eq!(project["auto_label"], false);
}

#[tokio::test(start_paused = true)]
async fn test_autolabel_reaches_the_project() {
    let fixture = Fixture::new(&["cat.jpg"]);
    let mut payload = fixture.payload();
    payload.autolabel = true;
    let transport = platform(300);

    client(&transport)
        .create_project_with_dataset(&payload, WorkflowOptions::default())
        .await
        .unwrap();

    let calls = transport.calls();
    let project = calls
        .iter()
        .find(|request| request.path == "/projects/create")
        .unwrap();
    assert_eq!(json_body(project)["auto_label"], true);
}

#[tokio::test(start_paused = true)]
async fn test_existing_template_is_reused() {
    let fixture = Fixture::new(&["cat.jpg"]);
    let mut payload = fixture.payload();
    payload.annotation_template_id = Some("template-existing".to_string());
    let transport = platform(300);

    let created = client(&transport)
        .create_project_with_dataset(&payload, WorkflowOptions::default())
        .await
        .unwrap();

    assert_eq!(created.template_id, "template-existing");
    assert!(!transport.paths().iter().any(|p| p == "/annotations/create_template"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_dataset_stops_the_workflow() {
    let fixture = Fixture::new(&["cat.jpg"]);
    let transport = platform(500);

    let err = client(&transport)
        .create_project_with_dataset(&fixture.payload(), WorkflowOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(WorkflowStep::WaitForDataset));
    assert!(matches!(
        err,
        WorkflowError::DatasetNotReady {
            source: PollError::Failed { attempts: 1, .. },
            ..
        }
    ));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_dataset_that_never_finishes_times_out() {
    let fixture = Fixture::new(&["cat.jpg"]);
    let transport = platform(100);

    let err = client(&transport)
        .create_project_with_dataset(&fixture.payload(), WorkflowOptions::default())
        .await
        .unwrap_err();

    match err {
        WorkflowError::DatasetNotReady { source, .. } => assert!(source.is_timed_out()),
        other => panic!("expected dataset timeout, got {:?}", other),
    }
    assert!(!transport.paths().iter().any(|p| p == "/projects/create"));
}

#[tokio::test(start_paused = true)]
async fn test_project_failure_is_attributed_to_its_step() {
    let fixture = Fixture::new(&["cat.jpg"]);
    let transport = MockTransport::new(|request: &ApiRequest| {
        match (request.method.as_str(), request.path.as_str()) {
            (_, "/projects/create") => {
                Err(ClientError::api_error(500, "project service unavailable"))
            }
            (_, "/annotations/create_template") => {
                Ok(json!({ "response": { "template_id": "template-1" } }))
            }
            ("GET", path) if path.starts_with("/datasets/") => Ok(dataset_body(300)),
            _ => Ok(json!({ "response": {} })),
        }
    });

    let err = client(&transport)
        .create_project_with_dataset(&fixture.payload(), WorkflowOptions::default())
        .await
        .unwrap_err();

    match err {
        WorkflowError::Step { step, source } => {
            assert_eq!(step, WorkflowStep::CreateProject);
            assert!(source.is_server_error());
        }
        other => panic!("expected step error, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_folder_without_matching_files_sends_nothing() {
    let fixture = Fixture::new(&["notes.txt"]);
    let transport = platform(300);

    let err = client(&transport)
        .create_project_with_dataset(&fixture.payload(), WorkflowOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Step {
            step: WorkflowStep::UploadFiles,
            source: ClientError::Validation(_),
        }
    ));
    assert_eq!(transport.call_count(), 0);
}
