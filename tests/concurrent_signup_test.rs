use axum::http::StatusCode;
use futures::future::join_all;
use mergington_activities::api;
use mergington_activities::db::init_db;
use mergington_activities::{Email, NewActivity, RegistrationError, Repository};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

async fn setup_repo(capacity: u32) -> (Arc<Repository>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    repo.insert_activities(&[NewActivity::new("Robotics", "Build robots", "Mondays", capacity)])
        .await
        .unwrap();
    (repo, temp_dir)
}

async fn roster_len(repo: &Repository) -> usize {
    repo.get_all_activities()
        .await
        .unwrap()
        .into_iter()
        .find(|a| a.name == "Robotics")
        .map(|a| a.participants.len())
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signups_never_overbook() {
    let (repo, _temp) = setup_repo(3).await;

    let tasks = (0..20).map(|i| {
        let repo = repo.clone();
        tokio::spawn(async move {
            let email = Email::from_str(&format!("student{}@x.edu", i)).unwrap();
            repo.add_participant("Robotics", &email).await
        })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(RegistrationError::ActivityFull)))
        .count();

    assert_eq!(admitted, 3);
    assert_eq!(full, 17);
    assert_eq!(roster_len(&repo).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_signups_register_once() {
    let (repo, _temp) = setup_repo(10).await;

    let tasks = (0..8).map(|_| {
        let repo = repo.clone();
        tokio::spawn(async move {
            let email = Email::from_str("same@x.edu").unwrap();
            repo.add_participant("Robotics", &email).await
        })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(RegistrationError::AlreadyRegistered)))
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(roster_len(&repo).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_signups_respect_capacity() {
    let (repo, _temp) = setup_repo(2).await;
    let app = api::create_router(api::AppState::new(repo.clone()));

    let requests = (0..6).map(|i| {
        let app = app.clone();
        async move {
            let req = axum::http::Request::builder()
                .method("POST")
                .uri(format!("/activities/Robotics/signup?email=s{}@x.edu", i))
                .body(axum::body::Body::empty())
                .unwrap();
            app.oneshot(req).await.unwrap().status()
        }
    });
    let statuses = join_all(requests).await;

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 2);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count(),
        4
    );
    assert_eq!(roster_len(&repo).await, 2);
}
