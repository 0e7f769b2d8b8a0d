use std::time::Duration;

use anyhow::Result;
use quizsmith::domain::{QuestionRecord, QuizDocument};
use quizsmith::error::QuizError;
use quizsmith::storage::{FsQuizStore, QuizStore};
use serde_json::{json, Map};
use tempfile::tempdir;

fn record(question: &str) -> QuestionRecord {
    QuestionRecord {
        kind: "single".to_string(),
        question: question.to_string(),
        answer: json!("A"),
        options: Some(json!(["A", "B"])),
        extra: Map::new(),
    }
}

#[tokio::test]
async fn round_trips_a_quiz_through_the_filesystem() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path());

    let quiz = QuizDocument::new("midterm", vec![record("Q1?"), record("Q2?")]);
    store.save_quiz(&quiz).await?;

    let fetched = store.get_quiz("midterm").await?.expect("quiz exists");
    assert_eq!(fetched.name, "midterm");
    assert_eq!(fetched.questions, quiz.questions);

    Ok(())
}

#[tokio::test]
async fn file_holds_the_bare_question_array() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path());

    store
        .save_quiz(&QuizDocument::new("midterm", vec![record("Q?")]))
        .await?;

    let raw = std::fs::read_to_string(dir.path().join("midterm.json"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    assert_eq!(
        value,
        json!([{
            "type": "single",
            "question": "Q?",
            "answer": "A",
            "options": ["A", "B"]
        }])
    );

    Ok(())
}

#[tokio::test]
async fn missing_quiz_reads_as_none() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path());

    assert!(store.get_quiz("ghost").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn listing_is_newest_first() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path());

    store
        .save_quiz(&QuizDocument::new("older", vec![record("Q?")]))
        .await?;
    // File modification times need to differ for the ordering to be visible
    tokio::time::sleep(Duration::from_millis(50)).await;
    store
        .save_quiz(&QuizDocument::new("newer", vec![record("Q?")]))
        .await?;

    let listed = store.list_quizzes().await?;
    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["newer", "older"]);

    Ok(())
}

#[tokio::test]
async fn listing_an_empty_store_is_empty_not_an_error() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path().join("does-not-exist-yet"));

    assert!(store.list_quizzes().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn second_save_under_the_same_name_is_refused() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path());

    let quiz = QuizDocument::new("midterm", vec![record("Q?")]);
    store.save_quiz(&quiz).await?;
    let err = store.save_quiz(&quiz).await.unwrap_err();

    assert!(matches!(err, QuizError::QuizExists(_)));

    Ok(())
}

#[tokio::test]
async fn path_traversal_names_are_rejected() -> Result<()> {
    let dir = tempdir()?;
    let store = FsQuizStore::new(dir.path());

    let quiz = QuizDocument::new("../escape", vec![record("Q?")]);
    let err = store.save_quiz(&quiz).await.unwrap_err();
    assert!(matches!(err, QuizError::InvalidQuizName(_)));

    let err = store.get_quiz("a/b").await.unwrap_err();
    assert!(matches!(err, QuizError::InvalidQuizName(_)));

    Ok(())
}
