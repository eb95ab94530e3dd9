mod common;

use common::{answer_service, create_puzzle, puzzle_service, puzzle_with_answers, setup, OWNER};
use seqpuzzle_core::{
    AnswerUpdate, Authorization, ModelValidationError, OwnershipGuard, ServiceError,
    SqlitePuzzleRepository,
};
use uuid::Uuid;

#[test]
fn authorize_is_tri_state() {
    let conn = setup();
    let puzzle = create_puzzle(&conn, "guarded");
    let guard = OwnershipGuard::new(SqlitePuzzleRepository::try_new(&conn).unwrap());

    assert_eq!(
        guard.authorize(puzzle, Some(OWNER)).unwrap(),
        Authorization::Allowed
    );
    assert_eq!(
        guard.authorize(puzzle, Some("intruder")).unwrap(),
        Authorization::Forbidden
    );
    assert_eq!(
        guard.authorize(puzzle, None).unwrap(),
        Authorization::Forbidden
    );
    assert_eq!(
        guard.authorize(Uuid::new_v4(), Some(OWNER)).unwrap(),
        Authorization::NotFound
    );
}

#[test]
fn absent_caller_readings_differ_only_for_missing_puzzles() {
    let conn = setup();
    let guard = OwnershipGuard::new(SqlitePuzzleRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    assert_eq!(guard.authorize(missing, None).unwrap(), Authorization::NotFound);
    assert_eq!(
        guard.authorize_strict(missing, None).unwrap(),
        Authorization::Forbidden
    );
}

#[test]
fn deleted_puzzle_is_not_found_for_its_owner() {
    let conn = setup();
    let puzzle = create_puzzle(&conn, "doomed");
    let puzzles = puzzle_service(&conn);

    puzzles.delete_puzzle_as(Some(OWNER), puzzle).unwrap();

    assert_eq!(
        puzzles.guard().authorize(puzzle, Some(OWNER)).unwrap(),
        Authorization::NotFound
    );
    let err = puzzles.delete_puzzle_as(Some(OWNER), puzzle).unwrap_err();
    assert!(matches!(err, ServiceError::PuzzleNotFound(id) if id == puzzle));
}

#[test]
fn gated_answer_mutations_require_owner() {
    let conn = setup();
    let puzzle = puzzle_with_answers(&conn, &["a", "b"]);
    let answers = answer_service(&conn);
    let first = answers.list_ordered(puzzle).unwrap()[0].uuid;

    let err = answers.insert_as(Some("intruder"), puzzle, "x", 0).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(id) if id == puzzle));
    let err = answers
        .update_as(None, first, &AnswerUpdate::move_to(1))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    let err = answers.remove_as(Some("intruder"), first).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    let err = answers.list_ordered_as(None, puzzle).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    assert_eq!(common::ordered_values(&conn, puzzle), vec!["a", "b"]);

    answers.insert_as(Some(OWNER), puzzle, "x", 1).unwrap();
    answers.append_as(Some(OWNER), puzzle, "z").unwrap();
    assert!(answers
        .update_as(Some(OWNER), first, &AnswerUpdate::move_to(3))
        .unwrap());
    let listed = answers.list_ordered_as(Some(OWNER), puzzle).unwrap();
    let values: Vec<&str> = listed.iter().map(|answer| answer.value.as_str()).collect();
    assert_eq!(values, vec!["x", "b", "z", "a"]);
    assert!(answers.remove_as(Some(OWNER), first).unwrap());
    common::assert_dense(&conn, puzzle);
}

#[test]
fn gated_operations_on_unknown_targets() {
    let conn = setup();
    let answers = answer_service(&conn);
    let missing_puzzle = Uuid::new_v4();
    let missing_answer = Uuid::new_v4();

    let err = answers
        .insert_as(Some(OWNER), missing_puzzle, "x", 0)
        .unwrap_err();
    assert!(matches!(err, ServiceError::PuzzleNotFound(id) if id == missing_puzzle));
    assert!(!answers.remove_as(Some(OWNER), missing_answer).unwrap());
    assert!(!answers
        .update_as(Some(OWNER), missing_answer, &AnswerUpdate::value("x"))
        .unwrap());
    let err = answers.get_answer_as(Some(OWNER), missing_answer).unwrap_err();
    assert!(matches!(err, ServiceError::AnswerNotFound(id) if id == missing_answer));
}

#[test]
fn get_answer_as_checks_owning_puzzle() {
    let conn = setup();
    let puzzle = puzzle_with_answers(&conn, &["a"]);
    let answers = answer_service(&conn);
    let id = answers.list_ordered(puzzle).unwrap()[0].uuid;

    let answer = answers.get_answer_as(Some(OWNER), id).unwrap();
    assert_eq!(answer.puzzle_uuid, puzzle);
    assert_eq!(answer.value, "a");

    let err = answers.get_answer_as(Some("intruder"), id).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(id) if id == puzzle));
}

#[test]
fn puzzle_catalog_lists_renames_and_validates() {
    let conn = setup();
    let puzzles = puzzle_service(&conn);

    let first = puzzles.create_puzzle("  First ", OWNER).unwrap();
    assert_eq!(first.name, "First");
    assert_eq!(first.owner, OWNER);
    puzzles.create_puzzle("Other", "someone-else").unwrap();

    let err = puzzles.create_puzzle("   ", OWNER).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ModelValidationError::BlankName)
    ));
    let err = puzzles.create_puzzle("Named", " ").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ModelValidationError::BlankOwner)
    ));

    let err = puzzles
        .rename_puzzle_as(Some("someone-else"), first.uuid, "Stolen")
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    puzzles
        .rename_puzzle_as(Some(OWNER), first.uuid, "Renamed")
        .unwrap();

    let owned = puzzles.list_puzzles_for_owner(OWNER).unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].uuid, first.uuid);
    assert_eq!(owned[0].name, "Renamed");

    puzzles.delete_puzzle_as(Some(OWNER), first.uuid).unwrap();
    assert!(puzzles.list_puzzles_for_owner(OWNER).unwrap().is_empty());
    assert!(puzzles.get_puzzle(first.uuid).unwrap().is_none());
}
