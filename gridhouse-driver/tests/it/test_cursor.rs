use similar_asserts::assert_eq;

use gridhouse_driver::types::TypeTag;
use gridhouse_driver::{
    CursorMetadata, DriverError, FetchDirection, Row, Statement, Value,
};

use crate::util::{people_exec, people_metadata, people_rows, Canned, MockExec};

#[test]
fn advance_walks_the_stream_and_stops() {
    crate::util::init_logging();
    let mut exec = people_exec(3);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    assert!(cursor.advance().unwrap());
    assert!(cursor.advance().unwrap());
    assert!(cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());
}

#[test]
fn exhaustion_is_idempotent_and_does_not_touch_the_stream() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    assert!(cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());
    let pulls_at_exhaustion = exec.pulls.load(std::sync::atomic::Ordering::SeqCst);

    assert!(!cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());
    assert_eq!(
        exec.pulls.load(std::sync::atomic::Ordering::SeqCst),
        pulls_at_exhaustion
    );
}

#[test]
fn row_limit_cuts_off_before_the_stream_ends() {
    let mut exec = people_exec(3);
    let mut stmt = Statement::new(&mut exec);
    stmt.set_max_rows(2);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    assert!(cursor.advance().unwrap());
    assert!(cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());

    // only two rows were ever pulled, even though the stream held three
    assert_eq!(exec.pull_count(), 2);
}

#[test]
fn typed_reads_by_index_and_label() {
    let mut exec = people_exec(3);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    cursor.advance().unwrap();
    cursor.advance().unwrap();

    assert_eq!(cursor.get::<i32, _>(1).unwrap(), 1);
    assert_eq!(cursor.get::<String, _>("name").unwrap(), "Jack1");
    assert!(!cursor.was_null());
}

#[test]
fn unknown_column_reads_fail_with_the_offending_identifier() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();
    cursor.advance().unwrap();

    let err = cursor.get::<String, _>("nonexistent").unwrap_err();
    assert!(err
        .to_string()
        .contains("does not contain column \"nonexistent\""));

    let err = cursor.get::<String, _>(7).unwrap_err();
    assert!(err
        .to_string()
        .contains("does not contain column with index 7"));
}

#[test]
fn null_reads_yield_the_zero_value_and_raise_was_null() {
    let metadata = people_metadata();
    let rows = vec![Row::new(vec![Value::Integer(0), Value::Null])];
    let mut exec = MockExec::new(vec![Canned::Rows(metadata, rows)]);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();
    cursor.advance().unwrap();

    assert_eq!(cursor.get::<String, _>("name").unwrap(), "");
    assert!(cursor.was_null());
    assert_eq!(cursor.get_opt::<String, _>("name").unwrap(), None);
    assert!(cursor.was_null());

    // the flag reflects only the most recent read
    assert_eq!(cursor.get::<i32, _>("age").unwrap(), 0);
    assert!(!cursor.was_null());
}

#[test]
fn operations_fail_once_closed() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();
    cursor.advance().unwrap();
    cursor.close().unwrap();

    assert!(matches!(cursor.advance(), Err(DriverError::ClosedCursor)));
    assert!(matches!(
        cursor.get::<i32, _>(1),
        Err(DriverError::ClosedCursor)
    ));
    assert!(matches!(
        cursor.set_fetch_direction(FetchDirection::Unknown),
        Err(DriverError::ClosedCursor)
    ));
    assert!(matches!(
        cursor.is_before_first(),
        Err(DriverError::ClosedCursor)
    ));
}

#[test]
fn closing_twice_releases_the_stream_once() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    cursor.close().unwrap();
    cursor.close().unwrap();
    assert_eq!(exec.close_count(), 1);
}

#[test]
fn dropping_the_cursor_releases_the_stream() {
    let mut exec = people_exec(1);
    {
        let mut stmt = Statement::new(&mut exec);
        let cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();
        drop(cursor);
    }
    assert_eq!(exec.close_count(), 1);
}

#[test]
fn close_on_completion_closes_the_statement_without_recursion() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    stmt.set_close_on_completion();
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    cursor.close().unwrap();
    assert!(cursor.is_closed());
    assert!(stmt.is_closed());
    assert_eq!(exec.close_count(), 1);
}

#[test]
fn reexecution_implicitly_closes_the_previous_cursor() {
    let mut exec = MockExec::new(vec![
        Canned::Rows(people_metadata(), people_rows(2)),
        Canned::Rows(people_metadata(), people_rows(2)),
    ]);
    let mut stmt = Statement::new(&mut exec);
    let mut first = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();
    assert!(first.advance().unwrap());

    let mut second = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();
    assert!(matches!(first.advance(), Err(DriverError::ClosedCursor)));
    assert!(second.advance().unwrap());
}

#[test]
fn cursor_debug_reports_state_without_the_stream() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    assert!(format!("{cursor:?}").contains("BeforeFirst"));
    cursor.advance().unwrap();
    assert!(format!("{cursor:?}").contains("OnRow(1)"));
}

#[test]
fn positional_state_queries() {
    let mut exec = people_exec(1);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    assert!(cursor.is_before_first().unwrap());
    assert_eq!(cursor.row_index().unwrap(), 0);

    cursor.advance().unwrap();
    assert!(!cursor.is_before_first().unwrap());
    assert!(!cursor.is_after_last().unwrap());
    assert_eq!(cursor.row_index().unwrap(), 1);

    cursor.advance().unwrap();
    assert!(cursor.is_after_last().unwrap());
    assert_eq!(cursor.row_index().unwrap(), 0);
}

#[test]
fn fetch_direction_is_an_advisory_hint() {
    let mut exec = people_exec(2);
    let mut stmt = Statement::new(&mut exec);
    let mut cursor = stmt.execute_query("SELECT age, name FROM people", &[]).unwrap();

    assert_eq!(cursor.fetch_direction(), FetchDirection::Forward);
    cursor.set_fetch_direction(FetchDirection::Reverse).unwrap();
    assert_eq!(cursor.fetch_direction(), FetchDirection::Reverse);

    // iteration is still physically forward
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.get::<i32, _>("age").unwrap(), 0);
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.get::<i32, _>("age").unwrap(), 1);
}

#[test]
#[should_panic(expected = "not positioned on a row")]
fn current_row_outside_on_row_is_a_caller_bug() {
    let metadata = CursorMetadata::from_parts(["a".to_string()], [TypeTag::Integer]);
    let mut exec = MockExec::new(vec![Canned::Rows(metadata, vec![])]);
    let mut stmt = Statement::new(&mut exec);
    let cursor = stmt.execute_query("SELECT a FROM t", &[]).unwrap();
    let _ = cursor.current_row();
}
