use std::fs;

use gudang::repl::{self, Control};
use gudang::storage::schema::Schema;
use gudang::utils::mock::TempSchema;

const USERS_AND_PRODUCTS: &str = "2\n\
    users;3;id:4:int,username:32:varchar,email:255:varchar\n\
    products;3;id:4:int,name:20:varchar,price:8:real\n";

/// Run one line through the prompt pipeline and capture its output.
fn run(schema: &mut Schema, line: &str) -> String {
    let mut out = Vec::new();
    repl::process_line(line, schema, &mut out).expect("statement failed");
    String::from_utf8(out).expect("utf8 output")
}

fn insert_user(schema: &mut Schema, id: i32) {
    let line = format!("insert into users values ({id}, 'user{id}', 'user{id}@example.com')");
    assert_eq!(run(schema, &line), "Executed.\n");
}

#[test]
fn test_insert_and_select_round_trip() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    assert_eq!(
        run(&mut schema, "insert into users values (1, 'alice', 'a@x')"),
        "Executed.\n"
    );
    assert_eq!(
        run(&mut schema, "select * from users"),
        "(1, alice, a@x)\nExecuted.\n"
    );
}

#[test]
fn test_rows_come_back_in_insertion_order() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=5 {
        insert_user(&mut schema, id);
    }

    assert_eq!(
        run(&mut schema, "select id from users"),
        "(1)\n(2)\n(3)\n(4)\n(5)\nExecuted.\n"
    );
}

#[test]
fn test_negative_id_leaves_the_table_unchanged() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    assert_eq!(
        run(&mut schema, "insert into users values (-1, 'x', 'x@y')"),
        "ID must be positive.\n"
    );
    assert_eq!(run(&mut schema, "select * from users"), "Executed.\n");
}

#[test]
fn test_oversized_string_leaves_the_table_unchanged() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    let long_username = "a".repeat(33);
    let line = format!("insert into users values (1, '{long_username}', 'a@x')");
    assert_eq!(run(&mut schema, &line), "String is too long.\n");
    assert_eq!(run(&mut schema, "select * from users"), "Executed.\n");
}

#[test]
fn test_unknown_verb_echoes_the_line() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    assert_eq!(
        run(&mut schema, "foo bar"),
        "Unrecognized keyword at start of 'foo bar'.\n"
    );
}

#[test]
fn test_unknown_meta_command() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    assert_eq!(run(&mut schema, ".tables"), "Unrecognized command '.tables'\n");
}

#[test]
fn test_exit_meta_command_requests_shutdown() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    let mut out = Vec::new();
    let control = repl::process_line(".exit", &mut schema, &mut out).unwrap();
    assert_eq!(control, Control::Exit);
    assert!(out.is_empty());
}

#[test]
fn test_where_operators_filter_the_scan() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=5 {
        insert_user(&mut schema, id);
    }

    assert_eq!(
        run(&mut schema, "select id from users where id >= 4"),
        "(4)\n(5)\nExecuted.\n"
    );
    assert_eq!(
        run(&mut schema, "select id from users where id != 3"),
        "(1)\n(2)\n(4)\n(5)\nExecuted.\n"
    );
    assert_eq!(
        run(&mut schema, "select id from users where username = 'user2'"),
        "(2)\nExecuted.\n"
    );
    assert_eq!(
        run(&mut schema, "select id from users where id < 1"),
        "Executed.\n"
    );
}

#[test]
fn test_update_rewrites_matching_rows_and_is_idempotent() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    insert_user(&mut schema, 1);
    insert_user(&mut schema, 2);

    assert_eq!(
        run(&mut schema, "update users set username = 'c' where id = 2"),
        "Executed.\n"
    );
    let after_first = run(&mut schema, "select username from users");
    assert_eq!(after_first, "(user1)\n(c)\nExecuted.\n");

    assert_eq!(
        run(&mut schema, "update users set username = 'c' where id = 2"),
        "Executed.\n"
    );
    assert_eq!(run(&mut schema, "select username from users"), after_first);
}

#[test]
fn test_update_leaves_non_matching_rows_alone() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=3 {
        insert_user(&mut schema, id);
    }

    run(&mut schema, "update users set email = 'new@x' where id > 1");
    assert_eq!(
        run(&mut schema, "select email from users"),
        "(user1@example.com)\n(new@x)\n(new@x)\nExecuted.\n"
    );
}

#[test]
fn test_delete_compacts_and_preserves_survivor_order() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=3 {
        insert_user(&mut schema, id);
    }

    assert_eq!(
        run(&mut schema, "delete from users where id = 2"),
        "Executed.\n"
    );
    assert_eq!(
        run(&mut schema, "select id from users"),
        "(1)\n(3)\nExecuted.\n"
    );
}

#[test]
fn test_delete_with_consecutive_holes() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=6 {
        insert_user(&mut schema, id);
    }

    assert_eq!(
        run(&mut schema, "delete from users where id <= 3"),
        "Executed.\n"
    );
    assert_eq!(
        run(&mut schema, "select id from users"),
        "(4)\n(5)\n(6)\nExecuted.\n"
    );
}

#[test]
fn test_delete_everything_empties_the_scan() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=3 {
        insert_user(&mut schema, id);
    }

    run(&mut schema, "delete from users where id > 0");
    assert_eq!(run(&mut schema, "select * from users"), "Executed.\n");
    assert_eq!(schema.table(0).num_rows, 0);
}

#[test]
fn test_insert_after_delete_reuses_the_freed_range() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    for id in 1..=3 {
        insert_user(&mut schema, id);
    }
    run(&mut schema, "delete from users where id = 1");
    insert_user(&mut schema, 9);

    assert_eq!(
        run(&mut schema, "select id from users"),
        "(2)\n(3)\n(9)\nExecuted.\n"
    );
}

#[test]
fn test_table_full_after_max_rows() {
    // Two 2048-byte rows per page keeps max_rows at 200.
    let fixture = TempSchema::new("1\nbig;2;id:4:int,payload:2044:varchar\n");
    let mut schema = fixture.open().unwrap();

    let max_rows = schema.table(0).max_rows;
    assert_eq!(max_rows, 200);

    for id in 1..=max_rows {
        let line = format!("insert into big values ({id}, 'p{id}')");
        assert_eq!(run(&mut schema, &line), "Executed.\n");
    }

    let overflow = format!("insert into big values ({}, 'p')", max_rows + 1);
    assert_eq!(run(&mut schema, &overflow), "Error: Table full.\n");
    assert_eq!(schema.table(0).num_rows, max_rows);
}

#[test]
fn test_rows_persist_across_a_reopen() {
    let fixture = TempSchema::users();

    {
        let mut schema = fixture.open().unwrap();
        insert_user(&mut schema, 1);
        insert_user(&mut schema, 2);
        schema.close().unwrap();
    }

    let row_size = 291;
    let backing = fixture.data_dir().join("users.table");
    assert_eq!(fs::metadata(&backing).unwrap().len(), 2 * row_size);

    let mut schema = fixture.open().unwrap();
    assert_eq!(
        run(&mut schema, "select * from users"),
        "(1, user1, user1@example.com)\n(2, user2, user2@example.com)\nExecuted.\n"
    );
}

#[test]
fn test_deletes_persist_across_a_reopen() {
    let fixture = TempSchema::users();

    {
        let mut schema = fixture.open().unwrap();
        for id in 1..=3 {
            insert_user(&mut schema, id);
        }
        run(&mut schema, "delete from users where id = 2");
        schema.close().unwrap();
    }

    let backing = fixture.data_dir().join("users.table");
    assert_eq!(fs::metadata(&backing).unwrap().len(), 2 * 291);

    let mut schema = fixture.open().unwrap();
    assert_eq!(schema.table(0).num_rows, 2);
    assert_eq!(
        run(&mut schema, "select id from users"),
        "(1)\n(3)\nExecuted.\n"
    );
}

#[test]
fn test_real_columns_format_with_six_decimals() {
    let fixture = TempSchema::new(USERS_AND_PRODUCTS);
    let mut schema = fixture.open().unwrap();

    assert_eq!(
        run(&mut schema, "insert into products values (1, 'widget', 2.5)"),
        "Executed.\n"
    );
    assert_eq!(
        run(&mut schema, "select * from products"),
        "(1, widget, 2.500000)\nExecuted.\n"
    );
    assert_eq!(
        run(&mut schema, "select name from products where price > 2"),
        "(widget)\nExecuted.\n"
    );
    assert_eq!(
        run(&mut schema, "select name from products where price < 2"),
        "Executed.\n"
    );
}

#[test]
fn test_tables_are_independent() {
    let fixture = TempSchema::new(USERS_AND_PRODUCTS);
    let mut schema = fixture.open().unwrap();

    insert_user(&mut schema, 1);
    run(&mut schema, "insert into products values (7, 'bolt', 0.1)");

    assert_eq!(
        run(&mut schema, "select id from users"),
        "(1)\nExecuted.\n"
    );
    assert_eq!(
        run(&mut schema, "select id from products"),
        "(7)\nExecuted.\n"
    );
}

#[test]
fn test_scan_crosses_page_boundaries() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    let rows_per_page = schema.table(0).rows_per_page;
    for id in 1..=(rows_per_page as i32 + 2) {
        insert_user(&mut schema, id);
    }

    let expected: String = (1..=rows_per_page as i32 + 2)
        .map(|id| format!("({id})\n"))
        .collect::<String>()
        + "Executed.\n";
    assert_eq!(run(&mut schema, "select id from users"), expected);
}

#[test]
fn test_empty_line_is_unrecognized() {
    let fixture = TempSchema::users();
    let mut schema = fixture.open().unwrap();

    assert_eq!(
        run(&mut schema, ""),
        "Unrecognized keyword at start of ''.\n"
    );
}
