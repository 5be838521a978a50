//! Integration tests for the database facade, run against a scripted database.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bindery::{
        CommandKind, ConnectionStrings, DatabaseFacade, Error, FacadeOptions, FromRow,
        ProcedureParameters, Value, command, no_parameters, procedure,
    };
    use bindery_test::{MockDatabase, rows, text};

    fn facade() -> DatabaseFacade<MockDatabase> {
        FacadeOptions::new().disable_logging().open(MockDatabase::new())
    }

    #[test]
    fn first_requires_a_row() -> anyhow::Result<()> {
        let f = facade();
        let err = f
            .first("SELECT name FROM users", no_parameters, |set| Ok(set.len()))
            .unwrap_err();
        assert!(matches!(err, Error::RowNotFound));

        let none = f.first_row_or_default("SELECT 1", no_parameters, |row| {
            row.parse::<i32>("v")
        })?;
        assert_eq!(none, None);
        Ok(())
    }

    #[test]
    fn first_row_parses_the_first_row_only() -> anyhow::Result<()> {
        let f = facade();
        f.database()
            .push_rows(rows(["n"], vec![[Value::Int(1)], [Value::Int(2)]])?);
        let n = f.first_row("SELECT n FROM t", no_parameters, |row| row.parse::<i32>("n"))?;
        assert_eq!(n, 1);
        Ok(())
    }

    #[test]
    fn fetch_rows_binds_before_running() -> anyhow::Result<()> {
        let f = facade();
        f.database().push_rows(rows(
            ["id", "name"],
            vec![[Value::Int(1), text("ann")], [Value::Int(2), text("bob")]],
        )?);
        let names = f.fetch_rows(
            "SELECT id, name FROM users WHERE id IN (@ids)",
            |cmd| cmd.add_parameter_list::<i32>("ids", vec![1, 2]),
            |row| row.parse::<String>("name"),
        )?;
        assert_eq!(names, ["ann", "bob"]);

        let sent = f.database().last_command().ok_or(Error::RowNotFound)?;
        assert_eq!(sent.sql(), "SELECT id, name FROM users WHERE id IN (@ids0,@ids1)");
        assert_eq!(sent.kind(), CommandKind::Text);
        assert_eq!(sent.parameters().len(), 2);
        Ok(())
    }

    #[test]
    fn dictionaries_reject_duplicate_keys() -> anyhow::Result<()> {
        let f = facade();
        let set = rows(
            ["k", "v"],
            vec![[text("a"), Value::Int(1)], [text("b"), Value::Int(2)]],
        )?;
        f.database().push_rows(set.clone());
        let map = f.fetch_dictionary_rows("SELECT k, v FROM t", no_parameters, |row| {
            Ok((row.parse::<String>("k")?, row.parse::<i32>("v")?))
        })?;
        assert_eq!(map, HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]));

        f.database()
            .push_rows(rows(["k"], vec![[text("a")], [text("a")]])?);
        let err = f
            .fetch_dictionary_rows("SELECT k FROM t", no_parameters, |row| {
                Ok((row.parse::<String>("k")?, ()))
            })
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref key) if key == "\"a\""));
        Ok(())
    }

    #[test]
    fn scalars_are_parsed_as_text() -> anyhow::Result<()> {
        let f = facade();
        f.database().push_scalar(Value::Int64(42));
        f.database().push_scalar(Value::Null);
        f.database().push_scalar(Value::Int(1));
        assert_eq!(f.execute_scalar::<i64, _>("SELECT COUNT(*) FROM t", no_parameters)?, 42);
        assert_eq!(f.execute_scalar::<Option<i32>, _>("SELECT NULL", no_parameters)?, None);
        assert!(!f.execute_scalar::<bool, _>("SELECT 1", no_parameters)?);
        Ok(())
    }

    #[test]
    fn unsupported_scalars_never_reach_the_database() {
        let f = facade();
        let err = f
            .execute_scalar::<u128, _>("SELECT 1", no_parameters)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
        assert!(f.database().commands().is_empty());
    }

    #[test]
    fn binding_errors_never_reach_the_database() {
        let f = facade();
        let err = f
            .execute("UPDATE t SET a = @a", |cmd| {
                cmd.add_parameter("a", 1)?;
                cmd.add_parameter("@a", 2)
            })
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateParameter(_)));
        assert!(f.database().commands().is_empty());
    }

    #[test]
    fn execute_reports_affected_rows() -> anyhow::Result<()> {
        let f = facade();
        f.database().push_affected(3);
        assert_eq!(f.execute("DELETE FROM t", no_parameters)?, 3);
        assert_eq!(f.execute("DELETE FROM t", no_parameters)?, 0);
        Ok(())
    }

    #[test]
    fn driver_errors_propagate() {
        let f = facade();
        f.database().push_error("connection reset");
        let err = f.execute("DELETE FROM t", no_parameters).unwrap_err();
        let inner = err.into_database_error().map(|e| e.to_string());
        assert_eq!(inner.as_deref(), Some("connection reset"));
    }

    #[derive(ProcedureParameters)]
    #[bindery(procedure = "dbo.GetUsers")]
    struct GetUsers {
        #[bindery(param(alias = "Active", default = true))]
        active: Option<bool>,
        #[bindery(param(ignore_if_null))]
        region: Option<String>,
    }

    #[derive(Debug, PartialEq, FromRow)]
    #[bindery(rename_all = "pascal_case")]
    struct User {
        user_id: i64,
        name: Option<String>,
        #[bindery(default)]
        is_admin: bool,
    }

    #[test]
    fn procedures_bind_from_configuration() -> anyhow::Result<()> {
        let f = facade();
        f.database().push_rows(rows(
            ["UserId", "Name", "IsAdmin"],
            vec![[Value::Int64(5), text("ann"), Value::Int(1)]],
        )?);
        let query = GetUsers {
            active: None,
            region: None,
        };
        let users: Vec<User> =
            f.fetch_as(procedure("dbo.GetUsers"), |cmd| cmd.add_procedure_parameters(&query))?;
        assert_eq!(
            users,
            [User {
                user_id: 5,
                name: Some("ann".into()),
                is_admin: true,
            }]
        );

        let sent = f.database().last_command().ok_or(Error::RowNotFound)?;
        assert_eq!(sent.kind(), CommandKind::StoredProcedure);
        assert_eq!(sent.parameters().get("@Active"), Some(&Value::Bool(true)));
        assert!(!sent.parameters().contains("@region"));
        Ok(())
    }

    #[test]
    fn text_commands_cannot_take_procedure_parameters() {
        let f = facade();
        let query = GetUsers {
            active: Some(false),
            region: None,
        };
        let err = f
            .execute(command("dbo.GetUsers"), |cmd| cmd.add_procedure_parameters(&query))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    struct Connections {
        primary: &'static str,
    }

    impl ConnectionStrings for Connections {}

    #[test]
    fn connect_opens_through_the_callback() -> anyhow::Result<()> {
        let strings = Connections { primary: "mock://primary" };
        let f = FacadeOptions::new().connect(&strings, |c| {
            assert_eq!(c.primary, "mock://primary");
            Ok(MockDatabase::new())
        })?;
        assert_eq!(f.execute("SELECT 1", no_parameters)?, 0);

        let failed = FacadeOptions::new().connect(&strings, |_| {
            Err::<MockDatabase, _>(Error::Configuration("no such connection".into()))
        });
        assert!(failed.is_err());
        Ok(())
    }
}
