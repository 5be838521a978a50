//! Integration tests for derived procedure bindings.

#[cfg(test)]
mod tests {
    use bindery::{
        BindingTable, DefaultParameterValue, Error, MemberKind, ProcedureParameters, Value,
        binding, procedure,
    };

    #[derive(ProcedureParameters)]
    #[bindery(procedure = "dbo.SaveWidget")]
    struct SaveWidget {
        #[bindery(param(alias = "x"))]
        a: String,
        #[bindery(param(alias = "y", default = 42))]
        b: Option<i32>,
        #[bindery(param(alias = "note", ignore_if_null))]
        note: Option<String>,
        #[bindery(param(alias = "dup1"), param(alias = "dup2"))]
        shared: i64,
        unbound: Option<u8>,
    }

    fn widget() -> SaveWidget {
        SaveWidget {
            a: "alpha".into(),
            b: None,
            note: None,
            shared: 99,
            unbound: None,
        }
    }

    #[test]
    fn binds_aliases_and_inline_defaults() -> anyhow::Result<()> {
        let map = binding::resolve("dbo.SaveWidget", &widget())?;
        assert_eq!(map.get("@x"), Some(&Value::Text("alpha".into())));
        assert_eq!(map.get("@y"), Some(&Value::Int(42)));
        assert!(!map.contains("@a"));
        assert!(!map.contains("@unbound"));
        Ok(())
    }

    #[test]
    fn present_values_win_over_defaults() -> anyhow::Result<()> {
        let mut w = widget();
        w.b = Some(7);
        w.note = Some("hi".into());
        let map = binding::resolve("dbo.SaveWidget", &w)?;
        assert_eq!(map.get("@y"), Some(&Value::Int(7)));
        assert_eq!(map.get("@note"), Some(&Value::Text("hi".into())));
        Ok(())
    }

    #[test]
    fn ignored_nulls_are_left_out() -> anyhow::Result<()> {
        let map = binding::resolve("dbo.SaveWidget", &widget())?;
        assert!(!map.contains("@note"));
        assert!(!map.contains("note"));
        Ok(())
    }

    #[test]
    fn one_member_many_parameters() -> anyhow::Result<()> {
        let map = binding::resolve("dbo.SaveWidget", &widget())?;
        assert_eq!(map.get("@dup1"), Some(&Value::Int64(99)));
        assert_eq!(map.get("@dup1"), map.get("@dup2"));
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, ["@x", "@y", "@dup1", "@dup2"]);
        Ok(())
    }

    #[test]
    fn other_procedures_bind_nothing() -> anyhow::Result<()> {
        let map = binding::resolve("dbo.DeleteWidget", &widget())?;
        assert!(map.is_empty());

        let mut cmd = procedure("dbo.DeleteWidget");
        cmd.add_procedure_parameters(&widget())?;
        assert!(cmd.parameters().is_empty());
        Ok(())
    }

    #[test]
    fn derived_table_is_shared() {
        let first = SaveWidget::bindings();
        let second = SaveWidget::bindings();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.procedure(), Some("dbo.SaveWidget"));
        let members: Vec<_> = first.members().iter().map(|m| m.name()).collect();
        assert_eq!(members, ["a", "b", "note", "shared"]);
        assert!(first.members().iter().all(|m| m.kind() == MemberKind::Field));
    }

    #[derive(ProcedureParameters)]
    #[bindery(procedure = "dbo.SaveOrder", defaults = "order_defaults")]
    #[bindery(method(name = "total", alias = "Total"))]
    struct SaveOrder {
        #[bindery(param)]
        code: Option<String>,
        #[bindery(param(alias = "Region", default = "EU"))]
        region: Option<String>,
        lines: Vec<i64>,
    }

    impl SaveOrder {
        fn total(&self) -> Option<i64> {
            (!self.lines.is_empty()).then(|| self.lines.iter().sum())
        }
    }

    fn order_defaults(_: &SaveOrder) -> Vec<DefaultParameterValue> {
        vec![
            DefaultParameterValue::new("dbo.OtherProc", "code", "wrong"),
            DefaultParameterValue::new("dbo.SaveOrder", "code", "ORD-0"),
            DefaultParameterValue::new("dbo.SaveOrder", "region", "ignored"),
            DefaultParameterValue::new("dbo.SaveOrder", "total", 0i64),
        ]
    }

    #[test]
    fn external_defaults_fill_remaining_nulls() -> anyhow::Result<()> {
        let order = SaveOrder {
            code: None,
            region: None,
            lines: Vec::new(),
        };
        let map = binding::resolve("dbo.SaveOrder", &order)?;
        assert_eq!(map.get("@code"), Some(&Value::Text("ORD-0".into())));
        assert_eq!(map.get("@Region"), Some(&Value::Text("EU".into())));
        assert_eq!(map.get("@Total"), Some(&Value::Int64(0)));
        Ok(())
    }

    #[test]
    fn methods_are_read_when_bound() -> anyhow::Result<()> {
        let order = SaveOrder {
            code: Some("ORD-7".into()),
            region: Some("US".into()),
            lines: vec![4, 5],
        };
        let mut cmd = procedure("dbo.SaveOrder");
        cmd.add_procedure_parameters(&order)?;
        assert_eq!(cmd.parameters().get("@code"), Some(&Value::Text("ORD-7".into())));
        assert_eq!(cmd.parameters().get("@Total"), Some(&Value::Int64(9)));
        let kinds: Vec<_> = SaveOrder::bindings()
            .members()
            .iter()
            .map(|m| (m.name(), m.kind()))
            .collect();
        assert!(kinds.contains(&("total", MemberKind::Method)));
        Ok(())
    }

    #[derive(ProcedureParameters)]
    #[bindery(procedure = "dbo.Clash")]
    struct Clash {
        #[bindery(param(alias = "id"))]
        left: i32,
        #[bindery(param(alias = "@id"))]
        right: i32,
    }

    #[test]
    fn duplicate_aliases_fail_loudly() {
        let err = binding::resolve("dbo.Clash", &Clash { left: 1, right: 2 }).unwrap_err();
        assert!(matches!(err, Error::DuplicateParameter(ref name) if name == "@id"));

        let mut cmd = procedure("dbo.Clash");
        assert!(cmd.add_procedure_parameters(&Clash { left: 1, right: 2 }).is_err());
        assert!(cmd.parameters().is_empty());
    }

    struct Undeclared;

    impl ProcedureParameters for Undeclared {
        fn bindings() -> &'static BindingTable {
            binding::memoize::<Self>(|| {
                BindingTable::builder()
                    .field("a", [bindery::ParameterBinding::new()])
                    .build()
            })
        }

        fn member_value(&self, member: &str) -> bindery::Result<Value> {
            Err(Error::reflection(member, "unreadable"))
        }
    }

    #[test]
    fn tables_without_a_procedure_are_rejected() {
        assert!(matches!(
            binding::resolve("dbo.Anything", &Undeclared),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn text_commands_reject_procedure_parameters() {
        let mut cmd = bindery::command("SELECT 1");
        assert!(matches!(
            cmd.add_procedure_parameters(&widget()),
            Err(Error::Configuration(_))
        ));
    }
}
