use bindery::{DefaultParameterValue, ProcedureParameters, Value, binding};

#[derive(ProcedureParameters)]
#[bindery(procedure = "dbo.SaveOrder", defaults = "Self::fallbacks")]
#[bindery(method(name = "total", alias = "Total", ignore_if_null))]
struct SaveOrder {
    #[bindery(param, param(alias = "OrderCode", default = "none"))]
    code: Option<String>,
    #[bindery(param(alias = "Quantity", default = 1))]
    quantity: Option<i32>,
    lines: Vec<i64>,
}

impl SaveOrder {
    fn total(&self) -> Option<i64> {
        Some(self.lines.iter().sum())
    }

    fn fallbacks(&self) -> Vec<DefaultParameterValue> {
        vec![DefaultParameterValue::new("dbo.SaveOrder", "code", "fallback")]
    }
}

fn main() {
    let order = SaveOrder {
        code: None,
        quantity: None,
        lines: vec![2, 3],
    };
    let map = binding::resolve("dbo.SaveOrder", &order).unwrap();
    assert_eq!(map.get("@code"), Some(&Value::Text("fallback".into())));
    assert_eq!(map.get("@OrderCode"), Some(&Value::Text("none".into())));
    assert_eq!(map.get("@Quantity"), Some(&Value::Int(1)));
    assert_eq!(map.get("@Total"), Some(&Value::Int64(5)));
}
