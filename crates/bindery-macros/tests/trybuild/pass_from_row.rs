use bindery::{FromRow, RowSet, Value};

#[derive(Debug, PartialEq, FromRow)]
#[bindery(rename_all = "pascal_case")]
struct Account {
    account_id: i64,
    #[bindery(column = "display_name")]
    name: Option<String>,
    #[bindery(default)]
    is_admin: bool,
    #[bindery(skip)]
    notes: Vec<char>,
}

fn main() {
    let mut rows = RowSet::new(["AccountId", "display_name"]);
    rows.push(vec![Value::Int64(3), Value::Text("Ann".into())]).unwrap();
    let account = Account::from_row(rows.first().unwrap()).unwrap();
    assert_eq!(
        account,
        Account {
            account_id: 3,
            name: Some("Ann".into()),
            is_admin: false,
            notes: Vec::new(),
        }
    );
}
