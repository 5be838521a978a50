use bindery::{ToValues, Value};

#[derive(ToValues)]
#[bindery(rename_all = "pascal_case")]
struct Filter<T> {
    user_id: T,
    #[bindery(rename = "q")]
    query: Option<String>,
    #[bindery(skip)]
    _cache: std::cell::Cell<u8>,
}

fn main() {
    let filter = Filter {
        user_id: 7i64,
        query: None,
        _cache: Default::default(),
    };
    let values = filter.to_values();
    assert_eq!(values.get("UserId"), Some(&Value::Int64(7)));
    assert_eq!(values.get("q"), Some(&Value::Null));
    assert_eq!(values.len(), 2);
}
